//! # Lematizador
//!
//! Reduz cada token à sua forma de dicionário (lema), dada a tag POS:
//! `was/VBD → be`, `beaches/NNS → beach`, `activated/VBN → activate`.
//!
//! O lema é a chave usada na consulta ao inventário, por isso erros aqui viram
//! "no sense available" lá na frente.
//!
//! ## Estratégia
//!
//! 1. **Dicionário** no formato `palavra<TAB>tag<TAB>lema` (formas irregulares).
//! 2. **Regras de sufixo** dirigidas pela tag para o resto (`-ies → -y`,
//!    `-ed`, `-ing`, `-er`/`-est` com desdobramento de consoante e `e` final).

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use tracing::info;

use crate::error::{Result, WsdError};

/// Dicionário embutido no crate
const BUNDLED_DICTIONARY: &str = include_str!("../data/en-lemmatizer.dict");

/// Finais de radical que recuperam o `e` mudo (`creat` → `create`, `mov` → `move`)
const SILENT_E_ENDINGS: &[&str] = &["at", "iz", "bl", "ov", "iv", "av", "ur", "uc", "ac"];

/// Consoantes que aparecem dobradas no próprio lema (`call`, `miss`, `buzz`)
const LEGIT_DOUBLES: &[char] = &['l', 's', 'f', 'z'];

/// Contrato do lematizador: determinístico por par (token, tag).
pub trait Lemmatizer: Send + Sync {
    fn lemmatize(&self, token: &str, tag: &str) -> String;

    /// Lematiza uma sentença inteira, token a token.
    fn lemmatize_all(&self, tokens: &[String], tags: &[String]) -> Vec<String> {
        tokens
            .iter()
            .zip(tags.iter())
            .map(|(token, tag)| self.lemmatize(token, tag))
            .collect()
    }
}

/// Lematizador por dicionário com regras de sufixo como reserva.
#[derive(Debug, Clone, Default)]
pub struct DictionaryLemmatizer {
    /// (palavra minúscula, tag) → lema
    entries: HashMap<(String, String), String>,
}

impl DictionaryLemmatizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lematizador com o dicionário embutido.
    pub fn bundled() -> Result<Self> {
        Self::parse(BUNDLED_DICTIONARY, "bundled en-lemmatizer.dict")
    }

    /// Carrega um dicionário do disco.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;
        let lemmatizer = Self::parse(&text, &path.display().to_string())?;
        info!(path = %path.display(), entries = lemmatizer.entries.len(), "lemma dictionary loaded");
        Ok(lemmatizer)
    }

    /// Lê um dicionário no formato `palavra<TAB>tag<TAB>lema`.
    pub fn parse(text: &str, source_name: &str) -> Result<Self> {
        let mut lemmatizer = Self::new();
        for (i, line) in text.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let fields: Vec<&str> = line.trim_end().split('\t').collect();
            if fields.len() != 3 {
                return Err(WsdError::resource(
                    source_name,
                    i + 1,
                    format!("expected word<TAB>tag<TAB>lemma, found {} fields", fields.len()),
                ));
            }
            lemmatizer.insert(fields[0], fields[1], fields[2]);
        }
        Ok(lemmatizer)
    }

    pub fn insert(&mut self, word: &str, tag: &str, lemma: &str) {
        self.entries
            .insert((word.to_lowercase(), tag.to_string()), lemma.to_string());
    }
}

impl Lemmatizer for DictionaryLemmatizer {
    fn lemmatize(&self, token: &str, tag: &str) -> String {
        let lower = token.to_lowercase();
        if let Some(lemma) = self.entries.get(&(lower.clone(), tag.to_string())) {
            return lemma.clone();
        }
        if tag == "NNP" || tag == "NNPS" {
            // Nomes próprios mantêm a grafia; o inventário normaliza na consulta
            return token.to_string();
        }
        apply_rules(&lower, tag)
    }
}

/// Regras de sufixo dirigidas pela tag
fn apply_rules(word: &str, tag: &str) -> String {
    let lemma = match tag {
        "NNS" => noun_base(word),
        "VBZ" => third_person_base(word),
        "VBD" | "VBN" => strip_inflection(word, "ed"),
        "VBG" => strip_inflection(word, "ing"),
        "JJR" | "RBR" => strip_inflection(word, "er"),
        "JJS" | "RBS" => strip_inflection(word, "est"),
        _ => None,
    };
    lemma.unwrap_or_else(|| word.to_string())
}

fn noun_base(word: &str) -> Option<String> {
    if word.len() > 4 && word.ends_with("ies") {
        return Some(format!("{}y", &word[..word.len() - 3]));
    }
    for suffix in ["sses", "shes", "ches", "xes", "zes"] {
        if word.ends_with(suffix) {
            return Some(word[..word.len() - 2].to_string());
        }
    }
    if word.len() > 2 && word.ends_with('s') && !word.ends_with("ss") {
        return Some(word[..word.len() - 1].to_string());
    }
    None
}

fn third_person_base(word: &str) -> Option<String> {
    if word.len() > 4 && word.ends_with("ies") {
        return Some(format!("{}y", &word[..word.len() - 3]));
    }
    for suffix in ["sses", "shes", "ches", "xes", "zes", "oes"] {
        if word.ends_with(suffix) {
            return Some(word[..word.len() - 2].to_string());
        }
    }
    if word.len() > 2 && word.ends_with('s') && !word.ends_with("ss") {
        return Some(word[..word.len() - 1].to_string());
    }
    None
}

/// Remove `-ed`/`-ing`/`-er`/`-est`, tratando `-i-` (de `-y`), consoante dobrada e `e` mudo.
fn strip_inflection(word: &str, suffix: &str) -> Option<String> {
    let stem = word.strip_suffix(suffix)?;
    if stem.chars().count() < 2 {
        return None;
    }

    // studied → study, happier → happy (mas não em "-ing": "dying" vem do dicionário)
    if suffix != "ing" && stem.ends_with('i') {
        return Some(format!("{}y", &stem[..stem.len() - 1]));
    }

    let chars: Vec<char> = stem.chars().collect();
    let last = chars[chars.len() - 1];
    let before = chars[chars.len() - 2];
    if last == before && !is_vowel(last) && !LEGIT_DOUBLES.contains(&last) {
        // stopped → stop, bigger → big
        return Some(stem[..stem.len() - last.len_utf8()].to_string());
    }

    if SILENT_E_ENDINGS.iter().any(|e| stem.ends_with(e)) {
        return Some(format!("{stem}e"));
    }

    Some(stem.to_string())
}

fn is_vowel(c: char) -> bool {
    matches!(c, 'a' | 'e' | 'i' | 'o' | 'u')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lemma(token: &str, tag: &str) -> String {
        DictionaryLemmatizer::bundled().unwrap().lemmatize(token, tag)
    }

    #[test]
    fn test_dictionary_irregulars() {
        assert_eq!(lemma("was", "VBD"), "be");
        assert_eq!(lemma("Did", "VBD"), "do");
        assert_eq!(lemma("children", "NNS"), "child");
        assert_eq!(lemma("n't", "RB"), "not");
    }

    #[test]
    fn test_uninflected_tags_are_lowercased() {
        assert_eq!(lemma("Highly", "RB"), "highly");
        assert_eq!(lemma("radioactive", "JJ"), "radioactive");
        assert_eq!(lemma("please", "VB"), "please");
        assert_eq!(lemma("The", "DT"), "the");
    }

    #[test]
    fn test_noun_plurals() {
        assert_eq!(lemma("beaches", "NNS"), "beach");
        assert_eq!(lemma("topics", "NNS"), "topic");
        assert_eq!(lemma("stories", "NNS"), "story");
        assert_eq!(lemma("glass", "NN"), "glass");
    }

    #[test]
    fn test_verb_inflections() {
        assert_eq!(lemma("touched", "VBD"), "touch");
        assert_eq!(lemma("stopped", "VBD"), "stop");
        assert_eq!(lemma("called", "VBN"), "call");
        assert_eq!(lemma("created", "VBN"), "create");
        assert_eq!(lemma("studied", "VBD"), "study");
        assert_eq!(lemma("discussing", "VBG"), "discuss");
        assert_eq!(lemma("needs", "VBZ"), "need");
        assert_eq!(lemma("goes", "VBZ"), "go");
    }

    #[test]
    fn test_degrees() {
        assert_eq!(lemma("bigger", "JJR"), "big");
        assert_eq!(lemma("happiest", "JJS"), "happy");
        assert_eq!(lemma("better", "JJR"), "good");
    }

    #[test]
    fn test_proper_nouns_keep_case() {
        assert_eq!(lemma("Alice", "NNP"), "Alice");
    }

    #[test]
    fn test_dictionary_format_errors() {
        let err = DictionaryLemmatizer::parse("went\tVBD\tgo\nbroken line\n", "dict").unwrap_err();
        assert!(err.to_string().starts_with("dict:2:"));
    }
}
