//! # Etiquetador Morfossintático (POS Tagger)
//!
//! Atribui uma tag Penn Treebank a cada token. O motor MFS trata o tagger como
//! serviço externo: qualquer implementação de [`PosTagger`] serve, desde que
//! devolva exatamente uma tag por token, na mesma ordem.
//!
//! ## LexiconTagger
//!
//! Implementação determinística em quatro camadas, da mais confiável para a menos:
//!
//! 1. **Pontuação e números**: mapeamento direto (`,` → `,`, `3.5` → `CD`).
//! 2. **Léxico**: tags possíveis de cada palavra conhecida (`point → NN|VB|VBP`).
//! 3. **Heurísticas**: maiúscula fora do início → `NNP`; sufixos (`-ly` → `RB`,
//!    `-ous` → `JJ`, `-ed` → `VBD|VBN`...).
//! 4. **Regras de contexto** que escolhem entre as candidatas:
//!    - depois de `TO`/`MD`, prefere `VB` ("to *discuss*");
//!    - depois de determinante/possessivo/adjetivo, prefere leitura nominal ("the *point*");
//!    - depois de "have"/"be", `VBD` vira `VBN` ("has been *activated*").

use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::OnceLock;

use regex::Regex;
use tracing::info;

use crate::closed_class::classify;
use crate::error::{Result, WsdError};

/// Léxico embutido no crate (`palavra<TAB>TAG|TAG`)
const BUNDLED_LEXICON: &str = include_str!("../data/en-pos.lexicon");

/// Formas de "have" e "be" que pedem particípio
const PERFECT_AUXILIARIES: &[&str] = &[
    "have", "has", "had", "having", "'ve", "be", "been", "being", "is", "are", "was", "were", "am",
];

const NOMINAL_CONTEXT: &[&str] = &["DT", "PRP$", "JJ", "JJR", "JJS", "POS", "PDT", "CD"];

const ADJECTIVE_SUFFIXES: &[&str] = &[
    "ous", "ive", "able", "ible", "ful", "less", "ical", "ish", "ary", "al", "ic",
];
const NOUN_SUFFIXES: &[&str] = &[
    "tion", "sion", "ment", "ness", "ity", "ism", "ist", "ance", "ence", "ship", "hood", "er", "or",
];

fn number_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[+-]?(\d+([.,:/]\d+)*|\.\d+)$").expect("number pattern is valid"))
}

/// Contrato do tagger: uma tag por token, mesma ordem e comprimento da entrada.
pub trait PosTagger: Send + Sync {
    fn tag(&self, tokens: &[String]) -> Vec<String>;
}

/// Tagger baseado em léxico, heurísticas de sufixo e regras de contexto.
#[derive(Debug, Clone, Default)]
pub struct LexiconTagger {
    /// Palavra (minúscula) → tags possíveis, a primeira é a mais provável
    lexicon: HashMap<String, Vec<String>>,
}

impl LexiconTagger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tagger com o léxico embutido.
    pub fn bundled() -> Result<Self> {
        Self::parse(BUNDLED_LEXICON, "bundled en-pos.lexicon")
    }

    /// Carrega um léxico do disco.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;
        let tagger = Self::parse(&text, &path.display().to_string())?;
        info!(path = %path.display(), words = tagger.lexicon.len(), "POS lexicon loaded");
        Ok(tagger)
    }

    /// Lê um léxico no formato `palavra<TAB>TAG|TAG...`.
    ///
    /// Todas as tags precisam ser reconhecidas pelo classificador de classes
    /// fechadas, senão o motor rejeitaria a saída do próprio tagger.
    pub fn parse(text: &str, source_name: &str) -> Result<Self> {
        let mut tagger = Self::new();
        for (i, line) in text.lines().enumerate() {
            let line = line.trim_end();
            if line.trim().is_empty() {
                continue;
            }
            let (word, tags) = line
                .split_once('\t')
                .ok_or_else(|| WsdError::resource(source_name, i + 1, "expected word<TAB>tags"))?;
            let tags: Vec<String> = tags.split('|').map(|t| t.trim().to_string()).collect();
            if let Some(reason) = invalid_entry(word, &tags) {
                return Err(WsdError::resource(source_name, i + 1, reason));
            }
            tagger.lexicon.insert(word.to_lowercase(), tags);
        }
        Ok(tagger)
    }

    /// Adiciona (ou substitui) as tags de uma palavra.
    ///
    /// A lista precisa ter ao menos uma tag, e todas reconhecidas.
    pub fn insert(&mut self, word: &str, tags: Vec<String>) -> Result<()> {
        if let Some(reason) = invalid_entry(word, &tags) {
            return Err(WsdError::config(reason));
        }
        self.lexicon.insert(word.to_lowercase(), tags);
        Ok(())
    }

    /// Tags candidatas de um token, antes das regras de contexto
    fn candidates(&self, token: &str, position: usize) -> Vec<String> {
        if let Some(tag) = punctuation_tag(token) {
            return vec![tag.to_string()];
        }
        if number_pattern().is_match(token) {
            return vec!["CD".to_string()];
        }

        let lower = token.to_lowercase();
        if let Some(tags) = self.lexicon.get(&lower) {
            return tags.clone();
        }

        let capitalized = token.chars().next().map(char::is_uppercase).unwrap_or(false);
        if capitalized && position > 0 {
            return vec!["NNP".to_string()];
        }

        guess_by_suffix(&lower)
    }
}

impl PosTagger for LexiconTagger {
    fn tag(&self, tokens: &[String]) -> Vec<String> {
        let mut tags: Vec<String> = Vec::with_capacity(tokens.len());

        for (i, token) in tokens.iter().enumerate() {
            let candidates = self.candidates(token, i);
            let prev_tag = tags.last().map(String::as_str);
            let has = |tag: &str| candidates.iter().any(|c| c == tag);

            let mut chosen = match prev_tag {
                Some("TO") | Some("MD") if has("VB") => "VB".to_string(),
                Some(prev) if NOMINAL_CONTEXT.contains(&prev) => candidates
                    .iter()
                    .find(|c| c.starts_with("NN"))
                    .unwrap_or(&candidates[0])
                    .clone(),
                _ => candidates[0].clone(),
            };

            if chosen == "VBD" && has("VBN") && follows_auxiliary(tokens, &tags, i) {
                chosen = "VBN".to_string();
            }

            tags.push(chosen);
        }

        tags
    }
}

/// Motivo da rejeição de uma entrada do léxico, se houver
fn invalid_entry(word: &str, tags: &[String]) -> Option<String> {
    if tags.is_empty() {
        return Some(format!("no tags for {word:?}"));
    }
    tags.iter()
        .find(|t| classify(t).is_none())
        .map(|bad| format!("unknown tag {bad:?} for {word:?}"))
}

/// Verdadeiro se há uma forma de "have"/"be" até duas posições atrás,
/// pulando advérbios ("has *not* been", "was *highly* regarded").
fn follows_auxiliary(tokens: &[String], tags: &[String], i: usize) -> bool {
    (1..=2)
        .filter_map(|back| i.checked_sub(back))
        .take_while(|&j| j == i - 1 || tags[j + 1].starts_with("RB"))
        .any(|j| PERFECT_AUXILIARIES.contains(&tokens[j].to_lowercase().as_str()))
}

/// Tag Penn Treebank de um token de pontuação
fn punctuation_tag(token: &str) -> Option<&'static str> {
    let tag = match token {
        "." | "!" | "?" => ".",
        "," => ",",
        ":" | ";" | "..." | "-" | "--" | "\u{2013}" | "\u{2014}" => ":",
        "(" | "[" | "{" => "-LRB-",
        ")" | "]" | "}" => "-RRB-",
        "\"" | "``" | "\u{201C}" => "``",
        "''" | "\u{201D}" => "''",
        "$" => "$",
        "#" => "#",
        t if t.chars().count() == 1 && !t.chars().all(char::is_alphanumeric) => "SYM",
        _ => return None,
    };
    Some(tag)
}

/// Palpite por sufixo para palavras fora do léxico
fn guess_by_suffix(lower: &str) -> Vec<String> {
    let tags: &[&str] = if lower.len() > 4 && lower.ends_with("ly") {
        &["RB", "JJ"]
    } else if lower.len() > 4 && lower.ends_with("ing") {
        &["VBG", "NN"]
    } else if lower.len() > 3 && lower.ends_with("ed") {
        &["VBD", "VBN"]
    } else if lower.len() > 4 && lower.ends_with("est") {
        &["JJS"]
    } else if ADJECTIVE_SUFFIXES.iter().any(|s| lower.len() > s.len() + 2 && lower.ends_with(s)) {
        &["JJ"]
    } else if NOUN_SUFFIXES.iter().any(|s| lower.len() > s.len() + 2 && lower.ends_with(s)) {
        &["NN"]
    } else if lower.len() > 3
        && lower.ends_with('s')
        && !["ss", "us", "is"].iter().any(|s| lower.ends_with(s))
    {
        &["NNS", "VBZ"]
    } else {
        &["NN"]
    };
    tags.iter().map(|t| t.to_string()).collect()
}
