//! # Inventário de Sentidos (WordNet)
//!
//! O inventário mapeia `(lema, classe aberta)` para a lista de sentidos candidatos,
//! **ordenada por frequência** de uso em corpus. O motor MFS só precisa do primeiro.
//!
//! ## Formato `index.sense`
//!
//! Cada linha do arquivo distribuído com o WordNet tem quatro campos:
//!
//! ```text
//! sense_key           synset_offset  sense_number  tag_cnt
//! please%2:37:00::    01811792       1             10
//! ```
//!
//! `sense_number` é a posição do sentido na lista do lema (1 = mais frequente);
//! `tag_cnt` é quantas vezes o sentido foi anotado no corpus SemCor.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::closed_class::WordClass;
use crate::error::{Result, WsdError};
use crate::sense::{SenseKey, SenseSource};

/// Amostra do `index.sense` distribuída com o crate.
const BUNDLED_INDEX: &str = include_str!("../data/index.sense");

/// Um sentido candidato e sua posição no ranking de frequência.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SenseEntry {
    pub key: SenseKey,
    pub synset_offset: u64,
    /// Posição no ranking (1 = sentido mais frequente)
    pub sense_number: u32,
    /// Contagem de anotações no corpus
    pub tag_count: u32,
}

/// Acesso somente-leitura a um inventário de sentidos.
///
/// Implementações são carregadas uma vez e nunca mais mutadas, por isso precisam
/// ser `Send + Sync`: o mesmo inventário é compartilhado entre threads.
/// Qualquer I/O deve ficar escondido atrás desta fachada síncrona.
pub trait SenseInventory: Send + Sync {
    /// Nome do inventário usado nos rótulos (ex: `WORDNET`).
    fn source(&self) -> SenseSource;

    /// Sentidos do lema para a classe, do mais frequente ao menos frequente.
    /// Vazio se o lema for desconhecido.
    fn lookup(&self, lemma: &str, class: WordClass) -> Vec<SenseEntry>;

    /// Apenas o sentido mais frequente.
    fn most_frequent(&self, lemma: &str, class: WordClass) -> Option<SenseEntry> {
        self.lookup(lemma, class).into_iter().next()
    }
}

/// Normaliza um lema para o formato das chaves do WordNet (minúsculo, `_` no lugar de espaços).
pub fn normalize_lemma(lemma: &str) -> String {
    lemma
        .trim()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
        .to_lowercase()
}

/// Índice de sentidos construído a partir de um arquivo `index.sense`.
#[derive(Debug, Clone, Default)]
pub struct WordNetSenseIndex {
    entries: HashMap<(String, WordClass), Vec<SenseEntry>>,
}

impl WordNetSenseIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Índice com a amostra embutida no crate.
    pub fn bundled() -> Result<Self> {
        Self::parse(BUNDLED_INDEX, "bundled index.sense")
    }

    /// Carrega um `index.sense` do disco.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let index = Self::from_reader(BufReader::new(file), &path.display().to_string())?;
        info!(path = %path.display(), lemmas = index.len(), "sense index loaded");
        Ok(index)
    }

    /// Lê o índice de qualquer fonte com buffer.
    pub fn from_reader<R: BufRead>(reader: R, source_name: &str) -> Result<Self> {
        let mut index = Self::new();
        for (i, line) in reader.lines().enumerate() {
            index.insert_line(&line?, i + 1, source_name)?;
        }
        Ok(index)
    }

    /// Lê o índice a partir de texto já em memória.
    pub fn parse(text: &str, source_name: &str) -> Result<Self> {
        let mut index = Self::new();
        for (i, line) in text.lines().enumerate() {
            index.insert_line(line, i + 1, source_name)?;
        }
        Ok(index)
    }

    /// Adiciona um sentido mantendo a lista do lema ordenada pelo ranking
    /// (o arquivo vem ordenado por chave, não por frequência).
    pub fn add(&mut self, entry: SenseEntry) {
        let lemma = entry.key.lemma().to_string();
        let class = entry.key.word_class();
        let senses = self.entries.entry((lemma, class)).or_default();
        senses.push(entry);
        senses.sort_by_key(|e| e.sense_number);
    }

    /// Número de pares (lema, classe) distintos
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn insert_line(&mut self, line: &str, line_no: usize, source_name: &str) -> Result<()> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(());
        }

        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() != 4 {
            return Err(WsdError::resource(
                source_name,
                line_no,
                format!("expected 4 fields, found {}", fields.len()),
            ));
        }

        let key = SenseKey::parse(fields[0])
            .map_err(|_| WsdError::resource(source_name, line_no, format!("malformed sense key {:?}", fields[0])))?;
        let invalid = |what: &str, field: &str| {
            WsdError::resource(source_name, line_no, format!("invalid {what} {field:?}"))
        };
        let synset_offset = fields[1]
            .parse::<u64>()
            .map_err(|_| invalid("synset offset", fields[1]))?;
        let sense_number = fields[2]
            .parse::<u32>()
            .map_err(|_| invalid("sense number", fields[2]))?;
        let tag_count = fields[3]
            .parse::<u32>()
            .map_err(|_| invalid("tag count", fields[3]))?;

        self.add(SenseEntry {
            key,
            synset_offset,
            sense_number,
            tag_count,
        });
        Ok(())
    }
}

impl SenseInventory for WordNetSenseIndex {
    fn source(&self) -> SenseSource {
        SenseSource::WordNet
    }

    fn lookup(&self, lemma: &str, class: WordClass) -> Vec<SenseEntry> {
        self.entries
            .get(&(normalize_lemma(lemma), class))
            .cloned()
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
point%1:15:00:: 08620061 2 57
point%1:09:01:: 05816287 1 68
point%2:33:00:: 00920778 1 8
united_states%1:15:00:: 08544813 1 66
";

    #[test]
    fn test_ranking_follows_sense_number() {
        let index = WordNetSenseIndex::parse(SAMPLE, "sample").unwrap();
        let senses = index.lookup("point", WordClass::Noun);
        assert_eq!(senses.len(), 2);
        assert_eq!(senses[0].key.as_str(), "point%1:09:01::");
        assert_eq!(senses[1].sense_number, 2);
    }

    #[test]
    fn test_lookup_separates_word_classes() {
        let index = WordNetSenseIndex::parse(SAMPLE, "sample").unwrap();
        let verb = index.most_frequent("point", WordClass::Verb).unwrap();
        assert_eq!(verb.key.as_str(), "point%2:33:00::");
        assert!(index.lookup("point", WordClass::Adverb).is_empty());
    }

    #[test]
    fn test_lemma_normalization() {
        let index = WordNetSenseIndex::parse(SAMPLE, "sample").unwrap();
        assert_eq!(normalize_lemma("  United States "), "united_states");
        assert!(index.most_frequent("United States", WordClass::Noun).is_some());
        assert!(index.most_frequent("POINT", WordClass::Noun).is_some());
    }

    #[test]
    fn test_malformed_line_reports_position() {
        let err = WordNetSenseIndex::parse("point%1:09:01:: 05816287 1 68\npoint 1 2\n", "bad").unwrap_err();
        match err {
            WsdError::Resource { source_name, line, .. } => {
                assert_eq!(source_name, "bad");
                assert_eq!(line, 2);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_oversized_sense_number_is_rejected() {
        let text = "point%1:15:00:: 08620061 4294967297 57\npoint%1:09:01:: 05816287 2 68\n";
        match WordNetSenseIndex::parse(text, "wide").unwrap_err() {
            WsdError::Resource { line, reason, .. } => {
                assert_eq!(line, 1);
                assert!(reason.contains("sense number"));
            }
            other => panic!("unexpected error: {other}"),
        }

        let text = "point%1:09:01:: 05816287 1 99999999999\n";
        let err = WordNetSenseIndex::parse(text, "wide").unwrap_err();
        assert!(err.to_string().starts_with("wide:1: invalid tag count"));
    }

    #[test]
    fn test_bundled_index_has_reference_senses() {
        let index = WordNetSenseIndex::bundled().unwrap();
        let please = index.most_frequent("please", WordClass::Verb).unwrap();
        assert_eq!(please.key.as_str(), "please%2:37:00::");
        let second = index.most_frequent("second", WordClass::Adjective).unwrap();
        assert_eq!(second.key.synset_type(), 5);
    }

    #[test]
    fn test_from_reader_matches_parse() {
        let from_reader = WordNetSenseIndex::from_reader(SAMPLE.as_bytes(), "sample").unwrap();
        let parsed = WordNetSenseIndex::parse(SAMPLE, "sample").unwrap();
        assert_eq!(from_reader.len(), parsed.len());
        assert_eq!(
            from_reader.lookup("point", WordClass::Noun),
            parsed.lookup("point", WordClass::Noun)
        );
    }
}
