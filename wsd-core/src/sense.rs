//! # Rótulos de Sentido
//!
//! A saída do motor tem duas formas, representadas por um enum e não por prefixos
//! de string:
//!
//! - [`SenseLabel::SenseId`]: identificador do inventário (ex: `WORDNET please%2:37:00::`).
//! - [`SenseLabel::Category`]: rótulo categórico (ex: `WSDHELPER determiner`).
//!
//! O formato legado em string só é produzido na fronteira de saída, via `Display`.
//!
//! ## Chaves de sentido do WordNet
//!
//! ```text
//! please%2:37:00::
//! └─┬──┘ │ └┬┘└┬┘└┬┘
//! lemma  │ lex_filenum, lex_id, head_word:head_id (satélites)
//!        ss_type: 1 substantivo, 2 verbo, 3 adjetivo, 4 advérbio, 5 satélite
//! ```

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::closed_class::{ClosedClass, WordClass};
use crate::error::WsdError;

fn sense_key_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^([^%\s]+)%([1-5]):(\d{2}):(\d{2}):([^:\s]*):(\d{2})?$")
            .expect("sense key pattern is valid")
    })
}

/// Chave de sentido do WordNet validada (ex: `highly%4:02:01::`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SenseKey {
    key: String,
    lemma_len: usize,
    ss_type: u8,
}

impl SenseKey {
    /// Valida e constrói uma chave a partir do texto.
    pub fn parse(key: &str) -> Result<Self, WsdError> {
        let caps = sense_key_pattern()
            .captures(key)
            .ok_or_else(|| WsdError::resource("sense key", 0, format!("malformed sense key {key:?}")))?;
        let lemma_len = caps.get(1).map(|m| m.end()).unwrap_or(0);
        let ss_type = caps
            .get(2)
            .and_then(|m| m.as_str().parse::<u8>().ok())
            .ok_or_else(|| WsdError::resource("sense key", 0, format!("bad synset type in {key:?}")))?;
        Ok(Self {
            key: key.to_string(),
            lemma_len,
            ss_type,
        })
    }

    /// O lema codificado na chave (minúsculo, espaços como `_`).
    pub fn lemma(&self) -> &str {
        &self.key[..self.lemma_len]
    }

    /// Tipo de synset (1..=5)
    pub fn synset_type(&self) -> u8 {
        self.ss_type
    }

    /// Classe aberta correspondente ao tipo de synset
    pub fn word_class(&self) -> WordClass {
        // ss_type já foi validado pelo regex (1..=5)
        WordClass::from_synset_type(self.ss_type).unwrap_or(WordClass::Noun)
    }

    pub fn as_str(&self) -> &str {
        &self.key
    }
}

impl TryFrom<String> for SenseKey {
    type Error = WsdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        SenseKey::parse(&value)
    }
}

impl From<SenseKey> for String {
    fn from(key: SenseKey) -> Self {
        key.key
    }
}

impl fmt::Display for SenseKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.key)
    }
}

/// Inventário de onde vem um identificador de sentido.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SenseSource {
    WordNet,
}

impl SenseSource {
    pub fn name(&self) -> &'static str {
        match self {
            SenseSource::WordNet => "WORDNET",
        }
    }
}

/// Quem produziu um rótulo categórico.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LabelSource {
    /// O próprio motor (classes fechadas e palavras sem sentido no inventário).
    WsdHelper,
}

impl LabelSource {
    pub fn name(&self) -> &'static str {
        match self {
            LabelSource::WsdHelper => "WSDHELPER",
        }
    }
}

/// Nome da categoria usada quando o inventário não tem entrada para a palavra.
pub const NO_SENSE_AVAILABLE: &str = "no sense available";

/// Rótulo atribuído a uma posição da sentença.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SenseLabel {
    /// Sentido mais frequente encontrado no inventário.
    SenseId {
        source: SenseSource,
        lemma: String,
        key: SenseKey,
    },
    /// Rótulo categórico (classe fechada ou ausência de sentido).
    Category { source: LabelSource, name: String },
}

impl SenseLabel {
    /// Rótulo categórico para uma classe fechada. Depende só da categoria.
    pub fn closed(class: ClosedClass) -> Self {
        SenseLabel::Category {
            source: LabelSource::WsdHelper,
            name: class.name().to_string(),
        }
    }

    /// Rótulo de recuperação para palavras sem entrada no inventário
    pub fn no_sense() -> Self {
        SenseLabel::Category {
            source: LabelSource::WsdHelper,
            name: NO_SENSE_AVAILABLE.to_string(),
        }
    }

    pub fn is_sense(&self) -> bool {
        matches!(self, SenseLabel::SenseId { .. })
    }

    /// Representação legada em string (ex: `"WORDNET please%2:37:00::"`).
    pub fn label(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for SenseLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SenseLabel::SenseId { source, key, .. } => write!(f, "{} {}", source.name(), key),
            SenseLabel::Category { source, name } => write!(f, "{} {}", source.name(), name),
        }
    }
}
