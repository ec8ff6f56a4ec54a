//! # Configuração de Recursos
//!
//! Diz de onde carregar cada recurso do pipeline. Campos ausentes usam os
//! recursos embutidos no crate, então `{}` é uma configuração válida.
//!
//! ```json
//! {
//!   "pos_lexicon": "/opt/wsd/en-pos.lexicon",
//!   "lemma_dictionary": "/opt/wsd/en-lemmatizer.dict",
//!   "sense_index": "/usr/share/wordnet/index.sense",
//!   "tokenizer_mode": "standard"
//! }
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, WsdError};
use crate::tokenizer::TokenizerMode;

/// Caminhos dos recursos e modo do tokenizador.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ResourceConfig {
    /// Léxico do tagger (`palavra<TAB>TAG|TAG`)
    pub pos_lexicon: Option<PathBuf>,
    /// Dicionário do lematizador (`palavra<TAB>tag<TAB>lema`)
    pub lemma_dictionary: Option<PathBuf>,
    /// Arquivo `index.sense` do WordNet
    pub sense_index: Option<PathBuf>,
    pub tokenizer_mode: TokenizerMode,
}

impl ResourceConfig {
    /// Lê a configuração de um arquivo JSON.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;
        Self::from_json_str(&text)
            .map_err(|e| WsdError::config(format!("{}: {}", path.display(), e)))
    }

    /// Lê a configuração de um texto JSON.
    pub fn from_json_str(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|e| WsdError::config(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_object_uses_defaults() {
        let config = ResourceConfig::from_json_str("{}").unwrap();
        assert_eq!(config, ResourceConfig::default());
        assert_eq!(config.tokenizer_mode, TokenizerMode::Standard);
    }

    #[test]
    fn test_paths_and_mode() {
        let config = ResourceConfig::from_json_str(
            r#"{"sense_index": "/data/index.sense", "tokenizer_mode": "whitespace"}"#,
        )
        .unwrap();
        assert_eq!(config.sense_index, Some(PathBuf::from("/data/index.sense")));
        assert_eq!(config.tokenizer_mode, TokenizerMode::Whitespace);
        assert!(config.pos_lexicon.is_none());
    }

    #[test]
    fn test_unknown_fields_are_rejected() {
        let err = ResourceConfig::from_json_str(r#"{"sense_idx": "x"}"#).unwrap_err();
        assert!(matches!(err, WsdError::Config(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = ResourceConfig::from_json_file("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, WsdError::Io(_)));
    }
}
