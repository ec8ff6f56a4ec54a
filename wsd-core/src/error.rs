//! # Erros da Desambiguação
//!
//! Taxonomia de falhas do motor MFS. Erros **fatais** abortam a chamada inteira
//! (nenhum resultado parcial é devolvido) e identificam o índice ou span ofensor.
//!
//! A ausência de sentido para uma palavra isolada *não* é um erro: ela é
//! recuperada no próprio lugar com o rótulo categórico `no sense available`.

use thiserror::Error;

/// Atalho para resultados do crate.
pub type Result<T> = std::result::Result<T, WsdError>;

/// Erros que podem ocorrer durante a desambiguação ou a carga de recursos.
#[derive(Error, Debug)]
pub enum WsdError {
    /// Índice único fora de `[0, len)`.
    #[error("index {index} out of range for sentence of {len} tokens")]
    IndexOutOfRange { index: usize, len: usize },

    /// Span fora de `[0, len]` ou com `start > end`.
    #[error("span [{start}, {end}) out of range for sentence of {len} tokens")]
    SpanOutOfRange { start: i64, end: i64, len: usize },

    /// Tokens, tags e lemas com comprimentos diferentes (violação do contrato do pipeline).
    #[error("misaligned input: {tokens} tokens, {tags} tags, {lemmas} lemmas")]
    MisalignedInput {
        tokens: usize,
        tags: usize,
        lemmas: usize,
    },

    /// Tag fora do conjunto Penn Treebank conhecido.
    #[error("unrecognized POS tag {tag:?} at index {index}")]
    UnrecognizedTag { index: usize, tag: String },

    /// Linha malformada em um arquivo de recurso (léxico, dicionário, índice de sentidos).
    #[error("{source_name}:{line}: {reason}")]
    Resource {
        source_name: String,
        line: usize,
        reason: String,
    },

    /// Configuração inválida
    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl WsdError {
    /// Cria um erro de recurso malformado
    pub fn resource(source_name: impl Into<String>, line: usize, reason: impl Into<String>) -> Self {
        Self::Resource {
            source_name: source_name.into(),
            line,
            reason: reason.into(),
        }
    }

    /// Cria um erro de configuração
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Verdadeiro para as duas formas de `OutOfRange` (índice ou span).
    pub fn is_out_of_range(&self) -> bool {
        matches!(
            self,
            WsdError::IndexOutOfRange { .. } | WsdError::SpanOutOfRange { .. }
        )
    }

    /// Verdadeiro para erros que indicam entrada inválida do chamador
    /// (e não falha de recurso).
    pub fn is_input_error(&self) -> bool {
        self.is_out_of_range()
            || matches!(
                self,
                WsdError::MisalignedInput { .. } | WsdError::UnrecognizedTag { .. }
            )
    }
}
