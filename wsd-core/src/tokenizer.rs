//! # Tokenizador para Inglês
//!
//! Divide o texto bruto em tokens no estilo Penn Treebank, que é o que o tagger
//! e o inventário esperam. Cada token preserva sua posição original (offset).
//!
//! ## Esquema de Tokenização
//!
//! - **Standard**: Fronteiras de palavra Unicode (UAX #29), pontuação separada,
//!   clíticos separados (`don't` → `do`, `n't`; `it's` → `it`, `'s`) e
//!   abreviações preservadas (`Dr.`, `e.g.`, `U.S.`).
//! - **Whitespace**: Apenas espaços em branco separam tokens.
//!
//! ## Exemplo de Uso
//!
//! ```rust
//! use wsd_core::tokenizer::{tokenize_with_mode, TokenizerMode};
//!
//! let tokens = tokenize_with_mode("Please write to me soon.", TokenizerMode::Standard);
//! let texts: Vec<&str> = tokens.iter().map(|t| t.text.as_str()).collect();
//! assert_eq!(texts, ["Please", "write", "to", "me", "soon", "."]);
//! ```

use serde::{Deserialize, Serialize};
use unicode_segmentation::UnicodeSegmentation;

/// Um token extraído do texto original.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Token {
    /// O texto do token (ex: "please", ",", "n't").
    pub text: String,
    /// Índice de byte inicial no texto original (inclusive).
    pub start: usize,
    /// Índice de byte final no texto original (exclusivo).
    pub end: usize,
    /// Índice sequencial do token na lista (0, 1, 2...).
    pub index: usize,
}

/// Estratégias de Tokenização disponíveis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TokenizerMode {
    /// **Padrão**: regras Penn Treebank sobre as fronteiras de palavra Unicode.
    #[default]
    Standard,
    /// **Espaços**: texto já pré-tokenizado, separado por espaços.
    Whitespace,
}

/// Contrato do tokenizador consumido pelo pipeline: determinístico, sem estado.
pub trait Tokenizer: Send + Sync {
    fn tokenize(&self, text: &str) -> Vec<Token>;
}

impl Tokenizer for TokenizerMode {
    fn tokenize(&self, text: &str) -> Vec<Token> {
        tokenize_with_mode(text, *self)
    }
}

/// Abreviações comuns em inglês cujo ponto final pertence ao token
const ABBREVIATIONS: &[&str] = &[
    "mr", "mrs", "ms", "dr", "prof", "sr", "jr", "st", "vs", "etc", "inc", "ltd",
    "co", "corp", "dept", "fig", "vol", "jan", "feb", "mar", "apr", "jun",
    "jul", "aug", "sep", "sept", "oct", "nov", "dec", "mt", "gen", "gov", "sen", "rep",
];

/// Clíticos separados do radical, como no Penn Treebank
const CLITICS: &[&str] = &["'s", "'re", "'ve", "'ll", "'d", "'m"];

/// Tokeniza um texto usando o modo padrão.
pub fn tokenize(text: &str) -> Vec<Token> {
    tokenize_with_mode(text, TokenizerMode::Standard)
}

/// Tokeniza um texto com o modo especificado.
pub fn tokenize_with_mode(text: &str, mode: TokenizerMode) -> Vec<Token> {
    let mut tokens = match mode {
        TokenizerMode::Standard => tokenize_standard(text),
        TokenizerMode::Whitespace => tokenize_whitespace(text),
    };

    // Re-indexa os tokens
    for (i, token) in tokens.iter_mut().enumerate() {
        token.index = i;
    }
    tokens
}

/// Apenas os textos dos tokens, no formato que o tagger consome
pub fn token_texts(tokens: &[Token]) -> Vec<String> {
    tokens.iter().map(|t| t.text.clone()).collect()
}

fn tokenize_whitespace(text: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut current_start: Option<usize> = None;

    for (i, ch) in text.char_indices() {
        match (ch.is_whitespace(), current_start) {
            (true, Some(start)) => {
                push_token(&mut tokens, &text[start..i], start);
                current_start = None;
            }
            (false, None) => current_start = Some(i),
            _ => {}
        }
    }
    if let Some(start) = current_start {
        push_token(&mut tokens, &text[start..], start);
    }
    tokens
}

fn tokenize_standard(text: &str) -> Vec<Token> {
    let segments: Vec<(usize, &str)> = text
        .split_word_bound_indices()
        .filter(|(_, s)| !s.trim().is_empty())
        .collect();

    let mut tokens = Vec::new();
    let mut i = 0;

    while i < segments.len() {
        let (start, segment) = segments[i];

        // Abreviação: "Dr" + "." adjacentes viram "Dr."
        if let Some(&(dot_start, ".")) = segments.get(i + 1) {
            if dot_start == start + segment.len() && is_abbreviation(segment) {
                push_token(&mut tokens, &text[start..dot_start + 1], start);
                i += 2;
                continue;
            }
        }

        split_clitics(&mut tokens, segment, start);
        i += 1;
    }

    tokens
}

/// Abreviação conhecida ou sigla com pontos internos (ex: "U.S", "e.g")
fn is_abbreviation(segment: &str) -> bool {
    let lower = segment.to_lowercase();
    ABBREVIATIONS.contains(&lower.as_str())
        || (segment.contains('.') && segment.chars().all(|c| c.is_alphabetic() || c == '.'))
}

/// Separa "n't" e os clíticos com apóstrofo do radical
fn split_clitics(tokens: &mut Vec<Token>, segment: &str, start: usize) {
    let normalized = segment.replace('\u{2019}', "'").to_lowercase();

    // A substituição de ’ (3 bytes) por ' (1 byte) muda os offsets: o corte é
    // calculado em caracteres e convertido de volta para bytes do original.
    let cut_at = |suffix_chars: usize| {
        let chars: Vec<(usize, char)> = segment.char_indices().collect();
        chars
            .len()
            .checked_sub(suffix_chars)
            .filter(|&idx| idx > 0)
            .map(|idx| chars[idx].0)
    };

    if normalized.ends_with("n't") {
        if let Some(cut) = cut_at(3) {
            push_token(tokens, &segment[..cut], start);
            push_token(tokens, &segment[cut..], start + cut);
            return;
        }
    }

    for clitic in CLITICS {
        if normalized.ends_with(clitic) {
            if let Some(cut) = cut_at(clitic.chars().count()) {
                push_token(tokens, &segment[..cut], start);
                push_token(tokens, &segment[cut..], start + cut);
                return;
            }
        }
    }

    push_token(tokens, segment, start);
}

/// Adiciona um token diretamente
fn push_token(tokens: &mut Vec<Token>, text: &str, start: usize) {
    tokens.push(Token {
        text: text.to_string(),
        start,
        end: start + text.len(),
        index: 0, // será atribuído depois
    });
}
