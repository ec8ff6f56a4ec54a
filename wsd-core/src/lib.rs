//! # wsd-core: Desambiguação Lexical pelo Sentido Mais Frequente
//!
//! Este crate atribui a cada palavra de uma sentença em inglês um rótulo de
//! sentido. Palavras de conteúdo recebem a chave do sentido mais frequente no
//! WordNet (`WORDNET please%2:37:00::`); palavras de classe fechada recebem um
//! rótulo categórico (`WSDHELPER determiner`).
//!
//! ## Arquitetura do Sistema
//!
//! 1.  **Tokenização** ([`tokenizer`]): tokens Penn Treebank com offsets originais.
//! 2.  **Etiquetagem** ([`tagger`]): uma tag POS por token.
//! 3.  **Lematização** ([`lemmatizer`]): forma de dicionário de cada token.
//! 4.  **Classificação** ([`closed_class`]): tag → classe aberta ou categoria fechada.
//! 5.  **Inventário** ([`inventory`]): `(lema, classe)` → sentidos ordenados por frequência.
//! 6.  **Motor MFS** ([`mfs`]): rótulos por índice, por span ou para a sentença inteira.
//!
//! O [`pipeline`] liga as etapas sobre um [`WsdContext`] carregado uma vez.
//!
//! ## Exemplo de Uso
//!
//! ```rust
//! use wsd_core::{TokenSpan, WsdPipeline};
//!
//! # fn main() -> wsd_core::Result<()> {
//! let pipeline = WsdPipeline::bundled()?;
//! let text = "We need to discuss an important topic, please write to me soon.";
//!
//! // Uma palavra
//! let label = pipeline.analyze_word(text, 8)?;
//! assert_eq!(label.to_string(), "WORDNET please%2:37:00::");
//!
//! // Um trecho [start, end)
//! let labels = pipeline.analyze_span(text, TokenSpan::new(0, 3))?;
//! assert_eq!(labels.len(), 3);
//! # Ok(())
//! # }
//! ```

pub mod closed_class;
pub mod config;
pub mod corpus;
pub mod error;
pub mod inventory;
pub mod lemmatizer;
pub mod mfs;
pub mod pipeline;
pub mod sense;
pub mod tagger;
pub mod tokenizer;

pub use closed_class::{classify, ClosedClass, TagClass, WordClass};
pub use config::ResourceConfig;
pub use error::{Result, WsdError};
pub use inventory::{SenseEntry, SenseInventory, WordNetSenseIndex};
pub use mfs::{AnnotatedSentence, MostFrequentSense, TokenSpan};
pub use pipeline::{PipelineEvent, WsdContext, WsdPipeline};
pub use sense::{SenseKey, SenseLabel};
pub use tokenizer::{Token, TokenizerMode};
