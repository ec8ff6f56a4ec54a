//! # Pipeline WSD com Eventos Observáveis
//!
//! Liga as quatro etapas de processamento de uma sentença:
//!
//! ```text
//! texto ──► tokenizador ──► tagger ──► lematizador ──► motor MFS ──► rótulos
//! ```
//!
//! Os recursos (léxico, dicionário de lemas, inventário) são carregados **uma
//! vez** num [`WsdContext`] e depois congelados atrás de `Arc`s. Nada é global:
//! quem precisa do pipeline recebe o contexto explicitamente.
//!
//! Como no modo streaming do servidor, cada etapa emite um [`PipelineEvent`]
//! por um canal `mpsc`, o que permite mostrar o progresso em tempo real.

use std::sync::{mpsc, Arc};
use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::config::ResourceConfig;
use crate::error::Result;
use crate::inventory::{SenseInventory, WordNetSenseIndex};
use crate::lemmatizer::{DictionaryLemmatizer, Lemmatizer};
use crate::mfs::{AnnotatedSentence, MostFrequentSense, TokenSpan};
use crate::sense::SenseLabel;
use crate::tagger::{LexiconTagger, PosTagger};
use crate::tokenizer::{token_texts, Token, Tokenizer, TokenizerMode};

/// Recursos carregados uma vez e compartilhados (somente leitura) pelo pipeline.
#[derive(Clone)]
pub struct WsdContext {
    pub tokenizer_mode: TokenizerMode,
    pub tagger: Arc<dyn PosTagger>,
    pub lemmatizer: Arc<dyn Lemmatizer>,
    pub inventory: Arc<dyn SenseInventory>,
}

impl WsdContext {
    pub fn new(
        tokenizer_mode: TokenizerMode,
        tagger: Arc<dyn PosTagger>,
        lemmatizer: Arc<dyn Lemmatizer>,
        inventory: Arc<dyn SenseInventory>,
    ) -> Self {
        Self {
            tokenizer_mode,
            tagger,
            lemmatizer,
            inventory,
        }
    }

    /// Contexto com todos os recursos embutidos no crate.
    pub fn bundled() -> Result<Self> {
        Self::from_config(&ResourceConfig::default())
    }

    /// Carrega os recursos indicados na configuração; campos ausentes usam os embutidos.
    pub fn from_config(config: &ResourceConfig) -> Result<Self> {
        let tagger: Arc<dyn PosTagger> = match &config.pos_lexicon {
            Some(path) => Arc::new(LexiconTagger::load(path)?),
            None => Arc::new(LexiconTagger::bundled()?),
        };
        let lemmatizer: Arc<dyn Lemmatizer> = match &config.lemma_dictionary {
            Some(path) => Arc::new(DictionaryLemmatizer::load(path)?),
            None => Arc::new(DictionaryLemmatizer::bundled()?),
        };
        let inventory: Arc<dyn SenseInventory> = match &config.sense_index {
            Some(path) => Arc::new(WordNetSenseIndex::load(path)?),
            None => Arc::new(WordNetSenseIndex::bundled()?),
        };

        info!(tokenizer = ?config.tokenizer_mode, "WSD context ready");
        Ok(Self::new(config.tokenizer_mode, tagger, lemmatizer, inventory))
    }
}

/// Eventos emitidos pelo pipeline durante o processamento.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum PipelineEvent {
    /// **Passo 1**: tokens com seus offsets no texto original.
    TokenizationDone {
        tokens: Vec<Token>,
        total: usize,
    },
    /// **Passo 2**: uma tag Penn Treebank por token.
    TagsAssigned {
        tags: Vec<String>,
    },
    /// **Passo 3**: um lema por token.
    LemmasComputed {
        lemmas: Vec<String>,
    },
    /// **Passo 4**: rótulo final de um token (um evento por token, em ordem).
    SenseAssigned {
        token_index: usize,
        token_text: String,
        tag: String,
        lemma: String,
        /// Forma textual, ex: `"WORDNET please%2:37:00::"`
        label: String,
        sense: SenseLabel,
    },
    /// **Conclusão**: sentença anotada e todos os rótulos.
    Done {
        sentence: AnnotatedSentence,
        labels: Vec<String>,
        total_tokens: usize,
        processing_ms: u64,
    },
    /// **Falha**: erro fatal; nenhum rótulo parcial é enviado.
    Error {
        message: String,
    },
}

/// O pipeline WSD principal.
///
/// # Modos de Uso
/// - **Sync**: `analyze`, `analyze_word`, `analyze_span`.
/// - **Streaming**: `analyze_streaming`, para o WebSocket.
#[derive(Clone)]
pub struct WsdPipeline {
    context: WsdContext,
    engine: MostFrequentSense,
}

impl WsdPipeline {
    pub fn new(context: WsdContext) -> Self {
        let engine = MostFrequentSense::new(Arc::clone(&context.inventory));
        Self { context, engine }
    }

    /// Pipeline com os recursos embutidos.
    pub fn bundled() -> Result<Self> {
        Ok(Self::new(WsdContext::bundled()?))
    }

    pub fn engine(&self) -> &MostFrequentSense {
        &self.engine
    }

    /// Tokeniza, etiqueta e lematiza o texto.
    ///
    /// Falha com `MisalignedInput` se o tagger devolver um número de tags
    /// diferente do número de tokens.
    pub fn prepare(&self, text: &str) -> Result<AnnotatedSentence> {
        let tokens = self.context.tokenizer_mode.tokenize(text);
        self.annotate(&tokens)
    }

    fn annotate(&self, tokens: &[Token]) -> Result<AnnotatedSentence> {
        let texts = token_texts(tokens);
        let tags = self.context.tagger.tag(&texts);
        let lemmas = if tags.len() == texts.len() {
            self.context.lemmatizer.lemmatize_all(&texts, &tags)
        } else {
            Vec::new()
        };
        AnnotatedSentence::new(texts, tags, lemmas)
    }

    /// Processa o texto e rotula a sentença inteira.
    pub fn analyze(&self, text: &str) -> Result<(AnnotatedSentence, Vec<SenseLabel>)> {
        let sentence = self.prepare(text)?;
        let labels = self.engine.disambiguate_sentence(&sentence)?;
        debug!(tokens = sentence.len(), "sentence disambiguated");
        Ok((sentence, labels))
    }

    /// Processa o texto e rotula apenas o token em `index`.
    pub fn analyze_word(&self, text: &str, index: usize) -> Result<SenseLabel> {
        let s = self.prepare(text)?;
        self.engine.disambiguate_word(&s.tokens, &s.tags, &s.lemmas, index)
    }

    /// Processa o texto e rotula os tokens de `span`.
    pub fn analyze_span(&self, text: &str, span: TokenSpan) -> Result<Vec<SenseLabel>> {
        let s = self.prepare(text)?;
        self.engine.disambiguate_span(&s.tokens, &s.tags, &s.lemmas, span)
    }

    /// Executa o pipeline enviando eventos de progresso pelo canal `tx`.
    ///
    /// # Fluxo de Eventos
    /// 1. `TokenizationDone`
    /// 2. `TagsAssigned`
    /// 3. `LemmasComputed`
    /// 4. `SenseAssigned` (um por token)
    /// 5. `Done`, ou `Error` no lugar dos passos restantes
    ///
    /// Um receptor descartado não interrompe o processamento.
    pub fn analyze_streaming(&self, text: &str, tx: mpsc::Sender<PipelineEvent>) {
        let start = Instant::now();

        // === Passo 1: Tokenização ===
        let tokens = self.context.tokenizer_mode.tokenize(text);
        let _ = tx.send(PipelineEvent::TokenizationDone {
            total: tokens.len(),
            tokens: tokens.clone(),
        });

        // === Passos 2 e 3: Tags e lemas ===
        let sentence = match self.annotate(&tokens) {
            Ok(sentence) => sentence,
            Err(err) => {
                warn!(error = %err, "pipeline aborted");
                let _ = tx.send(PipelineEvent::Error { message: err.to_string() });
                return;
            }
        };
        let _ = tx.send(PipelineEvent::TagsAssigned {
            tags: sentence.tags.clone(),
        });
        let _ = tx.send(PipelineEvent::LemmasComputed {
            lemmas: sentence.lemmas.clone(),
        });

        // === Passo 4: Sentidos ===
        let labels = match self.engine.disambiguate_sentence(&sentence) {
            Ok(labels) => labels,
            Err(err) => {
                warn!(error = %err, "pipeline aborted");
                let _ = tx.send(PipelineEvent::Error { message: err.to_string() });
                return;
            }
        };

        for (i, sense) in labels.iter().enumerate() {
            let _ = tx.send(PipelineEvent::SenseAssigned {
                token_index: i,
                token_text: sentence.tokens[i].clone(),
                tag: sentence.tags[i].clone(),
                lemma: sentence.lemmas[i].clone(),
                label: sense.label(),
                sense: sense.clone(),
            });
        }

        let _ = tx.send(PipelineEvent::Done {
            total_tokens: sentence.len(),
            labels: labels.iter().map(SenseLabel::label).collect(),
            sentence,
            processing_ms: start.elapsed().as_millis() as u64,
        });
    }
}
