//! # Motor MFS (Most Frequent Sense)
//!
//! Política de desambiguação mais simples possível, e a linha de base clássica
//! da área: cada palavra de conteúdo recebe o **primeiro sentido** do inventário
//! para o par `(lema, classe)`, sem olhar o contexto.
//!
//! ## Algoritmo (por posição)
//!
//! 1. Classifica `tags[i]` ([`classify`]).
//!    - Tag desconhecida → erro fatal `UnrecognizedTag`.
//!    - Classe fechada → rótulo categórico fixo (`WSDHELPER determiner`).
//! 2. Classe aberta → consulta `(lemmas[i], classe)` no inventário.
//!    - Há sentidos → `WORDNET <chave do primeiro>`.
//!    - Lista vazia → `WSDHELPER no sense available` (falha local, não aborta).
//!
//! ## Três formas de chamada
//!
//! | Operação             | Alvo                   | Resultado          |
//! |----------------------|------------------------|--------------------|
//! | `disambiguate_word`  | um índice `i`          | 1 rótulo           |
//! | `disambiguate_span`  | `[start, end)`         | `end - start` rótulos |
//! | `disambiguate_all`   | `[0, len)`             | `len` rótulos      |
//!
//! Todas passam pela mesma rotina por índice, então o rótulo de uma posição
//! não depende da forma de chamada.

use std::fmt;
use std::sync::Arc;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::closed_class::{classify, TagClass};
use crate::error::{Result, WsdError};
use crate::inventory::{SenseEntry, SenseInventory};
use crate::sense::SenseLabel;

/// Intervalo semiaberto `[start, end)` de índices de tokens.
///
/// `end` é exclusivo: um trecho legado com fim inclusivo `[3, 7]` deve ser
/// passado como `TokenSpan::new(3, 8)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenSpan {
    pub start: usize,
    pub end: usize,
}

impl TokenSpan {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Span cobrindo a sentença inteira
    pub fn full(len: usize) -> Self {
        Self { start: 0, end: len }
    }

    /// Constrói um span a partir de índices com sinal (ex: vindos de JSON),
    /// validando contra o comprimento da sentença.
    pub fn checked(start: i64, end: i64, len: usize) -> Result<Self> {
        let out_of_range = || WsdError::SpanOutOfRange { start, end, len };
        let start_u = usize::try_from(start).map_err(|_| out_of_range())?;
        let end_u = usize::try_from(end).map_err(|_| out_of_range())?;
        let span = Self::new(start_u, end_u);
        span.validate(len)?;
        Ok(span)
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, index: usize) -> bool {
        self.start <= index && index < self.end
    }

    fn validate(&self, len: usize) -> Result<()> {
        if self.start > self.end || self.end > len {
            return Err(WsdError::SpanOutOfRange {
                start: self.start as i64,
                end: self.end as i64,
                len,
            });
        }
        Ok(())
    }
}

impl fmt::Display for TokenSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.start, self.end)
    }
}

/// Uma sentença já processada pelo pipeline: tokens, tags e lemas alinhados.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnotatedSentence {
    pub tokens: Vec<String>,
    pub tags: Vec<String>,
    pub lemmas: Vec<String>,
}

impl AnnotatedSentence {
    /// Constrói a sentença verificando o alinhamento dos três vetores.
    pub fn new(tokens: Vec<String>, tags: Vec<String>, lemmas: Vec<String>) -> Result<Self> {
        check_alignment(&tokens, &tags, &lemmas)?;
        Ok(Self { tokens, tags, lemmas })
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

fn check_alignment<S: AsRef<str>>(tokens: &[S], tags: &[S], lemmas: &[S]) -> Result<()> {
    if tokens.len() != tags.len() || tokens.len() != lemmas.len() {
        let err = WsdError::MisalignedInput {
            tokens: tokens.len(),
            tags: tags.len(),
            lemmas: lemmas.len(),
        };
        warn!(error = %err, "rejected disambiguation call");
        return Err(err);
    }
    Ok(())
}

/// Desambiguador pelo sentido mais frequente.
///
/// Não guarda estado mutável: o único recurso é o inventário, somente-leitura e
/// compartilhado via `Arc`. Pode ser clonado e usado de várias threads ao mesmo tempo.
#[derive(Clone)]
pub struct MostFrequentSense {
    inventory: Arc<dyn SenseInventory>,
}

impl fmt::Debug for MostFrequentSense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MostFrequentSense")
            .field("inventory", &self.inventory.source().name())
            .finish()
    }
}

impl MostFrequentSense {
    pub fn new(inventory: Arc<dyn SenseInventory>) -> Self {
        Self { inventory }
    }

    /// Desambigua uma única palavra.
    ///
    /// # Erros
    /// `MisalignedInput`, `IndexOutOfRange` ou `UnrecognizedTag`.
    pub fn disambiguate_word<S: AsRef<str>>(
        &self,
        tokens: &[S],
        tags: &[S],
        lemmas: &[S],
        index: usize,
    ) -> Result<SenseLabel> {
        check_alignment(tokens, tags, lemmas)?;
        if index >= tokens.len() {
            let err = WsdError::IndexOutOfRange { index, len: tokens.len() };
            warn!(error = %err, "rejected disambiguation call");
            return Err(err);
        }
        self.label_at(tokens, tags, lemmas, index)
    }

    /// Desambigua as palavras de `[span.start, span.end)`, em ordem crescente.
    ///
    /// O resultado tem exatamente `span.len()` rótulos; span vazio devolve vetor vazio.
    /// Qualquer erro fatal descarta o resultado inteiro.
    pub fn disambiguate_span<S: AsRef<str>>(
        &self,
        tokens: &[S],
        tags: &[S],
        lemmas: &[S],
        span: TokenSpan,
    ) -> Result<Vec<SenseLabel>> {
        check_alignment(tokens, tags, lemmas)?;
        if let Err(err) = span.validate(tokens.len()) {
            warn!(error = %err, "rejected disambiguation call");
            return Err(err);
        }
        (span.start..span.end)
            .map(|i| self.label_at(tokens, tags, lemmas, i))
            .collect()
    }

    /// Desambigua a sentença inteira (equivale ao span `[0, len)`).
    pub fn disambiguate_all<S: AsRef<str>>(
        &self,
        tokens: &[S],
        tags: &[S],
        lemmas: &[S],
    ) -> Result<Vec<SenseLabel>> {
        self.disambiguate_span(tokens, tags, lemmas, TokenSpan::full(tokens.len()))
    }

    /// Atalho de `disambiguate_all` para sentenças produzidas pelo pipeline.
    pub fn disambiguate_sentence(&self, sentence: &AnnotatedSentence) -> Result<Vec<SenseLabel>> {
        self.disambiguate_all(&sentence.tokens, &sentence.tags, &sentence.lemmas)
    }

    /// Desambigua várias sentenças em paralelo (Rayon).
    ///
    /// Cada sentença é independente: o erro de uma não afeta as outras.
    /// A ordem dos resultados é a ordem da entrada.
    pub fn disambiguate_batch(&self, sentences: &[AnnotatedSentence]) -> Vec<Result<Vec<SenseLabel>>> {
        sentences
            .par_iter()
            .map(|sentence| self.disambiguate_sentence(sentence))
            .collect()
    }

    /// Todos os sentidos da palavra em `index`, do mais ao menos frequente.
    ///
    /// Palavras de classe fechada devolvem lista vazia.
    pub fn ranked_senses<S: AsRef<str>>(
        &self,
        tokens: &[S],
        tags: &[S],
        lemmas: &[S],
        index: usize,
    ) -> Result<Vec<SenseEntry>> {
        check_alignment(tokens, tags, lemmas)?;
        if index >= tokens.len() {
            return Err(WsdError::IndexOutOfRange { index, len: tokens.len() });
        }
        match tag_class(tags, index)? {
            TagClass::Closed(_) => Ok(Vec::new()),
            TagClass::Open(class) => Ok(self.inventory.lookup(lemmas[index].as_ref(), class)),
        }
    }

    /// Rotina compartilhada pelas três formas de chamada.
    /// Pré-condição: entrada alinhada e `index` dentro dos limites.
    fn label_at<S: AsRef<str>>(&self, tokens: &[S], tags: &[S], lemmas: &[S], index: usize) -> Result<SenseLabel> {
        let lemma = lemmas[index].as_ref();

        let label = match tag_class(tags, index)? {
            TagClass::Closed(class) => SenseLabel::closed(class),
            TagClass::Open(class) => match self.inventory.most_frequent(lemma, class) {
                Some(entry) => SenseLabel::SenseId {
                    source: self.inventory.source(),
                    lemma: lemma.to_string(),
                    key: entry.key,
                },
                None => {
                    debug!(index, token = tokens[index].as_ref(), lemma, class = class.name(), "no sense available");
                    SenseLabel::no_sense()
                }
            },
        };

        debug!(index, token = tokens[index].as_ref(), label = %label, "label assigned");
        Ok(label)
    }
}

fn tag_class<S: AsRef<str>>(tags: &[S], index: usize) -> Result<TagClass> {
    let tag = tags[index].as_ref();
    classify(tag).ok_or_else(|| {
        let err = WsdError::UnrecognizedTag {
            index,
            tag: tag.to_string(),
        };
        warn!(error = %err, "rejected disambiguation call");
        err
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::closed_class::{ClosedClass, WordClass, PUNCTUATION_TAGS};
    use crate::inventory::WordNetSenseIndex;
    use crate::sense::SenseSource;
    use proptest::prelude::*;

    const INDEX: &str = "\
component%1:06:00:: 03081021 1 8
be%2:42:03:: 02604760 1 10742
highly%4:02:01:: 00183014 1 12
highly%4:02:00:: 00182866 2 4
radioactive%3:00:00:: 02882611 1 5
point%1:15:00:: 08620061 2 57
point%1:09:01:: 05816287 1 68
";

    /// Inventário que nunca conhece nenhum lema
    struct EmptyInventory;

    impl SenseInventory for EmptyInventory {
        fn source(&self) -> SenseSource {
            SenseSource::WordNet
        }

        fn lookup(&self, _lemma: &str, _class: WordClass) -> Vec<SenseEntry> {
            Vec::new()
        }
    }

    fn engine() -> MostFrequentSense {
        MostFrequentSense::new(Arc::new(WordNetSenseIndex::parse(INDEX, "test").unwrap()))
    }

    fn sentence() -> (Vec<&'static str>, Vec<&'static str>, Vec<&'static str>) {
        (
            vec!["The", "component", "was", "highly", "radioactive", "to", "the", "point", "."],
            vec!["DT", "NN", "VBD", "RB", "JJ", "TO", "DT", "NN", "."],
            vec!["the", "component", "be", "highly", "radioactive", "to", "the", "point", "."],
        )
    }

    #[test]
    fn test_single_word() {
        let (tokens, tags, lemmas) = sentence();
        let label = engine().disambiguate_word(&tokens, &tags, &lemmas, 3).unwrap();
        assert_eq!(label.label(), "WORDNET highly%4:02:01::");
        assert!(label.is_sense());
    }

    #[test]
    fn test_span_mixes_senses_and_categories() {
        let (tokens, tags, lemmas) = sentence();
        let labels = engine()
            .disambiguate_span(&tokens, &tags, &lemmas, TokenSpan::new(3, 8))
            .unwrap();
        let strings: Vec<String> = labels.iter().map(SenseLabel::label).collect();
        assert_eq!(
            strings,
            [
                "WORDNET highly%4:02:01::",
                "WORDNET radioactive%3:00:00::",
                "WSDHELPER to",
                "WSDHELPER determiner",
                "WORDNET point%1:09:01::",
            ]
        );
    }

    #[test]
    fn test_whole_sentence() {
        let (tokens, tags, lemmas) = sentence();
        let labels = engine().disambiguate_all(&tokens, &tags, &lemmas).unwrap();
        assert_eq!(labels.len(), tokens.len());
        assert_eq!(labels[2].label(), "WORDNET be%2:42:03::");
        assert_eq!(labels[8].label(), "WSDHELPER punctuation");
    }

    #[test]
    fn test_missing_sense_is_local() {
        let (tokens, tags, lemmas) = sentence();
        let engine = MostFrequentSense::new(Arc::new(EmptyInventory));
        let labels = engine.disambiguate_all(&tokens, &tags, &lemmas).unwrap();
        assert_eq!(labels.len(), tokens.len());
        assert_eq!(labels[1], SenseLabel::no_sense());
        assert_eq!(labels[0].label(), "WSDHELPER determiner");
    }

    #[test]
    fn test_empty_span_and_empty_sentence() {
        let (tokens, tags, lemmas) = sentence();
        let labels = engine()
            .disambiguate_span(&tokens, &tags, &lemmas, TokenSpan::new(4, 4))
            .unwrap();
        assert!(labels.is_empty());

        let empty: Vec<&str> = Vec::new();
        assert!(engine().disambiguate_all(&empty, &empty, &empty).unwrap().is_empty());
    }

    #[test]
    fn test_out_of_range() {
        let (tokens, tags, lemmas) = sentence();
        let engine = engine();

        let err = engine.disambiguate_word(&tokens, &tags, &lemmas, tokens.len()).unwrap_err();
        assert!(err.is_out_of_range());

        let err = engine
            .disambiguate_span(&tokens, &tags, &lemmas, TokenSpan::new(2, 10))
            .unwrap_err();
        assert!(err.is_out_of_range());

        let err = engine
            .disambiguate_span(&tokens, &tags, &lemmas, TokenSpan::new(5, 3))
            .unwrap_err();
        assert!(matches!(err, WsdError::SpanOutOfRange { start: 5, end: 3, .. }));

        let err = TokenSpan::checked(-1, 3, tokens.len()).unwrap_err();
        assert!(matches!(err, WsdError::SpanOutOfRange { start: -1, end: 3, .. }));
    }

    #[test]
    fn test_misaligned_input() {
        let (tokens, tags, mut lemmas) = sentence();
        lemmas.pop();
        let err = engine().disambiguate_all(&tokens, &tags, &lemmas).unwrap_err();
        assert!(matches!(err, WsdError::MisalignedInput { tokens: 9, tags: 9, lemmas: 8 }));

        let err = AnnotatedSentence::new(vec!["a".into()], vec![], vec![]).unwrap_err();
        assert!(matches!(err, WsdError::MisalignedInput { .. }));
    }

    #[test]
    fn test_unrecognized_tag_aborts_whole_call() {
        let (tokens, mut tags, lemmas) = sentence();
        tags[6] = "B-PER";
        let engine = engine();

        let err = engine.disambiguate_all(&tokens, &tags, &lemmas).unwrap_err();
        match err {
            WsdError::UnrecognizedTag { index, tag } => {
                assert_eq!(index, 6);
                assert_eq!(tag, "B-PER");
            }
            other => panic!("unexpected error: {other}"),
        }

        // Fora do span selecionado a tag ruim não é consultada
        assert!(engine
            .disambiguate_span(&tokens, &tags, &lemmas, TokenSpan::new(0, 6))
            .is_ok());
    }

    #[test]
    fn test_ranked_senses() {
        let (tokens, tags, lemmas) = sentence();
        let engine = engine();

        let senses = engine.ranked_senses(&tokens, &tags, &lemmas, 3).unwrap();
        let keys: Vec<&str> = senses.iter().map(|s| s.key.as_str()).collect();
        assert_eq!(keys, ["highly%4:02:01::", "highly%4:02:00::"]);

        assert!(engine.ranked_senses(&tokens, &tags, &lemmas, 0).unwrap().is_empty());
    }

    #[test]
    fn test_batch_preserves_order_and_isolates_errors() {
        let (tokens, tags, lemmas) = sentence();
        let to_owned = |v: &[&str]| v.iter().map(|s| s.to_string()).collect::<Vec<_>>();
        let good = AnnotatedSentence::new(to_owned(&tokens[..]), to_owned(&tags[..]), to_owned(&lemmas[..])).unwrap();
        let mut bad = good.clone();
        bad.tags[0] = "???".to_string();

        let results = engine().disambiguate_batch(&[good.clone(), bad, good]);
        assert_eq!(results.len(), 3);
        assert!(results[0].is_ok());
        assert!(results[1].is_err());
        assert_eq!(results[0].as_ref().unwrap(), results[2].as_ref().unwrap());
    }

    #[test]
    fn test_engine_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<MostFrequentSense>();
    }

    fn closed_tags() -> Vec<&'static str> {
        let mut tags = vec![
            "CC", "CD", "DT", "EX", "FW", "IN", "LS", "MD", "PDT", "POS", "PRP", "PRP$", "RP", "SYM",
            "TO", "UH", "WDT", "WP", "WP$", "WRB",
        ];
        tags.extend_from_slice(PUNCTUATION_TAGS);
        tags
    }

    proptest! {
        #[test]
        fn span_length_matches(start in 0usize..=9, end in 0usize..=9) {
            prop_assume!(start <= end);
            let (tokens, tags, lemmas) = sentence();
            let labels = engine()
                .disambiguate_span(&tokens, &tags, &lemmas, TokenSpan::new(start, end))
                .unwrap();
            prop_assert_eq!(labels.len(), end - start);
        }

        #[test]
        fn single_index_agrees_with_span(start in 0usize..9, width in 1usize..9, offset in 0usize..9) {
            let end = (start + width).min(9);
            let index = start + offset % (end - start);
            prop_assert!(TokenSpan::new(start, end).contains(index));
            let (tokens, tags, lemmas) = sentence();
            let engine = engine();
            let span = engine
                .disambiguate_span(&tokens, &tags, &lemmas, TokenSpan::new(start, end))
                .unwrap();
            let word = engine.disambiguate_word(&tokens, &tags, &lemmas, index).unwrap();
            prop_assert_eq!(&span[index - start], &word);
        }

        #[test]
        fn full_sentence_equals_full_span(cut in 0usize..=9) {
            let (tokens, tags, lemmas) = sentence();
            let (tokens, tags, lemmas) = (&tokens[..cut], &tags[..cut], &lemmas[..cut]);
            let engine = engine();
            let all = engine.disambiguate_all(tokens, tags, lemmas).unwrap();
            let span = engine
                .disambiguate_span(tokens, tags, lemmas, TokenSpan::full(cut))
                .unwrap();
            prop_assert_eq!(all, span);
        }

        #[test]
        fn closed_class_ignores_lemma(tag_idx in 0usize..33, lemma in "[a-z]{1,10}") {
            let tags = closed_tags();
            let tag = tags[tag_idx % tags.len()];
            let class = match classify(tag) {
                Some(TagClass::Closed(class)) => class,
                other => panic!("{tag} classified as {other:?}"),
            };
            let label = engine()
                .disambiguate_word(&["w"], &[tag], &[lemma.as_str()], 0)
                .unwrap();
            prop_assert_eq!(label, SenseLabel::closed(class));
        }

        #[test]
        fn repeated_calls_are_identical(start in 0usize..=9) {
            let (tokens, tags, lemmas) = sentence();
            let engine = engine();
            let span = TokenSpan::new(start, 9);
            let first = engine.disambiguate_span(&tokens, &tags, &lemmas, span).unwrap();
            let second = engine.disambiguate_span(&tokens, &tags, &lemmas, span).unwrap();
            prop_assert_eq!(first, second);
        }
    }

    #[test]
    fn test_closed_class_label_uses_category_name() {
        assert_eq!(SenseLabel::closed(ClosedClass::Modal).label(), "WSDHELPER modal");
    }
}
