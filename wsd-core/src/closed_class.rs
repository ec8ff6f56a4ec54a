//! # Classificador de Classes Fechadas
//!
//! Mapeamento estático e **total** do conjunto de tags Penn Treebank para uma de
//! duas situações:
//!
//! | Situação       | Tags                                   | O que acontece                    |
//! |----------------|----------------------------------------|-----------------------------------|
//! | Classe aberta  | `NN*`, `VB*`, `JJ*`, `RB*`             | Consulta ao inventário de sentidos |
//! | Classe fechada | `DT`, `IN`, `PRP`, `CC`, `MD`, `TO`... | Rótulo categórico fixo             |
//!
//! Uma tag que não pertence a nenhum dos dois grupos devolve `None`: o motor
//! trata isso como erro (`UnrecognizedTag`) em vez de tentar uma consulta às cegas.

use serde::{Deserialize, Serialize};

/// Classe gramatical aberta, candidata à desambiguação.
///
/// Cada classe corresponde a uma parte do discurso do WordNet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WordClass {
    Noun,
    Verb,
    Adjective,
    Adverb,
}

impl WordClass {
    /// Nome curto (ex: para logs e JSON)
    pub fn name(&self) -> &'static str {
        match self {
            WordClass::Noun => "noun",
            WordClass::Verb => "verb",
            WordClass::Adjective => "adjective",
            WordClass::Adverb => "adverb",
        }
    }

    /// Converte o `ss_type` de uma chave de sentido do WordNet na classe aberta.
    ///
    /// `1` substantivo, `2` verbo, `3` adjetivo, `4` advérbio, `5` adjetivo satélite.
    /// Satélites são dobrados em adjetivos, como faz o próprio índice do WordNet.
    pub fn from_synset_type(ss_type: u8) -> Option<Self> {
        match ss_type {
            1 => Some(WordClass::Noun),
            2 => Some(WordClass::Verb),
            3 | 5 => Some(WordClass::Adjective),
            4 => Some(WordClass::Adverb),
            _ => None,
        }
    }
}

/// Categorias de palavras de classe fechada.
///
/// Os nomes seguem a descrição oficial das tags Penn Treebank e são o que aparece
/// no rótulo final (`WSDHELPER determiner`, `WSDHELPER personal pronoun`...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClosedClass {
    CoordinatingConjunction,
    CardinalNumber,
    Determiner,
    ExistentialThere,
    ForeignWord,
    Preposition,
    ListItemMarker,
    Modal,
    Predeterminer,
    PossessiveEnding,
    PersonalPronoun,
    PossessivePronoun,
    Particle,
    Symbol,
    To,
    Interjection,
    WhDeterminer,
    WhPronoun,
    PossessiveWhPronoun,
    WhAdverb,
    Punctuation,
}

impl ClosedClass {
    /// Nome da categoria como aparece no rótulo
    pub fn name(&self) -> &'static str {
        match self {
            ClosedClass::CoordinatingConjunction => "coordinating conjunction",
            ClosedClass::CardinalNumber => "cardinal number",
            ClosedClass::Determiner => "determiner",
            ClosedClass::ExistentialThere => "existential there",
            ClosedClass::ForeignWord => "foreign word",
            ClosedClass::Preposition => "preposition or subordinating conjunction",
            ClosedClass::ListItemMarker => "list item marker",
            ClosedClass::Modal => "modal",
            ClosedClass::Predeterminer => "predeterminer",
            ClosedClass::PossessiveEnding => "possessive ending",
            ClosedClass::PersonalPronoun => "personal pronoun",
            ClosedClass::PossessivePronoun => "possessive pronoun",
            ClosedClass::Particle => "particle",
            ClosedClass::Symbol => "symbol",
            ClosedClass::To => "to",
            ClosedClass::Interjection => "interjection",
            ClosedClass::WhDeterminer => "wh-determiner",
            ClosedClass::WhPronoun => "wh-pronoun",
            ClosedClass::PossessiveWhPronoun => "possessive wh-pronoun",
            ClosedClass::WhAdverb => "wh-adverb",
            ClosedClass::Punctuation => "punctuation",
        }
    }
}

/// Resultado da classificação de uma tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "class", rename_all = "snake_case")]
pub enum TagClass {
    /// Palavra de conteúdo: vai ao inventário de sentidos.
    Open(WordClass),
    /// Palavra funcional: recebe o rótulo categórico da classe.
    Closed(ClosedClass),
}

/// Tags de pontuação emitidas por taggers no estilo Penn Treebank.
pub const PUNCTUATION_TAGS: &[&str] = &[
    ".", ",", ":", "``", "''", "-LRB-", "-RRB-", "(", ")", "#", "$", "HYPH", "NFP",
];

/// Classifica uma tag POS.
///
/// Retorna `None` se a tag não faz parte do conjunto conhecido.
///
/// # Exemplo
/// ```rust
/// use wsd_core::closed_class::{classify, ClosedClass, TagClass, WordClass};
///
/// assert_eq!(classify("DT"), Some(TagClass::Closed(ClosedClass::Determiner)));
/// assert_eq!(classify("VBZ"), Some(TagClass::Open(WordClass::Verb)));
/// assert_eq!(classify("XYZ"), None);
/// ```
pub fn classify(tag: &str) -> Option<TagClass> {
    let class = match tag {
        "NN" | "NNS" | "NNP" | "NNPS" => TagClass::Open(WordClass::Noun),
        "VB" | "VBD" | "VBG" | "VBN" | "VBP" | "VBZ" => TagClass::Open(WordClass::Verb),
        "JJ" | "JJR" | "JJS" => TagClass::Open(WordClass::Adjective),
        "RB" | "RBR" | "RBS" => TagClass::Open(WordClass::Adverb),

        "CC" => TagClass::Closed(ClosedClass::CoordinatingConjunction),
        "CD" => TagClass::Closed(ClosedClass::CardinalNumber),
        "DT" => TagClass::Closed(ClosedClass::Determiner),
        "EX" => TagClass::Closed(ClosedClass::ExistentialThere),
        "FW" => TagClass::Closed(ClosedClass::ForeignWord),
        "IN" => TagClass::Closed(ClosedClass::Preposition),
        "LS" => TagClass::Closed(ClosedClass::ListItemMarker),
        "MD" => TagClass::Closed(ClosedClass::Modal),
        "PDT" => TagClass::Closed(ClosedClass::Predeterminer),
        "POS" => TagClass::Closed(ClosedClass::PossessiveEnding),
        "PRP" => TagClass::Closed(ClosedClass::PersonalPronoun),
        "PRP$" => TagClass::Closed(ClosedClass::PossessivePronoun),
        "RP" => TagClass::Closed(ClosedClass::Particle),
        "SYM" => TagClass::Closed(ClosedClass::Symbol),
        "TO" => TagClass::Closed(ClosedClass::To),
        "UH" => TagClass::Closed(ClosedClass::Interjection),
        "WDT" => TagClass::Closed(ClosedClass::WhDeterminer),
        "WP" => TagClass::Closed(ClosedClass::WhPronoun),
        "WP$" => TagClass::Closed(ClosedClass::PossessiveWhPronoun),
        "WRB" => TagClass::Closed(ClosedClass::WhAdverb),
        t if PUNCTUATION_TAGS.contains(&t) => TagClass::Closed(ClosedClass::Punctuation),
        _ => return None,
    };
    Some(class)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_classes() {
        for tag in ["NN", "NNS", "NNP", "NNPS"] {
            assert_eq!(classify(tag), Some(TagClass::Open(WordClass::Noun)));
        }
        assert_eq!(classify("VBN"), Some(TagClass::Open(WordClass::Verb)));
        assert_eq!(classify("JJS"), Some(TagClass::Open(WordClass::Adjective)));
        assert_eq!(classify("RBR"), Some(TagClass::Open(WordClass::Adverb)));
    }

    #[test]
    fn test_closed_class_names() {
        assert_eq!(classify("PRP"), Some(TagClass::Closed(ClosedClass::PersonalPronoun)));
        assert_eq!(ClosedClass::PersonalPronoun.name(), "personal pronoun");
        assert_eq!(ClosedClass::To.name(), "to");
        assert_eq!(classify(","), Some(TagClass::Closed(ClosedClass::Punctuation)));
    }

    #[test]
    fn test_unknown_tag_is_none() {
        assert_eq!(classify(""), None);
        assert_eq!(classify("nn"), None);
        assert_eq!(classify("B-PER"), None);
    }

    #[test]
    fn test_synset_types() {
        assert_eq!(WordClass::from_synset_type(5), Some(WordClass::Adjective));
        assert_eq!(WordClass::from_synset_type(4), Some(WordClass::Adverb));
        assert_eq!(WordClass::from_synset_type(0), None);
    }
}
