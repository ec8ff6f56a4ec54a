//! # Sentenças de Demonstração
//!
//! Frases em inglês usadas pelo servidor web e pelos testes. As três primeiras
//! são as sentenças de referência do desambiguador; as demais exercitam
//! clíticos, abreviações, números e palavras fora do inventário embutido.

/// Pares (tema, texto) para a página de demonstração
pub fn demo_sentences() -> Vec<(&'static str, &'static str)> {
    vec![
        (
            "Pedido",
            "We need to discuss an important topic, please write to me soon.",
        ),
        (
            "Ciência",
            "The component was highly radioactive to the point that it has been activated the second it touched water",
        ),
        (
            "Férias",
            "The summer is almost over and I did not go to the beach even once",
        ),
        (
            "Clíticos",
            "I don't think it's over, but we'll see what they've done.",
        ),
        (
            "Abreviações",
            "Dr. Smith moved to the U.S. in 1998 and paid 3.50 dollars for water.",
        ),
        (
            "Fora do inventário",
            "Alice carefully repainted the wooden fences near the quiet harbor.",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::WsdPipeline;

    #[test]
    fn test_demo_sentences_run_through_pipeline() {
        let pipeline = WsdPipeline::bundled().unwrap();
        for (topic, text) in demo_sentences() {
            let (sentence, labels) = pipeline
                .analyze(text)
                .unwrap_or_else(|e| panic!("{topic}: {e}"));
            assert!(!sentence.is_empty(), "{topic}");
            assert_eq!(labels.len(), sentence.len(), "{topic}");
        }
    }

    #[test]
    fn test_reference_sentences_come_first() {
        let sentences = demo_sentences();
        assert!(sentences.len() >= 3);
        assert!(sentences[0].1.contains("please"));
        assert!(sentences[2].1.contains("beach"));
    }
}
