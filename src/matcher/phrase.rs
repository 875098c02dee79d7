//! Multi-word phrase analysis.
//!
//! Phrases are compared word by word: both sides are tokenized, function
//! words (articles, prepositions, pronouns) and single-character tokens
//! are dropped, and every remaining target word greedily picks the spoken
//! word that scores best against it.
//!
//! The greedy pairing is per target word, not a global assignment: one
//! spoken word may be claimed as the best match for several target words.
//! That is the documented behavior of this scorer; do not replace it with
//! bipartite matching without revisiting the accept thresholds.

use super::result::{PhoneticAnalysisResult, PhraseAnalysisResult, WordAnalysis};
use super::PhoneticMatcher;

/// Overall-score floor for accepting a phrase.
const PHRASE_THRESHOLD: u32 = 70;
/// Overall-score floor in strict mode.
const STRICT_PHRASE_THRESHOLD: u32 = 90;

/// Portuguese function words excluded from phrase scoring.
const STOP_WORDS: &[&str] = &[
    "as", "os", "um", "uma", "uns", "umas", "de", "do", "da", "dos", "das",
    "em", "no", "na", "nos", "nas", "ao", "aos", "às", "por", "para",
    "pelo", "pela", "com", "sem", "sob", "que", "se", "eu", "tu", "ele",
    "ela", "eles", "elas", "nós", "vós", "você", "vocês", "me", "te",
    "lhe", "lhes", "meu", "minha", "seu", "sua", "teu", "tua", "este",
    "esta", "isto", "esse", "essa", "isso", "aquele", "aquela", "aquilo",
];

/// Tokenize into scoreable words: lowercased, punctuation-trimmed, stop
/// words and single-character tokens removed.
pub(crate) fn content_words(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split_whitespace()
        .map(|word| {
            word.trim_matches(|c: char| !c.is_alphanumeric())
                .to_string()
        })
        .filter(|word| word.chars().count() > 1)
        .filter(|word| !STOP_WORDS.contains(&word.as_str()))
        .collect()
}

pub(crate) fn analyze_phrase(
    matcher: &PhoneticMatcher,
    spoken: &str,
    target: &str,
    word_threshold: u32,
    strict: bool,
) -> PhraseAnalysisResult {
    let targets = content_words(target);
    let spoken_words = content_words(spoken);

    if targets.is_empty() {
        return PhraseAnalysisResult {
            matched: false,
            overall_score: 0,
            average_similarity: 0,
            words: Vec::new(),
            missed_words: Vec::new(),
        };
    }

    let mut words = Vec::with_capacity(targets.len());
    for target_word in &targets {
        let mut best: Option<(usize, PhoneticAnalysisResult)> = None;
        for (index, spoken_word) in spoken_words.iter().enumerate() {
            let result = matcher.is_match(spoken_word, target_word, word_threshold);
            // Ties keep the first-encountered spoken word.
            let improves = best
                .as_ref()
                .map_or(true, |(_, current)| result.similarity > current.similarity);
            if improves {
                best = Some((index, result));
            }
        }

        words.push(match best {
            Some((index, result)) => WordAnalysis {
                target: target_word.clone(),
                spoken: Some(spoken_words[index].clone()),
                similarity: result.similarity,
                matched: result.matched,
            },
            None => WordAnalysis {
                target: target_word.clone(),
                spoken: None,
                similarity: 0,
                matched: false,
            },
        });
    }

    let matched_count = words.iter().filter(|w| w.matched).count();
    let overall_score =
        ((matched_count as f64 / targets.len() as f64) * 100.0).round() as u32;
    let average_similarity = (words.iter().map(|w| f64::from(w.similarity)).sum::<f64>()
        / words.len() as f64)
        .round() as u32;
    let goal = if strict {
        STRICT_PHRASE_THRESHOLD
    } else {
        PHRASE_THRESHOLD
    };
    let missed_words = words
        .iter()
        .filter(|w| !w.matched)
        .map(|w| w.target.clone())
        .collect();

    PhraseAnalysisResult {
        matched: overall_score >= goal,
        overall_score,
        average_similarity,
        words,
        missed_words,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_words_drops_stop_words_and_short_tokens() {
        assert_eq!(
            content_words("o rato roeu a roupa do rei"),
            vec!["rato", "roeu", "roupa", "rei"]
        );
    }

    #[test]
    fn test_content_words_trims_punctuation() {
        assert_eq!(content_words("Rato, roupa!"), vec!["rato", "roupa"]);
    }

    #[test]
    fn test_content_words_empty_input() {
        assert!(content_words("").is_empty());
        assert!(content_words("o a e").is_empty());
    }
}
