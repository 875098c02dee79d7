//! Analysis result value objects.
//!
//! Everything here is produced per call, immutable, and destined for the
//! UI layer. With the `serialization` feature enabled the result types
//! serialize directly (field names follow the consuming API: the verdict
//! serializes as `"match"`).

#[cfg(feature = "serialization")]
use serde::Serialize;

/// Normalized phonetic forms of the two sides of a comparison.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serialization", derive(Serialize))]
pub struct PhoneticForms {
    /// Phonetic form of the target word.
    pub original: String,
    /// Phonetic form of the spoken transcript.
    pub spoken: String,
}

/// A known articulation-error pattern consistent with what was heard.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serialization", derive(Serialize))]
pub struct ArticulationError {
    /// Stable error-pattern identifier, e.g. `"rotacism"`.
    pub error_type: &'static str,
    /// The target word as it should be pronounced.
    pub expected: String,
    /// The common mispronunciation the utterance aligned with.
    pub common: String,
}

impl ArticulationError {
    /// Short human-readable hint for exercise feedback.
    pub fn hint(&self) -> String {
        format!(
            "\"{}\" often comes out as \"{}\" — listen for the difference",
            self.expected, self.common
        )
    }
}

/// Verdict and diagnostics for a single-word comparison.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize))]
pub struct PhoneticAnalysisResult {
    /// Final accept/reject verdict.
    #[cfg_attr(feature = "serialization", serde(rename = "match"))]
    pub matched: bool,
    /// Normalized edit-distance score, 0–100.
    pub similarity: u32,
    /// Normalized phonetic forms of both sides.
    pub phonetics: PhoneticForms,
    /// True when the raw spoken text contained the target verbatim.
    pub exact_match: bool,
    /// Articulation-error patterns whose expected variant was heard.
    pub possible_errors: Vec<ArticulationError>,
}

/// Per-target-word detail inside a phrase analysis.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize))]
pub struct WordAnalysis {
    /// The target word under evaluation.
    pub target: String,
    /// The spoken word that scored best against it, if any were heard.
    pub spoken: Option<String>,
    /// Similarity of that best pairing, 0–100.
    pub similarity: u32,
    /// Whether the pairing counted as a match.
    pub matched: bool,
}

/// Verdict and word-by-word detail for a multi-word phrase.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize))]
pub struct PhraseAnalysisResult {
    /// Final accept/reject verdict.
    #[cfg_attr(feature = "serialization", serde(rename = "match"))]
    pub matched: bool,
    /// Percentage of target words that matched, 0–100.
    pub overall_score: u32,
    /// Mean per-word similarity, 0–100.
    pub average_similarity: u32,
    /// One entry per target word, in target order.
    pub words: Vec<WordAnalysis>,
    /// Target words no spoken word matched.
    pub missed_words: Vec<String>,
}

/// Outcome of [`analyze`](crate::matcher::PhoneticMatcher::analyze):
/// single-word targets produce word results, phrases produce phrase
/// results.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize))]
pub enum AnalysisReport {
    /// Single-word verdict.
    Word(PhoneticAnalysisResult),
    /// Multi-word verdict.
    Phrase(PhraseAnalysisResult),
}

impl AnalysisReport {
    /// The accept/reject verdict, regardless of shape.
    pub fn matched(&self) -> bool {
        match self {
            AnalysisReport::Word(r) => r.matched,
            AnalysisReport::Phrase(r) => r.matched,
        }
    }

    /// The headline score: similarity for words, overall score for phrases.
    pub fn score(&self) -> u32 {
        match self {
            AnalysisReport::Word(r) => r.similarity,
            AnalysisReport::Phrase(r) => r.overall_score,
        }
    }
}
