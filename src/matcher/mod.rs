//! Phonetic pronunciation matching.
//!
//! [`PhoneticMatcher`] decides whether a spoken transcript acceptably
//! represents a target word or phrase, tolerant of accepted phonetic
//! variation and known articulation-error patterns, and explains the
//! decision.
//!
//! The matcher is a total function over its inputs: it never fails.
//! Malformed or empty input degrades to similarity 0 and a negative
//! verdict rather than an error, because the caller is a live interactive
//! UI that must always render some feedback.
//!
//! # Decision pipeline
//!
//! 1. **Containment** — if the raw spoken text contains the target
//!    verbatim (case-insensitive), accept immediately with similarity 100.
//! 2. **Fuzzy score** — otherwise, normalize both sides and score with the
//!    [phonetically weighted edit distance](crate::distance).
//! 3. **Articulation patterns** — apply every
//!    [substitution rule](crate::phonetics::substitution) to the target;
//!    a rule fires when the spoken text contains the mispronunciation the
//!    rule predicts.
//! 4. Accept when the score clears the threshold *or* any rule fired.
//!
//! # Example
//!
//! ```rust
//! use pronuncia::matcher::PhoneticMatcher;
//!
//! let matcher = PhoneticMatcher::new();
//!
//! // Rotacism: initial /r/ produced as /l/. Accepted, and explained.
//! let result = matcher.is_match("lato", "rato", 75);
//! assert!(result.matched);
//! assert_eq!(result.possible_errors[0].error_type, "rotacism");
//!
//! // Unrelated utterance: rejected.
//! assert!(!matcher.is_match("banana", "rato", 75).matched);
//! ```

pub mod phrase;
pub mod result;

pub use result::{
    AnalysisReport, ArticulationError, PhoneticAnalysisResult, PhoneticForms,
    PhraseAnalysisResult, WordAnalysis,
};

use tracing::trace;

use crate::distance::{phonetic_distance_cached, MemoCache};
use crate::phonetics::{normalize, substitution_rules, SubstitutionRule};

#[cfg(feature = "serialization")]
use serde::{Deserialize, Serialize};

/// Default acceptance threshold for single-word similarity.
pub const DEFAULT_THRESHOLD: u32 = 75;

/// Threshold increase applied when an exercise targets a specific sound.
const FOCUS_THRESHOLD_BOOST: u32 = 10;

/// Per-exercise scoring options.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serialization", serde(default))]
pub struct MatchOptions {
    /// Similarity floor for accepting a single word, 0–100.
    pub threshold: u32,
    /// Require 90% of phrase words to match instead of 70%.
    pub strict_mode: bool,
    /// Sound the exercise focuses on; raises the effective threshold.
    pub focus_on_sound: Option<String>,
}

impl Default for MatchOptions {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            strict_mode: false,
            focus_on_sound: None,
        }
    }
}

impl MatchOptions {
    /// The threshold actually applied, after the focused-sound adjustment.
    pub fn effective_threshold(&self) -> u32 {
        if self.focus_on_sound.is_some() {
            (self.threshold + FOCUS_THRESHOLD_BOOST).min(100)
        } else {
            self.threshold
        }
    }
}

/// Pure, synchronous pronunciation-scoring engine.
///
/// Holds the static rule tables and a distance memo cache; all scoring
/// methods take `&self` and are safe to call from multiple threads.
#[derive(Debug)]
pub struct PhoneticMatcher {
    rules: &'static [SubstitutionRule],
    cache: MemoCache,
}

impl Default for PhoneticMatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl PhoneticMatcher {
    /// Create a matcher backed by the built-in rule tables.
    pub fn new() -> Self {
        Self {
            rules: substitution_rules(),
            cache: MemoCache::new(),
        }
    }

    /// Normalized similarity between two strings, 0–100.
    ///
    /// `round(100 * (maxlen - distance) / maxlen)` over the normalized
    /// phonetic forms; 0 when both normalize to the empty string.
    pub fn similarity(&self, spoken: &str, target: &str) -> u32 {
        self.similarity_normalized(&normalize(spoken), &normalize(target))
    }

    fn similarity_normalized(&self, norm_spoken: &str, norm_target: &str) -> u32 {
        let max_len = norm_spoken
            .chars()
            .count()
            .max(norm_target.chars().count());
        if max_len == 0 {
            return 0;
        }

        let distance = phonetic_distance_cached(norm_spoken, norm_target, &self.cache);
        (((max_len as f64 - distance) / max_len as f64) * 100.0).round() as u32
    }

    /// Score a spoken transcript against a single target word.
    ///
    /// Never fails; see the module documentation for the decision
    /// pipeline.
    pub fn is_match(&self, spoken: &str, target: &str, threshold: u32) -> PhoneticAnalysisResult {
        let spoken_raw = spoken.to_lowercase();
        let target_raw = target.to_lowercase();

        // Degenerate target: nothing to match against.
        if target_raw.trim().is_empty() {
            return PhoneticAnalysisResult {
                matched: false,
                similarity: 0,
                phonetics: PhoneticForms {
                    original: String::new(),
                    spoken: normalize(&spoken_raw),
                },
                exact_match: false,
                possible_errors: Vec::new(),
            };
        }

        // Cheapest, highest-confidence path: the utterance contains the
        // target verbatim.
        if spoken_raw.contains(&target_raw) {
            return PhoneticAnalysisResult {
                matched: true,
                similarity: 100,
                phonetics: PhoneticForms {
                    original: target.to_string(),
                    spoken: spoken.to_string(),
                },
                exact_match: true,
                possible_errors: Vec::new(),
            };
        }

        let norm_spoken = normalize(&spoken_raw);
        let norm_target = normalize(&target_raw);
        let similarity = self.similarity_normalized(&norm_spoken, &norm_target);

        // An articulation rule fires when the utterance contains the
        // mispronunciation the rule predicts for this target.
        let possible_errors: Vec<ArticulationError> = self
            .rules
            .iter()
            .filter_map(|rule| {
                let variant = rule.apply(&target_raw)?;
                spoken_raw.contains(&variant).then(|| ArticulationError {
                    error_type: rule.name,
                    expected: target_raw.clone(),
                    common: variant,
                })
            })
            .collect();

        let matched = similarity >= threshold || !possible_errors.is_empty();
        trace!(
            similarity,
            threshold,
            fired = possible_errors.len(),
            matched,
            "fuzzy verdict"
        );

        PhoneticAnalysisResult {
            matched,
            similarity,
            phonetics: PhoneticForms {
                original: norm_target,
                spoken: norm_spoken,
            },
            exact_match: false,
            possible_errors,
        }
    }

    /// Score a transcript against a word or phrase with per-exercise
    /// options.
    ///
    /// Single-word targets delegate to [`is_match`](Self::is_match);
    /// multi-word targets are scored word by word (see
    /// [`phrase`](self::phrase)).
    pub fn analyze(&self, spoken: &str, target: &str, options: &MatchOptions) -> AnalysisReport {
        let threshold = options.effective_threshold();

        if target.trim().split_whitespace().count() <= 1 {
            AnalysisReport::Word(self.is_match(spoken, target, threshold))
        } else {
            AnalysisReport::Phrase(phrase::analyze_phrase(
                self,
                spoken,
                target,
                threshold,
                options.strict_mode,
            ))
        }
    }
}
