//! # pronuncia
//!
//! Phonetic pronunciation matching for children's speech-therapy
//! exercises, plus sequential audio-playback coordination for the pages
//! that run them.
//!
//! Two independent components:
//!
//! - [`matcher::PhoneticMatcher`] — a pure, synchronous scoring engine
//!   that decides whether a spoken transcript acceptably matches a target
//!   word or phrase, tolerant of the substitution patterns children
//!   produce while acquiring speech (rotacism, sigmatism, cluster
//!   reduction), and explains its decision.
//! - [`playback::AudioPlaybackCoordinator`] — a stateful scheduler that
//!   serializes playback requests from many independent audio sources so
//!   at most one clip plays at a time, with priority and queueing.
//!
//! ## Example
//!
//! ```rust
//! use pronuncia::prelude::*;
//!
//! let matcher = PhoneticMatcher::new();
//!
//! // "lato" for "rato" is rotacism: accepted and explained.
//! let result = matcher.is_match("lato", "rato", DEFAULT_THRESHOLD);
//! assert!(result.matched);
//! assert!(!result.possible_errors.is_empty());
//!
//! // Phrases are scored word by word, ignoring function words.
//! let report = matcher.analyze(
//!     "o lato roeu a roupa",
//!     "rato roeu roupa",
//!     &MatchOptions::default(),
//! );
//! assert!(report.matched());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod distance;
pub mod matcher;
pub mod phonetics;
pub mod playback;

/// Common imports for convenient usage.
pub mod prelude {
    pub use crate::distance::{phonetic_distance, phonetic_distance_cached, MemoCache};
    pub use crate::matcher::{
        AnalysisReport, ArticulationError, MatchOptions, PhoneticAnalysisResult,
        PhoneticMatcher, PhraseAnalysisResult, DEFAULT_THRESHOLD,
    };
    pub use crate::phonetics::normalize;
    pub use crate::playback::{
        AudioPlaybackCoordinator, AudioSource, PlaybackError, PlayerCallbacks, Registration,
        SourceError,
    };
}
