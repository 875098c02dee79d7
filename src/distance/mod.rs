//! Phonetically weighted edit distance.
//!
//! A Levenshtein distance where substituting between two characters of the
//! same [equivalence class](crate::phonetics::equivalence) costs 0.5
//! instead of 1; insertions and deletions always cost 1. The half costs
//! are carried as integers on a doubled scale (one edit = 2 half-units),
//! so the dynamic program stays in exact integer arithmetic and the result
//! is deterministic across platforms; the public functions divide back to
//! whole edits.
//!
//! Two entry points are provided:
//! - [`phonetic_distance`] — direct computation, space-optimized two-row DP
//! - [`phonetic_distance_cached`] — same result, memoized through a
//!   shared, thread-safe [`MemoCache`] keyed on symmetric string pairs

use std::cmp::Ordering;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::phonetics::equivalence::shared_class;

/// Half-units per whole edit operation.
const UNIT: u32 = 2;
/// Cost of a substitution within one equivalence class.
const HALF: u32 = 1;

#[inline]
fn substitution_cost(a: char, b: char) -> u32 {
    if a == b {
        0
    } else if shared_class(a, b).is_some() {
        HALF
    } else {
        UNIT
    }
}

/// A symmetric pair of strings for use as cache keys.
///
/// Ensures that `(a, b)` and `(b, a)` are treated as identical keys,
/// leveraging the symmetry of the distance: `d(a, b) == d(b, a)`.
/// Strings are ordered lexicographically and stored as `Arc<str>` for
/// cheap cloning.
#[derive(Clone, Debug)]
struct SymmetricPair {
    first: Arc<str>,
    second: Arc<str>,
}

impl SymmetricPair {
    #[inline(always)]
    fn new(a: &str, b: &str) -> Self {
        match a.cmp(b) {
            Ordering::Less | Ordering::Equal => Self {
                first: Arc::from(a),
                second: Arc::from(b),
            },
            Ordering::Greater => Self {
                first: Arc::from(b),
                second: Arc::from(a),
            },
        }
    }
}

impl PartialEq for SymmetricPair {
    fn eq(&self, other: &Self) -> bool {
        self.first == other.first && self.second == other.second
    }
}

impl Eq for SymmetricPair {}

impl Hash for SymmetricPair {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.first.hash(state);
        self.second.hash(state);
    }
}

/// Thread-safe memoization cache for [`phonetic_distance_cached`].
///
/// Stores half-unit distances keyed on symmetric string pairs. Reusing a
/// cache across many comparisons of overlapping word pairs (the phrase
/// analyzer's access pattern) skips recomputation entirely.
#[derive(Debug, Default)]
pub struct MemoCache {
    cache: RwLock<FxHashMap<SymmetricPair, u32>>,
}

impl MemoCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    fn get(&self, key: &SymmetricPair) -> Option<u32> {
        self.cache.read().get(key).copied()
    }

    fn insert(&self, key: SymmetricPair, value: u32) {
        self.cache.write().insert(key, value);
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.cache.read().len()
    }
}

/// Compute the weighted distance in half-units (one full edit = 2).
pub(crate) fn half_unit_distance(source: &str, target: &str) -> u32 {
    let source_chars: SmallVec<[char; 32]> = source.chars().collect();
    let target_chars: SmallVec<[char; 32]> = target.chars().collect();

    let m = source_chars.len();
    let n = target_chars.len();

    // Distance to or from the empty string is the other string's length.
    if m == 0 {
        return n as u32 * UNIT;
    }
    if n == 0 {
        return m as u32 * UNIT;
    }

    // Space-optimized two-row DP.
    let mut prev_row: Vec<u32> = (0..=n as u32).map(|j| j * UNIT).collect();
    let mut curr_row = vec![0u32; n + 1];

    for i in 1..=m {
        curr_row[0] = i as u32 * UNIT;

        for j in 1..=n {
            let cost = substitution_cost(source_chars[i - 1], target_chars[j - 1]);

            curr_row[j] = (prev_row[j] + UNIT) // deletion
                .min(curr_row[j - 1] + UNIT) // insertion
                .min(prev_row[j - 1] + cost); // substitution
        }

        std::mem::swap(&mut prev_row, &mut curr_row);
    }

    prev_row[n]
}

/// Compute the phonetically weighted edit distance between two strings.
///
/// # Example
///
/// ```rust
/// use pronuncia::distance::phonetic_distance;
///
/// // `s` and `z` share the sibilant class: half-cost substitution.
/// assert_eq!(phonetic_distance("casa", "caza"), 0.5);
/// assert_eq!(phonetic_distance("casa", "cama"), 1.0);
/// assert_eq!(phonetic_distance("", "rato"), 4.0);
/// ```
pub fn phonetic_distance(source: &str, target: &str) -> f64 {
    half_unit_distance(source, target) as f64 / UNIT as f64
}

/// Memoized variant of [`phonetic_distance`].
///
/// The cache may be shared freely across threads and call sites; hits
/// return without touching the DP at all.
pub fn phonetic_distance_cached(source: &str, target: &str, cache: &MemoCache) -> f64 {
    let key = SymmetricPair::new(source, target);
    if let Some(half_units) = cache.get(&key) {
        return half_units as f64 / UNIT as f64;
    }

    let half_units = half_unit_distance(source, target);
    cache.insert(key, half_units);
    half_units as f64 / UNIT as f64
}
