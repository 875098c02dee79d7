//! Phonetic normalization for spoken-word comparison.
//!
//! Before two strings are scored against each other they are reduced to a
//! comparable phonetic form in three steps, applied in order:
//!
//! 1. Lowercase the input.
//! 2. Strip accent diacritics from vowels (`á`/`â`/`ã` → `a`), keeping the
//!    cedilla: `ç` carries the /s/ sound and is consumed by the folding
//!    table below, so it must survive this step.
//! 3. Fold multi-character graphemes to single phonetic symbols using
//!    [`DIGRAPH_FOLDINGS`], in table order.
//!
//! The pipeline is total and deterministic: any input produces a normalized
//! string, and equal inputs always produce equal outputs.
//!
//! # Example
//!
//! ```rust
//! use pronuncia::phonetics::normalize;
//!
//! assert_eq!(normalize("Chave"), "xave");
//! assert_eq!(normalize("carro"), "caho");
//! assert_eq!(normalize("açúcar"), "asucar");
//! ```

pub mod equivalence;
pub mod substitution;

pub use equivalence::{shared_class, EquivalenceClass, EQUIVALENCE_CLASSES};
pub use substitution::{substitution_rules, Anchor, SubstitutionRule};

/// Digraph folding table, applied globally and in order.
///
/// Each entry maps a multi-character grapheme to the single symbol used for
/// scoring. Order matters: `sç` must fold before the bare `ç` rule, and
/// `ch` before any rule that could consume its `c`.
pub const DIGRAPH_FOLDINGS: &[(&str, &str)] = &[
    ("ch", "x"),
    ("lh", "ly"),
    ("nh", "ny"),
    ("rr", "h"),
    ("sc", "s"),
    ("sç", "s"),
    ("xc", "s"),
    ("ç", "s"),
    ("ss", "s"),
];

/// Replace accented vowels with their base letter.
///
/// Only accent marks are dropped (acute, grave, circumflex, tilde,
/// diaeresis). The cedilla is not an accent: `ç` is left intact so the
/// digraph folding table can map it to `s`.
pub fn strip_accents(word: &str) -> String {
    word.chars()
        .map(|c| match c {
            'á' | 'à' | 'â' | 'ã' | 'ä' => 'a',
            'é' | 'è' | 'ê' | 'ë' => 'e',
            'í' | 'ì' | 'î' | 'ï' => 'i',
            'ó' | 'ò' | 'ô' | 'õ' | 'ö' => 'o',
            'ú' | 'ù' | 'û' | 'ü' => 'u',
            other => other,
        })
        .collect()
}

/// Apply the digraph folding table to an already accent-stripped word.
pub fn fold_digraphs(word: &str) -> String {
    let mut folded = word.to_string();
    for (grapheme, symbol) in DIGRAPH_FOLDINGS {
        if folded.contains(grapheme) {
            folded = folded.replace(grapheme, symbol);
        }
    }
    folded
}

/// Reduce a word to its normalized phonetic form.
///
/// Total function: never fails, and degenerate inputs (empty strings,
/// punctuation, non-Latin text) simply pass through whatever survives the
/// pipeline.
pub fn normalize(word: &str) -> String {
    fold_digraphs(&strip_accents(&word.to_lowercase()))
}
