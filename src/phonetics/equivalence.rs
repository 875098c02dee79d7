//! Phonetic equivalence classes.
//!
//! Children acquiring speech routinely swap sounds within an articulatory
//! family: voiced/voiceless pairs (`p`/`b`, `t`/`d`, `f`/`v`), sibilants
//! (`s`/`z`), liquids (`l`/`r`), and the close vowel pairs (`e`/`i`,
//! `o`/`u`). Substituting within a class is a much smaller error than
//! substituting across classes, so the distance computation charges half
//! cost for it.
//!
//! Classes are checked pairwise in table order and the first class
//! containing both characters wins; classes are never merged. A character
//! may therefore belong to more than one class (`r` sits with both the
//! rhotics and the liquids).
//!
//! Member characters are drawn from the *normalized* alphabet: strong `rr`
//! folds to `h` before scoring, which is why `h` appears among the rhotics.

/// A set of characters treated as interchangeable at reduced cost.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EquivalenceClass {
    /// Articulatory family label, for diagnostics.
    pub label: &'static str,
    /// Characters belonging to the class, in the normalized alphabet.
    pub members: &'static [char],
}

/// The static equivalence table. Loaded once, never mutated.
pub const EQUIVALENCE_CLASSES: &[EquivalenceClass] = &[
    EquivalenceClass { label: "sibilants", members: &['s', 'z', 'x'] },
    EquivalenceClass { label: "rhotics", members: &['r', 'h'] },
    EquivalenceClass { label: "liquids", members: &['l', 'r'] },
    EquivalenceClass { label: "velar stops", members: &['k', 'c', 'g', 'q'] },
    EquivalenceClass { label: "bilabial stops", members: &['p', 'b'] },
    EquivalenceClass { label: "dental stops", members: &['t', 'd'] },
    EquivalenceClass { label: "labiodentals", members: &['f', 'v'] },
    EquivalenceClass { label: "nasals", members: &['m', 'n'] },
    EquivalenceClass { label: "close front vowels", members: &['e', 'i'] },
    EquivalenceClass { label: "close back vowels", members: &['o', 'u'] },
];

/// Find the first equivalence class containing both characters.
///
/// Returns `None` for identical characters: equality is not an
/// equivalence-class concern, it is a zero-cost match in the distance
/// computation.
#[inline]
pub fn shared_class(a: char, b: char) -> Option<&'static EquivalenceClass> {
    if a == b {
        return None;
    }
    EQUIVALENCE_CLASSES
        .iter()
        .find(|class| class.members.contains(&a) && class.members.contains(&b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sibilants_share_a_class() {
        assert_eq!(shared_class('s', 'z').map(|c| c.label), Some("sibilants"));
        assert_eq!(shared_class('z', 's').map(|c| c.label), Some("sibilants"));
    }

    #[test]
    fn test_liquids_share_a_class() {
        assert_eq!(shared_class('l', 'r').map(|c| c.label), Some("liquids"));
    }

    #[test]
    fn test_first_matching_class_wins() {
        // `r` belongs to both the rhotics and the liquids; the pair (r, h)
        // resolves through the rhotics because that class comes first.
        assert_eq!(shared_class('r', 'h').map(|c| c.label), Some("rhotics"));
    }

    #[test]
    fn test_unrelated_characters_share_nothing() {
        assert_eq!(shared_class('s', 'r'), None);
        assert_eq!(shared_class('a', 'z'), None);
    }

    #[test]
    fn test_identical_characters_are_not_a_class_hit() {
        assert_eq!(shared_class('s', 's'), None);
    }
}
