//! Articulation-error substitution rules.
//!
//! Each rule pairs an anchored pattern with the replacement a child
//! commonly produces: rotacism turns an initial `r` into `l`, coda
//! consonants get dropped, clusters simplify (`br` → `b`). Applying a rule
//! to a *target* word yields the variant a child with that articulation
//! pattern would be expected to say; when the spoken transcript contains
//! that variant, the matcher accepts the utterance and reports the rule as
//! a possible articulation error.
//!
//! Anchors are a deliberately small abstraction — "starts with", "ends
//! with", "first occurrence anywhere" — which covers every pattern in the
//! table without a regular-expression engine.

/// Where in the word a rule's pattern must sit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    /// Pattern must match at the start of the word.
    Prefix,
    /// Pattern must match at the end of the word.
    Suffix,
    /// Pattern matches its first occurrence anywhere in the word.
    Anywhere,
}

/// A single articulation-error pattern.
///
/// Rules are static data: the table in [`substitution_rules`] is built
/// once and never mutates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubstitutionRule {
    /// Stable identifier for the error pattern, e.g. `"rotacism"`.
    pub name: &'static str,
    /// Anchoring of `pattern` within the target word.
    pub anchor: Anchor,
    /// The sound sequence the child struggles with.
    pub pattern: &'static str,
    /// What that sequence commonly comes out as (may be empty: deletion).
    pub replacement: &'static str,
}

impl SubstitutionRule {
    /// Apply this rule to a target word.
    ///
    /// Returns the expected mispronunciation, or `None` when the anchored
    /// pattern does not occur in the target (the rule is irrelevant to
    /// this word).
    pub fn apply(&self, target: &str) -> Option<String> {
        match self.anchor {
            Anchor::Prefix => target
                .strip_prefix(self.pattern)
                .map(|rest| format!("{}{}", self.replacement, rest)),
            Anchor::Suffix => target
                .strip_suffix(self.pattern)
                .map(|head| format!("{}{}", head, self.replacement)),
            Anchor::Anywhere => target.find(self.pattern).map(|at| {
                let mut variant = String::with_capacity(target.len() + self.replacement.len());
                variant.push_str(&target[..at]);
                variant.push_str(self.replacement);
                variant.push_str(&target[at + self.pattern.len()..]);
                variant
            }),
        }
    }
}

const RULES: &[SubstitutionRule] = &[
    // Liquid substitutions
    SubstitutionRule { name: "rotacism", anchor: Anchor::Prefix, pattern: "r", replacement: "l" },
    SubstitutionRule { name: "lateralization", anchor: Anchor::Prefix, pattern: "l", replacement: "r" },
    // Coda deletion
    SubstitutionRule { name: "final-s-deletion", anchor: Anchor::Suffix, pattern: "s", replacement: "" },
    SubstitutionRule { name: "final-r-deletion", anchor: Anchor::Suffix, pattern: "r", replacement: "" },
    // Consonant-cluster reduction
    SubstitutionRule { name: "cluster-reduction", anchor: Anchor::Anywhere, pattern: "br", replacement: "b" },
    SubstitutionRule { name: "cluster-reduction", anchor: Anchor::Anywhere, pattern: "cr", replacement: "c" },
    SubstitutionRule { name: "cluster-reduction", anchor: Anchor::Anywhere, pattern: "dr", replacement: "d" },
    SubstitutionRule { name: "cluster-reduction", anchor: Anchor::Anywhere, pattern: "fr", replacement: "f" },
    SubstitutionRule { name: "cluster-reduction", anchor: Anchor::Anywhere, pattern: "gr", replacement: "g" },
    SubstitutionRule { name: "cluster-reduction", anchor: Anchor::Anywhere, pattern: "pr", replacement: "p" },
    SubstitutionRule { name: "cluster-reduction", anchor: Anchor::Anywhere, pattern: "tr", replacement: "t" },
    SubstitutionRule { name: "cluster-reduction", anchor: Anchor::Anywhere, pattern: "vr", replacement: "v" },
    SubstitutionRule { name: "cluster-reduction", anchor: Anchor::Anywhere, pattern: "bl", replacement: "b" },
    SubstitutionRule { name: "cluster-reduction", anchor: Anchor::Anywhere, pattern: "cl", replacement: "c" },
    SubstitutionRule { name: "cluster-reduction", anchor: Anchor::Anywhere, pattern: "fl", replacement: "f" },
    SubstitutionRule { name: "cluster-reduction", anchor: Anchor::Anywhere, pattern: "gl", replacement: "g" },
    SubstitutionRule { name: "cluster-reduction", anchor: Anchor::Anywhere, pattern: "pl", replacement: "p" },
    // Palatal simplification
    SubstitutionRule { name: "palatal-simplification", anchor: Anchor::Anywhere, pattern: "lh", replacement: "l" },
    SubstitutionRule { name: "palatal-simplification", anchor: Anchor::Anywhere, pattern: "nh", replacement: "n" },
    // Fricative errors
    SubstitutionRule { name: "deaffrication", anchor: Anchor::Anywhere, pattern: "ch", replacement: "t" },
    SubstitutionRule { name: "sigmatism", anchor: Anchor::Prefix, pattern: "s", replacement: "t" },
];

/// The static, ordered articulation-error rule table.
pub fn substitution_rules() -> &'static [SubstitutionRule] {
    RULES
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(name: &str, pattern: &str) -> SubstitutionRule {
        *substitution_rules()
            .iter()
            .find(|r| r.name == name && r.pattern == pattern)
            .expect("rule present")
    }

    #[test]
    fn test_rotacism_applies_at_word_start_only() {
        let rotacism = rule("rotacism", "r");
        assert_eq!(rotacism.apply("rato").as_deref(), Some("lato"));
        assert_eq!(rotacism.apply("caro"), None);
    }

    #[test]
    fn test_final_s_deletion() {
        let rule = rule("final-s-deletion", "s");
        assert_eq!(rule.apply("patos").as_deref(), Some("pato"));
        assert_eq!(rule.apply("sapo"), None);
    }

    #[test]
    fn test_cluster_reduction_first_occurrence() {
        let rule = rule("cluster-reduction", "br");
        assert_eq!(rule.apply("braço").as_deref(), Some("baço"));
        assert_eq!(rule.apply("abraço").as_deref(), Some("abaço"));
    }

    #[test]
    fn test_irrelevant_rule_does_not_apply() {
        let rule = rule("deaffrication", "ch");
        assert_eq!(rule.apply("rato"), None);
    }

    #[test]
    fn test_table_is_nonempty_and_named() {
        assert!(!substitution_rules().is_empty());
        assert!(substitution_rules().iter().all(|r| !r.name.is_empty()));
        assert!(substitution_rules().iter().all(|r| !r.pattern.is_empty()));
    }
}
