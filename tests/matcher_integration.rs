//! End-to-end matcher scenarios: exercise verdicts the way the consuming
//! application produces them.

use pronuncia::distance::phonetic_distance;
use pronuncia::matcher::{AnalysisReport, MatchOptions, PhoneticMatcher, DEFAULT_THRESHOLD};

#[test]
fn identical_word_scores_100_and_is_exact() {
    let matcher = PhoneticMatcher::new();
    for word in ["rato", "chave", "passarinho", "maçã"] {
        let result = matcher.is_match(word, word, DEFAULT_THRESHOLD);
        assert!(result.matched, "{word} should match itself");
        assert!(result.exact_match);
        assert_eq!(result.similarity, 100);
    }
}

#[test]
fn containment_in_longer_utterance_is_exact() {
    let matcher = PhoneticMatcher::new();
    let result = matcher.is_match("olha o rato ali", "rato", DEFAULT_THRESHOLD);
    assert!(result.matched);
    assert!(result.exact_match);
    assert_eq!(result.similarity, 100);
}

#[test]
fn containment_is_case_insensitive() {
    let matcher = PhoneticMatcher::new();
    let result = matcher.is_match("RATO", "rato", DEFAULT_THRESHOLD);
    assert!(result.exact_match);
}

#[test]
fn rotacism_fires_the_substitution_rule() {
    let matcher = PhoneticMatcher::new();
    let result = matcher.is_match("lato", "rato", DEFAULT_THRESHOLD);
    assert!(result.matched);
    assert!(!result.exact_match);
    let rotacism = result
        .possible_errors
        .iter()
        .find(|e| e.error_type == "rotacism")
        .expect("rotacism should be reported");
    assert_eq!(rotacism.expected, "rato");
    assert_eq!(rotacism.common, "lato");
    assert!(rotacism.hint().contains("rato"));
}

#[test]
fn cluster_reduction_is_tolerated() {
    let matcher = PhoneticMatcher::new();
    // "braço" spoken as "baço": the /br/ cluster simplified.
    let result = matcher.is_match("baço", "braço", DEFAULT_THRESHOLD);
    assert!(result.matched);
    assert!(result
        .possible_errors
        .iter()
        .any(|e| e.error_type == "cluster-reduction"));
}

#[test]
fn final_s_deletion_is_tolerated() {
    let matcher = PhoneticMatcher::new();
    let result = matcher.is_match("pato", "patos", DEFAULT_THRESHOLD);
    assert!(result.matched);
    assert!(result
        .possible_errors
        .iter()
        .any(|e| e.error_type == "final-s-deletion"));
}

#[test]
fn phonetic_equivalence_beats_unrelated_substitution() {
    assert!(phonetic_distance("casa", "caza") < phonetic_distance("casa", "xyz"));
}

#[test]
fn sibling_sounds_score_above_threshold() {
    let matcher = PhoneticMatcher::new();
    // s/z substitution is half cost: (4 - 0.5) / 4 = 87.5 → 88.
    assert_eq!(matcher.similarity("caza", "casa"), 88);
}

#[test]
fn unrelated_word_is_rejected_with_no_errors() {
    let matcher = PhoneticMatcher::new();
    let result = matcher.is_match("banana", "rato", DEFAULT_THRESHOLD);
    assert!(!result.matched);
    assert!(result.similarity < DEFAULT_THRESHOLD);
    assert!(result.possible_errors.is_empty());
}

#[test]
fn empty_inputs_degrade_instead_of_failing() {
    let matcher = PhoneticMatcher::new();
    assert_eq!(matcher.similarity("", ""), 0);
    assert!(!matcher.is_match("", "rato", DEFAULT_THRESHOLD).matched);
    assert!(!matcher.is_match("rato", "", DEFAULT_THRESHOLD).matched);
    assert!(!matcher.is_match("", "", 0).matched);
    assert!(!matcher.is_match("   ", "   ", 0).matched);
}

#[test]
fn accents_are_ignored_by_scoring() {
    let matcher = PhoneticMatcher::new();
    assert_eq!(matcher.similarity("árvore", "arvore"), 100);
    assert_eq!(matcher.similarity("maça", "maçã"), 100);
}

#[test]
fn normalized_forms_are_reported() {
    let matcher = PhoneticMatcher::new();
    let result = matcher.is_match("calo", "carro", DEFAULT_THRESHOLD);
    assert_eq!(result.phonetics.original, "caho");
    assert_eq!(result.phonetics.spoken, "calo");
}

#[test]
fn focus_on_sound_tightens_the_verdict() {
    let matcher = PhoneticMatcher::new();
    // g/r substitution is full cost: (4 - 1) / 4 = 75, right at the
    // default threshold.
    let relaxed = matcher.analyze("gato", "rato", &MatchOptions::default());
    assert!(relaxed.matched());

    let focused = MatchOptions {
        focus_on_sound: Some("r".to_string()),
        ..MatchOptions::default()
    };
    let strict = matcher.analyze("gato", "rato", &focused);
    assert!(!strict.matched());
}

#[test]
fn phrase_ignores_function_words() {
    let matcher = PhoneticMatcher::new();
    let report = matcher.analyze(
        "o lato roeu a roupa",
        "rato roeu roupa",
        &MatchOptions::default(),
    );
    let AnalysisReport::Phrase(phrase) = report else {
        panic!("multi-word target should produce a phrase report");
    };
    assert!(phrase.matched);
    assert_eq!(phrase.overall_score, 100);
    assert_eq!(phrase.words.len(), 3);
    assert!(phrase.missed_words.is_empty());
}

#[test]
fn phrase_reports_missed_words() {
    let matcher = PhoneticMatcher::new();
    let report = matcher.analyze("roeu", "rato roeu roupa", &MatchOptions::default());
    let AnalysisReport::Phrase(phrase) = report else {
        panic!("expected phrase report");
    };
    assert!(!phrase.matched);
    assert_eq!(phrase.missed_words, vec!["rato", "roupa"]);
}

#[test]
fn strict_mode_raises_the_phrase_bar() {
    let matcher = PhoneticMatcher::new();
    // Three of four target words land: 75% overall.
    let spoken = "lato roeu roupa banana";
    let target = "rato roeu roupa rei";

    let default_report = matcher.analyze(spoken, target, &MatchOptions::default());
    assert!(default_report.matched());
    assert_eq!(default_report.score(), 75);

    let strict = MatchOptions {
        strict_mode: true,
        ..MatchOptions::default()
    };
    assert!(!matcher.analyze(spoken, target, &strict).matched());
}

#[test]
fn phrase_tolerates_punctuation() {
    let matcher = PhoneticMatcher::new();
    let report = matcher.analyze(
        "Rato, roeu... roupa!",
        "rato roeu roupa",
        &MatchOptions::default(),
    );
    assert!(report.matched());
}

#[test]
fn phrase_with_no_content_words_never_matches() {
    let matcher = PhoneticMatcher::new();
    let report = matcher.analyze("rato roeu", "o a", &MatchOptions::default());
    assert!(!report.matched());
    assert_eq!(report.score(), 0);
}
