// Unit tests for the text verdict engine.
//
// The engine is driven with scripted classifiers — no network. These pin
// the decision semantics: threshold boundaries, label matching, reason
// ordering, and the no-deduplication rule.

use anyhow::Result;
use async_trait::async_trait;

use pumice::classify::{ClassifierSignal, TextClassifier, ToxicityPolicy};
use pumice::verdict::{text, ModerationFault, Verdict};

/// Classifier double returning a fixed signal list for any input.
struct StaticClassifier {
    signals: Vec<ClassifierSignal>,
}

impl StaticClassifier {
    fn benign() -> Self {
        Self {
            signals: Vec::new(),
        }
    }

    fn scoring(label: &str, score: f64) -> Self {
        Self {
            signals: vec![ClassifierSignal {
                label: label.to_string(),
                score,
            }],
        }
    }
}

#[async_trait]
impl TextClassifier for StaticClassifier {
    async fn classify(&self, _text: &str) -> Result<Vec<ClassifierSignal>> {
        Ok(self.signals.clone())
    }

    fn name(&self) -> &str {
        "static"
    }
}

/// Classifier double that fails every call, like an unreachable endpoint.
struct FailingClassifier;

#[async_trait]
impl TextClassifier for FailingClassifier {
    async fn classify(&self, _text: &str) -> Result<Vec<ClassifierSignal>> {
        anyhow::bail!("classifier endpoint returned 503 Service Unavailable")
    }

    fn name(&self) -> &str {
        "failing"
    }
}

fn phrases(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

async fn run(classifier: &dyn TextClassifier, input: &str, banned: &[&str]) -> Verdict {
    text::moderate(classifier, &ToxicityPolicy::default(), input, &phrases(banned))
        .await
        .unwrap()
}

// ============================================================
// Guideline matching — case-insensitive substring containment
// ============================================================

#[tokio::test]
async fn banned_phrase_flags_regardless_of_text_case() {
    for input in ["buy spam now", "BUY SPAM NOW", "Buy Spam Now"] {
        let verdict = run(&StaticClassifier::benign(), input, &["spam"]).await;
        assert!(!verdict.is_safe(), "{input:?} should be flagged");
        assert_eq!(verdict.reasons(), ["Violation: spam"]);
    }
}

#[tokio::test]
async fn reason_carries_the_phrase_as_configured() {
    // The guideline's own casing appears in the reason, not the text's.
    let verdict = run(&StaticClassifier::benign(), "buy spam now", &["SpAm"]).await;
    assert_eq!(verdict.reasons(), ["Violation: SpAm"]);
}

#[tokio::test]
async fn every_matching_phrase_is_reported_in_guideline_order() {
    let verdict = run(&StaticClassifier::benign(), "buy it now", &["now", "buy"]).await;
    assert_eq!(verdict.reasons(), ["Violation: now", "Violation: buy"]);
}

#[tokio::test]
async fn duplicate_guidelines_flag_twice() {
    let verdict = run(&StaticClassifier::benign(), "spam spam spam", &["spam", "spam"]).await;
    assert_eq!(verdict.reasons().len(), 2);
}

#[tokio::test]
async fn non_matching_phrase_is_ignored() {
    let verdict = run(&StaticClassifier::benign(), "I love puppies", &["spam"]).await;
    assert!(verdict.is_safe());
    assert!(verdict.reasons().is_empty());
}

#[tokio::test]
async fn unicode_phrases_match_case_insensitively() {
    let verdict = run(&StaticClassifier::benign(), "visit the café today", &["CAFÉ"]).await;
    assert_eq!(verdict.reasons(), ["Violation: CAFÉ"]);
}

#[tokio::test]
async fn empty_phrase_matches_any_text() {
    // Substring containment makes the empty phrase a match-everything rule.
    // Worth knowing when editing guideline files by hand.
    let verdict = run(&StaticClassifier::benign(), "anything at all", &[""]).await;
    assert!(!verdict.is_safe());
}

// ============================================================
// Classifier signals — threshold and label boundaries
// ============================================================

#[tokio::test]
async fn toxic_signal_above_threshold_adds_generic_reason() {
    let verdict = run(&StaticClassifier::scoring("toxic", 0.71), "some text", &[]).await;
    assert_eq!(verdict.reasons(), ["Toxic or offensive content detected"]);
}

#[tokio::test]
async fn score_exactly_at_threshold_is_not_flagged() {
    let verdict = run(&StaticClassifier::scoring("toxic", 0.7), "some text", &[]).await;
    assert!(verdict.is_safe());
}

#[tokio::test]
async fn score_below_threshold_is_not_flagged() {
    let verdict = run(&StaticClassifier::scoring("toxic", 0.69), "some text", &[]).await;
    assert!(verdict.is_safe());
}

#[tokio::test]
async fn toxic_label_matches_case_insensitively() {
    let verdict = run(&StaticClassifier::scoring("TOXIC", 0.95), "some text", &[]).await;
    assert!(!verdict.is_safe());
}

#[tokio::test]
async fn other_labels_never_flag_regardless_of_score() {
    let verdict = run(&StaticClassifier::scoring("insult", 0.99), "some text", &[]).await;
    assert!(verdict.is_safe());
}

#[tokio::test]
async fn repeated_toxic_signals_repeat_the_reason() {
    let classifier = StaticClassifier {
        signals: vec![
            ClassifierSignal {
                label: "toxic".to_string(),
                score: 0.9,
            },
            ClassifierSignal {
                label: "toxic".to_string(),
                score: 0.8,
            },
        ],
    };
    let verdict = run(&classifier, "some text", &[]).await;
    assert_eq!(
        verdict.reasons(),
        [
            "Toxic or offensive content detected",
            "Toxic or offensive content detected"
        ]
    );
}

#[tokio::test]
async fn custom_toxic_label_from_policy_is_honored() {
    let policy = ToxicityPolicy::with_label("hate");
    let classifier = StaticClassifier::scoring("hate", 0.9);
    let verdict = text::moderate(&classifier, &policy, "some text", &[])
        .await
        .unwrap();
    assert!(!verdict.is_safe());

    // The default label no longer matches under the custom policy.
    let classifier = StaticClassifier::scoring("toxic", 0.9);
    let verdict = text::moderate(&classifier, &policy, "some text", &[])
        .await
        .unwrap();
    assert!(verdict.is_safe());
}

// ============================================================
// Ordering and accumulation — no short-circuit, no dedup
// ============================================================

#[tokio::test]
async fn classifier_reasons_precede_guideline_reasons() {
    let classifier = StaticClassifier::scoring("toxic", 0.9);
    let verdict = run(&classifier, "free spam offer", &["spam"]).await;
    assert_eq!(
        verdict.reasons(),
        ["Toxic or offensive content detected", "Violation: spam"]
    );
}

#[tokio::test]
async fn all_checks_run_even_after_a_violation() {
    let classifier = StaticClassifier::scoring("toxic", 0.9);
    let verdict = run(&classifier, "spam and eggs", &["spam", "eggs", "ham"]).await;
    assert_eq!(verdict.reasons().len(), 3);
    assert_eq!(
        verdict.action(),
        "Rejected: Toxic or offensive content detected, Violation: spam, Violation: eggs"
    );
}

#[tokio::test]
async fn clean_input_produces_approved_action() {
    let verdict = run(&StaticClassifier::benign(), "I love puppies", &["spam"]).await;
    assert_eq!(verdict.action(), "Approved");
}

#[tokio::test]
async fn verdicts_are_idempotent_for_unchanged_inputs() {
    let classifier = StaticClassifier::scoring("toxic", 0.9);
    let first = run(&classifier, "free spam offer", &["spam"]).await;
    let second = run(&classifier, "free spam offer", &["spam"]).await;
    assert_eq!(first, second);
}

// ============================================================
// Classifier failure — propagates as a fault, never a verdict
// ============================================================

#[tokio::test]
async fn classifier_failure_propagates_as_fault() {
    let result = text::moderate(
        &FailingClassifier,
        &ToxicityPolicy::default(),
        "some text",
        &phrases(&["spam"]),
    )
    .await;

    let fault = result.unwrap_err();
    assert!(matches!(fault, ModerationFault::Classifier(_)));
    assert!(fault.to_string().contains("classifier failure"));
    assert!(fault.to_string().contains("503"));
}
