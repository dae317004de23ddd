// Classifier trait — the seam between the moderation engines and whatever
// model actually scores the text.
//
// Engines never talk to a concrete backend; they consume labeled signals
// and apply a `ToxicityPolicy` to decide which ones count against the
// content. That keeps the HTTP classifier swappable for test doubles.

use anyhow::Result;
use async_trait::async_trait;

/// One labeled score emitted by a classifier for a piece of text.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassifierSignal {
    pub label: String,
    pub score: f64,
}

/// A text classification backend.
///
/// Implementations must be safe to share across tasks; classification is
/// async because real backends sit behind HTTP.
#[async_trait]
pub trait TextClassifier: Send + Sync {
    /// Classify a single piece of text, returning every signal the backend
    /// produced in the order it produced them.
    async fn classify(&self, text: &str) -> Result<Vec<ClassifierSignal>>;

    /// Human-readable backend name for logs.
    fn name(&self) -> &str;
}

/// No-op classifier used where classification isn't configured.
/// Errors if actually called — ensures nothing silently approves content.
pub struct NoopClassifier;

#[async_trait]
impl TextClassifier for NoopClassifier {
    async fn classify(&self, _text: &str) -> Result<Vec<ClassifierSignal>> {
        anyhow::bail!("NoopClassifier should never be called — set CLASSIFIER_URL to enable moderation")
    }

    fn name(&self) -> &str {
        "noop"
    }
}

/// Policy for turning classifier signals into rejection decisions.
///
/// A signal counts against the content when its label matches the
/// configured toxic label (case-insensitively, since hosted models do not
/// agree on casing) and its score is strictly above the threshold.
#[derive(Debug, Clone)]
pub struct ToxicityPolicy {
    pub toxic_label: String,
    pub threshold: f64,
}

impl Default for ToxicityPolicy {
    fn default() -> Self {
        Self {
            toxic_label: "toxic".to_string(),
            threshold: 0.7,
        }
    }
}

impl ToxicityPolicy {
    /// With the default threshold, override only the label to match.
    pub fn with_label(toxic_label: impl Into<String>) -> Self {
        Self {
            toxic_label: toxic_label.into(),
            ..Self::default()
        }
    }

    /// Whether this signal is a toxicity hit under the policy.
    pub fn flags(&self, signal: &ClassifierSignal) -> bool {
        signal.label.eq_ignore_ascii_case(&self.toxic_label) && signal.score > self.threshold
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signal(label: &str, score: f64) -> ClassifierSignal {
        ClassifierSignal {
            label: label.to_string(),
            score,
        }
    }

    #[test]
    fn threshold_is_exclusive() {
        let policy = ToxicityPolicy::default();
        assert!(policy.flags(&signal("toxic", 0.71)));
        assert!(!policy.flags(&signal("toxic", 0.7)));
        assert!(!policy.flags(&signal("toxic", 0.69)));
    }

    #[test]
    fn label_match_ignores_case_but_not_spelling() {
        let policy = ToxicityPolicy::default();
        assert!(policy.flags(&signal("TOXIC", 0.99)));
        assert!(policy.flags(&signal("Toxic", 0.99)));
        assert!(!policy.flags(&signal("insult", 0.99)));
    }
}
