// Text engine — classifier signals plus banned-phrase matching.
//
// Both checks always run to completion: reasons accumulate instead of
// short-circuiting, so a single verdict can carry every violation at once.
// Classifier-derived reasons come first, then guideline matches in the
// order the guidelines are configured.

use crate::classify::{TextClassifier, ToxicityPolicy};
use crate::verdict::{ModerationFault, Verdict};

const TOXIC_REASON: &str = "Toxic or offensive content detected";

/// Moderate a piece of text against the classifier and the banned phrases
/// configured for its category.
///
/// A classifier failure propagates as a fault; this engine has no local
/// fallback for it.
pub async fn moderate(
    classifier: &dyn TextClassifier,
    policy: &ToxicityPolicy,
    text: &str,
    banned_phrases: &[String],
) -> Result<Verdict, ModerationFault> {
    let signals = classifier
        .classify(text)
        .await
        .map_err(ModerationFault::Classifier)?;

    let mut reasons = Vec::new();
    for signal in &signals {
        if policy.flags(signal) {
            reasons.push(TOXIC_REASON.to_string());
        }
    }

    let lowered = text.to_lowercase();
    for phrase in banned_phrases {
        if lowered.contains(&phrase.to_lowercase()) {
            reasons.push(format!("Violation: {phrase}"));
        }
    }

    Ok(Verdict::from_reasons(reasons))
}
