// Image engine — OCR the image, then run the text checks on whatever was
// readable in it.
//
// An image that cannot be read is rejected with a descriptive reason
// rather than failing the call: an unreadable upload is a moderation
// outcome, not a system fault. Classifier failures are different — those
// still propagate.

use crate::classify::{TextClassifier, ToxicityPolicy};
use crate::media::TextExtractor;
use crate::verdict::{text, ModerationFault, Verdict};

/// Moderate an image payload against the banned phrases configured for its
/// category.
pub async fn moderate(
    classifier: &dyn TextClassifier,
    policy: &ToxicityPolicy,
    ocr: &dyn TextExtractor,
    image: &[u8],
    banned_phrases: &[String],
) -> Result<Verdict, ModerationFault> {
    let extracted = match ocr.extract_text(image).await {
        Ok(extracted) => extracted,
        Err(error) => {
            return Ok(Verdict::rejected(format!(
                "Error processing image: {error:#}"
            )))
        }
    };

    text::moderate(classifier, policy, &extracted, banned_phrases).await
}
