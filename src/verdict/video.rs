// Video engine — sample one frame per second and moderate each sample as
// an image.
//
// Sampling walks frame indices 0, r, 2r, ... where r is the frame rate
// (clamped to at least 1 so an unreadable rate cannot zero the stride).
// Every sampled frame is checked even after a violation is found; reasons
// aggregate in frame-index order so the final verdict names everything
// wrong with the video, not just the first hit.

use tracing::debug;

use crate::classify::{TextClassifier, ToxicityPolicy};
use crate::media::{TextExtractor, VideoDecoder};
use crate::verdict::{image, ModerationFault, Verdict};

/// The frame indices sampled for a video: one per second of footage,
/// starting at frame zero.
pub fn sample_indices(frame_rate: u32, frame_count: u64) -> impl Iterator<Item = u64> {
    let stride = frame_rate.max(1) as u64;
    (0..frame_count).step_by(stride as usize)
}

/// Moderate a video payload against the banned phrases configured for its
/// category.
///
/// Running past the end of the stream ends sampling quietly, keeping the
/// reasons gathered so far. A decode failure also keeps them, with a
/// processing-error reason appended, and rejects the video. Classifier
/// faults raised while moderating a frame propagate unchanged.
pub async fn moderate(
    classifier: &dyn TextClassifier,
    policy: &ToxicityPolicy,
    ocr: &dyn TextExtractor,
    decoder: &dyn VideoDecoder,
    video: &[u8],
    banned_phrases: &[String],
) -> Result<Verdict, ModerationFault> {
    let mut stream = match decoder.open(video).await {
        Ok(stream) => stream,
        Err(error) => {
            return Ok(Verdict::rejected(format!(
                "Error processing video: {error:#}"
            )))
        }
    };

    let mut reasons = Vec::new();
    for index in sample_indices(stream.frame_rate(), stream.frame_count()) {
        debug!(index, "moderating sampled frame");
        let frame = match stream.read_frame(index).await {
            Ok(Some(frame)) => frame,
            // Past the last decodable frame; what we have is the verdict.
            Ok(None) => break,
            Err(error) => {
                reasons.push(format!("Error processing video: {error:#}"));
                return Ok(Verdict::from_reasons(reasons));
            }
        };

        let frame_verdict =
            image::moderate(classifier, policy, ocr, &frame, banned_phrases).await?;
        reasons.extend(frame_verdict.into_reasons());
    }

    Ok(Verdict::from_reasons(reasons))
}
