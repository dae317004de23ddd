// Moderation pipeline — routes a submission to its verdict engine and
// records the outcome.
//
// This is the one place that ties the collaborators together: it snapshots
// the guidelines once per call, hands the payload to the engine for the
// content type, and writes exactly one audit entry per completed call —
// the verdict's action, or an `Error:` action when an upstream fault is
// about to propagate. Callers that never reach an engine (invalid input)
// never reach the log either; that check lives at the boundaries.

use std::sync::Arc;

use tracing::{info, warn};

use crate::audit::ModerationLog;
use crate::classify::{TextClassifier, ToxicityPolicy};
use crate::guidelines::GuidelineStore;
use crate::media::{TextExtractor, VideoDecoder};
use crate::verdict::{self, ContentKind, ModerationFault, Verdict};

/// The assembled moderation service: engines plus their collaborators.
pub struct ModerationPipeline {
    classifier: Arc<dyn TextClassifier>,
    ocr: Arc<dyn TextExtractor>,
    decoder: Arc<dyn VideoDecoder>,
    guidelines: Arc<GuidelineStore>,
    log: Arc<dyn ModerationLog>,
    policy: ToxicityPolicy,
}

impl ModerationPipeline {
    pub fn new(
        classifier: Arc<dyn TextClassifier>,
        ocr: Arc<dyn TextExtractor>,
        decoder: Arc<dyn VideoDecoder>,
        guidelines: Arc<GuidelineStore>,
        log: Arc<dyn ModerationLog>,
        policy: ToxicityPolicy,
    ) -> Self {
        Self {
            classifier,
            ocr,
            decoder,
            guidelines,
            log,
            policy,
        }
    }

    /// Moderate one submission and record the decision.
    ///
    /// Text payloads are decoded lossily, so a submission with broken
    /// encoding is still moderated on its readable parts.
    pub async fn moderate(
        &self,
        kind: ContentKind,
        identifier: &str,
        payload: &[u8],
    ) -> Result<Verdict, ModerationFault> {
        let guidelines = self.guidelines.snapshot().await;
        let banned = guidelines.for_kind(kind);

        let result = match kind {
            ContentKind::Text => {
                let text = String::from_utf8_lossy(payload);
                verdict::text::moderate(self.classifier.as_ref(), &self.policy, &text, banned)
                    .await
            }
            ContentKind::Image => {
                verdict::image::moderate(
                    self.classifier.as_ref(),
                    &self.policy,
                    self.ocr.as_ref(),
                    payload,
                    banned,
                )
                .await
            }
            ContentKind::Video => {
                verdict::video::moderate(
                    self.classifier.as_ref(),
                    &self.policy,
                    self.ocr.as_ref(),
                    self.decoder.as_ref(),
                    payload,
                    banned,
                )
                .await
            }
        };

        match &result {
            Ok(verdict) => {
                info!(
                    kind = %kind,
                    identifier,
                    safe = verdict.is_safe(),
                    reasons = verdict.reasons().len(),
                    "moderation decision"
                );
                self.record(kind, identifier, &verdict.action()).await;
            }
            Err(fault) => {
                warn!(kind = %kind, identifier, error = %fault, "moderation fault");
                self.record(kind, identifier, &format!("Error: {fault}")).await;
            }
        }

        result
    }

    /// Best-effort append; a log write failure never changes the verdict.
    async fn record(&self, kind: ContentKind, identifier: &str, action: &str) {
        if let Err(error) = self.log.record(kind, identifier, action).await {
            warn!(error = %error, "failed to append moderation log entry");
        }
    }
}
