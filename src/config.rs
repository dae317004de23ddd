use std::env;

use anyhow::Result;

use crate::classify::ToxicityPolicy;

/// Central configuration loaded from environment variables.
///
/// The .env file is loaded automatically at startup via dotenvy.
pub struct Config {
    /// Hosted text-classification endpoint that scores submissions for
    /// toxicity. Required for every moderating operation.
    pub classifier_url: String,
    /// Optional bearer token for the classifier endpoint.
    pub classifier_api_key: Option<String>,
    /// Label the classifier emits for its toxicity signal (default "toxic").
    pub classifier_toxic_label: String,
    /// Path of the persisted guideline record.
    pub guidelines_path: String,
    /// Path of the append-only moderation log.
    pub log_path: String,
    /// OCR binary used for image and video-frame text extraction.
    pub tesseract_path: String,
    pub ffmpeg_path: String,
    pub ffprobe_path: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Everything has a workable default except the classifier endpoint —
    /// commands that moderate must check it via `require_classifier`.
    pub fn load() -> Result<Self> {
        Ok(Self {
            classifier_url: env::var("CLASSIFIER_URL").unwrap_or_default(),
            classifier_api_key: env::var("CLASSIFIER_API_KEY").ok(),
            classifier_toxic_label: env::var("CLASSIFIER_TOXIC_LABEL")
                .unwrap_or_else(|_| "toxic".to_string()),
            guidelines_path: env::var("PUMICE_GUIDELINES_PATH")
                .unwrap_or_else(|_| "./guidelines.json".to_string()),
            log_path: env::var("PUMICE_LOG_PATH")
                .unwrap_or_else(|_| "./moderation_logs.txt".to_string()),
            tesseract_path: env::var("PUMICE_TESSERACT_PATH")
                .unwrap_or_else(|_| "tesseract".to_string()),
            ffmpeg_path: env::var("PUMICE_FFMPEG_PATH").unwrap_or_else(|_| "ffmpeg".to_string()),
            ffprobe_path: env::var("PUMICE_FFPROBE_PATH")
                .unwrap_or_else(|_| "ffprobe".to_string()),
        })
    }

    /// Check that the classifier endpoint is configured.
    /// Call this before any operation that moderates content.
    pub fn require_classifier(&self) -> Result<()> {
        if self.classifier_url.is_empty() {
            anyhow::bail!(
                "CLASSIFIER_URL not set. Add it to your .env file.\n\
                 See .env.example for the required variables."
            );
        }
        Ok(())
    }

    /// The signal-to-decision policy derived from configuration.
    pub fn policy(&self) -> ToxicityPolicy {
        ToxicityPolicy::with_label(self.classifier_toxic_label.as_str())
    }
}
