// HTTP classifier — a hosted text-classification endpoint.
//
// Speaks the common inference-API shape: POST `{"inputs": "<text>"}`,
// receive labeled scores back. Some deployments wrap the signals in one
// extra array per input, some return them flat; both are accepted.

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::classify::traits::{ClassifierSignal, TextClassifier};

/// Classifier backed by a hosted inference endpoint.
pub struct HttpClassifier {
    client: reqwest::Client,
    endpoint: String,
    api_key: Option<String>,
}

#[derive(Serialize)]
struct ClassifyRequest<'a> {
    inputs: &'a str,
}

#[derive(Deserialize)]
struct RawSignal {
    label: String,
    score: f64,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ClassifyResponse {
    Nested(Vec<Vec<RawSignal>>),
    Flat(Vec<RawSignal>),
}

impl ClassifyResponse {
    /// Signals for the single input we sent, in endpoint order.
    fn into_signals(self) -> Vec<RawSignal> {
        match self {
            Self::Nested(mut rows) => {
                if rows.is_empty() {
                    Vec::new()
                } else {
                    rows.swap_remove(0)
                }
            }
            Self::Flat(signals) => signals,
        }
    }
}

impl HttpClassifier {
    pub fn new(endpoint: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
            api_key,
        }
    }
}

#[async_trait]
impl TextClassifier for HttpClassifier {
    async fn classify(&self, text: &str) -> Result<Vec<ClassifierSignal>> {
        let mut request = self
            .client
            .post(&self.endpoint)
            .json(&ClassifyRequest { inputs: text });
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request
            .send()
            .await
            .context("classifier endpoint request failed")?;
        if !response.status().is_success() {
            anyhow::bail!("classifier endpoint returned {}", response.status());
        }

        let body: ClassifyResponse = response
            .json()
            .await
            .context("failed to parse classifier response")?;
        let signals: Vec<ClassifierSignal> = body
            .into_signals()
            .into_iter()
            .map(|raw| ClassifierSignal {
                label: raw.label,
                score: raw.score,
            })
            .collect();
        debug!(signals = signals.len(), "classifier signals received");
        Ok(signals)
    }

    fn name(&self) -> &str {
        "http"
    }
}
