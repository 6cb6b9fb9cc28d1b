use anyhow::{Context, Result};
use common::{PredictionRequest, SubmissionError, SubmissionOutcome, classify_response};
use tracing::{debug, error, info, instrument};

use crate::config::ClientSettings;

/// HTTP client for the prediction endpoint. One POST per call, no retries.
#[derive(Debug, Clone)]
pub struct PredictionClient {
    http: reqwest::Client,
    endpoint: String,
}

impl PredictionClient {
    pub fn from_settings(settings: &ClientSettings) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = settings.timeout() {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().context("failed to build reqwest client")?;

        Ok(Self {
            http,
            endpoint: settings.endpoint.clone(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    #[instrument(skip_all, fields(endpoint = %self.endpoint, date = %request.date))]
    pub async fn predict(&self, request: &PredictionRequest) -> SubmissionOutcome {
        debug!("POST prediction request");

        let response = self
            .http
            .post(&self.endpoint)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                let message = if e.is_timeout() {
                    "Request timed out".to_string()
                } else {
                    format!("Request failed: {}", e)
                };
                error!(error = %e, "{}", message);
                SubmissionError::Network(message)
            })?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(|e| {
            error!(status, error = %e, "failed to read response body");
            SubmissionError::Network(format!("Failed to read response body: {}", e))
        })?;

        let outcome = classify_response(status, &body);
        match &outcome {
            Ok(prediction) => info!(
                status,
                predicted_quantity = prediction.predicted_quantity,
                "prediction received"
            ),
            Err(e) => error!(status, kind = e.kind(), "prediction failed: {}", e),
        }
        outcome
    }
}
