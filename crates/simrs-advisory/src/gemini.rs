//! `AdvisoryService` backed by the Gemini `generateContent` REST endpoint.
//!
//! One request, one response. No retry, streaming, or caching.

use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, info, warn};

use simrs_contracts::{
    advisory::{AdvisoryRequest, RequestId},
    error::ServiceUnavailable,
};
use simrs_core::traits::AdvisoryService;

use crate::{
    config::AdvisoryConfig,
    prompt::{build_request, GenerateContentResponse},
};

const API_KEY_HEADER: &str = "x-goog-api-key";

/// HTTP client for Gemini text generation.
pub struct GeminiClient {
    client: reqwest::Client,
    config: AdvisoryConfig,
}

impl GeminiClient {
    pub fn new(config: AdvisoryConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.settings.timeout_secs))
            .build()
            .unwrap_or_default();

        Self { client, config }
    }

    pub fn config(&self) -> &AdvisoryConfig {
        &self.config
    }

    /// Full URL of the generateContent method for the configured model.
    fn url(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.settings.endpoint.trim_end_matches('/'),
            self.config.settings.model
        )
    }
}

#[async_trait]
impl AdvisoryService for GeminiClient {
    async fn generate(&self, request: &AdvisoryRequest) -> Result<String, ServiceUnavailable> {
        let request_id = RequestId::new();
        let kind = request.kind().name();

        let Some(api_key) = self.config.api_key() else {
            warn!(
                request_id = %request_id.0,
                kind,
                "advisory call skipped: no API credential configured"
            );
            return Err(ServiceUnavailable::MissingCredential);
        };

        let body = build_request(request)?;

        info!(
            request_id = %request_id.0,
            kind,
            model = %self.config.settings.model,
            "sending advisory request"
        );

        let response = self
            .client
            .post(self.url())
            .header(API_KEY_HEADER, api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| ServiceUnavailable::Request {
                reason: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(
                request_id = %request_id.0,
                status = status.as_u16(),
                "advisory service returned an error status"
            );
            return Err(ServiceUnavailable::Status {
                status: status.as_u16(),
                body,
            });
        }

        let decoded: GenerateContentResponse =
            response.json().await.map_err(|e| ServiceUnavailable::Decode {
                reason: e.to_string(),
            })?;
        let text = decoded.text();

        debug!(
            request_id = %request_id.0,
            kind,
            chars = text.len(),
            "advisory response received"
        );

        Ok(text)
    }

    fn is_configured(&self) -> bool {
        self.config.has_credential()
    }
}
