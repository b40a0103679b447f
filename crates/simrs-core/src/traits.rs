//! The advisory capability boundary.
//!
//! The calculator and aggregator never see how advisory text is produced.
//! Anything that can turn an `AdvisoryRequest` into prose (an HTTP client,
//! a canned responder in tests, a cache) implements `AdvisoryService`.

use std::sync::Arc;

use async_trait::async_trait;

use simrs_contracts::{advisory::AdvisoryRequest, error::ServiceUnavailable};

/// A text-generation capability.
///
/// Implementations are **untrusted** in the sense that they may fail or return
/// nothing at all. Callers that need displayable text wrap the service in the
/// degrading `Advisor` from `simrs-advisory`.
#[async_trait]
pub trait AdvisoryService: Send + Sync {
    /// Produce text for `request`.
    ///
    /// Returns `ServiceUnavailable::MissingCredential` without performing any
    /// I/O when the backing credential is absent. An empty string is a valid
    /// (if unhelpful) answer and is not an error.
    async fn generate(&self, request: &AdvisoryRequest) -> Result<String, ServiceUnavailable>;

    /// Return true if a credential is configured.
    ///
    /// Used for status displays only; `generate` performs its own check.
    fn is_configured(&self) -> bool;
}

#[async_trait]
impl<T: AdvisoryService + ?Sized> AdvisoryService for Arc<T> {
    async fn generate(&self, request: &AdvisoryRequest) -> Result<String, ServiceUnavailable> {
        (**self).generate(request).await
    }

    fn is_configured(&self) -> bool {
        (**self).is_configured()
    }
}

#[async_trait]
impl<T: AdvisoryService + ?Sized> AdvisoryService for Box<T> {
    async fn generate(&self, request: &AdvisoryRequest) -> Result<String, ServiceUnavailable> {
        (**self).generate(request).await
    }

    fn is_configured(&self) -> bool {
        (**self).is_configured()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Echo;

    #[async_trait]
    impl AdvisoryService for Echo {
        async fn generate(&self, request: &AdvisoryRequest) -> Result<String, ServiceUnavailable> {
            match request {
                AdvisoryRequest::NoteSummary { note_text } => Ok(note_text.to_uppercase()),
                AdvisoryRequest::FinancialAnalysis { .. } => Err(ServiceUnavailable::Decode {
                    reason: "not supported".to_string(),
                }),
            }
        }

        fn is_configured(&self) -> bool {
            true
        }
    }

    #[tokio::test]
    async fn shared_and_boxed_services_delegate() {
        let request = AdvisoryRequest::NoteSummary {
            note_text: "cough".to_string(),
        };

        let shared: Arc<dyn AdvisoryService> = Arc::new(Echo);
        assert_eq!(shared.generate(&request).await.unwrap(), "COUGH");
        assert!(shared.is_configured());

        let boxed: Box<dyn AdvisoryService> = Box::new(Echo);
        assert_eq!(boxed.generate(&request).await.unwrap(), "COUGH");
    }
}
