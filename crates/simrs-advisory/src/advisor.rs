//! Degrading wrapper around an `AdvisoryService`.
//!
//! `Advisor::advise` always returns displayable text. Service failures are
//! logged and replaced with a fixed message chosen by request kind and
//! failure class; they never propagate to the caller.

use tracing::warn;

use simrs_contracts::{
    advisory::{Advisory, AdvisoryKind, AdvisoryOutcome, AdvisoryRequest},
    error::ServiceUnavailable,
    finance::FinancialSummary,
};
use simrs_core::traits::AdvisoryService;

/// Which placeholder to show in place of generated text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fallback {
    MissingCredential,
    CallFailed,
    EmptyResponse,
}

/// The fixed user-visible message for a degraded advisory.
pub fn placeholder(kind: AdvisoryKind, fallback: Fallback) -> &'static str {
    match (kind, fallback) {
        (AdvisoryKind::NoteSummary, Fallback::MissingCredential) => {
            "Error: API Key is missing. Please configure the environment variable."
        }
        (AdvisoryKind::NoteSummary, Fallback::CallFailed) => {
            "An error occurred while communicating with the AI service."
        }
        (AdvisoryKind::NoteSummary, Fallback::EmptyResponse) => "Failed to generate summary.",
        (AdvisoryKind::FinancialAnalysis, Fallback::MissingCredential) => "API Key missing.",
        (AdvisoryKind::FinancialAnalysis, Fallback::CallFailed) => "AI Analysis unavailable.",
        (AdvisoryKind::FinancialAnalysis, Fallback::EmptyResponse) => "No analysis available.",
    }
}

/// Turns any `AdvisoryService` into a source of always-displayable text.
pub struct Advisor<S> {
    service: S,
}

impl<S: AdvisoryService> Advisor<S> {
    pub fn new(service: S) -> Self {
        Self { service }
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    pub fn is_configured(&self) -> bool {
        self.service.is_configured()
    }

    /// Run `request` against the service, substituting a placeholder on failure.
    pub async fn advise(&self, request: &AdvisoryRequest) -> Advisory {
        let kind = request.kind();

        match self.service.generate(request).await {
            Ok(text) if !text.trim().is_empty() => Advisory {
                kind,
                text,
                outcome: AdvisoryOutcome::Generated,
            },
            Ok(_) => {
                warn!(kind = kind.name(), "advisory service returned no text");
                Advisory {
                    kind,
                    text: placeholder(kind, Fallback::EmptyResponse).to_string(),
                    outcome: AdvisoryOutcome::Empty,
                }
            }
            Err(ServiceUnavailable::MissingCredential) => Advisory {
                kind,
                text: placeholder(kind, Fallback::MissingCredential).to_string(),
                outcome: AdvisoryOutcome::MissingCredential,
            },
            Err(e) => {
                warn!(kind = kind.name(), error = %e, "advisory call failed");
                Advisory {
                    kind,
                    text: placeholder(kind, Fallback::CallFailed).to_string(),
                    outcome: AdvisoryOutcome::Failed {
                        reason: e.to_string(),
                    },
                }
            }
        }
    }

    /// Summarize a clinical note into an After Visit Summary.
    pub async fn summarize_note(&self, note_text: &str) -> Advisory {
        self.advise(&AdvisoryRequest::NoteSummary {
            note_text: note_text.to_string(),
        })
        .await
    }

    /// Write an executive summary of the financial position.
    pub async fn analyze_finances(&self, summary: &FinancialSummary) -> Advisory {
        self.advise(&AdvisoryRequest::FinancialAnalysis {
            snapshot: summary.snapshot(),
        })
        .await
    }
}
