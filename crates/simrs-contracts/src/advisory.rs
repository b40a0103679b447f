//! Requests to and results from the AI advisory service.

use serde::{Deserialize, Serialize};

use crate::finance::FinancialSnapshot;

/// Unique identifier for one advisory call, carried in log fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RequestId(pub uuid::Uuid);

impl RequestId {
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4())
    }
}

impl Default for RequestId {
    fn default() -> Self {
        Self::new()
    }
}

/// What the advisory service is being asked to do.
///
/// The payload is passed to the service unmodified.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum AdvisoryRequest {
    /// Turn a free-text clinical note into an After Visit Summary.
    NoteSummary { note_text: String },
    /// Write a short executive summary of the financial position.
    FinancialAnalysis { snapshot: FinancialSnapshot },
}

impl AdvisoryRequest {
    pub fn kind(&self) -> AdvisoryKind {
        match self {
            AdvisoryRequest::NoteSummary { .. } => AdvisoryKind::NoteSummary,
            AdvisoryRequest::FinancialAnalysis { .. } => AdvisoryKind::FinancialAnalysis,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AdvisoryKind {
    NoteSummary,
    FinancialAnalysis,
}

impl AdvisoryKind {
    pub fn name(self) -> &'static str {
        match self {
            AdvisoryKind::NoteSummary => "note-summary",
            AdvisoryKind::FinancialAnalysis => "financial-analysis",
        }
    }
}

/// How an advisory text came about.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AdvisoryOutcome {
    /// The service returned generated text.
    Generated,
    /// The service returned no text; a placeholder was substituted.
    Empty,
    /// No credential is configured; nothing was sent.
    MissingCredential,
    /// The call failed; a placeholder was substituted.
    Failed { reason: String },
}

/// Displayable advisory text. Always present, even when the call failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Advisory {
    pub kind: AdvisoryKind,
    pub text: String,
    pub outcome: AdvisoryOutcome,
}

impl Advisory {
    pub fn is_generated(&self) -> bool {
        self.outcome == AdvisoryOutcome::Generated
    }
}
