//! Overview (dashboard landing) view.

use super::View;

pub const APP_NAME: &str = "SIMRS Regu-AI";
pub const APP_TAGLINE: &str = "BLU Finance & Clinical Support";
pub const WELCOME_TITLE: &str = "Welcome, Administrator.";
pub const WELCOME_SUBTITLE: &str = "SIMRS Regu-AI Dashboard v1.0.0 (Prototype)";

/// A landing card that navigates to another view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverviewCard {
    pub title: &'static str,
    pub description: &'static str,
    pub target: View,
}

pub fn cards() -> [OverviewCard; 2] {
    [
        OverviewCard {
            title: "BLU Accounting",
            description: "Manage Assets, calculate Receivable Allowances (Penyisihan Piutang), \
                          and generate compliant Financial Position reports.",
            target: View::Finance,
        },
        OverviewCard {
            title: "Clinical AI Assistant",
            description: "Process FHIR data and use GenAI to summarize clinical notes into \
                          \"After Visit Summaries\" with ethical guardrails.",
            target: View::Clinical,
        },
    ]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Ready,
    Degraded,
}

/// A line in the system status box.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLine {
    pub label: String,
    pub level: StatusLevel,
}

/// System status: whether the Gemini credential is configured, and the
/// always-mocked search backend.
pub fn system_status(advisory_configured: bool) -> Vec<StatusLine> {
    let gemini = if advisory_configured {
        StatusLine {
            label: "Gemini API: Ready".to_string(),
            level: StatusLevel::Ready,
        }
    } else {
        StatusLine {
            label: "Gemini API: No key".to_string(),
            level: StatusLevel::Degraded,
        }
    };

    vec![
        gemini,
        StatusLine {
            label: "Vertex AI: Mock Mode".to_string(),
            level: StatusLevel::Degraded,
        },
    ]
}
