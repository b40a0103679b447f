//! Receivables (*piutang*) owed to the hospital.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Currency amount in Rupiah. No minor-unit scaling is applied.
pub type Money = Decimal;

/// Stable identifier of a receivable, e.g. `REC-001`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReceivableId(pub String);

impl fmt::Display for ReceivableId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Collectability label recorded with each receivable.
///
/// Serialized with the Indonesian labels used in BLU reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReceivableStatus {
    #[serde(rename = "Lancar")]
    Current,
    #[serde(rename = "Kurang Lancar")]
    Substandard,
    #[serde(rename = "Macet")]
    Bad,
}

impl ReceivableStatus {
    /// The BLU label, e.g. "Kurang Lancar".
    pub fn label(self) -> &'static str {
        match self {
            ReceivableStatus::Current => "Lancar",
            ReceivableStatus::Substandard => "Kurang Lancar",
            ReceivableStatus::Bad => "Macet",
        }
    }
}

/// A single receivable line.
///
/// `age_months` is signed so that malformed input can be represented and
/// rejected by the aging calculator rather than wrapping silently.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Receivable {
    pub id: ReceivableId,
    pub debtor_name: String,
    pub amount: Money,
    pub age_months: i64,
    pub status: ReceivableStatus,
}

impl Receivable {
    pub fn new(
        id: impl Into<String>,
        debtor_name: impl Into<String>,
        amount: Money,
        age_months: i64,
        status: ReceivableStatus,
    ) -> Self {
        Self {
            id: ReceivableId(id.into()),
            debtor_name: debtor_name.into(),
            amount,
            age_months,
            status,
        }
    }
}
