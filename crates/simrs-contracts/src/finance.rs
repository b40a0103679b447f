//! Derived financial figures: allowance lines, the aging report, and the
//! statement of financial position.
//!
//! Net amounts and equity are exposed as methods computed from the stored
//! figures, so the accounting identities hold for every value of these types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::receivable::{Money, Receivable};

// ── Allowance ─────────────────────────────────────────────────────────────────

/// The allowance bracket a receivable falls into by age.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AllowanceTier {
    /// Younger than 6 months. Not reserved.
    Current,
    /// 6 to 12 months inclusive. Half reserved.
    Doubtful,
    /// Older than 12 months. Fully reserved.
    Uncollectible,
}

impl AllowanceTier {
    /// The fraction of the gross amount reserved for this tier.
    pub fn rate(self) -> Decimal {
        match self {
            AllowanceTier::Current => Decimal::ZERO,
            AllowanceTier::Doubtful => Decimal::new(5, 1),
            AllowanceTier::Uncollectible => Decimal::ONE,
        }
    }

    /// Percentage label for tables, e.g. "50%".
    pub fn percent_label(self) -> &'static str {
        match self {
            AllowanceTier::Current => "0%",
            AllowanceTier::Doubtful => "50%",
            AllowanceTier::Uncollectible => "100%",
        }
    }
}

/// One receivable with its computed allowance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllowanceLine {
    pub receivable: Receivable,
    pub tier: AllowanceTier,
    pub allowance: Money,
}

impl AllowanceLine {
    pub fn rate(&self) -> Decimal {
        self.tier.rate()
    }

    /// Net book value: gross amount minus allowance.
    pub fn net(&self) -> Money {
        self.receivable.amount - self.allowance
    }
}

/// Allowance lines for a set of receivables plus their totals.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AgingReport {
    pub lines: Vec<AllowanceLine>,
    pub gross_total: Money,
    pub allowance_total: Money,
}

impl AgingReport {
    /// Net receivables: `gross_total - allowance_total`.
    pub fn net_total(&self) -> Money {
        self.gross_total - self.allowance_total
    }
}

// ── Balance sheet inputs ──────────────────────────────────────────────────────

/// Gross fixed assets and their accumulated depreciation.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FixedAssets {
    pub buildings: Money,
    pub equipment: Money,
    pub accumulated_depreciation: Money,
}

impl FixedAssets {
    /// Acquisition cost: buildings plus equipment. `None` on overflow.
    pub fn cost(&self) -> Option<Money> {
        self.buildings.checked_add(self.equipment)
    }

    /// Net book value: cost minus accumulated depreciation. `None` on overflow.
    pub fn book_value(&self) -> Option<Money> {
        self.cost()?.checked_sub(self.accumulated_depreciation)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Liabilities {
    pub short_term: Money,
    pub long_term: Money,
}

impl Liabilities {
    /// `None` on overflow.
    pub fn total(&self) -> Option<Money> {
        self.short_term.checked_add(self.long_term)
    }
}

/// The fixed figures that sit beside receivables on the balance sheet.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BalanceSheetInputs {
    pub cash: Money,
    pub fixed_assets: FixedAssets,
    pub liabilities: Liabilities,
}

// ── Financial position ────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ReceivableTotals {
    pub gross: Money,
    pub allowance: Money,
    pub net: Money,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FixedAssetTotals {
    pub cost: Money,
    pub depreciation: Money,
    pub book_value: Money,
}

/// Statement of financial position (*Laporan Posisi Keuangan*).
///
/// Equity is not stored: `equity()` is always `total_assets - total_liabilities`.
/// A summary built by the aggregator is checked so that this subtraction
/// stays in range.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FinancialSummary {
    pub cash: Money,
    pub receivables: ReceivableTotals,
    pub fixed_assets: FixedAssetTotals,
    pub liabilities: Liabilities,
    pub total_assets: Money,
    pub total_liabilities: Money,
}

impl FinancialSummary {
    pub fn equity(&self) -> Money {
        self.total_assets - self.total_liabilities
    }

    /// The compact payload handed to the advisory service.
    pub fn snapshot(&self) -> FinancialSnapshot {
        FinancialSnapshot {
            receivables: self.receivables.gross,
            allowance: self.receivables.allowance,
            equity: self.equity(),
        }
    }
}

/// Figures sent for AI financial analysis.
///
/// Amounts serialize as JSON numbers so the prompt reads naturally.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FinancialSnapshot {
    #[serde(with = "rust_decimal::serde::float")]
    pub receivables: Money,
    #[serde(with = "rust_decimal::serde::float")]
    pub allowance: Money,
    #[serde(with = "rust_decimal::serde::float")]
    pub equity: Money,
}
