//! Statement of financial position.
//!
//! Combines the net receivables from an `AgingReport` with the fixed
//! balance-sheet figures:
//!
//!   assets      = cash + net receivables + (buildings + equipment − accumulated depreciation)
//!   liabilities = short-term + long-term
//!   equity      = assets − liabilities
//!
//! Equity is never supplied; `FinancialSummary::equity()` derives it.

use tracing::debug;

use simrs_contracts::{
    error::{SimrsError, SimrsResult},
    finance::{
        AgingReport, BalanceSheetInputs, FinancialSummary, FixedAssetTotals, ReceivableTotals,
    },
};

use crate::aging::checked_sum;

fn overflow(what: &'static str) -> SimrsError {
    SimrsError::AmountOverflow { what }
}

/// Build the financial position from aged receivables and fixed figures.
///
/// Pure: the same inputs always produce the same summary. Returns
/// `SimrsError::AmountOverflow` if any total, equity included, leaves the
/// range of `Money`.
pub fn financial_position(
    report: &AgingReport,
    inputs: &BalanceSheetInputs,
) -> SimrsResult<FinancialSummary> {
    let receivables = ReceivableTotals {
        gross: report.gross_total,
        allowance: report.allowance_total,
        net: report.net_total(),
    };

    let fixed_assets = FixedAssetTotals {
        cost: inputs
            .fixed_assets
            .cost()
            .ok_or_else(|| overflow("fixed asset cost"))?,
        depreciation: inputs.fixed_assets.accumulated_depreciation,
        book_value: inputs
            .fixed_assets
            .book_value()
            .ok_or_else(|| overflow("fixed asset book value"))?,
    };

    let total_assets = checked_sum(
        [inputs.cash, receivables.net, fixed_assets.book_value],
        "total assets",
    )?;
    let total_liabilities = inputs
        .liabilities
        .total()
        .ok_or_else(|| overflow("total liabilities"))?;
    total_assets
        .checked_sub(total_liabilities)
        .ok_or_else(|| overflow("equity"))?;

    let summary = FinancialSummary {
        cash: inputs.cash,
        receivables,
        fixed_assets,
        liabilities: inputs.liabilities,
        total_assets,
        total_liabilities,
    };

    debug!(
        assets = %summary.total_assets,
        liabilities = %summary.total_liabilities,
        equity = %summary.equity(),
        "financial position computed"
    );

    Ok(summary)
}
