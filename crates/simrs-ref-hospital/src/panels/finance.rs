//! BLU Accounting view: statement of financial position and the receivables
//! aging / allowance table.

use std::fmt::Write as _;

use simrs_contracts::{
    advisory::AdvisoryRequest,
    error::SimrsResult,
    finance::{AgingReport, FinancialSummary},
    receivable::Money,
};
use simrs_core::{aging::age_receivables, position::financial_position};

use crate::{format::format_idr, mock_data::MockStore};

/// Shown in the AI summary box until the first analysis arrives.
pub const ANALYSIS_PENDING: &str = "Generating AI Analysis of financial position...";

pub const TITLE: &str = "Laporan Posisi Keuangan (BLU Standard)";
pub const AGING_TITLE: &str = "Analisa Umur Piutang & Penyisihan (Allowance)";

/// One of the three headline figures.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryCard {
    pub label: &'static str,
    pub value: Money,
}

/// One bar of the assets / liabilities / equity chart.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartBar {
    pub name: &'static str,
    pub value: Money,
}

/// One row of the aging table.
#[derive(Debug, Clone, PartialEq)]
pub struct AgingRow {
    pub debtor: String,
    pub age_months: i64,
    pub gross: Money,
    pub allowance_percent: &'static str,
    pub net: Money,
}

/// Everything the finance view shows, computed once from the store.
#[derive(Debug, Clone, PartialEq)]
pub struct FinancePanel {
    pub report: AgingReport,
    pub summary: FinancialSummary,
}

impl FinancePanel {
    /// Age the store's receivables and aggregate the financial position.
    ///
    /// Fails with `InvalidAge` / `InvalidAmount` if any receivable is
    /// malformed, and with `AmountOverflow` if a total is out of range.
    pub fn from_store(store: &MockStore) -> SimrsResult<Self> {
        let report = age_receivables(&store.receivables)?;
        let summary = financial_position(&report, &store.balance_sheet)?;
        Ok(Self { report, summary })
    }

    pub fn cards(&self) -> [SummaryCard; 3] {
        [
            SummaryCard {
                label: "Total Aset",
                value: self.summary.total_assets,
            },
            SummaryCard {
                label: "Total Kewajiban",
                value: self.summary.total_liabilities,
            },
            SummaryCard {
                label: "Ekuitas",
                value: self.summary.equity(),
            },
        ]
    }

    pub fn chart(&self) -> [ChartBar; 3] {
        [
            ChartBar {
                name: "Assets",
                value: self.summary.total_assets,
            },
            ChartBar {
                name: "Liabilities",
                value: self.summary.total_liabilities,
            },
            ChartBar {
                name: "Equity",
                value: self.summary.equity(),
            },
        ]
    }

    pub fn aging_rows(&self) -> Vec<AgingRow> {
        self.report
            .lines
            .iter()
            .map(|line| AgingRow {
                debtor: line.receivable.debtor_name.clone(),
                age_months: line.receivable.age_months,
                gross: line.receivable.amount,
                allowance_percent: line.tier.percent_label(),
                net: line.net(),
            })
            .collect()
    }

    /// The request for the AI executive summary of this position.
    pub fn advisory_request(&self) -> AdvisoryRequest {
        AdvisoryRequest::FinancialAnalysis {
            snapshot: self.summary.snapshot(),
        }
    }

    /// Plain-text rendering of the cards and aging table.
    pub fn render_text(&self) -> String {
        let mut out = String::new();

        let _ = writeln!(out, "{}", TITLE);
        let _ = writeln!(out, "{}", "=".repeat(TITLE.len()));
        for card in self.cards() {
            let _ = writeln!(out, "  {:<16} {:>22}", card.label, format_idr(card.value));
        }
        let _ = writeln!(out);
        out.push_str(&self.render_aging_table());
        out
    }

    /// Plain-text aging table with a TOTAL row; the allowance total is
    /// shown in parentheses.
    pub fn render_aging_table(&self) -> String {
        let mut out = String::new();

        let _ = writeln!(out, "{}", AGING_TITLE);
        let _ = writeln!(
            out,
            "  {:<28} {:>12} {:>20} {:>14} {:>20}",
            "Debitur", "Umur (Bulan)", "Nilai Piutang", "% Penyisihan", "Nilai Buku Bersih"
        );
        for row in self.aging_rows() {
            let _ = writeln!(
                out,
                "  {:<28} {:>12} {:>20} {:>14} {:>20}",
                row.debtor,
                row.age_months,
                format_idr(row.gross),
                row.allowance_percent,
                format_idr(row.net)
            );
        }
        let _ = writeln!(
            out,
            "  {:>41} {:>20} {:>14} {:>20}",
            "TOTAL",
            format_idr(self.report.gross_total),
            format!("({})", format_idr(self.report.allowance_total)),
            format_idr(self.report.net_total())
        );
        out
    }

    /// Plain-text rendering of the position statement, line by line.
    pub fn render_position(&self) -> String {
        let s = &self.summary;
        let mut out = String::new();
        let mut line = |label: &str, value: Money| {
            let _ = writeln!(out, "  {:<38} {:>22}", label, format_idr(value));
        };

        line("Kas (Cash)", s.cash);
        line("Piutang Bruto (Gross Receivables)", s.receivables.gross);
        line("Penyisihan Piutang (Allowance)", -s.receivables.allowance);
        line("Piutang Bersih (Net Receivables)", s.receivables.net);
        line("Aset Tetap (Fixed Asset Cost)", s.fixed_assets.cost);
        line("Akumulasi Penyusutan (Depreciation)", -s.fixed_assets.depreciation);
        line("Nilai Buku Aset Tetap (Book Value)", s.fixed_assets.book_value);
        line("Total Aset", s.total_assets);
        line("Kewajiban Jangka Pendek", s.liabilities.short_term);
        line("Kewajiban Jangka Panjang", s.liabilities.long_term);
        line("Total Kewajiban", s.total_liabilities);
        line("Ekuitas", s.equity());
        out
    }
}
