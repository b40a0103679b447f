//! Rupiah display formatting.

use rust_decimal::{Decimal, RoundingStrategy};

use simrs_contracts::receivable::Money;

/// Format an amount as whole Rupiah with Indonesian digit grouping,
/// e.g. `Rp 1.500.000.000`. Fractions are rounded half away from zero.
pub fn format_idr(amount: Money) -> String {
    let rounded = amount.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    let digits = rounded.abs().trunc().to_string();

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }

    if rounded < Decimal::ZERO {
        format!("-Rp {}", grouped)
    } else {
        format!("Rp {}", grouped)
    }
}

/// Compact axis label in billions (*miliar*), e.g. `Rp21M`.
pub fn format_idr_billions(amount: Money) -> String {
    let billions = (amount / Decimal::from(1_000_000_000))
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    format!("Rp{}M", billions)
}
