//! Receivables aging and allowance (*penyisihan piutang*) calculation.
//!
//! The allowance rate is a three-tier step function on age in months:
//!
//! | age (months)   | tier            | rate |
//! |----------------|-----------------|------|
//! | `age < 6`      | `Current`       | 0.00 |
//! | `6 ≤ age ≤ 12` | `Doubtful`      | 0.50 |
//! | `age > 12`     | `Uncollectible` | 1.00 |
//!
//! The upper comparison is strict: a receivable exactly 12 months old is
//! reserved at 50%, not 100%.
//!
//! All arithmetic is `Decimal`; nothing is rounded. Totals that leave the
//! range of `Decimal` fail with `SimrsError::AmountOverflow`.

use rust_decimal::Decimal;
use tracing::debug;

use simrs_contracts::{
    error::{SimrsError, SimrsResult},
    finance::{AgingReport, AllowanceLine, AllowanceTier},
    receivable::{Money, Receivable},
};

/// Classify an age in months into its allowance tier.
///
/// Returns `SimrsError::InvalidAge` for negative ages.
pub fn allowance_tier(age_months: i64) -> SimrsResult<AllowanceTier> {
    if age_months < 0 {
        return Err(SimrsError::InvalidAge {
            value: age_months.to_string(),
            reason: "age must not be negative".to_string(),
        });
    }

    let tier = if age_months > 12 {
        AllowanceTier::Uncollectible
    } else if age_months >= 6 {
        AllowanceTier::Doubtful
    } else {
        AllowanceTier::Current
    };
    Ok(tier)
}

/// The allowance rate for a receivable of the given age.
pub fn allowance_rate(age_months: i64) -> SimrsResult<Decimal> {
    allowance_tier(age_months).map(AllowanceTier::rate)
}

/// Convert an untyped age (e.g. parsed from user input) into whole months.
///
/// Rejects NaN, infinities, negative values, and fractional months.
pub fn age_from_f64(value: f64) -> SimrsResult<i64> {
    let invalid = |reason: &str| SimrsError::InvalidAge {
        value: value.to_string(),
        reason: reason.to_string(),
    };

    if !value.is_finite() {
        return Err(invalid("age must be a finite number"));
    }
    if value < 0.0 {
        return Err(invalid("age must not be negative"));
    }
    if value.fract() != 0.0 {
        return Err(invalid("age must be a whole number of months"));
    }
    if value >= i64::MAX as f64 {
        return Err(invalid("age is out of range"));
    }
    Ok(value as i64)
}

/// Compute the allowance for a single receivable.
pub fn allowance_line(receivable: &Receivable) -> SimrsResult<AllowanceLine> {
    if receivable.amount < Money::ZERO {
        return Err(SimrsError::InvalidAmount {
            receivable_id: receivable.id.0.clone(),
            amount: receivable.amount.to_string(),
        });
    }

    let tier = allowance_tier(receivable.age_months)?;
    let allowance = receivable
        .amount
        .checked_mul(tier.rate())
        .ok_or(SimrsError::AmountOverflow { what: "allowance" })?;

    Ok(AllowanceLine {
        receivable: receivable.clone(),
        tier,
        allowance,
    })
}

/// Sum `values`, failing with `AmountOverflow` instead of panicking.
pub(crate) fn checked_sum(
    values: impl IntoIterator<Item = Money>,
    what: &'static str,
) -> SimrsResult<Money> {
    values.into_iter().try_fold(Money::ZERO, |acc, value| {
        acc.checked_add(value)
            .ok_or(SimrsError::AmountOverflow { what })
    })
}

/// Age every receivable and total the results.
///
/// Validation runs over the whole set before anything is summed: a single
/// malformed receivable fails the report. An empty slice produces a report
/// whose totals are all zero.
pub fn age_receivables(receivables: &[Receivable]) -> SimrsResult<AgingReport> {
    let lines = receivables
        .iter()
        .map(allowance_line)
        .collect::<SimrsResult<Vec<_>>>()?;

    let gross_total = checked_sum(lines.iter().map(|l| l.receivable.amount), "gross receivables")?;
    let allowance_total = checked_sum(lines.iter().map(|l| l.allowance), "allowance total")?;

    let report = AgingReport {
        lines,
        gross_total,
        allowance_total,
    };

    debug!(
        receivables = report.lines.len(),
        gross = %report.gross_total,
        allowance = %report.allowance_total,
        net = %report.net_total(),
        "receivables aged"
    );

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use simrs_contracts::receivable::ReceivableStatus;

    fn rp(v: i64) -> Money {
        Money::from(v)
    }

    fn receivable(id: &str, amount: Money, age_months: i64) -> Receivable {
        Receivable::new(id, format!("Debtor {}", id), amount, age_months, ReceivableStatus::Current)
    }

    // ── Rate tiers ───────────────────────────────────────────────────────────

    #[test]
    fn ages_over_twelve_are_fully_reserved() {
        for age in 13..=120 {
            assert_eq!(allowance_rate(age).unwrap(), Decimal::ONE, "age {}", age);
        }
    }

    #[test]
    fn ages_six_through_twelve_are_half_reserved() {
        for age in 6..=12 {
            assert_eq!(allowance_rate(age).unwrap(), Decimal::new(5, 1), "age {}", age);
        }
    }

    #[test]
    fn ages_under_six_are_not_reserved() {
        for age in 0..6 {
            assert_eq!(allowance_rate(age).unwrap(), Decimal::ZERO, "age {}", age);
        }
    }

    #[test]
    fn boundaries() {
        assert_eq!(allowance_tier(0).unwrap(), AllowanceTier::Current);
        assert_eq!(allowance_tier(5).unwrap(), AllowanceTier::Current);
        assert_eq!(allowance_tier(6).unwrap(), AllowanceTier::Doubtful);
        // Strict upper comparison: 12 months is still 50%.
        assert_eq!(allowance_tier(12).unwrap(), AllowanceTier::Doubtful);
        assert_eq!(allowance_tier(13).unwrap(), AllowanceTier::Uncollectible);
    }

    #[test]
    fn negative_age_is_rejected() {
        let err = allowance_rate(-1).unwrap_err();
        assert!(matches!(err, SimrsError::InvalidAge { .. }));
    }

    // ── Untyped ages ─────────────────────────────────────────────────────────

    #[test]
    fn age_from_f64_accepts_whole_months() {
        assert_eq!(age_from_f64(0.0).unwrap(), 0);
        assert_eq!(age_from_f64(7.0).unwrap(), 7);
    }

    #[test]
    fn age_from_f64_rejects_malformed_values() {
        for value in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY, -1.0, 6.5, 1e300] {
            let err = age_from_f64(value).unwrap_err();
            assert!(
                matches!(err, SimrsError::InvalidAge { .. }),
                "value {} should be rejected",
                value
            );
        }
    }

    // ── Single lines ─────────────────────────────────────────────────────────

    #[test]
    fn seven_month_receivable_is_half_reserved() {
        let line = allowance_line(&receivable("REC-002", rp(150_000_000), 7)).unwrap();
        assert_eq!(line.allowance, rp(75_000_000));
        assert_eq!(line.net(), rp(75_000_000));
        assert_eq!(line.rate(), Decimal::new(5, 1));
    }

    #[test]
    fn fourteen_month_receivable_nets_to_zero() {
        let line = allowance_line(&receivable("REC-003", rp(25_000_000), 14)).unwrap();
        assert_eq!(line.allowance, rp(25_000_000));
        assert_eq!(line.net(), Money::ZERO);
    }

    #[test]
    fn two_month_receivable_keeps_full_value() {
        let line = allowance_line(&receivable("REC-001", rp(500_000_000), 2)).unwrap();
        assert_eq!(line.allowance, Money::ZERO);
        assert_eq!(line.net(), rp(500_000_000));
    }

    #[test]
    fn negative_amount_is_rejected() {
        let err = allowance_line(&receivable("REC-X", rp(-5), 1)).unwrap_err();
        match err {
            SimrsError::InvalidAmount { receivable_id, .. } => assert_eq!(receivable_id, "REC-X"),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    // ── Reports ──────────────────────────────────────────────────────────────

    #[test]
    fn empty_set_totals_to_zero() {
        let report = age_receivables(&[]).unwrap();
        assert_eq!(report.gross_total, Money::ZERO);
        assert_eq!(report.allowance_total, Money::ZERO);
        assert_eq!(report.net_total(), Money::ZERO);
    }

    #[test]
    fn totals_cross_check_exactly_with_fractional_amounts() {
        // Decimal fractions that would drift under binary floating point.
        let receivables: Vec<Receivable> = (0..40)
            .map(|i| {
                let amount = Decimal::new(10 + i * 7, 1) + Decimal::new(1, 2);
                receivable(&format!("R-{}", i), amount, i % 20)
            })
            .collect();

        let report = age_receivables(&receivables).unwrap();
        let net_sum: Money = report.lines.iter().map(|l| l.net()).sum();

        assert_eq!(report.gross_total - report.allowance_total, report.net_total());
        assert_eq!(net_sum, report.net_total());
    }

    #[test]
    fn one_bad_age_fails_the_whole_report() {
        let receivables = vec![
            receivable("A", rp(100), 3),
            receivable("B", rp(100), -2),
            receivable("C", rp(100), 15),
        ];
        assert!(matches!(
            age_receivables(&receivables),
            Err(SimrsError::InvalidAge { .. })
        ));
    }

    #[test]
    fn gross_total_past_decimal_max_is_an_error() {
        let receivables = vec![
            receivable("A", Decimal::MAX, 2),
            receivable("B", Decimal::MAX, 2),
        ];
        match age_receivables(&receivables) {
            Err(SimrsError::AmountOverflow { what }) => assert_eq!(what, "gross receivables"),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn single_max_receivable_still_ages() {
        let report = age_receivables(&[receivable("A", Decimal::MAX, 20)]).unwrap();
        assert_eq!(report.allowance_total, Decimal::MAX);
        assert_eq!(report.net_total(), Money::ZERO);
    }

    #[test]
    fn report_preserves_input_order() {
        let receivables = vec![
            receivable("A", rp(100), 14),
            receivable("B", rp(200), 7),
            receivable("C", rp(300), 1),
        ];
        let report = age_receivables(&receivables).unwrap();
        let ids: Vec<&str> = report.lines.iter().map(|l| l.receivable.id.0.as_str()).collect();
        assert_eq!(ids, ["A", "B", "C"]);
        assert_eq!(report.gross_total, rp(600));
        assert_eq!(report.allowance_total, rp(200));
        assert_eq!(report.net_total(), rp(400));
    }
}
