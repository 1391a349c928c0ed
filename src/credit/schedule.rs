//! Annuity schedule math
//!
//! Pure functions, no database access. The amortization arithmetic runs
//! in f64 and the installment is rounded to 2 decimal places for
//! storage; money at rest stays NUMERIC.

use chrono::{DateTime, Months, Utc};
use rust_decimal::Decimal;
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};

use crate::error::BankError;

/// Compute the fixed monthly annuity payment.
///
/// payment = P * m * (1+m)^n / ((1+m)^n - 1), with m = rate / 1200.
///
/// Degenerate inputs (zero term, zero or pathological rate, non-positive
/// principal) make the formula non-finite or non-positive and are
/// rejected before anything is persisted.
pub fn annuity_payment(
    principal: Decimal,
    annual_rate_percent: Decimal,
    term_months: u32,
) -> Result<Decimal, BankError> {
    let p = principal
        .to_f64()
        .ok_or(BankError::InvalidScheduleParameters)?;
    let rate = annual_rate_percent
        .to_f64()
        .ok_or(BankError::InvalidScheduleParameters)?;

    let monthly = rate / 1200.0;
    let factor = (1.0 + monthly).powi(term_months as i32);
    let payment = p * monthly * factor / (factor - 1.0);

    if !payment.is_finite() || payment <= 0.0 {
        return Err(BankError::InvalidScheduleParameters);
    }

    Decimal::from_f64(payment)
        .map(|d| d.round_dp(2))
        .ok_or(BankError::InvalidScheduleParameters)
}

/// Build the due dates for a schedule: the first installment is due one
/// month after origination, then monthly.
pub fn due_dates(
    start: DateTime<Utc>,
    term_months: u32,
) -> Result<Vec<DateTime<Utc>>, BankError> {
    (1..=term_months)
        .map(|i| {
            start
                .checked_add_months(Months::new(i))
                .ok_or(BankError::InvalidScheduleParameters)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_reference_annuity() {
        // 120000 at 12% over 12 months: 120000 * 0.01 * 1.01^12 / (1.01^12 - 1)
        let payment = annuity_payment(
            Decimal::from(120_000),
            Decimal::from(12),
            12,
        )
        .unwrap();
        assert_eq!(payment, Decimal::new(10_661_85, 2));
    }

    #[test]
    fn test_zero_term_is_rejected() {
        let err = annuity_payment(Decimal::from(1000), Decimal::from(10), 0);
        assert!(matches!(err, Err(BankError::InvalidScheduleParameters)));
    }

    #[test]
    fn test_zero_rate_is_rejected() {
        // 0% makes the formula 0/0
        let err = annuity_payment(Decimal::from(1000), Decimal::ZERO, 12);
        assert!(matches!(err, Err(BankError::InvalidScheduleParameters)));
    }

    #[test]
    fn test_non_positive_principal_is_rejected() {
        let err = annuity_payment(Decimal::ZERO, Decimal::from(10), 12);
        assert!(matches!(err, Err(BankError::InvalidScheduleParameters)));
    }

    #[test]
    fn test_due_dates_are_monthly_starting_one_month_out() {
        let start = Utc.with_ymd_and_hms(2026, 1, 15, 9, 0, 0).unwrap();
        let dates = due_dates(start, 3).unwrap();

        assert_eq!(dates.len(), 3);
        assert_eq!(dates[0], Utc.with_ymd_and_hms(2026, 2, 15, 9, 0, 0).unwrap());
        assert_eq!(dates[1], Utc.with_ymd_and_hms(2026, 3, 15, 9, 0, 0).unwrap());
        assert_eq!(dates[2], Utc.with_ymd_and_hms(2026, 4, 15, 9, 0, 0).unwrap());
    }

    #[test]
    fn test_due_dates_clamp_short_months() {
        let start = Utc.with_ymd_and_hms(2026, 1, 31, 12, 0, 0).unwrap();
        let dates = due_dates(start, 1).unwrap();
        // January 31 + 1 month clamps to February 28
        assert_eq!(dates[0], Utc.with_ymd_and_hms(2026, 2, 28, 12, 0, 0).unwrap());
    }
}
