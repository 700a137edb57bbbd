//! Closed-form annuity formulas: level payment and outstanding balance

use crate::error::Result;
use crate::loan::LoanTerms;
use serde::{Deserialize, Serialize};

/// Level payment together with the rate and count it was derived from
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PaymentTerms {
    /// Fixed payment per period
    pub payment: f64,

    /// Interest rate per period
    pub period_rate: f64,

    /// Number of scheduled payments
    pub period_count: u32,
}

/// Accumulation factor (1 + r)^periods
///
/// Always evaluated with `powf` on the period count so every formula in the
/// crate rounds identically.
#[inline]
pub(crate) fn accumulation_factor(period_rate: f64, periods: u32) -> f64 {
    (1.0 + period_rate).powf(periods as f64)
}

/// Level payment that amortizes the loan over its original term
///
/// The loan principal equals the PV of the payment stream at the period rate:
/// `payment = P * r(1+r)^n / ((1+r)^n - 1)`. An interest-free loan is repaid
/// straight-line.
pub fn calculate_payment(terms: &LoanTerms) -> PaymentTerms {
    let period_rate = terms.period_rate();
    let period_count = terms.period_count();

    let payment = if period_rate == 0.0 {
        terms.principal / period_count as f64
    } else {
        let growth = accumulation_factor(period_rate, period_count);
        terms.principal * (period_rate * growth) / (growth - 1.0)
    };

    PaymentTerms {
        payment,
        period_rate,
        period_count,
    }
}

/// Level payment for scalar inputs
///
/// Fails with `InvalidFrequency` for an unknown frequency name and with
/// `InvalidTerms` when the loan terms are out of range.
pub fn compute_payment(principal: f64, annual_rate: f64, years: u32, frequency: &str) -> Result<PaymentTerms> {
    let terms = LoanTerms::parse(principal, annual_rate, years, frequency)?;
    Ok(calculate_payment(&terms))
}

/// Outstanding balance just after payment `k`
///
/// This is the PV of the `period_count - k` payments still to come:
/// `payment * ((1+r)^m - 1) / (r (1+r)^m)`. Once no payments remain (or `k`
/// is past the end of the term) the balance is exactly zero.
pub fn outstanding_balance(payment: f64, period_rate: f64, period_count: u32, k: u32) -> f64 {
    let remaining = period_count.saturating_sub(k);

    if remaining == 0 {
        return 0.0;
    }

    if period_rate == 0.0 {
        payment * remaining as f64
    } else {
        let growth = accumulation_factor(period_rate, remaining);
        payment * (growth - 1.0) / (period_rate * growth)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EngineError;
    use approx::assert_relative_eq;

    #[test]
    fn test_standard_mortgage_payment() {
        let terms = compute_payment(300_000.0, 0.06, 30, "monthly").unwrap();

        assert_eq!(terms.period_count, 360);
        assert_relative_eq!(terms.period_rate, 0.005, epsilon = 1e-15);
        assert!((terms.payment - 1798.65).abs() < 0.005, "payment was {}", terms.payment);
    }

    #[test]
    fn test_quarterly_and_annual_payments() {
        let quarterly = compute_payment(100_000.0, 0.08, 10, "quarterly").unwrap();
        assert_eq!(quarterly.period_count, 40);
        assert_relative_eq!(quarterly.period_rate, 0.02, epsilon = 1e-15);
        // 100000 * 0.02 / (1 - 1.02^-40)
        assert!((quarterly.payment - 3655.57).abs() < 0.01, "payment was {}", quarterly.payment);

        let annual = compute_payment(10_000.0, 0.10, 2, "annual").unwrap();
        // 10000 * 0.1 * 1.21 / 0.21
        assert_relative_eq!(annual.payment, 5761.904761904762, max_relative = 1e-12);
    }

    #[test]
    fn test_zero_rate_is_straight_line() {
        let terms = compute_payment(120_000.0, 0.0, 10, "monthly").unwrap();
        assert_eq!(terms.period_rate, 0.0);
        assert_eq!(terms.payment, 120_000.0 / 120.0);
    }

    #[test]
    fn test_invalid_frequency() {
        let err = compute_payment(100_000.0, 0.05, 10, "fortnightly").unwrap_err();
        assert!(matches!(err, EngineError::InvalidFrequency(ref s) if s == "fortnightly"));
    }

    #[test]
    fn test_balance_at_start_equals_principal() {
        let terms = compute_payment(250_000.0, 0.045, 25, "monthly").unwrap();
        let balance = outstanding_balance(terms.payment, terms.period_rate, terms.period_count, 0);
        assert_relative_eq!(balance, 250_000.0, max_relative = 1e-10);
    }

    #[test]
    fn test_balance_at_end_is_exactly_zero() {
        assert_eq!(outstanding_balance(1798.65, 0.005, 360, 360), 0.0);
        assert_eq!(outstanding_balance(1798.65, 0.005, 360, 361), 0.0);
        assert_eq!(outstanding_balance(100.0, 0.0, 12, 12), 0.0);
    }

    #[test]
    fn test_zero_rate_balance() {
        assert_eq!(outstanding_balance(100.0, 0.0, 12, 3), 900.0);
    }

    #[test]
    fn test_balance_matches_recurrence() {
        // Closed form and roll-forward agree mathematically
        let terms = compute_payment(300_000.0, 0.06, 30, "monthly").unwrap();
        let mut rolled = 300_000.0;
        for k in 1..=12 {
            rolled = rolled * (1.0 + terms.period_rate) - terms.payment;
            let closed = outstanding_balance(terms.payment, terms.period_rate, terms.period_count, k);
            assert!((rolled - closed).abs() < 1e-6, "k={} rolled={} closed={}", k, rolled, closed);
        }
    }
}
