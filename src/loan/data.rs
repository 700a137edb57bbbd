//! Loan terms and payment frequency

use crate::error::{EngineError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How often payments are made
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentFrequency {
    /// 12 payments per year
    Monthly,
    /// 4 payments per year
    Quarterly,
    /// 1 payment per year
    Annual,
}

impl PaymentFrequency {
    pub const ALL: [PaymentFrequency; 3] = [
        PaymentFrequency::Monthly,
        PaymentFrequency::Quarterly,
        PaymentFrequency::Annual,
    ];

    pub fn periods_per_year(&self) -> u32 {
        match self {
            PaymentFrequency::Monthly => 12,
            PaymentFrequency::Quarterly => 4,
            PaymentFrequency::Annual => 1,
        }
    }

    /// Lowercase name, as accepted by [`FromStr`]
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentFrequency::Monthly => "monthly",
            PaymentFrequency::Quarterly => "quarterly",
            PaymentFrequency::Annual => "annual",
        }
    }
}

impl FromStr for PaymentFrequency {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "monthly" => Ok(PaymentFrequency::Monthly),
            "quarterly" => Ok(PaymentFrequency::Quarterly),
            "annual" => Ok(PaymentFrequency::Annual),
            _ => Err(EngineError::InvalidFrequency(s.to_string())),
        }
    }
}

impl fmt::Display for PaymentFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            PaymentFrequency::Monthly => "Monthly",
            PaymentFrequency::Quarterly => "Quarterly",
            PaymentFrequency::Annual => "Annual",
        };
        f.write_str(label)
    }
}

/// Terms of a fixed-rate, fixed-frequency amortizing loan
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LoanTerms {
    /// Amount borrowed
    pub principal: f64,

    /// Nominal annual rate as a decimal (0.06 = 6%)
    pub annual_rate: f64,

    /// Original term in years
    pub years: u32,

    pub frequency: PaymentFrequency,
}

impl LoanTerms {
    /// Create validated loan terms
    ///
    /// Fails with [`EngineError::InvalidTerms`] when the principal is not a
    /// positive finite amount, the rate is negative or non-finite, or the
    /// term is zero years or too long to count its payments in a `u32`.
    pub fn new(principal: f64, annual_rate: f64, years: u32, frequency: PaymentFrequency) -> Result<Self> {
        validate_principal(principal)?;
        validate_rate(annual_rate)?;
        if years == 0 {
            return Err(EngineError::terms("years", "must be at least 1"));
        }
        if years.checked_mul(frequency.periods_per_year()).is_none() {
            return Err(EngineError::terms(
                "years",
                format!("{} years of {} payments overflows the payment count", years, frequency.as_str()),
            ));
        }

        Ok(Self {
            principal,
            annual_rate,
            years,
            frequency,
        })
    }

    /// Same as [`LoanTerms::new`], parsing the frequency from its name
    pub fn parse(principal: f64, annual_rate: f64, years: u32, frequency: &str) -> Result<Self> {
        Self::new(principal, annual_rate, years, frequency.parse()?)
    }

    pub fn periods_per_year(&self) -> u32 {
        self.frequency.periods_per_year()
    }

    /// Interest rate applied each payment period
    pub fn period_rate(&self) -> f64 {
        self.annual_rate / self.periods_per_year() as f64
    }

    /// Number of scheduled payments under the original terms
    ///
    /// Saturates for hand-built terms that bypass [`LoanTerms::new`].
    pub fn period_count(&self) -> u32 {
        self.years.saturating_mul(self.periods_per_year())
    }

    /// Payment that only covers the first period's interest
    pub fn interest_only_payment(&self) -> f64 {
        self.principal * self.period_rate()
    }
}

pub(crate) fn validate_principal(principal: f64) -> Result<()> {
    if !principal.is_finite() || principal <= 0.0 {
        return Err(EngineError::terms("principal", format!("must be positive, got {}", principal)));
    }
    Ok(())
}

pub(crate) fn validate_rate(annual_rate: f64) -> Result<()> {
    if !annual_rate.is_finite() || annual_rate < 0.0 {
        return Err(EngineError::terms("annual_rate", format!("must be non-negative, got {}", annual_rate)));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frequency_parsing() {
        assert_eq!("monthly".parse::<PaymentFrequency>().unwrap(), PaymentFrequency::Monthly);
        assert_eq!("Quarterly".parse::<PaymentFrequency>().unwrap(), PaymentFrequency::Quarterly);
        assert_eq!(" ANNUAL ".parse::<PaymentFrequency>().unwrap(), PaymentFrequency::Annual);

        match "weekly".parse::<PaymentFrequency>() {
            Err(EngineError::InvalidFrequency(s)) => assert_eq!(s, "weekly"),
            other => panic!("expected InvalidFrequency, got {:?}", other),
        }
    }

    #[test]
    fn test_periods_per_year() {
        let ppy: Vec<u32> = PaymentFrequency::ALL.iter().map(|f| f.periods_per_year()).collect();
        assert_eq!(ppy, vec![12, 4, 1]);
    }

    #[test]
    fn test_derived_terms() {
        let terms = LoanTerms::parse(300_000.0, 0.06, 30, "monthly").unwrap();
        assert_eq!(terms.period_count(), 360);
        assert!((terms.period_rate() - 0.005).abs() < 1e-15);
        assert!((terms.interest_only_payment() - 1500.0).abs() < 1e-9);
    }

    #[test]
    fn test_invalid_terms() {
        assert!(matches!(
            LoanTerms::new(0.0, 0.05, 10, PaymentFrequency::Monthly),
            Err(EngineError::InvalidTerms { field: "principal", .. })
        ));
        assert!(matches!(
            LoanTerms::new(1000.0, -0.01, 10, PaymentFrequency::Monthly),
            Err(EngineError::InvalidTerms { field: "annual_rate", .. })
        ));
        assert!(matches!(
            LoanTerms::new(1000.0, 0.05, 0, PaymentFrequency::Annual),
            Err(EngineError::InvalidTerms { field: "years", .. })
        ));
        assert!(matches!(
            LoanTerms::new(1000.0, 0.05, u32::MAX, PaymentFrequency::Monthly),
            Err(EngineError::InvalidTerms { field: "years", .. })
        ));
        // Every year count fits when paid annually
        assert_eq!(LoanTerms::new(1000.0, 0.05, u32::MAX, PaymentFrequency::Annual).unwrap().period_count(), u32::MAX);
        // Zero rate is a valid, interest-free loan
        assert!(LoanTerms::new(1000.0, 0.0, 1, PaymentFrequency::Annual).is_ok());
    }
}
