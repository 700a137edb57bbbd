//! Schedule output structures

use crate::loan::LoanTerms;
use serde::{Deserialize, Serialize};

/// A single payment of an amortization schedule
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScheduleRow {
    /// Payment index (1-indexed)
    pub payment_number: u32,

    // Payment split
    pub payment_amount: f64,
    pub interest_paid: f64,
    pub principal_paid: f64,

    /// Principal component discounted to the loan start at the period rate
    pub present_value_of_principal: f64,

    /// Balance just after this payment
    pub outstanding_balance: f64,

    // Running totals
    pub cumulative_interest: f64,
    pub cumulative_principal: f64,
}

/// Fixed-payment amortization schedule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schedule {
    /// Terms the schedule was generated from
    pub terms: LoanTerms,

    /// Level payment per period
    pub payment: f64,

    /// Interest rate per period
    pub period_rate: f64,

    /// Number of scheduled payments
    pub period_count: u32,

    /// One row per payment, in payment order
    pub rows: Vec<ScheduleRow>,
}

impl Schedule {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Total interest over the life of the loan
    pub fn total_interest(&self) -> f64 {
        total_interest(&self.rows)
    }

    /// Total principal repaid
    pub fn total_principal(&self) -> f64 {
        self.rows.last().map(|r| r.cumulative_principal).unwrap_or(0.0)
    }

    /// Sum of all scheduled payments (payment * period count)
    pub fn total_paid(&self) -> f64 {
        self.payment * self.period_count as f64
    }

    /// Balance after the last payment
    pub fn final_balance(&self) -> f64 {
        self.rows.last().map(|r| r.outstanding_balance).unwrap_or(self.terms.principal)
    }

    /// Get summary statistics
    pub fn summary(&self) -> ScheduleSummary {
        ScheduleSummary {
            payment: self.payment,
            period_rate: self.period_rate,
            number_of_payments: self.period_count,
            total_interest: self.total_interest(),
            total_paid: self.total_paid(),
        }
    }
}

/// Cumulative interest at the last row of a schedule
pub(crate) fn total_interest(rows: &[ScheduleRow]) -> f64 {
    rows.last().map(|r| r.cumulative_interest).unwrap_or(0.0)
}

/// Headline figures for a schedule
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScheduleSummary {
    pub payment: f64,
    pub period_rate: f64,
    pub number_of_payments: u32,
    pub total_interest: f64,
    pub total_paid: f64,
}
