//! Running state while a schedule is built period by period

use super::payment::accumulation_factor;
use super::schedule::ScheduleRow;

/// State of a loan between two payments
#[derive(Debug, Clone)]
pub(crate) struct AmortizationState {
    /// Interest rate per period
    pub period_rate: f64,

    /// Number of the last recorded payment (0 before the first)
    pub payment_number: u32,

    /// Balance carried into the next period, unclamped
    pub balance: f64,

    pub cumulative_interest: f64,
    pub cumulative_principal: f64,
}

impl AmortizationState {
    /// State at loan origination
    pub fn new(principal: f64, period_rate: f64) -> Self {
        Self {
            period_rate,
            payment_number: 0,
            balance: principal,
            cumulative_interest: 0.0,
            cumulative_principal: 0.0,
        }
    }

    /// Interest accrued on the balance carried into the next period
    pub fn interest_due(&self) -> f64 {
        self.balance * self.period_rate
    }

    /// Record the next payment and advance to the following period
    ///
    /// `balance_after` becomes the carried balance as given; the row reports
    /// it clamped at zero so floating-point residue never shows as a negative
    /// balance.
    pub fn record(
        &mut self,
        payment_amount: f64,
        interest_paid: f64,
        principal_paid: f64,
        balance_after: f64,
    ) -> ScheduleRow {
        self.payment_number += 1;
        self.balance = balance_after;
        self.cumulative_interest += interest_paid;
        self.cumulative_principal += principal_paid;

        ScheduleRow {
            payment_number: self.payment_number,
            payment_amount,
            interest_paid,
            principal_paid,
            present_value_of_principal: principal_paid
                / accumulation_factor(self.period_rate, self.payment_number),
            outstanding_balance: balance_after.max(0.0),
            cumulative_interest: self.cumulative_interest,
            cumulative_principal: self.cumulative_principal,
        }
    }
}
