//! Fixed-payment schedule generation

use super::payment::{calculate_payment, outstanding_balance};
use super::schedule::Schedule;
use super::state::AmortizationState;
use crate::error::Result;
use crate::loan::LoanTerms;

/// Build the full payment-by-payment schedule for a loan
///
/// Each period's interest is charged on the previous balance, and the new
/// balance is recomputed from the closed-form PV of the remaining payments
/// rather than rolled forward from the previous one. Rows are produced in
/// strictly increasing period order.
pub fn build_schedule(terms: &LoanTerms) -> Schedule {
    let pmt = calculate_payment(terms);
    log::debug!(
        "Generating schedule: principal={} rate={} n={} payment={:.6}",
        terms.principal,
        pmt.period_rate,
        pmt.period_count,
        pmt.payment
    );

    let mut state = AmortizationState::new(terms.principal, pmt.period_rate);
    let mut rows = Vec::with_capacity(pmt.period_count as usize);

    for k in 1..=pmt.period_count {
        let interest_paid = state.interest_due();
        let principal_paid = pmt.payment - interest_paid;
        let balance = outstanding_balance(pmt.payment, pmt.period_rate, pmt.period_count, k);

        rows.push(state.record(pmt.payment, interest_paid, principal_paid, balance));
    }

    Schedule {
        terms: *terms,
        payment: pmt.payment,
        period_rate: pmt.period_rate,
        period_count: pmt.period_count,
        rows,
    }
}

/// Build a schedule from scalar inputs
///
/// Fails with `InvalidFrequency` for an unknown frequency name.
pub fn generate_schedule(principal: f64, annual_rate: f64, years: u32, frequency: &str) -> Result<Schedule> {
    let terms = LoanTerms::parse(principal, annual_rate, years, frequency)?;
    Ok(build_schedule(&terms))
}
