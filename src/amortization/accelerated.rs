//! Accelerated payoff: the effect of paying more than the level payment

use super::engine::build_schedule;
use super::schedule::{total_interest, ScheduleRow};
use super::state::AmortizationState;
use crate::error::{EngineError, Result};
use crate::loan::{validate_principal, validate_rate, LoanTerms, PaymentFrequency};
use serde::{Deserialize, Serialize};

/// Longest payoff horizon the solver will simulate
pub const MAX_PAYOFF_PERIODS: u32 = 120_000;

/// Configuration for accelerated payoff analysis
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AccelerationConfig {
    /// Years added to the accelerated payoff horizon when regenerating the
    /// reference schedule that savings are measured against
    pub reference_margin_years: u32,
}

impl Default for AccelerationConfig {
    fn default() -> Self {
        Self {
            reference_margin_years: 5,
        }
    }
}

/// Payoff plan at an increased payment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AcceleratedPlan {
    pub frequency: PaymentFrequency,

    /// Proposed payment per period
    pub increased_payment: f64,

    /// Payments needed to clear the loan at the increased payment
    pub new_period_count: u32,

    /// Length of the reference schedule minus `new_period_count`
    pub periods_saved: u32,

    /// Reference schedule interest minus the plan's interest
    pub interest_saved: f64,

    /// Payments in the regenerated reference schedule
    pub reference_period_count: u32,

    /// One row per payment; only the last row's payment differs from
    /// `increased_payment`
    pub rows: Vec<ScheduleRow>,
}

impl AcceleratedPlan {
    /// Total interest paid under the plan
    pub fn total_interest(&self) -> f64 {
        total_interest(&self.rows)
    }

    /// Payoff time in years (fractional)
    pub fn payoff_years(&self) -> f64 {
        self.new_period_count as f64 / self.frequency.periods_per_year() as f64
    }

    /// Amount of the odd last payment
    pub fn final_payment(&self) -> f64 {
        self.rows.last().map(|r| r.payment_amount).unwrap_or(0.0)
    }
}

/// Outcome of an accelerated payoff request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AcceleratedPayoff {
    /// The increased payment amortizes the loan
    Plan(AcceleratedPlan),

    /// The proposed payment does not exceed the interest-only payment, so the
    /// balance would never go down
    Infeasible {
        interest_only_payment: f64,
        proposed_payment: f64,
    },
}

impl AcceleratedPayoff {
    pub fn is_feasible(&self) -> bool {
        matches!(self, AcceleratedPayoff::Plan(_))
    }

    pub fn plan(&self) -> Option<&AcceleratedPlan> {
        match self {
            AcceleratedPayoff::Plan(plan) => Some(plan),
            AcceleratedPayoff::Infeasible { .. } => None,
        }
    }

    pub fn into_plan(self) -> Option<AcceleratedPlan> {
        match self {
            AcceleratedPayoff::Plan(plan) => Some(plan),
            AcceleratedPayoff::Infeasible { .. } => None,
        }
    }
}

/// Number of periods needed to amortize `principal` at a fixed payment
///
/// Inverts the annuity payment formula for `n` and rounds up: a loan is never
/// considered paid off part-way through a period. The payment must be above
/// the interest-only payment.
pub fn payoff_period_count(principal: f64, period_rate: f64, payment: f64) -> f64 {
    let n = if period_rate == 0.0 {
        principal / payment
    } else {
        (payment / (payment - principal * period_rate)).ln() / (1.0 + period_rate).ln()
    };
    n.ceil()
}

/// Accelerated payoff analysis from scalar inputs
///
/// `original_payment` is accepted so callers can pass the level payment they
/// display; savings are always measured against a reference schedule that is
/// regenerated here.
pub fn compute_accelerated_payoff(
    principal: f64,
    annual_rate: f64,
    original_payment: f64,
    increased_payment: f64,
    frequency: &str,
) -> Result<AcceleratedPayoff> {
    accelerate(
        principal,
        annual_rate,
        original_payment,
        increased_payment,
        frequency.parse()?,
        &AccelerationConfig::default(),
    )
}

/// Accelerated payoff analysis with explicit configuration
pub fn compute_accelerated_payoff_with(
    principal: f64,
    annual_rate: f64,
    original_payment: f64,
    increased_payment: f64,
    frequency: &str,
    config: &AccelerationConfig,
) -> Result<AcceleratedPayoff> {
    accelerate(
        principal,
        annual_rate,
        original_payment,
        increased_payment,
        frequency.parse()?,
        config,
    )
}

/// Typed accelerated payoff analysis
pub fn accelerate(
    principal: f64,
    annual_rate: f64,
    original_payment: f64,
    increased_payment: f64,
    frequency: PaymentFrequency,
    config: &AccelerationConfig,
) -> Result<AcceleratedPayoff> {
    validate_principal(principal)?;
    validate_rate(annual_rate)?;
    if !increased_payment.is_finite() {
        return Err(EngineError::terms(
            "increased_payment",
            format!("must be finite, got {}", increased_payment),
        ));
    }

    let periods_per_year = frequency.periods_per_year();
    let period_rate = annual_rate / periods_per_year as f64;

    let interest_only_payment = principal * period_rate;
    if increased_payment <= interest_only_payment {
        log::debug!(
            "Payment {} does not exceed interest-only payment {}",
            increased_payment,
            interest_only_payment
        );
        return Ok(AcceleratedPayoff::Infeasible {
            interest_only_payment,
            proposed_payment: increased_payment,
        });
    }

    let n_new = payoff_period_count(principal, period_rate, increased_payment);
    if n_new > MAX_PAYOFF_PERIODS as f64 {
        return Err(EngineError::terms(
            "increased_payment",
            format!("payoff would take {} periods (limit {})", n_new, MAX_PAYOFF_PERIODS),
        ));
    }
    let new_period_count = n_new as u32;

    log::debug!(
        "Accelerating: original payment={:.6} increased payment={:.6} periods={}",
        original_payment,
        increased_payment,
        new_period_count
    );

    let rows = simulate_payoff(principal, period_rate, increased_payment, new_period_count);

    // Savings are measured against a fresh full-term schedule whose term is
    // the accelerated horizon in whole years plus the margin
    let reference_years = (new_period_count / periods_per_year)
        .checked_add(config.reference_margin_years)
        .ok_or_else(|| {
            EngineError::terms(
                "reference_margin_years",
                format!("{} years overflows the reference term", config.reference_margin_years),
            )
        })?;
    let reference = build_schedule(&LoanTerms::new(principal, annual_rate, reference_years, frequency)?);
    let reference_period_count = reference.period_count;

    let interest_saved = reference.total_interest() - total_interest(&rows);

    Ok(AcceleratedPayoff::Plan(AcceleratedPlan {
        frequency,
        increased_payment,
        new_period_count,
        periods_saved: reference_period_count.saturating_sub(new_period_count),
        interest_saved,
        reference_period_count,
        rows,
    }))
}

/// Forward-simulate the loan at a constant payment
///
/// Balances are carried forward. The final period clears whatever remains, so
/// its payment is the remaining balance plus that period's interest.
fn simulate_payoff(principal: f64, period_rate: f64, payment: f64, period_count: u32) -> Vec<ScheduleRow> {
    let mut state = AmortizationState::new(principal, period_rate);
    let mut rows = Vec::with_capacity(period_count as usize);

    for k in 1..=period_count {
        let interest_paid = state.interest_due();

        let (principal_paid, actual_payment) = if k == period_count {
            (state.balance, state.balance + interest_paid)
        } else {
            (payment - interest_paid, payment)
        };

        let balance_after = state.balance - principal_paid;
        rows.push(state.record(actual_payment, interest_paid, principal_paid, balance_after));
    }

    rows
}
