//! Scenario runner for what-if payment analysis
//!
//! Builds the base schedule for a loan once, then evaluates any number of
//! proposed payments against it. Scenarios are independent, so they run in
//! parallel; each schedule is still built sequentially and results come back
//! in input order.

use crate::amortization::{
    accelerate, build_schedule, AcceleratedPayoff, AcceleratedPlan, AccelerationConfig, Schedule,
};
use crate::error::Result;
use crate::loan::LoanTerms;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Pre-built scenario runner for one loan
///
/// # Example
/// ```
/// use mortgage_pv::{LoanTerms, PaymentFrequency, ScenarioRunner};
///
/// let terms = LoanTerms::new(300_000.0, 0.06, 30, PaymentFrequency::Monthly).unwrap();
/// let runner = ScenarioRunner::new(terms);
/// let payment = runner.base().payment;
///
/// let outcomes = runner.run_payments(&[payment * 1.1, payment * 1.2]).unwrap();
/// assert_eq!(outcomes.len(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct ScenarioRunner {
    base: Schedule,
    config: AccelerationConfig,
}

impl ScenarioRunner {
    /// Create runner with the default acceleration config
    pub fn new(terms: LoanTerms) -> Self {
        Self::with_config(terms, AccelerationConfig::default())
    }

    pub fn with_config(terms: LoanTerms, config: AccelerationConfig) -> Self {
        Self {
            base: build_schedule(&terms),
            config,
        }
    }

    /// Schedule at the original terms
    pub fn base(&self) -> &Schedule {
        &self.base
    }

    pub fn terms(&self) -> &LoanTerms {
        &self.base.terms
    }

    /// Evaluate a single proposed payment
    pub fn run(&self, increased_payment: f64) -> Result<AcceleratedPayoff> {
        let terms = &self.base.terms;
        accelerate(
            terms.principal,
            terms.annual_rate,
            self.base.payment,
            increased_payment,
            terms.frequency,
            &self.config,
        )
    }

    /// Evaluate several proposed payments, returning outcomes in input order
    pub fn run_payments(&self, payments: &[f64]) -> Result<Vec<AcceleratedPayoff>> {
        let outcomes: Result<Vec<_>> = payments.par_iter().map(|&p| self.run(p)).collect();
        let outcomes = outcomes?;

        let infeasible = outcomes.iter().filter(|o| !o.is_feasible()).count();
        if infeasible > 0 {
            log::warn!("{} of {} proposed payments cannot amortize the loan", infeasible, payments.len());
        }
        Ok(outcomes)
    }
}

/// Outstanding balance of the original and accelerated schedules at one payment
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BalanceComparison {
    pub payment_number: u32,
    pub original: f64,
    pub accelerated: f64,
}

/// Pair original and accelerated balances over the shorter of the two schedules
pub fn balance_comparison(original: &Schedule, plan: &AcceleratedPlan) -> Vec<BalanceComparison> {
    original
        .rows
        .iter()
        .zip(&plan.rows)
        .map(|(o, a)| BalanceComparison {
            payment_number: o.payment_number,
            original: o.outstanding_balance,
            accelerated: a.outstanding_balance,
        })
        .collect()
}
