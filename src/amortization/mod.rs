//! Amortization engine: level payment, PV-based schedules and accelerated payoff

mod state;
mod payment;
mod schedule;
mod engine;
mod accelerated;

pub use payment::{calculate_payment, compute_payment, outstanding_balance, PaymentTerms};
pub use schedule::{Schedule, ScheduleRow, ScheduleSummary};
pub use engine::{build_schedule, generate_schedule};
pub use accelerated::{
    accelerate, compute_accelerated_payoff, compute_accelerated_payoff_with, payoff_period_count,
    AcceleratedPayoff, AcceleratedPlan, AccelerationConfig, MAX_PAYOFF_PERIODS,
};
