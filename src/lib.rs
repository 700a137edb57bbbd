//! Mortgage PV - amortization schedules from closed-form present-value formulas
//!
//! This library provides:
//! - Level payment calculation for fixed-rate loans
//! - Payment-by-payment schedules with PV-based outstanding balances
//! - Accelerated payoff analysis for increased payments
//! - Currency/percentage formatting and CSV export of schedules

pub mod error;
pub mod loan;
pub mod amortization;
pub mod format;
pub mod export;
pub mod scenario;

// Re-export commonly used types
pub use error::EngineError;
pub use loan::{LoanTerms, PaymentFrequency};
pub use amortization::{
    compute_accelerated_payoff, compute_payment, generate_schedule, outstanding_balance,
    AcceleratedPayoff, AcceleratedPlan, PaymentTerms, Schedule, ScheduleRow,
};
pub use format::{format_currency, format_percentage};
pub use scenario::ScenarioRunner;
