//! Loan terms and loan-book loading

mod data;
pub mod loader;

pub use data::{LoanTerms, PaymentFrequency};
pub(crate) use data::{validate_principal, validate_rate};
pub use loader::{load_loans, load_loans_from_reader, LoanRecord};
