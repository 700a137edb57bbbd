//! Run schedules for an entire loan book
//!
//! Usage: run_book <loans.csv> [--output loan_book_summary.csv]
//!
//! Writes one summary line per loan, including accelerated payoff figures for
//! loans that carry an IncreasedPayment. A what-if payment that cannot be
//! analysed is logged and reported as not feasible; it never stops the book.

use anyhow::{Context, Result};
use clap::Parser;
use mortgage_pv::amortization::{build_schedule, AcceleratedPayoff, ScheduleSummary};
use mortgage_pv::loan::{load_loans, LoanRecord};
use mortgage_pv::ScenarioRunner;
use rayon::prelude::*;
use serde::Serialize;
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser)]
#[command(name = "run_book", about = "Generate schedules for every loan in a loan-book CSV")]
struct Cli {
    /// Loan-book CSV (LoanID,Principal,AnnualRate,Years,Frequency[,IncreasedPayment])
    input: PathBuf,

    /// Summary output path
    #[arg(long, default_value = "loan_book_summary.csv")]
    output: PathBuf,
}

/// One summary line per loan
#[derive(Debug, Serialize)]
struct SummaryRow {
    #[serde(rename = "LoanID")]
    loan_id: u32,
    #[serde(rename = "Payment")]
    payment: f64,
    #[serde(rename = "Payments")]
    payments: u32,
    #[serde(rename = "TotalInterest")]
    total_interest: f64,
    #[serde(rename = "TotalPaid")]
    total_paid: f64,
    #[serde(rename = "IncreasedPayment")]
    increased_payment: Option<f64>,
    #[serde(rename = "NewPayments")]
    new_payments: Option<u32>,
    #[serde(rename = "PaymentsSaved")]
    payments_saved: Option<u32>,
    #[serde(rename = "InterestSaved")]
    interest_saved: Option<f64>,
    #[serde(rename = "Feasible")]
    feasible: Option<bool>,
}

impl SummaryRow {
    fn new(loan_id: u32, summary: &ScheduleSummary) -> Self {
        Self {
            loan_id,
            payment: summary.payment,
            payments: summary.number_of_payments,
            total_interest: summary.total_interest,
            total_paid: summary.total_paid,
            increased_payment: None,
            new_payments: None,
            payments_saved: None,
            interest_saved: None,
            feasible: None,
        }
    }
}

fn summarize(loan: &LoanRecord) -> SummaryRow {
    let Some(increased) = loan.increased_payment else {
        let schedule = build_schedule(&loan.terms);
        return SummaryRow::new(loan.loan_id, &schedule.summary());
    };

    let runner = ScenarioRunner::new(loan.terms);
    let mut row = SummaryRow::new(loan.loan_id, &runner.base().summary());
    row.increased_payment = Some(increased);

    match runner.run(increased) {
        Ok(AcceleratedPayoff::Plan(plan)) => {
            row.new_payments = Some(plan.new_period_count);
            row.payments_saved = Some(plan.periods_saved);
            row.interest_saved = Some(plan.interest_saved);
            row.feasible = Some(true);
        }
        Ok(AcceleratedPayoff::Infeasible { interest_only_payment, .. }) => {
            log::warn!(
                "Loan {}: payment {} does not exceed interest-only payment {}",
                loan.loan_id,
                increased,
                interest_only_payment
            );
            row.feasible = Some(false);
        }
        Err(e) => {
            log::warn!("Loan {}: accelerated payoff failed: {}", loan.loan_id, e);
            row.feasible = Some(false);
        }
    }

    row
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let start = Instant::now();
    let loans = load_loans(&cli.input)
        .with_context(|| format!("Failed to load loans from {}", cli.input.display()))?;
    log::info!("Loaded {} loans in {:?}", loans.len(), start.elapsed());

    // Loans are independent; collect preserves input order
    let rows: Vec<SummaryRow> = loans.par_iter().map(summarize).collect();

    let mut writer = csv::Writer::from_path(&cli.output)
        .with_context(|| format!("Failed to create {}", cli.output.display()))?;
    for row in &rows {
        writer.serialize(row)?;
    }
    writer.flush()?;

    let total_interest: f64 = rows.iter().map(|r| r.total_interest).sum();
    let total_saved: f64 = rows.iter().filter_map(|r| r.interest_saved).sum();

    println!("Loan Book Summary:");
    println!("  Loans:                 {}", rows.len());
    println!("  Total Interest:        {}", mortgage_pv::format_currency(total_interest));
    println!("  Interest Saved (what-if): {}", mortgage_pv::format_currency(total_saved));
    println!("\nOutput written to {} in {:?}", cli.output.display(), start.elapsed());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use mortgage_pv::loan::load_loans_from_reader;

    #[test]
    fn test_unanalysable_payment_does_not_stop_the_book() {
        // Loan 2 would need ~300 million payments at 0.001 per month
        let book = "\
LoanID,Principal,AnnualRate,Years,Frequency,IncreasedPayment
1,300000,0.06,30,monthly,2158.38
2,300000,0.0,30,monthly,0.001
3,125000,0.045,15,annual,
4,100000,0.06,30,monthly,400
";
        let loans = load_loans_from_reader(book.as_bytes()).unwrap();
        let rows: Vec<SummaryRow> = loans.par_iter().map(summarize).collect();

        let ids: Vec<u32> = rows.iter().map(|r| r.loan_id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4]);

        assert_eq!(rows[0].feasible, Some(true));
        assert!(rows[0].new_payments.is_some());

        let capped = &rows[1];
        assert_eq!(capped.payments, 360);
        assert_eq!(capped.increased_payment, Some(0.001));
        assert_eq!(capped.feasible, Some(false));
        assert_eq!(capped.new_payments, None);
        assert_eq!(capped.payments_saved, None);
        assert_eq!(capped.interest_saved, None);

        assert_eq!(rows[2].feasible, None);

        // Below the 500 interest-only payment
        assert_eq!(rows[3].feasible, Some(false));
        assert_eq!(rows[3].new_payments, None);
    }
}
