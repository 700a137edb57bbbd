//! Mortgage PV CLI
//!
//! Command-line interface for payment, schedule and accelerated payoff calculations

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use mortgage_pv::amortization::{build_schedule, AcceleratedPayoff, AcceleratedPlan, Schedule, ScheduleRow};
use mortgage_pv::export::{default_export_filename, write_schedule_file};
use mortgage_pv::scenario::balance_comparison;
use mortgage_pv::{format_currency, format_percentage, LoanTerms, PaymentFrequency, ScenarioRunner};
use std::path::PathBuf;

/// Mortgage amortization using pure present value formulas
#[derive(Parser)]
#[command(name = "mortgage-pv", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Print results as JSON instead of tables
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Calculate the level payment
    Payment(LoanArgs),
    /// Print the amortization schedule and optionally export it
    Schedule(ScheduleArgs),
    /// Analyse paying more than the level payment
    Accelerate(AccelerateArgs),
    /// Compare several increased payments
    Sweep(SweepArgs),
}

#[derive(Args)]
struct LoanArgs {
    /// Principal amount
    #[arg(long, default_value_t = 300_000.0)]
    principal: f64,

    /// Annual interest rate as a decimal (0.06 = 6%)
    #[arg(long, default_value_t = 0.06)]
    rate: f64,

    /// Loan term in years
    #[arg(long, default_value_t = 30)]
    years: u32,

    /// Payment frequency: monthly, quarterly or annual
    #[arg(long, default_value = "monthly")]
    frequency: String,
}

impl LoanArgs {
    fn terms(&self) -> Result<LoanTerms> {
        LoanTerms::parse(self.principal, self.rate, self.years, &self.frequency).context("Invalid loan parameters")
    }
}

#[derive(Args)]
struct ScheduleArgs {
    #[command(flatten)]
    loan: LoanArgs,

    /// Number of rows to print (0 prints all)
    #[arg(long, default_value_t = 24)]
    rows: usize,

    /// Write the full schedule to CSV; without PATH the file is named
    /// mortgage_schedule_<principal>_<rate>pct_<years>yr.csv
    #[arg(long, value_name = "PATH", num_args = 0..=1)]
    csv: Option<Option<PathBuf>>,
}

#[derive(Args)]
struct AccelerateArgs {
    #[command(flatten)]
    loan: LoanArgs,

    /// Proposed payment per period (defaults to 1.2x the level payment)
    #[arg(long)]
    increased_payment: Option<f64>,

    /// Number of rows to print (0 prints all)
    #[arg(long, default_value_t = 12)]
    rows: usize,

    /// Write the accelerated schedule to this CSV file
    #[arg(long, value_name = "PATH")]
    csv: Option<PathBuf>,
}

#[derive(Args)]
struct SweepArgs {
    #[command(flatten)]
    loan: LoanArgs,

    /// Proposed payments, comma separated
    #[arg(long, value_delimiter = ',', required = true)]
    payments: Vec<f64>,
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Payment(args) => run_payment(&args, cli.json),
        Commands::Schedule(args) => run_schedule(&args, cli.json),
        Commands::Accelerate(args) => run_accelerate(&args, cli.json),
        Commands::Sweep(args) => run_sweep(&args, cli.json),
    }
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn run_payment(args: &LoanArgs, json: bool) -> Result<()> {
    let schedule = build_schedule(&args.terms()?);
    if json {
        return print_json(&schedule.summary());
    }

    println!("{} Payment:  {}", schedule.terms.frequency, format_currency(schedule.payment));
    println!("Period Rate:      {}", format_percentage(schedule.period_rate));
    println!("Payments:         {}", schedule.period_count);
    Ok(())
}

fn run_schedule(args: &ScheduleArgs, json: bool) -> Result<()> {
    let terms = args.loan.terms()?;
    let schedule = build_schedule(&terms);

    if json {
        print_json(&schedule)?;
    } else {
        print_summary(&schedule);
        println!();
        print_rows(&schedule.rows, args.rows);
    }

    if let Some(path) = &args.csv {
        let path = path
            .clone()
            .unwrap_or_else(|| PathBuf::from(default_export_filename(&terms)));
        write_schedule_file(&path, &schedule.rows)
            .with_context(|| format!("Unable to write schedule to {}", path.display()))?;
        println!("\nFull schedule written to: {}", path.display());
    }
    Ok(())
}

fn run_accelerate(args: &AccelerateArgs, json: bool) -> Result<()> {
    let terms = args.loan.terms()?;
    let runner = ScenarioRunner::new(terms);
    let base = runner.base();
    let increased = args.increased_payment.unwrap_or(base.payment * 1.2);

    let outcome = runner.run(increased)?;
    if json {
        return print_json(&outcome);
    }

    print_summary(base);
    println!();

    let plan = match outcome {
        AcceleratedPayoff::Plan(plan) => plan,
        AcceleratedPayoff::Infeasible { interest_only_payment, proposed_payment } => {
            println!(
                "The increased payment of {} is not sufficient to pay off the loan. \
                 It must be greater than the interest-only payment of {}.",
                format_currency(proposed_payment),
                format_currency(interest_only_payment)
            );
            return Ok(());
        }
    };

    print_plan(&plan);
    println!();

    println!("{:>5} {:>16} {:>16}", "Pmt #", "Original", "Accelerated");
    println!("{}", "-".repeat(39));
    for point in balance_comparison(base, &plan).iter().step_by(base.terms.periods_per_year() as usize) {
        println!(
            "{:>5} {:>16} {:>16}",
            point.payment_number,
            format_currency(point.original),
            format_currency(point.accelerated)
        );
    }
    println!();

    print_rows(&plan.rows, args.rows);

    if let Some(path) = &args.csv {
        write_schedule_file(path, &plan.rows)
            .with_context(|| format!("Unable to write schedule to {}", path.display()))?;
        println!("\nAccelerated schedule written to: {}", path.display());
    }
    Ok(())
}

fn run_sweep(args: &SweepArgs, json: bool) -> Result<()> {
    let runner = ScenarioRunner::new(args.loan.terms()?);
    let outcomes = runner.run_payments(&args.payments)?;
    if json {
        return print_json(&outcomes);
    }

    print_summary(runner.base());
    println!();
    println!(
        "{:>14} {:>9} {:>8} {:>9} {:>16} {:>16}",
        "Payment", "Payments", "Years", "Saved", "Interest Saved", "New Interest"
    );
    println!("{}", "-".repeat(77));

    for outcome in &outcomes {
        match outcome {
            AcceleratedPayoff::Plan(plan) => println!(
                "{:>14} {:>9} {:>8.1} {:>9} {:>16} {:>16}",
                format_currency(plan.increased_payment),
                plan.new_period_count,
                plan.payoff_years(),
                plan.periods_saved,
                format_currency(plan.interest_saved),
                format_currency(plan.total_interest()),
            ),
            AcceleratedPayoff::Infeasible { proposed_payment, .. } => println!(
                "{:>14} {:>9}",
                format_currency(*proposed_payment),
                "infeasible"
            ),
        }
    }
    Ok(())
}

fn print_summary(schedule: &Schedule) {
    let summary = schedule.summary();
    let frequency: PaymentFrequency = schedule.terms.frequency;

    println!("Payment Summary");
    println!("===============");
    println!("  {} Payment:   {}", frequency, format_currency(summary.payment));
    println!("  Total Interest:    {}", format_currency(summary.total_interest));
    println!("  Total Paid:        {}", format_currency(summary.total_paid));
    println!("  Number of Payments: {}", summary.number_of_payments);
}

fn print_plan(plan: &AcceleratedPlan) {
    println!("Accelerated Payoff");
    println!("==================");
    println!(
        "  New Payoff Time:    {} payments ({:.1} years)",
        plan.new_period_count,
        plan.payoff_years()
    );
    println!("  Payments Saved:     {}", plan.periods_saved);
    println!("  Interest Saved:     {}", format_currency(plan.interest_saved));
    println!("  New Total Interest: {}", format_currency(plan.total_interest()));
    println!("  Final Payment:      {}", format_currency(plan.final_payment()));
}

fn print_rows(rows: &[ScheduleRow], limit: usize) {
    let shown = if limit == 0 { rows.len() } else { limit.min(rows.len()) };

    println!(
        "{:>5} {:>14} {:>14} {:>14} {:>14} {:>16} {:>16} {:>16}",
        "Pmt #", "Payment", "Interest", "Principal", "PV(Principal)", "Outstanding", "Cum. Interest", "Cum. Principal"
    );
    println!("{}", "-".repeat(116));

    for row in &rows[..shown] {
        println!(
            "{:>5} {:>14} {:>14} {:>14} {:>14} {:>16} {:>16} {:>16}",
            row.payment_number,
            format_currency(row.payment_amount),
            format_currency(row.interest_paid),
            format_currency(row.principal_paid),
            format_currency(row.present_value_of_principal),
            format_currency(row.outstanding_balance),
            format_currency(row.cumulative_interest),
            format_currency(row.cumulative_principal),
        );
    }

    if rows.len() > shown {
        println!("... ({} more payments)", rows.len() - shown);
    }
}
