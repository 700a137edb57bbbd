//! Delimited-text export of schedules

use crate::amortization::ScheduleRow;
use crate::error::Result;
use crate::loan::LoanTerms;
use csv::Writer;
use serde::Serialize;
use std::io::Write;
use std::path::Path;

/// Export column order
pub const SCHEDULE_COLUMNS: [&str; 8] = [
    "Payment_Number",
    "Payment_Amount",
    "Interest_Paid",
    "Principal_Paid",
    "PV_of_Principal",
    "Outstanding_Balance",
    "Cumulative_Interest",
    "Cumulative_Principal",
];

/// CSV record, full precision
#[derive(Debug, Serialize)]
struct CsvRecord {
    #[serde(rename = "Payment_Number")]
    payment_number: u32,
    #[serde(rename = "Payment_Amount")]
    payment_amount: f64,
    #[serde(rename = "Interest_Paid")]
    interest_paid: f64,
    #[serde(rename = "Principal_Paid")]
    principal_paid: f64,
    #[serde(rename = "PV_of_Principal")]
    pv_of_principal: f64,
    #[serde(rename = "Outstanding_Balance")]
    outstanding_balance: f64,
    #[serde(rename = "Cumulative_Interest")]
    cumulative_interest: f64,
    #[serde(rename = "Cumulative_Principal")]
    cumulative_principal: f64,
}

impl From<&ScheduleRow> for CsvRecord {
    fn from(row: &ScheduleRow) -> Self {
        Self {
            payment_number: row.payment_number,
            payment_amount: row.payment_amount,
            interest_paid: row.interest_paid,
            principal_paid: row.principal_paid,
            pv_of_principal: row.present_value_of_principal,
            outstanding_balance: row.outstanding_balance,
            cumulative_interest: row.cumulative_interest,
            cumulative_principal: row.cumulative_principal,
        }
    }
}

/// Write schedule rows as CSV (header plus one line per payment)
pub fn write_schedule<W: Write>(writer: W, rows: &[ScheduleRow]) -> Result<()> {
    let mut wtr = Writer::from_writer(writer);
    for row in rows {
        wtr.serialize(CsvRecord::from(row))?;
    }
    wtr.flush()?;
    Ok(())
}

/// Write schedule rows to a CSV file
pub fn write_schedule_file<P: AsRef<Path>>(path: P, rows: &[ScheduleRow]) -> Result<()> {
    let file = std::fs::File::create(path.as_ref())?;
    write_schedule(std::io::BufWriter::new(file), rows)?;
    log::info!("Wrote {} rows to {}", rows.len(), path.as_ref().display());
    Ok(())
}

/// Render schedule rows as a CSV string
pub fn schedule_to_csv(rows: &[ScheduleRow]) -> Result<String> {
    let mut buf = Vec::new();
    write_schedule(&mut buf, rows)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Conventional export file name, e.g. `mortgage_schedule_300000_6.0pct_30yr.csv`
///
/// The rate keeps its shortest round-trip form, so whole percentages carry a
/// trailing `.0`.
pub fn default_export_filename(terms: &LoanTerms) -> String {
    format!(
        "mortgage_schedule_{}_{:?}pct_{}yr.csv",
        terms.principal,
        terms.annual_rate * 100.0,
        terms.years
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::amortization::generate_schedule;
    use crate::loan::PaymentFrequency;

    #[test]
    fn test_header_and_row_count() {
        let schedule = generate_schedule(10_000.0, 0.05, 1, "quarterly").unwrap();
        let csv = schedule_to_csv(&schedule.rows).unwrap();

        let mut lines = csv.lines();
        assert_eq!(lines.next().unwrap(), SCHEDULE_COLUMNS.join(","));
        assert_eq!(lines.count(), 4);
    }

    #[test]
    fn test_rows_in_column_order() {
        let schedule = generate_schedule(1_200.0, 0.0, 1, "monthly").unwrap();
        let csv = schedule_to_csv(&schedule.rows).unwrap();

        let mut reader = csv::Reader::from_reader(csv.as_bytes());
        let first: Vec<f64> = reader
            .records()
            .next()
            .unwrap()
            .unwrap()
            .iter()
            .map(|field| field.parse().unwrap())
            .collect();

        assert_eq!(first, vec![1.0, 100.0, 0.0, 100.0, 100.0, 1100.0, 0.0, 100.0]);
    }

    #[test]
    fn test_default_export_filename() {
        let terms = LoanTerms::new(300_000.0, 0.06, 30, PaymentFrequency::Monthly).unwrap();
        assert_eq!(default_export_filename(&terms), "mortgage_schedule_300000_6.0pct_30yr.csv");

        let terms = LoanTerms::new(250_000.0, 0.0625, 15, PaymentFrequency::Quarterly).unwrap();
        assert_eq!(default_export_filename(&terms), "mortgage_schedule_250000_6.25pct_15yr.csv");
    }
}
