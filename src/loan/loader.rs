//! Load a book of loans from CSV

use super::{LoanTerms, PaymentFrequency};
use crate::error::Result;
use csv::Reader;
use serde::Serialize;
use std::path::Path;

/// One loan from a loan-book file, with an optional what-if payment
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoanRecord {
    pub loan_id: u32,
    pub terms: LoanTerms,
    /// Proposed higher payment for accelerated payoff analysis
    pub increased_payment: Option<f64>,
}

/// Raw CSV row
#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    #[serde(rename = "LoanID")]
    loan_id: u32,
    #[serde(rename = "Principal")]
    principal: f64,
    #[serde(rename = "AnnualRate")]
    annual_rate: f64,
    #[serde(rename = "Years")]
    years: u32,
    #[serde(rename = "Frequency")]
    frequency: String,
    #[serde(rename = "IncreasedPayment", default)]
    increased_payment: Option<f64>,
}

impl CsvRow {
    fn into_record(self) -> Result<LoanRecord> {
        let frequency: PaymentFrequency = self.frequency.parse()?;
        let terms = LoanTerms::new(self.principal, self.annual_rate, self.years, frequency)?;

        Ok(LoanRecord {
            loan_id: self.loan_id,
            terms,
            increased_payment: self.increased_payment,
        })
    }
}

/// Load all loans from a CSV file
pub fn load_loans<P: AsRef<Path>>(path: P) -> Result<Vec<LoanRecord>> {
    let reader = Reader::from_path(path)?;
    collect_records(reader)
}

/// Load loans from any reader (e.g., string buffer, stdin)
pub fn load_loans_from_reader<R: std::io::Read>(reader: R) -> Result<Vec<LoanRecord>> {
    collect_records(Reader::from_reader(reader))
}

fn collect_records<R: std::io::Read>(mut reader: Reader<R>) -> Result<Vec<LoanRecord>> {
    let mut loans = Vec::new();

    for result in reader.deserialize() {
        let row: CsvRow = result?;
        loans.push(row.into_record()?);
    }

    log::debug!("Loaded {} loans", loans.len());
    Ok(loans)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EngineError;

    const BOOK: &str = "\
LoanID,Principal,AnnualRate,Years,Frequency,IncreasedPayment
1,300000,0.06,30,Monthly,2158.38
2,50000,0.0,10,quarterly,
3,125000,0.045,15,annual,
";

    #[test]
    fn test_load_loans() {
        let loans = load_loans_from_reader(BOOK.as_bytes()).expect("Failed to load loans");
        assert_eq!(loans.len(), 3);

        assert_eq!(loans[0].loan_id, 1);
        assert_eq!(loans[0].terms.frequency, PaymentFrequency::Monthly);
        assert_eq!(loans[0].increased_payment, Some(2158.38));

        assert_eq!(loans[1].terms.annual_rate, 0.0);
        assert_eq!(loans[1].terms.frequency, PaymentFrequency::Quarterly);
        assert_eq!(loans[1].increased_payment, None);

        assert_eq!(loans[2].terms.period_count(), 15);
    }

    #[test]
    fn test_increased_payment_column_is_optional() {
        let book = "LoanID,Principal,AnnualRate,Years,Frequency\n7,1000,0.05,1,monthly\n";
        let loans = load_loans_from_reader(book.as_bytes()).unwrap();
        assert_eq!(loans.len(), 1);
        assert_eq!(loans[0].increased_payment, None);
    }

    #[test]
    fn test_unknown_frequency_rejected() {
        let book = "LoanID,Principal,AnnualRate,Years,Frequency\n1,1000,0.05,1,biweekly\n";
        let err = load_loans_from_reader(book.as_bytes()).unwrap_err();
        assert!(matches!(err, EngineError::InvalidFrequency(_)));
    }

    #[test]
    fn test_malformed_row_is_csv_error() {
        let book = "LoanID,Principal,AnnualRate,Years,Frequency\n1,lots,0.05,1,monthly\n";
        let err = load_loans_from_reader(book.as_bytes()).unwrap_err();
        assert!(matches!(err, EngineError::Csv(_)));
    }
}
