use crate::utils::error::Result;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Currency assumed for every domestic row.
pub const DEFAULT_CURRENCY: &str = "INR";

/// Amount rendered when a debit or credit cell is missing or not numeric.
pub const ZERO_AMOUNT: &str = "0.00";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionType {
    #[default]
    Domestic,
    International,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Domestic => "Domestic",
            TransactionType::International => "International",
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Column indices inferred from a header row.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnMapping {
    pub date: Option<usize>,
    pub description: Option<usize>,
    pub debit: Option<usize>,
    pub credit: Option<usize>,
    pub amount: Option<usize>,
}

impl ColumnMapping {
    /// A mapping is usable once it knows the date and at least one money column.
    pub fn is_valid(&self) -> bool {
        self.date.is_some()
            && (self.amount.is_some() || self.debit.is_some() || self.credit.is_some())
    }

    /// True when the single signed `amount` column is the only money source.
    pub fn uses_combined_amount(&self) -> bool {
        self.debit.is_none() && self.credit.is_none() && self.amount.is_some()
    }
}

/// Mutable state threaded through one statement file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseState {
    pub transaction_type: TransactionType,
    pub card_name: String,
    pub column_mapping: Option<ColumnMapping>,
}

impl ParseState {
    pub fn new() -> Self {
        Self::default()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransactionRecord {
    pub date: Option<NaiveDate>,
    pub description: String,
    pub debit: String,
    pub credit: String,
    pub currency: String,
    pub card_name: String,
    pub transaction: TransactionType,
    pub location: String,
}

impl TransactionRecord {
    /// `DD/MM/YYYY`, or empty when the date cell could not be parsed.
    pub fn canonical_date(&self) -> String {
        self.date
            .map(|d| d.format("%d/%m/%Y").to_string())
            .unwrap_or_default()
    }

    /// `YYYY-MM-DD`; zero padding makes lexicographic order chronological.
    pub fn sort_key(&self) -> String {
        self.date
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_default()
    }

    pub fn to_line(&self) -> String {
        let row = OutputRow::from(self);
        [
            row.date.as_str(),
            row.description,
            row.debit,
            row.credit,
            row.currency,
            row.card_name,
            row.transaction,
            row.location,
        ]
        .join(",")
    }

    pub fn is_emittable(&self) -> bool {
        self.date.is_some() && !self.to_line().starts_with(',')
    }
}

pub const OUTPUT_HEADER: [&str; 8] = [
    "Date",
    "Transaction Description",
    "Debit",
    "Credit",
    "Currency",
    "CardName",
    "Transaction",
    "Location",
];

/// One line of the canonical output CSV, in column order.
#[derive(Debug, Serialize)]
pub struct OutputRow<'a> {
    #[serde(rename = "Date")]
    pub date: String,
    #[serde(rename = "Transaction Description")]
    pub description: &'a str,
    #[serde(rename = "Debit")]
    pub debit: &'a str,
    #[serde(rename = "Credit")]
    pub credit: &'a str,
    #[serde(rename = "Currency")]
    pub currency: &'a str,
    #[serde(rename = "CardName")]
    pub card_name: &'a str,
    #[serde(rename = "Transaction")]
    pub transaction: &'static str,
    #[serde(rename = "Location")]
    pub location: &'a str,
}

impl<'a> From<&'a TransactionRecord> for OutputRow<'a> {
    fn from(record: &'a TransactionRecord) -> Self {
        Self {
            date: record.canonical_date(),
            description: &record.description,
            debit: &record.debit,
            credit: &record.credit,
            currency: &record.currency,
            card_name: &record.card_name,
            transaction: record.transaction.as_str(),
            location: &record.location,
        }
    }
}

/// Counters collected while classifying one file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ParseSummary {
    pub lines_read: usize,
    pub headers_seen: usize,
    pub records_rejected: usize,
    pub card_names: Vec<String>,
    /// Accepted rows in input order, only collected in debug runs.
    pub parsed: Vec<String>,
}

/// Output of the transform step: sorted records plus what was seen on the way.
#[derive(Debug, Clone, Default)]
pub struct StatementBatch {
    pub records: Vec<TransactionRecord>,
    pub summary: ParseSummary,
}

#[derive(Debug, Clone, Serialize)]
pub struct NormalizeReport {
    pub output_location: String,
    pub lines_read: usize,
    pub records_emitted: usize,
    pub records_rejected: usize,
    pub headers_seen: usize,
    pub card_names: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub parsed: Vec<String>,
}

impl NormalizeReport {
    /// Pretty JSON for `--json` output.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
