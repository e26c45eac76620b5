//! Line classification for statement exports.
//!
//! A statement file mixes section banners, card-name lines, one or more header
//! rows and transaction rows. [`classify_line`] decides what a line is, given
//! the current [`ParseState`]; it never mutates state itself.

use crate::core::date::is_statement_date;
use crate::core::header::{is_header_row, map_header};
use crate::domain::model::{ColumnMapping, ParseState, TransactionType};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind<'a> {
    Blank,
    Section(TransactionType),
    CardName(String),
    Header(ColumnMapping),
    RepeatedHeader,
    Transaction(Vec<&'a str>),
    Unrecognized,
}

/// Strip surrounding whitespace, including a byte-order mark on the first line.
pub fn trim_line(line: &str) -> &str {
    line.trim_matches(|c: char| c.is_whitespace() || c == '\u{feff}')
}

/// A row is worth extracting when it has at least three cells and one of them
/// is a recognizable date.
pub fn is_transaction_candidate(fields: &[&str]) -> bool {
    fields.len() >= 3 && fields.iter().any(|f| is_statement_date(f))
}

pub fn classify_line<'a>(state: &ParseState, raw: &'a str) -> LineKind<'a> {
    let line = trim_line(raw);
    let fields: Vec<&str> = line.split(',').collect();

    if line.is_empty() || fields.iter().all(|f| f.is_empty()) {
        return LineKind::Blank;
    }

    let lowered = line.to_lowercase();
    if lowered.contains("domestic transaction") {
        return LineKind::Section(TransactionType::Domestic);
    }
    if lowered.contains("international transaction") {
        return LineKind::Section(TransactionType::International);
    }

    let non_empty = fields.iter().filter(|f| !f.is_empty()).count();
    if non_empty == 1 && !lowered.contains("transaction") {
        return LineKind::CardName(line.replace(',', "").trim().to_string());
    }

    match state.column_mapping {
        Some(_) if is_header_row(fields.as_slice()) => LineKind::RepeatedHeader,
        None => match map_header(fields.as_slice()) {
            Some(mapping) => LineKind::Header(mapping),
            None => LineKind::Unrecognized,
        },
        Some(_) if is_transaction_candidate(&fields) => LineKind::Transaction(fields),
        Some(_) => LineKind::Unrecognized,
    }
}
