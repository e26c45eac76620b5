//! Statement date parsing.
//!
//! Bank exports disagree on field order, separators and year width. The rules
//! here are a best-effort heuristic that downstream consumers depend on exactly:
//!
//! * `DD-DD-DDDD`: day-first when the first part exceeds 12, month-first when the
//!   second does, month-first otherwise.
//! * `DD/DD/DDDD`: month-first. A first part above 12 cannot be a month and is
//!   read day-first.
//! * `DD-DD-DD` and `DD/DD/DD`: the year gains a `20` prefix; day-first when the
//!   first part exceeds 12, month-first otherwise.
//!
//! Anything else is rejected.

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

static FOUR_DIGIT_YEAR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{2}[-/]\d{2}[-/]\d{4}$").expect("valid date regex"));
static TWO_DIGIT_YEAR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{2}[-/]\d{2}[-/]\d{2}$").expect("valid date regex"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FieldOrder {
    DayMonthYear,
    MonthDayYear,
}

/// Parse a raw statement cell into a calendar date.
pub fn parse_statement_date(raw: &str) -> Option<NaiveDate> {
    let clean = raw.split_whitespace().collect::<Vec<_>>().join(" ");
    let separator = if clean.contains('-') { '-' } else { '/' };

    let parts: Vec<&str> = clean.split(separator).collect();
    if parts.len() != 3 {
        return None;
    }

    let first: u32 = parts[0].parse().ok()?;
    let second: u32 = parts[1].parse().ok()?;
    let year: i32 = if parts[2].len() == 2 {
        format!("20{}", parts[2]).parse().ok()?
    } else {
        parts[2].parse().ok()?
    };

    let order = if FOUR_DIGIT_YEAR.is_match(&clean) {
        match separator {
            '-' if first > 12 => FieldOrder::DayMonthYear,
            '-' if second > 12 => FieldOrder::MonthDayYear,
            '/' if first > 12 => FieldOrder::DayMonthYear,
            _ => FieldOrder::MonthDayYear,
        }
    } else if TWO_DIGIT_YEAR.is_match(&clean) {
        if first > 12 {
            FieldOrder::DayMonthYear
        } else {
            FieldOrder::MonthDayYear
        }
    } else {
        return None;
    };

    let (day, month) = match order {
        FieldOrder::DayMonthYear => (first, second),
        FieldOrder::MonthDayYear => (second, first),
    };

    if !(1..=31).contains(&day) || !(1..=12).contains(&month) || year < 1900 {
        return None;
    }

    // from_ymd_opt applies the Gregorian leap-year rule for February.
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Canonical `DD/MM/YYYY`, or an empty string when the token is rejected.
pub fn normalize_date(raw: &str) -> String {
    parse_statement_date(raw)
        .map(|d| d.format("%d/%m/%Y").to_string())
        .unwrap_or_default()
}

pub fn is_statement_date(raw: &str) -> bool {
    parse_statement_date(raw).is_some()
}
