//! Turns a classified transaction row into a [`TransactionRecord`].

use crate::core::date::parse_statement_date;
use crate::domain::model::{
    ColumnMapping, TransactionRecord, TransactionType, DEFAULT_CURRENCY, ZERO_AMOUNT,
};
use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::{Decimal, RoundingStrategy};

// Leading decimal number, the way statement amounts like `150.00` or `1e3` start.
static LEADING_NUMBER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[+-]?(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?").expect("valid number regex")
});

fn cell<'a>(fields: &'a [&str], idx: Option<usize>) -> Option<&'a str> {
    idx.and_then(|i| fields.get(i)).map(|f| f.trim())
}

fn collapse_whitespace(value: &str) -> String {
    value.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn strip_wrapping_quotes(value: &str) -> &str {
    if value.len() >= 2 && value.starts_with('"') && value.ends_with('"') {
        &value[1..value.len() - 1]
    } else {
        value
    }
}

fn letters_only(word: &str) -> String {
    word.chars().filter(|c| c.is_ascii_alphabetic()).collect()
}

/// Parse the numeric prefix of `value`, ignoring trailing text such as `150.00 Dr`.
pub fn parse_leading_number(value: &str) -> Option<f64> {
    let m = LEADING_NUMBER.find(value.trim_start())?;
    m.as_str().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Two fractional digits, `0.00` when the cell is not numeric.
pub fn format_amount(value: &str) -> String {
    match parse_leading_number(value) {
        Some(v) => round_to_cents(v),
        None => ZERO_AMOUNT.to_string(),
    }
}

/// Round the exact binary value of `v` to cents, ties away from zero.
///
/// `2.675` is stored just below the midpoint and stays `2.67`; `0.125` is
/// exact and becomes `0.13`. Negative zero renders as `0.00`.
fn round_to_cents(v: f64) -> String {
    let Some(magnitude) = Decimal::from_f64_retain(v.abs()) else {
        return format!("{:.2}", v + 0.0);
    };
    let mut cents = magnitude.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    cents.rescale(2);
    let sign = if v < 0.0 { "-" } else { "" };
    format!("{}{}", sign, cents)
}

/// Title-cased last word of the description with non-letters removed.
pub fn extract_location(description: &str) -> String {
    let last = description.split_whitespace().last().unwrap_or("");
    let letters = letters_only(last);
    let mut chars = letters.chars();
    match chars.next() {
        Some(first) => first.to_ascii_uppercase().to_string() + &chars.as_str().to_ascii_lowercase(),
        None => String::new(),
    }
}

/// Pull the trailing currency code off an international description.
///
/// Returns the currency and the remaining description, or `None` when the
/// description is a single word and carries no currency.
pub fn split_currency(description: &str) -> Option<(String, String)> {
    let words: Vec<&str> = description.split_whitespace().collect();
    if words.len() <= 1 {
        return None;
    }
    let (last, rest) = words.split_last()?;
    Some((letters_only(last).to_ascii_uppercase(), rest.join(" ")))
}

pub fn extract_transaction(
    fields: &[&str],
    mapping: &ColumnMapping,
    transaction_type: TransactionType,
    card_name: &str,
) -> TransactionRecord {
    let mut description = cell(fields, mapping.description)
        .map(|d| collapse_whitespace(strip_wrapping_quotes(d)))
        .unwrap_or_default();

    let date = cell(fields, mapping.date).and_then(parse_statement_date);

    let mut debit = cell(fields, mapping.debit)
        .map(format_amount)
        .unwrap_or_else(|| ZERO_AMOUNT.to_string());
    let mut credit = cell(fields, mapping.credit)
        .map(format_amount)
        .unwrap_or_else(|| ZERO_AMOUNT.to_string());

    if mapping.uses_combined_amount() {
        let amount: String = cell(fields, mapping.amount)
            .unwrap_or("")
            .to_lowercase()
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect();
        match amount.strip_suffix("cr") {
            Some(value) => credit = format_amount(value),
            None => debit = format_amount(&amount),
        }
    }

    let mut currency = DEFAULT_CURRENCY.to_string();
    if transaction_type == TransactionType::International {
        if let Some((code, rest)) = split_currency(&description) {
            currency = code;
            description = rest;
        }
    }

    let location = extract_location(&description);

    TransactionRecord {
        date,
        description,
        debit,
        credit,
        currency,
        card_name: card_name.to_string(),
        transaction: transaction_type,
        location,
    }
}
