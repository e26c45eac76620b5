//! Header row detection.

use crate::domain::model::ColumnMapping;

fn normalize_label(label: &str) -> String {
    label
        .chars()
        .filter(|c| c.is_ascii_alphabetic())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// Infer column positions from a header row.
///
/// Labels are matched by substring in priority order, so `Debit Amount` maps to
/// `debit` and never to `amount`. A later label overrides an earlier one for the
/// same field.
pub fn map_header<S: AsRef<str>>(fields: &[S]) -> Option<ColumnMapping> {
    let mut mapping = ColumnMapping::default();

    for (idx, field) in fields.iter().enumerate() {
        let label = normalize_label(field.as_ref());
        if label.is_empty() {
            continue;
        }

        if label.contains("date") {
            mapping.date = Some(idx);
        } else if label.contains("description")
            || label.contains("details")
            || label == "transactiondescription"
        {
            mapping.description = Some(idx);
        } else if label.contains("debit") {
            mapping.debit = Some(idx);
        } else if label.contains("credit") {
            mapping.credit = Some(idx);
        } else if label.contains("amount") {
            mapping.amount = Some(idx);
        }
    }

    mapping.is_valid().then_some(mapping)
}

/// Whether `fields` would be accepted as a header row.
pub fn is_header_row<S: AsRef<str>>(fields: &[S]) -> bool {
    map_header(fields).is_some()
}
