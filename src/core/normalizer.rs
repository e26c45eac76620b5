//! Drives a statement file through classification and extraction.

use crate::core::classifier::{classify_line, LineKind};
use crate::core::emit::sort_records;
use crate::core::extractor::extract_transaction;
use crate::domain::model::{ParseState, ParseSummary, StatementBatch, TransactionRecord};

/// Per-file parser. Owns its [`ParseState`] and accumulator, so separate files
/// need separate instances.
#[derive(Debug, Default)]
pub struct Normalizer {
    state: ParseState,
    records: Vec<TransactionRecord>,
    summary: ParseSummary,
    debug: bool,
}

impl Normalizer {
    pub fn new(debug: bool) -> Self {
        Self {
            debug,
            ..Default::default()
        }
    }

    pub fn state(&self) -> &ParseState {
        &self.state
    }

    /// Feed one raw line. Returns the record when the line produced one.
    pub fn feed_line(&mut self, line: &str) -> Option<&TransactionRecord> {
        self.summary.lines_read += 1;

        match classify_line(&self.state, line) {
            LineKind::Blank | LineKind::Unrecognized => None,
            LineKind::Section(transaction_type) => {
                tracing::debug!("Switching to {} section", transaction_type);
                self.state.transaction_type = transaction_type;
                None
            }
            LineKind::CardName(name) => {
                tracing::debug!("Card name: {}", name);
                if !name.is_empty() && !self.summary.card_names.contains(&name) {
                    self.summary.card_names.push(name.clone());
                }
                self.state.card_name = name;
                None
            }
            LineKind::Header(mapping) => {
                tracing::debug!("Header mapped: {:?}", mapping);
                self.summary.headers_seen += 1;
                self.state.column_mapping = Some(mapping);
                None
            }
            LineKind::RepeatedHeader => {
                self.summary.headers_seen += 1;
                None
            }
            LineKind::Transaction(fields) => {
                let mapping = self.state.column_mapping?;
                let record = extract_transaction(
                    &fields,
                    &mapping,
                    self.state.transaction_type,
                    &self.state.card_name,
                );

                if !record.is_emittable() {
                    tracing::debug!("Dropping row with unparseable date: {}", line.trim());
                    self.summary.records_rejected += 1;
                    return None;
                }

                if self.debug {
                    let rendered = record.to_line();
                    tracing::info!("Parsed: {}", rendered);
                    self.summary.parsed.push(rendered);
                }
                self.records.push(record);
                self.records.last()
            }
        }
    }

    /// Sort the accumulated records by date and hand them over.
    pub fn finish(mut self) -> StatementBatch {
        sort_records(&mut self.records);
        StatementBatch {
            records: self.records,
            summary: self.summary,
        }
    }
}

/// Normalize a whole statement held in memory.
pub fn normalize(content: &str, debug: bool) -> StatementBatch {
    let mut normalizer = Normalizer::new(debug);
    for line in content.lines() {
        normalizer.feed_line(line);
    }
    normalizer.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::TransactionType;

    const SINGLE_CARD: &str = "CARD NAME ONE\nDomestic Transaction\nDate,Transaction Details,Amount\n01-01-23,COFFEE SHOP MUMBAI,150.00\n";

    #[test]
    fn test_single_card_statement() {
        let batch = normalize(SINGLE_CARD, false);
        assert_eq!(batch.records.len(), 1);
        assert_eq!(
            batch.records[0].to_line(),
            "01/01/2023,COFFEE SHOP MUMBAI,150.00,0.00,INR,CARD NAME ONE,Domestic,Mumbai"
        );
        assert_eq!(batch.summary.headers_seen, 1);
        assert_eq!(batch.summary.card_names, vec!["CARD NAME ONE".to_string()]);
        assert!(batch.summary.parsed.is_empty());
    }

    #[test]
    fn test_state_follows_sections_and_cards() {
        let mut normalizer = Normalizer::new(false);
        normalizer.feed_line("PRIMARY CARD");
        normalizer.feed_line("International Transactions");
        assert_eq!(normalizer.state().card_name, "PRIMARY CARD");
        assert_eq!(
            normalizer.state().transaction_type,
            TransactionType::International
        );
        assert!(normalizer.state().column_mapping.is_none());

        normalizer.feed_line("Date,Details,Amount");
        assert!(normalizer.state().column_mapping.is_some());

        let rec = normalizer
            .feed_line("13-02-2024,HOTEL PARIS EUR,300.00")
            .cloned()
            .unwrap();
        assert_eq!(rec.currency, "EUR");
        assert_eq!(rec.location, "Paris");
        assert_eq!(rec.card_name, "PRIMARY CARD");
    }

    #[test]
    fn test_multi_card_statement_is_sorted() {
        let input = "\
CARD A
Domestic Transaction
Date,Transaction Details,Amount
15-03-2024,GROCERY PUNE,500.00
02-01-2024,BOOKS DELHI,200.00 cr

CARD B
Date,Transaction Details,Amount
International Transaction
20-02-2024,HOTEL LONDON GBP,100.00
";
        let batch = normalize(input, false);
        let lines: Vec<String> = batch.records.iter().map(|r| r.to_line()).collect();
        assert_eq!(
            lines,
            vec![
                "01/02/2024,BOOKS DELHI,0.00,200.00,INR,CARD A,Domestic,Delhi",
                "20/02/2024,HOTEL LONDON,100.00,0.00,GBP,CARD B,International,London",
                "15/03/2024,GROCERY PUNE,500.00,0.00,INR,CARD A,Domestic,Pune",
            ]
        );
        assert_eq!(batch.summary.headers_seen, 2);
    }

    #[test]
    fn test_mapping_survives_repeated_header() {
        let input = "\
Date,Debit,Credit,Description
01-15-2024,100,,RENT CHENNAI
Date,Debit,Credit,Description
01-16-2024,,50,CASHBACK
";
        let batch = normalize(input, false);
        assert_eq!(batch.records.len(), 2);
        assert_eq!(batch.records[1].credit, "50.00");
        assert_eq!(batch.records[1].location, "Cashback");
    }

    #[test]
    fn test_no_header_means_no_records() {
        let batch = normalize("01-01-23,COFFEE,150.00\n02-01-23,TEA,20.00\n", false);
        assert!(batch.records.is_empty());
        assert_eq!(batch.summary.headers_seen, 0);
    }

    #[test]
    fn test_invalid_dates_are_rejected_individually() {
        let input = "\
Date,Transaction Details,Amount
30-02-2024,BAD DATE,10.00,31-01-2024
31-01-2024,GOOD DATE,10.00
";
        let batch = normalize(input, false);
        assert_eq!(batch.records.len(), 1);
        assert_eq!(batch.records[0].description, "GOOD DATE");
        assert_eq!(batch.summary.records_rejected, 1);
    }

    #[test]
    fn test_debug_collects_parsed_lines_in_input_order() {
        let input = "\
Date,Transaction Details,Amount
15-03-2024,LATER,1
14-03-2024,EARLIER,1
";
        let batch = normalize(input, true);
        assert_eq!(batch.summary.parsed.len(), 2);
        assert!(batch.summary.parsed[0].contains("LATER"));
        assert_eq!(batch.records[0].description, "EARLIER");
    }

    #[test]
    fn test_crlf_input() {
        let batch = normalize(&SINGLE_CARD.replace('\n', "\r\n"), false);
        assert_eq!(batch.records.len(), 1);
        assert_eq!(batch.records[0].card_name, "CARD NAME ONE");
    }
}
