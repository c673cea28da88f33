//! Pipe-delimited sales record format
//!
//! This module turns raw data lines into [`Transaction`] records:
//! - `parse_line` converts a single `|`-delimited line
//! - `parse_transactions` converts a batch, skipping lines it cannot use
//!
//! All functions are pure (no I/O) for easy testing.
//!
//! # Record Layout
//!
//! ```text
//! TransactionID|Date|ProductID|ProductName|Quantity|UnitPrice|CustomerID|Region
//! T001|2024-12-01|P101|Laptop|2|45,000|C001|North
//! ```
//!
//! Thousands separators leak into the numeric columns and product names of
//! upstream exports; commas are stripped from those fields before use.

use crate::types::{AnalyticsError, Transaction};
use rust_decimal::Decimal;
use std::str::FromStr;
use tracing::{debug, warn};

/// Largest accepted absolute quantity
pub const MAX_QUANTITY: i64 = 1_000_000_000;

/// Largest accepted absolute unit price, in whole currency units
pub const MAX_UNIT_PRICE: i64 = 1_000_000_000_000;

/// Field separator of the sales log
pub const FIELD_DELIMITER: char = '|';

/// Number of fields in a well-formed record
pub const FIELD_COUNT: usize = 8;

/// Result of parsing a batch of data lines
#[derive(Debug, Default)]
pub struct ParseOutcome {
    /// Successfully parsed records, in input order
    pub transactions: Vec<Transaction>,

    /// Lines dropped because they did not have exactly 8 fields
    pub skipped_field_count: usize,

    /// Lines dropped because a numeric field could not be parsed
    pub malformed: Vec<AnalyticsError>,
}

/// Parse a single data line
///
/// # Arguments
///
/// * `line` - One data line, header and blank lines already removed
/// * `line_number` - Position used in error messages (if known)
///
/// # Returns
///
/// * `Ok(Some(Transaction))` - Successfully parsed record
/// * `Ok(None)` - The line does not have exactly 8 fields and is skipped
/// * `Err(AnalyticsError::ParseError)` - Quantity or unit price is not numeric
pub fn parse_line(line: &str, line_number: Option<u64>) -> Result<Option<Transaction>, AnalyticsError> {
    let fields: Vec<&str> = line.split(FIELD_DELIMITER).collect();
    if fields.len() != FIELD_COUNT {
        return Ok(None);
    }

    let product_name = fields[3].replace(',', "");
    let quantity = parse_quantity(fields[4], line_number)?;
    let unit_price = parse_unit_price(fields[5], line_number)?;

    let transaction = Transaction::new(
        fields[0],
        fields[1],
        fields[2],
        product_name,
        quantity,
        unit_price,
        fields[6],
        fields[7],
    )
    .map_err(|e| match e {
        AnalyticsError::ParseError { message, .. } => {
            AnalyticsError::parse_error(line_number, message)
        }
        other => other,
    })?;

    Ok(Some(transaction))
}

fn parse_quantity(raw: &str, line_number: Option<u64>) -> Result<i64, AnalyticsError> {
    let cleaned = raw.replace(',', "");
    let quantity = cleaned
        .trim()
        .parse::<i64>()
        .map_err(|_| AnalyticsError::parse_error(line_number, format!("invalid quantity '{}'", raw)))?;

    if quantity.unsigned_abs() > MAX_QUANTITY.unsigned_abs() {
        return Err(AnalyticsError::parse_error(
            line_number,
            format!("quantity '{}' out of range", raw),
        ));
    }

    Ok(quantity)
}

fn parse_unit_price(raw: &str, line_number: Option<u64>) -> Result<Decimal, AnalyticsError> {
    let cleaned = raw.replace(',', "");
    let unit_price = Decimal::from_str(cleaned.trim())
        .map_err(|_| AnalyticsError::parse_error(line_number, format!("invalid unit price '{}'", raw)))?;

    if unit_price.abs() > Decimal::from(MAX_UNIT_PRICE) {
        return Err(AnalyticsError::parse_error(
            line_number,
            format!("unit price '{}' out of range", raw),
        ));
    }

    Ok(unit_price)
}

/// Parse a batch of data lines
///
/// Lines with the wrong number of fields are skipped silently. Lines with a
/// malformed quantity or unit price are skipped as well; their errors are
/// collected in [`ParseOutcome::malformed`] and logged. Neither case aborts
/// the batch.
///
/// Line numbers in errors count from 1 over the supplied lines.
pub fn parse_transactions<S: AsRef<str>>(lines: &[S]) -> ParseOutcome {
    let mut outcome = ParseOutcome::default();

    for (index, line) in lines.iter().enumerate() {
        let line_number = index as u64 + 1;
        match parse_line(line.as_ref(), Some(line_number)) {
            Ok(Some(transaction)) => outcome.transactions.push(transaction),
            Ok(None) => {
                debug!(line = line_number, "skipping record with wrong field count");
                outcome.skipped_field_count += 1;
            }
            Err(e) => {
                warn!("Skipping malformed record: {}", e);
                outcome.malformed.push(e);
            }
        }
    }

    outcome
}
