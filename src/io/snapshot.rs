//! Enriched snapshot output
//!
//! Persists enriched transactions as a pipe-delimited text file with a fixed
//! 12-column header. Values are written unquoted; absent catalog fields are
//! written as empty strings and the match flag as `true`/`false`.

use crate::types::{AnalyticsError, EnrichedTransaction};
use csv::{QuoteStyle, WriterBuilder};
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;
use tracing::info;

/// Header row of the snapshot file
pub const SNAPSHOT_HEADER: [&str; 12] = [
    "TransactionID",
    "Date",
    "ProductID",
    "ProductName",
    "Quantity",
    "UnitPrice",
    "CustomerID",
    "Region",
    "API_Category",
    "API_Brand",
    "API_Rating",
    "API_Match",
];

/// Default location of the snapshot file
pub const DEFAULT_SNAPSHOT_PATH: &str = "data/enriched_sales_data.txt";

/// Serialize one enriched record into its 12 column values
pub fn snapshot_row(record: &EnrichedTransaction) -> [String; 12] {
    let tx = &record.transaction;
    [
        tx.transaction_id().to_string(),
        tx.date().to_string(),
        tx.product_id().to_string(),
        tx.product_name().to_string(),
        tx.quantity().to_string(),
        tx.unit_price().to_string(),
        tx.customer_id().to_string(),
        tx.region().to_string(),
        record.category().unwrap_or_default().to_string(),
        record.brand().unwrap_or_default().to_string(),
        record.rating().map(|r| r.to_string()).unwrap_or_default(),
        record.is_match().to_string(),
    ]
}

/// Write the snapshot (header plus one row per record) to `output`
///
/// # Errors
///
/// Returns `IoError` if the output cannot be written or flushed.
pub fn write_enriched_snapshot(
    records: &[EnrichedTransaction],
    output: &mut dyn Write,
) -> Result<(), AnalyticsError> {
    let mut writer = WriterBuilder::new()
        .delimiter(b'|')
        .quote_style(QuoteStyle::Never)
        .from_writer(output);

    writer.write_record(SNAPSHOT_HEADER)?;
    for record in records {
        writer.write_record(snapshot_row(record))?;
    }
    writer.flush()?;

    Ok(())
}

/// Write the snapshot to `path`, creating parent directories as needed
pub fn save_enriched_snapshot(
    records: &[EnrichedTransaction],
    path: &Path,
) -> Result<(), AnalyticsError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let mut file = File::create(path)?;
    write_enriched_snapshot(records, &mut file)?;
    info!(path = %path.display(), records = records.len(), "saved enriched snapshot");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::line_format::parse_line;
    use crate::types::transaction::fixtures::tx;
    use crate::types::{CatalogEntry, CatalogMatch};
    use tempfile::TempDir;

    fn matched(record: crate::types::Transaction) -> EnrichedTransaction {
        EnrichedTransaction::new(
            record,
            CatalogMatch::Matched(CatalogEntry {
                title: "iPhone 9".to_string(),
                category: "smartphones".to_string(),
                brand: "Apple".to_string(),
                rating: 4.69,
            }),
        )
    }

    fn sample() -> Vec<EnrichedTransaction> {
        vec![
            matched(tx("T1", "2024-01-01", "P1", "Phone", 2, "549.00", "C1", "North")),
            EnrichedTransaction::new(
                tx("T2", "2024-01-02", "P999", "Cable", 3, "2.50", "C2", "South"),
                CatalogMatch::Unmatched,
            ),
        ]
    }

    #[test]
    fn test_snapshot_layout() {
        let mut output = Vec::new();
        write_enriched_snapshot(&sample(), &mut output).unwrap();
        let text = String::from_utf8(output).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(
            lines[0],
            "TransactionID|Date|ProductID|ProductName|Quantity|UnitPrice|CustomerID|Region|API_Category|API_Brand|API_Rating|API_Match"
        );
        assert_eq!(
            lines[1],
            "T1|2024-01-01|P1|Phone|2|549.00|C1|North|smartphones|Apple|4.69|true"
        );
        assert_eq!(lines[2], "T2|2024-01-02|P999|Cable|3|2.50|C2|South||||false");
    }

    #[test]
    fn test_snapshot_empty_has_header_only() {
        let mut output = Vec::new();
        write_enriched_snapshot(&[], &mut output).unwrap();
        let text = String::from_utf8(output).unwrap();
        assert_eq!(text.lines().count(), 1);
    }

    #[test]
    fn test_snapshot_round_trips_transaction_columns() {
        let records = sample();
        let mut output = Vec::new();
        write_enriched_snapshot(&records, &mut output).unwrap();
        let text = String::from_utf8(output).unwrap();

        let reparsed: Vec<_> = text
            .lines()
            .skip(1)
            .map(|line| {
                let columns: Vec<&str> = line.split('|').take(8).collect();
                parse_line(&columns.join("|"), None).unwrap().unwrap()
            })
            .collect();

        let originals: Vec<_> = records.into_iter().map(|r| r.transaction).collect();
        assert_eq!(reparsed, originals);
    }

    #[test]
    fn test_save_creates_parent_directories() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("enriched_sales_data.txt");

        save_enriched_snapshot(&sample(), &path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("TransactionID|"));
        assert_eq!(text.lines().count(), 3);
    }
}
