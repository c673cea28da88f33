//! Sales log reader with encoding fallback
//!
//! Reads the whole input file in one scoped operation, decodes it with the
//! first supported encoding that succeeds, and prepares the data lines for
//! the parser.
//!
//! # Encoding Fallback
//!
//! Encodings are tried in order: UTF-8, Latin-1, Windows-1252. UTF-8 decoding
//! is strict. Latin-1 maps every byte to the code point of the same value, so
//! in practice it accepts any input that is not valid UTF-8; Windows-1252 is
//! kept as the final fallback.
//!
//! # Line Preparation
//!
//! - The first line is a header and is always discarded
//! - Every remaining line is trimmed of surrounding whitespace
//! - Lines that are blank after trimming are removed

use crate::types::AnalyticsError;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use tracing::{debug, info};

/// Text encodings attempted when decoding the sales log
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextEncoding {
    Utf8,
    Latin1,
    Windows1252,
}

impl TextEncoding {
    /// Fallback order used by [`read_sales_data`]
    pub const FALLBACK_ORDER: [TextEncoding; 3] = [
        TextEncoding::Utf8,
        TextEncoding::Latin1,
        TextEncoding::Windows1252,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            TextEncoding::Utf8 => "utf-8",
            TextEncoding::Latin1 => "latin-1",
            TextEncoding::Windows1252 => "cp1252",
        }
    }

    /// Decode `bytes`, returning `None` if they are not valid in this encoding
    pub fn decode(&self, bytes: &[u8]) -> Option<String> {
        match self {
            TextEncoding::Utf8 => std::str::from_utf8(bytes).ok().map(str::to_owned),
            TextEncoding::Latin1 => Some(bytes.iter().map(|&b| char::from(b)).collect()),
            TextEncoding::Windows1252 => encoding_rs::WINDOWS_1252
                .decode_without_bom_handling_and_without_replacement(bytes)
                .map(|text| text.into_owned()),
        }
    }
}

/// Decode raw bytes with the first encoding in `encodings` that succeeds
///
/// # Returns
///
/// * `Some((text, encoding))` - Decoded text and the encoding that produced it
/// * `None` - No encoding could decode the input
pub fn decode_with_fallback(
    bytes: &[u8],
    encodings: &[TextEncoding],
) -> Option<(String, TextEncoding)> {
    encodings.iter().find_map(|encoding| {
        let decoded = encoding.decode(bytes);
        if decoded.is_none() {
            debug!(encoding = encoding.label(), "decode failed, trying next encoding");
        }
        decoded.map(|text| (text, *encoding))
    })
}

/// Drop the header line and blank lines, trimming what remains
pub fn prepare_lines(text: &str) -> Vec<String> {
    text.lines()
        .skip(1)
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_owned)
        .collect()
}

/// Read the sales log at `path` and return its data lines
///
/// # Arguments
///
/// * `path` - Path to the pipe-delimited sales log
///
/// # Returns
///
/// * `Ok(Vec<String>)` - Trimmed, non-blank data lines (header removed)
/// * `Err(AnalyticsError::FileNotFound)` - The file does not exist
/// * `Err(AnalyticsError::IoError)` - The file could not be read
/// * `Err(AnalyticsError::EncodingError)` - No supported encoding could decode it
pub fn read_sales_data(path: &Path) -> Result<Vec<String>, AnalyticsError> {
    let bytes = fs::read(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => AnalyticsError::file_not_found(&path.display().to_string()),
        _ => AnalyticsError::from(e),
    })?;

    let (text, encoding) = decode_with_fallback(&bytes, &TextEncoding::FALLBACK_ORDER)
        .ok_or_else(|| AnalyticsError::EncodingError {
            path: path.display().to_string(),
            tried: TextEncoding::FALLBACK_ORDER
                .iter()
                .map(TextEncoding::label)
                .collect::<Vec<_>>()
                .join(", "),
        })?;

    let lines = prepare_lines(&text);
    info!(
        path = %path.display(),
        encoding = encoding.label(),
        lines = lines.len(),
        "read sales data"
    );

    Ok(lines)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    /// Helper function to create a temporary sales file for testing
    fn create_temp_file(content: &[u8]) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("Failed to create temp file");
        file.write_all(content).expect("Failed to write to temp file");
        file.flush().expect("Failed to flush temp file");
        file
    }

    #[test]
    fn test_prepare_lines_drops_header_and_blanks() {
        let text = "TransactionID|Date\n\nT1|a\n   \n  T2|b  \r\n";
        assert_eq!(prepare_lines(text), vec!["T1|a", "T2|b"]);
    }

    #[test]
    fn test_prepare_lines_header_only() {
        assert!(prepare_lines("TransactionID|Date|ProductID\n").is_empty());
        assert!(prepare_lines("").is_empty());
    }

    #[test]
    fn test_decode_prefers_utf8() {
        let (text, encoding) =
            decode_with_fallback("Café".as_bytes(), &TextEncoding::FALLBACK_ORDER).unwrap();
        assert_eq!(text, "Café");
        assert_eq!(encoding, TextEncoding::Utf8);
    }

    #[test]
    fn test_decode_falls_back_to_latin1() {
        // 0xE9 is 'é' in Latin-1 and an invalid lone byte in UTF-8
        let bytes = [b'C', b'a', b'f', 0xE9];
        let (text, encoding) = decode_with_fallback(&bytes, &TextEncoding::FALLBACK_ORDER).unwrap();
        assert_eq!(text, "Café");
        assert_eq!(encoding, TextEncoding::Latin1);
    }

    #[test]
    fn test_windows_1252_decodes_smart_quotes() {
        let decoded = TextEncoding::Windows1252.decode(&[0x93, b'x', 0x94]).unwrap();
        assert_eq!(decoded, "\u{201C}x\u{201D}");
    }

    #[test]
    fn test_decode_with_only_utf8_can_fail() {
        assert!(decode_with_fallback(&[0xFF, 0xFE, 0xFD], &[TextEncoding::Utf8]).is_none());
    }

    #[test]
    fn test_read_sales_data_reads_lines() {
        let file = create_temp_file(
            b"TransactionID|Date|ProductID|ProductName|Quantity|UnitPrice|CustomerID|Region\n\
              T1|2024-01-01|P10|Widget|5|2.50|C1|North\n\
              \n\
              T2|2024-01-01|P20|Gadget|0|10.00|C2|South\n",
        );

        let lines = read_sales_data(file.path()).unwrap();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("T1|"));
        assert!(lines[1].starts_with("T2|"));
    }

    #[test]
    fn test_read_sales_data_latin1_file() {
        let mut content = b"header\nT1|2024-01-01|P10|Caf".to_vec();
        content.push(0xE9);
        content.extend_from_slice(b"|1|1.00|C1|North\n");
        let file = create_temp_file(&content);

        let lines = read_sales_data(file.path()).unwrap();
        assert_eq!(lines, vec!["T1|2024-01-01|P10|Café|1|1.00|C1|North"]);
    }

    #[test]
    fn test_read_sales_data_missing_file() {
        let result = read_sales_data(Path::new("definitely/not/here/sales.txt"));
        assert!(matches!(result, Err(AnalyticsError::FileNotFound { .. })));
    }
}
