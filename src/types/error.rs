//! Error types for the sales analytics pipeline
//!
//! This module defines all error types that can occur while reading, parsing,
//! enriching and reporting on sales data. Errors are designed to be descriptive
//! and user-friendly for CLI output.
//!
//! # Error Categories
//!
//! - **File I/O Errors**: File not found, permission denied, etc.
//! - **Encoding Errors**: Input could not be decoded with any supported encoding
//! - **Parsing Errors**: Malformed numeric fields in a sales record
//! - **Network Errors**: Catalog service unreachable or returned a non-2xx status
//! - **Data Errors**: Aggregations that are undefined over an empty data set

use thiserror::Error;

/// Main error type for the sales analytics pipeline
///
/// Most variants are recovered from inside the pipeline (skipped record,
/// empty catalog, "no data" exit). Only unexpected failures reach `main`.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AnalyticsError {
    /// File not found at the specified path
    ///
    /// The pipeline treats this as "no data" and halts gracefully.
    #[error("File not found: {path}")]
    FileNotFound {
        /// The path that was not found
        path: String,
    },

    /// I/O error occurred while reading or writing files
    #[error("I/O error: {message}")]
    IoError {
        /// Description of the I/O error
        message: String,
    },

    /// None of the supported encodings could decode the input file
    #[error("Unable to read file '{path}' with supported encodings ({tried})")]
    EncodingError {
        /// The path that could not be decoded
        path: String,
        /// Comma-separated list of the encodings that were attempted
        tried: String,
    },

    /// A sales record contained a malformed numeric field
    ///
    /// This is a recoverable error - the offending line is skipped
    /// and parsing continues with the next line.
    #[error("Parse error{}: {message}", line.map(|l| format!(" at line {}", l)).unwrap_or_default())]
    ParseError {
        /// Line number where the error occurred (if available)
        line: Option<u64>,
        /// Description of the parsing error
        message: String,
    },

    /// The product catalog could not be fetched
    ///
    /// Always recovered: enrichment proceeds against an empty catalog.
    #[error("Catalog request failed: {message}")]
    NetworkError {
        /// Description of the transport or status failure
        message: String,
    },

    /// An aggregation that has no defined result over zero transactions
    #[error("No transactions available for {operation}")]
    EmptyData {
        /// Operation that required data
        operation: String,
    },

    /// Command-line configuration is inconsistent
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        /// Description of the configuration problem
        message: String,
    },
}

impl From<std::io::Error> for AnalyticsError {
    fn from(error: std::io::Error) -> Self {
        AnalyticsError::IoError {
            message: error.to_string(),
        }
    }
}

impl From<csv::Error> for AnalyticsError {
    fn from(error: csv::Error) -> Self {
        // Writer errors that wrap I/O are not parse problems
        if error.is_io_error() {
            return AnalyticsError::IoError {
                message: error.to_string(),
            };
        }

        let line = error.position().map(|pos| pos.line());

        AnalyticsError::ParseError {
            line,
            message: error.to_string(),
        }
    }
}

impl From<reqwest::Error> for AnalyticsError {
    fn from(error: reqwest::Error) -> Self {
        AnalyticsError::NetworkError {
            message: error.to_string(),
        }
    }
}

impl AnalyticsError {
    /// Create a FileNotFound error
    pub fn file_not_found(path: &str) -> Self {
        AnalyticsError::FileNotFound {
            path: path.to_string(),
        }
    }

    /// Create a ParseError error
    pub fn parse_error(line: Option<u64>, message: impl Into<String>) -> Self {
        AnalyticsError::ParseError {
            line,
            message: message.into(),
        }
    }

    /// Create a NetworkError error
    pub fn network_error(message: impl Into<String>) -> Self {
        AnalyticsError::NetworkError {
            message: message.into(),
        }
    }

    /// Create an EmptyData error
    pub fn empty_data(operation: &str) -> Self {
        AnalyticsError::EmptyData {
            operation: operation.to_string(),
        }
    }

    /// Create an InvalidConfig error
    pub fn invalid_config(message: impl Into<String>) -> Self {
        AnalyticsError::InvalidConfig {
            message: message.into(),
        }
    }
}
