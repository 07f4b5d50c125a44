//! Ingestion error types

use thiserror::Error;

/// Ingestion errors
///
/// Both variants are recoverable by design: the decoder logs them and
/// continues with a fallback (capture time) or by dropping the sample.
#[derive(Debug, Error)]
pub enum IngestionError {
    /// Device timestamp string did not match "YYYY-MM-DD HH:MM:SS.mmm"
    #[error("invalid device timestamp '{input}': {message}")]
    TimestampFormat {
        /// Offending input string
        input: String,
        /// Parser message
        message: String,
    },

    /// Epoch value outside the representable datetime range
    #[error("timestamp {seconds} out of representable range")]
    TimestampRange {
        /// Offending epoch seconds
        seconds: f64,
    },
}

/// Ingestion Result type alias
pub type Result<T> = std::result::Result<T, IngestionError>;
