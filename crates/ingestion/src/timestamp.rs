//! Firmware timestamp codec
//!
//! The firmware stamps every data response with a UTC wall-clock string of
//! the fixed shape "YYYY-MM-DD HH:MM:SS.mmm" (gmtime on the device side).
//! Decoding and encoding round-trip to millisecond precision.

use chrono::{DateTime, NaiveDateTime, Utc};

use crate::error::{IngestionError, Result};

/// Fixed firmware timestamp shape; `%.3f` requires exactly three
/// millisecond digits.
const FIRMWARE_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

/// Parse a firmware timestamp string into fractional epoch seconds.
///
/// # Errors
/// `TimestampFormat` when the string does not match the expected pattern or
/// the millisecond field is not exactly 3 digits. Callers treat this as a
/// soft failure: log a warning and fall back to the capture time, never
/// abort the batch.
pub fn parse_timestamp(input: &str) -> Result<f64> {
    let naive = NaiveDateTime::parse_from_str(input, FIRMWARE_TIMESTAMP_FORMAT).map_err(|e| {
        IngestionError::TimestampFormat {
            input: input.to_string(),
            message: e.to_string(),
        }
    })?;

    Ok(naive.and_utc().timestamp_millis() as f64 / 1000.0)
}

/// Encode fractional epoch seconds back into the firmware timestamp shape.
///
/// Rounds to the nearest millisecond, so `format_timestamp(parse_timestamp(s))`
/// reproduces `s` exactly.
pub fn format_timestamp(seconds: f64) -> Result<String> {
    let millis = (seconds * 1000.0).round() as i64;
    let datetime: DateTime<Utc> = DateTime::from_timestamp_millis(millis)
        .ok_or(IngestionError::TimestampRange { seconds })?;

    Ok(datetime.format(FIRMWARE_TIMESTAMP_FORMAT).to_string())
}
