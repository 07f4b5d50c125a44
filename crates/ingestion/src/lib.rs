//! # Ingestion
//!
//! Raw record decoding module.
//!
//! Responsibilities:
//! - Decode firmware timestamps ("YYYY-MM-DD HH:MM:SS.mmm", UTC) to
//!   fractional epoch seconds, falling back to the capture time on failure
//! - Classify every sample vector once, at ingestion, as a measurement or a
//!   sync marker (stream-specific sentinel + scale factor)
//! - Emit typed `Packet` values for the drift engine
//!
//! ## Usage Example
//!
//! ```
//! use contracts::{CapturedRecord, RawRecord, RawTimestamp, StreamConfig, StreamId};
//! use ingestion::StreamDecoder;
//!
//! let config = StreamConfig {
//!     label: "ecg".to_string(),
//!     sampling_rate_hz: 400.0,
//!     magic_sentinel: -99999,
//!     scale_factor: 1,
//! };
//! let decoder = StreamDecoder::new(StreamId::B, config);
//!
//! let records = vec![CapturedRecord::new(
//!     1_761_551_727.6,
//!     RawRecord {
//!         timestamp: Some(RawTimestamp::Text("2025-10-27 07:55:27.594".to_string())),
//!         data: vec![vec![12, -3, 7], vec![-99999, 42, 0]],
//!     },
//! )];
//!
//! let packets = decoder.decode_batch(&records);
//! assert_eq!(packets[0].marker_count(), 1);
//! ```

mod decoder;
mod error;
mod timestamp;

// Re-exports
pub use contracts::{CapturedRecord, Packet, RawRecord, RawTimestamp, Sample, TimeSource};
pub use decoder::StreamDecoder;
pub use error::{IngestionError, Result};
pub use timestamp::{format_timestamp, parse_timestamp};
