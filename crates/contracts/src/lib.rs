//! # Contracts
//!
//! Frozen interface contracts (ICD), defining inter-module data structures and traits.
//! All business crates can only depend on this crate, reverse dependencies are prohibited.
//!
//! ## Time Model
//! - Uses fractional Unix epoch seconds (f64, UTC) as primary clock
//! - Device timestamps arrive as `"YYYY-MM-DD HH:MM:SS.mmm"` strings and are
//!   decoded once at ingestion; a local capture time is substituted (and
//!   flagged) when the device timestamp is absent or malformed

mod blueprint;
mod error;
mod marker;
mod packet;
mod report;
mod report_sink;
mod stream_id;

pub use blueprint::*;
pub use error::*;
pub use marker::*;
pub use packet::*;
pub use report::*;
pub use report_sink::{LocalReportSink, ReportSink};
pub use stream_id::StreamId;
