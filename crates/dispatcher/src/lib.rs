//! # Dispatcher
//!
//! Report output module.
//!
//! Responsibilities:
//! - Consume a finished `DriftReport`
//! - Fan it out to the configured sinks (CSV / JSON / log)
//! - Keep writers stateless: each sink receives an immutable report value
//!   and owns no analysis state

pub mod dispatcher;
pub mod error;
pub mod sinks;

pub use contracts::{DriftReport, ReportSink};
pub use dispatcher::ReportDispatcher;
pub use error::DispatcherError;
pub use sinks::{CsvReportSink, JsonReportSink, LogReportSink};
