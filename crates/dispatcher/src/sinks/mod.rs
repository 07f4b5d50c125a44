//! Report sink implementations

mod csv;
mod json;
mod log;

pub use csv::CsvReportSink;
pub use json::JsonReportSink;
pub use log::LogReportSink;
