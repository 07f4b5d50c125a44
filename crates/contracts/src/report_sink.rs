//! ReportSink trait - Dispatcher output interface
//!
//! Defines the abstract interface for report sinks. Sinks are stateless
//! writer collaborators: the engine hands them a finished, immutable
//! `DriftReport` and they persist or surface it.

use crate::{ContractError, DriftReport};

/// Report output trait
///
/// All sink implementations must implement this trait.
#[trait_variant::make(ReportSink: Send)]
pub trait LocalReportSink {
    /// Sink name (used for logging/metrics)
    fn name(&self) -> &str;

    /// Write the drift report
    ///
    /// # Errors
    /// Returns write error (should include context)
    async fn write(&mut self, report: &DriftReport) -> Result<(), ContractError>;

    /// Flush buffer (if any)
    async fn flush(&mut self) -> Result<(), ContractError>;

    /// Close sink
    async fn close(&mut self) -> Result<(), ContractError>;
}
