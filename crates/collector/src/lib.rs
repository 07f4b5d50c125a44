//! # Collector
//!
//! Transport module: fetches raw records from the two sensor services.
//!
//! Responsibilities:
//! - Speak the newline-delimited JSON command protocol of the sensor
//!   services (`{"type": "get_data"}` requests)
//! - Drain stale device buffers before a run
//! - Poll both services on a fixed cadence for the configured duration,
//!   stamping every record with a local capture time
//!
//! The collector hands the engine finished, acquisition-ordered record lists
//! per stream; all async/blocking work of the system lives here and in the
//! sinks.
//!
//! ## Usage Example
//!
//! ```ignore
//! use collector::{StreamCollector, TcpSensorService};
//!
//! let mut service_a = TcpSensorService::new("icg", &config.host, config.port_a, timeout);
//! let mut service_b = TcpSensorService::new("ecg", &config.host, config.port_b, timeout);
//! service_a.connect().await?;
//! service_b.connect().await?;
//!
//! let collector = StreamCollector::new(config);
//! let (records_a, records_b) = collector.collect(&mut service_a, &mut service_b).await?;
//! ```

mod client;
mod error;
mod mock_client;
mod poller;
mod tcp_client;

// Re-exports
pub use client::SensorService;
pub use contracts::{CapturedRecord, CollectorConfig, RawRecord, RawTimestamp};
pub use error::{CollectorError, Result};
pub use mock_client::{MockSensorService, MockServiceConfig};
pub use poller::{unix_now, StreamCollector};
pub use tcp_client::TcpSensorService;
