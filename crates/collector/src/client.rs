//! Sensor service abstraction
//!
//! Defines the trait for talking to one sensor service, supporting the real
//! TCP implementation and mock testing.

use std::future::Future;

use contracts::RawRecord;

use crate::error::Result;

/// Sensor service client trait
///
/// Abstracts one device service endpoint so the polling loop works
/// identically against real TCP services and mocks.
pub trait SensorService: Send {
    /// Human-readable service label (used in logs and errors)
    fn label(&self) -> &str;

    /// Establish the connection
    fn connect(&mut self) -> impl Future<Output = Result<()>> + Send;

    /// Request one batch of buffered data from the service.
    ///
    /// Issues a `get_data` command. Returns `Ok(None)` when the service
    /// answered but had no data ready; that is a normal idle cycle, not an
    /// error.
    fn fetch_records(&mut self) -> impl Future<Output = Result<Option<RawRecord>>> + Send;

    /// Close the connection
    ///
    /// Idempotent: closing an unconnected service returns Ok.
    fn close(&mut self) -> impl Future<Output = Result<()>> + Send;
}
