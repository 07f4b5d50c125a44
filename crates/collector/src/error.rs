//! Collector error types

use thiserror::Error;

/// Collector errors
#[derive(Debug, Error)]
pub enum CollectorError {
    /// TCP connection to a sensor service failed
    #[error("failed to connect to service '{service}': {message}")]
    ConnectionFailed { service: String, message: String },

    /// Service is not connected
    #[error("service '{service}' is not connected")]
    NotConnected { service: String },

    /// Service response was not valid protocol JSON
    #[error("protocol error from service '{service}': {message}")]
    Protocol { service: String, message: String },

    /// Request timed out
    #[error("service '{service}' timed out after {waited_ms}ms")]
    Timeout { service: String, waited_ms: u64 },

    /// Connection closed by the service
    #[error("service '{service}' closed the connection")]
    ConnectionClosed { service: String },

    /// IO error
    #[error("io error talking to service '{service}': {source}")]
    Io {
        service: String,
        #[source]
        source: std::io::Error,
    },
}

impl CollectorError {
    pub fn protocol(service: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Protocol {
            service: service.into(),
            message: message.into(),
        }
    }

    pub fn io(service: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            service: service.into(),
            source,
        }
    }
}

/// Collector Result type alias
pub type Result<T> = std::result::Result<T, CollectorError>;
