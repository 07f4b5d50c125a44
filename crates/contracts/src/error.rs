//! Layered error definitions
//!
//! Categorized by source: config / service / decode / analysis / sink

use thiserror::Error;

use crate::StreamId;

/// Unified error type
#[derive(Debug, Error)]
pub enum ContractError {
    // ===== Configuration Errors =====
    /// Configuration parse error
    #[error("config parse error: {message}")]
    ConfigParse {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Configuration validation error
    #[error("config validation error at '{field}': {message}")]
    ConfigValidation { field: String, message: String },

    // ===== Sensor Service Errors =====
    /// Service connection error
    #[error("service '{service}' connection error: {message}")]
    ServiceConnection { service: String, message: String },

    /// Service protocol error (bad JSON, unexpected shape)
    #[error("service '{service}' protocol error: {message}")]
    ServiceProtocol { service: String, message: String },

    /// Service request timed out
    #[error("service '{service}' timed out after {waited_ms}ms")]
    ServiceTimeout { service: String, waited_ms: u64 },

    // ===== Decode Errors =====
    /// Device timestamp string did not match "YYYY-MM-DD HH:MM:SS.mmm".
    /// Recoverable: callers substitute the capture time and continue.
    #[error("invalid device timestamp '{input}': {message}")]
    TimestampFormat { input: String, message: String },

    /// Sentinel matched but the vector is too short to carry a sequence
    /// number. Recoverable: the sample is dropped.
    #[error("malformed sync marker in stream {stream} (packet {packet_index}, position {position})")]
    MalformedMarker {
        stream: StreamId,
        packet_index: usize,
        position: usize,
    },

    // ===== Analysis Errors =====
    /// Marker sequence numbers went backwards or repeated within one stream.
    /// Indicates an upstream ordering bug; never repaired.
    #[error(
        "non-monotonic marker sequence in stream {stream}: {current} after {previous} \
         (packet {packet_index})"
    )]
    NonMonotonicSequence {
        stream: StreamId,
        previous: i64,
        current: i64,
        packet_index: usize,
    },

    // ===== Sink Errors =====
    /// Sink write error
    #[error("sink '{sink_name}' write error: {message}")]
    SinkWrite { sink_name: String, message: String },

    // ===== General Errors =====
    /// IO error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Other error
    #[error("{0}")]
    Other(String),
}

impl ContractError {
    /// Create configuration parse error
    pub fn config_parse(message: impl Into<String>) -> Self {
        Self::ConfigParse {
            message: message.into(),
            source: None,
        }
    }

    /// Create configuration validation error
    pub fn config_validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ConfigValidation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create service connection error
    pub fn service_connection(service: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ServiceConnection {
            service: service.into(),
            message: message.into(),
        }
    }

    /// Create service protocol error
    pub fn service_protocol(service: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ServiceProtocol {
            service: service.into(),
            message: message.into(),
        }
    }

    /// Create timestamp format error
    pub fn timestamp_format(input: impl Into<String>, message: impl Into<String>) -> Self {
        Self::TimestampFormat {
            input: input.into(),
            message: message.into(),
        }
    }

    /// Create sink write error
    pub fn sink_write(sink_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::SinkWrite {
            sink_name: sink_name.into(),
            message: message.into(),
        }
    }
}
