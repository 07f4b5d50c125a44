//! TCP sensor service client
//!
//! Newline-delimited JSON over TCP: one JSON command per line out, one JSON
//! document per line back.

use std::time::Duration;

use contracts::RawRecord;
use serde_json::{json, Value};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpStream;
use tokio::time::timeout;
use tracing::{debug, instrument};

use crate::client::SensorService;
use crate::error::{CollectorError, Result};

/// TCP client for one sensor service
pub struct TcpSensorService {
    label: String,
    host: String,
    port: u16,
    request_timeout: Duration,
    connection: Option<BufReader<TcpStream>>,
}

impl TcpSensorService {
    /// Create an unconnected client
    pub fn new(
        label: impl Into<String>,
        host: impl Into<String>,
        port: u16,
        request_timeout: Duration,
    ) -> Self {
        Self {
            label: label.into(),
            host: host.into(),
            port,
            request_timeout,
            connection: None,
        }
    }

    /// Send an arbitrary JSON command and read the JSON response line.
    ///
    /// Used internally for `get_data`; exposed for callers that need to push
    /// device settings through the same connection.
    pub async fn send_command(&mut self, command: &Value) -> Result<Value> {
        let waited_ms = self.request_timeout.as_millis() as u64;
        let label = self.label.clone();

        let connection = self
            .connection
            .as_mut()
            .ok_or_else(|| CollectorError::NotConnected {
                service: label.clone(),
            })?;

        let mut line = serde_json::to_string(command)
            .map_err(|e| CollectorError::protocol(&label, e.to_string()))?;
        line.push('\n');

        let exchange = async {
            connection
                .get_mut()
                .write_all(line.as_bytes())
                .await
                .map_err(|e| CollectorError::io(&label, e))?;

            let mut response = String::new();
            let read = connection
                .read_line(&mut response)
                .await
                .map_err(|e| CollectorError::io(&label, e))?;
            if read == 0 {
                return Err(CollectorError::ConnectionClosed {
                    service: label.clone(),
                });
            }

            serde_json::from_str(response.trim())
                .map_err(|e| CollectorError::protocol(&label, e.to_string()))
        };

        timeout(self.request_timeout, exchange)
            .await
            .map_err(|_| CollectorError::Timeout {
                service: self.label.clone(),
                waited_ms,
            })?
    }
}

impl SensorService for TcpSensorService {
    fn label(&self) -> &str {
        &self.label
    }

    #[instrument(name = "tcp_service_connect", skip(self), fields(service = %self.label, host = %self.host, port = self.port))]
    async fn connect(&mut self) -> Result<()> {
        let stream = timeout(
            self.request_timeout,
            TcpStream::connect((self.host.as_str(), self.port)),
        )
        .await
        .map_err(|_| CollectorError::Timeout {
            service: self.label.clone(),
            waited_ms: self.request_timeout.as_millis() as u64,
        })?
        .map_err(|e| CollectorError::ConnectionFailed {
            service: self.label.clone(),
            message: e.to_string(),
        })?;

        debug!(service = %self.label, "connected");
        self.connection = Some(BufReader::new(stream));
        Ok(())
    }

    #[instrument(name = "tcp_service_fetch", level = "trace", skip(self), fields(service = %self.label))]
    async fn fetch_records(&mut self) -> Result<Option<RawRecord>> {
        let response = self.send_command(&json!({"type": "get_data"})).await?;

        // A response without a "data" field means the device buffer was
        // empty this cycle
        if response.get("data").is_none() {
            return Ok(None);
        }

        let record: RawRecord = serde_json::from_value(response)
            .map_err(|e| CollectorError::protocol(&self.label, e.to_string()))?;

        metrics::counter!(
            "collector_records_fetched_total",
            "service" => self.label.clone()
        )
        .increment(1);

        Ok(Some(record))
    }

    #[instrument(name = "tcp_service_close", skip(self), fields(service = %self.label))]
    async fn close(&mut self) -> Result<()> {
        if let Some(mut connection) = self.connection.take() {
            // Best effort; the peer may already be gone
            let _ = connection.get_mut().shutdown().await;
            debug!(service = %self.label, "connection closed");
        }
        Ok(())
    }
}
