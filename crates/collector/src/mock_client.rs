//! Mock sensor service
//!
//! Deterministic synthetic stream generator for unit tests and demos.
//! Supports failure-scenario injection (connect failures, empty warmup
//! cycles) and a configurable per-stream clock offset so drift between two
//! mocks is exact and known.

use contracts::{RawRecord, RawTimestamp};

use crate::client::SensorService;
use crate::error::{CollectorError, Result};

/// Mock service configuration
#[derive(Debug, Clone)]
pub struct MockServiceConfig {
    /// Service label
    pub label: String,

    /// Sampling rate of the synthetic stream (Hz)
    pub sampling_rate_hz: f64,

    /// Marker sentinel to emit
    pub magic_sentinel: i64,

    /// Scale factor applied to emitted sequence numbers
    pub scale_factor: i64,

    /// Sample vector arity (3 for ECG-style, 5 for ICG-style)
    pub vector_arity: usize,

    /// Samples delivered per fetch
    pub samples_per_fetch: usize,

    /// Marker emission interval (seconds of stream time)
    pub marker_interval_s: f64,

    /// Epoch time of the first sample
    pub start_time: f64,

    /// Constant offset of this device's clock against true stream time.
    /// Two mocks with different offsets show exactly that drift.
    pub clock_offset_s: f64,

    /// Number of initial fetches answered with "no data" (device warmup)
    pub empty_fetches: u32,

    /// Whether connect() should fail
    pub fail_connect: bool,
}

impl Default for MockServiceConfig {
    fn default() -> Self {
        Self {
            label: "mock".to_string(),
            sampling_rate_hz: 400.0,
            magic_sentinel: -99_999,
            scale_factor: 1,
            vector_arity: 3,
            samples_per_fetch: 80,
            marker_interval_s: 1.0,
            start_time: 1_761_551_727.0,
            clock_offset_s: 0.0,
            empty_fetches: 0,
            fail_connect: false,
        }
    }
}

/// Mock sensor service
pub struct MockSensorService {
    config: MockServiceConfig,
    connected: bool,
    /// Global index of the next sample to emit
    sample_cursor: u64,
    /// Total fetches served (including empty warmup cycles)
    fetch_count: u64,
}

impl MockSensorService {
    /// Create a mock service from configuration
    pub fn new(config: MockServiceConfig) -> Self {
        Self {
            config,
            connected: false,
            sample_cursor: 0,
            fetch_count: 0,
        }
    }

    /// Samples between consecutive markers (markers replace a sample slot)
    fn marker_period(&self) -> u64 {
        (self.config.sampling_rate_hz * self.config.marker_interval_s).round() as u64
    }

    fn build_sample(&self, index: u64) -> Vec<i64> {
        let period = self.marker_period();
        let mut vector = vec![0i64; self.config.vector_arity];

        if period > 0 && index % period == 0 {
            // Markers always carry the sequence field, whatever the arity
            vector.resize(self.config.vector_arity.max(2), 0);
            let sequence = index / period + 1;
            vector[0] = self.config.magic_sentinel;
            vector[1] = sequence as i64 * self.config.scale_factor;
        } else {
            // Deterministic pseudo-measurement derived from the index
            for (channel, slot) in vector.iter_mut().enumerate() {
                *slot = ((index as i64) % 1000) + channel as i64;
            }
        }

        vector
    }
}

impl SensorService for MockSensorService {
    fn label(&self) -> &str {
        &self.config.label
    }

    async fn connect(&mut self) -> Result<()> {
        if self.config.fail_connect {
            return Err(CollectorError::ConnectionFailed {
                service: self.config.label.clone(),
                message: "mock connect failure".to_string(),
            });
        }
        self.connected = true;
        Ok(())
    }

    async fn fetch_records(&mut self) -> Result<Option<RawRecord>> {
        if !self.connected {
            return Err(CollectorError::NotConnected {
                service: self.config.label.clone(),
            });
        }

        self.fetch_count += 1;
        if self.fetch_count <= self.config.empty_fetches as u64 {
            return Ok(None);
        }

        let first = self.sample_cursor;
        let count = self.config.samples_per_fetch as u64;
        self.sample_cursor += count;

        let data: Vec<Vec<i64>> = (first..first + count)
            .map(|index| self.build_sample(index))
            .collect();

        // Device clock = true time of the batch's last sample plus this
        // device's clock offset
        let last_sample_time =
            self.config.start_time + (first + count - 1) as f64 / self.config.sampling_rate_hz;
        let timestamp = last_sample_time + self.config.clock_offset_s;

        Ok(Some(RawRecord {
            timestamp: Some(RawTimestamp::Epoch(timestamp)),
            data,
        }))
    }

    async fn close(&mut self) -> Result<()> {
        self.connected = false;
        Ok(())
    }
}
