//! Polling loop over both sensor services.
//!
//! Mirrors the device protocol's expectations: drain stale buffers first,
//! then request data from both services on a fixed cadence until the
//! configured duration elapses. Every record is stamped with a local capture
//! time so ingestion can fall back when the device timestamp is unusable.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use contracts::{CapturedRecord, CollectorConfig};
use tokio::time::Instant;
use tracing::{debug, info, instrument, warn};

use crate::client::SensorService;
use crate::error::Result;

const PROGRESS_INTERVAL: Duration = Duration::from_secs(60);
const DRAIN_PAUSE: Duration = Duration::from_millis(100);

/// Current wall-clock time as fractional epoch seconds.
pub fn unix_now() -> f64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs_f64())
        .unwrap_or(0.0)
}

/// Fixed-cadence poller over a pair of sensor services
pub struct StreamCollector {
    config: CollectorConfig,
}

impl StreamCollector {
    /// Create a collector with the given polling configuration
    pub fn new(config: CollectorConfig) -> Self {
        Self { config }
    }

    /// Drain stale device buffers with throwaway requests.
    ///
    /// Devices keep serving data buffered before reconfiguration; a few
    /// discarded fetches flush it out.
    #[instrument(name = "collector_drain", skip_all, fields(requests = self.config.drain_requests))]
    pub async fn drain<A, B>(&self, service_a: &mut A, service_b: &mut B) -> Result<()>
    where
        A: SensorService,
        B: SensorService,
    {
        for _ in 0..self.config.drain_requests {
            let _ = service_a.fetch_records().await?;
            let _ = service_b.fetch_records().await?;
            tokio::time::sleep(DRAIN_PAUSE).await;
        }
        debug!("device buffers drained");
        Ok(())
    }

    /// Poll both services for the configured duration.
    ///
    /// Failed fetch cycles are logged and skipped, not fatal: a long
    /// collection should survive transient service hiccups. Records are
    /// returned in acquisition order per stream.
    #[instrument(
        name = "collector_collect",
        skip_all,
        fields(duration_s = self.config.duration_s, poll_interval_s = self.config.poll_interval_s)
    )]
    pub async fn collect<A, B>(
        &self,
        service_a: &mut A,
        service_b: &mut B,
    ) -> Result<(Vec<CapturedRecord>, Vec<CapturedRecord>)>
    where
        A: SensorService,
        B: SensorService,
    {
        let duration = Duration::from_secs(self.config.duration_s);
        let poll_interval = Duration::from_secs_f64(self.config.poll_interval_s);

        let mut records_a = Vec::new();
        let mut records_b = Vec::new();
        let mut failed_cycles: u64 = 0;

        let started = Instant::now();
        let mut last_progress = started;

        info!(
            duration_s = self.config.duration_s,
            "starting data collection"
        );

        while started.elapsed() < duration {
            Self::poll_once(service_a, &mut records_a, &mut failed_cycles).await;
            Self::poll_once(service_b, &mut records_b, &mut failed_cycles).await;

            if last_progress.elapsed() >= PROGRESS_INTERVAL {
                info!(
                    elapsed_s = started.elapsed().as_secs(),
                    records_a = records_a.len(),
                    records_b = records_b.len(),
                    "collection progress"
                );
                last_progress = Instant::now();
            }

            tokio::time::sleep(poll_interval).await;
        }

        info!(
            records_a = records_a.len(),
            records_b = records_b.len(),
            failed_cycles,
            "data collection complete"
        );

        Ok((records_a, records_b))
    }

    async fn poll_once<S: SensorService>(
        service: &mut S,
        records: &mut Vec<CapturedRecord>,
        failed_cycles: &mut u64,
    ) {
        match service.fetch_records().await {
            Ok(Some(record)) => {
                records.push(CapturedRecord::new(unix_now(), record));
            }
            Ok(None) => {}
            Err(e) => {
                *failed_cycles += 1;
                metrics::counter!(
                    "collector_failed_fetches_total",
                    "service" => service.label().to_string()
                )
                .increment(1);
                warn!(service = %service.label(), error = %e, "fetch failed, skipping cycle");
            }
        }
    }
}
