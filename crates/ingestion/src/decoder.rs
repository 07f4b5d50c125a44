//! Per-stream record decoder
//!
//! Turns captured raw records into typed packets. The sentinel test runs
//! exactly once per sample, here; everything downstream matches on the
//! `Sample` variant.

use contracts::{CapturedRecord, Packet, RawTimestamp, Sample, StreamConfig, StreamId, TimeSource};
use tracing::{trace, warn};

use crate::timestamp::parse_timestamp;

/// Decoder for one stream's marker encoding and clock
#[derive(Debug, Clone)]
pub struct StreamDecoder {
    stream: StreamId,
    config: StreamConfig,
}

impl StreamDecoder {
    /// Create a decoder for the given stream settings
    pub fn new(stream: StreamId, config: StreamConfig) -> Self {
        Self { stream, config }
    }

    /// Stream identity this decoder serves
    pub fn stream(&self) -> StreamId {
        self.stream
    }

    /// Decode a batch of captured records, preserving acquisition order.
    pub fn decode_batch(&self, records: &[CapturedRecord]) -> Vec<Packet> {
        records
            .iter()
            .enumerate()
            .map(|(index, record)| self.decode_record(index, record))
            .collect()
    }

    /// Decode a single captured record.
    pub fn decode_record(&self, packet_index: usize, captured: &CapturedRecord) -> Packet {
        let (acquired_at, time_source) = self.resolve_timestamp(packet_index, captured);

        let mut samples = Vec::with_capacity(captured.record.data.len());
        for (position, raw) in captured.record.data.iter().enumerate() {
            if let Some(sample) = self.decode_sample(packet_index, position, raw) {
                samples.push(sample);
            }
        }

        metrics::counter!(
            "ingest_records_decoded_total",
            "stream" => self.config.label.clone()
        )
        .increment(1);

        trace!(
            stream = %self.stream,
            packet_index,
            samples = samples.len(),
            ?time_source,
            "record decoded"
        );

        Packet {
            acquired_at,
            time_source,
            samples,
        }
    }

    /// Pick the packet timestamp: device clock when present and parseable,
    /// local capture time otherwise (flagged).
    fn resolve_timestamp(
        &self,
        packet_index: usize,
        captured: &CapturedRecord,
    ) -> (f64, TimeSource) {
        match &captured.record.timestamp {
            Some(RawTimestamp::Epoch(seconds)) => (*seconds, TimeSource::Device),
            Some(RawTimestamp::Text(text)) => match parse_timestamp(text) {
                Ok(seconds) => (seconds, TimeSource::Device),
                Err(e) => {
                    warn!(
                        stream = %self.stream,
                        packet_index,
                        error = %e,
                        "unparseable device timestamp, using capture time"
                    );
                    self.record_fallback();
                    (captured.captured_at, TimeSource::CaptureFallback)
                }
            },
            None => {
                warn!(
                    stream = %self.stream,
                    packet_index,
                    "device timestamp missing, using capture time"
                );
                self.record_fallback();
                (captured.captured_at, TimeSource::CaptureFallback)
            }
        }
    }

    /// Classify one raw vector.
    ///
    /// Sentinel in the first element plus a sequence field makes a marker;
    /// a sentinel without the sequence field is malformed and dropped.
    fn decode_sample(&self, packet_index: usize, position: usize, raw: &[i64]) -> Option<Sample> {
        if raw.first() != Some(&self.config.magic_sentinel) {
            return Some(Sample::Measurement(raw.to_vec()));
        }

        if raw.len() < 2 {
            warn!(
                stream = %self.stream,
                packet_index,
                position,
                "sentinel matched but vector too short, dropping sample"
            );
            metrics::counter!(
                "ingest_malformed_markers_total",
                "stream" => self.config.label.clone()
            )
            .increment(1);
            return None;
        }

        let sequence = raw[1] / self.config.scale_factor;
        metrics::counter!(
            "ingest_markers_decoded_total",
            "stream" => self.config.label.clone()
        )
        .increment(1);

        Some(Sample::Marker { sequence })
    }

    fn record_fallback(&self) {
        metrics::counter!(
            "ingest_timestamp_fallback_total",
            "stream" => self.config.label.clone()
        )
        .increment(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::RawRecord;

    fn ecg_decoder() -> StreamDecoder {
        StreamDecoder::new(
            StreamId::B,
            StreamConfig {
                label: "ecg".to_string(),
                sampling_rate_hz: 400.0,
                magic_sentinel: -99999,
                scale_factor: 1,
            },
        )
    }

    fn icg_decoder() -> StreamDecoder {
        StreamDecoder::new(
            StreamId::A,
            StreamConfig {
                label: "icg".to_string(),
                sampling_rate_hz: 400.0,
                magic_sentinel: -999_990_000,
                scale_factor: 10_000,
            },
        )
    }

    fn captured(timestamp: Option<RawTimestamp>, data: Vec<Vec<i64>>) -> CapturedRecord {
        CapturedRecord::new(100.5, RawRecord { timestamp, data })
    }

    #[test]
    fn test_direct_marker_detection() {
        let decoder = ecg_decoder();
        let packet = decoder.decode_record(
            0,
            &captured(
                Some(RawTimestamp::Epoch(10.0)),
                vec![vec![1, 2, 3], vec![-99999, 17, 0], vec![4, 5, 6]],
            ),
        );

        assert_eq!(packet.samples.len(), 3);
        assert_eq!(packet.samples[1], Sample::Marker { sequence: 17 });
        assert!(packet.samples[0].is_measurement());
        assert!(packet.samples[2].is_measurement());
    }

    #[test]
    fn test_scaled_marker_detection() {
        let decoder = icg_decoder();
        let packet = decoder.decode_record(
            0,
            &captured(
                Some(RawTimestamp::Epoch(10.0)),
                vec![vec![-999_990_000, 170_000, 0, 0, 0]],
            ),
        );

        assert_eq!(packet.samples[0], Sample::Marker { sequence: 17 });
    }

    #[test]
    fn test_sentinel_valued_later_elements_are_not_markers() {
        let decoder = ecg_decoder();
        let packet = decoder.decode_record(
            0,
            &captured(Some(RawTimestamp::Epoch(10.0)), vec![vec![7, -99999, 0]]),
        );

        assert!(packet.samples[0].is_measurement());
    }

    #[test]
    fn test_malformed_marker_dropped() {
        let decoder = ecg_decoder();
        let packet = decoder.decode_record(
            0,
            &captured(
                Some(RawTimestamp::Epoch(10.0)),
                vec![vec![-99999], vec![1, 2, 3]],
            ),
        );

        // Malformed marker is gone, measurement survives
        assert_eq!(packet.samples.len(), 1);
        assert!(packet.samples[0].is_measurement());
    }

    #[test]
    fn test_text_timestamp_decoded() {
        let decoder = ecg_decoder();
        let packet = decoder.decode_record(
            0,
            &captured(
                Some(RawTimestamp::Text("2025-10-27 07:55:27.594".to_string())),
                vec![],
            ),
        );

        assert_eq!(packet.time_source, TimeSource::Device);
        assert!((packet.acquired_at - 1_761_551_727.594).abs() < 1e-9);
    }

    #[test]
    fn test_bad_timestamp_falls_back_to_capture_time() {
        let decoder = ecg_decoder();
        let packet = decoder.decode_record(
            0,
            &captured(Some(RawTimestamp::Text("garbage".to_string())), vec![]),
        );

        assert_eq!(packet.time_source, TimeSource::CaptureFallback);
        assert!((packet.acquired_at - 100.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_missing_timestamp_falls_back_to_capture_time() {
        let decoder = ecg_decoder();
        let packet = decoder.decode_record(0, &captured(None, vec![vec![1, 2, 3]]));

        assert_eq!(packet.time_source, TimeSource::CaptureFallback);
        assert!((packet.acquired_at - 100.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_batch_preserves_order() {
        let decoder = ecg_decoder();
        let records = vec![
            captured(Some(RawTimestamp::Epoch(1.0)), vec![vec![1, 1, 1]]),
            captured(Some(RawTimestamp::Epoch(2.0)), vec![vec![2, 2, 2]]),
            captured(Some(RawTimestamp::Epoch(3.0)), vec![]),
        ];

        let packets = decoder.decode_batch(&records);
        assert_eq!(packets.len(), 3);
        assert!((packets[0].acquired_at - 1.0).abs() < f64::EPSILON);
        assert!((packets[2].acquired_at - 3.0).abs() < f64::EPSILON);
    }
}
