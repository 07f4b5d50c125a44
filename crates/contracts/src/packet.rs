//! Packet - Ingestion output
//!
//! Raw transport records and the typed packets decoded from them.

use serde::{Deserialize, Serialize};

/// Raw record as returned by a sensor service.
///
/// One `get_data` response: a device timestamp (string, epoch float, or
/// absent) plus the ordered sample vectors drained from the device buffer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawRecord {
    /// Device timestamp; absent when the firmware response omitted it
    #[serde(default)]
    pub timestamp: Option<RawTimestamp>,

    /// Ordered sample vectors (arity is stream-specific)
    pub data: Vec<Vec<i64>>,
}

/// Device timestamp in either wire form
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawTimestamp {
    /// Fractional epoch seconds
    Epoch(f64),
    /// Wall-clock string, "YYYY-MM-DD HH:MM:SS.mmm" (UTC)
    Text(String),
}

/// A raw record stamped with the local time it was fetched.
///
/// The capture time is the fallback clock when the device timestamp is
/// missing or unparseable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CapturedRecord {
    /// Local capture time (fractional epoch seconds)
    pub captured_at: f64,

    /// The raw record as received
    pub record: RawRecord,
}

impl CapturedRecord {
    pub fn new(captured_at: f64, record: RawRecord) -> Self {
        Self {
            captured_at,
            record,
        }
    }
}

/// Where a packet's `acquired_at` came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeSource {
    /// Device-reported timestamp
    Device,
    /// Local capture time substituted for a missing/malformed device timestamp
    CaptureFallback,
}

/// One sample slot of a packet, decoded once at ingestion.
///
/// The sentinel test happens exactly once, here; downstream passes match on
/// the variant instead of re-inspecting the first element. This removes any
/// chance of a legitimate measurement value colliding with the sentinel after
/// decode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sample {
    /// Ordinary measurement vector
    Measurement(Vec<i64>),

    /// In-band sync marker carrying the de-scaled sequence number
    Marker { sequence: i64 },
}

impl Sample {
    /// Whether this slot is a sync marker
    #[inline]
    pub fn is_marker(&self) -> bool {
        matches!(self, Sample::Marker { .. })
    }

    /// Whether this slot is an ordinary measurement
    #[inline]
    pub fn is_measurement(&self) -> bool {
        matches!(self, Sample::Measurement(_))
    }

    /// Marker sequence number, if any
    #[inline]
    pub fn sequence(&self) -> Option<i64> {
        match self {
            Sample::Marker { sequence } => Some(*sequence),
            Sample::Measurement(_) => None,
        }
    }
}

/// Decoded sensor data packet
///
/// Immutable once decoded. Packets of one stream are supplied to the engine
/// in strict acquisition order; the packet's position in that order is the
/// tie-breaker for inter-marker counting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Packet {
    /// Acquisition timestamp (fractional epoch seconds); by firmware
    /// convention this is approximately when the *last* sample of the packet
    /// was acquired
    pub acquired_at: f64,

    /// Origin of `acquired_at`
    pub time_source: TimeSource,

    /// Ordered decoded samples
    pub samples: Vec<Sample>,
}

impl Packet {
    /// Total number of sample slots (markers included)
    #[inline]
    pub fn sample_count(&self) -> usize {
        self.samples.len()
    }

    /// Number of sync markers in this packet
    #[inline]
    pub fn marker_count(&self) -> usize {
        self.samples.iter().filter(|s| s.is_marker()).count()
    }

    /// Number of ordinary measurement samples in this packet
    #[inline]
    pub fn measurement_count(&self) -> usize {
        self.samples.iter().filter(|s| s.is_measurement()).count()
    }
}
