//! SyncMarkEvent - Drift engine intermediate
//!
//! Marker events with sample-accurate reconstructed timestamps. Derived, not
//! stored by the producer; recomputed on every analysis pass.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One sync marker located within a stream's packet list.
///
/// `reconstructed_time` backs the packet timestamp off by the marker's
/// distance (in sample periods) from the end of its packet, which is the
/// mechanism that makes two streams with different polling cadences
/// comparable at all.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SyncMarkEvent {
    /// Monotonically increasing sequence number carried by the marker
    pub sequence: i64,

    /// Sample-accurate acquisition time estimate (fractional epoch seconds)
    pub reconstructed_time: f64,

    /// Zero-based position of the marker within its packet
    pub position_in_packet: usize,

    /// Total sample slots in the packet holding this marker
    pub packet_sample_count: usize,

    /// Index of the packet within the stream's acquisition-ordered list
    pub packet_index: usize,
}

/// Marker sequence number -> count of measurement samples strictly between
/// that marker and the next marker of the same stream.
///
/// Values cluster around `expected samples per interval` when the stream's
/// sampling rate is honest.
pub type IntervalCounts = BTreeMap<i64, u64>;
