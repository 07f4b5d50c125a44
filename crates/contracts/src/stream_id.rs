//! StreamId - identity of one of the two compared streams

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identity of a sensor data stream within one analysis run.
///
/// The engine always compares exactly two streams. Stream-specific settings
/// (sampling rate, marker encoding) live in `StreamConfig`; this enum is the
/// key that ties packets, marker events and fidelity results back to their
/// origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StreamId {
    A,
    B,
}

impl StreamId {
    /// The other stream of the pair.
    #[inline]
    pub fn other(self) -> Self {
        match self {
            StreamId::A => StreamId::B,
            StreamId::B => StreamId::A,
        }
    }
}

impl fmt::Display for StreamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StreamId::A => write!(f, "A"),
            StreamId::B => write!(f, "B"),
        }
    }
}
