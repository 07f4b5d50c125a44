//! Cross-stream marker matching.
//!
//! Aligns the two streams by their shared sequence numbers: the result is
//! the sorted intersection of the sequence sets with both reconstructed
//! times attached. An empty intersection is an expected outcome and is left
//! to the engine to report, not an error.

use std::collections::BTreeMap;

use contracts::SyncMarkEvent;

/// One sequence number found in both streams
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchedPair {
    /// Shared sequence number
    pub sequence: i64,

    /// Stream A reconstructed time
    pub time_a: f64,

    /// Stream B reconstructed time
    pub time_b: f64,
}

/// Intersect two marker lists by sequence number.
///
/// Marker lists are strictly increasing in sequence (the extractor enforces
/// it), so the output is sorted by sequence. Unmatched markers simply do not
/// appear; the engine reports them through the tally.
pub fn match_markers(stream_a: &[SyncMarkEvent], stream_b: &[SyncMarkEvent]) -> Vec<MatchedPair> {
    let times_b: BTreeMap<i64, f64> = stream_b
        .iter()
        .map(|event| (event.sequence, event.reconstructed_time))
        .collect();

    stream_a
        .iter()
        .filter_map(|event| {
            times_b.get(&event.sequence).map(|&time_b| MatchedPair {
                sequence: event.sequence,
                time_a: event.reconstructed_time,
                time_b,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(sequence: i64, reconstructed_time: f64) -> SyncMarkEvent {
        SyncMarkEvent {
            sequence,
            reconstructed_time,
            position_in_packet: 0,
            packet_sample_count: 1,
            packet_index: 0,
        }
    }

    #[test]
    fn test_partial_overlap() {
        let a = vec![event(1, 10.0), event(2, 11.0), event(3, 12.0)];
        let b = vec![event(2, 11.05), event(3, 12.05), event(4, 13.05)];

        let pairs = match_markers(&a, &b);
        assert_eq!(pairs.len(), 2);
        assert_eq!(pairs[0].sequence, 2);
        assert!((pairs[0].time_a - 11.0).abs() < 1e-12);
        assert!((pairs[0].time_b - 11.05).abs() < 1e-12);
        assert_eq!(pairs[1].sequence, 3);
    }

    #[test]
    fn test_disjoint_sets() {
        let a = vec![event(1, 10.0), event(2, 11.0)];
        let b = vec![event(5, 14.0), event(6, 15.0)];

        assert!(match_markers(&a, &b).is_empty());
    }

    #[test]
    fn test_empty_inputs() {
        assert!(match_markers(&[], &[]).is_empty());
        assert!(match_markers(&[event(1, 0.0)], &[]).is_empty());
    }

    #[test]
    fn test_output_sorted_by_sequence() {
        let a = vec![event(2, 1.0), event(5, 2.0), event(9, 3.0)];
        let b = vec![event(2, 1.0), event(5, 2.0), event(9, 3.0)];

        let pairs = match_markers(&a, &b);
        let sequences: Vec<i64> = pairs.iter().map(|p| p.sequence).collect();
        assert_eq!(sequences, vec![2, 5, 9]);
    }
}
