//! Inter-marker sample counting.
//!
//! Counts the measurement samples observed strictly between each pair of
//! consecutive markers of one stream, spanning packet boundaries without
//! double-counting or skipping. The counts validate sampling-rate fidelity
//! independently of any clock drift.

use contracts::{IntervalCounts, Packet, SyncMarkEvent};

/// Count measurement samples between consecutive markers.
///
/// For each consecutive marker pair (i, i+1), the count keyed by marker i's
/// sequence number is:
/// - same packet: `position(i+1) - position(i) - 1`
/// - different packets: samples after marker i in its packet, plus the
///   measurement samples of every packet strictly between the two marker
///   packets, plus the samples before marker i+1 in its packet.
///
/// `markers` must come from `extract_markers` over the same `packets` slice
/// (packet indices are trusted). The last marker of a stream has no
/// successor and gets no entry.
pub fn count_samples_between(packets: &[Packet], markers: &[SyncMarkEvent]) -> IntervalCounts {
    let mut counts = IntervalCounts::new();

    for pair in markers.windows(2) {
        let (first, second) = (&pair[0], &pair[1]);

        let count = if first.packet_index == second.packet_index {
            (second.position_in_packet - first.position_in_packet - 1) as u64
        } else {
            let tail = (first.packet_sample_count - first.position_in_packet - 1) as u64;
            let between: u64 = packets[first.packet_index + 1..second.packet_index]
                .iter()
                .map(|packet| packet.measurement_count() as u64)
                .sum();
            let head = second.position_in_packet as u64;
            tail + between + head
        };

        counts.insert(first.sequence, count);
    }

    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractor::extract_markers;
    use contracts::{Sample, StreamId, TimeSource};

    fn measurement() -> Sample {
        Sample::Measurement(vec![0, 0, 0])
    }

    fn marker(sequence: i64) -> Sample {
        Sample::Marker { sequence }
    }

    fn packet(acquired_at: f64, samples: Vec<Sample>) -> Packet {
        Packet {
            acquired_at,
            time_source: TimeSource::Device,
            samples,
        }
    }

    fn count(packets: &[Packet]) -> IntervalCounts {
        let markers = extract_markers(StreamId::A, packets, 100.0).unwrap();
        count_samples_between(packets, &markers)
    }

    #[test]
    fn test_same_packet_pair() {
        let packets = vec![packet(
            1.0,
            vec![marker(1), measurement(), measurement(), marker(2)],
        )];

        let counts = count(&packets);
        assert_eq!(counts.get(&1), Some(&2));
        assert!(!counts.contains_key(&2));
    }

    #[test]
    fn test_adjacent_markers_in_same_packet() {
        let packets = vec![packet(1.0, vec![marker(1), marker(2)])];
        assert_eq!(count(&packets).get(&1), Some(&0));
    }

    #[test]
    fn test_pair_split_across_adjacent_packets() {
        // 2 samples after marker 1, 3 samples before marker 2 -> 5
        let packets = vec![
            packet(1.0, vec![marker(1), measurement(), measurement()]),
            packet(
                2.0,
                vec![measurement(), measurement(), measurement(), marker(2)],
            ),
        ];

        assert_eq!(count(&packets).get(&1), Some(&5));
    }

    #[test]
    fn test_pair_with_intermediate_packets() {
        // 1 after marker 1, 4 + 2 in the packets between, 1 before marker 2
        let packets = vec![
            packet(1.0, vec![marker(1), measurement()]),
            packet(2.0, vec![measurement(); 4]),
            packet(3.0, vec![measurement(), measurement()]),
            packet(4.0, vec![measurement(), marker(2)]),
        ];

        assert_eq!(count(&packets).get(&1), Some(&8));
    }

    #[test]
    fn test_empty_intermediate_packet() {
        let packets = vec![
            packet(1.0, vec![marker(1)]),
            packet(2.0, vec![]),
            packet(3.0, vec![marker(2)]),
        ];

        assert_eq!(count(&packets).get(&1), Some(&0));
    }

    #[test]
    fn test_exact_synthetic_interval() {
        // Exactly 400 measurements between markers, mimicking a healthy
        // 400 Hz stream with 1 Hz markers split over several packets:
        // 1 after the first marker + 3 x 133 intermediate + 0 before the next
        let mut packets = vec![packet(0.0, vec![measurement(), marker(1), measurement()])];
        for i in 0..3 {
            packets.push(packet(1.0 + i as f64 * 0.25, vec![measurement(); 133]));
        }
        packets.push(packet(2.0, vec![marker(2), measurement()]));

        let counts = count(&packets);
        assert_eq!(counts.get(&1), Some(&400));
    }

    #[test]
    fn test_consecutive_packet_markers_no_gap_samples() {
        let packets = vec![
            packet(1.0, vec![measurement(), marker(1)]),
            packet(2.0, vec![marker(2), measurement()]),
        ];

        assert_eq!(count(&packets).get(&1), Some(&0));
    }

    #[test]
    fn test_multiple_intervals() {
        let packets = vec![
            packet(1.0, vec![marker(1), measurement()]),
            packet(2.0, vec![measurement(), marker(2), measurement()]),
            packet(3.0, vec![marker(3)]),
        ];

        let counts = count(&packets);
        assert_eq!(counts.get(&1), Some(&2));
        assert_eq!(counts.get(&2), Some(&1));
        assert_eq!(counts.len(), 2);
    }

    #[test]
    fn test_fewer_than_two_markers() {
        let packets = vec![packet(1.0, vec![marker(1), measurement()])];
        assert!(count(&packets).is_empty());
    }
}
