//! Marker extraction with sub-packet time reconstruction.
//!
//! The packet timestamp is taken to represent the acquisition instant of the
//! *last* sample in the packet, so every earlier sample is offset backward by
//! its distance (in sample periods) from the end of the packet. That offset
//! is what makes markers from two streams with different polling cadences
//! comparable.

use contracts::{ContractError, Packet, Sample, StreamId, SyncMarkEvent};
use tracing::instrument;

/// Walk a stream's packets in order and emit one event per sync marker.
///
/// `sampling_rate_hz` must be the rate actually configured on the device for
/// this run; it is never inferred from the data.
///
/// # Errors
/// `NonMonotonicSequence` when a marker's sequence number fails to increase
/// over its predecessor. That indicates an upstream ordering bug and is
/// surfaced, never repaired.
#[instrument(
    name = "extract_markers",
    level = "debug",
    skip(packets),
    fields(stream = %stream, packets = packets.len())
)]
pub fn extract_markers(
    stream: StreamId,
    packets: &[Packet],
    sampling_rate_hz: f64,
) -> Result<Vec<SyncMarkEvent>, ContractError> {
    let mut events = Vec::new();
    let mut last_sequence: Option<i64> = None;

    for (packet_index, packet) in packets.iter().enumerate() {
        let packet_sample_count = packet.sample_count();

        for (position, sample) in packet.samples.iter().enumerate() {
            let Sample::Marker { sequence } = sample else {
                continue;
            };
            let sequence = *sequence;

            if let Some(previous) = last_sequence {
                if sequence <= previous {
                    return Err(ContractError::NonMonotonicSequence {
                        stream,
                        previous,
                        current: sequence,
                        packet_index,
                    });
                }
            }
            last_sequence = Some(sequence);

            let samples_after = (packet_sample_count - position - 1) as f64;
            let reconstructed_time = packet.acquired_at - samples_after / sampling_rate_hz;

            events.push(SyncMarkEvent {
                sequence,
                reconstructed_time,
                position_in_packet: position,
                packet_sample_count,
                packet_index,
            });
        }
    }

    Ok(events)
}
