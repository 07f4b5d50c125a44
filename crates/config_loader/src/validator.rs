//! Configuration validation
//!
//! Rules:
//! - sync_threshold_ms, nominal_interval_s > 0
//! - per stream: sampling_rate_hz > 0, scale_factor >= 1, non-empty label
//! - stream labels distinct
//! - expected_samples_per_interval, when set, > 0
//! - collector: poll_interval_s > 0, duration_s > 0, distinct service ports
//! - sink names unique; csv/json sinks carry a `path` param

use std::collections::HashSet;

use contracts::{ContractError, RunBlueprint, SinkType, StreamConfig};

/// Validate a RunBlueprint
///
/// Returns the first error encountered, or Ok(()).
pub fn validate(blueprint: &RunBlueprint) -> Result<(), ContractError> {
    validate_analyzer(blueprint)?;
    validate_streams(blueprint)?;
    validate_collector(blueprint)?;
    validate_sinks(blueprint)?;
    Ok(())
}

fn validate_analyzer(blueprint: &RunBlueprint) -> Result<(), ContractError> {
    let analyzer = &blueprint.analyzer;

    if analyzer.sync_threshold_ms <= 0.0 {
        return Err(ContractError::config_validation(
            "analyzer.sync_threshold_ms",
            format!("must be > 0, got {}", analyzer.sync_threshold_ms),
        ));
    }

    if analyzer.nominal_interval_s <= 0.0 {
        return Err(ContractError::config_validation(
            "analyzer.nominal_interval_s",
            format!("must be > 0, got {}", analyzer.nominal_interval_s),
        ));
    }

    if analyzer.expected_samples_per_interval == Some(0) {
        return Err(ContractError::config_validation(
            "analyzer.expected_samples_per_interval",
            "must be > 0 when set",
        ));
    }

    Ok(())
}

fn validate_streams(blueprint: &RunBlueprint) -> Result<(), ContractError> {
    validate_stream("analyzer.stream_a", &blueprint.analyzer.stream_a)?;
    validate_stream("analyzer.stream_b", &blueprint.analyzer.stream_b)?;

    for (field, stream) in [
        ("analyzer.stream_a", &blueprint.analyzer.stream_a),
        ("analyzer.stream_b", &blueprint.analyzer.stream_b),
    ] {
        if blueprint.analyzer.expected_samples_for(stream) == 0 {
            return Err(ContractError::config_validation(
                field,
                "sampling_rate_hz * nominal_interval_s rounds to 0 expected samples",
            ));
        }
    }

    if blueprint.analyzer.stream_a.label == blueprint.analyzer.stream_b.label {
        return Err(ContractError::config_validation(
            "analyzer.stream_b.label",
            format!(
                "stream labels must differ, both are '{}'",
                blueprint.analyzer.stream_b.label
            ),
        ));
    }

    Ok(())
}

fn validate_stream(field: &str, stream: &StreamConfig) -> Result<(), ContractError> {
    if stream.label.is_empty() {
        return Err(ContractError::config_validation(
            format!("{field}.label"),
            "must not be empty",
        ));
    }

    if stream.sampling_rate_hz <= 0.0 {
        return Err(ContractError::config_validation(
            format!("{field}.sampling_rate_hz"),
            format!("must be > 0, got {}", stream.sampling_rate_hz),
        ));
    }

    if stream.scale_factor < 1 {
        return Err(ContractError::config_validation(
            format!("{field}.scale_factor"),
            format!("must be >= 1, got {}", stream.scale_factor),
        ));
    }

    Ok(())
}

fn validate_collector(blueprint: &RunBlueprint) -> Result<(), ContractError> {
    let collector = &blueprint.collector;

    if collector.poll_interval_s <= 0.0 {
        return Err(ContractError::config_validation(
            "collector.poll_interval_s",
            format!("must be > 0, got {}", collector.poll_interval_s),
        ));
    }

    if collector.duration_s == 0 {
        return Err(ContractError::config_validation(
            "collector.duration_s",
            "must be > 0",
        ));
    }

    if collector.port_a == collector.port_b {
        return Err(ContractError::config_validation(
            "collector.port_b",
            format!(
                "services must listen on distinct ports, both are {}",
                collector.port_b
            ),
        ));
    }

    Ok(())
}

fn validate_sinks(blueprint: &RunBlueprint) -> Result<(), ContractError> {
    let mut seen = HashSet::new();
    for sink in &blueprint.sinks {
        if !seen.insert(&sink.name) {
            return Err(ContractError::config_validation(
                format!("sinks[name={}]", sink.name),
                "duplicate sink name",
            ));
        }

        let needs_path = matches!(sink.sink_type, SinkType::Csv | SinkType::Json);
        if needs_path && !sink.params.contains_key("path") {
            return Err(ContractError::config_validation(
                format!("sinks[name={}].params.path", sink.name),
                "csv/json sinks require a 'path' parameter",
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::{AnalyzerConfig, CollectorConfig, SinkConfig};
    use std::collections::HashMap;

    fn minimal_blueprint() -> RunBlueprint {
        RunBlueprint {
            analyzer: AnalyzerConfig::default(),
            collector: CollectorConfig {
                host: "localhost".to_string(),
                port_a: 30009,
                port_b: 1293,
                poll_interval_s: 0.2,
                duration_s: 30,
                drain_requests: 5,
                request_timeout_s: 10,
            },
            sinks: vec![],
        }
    }

    #[test]
    fn test_valid_blueprint() {
        assert!(validate(&minimal_blueprint()).is_ok());
    }

    #[test]
    fn test_rejects_nonpositive_threshold() {
        let mut bp = minimal_blueprint();
        bp.analyzer.sync_threshold_ms = 0.0;
        let err = validate(&bp).unwrap_err();
        assert!(err.to_string().contains("sync_threshold_ms"));
    }

    #[test]
    fn test_rejects_zero_scale_factor() {
        let mut bp = minimal_blueprint();
        bp.analyzer.stream_a.scale_factor = 0;
        let err = validate(&bp).unwrap_err();
        assert!(err.to_string().contains("scale_factor"));
    }

    #[test]
    fn test_rejects_duplicate_stream_labels() {
        let mut bp = minimal_blueprint();
        bp.analyzer.stream_b.label = bp.analyzer.stream_a.label.clone();
        let err = validate(&bp).unwrap_err();
        assert!(err.to_string().contains("labels must differ"));
    }

    #[test]
    fn test_rejects_shared_port() {
        let mut bp = minimal_blueprint();
        bp.collector.port_b = bp.collector.port_a;
        let err = validate(&bp).unwrap_err();
        assert!(err.to_string().contains("distinct ports"));
    }

    #[test]
    fn test_rejects_csv_sink_without_path() {
        let mut bp = minimal_blueprint();
        bp.sinks.push(SinkConfig {
            name: "csv".to_string(),
            sink_type: SinkType::Csv,
            params: HashMap::new(),
        });
        let err = validate(&bp).unwrap_err();
        assert!(err.to_string().contains("path"));
    }

    #[test]
    fn test_rejects_duplicate_sink_names() {
        let mut bp = minimal_blueprint();
        for _ in 0..2 {
            bp.sinks.push(SinkConfig {
                name: "log".to_string(),
                sink_type: SinkType::Log,
                params: HashMap::new(),
            });
        }
        let err = validate(&bp).unwrap_err();
        assert!(err.to_string().contains("duplicate"));
    }
}
