//! Configuration parsing
//!
//! Supports TOML (primary) and JSON (secondary) formats.

use contracts::{ContractError, RunBlueprint};

/// Configuration file format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// TOML format (recommended)
    Toml,
    /// JSON format
    Json,
}

impl ConfigFormat {
    /// Infer format from a file extension
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "toml" => Some(Self::Toml),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

/// Parse TOML configuration
pub fn parse_toml(content: &str) -> Result<RunBlueprint, ContractError> {
    toml::from_str(content).map_err(|e| ContractError::ConfigParse {
        message: format!("TOML parse error: {e}"),
        source: Some(Box::new(e)),
    })
}

/// Parse JSON configuration
pub fn parse_json(content: &str) -> Result<RunBlueprint, ContractError> {
    serde_json::from_str(content).map_err(|e| ContractError::ConfigParse {
        message: format!("JSON parse error: {e}"),
        source: Some(Box::new(e)),
    })
}

/// Parse configuration in the given format
pub fn parse(content: &str, format: ConfigFormat) -> Result<RunBlueprint, ContractError> {
    match format {
        ConfigFormat::Toml => parse_toml(content),
        ConfigFormat::Json => parse_json(content),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_toml_minimal() {
        let content = r#"
[analyzer]
sync_threshold_ms = 50.0

[analyzer.stream_a]
label = "icg"
sampling_rate_hz = 400.0
magic_sentinel = -999990000
scale_factor = 10000

[analyzer.stream_b]
label = "ecg"
sampling_rate_hz = 400.0
magic_sentinel = -99999

[collector]
port_a = 30009
port_b = 1293
"#;
        let result = parse_toml(content);
        assert!(result.is_ok(), "Failed: {:?}", result.err());
        let bp = result.unwrap();
        assert_eq!(bp.analyzer.stream_a.label, "icg");
        assert_eq!(bp.analyzer.stream_a.scale_factor, 10000);
        assert_eq!(bp.analyzer.stream_b.scale_factor, 1);
        assert_eq!(bp.collector.host, "localhost");
    }

    #[test]
    fn test_parse_json_minimal() {
        let content = r#"{
            "analyzer": {
                "sync_threshold_ms": 10.0,
                "stream_a": {
                    "label": "icg",
                    "sampling_rate_hz": 400.0,
                    "magic_sentinel": -999990000,
                    "scale_factor": 10000
                },
                "stream_b": {
                    "label": "ecg",
                    "sampling_rate_hz": 200.0,
                    "magic_sentinel": -99999
                }
            },
            "collector": { "port_a": 30009, "port_b": 1293 },
            "sinks": [{ "name": "log", "sink_type": "log" }]
        }"#;
        let result = parse_json(content);
        assert!(result.is_ok(), "Failed: {:?}", result.err());
        let bp = result.unwrap();
        assert!((bp.analyzer.sync_threshold_ms - 10.0).abs() < f64::EPSILON);
        assert_eq!(bp.sinks.len(), 1);
    }

    #[test]
    fn test_parse_toml_syntax_error() {
        let content = "invalid toml [[[";
        let result = parse_toml(content);
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert!(matches!(err, ContractError::ConfigParse { .. }));
    }

    #[test]
    fn test_format_from_extension() {
        assert_eq!(
            ConfigFormat::from_extension("toml"),
            Some(ConfigFormat::Toml)
        );
        assert_eq!(
            ConfigFormat::from_extension("TOML"),
            Some(ConfigFormat::Toml)
        );
        assert_eq!(
            ConfigFormat::from_extension("json"),
            Some(ConfigFormat::Json)
        );
        assert_eq!(ConfigFormat::from_extension("yaml"), None);
    }
}
