//! # Output Rendering
//!
//! Structured values are printed as JSON or YAML. The `text` format is a
//! human-readable summary each handler writes itself.

use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::Serialize;

/// Output format of the `describe` and `evaluate` subcommands.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable summary.
    #[default]
    Text,
    /// Pretty-printed JSON.
    Json,
    /// YAML.
    Yaml,
}

/// Serialize `value` in a structured format.
///
/// Returns `None` for [`OutputFormat::Text`], which has no generic rendering.
pub fn render<T: Serialize>(value: &T, format: OutputFormat) -> Result<Option<String>> {
    match format {
        OutputFormat::Text => Ok(None),
        OutputFormat::Json => serde_json::to_string_pretty(value)
            .map(Some)
            .context("failed to serialize output as JSON"),
        OutputFormat::Yaml => serde_yaml::to_string(value)
            .map(Some)
            .context("failed to serialize output as YAML"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize)]
    struct Sample {
        id: &'static str,
    }

    #[test]
    fn text_has_no_generic_rendering() {
        assert!(render(&Sample { id: "x" }, OutputFormat::Text)
            .unwrap()
            .is_none());
    }

    #[test]
    fn json_and_yaml() {
        let json = render(&Sample { id: "x" }, OutputFormat::Json).unwrap().unwrap();
        assert!(json.contains("\"id\": \"x\""));
        let yaml = render(&Sample { id: "x" }, OutputFormat::Yaml).unwrap().unwrap();
        assert!(yaml.contains("id: x"));
    }
}
