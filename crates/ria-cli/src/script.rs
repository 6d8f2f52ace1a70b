//! # Event Scripts
//!
//! An event script is a YAML or JSON list of internally-tagged events:
//!
//! ```yaml
//! - type: answer
//!   question: prohibited
//!   value: none
//! - type: toggle_domain
//!   question: annex
//!   domain: biometrics
//! - type: toggle_detail
//!   domain: biometrics
//!   detail: remote_identification
//! ```
//!
//! The format is chosen by file extension: `.json` is JSON, anything else
//! is read as YAML (a superset of JSON).

use std::path::Path;

use anyhow::{Context, Result};
use ria_engine::Event;

/// Parse a script from a string in the format implied by `path`.
pub fn parse_script(path: &Path, contents: &str) -> Result<Vec<Event>> {
    let is_json = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    if is_json {
        serde_json::from_str(contents)
            .with_context(|| format!("failed to parse JSON script: {}", path.display()))
    } else {
        serde_yaml::from_str(contents)
            .with_context(|| format!("failed to parse YAML script: {}", path.display()))
    }
}

/// Read and parse a script file.
pub fn load_script(path: &Path) -> Result<Vec<Event>> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read script: {}", path.display()))?;
    let events = parse_script(path, &contents)?;
    tracing::debug!(path = %path.display(), events = events.len(), "script loaded");
    Ok(events)
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    #[test]
    fn yaml_script() {
        let yaml = "- type: answer\n  question: branding\n  value: 'no'\n- type: reset\n";
        let events = parse_script(&PathBuf::from("s.yaml"), yaml).unwrap();
        assert_eq!(events.len(), 2);
        assert_eq!(
            events[0],
            Event::Answer {
                question: "branding".into(),
                value: "no".into(),
            }
        );
        assert_eq!(events[1], Event::Reset);
    }

    #[test]
    fn json_script_by_extension() {
        let json = r#"[{"type":"toggle_expanded","question":"branding"}]"#;
        let events = parse_script(&PathBuf::from("s.JSON"), json).unwrap();
        assert_eq!(
            events,
            vec![Event::ToggleExpanded {
                question: "branding".into()
            }]
        );
    }

    #[test]
    fn unknown_event_type_is_an_error() {
        let err = parse_script(&PathBuf::from("s.yml"), "- type: jump\n").unwrap_err();
        assert!(err.to_string().contains("s.yml"));
    }

    #[test]
    fn missing_file_names_the_path() {
        let err = load_script(Path::new("/nonexistent/script.yaml")).unwrap_err();
        assert!(format!("{err:#}").contains("/nonexistent/script.yaml"));
    }
}
