//! Wire shape of the project data file

use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::fetch::FetchError;
use crate::project::RawProject;

/// The data file is a bare array or an envelope with metadata
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum Wire {
    List(Vec<Value>),
    Envelope {
        #[serde(default)]
        projects: Option<Vec<Value>>,
        #[serde(default)]
        source: Option<String>,
        #[serde(default)]
        generated_at: Option<String>,
    },
}

/// A parsed data file
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Payload {
    pub projects: Vec<RawProject>,
    pub source: Option<String>,
    pub generated_at: Option<String>,
}

impl Payload {
    /// Parse a response body.
    ///
    /// Fails when the JSON is malformed or the project list is missing or
    /// empty. Elements that are not project objects are dropped.
    pub fn parse(body: &str) -> Result<Self, FetchError> {
        let wire: Wire = serde_json::from_str(body)?;
        let (values, source, generated_at) = match wire {
            Wire::List(values) => (values, None, None),
            Wire::Envelope {
                projects,
                source,
                generated_at,
            } => (projects.unwrap_or_default(), source, generated_at),
        };

        if values.is_empty() {
            return Err(FetchError::Empty);
        }

        let projects = values
            .into_iter()
            .filter_map(|v| match serde_json::from_value::<RawProject>(v) {
                Ok(raw) => Some(raw),
                Err(e) => {
                    debug!(error = %e, "skipping undecodable project entry");
                    None
                }
            })
            .collect();

        Ok(Self {
            projects,
            source,
            generated_at,
        })
    }

    /// Data-source label for a successful load
    pub fn label(&self) -> String {
        let source = self.source.as_deref().filter(|s| !s.trim().is_empty());
        let generated = self.generated_at.as_deref().filter(|s| !s.trim().is_empty());
        match (source, generated) {
            (Some(s), Some(g)) => format!("{} ({})", s, g),
            (Some(s), None) => s.to_string(),
            (None, Some(g)) => format!("{} ({})", DEFAULT_LABEL, g),
            (None, None) => DEFAULT_LABEL.to_string(),
        }
    }
}

/// Label used when the payload does not name its source
pub const DEFAULT_LABEL: &str = "remote data";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bare_array() {
        let payload = Payload::parse(r#"[{"key":"a"},{"key":"b","title":"B"}]"#).unwrap();
        assert_eq!(payload.projects.len(), 2);
        assert_eq!(payload.projects[1].title.as_deref(), Some("B"));
        assert_eq!(payload.label(), "remote data");
    }

    #[test]
    fn test_parse_envelope_with_metadata() {
        let payload = Payload::parse(
            r#"{"projects":[{"key":"x","github":null}],"source":"ci","generated_at":"2024-05-01"}"#,
        )
        .unwrap();
        assert_eq!(payload.projects.len(), 1);
        assert_eq!(payload.projects[0].github, None);
        assert_eq!(payload.label(), "ci (2024-05-01)");
    }

    #[test]
    fn test_label_variants() {
        let mut payload = Payload {
            source: Some("ci".to_string()),
            ..Default::default()
        };
        assert_eq!(payload.label(), "ci");

        payload.source = None;
        payload.generated_at = Some("today".to_string());
        assert_eq!(payload.label(), "remote data (today)");
    }

    #[test]
    fn test_empty_and_missing_lists_fail() {
        assert!(matches!(Payload::parse("[]"), Err(FetchError::Empty)));
        assert!(matches!(
            Payload::parse(r#"{"projects":[]}"#),
            Err(FetchError::Empty)
        ));
        assert!(matches!(
            Payload::parse(r#"{"source":"ci"}"#),
            Err(FetchError::Empty)
        ));
    }

    #[test]
    fn test_malformed_json_fails() {
        assert!(matches!(Payload::parse("{ nope"), Err(FetchError::Parse(_))));
        assert!(matches!(Payload::parse("42"), Err(FetchError::Parse(_))));
    }

    #[test]
    fn test_undecodable_entries_are_dropped() {
        let payload = Payload::parse(r#"[3, {"key":"ok"}, {"key":"bad","title":5}]"#).unwrap();
        assert_eq!(payload.projects.len(), 1);
        assert_eq!(payload.projects[0].key.as_deref(), Some("ok"));
    }
}
