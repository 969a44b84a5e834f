//! Cassette data structures.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// One recorded call on a port.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Interaction {
    /// Sequence number, assigned by the recorder.
    pub seq: u64,
    /// Port name (`"source"` or `"llm"`).
    pub port: String,
    /// Method invoked on the port.
    pub method: String,
    /// Arguments of the call.
    pub input: serde_json::Value,
    /// Result of the call, as `{"Ok": ..}` or `{"Err": ..}` for fallible methods.
    pub output: serde_json::Value,
}

/// A named, ordered list of interactions.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Cassette {
    /// Human-readable name.
    pub name: String,
    /// When the recording was made.
    pub recorded_at: DateTime<Utc>,
    /// Repository the recording was made against (`owner/name`), or `"unknown"`.
    pub repository: String,
    /// Interactions in recording order.
    pub interactions: Vec<Interaction>,
}

impl Cassette {
    /// Parses a cassette from YAML text.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Cassette`] if the text is not a valid cassette.
    pub fn from_yaml(text: &str) -> Result<Self> {
        serde_yaml::from_str(text).map_err(|e| Error::Cassette(format!("invalid cassette: {e}")))
    }

    /// Renders the cassette as YAML.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Cassette`] if an interaction value cannot be rendered.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(|e| Error::Cassette(format!("cannot serialize: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn yaml_keeps_nested_results() {
        let cassette = Cassette {
            name: "tree".into(),
            recorded_at: Utc::now(),
            repository: "o/r".into(),
            interactions: vec![Interaction {
                seq: 0,
                port: "source".into(),
                method: "tree".into(),
                input: json!({"repo": {"owner": "o", "name": "r"}, "branch": "main"}),
                output: json!({"Ok": {"entries": [{"path": "a", "kind": "tree"}], "truncated": false}}),
            }],
        };

        let parsed = Cassette::from_yaml(&cassette.to_yaml().unwrap()).unwrap();
        assert_eq!(parsed, cassette);
    }

    #[test]
    fn garbage_is_a_cassette_error() {
        assert!(matches!(Cassette::from_yaml("- just\n- a list"), Err(Error::Cassette(_))));
    }
}
