//! Build configuration.
//!
//! A `BuildConfig` arrives from the orchestrator as a JSON map. Only the
//! keys below are recognized; anything else is ignored rather than rejected
//! so configs can carry orchestrator-specific options.

use serde::{Deserialize, Deserializer};

/// Runtime used when the config does not name one.
pub const DEFAULT_RUNTIME: &str = "python3.8";

/// Attribute name used when neither the entrypoint nor the config names the
/// WSGI application object.
pub const DEFAULT_APPLICATION_NAME: &str = "application";

/// Recognized build options.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildConfig {
    /// Language runtime identifier, e.g. `python3.8`.
    #[serde(default)]
    pub runtime: Option<String>,

    /// Attribute name of the WSGI application object.
    #[serde(default)]
    pub wsgi_application_name: Option<String>,

    /// Production flag: disables traceback responses in the bundled handler.
    /// Orchestrators send this as a bool, a string, or a number.
    #[serde(default, deserialize_with = "boolish")]
    pub production: bool,
}

impl BuildConfig {
    /// Parse from a JSON object, ignoring unrecognized keys.
    pub fn from_json(raw: &str) -> serde_json::Result<Self> {
        serde_json::from_str(raw)
    }

    /// Effective runtime identifier.
    pub fn runtime(&self) -> &str {
        self.runtime.as_deref().unwrap_or(DEFAULT_RUNTIME)
    }

    /// Effective WSGI application attribute name.
    pub fn wsgi_application_name(&self) -> &str {
        self.wsgi_application_name
            .as_deref()
            .unwrap_or(DEFAULT_APPLICATION_NAME)
    }
}

/// Accept `true`/`false`, `"true"`/`"false"`, `"1"`/`"0"`, `"yes"`/`"no"`
/// and numbers. Unknown strings are false.
fn boolish<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::Bool(b) => b,
        serde_json::Value::String(s) => {
            matches!(s.trim().to_ascii_lowercase().as_str(), "true" | "1" | "yes")
        }
        serde_json::Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        _ => false,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = BuildConfig::from_json("{}").unwrap();
        assert_eq!(cfg.runtime(), "python3.8");
        assert_eq!(cfg.wsgi_application_name(), "application");
        assert!(!cfg.production);
    }

    #[test]
    fn test_recognized_keys() {
        let cfg = BuildConfig::from_json(
            r#"{"runtime": "python3.6", "wsgiApplicationName": "app", "production": true}"#,
        )
        .unwrap();
        assert_eq!(cfg.runtime(), "python3.6");
        assert_eq!(cfg.wsgi_application_name(), "app");
        assert!(cfg.production);
    }

    #[test]
    fn test_unknown_keys_ignored() {
        let cfg = BuildConfig::from_json(r#"{"maxLambdaSize": "15mb", "zeroConfig": true}"#);
        assert!(cfg.is_ok());
    }

    #[test]
    fn test_boolish_production() {
        for raw in [r#"{"production": "true"}"#, r#"{"production": "1"}"#, r#"{"production": 1}"#] {
            assert!(BuildConfig::from_json(raw).unwrap().production, "{raw}");
        }
        for raw in [
            r#"{"production": "false"}"#,
            r#"{"production": "0"}"#,
            r#"{"production": 0}"#,
            r#"{"production": false}"#,
        ] {
            assert!(!BuildConfig::from_json(raw).unwrap().production, "{raw}");
        }
    }
}
