//! Advisory client configuration.
//!
//! The API credential is read from the environment only (`API_KEY`, then
//! `GEMINI_API_KEY`). Everything else (model, endpoint, timeout) comes from an
//! optional TOML file:
//!
//! ```toml
//! [advisory]
//! model = "gemini-2.5-flash"
//! endpoint = "https://generativelanguage.googleapis.com"
//! timeout_secs = 30
//! ```
//!
//! A credential written into the file is rejected as an unknown field.

use std::{fmt, path::Path};

use serde::Deserialize;

use simrs_contracts::error::{SimrsError, SimrsResult};

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Environment variables consulted for the credential, in order.
pub const API_KEY_VARS: [&str; 2] = ["API_KEY", "GEMINI_API_KEY"];

/// Non-secret settings for the advisory client.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AdvisorySettings {
    pub model: String,
    pub endpoint: String,
    pub timeout_secs: u64,
}

impl Default for AdvisorySettings {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    #[serde(default)]
    advisory: AdvisorySettings,
}

/// Complete configuration: settings plus the (optional) credential.
///
/// Without a credential the client is disabled and every call short-circuits
/// to `ServiceUnavailable::MissingCredential`.
#[derive(Clone, Default)]
pub struct AdvisoryConfig {
    api_key: Option<String>,
    pub settings: AdvisorySettings,
}

impl AdvisoryConfig {
    /// Default settings with the credential taken from the environment.
    pub fn from_env() -> Self {
        Self {
            api_key: credential_from(|name| std::env::var(name).ok()),
            settings: AdvisorySettings::default(),
        }
    }

    /// Parse `s` as a TOML configuration file; the credential still comes
    /// from the environment.
    ///
    /// Returns `SimrsError::ConfigError` if the TOML is malformed or carries
    /// unknown keys.
    pub fn from_toml_str(s: &str) -> SimrsResult<Self> {
        let file: ConfigFile = toml::from_str(s).map_err(|e| SimrsError::ConfigError {
            reason: format!("failed to parse configuration TOML: {}", e),
        })?;
        if file.advisory.timeout_secs == 0 {
            return Err(SimrsError::ConfigError {
                reason: "advisory.timeout_secs must be greater than zero".to_string(),
            });
        }
        Ok(Self {
            api_key: credential_from(|name| std::env::var(name).ok()),
            settings: file.advisory,
        })
    }

    /// Read the file at `path` and parse it with `from_toml_str`.
    pub fn from_file(path: &Path) -> SimrsResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| SimrsError::ConfigError {
            reason: format!("failed to read configuration file '{}': {}", path.display(), e),
        })?;
        Self::from_toml_str(&contents)
    }

    /// Replace the credential. Blank keys count as absent.
    pub fn with_api_key(mut self, api_key: Option<String>) -> Self {
        self.api_key = api_key.filter(|k| !k.trim().is_empty());
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.settings.model = model.into();
        self
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.settings.endpoint = endpoint.into();
        self
    }

    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }

    pub fn has_credential(&self) -> bool {
        self.api_key.is_some()
    }
}

impl fmt::Debug for AdvisoryConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdvisoryConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("settings", &self.settings)
            .finish()
    }
}

/// Pick the first non-blank credential from `API_KEY_VARS`.
fn credential_from(lookup: impl Fn(&str) -> Option<String>) -> Option<String> {
    API_KEY_VARS
        .iter()
        .filter_map(|name| lookup(*name))
        .map(|value| value.trim().to_string())
        .find(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_in(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| map.get(name).cloned()
    }

    // ── Credential lookup ────────────────────────────────────────────────────

    #[test]
    fn credential_prefers_api_key() {
        let found = credential_from(lookup_in(&[("API_KEY", "a"), ("GEMINI_API_KEY", "b")]));
        assert_eq!(found.as_deref(), Some("a"));
    }

    #[test]
    fn credential_falls_back_to_gemini_api_key() {
        let found = credential_from(lookup_in(&[("API_KEY", "   "), ("GEMINI_API_KEY", "b")]));
        assert_eq!(found.as_deref(), Some("b"));
    }

    #[test]
    fn credential_absent_when_nothing_set() {
        assert_eq!(credential_from(lookup_in(&[])), None);
    }

    #[test]
    fn blank_override_disables_client() {
        let config = AdvisoryConfig::default().with_api_key(Some("  ".to_string()));
        assert!(!config.has_credential());

        let config = config.with_api_key(Some("secret".to_string()));
        assert_eq!(config.api_key(), Some("secret"));
    }

    #[test]
    fn debug_output_redacts_credential() {
        let config = AdvisoryConfig::default().with_api_key(Some("secret-value".to_string()));
        let rendered = format!("{:?}", config);
        assert!(!rendered.contains("secret-value"));
        assert!(rendered.contains("<redacted>"));
    }

    // ── TOML file ────────────────────────────────────────────────────────────

    #[test]
    fn empty_file_uses_defaults() {
        let config = AdvisoryConfig::from_toml_str("").unwrap();
        assert_eq!(config.settings, AdvisorySettings::default());
        assert_eq!(config.settings.model, "gemini-2.5-flash");
    }

    #[test]
    fn file_overrides_settings() {
        let config = AdvisoryConfig::from_toml_str(
            r#"
[advisory]
model = "gemini-2.5-pro"
timeout_secs = 5
"#,
        )
        .unwrap();
        assert_eq!(config.settings.model, "gemini-2.5-pro");
        assert_eq!(config.settings.timeout_secs, 5);
        assert_eq!(config.settings.endpoint, DEFAULT_ENDPOINT);
    }

    #[test]
    fn credential_in_file_is_rejected() {
        let err = AdvisoryConfig::from_toml_str(
            r#"
[advisory]
api_key = "do-not-put-me-here"
"#,
        )
        .unwrap_err();
        assert!(matches!(err, SimrsError::ConfigError { .. }));
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let err = AdvisoryConfig::from_toml_str("[advisory]\ntimeout_secs = 0\n").unwrap_err();
        assert!(err.to_string().contains("timeout_secs"));
    }

    #[test]
    fn missing_file_is_a_config_error() {
        let err = AdvisoryConfig::from_file(Path::new("/nonexistent/simrs.toml")).unwrap_err();
        assert!(err.to_string().contains("failed to read configuration file"));
    }
}
