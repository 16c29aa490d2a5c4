//! Runtime configuration for the agent boundary.
//!
//! The configuration is resolved once at startup into an explicit
//! [`AgentConfig`] value and passed by reference from then on; nothing in
//! the request path reads the environment. The API key comes from the
//! `GEMINI_API_KEY` environment variable only. Model, endpoint, and timeout
//! may additionally be supplied by an optional TOML file, with environment
//! values taking precedence over file values.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta/models";
const DEFAULT_TIMEOUT_SECS: u64 = 60;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required environment variable {0} (Gemini API key)")]
    MissingApiKey(&'static str),
    #[error("invalid value for {var}: {value:?}")]
    Invalid { var: &'static str, value: String },
}

/// Everything the agent boundary needs: credential, model identifier,
/// endpoint, and the per-call timeout.
#[derive(Debug, Clone)]
pub struct AgentConfig {
    pub api_key: String,
    pub model: String,
    pub endpoint: String,
    pub timeout: Duration,
}

/// On-disk TOML configuration. All fields optional so partial configs work.
/// The API key is deliberately absent: credentials are env-only.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConfigFile {
    pub model: Option<String>,
    pub endpoint: Option<String>,
    pub timeout_secs: Option<u64>,
}

/// Platform config directory path: `<config_dir>/pdfchat/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("pdfchat").join("config.toml"))
}

/// Load config by cascading CWD `.pdfchat.toml` over the platform config.
/// CWD values override platform values.
pub fn load_config_file() -> ConfigFile {
    let platform = config_path().and_then(|p| load_from_path(&p));
    let cwd = load_from_path(Path::new(".pdfchat.toml"));

    match (platform, cwd) {
        (None, None) => ConfigFile::default(),
        (Some(p), None) => p,
        (None, Some(c)) => c,
        (Some(p), Some(c)) => merge(p, c),
    }
}

/// Load a config from a specific path. Returns `None` if the file doesn't
/// exist or can't be parsed.
pub fn load_from_path(path: &Path) -> Option<ConfigFile> {
    let content = std::fs::read_to_string(path).ok()?;
    toml::from_str(&content).ok()
}

/// Merge two configs: `overlay` values take precedence over `base`.
pub fn merge(base: ConfigFile, overlay: ConfigFile) -> ConfigFile {
    ConfigFile {
        model: overlay.model.or(base.model),
        endpoint: overlay.endpoint.or(base.endpoint),
        timeout_secs: overlay.timeout_secs.or(base.timeout_secs),
    }
}

impl AgentConfig {
    /// Resolve the full configuration from the environment plus the optional
    /// config file cascade. Fails when `GEMINI_API_KEY` is absent so that
    /// startup can refuse to serve with a diagnostic naming the setting.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::resolve(
            env_var("GEMINI_API_KEY"),
            env_var("PDFCHAT_MODEL"),
            env_var("PDFCHAT_ENDPOINT"),
            env_var("PDFCHAT_AGENT_TIMEOUT_SECS"),
            load_config_file(),
        )
    }

    /// Deterministic core of [`from_env`], with every input explicit.
    pub fn resolve(
        api_key: Option<String>,
        model: Option<String>,
        endpoint: Option<String>,
        timeout_secs: Option<String>,
        file: ConfigFile,
    ) -> Result<Self, ConfigError> {
        let api_key = api_key.ok_or(ConfigError::MissingApiKey("GEMINI_API_KEY"))?;

        let model = model
            .or(file.model)
            .unwrap_or_else(|| DEFAULT_MODEL.to_string());

        let endpoint = endpoint
            .or(file.endpoint)
            .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string())
            .trim_end_matches('/')
            .to_string();

        let timeout_secs = match timeout_secs {
            Some(raw) => raw.parse::<u64>().map_err(|_| ConfigError::Invalid {
                var: "PDFCHAT_AGENT_TIMEOUT_SECS",
                value: raw,
            })?,
            None => file.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS),
        };

        Ok(AgentConfig {
            api_key,
            model,
            endpoint,
            timeout: Duration::from_secs(timeout_secs),
        })
    }
}

/// Read an env var, treating empty values as absent.
fn env_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_api_key_names_the_variable() {
        let err =
            AgentConfig::resolve(None, None, None, None, ConfigFile::default()).unwrap_err();
        assert!(err.to_string().contains("GEMINI_API_KEY"));
    }

    #[test]
    fn defaults_apply_when_nothing_else_is_set() {
        let config =
            AgentConfig::resolve(Some("key".into()), None, None, None, ConfigFile::default())
                .unwrap();
        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.timeout, Duration::from_secs(60));
    }

    #[test]
    fn env_wins_over_file() {
        let file = ConfigFile {
            model: Some("file-model".into()),
            endpoint: Some("https://file.example/v1".into()),
            timeout_secs: Some(10),
        };
        let config = AgentConfig::resolve(
            Some("key".into()),
            Some("env-model".into()),
            None,
            None,
            file,
        )
        .unwrap();
        assert_eq!(config.model, "env-model");
        assert_eq!(config.endpoint, "https://file.example/v1");
        assert_eq!(config.timeout, Duration::from_secs(10));
    }

    #[test]
    fn trailing_slash_stripped_from_endpoint() {
        let config = AgentConfig::resolve(
            Some("key".into()),
            None,
            Some("https://proxy.example/models/".into()),
            None,
            ConfigFile::default(),
        )
        .unwrap();
        assert_eq!(config.endpoint, "https://proxy.example/models");
    }

    #[test]
    fn bad_timeout_is_rejected() {
        let err = AgentConfig::resolve(
            Some("key".into()),
            None,
            None,
            Some("soon".into()),
            ConfigFile::default(),
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { .. }));
    }

    #[test]
    fn file_merge_prefers_overlay() {
        let base = ConfigFile {
            model: Some("base".into()),
            endpoint: None,
            timeout_secs: Some(5),
        };
        let overlay = ConfigFile {
            model: Some("overlay".into()),
            endpoint: Some("https://o.example".into()),
            timeout_secs: None,
        };
        let merged = merge(base, overlay);
        assert_eq!(merged.model.as_deref(), Some("overlay"));
        assert_eq!(merged.endpoint.as_deref(), Some("https://o.example"));
        assert_eq!(merged.timeout_secs, Some(5));
    }
}
