//! Configuration for SwapDesk
//!
//! Example config:
//! ```toml
//! [api]
//! base_url = "https://swap.example.com/api/v1"
//! data_source = "http"
//!
//! [mock]
//! latency_ms = 300
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{Error, Result};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardConfig {
    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub session: SessionConfig,

    #[serde(default)]
    pub mock: MockConfig,

    #[serde(default)]
    pub ui: UiConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Where entity collections come from
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataSource {
    #[default]
    Mock,
    Http,
}

impl DataSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mock => "mock",
            Self::Http => "http",
        }
    }

    pub fn parse(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mock" => Ok(Self::Mock),
            "http" => Ok(Self::Http),
            other => Err(Error::Config(format!("unknown data source: {}", other))),
        }
    }
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default)]
    pub data_source: DataSource,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            data_source: DataSource::default(),
        }
    }
}

impl ApiConfig {
    /// Collection URL for a REST path such as `/users`
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }
}

fn default_base_url() -> String {
    crate::DEFAULT_API_BASE.to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionConfig {
    #[serde(default = "default_storage_key")]
    pub storage_key: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            storage_key: default_storage_key(),
        }
    }
}

fn default_storage_key() -> String {
    crate::DEFAULT_SESSION_KEY.to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MockConfig {
    /// Simulated latency added to every mock call
    #[serde(default = "default_latency_ms")]
    pub latency_ms: u32,

    #[serde(default = "default_admin_email")]
    pub admin_email: String,

    #[serde(default = "default_admin_password")]
    pub admin_password: String,
}

impl Default for MockConfig {
    fn default() -> Self {
        Self {
            latency_ms: default_latency_ms(),
            admin_email: default_admin_email(),
            admin_password: default_admin_password(),
        }
    }
}

fn default_latency_ms() -> u32 {
    250
}

fn default_admin_email() -> String {
    "admin@swapdesk.local".to_string()
}

fn default_admin_password() -> String {
    "admin".to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UiConfig {
    #[serde(default = "default_toast_duration_ms")]
    pub toast_duration_ms: u32,

    /// Placeholder rows shown while a table loads
    #[serde(default = "default_skeleton_rows")]
    pub skeleton_rows: usize,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            toast_duration_ms: default_toast_duration_ms(),
            skeleton_rows: default_skeleton_rows(),
        }
    }
}

fn default_toast_duration_ms() -> u32 {
    4000
}

fn default_skeleton_rows() -> usize {
    5
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

impl DashboardConfig {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::Config(format!("Failed to parse config: {}", e)))
    }

    pub fn from_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Failed to read config: {}", e)))?;
        Self::from_toml_str(&content)
    }

    /// Defaults overridden by `SWAPDESK_*` environment variables
    pub fn from_env() -> Self {
        Self::from_vars(std::env::vars())
    }

    /// Defaults overridden by `SWAPDESK_*` pairs. Unparsable values are
    /// skipped with a warning.
    pub fn from_vars(vars: impl IntoIterator<Item = (String, String)>) -> Self {
        let mut config = Self::default();
        for (name, value) in vars {
            let Some(key) = env_key(&name) else {
                continue;
            };
            if let Err(e) = config.set(key, &value) {
                tracing::warn!(variable = %name, error = %e, "Ignoring environment override");
            }
        }
        config
    }

    /// Set a value by its dotted key, e.g. `api.base_url`
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "api.base_url" => {
                if value.trim().is_empty() {
                    return Err(Error::Config("api.base_url cannot be empty".to_string()));
                }
                self.api.base_url = value.trim().to_string();
            }
            "api.data_source" => self.api.data_source = DataSource::parse(value)?,
            "session.storage_key" => self.session.storage_key = value.to_string(),
            "mock.latency_ms" => self.mock.latency_ms = parse_number(key, value)?,
            "mock.admin_email" => self.mock.admin_email = value.to_string(),
            "mock.admin_password" => self.mock.admin_password = value.to_string(),
            "ui.toast_duration_ms" => self.ui.toast_duration_ms = parse_number(key, value)?,
            "ui.skeleton_rows" => self.ui.skeleton_rows = parse_number(key, value)?,
            "logging.level" => self.logging.level = value.to_ascii_lowercase(),
            _ => return Err(Error::Config(format!("Unknown config key: {}", key))),
        }
        Ok(())
    }

    /// Get a value by its dotted key. The mock password is masked.
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "api.base_url" => Some(self.api.base_url.clone()),
            "api.data_source" => Some(self.api.data_source.to_string()),
            "session.storage_key" => Some(self.session.storage_key.clone()),
            "mock.latency_ms" => Some(self.mock.latency_ms.to_string()),
            "mock.admin_email" => Some(self.mock.admin_email.clone()),
            "mock.admin_password" => Some("***".to_string()),
            "ui.toast_duration_ms" => Some(self.ui.toast_duration_ms.to_string()),
            "ui.skeleton_rows" => Some(self.ui.skeleton_rows.to_string()),
            "logging.level" => Some(self.logging.level.clone()),
            _ => None,
        }
    }

    /// All settable keys
    pub fn keys() -> &'static [&'static str] {
        &[
            "api.base_url",
            "api.data_source",
            "session.storage_key",
            "mock.latency_ms",
            "mock.admin_email",
            "mock.admin_password",
            "ui.toast_duration_ms",
            "ui.skeleton_rows",
            "logging.level",
        ]
    }

    pub fn uses_mock(&self) -> bool {
        self.api.data_source == DataSource::Mock
    }
}

fn env_key(name: &str) -> Option<&'static str> {
    let key = match name {
        "SWAPDESK_API_URL" => "api.base_url",
        "SWAPDESK_DATA_SOURCE" => "api.data_source",
        "SWAPDESK_SESSION_KEY" => "session.storage_key",
        "SWAPDESK_MOCK_LATENCY_MS" => "mock.latency_ms",
        "SWAPDESK_ADMIN_EMAIL" => "mock.admin_email",
        "SWAPDESK_ADMIN_PASSWORD" => "mock.admin_password",
        "SWAPDESK_TOAST_DURATION_MS" => "ui.toast_duration_ms",
        "SWAPDESK_LOG_LEVEL" => "logging.level",
        _ => return None,
    };
    Some(key)
}

fn parse_number<T: std::str::FromStr>(key: &str, value: &str) -> Result<T> {
    value
        .trim()
        .parse()
        .map_err(|_| Error::Config(format!("{} expects a number, got {:?}", key, value)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = DashboardConfig::default();
        assert_eq!(config.api.base_url, "/api/v1");
        assert_eq!(config.api.data_source, DataSource::Mock);
        assert_eq!(config.session.storage_key, "swapdesk_session");
        assert_eq!(config.ui.toast_duration_ms, 4000);
        assert!(config.uses_mock());
    }

    #[test]
    fn test_partial_toml() {
        let config = DashboardConfig::from_toml_str(
            r#"
            [api]
            data_source = "http"

            [mock]
            latency_ms = 0
            "#,
        )
        .unwrap();
        assert_eq!(config.api.data_source, DataSource::Http);
        assert_eq!(config.api.base_url, "/api/v1");
        assert_eq!(config.mock.latency_ms, 0);
        assert_eq!(config.mock.admin_email, "admin@swapdesk.local");
    }

    #[test]
    fn test_invalid_toml() {
        let err = DashboardConfig::from_toml_str("[api]\ndata_source = \"ftp\"").unwrap_err();
        assert_eq!(err.code(), "ConfigError");
    }

    #[test]
    fn test_env_overrides() {
        let config = DashboardConfig::from_vars(vec![
            ("SWAPDESK_API_URL".to_string(), "https://swap.example.com/api/v1/".to_string()),
            ("SWAPDESK_DATA_SOURCE".to_string(), "HTTP".to_string()),
            ("SWAPDESK_MOCK_LATENCY_MS".to_string(), "soon".to_string()),
            ("PATH".to_string(), "/usr/bin".to_string()),
        ]);
        assert_eq!(config.api.data_source, DataSource::Http);
        assert_eq!(config.api.url("/users"), "https://swap.example.com/api/v1/users");
        assert_eq!(config.mock.latency_ms, 250);
    }

    #[test]
    fn test_set_and_get() {
        let mut config = DashboardConfig::default();
        config.set("ui.skeleton_rows", "8").unwrap();
        assert_eq!(config.get("ui.skeleton_rows").as_deref(), Some("8"));
        assert_eq!(config.get("mock.admin_password").as_deref(), Some("***"));
        assert!(config.set("api.base_url", " ").is_err());
        assert!(config.set("nope", "1").is_err());

        for key in DashboardConfig::keys() {
            assert!(config.get(key).is_some(), "missing getter for {}", key);
        }
    }
}
