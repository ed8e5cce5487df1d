//! TOML-based board configuration.

use std::fs;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::assets::cards::{DEMAND_DASHBOARD_URL, DashboardLinks, SUPPLY_DASHBOARD_URL};
use crate::source::{DEFAULT_PAGE_SIZE, PageRequest};

/// Environment variable overriding `api.base_url`.
pub const ENV_API_URL: &str = "ASSET_BOARD_API_URL";
/// Environment variable overriding `api.token`.
pub const ENV_TOKEN: &str = "ASSET_BOARD_TOKEN";

/// Largest page the backend is asked for.
const MAX_PAGE_SIZE: usize = 1000;

/// Top-level configuration parsed from TOML.
///
/// Every section has defaults, so an empty file is valid. Load with
/// [`BoardConfig::from_toml_file`] or start from [`BoardConfig::default`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BoardConfig {
    /// Backend connection.
    #[serde(default)]
    pub api: ApiConfig,
    /// Asset list paging.
    #[serde(default)]
    pub paging: PagingConfig,
    /// External analytics dashboards linked from cards.
    #[serde(default)]
    pub dashboards: DashboardConfig,
}

/// Backend connection parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ApiConfig {
    /// Base URL the `/api/v1/...` paths are appended to.
    pub base_url: String,
    /// Bearer token sent with every request.
    pub token: Option<String>,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            token: None,
            timeout_secs: 10,
        }
    }
}

/// Asset list paging.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PagingConfig {
    /// Assets per page.
    pub page_size: usize,
}

impl Default for PagingConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// Dashboard URLs per sector.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DashboardConfig {
    pub demand_url: String,
    pub supply_url: String,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            demand_url: DEMAND_DASHBOARD_URL.to_string(),
            supply_url: SUPPLY_DASHBOARD_URL.to_string(),
        }
    }
}

/// Configuration error with field path and constraint description.
#[derive(Debug, Error)]
#[error("config error: {field}: {message}")]
pub struct ConfigError {
    /// Dotted field path (e.g., `"paging.page_size"`).
    pub field: String,
    /// Human-readable constraint description.
    pub message: String,
}

impl ConfigError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl BoardConfig {
    /// Parses configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or the TOML is invalid.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| {
            ConfigError::new("config", format!("cannot read \"{}\": {e}", path.display()))
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the TOML is invalid or contains unknown fields.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError::new("toml", e.to_string()))
    }

    /// Applies `ASSET_BOARD_API_URL` / `ASSET_BOARD_TOKEN` from the process environment.
    pub fn apply_env(&mut self) {
        self.apply_env_from(|key| std::env::var(key).ok());
    }

    /// Applies overrides from an arbitrary variable lookup.
    pub fn apply_env_from(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup(ENV_API_URL) {
            self.api.base_url = url;
        }
        if let Some(token) = lookup(ENV_TOKEN) {
            self.api.token = Some(token);
        }
    }

    /// Dashboard links for the card presenter.
    pub fn dashboard_links(&self) -> DashboardLinks {
        DashboardLinks {
            demand_url: self.dashboards.demand_url.clone(),
            supply_url: self.dashboards.supply_url.clone(),
        }
    }

    /// First page window for the configured page size.
    pub fn first_page(&self) -> PageRequest {
        PageRequest::first(self.paging.page_size)
    }

    /// Validates all fields and returns a list of errors.
    ///
    /// Returns an empty vector if configuration is valid.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        if !is_http_url(&self.api.base_url) {
            errors.push(ConfigError::new(
                "api.base_url",
                format!("must start with http:// or https://, got \"{}\"", self.api.base_url),
            ));
        }
        if self.api.timeout_secs == 0 {
            errors.push(ConfigError::new("api.timeout_secs", "must be > 0"));
        }

        let size = self.paging.page_size;
        if size == 0 || size > MAX_PAGE_SIZE {
            errors.push(ConfigError::new(
                "paging.page_size",
                format!("must be in [1, {MAX_PAGE_SIZE}]"),
            ));
        }

        for (field, url) in [
            ("dashboards.demand_url", &self.dashboards.demand_url),
            ("dashboards.supply_url", &self.dashboards.supply_url),
        ] {
            if !is_http_url(url) {
                errors.push(ConfigError::new(
                    field,
                    format!("must start with http:// or https://, got \"{url}\""),
                ));
            }
        }

        errors
    }
}

fn is_http_url(s: &str) -> bool {
    s.starts_with("http://") || s.starts_with("https://")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_valid() {
        let errors = BoardConfig::default().validate();
        assert!(errors.is_empty(), "defaults should be valid: {errors:?}");
    }

    #[test]
    fn valid_toml_parses() {
        let toml = r#"
[api]
base_url = "https://energy.example.com"
token = "secret"
timeout_secs = 3

[paging]
page_size = 25

[dashboards]
demand_url = "https://dash.example.com/demand"
supply_url = "https://dash.example.com/supply"
"#;
        let cfg = BoardConfig::from_toml_str(toml);
        assert!(cfg.is_ok(), "valid TOML should parse: {:?}", cfg.err());
        let cfg = cfg.ok();
        assert_eq!(cfg.as_ref().map(|c| c.paging.page_size), Some(25));
        assert_eq!(
            cfg.as_ref().and_then(|c| c.api.token.as_deref()),
            Some("secret")
        );
        assert_eq!(
            cfg.as_ref().map(|c| c.dashboard_links().supply_url),
            Some("https://dash.example.com/supply".to_string())
        );
    }

    #[test]
    fn partial_toml_uses_defaults() {
        let cfg = BoardConfig::from_toml_str("[paging]\npage_size = 10\n");
        assert!(cfg.is_ok());
        let cfg = cfg.ok();
        assert_eq!(cfg.as_ref().map(|c| c.api.timeout_secs), Some(10));
        assert_eq!(
            cfg.as_ref().map(|c| c.dashboards.demand_url.as_str()),
            Some(DEMAND_DASHBOARD_URL)
        );
        assert_eq!(cfg.as_ref().map(|c| c.first_page().limit), Some(10));
    }

    #[test]
    fn invalid_toml_unknown_field() {
        let result = BoardConfig::from_toml_str("[api]\nbogus_field = true\n");
        assert!(result.is_err());
        assert_eq!(result.err().map(|e| e.field), Some("toml".to_string()));
    }

    #[test]
    fn validation_collects_every_problem() {
        let mut cfg = BoardConfig::default();
        cfg.api.base_url = "localhost:8000".to_string();
        cfg.api.timeout_secs = 0;
        cfg.paging.page_size = 0;
        cfg.dashboards.supply_url = String::new();
        let fields: Vec<String> = cfg.validate().into_iter().map(|e| e.field).collect();
        assert_eq!(
            fields,
            [
                "api.base_url",
                "api.timeout_secs",
                "paging.page_size",
                "dashboards.supply_url"
            ]
        );
    }

    #[test]
    fn env_overrides_apply() {
        let mut cfg = BoardConfig::default();
        cfg.apply_env_from(|key| match key {
            ENV_API_URL => Some("https://override.example.com".to_string()),
            ENV_TOKEN => Some("t0k".to_string()),
            _ => None,
        });
        assert_eq!(cfg.api.base_url, "https://override.example.com");
        assert_eq!(cfg.api.token.as_deref(), Some("t0k"));
    }

    #[test]
    fn missing_file_reports_path() {
        let err = BoardConfig::from_toml_file(Path::new("/nonexistent/board.toml"));
        let err = err.err().map(|e| e.message).unwrap_or_default();
        assert!(err.contains("/nonexistent/board.toml"));
    }
}
