//! Server-Side Configuration
//!
//! Registration of query templates on the server. The registry is expanded
//! into default request parameters and layered under each client request, so
//! template resolution sees `ssq.query.<selector>` entries without the
//! client having to send them.

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::core::params::RequestParams;
use crate::core::templates::keys;

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub templates: TemplateDefaults,
}

/// Server-side template registrations.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateDefaults {
    /// Registered templates, keyed by selector.
    pub registered: IndexMap<String, String>,
    /// Target parameter for requests that do not name one.
    pub target_param: Option<String>,
    /// Activate template rewriting for requests that do not say otherwise.
    pub enabled: Option<bool>,
}

impl AppConfig {
    /// Load configuration from `~/.config/ssq/config.toml`.
    /// Returns `Default` if the file is missing or unparseable.
    pub fn load() -> Self {
        Self::load_from(&Self::config_path())
    }

    /// Load configuration from an explicit path, with the same fallback
    /// behavior as [`load`](Self::load).
    pub fn load_from(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(contents) => match toml::from_str(&contents) {
                Ok(config) => {
                    log::info!("Loaded config from {}", path.display());
                    config
                }
                Err(e) => {
                    log::warn!(
                        "Failed to parse config at {}: {e} — using defaults",
                        path.display()
                    );
                    Self::default()
                }
            },
            Err(_) => {
                log::debug!("No config file at {} — using defaults", path.display());
                Self::default()
            }
        }
    }

    fn config_path() -> PathBuf {
        dirs::config_dir()
            .map(|d| d.join("ssq").join("config.toml"))
            .unwrap_or_else(|| PathBuf::from("config.toml"))
    }
}

impl TemplateDefaults {
    /// Expand the registry into default request parameters, suitable for
    /// `SearchRequest::with_defaults`. Client-sent parameters always win
    /// over these.
    pub fn default_params(&self) -> RequestParams {
        let mut params = RequestParams::new();
        if let Some(enabled) = self.enabled {
            params.set(keys::SSQ_PREFIX, if enabled { "true" } else { "false" });
        }
        if let Some(ref target) = self.target_param {
            params.set(keys::target_param_key(), target.as_str());
        }
        for (selector, template) in &self.registered {
            params.set(keys::registered_template_key(selector), template.as_str());
        }
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert!(config.templates.registered.is_empty());
        assert!(config.templates.target_param.is_none());
        assert!(config.templates.enabled.is_none());
        assert!(config.templates.default_params().is_empty());
    }

    #[test]
    fn test_config_load_missing_file() {
        let config = AppConfig::load_from(Path::new("/nonexistent/ssq/config.toml"));
        assert!(config.templates.registered.is_empty());
    }

    #[test]
    fn test_parse_registered_templates() {
        let config: AppConfig = toml::from_str(
            r#"
            [templates]
            target_param = "qq"

            [templates.registered]
            q1 = "val1_s:$qq"
            q2 = "field2:$qq"
            "#,
        )
        .unwrap();

        assert_eq!(
            config.templates.registered.get("q1").map(String::as_str),
            Some("val1_s:$qq")
        );

        let defaults = config.templates.default_params();
        assert_eq!(defaults.get("ssq.query.q1"), Some("val1_s:$qq"));
        assert_eq!(defaults.get("ssq.query.q2"), Some("field2:$qq"));
        assert_eq!(defaults.get("ssq.param"), Some("qq"));
        assert!(!defaults.contains("ssq"));
    }

    #[test]
    fn test_enabled_default_expansion() {
        let mut templates = TemplateDefaults::default();
        templates.enabled = Some(true);
        assert_eq!(templates.default_params().get("ssq"), Some("true"));

        templates.enabled = Some(false);
        assert_eq!(templates.default_params().get("ssq"), Some("false"));
    }

    #[test]
    fn test_config_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[templates.registered]\nq1 = \"val1_s:$qq\"").unwrap();

        let config = AppConfig::load_from(file.path());
        assert_eq!(
            config.templates.registered.get("q1").map(String::as_str),
            Some("val1_s:$qq")
        );
    }

    #[test]
    fn test_config_load_unparseable_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "not [valid toml").unwrap();

        let config = AppConfig::load_from(file.path());
        assert!(config.templates.registered.is_empty());
    }
}
