// src/config.rs
//! Runtime configuration: `config.yaml` sections picked by environment,
//! with environment variable overrides on top.

use anyhow::{Context, Result};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::types::FieldAliases;

pub const DEFAULT_CONFIG_FILE: &str = "config.yaml";

/// Unreserved characters stay as they are inside a path segment.
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchMode {
    /// `skills=<text>` form post to the jobs endpoint.
    #[default]
    Form,
    /// `{hardSkills, softSkills}` JSON post to the search endpoint.
    Json,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Endpoints {
    pub get_jobs: String,
    pub search: String,
    pub profile: String,
    pub profile_photo: String,
    /// `{id}` is replaced with the job id.
    pub apply: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            get_jobs: "/get_jobs".to_string(),
            search: "/search".to_string(),
            profile: "/api/profile".to_string(),
            profile_photo: "/api/profile/photo".to_string(),
            apply: "/api/jobs/{id}/apply".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub backend_url: String,
    pub timeout_seconds: u64,
    pub search_mode: SearchMode,
    pub endpoints: Endpoints,
    pub store_path: PathBuf,
    pub title_aliases: FieldAliases,
    pub max_skill_badges: usize,
    pub photo_url_prefix: String,
    pub user_id: Option<String>,
    pub log_file: Option<PathBuf>,
    pub port: u16,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            backend_url: "http://127.0.0.1:5000".to_string(),
            timeout_seconds: 30,
            search_mode: SearchMode::Form,
            endpoints: Endpoints::default(),
            store_path: PathBuf::from("data/local_storage.json"),
            title_aliases: FieldAliases::default(),
            max_skill_badges: 8,
            photo_url_prefix: "/static/".to_string(),
            user_id: None,
            log_file: None,
            port: 8000,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    local: AppConfig,
    #[serde(default)]
    production: AppConfig,
}

impl AppConfig {
    /// Load `config.yaml` from the working directory, or defaults when it
    /// does not exist.
    pub fn load() -> Result<Self> {
        Self::load_from(Path::new(DEFAULT_CONFIG_FILE))
    }

    /// Silent; callers log which source was used.
    pub fn load_from(path: &Path) -> Result<Self> {
        let environment = Self::get_environment();

        let config = if path.exists() {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            Self::from_yaml(&content, &environment)
                .with_context(|| format!("Failed to parse {}", path.display()))?
        } else {
            Self::default()
        };

        Ok(config.with_env_overrides(|key| std::env::var(key).ok()))
    }

    pub fn from_yaml(content: &str, environment: &str) -> Result<Self> {
        let file: ConfigFile = serde_yaml::from_str(content)?;
        Ok(match environment {
            "production" => file.production,
            _ => file.local,
        })
    }

    pub fn get_environment() -> String {
        std::env::var("JOBBOARD_ENV")
            .or_else(|_| std::env::var("ENVIRONMENT"))
            .unwrap_or_else(|_| "local".to_string())
    }

    pub fn with_env_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(url) = lookup("JOBBOARD_BACKEND_URL") {
            self.backend_url = url;
        }
        if let Some(path) = lookup("JOBBOARD_STORE_PATH") {
            self.store_path = PathBuf::from(path);
        }
        if let Some(user) = lookup("JOBBOARD_USER_ID") {
            self.user_id = Some(user);
        }
        self
    }

    /// Absolute URL for an endpoint path.
    pub fn endpoint_url(&self, path: &str) -> String {
        format!("{}{}", self.backend_url.trim_end_matches('/'), path)
    }

    pub fn apply_url(&self, job_id: &str) -> String {
        self.endpoint_url(&self.endpoints.apply.replace("{id}", &path_segment(job_id)))
    }
}

/// Percent-encodes `value` for use as one URL path segment.
pub fn path_segment(value: &str) -> String {
    utf8_percent_encode(value, PATH_SEGMENT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
local:
  backend_url: "http://localhost:5000"
  search_mode: json
production:
  backend_url: "https://jobs.example.com"
  title_aliases: ["title", "headline"]
  max_skill_badges: 5
"#;

    #[test]
    fn test_sections_by_environment() {
        let local = AppConfig::from_yaml(SAMPLE, "local").unwrap();
        assert_eq!(local.backend_url, "http://localhost:5000");
        assert_eq!(local.search_mode, SearchMode::Json);
        assert_eq!(local.max_skill_badges, 8);

        let prod = AppConfig::from_yaml(SAMPLE, "production").unwrap();
        assert_eq!(prod.search_mode, SearchMode::Form);
        assert_eq!(prod.max_skill_badges, 5);
        assert_eq!(prod.title_aliases, FieldAliases::new(["title", "headline"]));
    }

    #[test]
    fn test_env_overrides() {
        let config = AppConfig::default().with_env_overrides(|key| match key {
            "JOBBOARD_BACKEND_URL" => Some("http://backend:9000".to_string()),
            "JOBBOARD_USER_ID" => Some("7".to_string()),
            _ => None,
        });
        assert_eq!(config.backend_url, "http://backend:9000");
        assert_eq!(config.user_id.as_deref(), Some("7"));
        assert_eq!(config.store_path, PathBuf::from("data/local_storage.json"));
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::TempDir::new().unwrap();
        let config = AppConfig::load_from(&dir.path().join("absent.yaml")).unwrap();
        assert_eq!(config.max_skill_badges, 8);
        assert_eq!(config.port, 8000);
        assert_eq!(config.endpoints, Endpoints::default());
    }

    #[test]
    fn test_endpoint_urls() {
        let config = AppConfig {
            backend_url: "http://host:1/".to_string(),
            ..AppConfig::default()
        };
        assert_eq!(config.endpoint_url("/get_jobs"), "http://host:1/get_jobs");
        assert_eq!(config.apply_url("12"), "http://host:1/api/jobs/12/apply");
        assert_eq!(config.apply_url("a b/c"), "http://host:1/api/jobs/a%20b%2Fc/apply");
        assert_eq!(config.apply_url("x-1_a.b~"), "http://host:1/api/jobs/x-1_a.b~/apply");
        assert_eq!(config.apply_url("é?#"), "http://host:1/api/jobs/%C3%A9%3F%23/apply");
    }
}
