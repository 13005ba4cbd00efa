use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::{BaseDirs, ProjectDirs};
use once_cell::sync::Lazy;
use url::Url;

static DEFAULT_API_URL: &str = "http://localhost:5000";
static ENV_API_URL: &str = "TAREAS_API_URL";
static ENV_DATA_DIR: &str = "TAREAS_DATA_DIR";

static PROJECT_DIRS: Lazy<Option<ProjectDirs>> =
    Lazy::new(|| ProjectDirs::from("dev", "tareas-cli", "tareas"));

#[derive(Debug, Clone)]
pub struct AppConfig {
    api_url: Url,
    data_dir: PathBuf,
}

impl AppConfig {
    /// Construct [`AppConfig`] by resolving the API base URL and the data
    /// directory from the provided overrides, environment variables, and
    /// platform defaults.
    pub fn discover(
        api_url_override: Option<String>,
        data_dir_override: Option<PathBuf>,
    ) -> Result<Self> {
        let api_url = resolve_api_url(api_url_override)?;
        let data_dir = resolve_data_dir(data_dir_override)?;
        if !data_dir.exists() {
            fs::create_dir_all(&data_dir).with_context(|| {
                format!("Failed to create data directory at {}", data_dir.display())
            })?;
        }
        Ok(Self::from_parts(api_url, data_dir))
    }

    /// Construct [`AppConfig`] directly from resolved values.
    pub fn from_parts(api_url: Url, data_dir: PathBuf) -> Self {
        Self { api_url, data_dir }
    }

    pub fn api_url(&self) -> &Url {
        &self.api_url
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

fn resolve_api_url(api_url_override: Option<String>) -> Result<Url> {
    let raw = match api_url_override {
        Some(value) => value,
        None => match env::var(ENV_API_URL) {
            Ok(value) if !value.trim().is_empty() => value,
            _ => DEFAULT_API_URL.to_string(),
        },
    };
    Url::parse(raw.trim()).with_context(|| format!("Invalid API base URL '{}'", raw))
}

fn resolve_data_dir(data_dir_override: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(dir) = data_dir_override {
        return Ok(dir);
    }

    if let Ok(env_dir) = env::var(ENV_DATA_DIR) {
        return Ok(PathBuf::from(env_dir));
    }

    if cfg!(debug_assertions) {
        let manifest_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
        let dev_dir = manifest_dir.join("..").join("tmp").join("dev-tareas");
        return Ok(dev_dir);
    }

    if let Some(project) = &*PROJECT_DIRS {
        return Ok(project.data_dir().to_path_buf());
    }

    if let Some(base) = BaseDirs::new() {
        return Ok(base.home_dir().join(".tareas"));
    }

    Ok(env::current_dir()?.join(".tareas"))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn discover_prefers_explicit_overrides() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::discover(
            Some(String::from("https://tareas.example.com/")),
            Some(dir.path().to_path_buf()),
        )
        .unwrap();

        assert_eq!(config.api_url().as_str(), "https://tareas.example.com/");
        assert_eq!(config.data_dir(), dir.path());
    }

    #[test]
    fn discover_rejects_malformed_urls() {
        let dir = tempfile::tempdir().unwrap();
        let result = AppConfig::discover(
            Some(String::from("not a url")),
            Some(dir.path().to_path_buf()),
        );
        assert!(result.is_err());
    }

    #[test]
    fn discover_creates_the_data_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("nested").join("data");
        let config = AppConfig::discover(None, Some(nested.clone())).unwrap();

        assert_eq!(config.data_dir(), nested);
        assert!(nested.exists());
    }
}
