//! CLI configuration from environment.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use voyage_core::RouteConfig;

pub const DEFAULT_LOG_FILTER: &str = "voyage_cli=info,voyage_core=info";

#[derive(Debug, Clone)]
pub struct Config {
    /// Where feed files live unless a flag points elsewhere
    pub data_dir: PathBuf,
    /// JSON file overriding route thresholds
    pub route_config: Option<PathBuf>,
    pub log_filter: String,
    pub log_json: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            route_config: None,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
            log_json: false,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            data_dir: env::var("VOYAGE_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.data_dir),
            route_config: env::var("VOYAGE_ROUTE_CONFIG")
                .ok()
                .filter(|s| !s.trim().is_empty())
                .map(PathBuf::from),
            log_filter: env::var("VOYAGE_LOG").unwrap_or(defaults.log_filter),
            log_json: env::var("VOYAGE_LOG_FORMAT")
                .is_ok_and(|format| format.eq_ignore_ascii_case("json")),
        }
    }

    /// `file` under the data directory, unless a flag overrides it.
    pub fn data_file(&self, overridden: Option<&Path>, file: &str) -> PathBuf {
        overridden
            .map(Path::to_path_buf)
            .unwrap_or_else(|| self.data_dir.join(file))
    }

    /// Route thresholds, read from the override file when one is set.
    pub fn route_config(&self) -> Result<RouteConfig> {
        let Some(path) = &self.route_config else {
            return Ok(RouteConfig::default());
        };
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading route config {}", path.display()))?;
        serde_json::from_str(&text)
            .with_context(|| format!("parsing route config {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn flags_override_data_dir() {
        let config = Config {
            data_dir: PathBuf::from("/srv/feeds"),
            ..Config::default()
        };
        assert_eq!(
            config.data_file(None, "tracking.json"),
            PathBuf::from("/srv/feeds/tracking.json")
        );
        assert_eq!(
            config.data_file(Some(Path::new("mine.json")), "tracking.json"),
            PathBuf::from("mine.json")
        );
    }

    #[test]
    fn route_config_file_overrides_some_thresholds() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"medium_haul_km": 1500, "reconnect_dense_points": 4}}"#).unwrap();
        let config = Config {
            route_config: Some(file.path().to_path_buf()),
            ..Config::default()
        };
        let route = config.route_config().unwrap();
        assert_eq!(route.medium_haul_km, 1500.0);
        assert_eq!(route.reconnect_dense_points, 4);
        assert_eq!(route.long_haul_km, 5000.0);
    }

    #[test]
    fn unreadable_route_config_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config {
            route_config: Some(dir.path().join("missing.json")),
            ..Config::default()
        };
        assert!(config.route_config().is_err());
        assert_eq!(Config::default().route_config().unwrap(), RouteConfig::default());
    }
}
