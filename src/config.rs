use serde::Deserialize;
use std::{fs, path::Path};

use tracing::level_filters::LevelFilter;

use crate::errors::StartupError;

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct AppConfig {
    /// HTTP port to listen on.
    pub port: u16,

    /// Log level for tracing (e.g. "info", "debug").
    pub log_level: String,

    pub server_version: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: 8000,
            log_level: "info".to_string(),
            server_version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

impl AppConfig {
    pub fn load_from_file(path: &Path) -> Result<Self, StartupError> {
        let file = fs::read_to_string(path).map_err(|source| StartupError::ConfigRead {
            path: path.display().to_string(),
            source,
        })?;

        serde_json::from_str::<AppConfig>(&file).map_err(|source| StartupError::ConfigParse {
            path: path.display().to_string(),
            source,
        })
    }

    /// Max tracing level; unknown names fall back to INFO.
    pub fn level_filter(&self) -> LevelFilter {
        match self.log_level.to_lowercase().as_str() {
            "trace" => LevelFilter::TRACE,
            "debug" => LevelFilter::DEBUG,
            "info"  => LevelFilter::INFO,
            "warn"  => LevelFilter::WARN,
            "error" => LevelFilter::ERROR,
            _ => LevelFilter::INFO,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::io::Write;

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn full_file_is_loaded() {
        let file = write_config(r#"{"port": 9000, "log_level": "debug", "server_version": "1.2.3"}"#);
        let cfg = AppConfig::load_from_file(file.path()).unwrap();

        assert_eq!(cfg.port, 9000);
        assert_eq!(cfg.level_filter(), LevelFilter::DEBUG);
        assert_eq!(cfg.server_version, "1.2.3");
    }

    #[test]
    fn missing_fields_use_defaults() {
        let file = write_config(r#"{"log_level": "WARN"}"#);
        let cfg = AppConfig::load_from_file(file.path()).unwrap();

        assert_eq!(cfg.port, 8000);
        assert_eq!(cfg.level_filter(), LevelFilter::WARN);
        assert_eq!(cfg.server_version, env!("CARGO_PKG_VERSION"));
    }

    #[test]
    fn invalid_json_is_an_error() {
        let file = write_config("{ port: ");
        let err = AppConfig::load_from_file(file.path()).unwrap_err();
        assert!(matches!(err, StartupError::ConfigParse { .. }));
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = AppConfig::load_from_file(&dir.path().join("config.json")).unwrap_err();
        assert!(matches!(err, StartupError::ConfigRead { .. }));
    }

    #[test]
    fn unknown_level_falls_back_to_info() {
        let cfg = AppConfig {
            log_level: "loud".into(),
            ..AppConfig::default()
        };
        assert_eq!(cfg.level_filter(), LevelFilter::INFO);
    }
}
