//! Application configuration.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{GtError, GtResult};

/// Global configuration for tools built on gtcompose.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ComposeConfig {
    /// Directory where packages are written when no explicit path is given.
    pub output_dir: PathBuf,

    /// Package writing settings.
    pub export: ExportSettings,

    /// Logging configuration.
    pub logging: LoggingConfig,
}

/// Settings for the XML writer and package naming.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportSettings {
    /// Spaces per nesting level in `document.xml`.
    pub indent: usize,

    /// Encoding label written into the `document.xml` declaration.
    pub declared_encoding: String,

    /// File extension of the package, without the dot.
    pub package_extension: String,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "gtcompose_export=debug,warn").
    pub level: String,

    /// Whether to output structured JSON logs.
    pub json: bool,
}

impl Default for ComposeConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            export: ExportSettings::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            indent: 2,
            declared_encoding: "utf-16".to_string(),
            package_extension: "gtzip".to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

impl ComposeConfig {
    /// Load config from the standard location, falling back to defaults.
    pub fn load() -> Self {
        let config_path = config_file_path();
        if !config_path.exists() {
            return Self::default();
        }
        Self::load_from(&config_path).unwrap_or_else(|e| {
            tracing::warn!(path = %config_path.display(), error = %e, "Ignoring config file");
            Self::default()
        })
    }

    /// Load config from an explicit file.
    pub fn load_from(path: &Path) -> GtResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| GtError::config(format!("cannot read {}: {e}", path.display())))?;
        serde_json::from_str(&content)
            .map_err(|e| GtError::config(format!("cannot parse {}: {e}", path.display())))
    }

    /// Save config to the standard location.
    pub fn save(&self) -> GtResult<()> {
        let config_path = config_file_path();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(&config_path, json).map_err(|e| GtError::write(config_path, e))
    }

    /// Output path for a package named `stem` inside `output_dir`.
    pub fn package_path(&self, stem: &str) -> PathBuf {
        self.output_dir
            .join(format!("{stem}.{}", self.export.package_extension))
    }
}

/// Standard config file location.
fn config_file_path() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
            PathBuf::from(home).join(".config")
        });
    base.join("gtcompose").join("config.json")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_defaults_match_package_format() {
        let settings = ExportSettings::default();
        assert_eq!(settings.indent, 2);
        assert_eq!(settings.declared_encoding, "utf-16");
        assert_eq!(settings.package_extension, "gtzip");
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let config: ComposeConfig =
            serde_json::from_str(r#"{ "export": { "indent": 4 } }"#).unwrap();
        assert_eq!(config.export.indent, 4);
        assert_eq!(config.export.package_extension, "gtzip");
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_load_from_reports_parse_errors_as_config() {
        let path = std::env::temp_dir().join("gtcompose_test_bad_config.json");
        std::fs::write(&path, "{ not json").unwrap();
        let err = ComposeConfig::load_from(&path).unwrap_err();
        assert!(matches!(err, GtError::Config { .. }));
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_package_path_uses_extension() {
        let config = ComposeConfig {
            output_dir: PathBuf::from("out"),
            ..Default::default()
        };
        assert_eq!(
            config.package_path("lower_third"),
            PathBuf::from("out").join("lower_third.gtzip")
        );
    }
}
