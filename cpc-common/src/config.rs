//! Configuration loading and data folder resolution
//!
//! Data folder resolution priority:
//! 1. Environment variable (`CPC_DATA_FOLDER`)
//! 2. TOML config file (`CPC_CONFIG`, else `<config dir>/cpc/config.toml`)
//! 3. Compiled default (`./data`)
//!
//! A missing config file is not an error; compiled defaults apply. A config
//! file that exists but cannot be parsed is reported as [`Error::Config`].

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable overriding the data folder
pub const DATA_FOLDER_ENV: &str = "CPC_DATA_FOLDER";

/// Environment variable pointing at an explicit config file
pub const CONFIG_FILE_ENV: &str = "CPC_CONFIG";

/// Bootstrap configuration loaded from TOML file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TomlConfig {
    /// Folder holding `sources/` and the merged catalog
    #[serde(default)]
    pub data_folder: Option<PathBuf>,

    /// Source directory, relative to the data folder unless absolute
    #[serde(default)]
    pub sources_dir: Option<PathBuf>,

    /// Output catalog file, relative to the data folder unless absolute
    #[serde(default)]
    pub output_file: Option<PathBuf>,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log file path (optional, logs to stderr if not specified)
    #[serde(default)]
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: None,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Values used when neither environment nor config file say otherwise
#[derive(Debug, Clone)]
pub struct CompiledDefaults {
    pub data_folder: PathBuf,
    pub sources_dir: PathBuf,
    pub output_file: PathBuf,
}

impl Default for CompiledDefaults {
    fn default() -> Self {
        Self {
            data_folder: PathBuf::from("data"),
            sources_dir: PathBuf::from("sources"),
            output_file: PathBuf::from("projects.json"),
        }
    }
}

/// Where the data folder setting came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigOrigin {
    Environment,
    ConfigFile(PathBuf),
    Default,
}

/// Resolved locations of source files and the merged catalog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogPaths {
    pub data_folder: PathBuf,
    pub sources_dir: PathBuf,
    pub output_file: PathBuf,
}

impl CatalogPaths {
    /// Standard layout under a data folder: `sources/` and `projects.json`
    pub fn under(data_folder: impl Into<PathBuf>) -> Self {
        let defaults = CompiledDefaults::default();
        let data_folder = data_folder.into();
        Self {
            sources_dir: data_folder.join(defaults.sources_dir),
            output_file: data_folder.join(defaults.output_file),
            data_folder,
        }
    }

    /// Full path of a source file
    pub fn source_path(&self, source_file: &str) -> PathBuf {
        self.sources_dir.join(source_file)
    }
}

/// Fully resolved configuration for one run
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    pub paths: CatalogPaths,
    pub logging: LoggingConfig,
    pub origin: ConfigOrigin,
}

impl CatalogConfig {
    /// Load configuration from the environment and the config file
    pub fn load() -> Result<Self> {
        let (toml_config, config_path) = match config_file_path() {
            Some(path) => match load_toml_config(&path)? {
                Some(config) => (config, Some(path)),
                None => (TomlConfig::default(), None),
            },
            None => (TomlConfig::default(), None),
        };

        let env_folder = std::env::var(DATA_FOLDER_ENV).ok().filter(|v| !v.is_empty());
        Ok(Self::resolve(toml_config, config_path, env_folder))
    }

    /// Apply the priority order to already-loaded inputs
    pub fn resolve(
        toml_config: TomlConfig,
        config_path: Option<PathBuf>,
        env_folder: Option<String>,
    ) -> Self {
        let defaults = CompiledDefaults::default();

        let (data_folder, origin) = if let Some(folder) = env_folder {
            (PathBuf::from(folder), ConfigOrigin::Environment)
        } else if let Some(folder) = toml_config.data_folder {
            let origin = match config_path {
                Some(path) => ConfigOrigin::ConfigFile(path),
                None => ConfigOrigin::Default,
            };
            (folder, origin)
        } else {
            (defaults.data_folder, ConfigOrigin::Default)
        };

        let sources_dir = data_folder.join(toml_config.sources_dir.unwrap_or(defaults.sources_dir));
        let output_file = data_folder.join(toml_config.output_file.unwrap_or(defaults.output_file));

        Self {
            paths: CatalogPaths {
                data_folder,
                sources_dir,
                output_file,
            },
            logging: toml_config.logging,
            origin,
        }
    }
}

/// Config file location: `CPC_CONFIG` if set, else the platform config dir
pub fn config_file_path() -> Option<PathBuf> {
    if let Ok(path) = std::env::var(CONFIG_FILE_ENV) {
        if !path.is_empty() {
            return Some(PathBuf::from(path));
        }
    }
    dirs::config_dir().map(|d| d.join("cpc").join("config.toml"))
}

/// Read a TOML config file; `Ok(None)` if it does not exist
pub fn load_toml_config(path: &Path) -> Result<Option<TomlConfig>> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(Error::Io(e)),
    };

    toml::from_str(&content)
        .map(Some)
        .map_err(|e| Error::Config(format!("Failed to parse {}: {}", path.display(), e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_layout() {
        let config = CatalogConfig::resolve(TomlConfig::default(), None, None);
        assert_eq!(config.origin, ConfigOrigin::Default);
        assert_eq!(config.paths, CatalogPaths::under("data"));
        assert_eq!(config.paths.output_file, PathBuf::from("data/projects.json"));
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_env_folder_beats_config_file() {
        let toml_config = TomlConfig {
            data_folder: Some(PathBuf::from("/from/toml")),
            ..Default::default()
        };
        let config = CatalogConfig::resolve(
            toml_config,
            Some(PathBuf::from("/etc/cpc.toml")),
            Some("/from/env".to_string()),
        );
        assert_eq!(config.origin, ConfigOrigin::Environment);
        assert_eq!(config.paths.sources_dir, PathBuf::from("/from/env/sources"));
    }

    #[test]
    fn test_config_file_overrides_paths() {
        let toml_config = TomlConfig {
            data_folder: Some(PathBuf::from("/srv/catalog")),
            sources_dir: Some(PathBuf::from("incoming")),
            output_file: Some(PathBuf::from("/var/www/projects.json")),
            logging: LoggingConfig::default(),
        };
        let config = CatalogConfig::resolve(toml_config, Some(PathBuf::from("cpc.toml")), None);
        assert_eq!(config.origin, ConfigOrigin::ConfigFile(PathBuf::from("cpc.toml")));
        assert_eq!(config.paths.sources_dir, PathBuf::from("/srv/catalog/incoming"));
        assert_eq!(config.paths.output_file, PathBuf::from("/var/www/projects.json"));
    }

    #[test]
    fn test_source_path_joins_sources_dir() {
        let paths = CatalogPaths::under("/tmp/cpc");
        assert_eq!(paths.source_path("manual.json"), PathBuf::from("/tmp/cpc/sources/manual.json"));
    }
}
