//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/rectree/rectree.toml`
//! 3. Explicit config file passed with `--config`
//! 4. Environment variables: `RECTREE_*` prefix

use std::path::{Path, PathBuf};

use clap::ValueEnum;
use config::{Config, Environment, File, FileFormat};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, instrument};

/// How a built tree is printed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Box-drawing tree
    #[default]
    Tree,
    /// One `id parent_id` line per node
    Records,
    /// Node count, depth and leaf count
    Summary,
}

/// Errors loading or printing settings.
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("configuration error: {0}")]
    Load(#[from] config::ConfigError),

    #[error("cannot serialize settings: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Unified configuration for rectree.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Output format for `rectree tree` (default: tree)
    pub format: OutputFormat,
    /// Colored terminal output (default: true; NO_COLOR still wins)
    pub color: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            color: true,
        }
    }
}

/// Get the XDG config directory for rectree.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "rectree").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("rectree.toml"))
}

impl Settings {
    /// Load settings with layered precedence.
    ///
    /// A missing global config is skipped; an explicit `config_file` must exist.
    #[instrument(level = "debug")]
    pub fn load(config_file: Option<&Path>) -> Result<Self, SettingsError> {
        Self::load_layers(
            global_config_path().as_deref(),
            config_file,
            Environment::with_prefix("RECTREE"),
        )
    }

    fn load_layers(
        global: Option<&Path>,
        explicit: Option<&Path>,
        env: Environment,
    ) -> Result<Self, SettingsError> {
        let defaults = Settings::default();
        let mut builder = Config::builder()
            .set_default("format", "tree")?
            .set_default("color", defaults.color)?;

        if let Some(path) = global {
            builder = builder.add_source(File::from(path).format(FileFormat::Toml).required(false));
        }
        if let Some(path) = explicit {
            builder = builder.add_source(File::from(path).format(FileFormat::Toml).required(true));
        }

        let settings: Self = builder.add_source(env).build()?.try_deserialize()?;
        debug!(?settings, "settings loaded");
        Ok(settings)
    }

    /// Effective settings as TOML, for `rectree config show`.
    pub fn to_toml(&self) -> Result<String, SettingsError> {
        Ok(toml::to_string(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    fn env(vars: &[(&str, &str)]) -> Environment {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Environment::with_prefix("RECTREE").source(Some(map))
    }

    fn write_config(dir: &TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, content).expect("write config");
        path
    }

    #[test]
    fn test_defaults_without_sources() {
        let settings = Settings::load_layers(None, None, env(&[])).unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.format, OutputFormat::Tree);
        assert!(settings.color);
    }

    #[test]
    fn test_missing_global_config_is_skipped() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("rectree.toml");
        let settings = Settings::load_layers(Some(&missing), None, env(&[])).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_explicit_file_overrides_global() {
        let temp = TempDir::new().unwrap();
        let global = write_config(&temp, "global.toml", "format = \"records\"\ncolor = false\n");
        let local = write_config(&temp, "local.toml", "format = \"summary\"\n");

        let settings = Settings::load_layers(Some(&global), Some(&local), env(&[])).unwrap();

        assert_eq!(settings.format, OutputFormat::Summary);
        assert!(!settings.color);
    }

    #[test]
    fn test_env_overrides_files() {
        let temp = TempDir::new().unwrap();
        let local = write_config(&temp, "local.toml", "format = \"summary\"\n");

        let settings = Settings::load_layers(
            None,
            Some(&local),
            env(&[("RECTREE_FORMAT", "records"), ("RECTREE_COLOR", "false")]),
        )
        .unwrap();

        assert_eq!(settings.format, OutputFormat::Records);
        assert!(!settings.color);
    }

    #[test]
    fn test_missing_explicit_file_errors() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("nope.toml");
        let result = Settings::load_layers(None, Some(&missing), env(&[]));
        assert!(matches!(result, Err(SettingsError::Load(_))));
    }

    #[test]
    fn test_invalid_format_errors() {
        let temp = TempDir::new().unwrap();
        let local = write_config(&temp, "local.toml", "format = \"json\"\n");
        let result = Settings::load_layers(None, Some(&local), env(&[]));
        assert!(result.is_err());
    }

    #[test]
    fn test_to_toml() {
        let toml = Settings::default().to_toml().unwrap();
        assert!(toml.contains("format = \"tree\""));
        assert!(toml.contains("color = true"));
    }
}
