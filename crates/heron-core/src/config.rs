//! Platform configuration: where the engine's executables live and how to
//! reach the engine itself.
//!
//! Loaded once per process from a TOML file and read-only afterwards.
//! Resolution chain for the file location: explicit path > `HERON_CONFIG`
//! env var > `$XDG_CONFIG_HOME/heron/config.toml` > `~/.config/heron/config.toml`.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Paths to the engine's pre-built executables.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutablesSection {
    /// Absolute path to the bulk loader.
    pub loader: PathBuf,
    /// Absolute path to the unloader.
    pub unloader: PathBuf,
    /// Absolute path to the algorithm runner.
    pub runner: PathBuf,
}

/// Engine connection settings, forwarded to every spawned executable via the
/// `HERON_ENGINE_ADDRESS` environment variable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineSection {
    /// Address of the running engine, e.g. `localhost:9080`.
    pub address: String,
}

/// The full platform configuration file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlatformConfig {
    pub executables: ExecutablesSection,
    pub engine: EngineSection,
}

/// Environment variable naming an explicit config file location.
pub const CONFIG_ENV_VAR: &str = "HERON_CONFIG";

/// Environment variable carrying the engine address into child processes.
pub const ENGINE_ADDRESS_ENV_VAR: &str = "HERON_ENGINE_ADDRESS";

/// Return the heron config directory.
///
/// Always uses XDG layout: `$XDG_CONFIG_HOME/heron` or `~/.config/heron`.
pub fn config_dir() -> PathBuf {
    if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
        return PathBuf::from(xdg).join("heron");
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config")
        .join("heron")
}

/// Return the default config file path.
pub fn default_config_path() -> PathBuf {
    config_dir().join("config.toml")
}

/// Resolve the config file location: explicit path > env var > default.
pub fn resolve_config_path(explicit: Option<&Path>) -> PathBuf {
    if let Some(path) = explicit {
        return path.to_path_buf();
    }
    if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
        return PathBuf::from(path);
    }
    default_config_path()
}

impl PlatformConfig {
    /// Load the configuration from the resolved location.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let path = resolve_config_path(explicit);
        Self::load_from(&path)
    }

    /// Load and parse a specific config file.
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file at {}", path.display()))?;
        let config: Self = toml::from_str(&contents)
            .with_context(|| format!("failed to parse config file at {}", path.display()))?;
        Ok(config)
    }

    /// Serialize and write the config to `path`, creating parent dirs as
    /// needed.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("failed to create config directory {}", dir.display()))?;
        }
        let contents = toml::to_string_pretty(self).context("failed to serialize config")?;
        std::fs::write(path, &contents)
            .with_context(|| format!("failed to write config file at {}", path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_config() -> PlatformConfig {
        PlatformConfig {
            executables: ExecutablesSection {
                loader: PathBuf::from("/opt/engine/bin/loader"),
                unloader: PathBuf::from("/opt/engine/bin/unloader"),
                runner: PathBuf::from("/opt/engine/bin/runner"),
            },
            engine: EngineSection {
                address: "localhost:9080".to_string(),
            },
        }
    }

    #[test]
    fn save_and_load_round_trip() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("nested").join("config.toml");

        let original = sample_config();
        original.save_to(&path).unwrap();

        let loaded = PlatformConfig::load_from(&path).unwrap();
        assert_eq!(loaded.executables.loader, original.executables.loader);
        assert_eq!(loaded.executables.unloader, original.executables.unloader);
        assert_eq!(loaded.executables.runner, original.executables.runner);
        assert_eq!(loaded.engine.address, original.engine.address);
    }

    #[test]
    fn load_missing_file_errors_with_path() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("does-not-exist.toml");
        let err = PlatformConfig::load_from(&path).unwrap_err();
        let msg = format!("{err:#}");
        assert!(
            msg.contains("does-not-exist.toml"),
            "error should name the missing file, got: {msg}"
        );
    }

    #[test]
    fn load_rejects_missing_keys() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("partial.toml");
        std::fs::write(&path, "[engine]\naddress = \"localhost:9080\"\n").unwrap();
        assert!(PlatformConfig::load_from(&path).is_err());
    }

    #[test]
    fn explicit_path_wins_resolution() {
        let explicit = PathBuf::from("/tmp/explicit.toml");
        assert_eq!(resolve_config_path(Some(&explicit)), explicit);
    }

    #[test]
    fn default_config_path_ends_with_expected_filename() {
        let path = default_config_path();
        assert!(
            path.ends_with("heron/config.toml"),
            "unexpected config path: {}",
            path.display()
        );
    }
}
