//! Configuration loading for estimator records
//!
//! Records come from three places, later ones overriding earlier ones:
//! - **Builtin**: presets shipped next to the executable (read-only)
//! - **Custom**: user-created TOML files in the config directory
//! - **User**: the confy-managed `estimators` file (created with defaults)
//!
//! Cooldown entries are merged by `id`. Tick settings are layered field by
//! field: a file only changes the `[tick]` keys it actually writes.

use std::fs;
use std::path::{Path, PathBuf};

use phasewatch_types::{EstimatorConfig, EstimatorOverlay};

const APP_NAME: &str = "phasewatch";
const USER_CONFIG_NAME: &str = "estimators";

/// Load a single TOML config file
pub fn load_file(path: &Path) -> Result<EstimatorConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    toml::from_str(&contents).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Load a definition file as an overlay, keeping track of what it sets
pub fn load_overlay_file(path: &Path) -> Result<EstimatorOverlay, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    toml::from_str(&contents).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Save a config to a TOML file
pub fn save_file(path: &Path, config: &EstimatorConfig) -> Result<(), ConfigError> {
    let contents = toml::to_string_pretty(config).map_err(|source| ConfigError::Serialize {
        path: path.to_path_buf(),
        source,
    })?;

    fs::write(path, contents).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Load and merge every TOML file from the builtin and custom directories.
///
/// Missing directories are skipped. A file that fails to parse is logged and
/// skipped so one bad preset does not take the others down.
pub fn load_definitions(
    builtin_dir: Option<&Path>,
    custom_dir: Option<&Path>,
) -> Result<EstimatorConfig, ConfigError> {
    let mut merged = EstimatorConfig::default();

    for (dir, source) in [(builtin_dir, "builtin"), (custom_dir, "custom")] {
        if let Some(dir) = dir
            && dir.exists()
        {
            load_directory(&mut merged, dir, source)?;
        }
    }

    Ok(merged)
}

fn load_directory(
    merged: &mut EstimatorConfig,
    dir: &Path,
    source: &str,
) -> Result<(), ConfigError> {
    let entries = fs::read_dir(dir).map_err(|source| ConfigError::Io {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut paths: Vec<PathBuf> = entries
        .flatten()
        .map(|entry| entry.path())
        .filter(|path| path.extension().is_some_and(|ext| ext == "toml"))
        .collect();
    paths.sort();

    for path in paths {
        match load_overlay_file(&path) {
            Ok(overlay) => {
                let replaced = merge(merged, overlay);
                if !replaced.is_empty() {
                    tracing::warn!(source, ?path, ?replaced, "Overriding cooldown definitions");
                }
                tracing::info!(source, ?path, "Loaded estimator config");
            }
            Err(e) => {
                tracing::error!(source, ?path, error = %e, "Failed to load estimator config");
            }
        }
    }

    Ok(())
}

/// Merge `incoming` into `base`. Returns IDs of cooldowns that were replaced.
pub fn merge(base: &mut EstimatorConfig, incoming: EstimatorOverlay) -> Vec<String> {
    let mut replaced = Vec::new();

    if let Some(tick) = incoming.tick {
        tick.apply_to(&mut base.tick);
    }

    for cooldown in incoming.cooldowns {
        match base.cooldowns.iter_mut().find(|c| c.id == cooldown.id) {
            Some(existing) => {
                replaced.push(cooldown.id.clone());
                *existing = cooldown;
            }
            None => base.cooldowns.push(cooldown),
        }
    }

    replaced
}

/// Load the per-user overlay, creating an empty one on first run
pub fn load_user_config() -> Result<EstimatorOverlay, ConfigError> {
    confy::load(APP_NAME, USER_CONFIG_NAME).map_err(ConfigError::User)
}

/// Load a user overlay from an explicit path, creating it if missing
pub fn load_user_config_from(path: &Path) -> Result<EstimatorOverlay, ConfigError> {
    confy::load_path(path).map_err(ConfigError::User)
}

/// Get the default builtin definitions directory
pub fn default_builtin_dir() -> Option<PathBuf> {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|p| p.join("definitions").join("builtin")))
}

/// Get the default custom definitions directory
pub fn default_custom_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join(APP_NAME).join("definitions"))
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error reading {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Parse error in {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("Serialize error for {path:?}: {source}")]
    Serialize {
        path: PathBuf,
        #[source]
        source: toml::ser::Error,
    },
    #[error("User config error: {0}")]
    User(#[from] confy::ConfyError),
}
