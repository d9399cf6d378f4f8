pub mod types;

use crate::error::{ImagesError, Result};
use std::fs;
use std::path::{Path, PathBuf};

pub use types::{Config, PolicyOverrides};

const CONFIG_FILE_NAME: &str = ".chart-images.toml";

/// Get the global config file path (~/.chart-images.toml)
pub fn global_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(CONFIG_FILE_NAME))
}

/// Get the local config file path (./.chart-images.toml)
pub fn local_config_path(dir: &Path) -> PathBuf {
    dir.join(CONFIG_FILE_NAME)
}

/// Load configuration.
///
/// An explicit file must exist and parse. Otherwise the local file is tried,
/// then the global one; an implicit file that fails to load is logged and
/// ignored.
pub fn load_config(explicit: Option<&Path>) -> Result<Config> {
    if let Some(path) = explicit {
        return read_config(path);
    }

    let candidates = std::env::current_dir()
        .ok()
        .map(|dir| local_config_path(&dir))
        .into_iter()
        .chain(global_config_path());

    for path in candidates {
        if !path.exists() {
            continue;
        }
        match read_config(&path) {
            Ok(config) => {
                log::debug!("loaded configuration from {}", path.display());
                return Ok(config);
            }
            Err(e) => log::warn!("ignoring {}: {}", path.display(), e),
        }
    }

    Ok(Config::default())
}

fn read_config(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)
        .map_err(|e| ImagesError::Config(format!("failed to read {}: {}", path.display(), e)))?;
    toml::from_str(&content)
        .map_err(|e| ImagesError::Config(format!("failed to parse {}: {}", path.display(), e)))
}
