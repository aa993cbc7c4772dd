use std::path::{Path, PathBuf};

use super::types::AppConfig;
use crate::error::ConfigError;

/// Default trainconf data directory: ~/.trainconf
pub fn get_trainconf_data_dir() -> Result<PathBuf, ConfigError> {
    let home = std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .map_err(|_| ConfigError::HomeDirUnavailable)?;
    Ok(PathBuf::from(home).join(".trainconf"))
}

fn read_config(path: &Path) -> Result<AppConfig, ConfigError> {
    let s = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.display().to_string(),
        source,
    })?;
    Ok(toml::from_str::<AppConfig>(&s)?)
}

/// Reads `path` and applies the environment overrides.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<AppConfig, ConfigError> {
    let mut cfg = read_config(path.as_ref())?;
    apply_env_overrides(&mut cfg);
    Ok(cfg)
}

pub fn load_default() -> Result<AppConfig, ConfigError> {
    // Priority 1: ~/.trainconf/config.toml
    let user_config = get_trainconf_data_dir()?.join("config.toml");

    // Priority 2: ./config.toml
    let local_config = Path::new("config.toml");

    let mut cfg = if user_config.exists() {
        read_config(&user_config)?
    } else if local_config.exists() {
        read_config(local_config)?
    } else {
        AppConfig::default()
    };

    apply_env_overrides(&mut cfg);
    Ok(cfg)
}

fn env_override(name: &str, target: &mut String) {
    if let Ok(v) = std::env::var(name) {
        if !v.trim().is_empty() {
            *target = v;
        }
    }
}

// Environment variables win over every file.
fn apply_env_overrides(cfg: &mut AppConfig) {
    env_override("TRAINCONF_SERVER_URL", &mut cfg.server.base_url);
    env_override("TRAINCONF_API_KEY", &mut cfg.server.api_key);
    env_override("TRAINCONF_ORGANIZATION_ID", &mut cfg.server.organization_id);
    env_override("TRAINCONF_WORKSPACE_ID", &mut cfg.server.workspace_id);
}
