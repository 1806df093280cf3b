//! Configuration loading.
//!
//! Sources, lowest priority first: built-in defaults, a YAML file (explicit
//! path, or `config.yaml` in the user config directory when present), then
//! `CHAINWALK_*` environment variables.

pub mod schema;

use std::path::{Path, PathBuf};

pub use schema::{ChainConfig, IdMatch};

use crate::error::{ChainWalkError, Result};

/// Environment variables that override file values.
pub const ENV_LINK: &str = "CHAINWALK_LINK";
pub const ENV_ID: &str = "CHAINWALK_ID";
pub const ENV_MERGE_PROPERTY: &str = "CHAINWALK_MERGE_PROPERTY";
pub const ENV_ID_MATCH: &str = "CHAINWALK_ID_MATCH";

/// Load, override from the process environment, and validate.
pub fn load_config(path: Option<&Path>) -> Result<ChainConfig> {
    let mut config = match path {
        Some(path) => from_file(path)?,
        None => match default_config_path().filter(|p| p.is_file()) {
            Some(found) => {
                tracing::debug!("using config at {}", found.display());
                from_file(&found)?
            }
            None => ChainConfig::default(),
        },
    };
    apply_env_overrides(&mut config, |key| std::env::var(key).ok())?;
    config.validate()?;
    Ok(config)
}

/// Parse a YAML config file. Missing keys take their defaults.
pub fn from_file(path: &Path) -> Result<ChainConfig> {
    let text = std::fs::read_to_string(path).map_err(|source| ChainWalkError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    from_yaml_str(&text)
}

pub fn from_yaml_str(yaml: &str) -> Result<ChainConfig> {
    if yaml.trim().is_empty() {
        return Ok(ChainConfig::default());
    }
    Ok(serde_yaml::from_str(yaml)?)
}

/// `<user config dir>/chainwalk/config.yaml`, if a home directory exists.
pub fn default_config_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", "chainwalk")
        .map(|dirs| dirs.config_dir().join("config.yaml"))
}

/// Apply `CHAINWALK_*` overrides read through `lookup`.
pub fn apply_env_overrides<F>(config: &mut ChainConfig, lookup: F) -> Result<()>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(link) = lookup(ENV_LINK) {
        config.link = link;
    }
    if let Some(id) = lookup(ENV_ID) {
        config.id = id;
    }
    if let Some(prop) = lookup(ENV_MERGE_PROPERTY) {
        config.merge_property = prop;
    }
    if let Some(mode) = lookup(ENV_ID_MATCH) {
        config.id_match =
            IdMatch::from_str_loose(&mode).ok_or_else(|| ChainWalkError::InvalidConfig {
                message: format!("{ENV_ID_MATCH}={mode:?} is not strict or loose"),
            })?;
    }
    Ok(())
}
