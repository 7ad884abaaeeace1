// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use crate::{ConfigError, ProcessConfig};
use figment::{
    providers::{Env, Format, Serialized, Yaml},
    Figment,
};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub const DEFAULT_CONFIG_NAME: &str = "zkvote.config.yaml";

/// Prefix of environment variables overriding configuration keys, e.g.
/// `ZKVOTE_MAX_VOTES_PER_BATCH`.
pub const ENV_PREFIX: &str = "ZKVOTE_";

pub type FindInParent = fn(&Path, &str) -> Option<PathBuf>;

pub fn find_in_parent(path: &Path, filename: &str) -> Option<PathBuf> {
    let mut current = path.to_path_buf();
    loop {
        let file_path = current.join(filename);
        if file_path.exists() {
            return Some(file_path);
        }
        if !current.pop() {
            return None;
        }
    }
}

/// An explicit file wins, relative to `cwd` when not absolute. Otherwise the default file
/// name is searched from `cwd` upwards.
pub fn resolve_config_path(
    find_in_parent: FindInParent,
    cwd: &Path,
    cli_file: Option<&Path>,
) -> Option<PathBuf> {
    if let Some(cli_file) = cli_file {
        if cli_file.is_absolute() {
            return Some(cli_file.to_path_buf());
        }
        return Some(cwd.join(cli_file));
    }
    find_in_parent(cwd, DEFAULT_CONFIG_NAME)
}

/// Layers defaults, the YAML file at `path` if given, then `ZKVOTE_` environment variables.
pub fn figment(path: Option<&Path>) -> Figment {
    let mut figment = Figment::from(Serialized::defaults(ProcessConfig::default()));
    if let Some(path) = path {
        figment = figment.merge(Yaml::file(path));
    }
    figment.merge(Env::prefixed(ENV_PREFIX))
}

/// Loads and validates the configuration. An explicitly given file must exist.
pub fn load_config(cli_file: Option<&Path>) -> Result<ProcessConfig, ConfigError> {
    let cwd = std::env::current_dir().map_err(|e| ConfigError::Load(e.to_string()))?;
    let path = resolve_config_path(find_in_parent, &cwd, cli_file);
    if let Some(path) = &path {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.clone()));
        }
        info!(path = %path.display(), "Loading configuration");
    } else {
        debug!("No configuration file found, using defaults and environment");
    }

    let config: ProcessConfig = figment(path.as_deref())
        .extract()
        .map_err(|e| ConfigError::Load(e.to_string()))?;
    config.validate()?;
    Ok(config)
}
