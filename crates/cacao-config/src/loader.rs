//! Layer discovery and merging.
//!
//! Implements the [`load`] algorithm:
//! 1. Start from the compiled-in `defaults.toml`
//! 2. Merge `~/.cacao/config.toml`, or `$CACAO_HOME/config.toml` when set
//! 3. Merge the explicitly requested file (`--config`), which must exist
//! 4. Apply `CACAO_*` environment overrides
//! 5. Deserialize and validate

use std::collections::HashMap;
use std::io::Read;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::env::{HOME_VAR, apply_env_overrides, collect_env_vars};
use crate::error::{ConfigError, ConfigResult};
use crate::types::Config;
use crate::validate;

/// Lowest layer, compiled in.
const DEFAULTS_TOML: &str = include_str!("defaults.toml");

/// Larger files are refused before parsing.
const MAX_CONFIG_FILE_SIZE: u64 = 1_048_576;

/// A validated configuration and the files it was assembled from.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    /// The final configuration.
    pub config: Config,
    /// Files that contributed, lowest precedence first.
    pub loaded_files: Vec<String>,
}

/// Load configuration with full precedence, reading `CACAO_*` variables
/// from the process environment.
///
/// `explicit` is a file named on the command line; unlike the user file it
/// must exist. `cacao_home_override` replaces the `~/.cacao` directory.
///
/// # Errors
///
/// Returns a [`ConfigError`] if any file is unreadable or malformed, an
/// environment variable cannot be parsed, or the result fails validation.
pub fn load(
    explicit: Option<&Path>,
    cacao_home_override: Option<&Path>,
) -> ConfigResult<ResolvedConfig> {
    load_with_env(explicit, cacao_home_override, &collect_env_vars())
}

/// Like [`load`], with an explicit set of environment variables.
///
/// # Errors
///
/// See [`load`].
pub fn load_with_env<S: ::std::hash::BuildHasher>(
    explicit: Option<&Path>,
    cacao_home_override: Option<&Path>,
    env_vars: &HashMap<String, String, S>,
) -> ConfigResult<ResolvedConfig> {
    // 1. Embedded defaults.
    let mut merged: toml::Value =
        toml::from_str(DEFAULTS_TOML).map_err(|source| ConfigError::ParseError {
            path: "defaults.toml".to_owned(),
            source,
        })?;
    let mut loaded_files = Vec::new();

    // 2. User config.
    let user_dir = match (cacao_home_override, env_vars.get(HOME_VAR)) {
        (Some(dir), _) => dir.to_path_buf(),
        (None, Some(dir)) => PathBuf::from(dir),
        (None, None) => user_home()?.join(".cacao"),
    };
    let user_path = user_dir.join("config.toml");
    if let Some(overlay) = read_layer(&user_path)? {
        deep_merge(&mut merged, &overlay);
        loaded_files.push(user_path.display().to_string());
        info!(path = %user_path.display(), "loaded user config");
    }

    // 3. Explicit config file.
    if let Some(path) = explicit {
        let overlay = read_layer(path)?.ok_or_else(|| missing(path))?;
        deep_merge(&mut merged, &overlay);
        loaded_files.push(path.display().to_string());
        info!(path = %path.display(), "loaded config file");
    }

    // 4. Environment overrides.
    let env_count = apply_env_overrides(&mut merged, env_vars)?;
    if env_count > 0 {
        debug!(count = env_count, "applied environment variable overrides");
    }

    // 5. Deserialize and validate.
    let config: Config =
        merged
            .try_into()
            .map_err(|source: toml::de::Error| ConfigError::ParseError {
                path: loaded_files.last().cloned().unwrap_or_else(|| "environment".to_owned()),
                source,
            })?;
    validate::validate(&config)?;

    Ok(ResolvedConfig {
        config,
        loaded_files,
    })
}

/// Read and validate a single file, without defaults or other layers.
///
/// Keys missing from the file take their built-in defaults.
///
/// # Errors
///
/// Returns a [`ConfigError`] if the file is missing, unreadable, not valid
/// TOML, or fails validation.
pub fn load_file(path: &Path) -> ConfigResult<Config> {
    let value = read_layer(path)?.ok_or_else(|| missing(path))?;
    let config: Config = value
        .try_into()
        .map_err(|e: toml::de::Error| ConfigError::ParseError {
            path: path.display().to_string(),
            source: e,
        })?;
    validate::validate(&config)?;
    Ok(config)
}

fn missing(path: &Path) -> ConfigError {
    ConfigError::ReadError {
        path: path.display().to_string(),
        source: std::io::Error::from(std::io::ErrorKind::NotFound),
    }
}

/// Parse `path` as a TOML layer; `Ok(None)` when there is no such file.
///
/// At most one byte past the size limit is read, so devices and pipes
/// cannot grow the buffer without bound.
fn read_layer(path: &Path) -> ConfigResult<Option<toml::Value>> {
    let read_error = |source| ConfigError::ReadError {
        path: path.display().to_string(),
        source,
    };
    let file = match std::fs::File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "no config layer here");
            return Ok(None);
        },
        Err(source) => return Err(read_error(source)),
    };

    let mut text = String::new();
    file.take(MAX_CONFIG_FILE_SIZE.saturating_add(1))
        .read_to_string(&mut text)
        .map_err(read_error)?;

    let size = u64::try_from(text.len()).unwrap_or(u64::MAX);
    if size > MAX_CONFIG_FILE_SIZE {
        return Err(ConfigError::ValidationError {
            field: path.display().to_string(),
            message: format!("larger than the {MAX_CONFIG_FILE_SIZE} byte limit"),
        });
    }

    toml::from_str(&text)
        .map(Some)
        .map_err(|source| ConfigError::ParseError {
            path: path.display().to_string(),
            source,
        })
}

/// Merge `overlay` into `base`: tables merge key by key, anything else in
/// the overlay (scalars, arrays) replaces the base value.
fn deep_merge(base: &mut toml::Value, overlay: &toml::Value) {
    let (toml::Value::Table(into), toml::Value::Table(from)) = (&mut *base, overlay) else {
        *base = overlay.clone();
        return;
    };
    for (key, value) in from {
        match into.get_mut(key) {
            Some(existing) => deep_merge(existing, value),
            None => {
                into.insert(key.clone(), value.clone());
            },
        }
    }
}

fn user_home() -> ConfigResult<PathBuf> {
    directories::BaseDirs::new()
        .map(|dirs| dirs.home_dir().to_path_buf())
        .ok_or(ConfigError::NoHomeDir)
}
