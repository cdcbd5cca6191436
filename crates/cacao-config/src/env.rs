//! `CACAO_*` environment variable overrides.
//!
//! Environment variables are the highest-precedence layer: a set variable
//! replaces whatever the files configured.

use std::collections::HashMap;

use tracing::debug;

use crate::error::{ConfigError, ConfigResult};

/// Environment variable naming an alternate configuration directory.
pub const HOME_VAR: &str = "CACAO_HOME";

/// Value type of a mapped field.
#[derive(Clone, Copy)]
enum FieldKind {
    Integer,
    Boolean,
    Text,
}

/// Mapping from environment variable name to config field path.
struct EnvMapping {
    var_name: &'static str,
    section: &'static str,
    key: &'static str,
    kind: FieldKind,
}

/// All supported `CACAO_*` env var mappings.
const ENV_MAPPINGS: &[EnvMapping] = &[
    EnvMapping {
        var_name: "CACAO_CLOCK_SKEW_SECS",
        section: "verification",
        key: "clock_skew_secs",
        kind: FieldKind::Integer,
    },
    EnvMapping {
        var_name: "CACAO_REVOCATION_PHASE_OUT_SECS",
        section: "verification",
        key: "revocation_phase_out_secs",
        kind: FieldKind::Integer,
    },
    EnvMapping {
        var_name: "CACAO_DISABLE_EXPIRATION_CHECK",
        section: "verification",
        key: "disable_expiration_check",
        kind: FieldKind::Boolean,
    },
    EnvMapping {
        var_name: "CACAO_LOG_LEVEL",
        section: "logging",
        key: "level",
        kind: FieldKind::Text,
    },
    EnvMapping {
        var_name: "CACAO_LOG_FORMAT",
        section: "logging",
        key: "format",
        kind: FieldKind::Text,
    },
    EnvMapping {
        var_name: "CACAO_LOG_TARGET",
        section: "logging",
        key: "target",
        kind: FieldKind::Text,
    },
    EnvMapping {
        var_name: "CACAO_LOG_DIR",
        section: "logging",
        key: "directory",
        kind: FieldKind::Text,
    },
    EnvMapping {
        var_name: "CACAO_LOG_ROTATION",
        section: "logging",
        key: "rotation",
        kind: FieldKind::Text,
    },
];

/// Snapshot the `CACAO_*` variables of the current process.
#[must_use]
pub fn collect_env_vars() -> HashMap<String, String> {
    std::env::vars()
        .filter(|(k, _)| k.starts_with("CACAO_"))
        .collect()
}

/// Apply environment overrides to the merged TOML tree.
///
/// Returns the number of variables applied.
///
/// # Errors
///
/// Returns [`ConfigError::EnvError`] if a numeric or boolean variable
/// cannot be parsed.
pub fn apply_env_overrides<S: ::std::hash::BuildHasher>(
    merged: &mut toml::Value,
    env_vars: &HashMap<String, String, S>,
) -> ConfigResult<usize> {
    let mut count: usize = 0;

    for mapping in ENV_MAPPINGS {
        let Some(raw) = env_vars.get(mapping.var_name) else {
            continue;
        };
        let value = coerce(mapping, raw)?;

        debug!(
            var = mapping.var_name,
            field = %format!("{}.{}", mapping.section, mapping.key),
            "applying env var override"
        );

        if let Some(root) = merged.as_table_mut() {
            let section = root
                .entry(mapping.section)
                .or_insert_with(|| toml::Value::Table(toml::map::Map::new()));
            if let Some(table) = section.as_table_mut() {
                table.insert(mapping.key.to_owned(), value);
                count = count.saturating_add(1);
            }
        }
    }

    Ok(count)
}

fn coerce(mapping: &EnvMapping, raw: &str) -> ConfigResult<toml::Value> {
    let trimmed = raw.trim();
    match mapping.kind {
        FieldKind::Integer => trimmed
            .parse::<i64>()
            .ok()
            .filter(|n| *n >= 0)
            .map(toml::Value::Integer)
            .ok_or_else(|| ConfigError::EnvError {
                var_name: mapping.var_name.to_owned(),
                message: format!("expected a non-negative integer, got '{raw}'"),
            }),
        FieldKind::Boolean => match trimmed.to_ascii_lowercase().as_str() {
            "true" | "1" | "yes" => Ok(toml::Value::Boolean(true)),
            "false" | "0" | "no" => Ok(toml::Value::Boolean(false)),
            _ => Err(ConfigError::EnvError {
                var_name: mapping.var_name.to_owned(),
                message: format!("expected a boolean, got '{raw}'"),
            }),
        },
        FieldKind::Text => Ok(toml::Value::String(trimmed.to_owned())),
    }
}
