//! Converts the loaded configuration into telemetry settings.

use cacao_config::Config;
use cacao_telemetry::LogConfig;

/// Build the logging setup from `[logging]`; `--verbose` forces `debug`.
pub(crate) fn to_log_config(config: &Config, verbose: bool) -> anyhow::Result<LogConfig> {
    let mut log_config = LogConfig::from_section(&config.logging)?;
    if verbose {
        "debug".clone_into(&mut log_config.level);
    }
    Ok(log_config)
}
