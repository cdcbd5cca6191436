use std::io;
use thiserror::Error;

/// Errors raised while assembling the configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A config file exists but could not be read (or a required one is missing).
    #[error("cannot read {path}: {source}")]
    ReadError {
        /// File that was being read.
        path: String,
        /// I/O failure.
        #[source]
        source: io::Error,
    },

    /// A layer is not valid TOML, or does not fit the schema.
    #[error("invalid TOML in {path}: {source}")]
    ParseError {
        /// File (or synthetic layer name) that failed.
        path: String,
        /// TOML diagnostic.
        #[source]
        source: toml::de::Error,
    },

    /// A value is outside its accepted range or set.
    #[error("{field}: {message}")]
    ValidationError {
        /// Dotted key, or the file path for whole-file limits.
        field: String,
        /// What is wrong with the value.
        message: String,
    },

    /// A `CACAO_*` variable could not be coerced to its key's type.
    #[error("${var_name}: {message}")]
    EnvError {
        /// The variable.
        var_name: String,
        /// Coercion failure.
        message: String,
    },

    /// No home directory to look for `~/.cacao` in.
    #[error("no home directory; set CACAO_HOME")]
    NoHomeDir,
}

/// Result alias for configuration loading.
pub type ConfigResult<T> = Result<T, ConfigError>;
