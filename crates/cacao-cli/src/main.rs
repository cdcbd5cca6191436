//! Cacao CLI - render, parse, verify and encode sign-in capabilities.
//!
//! Every command reads its input from a file argument, or from stdin when
//! the argument is `-`, and writes its result to stdout. Logs go to stderr.

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};

mod commands;
mod config_bridge;
mod theme;

use commands::{decode, encode, parse, render, verify};

/// Output format for command results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    /// Human-readable output.
    Pretty,
    /// Machine-readable JSON.
    Json,
}

/// Cacao - chain-agnostic sign-in capabilities
#[derive(Parser)]
#[command(name = "cacao")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to a configuration file (layered over ~/.cacao/config.toml)
    #[arg(short, long, global = true, env = "CACAO_CONFIG")]
    config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output format
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Pretty)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a sign-in request (JSON) into the text a wallet signs
    Render {
        /// Request file, or `-` for stdin
        input: PathBuf,

        /// Chain namespace of the request
        #[arg(short, long, default_value = "eip155")]
        namespace: String,

        /// Also print the request with nonce and issuance time filled in
        #[arg(long)]
        emit_request: bool,
    },

    /// Parse sign-in message text back into a request
    Parse {
        /// Message file, or `-` for stdin
        input: PathBuf,

        /// Chain namespace of the message
        #[arg(short, long, default_value = "eip155")]
        namespace: String,

        /// Wallet signature over the message text
        #[arg(short, long)]
        signature: Option<String>,

        /// Package the parsed message into a capability instead
        #[arg(long)]
        cacao: bool,
    },

    /// Verify a capability (JSON)
    Verify {
        /// Capability file, or `-` for stdin
        input: PathBuf,

        /// Verification time (RFC 3339); defaults to now
        #[arg(long)]
        at: Option<String>,

        /// Tolerated clock skew in seconds
        #[arg(long)]
        clock_skew: Option<u64>,

        /// Grace period after expiration in seconds
        #[arg(long)]
        phase_out: Option<u64>,

        /// Skip the expiration check
        #[arg(long)]
        no_expiry: bool,
    },

    /// Encode a capability (JSON) as a DAG-CBOR block
    Encode {
        /// Capability file, or `-` for stdin
        input: PathBuf,
    },

    /// Decode a hex DAG-CBOR block into a capability
    Decode {
        /// Block file (hex), or `-` for stdin
        input: PathBuf,

        /// Expected content id of the block
        #[arg(long)]
        cid: Option<String>,
    },
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let resolved = cacao_config::Config::load(cli.config.as_deref())?;
    let config = resolved.config;

    let log_config = config_bridge::to_log_config(&config, cli.verbose)?;
    if let Err(e) = cacao_telemetry::setup_logging(&log_config) {
        eprintln!("Failed to initialize logging: {e}");
    }
    tracing::debug!(files = ?resolved.loaded_files, "Configuration loaded");

    match cli.command {
        Commands::Render {
            input,
            namespace,
            emit_request,
        } => render::run_render(&input, &namespace, emit_request, cli.format)?,
        Commands::Parse {
            input,
            namespace,
            signature,
            cacao,
        } => parse::run_parse(&input, &namespace, signature, cacao, cli.format)?,
        Commands::Verify {
            input,
            at,
            clock_skew,
            phase_out,
            no_expiry,
        } => {
            let overrides = verify::Overrides {
                at,
                clock_skew,
                phase_out,
                no_expiry,
            };
            let options = verify::build_options(&config.verification, &overrides)?;
            if !verify::run_verify(&input, &options, cli.format)? {
                return Ok(ExitCode::FAILURE);
            }
        },
        Commands::Encode { input } => encode::run_encode(&input, cli.format)?,
        Commands::Decode { input, cid } => decode::run_decode(&input, cid.as_deref(), cli.format)?,
    }

    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_verify_flags() {
        let cli = Cli::try_parse_from([
            "cacao",
            "--format",
            "json",
            "verify",
            "cacao.json",
            "--at",
            "2021-09-30T16:25:24Z",
            "--clock-skew",
            "60",
            "--no-expiry",
        ])
        .unwrap();

        assert_eq!(cli.format, OutputFormat::Json);
        match cli.command {
            Commands::Verify {
                at,
                clock_skew,
                phase_out,
                no_expiry,
                ..
            } => {
                assert_eq!(at.as_deref(), Some("2021-09-30T16:25:24Z"));
                assert_eq!(clock_skew, Some(60));
                assert_eq!(phase_out, None);
                assert!(no_expiry);
            },
            _ => panic!("expected verify"),
        }
    }

    #[test]
    fn test_render_defaults_to_ethereum() {
        let cli = Cli::try_parse_from(["cacao", "render", "-"]).unwrap();
        match cli.command {
            Commands::Render {
                namespace,
                emit_request,
                ..
            } => {
                assert_eq!(namespace, "eip155");
                assert!(!emit_request);
            },
            _ => panic!("expected render"),
        }
    }
}
