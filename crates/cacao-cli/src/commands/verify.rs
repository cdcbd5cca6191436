//! `cacao verify` - check a capability.

use std::path::Path;

use anyhow::Context;
use cacao_config::VerificationSection;
use cacao_core::{Cacao, parse_timestamp};
use cacao_verify::{VerificationEngine, VerifyOptions};

use crate::OutputFormat;
use crate::commands::{print_json, read_input};
use crate::theme::Theme;

/// Command-line overrides of the `[verification]` section.
#[derive(Debug, Default)]
pub(crate) struct Overrides {
    pub(crate) at: Option<String>,
    pub(crate) clock_skew: Option<u64>,
    pub(crate) phase_out: Option<u64>,
    pub(crate) no_expiry: bool,
}

/// Verification options from configuration, with flags taking precedence.
pub(crate) fn build_options(
    section: &VerificationSection,
    overrides: &Overrides,
) -> anyhow::Result<VerifyOptions> {
    let mut options = VerifyOptions::from(section);
    if let Some(at) = &overrides.at {
        options = options.at(parse_timestamp(at).context("--at must be an RFC 3339 timestamp")?);
    }
    if let Some(secs) = overrides.clock_skew {
        options = options.with_clock_skew_secs(secs);
    }
    if let Some(secs) = overrides.phase_out {
        options = options.with_revocation_phase_out_secs(secs);
    }
    if overrides.no_expiry {
        options = options.with_expiration_check(false);
    }
    Ok(options)
}

/// Verify the capability in `input`; returns whether it is valid.
pub(crate) fn run_verify(
    input: &Path,
    options: &VerifyOptions,
    format: OutputFormat,
) -> anyhow::Result<bool> {
    let cacao: Cacao =
        serde_json::from_str(&read_input(input)?).context("input is not a valid capability")?;
    let result = VerificationEngine::global().verify(&cacao, options);

    match format {
        OutputFormat::Json => {
            let out = serde_json::json!({
                "valid": result.is_ok(),
                "issuer": cacao.issuer(),
                "error": result.as_ref().err().map(ToString::to_string),
            });
            print_json(&out, format)?;
        },
        OutputFormat::Pretty => match &result {
            Ok(()) => {
                println!("{}", Theme::success("Capability is valid"));
                println!("{}", Theme::field("Issuer", cacao.issuer()));
                println!("{}", Theme::field("Audience", &cacao.payload().audience));
                if let Some(exp) = &cacao.payload().expiration_time {
                    println!("{}", Theme::field("Expires", exp));
                }
            },
            Err(e) => {
                println!("{}", Theme::error("Capability is not valid"));
                println!("{}", Theme::field("Issuer", cacao.issuer()));
                println!("{}", Theme::field("Reason", &e.to_string()));
            },
        },
    }

    Ok(result.is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use cacao_test::{
        signed_ethereum_cacao, test_ethereum_wallet, test_issued_at, test_siwe_request,
    };

    #[test]
    fn test_build_options_from_config() {
        let section = VerificationSection {
            clock_skew_secs: 30,
            revocation_phase_out_secs: 10,
            disable_expiration_check: false,
        };
        let options = build_options(&section, &Overrides::default()).unwrap();

        assert_eq!(options.clock_skew_secs, 30);
        assert_eq!(options.revocation_phase_out_secs, 10);
        assert!(!options.disable_expiration_check);
        assert_eq!(options.at_time, None);
    }

    #[test]
    fn test_flags_override_config() {
        let overrides = Overrides {
            at: Some("2021-09-30T16:25:24Z".to_string()),
            clock_skew: Some(0),
            phase_out: Some(5),
            no_expiry: true,
        };
        let options = build_options(&VerificationSection::default(), &overrides).unwrap();

        assert_eq!(options.at_time, Some(test_issued_at()));
        assert_eq!(options.clock_skew_secs, 0);
        assert_eq!(options.revocation_phase_out_secs, 5);
        assert!(options.disable_expiration_check);
    }

    #[test]
    fn test_bad_at_flag() {
        let overrides = Overrides {
            at: Some("yesterday".to_string()),
            ..Overrides::default()
        };
        assert!(build_options(&VerificationSection::default(), &overrides).is_err());
    }

    #[test]
    fn test_run_verify_file() {
        let wallet = test_ethereum_wallet();
        let cacao = signed_ethereum_cacao(&wallet, &test_siwe_request(&wallet.address()));

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cacao.json");
        std::fs::write(&path, serde_json::to_string(&cacao).unwrap()).unwrap();

        let options = VerifyOptions::new().at(test_issued_at());
        assert!(run_verify(&path, &options, OutputFormat::Json).unwrap());

        let mut unsigned = cacao;
        unsigned.s = None;
        std::fs::write(&path, serde_json::to_string(&unsigned).unwrap()).unwrap();
        assert!(!run_verify(&path, &options, OutputFormat::Pretty).unwrap());
    }
}
