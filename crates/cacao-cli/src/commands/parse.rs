//! `cacao parse` - turn signed text back into a request or capability.

use std::path::Path;

use cacao_siwx::{FormatterRegistry, SiwxMessage};

use crate::OutputFormat;
use crate::commands::{print_json, read_input};

/// Parse message text for `namespace`, attaching `signature` when given.
///
/// A single trailing newline (as left by editors) is ignored.
pub(crate) fn parse_message(
    text: &str,
    namespace: &str,
    signature: Option<String>,
) -> anyhow::Result<SiwxMessage> {
    let text = text
        .strip_suffix("\r\n")
        .or_else(|| text.strip_suffix('\n'))
        .unwrap_or(text);
    let formatter = FormatterRegistry::global().require(namespace)?;
    let message = formatter.parse(text)?;
    Ok(match signature {
        Some(signature) => message.with_signature(signature),
        None => message,
    })
}

pub(crate) fn run_parse(
    input: &Path,
    namespace: &str,
    signature: Option<String>,
    package: bool,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let message = parse_message(&read_input(input)?, namespace, signature)?;
    if package {
        let cacao = FormatterRegistry::global().from_chain_message(namespace, &message)?;
        print_json(&cacao, format)
    } else {
        print_json(&message, format)
    }
}
