//! `cacao decode` - capability from a hex DAG-CBOR block.

use std::path::Path;

use anyhow::Context;
use cacao_core::{BlockCodec, CacaoBlock, Cid, DagCborCodec};

use crate::OutputFormat;
use crate::commands::{print_json, read_input};

/// Decode hex block bytes, checking the content id when one is given.
pub(crate) fn decode_block(
    hex_text: &str,
    expected_cid: Option<&str>,
) -> anyhow::Result<CacaoBlock> {
    let trimmed = hex_text.trim();
    let bytes = hex::decode(trimmed.strip_prefix("0x").unwrap_or(trimmed))
        .context("block is not valid hex")?;
    let block = DagCborCodec::new().decode(&bytes)?;

    if let Some(expected) = expected_cid {
        let expected: Cid = expected.parse().context("--cid is not a valid content id")?;
        block.verify_cid(&expected)?;
    }
    Ok(block)
}

pub(crate) fn run_decode(
    input: &Path,
    expected_cid: Option<&str>,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let block = decode_block(&read_input(input)?, expected_cid)?;
    tracing::debug!(cid = %block.cid, "Decoded block");
    print_json(&block.value, format)
}
