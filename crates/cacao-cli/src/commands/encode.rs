//! `cacao encode` - DAG-CBOR block and content id of a capability.

use std::path::Path;

use anyhow::Context;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use cacao_core::{BlockCodec, Cacao, CacaoBlock, DagCborCodec};

use crate::OutputFormat;
use crate::commands::{print_json, read_input};
use crate::theme::Theme;

/// Encode a JSON capability into a block.
pub(crate) fn encode_document(json: &str) -> anyhow::Result<CacaoBlock> {
    let cacao: Cacao = serde_json::from_str(json).context("input is not a valid capability")?;
    Ok(DagCborCodec::new().encode(&cacao)?)
}

pub(crate) fn run_encode(input: &Path, format: OutputFormat) -> anyhow::Result<()> {
    let block = encode_document(&read_input(input)?)?;
    let hex = hex::encode(&block.bytes);
    let base64 = STANDARD.encode(&block.bytes);

    match format {
        OutputFormat::Json => print_json(
            &serde_json::json!({
                "cid": block.cid.to_string(),
                "hex": hex,
                "base64": base64,
            }),
            format,
        )?,
        OutputFormat::Pretty => {
            println!("{}", Theme::header("DAG-CBOR block"));
            println!("{}", Theme::field("CID", &block.cid.to_string()));
            println!("{}", Theme::field("Size", &block.bytes.len().to_string()));
            println!("{}", Theme::field("Hex", &hex));
            println!("{}", Theme::field("Base64", &base64));
        },
    }
    Ok(())
}
