//! `cacao render` - turn a sign-in request into signable text.

use std::path::Path;

use anyhow::Context;
use cacao_siwx::{FormatterRegistry, Rendered, SiwxMessage};

use crate::OutputFormat;
use crate::commands::{print_json, read_input};
use crate::theme::Theme;

/// Render a JSON request for `namespace`.
pub(crate) fn render_request(json: &str, namespace: &str) -> anyhow::Result<Rendered> {
    let request: SiwxMessage =
        serde_json::from_str(json).context("request is not a valid sign-in request")?;
    let formatter = FormatterRegistry::global().require(namespace)?;
    Ok(formatter.render(&request)?)
}

pub(crate) fn run_render(
    input: &Path,
    namespace: &str,
    emit_request: bool,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let rendered = render_request(&read_input(input)?, namespace)?;

    match format {
        OutputFormat::Json => {
            let mut out = serde_json::json!({ "text": rendered.text });
            if emit_request {
                out["request"] = serde_json::to_value(&rendered.message)?;
            }
            print_json(&out, format)?;
        },
        OutputFormat::Pretty => {
            println!("{}", rendered.text);
            if emit_request {
                eprintln!("{}", Theme::separator());
                print_json(&rendered.message, format)?;
            }
        },
    }
    Ok(())
}
