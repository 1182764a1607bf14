use std::io::Write;
use std::path::Path;

use anyhow::Result;
use atelier_theme::{export_tokens, read_tokens};

use super::{load_document, resolve_mode};
use crate::cli::TokensArgs;

pub fn run(args: TokensArgs, preferences: Option<&Path>, out: &mut dyn Write) -> Result<()> {
    let document = load_document(args.stylesheet.stylesheet.as_deref())?;
    let mode = resolve_mode(args.mode, preferences)?;

    let values = if args.names.is_empty() {
        read_tokens(&document, &export_tokens(), mode)
    } else {
        read_tokens(&document, &args.names, mode)
    };

    if args.json {
        writeln!(out, "{}", serde_json::to_string_pretty(&values)?)?;
        return Ok(());
    }
    for (name, value) in &values {
        if value.is_empty() {
            writeln!(out, "--{name}: /* undefined */")?;
        } else {
            writeln!(out, "--{name}: {value};")?;
        }
    }
    Ok(())
}
