use std::io::Write;
use std::path::Path;

use anyhow::Result;
use atelier_theme::{resolve_computed_color, to_css_color_expression, to_hex};

use super::{load_document, resolve_mode};
use crate::cli::ColorArgs;

pub fn run(args: ColorArgs, preferences: Option<&Path>, out: &mut dyn Write) -> Result<()> {
    let document = load_document(args.stylesheet.stylesheet.as_deref())?;
    // The page shows this mode; color probes inherit it.
    let mode = resolve_mode(args.mode, preferences)?;
    document.set_root_marker(mode.is_dark());

    for raw in &args.expressions {
        let expression = if args.triplet {
            to_css_color_expression(raw)
        } else {
            raw.trim().to_string()
        };
        let computed = resolve_computed_color(&document, &expression);
        if computed.is_empty() {
            writeln!(out, "{expression}\tunresolved")?;
            continue;
        }
        let hex = to_hex(&document, &expression);
        let hex = if hex.is_empty() { "-" } else { hex.as_str() };
        writeln!(out, "{expression}\t{computed}\t{hex}")?;
    }
    Ok(())
}
