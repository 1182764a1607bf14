use std::fs;
use std::io::{self, Write};

use anyhow::{Context, Result};
use atelier_dtcg::convert_json;

use super::write_file;
use crate::cli::DtcgArgs;

pub fn run(args: DtcgArgs, out: &mut dyn Write) -> Result<()> {
    let (label, input) = match args.input.as_deref() {
        Some(path) if path.as_os_str() != "-" => (
            path.display().to_string(),
            fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?,
        ),
        _ => (
            "stdin".to_string(),
            io::read_to_string(io::stdin()).context("failed to read stdin")?,
        ),
    };

    let converted = convert_json(&input).with_context(|| format!("cannot convert {label}"))?;
    match args.out {
        Some(path) => {
            write_file(&path, &format!("{converted}\n"))?;
            tracing::info!(path = %path.display(), "wrote DTCG tokens");
        }
        None => writeln!(out, "{converted}")?,
    }
    Ok(())
}
