use std::io::Write;

use anyhow::{Context, Result};
use atelier_theme::TokenExport;

use super::{load_document, write_file};
use crate::cli::ExportArgs;
use crate::clipboard::copy_to_clipboard;

pub fn run(args: ExportArgs, out: &mut dyn Write) -> Result<()> {
    let document = load_document(args.stylesheet.stylesheet.as_deref())?;
    let format = args.format;
    let rendered = TokenExport::capture(&document).render(format)?;

    if let Some(path) = &args.out {
        write_file(path, &rendered)?;
        writeln!(out, "Wrote {} ({})", path.display(), format.mime_type())?;
    }
    if args.copy {
        copy_to_clipboard(&rendered)
            .with_context(|| format!("failed to copy {} to the clipboard", format.file_name()))?;
        writeln!(out, "Copied {} to the clipboard.", format.file_name())?;
    }
    if args.out.is_none() && !args.copy {
        out.write_all(rendered.as_bytes())?;
    }
    Ok(())
}
