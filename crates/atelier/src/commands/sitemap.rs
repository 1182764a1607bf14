use std::io::Write;

use anyhow::Result;
use atelier_sitemap::{generate, SitemapOptions};

use crate::cli::SitemapArgs;

pub fn run(args: SitemapArgs, out: &mut dyn Write) -> Result<()> {
    let lastmod = args
        .lastmod
        .unwrap_or_else(|| chrono::Utc::now().date_naive());
    let options = SitemapOptions {
        site_url: args.site_url,
        source: args.source,
        out: args.out,
    };

    let summary = generate(&options, lastmod)?;
    writeln!(out, "{summary}")?;
    Ok(())
}
