//! The sitemap build step: read routes, build the document, write it out.

use std::fmt;
use std::fs;
use std::path::PathBuf;

use chrono::NaiveDate;

use crate::error::{Result, SitemapError};
use crate::route::extract_routes;
use crate::xml::build_sitemap;

pub const DEFAULT_SITE_URL: &str = "https://www.atelierdesignsystem.com";
pub const DEFAULT_SOURCE: &str = "src/App.tsx";
pub const DEFAULT_OUT: &str = "public/sitemap.xml";

/// Inputs of the sitemap build step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SitemapOptions {
    /// Public base URL of the site; trailing slashes are ignored.
    pub site_url: String,
    /// File holding the route declarations.
    pub source: PathBuf,
    /// Where the sitemap is written.
    pub out: PathBuf,
}

impl Default for SitemapOptions {
    fn default() -> Self {
        Self {
            site_url: DEFAULT_SITE_URL.to_string(),
            source: PathBuf::from(DEFAULT_SOURCE),
            out: PathBuf::from(DEFAULT_OUT),
        }
    }
}

/// Outcome of a successful generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SitemapSummary {
    pub out: PathBuf,
    pub routes: usize,
}

impl fmt::Display for SitemapSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Generated {} with {} routes.",
            self.out.display(),
            self.routes
        )
    }
}

/// Generates the sitemap described by `options`.
///
/// Fails with [`SitemapError::NoRoutes`] instead of writing an empty sitemap.
/// Parent directories of the output are created as needed.
pub fn generate(options: &SitemapOptions, lastmod: NaiveDate) -> Result<SitemapSummary> {
    let source = fs::read_to_string(&options.source).map_err(|source| SitemapError::ReadSource {
        path: options.source.clone(),
        source,
    })?;

    let routes = extract_routes(&source);
    if routes.is_empty() {
        return Err(SitemapError::NoRoutes {
            path: options.source.clone(),
        });
    }
    tracing::debug!(routes = routes.len(), source = %options.source.display(), "routes extracted");

    let xml = build_sitemap(&options.site_url, &routes, lastmod)?;

    let write_error = |source| SitemapError::Write {
        path: options.out.clone(),
        source,
    };
    if let Some(parent) = options.out.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(write_error)?;
    }
    fs::write(&options.out, xml).map_err(write_error)?;

    Ok(SitemapSummary {
        out: options.out.clone(),
        routes: routes.len(),
    })
}
