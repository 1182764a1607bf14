//! Error types for sitemap generation.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while generating a sitemap.
#[derive(Debug, Error)]
pub enum SitemapError {
    /// The route source could not be read.
    #[error("failed to read route source {}: {source}", path.display())]
    ReadSource {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// No acceptable route was found; an empty sitemap is never written.
    #[error("no <Route path=...> entries found in {}", path.display())]
    NoRoutes { path: PathBuf },

    /// The sitemap could not be written.
    #[error("failed to write sitemap {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// XML serialization failed.
    #[error("XML serialization failed: {0}")]
    Xml(String),
}

/// Result type for sitemap operations.
pub type Result<T> = std::result::Result<T, SitemapError>;
