//! # Atelier Sitemap - Static Sitemap Generation
//!
//! Derives the public pages of the documentation site from its route
//! declarations and writes a sitemap protocol document for them.
//!
//! - [`extract_routes`]: canonical [`RoutePath`]s declared in a source text
//! - [`build_sitemap`]: the XML document for a list of routes
//! - [`generate`]: the whole build step, driven by [`SitemapOptions`]
//!
//! ```rust
//! use atelier_sitemap::{build_sitemap, extract_routes};
//! use chrono::NaiveDate;
//!
//! let routes = extract_routes(r#"<Route path="/colors" /> <Route path="/" />"#);
//! let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
//! let xml = build_sitemap("https://example.com/", &routes, date).unwrap();
//!
//! assert!(xml.contains("<loc>https://example.com/</loc>"));
//! assert!(xml.contains("<loc>https://example.com/colors</loc>"));
//! ```

mod error;
mod generate;
mod route;
mod xml;

pub use error::{Result, SitemapError};
pub use generate::{
    generate, SitemapOptions, SitemapSummary, DEFAULT_OUT, DEFAULT_SITE_URL, DEFAULT_SOURCE,
};
pub use route::{extract_routes, RoutePath};
pub use xml::{build_sitemap, location, normalize_site_url, SITEMAP_NAMESPACE};
