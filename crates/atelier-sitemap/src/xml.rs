//! Sitemap protocol document.

use chrono::NaiveDate;
use quick_xml::se::Serializer;
use serde::Serialize;

use crate::error::SitemapError;
use crate::route::RoutePath;

pub const SITEMAP_NAMESPACE: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;

#[derive(Serialize)]
#[serde(rename = "urlset")]
struct UrlSet {
    #[serde(rename = "@xmlns")]
    xmlns: &'static str,
    url: Vec<UrlEntry>,
}

#[derive(Serialize)]
struct UrlEntry {
    loc: String,
    lastmod: String,
}

/// Strips trailing slashes from a site URL.
pub fn normalize_site_url(site_url: &str) -> &str {
    site_url.trim_end_matches('/')
}

/// Absolute location of `route` on `site_url`.
///
/// The root route keeps its slash: `https://example.com/`.
pub fn location(site_url: &str, route: &RoutePath) -> String {
    let base = normalize_site_url(site_url);
    if route.is_root() {
        format!("{base}/")
    } else {
        format!("{base}{route}")
    }
}

/// Builds the sitemap XML for `routes`, all stamped with `lastmod`.
pub fn build_sitemap(
    site_url: &str,
    routes: &[RoutePath],
    lastmod: NaiveDate,
) -> Result<String, SitemapError> {
    let lastmod = lastmod.format("%Y-%m-%d").to_string();
    let urlset = UrlSet {
        xmlns: SITEMAP_NAMESPACE,
        url: routes
            .iter()
            .map(|route| UrlEntry {
                loc: location(site_url, route),
                lastmod: lastmod.clone(),
            })
            .collect(),
    };

    let mut xml = String::from(XML_DECLARATION);
    xml.push('\n');
    let mut serializer = Serializer::new(&mut xml);
    serializer.indent(' ', 2);
    urlset
        .serialize(serializer)
        .map_err(|e| SitemapError::Xml(e.to_string()))?;
    xml.push('\n');
    Ok(xml)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn routes(paths: &[&str]) -> Vec<RoutePath> {
        paths.iter().filter_map(|p| RoutePath::parse(p)).collect()
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
    }

    #[test]
    fn test_locations() {
        let root = RoutePath::parse("/").unwrap();
        let colors = RoutePath::parse("/colors").unwrap();
        assert_eq!(location("https://example.com///", &root), "https://example.com/");
        assert_eq!(location("https://example.com", &colors), "https://example.com/colors");
    }

    #[test]
    fn test_document_layout() {
        let xml = build_sitemap("https://example.com/", &routes(&["/", "/colors"]), date()).unwrap();
        let expected = concat!(
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n",
            "<urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n",
            "  <url>\n",
            "    <loc>https://example.com/</loc>\n",
            "    <lastmod>2024-01-01</lastmod>\n",
            "  </url>\n",
            "  <url>\n",
            "    <loc>https://example.com/colors</loc>\n",
            "    <lastmod>2024-01-01</lastmod>\n",
            "  </url>\n",
            "</urlset>\n",
        );
        assert_eq!(xml, expected);
    }

    #[test]
    fn test_locations_are_escaped() {
        let xml = build_sitemap("https://example.com/?a=1&b=2", &routes(&["/x"]), date()).unwrap();
        assert!(xml.contains("<loc>https://example.com/?a=1&amp;b=2/x</loc>"));
    }
}
