use std::fs;
use std::path::Path;

use log::debug;
use serde::Deserialize;

use crate::{
    errors::{FileWriteError, RouteConfigError, SitemapError},
    lastmod::{format_date, latest_modified},
    options::{SitemapOptions, normalize_base_url},
    routes::RouteEntry,
};

pub const SITEMAP_NAMESPACE: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

/// Optional sitemap fields for a specific route.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RouteSitemapMetadata {
    /// Change frequency for this route
    pub changefreq: Option<ChangeFreq>,
    /// Priority for this route (0.0 to 1.0)
    pub priority: Option<f32>,
}

/// Change frequency values for sitemap entries.
///
/// See: https://www.sitemaps.org/protocol.html#changefreqdef for more details.
/// This property is often ignored by search engines nowadays.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeFreq {
    Always,
    Hourly,
    Daily,
    Weekly,
    Monthly,
    Yearly,
    Never,
}

impl ChangeFreq {
    fn as_str(&self) -> &str {
        match self {
            ChangeFreq::Always => "always",
            ChangeFreq::Hourly => "hourly",
            ChangeFreq::Daily => "daily",
            ChangeFreq::Weekly => "weekly",
            ChangeFreq::Monthly => "monthly",
            ChangeFreq::Yearly => "yearly",
            ChangeFreq::Never => "never",
        }
    }
}

/// Represents a single URL entry in the sitemap.
#[derive(Debug, Clone, PartialEq)]
pub struct UrlEntry {
    pub loc: String,
    /// Calendar date, `YYYY-MM-DD`.
    pub lastmod: String,
    pub changefreq: Option<ChangeFreq>,
    pub priority: Option<f32>,
}

impl UrlEntry {
    fn to_xml(&self) -> String {
        let mut xml = String::from("  <url>\n");
        xml.push_str(&format!("    <loc>{}</loc>\n", escape_xml(&self.loc)));
        xml.push_str(&format!(
            "    <lastmod>{}</lastmod>\n",
            escape_xml(&self.lastmod)
        ));

        if let Some(changefreq) = self.changefreq {
            xml.push_str(&format!(
                "    <changefreq>{}</changefreq>\n",
                changefreq.as_str()
            ));
        }

        if let Some(priority) = self.priority {
            xml.push_str(&format!("    <priority>{:.1}</priority>\n", priority));
        }

        xml.push_str("  </url>\n");
        xml
    }
}

/// Escapes XML special characters.
fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

/// Resolves a stylesheet path to a full URL.
/// If the path starts with http:// or https://, it's used as-is.
/// Otherwise, it's appended to the base URL.
fn resolve_stylesheet_url(base_url: &str, stylesheet_path: &str) -> String {
    if stylesheet_path.starts_with("http://") || stylesheet_path.starts_with("https://") {
        stylesheet_path.to_string()
    } else {
        format!(
            "{}/{}",
            normalize_base_url(base_url),
            stylesheet_path.trim_start_matches('/')
        )
    }
}

/// Builds one entry per route, in table order.
///
/// Routes sharing a path are not merged, each one gets its own entry.
pub async fn build_url_entries(
    routes: &[RouteEntry],
    options: &SitemapOptions,
) -> Result<Vec<UrlEntry>, SitemapError> {
    let base_url = options.normalized_base_url();
    let mut entries = Vec::with_capacity(routes.len());

    for route in routes {
        let lastmod = latest_modified(&options.project_root, &route.sources)
            .await?
            .ok_or_else(|| RouteConfigError::NoSources {
                route: route.path.clone(),
            })?;

        let entry = UrlEntry {
            loc: format!("{}{}", base_url, route.path),
            lastmod: format_date(&lastmod),
            changefreq: route.sitemap.changefreq,
            priority: route.sitemap.priority,
        };

        debug!(
            target: "sitemap",
            "{} ({} sources) last modified {}",
            route.path,
            route.sources.len(),
            entry.lastmod
        );

        entries.push(entry);
    }

    Ok(entries)
}

/// Renders a complete `<urlset>` document.
pub fn render_sitemap(entries: &[UrlEntry], base_url: &str, stylesheet: Option<&str>) -> String {
    let mut xml = String::from("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");

    if let Some(stylesheet_path) = stylesheet {
        let stylesheet_url = resolve_stylesheet_url(base_url, stylesheet_path);
        xml.push_str(&format!(
            "<?xml-stylesheet type=\"text/xsl\" href=\"{}\"?>\n",
            escape_xml(&stylesheet_url)
        ));
    }

    xml.push_str(&format!("<urlset xmlns=\"{}\">\n", SITEMAP_NAMESPACE));

    for entry in entries {
        xml.push_str(&entry.to_xml());
    }

    xml.push_str("</urlset>\n");
    xml
}

/// Writes the sitemap, creating its parent directory if needed and replacing any previous file.
pub fn write_sitemap(contents: &str, output_path: &Path) -> Result<(), FileWriteError> {
    if let Some(parent) = output_path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|source| FileWriteError::CreateDirFailed {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    fs::write(output_path, contents).map_err(|source| FileWriteError::WriteFailed {
        path: output_path.to_path_buf(),
        source,
    })
}
