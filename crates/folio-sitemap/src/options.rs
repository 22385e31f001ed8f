use std::{env, path::PathBuf};

/// Production URL of the site, used when `SITE_BASE_URL` is not set.
pub const DEFAULT_BASE_URL: &str = "https://sergioantezana.com";

/// Environment variable overriding [`DEFAULT_BASE_URL`].
pub const BASE_URL_ENV: &str = "SITE_BASE_URL";

/// Sitemap generation options. Should be passed to [`generate_sitemap()`](crate::generate_sitemap()).
///
/// ## Examples
/// Default values:
/// ```rust,no_run
/// use folio_sitemap::{SitemapOptions, generate_sitemap, routes::default_routes};
///
/// fn main() -> Result<(), folio_sitemap::errors::SitemapError> {
///   generate_sitemap(&default_routes(), &SitemapOptions::default())?;
///   Ok(())
/// }
/// ```
/// Custom values:
/// ```rust,no_run
/// use folio_sitemap::{SitemapOptions, generate_sitemap, routes::default_routes};
///
/// fn main() -> Result<(), folio_sitemap::errors::SitemapError> {
///   generate_sitemap(
///     &default_routes(),
///     &SitemapOptions {
///       base_url: "https://staging.example.com/".into(),
///       project_root: "site".into(),
///       stylesheet: Some("/sitemap.xsl".into()),
///       ..Default::default()
///     },
///   )?;
///   Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct SitemapOptions {
    /// Base URL for the site, e.g. `https://example.com`. A trailing slash is ignored.
    pub base_url: String,

    /// Directory the route sources are relative to.
    pub project_root: PathBuf,

    /// Where the sitemap is written. Relative paths are resolved against `project_root`.
    pub output_path: PathBuf,

    /// Optional XSL stylesheet for styling the sitemap. Default: `None`
    ///
    /// If the value starts with `http(s)://` it will be used as-is (ex: your stylesheet might be coming from a CDN).
    ///
    /// Otherwise, the path is appended to the base URL. For example, `sitemap.xsl` with base URL
    /// `https://example.com` becomes `https://example.com/sitemap.xsl`.
    pub stylesheet: Option<String>,
}

impl Default for SitemapOptions {
    fn default() -> Self {
        Self {
            base_url: base_url_from_env(),
            project_root: PathBuf::from("."),
            output_path: PathBuf::from("public").join("sitemap.xml"),
            stylesheet: None,
        }
    }
}

impl SitemapOptions {
    /// Returns the base URL with a single trailing slash removed, ready to be joined with route paths.
    pub fn normalized_base_url(&self) -> &str {
        normalize_base_url(&self.base_url)
    }

    /// Returns the output path resolved against the project root.
    pub fn resolved_output_path(&self) -> PathBuf {
        if self.output_path.is_absolute() {
            self.output_path.clone()
        } else {
            self.project_root.join(&self.output_path)
        }
    }
}

/// Reads the base URL from `SITE_BASE_URL`, falling back to [`DEFAULT_BASE_URL`].
pub fn base_url_from_env() -> String {
    env::var(BASE_URL_ENV).unwrap_or_else(|_| DEFAULT_BASE_URL.to_string())
}

pub fn normalize_base_url(base_url: &str) -> &str {
    base_url.strip_suffix('/').unwrap_or(base_url)
}
