//! Generates `sitemap.xml` for the portfolio site.
//!
//! Every route of the site is backed by one or more source files. The `lastmod` of a route is the date
//! its most recently modified source was changed, so the sitemap only moves when content actually does.
//!
//! ## Example
//! ```rust,no_run
//! use folio_sitemap::{SitemapOptions, generate_sitemap, routes::default_routes};
//!
//! fn main() -> Result<(), folio_sitemap::errors::SitemapError> {
//!     let output = generate_sitemap(&default_routes(), &SitemapOptions::default())?;
//!     println!("Sitemap generated at {}", output.output_path.display());
//!     Ok(())
//! }
//! ```

pub mod errors;
pub mod lastmod;
pub mod routes;
pub mod sitemap;

mod logging;
mod options;

pub use logging::init_logging;
pub use options::{BASE_URL_ENV, DEFAULT_BASE_URL, SitemapOptions, base_url_from_env};

use std::{
    path::{self, PathBuf},
    time::Instant,
};

use colored::Colorize;
use log::{info, warn};

use errors::{FileWriteError, SitemapError};
use logging::{FormatElapsedTimeOptions, format_elapsed_time};
use routes::{RouteEntry, duplicate_paths, validate_routes};
use sitemap::{build_url_entries, render_sitemap, write_sitemap};

/// Metadata returned by [`generate()`] after a successful run.
#[derive(Debug)]
pub struct SitemapOutput {
    /// Absolute path of the written sitemap.
    pub output_path: PathBuf,
    /// Number of `<url>` entries in the sitemap.
    pub urls: usize,
}

/// Builds the sitemap for `routes` and writes it to the configured output path.
///
/// Nothing is written unless every source of every route could be inspected.
pub async fn generate(
    routes: &[RouteEntry],
    options: &SitemapOptions,
) -> Result<SitemapOutput, SitemapError> {
    let start = Instant::now();

    validate_routes(routes)?;

    for route in duplicate_paths(routes) {
        warn!(target: "routes", "`{}` is declared more than once, it will appear multiple times in the sitemap", route);
    }

    let entries = build_url_entries(routes, options).await?;
    let xml = render_sitemap(
        &entries,
        options.normalized_base_url(),
        options.stylesheet.as_deref(),
    );

    let output_path = absolute_output_path(options)?;
    write_sitemap(&xml, &output_path)?;

    info!(
        target: "sitemap",
        "{}",
        format!(
            "Wrote {} URLs in {}",
            entries.len(),
            format_elapsed_time(start.elapsed(), &FormatElapsedTimeOptions::default())
        )
        .bold()
    );

    Ok(SitemapOutput {
        output_path,
        urls: entries.len(),
    })
}

fn absolute_output_path(options: &SitemapOptions) -> Result<PathBuf, FileWriteError> {
    let output_path = options.resolved_output_path();
    path::absolute(&output_path).map_err(|source| FileWriteError::WriteFailed {
        path: output_path,
        source,
    })
}

/// Blocking entrypoint. Starts an async runtime and runs [`generate()`] on it.
pub fn generate_sitemap(
    routes: &[RouteEntry],
    options: &SitemapOptions,
) -> Result<SitemapOutput, SitemapError> {
    let async_runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(SitemapError::Runtime)?;

    async_runtime.block_on(generate(routes, options))
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::RouteConfigError;
    use crate::test_utils::{touch, utc};
    use std::fs;
    use std::path::Path;
    use tempfile::tempdir;

    fn options_for(root: &Path) -> SitemapOptions {
        SitemapOptions {
            base_url: "https://example.com/".to_string(),
            project_root: root.to_path_buf(),
            output_path: PathBuf::from("public/sitemap.xml"),
            stylesheet: None,
        }
    }

    fn site_fixture(root: &Path) -> Vec<RouteEntry> {
        touch(&root.join("src/App.jsx"), utc("2025-01-05T12:00:00Z"));
        touch(
            &root.join("src/sections/HeroSection.jsx"),
            utc("2025-02-10T09:30:00Z"),
        );
        touch(
            &root.join("src/pages/Portfolio.jsx"),
            utc("2025-03-14T10:00:00Z"),
        );
        touch(
            &root.join("src/pages/MyResume.jsx"),
            utc("2024-12-01T23:59:59Z"),
        );

        vec![
            RouteEntry::new("/", &["src/App.jsx", "src/sections/HeroSection.jsx"]),
            RouteEntry::new("/portfolio", &["src/pages/Portfolio.jsx"]),
            RouteEntry::new("/resume", &["src/pages/MyResume.jsx"]),
        ]
    }

    #[tokio::test]
    async fn test_generate_writes_sitemap() {
        let dir = tempdir().unwrap();
        let routes = site_fixture(dir.path());

        let output = generate(&routes, &options_for(dir.path())).await.unwrap();

        assert_eq!(output.urls, 3);
        assert!(output.output_path.is_absolute());
        assert!(output.output_path.ends_with("public/sitemap.xml"));

        let content = fs::read_to_string(&output.output_path).unwrap();
        assert_eq!(
            content,
            r#"<?xml version="1.0" encoding="UTF-8"?>
<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
  <url>
    <loc>https://example.com/</loc>
    <lastmod>2025-02-10</lastmod>
  </url>
  <url>
    <loc>https://example.com/portfolio</loc>
    <lastmod>2025-03-14</lastmod>
  </url>
  <url>
    <loc>https://example.com/resume</loc>
    <lastmod>2024-12-01</lastmod>
  </url>
</urlset>
"#
        );
    }

    #[tokio::test]
    async fn test_generate_is_idempotent() {
        let dir = tempdir().unwrap();
        let routes = site_fixture(dir.path());
        let options = options_for(dir.path());

        let first = generate(&routes, &options).await.unwrap();
        let first_content = fs::read(&first.output_path).unwrap();

        let second = generate(&routes, &options).await.unwrap();
        let second_content = fs::read(&second.output_path).unwrap();

        assert_eq!(first.output_path, second.output_path);
        assert_eq!(first_content, second_content);
    }

    #[tokio::test]
    async fn test_touching_a_source_only_changes_its_route() {
        let dir = tempdir().unwrap();
        let routes = site_fixture(dir.path());
        let options = options_for(dir.path());

        let before = build_url_entries(&routes, &options).await.unwrap();

        touch(
            &dir.path().join("src/pages/MyResume.jsx"),
            utc("2025-04-01T08:00:00Z"),
        );
        let after = build_url_entries(&routes, &options).await.unwrap();

        assert_eq!(before[0], after[0]);
        assert_eq!(before[1], after[1]);
        assert_eq!(before[2].lastmod, "2024-12-01");
        assert_eq!(after[2].lastmod, "2025-04-01");
    }

    #[tokio::test]
    async fn test_generate_missing_source_writes_nothing() {
        let dir = tempdir().unwrap();
        let mut routes = site_fixture(dir.path());
        routes.push(RouteEntry::new("/wip", &["src/pages/WhatImWorkingOn.jsx"]));
        let options = options_for(dir.path());

        let result = generate(&routes, &options).await;

        assert!(matches!(result, Err(SitemapError::FileAccess(_))));
        assert!(!dir.path().join("public/sitemap.xml").exists());
        assert!(!dir.path().join("public").exists());
    }

    #[tokio::test]
    async fn test_generate_missing_source_keeps_previous_sitemap() {
        let dir = tempdir().unwrap();
        let routes = site_fixture(dir.path());
        let options = options_for(dir.path());

        let output = generate(&routes, &options).await.unwrap();
        let previous = fs::read_to_string(&output.output_path).unwrap();

        fs::remove_file(dir.path().join("src/pages/Portfolio.jsx")).unwrap();
        assert!(generate(&routes, &options).await.is_err());

        assert_eq!(fs::read_to_string(&output.output_path).unwrap(), previous);
    }

    #[tokio::test]
    async fn test_generate_rejects_invalid_table() {
        let dir = tempdir().unwrap();

        let result = generate(&[], &options_for(dir.path())).await;

        assert!(matches!(
            result,
            Err(SitemapError::RouteConfig(RouteConfigError::NoRoutes))
        ));
    }

    #[tokio::test]
    async fn test_generate_with_stylesheet_and_absolute_output() {
        let dir = tempdir().unwrap();
        let routes = site_fixture(dir.path());
        let output_path = dir.path().join("dist/seo/sitemap.xml");
        let options = SitemapOptions {
            output_path: output_path.clone(),
            stylesheet: Some("sitemap.xsl".to_string()),
            ..options_for(dir.path())
        };

        let output = generate(&routes, &options).await.unwrap();

        assert_eq!(output.output_path, output_path);
        let content = fs::read_to_string(&output_path).unwrap();
        assert!(content.contains(
            "<?xml-stylesheet type=\"text/xsl\" href=\"https://example.com/sitemap.xsl\"?>"
        ));
    }

    #[test]
    fn test_absolute_output_path() {
        let dir = tempdir().unwrap();

        let output_path = absolute_output_path(&options_for(dir.path())).unwrap();
        assert_eq!(output_path, dir.path().join("public/sitemap.xml"));

        let relative = SitemapOptions {
            project_root: PathBuf::from("site"),
            ..options_for(dir.path())
        };
        let output_path = absolute_output_path(&relative).unwrap();
        assert!(output_path.is_absolute());
        assert!(output_path.ends_with("site/public/sitemap.xml"));
    }

    #[test]
    fn test_absolute_output_path_failure_names_the_path() {
        let options = SitemapOptions {
            project_root: PathBuf::new(),
            output_path: PathBuf::new(),
            ..options_for(Path::new("."))
        };

        match absolute_output_path(&options) {
            Err(FileWriteError::WriteFailed { path, source }) => {
                assert_eq!(path, PathBuf::new());
                assert_eq!(source.kind(), std::io::ErrorKind::InvalidInput);
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_generate_sitemap_blocking() {
        let dir = tempdir().unwrap();
        let routes = site_fixture(dir.path());

        let output = generate_sitemap(&routes, &options_for(dir.path())).unwrap();

        assert_eq!(output.urls, 3);
        assert!(output.output_path.exists());
    }
}
