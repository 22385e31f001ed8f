//! The table of routes listed in the sitemap, and the source files each one is built from.
//!
//! The site ships with an embedded table ([`default_routes()`]), a YAML file with the same shape can be
//! used instead through [`load_routes()`]:
//! ```yaml
//! routes:
//!   - path: /
//!     sources: [src/App.jsx, src/sections/HeroSection.jsx]
//!     changefreq: monthly
//!     priority: 1.0
//!   - path: /portfolio
//!     sources: [src/pages/Portfolio.jsx]
//! ```
use std::{
    fs,
    path::{Path, PathBuf},
};

use log::debug;
use rustc_hash::FxHashSet;
use serde::Deserialize;

use crate::{errors::RouteConfigError, sitemap::RouteSitemapMetadata};

/// A public URL path of the site, with the files whose modification time stands in for its last change.
#[derive(Debug, Clone, Deserialize)]
pub struct RouteEntry {
    /// URL path, e.g. `/portfolio`.
    pub path: String,
    /// Files relative to the project root. Must not be empty.
    pub sources: Vec<PathBuf>,
    #[serde(flatten)]
    pub sitemap: RouteSitemapMetadata,
}

impl RouteEntry {
    pub fn new<P: AsRef<Path>>(path: &str, sources: &[P]) -> Self {
        Self {
            path: path.to_string(),
            sources: sources.iter().map(|s| s.as_ref().to_path_buf()).collect(),
            sitemap: RouteSitemapMetadata::default(),
        }
    }

    pub fn with_sitemap(mut self, sitemap: RouteSitemapMetadata) -> Self {
        self.sitemap = sitemap;
        self
    }
}

#[derive(Debug, Deserialize)]
struct RouteTableFile {
    routes: Vec<RouteEntry>,
}

/// The routes of the portfolio site.
pub fn default_routes() -> Vec<RouteEntry> {
    vec![
        RouteEntry::new(
            "/",
            &[
                "src/App.jsx",
                "src/sections/HeroSection.jsx",
                "src/sections/AboutSection.jsx",
                "src/sections/PhilosophySection.jsx",
                "src/sections/HowIWork.jsx",
                "src/sections/ContactSection.jsx",
            ],
        ),
        RouteEntry::new("/portfolio", &["src/pages/Portfolio.jsx"]),
        RouteEntry::new("/resume", &["src/pages/MyResume.jsx"]),
        RouteEntry::new("/wip", &["src/pages/WhatImWorkingOn.jsx"]),
        RouteEntry::new(
            "/case-studies/low-code-case-management",
            &["src/pages/CaseStudyLowCode.jsx"],
        ),
        RouteEntry::new(
            "/case-studies/portfolio-and-resume-system",
            &["src/pages/CaseStudyPortfolioSystem.jsx"],
        ),
    ]
}

/// Loads and validates a route table from a YAML file.
pub fn load_routes(path: &Path) -> Result<Vec<RouteEntry>, RouteConfigError> {
    let content = fs::read_to_string(path).map_err(|source| RouteConfigError::ReadFailed {
        path: path.to_path_buf(),
        source,
    })?;

    let table = parse_routes(&content).map_err(|source| RouteConfigError::ParseFailed {
        path: path.to_path_buf(),
        source,
    })?;

    validate_routes(&table)?;

    debug!(target: "routes", "Loaded {} routes from {}", table.len(), path.display());

    Ok(table)
}

fn parse_routes(content: &str) -> Result<Vec<RouteEntry>, serde_yaml::Error> {
    serde_yaml::from_str::<RouteTableFile>(content).map(|file| file.routes)
}

/// Checks the invariants every route table must hold before any file is touched.
pub fn validate_routes(routes: &[RouteEntry]) -> Result<(), RouteConfigError> {
    if routes.is_empty() {
        return Err(RouteConfigError::NoRoutes);
    }

    for route in routes {
        if !route.path.starts_with('/') {
            return Err(RouteConfigError::InvalidPath {
                route: route.path.clone(),
            });
        }

        if route.sources.is_empty() {
            return Err(RouteConfigError::NoSources {
                route: route.path.clone(),
            });
        }

        if let Some(priority) = route.sitemap.priority
            && !(0.0..=1.0).contains(&priority)
        {
            return Err(RouteConfigError::InvalidPriority {
                route: route.path.clone(),
                priority,
            });
        }
    }

    Ok(())
}

/// Returns every path declared more than once, in order of its second appearance.
pub fn duplicate_paths(routes: &[RouteEntry]) -> Vec<&str> {
    let mut seen = FxHashSet::default();
    let mut duplicates = Vec::new();

    for route in routes {
        if !seen.insert(route.path.as_str()) && !duplicates.contains(&route.path.as_str()) {
            duplicates.push(route.path.as_str());
        }
    }

    duplicates
}
