//! Error types for sitemap generation.
use std::fmt::{self, Debug, Formatter};
use std::path::PathBuf;
use thiserror::Error;

macro_rules! impl_debug_for_error {
    ($($t:ty),*) => {
        $(
            impl Debug for $t {
                fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
                    // Errors returned from `main` are printed through Debug, route them to Display instead.
                    write!(f, "{}", self)
                }
            }
        )*
    };
}

/// A declared source file could not be inspected.
#[derive(Error)]
#[error("Failed to read metadata for source file: {path}")]
pub struct FileAccessError {
    pub path: PathBuf,
    #[source]
    pub source: std::io::Error,
}

/// The sitemap could not be written to its destination.
#[derive(Error)]
pub enum FileWriteError {
    #[error("Failed to create output directory: {path}")]
    CreateDirFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to write sitemap file: {path}")]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Error)]
pub enum RouteConfigError {
    #[error("Failed to read route table: {path}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse route table: {path}")]
    ParseFailed {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
    #[error("Route table does not declare any route")]
    NoRoutes,
    #[error("Route `{route}` does not declare any source file")]
    NoSources { route: String },
    #[error("Route `{route}` must start with `/`")]
    InvalidPath { route: String },
    #[error("Route `{route}` has priority {priority}, expected a value between 0.0 and 1.0")]
    InvalidPriority { route: String, priority: f32 },
}

#[derive(Error, Debug)]
pub enum SitemapError {
    #[error(transparent)]
    FileAccess(#[from] FileAccessError),

    #[error(transparent)]
    FileWrite(#[from] FileWriteError),

    #[error(transparent)]
    RouteConfig(#[from] RouteConfigError),

    #[error("Failed to start async runtime")]
    Runtime(#[source] std::io::Error),
}

impl_debug_for_error!(FileAccessError, FileWriteError, RouteConfigError);
