use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use futures::future::try_join_all;
use log::trace;

use crate::errors::FileAccessError;

/// Returns the most recent modification time among `sources`, each resolved against `root`.
///
/// Every file is stat'ed concurrently. The first file that cannot be inspected fails the whole lookup.
/// Returns `Ok(None)` if `sources` is empty.
pub async fn latest_modified(
    root: &Path,
    sources: &[PathBuf],
) -> Result<Option<DateTime<Utc>>, FileAccessError> {
    let lookups = sources
        .iter()
        .map(|source| modified_time(root.join(source)));

    let times = try_join_all(lookups).await?;

    Ok(times.into_iter().max())
}

async fn modified_time(path: PathBuf) -> Result<DateTime<Utc>, FileAccessError> {
    let modified = tokio::fs::metadata(&path)
        .await
        .and_then(|metadata| metadata.modified())
        .map_err(|source| FileAccessError {
            path: path.clone(),
            source,
        })?;

    let modified = DateTime::<Utc>::from(modified);
    trace!(target: "lastmod", "{} last modified {}", path.display(), modified);

    Ok(modified)
}

/// Formats a timestamp as the `YYYY-MM-DD` calendar date it falls on in UTC.
pub fn format_date(timestamp: &DateTime<Utc>) -> String {
    timestamp.format("%Y-%m-%d").to_string()
}
