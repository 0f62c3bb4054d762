//! Async wrappers around the banner pipeline.
//!
//! Decoding and encoding are CPU-bound, so they run on tokio's blocking pool.
//! Each call is independent. Dropping the returned future does not stop the
//! work already handed to the pool; its result is simply discarded.

use std::path::Path;

use super::asset::{BannerAsset, ImageAsset};
use super::normalize::normalize_banner;
use super::options::BannerOptions;
use crate::error::{Error, Result};

/// Normalize a banner without blocking the async executor.
///
/// # Example
///
/// ```no_run
/// use ongkit::banner::{normalize_banner_async, BannerOptions, ImageAsset};
///
/// # async fn run() -> ongkit::Result<()> {
/// let source = ImageAsset::from_path("cover.webp")?;
/// let banner = normalize_banner_async(source, BannerOptions::default()).await?;
/// banner.save("cover.jpg")?;
/// # Ok(())
/// # }
/// ```
pub async fn normalize_banner_async(
    source: ImageAsset,
    options: BannerOptions,
) -> Result<BannerAsset> {
    tokio::task::spawn_blocking(move || normalize_banner(&source, &options))
        .await
        .map_err(|e| Error::Other(format!("Banner task failed: {}", e)))?
}

/// Read and normalize an image file asynchronously.
pub async fn normalize_banner_file_async<P: AsRef<Path>>(
    path: P,
    options: BannerOptions,
) -> Result<BannerAsset> {
    let path = path.as_ref();
    let data = tokio::fs::read(path).await?;
    let mut source = ImageAsset::new(data);
    source.filename = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned());
    normalize_banner_async(source, options).await
}
