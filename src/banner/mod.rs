//! Banner image normalization.
//!
//! Turns an arbitrary image into a fixed-size banner (1200x400 JPEG at quality
//! 0.85 by default) using "cover" semantics: the image fills the whole banner,
//! aspect ratio is preserved, and the overflow is cropped evenly on both sides.
//!
//! - [`cover_placement`] is the pure geometry (scale, offsets, source crop).
//! - [`normalize_banner`] runs decode, crop, resample and JPEG encode.
//! - [`normalize_banners`] processes several images in parallel.
//! - `normalize_banner_async` (feature `async`) runs on tokio's blocking pool.

mod asset;
mod geometry;
mod normalize;
mod options;

#[cfg(feature = "async")]
mod nonblocking;

pub use asset::{BannerAsset, ImageAsset, ImageInfo};
pub use geometry::{cover_placement, CoverPlacement};
pub use normalize::{
    normalize_banner, normalize_banner_bytes, normalize_banner_file, normalize_banners,
};
pub use options::{
    BannerOptions, ResampleFilter, DEFAULT_HEIGHT, DEFAULT_QUALITY, DEFAULT_WIDTH,
    MAX_CANVAS_DIMENSION,
};

#[cfg(feature = "async")]
pub use nonblocking::{normalize_banner_async, normalize_banner_file_async};
