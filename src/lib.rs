//! # ongkit
//!
//! Form utilities for a donation platform that connects donors with
//! non-profit organizations (ONGs).
//!
//! Two independent components:
//!
//! - [`document`]: progressive formatting and modulo-11 validation of
//!   Brazilian CPF and CNPJ numbers. Total functions, safe to call on every
//!   keystroke.
//! - [`banner`]: cover-crop an arbitrary image into a fixed-size JPEG banner
//!   (1200x400 at quality 0.85 by default).
//!
//! ## Quick Start
//!
//! ```no_run
//! use ongkit::{format_cnpj, is_valid_cnpj, BannerNormalizer};
//!
//! fn main() -> ongkit::Result<()> {
//!     assert_eq!(format_cnpj("11222333000181"), "11.222.333/0001-81");
//!     assert!(is_valid_cnpj("11.222.333/0001-81"));
//!
//!     let banner = BannerNormalizer::new().normalize_file("cover.png")?;
//!     banner.save(banner.suggested_filename())?;
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - `async`: tokio-based `normalize_banner_async`
//! - `ffi`: C ABI for native hosts

pub mod banner;
pub mod detect;
pub mod document;
pub mod error;

#[cfg(feature = "ffi")]
pub mod ffi;

// Re-export commonly used types
pub use banner::{
    cover_placement, normalize_banner, normalize_banner_bytes, normalize_banner_file,
    normalize_banners, BannerAsset, BannerOptions, CoverPlacement, ImageAsset, ImageInfo,
    ResampleFilter,
};
pub use detect::{detect_format_from_bytes, detect_format_from_path, is_image, ImageKind};
pub use document::{
    check_digits, format_document, has_complete_length, inspect, strip_formatting, validate,
    DocumentKind, DocumentReport, JsonFormat,
};
pub use error::{Error, Result};

#[cfg(feature = "async")]
pub use banner::{normalize_banner_async, normalize_banner_file_async};

use std::path::Path;

/// Format a (possibly partial) CPF as `XXX.XXX.XXX-XX`.
///
/// # Example
///
/// ```
/// assert_eq!(ongkit::format_cpf("5299822"), "529.982.2");
/// ```
pub fn format_cpf(value: &str) -> String {
    format_document(value, DocumentKind::Cpf)
}

/// Format a (possibly partial) CNPJ as `XX.XXX.XXX/XXXX-XX`.
pub fn format_cnpj(value: &str) -> String {
    format_document(value, DocumentKind::Cnpj)
}

/// Validate a CPF, formatted or not.
///
/// # Example
///
/// ```
/// assert!(ongkit::is_valid_cpf("529.982.247-25"));
/// assert!(!ongkit::is_valid_cpf("111.111.111-11"));
/// ```
pub fn is_valid_cpf(value: &str) -> bool {
    validate(value, DocumentKind::Cpf)
}

/// Validate a CNPJ, formatted or not.
pub fn is_valid_cnpj(value: &str) -> bool {
    validate(value, DocumentKind::Cnpj)
}

/// Builder for normalizing banner images.
///
/// # Example
///
/// ```no_run
/// use ongkit::{BannerNormalizer, ResampleFilter};
///
/// let banner = BannerNormalizer::new()
///     .with_size(1500, 500)
///     .with_quality(0.9)
///     .with_filter(ResampleFilter::Lanczos3)
///     .normalize_file("cover.png")?;
/// # Ok::<(), ongkit::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct BannerNormalizer {
    options: BannerOptions,
}

impl BannerNormalizer {
    /// Create a new normalizer with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the output size.
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.options = self.options.with_size(width, height);
        self
    }

    /// Set the JPEG quality (0.0..=1.0).
    pub fn with_quality(mut self, quality: f32) -> Self {
        self.options = self.options.with_quality(quality);
        self
    }

    /// Set the resampling filter.
    pub fn with_filter(mut self, filter: ResampleFilter) -> Self {
        self.options = self.options.with_filter(filter);
        self
    }

    /// The options this normalizer applies.
    pub fn options(&self) -> &BannerOptions {
        &self.options
    }

    /// Normalize an in-memory image.
    pub fn normalize(&self, source: &ImageAsset) -> Result<BannerAsset> {
        normalize_banner(source, &self.options)
    }

    /// Normalize encoded bytes.
    pub fn normalize_bytes(&self, data: &[u8]) -> Result<BannerAsset> {
        normalize_banner_bytes(data, &self.options)
    }

    /// Normalize an image file.
    pub fn normalize_file<P: AsRef<Path>>(&self, path: P) -> Result<BannerAsset> {
        normalize_banner_file(path, &self.options)
    }

    /// Normalize several images in parallel, preserving order.
    pub fn normalize_all(&self, sources: &[ImageAsset]) -> Vec<Result<BannerAsset>> {
        normalize_banners(sources, &self.options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_default() {
        let normalizer = BannerNormalizer::default();
        assert_eq!(normalizer.options(), &BannerOptions::default());
    }

    #[test]
    fn test_builder_chained() {
        let normalizer = BannerNormalizer::new()
            .with_size(600, 200)
            .with_quality(0.7)
            .with_filter(ResampleFilter::CatmullRom);

        let options = normalizer.options();
        assert_eq!((options.width, options.height), (600, 200));
        assert_eq!(options.quality, 0.7);
        assert_eq!(options.filter, ResampleFilter::CatmullRom);
    }

    #[test]
    fn test_builder_rejects_invalid_bytes() {
        let result = BannerNormalizer::new().normalize_bytes(b"not an image");
        assert!(matches!(result, Err(Error::UnknownFormat)));
    }

    #[test]
    fn test_builder_invalid_quality() {
        let result = BannerNormalizer::new()
            .with_quality(2.0)
            .normalize_bytes(b"not an image");
        assert!(matches!(result, Err(Error::InvalidOptions(_))));
    }

    // ==================== Document Shortcuts ====================

    #[test]
    fn test_format_shortcuts() {
        assert_eq!(format_cpf(""), "");
        assert_eq!(format_cpf("abc"), "");
        assert_eq!(format_cpf("52998224725"), "529.982.247-25");
        assert_eq!(format_cnpj("11222333000181"), "11.222.333/0001-81");
    }

    #[test]
    fn test_validate_shortcuts() {
        assert!(is_valid_cpf("529.982.247-25"));
        assert!(!is_valid_cpf("529.982.247-24"));
        assert!(is_valid_cnpj("11222333000181"));
        assert!(!is_valid_cnpj("00.000.000/0000-00"));
    }

    #[test]
    fn test_detect_reexports() {
        assert!(detect_format_from_bytes(b"GIF89a").is_ok());
        assert!(detect_format_from_bytes(b"").is_err());
    }
}
