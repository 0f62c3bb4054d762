//! Banner normalization options.

use crate::error::{Error, Result};
use image::imageops::FilterType;

/// Default banner width in pixels.
pub const DEFAULT_WIDTH: u32 = 1200;

/// Default banner height in pixels.
pub const DEFAULT_HEIGHT: u32 = 400;

/// Default JPEG quality, in `0.0..=1.0`.
pub const DEFAULT_QUALITY: f32 = 0.85;

/// Largest canvas side we agree to allocate.
pub const MAX_CANVAS_DIMENSION: u32 = 16_384;

/// Options for normalizing a banner image.
#[derive(Debug, Clone, PartialEq)]
pub struct BannerOptions {
    /// Output width in pixels
    pub width: u32,

    /// Output height in pixels
    pub height: u32,

    /// Encoder quality in `0.0..=1.0`
    pub quality: f32,

    /// Resampling filter used when scaling
    pub filter: ResampleFilter,
}

impl BannerOptions {
    /// Create new banner options with defaults (1200x400, quality 0.85).
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the output size.
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Set the encoder quality.
    pub fn with_quality(mut self, quality: f32) -> Self {
        self.quality = quality;
        self
    }

    /// Set the resampling filter.
    pub fn with_filter(mut self, filter: ResampleFilter) -> Self {
        self.filter = filter;
        self
    }

    /// Check that the options describe a drawable canvas and a usable quality.
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(Error::Surface(format!(
                "target canvas is {}x{}",
                self.width, self.height
            )));
        }
        if self.width > MAX_CANVAS_DIMENSION || self.height > MAX_CANVAS_DIMENSION {
            return Err(Error::Surface(format!(
                "target canvas {}x{} exceeds {} pixels per side",
                self.width, self.height, MAX_CANVAS_DIMENSION
            )));
        }
        if !(0.0..=1.0).contains(&self.quality) {
            return Err(Error::InvalidOptions(format!(
                "quality must be within 0..=1, got {}",
                self.quality
            )));
        }
        Ok(())
    }

    /// Quality mapped onto the JPEG encoder's 1..=100 scale.
    pub fn jpeg_quality(&self) -> u8 {
        (self.quality.clamp(0.0, 1.0) * 100.0).round().max(1.0) as u8
    }
}

impl Default for BannerOptions {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            quality: DEFAULT_QUALITY,
            filter: ResampleFilter::default(),
        }
    }
}

/// Resampling filter for scaling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResampleFilter {
    /// Nearest neighbour, fastest
    Nearest,
    /// Bilinear
    #[default]
    Triangle,
    /// Bicubic
    CatmullRom,
    /// Lanczos with window 3, sharpest
    Lanczos3,
}

impl From<ResampleFilter> for FilterType {
    fn from(filter: ResampleFilter) -> Self {
        match filter {
            ResampleFilter::Nearest => FilterType::Nearest,
            ResampleFilter::Triangle => FilterType::Triangle,
            ResampleFilter::CatmullRom => FilterType::CatmullRom,
            ResampleFilter::Lanczos3 => FilterType::Lanczos3,
        }
    }
}
