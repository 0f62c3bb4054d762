//! Decode, cover-crop, resample and re-encode.

use image::codecs::jpeg::JpegEncoder;
use image::{ColorType, DynamicImage, GenericImageView, RgbImage};
use rayon::prelude::*;
use std::path::Path;

use super::asset::{BannerAsset, ImageAsset};
use super::geometry::cover_placement;
use super::options::BannerOptions;
use crate::error::{Error, Result};

/// Normalize an image into a banner of exactly `options.width x options.height`.
///
/// The source is turned upright per its EXIF orientation, scaled uniformly to
/// cover the banner completely, centered, and the overflow is cropped. The
/// result is a JPEG carrying the source's filename.
///
/// # Errors
///
/// * [`Error::Surface`] if the target canvas cannot be created
/// * [`Error::InvalidOptions`] if the quality is outside `0..=1`
/// * [`Error::UnknownFormat`] / [`Error::Decode`] if the source is not a
///   decodable image
/// * [`Error::Encode`] if JPEG encoding fails
///
/// # Example
///
/// ```no_run
/// use ongkit::banner::{normalize_banner, BannerOptions, ImageAsset};
///
/// let source = ImageAsset::from_path("cover.png")?;
/// let banner = normalize_banner(&source, &BannerOptions::default())?;
/// assert_eq!((banner.width, banner.height), (1200, 400));
/// # Ok::<(), ongkit::Error>(())
/// ```
pub fn normalize_banner(source: &ImageAsset, options: &BannerOptions) -> Result<BannerAsset> {
    options.validate()?;

    let (kind, decoded) = source.decode()?;
    let (width, height) = decoded.dimensions();

    let placement = cover_placement(width, height, options.width, options.height)
        .ok_or_else(|| Error::Decode(format!("{} image has no pixels", kind)))?;

    let visible = decoded.crop_imm(
        placement.crop_x,
        placement.crop_y,
        placement.crop_width,
        placement.crop_height,
    );
    let resampled = if visible.dimensions() == (placement.resample_width, placement.resample_height)
    {
        visible
    } else {
        visible.resize_exact(
            placement.resample_width,
            placement.resample_height,
            options.filter.into(),
        )
    };
    let canvas = if resampled.dimensions() == (options.width, options.height) {
        resampled
    } else {
        resampled.crop_imm(
            placement.trim_x,
            placement.trim_y,
            options.width,
            options.height,
        )
    };

    let data = encode_jpeg(&flatten(canvas), options.jpeg_quality())?;
    log::debug!(
        "normalized {} {}x{} ({} bytes) into {}x{} JPEG ({} bytes)",
        kind,
        width,
        height,
        source.size(),
        options.width,
        options.height,
        data.len()
    );

    Ok(BannerAsset::jpeg(
        data,
        options.width,
        options.height,
        source.filename.clone(),
    ))
}

/// Normalize encoded bytes without a filename.
pub fn normalize_banner_bytes(data: &[u8], options: &BannerOptions) -> Result<BannerAsset> {
    normalize_banner(&ImageAsset::new(data.to_vec()), options)
}

/// Normalize an image file; the output keeps the file's name.
pub fn normalize_banner_file<P: AsRef<Path>>(
    path: P,
    options: &BannerOptions,
) -> Result<BannerAsset> {
    let source = ImageAsset::from_path(path)?;
    normalize_banner(&source, options)
}

/// Normalize many images in parallel.
///
/// Each source is processed independently; the results come back in input
/// order and a failure only affects its own slot.
pub fn normalize_banners(
    sources: &[ImageAsset],
    options: &BannerOptions,
) -> Vec<Result<BannerAsset>> {
    sources
        .par_iter()
        .map(|source| {
            let result = normalize_banner(source, options);
            if let Err(ref e) = result {
                log::warn!(
                    "Failed to normalize {}: {}",
                    source.filename.as_deref().unwrap_or("<unnamed>"),
                    e
                );
            }
            result
        })
        .collect()
}

/// Drop alpha by compositing onto black, as a JPEG canvas export does.
fn flatten(image: DynamicImage) -> RgbImage {
    if !image.color().has_alpha() {
        return image.into_rgb8();
    }

    let rgba = image.into_rgba8();
    RgbImage::from_fn(rgba.width(), rgba.height(), |x, y| {
        let [r, g, b, a] = rgba.get_pixel(x, y).0;
        let blend = |c: u8| ((u16::from(c) * u16::from(a) + 127) / 255) as u8;
        image::Rgb([blend(r), blend(g), blend(b)])
    })
}

fn encode_jpeg(image: &RgbImage, quality: u8) -> Result<Vec<u8>> {
    let mut data = Vec::new();
    let mut encoder = JpegEncoder::new_with_quality(&mut data, quality);
    encoder
        .encode(
            image.as_raw(),
            image.width(),
            image.height(),
            ColorType::Rgb8.into(),
        )
        .map_err(|e| Error::Encode(e.to_string()))?;
    Ok(data)
}
