//! Image format detection from magic bytes.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Image codecs the banner pipeline can decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageKind {
    Jpeg,
    Png,
    Gif,
    WebP,
    Bmp,
}

impl ImageKind {
    /// MIME type of the codec.
    pub fn mime_type(&self) -> &'static str {
        match self {
            ImageKind::Jpeg => "image/jpeg",
            ImageKind::Png => "image/png",
            ImageKind::Gif => "image/gif",
            ImageKind::WebP => "image/webp",
            ImageKind::Bmp => "image/bmp",
        }
    }

    /// Conventional file extension, without the dot.
    pub fn extension(&self) -> &'static str {
        match self {
            ImageKind::Jpeg => "jpg",
            ImageKind::Png => "png",
            ImageKind::Gif => "gif",
            ImageKind::WebP => "webp",
            ImageKind::Bmp => "bmp",
        }
    }

    pub(crate) fn image_format(&self) -> image::ImageFormat {
        match self {
            ImageKind::Jpeg => image::ImageFormat::Jpeg,
            ImageKind::Png => image::ImageFormat::Png,
            ImageKind::Gif => image::ImageFormat::Gif,
            ImageKind::WebP => image::ImageFormat::WebP,
            ImageKind::Bmp => image::ImageFormat::Bmp,
        }
    }
}

impl std::fmt::Display for ImageKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ImageKind::Jpeg => "JPEG",
            ImageKind::Png => "PNG",
            ImageKind::Gif => "GIF",
            ImageKind::WebP => "WebP",
            ImageKind::Bmp => "BMP",
        };
        f.write_str(name)
    }
}

const JPEG_MAGIC: &[u8] = &[0xFF, 0xD8, 0xFF];
const PNG_MAGIC: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];
const GIF87_MAGIC: &[u8] = b"GIF87a";
const GIF89_MAGIC: &[u8] = b"GIF89a";
const RIFF_MAGIC: &[u8] = b"RIFF";
const WEBP_TAG: &[u8] = b"WEBP";
const BMP_MAGIC: &[u8] = b"BM";

/// Bytes needed to tell every supported format apart.
const HEADER_LEN: usize = 12;

/// Detect the image format of a file.
///
/// # Example
/// ```no_run
/// use ongkit::detect::detect_format_from_path;
///
/// let kind = detect_format_from_path("logo.png").unwrap();
/// println!("{} ({})", kind, kind.mime_type());
/// ```
pub fn detect_format_from_path<P: AsRef<Path>>(path: P) -> Result<ImageKind> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let mut header = Vec::with_capacity(HEADER_LEN);
    reader.take(HEADER_LEN as u64).read_to_end(&mut header)?;
    detect_format_from_bytes(&header)
}

/// Detect the image format from the leading bytes of a blob.
///
/// # Returns
/// * `Ok(ImageKind)` if the header matches a supported codec
/// * `Err(Error::UnknownFormat)` otherwise
pub fn detect_format_from_bytes(data: &[u8]) -> Result<ImageKind> {
    if data.starts_with(JPEG_MAGIC) {
        return Ok(ImageKind::Jpeg);
    }
    if data.starts_with(PNG_MAGIC) {
        return Ok(ImageKind::Png);
    }
    if data.starts_with(GIF87_MAGIC) || data.starts_with(GIF89_MAGIC) {
        return Ok(ImageKind::Gif);
    }
    // RIFF....WEBP
    if data.len() >= HEADER_LEN && data.starts_with(RIFF_MAGIC) && &data[8..12] == WEBP_TAG {
        return Ok(ImageKind::WebP);
    }
    // A bare "BM" is too weak on its own; require room for the file header.
    if data.len() >= 14 && data.starts_with(BMP_MAGIC) {
        return Ok(ImageKind::Bmp);
    }

    Err(Error::UnknownFormat)
}

/// Check if a file is a supported image.
pub fn is_image<P: AsRef<Path>>(path: P) -> bool {
    detect_format_from_path(path).is_ok()
}

/// Check if bytes start with a supported image header.
pub fn is_image_bytes(data: &[u8]) -> bool {
    detect_format_from_bytes(data).is_ok()
}
