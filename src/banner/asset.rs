//! Source and output image blobs.

use chrono::{DateTime, Utc};
use image::metadata::Orientation;
use image::{DynamicImage, ImageDecoder, ImageReader};
use serde::{Deserialize, Serialize};
use std::io::Cursor;
use std::path::Path;

use crate::detect::{detect_format_from_bytes, ImageKind};
use crate::error::{Error, Result};

/// A user-supplied image, as picked from disk or received in an upload.
#[derive(Debug, Clone, Default)]
pub struct ImageAsset {
    /// Encoded image bytes
    pub data: Vec<u8>,

    /// Logical filename, carried over to the output
    pub filename: Option<String>,
}

impl ImageAsset {
    /// Wrap encoded bytes.
    pub fn new(data: Vec<u8>) -> Self {
        Self {
            data,
            filename: None,
        }
    }

    /// Set the logical filename.
    pub fn with_filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = Some(filename.into());
        self
    }

    /// Read an image from disk, keeping its file name.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let data = std::fs::read(path)?;
        let filename = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned());
        Ok(Self { data, filename })
    }

    /// Size of the encoded data in bytes.
    pub fn size(&self) -> usize {
        self.data.len()
    }

    /// Read the codec and displayed dimensions without decoding the pixels.
    ///
    /// Dimensions follow the EXIF orientation, so a portrait phone photo
    /// stored as landscape pixels reports as portrait.
    pub fn probe(&self) -> Result<ImageInfo> {
        let kind = detect_format_from_bytes(&self.data)?;
        let mut decoder =
            ImageReader::with_format(Cursor::new(&self.data), kind.image_format()).into_decoder()?;
        let (width, height) = decoder.dimensions();
        let (width, height) = if swaps_axes(decoder.orientation()?) {
            (height, width)
        } else {
            (width, height)
        };
        Ok(ImageInfo {
            kind,
            width,
            height,
        })
    }

    /// Decode the pixels upright, with the EXIF orientation applied.
    pub fn decode(&self) -> Result<(ImageKind, DynamicImage)> {
        let kind = detect_format_from_bytes(&self.data)?;
        let decode_err = |e: image::ImageError| Error::Decode(e.to_string());

        let mut decoder = ImageReader::with_format(Cursor::new(&self.data), kind.image_format())
            .into_decoder()
            .map_err(decode_err)?;
        let orientation = decoder.orientation().map_err(decode_err)?;
        let mut image = DynamicImage::from_decoder(decoder).map_err(decode_err)?;

        if !matches!(orientation, Orientation::NoTransforms) {
            log::debug!("applying {:?} to {} source", orientation, kind);
            image.apply_orientation(orientation);
        }
        Ok((kind, image))
    }
}

/// True when the orientation turns the image on its side.
fn swaps_axes(orientation: Orientation) -> bool {
    matches!(
        orientation,
        Orientation::Rotate90
            | Orientation::Rotate270
            | Orientation::Rotate90FlipH
            | Orientation::Rotate270FlipH
    )
}

/// Codec and dimensions of an encoded image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageInfo {
    /// Detected codec
    pub kind: ImageKind,
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

/// A normalized banner, ready for upload or preview.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BannerAsset {
    /// Encoded JPEG bytes
    #[serde(skip)]
    pub data: Vec<u8>,

    /// MIME type of `data`
    pub mime_type: String,

    /// Width in pixels
    pub width: u32,

    /// Height in pixels
    pub height: u32,

    /// Logical filename of the source
    pub filename: Option<String>,

    /// When this banner was produced
    pub created_at: DateTime<Utc>,
}

impl BannerAsset {
    pub(crate) fn jpeg(data: Vec<u8>, width: u32, height: u32, filename: Option<String>) -> Self {
        Self {
            data,
            mime_type: ImageKind::Jpeg.mime_type().to_string(),
            width,
            height,
            filename,
            created_at: Utc::now(),
        }
    }

    /// Size of the encoded data in bytes.
    pub fn size(&self) -> usize {
        self.data.len()
    }

    /// File name for saving: the source stem with a `.jpg` extension.
    pub fn suggested_filename(&self) -> String {
        let stem = self
            .filename
            .as_deref()
            .map(Path::new)
            .and_then(|p| p.file_stem())
            .map(|s| s.to_string_lossy().into_owned())
            .filter(|s| !s.is_empty());

        match stem {
            Some(stem) => format!("{}.{}", stem, ImageKind::Jpeg.extension()),
            None => format!("banner.{}", ImageKind::Jpeg.extension()),
        }
    }

    /// Write the encoded bytes to a file.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        std::fs::write(path, &self.data)?;
        Ok(())
    }
}
