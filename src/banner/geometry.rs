//! Cover-fit geometry.
//!
//! The banner is the source scaled by `max(tw / w, th / h)` and centered over
//! the target canvas. Only the part of the source that lands on the canvas is
//! resampled, so the crop is computed in source pixels. The crop is widened
//! to whole pixels around the fractional visible window and resampled with
//! the same scale on both axes; the few extra canvas pixels are trimmed.

use serde::{Deserialize, Serialize};

/// Placement of a scaled source over the target canvas.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CoverPlacement {
    /// Uniform scale applied to the source
    pub scale: f64,

    /// Horizontal draw offset on the canvas (<= 0)
    pub offset_x: f64,

    /// Vertical draw offset on the canvas (<= 0)
    pub offset_y: f64,

    /// Source width after scaling
    pub scaled_width: f64,

    /// Source height after scaling
    pub scaled_height: f64,

    /// Left edge of the visible region, in source pixels
    pub crop_x: u32,

    /// Top edge of the visible region, in source pixels
    pub crop_y: u32,

    /// Width of the visible region, in source pixels
    pub crop_width: u32,

    /// Height of the visible region, in source pixels
    pub crop_height: u32,

    /// Width the visible region is resampled to before trimming
    pub resample_width: u32,

    /// Height the visible region is resampled to before trimming
    pub resample_height: u32,

    /// Columns dropped from the left of the resampled region
    pub trim_x: u32,

    /// Rows dropped from the top of the resampled region
    pub trim_y: u32,
}

impl CoverPlacement {
    /// True when the source already has the target aspect ratio.
    pub fn is_lossless(&self) -> bool {
        self.offset_x == 0.0 && self.offset_y == 0.0
    }
}

/// Compute the cover placement of a `src_w x src_h` image on a
/// `target_w x target_h` canvas.
///
/// Returns `None` if any dimension is zero.
///
/// # Example
///
/// ```
/// use ongkit::banner::cover_placement;
///
/// // Square source on a 3:1 banner: top and bottom are cropped.
/// let p = cover_placement(600, 600, 1200, 400).unwrap();
/// assert_eq!(p.scale, 2.0);
/// assert_eq!(p.offset_x, 0.0);
/// assert_eq!(p.offset_y, -400.0);
/// assert_eq!((p.crop_y, p.crop_height), (200, 200));
/// ```
pub fn cover_placement(
    src_w: u32,
    src_h: u32,
    target_w: u32,
    target_h: u32,
) -> Option<CoverPlacement> {
    if src_w == 0 || src_h == 0 || target_w == 0 || target_h == 0 {
        return None;
    }

    let (w, h) = (u64::from(src_w), u64::from(src_h));
    let (tw, th) = (u64::from(target_w), u64::from(target_h));

    // Width drives the scale when the source is no wider than the target
    // (tw/w >= th/h), compared exactly in integers.
    let width_driven = tw * h >= th * w;

    let placement = if width_driven {
        let scale = tw as f64 / w as f64;
        let scaled_height = h as f64 * scale;
        let band = visible_band(h, w, th, tw);
        CoverPlacement {
            scale,
            offset_x: 0.0,
            offset_y: (th as f64 - scaled_height) / 2.0,
            scaled_width: tw as f64,
            scaled_height,
            crop_x: 0,
            crop_y: band.start,
            crop_width: src_w,
            crop_height: band.len,
            resample_width: target_w,
            resample_height: band.resampled,
            trim_x: 0,
            trim_y: band.trim,
        }
    } else {
        let scale = th as f64 / h as f64;
        let scaled_width = w as f64 * scale;
        let band = visible_band(w, h, tw, th);
        CoverPlacement {
            scale,
            offset_x: (tw as f64 - scaled_width) / 2.0,
            offset_y: 0.0,
            scaled_width,
            scaled_height: th as f64,
            crop_x: band.start,
            crop_y: 0,
            crop_width: band.len,
            crop_height: src_h,
            resample_width: band.resampled,
            resample_height: target_h,
            trim_x: band.trim,
            trim_y: 0,
        }
    };

    log::debug!(
        "cover {}x{} -> {}x{}: scale {:.4}, offset ({:.1}, {:.1}), crop {}x{}+{}+{}, resample {}x{} trim +{}+{}",
        src_w,
        src_h,
        target_w,
        target_h,
        placement.scale,
        placement.offset_x,
        placement.offset_y,
        placement.crop_width,
        placement.crop_height,
        placement.crop_x,
        placement.crop_y,
        placement.resample_width,
        placement.resample_height,
        placement.trim_x,
        placement.trim_y
    );

    Some(placement)
}

/// Whole source pixels covering the visible window on the overflowing axis.
struct Band {
    start: u32,
    len: u32,
    resampled: u32,
    trim: u32,
}

/// Visible band along the overflowing axis of length `len`, where `other`
/// is the source length on the driving axis and `target`/`target_other` the
/// canvas lengths on the same axes.
///
/// The visible window is `target * other / target_other` source pixels wide
/// and starts at `(len * target_other - target * other) / (2 * target_other)`.
/// Both may be fractional; the band is the pixel-aligned hull of the window,
/// resampled at the driving axis' scale and then trimmed back to `target`.
fn visible_band(len: u64, other: u64, target: u64, target_other: u64) -> Band {
    let overflow = len * target_other - target * other;
    let denom = 2 * target_other;

    let start = overflow / denom;
    let end = ((len * target_other + target * other + denom - 1) / denom).min(len);
    let band = end - start;

    // ceil(band * scale), with scale = target_other / other
    let resampled = ((band * target_other + other - 1) / other).max(target);
    // round((window_start - start) * scale)
    let trim = ((overflow - denom * start + other) / (2 * other)).min(resampled - target);

    Band {
        start: start as u32,
        len: band as u32,
        resampled: resampled as u32,
        trim: trim as u32,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matching_aspect_has_no_offset() {
        let p = cover_placement(2400, 800, 1200, 400).unwrap();
        assert_eq!(p.scale, 0.5);
        assert!(p.is_lossless());
        assert_eq!((p.crop_x, p.crop_y), (0, 0));
        assert_eq!((p.crop_width, p.crop_height), (2400, 800));
    }

    #[test]
    fn test_exact_size_is_identity() {
        let p = cover_placement(1200, 400, 1200, 400).unwrap();
        assert_eq!(p.scale, 1.0);
        assert!(p.is_lossless());
    }

    #[test]
    fn test_portrait_crops_vertically() {
        // 9:16
        let p = cover_placement(900, 1600, 1200, 400).unwrap();
        assert_eq!(p.offset_x, 0.0);
        assert!(p.offset_y < 0.0);
        assert_eq!(p.crop_width, 900);
        assert_eq!(p.crop_height, 300);
        assert_eq!(p.crop_y, 650);
    }

    #[test]
    fn test_landscape_16_9_crops_vertically() {
        // 16:9 is still narrower than 3:1.
        let p = cover_placement(1920, 1080, 1200, 400).unwrap();
        assert_eq!(p.offset_x, 0.0);
        assert_eq!(p.scale, 0.625);
        assert_eq!(p.offset_y, (400.0 - 675.0) / 2.0);
        assert_eq!(p.crop_height, 640);
    }

    #[test]
    fn test_panorama_crops_horizontally() {
        // 6:1 is wider than 3:1.
        let p = cover_placement(3000, 500, 1200, 400).unwrap();
        assert_eq!(p.offset_y, 0.0);
        assert!(p.offset_x < 0.0);
        assert_eq!(p.scale, 0.8);
        assert_eq!(p.crop_width, 1500);
        assert_eq!(p.crop_x, 750);
        assert_eq!(p.crop_height, 500);
    }

    #[test]
    fn test_offsets_are_symmetric() {
        let p = cover_placement(500, 500, 1200, 400).unwrap();
        let overflow = p.scaled_height - 400.0;
        assert_eq!(p.offset_y, -overflow / 2.0);
    }

    #[test]
    fn test_tiny_source_keeps_one_pixel() {
        let p = cover_placement(1, 1000, 1200, 400).unwrap();
        assert_eq!(p.crop_width, 1);
        assert!(p.crop_height >= 1);
    }

    #[test]
    fn test_large_sources_need_no_trim() {
        for (w, h) in [(600, 600), (900, 1600), (1920, 1080), (3000, 500)] {
            let p = cover_placement(w, h, 1200, 400).unwrap();
            assert_eq!((p.resample_width, p.resample_height), (1200, 400));
            assert_eq!((p.trim_x, p.trim_y), (0, 0));
        }
    }

    fn effective_scales(p: &CoverPlacement) -> (f64, f64) {
        (
            f64::from(p.resample_width) / f64::from(p.crop_width),
            f64::from(p.resample_height) / f64::from(p.crop_height),
        )
    }

    #[test]
    fn test_small_square_source_scales_uniformly() {
        let p = cover_placement(5, 5, 1200, 400).unwrap();
        assert_eq!((p.crop_y, p.crop_height), (1, 3));
        assert_eq!((p.resample_width, p.resample_height), (1200, 720));
        // Visible window starts at row 5/3, i.e. 160 canvas rows into row 1.
        assert_eq!(p.trim_y, 160);

        let (sx, sy) = effective_scales(&p);
        assert_eq!(sx, 240.0);
        assert_eq!(sy, 240.0);
    }

    #[test]
    fn test_small_sources_stay_within_one_canvas_pixel() {
        let sources = [(7, 3), (2, 2), (3, 7), (1, 1000), (1000, 1), (13, 5), (33, 10)];
        for (w, h) in sources {
            let p = cover_placement(w, h, 1200, 400).unwrap();
            let (sx, sy) = effective_scales(&p);
            assert!(
                (sx - sy).abs() / p.scale <= 1.0 / 400.0,
                "{}x{}: x scale {} vs y scale {}",
                w,
                h,
                sx,
                sy
            );
            assert!(p.trim_x + 1200 <= p.resample_width);
            assert!(p.trim_y + 400 <= p.resample_height);
            assert!(p.crop_x + p.crop_width <= w);
            assert!(p.crop_y + p.crop_height <= h);
        }
    }

    #[test]
    fn test_trim_matches_fractional_offset() {
        // 2x2 on 1200x400: scale 600, window starts at row 2/3.
        let p = cover_placement(2, 2, 1200, 400).unwrap();
        assert_eq!((p.crop_y, p.crop_height), (0, 2));
        assert_eq!(p.resample_height, 1200);
        assert_eq!(p.trim_y, 400);
        assert_eq!(f64::from(p.trim_y), -p.offset_y - p.scale * f64::from(p.crop_y));
    }

    #[test]
    fn test_zero_dimensions() {
        assert!(cover_placement(0, 10, 1200, 400).is_none());
        assert!(cover_placement(10, 10, 1200, 0).is_none());
    }
}
