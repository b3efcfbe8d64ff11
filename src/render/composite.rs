use image::imageops::{self, FilterType};
use image::{DynamicImage, RgbaImage};

use crate::assets::decode::has_alpha;
use crate::foundation::error::{PosterError, PosterResult};

/// Resampling filter for every resize in the pipeline.
pub(crate) const RESAMPLE: FilterType = FilterType::Lanczos3;

/// Scale `img` to the largest size that fits inside `box_w` x `box_h`, preserving aspect ratio.
///
/// The limiting axis lands exactly on the box; the other is rounded to the nearest pixel.
/// Small images are scaled up.
pub(crate) fn contain(img: &DynamicImage, box_w: u32, box_h: u32) -> PosterResult<DynamicImage> {
    let (w, h) = (img.width(), img.height());
    if w == 0 || h == 0 {
        return Err(PosterError::validation("cannot scale an empty image"));
    }

    let img_ratio = f64::from(w) / f64::from(h);
    let box_ratio = f64::from(box_w) / f64::from(box_h);
    let (nw, nh) = if img_ratio > box_ratio {
        let nh = (f64::from(h) / f64::from(w) * f64::from(box_w)).round() as u32;
        (box_w, nh.max(1))
    } else {
        let nw = (f64::from(w) / f64::from(h) * f64::from(box_h)).round() as u32;
        (nw.max(1), box_h)
    };

    if (nw, nh) == (w, h) {
        return Ok(img.clone());
    }
    Ok(img.resize_exact(nw, nh, RESAMPLE))
}

/// Scale to an exact width, height following the aspect ratio (rounded, at least 1 px).
pub(crate) fn fit_width(img: &DynamicImage, width: u32) -> PosterResult<DynamicImage> {
    let (w, h) = (img.width(), img.height());
    if w == 0 || h == 0 {
        return Err(PosterError::validation("cannot scale an empty image"));
    }
    let height = (f64::from(h) * f64::from(width) / f64::from(w)).round() as u32;
    Ok(img.resize_exact(width, height.max(1), RESAMPLE))
}

/// Paste `src` onto `dst` with its top-left corner at `(x, y)`.
///
/// Images with an alpha channel are composited through it; opaque images overwrite.
pub(crate) fn paste(dst: &mut RgbaImage, src: &DynamicImage, x: i64, y: i64) {
    let top = src.to_rgba8();
    if has_alpha(src) {
        imageops::overlay(dst, &top, x, y);
    } else {
        imageops::replace(dst, &top, x, y);
    }
}
