use anyhow::Context;
use image::DynamicImage;

use crate::foundation::error::PosterResult;

/// Decode an in-memory raster (PNG, JPEG, ...) into a [`DynamicImage`].
pub fn decode_image(bytes: &[u8]) -> PosterResult<DynamicImage> {
    let img = image::load_from_memory(bytes).context("decode image from memory")?;
    Ok(img)
}

/// Return `true` when the image carries its own alpha channel (RGBA / LA).
///
/// Such images are composited through their alpha; everything else is pasted opaque.
pub fn has_alpha(img: &DynamicImage) -> bool {
    img.color().has_alpha()
}

/// Convert premultiplied RGBA8 back to straight alpha.
pub(crate) fn unpremultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3] as u16;
        if a == 0 {
            px[0] = 0;
            px[1] = 0;
            px[2] = 0;
            continue;
        }
        if a == 255 {
            continue;
        }
        px[0] = ((px[0] as u16 * 255 + a / 2) / a).min(255) as u8;
        px[1] = ((px[1] as u16 * 255 + a / 2) / a).min(255) as u8;
        px[2] = ((px[2] as u16 * 255 + a / 2) / a).min(255) as u8;
    }
}
