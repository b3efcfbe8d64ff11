use image::{DynamicImage, Rgba, RgbaImage};

use crate::foundation::core::{CANVAS_WIDTH, Panel, PanelKind};
use crate::foundation::error::PosterResult;
use crate::render::composite::{fit_width, paste};

/// Rescale a league banner to the canvas width, keeping its aspect ratio.
///
/// The panel is exactly the size of the rescaled banner; transparent areas show white.
pub fn render_banner(banner: &DynamicImage) -> PosterResult<Panel> {
    let scaled = fit_width(banner, CANVAS_WIDTH)?;
    let mut image = RgbaImage::from_pixel(scaled.width(), scaled.height(), Rgba([255, 255, 255, 255]));
    paste(&mut image, &scaled, 0, 0);
    tracing::debug!(
        from_w = banner.width(),
        from_h = banner.height(),
        height = image.height(),
        "scaled banner"
    );
    Ok(Panel::new(PanelKind::Banner, image))
}
