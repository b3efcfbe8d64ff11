use image::RgbaImage;

use crate::assets::decode::unpremultiply_rgba8_in_place;
use crate::foundation::error::{PosterError, PosterResult};
use crate::text::engine::ShapedText;

/// Opaque white drawing surface for text and rules, backed by `vello_cpu`.
pub(crate) struct Canvas {
    width: u16,
    height: u16,
    ctx: vello_cpu::RenderContext,
}

impl Canvas {
    pub(crate) fn new(width: u32, height: u32) -> PosterResult<Self> {
        let w: u16 = width
            .try_into()
            .map_err(|_| PosterError::render(format!("canvas width {width} exceeds u16")))?;
        let h: u16 = height
            .try_into()
            .map_err(|_| PosterError::render(format!("canvas height {height} exceeds u16")))?;
        if w == 0 || h == 0 {
            return Err(PosterError::render("canvas must be non-empty"));
        }

        let mut ctx = vello_cpu::RenderContext::new(w, h);
        ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(255, 255, 255, 255));
        ctx.fill_rect(&vello_cpu::kurbo::Rect::new(0.0, 0.0, f64::from(w), f64::from(h)));
        Ok(Self {
            width: w,
            height: h,
            ctx,
        })
    }

    pub(crate) fn width(&self) -> u32 {
        u32::from(self.width)
    }

    /// Draw a shaped line with its layout box's top-left corner at `(x, y)`.
    ///
    /// Estimated-metrics text has no glyphs and draws nothing.
    pub(crate) fn draw_text(&mut self, text: &ShapedText, x: f64, y: f64) {
        let (Some(layout), Some(font)) = (&text.layout, &text.font) else {
            return;
        };

        self.ctx
            .set_transform(vello_cpu::kurbo::Affine::translate((x, y)));
        for line in layout.lines() {
            for item in line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };
                let brush = run.style().brush;
                self.ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                    brush.r, brush.g, brush.b, brush.a,
                ));
                let glyphs = run.positioned_glyphs().map(|g| vello_cpu::Glyph {
                    id: g.id,
                    x: g.x,
                    y: g.y,
                });
                self.ctx
                    .glyph_run(font)
                    .font_size(run.run().font_size())
                    .fill_glyphs(glyphs);
            }
        }
        self.ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
    }

    /// Fill an axis-aligned black rectangle.
    pub(crate) fn fill_rect(&mut self, x0: f64, y0: f64, x1: f64, y1: f64) {
        self.ctx
            .set_paint(vello_cpu::peniko::Color::from_rgba8(0, 0, 0, 255));
        self.ctx
            .fill_rect(&vello_cpu::kurbo::Rect::new(x0, y0, x1, y1));
    }

    /// Rasterise everything drawn so far into a straight-alpha image.
    pub(crate) fn finish(mut self) -> PosterResult<RgbaImage> {
        self.ctx.flush();
        let mut pixmap = vello_cpu::Pixmap::new(self.width, self.height);
        self.ctx.render_to_pixmap(&mut pixmap);

        let mut bytes = pixmap.data_as_u8_slice().to_vec();
        unpremultiply_rgba8_in_place(&mut bytes);
        RgbaImage::from_raw(u32::from(self.width), u32::from(self.height), bytes)
            .ok_or_else(|| PosterError::render("pixmap byte len mismatch"))
    }
}
