use std::collections::HashMap;

use crate::assets::fonts::{ESTIMATED_ADVANCE_EM, ESTIMATED_LINE_EM, OutlineFace, Typeface};
use crate::foundation::error::{PosterError, PosterResult};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
/// RGBA8 brush color used by Parley text layout.
pub(crate) struct TextBrushRgba8 {
    pub(crate) r: u8,
    pub(crate) g: u8,
    pub(crate) b: u8,
    pub(crate) a: u8,
}

impl TextBrushRgba8 {
    pub(crate) const BLACK: Self = Self {
        r: 0,
        g: 0,
        b: 0,
        a: 255,
    };
}

/// Measured size of a single unwrapped line of text, in pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextExtent {
    /// Advance width.
    pub width: f32,
    /// Line box height (ascent + descent + leading).
    pub height: f32,
}

/// A line of text ready to be drawn.
///
/// `layout` is `None` for the estimated-metrics face: the extent is known but nothing is drawn.
pub(crate) struct ShapedText {
    pub(crate) layout: Option<parley::Layout<TextBrushRgba8>>,
    pub(crate) font: Option<vello_cpu::peniko::FontData>,
    pub(crate) extent: TextExtent,
}

/// Stateful helper that shapes and measures text with Parley.
///
/// Not thread-safe; parallel batches keep one engine per worker.
pub struct TextEngine {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<TextBrushRgba8>,
    families: HashMap<u64, String>,
}

impl Default for TextEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl TextEngine {
    /// Construct an engine with fresh Parley contexts.
    pub fn new() -> Self {
        Self {
            font_ctx: parley::FontContext::default(),
            layout_ctx: parley::LayoutContext::new(),
            families: HashMap::new(),
        }
    }

    fn family_for(&mut self, face: &OutlineFace) -> PosterResult<String> {
        if let Some(name) = self.families.get(&face.id) {
            return Ok(name.clone());
        }

        let families = self.font_ctx.collection.register_fonts(
            parley::fontique::Blob::from(face.bytes.as_ref().clone()),
            None,
        );
        let family_id = families
            .iter()
            .find(|(_, fonts)| fonts.iter().any(|f| f.index() == face.index))
            .or_else(|| families.first())
            .map(|(id, _)| *id)
            .ok_or_else(|| PosterError::layout("no font families registered from font bytes"))?;

        let name = self
            .font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| PosterError::layout("registered font family has no name"))?
            .to_string();
        self.families.insert(face.id, name.clone());
        Ok(name)
    }

    /// Shape one unwrapped line.
    pub(crate) fn shape(
        &mut self,
        face: &Typeface,
        text: &str,
        size_px: f32,
    ) -> PosterResult<ShapedText> {
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(PosterError::validation(
                "text size_px must be finite and > 0",
            ));
        }

        let Some(outline) = face.outline() else {
            return Ok(ShapedText {
                layout: None,
                font: None,
                extent: estimated_extent(text, size_px),
            });
        };

        let family_name = self.family_for(outline)?;
        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(family_name)),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));
        builder.push_default(parley::style::StyleProperty::Brush(TextBrushRgba8::BLACK));

        let mut layout: parley::Layout<TextBrushRgba8> = builder.build(text);
        layout.break_all_lines(None);

        let extent = TextExtent {
            width: layout.width(),
            height: layout.height(),
        };
        Ok(ShapedText {
            layout: Some(layout),
            font: Some(outline.font.clone()),
            extent,
        })
    }

    /// Measure one unwrapped line.
    pub fn measure(&mut self, face: &Typeface, text: &str, size_px: f32) -> PosterResult<TextExtent> {
        if face.is_estimated() {
            return Ok(estimated_extent(text, size_px));
        }
        Ok(self.shape(face, text, size_px)?.extent)
    }

    /// Greedy word wrap against `max_width`.
    ///
    /// Words are separated by single spaces, so runs of spaces survive as empty words and are
    /// measured as written. A word wider than `max_width` on its own stays on its own line.
    pub fn wrap(
        &mut self,
        face: &Typeface,
        text: &str,
        size_px: f32,
        max_width: f32,
    ) -> PosterResult<Vec<String>> {
        let mut lines = Vec::new();
        let mut current: Vec<&str> = Vec::new();
        for word in text.split(' ') {
            current.push(word);
            if current.len() == 1 {
                continue;
            }
            let candidate = current.join(" ");
            if self.measure(face, &candidate, size_px)?.width > max_width {
                current.pop();
                lines.push(current.join(" "));
                current.clear();
                current.push(word);
            }
        }
        lines.push(current.join(" "));
        Ok(lines)
    }
}

fn estimated_extent(text: &str, size_px: f32) -> TextExtent {
    TextExtent {
        width: text.chars().count() as f32 * size_px * ESTIMATED_ADVANCE_EM,
        height: size_px * ESTIMATED_LINE_EM,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/text/engine.rs"]
mod tests;
