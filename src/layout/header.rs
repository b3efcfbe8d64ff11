use image::DynamicImage;

use crate::assets::fonts::Typeface;
use crate::foundation::core::{CANVAS_WIDTH, PANEL_MIN_HEIGHT, Panel, PanelKind};
use crate::foundation::error::PosterResult;
use crate::render::canvas::Canvas;
use crate::render::composite::{contain, paste};
use crate::text::engine::{TextEngine, TextExtent};
use crate::text::fit::FontFit;

/// Header canvas height.
pub const HEADER_HEIGHT: u32 = PANEL_MIN_HEIGHT;

const TITLE_FIT: FontFit = FontFit {
    max: 100.0,
    min: 20.0,
    step: 5.0,
};
const TITLE_MARGIN: u32 = 40;
const TITLE_TOP: u32 = 10;
const UNDERLINE_GAP: u32 = 5;
const UNDERLINE_THICKNESS: u32 = 5;

const SUB_FONT_PX: f32 = 40.0;
const SUB_LINES_TOP: u32 = 150;
const SUB_LINE_SPACING: u32 = 50;

const VENUE_FIT: FontFit = FontFit {
    max: 40.0,
    min: 20.0,
    step: 2.0,
};
/// Horizontal space kept clear for each corner logo.
const LOGO_SAFE_MARGIN: u32 = 260;

const LOGO_BOX: u32 = 200;
const LOGO_INSET: u32 = 10;

/// Everything drawn on the header panel. All but the title are optional.
#[derive(Clone, Copy, Debug, Default)]
pub struct HeaderContent<'a> {
    /// Event name, drawn large and underlined.
    pub title: &'a str,
    /// Venue name; prefixed with `Venue: `.
    pub venue: Option<&'a str>,
    /// Display date; prefixed with `Date: `.
    pub date: Option<&'a str>,
    /// UK kick-off time; prefixed with `UK Time: `.
    pub uk_time: Option<&'a str>,
    /// UTC kick-off time; prefixed with `UTC Time: `.
    pub utc_time: Option<&'a str>,
    /// Home team logo, bottom-right corner.
    pub home_logo: Option<&'a DynamicImage>,
    /// Away team logo, bottom-left corner.
    pub away_logo: Option<&'a DynamicImage>,
}

/// A measured line of header text and where its top-left corner goes.
#[derive(Clone, Debug, PartialEq)]
pub struct PlacedText {
    /// Text as drawn.
    pub text: String,
    /// Font size in pixels.
    pub size_px: f32,
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Measured size.
    pub extent: TextExtent,
}

/// Header geometry, computed before anything is drawn.
#[derive(Clone, Debug, PartialEq)]
pub struct HeaderPlan {
    /// Title line.
    pub title: PlacedText,
    /// Underline rectangle `(x0, y0, x1, y1)`, spanning the title width.
    pub underline: (f64, f64, f64, f64),
    /// Venue, date, and time lines that are present, top to bottom.
    pub sub_lines: Vec<PlacedText>,
    /// Top-left corner of the away logo box.
    pub away_logo_at: (i64, i64),
    /// Top-left corner of the home logo box.
    pub home_logo_at: (i64, i64),
}

fn centered(
    engine: &mut TextEngine,
    face: &Typeface,
    text: String,
    size_px: f32,
    y: u32,
) -> PosterResult<PlacedText> {
    let extent = engine.measure(face, &text, size_px)?;
    let x = ((CANVAS_WIDTH as f32 - extent.width) / 2.0).floor();
    Ok(PlacedText {
        text,
        size_px,
        x: f64::from(x),
        y: f64::from(y),
        extent,
    })
}

/// Measure and position every header element.
pub fn plan_header(
    engine: &mut TextEngine,
    face: &Typeface,
    content: &HeaderContent<'_>,
) -> PosterResult<HeaderPlan> {
    let title_limit = (CANVAS_WIDTH - TITLE_MARGIN) as f32;
    let title_size = TITLE_FIT.fit(title_limit, |size| {
        Ok(engine.measure(face, content.title, size)?.width)
    })?;
    let title = centered(engine, face, content.title.to_string(), title_size, TITLE_TOP)?;

    let underline_y = title.y + f64::from(title.extent.height) + f64::from(UNDERLINE_GAP);
    let half = f64::from(UNDERLINE_THICKNESS / 2);
    let underline = (
        title.x,
        underline_y - half,
        title.x + f64::from(title.extent.width),
        underline_y - half + f64::from(UNDERLINE_THICKNESS),
    );

    let mut sub_lines = Vec::new();
    let mut y = SUB_LINES_TOP;

    if let Some(venue) = content.venue {
        let text = format!("Venue: {venue}");
        let safe_width = (CANVAS_WIDTH - 2 * LOGO_SAFE_MARGIN) as f32;
        let size = VENUE_FIT.fit(safe_width, |size| Ok(engine.measure(face, &text, size)?.width))?;
        sub_lines.push(centered(engine, face, text, size, y)?);
        y += SUB_LINE_SPACING;
    }

    let labelled = [
        ("Date", content.date),
        ("UK Time", content.uk_time),
        ("UTC Time", content.utc_time),
    ];
    for (label, value) in labelled {
        let Some(value) = value else {
            continue;
        };
        sub_lines.push(centered(engine, face, format!("{label}: {value}"), SUB_FONT_PX, y)?);
        y += SUB_LINE_SPACING;
    }

    let logo_y = i64::from(HEADER_HEIGHT - LOGO_BOX - LOGO_INSET);
    Ok(HeaderPlan {
        title,
        underline,
        sub_lines,
        away_logo_at: (i64::from(LOGO_INSET), logo_y),
        home_logo_at: (i64::from(CANVAS_WIDTH - LOGO_BOX - LOGO_INSET), logo_y),
    })
}

/// Render the header panel.
#[tracing::instrument(skip_all, fields(title = content.title))]
pub fn render_header(
    engine: &mut TextEngine,
    face: &Typeface,
    content: &HeaderContent<'_>,
) -> PosterResult<Panel> {
    let plan = plan_header(engine, face, content)?;
    let mut canvas = Canvas::new(CANVAS_WIDTH, HEADER_HEIGHT)?;

    for line in std::iter::once(&plan.title).chain(&plan.sub_lines) {
        let shaped = engine.shape(face, &line.text, line.size_px)?;
        canvas.draw_text(&shaped, line.x, line.y);
    }
    let (x0, y0, x1, y1) = plan.underline;
    canvas.fill_rect(x0, y0, x1, y1);

    let mut image = canvas.finish()?;
    let logos = [
        (content.away_logo, plan.away_logo_at),
        (content.home_logo, plan.home_logo_at),
    ];
    for (logo, (x, y)) in logos {
        let Some(logo) = logo else {
            continue;
        };
        let scaled = contain(logo, LOGO_BOX, LOGO_BOX)?;
        paste(&mut image, &scaled, x, y);
    }

    Ok(Panel::new(PanelKind::Header, image))
}

#[cfg(test)]
#[path = "../../tests/unit/layout/header.rs"]
mod tests;
