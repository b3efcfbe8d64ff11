use std::cmp::Ordering;

use crate::assets::fonts::Typeface;
use crate::foundation::core::{CANVAS_WIDTH, PANEL_MIN_HEIGHT, Panel, PanelKind};
use crate::foundation::error::PosterResult;
use crate::render::canvas::Canvas;
use crate::text::engine::TextEngine;

/// Most entries a single source page may hold.
pub const SOURCES_PER_PAGE: usize = 10;
/// Entry shown when an event lists no broadcast sources.
pub const NO_SOURCES_SENTINEL: &str = "No sources found for this event";

const SOURCE_FONT_PX: f32 = 40.0;
const LINE_HEIGHT: u32 = 50;
const VERTICAL_PADDING: u32 = 40;
const HORIZONTAL_MARGIN: u32 = 40;

const REGION_SEPARATOR: char = ':';
const PRIORITY_REGIONS: [&str; 2] = ["United Kingdom", "United States"];

/// One broadcast source: a region and, when the raw text had a `:`, a channel.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SourceEntry {
    region: String,
    channel: Option<String>,
}

impl SourceEntry {
    /// Split on the first `:` and trim both halves. No separator means no channel.
    pub fn parse(raw: &str) -> Self {
        match raw.split_once(REGION_SEPARATOR) {
            Some((region, channel)) => Self {
                region: region.trim().to_string(),
                channel: Some(channel.trim().to_string()),
            },
            None => Self {
                region: raw.trim().to_string(),
                channel: None,
            },
        }
    }

    /// Region half (the whole entry when there is no channel).
    pub fn region(&self) -> &str {
        &self.region
    }

    /// Channel half, if the entry had a separator.
    pub fn channel(&self) -> Option<&str> {
        self.channel.as_deref()
    }

    /// Compact `Region:Channel` form; the alphabetical sort key.
    pub fn canonical(&self) -> String {
        match &self.channel {
            Some(channel) => format!("{}{REGION_SEPARATOR}{channel}", self.region),
            None => self.region.clone(),
        }
    }

    /// Text as drawn: two spaces after the separator. Parsing the result yields the same entry.
    pub fn display(&self) -> String {
        match &self.channel {
            Some(channel) if !channel.is_empty() => {
                format!("{}{REGION_SEPARATOR}  {channel}", self.region)
            }
            Some(_) => format!("{}{REGION_SEPARATOR}", self.region),
            None => self.region.clone(),
        }
    }

    fn tier(&self) -> usize {
        PRIORITY_REGIONS
            .iter()
            .position(|r| *r == self.region)
            .unwrap_or(PRIORITY_REGIONS.len())
    }
}

impl Ord for SourceEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.tier()
            .cmp(&other.tier())
            .then_with(|| self.canonical().cmp(&other.canonical()))
    }
}

impl PartialOrd for SourceEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Reformat one raw source string for display. Idempotent.
pub fn format_source(raw: &str) -> String {
    SourceEntry::parse(raw).display()
}

/// Parse and order raw sources: `United Kingdom` first, `United States` second, everything else
/// alphabetically. An empty list becomes the single [`NO_SOURCES_SENTINEL`] entry.
pub fn order_sources<S: AsRef<str>>(raw: &[S]) -> Vec<SourceEntry> {
    let mut entries: Vec<SourceEntry> = raw.iter().map(|s| SourceEntry::parse(s.as_ref())).collect();
    if entries.is_empty() {
        entries.push(SourceEntry::parse(NO_SOURCES_SENTINEL));
    }
    entries.sort();
    entries
}

/// Entry counts per page: `ceil(total / cap)` pages, the first `total % pages` one longer.
pub fn page_sizes(total: usize, cap: usize) -> Vec<usize> {
    if total == 0 || cap == 0 {
        return Vec::new();
    }
    let pages = total.div_ceil(cap);
    let base = total / pages;
    let extra = total % pages;
    (0..pages).map(|i| base + usize::from(i < extra)).collect()
}

/// Split `items` into consecutive chunks sized by [`page_sizes`] with [`SOURCES_PER_PAGE`].
pub fn split_pages<T>(items: &[T]) -> Vec<&[T]> {
    let mut rest = items;
    page_sizes(items.len(), SOURCES_PER_PAGE)
        .into_iter()
        .map(|n| {
            let (page, tail) = rest.split_at(n);
            rest = tail;
            page
        })
        .collect()
}

/// Measured content of one source page.
#[derive(Clone, Debug, PartialEq)]
pub struct SourcePage {
    /// Display strings, in draw order.
    pub lines: Vec<String>,
    /// Lines after word wrapping, summed over all entries; drives the height.
    pub wrapped_line_count: usize,
    /// Panel height in pixels.
    pub height: u32,
}

impl SourcePage {
    /// Top of the first entry; entries are centred as a block of one line height each.
    pub fn block_top(&self) -> u32 {
        let block = LINE_HEIGHT * self.lines.len() as u32;
        self.height.saturating_sub(block) / 2
    }
}

/// Order, format, paginate, and measure the sources of one event.
pub fn plan_source_pages<S: AsRef<str>>(
    engine: &mut TextEngine,
    face: &Typeface,
    raw: &[S],
) -> PosterResult<Vec<SourcePage>> {
    let display: Vec<String> = order_sources(raw).iter().map(SourceEntry::display).collect();
    let max_width = (CANVAS_WIDTH - HORIZONTAL_MARGIN) as f32;

    split_pages(&display)
        .into_iter()
        .map(|chunk| {
            let mut wrapped_line_count = 0usize;
            for line in chunk {
                wrapped_line_count += engine.wrap(face, line, SOURCE_FONT_PX, max_width)?.len();
            }
            let content = LINE_HEIGHT * wrapped_line_count as u32 + VERTICAL_PADDING;
            Ok(SourcePage {
                lines: chunk.to_vec(),
                wrapped_line_count,
                height: content.max(PANEL_MIN_HEIGHT),
            })
        })
        .collect()
}

/// Render every source page of one event.
///
/// The height allows for wrapped lines, but each entry is drawn as a single centred line one
/// line height below the previous one.
#[tracing::instrument(skip_all, fields(sources = raw.len()))]
pub fn render_source_pages<S: AsRef<str>>(
    engine: &mut TextEngine,
    face: &Typeface,
    raw: &[S],
) -> PosterResult<Vec<Panel>> {
    let pages = plan_source_pages(engine, face, raw)?;
    tracing::debug!(pages = pages.len(), "planned source pages");

    pages
        .iter()
        .enumerate()
        .map(|(page_index, page)| {
            let mut canvas = Canvas::new(CANVAS_WIDTH, page.height)?;
            let mut y = page.block_top();
            for line in &page.lines {
                let shaped = engine.shape(face, line, SOURCE_FONT_PX)?;
                let x = ((canvas.width() as f32 - shaped.extent.width) / 2.0).floor();
                canvas.draw_text(&shaped, f64::from(x), f64::from(y));
                y += LINE_HEIGHT;
            }
            Ok(Panel::new(
                PanelKind::Sources { page: page_index },
                canvas.finish()?,
            ))
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/layout/sources.rs"]
mod tests;
