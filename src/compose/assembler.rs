use std::path::PathBuf;

use image::{Rgba, RgbaImage, imageops};

use crate::compose::output::{OutputLayout, write_pages};
use crate::foundation::core::{Panel, PanelKind, PosterPage};
use crate::foundation::error::{PosterError, PosterResult};

/// All panels rendered for one event. Header and banner are optional; a poster needs at least
/// one source page.
#[derive(Clone, Debug, Default)]
pub struct PanelSet {
    /// Header panel, if it was rendered.
    pub header: Option<Panel>,
    /// Source pages, one poster each.
    pub sources: Vec<Panel>,
    /// Banner panel, if the event has a banner.
    pub banner: Option<Panel>,
}

fn source_page_index(panel: &Panel) -> usize {
    match panel.kind() {
        PanelKind::Sources { page } => page,
        PanelKind::Header | PanelKind::Banner => usize::MAX,
    }
}

/// Stack `[header, source page, banner]` for every source page, in page order.
///
/// Width is the widest present panel, height the sum of present heights. Consumes the panels.
pub fn merge_panels(event_id: &str, panels: PanelSet) -> PosterResult<Vec<PosterPage>> {
    let PanelSet {
        header,
        mut sources,
        banner,
    } = panels;

    if sources.is_empty() {
        tracing::warn!(event = event_id, "no source panels, skipping merge");
        return Err(PosterError::assembly(format!(
            "no source panels found for event '{event_id}'"
        )));
    }
    if header.is_none() {
        tracing::info!(event = event_id, "header panel not found, merging without it");
    }
    if banner.is_none() {
        tracing::info!(event = event_id, "banner panel not found, merging without it");
    }

    sources.sort_by_key(source_page_index);

    let pages = sources
        .iter()
        .enumerate()
        .map(|(i, source)| {
            let stack: Vec<&Panel> = header
                .iter()
                .chain(std::iter::once(source))
                .chain(banner.iter())
                .collect();
            let width = stack.iter().map(|p| p.width()).max().unwrap_or(0);
            let height: u32 = stack.iter().map(|p| p.height()).sum();

            let mut image = RgbaImage::from_pixel(width, height, Rgba([0, 0, 0, 255]));
            let mut y = 0i64;
            for panel in stack {
                imageops::replace(&mut image, panel.image(), 0, y);
                y += i64::from(panel.height());
            }
            PosterPage {
                index: i + 1,
                image,
            }
        })
        .collect();
    Ok(pages)
}

/// Merge one event's panels and write every page under `{as_of}/{sport}/{league}`.
#[tracing::instrument(skip(layout, panels), fields(sources = panels.sources.len()))]
pub fn assemble_poster(
    layout: &OutputLayout,
    sport: &str,
    league: &str,
    event_id: &str,
    panels: PanelSet,
) -> PosterResult<Vec<PathBuf>> {
    let pages = merge_panels(event_id, panels)?;
    let dir = layout.ensure_dir(sport, league)?;
    write_pages(&dir, event_id, &pages)
}

#[cfg(test)]
#[path = "../../tests/unit/compose/assembler.rs"]
mod tests;
