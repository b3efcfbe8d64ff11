use std::path::{Path, PathBuf};

use chrono::NaiveDate;

use crate::foundation::core::PosterPage;
use crate::foundation::error::{PosterError, PosterResult};

/// Characters that are unsafe in file names on at least one platform.
const INVALID_NAME_CHARS: [char; 9] = ['/', '\\', ':', '*', '?', '"', '<', '>', '|'];
const NAME_REPLACEMENT: char = '-';

/// Replace each of `/ \ : * ? " < > |` with `-`.
///
/// Many-to-one: `A/B` and `A:B` both become `A-B` and would share output files.
pub fn sanitize_identifier(name: &str) -> String {
    name.chars()
        .map(|c| {
            if INVALID_NAME_CHARS.contains(&c) {
                NAME_REPLACEMENT
            } else {
                c
            }
        })
        .collect()
}

/// Sanitize a name used as one directory level; empty and dot-only names become `_`.
fn path_component(name: &str) -> String {
    let clean = sanitize_identifier(name.trim());
    if clean.is_empty() || clean.chars().all(|c| c == '.') {
        return "_".to_string();
    }
    clean
}

/// File name of one poster page (`page` is 1-based).
pub fn poster_file_name(event_id: &str, page: usize) -> String {
    format!("{event_id}_poster_{page}.png")
}

/// Maps `(sport, league)` to `{root}/{as_of}/{sport}/{league}`.
#[derive(Clone, Debug)]
pub struct OutputLayout {
    root: PathBuf,
    as_of: NaiveDate,
}

impl OutputLayout {
    /// Layout rooted at `root` for the batch date `as_of`.
    pub fn new(root: impl Into<PathBuf>, as_of: NaiveDate) -> Self {
        Self {
            root: root.into(),
            as_of,
        }
    }

    /// The batch date.
    pub fn as_of(&self) -> NaiveDate {
        self.as_of
    }

    /// Output directory for one sport and league. Nothing is created.
    pub fn dir_for(&self, sport: &str, league: &str) -> PathBuf {
        self.root
            .join(self.as_of.format("%Y-%m-%d").to_string())
            .join(path_component(sport))
            .join(path_component(league))
    }

    /// Create the output directory (and parents) if needed.
    ///
    /// Safe to call repeatedly and from several workers at once.
    pub fn ensure_dir(&self, sport: &str, league: &str) -> PosterResult<PathBuf> {
        let dir = self.dir_for(sport, league);
        std::fs::create_dir_all(&dir).map_err(|e| {
            PosterError::io(format!("create output dir '{}': {e}", dir.display()))
        })?;
        Ok(dir)
    }
}

/// Write pages as RGB PNG files into `dir`, returning the written paths in page order.
pub fn write_pages(dir: &Path, event_id: &str, pages: &[PosterPage]) -> PosterResult<Vec<PathBuf>> {
    let mut written = Vec::with_capacity(pages.len());
    for page in pages {
        let path = dir.join(poster_file_name(event_id, page.index));
        let rgb = image::DynamicImage::ImageRgba8(page.image.clone()).to_rgb8();
        image::save_buffer_with_format(
            &path,
            rgb.as_raw(),
            rgb.width(),
            rgb.height(),
            image::ColorType::Rgb8,
            image::ImageFormat::Png,
        )
        .map_err(|e| PosterError::render(format!("write png '{}': {e}", path.display())))?;
        tracing::info!(event = event_id, path = %path.display(), "saved poster page");
        written.push(path);
    }
    Ok(written)
}

#[cfg(test)]
#[path = "../../tests/unit/compose/output.rs"]
mod tests;
