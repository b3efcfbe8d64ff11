use std::path::Path;
use std::sync::Arc;

use usvg::fontdb;

use crate::config::FontConfig;
use crate::foundation::error::{PosterError, PosterResult};

/// Fixed advance used by the estimated-metrics face, in em.
pub(crate) const ESTIMATED_ADVANCE_EM: f32 = 0.55;
/// Line height used by the estimated-metrics face, in em.
pub(crate) const ESTIMATED_LINE_EM: f32 = 1.2;

/// Public-domain face compiled into the binary; the last fallback that still draws glyphs.
const EMBEDDED_FONT: &[u8] = include_bytes!(concat!(env!("CARGO_MANIFEST_DIR"), "/fonts/Tuffy.ttf"));
const EMBEDDED_LABEL: &str = "embedded:Tuffy";

/// Generic families tried, in order, when no configured face can be loaded.
const SYSTEM_FALLBACK_FAMILIES: &[&str] = &[
    "DejaVu Sans",
    "Liberation Sans",
    "Noto Sans",
    "Arial",
    "Helvetica",
];

#[derive(Clone)]
pub(crate) struct OutlineFace {
    /// Stable identity derived from the font bytes.
    pub(crate) id: u64,
    pub(crate) bytes: Arc<Vec<u8>>,
    /// Face index inside a collection file.
    pub(crate) index: u32,
    /// Glyph source for the rasterizer, shared by every draw call.
    pub(crate) font: vello_cpu::peniko::FontData,
}

impl OutlineFace {
    fn new(bytes: Vec<u8>, index: u32) -> Self {
        let font = vello_cpu::peniko::FontData::new(
            vello_cpu::peniko::Blob::from(bytes.clone()),
            index,
        );
        Self {
            id: xxhash_rust::xxh3::xxh3_64(&bytes),
            bytes: Arc::new(bytes),
            index,
            font,
        }
    }
}

impl std::fmt::Debug for OutlineFace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OutlineFace")
            .field("id", &format_args!("{:016x}", self.id))
            .field("len", &self.bytes.len())
            .field("index", &self.index)
            .finish()
    }
}

#[derive(Clone, Debug)]
enum FaceKind {
    Outline(OutlineFace),
    Estimated,
}

/// A font face used for measuring and drawing text.
///
/// Either a real outline font or the estimated-metrics face, which measures with a fixed advance
/// and draws nothing.
#[derive(Clone, Debug)]
pub struct Typeface {
    kind: FaceKind,
    label: String,
}

impl Typeface {
    /// Load a face from raw font bytes (TTF/OTF/TTC).
    pub fn from_bytes(bytes: Vec<u8>, index: u32, label: impl Into<String>) -> PosterResult<Self> {
        let label = label.into();
        let mut db = fontdb::Database::new();
        db.load_font_data(bytes.clone());
        if db.is_empty() {
            return Err(PosterError::layout(format!(
                "'{label}' does not contain a usable font face"
            )));
        }
        Ok(Self {
            kind: FaceKind::Outline(OutlineFace::new(bytes, index)),
            label,
        })
    }

    /// Load a face from a font file.
    pub fn from_path(path: impl AsRef<Path>) -> PosterResult<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|e| {
            PosterError::layout(format!("read font '{}': {e}", path.display()))
        })?;
        Self::from_bytes(bytes, 0, path.display().to_string())
    }

    /// Locate a default sans-serif face among the installed system fonts.
    pub fn system_default() -> Option<Self> {
        let mut db = fontdb::Database::new();
        db.load_system_fonts();

        let mut families = vec![fontdb::Family::SansSerif];
        families.extend(SYSTEM_FALLBACK_FAMILIES.iter().map(|&n| fontdb::Family::Name(n)));
        let query = fontdb::Query {
            families: &families,
            ..Default::default()
        };
        let id = db
            .query(&query)
            .or_else(|| db.faces().next().map(|face| face.id))?;

        let label = db
            .face(id)
            .and_then(|face| face.families.first().map(|(name, _)| name.clone()))
            .unwrap_or_else(|| "system".to_string());
        let (bytes, index) = db.with_face_data(id, |data, index| (data.to_vec(), index))?;
        Self::from_bytes(bytes, index, format!("system:{label}")).ok()
    }

    /// The face compiled into the binary. Always available.
    pub fn embedded() -> Self {
        Self {
            kind: FaceKind::Outline(OutlineFace::new(EMBEDDED_FONT.to_vec(), 0)),
            label: EMBEDDED_LABEL.to_string(),
        }
    }

    /// Fixed-advance metrics with no glyph output. Layout is identical on every machine, which
    /// makes it the face for geometry tests; posters never fall back to it.
    pub fn estimated() -> Self {
        Self {
            kind: FaceKind::Estimated,
            label: "estimated".to_string(),
        }
    }

    /// Human-readable origin of this face (file path, `system:<family>`, `embedded:Tuffy`, or
    /// `estimated`).
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Return `true` for the built-in estimated-metrics face.
    pub fn is_estimated(&self) -> bool {
        matches!(self.kind, FaceKind::Estimated)
    }

    pub(crate) fn outline(&self) -> Option<&OutlineFace> {
        match &self.kind {
            FaceKind::Outline(face) => Some(face),
            FaceKind::Estimated => None,
        }
    }
}

/// The two faces a poster needs.
#[derive(Clone, Debug)]
pub struct FontBook {
    /// Header title and sub-lines.
    pub title: Typeface,
    /// Broadcast source pages.
    pub body: Typeface,
}

impl FontBook {
    /// Resolve both faces: configured file, then system default, then the embedded face.
    ///
    /// Never fails; every fallback is logged.
    pub fn load(cfg: &FontConfig) -> Self {
        let mut system: Option<Option<Typeface>> = None;
        let mut resolve = |role: &str, path: &Path| match Typeface::from_path(path) {
            Ok(face) => face,
            Err(err) => {
                let fallback = system
                    .get_or_insert_with(Typeface::system_default)
                    .clone()
                    .unwrap_or_else(Typeface::embedded);
                tracing::warn!(
                    role,
                    %err,
                    fallback = fallback.label(),
                    "font unavailable, using fallback face"
                );
                fallback
            }
        };

        let title = resolve("title", &cfg.title);
        let body = resolve("body", &cfg.body);
        Self { title, body }
    }

    /// Both roles on the embedded face.
    pub fn embedded() -> Self {
        Self {
            title: Typeface::embedded(),
            body: Typeface::embedded(),
        }
    }

    /// Both roles on the estimated-metrics face. Layout stays deterministic across machines.
    pub fn estimated() -> Self {
        Self {
            title: Typeface::estimated(),
            body: Typeface::estimated(),
        }
    }
}
