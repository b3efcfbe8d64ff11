use image::RgbaImage;

/// Width shared by every panel and poster page, in pixels.
pub const CANVAS_WIDTH: u32 = 1024;

/// Fixed header height; also the minimum height of a source page.
pub const PANEL_MIN_HEIGHT: u32 = 341;

/// Which pipeline stage produced a [`Panel`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PanelKind {
    /// Title, venue, date, kick-off times, and team logos.
    Header,
    /// One page of broadcast sources (0-based page index).
    Sources {
        /// Position of this page among the event's source pages.
        page: usize,
    },
    /// League banner rescaled to the canvas width.
    Banner,
}

/// An intermediate rendered raster, straight-alpha RGBA8.
#[derive(Clone, Debug)]
pub struct Panel {
    kind: PanelKind,
    image: RgbaImage,
}

impl Panel {
    /// Wrap a rendered image.
    pub fn new(kind: PanelKind, image: RgbaImage) -> Self {
        Self { kind, image }
    }

    /// Stage that produced this panel.
    pub fn kind(&self) -> PanelKind {
        self.kind
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Borrow the pixels.
    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    /// Release the pixels.
    pub fn into_image(self) -> RgbaImage {
        self.image
    }
}

/// One fully assembled output image.
#[derive(Clone, Debug)]
pub struct PosterPage {
    /// 1-based page number, used in the output file name.
    pub index: usize,
    /// Merged pixels.
    pub image: RgbaImage,
}
