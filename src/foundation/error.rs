/// Crate-wide result alias.
pub type PosterResult<T> = Result<T, PosterError>;

/// Errors raised while loading, laying out, rendering, or writing posters.
#[derive(thiserror::Error, Debug)]
pub enum PosterError {
    /// Malformed input values (sizes, time strings, config).
    #[error("validation error: {0}")]
    Validation(String),

    /// Text shaping or font loading failed.
    #[error("layout error: {0}")]
    Layout(String),

    /// Rasterisation or image encoding failed.
    #[error("render error: {0}")]
    Render(String),

    /// Remote image could not be fetched or decoded.
    #[error("fetch error: {0}")]
    Fetch(String),

    /// Daily event data could not be found or parsed.
    #[error("feed error: {0}")]
    Feed(String),

    /// A poster could not be assembled from its panels.
    #[error("assembly error: {0}")]
    Assembly(String),

    /// Filesystem failure.
    #[error("io error: {0}")]
    Io(String),

    /// Anything else, with its source chain preserved.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl PosterError {
    /// Build a [`PosterError::Validation`].
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`PosterError::Layout`].
    pub fn layout(msg: impl Into<String>) -> Self {
        Self::Layout(msg.into())
    }

    /// Build a [`PosterError::Render`].
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`PosterError::Fetch`].
    pub fn fetch(msg: impl Into<String>) -> Self {
        Self::Fetch(msg.into())
    }

    /// Build a [`PosterError::Feed`].
    pub fn feed(msg: impl Into<String>) -> Self {
        Self::Feed(msg.into())
    }

    /// Build a [`PosterError::Assembly`].
    pub fn assembly(msg: impl Into<String>) -> Self {
        Self::Assembly(msg.into())
    }

    /// Build a [`PosterError::Io`].
    pub fn io(msg: impl Into<String>) -> Self {
        Self::Io(msg.into())
    }
}
