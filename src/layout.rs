//! Panel builders: header, paginated broadcast sources, and league banner.
//!
//! Geometry is fixed; every builder produces panels [`crate::CANVAS_WIDTH`] pixels wide.

pub(crate) mod banner;
pub(crate) mod header;
pub(crate) mod sources;
