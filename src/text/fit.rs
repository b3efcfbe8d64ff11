use crate::foundation::error::PosterResult;

/// Shrink-to-fit font sizing: start at `max`, step down by `step` while the text is wider than
/// the limit, stop at `min` even if it still overflows.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FontFit {
    /// Starting (largest) size in pixels.
    pub max: f32,
    /// Smallest size ever returned.
    pub min: f32,
    /// Decrement per attempt.
    pub step: f32,
}

impl FontFit {
    /// Return the first size whose measured width is `<= limit`, or `min`.
    pub fn fit(
        &self,
        limit: f32,
        mut width_at: impl FnMut(f32) -> PosterResult<f32>,
    ) -> PosterResult<f32> {
        let mut size = self.max;
        while size > self.min && width_at(size)? > limit {
            size = (size - self.step).max(self.min);
        }
        Ok(size)
    }
}
