use serde::{Deserialize, Serialize};

use jigsnap_core::game::fit_piece_size;
use jigsnap_core::{PuzzleError, PuzzleResult};

/// Pixel dimensions of a decoded image, as reported by whatever decoded it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageInfo {
    pub width: u32,
    pub height: u32,
}

impl ImageInfo {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn validate(self) -> PuzzleResult<Self> {
        if self.width == 0 || self.height == 0 {
            return Err(PuzzleError::InvalidImage {
                width: self.width,
                height: self.height,
            });
        }
        Ok(self)
    }

    /// Uniform scale that fits the image inside the canvas.
    pub fn fit_scale(&self, canvas_width: f32, canvas_height: f32) -> f32 {
        let (scale, _, _) =
            fit_piece_size(self.width, self.height, canvas_width, canvas_height, 1, 1);
        scale
    }

    pub fn scaled_size(&self, canvas_width: f32, canvas_height: f32) -> (f32, f32) {
        let scale = self.fit_scale(canvas_width, canvas_height);
        (self.width as f32 * scale, self.height as f32 * scale)
    }
}

/// Anything that can report decoded image dimensions. Pixel access stays
/// with the renderer; pieces only carry the source rectangle to sample.
pub trait ImageSource {
    fn dimensions(&self) -> (u32, u32);

    fn info(&self) -> PuzzleResult<ImageInfo> {
        let (width, height) = self.dimensions();
        ImageInfo::new(width, height).validate()
    }
}

impl ImageSource for ImageInfo {
    fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}

impl ImageSource for (u32, u32) {
    fn dimensions(&self) -> (u32, u32) {
        *self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wide_images_fit_the_canvas_width() {
        let info = ImageInfo::new(1800, 600);
        assert_eq!(info.fit_scale(900.0, 700.0), 0.5);
        assert_eq!(info.scaled_size(900.0, 700.0), (900.0, 300.0));
    }

    #[test]
    fn empty_images_are_rejected() {
        assert_eq!(
            (640u32, 0u32).info(),
            Err(PuzzleError::InvalidImage { width: 640, height: 0 })
        );
        assert_eq!(ImageInfo::new(4, 3).info(), Ok(ImageInfo::new(4, 3)));
    }
}
