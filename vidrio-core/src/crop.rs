//! # Crop Mapping
//!
//! Texture-coordinate bounds that crop decoder padding at sample time.
//! The whole padded plane is uploaded; the shader samples `[0, max]` instead
//! of `[0, 1]` per axis, so filler rows and stride columns never reach the
//! screen and no pixels are copied to achieve the crop.

use crate::plane::PlaneSet;

/// Maximum normalized texture coordinates for the luma and chroma planes.
///
/// Recomputed for every frame; carries no identity beyond the current draw.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CropBounds {
    pub max_x: f32,
    pub max_y: f32,
    pub max_x_chroma: f32,
    pub max_y_chroma: f32,
}

impl CropBounds {
    /// Bounds mapping the `visible_width` x `visible_height` sub-rectangle of
    /// the padded planes in `planes`.
    ///
    /// All four results lie in (0, 1]; a visible dimension larger than the
    /// padded one is a caller error. The common caller never learns the
    /// pre-encoding true size and passes visible = padded, which makes every
    /// bound 1.0 and the crop a no-op - the formula stays general so a caller
    /// that does know the true size can supply it.
    pub fn compute(planes: &PlaneSet<'_>, visible_width: u32, visible_height: u32) -> Self {
        let bounds = Self {
            max_x: visible_width as f32 / planes.y.stride as f32,
            max_y: visible_height as f32 / planes.y.rows as f32,
            max_x_chroma: (visible_width / 2) as f32 / planes.u.stride as f32,
            max_y_chroma: (visible_height / 2) as f32 / planes.u.rows as f32,
        };
        debug_assert!(
            bounds.max_x <= 1.0 && bounds.max_y <= 1.0,
            "visible size {}x{} exceeds padded size {}x{}",
            visible_width,
            visible_height,
            planes.y.stride,
            planes.y.rows
        );
        bounds
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn planes_for(buffer: &[u8], width: u32, height: u32) -> PlaneSet<'_> {
        PlaneSet::split(buffer, width, height).unwrap()
    }

    #[test]
    fn test_visible_equals_padded_is_unity() {
        for (w, h) in [(4, 4), (640, 480), (1920, 1080)] {
            let buffer = vec![0u8; (w * h * 3 / 2) as usize];
            let planes = planes_for(&buffer, w, h);
            let bounds = CropBounds::compute(&planes, w, h);
            assert_eq!(bounds.max_x, 1.0);
            assert_eq!(bounds.max_y, 1.0);
            assert_eq!(bounds.max_x_chroma, 1.0);
            assert_eq!(bounds.max_y_chroma, 1.0);
        }
    }

    #[test]
    fn test_cropped_bounds() {
        // 704x576 padded, 640x480 visible: classic codec alignment padding.
        let buffer = vec![0u8; 704 * 576 * 3 / 2];
        let planes = planes_for(&buffer, 704, 576);
        let bounds = CropBounds::compute(&planes, 640, 480);

        assert_eq!(bounds.max_x, 640.0 / 704.0);
        assert_eq!(bounds.max_y, 480.0 / 576.0);
        assert_eq!(bounds.max_x_chroma, 320.0 / 352.0);
        assert_eq!(bounds.max_y_chroma, 240.0 / 288.0);
    }

    #[test]
    fn test_max_x_monotonic_in_visible_width() {
        let buffer = vec![0u8; 640 * 480 * 3 / 2];
        let planes = planes_for(&buffer, 640, 480);

        let mut previous = 0.0f32;
        for visible_width in [160, 320, 480, 600, 640] {
            let bounds = CropBounds::compute(&planes, visible_width, 480);
            assert!(bounds.max_x > previous);
            previous = bounds.max_x;
        }
    }

    #[test]
    fn test_recompute_is_identical() {
        let buffer = vec![0u8; 640 * 480 * 3 / 2];
        let planes = planes_for(&buffer, 640, 480);

        let a = CropBounds::compute(&planes, 600, 440);
        let b = CropBounds::compute(&planes, 600, 440);
        assert_eq!(a, b);
    }
}
