//! # Plane Extraction
//!
//! Splits one interleaved YUV 4:2:0 buffer into borrowed Y/U/V plane views.
//! Decoders deliver a single allocation with stride columns and filler rows
//! baked in; the split is pure offset math and copies nothing.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PlaneError {
    #[error("Invalid frame dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },
    #[error("Frame buffer too small: need {needed} bytes, got {actual}")]
    BufferTooSmall { needed: usize, actual: usize },
}

/// Borrowed view of one plane inside a frame buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Plane<'a> {
    /// Plane bytes, `stride * rows` long.
    pub data: &'a [u8],
    /// Bytes between the start of consecutive rows (includes column padding).
    pub stride: u32,
    /// Row count (includes filler rows).
    pub rows: u32,
}

/// The three planes of one 4:2:0 frame.
///
/// Derived from the buffer on every frame and never stored; the views cannot
/// outlive the caller's buffer, which may be reused as soon as the frame has
/// been rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaneSet<'a> {
    pub y: Plane<'a>,
    pub u: Plane<'a>,
    pub v: Plane<'a>,
}

impl<'a> PlaneSet<'a> {
    /// Split `buffer` into Y/U/V views for a padded `width` x `height` frame.
    ///
    /// Luma occupies the first `width * height` bytes, followed by the U and V
    /// planes at a quarter of that each (4:2:0). Chroma stride is `width / 2`
    /// and chroma rows `height / 2`, both integer division. An odd `width`
    /// truncates the chroma byte count the same way; decoder alignment makes
    /// that unreachable in practice, so it stays a policy rather than an error.
    ///
    /// A buffer shorter than the derived 4:2:0 size is rejected before any
    /// slicing happens.
    pub fn split(buffer: &'a [u8], width: u32, height: u32) -> Result<Self, PlaneError> {
        if width == 0 || height == 0 {
            return Err(PlaneError::InvalidDimensions { width, height });
        }

        let luma = width as usize * height as usize;
        let chroma = luma / 4;
        let needed = luma + 2 * chroma;
        if buffer.len() < needed {
            return Err(PlaneError::BufferTooSmall {
                needed,
                actual: buffer.len(),
            });
        }

        let chroma_stride = width / 2;
        let chroma_rows = height / 2;

        Ok(Self {
            y: Plane {
                data: &buffer[..luma],
                stride: width,
                rows: height,
            },
            u: Plane {
                data: &buffer[luma..luma + chroma],
                stride: chroma_stride,
                rows: chroma_rows,
            },
            v: Plane {
                data: &buffer[luma + chroma..needed],
                stride: chroma_stride,
                rows: chroma_rows,
            },
        })
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_4x4() {
        let buffer: Vec<u8> = (0u8..24).collect();
        let planes = PlaneSet::split(&buffer, 4, 4).unwrap();

        assert_eq!(planes.y.data, &buffer[0..16]);
        assert_eq!(planes.u.data, &buffer[16..20]);
        assert_eq!(planes.v.data, &buffer[20..24]);

        assert_eq!(planes.y.stride, 4);
        assert_eq!(planes.y.rows, 4);
        assert_eq!(planes.u.stride, 2);
        assert_eq!(planes.u.rows, 2);
        assert_eq!(planes.v.stride, 2);
        assert_eq!(planes.v.rows, 2);
    }

    #[test]
    fn test_split_640x480() {
        let buffer = vec![0u8; 460_800];
        let planes = PlaneSet::split(&buffer, 640, 480).unwrap();

        assert_eq!(planes.y.data.len(), 307_200);
        assert_eq!(planes.u.data.len(), 76_800);
        assert_eq!(planes.v.data.len(), 76_800);
        assert_eq!(planes.u.stride, 320);
        assert_eq!(planes.u.rows, 240);
    }

    #[test]
    fn test_planes_are_contiguous_and_span_buffer() {
        let buffer = vec![0u8; 8 * 6 * 3 / 2];
        let planes = PlaneSet::split(&buffer, 8, 6).unwrap();

        let base = buffer.as_ptr() as usize;
        let y_start = planes.y.data.as_ptr() as usize - base;
        let u_start = planes.u.data.as_ptr() as usize - base;
        let v_start = planes.v.data.as_ptr() as usize - base;

        assert_eq!(y_start, 0);
        assert_eq!(u_start, y_start + planes.y.data.len());
        assert_eq!(v_start, u_start + planes.u.data.len());
        assert_eq!(v_start + planes.v.data.len(), buffer.len());
    }

    #[test]
    fn test_odd_width_truncates_chroma() {
        // width 6, height 3: luma = 18, chroma = 18 / 4 = 4 (truncated from
        // 4.5). Documented policy, not an error.
        let buffer = vec![0u8; 26];
        let planes = PlaneSet::split(&buffer, 6, 3).unwrap();

        assert_eq!(planes.u.data.len(), 4);
        assert_eq!(planes.u.stride, 3);
        assert_eq!(planes.u.rows, 1);
    }

    #[test]
    fn test_odd_height_truncates_rows() {
        let buffer = vec![0u8; 4 * 5 + 2 * 5];
        let planes = PlaneSet::split(&buffer, 4, 5).unwrap();

        assert_eq!(planes.y.rows, 5);
        assert_eq!(planes.u.rows, 2);
        assert_eq!(planes.u.data.len(), 5);
    }

    #[test]
    fn test_buffer_too_small_rejected() {
        let buffer = vec![0u8; 23];
        let err = PlaneSet::split(&buffer, 4, 4).unwrap_err();
        assert_eq!(
            err,
            PlaneError::BufferTooSmall {
                needed: 24,
                actual: 23
            }
        );
    }

    #[test]
    fn test_zero_dimensions_rejected() {
        let buffer = vec![0u8; 64];
        assert!(matches!(
            PlaneSet::split(&buffer, 0, 4),
            Err(PlaneError::InvalidDimensions { .. })
        ));
        assert!(matches!(
            PlaneSet::split(&buffer, 4, 0),
            Err(PlaneError::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn test_split_is_deterministic() {
        let buffer: Vec<u8> = (0u8..24).collect();
        let a = PlaneSet::split(&buffer, 4, 4).unwrap();
        let b = PlaneSet::split(&buffer, 4, 4).unwrap();
        assert_eq!(a, b);
    }
}
