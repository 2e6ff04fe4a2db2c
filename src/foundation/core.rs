use crate::foundation::error::{PhotostripError, PhotostripResult};

pub use kurbo::Rect;

/// Axis-aligned photo slot in frame-pixel coordinates.
///
/// `x`/`y` are the top-left corner, `w`/`h` are extents in whole pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Region {
    /// Left edge (inclusive).
    pub x: u32,
    /// Top edge (inclusive).
    pub y: u32,
    /// Width in pixels, `> 0`.
    pub w: u32,
    /// Height in pixels, `> 0`.
    pub h: u32,
}

impl Region {
    /// Create a validated region with non-zero extents.
    pub fn new(x: u32, y: u32, w: u32, h: u32) -> PhotostripResult<Self> {
        if w == 0 || h == 0 {
            return Err(PhotostripError::validation(format!(
                "region {w}x{h} at ({x},{y}) must have non-zero extents"
            )));
        }
        if x.checked_add(w).is_none() || y.checked_add(h).is_none() {
            return Err(PhotostripError::validation("region extents overflow u32"));
        }
        Ok(Self { x, y, w, h })
    }

    /// Exclusive right edge.
    pub fn right(self) -> u32 {
        self.x.saturating_add(self.w)
    }

    /// Exclusive bottom edge.
    pub fn bottom(self) -> u32 {
        self.y.saturating_add(self.h)
    }

    /// Bounding-box area in pixels.
    pub fn area(self) -> u64 {
        u64::from(self.w) * u64::from(self.h)
    }

    /// Width over height.
    pub fn aspect(self) -> f64 {
        f64::from(self.w) / f64::from(self.h)
    }

    /// Return `true` when the region has extents and lies inside `size`.
    pub fn fits_within(self, size: FrameSize) -> bool {
        self.w > 0 && self.h > 0 && self.right() <= size.width && self.bottom() <= size.height
    }

    /// Return `true` when the pixel `(px, py)` is inside the region.
    pub fn contains(self, px: u32, py: u32) -> bool {
        px >= self.x && px < self.right() && py >= self.y && py < self.bottom()
    }

    /// The region as a float rectangle, for fit math.
    pub fn to_rect(self) -> Rect {
        Rect::new(
            f64::from(self.x),
            f64::from(self.y),
            f64::from(self.right()),
            f64::from(self.bottom()),
        )
    }
}

/// Position of a slot in top-to-bottom order; slot `i` receives captured photo `i`.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct SlotIndex(pub usize);

/// Pixel dimensions of a frame image.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct FrameSize {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl FrameSize {
    /// Create a validated size with non-zero extents.
    pub fn new(width: u32, height: u32) -> PhotostripResult<Self> {
        if width == 0 || height == 0 {
            return Err(PhotostripError::validation(format!(
                "frame size {width}x{height} must be non-zero"
            )));
        }
        Ok(Self { width, height })
    }

    /// Total pixel count.
    pub fn pixel_count(self) -> usize {
        (self.width as usize).saturating_mul(self.height as usize)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
