use std::sync::atomic::{AtomicU64, Ordering};

use crate::foundation::{
    core::FrameSize,
    error::{PhotostripError, PhotostripResult},
    math::div_alpha_u8,
};

/// Largest surface [`FreshSurfaces`] hands out by default (64 megapixels).
pub const DEFAULT_MAX_SURFACE_PIXELS: usize = 64 * 1024 * 1024;

/// Owned premultiplied RGBA8 raster, cleared to transparent on creation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Surface {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl Surface {
    /// Allocate a transparent surface.
    pub fn new(size: FrameSize) -> PhotostripResult<Self> {
        let len = size
            .pixel_count()
            .checked_mul(4)
            .ok_or_else(|| PhotostripError::validation("surface size overflow"))?;
        if len == 0 {
            return Err(PhotostripError::validation("surface must be non-empty"));
        }
        Ok(Self {
            width: size.width,
            height: size.height,
            data: vec![0u8; len],
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn size(&self) -> FrameSize {
        FrameSize {
            width: self.width,
            height: self.height,
        }
    }

    /// Premultiplied bytes, row-major.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub(crate) fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Premultiplied pixel `(x, y)`, or `None` when out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        let px = &self.data[idx..idx + 4];
        Some([px[0], px[1], px[2], px[3]])
    }

    /// Convert to a straight-alpha image for encoding.
    pub fn to_straight_rgba(&self) -> PhotostripResult<image::RgbaImage> {
        let mut out = self.data.clone();
        for px in out.chunks_exact_mut(4) {
            let a = px[3];
            if a == 255 {
                continue;
            }
            px[0] = div_alpha_u8(px[0], a);
            px[1] = div_alpha_u8(px[1], a);
            px[2] = div_alpha_u8(px[2], a);
        }
        image::RgbaImage::from_raw(self.width, self.height, out)
            .ok_or_else(|| {
                PhotostripError::composition("surface buffer does not match its size")
            })
    }
}

/// Source of output rasters.
///
/// Every call must return a new, exclusively owned surface; nothing drawn by one merge may be
/// visible to another.
pub trait SurfaceFactory: Send + Sync {
    fn create(&self, size: FrameSize) -> PhotostripResult<Surface>;
}

/// Allocates a fresh zeroed surface per request, with a size cap.
#[derive(Debug)]
pub struct FreshSurfaces {
    max_pixels: usize,
    allocated: AtomicU64,
}

impl FreshSurfaces {
    pub fn new(max_pixels: usize) -> Self {
        Self {
            max_pixels,
            allocated: AtomicU64::new(0),
        }
    }

    /// Number of surfaces handed out so far.
    pub fn allocated(&self) -> u64 {
        self.allocated.load(Ordering::Relaxed)
    }
}

impl Default for FreshSurfaces {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_SURFACE_PIXELS)
    }
}

impl SurfaceFactory for FreshSurfaces {
    fn create(&self, size: FrameSize) -> PhotostripResult<Surface> {
        if size.pixel_count() > self.max_pixels {
            return Err(PhotostripError::validation(format!(
                "surface {}x{} exceeds the {} pixel limit",
                size.width, size.height, self.max_pixels
            )));
        }
        let surface = Surface::new(size)?;
        self.allocated.fetch_add(1, Ordering::Relaxed);
        Ok(surface)
    }
}
