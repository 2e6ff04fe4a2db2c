//! Transparent slot detection.
//!
//! A frame is an image with opaque decoration and fully transparent rectangular cutouts. The
//! analyzer labels 4-connected components of transparent pixels, drops the ones that reach the
//! image border (the background margin around the artwork), filters out noise by size, and
//! returns the surviving bounding boxes in top-to-bottom order.

use crate::{
    assets::{
        decode::{PreparedImage, load_image},
        source::ImageSource,
    },
    foundation::{
        core::{FrameSize, Region, SlotIndex},
        error::{PhotostripError, PhotostripResult},
    },
};

/// Pixels with alpha strictly below this are transparent.
pub const DEFAULT_ALPHA_THRESHOLD: u8 = 20;
/// Components with a pixel closer than this to any border are background.
pub const DEFAULT_EDGE_MARGIN: u32 = 2;
/// Slots must be wider and taller than this fraction of the frame.
pub const DEFAULT_MIN_SIZE_RATIO: f64 = 0.05;
/// Slots at least this fraction of the frame height are side-strip artifacts.
pub const DEFAULT_MAX_HEIGHT_RATIO: f64 = 0.8;
/// Upper bound on returned slots; the largest by area win.
pub const DEFAULT_MAX_REGIONS: usize = 4;

/// Tunable detection thresholds.
///
/// Shipped frame art is drawn against the defaults; change them only for custom frames.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AnalyzerOpts {
    /// Alpha cutoff; `alpha < alpha_threshold` counts as transparent.
    pub alpha_threshold: u8,
    /// Border margin in pixels used for the edge-touch test.
    pub edge_margin: u32,
    /// Minimum slot width/height as a fraction of frame width/height (exclusive).
    pub min_size_ratio: f64,
    /// Maximum slot height as a fraction of frame height (exclusive).
    pub max_height_ratio: f64,
    /// Maximum number of slots kept.
    pub max_regions: usize,
}

impl Default for AnalyzerOpts {
    fn default() -> Self {
        Self {
            alpha_threshold: DEFAULT_ALPHA_THRESHOLD,
            edge_margin: DEFAULT_EDGE_MARGIN,
            min_size_ratio: DEFAULT_MIN_SIZE_RATIO,
            max_height_ratio: DEFAULT_MAX_HEIGHT_RATIO,
            max_regions: DEFAULT_MAX_REGIONS,
        }
    }
}

impl AnalyzerOpts {
    /// Reject out-of-range thresholds.
    pub fn validate(&self) -> PhotostripResult<()> {
        let ratio_ok = |r: f64| r.is_finite() && r > 0.0 && r <= 1.0;
        if !ratio_ok(self.min_size_ratio) {
            return Err(PhotostripError::validation(format!(
                "min_size_ratio must be in (0, 1], got {}",
                self.min_size_ratio
            )));
        }
        if !ratio_ok(self.max_height_ratio) {
            return Err(PhotostripError::validation(format!(
                "max_height_ratio must be in (0, 1], got {}",
                self.max_height_ratio
            )));
        }
        if self.max_regions == 0 {
            return Err(PhotostripError::validation("max_regions must be > 0"));
        }
        Ok(())
    }
}

/// Detected slots plus the frame's natural size.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct LayoutResult {
    /// Slots sorted by `y` ascending; may be empty.
    pub coords: Vec<Region>,
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
}

impl LayoutResult {
    /// Frame dimensions as a size.
    pub fn size(&self) -> FrameSize {
        FrameSize {
            width: self.width,
            height: self.height,
        }
    }

    /// Return `true` when no slot was found.
    pub fn is_empty(&self) -> bool {
        self.coords.is_empty()
    }

    /// Slots paired with their index in capture order.
    pub fn slots(&self) -> impl Iterator<Item = (SlotIndex, Region)> + '_ {
        self.coords
            .iter()
            .enumerate()
            .map(|(i, r)| (SlotIndex(i), *r))
    }

    /// The same slots mapped proportionally onto a frame of another size.
    ///
    /// Slots that shrink to nothing are dropped.
    pub fn rescaled(&self, size: FrameSize) -> LayoutResult {
        if size == self.size() {
            return self.clone();
        }
        let sx = |v: u32| scale_px(v, size.width, self.width);
        let sy = |v: u32| scale_px(v, size.height, self.height);
        let coords = self
            .coords
            .iter()
            .filter_map(|r| {
                let (x, y) = (sx(r.x), sy(r.y));
                let region = Region::new(x, y, sx(r.right()) - x, sy(r.bottom()) - y).ok()?;
                region.fits_within(size).then_some(region)
            })
            .collect();
        LayoutResult {
            coords,
            width: size.width,
            height: size.height,
        }
    }
}

fn scale_px(v: u32, to: u32, from: u32) -> u32 {
    (u64::from(v) * u64::from(to) / u64::from(from.max(1))) as u32
}

/// Decode the frame behind `source` and detect its photo slots.
///
/// Any failure to load or decode the frame surfaces as [`PhotostripError::Analysis`].
#[tracing::instrument(skip_all, fields(source = %source))]
pub fn analyze_frame(source: &ImageSource, opts: &AnalyzerOpts) -> PhotostripResult<LayoutResult> {
    opts.validate()?;
    let image = load_image(source).map_err(PhotostripError::into_analysis)?;
    analyze_image(&image, opts)
}

/// Detect photo slots in an already-decoded frame.
pub fn analyze_image(image: &PreparedImage, opts: &AnalyzerOpts) -> PhotostripResult<LayoutResult> {
    opts.validate()?;
    let (w, h) = (image.width, image.height);
    let expected = (w as usize)
        .checked_mul(h as usize)
        .and_then(|v| v.checked_mul(4))
        .ok_or_else(|| PhotostripError::analysis("frame buffer size overflow"))?;
    if image.rgba8_premul.len() != expected {
        return Err(PhotostripError::analysis(format!(
            "frame pixel buffer holds {} bytes, expected {expected} for {w}x{h}",
            image.rgba8_premul.len()
        )));
    }

    let components = label_components(image, opts);
    let total = components.len();

    let mut rects = Vec::new();
    for c in components {
        if c.touches_edge {
            continue;
        }
        let region = c.bounding_region();
        if is_slot_sized(region, w, h, opts) {
            rects.push(region);
        } else {
            tracing::debug!(?region, pixels = c.pixels, "discarding undersized or tall component");
        }
    }

    // Components arrive in raster order of their top-left-most pixel, so a stable sort keeps
    // equal-`y` slots left to right.
    rects.sort_by_key(|r| r.y);

    if rects.len() > opts.max_regions {
        tracing::debug!(
            found = rects.len(),
            keep = opts.max_regions,
            "too many slot candidates, keeping the largest"
        );
        rects.sort_by(|a, b| b.area().cmp(&a.area()));
        rects.truncate(opts.max_regions);
        rects.sort_by_key(|r| r.y);
    }

    tracing::info!(
        width = w,
        height = h,
        components = total,
        slots = rects.len(),
        "analyzed frame layout"
    );

    Ok(LayoutResult {
        coords: rects,
        width: w,
        height: h,
    })
}

fn is_slot_sized(r: Region, w: u32, h: u32, opts: &AnalyzerOpts) -> bool {
    let (fw, fh) = (f64::from(w), f64::from(h));
    let (rw, rh) = (f64::from(r.w), f64::from(r.h));
    rw > fw * opts.min_size_ratio
        && rh > fh * opts.min_size_ratio
        && rh < fh * opts.max_height_ratio
}

#[derive(Clone, Copy, Debug)]
struct Component {
    min_x: u32,
    max_x: u32,
    min_y: u32,
    max_y: u32,
    touches_edge: bool,
    pixels: u64,
}

impl Component {
    fn bounding_region(&self) -> Region {
        Region {
            x: self.min_x,
            y: self.min_y,
            w: self.max_x - self.min_x + 1,
            h: self.max_y - self.min_y + 1,
        }
    }
}

/// Label every 4-connected transparent component, in raster order of discovery.
///
/// Uses an explicit index stack; each component is filled to completion before the scan
/// moves on.
fn label_components(image: &PreparedImage, opts: &AnalyzerOpts) -> Vec<Component> {
    let (w, h) = (image.width, image.height);
    let data = image.rgba8_premul.as_slice();
    let threshold = opts.alpha_threshold;
    let is_transparent = |offset: usize| data[offset * 4 + 3] < threshold;

    let right_limit = w.saturating_sub(opts.edge_margin);
    let bottom_limit = h.saturating_sub(opts.edge_margin);
    let near_edge = |x: u32, y: u32| {
        x < opts.edge_margin || y < opts.edge_margin || x >= right_limit || y >= bottom_limit
    };

    let width = w as usize;
    let mut visited = vec![false; width * h as usize];
    let mut stack: Vec<usize> = Vec::new();
    let mut out = Vec::new();

    for y in 0..h {
        for x in 0..w {
            let start = (y as usize) * width + (x as usize);
            if visited[start] || !is_transparent(start) {
                continue;
            }

            let mut c = Component {
                min_x: x,
                max_x: x,
                min_y: y,
                max_y: y,
                touches_edge: false,
                pixels: 0,
            };
            visited[start] = true;
            stack.push(start);

            while let Some(offset) = stack.pop() {
                let cx = (offset % width) as u32;
                let cy = (offset / width) as u32;
                c.pixels += 1;

                if near_edge(cx, cy) {
                    c.touches_edge = true;
                }
                c.min_x = c.min_x.min(cx);
                c.max_x = c.max_x.max(cx);
                c.min_y = c.min_y.min(cy);
                c.max_y = c.max_y.max(cy);

                let mut visit = |n: usize| {
                    if !visited[n] && is_transparent(n) {
                        visited[n] = true;
                        stack.push(n);
                    }
                };
                if cx + 1 < w {
                    visit(offset + 1);
                }
                if cx > 0 {
                    visit(offset - 1);
                }
                if cy + 1 < h {
                    visit(offset + width);
                }
                if cy > 0 {
                    visit(offset - width);
                }
            }

            out.push(c);
        }
    }

    out
}

#[cfg(test)]
#[path = "../../tests/unit/layout/analyzer.rs"]
mod tests;
