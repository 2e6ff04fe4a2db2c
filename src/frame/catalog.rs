//! Built-in frames and layout resolution with a static fallback.

use std::io::Cursor;

use anyhow::Context;

use crate::{
    assets::source::ImageSource,
    foundation::{
        core::{FrameSize, Region},
        error::{PhotostripError, PhotostripResult},
    },
    layout::analyzer::{AnalyzerOpts, LayoutResult, analyze_frame},
};

/// Size of every built-in frame.
pub const CATALOG_FRAME_SIZE: FrameSize = FrameSize {
    width: 600,
    height: 1440,
};

/// Slots cut out of every built-in frame, top to bottom.
pub const CATALOG_COORDS: [Region; 4] = [
    Region {
        x: 50,
        y: 120,
        w: 500,
        h: 280,
    },
    Region {
        x: 50,
        y: 420,
        w: 500,
        h: 280,
    },
    Region {
        x: 50,
        y: 720,
        w: 500,
        h: 280,
    },
    Region {
        x: 50,
        y: 1020,
        w: 500,
        h: 280,
    },
];

/// Shots per run when a layout has no slots.
pub const DEFAULT_SHOT_COUNT: usize = 4;

const CATALOG_ART: [(&str, u32, [u8; 3]); 3] = [
    ("Classic Black", 1, [0x00, 0x00, 0x00]),
    ("Vibrant Red", 2, [0xD0, 0x2C, 0x3F]),
    ("Sunny Yellow", 3, [0xFD, 0xEF, 0xB2]),
];

/// A selectable frame.
#[derive(Clone, Debug)]
pub struct Frame {
    /// Display name.
    pub topic: String,
    /// 1-based catalog number.
    pub number: u32,
    /// Encoded frame art.
    pub source: ImageSource,
    /// Layout used when analysis fails or finds nothing.
    pub fallback: LayoutResult,
}

impl Frame {
    /// A frame outside the catalog, falling back to the catalog layout.
    pub fn custom(topic: impl Into<String>, number: u32, source: ImageSource) -> Self {
        Self {
            topic: topic.into(),
            number,
            source,
            fallback: catalog_layout(),
        }
    }

    /// Analyze the frame art, falling back to the static layout on failure or an empty result.
    ///
    /// When the art decodes but has no slots, the fallback is rescaled to the art's size so the
    /// merge sees regions that fit the frame. Art that fails to decode gets the fallback as is;
    /// merging it fails on decode anyway.
    pub fn resolve_layout(&self, opts: &AnalyzerOpts) -> ResolvedLayout {
        match analyze_frame(&self.source, opts) {
            Ok(layout) if !layout.is_empty() => ResolvedLayout {
                layout,
                origin: LayoutOrigin::Analyzed,
            },
            Ok(layout) => {
                tracing::warn!(topic = %self.topic, "no slots detected, using fallback layout");
                ResolvedLayout {
                    layout: self.fallback.rescaled(layout.size()),
                    origin: LayoutOrigin::Fallback,
                }
            }
            Err(err) => {
                tracing::warn!(
                    topic = %self.topic,
                    error = %err,
                    "frame analysis failed, using fallback layout"
                );
                self.fallback_layout()
            }
        }
    }

    fn fallback_layout(&self) -> ResolvedLayout {
        ResolvedLayout {
            layout: self.fallback.clone(),
            origin: LayoutOrigin::Fallback,
        }
    }
}

/// Whether a layout came from analysis or the static fallback.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayoutOrigin {
    Analyzed,
    Fallback,
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ResolvedLayout {
    pub layout: LayoutResult,
    pub origin: LayoutOrigin,
}

impl ResolvedLayout {
    /// Number of photos a capture run needs for this layout.
    pub fn shot_count(&self) -> usize {
        if self.layout.is_empty() {
            DEFAULT_SHOT_COUNT
        } else {
            self.layout.coords.len()
        }
    }
}

/// Static layout shared by the built-in frames.
pub fn catalog_layout() -> LayoutResult {
    LayoutResult {
        coords: CATALOG_COORDS.to_vec(),
        width: CATALOG_FRAME_SIZE.width,
        height: CATALOG_FRAME_SIZE.height,
    }
}

/// Render the built-in frames.
pub fn builtin_catalog() -> PhotostripResult<Vec<Frame>> {
    CATALOG_ART
        .iter()
        .map(|&(topic, n, rgb)| render_catalog_frame(topic, n, rgb))
        .collect()
}

/// Render one built-in frame by its 1-based number.
pub fn catalog_frame(number: u32) -> PhotostripResult<Frame> {
    let &(topic, number, rgb) = CATALOG_ART
        .iter()
        .find(|(_, n, _)| *n == number)
        .ok_or_else(|| {
            PhotostripError::validation(format!(
                "no catalog frame numbered {number} (expected 1..={})",
                CATALOG_ART.len()
            ))
        })?;
    render_catalog_frame(topic, number, rgb)
}

fn render_catalog_frame(topic: &str, number: u32, rgb: [u8; 3]) -> PhotostripResult<Frame> {
    let png = render_solid_frame(CATALOG_FRAME_SIZE, rgb, &CATALOG_COORDS)?;
    Ok(Frame {
        topic: topic.to_string(),
        number,
        source: ImageSource::from_bytes(png),
        fallback: catalog_layout(),
    })
}

/// Solid opaque frame of `rgb` with fully transparent `cutouts`, encoded as PNG.
pub fn render_solid_frame(
    size: FrameSize,
    rgb: [u8; 3],
    cutouts: &[Region],
) -> PhotostripResult<Vec<u8>> {
    for c in cutouts {
        if !c.fits_within(size) {
            return Err(PhotostripError::validation(format!(
                "cutout {c:?} lies outside the {}x{} frame",
                size.width, size.height
            )));
        }
    }
    let [r, g, b] = rgb;
    let mut img =
        image::RgbaImage::from_pixel(size.width, size.height, image::Rgba([r, g, b, 255]));
    for c in cutouts {
        for y in c.y..c.bottom() {
            for x in c.x..c.right() {
                img.put_pixel(x, y, image::Rgba([0, 0, 0, 0]));
            }
        }
    }
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .context("encode frame png")?;
    Ok(buf)
}

#[cfg(test)]
#[path = "../../tests/unit/frame/catalog.rs"]
mod tests;
