//! Photo-strip frame layout detection and compositing.
//!
//! - Detect the transparent photo slots of a frame with [`analyze_frame`]
//! - Merge captured photos into the frame with [`merge_photos`] or a [`Compositor`]
//! - Hand the resulting [`Composite`] (PNG bytes plus data URL) to a [`CompositeSink`]
#![forbid(unsafe_code)]

mod assets;
mod config;
mod encode;
mod foundation;
mod frame;
mod layout;
mod render;

pub use crate::assets::decode::{PreparedImage, decode_image, load_image};
pub use crate::assets::source::ImageSource;
pub use crate::config::PhotostripConfig;
pub use crate::encode::png::{Composite, PNG_MIME, encode_composite, encode_png, png_data_url};
pub use crate::encode::sink::{CompositeSink, DirSink, InMemorySink, SinkMeta};
pub use crate::foundation::core::{FrameSize, Rect, Region, SlotIndex};
pub use crate::foundation::error::{PhotostripError, PhotostripResult};
pub use crate::frame::capture::CaptureRun;
pub use crate::frame::catalog::{
    CATALOG_COORDS, CATALOG_FRAME_SIZE, DEFAULT_SHOT_COUNT, Frame, LayoutOrigin, ResolvedLayout,
    builtin_catalog, catalog_frame, catalog_layout, render_solid_frame,
};
pub use crate::layout::analyzer::{
    AnalyzerOpts, DEFAULT_ALPHA_THRESHOLD, DEFAULT_EDGE_MARGIN, DEFAULT_MAX_HEIGHT_RATIO,
    DEFAULT_MAX_REGIONS, DEFAULT_MIN_SIZE_RATIO, LayoutResult, analyze_frame, analyze_image,
};
pub use crate::render::composite::{PHOTO_FILTER, draw_placed, over, over_in_place};
pub use crate::render::fit::{FitPolicy, Placement, place};
pub use crate::render::merge::{Compositor, CompositorOpts, merge_photos};
pub use crate::render::surface::{
    DEFAULT_MAX_SURFACE_PIXELS, FreshSurfaces, Surface, SurfaceFactory,
};
