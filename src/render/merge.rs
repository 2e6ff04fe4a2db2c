//! Photo-strip compositing.
//!
//! Photos are drawn first, each into its slot, then the frame is laid over the top so its
//! opaque artwork masks slot edges and its transparent cutouts reveal the photos.

use rayon::prelude::*;

use crate::{
    assets::{
        decode::{PreparedImage, load_image},
        source::ImageSource,
    },
    encode::png::{Composite, encode_composite},
    foundation::{
        core::{Region, SlotIndex},
        error::{PhotostripError, PhotostripResult},
    },
    render::{
        composite::{draw_placed, over_in_place},
        fit::{FitPolicy, place},
        surface::{FreshSurfaces, Surface, SurfaceFactory},
    },
};

/// Compositor configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct CompositorOpts {
    /// How photos are fit into slots.
    pub fit: FitPolicy,
    /// Decode the frame and photos on the rayon pool instead of one after another.
    pub parallel_decode: bool,
}

impl Default for CompositorOpts {
    fn default() -> Self {
        Self {
            fit: FitPolicy::Cover,
            parallel_decode: true,
        }
    }
}

/// Merges captured photos into a frame.
///
/// Each call draws into its own surface obtained from the factory.
#[derive(Debug, Default)]
pub struct Compositor<F = FreshSurfaces> {
    factory: F,
    opts: CompositorOpts,
}

impl Compositor<FreshSurfaces> {
    pub fn new(opts: CompositorOpts) -> Self {
        Self::with_factory(FreshSurfaces::default(), opts)
    }
}

impl<F: SurfaceFactory> Compositor<F> {
    pub fn with_factory(factory: F, opts: CompositorOpts) -> Self {
        Self { factory, opts }
    }

    pub fn opts(&self) -> CompositorOpts {
        self.opts
    }

    pub fn factory(&self) -> &F {
        &self.factory
    }

    /// Decode everything, composite, and encode to PNG.
    ///
    /// `photos[i]` goes into `regions[i]`. Slots without a photo stay empty; photos without a
    /// slot are ignored. Any decode or encode failure fails the whole merge.
    #[tracing::instrument(skip_all, fields(photos = photos.len(), regions = regions.len()))]
    pub fn merge(
        &self,
        photos: &[ImageSource],
        frame: &ImageSource,
        regions: &[Region],
    ) -> PhotostripResult<Composite> {
        let (frame_img, photo_imgs) = self
            .decode_all(photos, frame)
            .map_err(PhotostripError::into_composition)?;
        let surface = self.compose(&photo_imgs, &frame_img, regions)?;
        let out = encode_composite(&surface).map_err(PhotostripError::into_composition)?;
        tracing::info!(
            width = out.width,
            height = out.height,
            bytes = out.blob.len(),
            "merged photo strip"
        );
        Ok(out)
    }

    /// Composite already-decoded images into a fresh frame-sized surface.
    pub fn compose(
        &self,
        photos: &[PreparedImage],
        frame: &PreparedImage,
        regions: &[Region],
    ) -> PhotostripResult<Surface> {
        let size = frame.size();
        for (i, r) in regions.iter().enumerate() {
            if !r.fits_within(size) {
                return Err(PhotostripError::validation(format!(
                    "slot {i} {r:?} lies outside the {}x{} frame",
                    size.width, size.height
                )));
            }
        }
        if photos.len() > regions.len() {
            tracing::debug!(
                extra = photos.len() - regions.len(),
                "ignoring photos without a slot"
            );
        }

        let mut surface = self.factory.create(size)?;
        if surface.size() != size {
            return Err(PhotostripError::composition(
                "surface factory returned a surface of the wrong size",
            ));
        }

        for (i, region) in regions.iter().copied().enumerate() {
            let slot = SlotIndex(i);
            let Some(photo) = photos.get(slot.0) else {
                tracing::debug!(slot = slot.0, "slot left empty");
                continue;
            };
            let placement = place(self.opts.fit, region, photo.width, photo.height);
            draw_placed(&mut surface, photo, placement)?;
        }

        over_in_place(surface.data_mut(), &frame.rgba8_premul)?;
        Ok(surface)
    }

    fn decode_all(
        &self,
        photos: &[ImageSource],
        frame: &ImageSource,
    ) -> PhotostripResult<(PreparedImage, Vec<PreparedImage>)> {
        if !self.opts.parallel_decode {
            let frame_img = load_image(frame)?;
            let photo_imgs = photos
                .iter()
                .map(load_image)
                .collect::<PhotostripResult<Vec<_>>>()?;
            return Ok((frame_img, photo_imgs));
        }

        let (frame_img, photo_imgs) = rayon::join(
            || load_image(frame),
            || {
                photos
                    .par_iter()
                    .map(load_image)
                    .collect::<PhotostripResult<Vec<_>>>()
            },
        );
        Ok((frame_img?, photo_imgs?))
    }
}

/// One-shot merge with a fresh compositor.
pub fn merge_photos(
    photos: &[ImageSource],
    frame: &ImageSource,
    regions: &[Region],
    opts: CompositorOpts,
) -> PhotostripResult<Composite> {
    Compositor::new(opts).merge(photos, frame, regions)
}
