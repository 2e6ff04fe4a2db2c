use std::sync::Arc;

use anyhow::Context;

use crate::{
    assets::source::ImageSource,
    foundation::{
        core::FrameSize,
        error::{PhotostripError, PhotostripResult},
    },
};

/// Decoded raster, premultiplied RGBA8, tightly packed row-major.
#[derive(Clone, Debug)]
pub struct PreparedImage {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// `width * height * 4` bytes.
    pub rgba8_premul: Arc<Vec<u8>>,
}

impl PreparedImage {
    /// Natural pixel dimensions.
    pub fn size(&self) -> FrameSize {
        FrameSize {
            width: self.width,
            height: self.height,
        }
    }

    /// Alpha of pixel `(x, y)`. Caller keeps coordinates in bounds.
    pub fn alpha_at(&self, x: u32, y: u32) -> u8 {
        let idx = ((y as usize) * (self.width as usize) + (x as usize)) * 4 + 3;
        self.rgba8_premul[idx]
    }

    /// Premultiplied pixel `(x, y)`. Caller keeps coordinates in bounds.
    pub fn pixel_at(&self, x: u32, y: u32) -> [u8; 4] {
        let idx = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        let px = &self.rgba8_premul[idx..idx + 4];
        [px[0], px[1], px[2], px[3]]
    }
}

pub fn decode_image(bytes: &[u8]) -> PhotostripResult<PreparedImage> {
    let dyn_img = image::load_from_memory(bytes).context("decode image from memory")?;
    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();
    if width == 0 || height == 0 {
        return Err(PhotostripError::validation(format!(
            "decoded image has empty dimensions {width}x{height}"
        )));
    }

    let mut rgba8_premul = rgba.into_raw();
    premultiply_rgba8_in_place(&mut rgba8_premul);

    Ok(PreparedImage {
        width,
        height,
        rgba8_premul: Arc::new(rgba8_premul),
    })
}

/// Load and decode the image behind `source`.
pub fn load_image(source: &ImageSource) -> PhotostripResult<PreparedImage> {
    let bytes = source.load_bytes()?;
    decode_image(&bytes).map_err(|e| match e {
        PhotostripError::Other(err) => {
            PhotostripError::Other(err.context(format!("load image {source}")))
        }
        other => other,
    })
}

pub(crate) fn premultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3] as u16;
        if a == 0 {
            px[0] = 0;
            px[1] = 0;
            px[2] = 0;
            continue;
        }
        px[0] = ((px[0] as u16 * a + 127) / 255) as u8;
        px[1] = ((px[1] as u16 * a + 127) / 255) as u8;
        px[2] = ((px[2] as u16 * a + 127) / 255) as u8;
    }
}
