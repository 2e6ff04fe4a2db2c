use std::io::Cursor;

use anyhow::Context;
use base64::{Engine, engine::general_purpose::STANDARD as B64};

use crate::{foundation::error::PhotostripResult, render::surface::Surface};

pub const PNG_MIME: &str = "image/png";

/// A finished strip: PNG bytes plus the same bytes as a data URL.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Composite {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Encoded PNG.
    pub blob: Vec<u8>,
    /// `data:image/png;base64,...` of `blob`.
    pub data_url: String,
}

impl Composite {
    pub fn mime(&self) -> &'static str {
        PNG_MIME
    }
}

/// Encode the surface as a straight-alpha RGBA PNG.
pub fn encode_png(surface: &Surface) -> PhotostripResult<Vec<u8>> {
    let rgba = surface.to_straight_rgba()?;
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(rgba)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .context("encode png")?;
    Ok(buf)
}

pub fn png_data_url(png: &[u8]) -> String {
    format!("data:{PNG_MIME};base64,{}", B64.encode(png))
}

/// Encode once and derive both representations from the same bytes.
pub fn encode_composite(surface: &Surface) -> PhotostripResult<Composite> {
    let blob = encode_png(surface)?;
    let data_url = png_data_url(&blob);
    Ok(Composite {
        width: surface.width(),
        height: surface.height(),
        blob,
        data_url,
    })
}
