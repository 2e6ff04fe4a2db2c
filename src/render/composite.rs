use image::{ImageBuffer, Rgba, imageops};

use crate::{
    assets::decode::PreparedImage,
    foundation::{
        error::{PhotostripError, PhotostripResult},
        math::mul_div255_u8,
    },
    render::{fit::Placement, surface::Surface},
};

pub type PremulRgba8 = [u8; 4];

/// Resampling filter used when a photo is scaled into its slot.
pub const PHOTO_FILTER: imageops::FilterType = imageops::FilterType::Triangle;

/// Source-over for premultiplied pixels.
pub fn over(dst: PremulRgba8, src: PremulRgba8) -> PremulRgba8 {
    let sa = u16::from(src[3]);
    if sa == 0 {
        return dst;
    }
    if sa == 255 {
        return src;
    }
    let inv = 255u16 - sa;
    let mut out = [0u8; 4];
    out[3] = src[3].saturating_add(mul_div255_u8(u16::from(dst[3]), inv));
    for i in 0..3 {
        out[i] = src[i].saturating_add(mul_div255_u8(u16::from(dst[i]), inv));
    }
    out
}

pub fn over_in_place(dst: &mut [u8], src: &[u8]) -> PhotostripResult<()> {
    if dst.len() != src.len() || !dst.len().is_multiple_of(4) {
        return Err(PhotostripError::composition(
            "over_in_place expects equal-length rgba8 buffers",
        ));
    }
    for (d, s) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
        let out = over([d[0], d[1], d[2], d[3]], [s[0], s[1], s[2], s[3]]);
        d.copy_from_slice(&out);
    }
    Ok(())
}

/// Draw `photo` into `surface` at `placement.dest`, touching only pixels inside
/// `placement.clip` and the surface bounds.
///
/// Only the part of the photo that ends up visible is resampled.
pub fn draw_placed(
    surface: &mut Surface,
    photo: &PreparedImage,
    placement: Placement,
) -> PhotostripResult<()> {
    if photo.width == 0 || photo.height == 0 {
        return Err(PhotostripError::composition("photo has empty dimensions"));
    }
    let dx0 = placement.dest.x0.round() as i64;
    let dy0 = placement.dest.y0.round() as i64;
    let dest_w = (placement.dest.x1.round() as i64 - dx0).max(1);
    let dest_h = (placement.dest.y1.round() as i64 - dy0).max(1);

    let clip = placement.clip;
    let vx0 = dx0.max(i64::from(clip.x)).max(0);
    let vy0 = dy0.max(i64::from(clip.y)).max(0);
    let vx1 = (dx0 + dest_w)
        .min(i64::from(clip.right()))
        .min(i64::from(surface.width()));
    let vy1 = (dy0 + dest_h)
        .min(i64::from(clip.bottom()))
        .min(i64::from(surface.height()));
    if vx0 >= vx1 || vy0 >= vy1 {
        return Ok(());
    }

    let (pw, ph) = (photo.width, photo.height);
    let scale_x = f64::from(pw) / dest_w as f64;
    let scale_y = f64::from(ph) / dest_h as f64;
    let (sx0, sx1) = source_span(vx0 - dx0, vx1 - dx0, scale_x, pw);
    let (sy0, sy1) = source_span(vy0 - dy0, vy1 - dy0, scale_y, ph);

    let src = ImageBuffer::<Rgba<u8>, &[u8]>::from_raw(pw, ph, photo.rgba8_premul.as_slice())
        .ok_or_else(|| {
            PhotostripError::composition("photo buffer does not match its size")
        })?;
    let (ww, wh) = (sx1 - sx0, sy1 - sy0);
    let window: ImageBuffer<Rgba<u8>, Vec<u8>> =
        ImageBuffer::from_fn(ww, wh, |x, y| *src.get_pixel(sx0 + x, sy0 + y));

    let (vw, vh) = ((vx1 - vx0) as u32, (vy1 - vy0) as u32);
    let scaled = if window.dimensions() == (vw, vh) {
        window
    } else {
        imageops::resize(&window, vw, vh, PHOTO_FILTER)
    };

    blit_over(surface, &scaled, vx0 as u32, vy0 as u32);
    Ok(())
}

/// Map a visible destination span back to whole source pixels.
fn source_span(d0: i64, d1: i64, scale: f64, limit: u32) -> (u32, u32) {
    let lo = ((d0 as f64) * scale)
        .floor()
        .clamp(0.0, f64::from(limit - 1)) as u32;
    let hi = ((d1 as f64) * scale).ceil().clamp(0.0, f64::from(limit)) as u32;
    (lo, hi.max(lo + 1))
}

fn blit_over(surface: &mut Surface, src: &ImageBuffer<Rgba<u8>, Vec<u8>>, x: u32, y: u32) {
    let sw = surface.width() as usize;
    let (w, h) = src.dimensions();
    let data = surface.data_mut();
    for row in 0..h {
        let dst_start = ((y + row) as usize * sw + x as usize) * 4;
        let src_start = (row * w) as usize * 4;
        let len = w as usize * 4;
        let dst_row = &mut data[dst_start..dst_start + len];
        let src_row = &src.as_raw()[src_start..src_start + len];
        for (d, s) in dst_row.chunks_exact_mut(4).zip(src_row.chunks_exact(4)) {
            let out = over([d[0], d[1], d[2], d[3]], [s[0], s[1], s[2], s[3]]);
            d.copy_from_slice(&out);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/composite.rs"]
mod tests;
