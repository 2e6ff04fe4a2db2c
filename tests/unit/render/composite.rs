use std::sync::Arc;

use super::*;
use crate::{
    foundation::core::{FrameSize, Rect, Region},
    render::fit::{FitPolicy, place},
};

const RED: [u8; 4] = [255, 0, 0, 255];
const GREEN: [u8; 4] = [0, 255, 0, 255];
const BLUE: [u8; 4] = [0, 0, 255, 255];

fn solid(w: u32, h: u32, px: [u8; 4]) -> PreparedImage {
    let mut data = Vec::with_capacity((w * h * 4) as usize);
    for _ in 0..w * h {
        data.extend_from_slice(&px);
    }
    PreparedImage {
        width: w,
        height: h,
        rgba8_premul: Arc::new(data),
    }
}

/// Columns `[0, a)` red, `[a, w - a)` green, `[w - a, w)` blue.
fn banded(w: u32, h: u32, a: u32) -> PreparedImage {
    let mut data = Vec::with_capacity((w * h * 4) as usize);
    for _y in 0..h {
        for x in 0..w {
            let px = if x < a {
                RED
            } else if x >= w - a {
                BLUE
            } else {
                GREEN
            };
            data.extend_from_slice(&px);
        }
    }
    PreparedImage {
        width: w,
        height: h,
        rgba8_premul: Arc::new(data),
    }
}

fn surface(w: u32, h: u32) -> Surface {
    Surface::new(FrameSize::new(w, h).unwrap()).unwrap()
}

#[test]
fn over_src_alpha_0_is_noop() {
    let dst = [10, 20, 30, 40];
    assert_eq!(over(dst, [255, 255, 255, 0]), dst);
}

#[test]
fn over_src_opaque_replaces_dst() {
    assert_eq!(over([0, 0, 0, 255], RED), RED);
}

#[test]
fn over_half_alpha_blends() {
    // 50% white over opaque black.
    let out = over([0, 0, 0, 255], [128, 128, 128, 128]);
    assert_eq!(out, [128, 128, 128, 255]);
}

#[test]
fn over_in_place_rejects_mismatched_lengths() {
    let mut dst = vec![0u8; 8];
    assert!(over_in_place(&mut dst, &[0u8; 4]).is_err());
}

#[test]
fn cover_crop_is_centered() {
    // 200x100 photo into a 100x100 slot: 50 columns trimmed from each side.
    let photo = banded(200, 100, 50);
    let slot = Region::new(10, 10, 100, 100).unwrap();
    let mut s = surface(120, 120);
    draw_placed(&mut s, &photo, place(FitPolicy::Cover, slot, 200, 100)).unwrap();

    for (x, y) in [(10, 10), (109, 10), (10, 109), (109, 109), (60, 60)] {
        assert_eq!(s.pixel(x, y), Some(GREEN), "pixel ({x},{y})");
    }
}

#[test]
fn drawing_never_leaves_the_clip() {
    let photo = banded(200, 100, 50);
    let slot = Region::new(10, 10, 100, 100).unwrap();
    let mut s = surface(120, 120);
    draw_placed(&mut s, &photo, place(FitPolicy::Cover, slot, 200, 100)).unwrap();

    for (x, y) in [(9, 50), (110, 50), (50, 9), (50, 110), (0, 0), (119, 119)] {
        assert_eq!(s.pixel(x, y), Some([0, 0, 0, 0]), "pixel ({x},{y})");
    }
}

#[test]
fn stretch_shows_the_whole_photo() {
    let photo = banded(200, 100, 50);
    let slot = Region::new(0, 0, 100, 100).unwrap();
    let mut s = surface(100, 100);
    draw_placed(&mut s, &photo, place(FitPolicy::Stretch, slot, 200, 100)).unwrap();

    // Bands are 25px wide after halving the width; sample away from the blend.
    assert_eq!(s.pixel(5, 50), Some(RED));
    assert_eq!(s.pixel(50, 50), Some(GREEN));
    assert_eq!(s.pixel(94, 50), Some(BLUE));
}

#[test]
fn upscaled_solid_photo_keeps_its_color() {
    let photo = solid(16, 9, [40, 80, 120, 255]);
    let slot = Region::new(4, 4, 50, 30).unwrap();
    let mut s = surface(60, 40);
    draw_placed(&mut s, &photo, place(FitPolicy::Cover, slot, 16, 9)).unwrap();
    for (x, y) in [(4, 4), (53, 4), (4, 33), (53, 33), (30, 20)] {
        let px = s.pixel(x, y).unwrap();
        for c in 0..3 {
            assert!(
                px[c].abs_diff([40, 80, 120][c]) <= 1,
                "pixel ({x},{y}) = {px:?}"
            );
        }
        assert_eq!(px[3], 255);
    }
    assert_eq!(s.pixel(3, 3), Some([0, 0, 0, 0]));
    assert_eq!(s.pixel(54, 34), Some([0, 0, 0, 0]));
}

#[test]
fn placement_outside_surface_is_clipped() {
    let photo = solid(10, 10, RED);
    let mut s = surface(20, 20);
    let placement = Placement {
        dest: Rect::new(15.0, 15.0, 25.0, 25.0),
        clip: Region::new(15, 15, 10, 10).unwrap(),
    };
    draw_placed(&mut s, &photo, placement).unwrap();
    assert_eq!(s.pixel(19, 19), Some(RED));
    assert_eq!(s.pixel(14, 14), Some([0, 0, 0, 0]));
}

#[test]
fn unscaled_window_copies_source_pixels_exactly() {
    // 4x4 photo, every pixel distinct; dest hangs one pixel off the top-left so only
    // source pixels (1..3, 1..3) are visible, at 1:1 scale.
    let mut data = Vec::with_capacity(64);
    for y in 0..4u8 {
        for x in 0..4u8 {
            data.extend_from_slice(&[x * 60, y * 60, 7, 255]);
        }
    }
    let photo = PreparedImage {
        width: 4,
        height: 4,
        rgba8_premul: Arc::new(data),
    };
    let mut s = surface(2, 2);
    let placement = Placement {
        dest: Rect::new(-1.0, -1.0, 3.0, 3.0),
        clip: Region::new(0, 0, 2, 2).unwrap(),
    };
    draw_placed(&mut s, &photo, placement).unwrap();
    assert_eq!(s.pixel(0, 0), Some([60, 60, 7, 255]));
    assert_eq!(s.pixel(1, 0), Some([120, 60, 7, 255]));
    assert_eq!(s.pixel(0, 1), Some([60, 120, 7, 255]));
    assert_eq!(s.pixel(1, 1), Some([120, 120, 7, 255]));
}
