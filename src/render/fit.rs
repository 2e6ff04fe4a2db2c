use crate::foundation::core::{Rect, Region};

/// How a photo is mapped onto its slot.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FitPolicy {
    /// Scale preserving aspect ratio until the slot is covered, crop the overflow evenly on
    /// both sides, and clip to the slot.
    #[default]
    Cover,
    /// Stretch to the slot's exact bounds, ignoring aspect ratio.
    Stretch,
}

/// Where a photo lands on the output surface.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Placement {
    /// Destination of the full photo, in surface pixels. May extend past the slot.
    pub dest: Rect,
    /// Drawing is restricted to this region.
    pub clip: Region,
}

/// Compute where a `photo_w` x `photo_h` photo is drawn for `slot`.
pub fn place(policy: FitPolicy, slot: Region, photo_w: u32, photo_h: u32) -> Placement {
    let dest = match policy {
        FitPolicy::Stretch => slot.to_rect(),
        FitPolicy::Cover => cover_rect(slot, photo_w, photo_h),
    };
    Placement { dest, clip: slot }
}

fn cover_rect(slot: Region, photo_w: u32, photo_h: u32) -> Rect {
    if photo_w == 0 || photo_h == 0 {
        return slot.to_rect();
    }
    let (sx, sy) = (f64::from(slot.x), f64::from(slot.y));
    let (sw, sh) = (f64::from(slot.w), f64::from(slot.h));
    let photo_ratio = f64::from(photo_w) / f64::from(photo_h);

    if photo_ratio > slot.aspect() {
        // Wider than the slot: match heights, crop left and right.
        let draw_w = sh * photo_ratio;
        let x0 = sx + (sw - draw_w) / 2.0;
        Rect::new(x0, sy, x0 + draw_w, sy + sh)
    } else {
        // Taller (or equal): match widths, crop top and bottom.
        let draw_h = sw / photo_ratio;
        let y0 = sy + (sh - draw_h) / 2.0;
        Rect::new(sx, y0, sx + sw, y0 + draw_h)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/fit.rs"]
mod tests;
