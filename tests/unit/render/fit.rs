use super::*;

fn slot(x: u32, y: u32, w: u32, h: u32) -> Region {
    Region::new(x, y, w, h).unwrap()
}

#[test]
fn cover_16_9_photo_in_catalog_slot_crops_top_and_bottom_evenly() {
    // 1280x720 is slightly taller than a 500x280 slot, so widths match.
    let p = place(FitPolicy::Cover, slot(50, 120, 500, 280), 1280, 720);
    assert_eq!(p.dest.x0, 50.0);
    assert_eq!(p.dest.x1, 550.0);
    assert!((p.dest.height() - 281.25).abs() < 1e-9);
    let top = 120.0 - p.dest.y0;
    let bottom = p.dest.y1 - 400.0;
    assert!((top - 0.625).abs() < 1e-9);
    assert!((top - bottom).abs() < 1e-9);
    assert_eq!(p.clip, slot(50, 120, 500, 280));
}

#[test]
fn cover_wide_photo_matches_height_and_centers_horizontally() {
    let p = place(FitPolicy::Cover, slot(0, 0, 100, 50), 400, 100);
    assert_eq!(p.dest.y0, 0.0);
    assert_eq!(p.dest.y1, 50.0);
    assert_eq!(p.dest.x0, -50.0);
    assert_eq!(p.dest.x1, 150.0);
}

#[test]
fn cover_tall_photo_matches_width_and_centers_vertically() {
    let p = place(FitPolicy::Cover, slot(0, 0, 100, 100), 100, 400);
    assert_eq!(p.dest.x0, 0.0);
    assert_eq!(p.dest.x1, 100.0);
    assert_eq!(p.dest.y0, -150.0);
    assert_eq!(p.dest.y1, 250.0);
}

#[test]
fn cover_wider_photo_crops_sides_equally() {
    let p = place(FitPolicy::Cover, slot(10, 10, 100, 100), 200, 100);
    assert_eq!(p.dest, Rect::new(-40.0, 10.0, 160.0, 110.0));
    assert_eq!(10.0 - p.dest.x0, p.dest.x1 - 110.0);
}

#[test]
fn cover_same_aspect_fills_exactly() {
    let p = place(FitPolicy::Cover, slot(5, 6, 40, 20), 400, 200);
    assert_eq!(p.dest, Rect::new(5.0, 6.0, 45.0, 26.0));
}

#[test]
fn stretch_uses_slot_bounds() {
    let p = place(FitPolicy::Stretch, slot(50, 420, 500, 280), 100, 300);
    assert_eq!(p.dest, Rect::new(50.0, 420.0, 550.0, 700.0));
    assert_eq!(p.clip, slot(50, 420, 500, 280));
}

#[test]
fn policy_serde_is_snake_case_and_defaults_to_cover() {
    assert_eq!(FitPolicy::default(), FitPolicy::Cover);
    assert_eq!(
        serde_json::to_value(FitPolicy::Stretch).unwrap(),
        serde_json::json!("stretch")
    );
    let p: FitPolicy = serde_json::from_str("\"cover\"").unwrap();
    assert_eq!(p, FitPolicy::Cover);
}
