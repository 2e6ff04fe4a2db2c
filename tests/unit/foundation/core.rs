use super::*;

#[test]
fn region_rejects_zero_extents() {
    assert!(Region::new(0, 0, 0, 10).is_err());
    assert!(Region::new(0, 0, 10, 0).is_err());
    assert!(Region::new(u32::MAX, 0, 2, 2).is_err());
    assert!(Region::new(5, 5, 1, 1).is_ok());
}

#[test]
fn region_edges_and_area() {
    let r = Region::new(50, 120, 500, 280).unwrap();
    assert_eq!(r.right(), 550);
    assert_eq!(r.bottom(), 400);
    assert_eq!(r.area(), 140_000);
    assert!(r.contains(50, 120));
    assert!(r.contains(549, 399));
    assert!(!r.contains(550, 200));
    assert!(!r.contains(100, 400));
}

#[test]
fn region_fits_within_frame_bounds() {
    let size = FrameSize::new(600, 1440).unwrap();
    assert!(Region::new(50, 1020, 500, 280).unwrap().fits_within(size));
    assert!(Region::new(0, 0, 600, 1440).unwrap().fits_within(size));
    assert!(!Region::new(101, 0, 500, 10).unwrap().fits_within(size));
    assert!(!Region::new(0, 1400, 10, 41).unwrap().fits_within(size));
}

#[test]
fn region_rect_matches_integer_bounds() {
    let rect = Region::new(2, 3, 4, 5).unwrap().to_rect();
    assert_eq!(rect.x0, 2.0);
    assert_eq!(rect.y0, 3.0);
    assert_eq!(rect.x1, 6.0);
    assert_eq!(rect.y1, 8.0);
}

#[test]
fn frame_size_rejects_empty() {
    assert!(FrameSize::new(0, 1).is_err());
    assert!(FrameSize::new(1, 0).is_err());
    assert_eq!(FrameSize::new(600, 1440).unwrap().pixel_count(), 864_000);
}

#[test]
fn region_serde_uses_short_field_names() {
    let r = Region::new(1, 2, 3, 4).unwrap();
    let json = serde_json::to_value(r).unwrap();
    assert_eq!(json, serde_json::json!({ "x": 1, "y": 2, "w": 3, "h": 4 }));
}
