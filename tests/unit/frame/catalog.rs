use super::*;

#[test]
fn catalog_has_three_numbered_frames() {
    let frames = builtin_catalog().unwrap();
    let names: Vec<_> = frames
        .iter()
        .map(|f| (f.topic.as_str(), f.number))
        .collect();
    assert_eq!(
        names,
        vec![("Classic Black", 1), ("Vibrant Red", 2), ("Sunny Yellow", 3)]
    );
}

#[test]
fn analyzer_recovers_catalog_coords_from_rendered_art() {
    for frame in builtin_catalog().unwrap() {
        let resolved = frame.resolve_layout(&AnalyzerOpts::default());
        assert_eq!(resolved.origin, LayoutOrigin::Analyzed, "{}", frame.topic);
        assert_eq!(resolved.layout, catalog_layout(), "{}", frame.topic);
        assert_eq!(resolved.shot_count(), 4);
    }
}

#[test]
fn undecodable_frame_falls_back() {
    let frame = Frame::custom("Broken", 9, ImageSource::from_bytes(b"nope".to_vec()));
    let resolved = frame.resolve_layout(&AnalyzerOpts::default());
    assert_eq!(resolved.origin, LayoutOrigin::Fallback);
    assert_eq!(resolved.layout.coords, CATALOG_COORDS.to_vec());
    assert_eq!(resolved.layout.size(), CATALOG_FRAME_SIZE);
}

#[test]
fn frame_without_cutouts_falls_back_at_its_own_size() {
    let size = FrameSize::new(60, 144).unwrap();
    let png = render_solid_frame(size, [1, 2, 3], &[]).unwrap();
    let frame = Frame::custom("Plain", 7, ImageSource::from_bytes(png));
    let resolved = frame.resolve_layout(&AnalyzerOpts::default());
    assert_eq!(resolved.origin, LayoutOrigin::Fallback);
    assert_eq!(resolved.layout.size(), size);
    assert_eq!(
        resolved.layout.coords,
        vec![
            Region::new(5, 12, 50, 28).unwrap(),
            Region::new(5, 42, 50, 28).unwrap(),
            Region::new(5, 72, 50, 28).unwrap(),
            Region::new(5, 102, 50, 28).unwrap(),
        ]
    );
    assert!(resolved.layout.coords.iter().all(|r| r.fits_within(size)));
}


#[test]
fn two_slot_frame_needs_two_shots() {
    let cutouts = [
        Region::new(10, 10, 40, 40).unwrap(),
        Region::new(10, 70, 40, 40).unwrap(),
    ];
    let size = FrameSize::new(60, 144).unwrap();
    let png = render_solid_frame(size, [9, 9, 9], &cutouts).unwrap();
    let frame = Frame::custom("Duo", 5, ImageSource::from_bytes(png));
    let resolved = frame.resolve_layout(&AnalyzerOpts::default());
    assert_eq!(resolved.origin, LayoutOrigin::Analyzed);
    assert_eq!(resolved.layout.coords, cutouts.to_vec());
    assert_eq!(resolved.shot_count(), 2);
}

#[test]
fn empty_layout_defaults_to_four_shots() {
    let resolved = ResolvedLayout {
        layout: LayoutResult {
            coords: vec![],
            width: 10,
            height: 10,
        },
        origin: LayoutOrigin::Fallback,
    };
    assert_eq!(resolved.shot_count(), DEFAULT_SHOT_COUNT);
}

#[test]
fn catalog_lookup_by_number() {
    assert_eq!(catalog_frame(2).unwrap().topic, "Vibrant Red");
    assert!(matches!(
        catalog_frame(4),
        Err(PhotostripError::Validation(_))
    ));
}

#[test]
fn cutouts_must_fit_the_frame() {
    let bad = [Region::new(50, 50, 20, 20).unwrap()];
    let size = FrameSize::new(60, 60).unwrap();
    assert!(render_solid_frame(size, [0, 0, 0], &bad).is_err());
}
