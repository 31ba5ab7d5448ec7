use ductkit_core::{LayoutError, Point};
use ductkit_designer::{
    measured_fixed_length, resize_duct_to_distance, AnchorRef, Dimension, DuctPart, Elbow90,
    LayoutSnapshot, Part, PartKind, PartStore, ResizeRequest, StraightDuct,
};

fn grouped(mut part: Part) -> Part {
    part.group_id = 1;
    part
}

fn duct(id: u64, x: f64, length: f64) -> Part {
    grouped(Part::new(
        id,
        Point::new(x, 0.0),
        200.0,
        PartKind::StraightDuct(StraightDuct::new(length)),
    ))
}

/// elbow(1) + duct(2) + duct(3) + elbow(4), upstream elbow leg ending at 0.
fn layout() -> LayoutSnapshot {
    let mut upstream = Part::new(
        1,
        Point::new(-150.0, 0.0),
        200.0,
        PartKind::Elbow90(Elbow90::new(150.0)),
    )
    .with_rotation(180.0);
    upstream.flip();
    let downstream = Part::new(
        4,
        Point::new(950.0, 0.0),
        200.0,
        PartKind::Elbow90(Elbow90::new(150.0)),
    );
    LayoutSnapshot::new(
        PartStore::from_parts(vec![
            grouped(upstream),
            duct(2, 200.0, 400.0),
            duct(3, 600.0, 400.0),
            grouped(downstream),
        ]),
        Vec::new(),
    )
}

fn request(total: f64, subtract: f64) -> ResizeRequest {
    ResizeRequest {
        duct_id: 2,
        total_distance: total,
        length_to_subtract: subtract,
        anchor_point: AnchorRef::intersection(1, "corner"),
        far_point: AnchorRef::connector(3, 1),
    }
}

#[test]
fn test_layout_is_joined() {
    let snapshot = layout();
    let elbow = snapshot.parts.get(1).unwrap();
    let c0 = elbow.connector(0).unwrap();
    assert!(c0.position.distance_to(&Point::ORIGIN) < 1e-9);
}

#[test]
fn test_resize_to_800_shifts_downstream_by_400() {
    let before = layout();
    let after = resize_duct_to_distance(&before, &request(1000.0, 200.0)).unwrap();

    let resized = after.parts.get(2).unwrap();
    assert_eq!(resized.straight_length(), Some(800.0));
    // anchor end stays at the origin
    let anchor_end = resized.connector(0).unwrap().position;
    assert!(anchor_end.distance_to(&Point::ORIGIN) < 1e-9);

    for id in [3, 4] {
        let old = before.parts.get(id).unwrap().position;
        let new = after.parts.get(id).unwrap().position;
        assert!((new.x - old.x - 400.0).abs() < 1e-9, "part {}", id);
        assert!((new.y - old.y).abs() < 1e-9);
    }
    // upstream elbow does not move
    assert_eq!(
        after.parts.get(1).unwrap().position,
        before.parts.get(1).unwrap().position
    );
}

#[test]
fn test_negative_length_fails_without_mutation() {
    let before = layout();
    let snapshot_copy = before.clone();
    let err = resize_duct_to_distance(&before, &request(100.0, 200.0)).unwrap_err();
    assert!(err.is_validation_error());
    assert!(matches!(
        err,
        LayoutError::NegativeLength { final_length, .. } if final_length == -100.0
    ));
    assert_eq!(before, snapshot_copy);
}

#[test]
fn test_anchor_at_far_end_moves_the_other_way() {
    let before = layout();
    let req = ResizeRequest {
        duct_id: 3,
        total_distance: 600.0,
        length_to_subtract: 0.0,
        anchor_point: AnchorRef::connector(4, 0),
        far_point: AnchorRef::connector(3, 0),
    };
    let after = resize_duct_to_distance(&before, &req).unwrap();
    // duct 3 keeps its right end at 800 and grows left to 200
    let resized = after.parts.get(3).unwrap();
    assert!((resized.position.x - 500.0).abs() < 1e-9);
    // duct 2 and the upstream elbow shift left by 200
    assert!((after.parts.get(2).unwrap().position.x - 0.0).abs() < 1e-9);
    assert!((after.parts.get(1).unwrap().position.x + 350.0).abs() < 1e-9);
    assert_eq!(after.parts.get(4).unwrap().position.x, 950.0);
}

#[test]
fn test_zero_length_duct_uses_rotation() {
    let snapshot = LayoutSnapshot::new(
        PartStore::from_parts(vec![duct(1, 0.0, 0.0)]),
        Vec::new(),
    );
    let req = ResizeRequest {
        duct_id: 1,
        total_distance: 300.0,
        length_to_subtract: 0.0,
        anchor_point: AnchorRef::connector(1, 0),
        far_point: AnchorRef::connector(1, 1),
    };
    let after = resize_duct_to_distance(&snapshot, &req).unwrap();
    let part = after.parts.get(1).unwrap();
    assert!((part.position.x - 150.0).abs() < 1e-9);
    assert_eq!(part.straight_length(), Some(300.0));
}

#[test]
fn test_user_dimensions_are_rederived() {
    let mut before = layout();
    let across = Dimension::new(
        AnchorRef::intersection(1, "corner"),
        AnchorRef::intersection(4, "corner"),
        0.0,
    );
    let orphan = Dimension::new(AnchorRef::connector(99, 0), AnchorRef::connector(2, 0), 5.0);
    before.dimensions = vec![across.clone(), orphan.clone()];

    let after = resize_duct_to_distance(&before, &request(1000.0, 200.0)).unwrap();
    let across_after = after.dimension(&across.id).unwrap();
    // corner to corner: -150 to 1350
    assert!((across_after.value - 1500.0).abs() < 1e-9);
    assert_eq!(after.dimension(&orphan.id).unwrap().value, 5.0);
    // the measured pair is recorded as a new user dimension
    assert_eq!(after.dimensions.len(), 3);
    assert_eq!(after.dimensions[2].value, 1000.0);
    assert!(!after.dimensions[2].is_straight_run);
}

#[test]
fn test_missing_anchor_is_reported() {
    let before = layout();
    let mut req = request(1000.0, 200.0);
    req.anchor_point = AnchorRef::intersection(2, "corner");
    assert!(matches!(
        resize_duct_to_distance(&before, &req),
        Err(LayoutError::AnchorNotFound { part_id: 2, .. })
    ));
}

#[test]
fn test_fixed_length_feeds_request() {
    let before = layout();
    let anchor = AnchorRef::intersection(1, "corner");
    let far = AnchorRef::connector(3, 1);
    let fixed = measured_fixed_length(&before.parts, 2, &anchor, &far).unwrap();
    // corner at -150, far end at 800: 950 measured, 400 of it is duct 2
    assert!((fixed - 550.0).abs() < 1e-9);

    let req = ResizeRequest {
        duct_id: 2,
        total_distance: 1250.0,
        length_to_subtract: fixed,
        anchor_point: anchor,
        far_point: far,
    };
    let after = resize_duct_to_distance(&before, &req).unwrap();
    assert_eq!(after.parts.get(2).unwrap().straight_length(), Some(700.0));
}
