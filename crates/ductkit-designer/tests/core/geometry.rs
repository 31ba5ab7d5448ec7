use ductkit_core::Point;
use ductkit_designer::{
    create_part, AdjustableElbow, ConnectorRole, DuctPart, Elbow90, FittingDefaults, Part,
    PartKind, PartType, Reducer, StraightDuct, TeeReducer, YBranch,
};
use proptest::prelude::*;

fn part_of(part_type: PartType, position: Point, rotation: f64) -> Part {
    create_part(part_type.tag(), 1, position, &FittingDefaults::default())
        .unwrap()
        .with_rotation(rotation)
}

fn angle_diff(a: f64, b: f64) -> f64 {
    let d = (a - b).rem_euclid(360.0);
    d.min(360.0 - d)
}

fn assert_close(a: Point, b: Point) {
    assert!(
        a.distance_to(&b) < 1e-6,
        "expected {:?} to be close to {:?}",
        a,
        b
    );
}

#[test]
fn test_straight_duct_connectors_follow_rotation() {
    let part = Part::new(
        1,
        Point::new(100.0, 100.0),
        200.0,
        PartKind::StraightDuct(StraightDuct::new(400.0)),
    )
    .with_rotation(90.0);
    let c = part.connectors();
    assert_close(c[0].position, Point::new(100.0, -100.0));
    assert_close(c[1].position, Point::new(100.0, 300.0));
    assert!(angle_diff(c[0].angle, 270.0) < 1e-9);
    assert!(angle_diff(c[1].angle, 90.0) < 1e-9);
}

#[test]
fn test_elbow90_flip_mirrors_second_leg() {
    let mut part = Part::new(
        1,
        Point::ORIGIN,
        200.0,
        PartKind::Elbow90(Elbow90::new(150.0)),
    );
    assert_close(part.connectors()[1].position, Point::new(0.0, 150.0));
    part.flip();
    assert_close(part.connectors()[1].position, Point::new(0.0, -150.0));
    assert!(angle_diff(part.connectors()[1].angle, 270.0) < 1e-9);
    assert_close(part.intersection_point("corner").unwrap().position, Point::ORIGIN);
}

#[test]
fn test_reducer_flip_swaps_diameters() {
    let mut part = Part::new(
        1,
        Point::ORIGIN,
        200.0,
        PartKind::Reducer(Reducer::new(300.0, 160.0)),
    );
    assert_eq!(part.connectors()[0].diameter, 200.0);
    assert_eq!(part.connectors()[1].diameter, 160.0);
    part.flip();
    assert_eq!(part.diameter, 160.0);
    assert_eq!(part.connectors()[0].diameter, 160.0);
    assert_eq!(part.connectors()[1].diameter, 200.0);
}

#[test]
fn test_branch_connector_roles() {
    let mut tee = TeeReducer::new(400.0, 150.0, 160.0);
    tee.intersection_offset = 50.0;
    let part = Part::new(1, Point::ORIGIN, 200.0, PartKind::TeeReducer(tee));
    let c = part.connectors();
    assert_eq!(c.len(), 3);
    assert_eq!(c[0].role, Some(ConnectorRole::Main));
    assert_eq!(c[1].role, Some(ConnectorRole::Main));
    assert_eq!(c[2].role, Some(ConnectorRole::Branch));
    assert_eq!(c[2].diameter, 160.0);
    assert_close(c[2].position, Point::new(50.0, 150.0));
    assert_close(
        part.intersection_point("junction").unwrap().position,
        Point::new(50.0, 0.0),
    );
}

#[test]
fn test_y_branch_containment() {
    let part = Part::new(
        1,
        Point::ORIGIN,
        200.0,
        PartKind::YBranch(YBranch::new(400.0, 200.0, 45.0)),
    );
    assert!(part.contains_point(0.0, 0.0));
    assert!(part.contains_point(190.0, 90.0));
    // along the 45° take-off, outside the main rectangle
    let along = Point::from_angle(45.0) * 180.0;
    assert!(part.contains_point(along.x, along.y));
    assert!(!part.contains_point(-150.0, 150.0));
}

#[test]
fn test_bounds_enclose_connectors() {
    for t in PartType::ALL {
        let part = part_of(t, Point::new(30.0, -40.0), 30.0);
        let bounds = part.bounds();
        for c in part.connectors() {
            assert!(bounds.contains(c.position), "{} connector {}", t, c.id);
        }
    }
}

#[test]
fn test_default_rotate_step_cycles() {
    for t in PartType::ALL {
        if t == PartType::AdjustableElbow {
            continue;
        }
        let mut part = part_of(t, Point::ORIGIN, 0.0);
        part.rotate_step();
        assert_eq!(part.rotation, 45.0);
        for _ in 0..7 {
            part.rotate_step();
        }
        assert!(angle_diff(part.rotation, 0.0) < 1e-9, "{}", t);
    }
}

#[test]
fn test_adjustable_elbow_snaps_leg_to_grid() {
    let mut part = Part::new(
        1,
        Point::ORIGIN,
        200.0,
        PartKind::AdjustableElbow(AdjustableElbow::new(150.0, 60.0)),
    );
    // leg 0 starts at 330°, off the grid
    part.rotate_step();
    assert!(angle_diff(part.rotation, 30.0) < 1e-9);
    assert!(angle_diff(part.connectors()[0].angle, 0.0) < 1e-9);
    part.rotate_step();
    assert!(angle_diff(part.connectors()[0].angle, 45.0) < 1e-9);
}

#[test]
fn test_adjustable_elbow_on_grid_cycles() {
    let mut part = Part::new(
        1,
        Point::ORIGIN,
        200.0,
        PartKind::AdjustableElbow(AdjustableElbow::new(150.0, 90.0)),
    );
    for _ in 0..8 {
        part.rotate_step();
    }
    assert!(angle_diff(part.rotation, 0.0) < 1e-6);
}

fn any_part_type() -> impl Strategy<Value = PartType> {
    prop::sample::select(PartType::ALL.to_vec())
}

proptest! {
    #[test]
    fn flip_twice_restores_connectors(
        t in any_part_type(),
        x in -5000.0f64..5000.0,
        y in -5000.0f64..5000.0,
        rotation in 0.0f64..360.0,
    ) {
        let part = part_of(t, Point::new(x, y), rotation);
        let mut flipped = part.clone();
        flipped.flip();
        flipped.flip();
        prop_assert_eq!(flipped.connectors(), part.connectors());
        prop_assert_eq!(flipped.diameter, part.diameter);
    }

    #[test]
    fn eight_default_steps_restore_rotation(
        t in any_part_type().prop_filter("fixed step only", |t| *t != PartType::AdjustableElbow),
        rotation in 0.0f64..360.0,
    ) {
        let mut part = part_of(t, Point::ORIGIN, rotation);
        let start = part.rotation;
        for _ in 0..8 {
            part.rotate_step();
        }
        prop_assert!(angle_diff(part.rotation, start) < 1e-6);
    }

    #[test]
    fn rotation_stays_normalised(t in any_part_type(), rotation in -720.0f64..720.0) {
        let mut part = part_of(t, Point::ORIGIN, rotation);
        part.rotate_step();
        prop_assert!(part.rotation >= 0.0 && part.rotation < 360.0);
        for c in part.connectors() {
            prop_assert!(c.angle >= 0.0 && c.angle < 360.0);
        }
    }
}
