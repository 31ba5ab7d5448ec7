use ductkit_core::Point;
use ductkit_designer::{
    find_best_snap, snap_distance_for_zoom, Part, PartKind, Reducer, StraightDuct,
};

fn duct(id: u64, x: f64, y: f64, diameter: f64) -> Part {
    Part::new(
        id,
        Point::new(x, y),
        diameter,
        PartKind::StraightDuct(StraightDuct::new(400.0)),
    )
}

#[test]
fn test_never_pairs_different_diameters() {
    let fixed = duct(1, 0.0, 0.0, 160.0);
    let dragged = duct(2, 402.0, 0.0, 200.0);
    assert!(find_best_snap(&dragged, [&fixed], 50.0).is_none());
}

#[test]
fn test_matches_reducer_small_end() {
    // reducer 200 -> 160, its right end at (150, 0)
    let reducer = Part::new(
        1,
        Point::ORIGIN,
        200.0,
        PartKind::Reducer(Reducer::new(300.0, 160.0)),
    );
    let dragged = duct(2, 355.0, 0.0, 160.0);
    let snap = find_best_snap(&dragged, [&reducer], 20.0).unwrap();
    assert_eq!(snap.matched_connector_id, 1);
    assert!((snap.dx + 5.0).abs() < 1e-9);
}

#[test]
fn test_never_pairs_same_group() {
    let mut fixed = duct(1, 0.0, 0.0, 200.0);
    let mut dragged = duct(2, 405.0, 0.0, 200.0);
    fixed.group_id = 7;
    dragged.group_id = 7;
    assert!(find_best_snap(&dragged, [&fixed], 20.0).is_none());
}

#[test]
fn test_ignores_itself() {
    let dragged = duct(2, 0.0, 0.0, 200.0);
    assert!(find_best_snap(&dragged, [&dragged], 20.0).is_none());
}

#[test]
fn test_closest_candidate_wins() {
    let near = duct(1, 0.0, 0.0, 200.0);
    let far = duct(3, 810.0, 0.0, 200.0);
    // left end at 203 (3 from near), right end at 603 (7 from far's left end)
    let dragged = duct(2, 403.0, 0.0, 200.0);
    let snap = find_best_snap(&dragged, [&far, &near], 20.0).unwrap();
    assert_eq!(snap.matched_part_id, 1);
    assert!((snap.distance - 3.0).abs() < 1e-9);
}

#[test]
fn test_threshold_is_exclusive_and_zoom_scaled() {
    let fixed = duct(1, 0.0, 0.0, 200.0);
    let dragged = duct(2, 410.0, 0.0, 200.0);
    assert!(find_best_snap(&dragged, [&fixed], snap_distance_for_zoom(20.0, 2.0)).is_none());
    assert!(find_best_snap(&dragged, [&fixed], snap_distance_for_zoom(20.0, 1.0)).is_some());
}
