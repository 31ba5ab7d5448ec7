use ductkit_core::Point;
use ductkit_designer::connectivity::{
    are_coincident, coincident_connector_pairs, connectors_coincide, delete, disconnect, groups,
    merge_groups, recompute_groups, regroup,
};
use ductkit_designer::{Connector, DuctPart, Elbow90, Part, PartKind, PartStore, StraightDuct};
use proptest::prelude::*;

fn duct(id: u64, x: f64, y: f64) -> Part {
    Part::new(
        id,
        Point::new(x, y),
        200.0,
        PartKind::StraightDuct(StraightDuct::new(400.0)),
    )
}

fn grouped(mut part: Part, group: u64) -> Part {
    part.group_id = group;
    part
}

/// A-B-C in line, all in group 1.
fn chain() -> PartStore {
    PartStore::from_parts(vec![
        grouped(duct(1, 0.0, 0.0), 1),
        grouped(duct(2, 400.0, 0.0), 1),
        grouped(duct(3, 800.0, 0.0), 1),
    ])
}

#[test]
fn test_coincidence_ignores_diameter() {
    let a = duct(1, 0.0, 0.0);
    let mut b = duct(2, 400.5, 0.0);
    b.diameter = 100.0;
    assert!(are_coincident(&a, &b));
    let pairs = coincident_connector_pairs(&a, &b);
    assert_eq!(pairs.len(), 1);
    assert_eq!(pairs[0].0.id, 1);
    assert_eq!(pairs[0].1.id, 0);
}

#[test]
fn test_coincidence_tolerance_is_strict() {
    let a = duct(1, 0.0, 0.0);
    let b = duct(2, 401.0, 0.0);
    assert!(!are_coincident(&a, &b));
}

#[test]
fn test_merge_then_recompute_yields_one_group() {
    let store = PartStore::from_parts(vec![duct(1, 0.0, 0.0), duct(2, 400.0, 0.0)]);
    let merged = merge_groups(&store, 1, 2);
    assert_eq!(merged.get(2).unwrap().group_id, 1);

    let recomputed = recompute_groups(&[1, 2], &merged);
    assert!(recomputed.iter().all(|p| p.group_id == 1));
}

#[test]
fn test_delete_articulation_part_splits_chain() {
    let store = delete(&chain(), 2);
    assert!(!store.contains(2));
    let listed = groups(&store);
    assert_eq!(listed.len(), 2);
    assert_eq!(listed[&1], vec![1]);
    assert_eq!(listed[&3], vec![3]);
}

#[test]
fn test_disconnect_middle_splits_into_three() {
    let store = disconnect(&chain(), 2);
    let listed = groups(&store);
    assert_eq!(listed.len(), 3);
    // part 2 still touches both neighbours but is no longer grouped with them
    assert!(are_coincident(store.get(1).unwrap(), store.get(2).unwrap()));
}

#[test]
fn test_groups_outside_subset_untouched() {
    let mut store = chain();
    store.insert(grouped(duct(10, 5000.0, 0.0), 10));
    let after = delete(&store, 2);
    assert_eq!(after.get(10).unwrap().group_id, 10);
}

#[test]
fn test_regroup_after_moving_elbow_away() {
    let elbow = grouped(
        Part::new(
            4,
            Point::new(1150.0, 0.0),
            200.0,
            PartKind::Elbow90(Elbow90::new(150.0)),
        ),
        1,
    );
    let mut store = chain();
    store.insert(elbow);
    if let Some(p) = store.get_mut(4) {
        p.translate(0.0, 500.0);
    }
    let after = regroup(&store, 4);
    assert_eq!(after.get(4).unwrap().group_id, 4);
    assert_eq!(after.get(3).unwrap().group_id, 1);
}

fn connector_at(x: f64, y: f64, diameter: f64) -> Connector {
    let part = Part::new(
        1,
        Point::new(x + 200.0, y),
        diameter,
        PartKind::StraightDuct(StraightDuct::new(400.0)),
    );
    part.connectors()[0].clone()
}

proptest! {
    #[test]
    fn coincidence_is_symmetric(
        ax in -1000.0f64..1000.0,
        ay in -1000.0f64..1000.0,
        dx in -2.0f64..2.0,
        dy in -2.0f64..2.0,
        da in 50.0f64..400.0,
        db in 50.0f64..400.0,
    ) {
        let a = connector_at(ax, ay, da);
        let b = connector_at(ax + dx, ay + dy, db);
        prop_assert_eq!(connectors_coincide(&a, &b), connectors_coincide(&b, &a));
    }

    #[test]
    fn part_coincidence_is_symmetric(
        x in 390.0f64..410.0,
        y in -3.0f64..3.0,
        rotation in prop::sample::select(vec![0.0, 90.0, 180.0, 270.0]),
    ) {
        let a = duct(1, 0.0, 0.0);
        let b = duct(2, x, y).with_rotation(rotation);
        prop_assert_eq!(are_coincident(&a, &b), are_coincident(&b, &a));
    }
}
