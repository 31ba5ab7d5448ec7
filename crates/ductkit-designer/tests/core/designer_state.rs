use ductkit_core::{LayoutError, Point};
use ductkit_designer::{AnchorRef, CommandOutcome, DesignerState, LayoutCommand, ResizeRequest};

fn add(state: &mut DesignerState, name: &str, x: f64, y: f64) -> u64 {
    state.add_from_catalog(name, Point::new(x, y)).unwrap()
}

#[test]
fn test_designer_state_new() {
    let state = DesignerState::new();
    assert!(state.parts().is_empty());
    assert!(!state.is_modified);
    assert!(!state.catalog.is_empty());
    assert_eq!(state.display_name(), "Untitled");
}

#[test]
fn test_add_from_catalog() {
    let mut state = DesignerState::new();
    let id = add(&mut state, "Straight Duct Ø160", 0.0, 0.0);
    let part = state.part(id).unwrap();
    assert_eq!(part.diameter, 160.0);
    assert_eq!(part.name, "Straight Duct Ø160");
    assert!(state.is_modified);
    assert_eq!(state.display_name(), "Untitled*");

    assert!(matches!(
        state.add_from_catalog("Chimney", Point::ORIGIN),
        Err(LayoutError::UnknownPartType { .. })
    ));
}

#[test]
fn test_drag_and_drop_joins_parts() {
    let mut state = DesignerState::new();
    let a = add(&mut state, "Straight Duct Ø200", 0.0, 0.0);
    let b = add(&mut state, "Straight Duct Ø200", 2000.0, 0.0);

    // bring b's left end within a few units of a's right end
    state.drag_part(b, -994.0, 2.0).unwrap();
    let outcome = state.drop_part(b).unwrap();
    assert!(matches!(outcome, CommandOutcome::Snapped(_)));

    let groups = state.groups();
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[&a], vec![a, b]);
    assert!((state.part(b).unwrap().position.x - 1000.0).abs() < 1e-9);
    assert!(state.part(b).unwrap().position.y.abs() < 1e-9);

    let dims = state.all_dimensions();
    assert_eq!(dims.len(), 1);
    assert!((dims[0].value - 2000.0).abs() < 1e-9);
}

#[test]
fn test_snap_distance_depends_on_zoom() {
    let mut state = DesignerState::new();
    add(&mut state, "Straight Duct Ø200", 0.0, 0.0);
    let b = add(&mut state, "Straight Duct Ø200", 1015.0, 0.0);

    state.viewport.set_zoom(2.0);
    let outcome = state.drop_part(b).unwrap();
    assert_eq!(outcome, CommandOutcome::Applied);
    assert_eq!(state.groups().len(), 2);

    state.viewport.set_zoom(0.5);
    assert!(matches!(state.drop_part(b).unwrap(), CommandOutcome::Snapped(_)));
}

#[test]
fn test_failed_command_keeps_snapshot() {
    let mut state = DesignerState::new();
    let elbow = add(&mut state, "90° Elbow", 0.0, 0.0);
    let before = state.snapshot().clone();

    let err = state
        .apply(LayoutCommand::ResizeDuct(ResizeRequest {
            duct_id: elbow,
            total_distance: 1000.0,
            length_to_subtract: 0.0,
            anchor_point: AnchorRef::connector(elbow, 0),
            far_point: AnchorRef::connector(elbow, 1),
        }))
        .unwrap_err();
    assert!(matches!(err, LayoutError::NotAStraightDuct { .. }));
    assert_eq!(state.snapshot(), &before);
}

#[test]
fn test_run_dimensions_can_be_hidden() {
    let mut state = DesignerState::new();
    add(&mut state, "Straight Duct Ø200", 0.0, 0.0);
    add(&mut state, "Straight Duct Ø200", 1000.0, 0.0);
    assert_eq!(state.run_dimensions().len(), 1);
    state.show_run_dimensions = false;
    assert!(state.all_dimensions().is_empty());
}

#[test]
fn test_part_at_prefers_topmost() {
    let mut state = DesignerState::new();
    let _under = add(&mut state, "Straight Duct Ø200", 0.0, 0.0);
    let over = add(&mut state, "Damper", 0.0, 0.0);
    assert_eq!(state.part_at(Point::new(10.0, 10.0)).unwrap().id, over);
    assert!(state.part_at(Point::new(0.0, 5000.0)).is_none());
}

#[test]
fn test_fit_to_view() {
    let mut state = DesignerState::new();
    add(&mut state, "Straight Duct Ø200", 0.0, 0.0);
    add(&mut state, "Straight Duct Ø200", 5000.0, 0.0);
    state.fit_to_view();
    let bounds = state.layout_bounds().unwrap();
    let (left, _) = state.viewport.world_to_pixel(Point::new(bounds.min_x, 0.0));
    let (right, _) = state.viewport.world_to_pixel(Point::new(bounds.max_x, 0.0));
    assert!(left >= 0.0);
    assert!(right <= state.viewport.canvas_width());
}

#[test]
fn test_set_duct_length_from_text() {
    let mut state = DesignerState::new();
    let a = add(&mut state, "Straight Duct Ø200", 0.0, 0.0);
    let b = add(&mut state, "Straight Duct Ø200", 2000.0, 0.0);
    state.drag_part(b, -1000.0, 0.0).unwrap();
    state.drop_part(b).unwrap();

    assert_eq!(state.set_duct_length(a, " 1500 mm").unwrap(), 1500.0);
    assert_eq!(state.part(a).unwrap().straight_length(), Some(1500.0));
    // left end stays at -500, the joined duct follows the right end
    assert!((state.part(a).unwrap().position.x - 250.0).abs() < 1e-9);
    assert!((state.part(b).unwrap().position.x - 1500.0).abs() < 1e-9);

    let err = state.set_duct_length(a, "long").unwrap_err();
    assert!(!err.is_layout_error());
    let err = state.set_duct_length(99, "100").unwrap_err();
    assert!(err.is_layout_error());
    assert_eq!(state.part(a).unwrap().straight_length(), Some(1500.0));
}
