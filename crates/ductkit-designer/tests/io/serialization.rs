use ductkit_core::Point;
use ductkit_designer::{
    AnchorRef, DesignerState, Dimension, LayoutCommand, LayoutFile, PartKind, PointId, PointType,
};
use tempfile::TempDir;

fn sample_state() -> DesignerState {
    let mut state = DesignerState::new();
    state.layout_name = "Plant room".to_string();
    let a = state
        .add_from_catalog("Straight Duct Ø200", Point::new(0.0, 0.0))
        .unwrap();
    let b = state
        .add_from_catalog("90° Elbow", Point::new(650.0, 0.0))
        .unwrap();
    state.drop_part(b).unwrap();
    state
        .apply(LayoutCommand::AddDimension {
            p1: AnchorRef::connector(a, 0),
            p2: AnchorRef::intersection(b, "corner"),
        })
        .unwrap();
    state.apply(LayoutCommand::FlipPart { part_id: b }).unwrap();
    state
}

#[test]
fn test_save_and_load_round_trip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("plant.duct.json");

    let mut state = sample_state();
    state.viewport.set_zoom(2.0);
    state.save_to_file(&path).unwrap();
    assert!(!state.is_modified);
    assert_eq!(state.display_name(), "plant.duct.json");

    let mut loaded = DesignerState::new();
    loaded.load_from_file(&path).unwrap();
    assert_eq!(loaded.layout_name, "Plant room");
    assert_eq!(loaded.viewport.zoom(), 2.0);
    assert_eq!(loaded.snapshot(), state.snapshot());
    assert_eq!(loaded.groups(), state.groups());
}

#[test]
fn test_new_part_ids_continue_after_load() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("ids.duct.json");
    sample_state().save_to_file(&path).unwrap();

    let mut loaded = DesignerState::new();
    loaded.load_from_file(&path).unwrap();
    let id = loaded
        .add_from_catalog("Damper", Point::new(0.0, 3000.0))
        .unwrap();
    assert_eq!(id, 3);
}

#[test]
fn test_file_contains_only_user_dimensions() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("dims.duct.json");

    let mut state = DesignerState::new();
    state
        .add_from_catalog("Straight Duct Ø200", Point::new(0.0, 0.0))
        .unwrap();
    state
        .add_from_catalog("Straight Duct Ø200", Point::new(1000.0, 0.0))
        .unwrap();
    assert_eq!(state.all_dimensions().len(), 1);
    state.save_to_file(&path).unwrap();

    let file = LayoutFile::load_from_file(&path).unwrap();
    assert!(file.dimensions.is_empty());
    assert_eq!(file.parts.len(), 2);
}

#[test]
fn test_reads_hand_written_layout() {
    let json = r#"{
        "version": "1.0",
        "metadata": {
            "name": "Hand made",
            "created": "2024-01-01T00:00:00Z",
            "modified": "2024-01-01T00:00:00Z"
        },
        "parts": [
            {"id": 4, "groupId": 4, "type": "AdjustableElbow", "x": 10, "y": 20,
             "rotation": 45, "diameter": 125, "legLength": 100, "angle": 60,
             "isFlipped": true, "name": "Bend", "systemName": "Extract"},
            {"id": 5, "groupId": 5, "type": "YBranch", "x": 500, "y": 0,
             "diameter": 160, "length": 320, "branchLength": 120}
        ],
        "dimensions": [
            {"id": "d1", "p1_objId": 4, "p1_pointType": "intersection", "p1_pointId": "corner",
             "p2_objId": 5, "p2_pointType": "connector", "p2_pointId": 2, "value": 0}
        ]
    }"#;
    let file = LayoutFile::from_json(json).unwrap();
    let snapshot = file.to_snapshot();

    let elbow = snapshot.parts.get(4).unwrap();
    assert!(elbow.is_flipped);
    assert_eq!(elbow.system_name, "Extract");
    assert!(matches!(&elbow.kind, PartKind::AdjustableElbow(e) if e.angle == 60.0));

    let y = snapshot.parts.get(5).unwrap();
    assert!(!y.is_selected);
    assert!(matches!(&y.kind, PartKind::YBranch(b) if b.branch_angle == 45.0));

    let dim: &Dimension = &snapshot.dimensions[0];
    assert_eq!(dim.p1.point_type, PointType::Intersection);
    assert_eq!(dim.p1.point_id, PointId::Name("corner".to_string()));
    assert_eq!(dim.p2.point_id, PointId::Index(2));
    assert!(dim.measure(&snapshot.parts).is_some());
}

#[test]
fn test_missing_file_reports_path() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("absent.duct.json");
    let err = LayoutFile::load_from_file(&path).unwrap_err();
    assert!(format!("{:#}", err).contains("absent.duct.json"));
}
