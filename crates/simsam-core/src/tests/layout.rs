use crate::Diagnostic;
use crate::layout::*;
use crate::model::Point;
use serde_json::json;
use std::collections::HashSet;

#[test]
fn list_form_reads_direct_position_and_bounds() {
    let resolved = resolve_layout(&json!({
        "nodes": [
            { "id": "A", "x": 10, "y": 20 },
            { "key": "B", "position": { "x": 30.5, "y": 40 } },
            { "elementId": "C", "bounds": { "x": 50, "y": 60, "width": 100 } }
        ]
    }));
    assert_eq!(resolved.get("A"), Some(Point::new(10.0, 20.0)));
    assert_eq!(resolved.get("B"), Some(Point::new(30.5, 40.0)));
    assert_eq!(resolved.get("C"), Some(Point::new(50.0, 60.0)));
    assert!(resolved.diagnostics.is_empty());
}

#[test]
fn direct_coordinates_take_precedence() {
    let resolved = resolve_layout(&json!({
        "items": [{ "id": "A", "x": 1, "y": 2, "position": { "x": 9, "y": 9 } }]
    }));
    assert_eq!(resolved.get("A"), Some(Point::new(1.0, 2.0)));
}

#[test]
fn numeric_strings_are_accepted() {
    let resolved = resolve_layout(&json!({ "nodes": [{ "id": "A", "x": "12.5", "y": " 3 " }] }));
    assert_eq!(resolved.get("A"), Some(Point::new(12.5, 3.0)));
}

#[test]
fn malformed_entries_are_skipped_and_reported() {
    let resolved = resolve_layout(&json!({
        "nodes": [
            { "id": "A", "x": "abc", "y": 1, "position": { "x": 5, "y": 5 } },
            { "x": 1, "y": 1 },
            "not an object",
            { "id": "D" },
            { "id": "E", "x": 7, "y": 8 }
        ]
    }));
    assert_eq!(resolved.positions.len(), 1);
    assert_eq!(resolved.get("E"), Some(Point::new(7.0, 8.0)));
    assert_eq!(resolved.get("A"), None);
    assert_eq!(resolved.diagnostics.len(), 4);
    assert!(matches!(
        &resolved.diagnostics[0],
        Diagnostic::LayoutCoordinates { id, .. } if id == "A"
    ));
    assert_eq!(
        resolved.diagnostics[1],
        Diagnostic::LayoutEntryWithoutId { index: 1 }
    );
    assert_eq!(
        resolved.diagnostics[2],
        Diagnostic::LayoutEntryNotObject { index: 2 }
    );
}

#[test]
fn empty_node_list_falls_through_to_the_next_key() {
    let resolved = resolve_layout(&json!({
        "nodes": [],
        "elements": [{ "id": "A", "x": 1, "y": 1 }]
    }));
    assert_eq!(resolved.get("A"), Some(Point::new(1.0, 1.0)));
}

#[test]
fn flat_form_reads_direct_and_position_only() {
    let resolved = resolve_layout(&json!({
        "A": { "x": 1, "y": 2 },
        "B": { "position": { "x": 3, "y": 4 } },
        "C": { "bounds": { "x": 5, "y": 6 } },
        "zoom": 1.5
    }));
    assert_eq!(resolved.get("A"), Some(Point::new(1.0, 2.0)));
    assert_eq!(resolved.get("B"), Some(Point::new(3.0, 4.0)));
    assert_eq!(resolved.get("C"), None);
    assert_eq!(resolved.positions.len(), 2);
}

#[test]
fn non_object_layout_resolves_to_nothing() {
    assert!(resolve_layout(&json!(null)).positions.is_empty());
    assert!(resolve_layout(&json!([1, 2, 3])).positions.is_empty());
    assert!(resolve_layout(&json!({})).positions.is_empty());
}

#[test]
fn grid_fallback_fills_rows_of_ceil_sqrt_columns() {
    assert_eq!(grid_position(0, 4), Point::new(100.0, 100.0));
    assert_eq!(grid_position(1, 4), Point::new(300.0, 100.0));
    assert_eq!(grid_position(2, 4), Point::new(100.0, 250.0));
    assert_eq!(grid_position(3, 4), Point::new(300.0, 250.0));
    assert_eq!(grid_position(3, 5), Point::new(100.0, 250.0));
    assert_eq!(grid_position(0, 0), Point::new(100.0, 100.0));
}

#[test]
fn grid_positions_never_collide() {
    for count in [1usize, 2, 7, 16, 17, 50] {
        let seen: HashSet<(u64, u64)> = (0..count)
            .map(|i| {
                let p = grid_position(i, count);
                (p.x.to_bits(), p.y.to_bits())
            })
            .collect();
        assert_eq!(seen.len(), count);
    }
}
