//! Normalizes the layout JSON shapes the editor has produced over time into `id -> (x, y)`.
//!
//! Accepted shapes:
//! - `{"nodes" | "elements" | "items": [{"id" | "key" | "elementId": .., <coords>}]}` where
//!   `<coords>` is `x`/`y`, `position: {x, y}` or `bounds: {x, y}` (tried in that order)
//! - a flat map `{"<id>": {x, y}}` or `{"<id>": {"position": {x, y}}}`, used only when the list
//!   form yields nothing

use crate::error::Diagnostic;
use crate::model::Point;
use indexmap::IndexMap;
use serde_json::{Map, Value};

pub type LayoutMap = IndexMap<String, Point>;

const GRID_ORIGIN: Point = Point { x: 100.0, y: 100.0 };
const GRID_H_GAP: f64 = 200.0;
const GRID_V_GAP: f64 = 150.0;

/// `None` when the shape is absent; `Some(Err)` when present but unusable, which skips the entry
/// without trying later extractors.
type Extractor = fn(&Map<String, Value>) -> Option<Result<Point, String>>;

const LIST_EXTRACTORS: &[Extractor] = &[direct_xy, position_xy, bounds_xy];
const FLAT_EXTRACTORS: &[Extractor] = &[direct_xy, position_xy];

fn has_xy(obj: &Map<String, Value>) -> bool {
    obj.contains_key("x") && obj.contains_key("y")
}

fn coordinate(obj: &Map<String, Value>, axis: &str) -> Result<f64, String> {
    let v = match obj.get(axis) {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    v.filter(|v| v.is_finite())
        .ok_or_else(|| format!("`{axis}` is not numeric"))
}

fn read_xy(obj: &Map<String, Value>) -> Result<Point, String> {
    Ok(Point::new(coordinate(obj, "x")?, coordinate(obj, "y")?))
}

fn direct_xy(obj: &Map<String, Value>) -> Option<Result<Point, String>> {
    has_xy(obj).then(|| read_xy(obj))
}

fn nested_xy(obj: &Map<String, Value>, key: &str) -> Option<Result<Point, String>> {
    let inner = obj.get(key)?.as_object()?;
    has_xy(inner).then(|| read_xy(inner))
}

fn position_xy(obj: &Map<String, Value>) -> Option<Result<Point, String>> {
    nested_xy(obj, "position")
}

fn bounds_xy(obj: &Map<String, Value>) -> Option<Result<Point, String>> {
    nested_xy(obj, "bounds")
}

fn extract(obj: &Map<String, Value>, extractors: &[Extractor]) -> Option<Result<Point, String>> {
    extractors.iter().find_map(|f| f(obj))
}

fn is_truthy(v: &Value) -> bool {
    match v {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

fn entry_id(obj: &Map<String, Value>) -> Option<String> {
    let v = ["id", "key", "elementId"]
        .iter()
        .filter_map(|k| obj.get(*k))
        .find(|v| is_truthy(v))?;
    match v {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolvedLayout {
    pub positions: LayoutMap,
    pub diagnostics: Vec<Diagnostic>,
}

impl ResolvedLayout {
    pub fn get(&self, id: &str) -> Option<Point> {
        self.positions.get(id).copied()
    }
}

/// Resolves a raw layout document. Never fails: unusable entries are skipped and reported.
pub fn resolve_layout(layout: &Value) -> ResolvedLayout {
    let mut out = ResolvedLayout::default();
    let Some(root) = layout.as_object() else {
        return out;
    };

    let list = ["nodes", "elements", "items"]
        .iter()
        .filter_map(|k| root.get(*k))
        .find(|v| is_truthy(v))
        .and_then(Value::as_array);
    if let Some(list) = list {
        for (index, node) in list.iter().enumerate() {
            let Some(obj) = node.as_object() else {
                out.diagnostics
                    .push(Diagnostic::LayoutEntryNotObject { index });
                continue;
            };
            let Some(id) = entry_id(obj) else {
                out.diagnostics
                    .push(Diagnostic::LayoutEntryWithoutId { index });
                continue;
            };
            match extract(obj, LIST_EXTRACTORS) {
                Some(Ok(p)) => {
                    out.positions.insert(id, p);
                }
                Some(Err(reason)) => out
                    .diagnostics
                    .push(Diagnostic::LayoutCoordinates { id, reason }),
                None => out.diagnostics.push(Diagnostic::LayoutCoordinates {
                    id,
                    reason: "no x/y, position or bounds".to_string(),
                }),
            }
        }
    }

    if out.positions.is_empty() {
        for (id, value) in root {
            let Some(obj) = value.as_object() else {
                continue;
            };
            match extract(obj, FLAT_EXTRACTORS) {
                Some(Ok(p)) => {
                    out.positions.insert(id.clone(), p);
                }
                Some(Err(reason)) => out.diagnostics.push(Diagnostic::LayoutCoordinates {
                    id: id.clone(),
                    reason,
                }),
                None => {}
            }
        }
    }

    out
}

/// Fallback position for the element at `index` out of `count`, on a square grid.
pub fn grid_position(index: usize, count: usize) -> Point {
    let cols = ((count.max(1) as f64).sqrt().ceil() as usize).max(1);
    let col = index % cols;
    let row = index / cols;
    Point::new(
        GRID_ORIGIN.x + col as f64 * GRID_H_GAP,
        GRID_ORIGIN.y + row as f64 * GRID_V_GAP,
    )
}
