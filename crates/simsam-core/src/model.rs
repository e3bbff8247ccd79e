use crate::error::{Error, Result};
use indexmap::IndexMap;
use serde::Serialize;
use serde_json::{Map, Value};
use std::borrow::Cow;

/// Scalar value carried through the `simsam:property` extension attributes.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PropertyValue {
    Null,
    Bool(bool),
    Integer(i64),
    /// Integers above `i64::MAX`, kept exact.
    Unsigned(u64),
    Float(f64),
    String(String),
}

impl PropertyValue {
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Integer(v) => Some(*v as f64),
            Self::Unsigned(v) => Some(*v as f64),
            Self::Float(v) => Some(*v),
            _ => None,
        }
    }

    /// Text written into XML attributes; `None` for null.
    pub fn as_text(&self) -> Option<Cow<'_, str>> {
        match self {
            Self::Null => None,
            Self::Bool(v) => Some(Cow::Borrowed(if *v { "true" } else { "false" })),
            Self::Integer(v) => Some(Cow::Owned(v.to_string())),
            Self::Unsigned(v) => Some(Cow::Owned(v.to_string())),
            Self::Float(v) => Some(Cow::Owned(format_float(*v))),
            Self::String(s) => Some(Cow::Borrowed(s.as_str())),
        }
    }
}

/// Integral floats keep a `.0` suffix so they are read back as floats, not integers.
fn format_float(v: f64) -> String {
    if v.is_finite() && v.fract() == 0.0 && v.abs() < 1e16 {
        format!("{v:.1}")
    } else {
        v.to_string()
    }
}

impl From<&Value> for PropertyValue {
    fn from(value: &Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(b) => Self::Bool(*b),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Self::Integer(i)
                } else if let Some(u) = n.as_u64() {
                    Self::Unsigned(u)
                } else {
                    Self::Float(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            Value::String(s) => Self::String(s.clone()),
            Value::Array(_) | Value::Object(_) => Self::String(value.to_string()),
        }
    }
}

impl From<&str> for PropertyValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

pub type PropertyBag = IndexMap<String, PropertyValue>;

/// A Simsam element (one node of the process).
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub id: String,
    pub name: String,
    /// The Simsam `type`; `None` when present but null or not a string.
    pub kind: Option<String>,
    /// Every other field in input order, `subType` included.
    pub fields: PropertyBag,
}

impl Element {
    pub const DEFAULT_KIND: &'static str = "Action";

    pub fn new(id: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            kind: Some(kind.into()),
            fields: PropertyBag::new(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_field(mut self, key: impl Into<String>, value: PropertyValue) -> Self {
        self.fields.insert(key.into(), value);
        self
    }

    pub fn sub_type(&self) -> Option<&str> {
        self.fields.get("subType").and_then(PropertyValue::as_str)
    }

    pub fn from_json(index: usize, value: &Value) -> Result<Self> {
        let obj = value.as_object().ok_or(Error::NotAnObject {
            record: "element",
            index,
        })?;
        let id = required_text(obj, "element", index, "id")?;
        let name = obj.get("name").map(scalar_text).unwrap_or_default();
        let kind = match obj.get("type") {
            None => Some(Self::DEFAULT_KIND.to_string()),
            Some(Value::String(s)) => Some(s.clone()),
            Some(_) => None,
        };
        let fields = obj
            .iter()
            .filter(|(k, _)| !matches!(k.as_str(), "id" | "name" | "type"))
            .map(|(k, v)| (k.clone(), PropertyValue::from(v)))
            .collect();
        Ok(Self {
            id,
            name,
            kind,
            fields,
        })
    }
}

/// A Simsam connection (one sequence flow).
#[derive(Debug, Clone, PartialEq)]
pub struct Connection {
    pub id: String,
    pub from_id: String,
    pub to_id: String,
    pub probability: PropertyValue,
    /// Every other field in input order. Carried for callers; BPMN sequence flows only take
    /// the probability.
    pub fields: PropertyBag,
}

impl Connection {
    pub fn new(id: impl Into<String>, from_id: impl Into<String>, to_id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            from_id: from_id.into(),
            to_id: to_id.into(),
            probability: PropertyValue::Null,
            fields: PropertyBag::new(),
        }
    }

    pub fn with_probability(mut self, probability: PropertyValue) -> Self {
        self.probability = probability;
        self
    }

    pub fn from_json(index: usize, value: &Value) -> Result<Self> {
        let obj = value.as_object().ok_or(Error::NotAnObject {
            record: "connection",
            index,
        })?;
        let id = required_text(obj, "connection", index, "id")?;
        let from_id = required_text(obj, "connection", index, "fromId")?;
        let to_id = required_text(obj, "connection", index, "toId")?;
        let probability = obj
            .get("probability")
            .map(PropertyValue::from)
            .unwrap_or(PropertyValue::Null);
        let fields = obj
            .iter()
            .filter(|(k, _)| !matches!(k.as_str(), "id" | "fromId" | "toId" | "probability"))
            .map(|(k, v)| (k.clone(), PropertyValue::from(v)))
            .collect();
        Ok(Self {
            id,
            from_id,
            to_id,
            probability,
            fields,
        })
    }
}

fn required_text(
    obj: &Map<String, Value>,
    record: &'static str,
    index: usize,
    field: &'static str,
) -> Result<String> {
    obj.get(field)
        .map(scalar_text)
        .ok_or(Error::MissingField {
            record,
            index,
            field,
        })
}

/// String form of a JSON value; null becomes empty.
fn scalar_text(value: &Value) -> String {
    PropertyValue::from(value)
        .as_text()
        .map(Cow::into_owned)
        .unwrap_or_default()
}

/// The four Simsam inputs of one model.
#[derive(Debug, Clone, PartialEq)]
pub struct SimsamModel {
    pub elements: Vec<Element>,
    pub connections: Vec<Connection>,
    /// Carried for completeness; BPMN has no construct for process variables.
    pub variables: Value,
    /// Raw layout JSON in any of the shapes understood by [`crate::layout`].
    pub layout: Value,
}

impl Default for SimsamModel {
    fn default() -> Self {
        Self {
            elements: Vec::new(),
            connections: Vec::new(),
            variables: Value::Object(Map::new()),
            layout: Value::Object(Map::new()),
        }
    }
}

impl SimsamModel {
    pub fn from_json(elements: &Value, connections: &Value, variables: Value, layout: Value) -> Result<Self> {
        let elements = elements
            .as_array()
            .ok_or(Error::NotAnArray { what: "elements" })?
            .iter()
            .enumerate()
            .map(|(i, v)| Element::from_json(i, v))
            .collect::<Result<Vec<_>>>()?;
        let connections = connections
            .as_array()
            .ok_or(Error::NotAnArray {
                what: "connections",
            })?
            .iter()
            .enumerate()
            .map(|(i, v)| Connection::from_json(i, v))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            elements,
            connections,
            variables,
            layout,
        })
    }
}

/// A point in diagram coordinate space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayoutNode {
    pub id: String,
    pub x: f64,
    pub y: f64,
}

/// Layout written by the reverse converter: `{"nodes": [...]}`, or `{}` when empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LayoutDocument {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub nodes: Vec<LayoutNode>,
}

/// One reconstructed JSON record (element or connection), keys in output order.
pub type Record = IndexMap<String, PropertyValue>;
