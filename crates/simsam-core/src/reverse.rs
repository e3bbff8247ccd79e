//! BPMN 2.0 XML -> Simsam JSON records.

use crate::Converter;
use crate::error::{Diagnostic, Error, Result};
use crate::mapping::{BpmnTag, CONNECTION_SCHEMA, ELEMENT_SCHEMA};
use crate::model::{LayoutDocument, LayoutNode, PropertyBag, PropertyValue, Record};
use crate::xml::{BPMN_DI_NS, BPMN_MODEL_NS, DC_NS, SIMSAM_NS, parse_property_value};
use regex::Regex;
use roxmltree::{Document, Node};
use serde_json::{Map, Value};

fn probability_regex() -> &'static Regex {
    static RE: std::sync::OnceLock<Regex> = std::sync::OnceLock::new();
    RE.get_or_init(|| Regex::new(r"<=\s*([0-9]*\.?[0-9]+)").expect("valid regex"))
}

#[derive(Debug, Clone, PartialEq)]
pub struct SimsamRecords {
    pub elements: Vec<Record>,
    pub connections: Vec<Record>,
    /// Always empty: BPMN has nothing to reconstruct variables from.
    pub variables: Value,
    pub layout: LayoutDocument,
    pub diagnostics: Vec<Diagnostic>,
}

fn child<'a, 'input>(node: Node<'a, 'input>, ns: &str, name: &str) -> Option<Node<'a, 'input>> {
    node.children().find(|n| n.has_tag_name((ns, name)))
}

fn children<'a, 'input>(
    node: Node<'a, 'input>,
    ns: &'a str,
    name: &'a str,
) -> impl Iterator<Item = Node<'a, 'input>> + 'a {
    node.children().filter(move |n| n.has_tag_name((ns, name)))
}

fn pad(record: &mut Record, schema: &[&str]) {
    for field in schema {
        if !record.contains_key(*field) {
            record.insert((*field).to_string(), PropertyValue::Null);
        }
    }
}

/// Reads `extensionElements/simsam:properties/simsam:property` name/value pairs.
fn parse_properties(node: Node<'_, '_>, diagnostics: &mut Vec<Diagnostic>) -> PropertyBag {
    let mut props = PropertyBag::new();
    let Some(list) = child(node, BPMN_MODEL_NS, "extensionElements")
        .and_then(|ext| child(ext, SIMSAM_NS, "properties"))
    else {
        return props;
    };

    for p in children(list, SIMSAM_NS, "property") {
        let Some(name) = p.attribute("name") else {
            diagnostics.push(Diagnostic::PropertyWithoutName {
                element: node.attribute("id").unwrap_or_default().to_string(),
            });
            continue;
        };
        let value = p
            .attribute("value")
            .map(parse_property_value)
            .unwrap_or(PropertyValue::Null);
        props.insert(name.to_string(), value);
    }
    props
}

impl Converter {
    /// Parses a BPMN document back into Simsam-shaped records.
    pub fn from_bpmn(&self, xml: &str) -> Result<SimsamRecords> {
        let doc = Document::parse(xml)?;
        let root = doc.root_element();
        let process = child(root, BPMN_MODEL_NS, "process").ok_or(Error::MissingProcess)?;

        let mut diagnostics = Vec::new();
        let elements = self.read_elements(process, &mut diagnostics);
        let connections = read_connections(process);
        let layout = read_layout(root, &mut diagnostics);

        tracing::debug!(
            elements = elements.len(),
            connections = connections.len(),
            layout_nodes = layout.nodes.len(),
            "parsed BPMN document"
        );

        Ok(SimsamRecords {
            elements,
            connections,
            variables: Value::Object(Map::new()),
            layout,
            diagnostics,
        })
    }

    fn read_elements(&self, process: Node<'_, '_>, diagnostics: &mut Vec<Diagnostic>) -> Vec<Record> {
        let mut out = Vec::new();
        for tag in BpmnTag::ALL {
            for node in children(process, BPMN_MODEL_NS, tag.as_str()) {
                let mut rec = Record::new();
                rec.insert("id".into(), node.attribute("id").unwrap_or_default().into());
                rec.insert("name".into(), node.attribute("name").unwrap_or_default().into());
                rec.insert("type".into(), self.mapping().simsam_type(tag).into());

                for (key, value) in parse_properties(node, diagnostics) {
                    if matches!(key.as_str(), "id" | "name" | "type") {
                        continue;
                    }
                    rec.insert(key, value);
                }
                pad(&mut rec, ELEMENT_SCHEMA);
                out.push(rec);
            }
        }
        out
    }
}

fn read_connections(process: Node<'_, '_>) -> Vec<Record> {
    children(process, BPMN_MODEL_NS, "sequenceFlow")
        .map(|flow| {
            let mut rec = Record::new();
            pad(&mut rec, CONNECTION_SCHEMA);
            rec.insert("id".into(), flow.attribute("id").unwrap_or_default().into());
            rec.insert("fromId".into(), flow.attribute("sourceRef").unwrap_or_default().into());
            rec.insert("toId".into(), flow.attribute("targetRef").unwrap_or_default().into());

            let condition = child(flow, BPMN_MODEL_NS, "conditionExpression")
                .and_then(|c| c.text())
                .filter(|t| !t.is_empty());
            if let Some(text) = condition {
                let text = text.trim();
                // Any `<= number` is taken as a probability threshold, even inside a condition
                // that was authored by hand.
                match probability_regex().captures(text) {
                    Some(caps) => {
                        if let Ok(p) = caps[1].parse::<f64>() {
                            rec.insert("probability".into(), PropertyValue::Float(p));
                        }
                    }
                    None => {
                        rec.insert("condition".into(), text.into());
                    }
                }
            }
            rec
        })
        .collect()
}

fn attr_f64(node: Node<'_, '_>, name: &str) -> Option<f64> {
    node.attribute(name)
        .and_then(|v| v.trim().parse::<f64>().ok())
        .filter(|v| v.is_finite())
}

fn read_layout(root: Node<'_, '_>, diagnostics: &mut Vec<Diagnostic>) -> LayoutDocument {
    let mut layout = LayoutDocument::default();
    let Some(plane) =
        children(root, BPMN_DI_NS, "BPMNDiagram").find_map(|d| child(d, BPMN_DI_NS, "BPMNPlane"))
    else {
        return layout;
    };

    for (index, shape) in children(plane, BPMN_DI_NS, "BPMNShape").enumerate() {
        let Some(element) = shape.attribute("bpmnElement").filter(|s| !s.is_empty()) else {
            diagnostics.push(Diagnostic::ShapeWithoutElement { index });
            continue;
        };
        let origin =
            child(shape, DC_NS, "Bounds").and_then(|b| Some((attr_f64(b, "x")?, attr_f64(b, "y")?)));
        let Some((x, y)) = origin else {
            diagnostics.push(Diagnostic::ShapeWithoutBounds {
                element: element.to_string(),
            });
            continue;
        };
        layout.nodes.push(LayoutNode {
            id: element.to_string(),
            x,
            y,
        });
    }
    layout
}
