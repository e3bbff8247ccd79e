//! Simsam JSON -> BPMN 2.0 XML.

use crate::di::{FlowRef, NodeRef, build_diagram, render_di};
use crate::error::Diagnostic;
use crate::layout::resolve_layout;
use crate::model::{Connection, Element, SimsamModel};
use crate::xml::{
    BPMN_DI_NS, BPMN_MODEL_NS, DC_NS, DI_NS, SIMSAM_NS, XSI_NS, escape_xml_thoroughly,
    make_xml_safe_id,
};
use crate::Converter;

pub const PROCESS_ID: &str = "Process_simsam";
pub const DEFINITIONS_ID: &str = "Definitions_simsam";

/// Probability texts that mean "always taken" and get no condition expression.
const UNCONDITIONAL_PROBABILITY: &[&str] = &["", "None", "1"];

#[derive(Debug, Clone, PartialEq)]
pub struct BpmnOutput {
    pub xml: String,
    pub elements: usize,
    pub connections: usize,
    pub diagnostics: Vec<Diagnostic>,
}

fn header_lines() -> Vec<String> {
    vec![
        r#"<?xml version="1.0" encoding="UTF-8"?>"#.to_string(),
        format!(r#"<definitions xmlns="{BPMN_MODEL_NS}""#),
        format!(r#"  xmlns:bpmndi="{BPMN_DI_NS}""#),
        format!(r#"  xmlns:dc="{DC_NS}""#),
        format!(r#"  xmlns:di="{DI_NS}""#),
        format!(r#"  xmlns:simsam="{SIMSAM_NS}""#),
        format!(r#"  xmlns:xsi="{XSI_NS}""#),
        format!(r#"  id="{DEFINITIONS_ID}""#),
        r#"  targetNamespace="http://bpmn.io/schema/bpmn">"#.to_string(),
        String::new(),
        format!(r#"  <process id="{PROCESS_ID}" isExecutable="false">"#),
    ]
}

impl Converter {
    /// Builds the complete BPMN document for `model`. Nothing is written to disk.
    pub fn to_bpmn(&self, model: &SimsamModel) -> BpmnOutput {
        let mut lines = header_lines();

        let nodes: Vec<NodeRef> = model
            .elements
            .iter()
            .map(|e| self.push_element(e, &mut lines))
            .collect();
        let flows: Vec<FlowRef> = model
            .connections
            .iter()
            .map(|c| push_connection(c, &mut lines))
            .collect();
        lines.push("  </process>".to_string());

        let layout = resolve_layout(&model.layout);
        let diagram = build_diagram(&nodes, &flows, &layout);
        render_di(&diagram, PROCESS_ID, &mut lines);
        lines.push("</definitions>".to_string());

        tracing::debug!(
            elements = nodes.len(),
            connections = flows.len(),
            laid_out = layout.positions.len(),
            shapes = diagram.shapes.len(),
            edges = diagram.edges.len(),
            "built BPMN document"
        );

        let mut diagnostics = layout.diagnostics;
        diagnostics.extend(diagram.diagnostics);

        BpmnOutput {
            xml: lines.join("\n"),
            elements: model.elements.len(),
            connections: model.connections.len(),
            diagnostics,
        }
    }

    fn push_element(&self, element: &Element, lines: &mut Vec<String>) -> NodeRef {
        let tag = self
            .mapping()
            .resolve(element.kind.as_deref(), element.sub_type());
        let id = make_xml_safe_id(&element.id);
        let name = escape_xml_thoroughly(&element.name);

        lines.push(format!(r#"    <{tag} id="{id}" name="{name}">"#));

        let properties: Vec<(String, String)> = element
            .fields
            .iter()
            .filter_map(|(key, value)| {
                let text = value.as_text()?;
                if text.trim().is_empty() {
                    return None;
                }
                let value = escape_xml_thoroughly(&text);
                (!value.is_empty()).then(|| (make_xml_safe_id(key), value))
            })
            .collect();
        if !properties.is_empty() {
            lines.push("      <extensionElements>".to_string());
            lines.push("        <simsam:properties>".to_string());
            for (key, value) in properties {
                lines.push(format!(
                    r#"          <simsam:property name="{key}" value="{value}" />"#
                ));
            }
            lines.push("        </simsam:properties>".to_string());
            lines.push("      </extensionElements>".to_string());
        }

        lines.push(format!("    </{tag}>"));
        lines.push(String::new());

        NodeRef {
            id,
            source_id: element.id.clone(),
            tag,
        }
    }
}

fn push_connection(connection: &Connection, lines: &mut Vec<String>) -> FlowRef {
    let id = make_xml_safe_id(&connection.id.replace("->", "_to_"));
    let source = make_xml_safe_id(&connection.from_id);
    let target = make_xml_safe_id(&connection.to_id);

    lines.push(format!(
        r#"    <sequenceFlow id="{id}" sourceRef="{source}" targetRef="{target}">"#
    ));

    if let Some(p) = connection.probability.as_text() {
        let p = p.trim();
        if !UNCONDITIONAL_PROBABILITY.contains(&p) {
            // Annotation only; bpmn.io shows it but nothing evaluates it.
            lines.push(r#"      <conditionExpression xsi:type="tFormalExpression">"#.to_string());
            lines.push(format!(
                "        ${{Math.random() &lt;= {}}}",
                escape_xml_thoroughly(p)
            ));
            lines.push("      </conditionExpression>".to_string());
        }
    }

    lines.push("    </sequenceFlow>".to_string());
    lines.push(String::new());

    FlowRef { id, source, target }
}
