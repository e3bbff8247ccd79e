//! Synthesized BPMN diagram interchange: one shape per node, one straight edge per flow.

use crate::error::Diagnostic;
use crate::layout::{ResolvedLayout, grid_position};
use crate::mapping::BpmnTag;
use crate::model::Point;
use indexmap::IndexMap;

/// A node as emitted into the process body.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeRef {
    /// Sanitized id used in the XML.
    pub id: String,
    /// Id as it appeared in the Simsam input.
    pub source_id: String,
    pub tag: BpmnTag,
}

/// A sequence flow as emitted into the process body (all ids sanitized).
#[derive(Debug, Clone, PartialEq)]
pub struct FlowRef {
    pub id: String,
    pub source: String,
    pub target: String,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    pub id: String,
    pub waypoints: [Point; 2],
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Diagram {
    pub shapes: IndexMap<String, Bounds>,
    pub edges: Vec<Edge>,
    pub diagnostics: Vec<Diagnostic>,
}

pub fn build_diagram(nodes: &[NodeRef], flows: &[FlowRef], layout: &ResolvedLayout) -> Diagram {
    let mut diagram = Diagram::default();

    for (index, node) in nodes.iter().enumerate() {
        let (width, height) = node.tag.size();
        let origin = layout
            .get(&node.id)
            .or_else(|| layout.get(&node.source_id))
            .unwrap_or_else(|| grid_position(index, nodes.len()));
        diagram.shapes.insert(
            node.id.clone(),
            Bounds {
                x: origin.x,
                y: origin.y,
                width,
                height,
            },
        );
    }

    for flow in flows {
        let source = diagram.shapes.get(&flow.source);
        let target = diagram.shapes.get(&flow.target);
        match (source, target) {
            (Some(s), Some(t)) => diagram.edges.push(Edge {
                id: flow.id.clone(),
                waypoints: [s.center(), t.center()],
            }),
            (None, _) => diagram.diagnostics.push(Diagnostic::EdgeWithoutShape {
                flow: flow.id.clone(),
                missing: flow.source.clone(),
            }),
            (_, None) => diagram.diagnostics.push(Diagnostic::EdgeWithoutShape {
                flow: flow.id.clone(),
                missing: flow.target.clone(),
            }),
        }
    }

    diagram
}

pub fn render_di(diagram: &Diagram, process_id: &str, lines: &mut Vec<String>) {
    lines.push(r#"  <bpmndi:BPMNDiagram id="BPMNDiagram_1">"#.to_string());
    lines.push(format!(
        r#"    <bpmndi:BPMNPlane id="BPMNPlane_1" bpmnElement="{process_id}">"#
    ));

    for (id, b) in &diagram.shapes {
        lines.push(format!(
            r#"      <bpmndi:BPMNShape id="DI_{id}" bpmnElement="{id}">"#
        ));
        lines.push(format!(
            r#"        <dc:Bounds x="{:.1}" y="{:.1}" width="{:.1}" height="{:.1}" />"#,
            b.x, b.y, b.width, b.height
        ));
        lines.push("      </bpmndi:BPMNShape>".to_string());
    }

    for edge in &diagram.edges {
        lines.push(format!(
            r#"      <bpmndi:BPMNEdge id="DI_{0}" bpmnElement="{0}">"#,
            edge.id
        ));
        for p in &edge.waypoints {
            lines.push(format!(
                r#"        <di:waypoint x="{:.1}" y="{:.1}" />"#,
                p.x, p.y
            ));
        }
        lines.push("      </bpmndi:BPMNEdge>".to_string());
    }

    lines.push("    </bpmndi:BPMNPlane>".to_string());
    lines.push("  </bpmndi:BPMNDiagram>".to_string());
}
