#![forbid(unsafe_code)]

//! Simsam process models <-> BPMN 2.0 XML.
//!
//! The forward direction turns the four Simsam JSON inputs (elements, connections, variables,
//! layout) into a BPMN document that bpmn.io can open directly, synthesizing the diagram
//! interchange section when the layout is incomplete. The reverse direction reads such a document
//! back into Simsam-shaped records padded to a fixed schema.
//!
//! Both directions are synchronous and stateless; a [`Converter`] only holds read-only mapping
//! tables and can be shared freely.

pub mod config;
pub mod di;
pub mod error;
pub mod files;
pub mod forward;
pub mod layout;
pub mod mapping;
pub mod model;
pub mod reverse;
pub mod xml;

pub use config::{ForwardPaths, ReversePaths};
pub use error::{Diagnostic, Error, Result};
pub use files::{ForwardSummary, ReverseSummary};
pub use forward::BpmnOutput;
pub use mapping::{BpmnTag, TagMapping};
pub use model::{Connection, Element, PropertyValue, SimsamModel};
pub use reverse::SimsamRecords;
pub use xml::{escape_xml_thoroughly, make_xml_safe_id};

#[derive(Debug, Clone, Default)]
pub struct Converter {
    mapping: TagMapping,
}

impl Converter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_mapping(mapping: TagMapping) -> Self {
        Self { mapping }
    }

    pub fn mapping(&self) -> &TagMapping {
        &self.mapping
    }
}

#[cfg(test)]
mod tests;
