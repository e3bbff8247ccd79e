//! Simsam type/subtype to BPMN tag tables, and the coarser inverse used on read-back.

use indexmap::IndexMap;

/// The BPMN node tags this converter emits and recognizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BpmnTag {
    StartEvent,
    EndEvent,
    ExclusiveGateway,
    Task,
    UserTask,
    ServiceTask,
    SendTask,
    ReceiveTask,
}

impl BpmnTag {
    /// Fixed scan order used when reading a process back.
    pub const ALL: [BpmnTag; 8] = [
        BpmnTag::StartEvent,
        BpmnTag::EndEvent,
        BpmnTag::ExclusiveGateway,
        BpmnTag::Task,
        BpmnTag::UserTask,
        BpmnTag::ServiceTask,
        BpmnTag::SendTask,
        BpmnTag::ReceiveTask,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            BpmnTag::StartEvent => "startEvent",
            BpmnTag::EndEvent => "endEvent",
            BpmnTag::ExclusiveGateway => "exclusiveGateway",
            BpmnTag::Task => "task",
            BpmnTag::UserTask => "userTask",
            BpmnTag::ServiceTask => "serviceTask",
            BpmnTag::SendTask => "sendTask",
            BpmnTag::ReceiveTask => "receiveTask",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == name)
    }

    /// Width and height of the DI shape.
    pub fn size(self) -> (f64, f64) {
        match self {
            BpmnTag::StartEvent | BpmnTag::EndEvent => (36.0, 36.0),
            BpmnTag::ExclusiveGateway => (50.0, 50.0),
            BpmnTag::Task
            | BpmnTag::UserTask
            | BpmnTag::ServiceTask
            | BpmnTag::SendTask
            | BpmnTag::ReceiveTask => (100.0, 80.0),
        }
    }
}

impl std::fmt::Display for BpmnTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Field order every reconstructed element record is padded to.
///
/// The trailing `\r` on the last key is part of the exchanged format (headers exported with CRLF).
pub const ELEMENT_SCHEMA: &[&str] = &[
    "id",
    "name",
    "incomingNumber",
    "variable",
    "type",
    "subType",
    "aOR",
    "execution",
    "account",
    "platform",
    "monitoring",
    "monitoredData",
    "description",
    "avgCostTime",
    "avgCost",
    "effectiveCost",
    "lastUpdate",
    "nextUpdate",
    "kPI",
    "scheduleStart",
    "scheduleEnd",
    "frequency\r",
];

/// Field order every reconstructed connection record is padded to.
pub const CONNECTION_SCHEMA: &[&str] = &[
    "id",
    "fromId",
    "toId",
    "probability",
    "time",
    "condition",
    "execution",
    "AOR",
    "type",
    "description\r",
];

#[derive(Debug, Clone)]
pub struct TagMapping {
    types: IndexMap<String, BpmnTag>,
    subtypes: IndexMap<String, BpmnTag>,
}

impl Default for TagMapping {
    fn default() -> Self {
        let types = [
            ("Resource", BpmnTag::StartEvent),
            ("Action", BpmnTag::Task),
            ("Decision", BpmnTag::ExclusiveGateway),
            ("State", BpmnTag::EndEvent),
        ];
        let subtypes = [
            ("Form Incoming", BpmnTag::ReceiveTask),
            ("Mail Outgoing", BpmnTag::SendTask),
            ("SMS Outgoing", BpmnTag::SendTask),
            ("Call Outgoing", BpmnTag::ServiceTask),
            ("Call Incoming", BpmnTag::ReceiveTask),
            ("Message Outgoing", BpmnTag::SendTask),
            ("Message Incoming", BpmnTag::ReceiveTask),
            ("Manual Form Fillout", BpmnTag::UserTask),
            ("Manual Account Generation", BpmnTag::UserTask),
            ("Manual Form Update", BpmnTag::UserTask),
            ("Videocall", BpmnTag::UserTask),
            ("Video Incoming", BpmnTag::ReceiveTask),
            ("Fundraising", BpmnTag::UserTask),
        ];
        Self {
            types: types.into_iter().map(|(k, v)| (k.to_string(), v)).collect(),
            subtypes: subtypes
                .into_iter()
                .map(|(k, v)| (k.to_string(), v))
                .collect(),
        }
    }
}

impl TagMapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers (or overrides) a subtype mapping.
    pub fn with_subtype(mut self, sub_type: impl Into<String>, tag: BpmnTag) -> Self {
        self.subtypes.insert(sub_type.into(), tag);
        self
    }

    /// Picks the tag for an element: a known `subType` wins, then `type`, then `task`.
    pub fn resolve(&self, kind: Option<&str>, sub_type: Option<&str>) -> BpmnTag {
        if let Some(tag) = sub_type.and_then(|s| self.subtypes.get(s)) {
            return *tag;
        }
        kind.and_then(|k| self.types.get(k))
            .copied()
            .unwrap_or(BpmnTag::Task)
    }

    /// Simsam `type` for a tag. Lossy: every task variant collapses to `Action`.
    pub fn simsam_type(&self, tag: BpmnTag) -> &'static str {
        match tag {
            BpmnTag::StartEvent => "Resource",
            BpmnTag::EndEvent => "State",
            BpmnTag::ExclusiveGateway => "Decision",
            BpmnTag::Task
            | BpmnTag::UserTask
            | BpmnTag::ServiceTask
            | BpmnTag::SendTask
            | BpmnTag::ReceiveTask => "Action",
        }
    }
}
