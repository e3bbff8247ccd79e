use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid JSON in {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Expected {what} to be a JSON array")]
    NotAnArray { what: &'static str },

    #[error("{record} #{index} is not a JSON object")]
    NotAnObject { record: &'static str, index: usize },

    #[error("{record} #{index} is missing required field `{field}`")]
    MissingField {
        record: &'static str,
        index: usize,
        field: &'static str,
    },

    #[error("Invalid BPMN XML: {0}")]
    Xml(#[from] roxmltree::Error),

    #[error("No <process> element found in BPMN document")]
    MissingProcess,
}

/// A non-fatal degradation noticed while converting.
///
/// These never abort a conversion; the affected record is skipped or defaulted and the
/// diagnostic is handed back to the caller alongside the result.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Diagnostic {
    #[error("Optional input {} ignored: {reason}", path.display())]
    OptionalInput { path: PathBuf, reason: String },

    #[error("Layout entry #{index} is not an object")]
    LayoutEntryNotObject { index: usize },

    #[error("Layout entry #{index} has no usable id")]
    LayoutEntryWithoutId { index: usize },

    #[error("Layout entry `{id}` has no usable coordinates: {reason}")]
    LayoutCoordinates { id: String, reason: String },

    #[error("Property on `{element}` has no name")]
    PropertyWithoutName { element: String },

    #[error("DI shape #{index} has no bpmnElement reference")]
    ShapeWithoutElement { index: usize },

    #[error("DI shape for `{element}` has no parseable bounds")]
    ShapeWithoutBounds { element: String },

    #[error("Sequence flow `{flow}` skipped in DI: endpoint `{missing}` has no shape")]
    EdgeWithoutShape { flow: String, missing: String },
}
