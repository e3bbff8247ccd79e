//! Input/output locations for both directions, defaulting to the conventional folders
//! (`fromZ1M/` -> `toBPMN/`, `fromBPMN/` -> `toZ1M/`).

use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForwardPaths {
    pub elements: PathBuf,
    pub connections: PathBuf,
    /// Optional; absent or malformed is treated as `{}`.
    pub variables: PathBuf,
    /// Optional; absent or malformed is treated as `{}`.
    pub layout: PathBuf,
    pub out_bpmn: PathBuf,
}

impl Default for ForwardPaths {
    fn default() -> Self {
        Self {
            elements: "fromZ1M/elements.json".into(),
            connections: "fromZ1M/connections.json".into(),
            variables: "fromZ1M/variables.json".into(),
            layout: "fromZ1M/default.json".into(),
            out_bpmn: "toBPMN/simsam_fixed.bpmn".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReversePaths {
    pub bpmn: PathBuf,
    pub out_elements: PathBuf,
    pub out_connections: PathBuf,
    pub out_variables: PathBuf,
    pub out_layout: PathBuf,
}

impl Default for ReversePaths {
    fn default() -> Self {
        Self {
            bpmn: "fromBPMN/simsam_fixed.bpmn".into(),
            out_elements: "toZ1M/elements.json".into(),
            out_connections: "toZ1M/connections.json".into(),
            out_variables: "toZ1M/variables.json".into(),
            out_layout: "toZ1M/layout.json".into(),
        }
    }
}
