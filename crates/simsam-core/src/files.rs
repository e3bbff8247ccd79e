use crate::Converter;
use crate::config::{ForwardPaths, ReversePaths};
use crate::error::{Diagnostic, Error, Result};
use crate::model::SimsamModel;
use serde::Serialize;
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

fn io_err(path: &Path) -> impl FnOnce(std::io::Error) -> Error + '_ {
    move |source| Error::Io {
        path: path.to_path_buf(),
        source,
    }
}

fn json_err(path: &Path) -> impl FnOnce(serde_json::Error) -> Error + '_ {
    move |source| Error::Json {
        path: path.to_path_buf(),
        source,
    }
}

pub fn read_required_json(path: &Path) -> Result<Value> {
    let text = std::fs::read_to_string(path).map_err(io_err(path))?;
    serde_json::from_str(&text).map_err(json_err(path))
}

/// Reads a best-effort input. A missing file is `{}`; an unreadable or malformed one is `{}` plus
/// a diagnostic.
pub fn read_optional_json(path: &Path, diagnostics: &mut Vec<Diagnostic>) -> Value {
    let empty = || Value::Object(Map::new());
    let text = match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "optional input absent");
            return empty();
        }
        Err(err) => {
            diagnostics.push(Diagnostic::OptionalInput {
                path: path.to_path_buf(),
                reason: err.to_string(),
            });
            return empty();
        }
    };
    serde_json::from_str(&text).unwrap_or_else(|err| {
        diagnostics.push(Diagnostic::OptionalInput {
            path: path.to_path_buf(),
            reason: err.to_string(),
        });
        empty()
    })
}

fn ensure_parent(path: &Path) -> Result<()> {
    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => {
            std::fs::create_dir_all(dir).map_err(io_err(dir))
        }
        _ => Ok(()),
    }
}

pub fn write_text(path: &Path, text: &str) -> Result<()> {
    ensure_parent(path)?;
    std::fs::write(path, text).map_err(io_err(path))?;
    tracing::info!(path = %path.display(), bytes = text.len(), "wrote file");
    Ok(())
}

/// Pretty-printed with two-space indentation; non-ASCII is written as-is.
pub fn write_json(path: &Path, value: &impl Serialize) -> Result<()> {
    let text = serde_json::to_string_pretty(value).map_err(json_err(path))?;
    write_text(path, &text)
}

fn report(diagnostics: &[Diagnostic]) {
    for d in diagnostics {
        tracing::warn!("{d}");
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ForwardSummary {
    pub output: PathBuf,
    pub elements: usize,
    pub connections: usize,
    pub diagnostics: Vec<Diagnostic>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReverseSummary {
    pub outputs: [PathBuf; 4],
    pub elements: usize,
    pub connections: usize,
    pub layout_nodes: usize,
    pub diagnostics: Vec<Diagnostic>,
}

impl Converter {
    /// Reads the Simsam JSON inputs and writes the BPMN document.
    ///
    /// The output file is only touched once the whole document has been built.
    pub fn convert(&self, paths: &ForwardPaths) -> Result<ForwardSummary> {
        tracing::debug!(
            elements = %paths.elements.display(),
            connections = %paths.connections.display(),
            out = %paths.out_bpmn.display(),
            "converting Simsam JSON to BPMN"
        );
        let elements = read_required_json(&paths.elements)?;
        let connections = read_required_json(&paths.connections)?;

        let mut diagnostics = Vec::new();
        let variables = read_optional_json(&paths.variables, &mut diagnostics);
        let layout = read_optional_json(&paths.layout, &mut diagnostics);

        let model = SimsamModel::from_json(&elements, &connections, variables, layout)?;
        let output = self.to_bpmn(&model);
        write_text(&paths.out_bpmn, &output.xml)?;

        diagnostics.extend(output.diagnostics);
        report(&diagnostics);

        Ok(ForwardSummary {
            output: paths.out_bpmn.clone(),
            elements: output.elements,
            connections: output.connections,
            diagnostics,
        })
    }

    /// Reads a BPMN document and writes the four Simsam JSON files.
    pub fn convert_bpmn_to_json(&self, paths: &ReversePaths) -> Result<ReverseSummary> {
        tracing::debug!(bpmn = %paths.bpmn.display(), "converting BPMN to Simsam JSON");
        let xml = std::fs::read_to_string(&paths.bpmn).map_err(io_err(&paths.bpmn))?;
        let records = self.from_bpmn(&xml)?;

        write_json(&paths.out_elements, &records.elements)?;
        write_json(&paths.out_connections, &records.connections)?;
        write_json(&paths.out_variables, &records.variables)?;
        write_json(&paths.out_layout, &records.layout)?;

        report(&records.diagnostics);

        Ok(ReverseSummary {
            outputs: [
                paths.out_elements.clone(),
                paths.out_connections.clone(),
                paths.out_variables.clone(),
                paths.out_layout.clone(),
            ],
            elements: records.elements.len(),
            connections: records.connections.len(),
            layout_nodes: records.layout.nodes.len(),
            diagnostics: records.diagnostics,
        })
    }
}
