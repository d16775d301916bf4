use super::document::{WorkflowDocument, is_numeric_id};
use crate::error::WorkflowError;
use serde::Serialize;
use serde_json::Value;
use serde_json::ser::{PrettyFormatter, Serializer};
use tracing::{debug, warn};

/// Default file name offered when exporting a workflow.
pub const DEFAULT_EXPORT_FILENAME: &str = "workflow.json";

/// Parses `raw` as JSON and checks that it has the shape of a workflow document.
///
/// The top level must be an object whose keys are all ASCII-digit strings and
/// whose values are objects carrying both an `inputs` and a `class_type`
/// field. An empty object is a valid, empty workflow.
pub fn parse_and_validate(raw: &str) -> Result<WorkflowDocument, WorkflowError> {
    let value: Value = serde_json::from_str(raw).map_err(|e| {
        warn!(error = %e, "workflow is not valid JSON");
        WorkflowError::MalformedJson(e.to_string())
    })?;

    validate_shape(&value).inspect_err(|e| warn!(error = %e, "workflow rejected"))?;

    // Typed pass over the raw text: `Value` objects do not keep key order.
    let document: WorkflowDocument = serde_json::from_str(raw).map_err(|e| {
        warn!(error = %e, "workflow nodes have unexpected field types");
        WorkflowError::InvalidWorkflowShape(e.to_string())
    })?;
    debug!(nodes = document.len(), "workflow parsed");
    Ok(document)
}

/// Checks the structural rules of a workflow document on an already parsed value.
pub fn validate_shape(value: &Value) -> Result<(), WorkflowError> {
    let shape = |message: String| Err(WorkflowError::InvalidWorkflowShape(message));

    let Value::Object(nodes) = value else {
        return shape(format!(
            "expected an object of nodes at the top level, found {}",
            json_type_name(value)
        ));
    };

    for (key, node) in nodes {
        if !is_numeric_id(key) {
            return shape(format!("node id '{}' is not numeric", key));
        }
        let Value::Object(fields) = node else {
            return shape(format!(
                "node '{}' must be an object, found {}",
                key,
                json_type_name(node)
            ));
        };
        for required in ["inputs", "class_type"] {
            if !fields.contains_key(required) {
                return shape(format!("node '{}' is missing '{}'", key, required));
            }
        }
    }
    Ok(())
}

/// Serializes `document` as pretty-printed JSON with two-space indentation.
pub fn export_workflow(document: &WorkflowDocument) -> Result<String, WorkflowError> {
    export_workflow_with_indent(document, 2)
}

/// Serializes `document` as pretty-printed JSON with `indent` spaces per level.
pub fn export_workflow_with_indent(
    document: &WorkflowDocument,
    indent: usize,
) -> Result<String, WorkflowError> {
    let indent = " ".repeat(indent);
    let mut buffer = Vec::new();
    let mut serializer =
        Serializer::with_formatter(&mut buffer, PrettyFormatter::with_indent(indent.as_bytes()));
    document
        .serialize(&mut serializer)
        .map_err(|e| WorkflowError::Serialization(e.to_string()))?;
    String::from_utf8(buffer).map_err(|e| WorkflowError::Serialization(e.to_string()))
}

/// A serialized workflow ready to be offered as a download.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkflowExport {
    pub filename: String,
    pub contents: String,
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
