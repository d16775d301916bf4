use crate::builder::ComponentId;
use thiserror::Error;

/// Errors raised by the form-builder state container and the component registry.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BuilderError {
    #[error("Unknown component type '{0}'")]
    UnknownComponentType(String),

    #[error("Component '{0}' not found")]
    NotFound(ComponentId),

    #[error("Index {index} is out of range for a form with {len} components")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Invalid properties for '{kind}' component: {message}")]
    InvalidProps { kind: String, message: String },
}

/// Errors that can occur while importing or exporting a workflow document.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum WorkflowError {
    #[error("Failed to parse workflow JSON: {0}")]
    MalformedJson(String),

    #[error("Invalid workflow shape: {0}")]
    InvalidWorkflowShape(String),

    #[error("No workflow is loaded")]
    NoWorkflow,

    #[error("Failed to serialize workflow: {0}")]
    Serialization(String),
}

/// Errors that can occur while loading a `BuilderConfig`.
#[derive(Error, Debug, Clone)]
pub enum ConfigError {
    #[error("Could not read config file '{path}': {message}")]
    Io { path: String, message: String },

    #[error("Invalid config file '{path}': {message}")]
    Parse { path: String, message: String },
}
