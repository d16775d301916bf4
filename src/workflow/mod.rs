//! Workflow documents: the node graph a form binds to.
//!
//! A workflow is imported from JSON text with [`parse_and_validate`], which
//! either returns a complete [`WorkflowDocument`] or an error and never a
//! partial result. [`export_workflow`] writes it back out.

mod bindings;
mod document;
mod import;

pub use bindings::{
    BindingStatus, NodeOption, check_binding, list_bindable_inputs, node_label, node_options,
};
pub use document::{
    InputValue, NodeId, NodeInputs, NodeReference, WorkflowDocument, WorkflowNode,
    is_numeric_id,
};
pub use import::{
    DEFAULT_EXPORT_FILENAME, WorkflowExport, export_workflow, export_workflow_with_indent,
    parse_and_validate, validate_shape,
};
