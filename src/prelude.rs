//! Prelude module for convenient imports
//!
//! This module re-exports the most commonly used types and functions from the nodeform
//! crate. Import this module to get access to the core functionality without having to
//! import each type individually.
//!
//! # Example
//!
//! ```rust,no_run
//! use nodeform::prelude::*;
//!
//! # fn run_example() -> Result<()> {
//! let raw = std::fs::read_to_string("path/to/workflow.json")?;
//! let document = parse_and_validate(&raw)?;
//!
//! for (id, node) in document.nodes() {
//!     println!("{}: {:?}", node_label(id, node), list_bindable_inputs(node));
//! }
//! # Ok(())
//! # }
//! ```

// Application state
pub use crate::app::AppState;
pub use crate::config::BuilderConfig;
pub use crate::forms::{SavedForm, SavedForms};

// Form building
pub use crate::builder::{ComponentId, ComponentUpdate, FormBuilder, FormComponent};
pub use crate::component::{
    ComponentKind, ComponentProps, ComponentRegistry, ComponentSpec, EditorKind, PropertyEditor,
};
pub use crate::preview::{FormPreview, FormSubmission, PreviewControl, PreviewField};

// Workflow documents
pub use crate::workflow::{
    InputValue, NodeId, NodeInputs, NodeReference, WorkflowDocument, WorkflowNode,
    export_workflow, list_bindable_inputs, node_label, parse_and_validate,
};

// Collaborator wiring
pub use crate::route::{FormBuilderQuery, Route};
pub use crate::session::{BuilderSession, Notification, NotificationLog, Notifier};

// Error types
pub use crate::error::{BuilderError, ConfigError, WorkflowError};

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;
