use crate::error::WorkflowError;
use crate::forms::SavedForms;
use crate::workflow::{self, WorkflowDocument, WorkflowExport};
use tracing::info;

/// Application-wide state shared by every page.
///
/// Owned by the top-level caller and handed to consumers by reference; nothing
/// in the crate keeps state of its own beyond what is passed in.
#[derive(Debug, Clone, Default)]
pub struct AppState {
    workflow: Option<WorkflowDocument>,
    pub saved_forms: SavedForms,
    /// Whether the remote runner is reachable. Informational only.
    pub connected: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn workflow(&self) -> Option<&WorkflowDocument> {
        self.workflow.as_ref()
    }

    /// Replaces the current workflow wholesale.
    pub fn set_workflow(&mut self, document: WorkflowDocument) {
        self.workflow = Some(document);
    }

    pub fn clear_workflow(&mut self) -> Option<WorkflowDocument> {
        self.workflow.take()
    }

    /// Parses `raw` and, only if it is a valid workflow, makes it the current one.
    pub fn import_workflow(&mut self, raw: &str) -> Result<&WorkflowDocument, WorkflowError> {
        let document = workflow::parse_and_validate(raw)?;
        info!(nodes = document.len(), "workflow imported");
        Ok(&*self.workflow.insert(document))
    }

    /// Serializes the current workflow for download under `filename`.
    pub fn export_workflow(
        &self,
        filename: &str,
        indent: usize,
    ) -> Result<WorkflowExport, WorkflowError> {
        let document = self.workflow.as_ref().ok_or(WorkflowError::NoWorkflow)?;
        Ok(WorkflowExport {
            filename: filename.to_string(),
            contents: workflow::export_workflow_with_indent(document, indent)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failed_import_keeps_previous_workflow() {
        let mut state = AppState::new();
        state
            .import_workflow(r#"{"1": {"inputs": {}, "class_type": "A"}}"#)
            .unwrap();
        let before = state.workflow().cloned();

        assert!(state.import_workflow("not json").is_err());
        assert!(state.import_workflow(r#"{"x": {}}"#).is_err());
        assert_eq!(state.workflow().cloned(), before);
    }

    #[test]
    fn export_without_workflow_fails() {
        let state = AppState::new();
        assert_eq!(
            state.export_workflow("workflow.json", 2),
            Err(WorkflowError::NoWorkflow)
        );
    }
}
