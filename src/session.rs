//! Wiring between UI collaborators and the form-builder state.
//!
//! A [`BuilderSession`] receives discrete user actions (palette clicks, drag
//! gestures, file imports) and turns them into state operations. Outcomes
//! are reported through a [`Notifier`]; failures never leave partial state.

use crate::app::AppState;
use crate::builder::{ComponentId, ComponentUpdate, FormBuilder, FormComponent};
use crate::config::BuilderConfig;
use crate::error::WorkflowError;
use crate::forms::SavedForm;
use crate::preview::{FormPreview, FormSubmission};
use crate::route::FormBuilderQuery;
use crate::workflow::WorkflowExport;
use chrono::Utc;
use tracing::{debug, warn};

pub const IMPORT_SUCCESS: &str = "Workflow imported successfully";
pub const IMPORT_INVALID_FILE: &str = "Invalid workflow file";
pub const IMPORT_INVALID_FORMAT: &str =
    "Invalid workflow format. Please export the workflow from ComfyUI in API format.";
pub const EXPORT_NOTHING: &str = "No workflow to export";
pub const FORM_SAVED: &str = "Form saved successfully";
pub const FORM_DELETED: &str = "Form deleted successfully";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Success,
    Error,
}

/// A transient message for the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
    pub duration_ms: u64,
}

/// The toast capability. Implementations decide how messages are shown.
pub trait Notifier {
    fn notify(&mut self, notification: Notification);
}

/// A notifier that keeps every notification in memory, in order.
#[derive(Debug, Clone, Default)]
pub struct NotificationLog {
    entries: Vec<Notification>,
}

impl NotificationLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[Notification] {
        &self.entries
    }

    pub fn last(&self) -> Option<&Notification> {
        self.entries.last()
    }
}

impl Notifier for NotificationLog {
    fn notify(&mut self, notification: Notification) {
        self.entries.push(notification);
    }
}

/// One open form-builder page.
pub struct BuilderSession<'a, N: Notifier> {
    app: &'a mut AppState,
    builder: FormBuilder,
    preview: FormPreview,
    notifier: N,
    config: BuilderConfig,
    form_id: Option<String>,
    import_requested: bool,
}

impl<'a, N: Notifier> BuilderSession<'a, N> {
    /// Opens the builder for `query`, loading the saved form it names, if any.
    pub fn open(
        app: &'a mut AppState,
        query: &FormBuilderQuery,
        notifier: N,
        config: BuilderConfig,
    ) -> Self {
        let saved = query
            .form_id
            .as_deref()
            .and_then(|id| app.saved_forms.get(id));
        let (builder, form_id) = match saved {
            Some(form) => (form.to_builder(), Some(form.id.clone())),
            None => {
                if let Some(id) = &query.form_id {
                    warn!(form_id = %id, "saved form not found, starting empty");
                }
                (FormBuilder::new(), None)
            }
        };
        Self {
            app,
            builder,
            preview: FormPreview::new(),
            notifier,
            config,
            form_id,
            import_requested: query.import_action,
        }
    }

    /// Whether the page was opened with `action=import`.
    pub fn import_requested(&self) -> bool {
        self.import_requested
    }

    pub fn builder(&self) -> &FormBuilder {
        &self.builder
    }

    pub fn app(&self) -> &AppState {
        &*self.app
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    pub fn preview(&self) -> &FormPreview {
        &self.preview
    }

    fn success(&mut self, message: &str) {
        self.notify(NotificationLevel::Success, message.to_string());
    }

    fn error(&mut self, message: String) {
        self.notify(NotificationLevel::Error, message);
    }

    fn notify(&mut self, level: NotificationLevel, message: String) {
        self.notifier.notify(Notification {
            level,
            message,
            duration_ms: self.config.notification_duration_ms,
        });
    }

    /// Handles the text of a user-picked workflow file.
    pub fn import_file(&mut self, raw: &str) -> bool {
        self.import_requested = false;
        let result = self.app.import_workflow(raw).map(|_| ());
        match result {
            Ok(_) => {
                self.success(IMPORT_SUCCESS);
                true
            }
            Err(WorkflowError::MalformedJson(_)) => {
                self.error(IMPORT_INVALID_FILE.to_string());
                false
            }
            Err(_) => {
                self.error(IMPORT_INVALID_FORMAT.to_string());
                false
            }
        }
    }

    /// Serializes the current workflow for download.
    pub fn export(&mut self) -> Option<WorkflowExport> {
        let result = self
            .app
            .export_workflow(&self.config.export_filename, self.config.export_indent);
        match result {
            Ok(export) => Some(export),
            Err(WorkflowError::NoWorkflow) => {
                self.error(EXPORT_NOTHING.to_string());
                None
            }
            Err(e) => {
                self.error(e.to_string());
                None
            }
        }
    }

    /// Adds a component from a palette click.
    pub fn palette_add(&mut self, type_name: &str) -> Option<ComponentId> {
        match self.builder.add_component(type_name) {
            Ok(id) => Some(id),
            Err(e) => {
                self.error(e.to_string());
                None
            }
        }
    }

    /// Handles the end of a drag gesture. `over` is `None` when dropped outside the list.
    pub fn drag_end(&mut self, active: ComponentId, over: Option<ComponentId>) {
        let Some(over) = over else {
            debug!(%active, "drag ended outside the list");
            return;
        };
        if let Err(e) = self.builder.move_component(active, over) {
            self.error(e.to_string());
        }
    }

    pub fn select(&mut self, id: Option<ComponentId>) {
        self.builder.select_component(id);
    }

    pub fn remove(&mut self, id: ComponentId) -> Option<FormComponent> {
        self.builder.remove_component(id)
    }

    pub fn update(&mut self, id: ComponentId, update: &ComponentUpdate) -> bool {
        match self.builder.update_component(id, update).map(|_| ()) {
            Ok(_) => true,
            Err(e) => {
                self.error(e.to_string());
                false
            }
        }
    }

    /// Applies raw editor input to the selected component's property `key`.
    pub fn edit_selected(&mut self, key: &str, raw: &str) -> bool {
        let Some(id) = self.builder.selected_id() else {
            return false;
        };
        match self.builder.edit_property(id, key, raw).map(|_| ()) {
            Ok(_) => true,
            Err(e) => {
                self.error(e.to_string());
                false
            }
        }
    }

    pub fn set_slider_value(&mut self, id: ComponentId, value: f64) {
        self.preview
            .set_slider_value(self.builder.components(), id, value);
    }

    pub fn set_slider_number(&mut self, id: ComponentId, value: f64) {
        self.preview
            .set_slider_number(self.builder.components(), id, value);
    }

    pub fn submit(&self) -> FormSubmission {
        self.preview.submit(self.builder.components())
    }

    /// Saves the current form. A form opened from the saved list is updated in place.
    pub fn save_form(&mut self, name: &str) -> String {
        let mut form = SavedForm::from_builder(name, &self.builder);
        if let Some(id) = &self.form_id {
            form.id = id.clone();
        }
        form.last_modified = Utc::now();
        let id = form.id.clone();
        self.app.saved_forms.upsert(form);
        self.form_id = Some(id.clone());
        self.success(FORM_SAVED);
        id
    }

    /// Deletes a saved form from the application state.
    pub fn delete_saved_form(&mut self, id: &str) -> bool {
        let deleted = self.app.saved_forms.delete(id);
        if deleted {
            if self.form_id.as_deref() == Some(id) {
                self.form_id = None;
            }
            self.success(FORM_DELETED);
        }
        deleted
    }

    /// The dashboard's "recent forms" entries.
    pub fn recent_forms(&self) -> &[SavedForm] {
        self.app.saved_forms.recent(self.config.recent_forms_limit)
    }

    pub fn into_notifier(self) -> N {
        self.notifier
    }
}
