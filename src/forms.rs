use crate::builder::{FormBuilder, FormComponent};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use tracing::debug;
use uuid::Uuid;

/// Number of entries shown in the "recent forms" list.
pub const DEFAULT_RECENT_LIMIT: usize = 4;

/// A named snapshot of a built form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedForm {
    pub id: String,
    pub name: String,
    pub last_modified: DateTime<Utc>,
    pub components: Vec<FormComponent>,
}

impl SavedForm {
    /// Snapshots the components of `builder` under a fresh id.
    pub fn from_builder(name: impl Into<String>, builder: &FormBuilder) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            last_modified: Utc::now(),
            components: builder.components().to_vec(),
        }
    }

    /// Loads a saved form from a JSON file.
    pub fn from_file(path: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let content = fs::read_to_string(path)?;
        let form = serde_json::from_str(&content)?;
        Ok(form)
    }

    /// Restores a builder holding this form's components, with nothing selected.
    pub fn to_builder(&self) -> FormBuilder {
        FormBuilder::from_components(self.components.clone())
    }
}

/// The saved forms of a session, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SavedForms {
    forms: Vec<SavedForm>,
}

impl SavedForms {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `form`, or replaces the stored form with the same id in place.
    pub fn upsert(&mut self, form: SavedForm) {
        debug!(id = %form.id, name = %form.name, "saving form");
        match self.forms.iter_mut().find(|f| f.id == form.id) {
            Some(existing) => *existing = form,
            None => self.forms.push(form),
        }
    }

    /// Deletes the form with `id`. Returns whether anything was removed.
    pub fn delete(&mut self, id: &str) -> bool {
        let before = self.forms.len();
        self.forms.retain(|f| f.id != id);
        before != self.forms.len()
    }

    pub fn get(&self, id: &str) -> Option<&SavedForm> {
        self.forms.iter().find(|f| f.id == id)
    }

    /// The first `limit` forms.
    pub fn recent(&self, limit: usize) -> &[SavedForm] {
        &self.forms[..limit.min(self.forms.len())]
    }

    pub fn iter(&self) -> impl Iterator<Item = &SavedForm> {
        self.forms.iter()
    }

    pub fn len(&self) -> usize {
        self.forms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.forms.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::ComponentKind;

    fn saved(name: &str) -> SavedForm {
        let mut builder = FormBuilder::new();
        builder.add(ComponentKind::Text);
        SavedForm::from_builder(name, &builder)
    }

    #[test]
    fn upsert_replaces_in_place() {
        let mut forms = SavedForms::new();
        let first = saved("first");
        forms.upsert(first.clone());
        forms.upsert(saved("second"));

        let renamed = SavedForm {
            name: "renamed".to_string(),
            ..first
        };
        forms.upsert(renamed);

        let names: Vec<_> = forms.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["renamed", "second"]);
    }

    #[test]
    fn recent_is_capped() {
        let mut forms = SavedForms::new();
        for i in 0..6 {
            forms.upsert(saved(&format!("form {}", i)));
        }
        assert_eq!(forms.recent(DEFAULT_RECENT_LIMIT).len(), 4);
        assert_eq!(forms.recent(10).len(), 6);
    }

    #[test]
    fn delete_reports_removal() {
        let mut forms = SavedForms::new();
        let form = saved("x");
        let id = form.id.clone();
        forms.upsert(form);
        assert!(forms.delete(&id));
        assert!(!forms.delete(&id));
        assert!(forms.is_empty());
    }

    #[test]
    fn round_trips_through_json() {
        let form = saved("json");
        let text = serde_json::to_string(&form).unwrap();
        let back: SavedForm = serde_json::from_str(&text).unwrap();
        assert_eq!(back, form);
        assert!(back.to_builder().selected_id().is_none());
    }
}
