//! The interactive preview of a form and its placeholder submission.

use crate::builder::{ComponentId, FormComponent};
use crate::component::ComponentProps;
use crate::component::editor::format_number;
use ahash::AHashMap;
use itertools::Itertools;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info};

/// The control rendered for one component.
#[derive(Debug, Clone, PartialEq)]
pub enum PreviewControl {
    TextInput { placeholder: String, required: bool },
    Dropdown { options: Vec<String> },
    Slider { min: f64, max: f64, step: f64, value: f64 },
    Toggle { checked: bool },
    Checkbox { checked: bool },
    ImageUpload { max_size: u64, accepted_types: Vec<String> },
}

#[derive(Debug, Clone, PartialEq)]
pub struct PreviewField {
    pub id: ComponentId,
    pub label: String,
    pub control: PreviewControl,
}

/// One submitted value, with the workflow input it is bound to.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmittedValue {
    pub component_id: ComponentId,
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub node_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub node_input: Option<String>,
    pub value: Value,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct FormSubmission {
    pub values: Vec<SubmittedValue>,
}

/// Interaction state of the preview. Only slider positions are tracked; every
/// other control shows its configured default.
#[derive(Debug, Clone, Default)]
pub struct FormPreview {
    slider_values: AHashMap<ComponentId, f64>,
}

impl FormPreview {
    pub fn new() -> Self {
        Self::default()
    }

    /// The fields to render, in component order.
    pub fn fields(&self, components: &[FormComponent]) -> Vec<PreviewField> {
        components
            .iter()
            .map(|component| PreviewField {
                id: component.id(),
                label: component.label.clone(),
                control: self.control_for(component),
            })
            .collect()
    }

    fn control_for(&self, component: &FormComponent) -> PreviewControl {
        match component.props() {
            ComponentProps::Text(p) => PreviewControl::TextInput {
                placeholder: p.placeholder.clone(),
                required: p.required,
            },
            ComponentProps::Select(p) => PreviewControl::Dropdown {
                options: p.options.clone(),
            },
            ComponentProps::Slider(p) => PreviewControl::Slider {
                min: p.min,
                max: p.max,
                step: p.step,
                value: self.slider_value(component.id(), p.default_value),
            },
            ComponentProps::Toggle(p) => PreviewControl::Toggle {
                checked: p.default_checked,
            },
            ComponentProps::Checkbox(p) => PreviewControl::Checkbox { checked: p.checked },
            ComponentProps::Image(p) => PreviewControl::ImageUpload {
                max_size: p.max_size,
                accepted_types: p.accepted_types.clone(),
            },
        }
    }

    fn slider_value(&self, id: ComponentId, default_value: f64) -> f64 {
        self.slider_values.get(&id).copied().unwrap_or(default_value)
    }

    /// Records a value from the slider's range control. Ignored for non-sliders.
    pub fn set_slider_value(&mut self, components: &[FormComponent], id: ComponentId, value: f64) {
        if Self::slider(components, id).is_some() {
            self.slider_values.insert(id, value);
        }
    }

    /// Records a value typed into the slider's number box, clamped into range.
    pub fn set_slider_number(&mut self, components: &[FormComponent], id: ComponentId, value: f64) {
        if let Some(ComponentProps::Slider(p)) = Self::slider(components, id) {
            self.slider_values.insert(id, p.clamp(value));
        }
    }

    fn slider(components: &[FormComponent], id: ComponentId) -> Option<&ComponentProps> {
        components
            .iter()
            .find(|c| c.id() == id)
            .map(FormComponent::props)
            .filter(|p| matches!(p, ComponentProps::Slider(_)))
    }

    pub fn has_submit_button(&self, components: &[FormComponent]) -> bool {
        !components.is_empty()
    }

    /// Collects the current values. Nothing is sent anywhere.
    pub fn submit(&self, components: &[FormComponent]) -> FormSubmission {
        let values = components
            .iter()
            .map(|component| SubmittedValue {
                component_id: component.id(),
                label: component.label.clone(),
                node_id: component.node_id.clone(),
                node_input: component.node_input.clone(),
                value: self.value_of(component),
            })
            .collect::<Vec<_>>();
        info!(fields = values.len(), "form submitted (preview only)");
        FormSubmission { values }
    }

    fn value_of(&self, component: &FormComponent) -> Value {
        match self.control_for(component) {
            PreviewControl::TextInput { .. } => Value::String(String::new()),
            PreviewControl::Dropdown { options } => options
                .into_iter()
                .next()
                .map(Value::String)
                .unwrap_or(Value::Null),
            PreviewControl::Slider { value, .. } => serde_json::Number::from_f64(value)
                .map(Value::Number)
                .unwrap_or(Value::Null),
            PreviewControl::Toggle { checked } | PreviewControl::Checkbox { checked } => {
                Value::Bool(checked)
            }
            PreviewControl::ImageUpload { .. } => Value::Null,
        }
    }

    /// A plain-text rendering of the form, one line per field.
    pub fn render_text(&self, components: &[FormComponent]) -> String {
        debug!(fields = components.len(), "rendering preview");
        let mut lines: Vec<String> = self
            .fields(components)
            .iter()
            .map(|field| format!("{}: {}", field.label, describe(&field.control)))
            .collect();
        if self.has_submit_button(components) {
            lines.push("[Submit]".to_string());
        }
        lines.join("\n")
    }
}

fn describe(control: &PreviewControl) -> String {
    match control {
        PreviewControl::TextInput {
            placeholder,
            required,
        } => {
            let mut text = format!("[text \"{}\"]", placeholder);
            if *required {
                text.push_str(" *");
            }
            text
        }
        PreviewControl::Dropdown { options } => format!("[select {}]", options.iter().join(" | ")),
        PreviewControl::Slider {
            min,
            max,
            step,
            value,
        } => format!(
            "[slider {}..{} step {}] = {}",
            format_number(*min),
            format_number(*max),
            format_number(*step),
            format_number(*value)
        ),
        PreviewControl::Toggle { checked } => {
            format!("[toggle {}]", if *checked { "on" } else { "off" })
        }
        PreviewControl::Checkbox { checked } => format!("[{}]", if *checked { "x" } else { " " }),
        PreviewControl::ImageUpload {
            max_size,
            accepted_types,
        } => format!(
            "[image {} up to {} MB]",
            accepted_types.iter().join(", "),
            format_number(*max_size as f64 / crate::component::editor::BYTES_PER_MEGABYTE)
        ),
    }
}
