use super::component::FormComponent;
use crate::error::BuilderError;
use serde_json::{Map, Value};

/// A partial update to a [`FormComponent`].
///
/// Top-level fields that are `Some` overwrite the component's value. The
/// optional binding fields use a nested `Option` so that `Some(None)` clears
/// them. `props` is a patch object merged one level deep: keys it does not
/// mention keep their current values.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ComponentUpdate {
    pub label: Option<String>,
    pub node_id: Option<Option<String>>,
    pub node_input: Option<Option<String>>,
    pub props: Option<Map<String, Value>>,
}

impl ComponentUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn node_id(mut self, node_id: Option<String>) -> Self {
        self.node_id = Some(node_id);
        self
    }

    pub fn node_input(mut self, node_input: Option<String>) -> Self {
        self.node_input = Some(node_input);
        self
    }

    /// Adds a single key to the props patch.
    pub fn prop(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.props
            .get_or_insert_with(Map::new)
            .insert(key.into(), value.into());
        self
    }

    /// Replaces the props patch.
    pub fn props(mut self, patch: Map<String, Value>) -> Self {
        self.props = Some(patch);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.label.is_none()
            && self.node_id.is_none()
            && self.node_input.is_none()
            && self.props.as_ref().is_none_or(|p| p.is_empty())
    }

    /// Produces the updated copy of `component` without touching the original.
    pub(crate) fn apply_to(&self, component: &FormComponent) -> Result<FormComponent, BuilderError> {
        let mut updated = component.clone();
        if let Some(patch) = &self.props {
            updated.props = component.props.merged(patch)?;
        }
        if let Some(label) = &self.label {
            updated.label = label.clone();
        }
        if let Some(node_id) = &self.node_id {
            updated.node_id = node_id.clone();
        }
        if let Some(node_input) = &self.node_input {
            updated.node_input = node_input.clone();
        }
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::{ComponentKind, ComponentProps, TextProps};

    #[test]
    fn prop_patch_preserves_other_fields() {
        let mut component = FormComponent::new(ComponentKind::Text);
        component.props = ComponentProps::Text(TextProps {
            placeholder: String::new(),
            required: true,
        });

        let update = ComponentUpdate::new().prop("placeholder", "x");
        let updated = update.apply_to(&component).unwrap();
        assert_eq!(
            updated.props,
            ComponentProps::Text(TextProps {
                placeholder: "x".to_string(),
                required: true,
            })
        );
        assert_eq!(updated.label, component.label);
    }

    #[test]
    fn failing_patch_leaves_original_untouched() {
        let component = FormComponent::new(ComponentKind::Slider);
        let update = ComponentUpdate::new().label("Steps").prop("step", -1);
        assert!(update.apply_to(&component).is_err());
        assert_eq!(component.label, "New slider");
    }

    #[test]
    fn empty_update_is_detected() {
        assert!(ComponentUpdate::new().is_empty());
        assert!(!ComponentUpdate::new().node_id(None).is_empty());
    }
}
