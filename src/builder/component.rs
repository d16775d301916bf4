use crate::component::{ComponentKind, ComponentProps};
use crate::error::BuilderError;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Unique, immutable identifier of a form component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ComponentId(Uuid);

impl ComponentId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for ComponentId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for ComponentId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

/// A single input element of a form, optionally bound to a workflow node input.
///
/// The component's kind is carried by its props variant, so the two can never
/// disagree and the kind cannot change after creation.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "RawComponent")]
pub struct FormComponent {
    pub(crate) id: ComponentId,
    pub label: String,
    pub node_id: Option<String>,
    pub node_input: Option<String>,
    pub(crate) props: ComponentProps,
}

impl FormComponent {
    /// Creates a component with the default props and label for `kind`.
    pub fn new(kind: ComponentKind) -> Self {
        Self {
            id: ComponentId::new(),
            label: format!("New {}", kind),
            node_id: None,
            node_input: None,
            props: ComponentProps::default_for(kind),
        }
    }

    pub fn id(&self) -> ComponentId {
        self.id
    }

    pub fn kind(&self) -> ComponentKind {
        self.props.kind()
    }

    pub fn props(&self) -> &ComponentProps {
        &self.props
    }

    /// The `(node_id, node_input)` pair when both halves of the binding are set.
    pub fn binding(&self) -> Option<(&str, &str)> {
        match (self.node_id.as_deref(), self.node_input.as_deref()) {
            (Some(node), Some(input)) if !node.is_empty() && !input.is_empty() => {
                Some((node, input))
            }
            _ => None,
        }
    }
}

/// The on-the-wire shape of a component, validated into `FormComponent`.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawComponent {
    id: ComponentId,
    #[serde(rename = "type")]
    kind: ComponentKind,
    label: String,
    #[serde(default)]
    node_id: Option<String>,
    #[serde(default, alias = "nodeParam")]
    node_input: Option<String>,
    props: Value,
}

impl TryFrom<RawComponent> for FormComponent {
    type Error = BuilderError;

    fn try_from(raw: RawComponent) -> Result<Self, Self::Error> {
        let props = raw.kind.spec().validate(raw.props)?;
        Ok(Self {
            id: raw.id,
            label: raw.label,
            node_id: raw.node_id,
            node_input: raw.node_input,
            props,
        })
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RawComponentRef<'a> {
    id: ComponentId,
    #[serde(rename = "type")]
    kind: ComponentKind,
    label: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    node_id: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    node_input: Option<&'a str>,
    props: &'a ComponentProps,
}

impl Serialize for FormComponent {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        RawComponentRef {
            id: self.id,
            kind: self.kind(),
            label: &self.label,
            node_id: self.node_id.as_deref(),
            node_input: self.node_input.as_deref(),
            props: &self.props,
        }
        .serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn serializes_in_wire_shape() {
        let component = FormComponent::new(ComponentKind::Toggle);
        let value = serde_json::to_value(&component).unwrap();
        assert_eq!(value["type"], "toggle");
        assert_eq!(value["label"], "New toggle");
        assert_eq!(value["props"], json!({ "defaultChecked": false }));
        assert!(value.get("nodeId").is_none());
    }

    #[test]
    fn deserialization_validates_props() {
        let id = ComponentId::new();
        let bad = json!({
            "id": id.to_string(),
            "type": "checkbox",
            "label": "Agree",
            "props": { "defaultChecked": true }
        });
        assert!(serde_json::from_value::<FormComponent>(bad).is_err());

        let good = json!({
            "id": id.to_string(),
            "type": "checkbox",
            "label": "Agree",
            "nodeId": "3",
            "nodeParam": "enabled",
            "props": { "checked": true }
        });
        let component: FormComponent = serde_json::from_value(good).unwrap();
        assert_eq!(component.id(), id);
        assert_eq!(component.binding(), Some(("3", "enabled")));
    }
}
