use super::editor::PropertyEditor;
use super::props::*;
use crate::error::BuilderError;
use ahash::AHashMap;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

/// Defines the contract for one component kind: its defaults, validation and editors.
pub trait ComponentSpec: Send + Sync {
    fn kind(&self) -> ComponentKind;

    /// The label shown on the palette button.
    fn palette_label(&self) -> &'static str;

    fn default_props(&self) -> ComponentProps;

    /// Converts a raw `props` object into typed props, rejecting missing or unknown keys.
    fn validate(&self, props: Value) -> Result<ComponentProps, BuilderError>;

    fn editors(&self) -> &'static [PropertyEditor];

    fn editor(&self, key: &str) -> Option<&'static PropertyEditor> {
        self.editors().iter().find(|e| e.key == key)
    }
}

fn validate_as<P: PropsSchema>(kind: ComponentKind, props: Value) -> Result<P, BuilderError> {
    let invalid = |message: String| BuilderError::InvalidProps {
        kind: kind.to_string(),
        message,
    };
    let parsed: P = serde_json::from_value(props).map_err(|e| invalid(e.to_string()))?;
    parsed.normalize().map_err(invalid)
}

/// Master macro defining every component kind, its typed props and its registration.
macro_rules! define_component_kinds {
    ( $( ($variant:ident, $name:literal, $label:literal, $props:ty, $spec:ident) ),* $(,)? ) => {
        /// The fixed set of form component types.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum ComponentKind {
            $( #[serde(rename = $name)] $variant, )*
        }

        impl ComponentKind {
            /// Every kind, in palette order.
            pub const ALL: &'static [ComponentKind] = &[ $( ComponentKind::$variant, )* ];

            /// The wire name, e.g. `"text"`.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $( ComponentKind::$variant => $name, )*
                }
            }

            /// The registry entry for this kind.
            pub fn spec(&self) -> &'static dyn ComponentSpec {
                match self {
                    $( ComponentKind::$variant => &$spec, )*
                }
            }
        }

        impl FromStr for ComponentKind {
            type Err = BuilderError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $( $name => Ok(ComponentKind::$variant), )*
                    other => Err(BuilderError::UnknownComponentType(other.to_string())),
                }
            }
        }

        /// Type-specific properties. The variant always matches the component's kind.
        #[derive(Debug, Clone, PartialEq)]
        pub enum ComponentProps {
            $( $variant($props), )*
        }

        impl ComponentProps {
            pub fn kind(&self) -> ComponentKind {
                match self {
                    $( ComponentProps::$variant(_) => ComponentKind::$variant, )*
                }
            }
        }

        impl Serialize for ComponentProps {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                match self {
                    $( ComponentProps::$variant(p) => p.serialize(serializer), )*
                }
            }
        }

        $(
            struct $spec;
            impl ComponentSpec for $spec {
                fn kind(&self) -> ComponentKind { ComponentKind::$variant }
                fn palette_label(&self) -> &'static str { $label }
                fn default_props(&self) -> ComponentProps {
                    ComponentProps::$variant(<$props>::default())
                }
                fn validate(&self, props: Value) -> Result<ComponentProps, BuilderError> {
                    validate_as::<$props>(ComponentKind::$variant, props).map(ComponentProps::$variant)
                }
                fn editors(&self) -> &'static [PropertyEditor] { <$props as PropsSchema>::editors() }
            }
        )*

        fn register_default_specs(registry: &mut AHashMap<String, &'static dyn ComponentSpec>) {
            $( registry.insert($name.to_string(), &$spec); )*
        }
    };
}

define_component_kinds! {
    (Text, "text", "Text Input", TextProps, TextSpec),
    (Select, "select", "Dropdown", SelectProps, SelectSpec),
    (Slider, "slider", "Slider", SliderProps, SliderSpec),
    (Image, "image", "Image Upload", ImageProps, ImageSpec),
    (Toggle, "toggle", "Toggle", ToggleProps, ToggleSpec),
    (Checkbox, "checkbox", "Checkbox", CheckboxProps, CheckboxSpec),
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ComponentKind {
    pub fn palette_label(&self) -> &'static str {
        self.spec().palette_label()
    }
}

impl ComponentProps {
    pub fn default_for(kind: ComponentKind) -> Self {
        kind.spec().default_props()
    }

    /// Serializes the props into their wire-shape JSON object.
    pub fn to_value(&self) -> Result<Value, BuilderError> {
        serde_json::to_value(self).map_err(|e| BuilderError::InvalidProps {
            kind: self.kind().to_string(),
            message: e.to_string(),
        })
    }

    /// Shallow-merges `patch` over the current props and re-validates the result.
    ///
    /// Keys absent from `patch` keep their current values. The receiver is never
    /// modified; on failure the caller still holds the untouched props.
    pub fn merged(&self, patch: &Map<String, Value>) -> Result<ComponentProps, BuilderError> {
        let mut current = match self.to_value()? {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        for (key, value) in patch {
            current.insert(key.clone(), value.clone());
        }
        self.kind().spec().validate(Value::Object(current))
    }
}

/// Resolves component type names to their specs.
///
/// The default registry knows every built-in kind under its wire name. Extra
/// names can be mapped onto an existing kind with [`ComponentRegistry::with_alias`].
pub struct ComponentRegistry {
    specs: AHashMap<String, &'static dyn ComponentSpec>,
}

impl Default for ComponentRegistry {
    fn default() -> Self {
        let mut specs = AHashMap::new();
        register_default_specs(&mut specs);
        Self { specs }
    }
}

impl ComponentRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `alias` as another name for the kind called `kind_name`.
    /// Unknown target kinds are ignored.
    pub fn with_alias(mut self, alias: &str, kind_name: &str) -> Self {
        if let Ok(kind) = kind_name.parse::<ComponentKind>() {
            self.specs.insert(alias.to_string(), kind.spec());
        }
        self
    }

    pub fn resolve(&self, type_name: &str) -> Result<&'static dyn ComponentSpec, BuilderError> {
        self.specs
            .get(type_name)
            .copied()
            .ok_or_else(|| BuilderError::UnknownComponentType(type_name.to_string()))
    }

    pub fn contains(&self, type_name: &str) -> bool {
        self.specs.contains_key(type_name)
    }
}

impl fmt::Debug for ComponentRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<_> = self.specs.keys().collect();
        names.sort();
        f.debug_struct("ComponentRegistry")
            .field("types", &names)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn kind_names_round_trip() {
        for kind in ComponentKind::ALL {
            assert_eq!(kind.as_str().parse::<ComponentKind>().unwrap(), *kind);
            assert_eq!(kind.spec().kind(), *kind);
        }
    }

    #[test]
    fn palette_order_matches_toolbox() {
        let labels: Vec<_> = ComponentKind::ALL.iter().map(|k| k.palette_label()).collect();
        assert_eq!(
            labels,
            vec!["Text Input", "Dropdown", "Slider", "Image Upload", "Toggle", "Checkbox"]
        );
    }

    #[test]
    fn alias_resolves_to_existing_kind() {
        let registry = ComponentRegistry::new().with_alias("dropdown", "select");
        assert_eq!(registry.resolve("dropdown").unwrap().kind(), ComponentKind::Select);
        assert!(!ComponentRegistry::new().with_alias("x", "nope").contains("x"));
    }

    #[test]
    fn unknown_type_is_rejected() {
        let err = ComponentRegistry::new().resolve("radio").err().unwrap();
        assert_eq!(err, BuilderError::UnknownComponentType("radio".to_string()));
    }

    #[test]
    fn merge_keeps_unmentioned_fields() {
        let props = ComponentProps::default_for(ComponentKind::Slider);
        let patch = json!({ "max": 10 });
        let merged = props.merged(patch.as_object().unwrap()).unwrap();
        assert_eq!(
            merged.to_value().unwrap(),
            json!({ "min": 0.0, "max": 10.0, "step": 1.0, "defaultValue": 50.0 })
        );
    }

    #[test]
    fn merge_rejects_foreign_keys() {
        let props = ComponentProps::default_for(ComponentKind::Toggle);
        let patch = json!({ "checked": true });
        assert!(matches!(
            props.merged(patch.as_object().unwrap()),
            Err(BuilderError::InvalidProps { .. })
        ));
    }
}
