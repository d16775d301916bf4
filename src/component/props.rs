use super::editor::{EditorKind, PropertyEditor};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// The shared contract of every typed props struct.
///
/// The serde shape of the implementing struct *is* the wire shape of the
/// component's `props` object: every field is required and unknown keys are
/// rejected, so a successfully deserialized value always carries exactly the
/// keys of its kind.
pub trait PropsSchema: Default + Serialize + DeserializeOwned {
    /// Ordered editor descriptors, one per property.
    fn editors() -> &'static [PropertyEditor];

    /// Checks cross-field constraints and canonicalizes the value.
    fn normalize(self) -> Result<Self, String> {
        Ok(self)
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct TextProps {
    pub placeholder: String,
    pub required: bool,
}

impl PropsSchema for TextProps {
    fn editors() -> &'static [PropertyEditor] {
        const EDITORS: &[PropertyEditor] = &[
            PropertyEditor::new("placeholder", "Placeholder", EditorKind::Text),
            PropertyEditor::new("required", "Required", EditorKind::Checkbox),
        ];
        EDITORS
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SelectProps {
    pub options: Vec<String>,
}

impl Default for SelectProps {
    fn default() -> Self {
        Self {
            options: vec![
                "Option 1".to_string(),
                "Option 2".to_string(),
                "Option 3".to_string(),
            ],
        }
    }
}

impl PropsSchema for SelectProps {
    fn editors() -> &'static [PropertyEditor] {
        const EDITORS: &[PropertyEditor] = &[PropertyEditor::new(
            "options",
            "Options (one per line)",
            EditorKind::Lines,
        )];
        EDITORS
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SliderProps {
    pub min: f64,
    pub max: f64,
    pub step: f64,
    pub default_value: f64,
}

impl Default for SliderProps {
    fn default() -> Self {
        Self {
            min: 0.0,
            max: 100.0,
            step: 1.0,
            default_value: 50.0,
        }
    }
}

impl SliderProps {
    /// Clamps `value` into `[min, max]`.
    pub fn clamp(&self, value: f64) -> f64 {
        value.max(self.min).min(self.max)
    }
}

impl PropsSchema for SliderProps {
    fn editors() -> &'static [PropertyEditor] {
        const EDITORS: &[PropertyEditor] = &[
            PropertyEditor::new("min", "Min Value", EditorKind::Number),
            PropertyEditor::new("max", "Max Value", EditorKind::Number),
            PropertyEditor::new("step", "Step", EditorKind::Number),
            PropertyEditor::new("defaultValue", "Default Value", EditorKind::Number),
        ];
        EDITORS
    }

    fn normalize(self) -> Result<Self, String> {
        if self.step.is_nan() || self.step <= 0.0 {
            return Err(format!("step must be greater than 0, got {}", self.step));
        }
        if self.min > self.max {
            return Err(format!(
                "min ({}) must not exceed max ({})",
                self.min, self.max
            ));
        }
        Ok(self)
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ToggleProps {
    pub default_checked: bool,
}

impl PropsSchema for ToggleProps {
    fn editors() -> &'static [PropertyEditor] {
        const EDITORS: &[PropertyEditor] = &[PropertyEditor::new(
            "defaultChecked",
            "Default State",
            EditorKind::Checkbox,
        )];
        EDITORS
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CheckboxProps {
    pub checked: bool,
}

impl PropsSchema for CheckboxProps {
    fn editors() -> &'static [PropertyEditor] {
        const EDITORS: &[PropertyEditor] = &[PropertyEditor::new(
            "checked",
            "Default State",
            EditorKind::Checkbox,
        )];
        EDITORS
    }
}

/// 5 MiB.
pub const DEFAULT_MAX_IMAGE_SIZE: u64 = 5 * 1024 * 1024;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ImageProps {
    /// Maximum upload size in bytes.
    pub max_size: u64,
    /// Accepted MIME types. Treated as a set; first occurrence wins on duplicates.
    pub accepted_types: Vec<String>,
}

impl Default for ImageProps {
    fn default() -> Self {
        Self {
            max_size: DEFAULT_MAX_IMAGE_SIZE,
            accepted_types: vec!["image/jpeg".to_string(), "image/png".to_string()],
        }
    }
}

impl ImageProps {
    pub fn accepts(&self, mime: &str) -> bool {
        self.accepted_types.iter().any(|t| t == mime)
    }
}

impl PropsSchema for ImageProps {
    fn editors() -> &'static [PropertyEditor] {
        const EDITORS: &[PropertyEditor] = &[
            PropertyEditor::new("maxSize", "Max Size (MB)", EditorKind::Megabytes),
            PropertyEditor::new(
                "acceptedTypes",
                "Accepted Types (one per line)",
                EditorKind::Lines,
            ),
        ];
        EDITORS
    }

    fn normalize(mut self) -> Result<Self, String> {
        let mut seen = Vec::with_capacity(self.accepted_types.len());
        self.accepted_types.retain(|t| {
            if seen.contains(t) {
                false
            } else {
                seen.push(t.clone());
                true
            }
        });
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slider_rejects_non_positive_step() {
        let props = SliderProps {
            step: 0.0,
            ..SliderProps::default()
        };
        assert!(props.normalize().is_err());
    }

    #[test]
    fn slider_rejects_inverted_range() {
        let props = SliderProps {
            min: 10.0,
            max: 5.0,
            ..SliderProps::default()
        };
        let err = props.normalize().unwrap_err();
        assert!(err.contains("min"));
    }

    #[test]
    fn image_types_collapse_duplicates() {
        let props = ImageProps {
            max_size: 1,
            accepted_types: vec![
                "image/png".to_string(),
                "image/webp".to_string(),
                "image/png".to_string(),
            ],
        };
        let props = props.normalize().unwrap();
        assert_eq!(props.accepted_types, vec!["image/png", "image/webp"]);
        assert!(props.accepts("image/webp"));
        assert!(!props.accepts("image/gif"));
    }

    #[test]
    fn text_props_reject_unknown_keys() {
        let value = serde_json::json!({ "placeholder": "", "required": false, "extra": 1 });
        assert!(serde_json::from_value::<TextProps>(value).is_err());
    }
}
