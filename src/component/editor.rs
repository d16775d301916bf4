use itertools::Itertools;
use serde_json::Value;

/// Bytes per megabyte as shown in the property editor.
pub const BYTES_PER_MEGABYTE: f64 = 1_048_576.0;

/// The kind of input control used to edit a single property.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorKind {
    /// Free text.
    Text,
    /// A boolean checkbox.
    Checkbox,
    /// A numeric input.
    Number,
    /// A textarea holding one list entry per line.
    Lines,
    /// A numeric input in megabytes, stored as bytes.
    Megabytes,
}

/// Describes how one property of a component is presented and edited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PropertyEditor {
    /// The key inside the component's `props` object.
    pub key: &'static str,
    pub label: &'static str,
    pub editor: EditorKind,
}

impl PropertyEditor {
    pub const fn new(key: &'static str, label: &'static str, editor: EditorKind) -> Self {
        Self { key, label, editor }
    }

    /// Converts raw text typed into the editor into the JSON value stored in `props`.
    pub fn parse_input(&self, raw: &str) -> Result<Value, String> {
        match self.editor {
            EditorKind::Text => Ok(Value::String(raw.to_string())),
            EditorKind::Checkbox => match raw.trim() {
                "true" => Ok(Value::Bool(true)),
                "false" => Ok(Value::Bool(false)),
                other => Err(format!("'{}' expects true or false, got '{}'", self.key, other)),
            },
            EditorKind::Number => {
                let number = parse_number(self.key, raw)?;
                serde_json::Number::from_f64(number)
                    .map(Value::Number)
                    .ok_or_else(|| format!("'{}' must be a finite number", self.key))
            }
            EditorKind::Lines => Ok(Value::Array(
                raw.split('\n')
                    .map(|line| line.trim_end_matches('\r'))
                    .filter(|line| !line.is_empty())
                    .map(|line| Value::String(line.to_string()))
                    .collect(),
            )),
            EditorKind::Megabytes => {
                let megabytes = parse_number(self.key, raw)?;
                if megabytes < 0.0 {
                    return Err(format!("'{}' must not be negative", self.key));
                }
                let bytes = (megabytes * BYTES_PER_MEGABYTE).round() as u64;
                Ok(Value::from(bytes))
            }
        }
    }

    /// Renders a stored property value the way the editor displays it.
    pub fn display(&self, value: &Value) -> String {
        match (self.editor, value) {
            (EditorKind::Megabytes, Value::Number(n)) => {
                let megabytes = n.as_f64().unwrap_or_default() / BYTES_PER_MEGABYTE;
                format_number(megabytes)
            }
            (EditorKind::Number, Value::Number(n)) => format_number(n.as_f64().unwrap_or_default()),
            (EditorKind::Lines, Value::Array(items)) => items
                .iter()
                .map(|item| match item {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                })
                .join("\n"),
            (_, Value::String(s)) => s.clone(),
            (_, other) => other.to_string(),
        }
    }
}

fn parse_number(key: &str, raw: &str) -> Result<f64, String> {
    let trimmed = raw.trim();
    // An emptied number box reads as zero.
    if trimmed.is_empty() {
        return Ok(0.0);
    }
    trimmed
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
        .ok_or_else(|| format!("'{}' expects a number, got '{}'", key, trimmed))
}

pub(crate) fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}
