use crate::error::WorkflowError;
use regex::Regex;
use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Number, Value};
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::LazyLock;

static NUMERIC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]+$").expect("numeric id pattern is valid"));

/// Returns true if `s` is a non-empty string of ASCII digits.
pub fn is_numeric_id(s: &str) -> bool {
    NUMERIC.is_match(s)
}

/// Identifier of a workflow node: a string of ASCII digits.
///
/// Ordering is numeric (`"2" < "10"`), which is the order nodes are listed in.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    pub fn parse(id: &str) -> Result<Self, WorkflowError> {
        if is_numeric_id(id) {
            Ok(Self(id.to_string()))
        } else {
            Err(WorkflowError::InvalidWorkflowShape(format!(
                "node id '{}' is not numeric",
                id
            )))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn numeric_key(&self) -> (usize, &str) {
        let digits = self.0.trim_start_matches('0');
        (digits.len(), digits)
    }
}

impl Ord for NodeId {
    fn cmp(&self, other: &Self) -> Ordering {
        self.numeric_key()
            .cmp(&other.numeric_key())
            .then_with(|| self.0.cmp(&other.0))
    }
}

impl PartialOrd for NodeId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for NodeId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        NodeId::parse(&raw).map_err(de::Error::custom)
    }
}

/// A reference from one node's input to another node's output: a graph edge.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeReference {
    pub node_id: String,
    pub output_index: Number,
}

/// The value of a node input, classified once when the document is parsed.
///
/// The source format has no explicit discriminant for edges. A two-element
/// array of a digit string and a number is taken to be a [`NodeReference`];
/// everything else is a literal. A literal parameter that happens to have
/// that shape, such as `["42", 7]`, is misclassified as a reference.
#[derive(Debug, Clone, PartialEq)]
pub enum InputValue {
    Literal(Value),
    NodeReference(NodeReference),
}

impl InputValue {
    pub fn is_reference(&self) -> bool {
        matches!(self, InputValue::NodeReference(_))
    }

    pub fn as_literal(&self) -> Option<&Value> {
        match self {
            InputValue::Literal(value) => Some(value),
            InputValue::NodeReference(_) => None,
        }
    }
}

impl From<Value> for InputValue {
    fn from(value: Value) -> Self {
        if let Value::Array(items) = &value {
            if let [Value::String(node_id), Value::Number(output_index)] = items.as_slice() {
                if is_numeric_id(node_id) {
                    return InputValue::NodeReference(NodeReference {
                        node_id: node_id.clone(),
                        output_index: output_index.clone(),
                    });
                }
            }
        }
        InputValue::Literal(value)
    }
}

impl From<InputValue> for Value {
    fn from(value: InputValue) -> Self {
        match value {
            InputValue::Literal(value) => value,
            InputValue::NodeReference(r) => {
                Value::Array(vec![Value::String(r.node_id), Value::Number(r.output_index)])
            }
        }
    }
}

impl fmt::Display for InputValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputValue::Literal(Value::String(s)) => f.write_str(s),
            InputValue::Literal(value) => write!(f, "{}", value),
            InputValue::NodeReference(r) => write!(f, "[{}, {}]", r.node_id, r.output_index),
        }
    }
}

impl Serialize for InputValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            InputValue::Literal(value) => value.serialize(serializer),
            InputValue::NodeReference(r) => (&r.node_id, &r.output_index).serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for InputValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Value::deserialize(deserializer).map(InputValue::from)
    }
}

/// The inputs of a node, in document order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NodeInputs(Vec<(String, InputValue)>);

impl NodeInputs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `name` to `value`, keeping the original position if it already exists.
    pub fn insert(&mut self, name: impl Into<String>, value: InputValue) {
        let name = name.into();
        match self.0.iter_mut().find(|(n, _)| *n == name) {
            Some((_, existing)) => *existing = value,
            None => self.0.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&InputValue> {
        self.0.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &InputValue)> {
        self.0.iter().map(|(n, v)| (n.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<N: Into<String>> FromIterator<(N, InputValue)> for NodeInputs {
    fn from_iter<T: IntoIterator<Item = (N, InputValue)>>(iter: T) -> Self {
        let mut inputs = NodeInputs::new();
        for (name, value) in iter {
            inputs.insert(name, value);
        }
        inputs
    }
}

impl Serialize for NodeInputs {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, value) in &self.0 {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for NodeInputs {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct InputsVisitor;

        impl<'de> Visitor<'de> for InputsVisitor {
            type Value = NodeInputs;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of input names to values")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<NodeInputs, A::Error> {
                let mut inputs = NodeInputs::new();
                while let Some((name, value)) = access.next_entry::<String, InputValue>()? {
                    inputs.insert(name, value);
                }
                Ok(inputs)
            }
        }

        deserializer.deserialize_map(InputsVisitor)
    }
}

/// A single node of a workflow graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkflowNode {
    pub inputs: NodeInputs,
    pub class_type: String,
    /// The `_meta` block as written, explicit `null` included.
    #[serde(
        rename = "_meta",
        default,
        deserialize_with = "present_value",
        skip_serializing_if = "Option::is_none"
    )]
    pub meta: Option<Value>,
    /// Fields this crate does not interpret, kept so export loses nothing.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

// `Some(Value::Null)` for an explicit null; an absent field stays `None` via `default`.
fn present_value<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Value>, D::Error> {
    Value::deserialize(deserializer).map(Some)
}

impl WorkflowNode {
    pub fn new(class_type: impl Into<String>, inputs: NodeInputs) -> Self {
        Self {
            inputs,
            class_type: class_type.into(),
            meta: None,
            extra: Map::new(),
        }
    }

    /// Sets `_meta.title`, replacing a `_meta` that is not an object.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        let meta = self.meta.get_or_insert_with(|| Value::Object(Map::new()));
        if !meta.is_object() {
            *meta = Value::Object(Map::new());
        }
        if let Value::Object(fields) = meta {
            fields.insert("title".to_string(), Value::String(title.into()));
        }
        self
    }

    /// `_meta.title` when it is a non-empty string, otherwise the class type.
    pub fn title(&self) -> &str {
        self.meta
            .as_ref()
            .and_then(|m| m.get("title"))
            .and_then(Value::as_str)
            .filter(|t| !t.is_empty())
            .unwrap_or(&self.class_type)
    }
}

/// A workflow graph keyed by numeric node id.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WorkflowDocument {
    nodes: BTreeMap<NodeId, WorkflowNode>,
}

impl WorkflowDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: NodeId, node: WorkflowNode) -> Option<WorkflowNode> {
        self.nodes.insert(id, node)
    }

    pub fn get(&self, id: &str) -> Option<&WorkflowNode> {
        NodeId::parse(id).ok().and_then(|id| self.nodes.get(&id))
    }

    /// Nodes in ascending numeric id order.
    pub fn nodes(&self) -> impl Iterator<Item = (&NodeId, &WorkflowNode)> {
        self.nodes.iter()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
