use super::document::{InputValue, NodeId, WorkflowDocument, WorkflowNode};
use crate::builder::FormComponent;

/// Names of the inputs of `node` that a form component may bind to, in document order.
///
/// Inputs holding a [`NodeReference`](super::NodeReference) are graph edges and are left out.
pub fn list_bindable_inputs(node: &WorkflowNode) -> Vec<&str> {
    node.inputs
        .iter()
        .filter(|(_, value)| !value.is_reference())
        .map(|(name, _)| name)
        .collect()
}

/// The label used for a node in pickers: `"<id> - <title>"`.
pub fn node_label(id: &NodeId, node: &WorkflowNode) -> String {
    format!("{} - {}", id, node.title())
}

/// One entry of the node picker.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeOption {
    pub id: NodeId,
    pub label: String,
}

/// The node picker entries for `document`, in numeric id order.
pub fn node_options(document: &WorkflowDocument) -> Vec<NodeOption> {
    document
        .nodes()
        .map(|(id, node)| NodeOption {
            id: id.clone(),
            label: node_label(id, node),
        })
        .collect()
}

/// How a component's binding relates to the current workflow.
#[derive(Debug, Clone, PartialEq)]
pub enum BindingStatus<'a> {
    /// No node selected.
    Unbound,
    /// A node is selected but no input yet.
    NodeOnly { node: &'a WorkflowNode },
    /// The binding points at a leaf parameter.
    Bound {
        node: &'a WorkflowNode,
        input: &'a str,
        value: &'a InputValue,
    },
    /// The bound node is not in the workflow.
    MissingNode(String),
    /// The bound input does not exist on the node.
    MissingInput { node: &'a WorkflowNode, input: String },
    /// The bound input is a graph edge, not a parameter.
    NotBindable { node: &'a WorkflowNode, input: String },
}

/// Checks `component`'s binding against `document`.
pub fn check_binding<'a>(
    document: &'a WorkflowDocument,
    component: &FormComponent,
) -> BindingStatus<'a> {
    let Some(node_id) = component.node_id.as_deref().filter(|id| !id.is_empty()) else {
        return BindingStatus::Unbound;
    };
    let Some(node) = document.get(node_id) else {
        return BindingStatus::MissingNode(node_id.to_string());
    };
    let Some(input_name) = component.node_input.as_deref().filter(|n| !n.is_empty()) else {
        return BindingStatus::NodeOnly { node };
    };
    match node.inputs.iter().find(|(name, _)| *name == input_name) {
        None => BindingStatus::MissingInput {
            node,
            input: input_name.to_string(),
        },
        Some((_, value)) if value.is_reference() => BindingStatus::NotBindable {
            node,
            input: input_name.to_string(),
        },
        Some((input, value)) => BindingStatus::Bound { node, input, value },
    }
}
