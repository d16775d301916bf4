use crate::component::{ComponentKind, ComponentRegistry};
use crate::error::BuilderError;
use ahash::AHashSet;
use tracing::{debug, warn};

mod component;
mod update;

pub use component::{ComponentId, FormComponent};
pub use update::ComponentUpdate;

/// The form-builder state container.
///
/// Holds the ordered list of components (render and submit order) and at most
/// one selected component. All operations are synchronous and either succeed
/// completely or leave the state as it was.
#[derive(Debug, Default)]
pub struct FormBuilder {
    components: Vec<FormComponent>,
    selected: Option<ComponentId>,
    registry: ComponentRegistry,
}

impl FormBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a builder that resolves type names through `registry`.
    pub fn with_registry(registry: ComponentRegistry) -> Self {
        Self {
            components: Vec::new(),
            selected: None,
            registry,
        }
    }

    /// Creates a builder pre-populated with `components` and no selection.
    ///
    /// Ids must be unique: a component repeating an earlier id is given a fresh one.
    pub fn from_components(mut components: Vec<FormComponent>) -> Self {
        let mut seen = AHashSet::with_capacity(components.len());
        for component in &mut components {
            if !seen.insert(component.id) {
                let fresh = ComponentId::new();
                warn!(duplicate = %component.id, %fresh, "duplicate component id reassigned");
                component.id = fresh;
                seen.insert(fresh);
            }
        }
        Self {
            components,
            selected: None,
            registry: ComponentRegistry::default(),
        }
    }

    pub fn components(&self) -> &[FormComponent] {
        &self.components
    }

    pub fn into_components(self) -> Vec<FormComponent> {
        self.components
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    pub fn registry(&self) -> &ComponentRegistry {
        &self.registry
    }

    pub fn get(&self, id: ComponentId) -> Option<&FormComponent> {
        self.components.iter().find(|c| c.id == id)
    }

    pub fn index_of(&self, id: ComponentId) -> Option<usize> {
        self.components.iter().position(|c| c.id == id)
    }

    pub fn selected_id(&self) -> Option<ComponentId> {
        self.selected
    }

    pub fn selected(&self) -> Option<&FormComponent> {
        self.selected.and_then(|id| self.get(id))
    }

    /// Appends a new component of `kind` with default props, selects it and returns its id.
    pub fn add(&mut self, kind: ComponentKind) -> ComponentId {
        let component = FormComponent::new(kind);
        let id = component.id;
        debug!(%id, %kind, position = self.components.len(), "component added");
        self.components.push(component);
        self.selected = Some(id);
        id
    }

    /// Resolves `type_name` through the registry and adds a component of that kind.
    pub fn add_component(&mut self, type_name: &str) -> Result<ComponentId, BuilderError> {
        let spec = self.registry.resolve(type_name)?;
        Ok(self.add(spec.kind()))
    }

    /// Merges `update` into the component with `id`.
    ///
    /// Returns `NotFound` when no such component exists. A failing props merge
    /// leaves the component unchanged.
    pub fn update_component(
        &mut self,
        id: ComponentId,
        update: &ComponentUpdate,
    ) -> Result<&FormComponent, BuilderError> {
        let index = self.index_of(id).ok_or(BuilderError::NotFound(id))?;
        let updated = update.apply_to(&self.components[index])?;
        debug!(%id, "component updated");
        self.components[index] = updated;
        Ok(&self.components[index])
    }

    /// Applies raw text from the property editor registered under `key`.
    pub fn edit_property(
        &mut self,
        id: ComponentId,
        key: &str,
        raw: &str,
    ) -> Result<&FormComponent, BuilderError> {
        let kind = self.get(id).ok_or(BuilderError::NotFound(id))?.kind();
        let invalid = |message: String| BuilderError::InvalidProps {
            kind: kind.to_string(),
            message,
        };
        let editor = kind
            .spec()
            .editor(key)
            .ok_or_else(|| invalid(format!("no editable property '{}'", key)))?;
        let value = editor.parse_input(raw).map_err(invalid)?;
        self.update_component(id, &ComponentUpdate::new().prop(key, value))
    }

    /// Binds the component to a workflow node. Changing the node clears the input.
    pub fn bind_node(
        &mut self,
        id: ComponentId,
        node_id: Option<String>,
    ) -> Result<&FormComponent, BuilderError> {
        let update = ComponentUpdate::new().node_id(node_id).node_input(None);
        self.update_component(id, &update)
    }

    pub fn bind_input(
        &mut self,
        id: ComponentId,
        node_input: Option<String>,
    ) -> Result<&FormComponent, BuilderError> {
        self.update_component(id, &ComponentUpdate::new().node_input(node_input))
    }

    /// Removes the component with `id`, clearing the selection if it was selected.
    /// Returns `None` and leaves the state untouched when the id is unknown.
    pub fn remove_component(&mut self, id: ComponentId) -> Option<FormComponent> {
        let index = self.index_of(id)?;
        let removed = self.components.remove(index);
        if self.selected == Some(id) {
            self.selected = None;
        }
        debug!(%id, "component removed");
        Some(removed)
    }

    /// Moves the component at `from` so that it ends up at `to`.
    ///
    /// This is a single-element move, not a swap: the other components keep
    /// their relative order.
    pub fn reorder_components(&mut self, from: usize, to: usize) -> Result<(), BuilderError> {
        let len = self.components.len();
        for index in [from, to] {
            if index >= len {
                return Err(BuilderError::IndexOutOfRange { index, len });
            }
        }
        let component = self.components.remove(from);
        self.components.insert(to, component);
        debug!(from, to, "components reordered");
        Ok(())
    }

    /// Handles a drag-and-drop gesture that dropped `active` over `over`.
    pub fn move_component(
        &mut self,
        active: ComponentId,
        over: ComponentId,
    ) -> Result<(), BuilderError> {
        if active == over {
            return Ok(());
        }
        let from = self.index_of(active).ok_or(BuilderError::NotFound(active))?;
        let to = self.index_of(over).ok_or(BuilderError::NotFound(over))?;
        self.reorder_components(from, to)
    }

    /// Sets the selection. Selecting an id that does not exist clears it.
    pub fn select_component(&mut self, id: Option<ComponentId>) {
        self.selected = id.filter(|id| self.get(*id).is_some());
        if id.is_some() && self.selected.is_none() {
            debug!("selection cleared: component does not exist");
        }
    }
}
