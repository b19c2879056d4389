//! Render layers and game states

use crate::foundation::collections::{LayerId, NodeId, StateId};

use super::component::Owner;
use super::component_manager::ComponentManager;
use super::BackendKind;

/// A rendering surface of one backend holding root nodes
#[derive(Debug)]
pub struct Layer {
    name: String,
    backend: BackendKind,
    state: StateId,
    visible: bool,
    members: Vec<NodeId>,
    components: ComponentManager,
}

impl Layer {
    pub(super) fn new(handle: LayerId, state: StateId, name: impl Into<String>, backend: BackendKind) -> Self {
        let mut components = ComponentManager::new(Owner::Layer(handle));
        components.set_backend(backend);
        Self {
            name: name.into(),
            backend,
            state,
            visible: true,
            members: Vec::new(),
            components,
        }
    }

    /// Display name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Rendering technology of this layer
    pub const fn backend(&self) -> BackendKind {
        self.backend
    }

    /// State the layer belongs to
    pub const fn state(&self) -> StateId {
        self.state
    }

    /// Hidden layers are skipped by render walks
    pub const fn visible(&self) -> bool {
        self.visible
    }

    /// Show or hide the layer
    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    /// Root nodes in render order
    pub fn members(&self) -> &[NodeId] {
        &self.members
    }

    /// Whether `node` is a root member
    pub fn contains(&self, node: NodeId) -> bool {
        self.members.contains(&node)
    }

    /// Layer-level components
    pub const fn components(&self) -> &ComponentManager {
        &self.components
    }

    /// Layer-level components, mutable
    pub fn components_mut(&mut self) -> &mut ComponentManager {
        &mut self.components
    }

    pub(super) fn members_mut(&mut self) -> &mut Vec<NodeId> {
        &mut self.members
    }
}

/// A game state: a set of layers plus the nodes that belong to it
#[derive(Debug)]
pub struct State {
    name: String,
    layers: Vec<LayerId>,
    members: Vec<NodeId>,
    components: ComponentManager,
}

impl State {
    pub(super) fn new(handle: StateId, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            layers: Vec::new(),
            members: Vec::new(),
            components: ComponentManager::new(Owner::State(handle)),
        }
    }

    /// Display name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Layers in render order
    pub fn layers(&self) -> &[LayerId] {
        &self.layers
    }

    /// First layer created, where new root nodes land by default
    pub fn default_layer(&self) -> Option<LayerId> {
        self.layers.first().copied()
    }

    /// Root nodes added directly to the state
    pub fn members(&self) -> &[NodeId] {
        &self.members
    }

    /// Whether `node` was added directly to the state
    pub fn contains(&self, node: NodeId) -> bool {
        self.members.contains(&node)
    }

    /// State-level components
    pub const fn components(&self) -> &ComponentManager {
        &self.components
    }

    /// State-level components, mutable
    pub fn components_mut(&mut self) -> &mut ComponentManager {
        &mut self.components
    }

    pub(super) fn layers_mut(&mut self) -> &mut Vec<LayerId> {
        &mut self.layers
    }

    pub(super) fn members_mut(&mut self) -> &mut Vec<NodeId> {
        &mut self.members
    }
}
