//! Scene world
//!
//! The [`World`] owns every node, layer and state in slot maps and is the
//! only place where relationships between them change. Node-level
//! [`NodeCore::modify`] calls validate a single participant; the world
//! strings them together (parent handle, layer membership, cascades into
//! children) and reports refusals through its [`Logger`].
//!
//! Group child operations live in the `hierarchy` module as a second
//! `impl World` block.

use std::rc::Rc;

use crate::core::{DeviceCapabilities, EngineConfig};
use crate::foundation::collections::{LayerId, NodeId, SlotMap, StateId};
use crate::foundation::logging::{LogFacade, Logger};

use super::component::{Component, NamedComponent, Owner, OwnerKind, Transition};
use super::components::{Input, PointerState};
use super::entity::Entity;
use super::group::Group;
use super::layer::{Layer, State};
use super::node::{Node, NodeCore};
use super::render::{Camera, RenderContext, StyleSink};
use super::{AttachError, BackendKind, BackendSupport};

/// Arena of nodes, layers and states
pub struct World {
    nodes: SlotMap<NodeId, Node>,
    layers: SlotMap<LayerId, Layer>,
    states: SlotMap<StateId, State>,
    capabilities: DeviceCapabilities,
    camera: Camera,
    logger: Rc<dyn Logger>,
}

impl World {
    /// World reporting through the `log` facade
    pub fn new(config: &EngineConfig) -> Self {
        Self::with_logger(config, Rc::new(LogFacade))
    }

    /// World reporting through a custom logger
    pub fn with_logger(config: &EngineConfig, logger: Rc<dyn Logger>) -> Self {
        Self {
            nodes: SlotMap::with_key(),
            layers: SlotMap::with_key(),
            states: SlotMap::with_key(),
            capabilities: config.capabilities,
            camera: Camera::for_stage(&config.stage),
            logger,
        }
    }

    /// What the host can render with
    pub const fn capabilities(&self) -> DeviceCapabilities {
        self.capabilities
    }

    /// Camera used by render walks
    pub const fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Camera used by render walks, mutable
    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    /// Diagnostics sink
    pub fn logger(&self) -> &Rc<dyn Logger> {
        &self.logger
    }

    /// Turn a refusal into a warning
    pub(crate) fn settle<T>(&self, operation: &str, result: Result<T, AttachError>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(error) => {
                self.logger.warn(&format!("{operation} rejected: {error}"));
                None
            }
        }
    }

    // --- nodes ---

    /// New detached entity supporting Canvas and DOM
    pub fn create_entity(&mut self, name: &str) -> NodeId {
        self.create_entity_with_support(name, BackendSupport::STANDARD)
    }

    /// New detached entity with an explicit support set
    pub fn create_entity_with_support(&mut self, name: &str, support: BackendSupport) -> NodeId {
        self.nodes
            .insert_with_key(|handle| Node::Entity(Entity::new(handle, name, support)))
    }

    /// New empty group supporting Canvas and DOM
    pub fn create_group(&mut self, name: &str) -> NodeId {
        self.create_group_with_support(name, BackendSupport::STANDARD)
    }

    /// New empty group with an explicit support set
    pub fn create_group_with_support(&mut self, name: &str, support: BackendSupport) -> NodeId {
        self.nodes
            .insert_with_key(|handle| Node::Group(Group::new(handle, name, support)))
    }

    /// Look up a node
    pub fn node(&self, node: NodeId) -> Option<&Node> {
        self.nodes.get(node)
    }

    /// Look up a node, mutable
    pub fn node_mut(&mut self, node: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(node)
    }

    /// Look up a group
    pub fn group(&self, node: NodeId) -> Option<&Group> {
        self.nodes.get(node).and_then(Node::as_group)
    }

    /// Two distinct nodes at once
    pub fn node_pair_mut(&mut self, first: NodeId, second: NodeId) -> Option<[&mut Node; 2]> {
        self.nodes.get_disjoint_mut([first, second])
    }

    /// Whether the handle resolves
    pub fn contains_node(&self, node: NodeId) -> bool {
        self.nodes.contains_key(node)
    }

    /// Every stored node, destroyed ones included until purged
    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &Node)> + '_ {
        self.nodes.iter()
    }

    /// Number of stored nodes
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub(crate) fn live_core(&self, node: NodeId) -> Result<&NodeCore, AttachError> {
        match self.nodes.get(node) {
            None => Err(AttachError::UnknownHandle),
            Some(found) if found.core().is_destroyed() => Err(AttachError::Destroyed),
            Some(found) => Ok(found.core()),
        }
    }

    pub(crate) fn live_core_mut(&mut self, node: NodeId) -> Result<&mut NodeCore, AttachError> {
        match self.nodes.get_mut(node) {
            None => Err(AttachError::UnknownHandle),
            Some(found) if found.core().is_destroyed() => Err(AttachError::Destroyed),
            Some(found) => Ok(found.core_mut()),
        }
    }

    pub(crate) fn children_of(&self, node: NodeId) -> Vec<NodeId> {
        self.nodes
            .get(node)
            .map(|found| found.children().to_vec())
            .unwrap_or_default()
    }

    /// Apply a raw transition to one node, without touching its containers
    pub fn modify(&mut self, node: NodeId, transition: Transition) -> bool {
        let result = self
            .live_core_mut(node)
            .and_then(|core| core.modify(transition));
        self.settle("modify", result).is_some()
    }

    // --- components ---

    /// Attach a component to a node
    pub fn add_component(&mut self, node: NodeId, component: Box<dyn Component>) -> bool {
        let result = self
            .live_core_mut(node)
            .and_then(|core| core.components_mut().add(component));
        self.settle("add_component", result).is_some()
    }

    /// New entity carrying `components`
    ///
    /// Components the entity refuses are logged and skipped.
    pub fn spawn(&mut self, name: &str, components: Vec<Box<dyn Component>>) -> NodeId {
        let node = self.create_entity(name);
        for component in components {
            self.add_component(node, component);
        }
        node
    }

    /// Detach a component from a node
    pub fn remove_component(&mut self, node: NodeId, name: &str, destroy: bool) -> Option<Box<dyn Component>> {
        self.nodes
            .get_mut(node)?
            .core_mut()
            .components_mut()
            .remove_component(name, destroy)
    }

    /// Typed component of a node
    pub fn component<T: NamedComponent>(&self, node: NodeId) -> Option<&T> {
        self.nodes.get(node)?.core().components().get::<T>()
    }

    /// Typed component of a node, mutable
    pub fn component_mut<T: NamedComponent>(&mut self, node: NodeId) -> Option<&mut T> {
        self.nodes.get_mut(node)?.core_mut().components_mut().get_mut::<T>()
    }

    /// Attach a component to a layer
    pub fn add_layer_component(&mut self, layer: LayerId, component: Box<dyn Component>) -> bool {
        let result = self
            .layers
            .get_mut(layer)
            .ok_or(AttachError::UnknownHandle)
            .and_then(|found| found.components_mut().add(component));
        self.settle("add_layer_component", result).is_some()
    }

    /// Attach a component to a state
    pub fn add_state_component(&mut self, state: StateId, component: Box<dyn Component>) -> bool {
        let result = self
            .states
            .get_mut(state)
            .ok_or(AttachError::UnknownHandle)
            .and_then(|found| found.components_mut().add(component));
        self.settle("add_state_component", result).is_some()
    }

    // --- states and layers ---

    /// New empty state
    pub fn create_state(&mut self, name: &str) -> StateId {
        self.states.insert_with_key(|handle| State::new(handle, name))
    }

    /// Look up a state
    pub fn state(&self, state: StateId) -> Option<&State> {
        self.states.get(state)
    }

    /// Look up a state, mutable
    pub fn state_mut(&mut self, state: StateId) -> Option<&mut State> {
        self.states.get_mut(state)
    }

    /// New layer of `backend` appended to a state
    ///
    /// Refused when the device cannot render `backend`.
    pub fn create_layer(&mut self, state: StateId, name: &str, backend: BackendKind) -> Option<LayerId> {
        let result = self.try_create_layer(state, name, backend);
        self.settle("create_layer", result)
    }

    fn try_create_layer(&mut self, state: StateId, name: &str, backend: BackendKind) -> Result<LayerId, AttachError> {
        if backend == BackendKind::Unassigned {
            return Err(AttachError::UnsupportedBackend(backend));
        }
        if !self.capabilities.supports(backend) {
            return Err(AttachError::BackendUnavailable(backend));
        }
        if !self.states.contains_key(state) {
            return Err(AttachError::UnknownHandle);
        }
        let layer = self
            .layers
            .insert_with_key(|handle| Layer::new(handle, state, name, backend));
        if let Some(owner) = self.states.get_mut(state) {
            owner.layers_mut().push(layer);
        }
        Ok(layer)
    }

    /// Look up a layer
    pub fn layer(&self, layer: LayerId) -> Option<&Layer> {
        self.layers.get(layer)
    }

    /// Look up a layer, mutable
    pub fn layer_mut(&mut self, layer: LayerId) -> Option<&mut Layer> {
        self.layers.get_mut(layer)
    }

    /// Put a root node on a layer, cascading into its children
    pub fn add_to_layer(&mut self, layer: LayerId, node: NodeId) -> bool {
        let result = self.try_add_to_layer(layer, node);
        self.settle("add_to_layer", result).is_some()
    }

    fn try_add_to_layer(&mut self, layer: LayerId, node: NodeId) -> Result<(), AttachError> {
        let backend = self.layers.get(layer).ok_or(AttachError::UnknownHandle)?.backend();
        let core = self.live_core_mut(node)?;
        if core.parent().is_some() {
            return Err(AttachError::AlreadyAttached(OwnerKind::Group));
        }
        core.modify(Transition::added(Owner::Layer(layer), backend))?;
        if let Some(target) = self.layers.get_mut(layer) {
            target.members_mut().push(node);
        }
        self.cascade_layer(node, layer, backend);
        Ok(())
    }

    /// Take a root node off a layer
    pub fn remove_from_layer(&mut self, layer: LayerId, node: NodeId) -> bool {
        let result = self.try_remove_from_layer(layer, node);
        self.settle("remove_from_layer", result).is_some()
    }

    pub(crate) fn try_remove_from_layer(&mut self, layer: LayerId, node: NodeId) -> Result<(), AttachError> {
        let target = self.layers.get_mut(layer).ok_or(AttachError::UnknownHandle)?;
        let index = target
            .members()
            .iter()
            .position(|&member| member == node)
            .ok_or(AttachError::NotAChild)?;
        target.members_mut().remove(index);
        if let Some(found) = self.nodes.get_mut(node) {
            found.core_mut().modify(Transition::Removed(Owner::Layer(layer)))?;
        }
        self.uncascade_layer(node, layer);
        Ok(())
    }

    /// Add a node to a state
    ///
    /// The node gets its identity on first admission and, when it is a free
    /// root, joins the state's default layer.
    pub fn add_to_state(&mut self, state: StateId, node: NodeId) -> bool {
        let result = self.try_add_to_state(state, node);
        self.settle("add_to_state", result).is_some()
    }

    fn try_add_to_state(&mut self, state: StateId, node: NodeId) -> Result<(), AttachError> {
        let default_layer = self.states.get(state).ok_or(AttachError::UnknownHandle)?.default_layer();
        let core = self.live_core_mut(node)?;
        core.modify(Transition::added(Owner::State(state), BackendKind::Unassigned))?;
        let free_root = core.layer().is_none() && core.parent().is_none();
        if let Some(target) = self.states.get_mut(state) {
            target.members_mut().push(node);
        }
        self.cascade_state(node, state);
        if let (true, Some(layer)) = (free_root, default_layer) {
            self.add_to_layer(layer, node);
        }
        Ok(())
    }

    /// Remove a node from a state, along with the state's layer it sits on
    pub fn remove_from_state(&mut self, state: StateId, node: NodeId) -> bool {
        let result = self.try_remove_from_state(state, node);
        self.settle("remove_from_state", result).is_some()
    }

    pub(crate) fn try_remove_from_state(&mut self, state: StateId, node: NodeId) -> Result<(), AttachError> {
        let target = self.states.get_mut(state).ok_or(AttachError::UnknownHandle)?;
        let index = target
            .members()
            .iter()
            .position(|&member| member == node)
            .ok_or(AttachError::NotAChild)?;
        target.members_mut().remove(index);

        let layer = self.nodes.get(node).and_then(|found| found.core().layer());
        if let Some(layer) = layer {
            let owned_root = self
                .layers
                .get(layer)
                .is_some_and(|found| found.state() == state && found.contains(node));
            if owned_root {
                self.try_remove_from_layer(layer, node)?;
            }
        }
        if let Some(found) = self.nodes.get_mut(node) {
            found.core_mut().modify(Transition::Removed(Owner::State(state)))?;
        }
        self.uncascade_state(node, state);
        Ok(())
    }

    /// Give every descendant of `node` the layer transition
    ///
    /// A refusing descendant is marked dead and keeps no layer; its siblings
    /// and the ancestors stay attached.
    pub(crate) fn cascade_layer(&mut self, node: NodeId, layer: LayerId, backend: BackendKind) {
        for child in self.children_of(node) {
            let result = self
                .live_core_mut(child)
                .and_then(|core| core.modify(Transition::added(Owner::Layer(layer), backend)));
            match result {
                Ok(()) => self.cascade_layer(child, layer, backend),
                Err(error) => {
                    if let Some(found) = self.nodes.get_mut(child) {
                        found.core_mut().set_exists(false);
                    }
                    self.logger
                        .warn(&format!("child {child:?} refused layer {layer:?}: {error}"));
                }
            }
        }
    }

    pub(crate) fn uncascade_layer(&mut self, node: NodeId, layer: LayerId) {
        for child in self.children_of(node) {
            let inherited = self
                .nodes
                .get(child)
                .is_some_and(|found| found.core().layer() == Some(layer));
            if inherited {
                if let Some(found) = self.nodes.get_mut(child) {
                    let _ = found.core_mut().modify(Transition::Removed(Owner::Layer(layer)));
                }
                self.uncascade_layer(child, layer);
            }
        }
    }

    pub(crate) fn cascade_state(&mut self, node: NodeId, state: StateId) {
        for child in self.children_of(node) {
            let result = self
                .live_core_mut(child)
                .and_then(|core| core.modify(Transition::added(Owner::State(state), BackendKind::Unassigned)));
            match result {
                Ok(()) => self.cascade_state(child, state),
                Err(error) => {
                    if let Some(found) = self.nodes.get_mut(child) {
                        found.core_mut().set_exists(false);
                    }
                    self.logger
                        .warn(&format!("child {child:?} refused state {state:?}: {error}"));
                }
            }
        }
    }

    pub(crate) fn uncascade_state(&mut self, node: NodeId, state: StateId) {
        for child in self.children_of(node) {
            let inherited = self
                .nodes
                .get(child)
                .is_some_and(|found| found.core().state() == Some(state));
            if inherited {
                if let Some(found) = self.nodes.get_mut(child) {
                    let _ = found.core_mut().modify(Transition::Removed(Owner::State(state)));
                }
                self.uncascade_state(child, state);
            }
        }
    }

    // --- frame walks ---

    /// Update a node: own pre-update and update, active children in order,
    /// then own post-update
    pub fn update(&mut self, node: NodeId) {
        let children = match self.nodes.get_mut(node) {
            Some(found) if !found.core().is_destroyed() => {
                let components = found.core_mut().components_mut();
                components.pre_update();
                components.update();
                found.children().to_vec()
            }
            _ => return,
        };
        for child in children {
            if self.nodes.get(child).is_some_and(|found| found.core().active()) {
                self.update(child);
            }
        }
        if let Some(found) = self.nodes.get_mut(node) {
            found.core_mut().components_mut().post_update();
        }
    }

    /// Render a node with the world camera
    pub fn render(&mut self, node: NodeId, styles: &mut dyn StyleSink) {
        let camera = self.camera.clone();
        self.render_with(node, &camera, styles);
    }

    fn render_with(&mut self, node: NodeId, camera: &Camera, styles: &mut dyn StyleSink) {
        let children = match self.nodes.get_mut(node) {
            Some(found) if !found.core().is_destroyed() => {
                let mut ctx = RenderContext::new(camera, found.core().backend(), styles);
                let components = found.core_mut().components_mut();
                components.pre_render(&mut ctx);
                components.render(&mut ctx);
                found.children().to_vec()
            }
            _ => return,
        };
        for child in children {
            if self.nodes.get(child).is_some_and(|found| found.core().active()) {
                self.render_with(child, camera, styles);
            }
        }
        if let Some(found) = self.nodes.get_mut(node) {
            let mut ctx = RenderContext::new(camera, found.core().backend(), styles);
            found.core_mut().components_mut().post_render(&mut ctx);
        }
    }

    /// Update a layer's components and its active root nodes
    pub fn update_layer(&mut self, layer: LayerId) {
        let members = match self.layers.get_mut(layer) {
            Some(found) => {
                found.components_mut().pre_update();
                found.components_mut().update();
                found.members().to_vec()
            }
            None => return,
        };
        for member in members {
            if self.nodes.get(member).is_some_and(|found| found.core().active()) {
                self.update(member);
            }
        }
        if let Some(found) = self.layers.get_mut(layer) {
            found.components_mut().post_update();
        }
    }

    /// Render a visible layer's components and its root nodes that will render
    pub fn render_layer(&mut self, layer: LayerId, styles: &mut dyn StyleSink) {
        let camera = self.camera.clone();
        if !camera.visible {
            return;
        }
        let (members, backend) = match self.layers.get_mut(layer) {
            Some(found) if found.visible() => {
                let backend = found.backend();
                let mut ctx = RenderContext::new(&camera, backend, styles);
                found.components_mut().pre_render(&mut ctx);
                found.components_mut().render(&mut ctx);
                (found.members().to_vec(), backend)
            }
            _ => return,
        };
        for member in members {
            if self.nodes.get(member).is_some_and(|found| found.core().will_render()) {
                self.render_with(member, &camera, styles);
            }
        }
        if let Some(found) = self.layers.get_mut(layer) {
            let mut ctx = RenderContext::new(&camera, backend, styles);
            found.components_mut().post_render(&mut ctx);
        }
    }

    /// Update a state's components and every one of its layers
    pub fn update_state(&mut self, state: StateId) {
        let layers = match self.states.get_mut(state) {
            Some(found) => {
                found.components_mut().pre_update();
                found.components_mut().update();
                found.layers().to_vec()
            }
            None => return,
        };
        for layer in layers {
            self.update_layer(layer);
        }
        if let Some(found) = self.states.get_mut(state) {
            found.components_mut().post_update();
        }
    }

    /// Render every layer of a state in order
    pub fn render_state(&mut self, state: StateId, styles: &mut dyn StyleSink) {
        let layers = match self.states.get(state) {
            Some(found) => found.layers().to_vec(),
            None => return,
        };
        for layer in layers {
            self.render_layer(layer, styles);
        }
    }

    /// Hand the current pointer to every input component
    ///
    /// Returns how many components received it; they act on it during their
    /// next update.
    pub fn dispatch_pointer(&mut self, pointer: PointerState) -> usize {
        let mut delivered = 0;
        for (_, found) in self.nodes.iter_mut() {
            if found.core().is_destroyed() {
                continue;
            }
            if let Some(input) = found.core_mut().components_mut().get_mut::<Input>() {
                input.set_pointer(pointer);
                delivered += 1;
            }
        }
        delivered
    }

    // --- destruction ---

    /// Destroy a node and its subtree
    ///
    /// The node leaves its parent, layer and state, children are destroyed
    /// recursively and components are destroyed. The slot stays until
    /// [`World::purge_destroyed`]; every later operation on it is refused.
    pub fn destroy(&mut self, node: NodeId) -> bool {
        let result = self.try_destroy(node);
        self.settle("destroy", result).is_some()
    }

    fn try_destroy(&mut self, node: NodeId) -> Result<(), AttachError> {
        let core = self.live_core(node)?;
        let (parent, layer, state) = (core.parent(), core.layer(), core.state());

        if let Some(parent) = parent {
            self.detach_child(parent, node)?;
        }
        if let Some(layer) = layer {
            if self.layers.get(layer).is_some_and(|found| found.contains(node)) {
                self.try_remove_from_layer(layer, node)?;
            }
        }
        if let Some(state) = state {
            if self.states.get(state).is_some_and(|found| found.contains(node)) {
                self.try_remove_from_state(state, node)?;
            }
        }
        for child in self.children_of(node) {
            let _ = self.try_destroy(child);
        }
        if let Some(found) = self.nodes.get_mut(node) {
            found.core_mut().destroy();
            if let Some(group) = found.as_group_mut() {
                group.children_mut().clear();
            }
        }
        self.logger.debug(&format!("destroyed node {node:?}"));
        Ok(())
    }

    /// Drop destroyed nodes from the arena, returning how many were removed
    pub fn purge_destroyed(&mut self) -> usize {
        let before = self.nodes.len();
        self.nodes.retain(|_, found| !found.core().is_destroyed());
        before - self.nodes.len()
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new(&EngineConfig::default())
    }
}
