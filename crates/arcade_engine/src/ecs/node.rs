//! Scene graph nodes
//!
//! Entities and groups share a [`NodeCore`]: identity, lifecycle flags,
//! container handles and the component collection. [`Node`] is the tagged
//! union the [`World`](super::World) stores.

use uuid::Uuid;

use crate::events::Signal;
use crate::foundation::collections::{LayerId, NodeId, StateId};

use super::component::{Owner, OwnerKind, Transition};
use super::component_manager::ComponentManager;
use super::components::{Alpha, Position, Visible};
use super::entity::Entity;
use super::group::Group;
use super::{AttachError, BackendKind, BackendSupport};

/// Lifecycle notifications of a node
#[derive(Debug, Default)]
pub struct NodeSignals {
    /// Joined a container
    pub added: Signal<Owner>,
    /// Left a container
    pub removed: Signal<Owner>,
    /// Moved to a new index within its parent group
    pub reordered: Signal<usize>,
}

impl NodeSignals {
    fn dispose(&self) {
        self.added.dispose();
        self.removed.dispose();
        self.reordered.dispose();
    }
}

/// State shared by entities and groups
#[derive(Debug)]
pub struct NodeCore {
    handle: NodeId,
    kind: OwnerKind,
    name: String,
    id: Option<Uuid>,
    exists: bool,
    active: bool,
    will_render: bool,
    backend: BackendKind,
    support: BackendSupport,
    parent: Option<NodeId>,
    layer: Option<LayerId>,
    state: Option<StateId>,
    destroyed: bool,
    components: ComponentManager,
    signals: NodeSignals,
}

impl NodeCore {
    pub(crate) fn new(handle: NodeId, kind: OwnerKind, name: impl Into<String>, support: BackendSupport) -> Self {
        let owner = match kind {
            OwnerKind::Group => Owner::Group(handle),
            _ => Owner::Entity(handle),
        };
        Self {
            handle,
            kind,
            name: name.into(),
            id: None,
            exists: true,
            active: true,
            will_render: true,
            backend: BackendKind::Unassigned,
            support,
            parent: None,
            layer: None,
            state: None,
            destroyed: false,
            components: ComponentManager::new(owner),
            signals: NodeSignals::default(),
        }
    }

    /// World handle
    pub const fn handle(&self) -> NodeId {
        self.handle
    }

    /// Entity or group
    pub const fn kind(&self) -> OwnerKind {
        self.kind
    }

    /// This node as a component owner
    pub const fn as_owner(&self) -> Owner {
        match self.kind {
            OwnerKind::Group => Owner::Group(self.handle),
            _ => Owner::Entity(self.handle),
        }
    }

    /// Display name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Rename
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Unique id, assigned the first time the node joins a state
    pub const fn id(&self) -> Option<Uuid> {
        self.id
    }

    /// Living flag; dead nodes stay in the tree but are skipped by the
    /// `*_alive` group helpers
    pub const fn exists(&self) -> bool {
        self.exists
    }

    /// Set the living flag
    pub fn set_exists(&mut self, exists: bool) {
        self.exists = exists && !self.destroyed;
    }

    /// Whether the node takes part in update walks
    pub const fn active(&self) -> bool {
        self.active
    }

    /// Enable or disable updates
    pub fn set_active(&mut self, active: bool) {
        self.active = active && !self.destroyed;
    }

    /// Whether the node takes part in render walks
    pub const fn will_render(&self) -> bool {
        self.will_render
    }

    /// Enable or disable rendering
    pub fn set_will_render(&mut self, will_render: bool) {
        self.will_render = will_render && !self.destroyed;
    }

    /// Backend of the layer the node is on
    pub const fn backend(&self) -> BackendKind {
        self.backend
    }

    /// Backends the node can be drawn with
    pub const fn support(&self) -> BackendSupport {
        self.support
    }

    /// Whether the node can join a `backend` layer
    pub const fn supports_type(&self, backend: BackendKind) -> bool {
        self.support.supports(backend)
    }

    /// Parent group
    pub const fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Layer the node renders on
    pub const fn layer(&self) -> Option<LayerId> {
        self.layer
    }

    /// State the node belongs to
    pub const fn state(&self) -> Option<StateId> {
        self.state
    }

    /// Whether [`World::destroy`](super::World::destroy) ran on the node
    pub const fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    /// Attached components
    pub const fn components(&self) -> &ComponentManager {
        &self.components
    }

    /// Attached components, mutable
    pub fn components_mut(&mut self) -> &mut ComponentManager {
        &mut self.components
    }

    /// Lifecycle signals
    pub const fn signals(&self) -> &NodeSignals {
        &self.signals
    }

    /// Apply a container transition to this node
    ///
    /// Refusals leave the node untouched. Accepted transitions are forwarded
    /// to every component and announced on the node's signals. Nodes cannot
    /// be owned by an entity.
    pub fn modify(&mut self, transition: Transition) -> Result<(), AttachError> {
        match transition {
            Transition::Added { owner, backend } => {
                if self.destroyed {
                    return Err(AttachError::Destroyed);
                }
                match owner {
                    Owner::State(state) => {
                        if self.state.is_some() {
                            return Err(AttachError::AlreadyAttached(OwnerKind::State));
                        }
                        self.state = Some(state);
                        self.id.get_or_insert_with(Uuid::new_v4);
                    }
                    Owner::Layer(layer) => {
                        if self.layer.is_some() {
                            return Err(AttachError::AlreadyAttached(OwnerKind::Layer));
                        }
                        if !self.supports_type(backend) {
                            return Err(AttachError::UnsupportedBackend(backend));
                        }
                        self.layer = Some(layer);
                        self.backend = backend;
                        self.components.set_backend(backend);
                    }
                    Owner::Group(group) => {
                        if self.parent.is_some() {
                            return Err(AttachError::AlreadyAttached(OwnerKind::Group));
                        }
                        if !self.supports_type(backend) {
                            return Err(AttachError::UnsupportedBackend(backend));
                        }
                        self.parent = Some(group);
                    }
                    Owner::Entity(_) => return Err(AttachError::InvalidOwner(OwnerKind::Entity)),
                }
                self.components.propagate(&transition);
                self.signals.added.dispatch(owner);
            }
            Transition::Removed(owner) => {
                match owner {
                    Owner::State(_) => self.state = None,
                    Owner::Layer(_) => self.layer = None,
                    Owner::Group(_) => self.parent = None,
                    Owner::Entity(_) => return Err(AttachError::InvalidOwner(OwnerKind::Entity)),
                }
                self.components.propagate(&transition);
                self.signals.removed.dispatch(owner);
            }
        }
        Ok(())
    }

    pub(crate) fn destroy(&mut self) {
        if self.destroyed {
            return;
        }
        self.components.remove_all(true);
        self.signals.dispose();
        self.exists = false;
        self.active = false;
        self.will_render = false;
        self.parent = None;
        self.layer = None;
        self.state = None;
        self.destroyed = true;
    }

    /// X from the position component
    pub fn x(&self) -> Option<f64> {
        self.components.get::<Position>().map(Position::x)
    }

    /// Y from the position component
    pub fn y(&self) -> Option<f64> {
        self.components.get::<Position>().map(Position::y)
    }

    /// Move the node; false without a position component
    pub fn set_position(&mut self, x: f64, y: f64) -> bool {
        self.components
            .get_mut::<Position>()
            .map(|position| position.set_xy(x, y))
            .is_some()
    }

    /// Opacity from the alpha component
    pub fn alpha(&self) -> Option<f64> {
        self.components.get::<Alpha>().map(Alpha::value)
    }

    /// Set opacity; false without an alpha component
    pub fn set_alpha(&mut self, alpha: f64) -> bool {
        self.components
            .get_mut::<Alpha>()
            .map(|component| component.set_value(alpha))
            .is_some()
    }

    /// Visibility from the visible component, visible when absent
    pub fn visible(&self) -> bool {
        self.components.get::<Visible>().map_or(true, Visible::value)
    }

    /// Show or hide; false without a visible component
    pub fn set_visible(&mut self, visible: bool) -> bool {
        self.components
            .get_mut::<Visible>()
            .map(|component| component.set_value(visible))
            .is_some()
    }
}

/// A scene graph node
#[derive(Debug)]
pub enum Node {
    /// Leaf object
    Entity(Entity),
    /// Ordered container of nodes
    Group(Group),
}

impl Node {
    /// Shared node state
    pub fn core(&self) -> &NodeCore {
        match self {
            Self::Entity(entity) => entity.core(),
            Self::Group(group) => group.core(),
        }
    }

    /// Shared node state, mutable
    pub fn core_mut(&mut self) -> &mut NodeCore {
        match self {
            Self::Entity(entity) => entity.core_mut(),
            Self::Group(group) => group.core_mut(),
        }
    }

    /// Whether this node is a group
    pub fn is_group(&self) -> bool {
        matches!(self, Self::Group(_))
    }

    /// Group view
    pub fn as_group(&self) -> Option<&Group> {
        match self {
            Self::Group(group) => Some(group),
            Self::Entity(_) => None,
        }
    }

    /// Group view, mutable
    pub fn as_group_mut(&mut self) -> Option<&mut Group> {
        match self {
            Self::Group(group) => Some(group),
            Self::Entity(_) => None,
        }
    }

    /// Entity view
    pub fn as_entity(&self) -> Option<&Entity> {
        match self {
            Self::Entity(entity) => Some(entity),
            Self::Group(_) => None,
        }
    }

    /// Children in order; empty for entities
    pub fn children(&self) -> &[NodeId] {
        match self {
            Self::Group(group) => group.children(),
            Self::Entity(_) => &[],
        }
    }
}
