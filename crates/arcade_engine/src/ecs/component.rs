//! Component trait and attachment state
//!
//! A component is a unit of state/behaviour composed onto an entity, group,
//! layer or state. It is always owned by exactly one
//! [`ComponentManager`](super::ComponentManager); what it keeps about its
//! owner is a set of non-owning handles in [`ComponentBase`].
//!
//! Attachment follows eight transitions, written as
//! [`Transition::Added`]/[`Transition::Removed`] of an [`Owner`]. Each
//! relationship kind holds at most one owner at a time.

use std::any::Any;
use std::fmt;

use crate::events::Signal;
use crate::foundation::collections::{LayerId, NodeId, StateId};

use super::component_manager::Siblings;
use super::render::{RenderContext, StyleSink};
use super::{AttachError, BackendKind, BackendSupport};

/// The four kinds of container in the scene
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OwnerKind {
    /// Game state
    State,
    /// Render layer
    Layer,
    /// Group node
    Group,
    /// Entity node
    Entity,
}

impl fmt::Display for OwnerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::State => "state",
            Self::Layer => "layer",
            Self::Group => "group",
            Self::Entity => "entity",
        };
        f.write_str(name)
    }
}

/// Handle to a container, tagged with its kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Owner {
    /// A game state
    State(StateId),
    /// A render layer
    Layer(LayerId),
    /// A group node
    Group(NodeId),
    /// An entity node
    Entity(NodeId),
}

impl Owner {
    /// Kind of container
    pub const fn kind(&self) -> OwnerKind {
        match self {
            Self::State(_) => OwnerKind::State,
            Self::Layer(_) => OwnerKind::Layer,
            Self::Group(_) => OwnerKind::Group,
            Self::Entity(_) => OwnerKind::Entity,
        }
    }

    /// Node handle for group and entity owners
    pub const fn node(&self) -> Option<NodeId> {
        match self {
            Self::Group(id) | Self::Entity(id) => Some(*id),
            Self::State(_) | Self::Layer(_) => None,
        }
    }
}

/// Attach/detach transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Added to a container rendered through `backend`
    Added {
        /// New owner
        owner: Owner,
        /// Backend of the owner, [`BackendKind::Unassigned`] if it has none yet
        backend: BackendKind,
    },
    /// Removed from a container
    Removed(Owner),
}

impl Transition {
    /// Shorthand for [`Transition::Added`]
    pub const fn added(owner: Owner, backend: BackendKind) -> Self {
        Self::Added { owner, backend }
    }

    /// The container involved
    pub const fn owner(&self) -> Owner {
        match self {
            Self::Added { owner, .. } | Self::Removed(owner) => *owner,
        }
    }

    /// Whether this is an added transition
    pub const fn is_added(&self) -> bool {
        matches!(self, Self::Added { .. })
    }
}

/// State shared by every component
#[derive(Debug)]
pub struct ComponentBase {
    name: String,
    active: bool,
    dirty: bool,
    support: BackendSupport,
    state: Option<StateId>,
    layer: Option<LayerId>,
    group: Option<NodeId>,
    entity: Option<NodeId>,
    destroyed: bool,
    /// Fired after an added transition was accepted
    pub on_added: Signal<Owner>,
    /// Fired after a removed transition
    pub on_removed: Signal<Owner>,
}

impl ComponentBase {
    /// Detached, active base supporting Canvas and DOM
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            active: true,
            dirty: false,
            support: BackendSupport::STANDARD,
            state: None,
            layer: None,
            group: None,
            entity: None,
            destroyed: false,
            on_added: Signal::new(),
            on_removed: Signal::new(),
        }
    }

    /// Replace the backend support set
    #[must_use]
    pub fn with_support(mut self, support: BackendSupport) -> Self {
        self.support = support;
        self
    }

    /// Key of the component within its owner
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether hooks run
    pub const fn is_active(&self) -> bool {
        self.active
    }

    /// Enable or disable hooks
    pub fn set_active(&mut self, active: bool) {
        self.active = active && !self.destroyed;
    }

    /// Whether a value changed since the last render sync
    pub const fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Flag a value change
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Consume the dirty flag, returning its previous value
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    /// Supported backends
    pub const fn support(&self) -> BackendSupport {
        self.support
    }

    /// Whether the component can live on a `backend` layer
    pub const fn supports_type(&self, backend: BackendKind) -> bool {
        self.support.supports(backend)
    }

    /// Owning state, if any
    pub const fn state(&self) -> Option<StateId> {
        self.state
    }

    /// Owning layer, if any
    pub const fn layer(&self) -> Option<LayerId> {
        self.layer
    }

    /// Owning group, if any
    pub const fn group(&self) -> Option<NodeId> {
        self.group
    }

    /// Owning entity, if any
    pub const fn entity(&self) -> Option<NodeId> {
        self.entity
    }

    /// Node the component lives on, entity first
    pub fn owner_node(&self) -> Option<NodeId> {
        self.entity.or(self.group)
    }

    /// Whether [`ComponentBase::destroy`] ran
    pub const fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    const fn slot(&self, kind: OwnerKind) -> bool {
        match kind {
            OwnerKind::State => self.state.is_some(),
            OwnerKind::Layer => self.layer.is_some(),
            OwnerKind::Group => self.group.is_some(),
            OwnerKind::Entity => self.entity.is_some(),
        }
    }

    /// Apply a transition
    ///
    /// Added transitions are refused when a container of the same kind is
    /// already attached or when the owner's backend is unsupported; the base is
    /// left untouched in that case. Removed transitions always succeed but
    /// only clear the slot, and notify, when it holds that same owner.
    pub fn modify(&mut self, transition: Transition) -> Result<(), AttachError> {
        match transition {
            Transition::Added { owner, backend } => {
                if self.destroyed {
                    return Err(AttachError::Destroyed);
                }
                if self.slot(owner.kind()) {
                    return Err(AttachError::AlreadyAttached(owner.kind()));
                }
                if !self.supports_type(backend) {
                    return Err(AttachError::UnsupportedBackend(backend));
                }
                match owner {
                    Owner::State(id) => self.state = Some(id),
                    Owner::Layer(id) => self.layer = Some(id),
                    Owner::Group(id) => self.group = Some(id),
                    Owner::Entity(id) => self.entity = Some(id),
                }
                self.on_added.dispatch(owner);
            }
            Transition::Removed(owner) => {
                match owner {
                    Owner::State(id) if self.state == Some(id) => self.state = None,
                    Owner::Layer(id) if self.layer == Some(id) => self.layer = None,
                    Owner::Group(id) if self.group == Some(id) => self.group = None,
                    Owner::Entity(id) if self.entity == Some(id) => self.entity = None,
                    _ => return Ok(()),
                }
                self.on_removed.dispatch(owner);
            }
        }
        Ok(())
    }

    /// Terminal transition; idempotent
    pub fn destroy(&mut self) {
        if self.destroyed {
            return;
        }
        self.destroyed = true;
        self.active = false;
        self.dirty = false;
        self.state = None;
        self.layer = None;
        self.group = None;
        self.entity = None;
        self.on_added.dispose();
        self.on_removed.dispose();
    }
}

/// A unit of state or behaviour attached to a scene container
///
/// Only [`Component::base`], [`Component::base_mut`] and the two `as_any`
/// accessors are required; [`impl_component_base!`](crate::impl_component_base)
/// writes them. Every hook is a no-op by default and is only invoked by the
/// manager while the component is active. Update and render hooks get the
/// owner's other components through [`Siblings`].
pub trait Component: Any {
    /// Shared state
    fn base(&self) -> &ComponentBase;
    /// Shared state, mutable
    fn base_mut(&mut self) -> &mut ComponentBase;
    /// Upcast for typed lookup
    fn as_any(&self) -> &dyn Any;
    /// Upcast for typed lookup
    fn as_any_mut(&mut self) -> &mut dyn Any;

    /// Key within the owner
    fn name(&self) -> &str {
        self.base().name()
    }

    /// Whether the component can live on a `backend` layer
    fn supports_type(&self, backend: BackendKind) -> bool {
        self.base().supports_type(backend)
    }

    /// Attach/detach entry point
    fn modify(&mut self, transition: Transition) -> Result<(), AttachError> {
        self.base_mut().modify(transition)
    }

    /// The owner itself joined or left a container
    fn owner_changed(&mut self, _transition: &Transition) {}

    /// Before update
    fn pre_update(&mut self, _siblings: &mut Siblings<'_>) {}
    /// Per tick simulation
    fn update(&mut self, _siblings: &mut Siblings<'_>) {}
    /// After update
    fn post_update(&mut self, _siblings: &mut Siblings<'_>) {}
    /// Before render
    fn pre_render(&mut self, _siblings: &mut Siblings<'_>, _ctx: &mut RenderContext<'_>) {}
    /// Render sync
    fn render(&mut self, _siblings: &mut Siblings<'_>, _ctx: &mut RenderContext<'_>) {}
    /// After render
    fn post_render(&mut self, _siblings: &mut Siblings<'_>, _ctx: &mut RenderContext<'_>) {}

    /// Queue this component's CSS for the next batched DOM flush
    fn add_style_updates(&self, _styles: &mut dyn StyleSink) {}

    /// Apply this component's CSS right away
    fn add_style_immediately(&self, _styles: &mut dyn StyleSink) {}

    /// Hand dirty values to the renderer and clear the flag
    ///
    /// DOM layers get queued style updates; canvas layers read the raw values
    /// themselves so only the flag is consumed.
    fn sync_styles(&mut self, ctx: &mut RenderContext<'_>) {
        if self.base_mut().take_dirty() && ctx.backend == BackendKind::Dom {
            self.add_style_updates(ctx.styles);
        }
    }

    /// Terminal transition
    fn destroy(&mut self) {
        self.base_mut().destroy();
    }
}

/// A component type with a fixed key, enabling typed lookup
pub trait NamedComponent: Component {
    /// Key the component is stored under
    const NAME: &'static str;
}

/// Implements the four required [`Component`] accessors for a struct whose
/// [`ComponentBase`] lives in the named field.
#[macro_export]
macro_rules! impl_component_base {
    ($field:ident) => {
        fn base(&self) -> &$crate::ecs::ComponentBase {
            &self.$field
        }

        fn base_mut(&mut self) -> &mut $crate::ecs::ComponentBase {
            &mut self.$field
        }

        fn as_any(&self) -> &dyn ::std::any::Any {
            self
        }

        fn as_any_mut(&mut self) -> &mut dyn ::std::any::Any {
            self
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use slotmap::SlotMap;

    fn handles() -> (NodeId, NodeId, LayerId) {
        let mut nodes: SlotMap<NodeId, ()> = SlotMap::with_key();
        let mut layers: SlotMap<LayerId, ()> = SlotMap::with_key();
        (nodes.insert(()), nodes.insert(()), layers.insert(()))
    }

    #[test]
    fn test_second_attachment_of_same_kind_is_refused() {
        let (first, second, _) = handles();
        let mut base = ComponentBase::new("Tracer");

        base.modify(Transition::added(Owner::Entity(first), BackendKind::Unassigned)).unwrap();
        let err = base
            .modify(Transition::added(Owner::Entity(second), BackendKind::Unassigned))
            .unwrap_err();

        assert_eq!(err, AttachError::AlreadyAttached(OwnerKind::Entity));
        assert_eq!(base.entity(), Some(first));
    }

    #[test]
    fn test_kinds_are_independent() {
        let (entity, group, layer) = handles();
        let mut base = ComponentBase::new("Tracer");

        base.modify(Transition::added(Owner::Entity(entity), BackendKind::Canvas)).unwrap();
        base.modify(Transition::added(Owner::Group(group), BackendKind::Canvas)).unwrap();
        base.modify(Transition::added(Owner::Layer(layer), BackendKind::Canvas)).unwrap();

        assert_eq!(base.owner_node(), Some(entity));
        assert_eq!(base.layer(), Some(layer));
    }

    #[test]
    fn test_unsupported_backend_is_refused() {
        let (entity, _, _) = handles();
        let mut base = ComponentBase::new("Tracer").with_support(BackendSupport::DOM);

        let err = base
            .modify(Transition::added(Owner::Entity(entity), BackendKind::Canvas))
            .unwrap_err();
        assert_eq!(err, AttachError::UnsupportedBackend(BackendKind::Canvas));
        assert_eq!(base.entity(), None);
    }

    #[test]
    fn test_removal_clears_handle_and_notifies() {
        use std::cell::Cell;
        use std::rc::Rc;

        let (entity, _, _) = handles();
        let mut base = ComponentBase::new("Tracer");
        let removed = Rc::new(Cell::new(0));
        let counter = Rc::clone(&removed);
        base.on_removed
            .add(&crate::events::listener(move |_: &Owner| counter.set(counter.get() + 1)), 0)
            .unwrap();

        base.modify(Transition::added(Owner::Entity(entity), BackendKind::Unassigned)).unwrap();
        base.modify(Transition::Removed(Owner::Entity(entity))).unwrap();

        assert_eq!(base.entity(), None);
        assert_eq!(removed.get(), 1);
        // can attach again afterwards
        assert!(base.modify(Transition::added(Owner::Entity(entity), BackendKind::Unassigned)).is_ok());
    }

    #[test]
    fn test_removal_from_another_owner_keeps_handle() {
        use std::cell::Cell;
        use std::rc::Rc;

        let (owner, stranger, _) = handles();
        let mut base = ComponentBase::new("Tracer");
        let removed = Rc::new(Cell::new(0));
        let counter = Rc::clone(&removed);
        base.on_removed
            .add(&crate::events::listener(move |_: &Owner| counter.set(counter.get() + 1)), 0)
            .unwrap();

        base.modify(Transition::added(Owner::Entity(owner), BackendKind::Unassigned)).unwrap();
        assert!(base.modify(Transition::Removed(Owner::Entity(stranger))).is_ok());
        assert!(base.modify(Transition::Removed(Owner::Group(stranger))).is_ok());

        assert_eq!(base.entity(), Some(owner));
        assert_eq!(removed.get(), 0);
    }

    #[test]
    fn test_destroy_is_terminal_and_idempotent() {
        let (entity, _, _) = handles();
        let mut base = ComponentBase::new("Tracer");
        base.modify(Transition::added(Owner::Entity(entity), BackendKind::Unassigned)).unwrap();

        base.destroy();
        base.destroy();
        base.set_active(true);

        assert!(base.is_destroyed());
        assert!(!base.is_active());
        assert_eq!(base.entity(), None);
        assert_eq!(
            base.modify(Transition::added(Owner::Entity(entity), BackendKind::Unassigned)),
            Err(AttachError::Destroyed)
        );
    }
}
