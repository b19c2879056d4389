//! Arena handles
//!
//! Every cross-reference in the scene graph (component to owner, child to
//! parent, node to layer) is one of these copyable keys instead of a pointer.
//! Ownership flows strictly from container to contained; a handle that
//! outlives its target simply stops resolving.

pub use slotmap::{new_key_type, SlotMap};

new_key_type! {
    /// Handle to an entity or group stored in a [`World`](crate::ecs::World)
    pub struct NodeId;

    /// Handle to a render layer
    pub struct LayerId;

    /// Handle to a game state
    pub struct StateId;
}
