//! Attachment errors
//!
//! Transitions report *why* they were refused through [`AttachError`]. The
//! [`World`](super::World) turns these into a logged warning plus a
//! `false`/`None` result, leaving every participant as it was.

use super::{BackendKind, OwnerKind};

/// Reasons an attach or hierarchy operation was refused
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum AttachError {
    /// Already attached to a container of this kind
    #[error("already attached to a {0}")]
    AlreadyAttached(OwnerKind),

    /// The target backend is not in the support set
    #[error("backend {0:?} is not supported")]
    UnsupportedBackend(BackendKind),

    /// This kind of container cannot own the thing being attached
    #[error("a {0} cannot own this object")]
    InvalidOwner(OwnerKind),

    /// Host device cannot render this backend
    #[error("backend {0:?} is unavailable on this device")]
    BackendUnavailable(BackendKind),

    /// The object was destroyed
    #[error("object has been destroyed")]
    Destroyed,

    /// Handle does not resolve
    #[error("handle does not refer to a live object")]
    UnknownHandle,

    /// A group operation was invoked on an entity
    #[error("node is not a group")]
    NotAGroup,

    /// A reference child does not belong to the group
    #[error("node is not a child of this group")]
    NotAChild,

    /// Positional insert or removal outside the child list
    #[error("index {index} is out of range for {len} children")]
    IndexOutOfRange {
        /// Requested index
        index: usize,
        /// Current number of children
        len: usize,
    },

    /// The group would end up containing itself
    #[error("adding this node would make the group its own ancestor")]
    WouldCycle,
}
