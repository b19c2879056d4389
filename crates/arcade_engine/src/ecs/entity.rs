//! Entity implementation

use crate::foundation::collections::NodeId;

use super::component::OwnerKind;
use super::node::NodeCore;
use super::BackendSupport;

/// Leaf scene object whose behaviour comes entirely from its components
#[derive(Debug)]
pub struct Entity {
    core: NodeCore,
}

impl Entity {
    pub(super) fn new(handle: NodeId, name: impl Into<String>, support: BackendSupport) -> Self {
        Self {
            core: NodeCore::new(handle, OwnerKind::Entity, name, support),
        }
    }

    /// Shared node state
    pub const fn core(&self) -> &NodeCore {
        &self.core
    }

    /// Shared node state, mutable
    pub fn core_mut(&mut self) -> &mut NodeCore {
        &mut self.core
    }
}
