//! Group node
//!
//! A group is a node with an ordered child list. The list is only edited
//! through the [`World`](super::World) hierarchy operations, which keep the
//! children's parent handles and inherited containers consistent.

use crate::foundation::collections::NodeId;

use super::component::OwnerKind;
use super::node::NodeCore;
use super::BackendSupport;

/// Ordered container of child nodes
#[derive(Debug)]
pub struct Group {
    core: NodeCore,
    children: Vec<NodeId>,
}

impl Group {
    pub(super) fn new(handle: NodeId, name: impl Into<String>, support: BackendSupport) -> Self {
        Self {
            core: NodeCore::new(handle, OwnerKind::Group, name, support),
            children: Vec::new(),
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

    /// Children in update/render order
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Number of direct children
    pub fn len(&self) -> usize {
        self.children.len()
    }

    /// Whether the group has no children
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Index of a direct child
    pub fn index_of(&self, child: NodeId) -> Option<usize> {
        self.children.iter().position(|&id| id == child)
    }

    pub(super) fn children_mut(&mut self) -> &mut Vec<NodeId> {
        &mut self.children
    }
}
