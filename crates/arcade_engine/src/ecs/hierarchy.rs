//! Group child operations
//!
//! Every operation validates all participants before touching any of them, so
//! a refused call leaves the tree exactly as it was. A child moved into a
//! group is first detached from its previous parent (or layer root list) and
//! then inherits the group's layer and state.

use crate::foundation::collections::{LayerId, NodeId};

use super::component::{NamedComponent, Owner, Transition};
use super::group::Group;
use super::node::Node;
use super::world::World;
use super::{AttachError, BackendKind};

impl World {
    fn group_target(&self, group: NodeId) -> Result<&Group, AttachError> {
        self.live_core(group)?;
        self.node(group)
            .and_then(Node::as_group)
            .ok_or(AttachError::NotAGroup)
    }

    /// Whether `ancestor` appears in the parent chain of `node`
    pub fn is_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = self.node(node).and_then(|found| found.core().parent());
        while let Some(parent) = current {
            if parent == ancestor {
                return true;
            }
            current = self.node(parent).and_then(|found| found.core().parent());
        }
        false
    }

    /// Insert `child` at `index` (append when `None`)
    fn attach_child(&mut self, group: NodeId, child: NodeId, index: Option<usize>) -> Result<NodeId, AttachError> {
        if group == child {
            return Err(AttachError::WouldCycle);
        }
        let target = self.group_target(group)?;
        let backend = target.core().backend();
        let (layer, state) = (target.core().layer(), target.core().state());
        let len = target.len();

        let core = self.live_core(child)?;
        if core.parent() == Some(group) {
            return Ok(child);
        }
        if !core.supports_type(backend) {
            return Err(AttachError::UnsupportedBackend(backend));
        }
        if self.is_ancestor(child, group) {
            return Err(AttachError::WouldCycle);
        }
        if let Some(index) = index {
            if index > len {
                return Err(AttachError::IndexOutOfRange { index, len });
            }
        }

        let (old_parent, old_layer, old_state) = (core.parent(), core.layer(), core.state());
        if let Some(old_parent) = old_parent {
            self.detach_child(old_parent, child)?;
        }
        if let Some(old_layer) = old_layer {
            if self.layer(old_layer).is_some_and(|found| found.contains(child)) {
                self.try_remove_from_layer(old_layer, child)?;
            }
        }
        if let (Some(old_state), Some(_)) = (old_state, state) {
            if self.state(old_state).is_some_and(|found| found.contains(child)) {
                self.try_remove_from_state(old_state, child)?;
            }
        }

        self.live_core_mut(child)?
            .modify(Transition::added(Owner::Group(group), backend))?;
        if let Some(children) = self.node_mut(group).and_then(Node::as_group_mut).map(|found| found.children_mut()) {
            match index {
                Some(index) => children.insert(index, child),
                None => children.push(child),
            }
        }

        if let Some(layer) = layer {
            self.inherit_layer(child, layer, backend);
        }
        if let Some(state) = state {
            let needs_state = self.node(child).is_some_and(|found| found.core().state().is_none());
            if needs_state {
                let result = self
                    .live_core_mut(child)
                    .and_then(|core| core.modify(Transition::added(Owner::State(state), BackendKind::Unassigned)));
                match result {
                    Ok(()) => self.cascade_state(child, state),
                    Err(error) => self.logger().warn(&format!("child {child:?} refused state: {error}")),
                }
            }
        }
        self.announce_indices(group);
        Ok(child)
    }

    fn inherit_layer(&mut self, child: NodeId, layer: LayerId, backend: BackendKind) {
        let result = self
            .live_core_mut(child)
            .and_then(|core| core.modify(Transition::added(Owner::Layer(layer), backend)));
        match result {
            Ok(()) => self.cascade_layer(child, layer, backend),
            Err(error) => {
                if let Some(found) = self.node_mut(child) {
                    found.core_mut().set_exists(false);
                }
                self.logger()
                    .warn(&format!("child {child:?} refused layer {layer:?}: {error}"));
            }
        }
    }

    /// Take `child` out of `group`, undoing what it inherited from the group
    pub(crate) fn detach_child(&mut self, group: NodeId, child: NodeId) -> Result<usize, AttachError> {
        self.live_core(child)?;
        let target = self
            .node_mut(group)
            .and_then(Node::as_group_mut)
            .ok_or(AttachError::NotAGroup)?;
        let index = target.index_of(child).ok_or(AttachError::NotAChild)?;
        target.children_mut().remove(index);
        let (layer, state) = (target.core().layer(), target.core().state());

        let core = self.live_core_mut(child)?;
        core.modify(Transition::Removed(Owner::Group(group)))?;
        let inherited_layer = layer.filter(|&layer| core.layer() == Some(layer));
        let inherited_state = state.filter(|&state| core.state() == Some(state));
        if let Some(layer) = inherited_layer {
            core.modify(Transition::Removed(Owner::Layer(layer)))?;
        }
        if let Some(state) = inherited_state {
            core.modify(Transition::Removed(Owner::State(state)))?;
        }

        if let Some(layer) = inherited_layer {
            self.uncascade_layer(child, layer);
        }
        if let Some(state) = inherited_state {
            self.uncascade_state(child, state);
        }
        self.announce_indices(group);
        Ok(index)
    }

    /// Tell every child of `group` its current index
    fn announce_indices(&self, group: NodeId) {
        for (index, &child) in self.children_of(group).iter().enumerate() {
            if let Some(found) = self.node(child) {
                found.core().signals().reordered.dispatch(index);
            }
        }
    }

    /// Append a child
    pub fn add_child(&mut self, group: NodeId, child: NodeId) -> Option<NodeId> {
        let result = self.attach_child(group, child, None);
        self.settle("add_child", result)
    }

    /// Insert a child at `index`
    pub fn add_child_at(&mut self, group: NodeId, child: NodeId, index: usize) -> Option<NodeId> {
        let result = self.attach_child(group, child, Some(index));
        self.settle("add_child_at", result)
    }

    /// Insert a child just before `before`
    pub fn add_child_before(&mut self, group: NodeId, child: NodeId, before: NodeId) -> Option<NodeId> {
        let result = self
            .get_child_index(group, before)
            .ok_or(AttachError::NotAChild)
            .and_then(|index| self.attach_child(group, child, Some(index)));
        self.settle("add_child_before", result)
    }

    /// Insert a child just after `after`
    pub fn add_child_after(&mut self, group: NodeId, child: NodeId, after: NodeId) -> Option<NodeId> {
        let result = self
            .get_child_index(group, after)
            .ok_or(AttachError::NotAChild)
            .and_then(|index| self.attach_child(group, child, Some(index + 1)));
        self.settle("add_child_after", result)
    }

    /// Remove a child
    pub fn remove_child(&mut self, group: NodeId, child: NodeId) -> Option<NodeId> {
        let result = self.detach_child(group, child).map(|_| child);
        self.settle("remove_child", result)
    }

    /// Remove the child at `index`
    pub fn remove_child_at(&mut self, group: NodeId, index: usize) -> Option<NodeId> {
        let result = self.group_target(group).and_then(|target| {
            target
                .children()
                .get(index)
                .copied()
                .ok_or(AttachError::IndexOutOfRange { index, len: target.len() })
        });
        let result = result.and_then(|child| self.detach_child(group, child).map(|_| child));
        self.settle("remove_child_at", result)
    }

    /// Remove the children in `begin..end`; `end` is clamped to the child count
    pub fn remove_children(&mut self, group: NodeId, begin: usize, end: usize) -> Vec<NodeId> {
        let doomed = match self.group_target(group) {
            Ok(target) => {
                let end = end.min(target.len());
                target.children().get(begin..end).map(<[NodeId]>::to_vec).unwrap_or_default()
            }
            Err(error) => {
                self.settle::<()>("remove_children", Err(error));
                return Vec::new();
            }
        };
        doomed
            .into_iter()
            .filter(|&child| self.detach_child(group, child).is_ok())
            .collect()
    }

    /// Exchange the positions of two children
    pub fn swap_children(&mut self, group: NodeId, first: NodeId, second: NodeId) -> bool {
        let result = self.group_target(group).and_then(|target| {
            let first = target.index_of(first).ok_or(AttachError::NotAChild)?;
            let second = target.index_of(second).ok_or(AttachError::NotAChild)?;
            Ok((first, second))
        });
        let result = result.and_then(|(first, second)| self.swap_indices(group, first, second));
        self.settle("swap_children", result).is_some()
    }

    /// Exchange the children at two indices
    pub fn swap_children_at(&mut self, group: NodeId, first: usize, second: usize) -> bool {
        let result = self.swap_indices(group, first, second);
        self.settle("swap_children_at", result).is_some()
    }

    fn swap_indices(&mut self, group: NodeId, first: usize, second: usize) -> Result<(), AttachError> {
        let target = self
            .node_mut(group)
            .and_then(Node::as_group_mut)
            .ok_or(AttachError::NotAGroup)?;
        let len = target.len();
        for index in [first, second] {
            if index >= len {
                return Err(AttachError::IndexOutOfRange { index, len });
            }
        }
        target.children_mut().swap(first, second);
        let moved = [(target.children()[first], first), (target.children()[second], second)];
        for (child, index) in moved {
            if let Some(found) = self.node(child) {
                found.core().signals().reordered.dispatch(index);
            }
        }
        Ok(())
    }

    /// Put `new_child` where `old_child` was
    ///
    /// If `new_child` is already a child of the group it is moved.
    pub fn replace_child(&mut self, group: NodeId, old_child: NodeId, new_child: NodeId) -> bool {
        let result = self.try_replace_child(group, old_child, new_child);
        self.settle("replace_child", result).is_some()
    }

    fn try_replace_child(&mut self, group: NodeId, old_child: NodeId, new_child: NodeId) -> Result<(), AttachError> {
        if old_child == new_child {
            return Ok(());
        }
        let target = self.group_target(group)?;
        let backend = target.core().backend();
        target.index_of(old_child).ok_or(AttachError::NotAChild)?;
        let core = self.live_core(new_child)?;
        if !core.supports_type(backend) {
            return Err(AttachError::UnsupportedBackend(backend));
        }
        if new_child == group || self.is_ancestor(new_child, group) {
            return Err(AttachError::WouldCycle);
        }

        if core.parent() == Some(group) {
            self.detach_child(group, new_child)?;
        }
        let index = self.detach_child(group, old_child)?;
        self.attach_child(group, new_child, Some(index)).map(|_| ())
    }

    /// Child at `index`
    pub fn get_child_at(&self, group: NodeId, index: usize) -> Option<NodeId> {
        self.group(group)?.children().get(index).copied()
    }

    /// Index of a direct child
    pub fn get_child_index(&self, group: NodeId, child: NodeId) -> Option<usize> {
        self.group(group)?.index_of(child)
    }

    /// Whether `child` is a direct child of `group`
    pub fn contains_child(&self, group: NodeId, child: NodeId) -> bool {
        self.get_child_index(group, child).is_some()
    }

    /// Whether `node` is anywhere below `group`
    pub fn contains_descendant(&self, group: NodeId, node: NodeId) -> bool {
        group != node && self.is_ancestor(group, node)
    }

    /// Number of direct children
    pub fn num_children(&self, group: NodeId) -> usize {
        self.group(group).map_or(0, Group::len)
    }

    /// Children whose `exists` flag is set
    pub fn count_living(&self, group: NodeId) -> usize {
        self.children_of(group)
            .into_iter()
            .filter(|&child| self.node(child).is_some_and(|found| found.core().exists()))
            .count()
    }

    /// Children whose `exists` flag is cleared
    pub fn count_dead(&self, group: NodeId) -> usize {
        self.num_children(group) - self.count_living(group)
    }

    /// First dead child, for pooling
    pub fn first_dead(&self, group: NodeId) -> Option<NodeId> {
        self.children_of(group)
            .into_iter()
            .find(|&child| self.node(child).is_some_and(|found| !found.core().exists()))
    }

    /// Visit every child in order
    pub fn for_each(&mut self, group: NodeId, mut visit: impl FnMut(NodeId, &mut Node)) {
        for child in self.children_of(group) {
            if let Some(found) = self.node_mut(child) {
                visit(child, found);
            }
        }
    }

    /// Visit every living child in order
    pub fn for_each_alive(&mut self, group: NodeId, mut visit: impl FnMut(NodeId, &mut Node)) {
        self.for_each(group, |child, found| {
            if found.core().exists() {
                visit(child, found);
            }
        });
    }

    /// Apply `assign` to component `T` of every child that has one
    ///
    /// Returns the number of children changed.
    pub fn set_all<T: NamedComponent>(&mut self, group: NodeId, mut assign: impl FnMut(&mut T)) -> usize {
        let mut changed = 0;
        self.for_each(group, |_, found| {
            if let Some(component) = found.core_mut().components_mut().get_mut::<T>() {
                assign(component);
                changed += 1;
            }
        });
        changed
    }

    /// Call `method` on component `T` of every child that has one, collecting
    /// the results in child order
    pub fn call_all<T: NamedComponent, R>(&mut self, group: NodeId, mut method: impl FnMut(&mut T) -> R) -> Vec<R> {
        let mut results = Vec::new();
        self.for_each(group, |_, found| {
            if let Some(component) = found.core_mut().components_mut().get_mut::<T>() {
                results.push(method(component));
            }
        });
        results
    }
}
