//! Per-owner component storage
//!
//! Every entity, group, layer and state owns one [`ComponentManager`]. It
//! keeps components keyed by name in insertion order and fans lifecycle hooks
//! out to the active ones.
//!
//! While a hook runs, the component being called is lifted out of its slot
//! and the rest of the collection is lent to it as [`Siblings`], which allows
//! lookups but no structural changes. Component code therefore never observes
//! the collection being reshaped under it.

use crate::foundation::logging::{debug, LOG_TARGET};

use super::component::{Component, NamedComponent, Owner, Transition};
use super::render::{RenderContext, StyleSink};
use super::{AttachError, BackendKind};

struct Entry {
    name: String,
    component: Option<Box<dyn Component>>,
}

fn find<'a>(entries: &'a [Entry], name: &str) -> Option<&'a (dyn Component + 'static)> {
    entries
        .iter()
        .find(|entry| entry.name == name)
        .and_then(|entry| entry.component.as_deref())
}

fn find_mut<'a>(entries: &'a mut [Entry], name: &str) -> Option<&'a mut (dyn Component + 'static)> {
    entries
        .iter_mut()
        .find(|entry| entry.name == name)
        .and_then(|entry| entry.component.as_deref_mut())
}

/// Read access to components by name, shared by managers and sibling views
pub trait ComponentLookup {
    /// Component stored under `name`
    fn lookup(&self, name: &str) -> Option<&dyn Component>;

    /// Typed component
    fn find<T: NamedComponent>(&self) -> Option<&T>
    where
        Self: Sized,
    {
        self.lookup(T::NAME).and_then(|component| component.as_any().downcast_ref::<T>())
    }
}

/// The owner's other components, lent to a running hook
pub struct Siblings<'a> {
    entries: &'a mut [Entry],
}

impl Siblings<'_> {
    /// Component stored under `name`
    pub fn get_component(&self, name: &str) -> Option<&dyn Component> {
        find(&*self.entries, name).map(|component| component as &dyn Component)
    }

    /// Mutable component stored under `name`
    pub fn get_component_mut(&mut self, name: &str) -> Option<&mut (dyn Component + 'static)> {
        find_mut(&mut *self.entries, name)
    }

    /// Typed component
    pub fn get<T: NamedComponent>(&self) -> Option<&T> {
        find(&*self.entries, T::NAME).and_then(|component| component.as_any().downcast_ref::<T>())
    }

    /// Typed component, mutable
    pub fn get_mut<T: NamedComponent>(&mut self) -> Option<&mut T> {
        find_mut(&mut *self.entries, T::NAME).and_then(|component| component.as_any_mut().downcast_mut::<T>())
    }

    /// Whether a sibling named `name` exists
    pub fn has_component(&self, name: &str) -> bool {
        find(&*self.entries, name).is_some()
    }
}

impl ComponentLookup for Siblings<'_> {
    fn lookup(&self, name: &str) -> Option<&dyn Component> {
        self.get_component(name)
    }
}

/// Ordered, name-keyed collection of components belonging to one owner
pub struct ComponentManager {
    owner: Owner,
    backend: BackendKind,
    entries: Vec<Entry>,
}

impl std::fmt::Debug for ComponentManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ComponentManager")
            .field("owner", &self.owner)
            .field("backend", &self.backend)
            .field("components", &self.names())
            .finish()
    }
}

impl ComponentManager {
    /// Empty manager for `owner`
    pub fn new(owner: Owner) -> Self {
        Self {
            owner,
            backend: BackendKind::Unassigned,
            entries: Vec::new(),
        }
    }

    /// The container this manager belongs to
    pub const fn owner(&self) -> Owner {
        self.owner
    }

    /// Backend new components are validated against
    pub const fn backend(&self) -> BackendKind {
        self.backend
    }

    /// Record the backend of the layer the owner joined
    pub fn set_backend(&mut self, backend: BackendKind) {
        self.backend = backend;
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.entries.iter().position(|entry| entry.name == name)
    }

    /// Attach a component to the owner
    ///
    /// The component's added transition runs first; if it is refused the
    /// manager is left untouched and the component is dropped. A previously
    /// stored component with the same name is detached, destroyed and
    /// replaced in place, keeping its position in the update order.
    pub fn add(&mut self, mut component: Box<dyn Component>) -> Result<(), AttachError> {
        component.modify(Transition::added(self.owner, self.backend))?;
        let name = component.name().to_string();

        match self.position(&name) {
            Some(index) => {
                if let Some(mut previous) = self.entries[index].component.replace(component) {
                    debug!(target: LOG_TARGET, "replacing component '{name}' on {:?}", self.owner);
                    let _ = previous.modify(Transition::Removed(self.owner));
                    previous.destroy();
                }
            }
            None => self.entries.push(Entry { name, component: Some(component) }),
        }
        Ok(())
    }

    /// Whether a component named `name` is attached
    pub fn has_component(&self, name: &str) -> bool {
        find(&self.entries, name).is_some()
    }

    /// Whether a component named `name` is attached and active
    pub fn has_active_component(&self, name: &str) -> bool {
        find(&self.entries, name).is_some_and(|component| component.base().is_active())
    }

    /// Component stored under `name`
    pub fn get_component(&self, name: &str) -> Option<&dyn Component> {
        find(&self.entries, name).map(|component| component as &dyn Component)
    }

    /// Mutable component stored under `name`
    pub fn get_component_mut(&mut self, name: &str) -> Option<&mut (dyn Component + 'static)> {
        find_mut(&mut self.entries, name)
    }

    /// Typed component
    pub fn get<T: NamedComponent>(&self) -> Option<&T> {
        find(&self.entries, T::NAME).and_then(|component| component.as_any().downcast_ref::<T>())
    }

    /// Typed component, mutable
    pub fn get_mut<T: NamedComponent>(&mut self) -> Option<&mut T> {
        find_mut(&mut self.entries, T::NAME).and_then(|component| component.as_any_mut().downcast_mut::<T>())
    }

    /// Detach the component named `name`
    ///
    /// With `destroy` set the component is destroyed before being handed back.
    pub fn remove_component(&mut self, name: &str, destroy: bool) -> Option<Box<dyn Component>> {
        let index = self.position(name)?;
        let mut component = self.entries.remove(index).component?;
        let _ = component.modify(Transition::Removed(self.owner));
        if destroy {
            component.destroy();
        }
        Some(component)
    }

    /// Detach every component, destroying them when asked
    pub fn remove_all(&mut self, destroy: bool) -> usize {
        let entries = std::mem::take(&mut self.entries);
        let count = entries.len();
        for mut component in entries.into_iter().filter_map(|entry| entry.component) {
            let _ = component.modify(Transition::Removed(self.owner));
            if destroy {
                component.destroy();
            }
        }
        count
    }

    /// Component names in insertion order
    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|entry| entry.name.as_str()).collect()
    }

    /// Number of attached components
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no component is attached
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Components in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &dyn Component> + '_ {
        self.entries
            .iter()
            .filter_map(|entry| entry.component.as_deref())
            .map(|component| component as &dyn Component)
    }

    fn run_hook<F>(&mut self, mut hook: F)
    where
        F: FnMut(&mut dyn Component, &mut Siblings<'_>),
    {
        for index in 0..self.entries.len() {
            let Some(mut component) = self.entries[index].component.take() else {
                continue;
            };
            if component.base().is_active() {
                let mut siblings = Siblings { entries: &mut self.entries };
                hook(component.as_mut(), &mut siblings);
            }
            self.entries[index].component = Some(component);
        }
    }

    /// Run every active component's pre-update hook
    pub fn pre_update(&mut self) {
        self.run_hook(|component, siblings| component.pre_update(siblings));
    }

    /// Run every active component's update hook
    pub fn update(&mut self) {
        self.run_hook(|component, siblings| component.update(siblings));
    }

    /// Run every active component's post-update hook
    pub fn post_update(&mut self) {
        self.run_hook(|component, siblings| component.post_update(siblings));
    }

    /// Run every active component's pre-render hook
    pub fn pre_render(&mut self, ctx: &mut RenderContext<'_>) {
        self.run_hook(|component, siblings| component.pre_render(siblings, ctx));
    }

    /// Run every active component's render hook
    pub fn render(&mut self, ctx: &mut RenderContext<'_>) {
        self.run_hook(|component, siblings| component.render(siblings, ctx));
    }

    /// Run every active component's post-render hook
    pub fn post_render(&mut self, ctx: &mut RenderContext<'_>) {
        self.run_hook(|component, siblings| component.post_render(siblings, ctx));
    }

    /// Tell every component that the owner went through `transition`
    pub fn propagate(&mut self, transition: &Transition) {
        for component in self.entries.iter_mut().filter_map(|entry| entry.component.as_deref_mut()) {
            component.owner_changed(transition);
        }
    }

    /// Queue every component's CSS
    pub fn add_style_updates(&self, styles: &mut dyn StyleSink) {
        for component in self.iter() {
            component.add_style_updates(styles);
        }
    }

    /// Apply every component's CSS immediately
    pub fn add_style_immediately(&self, styles: &mut dyn StyleSink) {
        for component in self.iter() {
            component.add_style_immediately(styles);
        }
    }
}

impl ComponentLookup for ComponentManager {
    fn lookup(&self, name: &str) -> Option<&dyn Component> {
        self.get_component(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::{BackendSupport, ComponentBase, OwnerKind};
    use crate::foundation::collections::{NodeId, SlotMap};
    use std::cell::RefCell;
    use std::rc::Rc;

    type Journal = Rc<RefCell<Vec<String>>>;

    struct Tracer {
        base: ComponentBase,
        tag: &'static str,
        journal: Journal,
    }

    impl Tracer {
        fn boxed(name: &str, tag: &'static str, journal: &Journal) -> Box<dyn Component> {
            Box::new(Self {
                base: ComponentBase::new(name),
                tag,
                journal: Rc::clone(journal),
            })
        }
    }

    impl Component for Tracer {
        crate::impl_component_base!(base);

        fn update(&mut self, siblings: &mut Siblings<'_>) {
            let others = usize::from(siblings.has_component("a")) + usize::from(siblings.has_component("b"));
            self.journal.borrow_mut().push(format!("update {} sees {others}", self.tag));
        }

        fn owner_changed(&mut self, transition: &Transition) {
            self.journal.borrow_mut().push(format!("{} {}", self.tag, transition.is_added()));
        }

        fn destroy(&mut self) {
            self.journal.borrow_mut().push(format!("destroy {}", self.tag));
            self.base.destroy();
        }
    }

    fn manager() -> ComponentManager {
        let mut nodes: SlotMap<NodeId, ()> = SlotMap::with_key();
        ComponentManager::new(Owner::Entity(nodes.insert(())))
    }

    #[test]
    fn test_hooks_run_in_insertion_order() {
        let journal = Journal::default();
        let mut components = manager();
        components.add(Tracer::boxed("b", "first", &journal)).unwrap();
        components.add(Tracer::boxed("a", "second", &journal)).unwrap();

        components.update();

        // the running component is not visible to itself
        assert_eq!(*journal.borrow(), vec!["update first sees 1", "update second sees 1"]);
        assert_eq!(components.names(), vec!["b", "a"]);
    }

    #[test]
    fn test_inactive_components_are_skipped() {
        let journal = Journal::default();
        let mut components = manager();
        components.add(Tracer::boxed("a", "on", &journal)).unwrap();
        components.add(Tracer::boxed("b", "off", &journal)).unwrap();
        components.get_component_mut("b").unwrap().base_mut().set_active(false);

        components.update();

        assert_eq!(*journal.borrow(), vec!["update on sees 1"]);
        assert!(components.has_component("b"));
        assert!(!components.has_active_component("b"));
    }

    #[test]
    fn test_duplicate_name_replaces_in_place() {
        let journal = Journal::default();
        let mut components = manager();
        components.add(Tracer::boxed("a", "old", &journal)).unwrap();
        components.add(Tracer::boxed("z", "other", &journal)).unwrap();
        components.add(Tracer::boxed("a", "new", &journal)).unwrap();

        assert_eq!(components.len(), 2);
        assert_eq!(components.names(), vec!["a", "z"]);
        assert!(journal.borrow().contains(&"destroy old".to_string()));

        journal.borrow_mut().clear();
        components.update();
        assert_eq!(journal.borrow()[0], "update new sees 0");
    }

    #[test]
    fn test_refused_component_is_not_stored() {
        let journal = Journal::default();
        let mut components = manager();
        components.set_backend(BackendKind::WebGl);

        let tracer = Tracer {
            base: ComponentBase::new("a").with_support(BackendSupport::CANVAS),
            tag: "gl",
            journal,
        };
        let result = components.add(Box::new(tracer));

        assert_eq!(result, Err(AttachError::UnsupportedBackend(BackendKind::WebGl)));
        assert!(components.is_empty());
    }

    #[test]
    fn test_remove_component_detaches_and_optionally_destroys() {
        let journal = Journal::default();
        let mut components = manager();
        components.add(Tracer::boxed("a", "kept", &journal)).unwrap();
        components.add(Tracer::boxed("b", "gone", &journal)).unwrap();

        let kept = components.remove_component("a", false).unwrap();
        assert!(kept.base().entity().is_none());
        assert!(!kept.base().is_destroyed());

        let gone = components.remove_component("b", true).unwrap();
        assert!(gone.base().is_destroyed());
        assert!(components.remove_component("b", true).is_none());
        assert!(components.is_empty());
    }

    #[test]
    fn test_propagate_reaches_every_component() {
        let journal = Journal::default();
        let mut components = manager();
        components.add(Tracer::boxed("a", "one", &journal)).unwrap();
        components.add(Tracer::boxed("b", "two", &journal)).unwrap();
        let owner = components.owner();
        assert_eq!(owner.kind(), OwnerKind::Entity);

        components.propagate(&Transition::Removed(owner));

        assert_eq!(*journal.borrow(), vec!["one false", "two false"]);
    }
}
