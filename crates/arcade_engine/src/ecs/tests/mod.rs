//! Scene graph tests that need a whole [`World`]

mod attachment;
mod frame;
mod hierarchy;

use std::cell::RefCell;
use std::rc::Rc;

use crate::core::EngineConfig;
use crate::ecs::component_manager::Siblings;
use crate::ecs::render::RenderContext;
use crate::ecs::{Component, ComponentBase, World};
use crate::foundation::collections::NodeId;
use crate::foundation::logging::{Logger, MemoryLogger};

type Journal = Rc<RefCell<Vec<String>>>;

/// Records every hook it receives
struct Tracer {
    base: ComponentBase,
    tag: &'static str,
    journal: Journal,
}

impl Tracer {
    fn boxed(tag: &'static str, journal: &Journal) -> Box<dyn Component> {
        Box::new(Self {
            base: ComponentBase::new("tracer"),
            tag,
            journal: Rc::clone(journal),
        })
    }

    fn note(&self, hook: &str) {
        self.journal.borrow_mut().push(format!("{hook}:{}", self.tag));
    }
}

impl Component for Tracer {
    crate::impl_component_base!(base);

    fn pre_update(&mut self, _siblings: &mut Siblings<'_>) {
        self.note("pre");
    }

    fn update(&mut self, _siblings: &mut Siblings<'_>) {
        self.note("update");
    }

    fn post_update(&mut self, _siblings: &mut Siblings<'_>) {
        self.note("post");
    }

    fn render(&mut self, _siblings: &mut Siblings<'_>, _ctx: &mut RenderContext<'_>) {
        self.note("render");
    }
}

fn world() -> (World, Rc<MemoryLogger>) {
    let logger = Rc::new(MemoryLogger::new());
    let sink: Rc<dyn Logger> = Rc::clone(&logger) as Rc<dyn Logger>;
    (World::with_logger(&EngineConfig::default(), sink), logger)
}

fn names(world: &World, nodes: &[NodeId]) -> Vec<String> {
    nodes
        .iter()
        .filter_map(|&node| world.node(node))
        .map(|found| found.core().name().to_string())
        .collect()
}

fn child_names(world: &World, group: NodeId) -> Vec<String> {
    let children = world.group(group).map(|found| found.children().to_vec()).unwrap_or_default();
    names(world, &children)
}
