//! States, layers and the transitions between them

use std::cell::RefCell;
use std::rc::Rc;

use super::world;
use crate::ecs::components::Position;
use crate::ecs::{BackendKind, BackendSupport, Component, Owner, Transition};
use crate::events::listener;

#[test]
fn test_node_joins_one_state_and_its_default_layer() {
    let (mut world, logger) = world();
    let state = world.create_state("play");
    let layer = world.create_layer(state, "sprites", BackendKind::Canvas).unwrap();
    let other = world.create_state("menu");
    let node = world.create_entity("ship");

    assert!(world.add_to_state(state, node));
    let core = world.node(node).unwrap().core();
    assert_eq!(core.state(), Some(state));
    assert_eq!(core.layer(), Some(layer));
    assert_eq!(core.backend(), BackendKind::Canvas);
    assert!(core.id().is_some());
    assert!(world.layer(layer).unwrap().contains(node));

    assert!(!world.add_to_state(other, node));
    assert_eq!(world.node(node).unwrap().core().state(), Some(state));
    assert!(world.state(other).unwrap().members().is_empty());
    assert_eq!(logger.warning_count(), 1);
}

#[test]
fn test_identity_survives_leaving_and_rejoining() {
    let (mut world, _) = world();
    let first = world.create_state("first");
    let layer = world.create_layer(first, "main", BackendKind::Dom).unwrap();
    let second = world.create_state("second");
    let node = world.create_entity("hero");

    world.add_to_state(first, node);
    let id = world.node(node).unwrap().core().id();

    assert!(world.remove_from_state(first, node));
    let core = world.node(node).unwrap().core();
    assert_eq!(core.state(), None);
    assert_eq!(core.layer(), None);
    assert!(!world.layer(layer).unwrap().contains(node));

    assert!(world.add_to_state(second, node));
    assert_eq!(world.node(node).unwrap().core().id(), id);
}

#[test]
fn test_layer_creation_follows_device_capabilities() {
    let (mut world, logger) = world();
    let state = world.create_state("play");

    assert!(world.create_layer(state, "gl", BackendKind::WebGl).is_none());
    assert!(world.create_layer(state, "nothing", BackendKind::Unassigned).is_none());
    assert_eq!(logger.warning_count(), 2);

    let canvas = world.create_layer(state, "canvas", BackendKind::Canvas).unwrap();
    let dom = world.create_layer(state, "hud", BackendKind::Dom).unwrap();
    let found = world.state(state).unwrap();
    assert_eq!(found.layers(), &[canvas, dom]);
    assert_eq!(found.default_layer(), Some(canvas));
    assert_eq!(world.layer(dom).unwrap().state(), state);
}

#[test]
fn test_layer_refuses_node_without_matching_backend() {
    let (mut world, logger) = world();
    let state = world.create_state("play");
    let layer = world.create_layer(state, "canvas", BackendKind::Canvas).unwrap();
    let node = world.create_entity_with_support("label", BackendSupport::DOM);

    assert!(!world.add_to_layer(layer, node));
    assert_eq!(world.node(node).unwrap().core().layer(), None);
    assert!(world.layer(layer).unwrap().members().is_empty());
    assert_eq!(logger.warning_count(), 1);
}

#[test]
fn test_grouped_node_cannot_be_a_layer_root() {
    let (mut world, _) = world();
    let state = world.create_state("play");
    let layer = world.create_layer(state, "canvas", BackendKind::Canvas).unwrap();
    let group = world.create_group("squad");
    let child = world.create_entity("grunt");
    world.add_child(group, child);

    assert!(!world.add_to_layer(layer, child));
    assert_eq!(world.node(child).unwrap().core().parent(), Some(group));
}

#[test]
fn test_refusing_child_is_marked_dead_while_siblings_attach() {
    let (mut world, logger) = world();
    let state = world.create_state("play");
    let layer = world.create_layer(state, "canvas", BackendKind::Canvas).unwrap();
    let group = world.create_group("squad");
    let first = world.create_entity("first");
    let picky = world.create_entity_with_support("picky", BackendSupport::DOM);
    let last = world.create_entity("last");
    for child in [first, picky, last] {
        world.add_child(group, child);
    }

    assert!(world.add_to_layer(layer, group));

    let layer_of = |node| world.node(node).unwrap().core().layer();
    assert_eq!(layer_of(group), Some(layer));
    assert_eq!(layer_of(first), Some(layer));
    assert_eq!(layer_of(picky), None);
    assert_eq!(layer_of(last), Some(layer));
    assert!(!world.node(picky).unwrap().core().exists());
    assert_eq!(world.num_children(group), 3);
    assert_eq!(world.count_dead(group), 1);
    assert_eq!(logger.warning_count(), 1);
}

#[test]
fn test_node_signals_report_each_container() {
    let (mut world, _) = world();
    let state = world.create_state("play");
    let layer = world.create_layer(state, "canvas", BackendKind::Canvas).unwrap();
    let node = world.create_entity("ship");

    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    world
        .node(node)
        .unwrap()
        .core()
        .signals()
        .added
        .add(&listener(move |owner: &Owner| sink.borrow_mut().push(*owner)), 0)
        .unwrap();

    world.add_to_state(state, node);

    assert_eq!(*seen.borrow(), vec![Owner::State(state), Owner::Layer(layer)]);
}

#[test]
fn test_entity_cannot_own_a_node() {
    let (mut world, _) = world();
    let owner = world.create_entity("owner");
    let node = world.create_entity("node");

    assert!(!world.modify(node, Transition::added(Owner::Entity(owner), BackendKind::Canvas)));
    assert_eq!(world.node(node).unwrap().core().parent(), None);
}

#[test]
fn test_component_with_taken_name_replaces_the_old_one() {
    let (mut world, _) = world();
    let first: Box<dyn Component> = Box::new(Position::new(1.0, 2.0));
    let node = world.spawn("ship", vec![first]);

    assert!(world.add_component(node, Box::new(Position::new(5.0, 6.0))));

    let components = world.node(node).unwrap().core().components();
    assert_eq!(components.len(), 1);
    assert_eq!(world.component::<Position>(node).map(Position::x), Some(5.0));
    assert_eq!(world.node(node).unwrap().core().x(), Some(5.0));
}

#[test]
fn test_destroy_takes_the_subtree_out_of_every_container() {
    let (mut world, logger) = world();
    let state = world.create_state("play");
    let layer = world.create_layer(state, "canvas", BackendKind::Canvas).unwrap();
    let group = world.create_group("squad");
    let child = world.create_entity("grunt");
    world.add_child(group, child);
    world.add_to_state(state, group);
    assert_eq!(world.node(child).unwrap().core().layer(), Some(layer));

    assert!(world.destroy(group));

    for node in [group, child] {
        let core = world.node(node).unwrap().core();
        assert!(core.is_destroyed());
        assert!(!core.exists());
        assert_eq!(core.layer(), None);
        assert_eq!(core.state(), None);
        assert!(core.components().is_empty());
    }
    assert!(world.layer(layer).unwrap().members().is_empty());
    assert!(world.state(state).unwrap().members().is_empty());

    let spare = world.create_entity("spare");
    let before = logger.warning_count();
    assert!(world.add_child(group, spare).is_none());
    assert!(!world.add_to_state(state, child));
    assert!(!world.destroy(group));
    assert_eq!(logger.warning_count(), before + 3);

    assert_eq!(world.purge_destroyed(), 2);
    assert_eq!(world.node_count(), 1);
    assert!(!world.contains_node(group));
}
