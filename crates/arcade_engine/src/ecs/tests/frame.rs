//! Update and render walks

use std::cell::RefCell;
use std::rc::Rc;

use super::{world, Journal, Tracer};
use crate::ecs::components::{Alpha, Input, PointerState, Position, Size};
use crate::ecs::{BackendKind, Component, StyleBatch};
use crate::events::listener;

#[test]
fn test_group_update_runs_children_between_own_hooks() {
    let (mut world, _) = world();
    let journal = Journal::default();
    let group = world.create_group("squad");
    let awake = world.create_entity("awake");
    let asleep = world.create_entity("asleep");
    world.add_component(group, Tracer::boxed("group", &journal));
    world.add_component(awake, Tracer::boxed("awake", &journal));
    world.add_component(asleep, Tracer::boxed("asleep", &journal));
    world.add_child(group, awake);
    world.add_child(group, asleep);
    world.node_mut(asleep).unwrap().core_mut().set_active(false);

    world.update(group);

    assert_eq!(
        *journal.borrow(),
        vec!["pre:group", "update:group", "pre:awake", "update:awake", "post:awake", "post:group"]
    );
}

#[test]
fn test_inactive_component_is_never_hooked() {
    let (mut world, _) = world();
    let journal = Journal::default();
    let node = world.create_entity("node");
    world.add_component(node, Tracer::boxed("muted", &journal));
    world
        .node_mut(node)
        .unwrap()
        .core_mut()
        .components_mut()
        .get_component_mut("tracer")
        .unwrap()
        .base_mut()
        .set_active(false);

    let mut styles = StyleBatch::new();
    world.update(node);
    world.render(node, &mut styles);

    assert!(journal.borrow().is_empty());
}

#[test]
fn test_state_update_reaches_every_layer_root() {
    let (mut world, _) = world();
    let journal = Journal::default();
    let state = world.create_state("play");
    world.create_layer(state, "back", BackendKind::Canvas).unwrap();
    let front = world.create_layer(state, "front", BackendKind::Dom).unwrap();
    world.add_state_component(state, Tracer::boxed("state", &journal));
    world.add_layer_component(front, Tracer::boxed("front", &journal));
    let ship = world.create_entity("ship");
    let label = world.create_entity("label");
    world.add_component(ship, Tracer::boxed("ship", &journal));
    world.add_component(label, Tracer::boxed("label", &journal));
    world.add_to_state(state, ship);
    world.add_to_layer(front, label);

    world.update_state(state);

    assert_eq!(
        *journal.borrow(),
        vec![
            "pre:state",
            "update:state",
            "pre:ship",
            "update:ship",
            "post:ship",
            "pre:front",
            "update:front",
            "pre:label",
            "update:label",
            "post:label",
            "post:front",
            "post:state",
        ]
    );
}

#[test]
fn test_dom_layer_queues_changed_styles_once() {
    let (mut world, _) = world();
    let state = world.create_state("menu");
    let layer = world.create_layer(state, "hud", BackendKind::Dom).unwrap();
    let node = world.create_entity("button");
    world.add_component(node, Box::new(Position::new(0.0, 0.0)));
    world.add_component(node, Box::new(Alpha::new(1.0)));
    world.add_to_state(state, node);

    world.component_mut::<Position>(node).unwrap().set_xy(3.0, 4.0);
    let mut styles = StyleBatch::new();
    world.render_layer(layer, &mut styles);

    assert_eq!(styles.queued_value(Some(node), "left"), Some("3px"));
    assert_eq!(styles.queued_value(Some(node), "top"), Some("4px"));
    assert_eq!(styles.queued_value(Some(node), "opacity"), None);
    assert_eq!(styles.drain_queued().len(), 2);

    world.render_layer(layer, &mut styles);
    assert!(styles.queued().is_empty());
}

#[test]
fn test_canvas_layer_consumes_dirty_flag_without_styles() {
    let (mut world, _) = world();
    let state = world.create_state("play");
    let layer = world.create_layer(state, "sprites", BackendKind::Canvas).unwrap();
    let node = world.create_entity("ship");
    world.add_component(node, Box::new(Position::new(0.0, 0.0)));
    world.add_to_state(state, node);

    world.component_mut::<Position>(node).unwrap().set_xy(1.0, 1.0);
    let mut styles = StyleBatch::new();
    world.render_layer(layer, &mut styles);

    assert!(styles.queued().is_empty());
    assert!(!world.component::<Position>(node).unwrap().base().is_dirty());
}

#[test]
fn test_hidden_layer_and_non_rendering_roots_are_skipped() {
    let (mut world, _) = world();
    let journal = Journal::default();
    let state = world.create_state("play");
    let layer = world.create_layer(state, "hud", BackendKind::Dom).unwrap();
    let shown = world.create_entity("shown");
    let skipped = world.create_entity("skipped");
    world.add_component(shown, Tracer::boxed("shown", &journal));
    world.add_component(skipped, Tracer::boxed("skipped", &journal));
    world.add_to_state(state, shown);
    world.add_to_state(state, skipped);
    world.node_mut(skipped).unwrap().core_mut().set_will_render(false);

    let mut styles = StyleBatch::new();
    world.render_state(state, &mut styles);
    assert_eq!(*journal.borrow(), vec!["render:shown"]);

    journal.borrow_mut().clear();
    world.layer_mut(layer).unwrap().set_visible(false);
    world.render_state(state, &mut styles);
    assert!(journal.borrow().is_empty());
}

#[test]
fn test_pointer_drives_input_signals() {
    let (mut world, _) = world();
    let button = world.create_entity("button");
    world.add_component(button, Box::new(Position::new(0.0, 0.0)));
    world.add_component(button, Box::new(Size::new(10.0, 10.0)));
    world.add_component(button, Box::new(Input::new()));
    world.create_entity("bystander");

    let seen = Rc::new(RefCell::new(Vec::new()));
    let input = world.component::<Input>(button).unwrap();
    for (signal, label) in [
        (&input.on_entered, "entered"),
        (&input.on_left, "left"),
        (&input.on_down, "down"),
        (&input.on_up, "up"),
    ] {
        let sink = Rc::clone(&seen);
        signal
            .add(&listener(move |_: &PointerState| sink.borrow_mut().push(label)), 0)
            .unwrap();
    }

    assert_eq!(world.dispatch_pointer(PointerState::new(5.0, 5.0, true)), 1);
    world.update(button);
    assert!(world.component::<Input>(button).unwrap().is_down());

    world.dispatch_pointer(PointerState::new(20.0, 20.0, false));
    world.update(button);

    assert_eq!(*seen.borrow(), vec!["entered", "down", "left", "up"]);
    let input = world.component::<Input>(button).unwrap();
    assert!(!input.within_bounds());
    assert!(!input.is_down());
}
