//! Group child operations

use std::cell::RefCell;
use std::rc::Rc;

use super::{child_names, names, world};
use crate::ecs::components::Position;
use crate::ecs::BackendKind;
use crate::events::listener;

#[test]
fn test_insertion_keeps_requested_order() {
    let (mut world, _) = world();
    let group = world.create_group("row");
    let [a, b, c, d, e] = ["a", "b", "c", "d", "e"].map(|name| world.create_entity(name));

    world.add_child(group, a);
    world.add_child(group, c);
    assert_eq!(world.add_child_before(group, b, c), Some(b));
    assert_eq!(world.add_child_after(group, d, a), Some(d));
    assert_eq!(world.add_child_at(group, e, 0), Some(e));

    assert_eq!(child_names(&world, group), vec!["e", "a", "d", "b", "c"]);
    assert_eq!(world.get_child_index(group, b), Some(3));
    assert_eq!(world.get_child_at(group, 1), Some(a));
    assert_eq!(world.get_child_at(group, 5), None);
    assert_eq!(world.node(b).unwrap().core().parent(), Some(group));
}

#[test]
fn test_adding_an_existing_child_is_a_no_op() {
    let (mut world, logger) = world();
    let group = world.create_group("row");
    let a = world.create_entity("a");
    let b = world.create_entity("b");
    world.add_child(group, a);
    world.add_child(group, b);

    assert_eq!(world.add_child(group, a), Some(a));
    assert_eq!(child_names(&world, group), vec!["a", "b"]);
    assert_eq!(logger.warning_count(), 0);
}

#[test]
fn test_refused_insertions_leave_the_group_untouched() {
    let (mut world, logger) = world();
    let group = world.create_group("row");
    let a = world.create_entity("a");
    let stranger = world.create_entity("stranger");
    let b = world.create_entity("b");
    world.add_child(group, a);

    assert_eq!(world.add_child_at(group, b, 5), None);
    assert_eq!(world.add_child_before(group, b, stranger), None);
    assert_eq!(world.add_child(a, b), None);

    assert_eq!(child_names(&world, group), vec!["a"]);
    assert_eq!(world.node(b).unwrap().core().parent(), None);
    assert_eq!(logger.warning_count(), 3);
}

#[test]
fn test_moving_a_child_to_another_group() {
    let (mut world, _) = world();
    let left = world.create_group("left");
    let right = world.create_group("right");
    let child = world.create_entity("child");
    world.add_child(left, child);

    assert_eq!(world.add_child(right, child), Some(child));

    assert!(world.group(left).unwrap().is_empty());
    assert_eq!(world.num_children(right), 1);
    assert_eq!(world.node(child).unwrap().core().parent(), Some(right));
}

#[test]
fn test_group_cannot_contain_itself() {
    let (mut world, _) = world();
    let outer = world.create_group("outer");
    let inner = world.create_group("inner");
    let leaf = world.create_entity("leaf");
    world.add_child(outer, inner);
    world.add_child(inner, leaf);

    assert_eq!(world.add_child(inner, outer), None);
    assert_eq!(world.add_child(outer, outer), None);
    assert!(!world.replace_child(inner, leaf, outer));

    assert!(world.contains_descendant(outer, leaf));
    assert!(!world.contains_descendant(outer, outer));
    assert!(!world.contains_child(outer, leaf));
    assert_eq!(world.node(outer).unwrap().core().parent(), None);
}

#[test]
fn test_swapping_and_replacing_children() {
    let (mut world, _) = world();
    let group = world.create_group("row");
    let [a, b, c, d] = ["a", "b", "c", "d"].map(|name| world.create_entity(name));
    for child in [a, b, c] {
        world.add_child(group, child);
    }

    assert!(world.swap_children(group, a, c));
    assert_eq!(child_names(&world, group), vec!["c", "b", "a"]);
    assert!(world.swap_children_at(group, 0, 1));
    assert_eq!(child_names(&world, group), vec!["b", "c", "a"]);
    assert!(!world.swap_children_at(group, 0, 3));
    assert!(!world.swap_children(group, a, d));

    assert!(world.replace_child(group, c, d));
    assert_eq!(child_names(&world, group), vec!["b", "d", "a"]);
    assert_eq!(world.node(c).unwrap().core().parent(), None);

    // the replacement may already be a child
    assert!(world.replace_child(group, b, a));
    assert_eq!(child_names(&world, group), vec!["a", "d"]);
}

#[test]
fn test_removing_children_by_range() {
    let (mut world, _) = world();
    let group = world.create_group("row");
    let children = ["a", "b", "c", "d"].map(|name| world.create_entity(name));
    for child in children {
        world.add_child(group, child);
    }

    let removed = world.remove_children(group, 1, 10);
    assert_eq!(names(&world, &removed), vec!["b", "c", "d"]);
    assert!(removed.iter().all(|&child| world.node(child).unwrap().core().parent().is_none()));

    assert_eq!(world.remove_child_at(group, 0), Some(children[0]));
    assert_eq!(world.remove_child_at(group, 0), None);
    assert_eq!(world.remove_child(group, children[1]), None);
    assert!(world.remove_children(group, 0, 1).is_empty());
}

#[test]
fn test_living_and_dead_children() {
    let (mut world, _) = world();
    let group = world.create_group("pool");
    let [a, b, c] = ["a", "b", "c"].map(|name| world.create_entity(name));
    for child in [a, b, c] {
        world.add_child(group, child);
    }
    world.node_mut(b).unwrap().core_mut().set_exists(false);

    assert_eq!(world.count_living(group), 2);
    assert_eq!(world.count_dead(group), 1);
    assert_eq!(world.first_dead(group), Some(b));

    let mut visited = Vec::new();
    world.for_each_alive(group, |child, _| visited.push(child));
    assert_eq!(visited, vec![a, c]);

    let mut everyone = 0;
    world.for_each(group, |_, found| {
        found.core_mut().set_exists(true);
        everyone += 1;
    });
    assert_eq!(everyone, 3);
    assert_eq!(world.first_dead(group), None);
}

#[test]
fn test_bulk_component_access() {
    let (mut world, _) = world();
    let group = world.create_group("row");
    let first = world.create_entity("first");
    let bare = world.create_entity("bare");
    let last = world.create_entity("last");
    world.add_component(first, Box::new(Position::new(1.0, 1.0)));
    world.add_component(last, Box::new(Position::new(2.0, 2.0)));
    for child in [first, bare, last] {
        world.add_child(group, child);
    }

    assert_eq!(world.set_all::<Position>(group, |position| position.set_x(7.0)), 2);
    let xs = world.call_all::<Position, f64>(group, |position| position.x());
    assert_eq!(xs, vec![7.0, 7.0]);

    let ys = world.call_all::<Position, f64>(group, |position| {
        position.translate(0.0, 1.0);
        position.y()
    });
    assert_eq!(ys, vec![2.0, 3.0]);
}

#[test]
fn test_children_hear_their_new_index() {
    let (mut world, _) = world();
    let group = world.create_group("row");
    let watched = world.create_entity("watched");
    let newcomer = world.create_entity("newcomer");
    world.add_child(group, watched);

    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    world
        .node(watched)
        .unwrap()
        .core()
        .signals()
        .reordered
        .add(&listener(move |index: &usize| sink.borrow_mut().push(*index)), 0)
        .unwrap();

    world.add_child_at(group, newcomer, 0);
    world.remove_child(group, newcomer);

    assert_eq!(*seen.borrow(), vec![1, 0]);
}

#[test]
fn test_child_inherits_and_drops_group_containers() {
    let (mut world, _) = world();
    let state = world.create_state("play");
    let layer = world.create_layer(state, "canvas", BackendKind::Canvas).unwrap();
    let group = world.create_group("squad");
    let child = world.create_entity("grunt");
    world.add_to_state(state, group);

    world.add_child(group, child);
    let core = world.node(child).unwrap().core();
    assert_eq!(core.layer(), Some(layer));
    assert_eq!(core.state(), Some(state));
    assert_eq!(core.backend(), BackendKind::Canvas);
    assert!(core.id().is_some());
    assert!(!world.layer(layer).unwrap().contains(child));

    world.remove_child(group, child);
    let core = world.node(child).unwrap().core();
    assert_eq!(core.layer(), None);
    assert_eq!(core.state(), None);
    assert_eq!(world.node(group).unwrap().core().layer(), Some(layer));
}

#[test]
fn test_root_node_moved_into_a_group_leaves_its_layer() {
    let (mut world, _) = world();
    let state = world.create_state("play");
    let layer = world.create_layer(state, "canvas", BackendKind::Canvas).unwrap();
    let group = world.create_group("squad");
    let loner = world.create_entity("loner");
    world.add_to_state(state, group);
    world.add_to_state(state, loner);
    assert!(world.layer(layer).unwrap().contains(loner));

    world.add_child(group, loner);

    assert!(!world.layer(layer).unwrap().contains(loner));
    assert!(!world.state(state).unwrap().contains(loner));
    let core = world.node(loner).unwrap().core();
    assert_eq!(core.parent(), Some(group));
    assert_eq!(core.layer(), Some(layer));
    assert_eq!(core.state(), Some(state));
}
