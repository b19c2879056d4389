//! Broad phase and world-level collision entry points
//!
//! Overlap tests use the hitbox built from a node's Position, Size and
//! optional Bounds. Separation additionally needs an [`ArcadePhysics`] body
//! on both nodes; resolved positions are written back through the Position
//! component so style sync and listeners see the change.

use crate::ecs::components::{hitbox_of, Position};
use crate::ecs::World;
use crate::foundation::collections::NodeId;
use crate::foundation::math::Rect;

use super::arcade::{ArcadePhysics, Collision};
use super::separation::{self, Body};

fn hitbox(world: &World, node: NodeId) -> Option<Rect> {
    let found = world.node(node)?;
    if found.core().is_destroyed() {
        return None;
    }
    hitbox_of(found.core().components())
}

fn body(world: &World, node: NodeId) -> Option<Body> {
    let components = world.node(node)?.core().components();
    let physics = components.get::<ArcadePhysics>()?;
    let position = components.get::<Position>()?.point();
    Some(Body::new(physics, position, hitbox(world, node)?))
}

fn write_back(world: &mut World, node: NodeId, body: &Body) {
    if let Some(physics) = world.component_mut::<ArcadePhysics>(node) {
        body.apply_to(physics);
    }
    if let Some(position) = world.component_mut::<Position>(node) {
        if position.point() != body.position {
            position.set_xy(body.position.x, body.position.y);
        }
    }
}

/// Resolve a contact between two bodies along both axes
///
/// False when either node lacks a body, when both are immovable or when
/// nothing needed separating.
pub fn separate(world: &mut World, first: NodeId, second: NodeId) -> bool {
    if first == second {
        return false;
    }
    let (Some(mut body1), Some(mut body2)) = (body(world, first), body(world, second)) else {
        return false;
    };
    let separated = separation::separate(&mut body1, &mut body2);
    write_back(world, first, &body1);
    write_back(world, second, &body2);
    separated
}

/// Resolve along x only
pub fn separate_x(world: &mut World, first: NodeId, second: NodeId) -> bool {
    resolve_axis(world, first, second, separation::separate_x)
}

/// Resolve along y only
pub fn separate_y(world: &mut World, first: NodeId, second: NodeId) -> bool {
    resolve_axis(world, first, second, separation::separate_y)
}

fn resolve_axis(world: &mut World, first: NodeId, second: NodeId, axis: fn(&mut Body, &mut Body) -> bool) -> bool {
    if first == second {
        return false;
    }
    let (Some(mut body1), Some(mut body2)) = (body(world, first), body(world, second)) else {
        return false;
    };
    let separated = axis(&mut body1, &mut body2);
    write_back(world, first, &body1);
    write_back(world, second, &body2);
    separated
}

/// Whether the hitboxes of two nodes overlap, optionally separating them
///
/// False when either node lacks Position or Size. A positive test fires the
/// first node's `collided` signal after any separation.
pub fn overlaps(world: &mut World, first: NodeId, second: NodeId, separate_objects: bool) -> bool {
    if first == second {
        return false;
    }
    let (Some(rect1), Some(rect2)) = (hitbox(world, first), hitbox(world, second)) else {
        return false;
    };
    if !rect1.intersects(&rect2) {
        return false;
    }
    if separate_objects {
        separate(world, first, second);
    }
    if let Some(physics) = world.component::<ArcadePhysics>(first) {
        physics.collided.dispatch(Collision { this: first, other: second });
    }
    true
}

/// Test a node against every other child of a group
///
/// Every child is tested even after a hit. Returns whether any overlapped.
pub fn overlaps_group(world: &mut World, node: NodeId, group: NodeId, separate_objects: bool) -> bool {
    let members = world.group(group).map(|found| found.children().to_vec()).unwrap_or_default();
    overlaps_array(world, node, &members, separate_objects)
}

/// Test a node against each of `others`
pub fn overlaps_array(world: &mut World, node: NodeId, others: &[NodeId], separate_objects: bool) -> bool {
    let mut any = false;
    for &other in others {
        if other != node && overlaps(world, node, other, separate_objects) {
            any = true;
        }
    }
    any
}

/// Overlap test that always separates
pub fn collide(world: &mut World, first: NodeId, second: NodeId) -> bool {
    overlaps(world, first, second, true)
}

/// Collide a node with every child of a group
pub fn collide_group(world: &mut World, node: NodeId, group: NodeId) -> bool {
    overlaps_group(world, node, group, true)
}

/// Collide every child of one group with every child of another
pub fn collide_group_group(world: &mut World, first: NodeId, second: NodeId) -> bool {
    let members = world.group(first).map(|found| found.children().to_vec()).unwrap_or_default();
    let mut any = false;
    for member in members {
        if collide_group(world, member, second) {
            any = true;
        }
    }
    any
}
