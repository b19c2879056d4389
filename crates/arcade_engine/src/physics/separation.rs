//! Contact resolution between two bodies
//!
//! Works on [`Body`] snapshots so the math stays independent of where the
//! bodies live. Each axis is resolved on its own: the displacement of the
//! last tick decides the direction, a swept box catches fast movers and the
//! overlap is pushed out with a momentum exchange blended by elasticity.

use crate::foundation::math::{Rect, Vec2};

use super::arcade::ArcadePhysics;
use super::facing::Facing;
use super::motion::OVERLAP_BIAS;

/// Everything separation needs to know about one body
#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    /// Node position
    pub position: Vec2,
    /// Node position before the last integration
    pub last: Vec2,
    /// Current world-space hitbox
    pub hitbox: Rect,
    /// Linear velocity
    pub velocity: Vec2,
    /// Mass
    pub mass: f64,
    /// Elasticity
    pub elasticity: f64,
    /// Never pushed when set
    pub immovable: bool,
    /// Sides that accept collisions
    pub allow_collisions: Facing,
    /// Sides in contact this tick
    pub touching: Facing,
}

impl Body {
    /// Snapshot of a physics component at `position` with `hitbox`
    ///
    /// A body that has never been updated counts as not having moved.
    pub fn new(physics: &ArcadePhysics, position: Vec2, hitbox: Rect) -> Self {
        Self {
            position,
            last: physics.last.unwrap_or(position),
            hitbox,
            velocity: physics.velocity,
            mass: physics.mass,
            elasticity: physics.elasticity,
            immovable: physics.immovable,
            allow_collisions: physics.allow_collisions,
            touching: physics.touching,
        }
    }

    /// Copy the resolved state back into the component
    pub fn apply_to(&self, physics: &mut ArcadePhysics) {
        physics.velocity = self.velocity;
        physics.touching = self.touching;
    }

    fn shift_x(&mut self, amount: f64) {
        self.position.x += amount;
        self.hitbox.x += amount;
    }

    fn shift_y(&mut self, amount: f64) {
        self.position.y += amount;
        self.hitbox.y += amount;
    }

    /// Hitbox offset from the position
    fn offset(&self) -> Vec2 {
        Vec2::new(self.hitbox.x - self.position.x, self.hitbox.y - self.position.y)
    }
}

/// Velocities after a momentum exchange between two movable bodies
fn exchange(v1: f64, v2: f64, first: &Body, second: &Body) -> (f64, f64) {
    let sign = |v: f64| if v > 0.0 { 1.0 } else { -1.0 };
    let new1 = (v2 * v2 * second.mass / first.mass).sqrt() * sign(v2);
    let new2 = (v1 * v1 * first.mass / second.mass).sqrt() * sign(v1);
    let average = (new1 + new2) * 0.5;
    (
        average + (new1 - average) * first.elasticity,
        average + (new2 - average) * second.elasticity,
    )
}

/// Resolve both axes; both are always attempted
pub fn separate(first: &mut Body, second: &mut Body) -> bool {
    let x = separate_x(first, second);
    let y = separate_y(first, second);
    x | y
}

/// Resolve overlap along x
pub fn separate_x(first: &mut Body, second: &mut Body) -> bool {
    if first.immovable && second.immovable {
        return false;
    }

    let delta1 = first.position.x - first.last.x;
    let delta2 = second.position.x - second.last.x;
    let mut overlap = 0.0;

    if delta1 != delta2 {
        let swept = |body: &Body, delta: f64| {
            Rect::new(
                body.hitbox.x - delta.max(0.0),
                body.last.y + body.offset().y,
                body.hitbox.width + delta.abs(),
                body.hitbox.height,
            )
        };
        if swept(first, delta1).intersects(&swept(second, delta2)) {
            let max_overlap = delta1.abs() + delta2.abs() + OVERLAP_BIAS;
            if delta1 > delta2 {
                overlap = first.hitbox.right() - second.hitbox.x;
                if overlap > max_overlap || !Facing::permits(first.allow_collisions, second.allow_collisions, Facing::RIGHT) {
                    overlap = 0.0;
                } else {
                    first.touching |= Facing::RIGHT;
                    second.touching |= Facing::LEFT;
                }
            } else if delta1 < delta2 {
                overlap = first.hitbox.x - second.hitbox.width - second.hitbox.x;
                if -overlap > max_overlap || !Facing::permits(first.allow_collisions, second.allow_collisions, Facing::LEFT) {
                    overlap = 0.0;
                } else {
                    first.touching |= Facing::LEFT;
                    second.touching |= Facing::RIGHT;
                }
            }
        }
    }

    if overlap == 0.0 {
        return false;
    }

    let (v1, v2) = (first.velocity.x, second.velocity.x);
    if !first.immovable && !second.immovable {
        overlap *= 0.5;
        first.shift_x(-overlap);
        second.shift_x(overlap);
        let (new1, new2) = exchange(v1, v2, first, second);
        first.velocity.x = new1;
        second.velocity.x = new2;
    } else if !first.immovable {
        first.shift_x(-overlap);
        first.velocity.x = v2 - v1 * first.elasticity;
    } else {
        second.shift_x(overlap);
        second.velocity.x = v1 - v2 * second.elasticity;
    }
    true
}

/// Resolve overlap along y
pub fn separate_y(first: &mut Body, second: &mut Body) -> bool {
    if first.immovable && second.immovable {
        return false;
    }

    let delta1 = first.position.y - first.last.y;
    let delta2 = second.position.y - second.last.y;
    let mut overlap = 0.0;

    if delta1 != delta2 {
        let swept = |body: &Body, delta: f64| {
            Rect::new(
                body.hitbox.x,
                body.hitbox.y - delta.max(0.0),
                body.hitbox.width,
                body.hitbox.height + delta.abs(),
            )
        };
        if swept(first, delta1).intersects(&swept(second, delta2)) {
            let max_overlap = delta1.abs() + delta2.abs() + OVERLAP_BIAS;
            if delta1 > delta2 {
                overlap = first.hitbox.bottom() - second.hitbox.y;
                if overlap > max_overlap || !Facing::permits(first.allow_collisions, second.allow_collisions, Facing::DOWN) {
                    overlap = 0.0;
                } else {
                    first.touching |= Facing::DOWN;
                    second.touching |= Facing::UP;
                }
            } else if delta1 < delta2 {
                overlap = first.hitbox.y - second.hitbox.height - second.hitbox.y;
                if -overlap > max_overlap || !Facing::permits(first.allow_collisions, second.allow_collisions, Facing::UP) {
                    overlap = 0.0;
                } else {
                    first.touching |= Facing::UP;
                    second.touching |= Facing::DOWN;
                }
            }
        }
    }

    if overlap == 0.0 {
        return false;
    }

    let (v1, v2) = (first.velocity.y, second.velocity.y);
    if !first.immovable && !second.immovable {
        overlap *= 0.5;
        first.shift_y(-overlap);
        second.shift_y(overlap);
        let (new1, new2) = exchange(v1, v2, first, second);
        first.velocity.y = new1;
        second.velocity.y = new2;
    } else if !first.immovable {
        first.shift_y(-overlap);
        first.velocity.y = v2 - v1 * first.elasticity;
    } else {
        second.shift_y(overlap);
        second.velocity.y = v1 - v2 * second.elasticity;
    }
    true
}
