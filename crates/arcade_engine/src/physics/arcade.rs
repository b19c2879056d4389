//! Arcade physics body
//!
//! A kinematic body driven by velocity, acceleration and drag. Integration
//! happens in the component's update hook; contacts are resolved separately
//! through the functions in [`collide`](super::collide).

use crate::ecs::component_manager::Siblings;
use crate::ecs::components::{Position, Rotation};
use crate::ecs::{Component, ComponentBase, NamedComponent};
use crate::events::Signal;
use crate::foundation::collections::NodeId;
use crate::foundation::math::Vec2;

use super::facing::Facing;
use super::motion::{integrate_axis, UNBOUNDED_VELOCITY};

/// Payload of [`ArcadePhysics::collided`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Collision {
    /// Body that ran the overlap test
    pub this: NodeId,
    /// Node it overlapped
    pub other: NodeId,
}

/// Kinematic body with arcade-style collision response
#[derive(Debug)]
pub struct ArcadePhysics {
    base: ComponentBase,
    /// Linear velocity in units per second
    pub velocity: Vec2,
    /// Linear acceleration; overrides drag on an axis while non-zero
    pub acceleration: Vec2,
    /// Deceleration applied while not accelerating
    pub drag: Vec2,
    /// Per-axis speed limit; 10000 means unlimited
    pub max_velocity: Vec2,
    /// Angular velocity in radians per second
    pub angular_velocity: f64,
    /// Angular acceleration
    pub angular_acceleration: f64,
    /// Angular deceleration
    pub angular_drag: f64,
    /// Angular speed limit; 10000 means unlimited
    pub max_angular: f64,
    /// Mass used by the momentum exchange
    pub mass: f64,
    /// 0 is fully inelastic, 1 fully elastic
    pub elasticity: f64,
    /// Immovable bodies are never pushed
    pub immovable: bool,
    /// Integration is skipped when cleared
    pub moves: bool,
    /// Sides that accept collisions
    pub allow_collisions: Facing,
    /// Sides in contact during this tick
    pub touching: Facing,
    /// Sides in contact during the previous tick
    pub was_touching: Facing,
    /// Position before the last integration, unset until the first update
    pub last: Option<Vec2>,
    /// Fired when an overlap test run by this body succeeds
    pub collided: Signal<Collision>,
}

impl ArcadePhysics {
    /// Body at rest with default parameters
    pub fn new() -> Self {
        Self {
            base: ComponentBase::new(Self::NAME),
            velocity: Vec2::zeros(),
            acceleration: Vec2::zeros(),
            drag: Vec2::zeros(),
            max_velocity: Vec2::new(UNBOUNDED_VELOCITY, UNBOUNDED_VELOCITY),
            angular_velocity: 0.0,
            angular_acceleration: 0.0,
            angular_drag: 0.0,
            max_angular: UNBOUNDED_VELOCITY,
            mass: 1.0,
            elasticity: 0.0,
            immovable: false,
            moves: true,
            allow_collisions: Facing::ANY,
            touching: Facing::NONE,
            was_touching: Facing::NONE,
            last: None,
            collided: Signal::new(),
        }
    }

    /// Body that never moves or gets pushed, such as a wall
    pub fn immovable() -> Self {
        Self {
            immovable: true,
            moves: false,
            ..Self::new()
        }
    }

    /// Set the initial velocity
    #[must_use]
    pub fn with_velocity(mut self, x: f64, y: f64) -> Self {
        self.velocity = Vec2::new(x, y);
        self
    }

    /// Set mass and elasticity
    #[must_use]
    pub fn with_material(mut self, mass: f64, elasticity: f64) -> Self {
        self.mass = mass;
        self.elasticity = elasticity;
        self
    }

    /// Whether any of `sides` is in contact this tick
    pub fn is_touching(&self, sides: Facing) -> bool {
        self.touching.intersects(sides)
    }

    /// Whether any of `sides` came into contact this tick
    pub fn just_touched(&self, sides: Facing) -> bool {
        self.touching.intersects(sides) && !self.was_touching.intersects(sides)
    }

    /// Standing on something
    pub fn on_floor(&self) -> bool {
        self.is_touching(Facing::FLOOR)
    }

    /// Against a wall on either side
    pub fn on_wall(&self) -> bool {
        self.is_touching(Facing::WALL)
    }

    /// Whether any side accepts collisions
    pub fn solid(&self) -> bool {
        self.allow_collisions.intersects(Facing::ANY)
    }

    /// Accept collisions on every side or on none
    pub fn set_solid(&mut self, solid: bool) {
        self.allow_collisions = if solid { Facing::ANY } else { Facing::NONE };
    }

    fn integrate(&mut self, siblings: &mut Siblings<'_>, start: Vec2) {
        if let Some(rotation) = siblings.get_mut::<Rotation>() {
            let (angle, angular_velocity) = integrate_axis(
                rotation.angle(),
                self.angular_velocity,
                self.angular_acceleration,
                self.angular_drag,
                self.max_angular,
            );
            self.angular_velocity = angular_velocity;
            if angle != rotation.angle() {
                rotation.set_angle(angle);
            }
        } else {
            let (_, angular_velocity) = integrate_axis(
                0.0,
                self.angular_velocity,
                self.angular_acceleration,
                self.angular_drag,
                self.max_angular,
            );
            self.angular_velocity = angular_velocity;
        }

        let (x, velocity_x) = integrate_axis(
            start.x,
            self.velocity.x,
            self.acceleration.x,
            self.drag.x,
            self.max_velocity.x,
        );
        let (y, velocity_y) = integrate_axis(
            start.y,
            self.velocity.y,
            self.acceleration.y,
            self.drag.y,
            self.max_velocity.y,
        );
        self.velocity = Vec2::new(velocity_x, velocity_y);

        if (x, y) != (start.x, start.y) {
            if let Some(position) = siblings.get_mut::<Position>() {
                position.set_xy(x, y);
            }
        }
    }
}

impl Default for ArcadePhysics {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for ArcadePhysics {
    crate::impl_component_base!(base);

    fn update(&mut self, siblings: &mut Siblings<'_>) {
        self.was_touching = self.touching;
        self.touching = Facing::NONE;

        let Some(start) = siblings.get::<Position>().map(Position::point) else {
            return;
        };
        self.last = Some(start);
        if self.moves {
            self.integrate(siblings, start);
        }
    }

    fn destroy(&mut self) {
        self.collided.dispose();
        self.base.destroy();
    }
}

impl NamedComponent for ArcadePhysics {
    const NAME: &'static str = "ArcadePhysics";
}
