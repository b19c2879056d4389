//! Arcade physics
//!
//! Axis-aligned kinematic bodies with per-axis contact resolution. Bodies
//! integrate during the normal component update; collisions are resolved on
//! demand through [`collide`], [`overlaps`] and [`separate`].

pub mod arcade;
pub mod collide;
pub mod facing;
pub mod motion;
pub mod separation;


pub use arcade::{ArcadePhysics, Collision};
pub use collide::{
    collide, collide_group, collide_group_group, overlaps, overlaps_array, overlaps_group, separate, separate_x,
    separate_y,
};
pub use facing::Facing;
pub use motion::{compute_velocity, integrate_axis, OVERLAP_BIAS, UNBOUNDED_VELOCITY, UPDATE_INTERVAL};
pub use separation::Body;
