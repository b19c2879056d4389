//! # Arcade Engine
//!
//! The core of a 2D game engine for browser hosts: a scene graph of entities
//! and groups living on render layers inside game states, a component model
//! driving behaviour and rendering, priority-ordered signals, and arcade
//! physics with per-axis contact resolution.
//!
//! ## Features
//!
//! - **Scene Graph**: Entities and groups owned by a single arena [`World`](ecs::World)
//! - **Components**: Named, per-node behaviour with update and render hooks
//! - **Multi-Backend**: Canvas, DOM and WebGL layers gated by device capabilities
//! - **Signals**: Priority-ordered listeners with one-shot bindings and halting
//! - **Arcade Physics**: Velocity integration, overlap tests and separation
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use arcade_engine::prelude::*;
//!
//! let mut world = World::new(&EngineConfig::default());
//! let state = world.create_state("play");
//! world.create_layer(state, "sprites", BackendKind::Canvas);
//!
//! let ball = world.spawn("ball", SpriteFactory::box_components(10.0, 10.0, 16.0, 16.0));
//! world.add_component(ball, Box::new(ArcadePhysics::new().with_velocity(120.0, 0.0)));
//! world.add_to_state(state, ball);
//!
//! world.update_state(state);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

// Core engine modules
pub mod config;
pub mod core;

pub mod ecs;
pub mod events;
pub mod foundation;
pub mod physics;

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        core::{DeviceCapabilities, EngineConfig, StageConfig},
        ecs::{
            components::{
                Alpha, Bounds, Color, Input, PointerState, Position, Rotation, Scale, Size, SpriteFactory, Texture,
                TextureInfo, Visible,
            },
            BackendKind, BackendSupport, Component, ComponentBase, NamedComponent, Node, Owner, StyleBatch,
            Transition, World,
        },
        events::{listener, Signal},
        foundation::{
            collections::{LayerId, NodeId, StateId},
            math::{Rect, Vec2},
        },
        physics::{collide, collide_group, overlaps, ArcadePhysics, Facing},
    };
}
