//! Scene graph and component model
//!
//! Nodes (entities and groups), layers and states live in a [`World`] arena
//! and reference each other through slot map handles. Behaviour is composed
//! from [`Component`]s held by a per-owner [`ComponentManager`].

pub mod backend;
pub mod component;
pub mod component_manager;
pub mod components;
pub mod entity;
pub mod error;
pub mod group;
mod hierarchy;
pub mod layer;
pub mod node;
pub mod render;
pub mod world;

#[cfg(test)]
mod tests;

pub use backend::{BackendKind, BackendSupport};
pub use component::{Component, ComponentBase, NamedComponent, Owner, OwnerKind, Transition};
pub use component_manager::{ComponentLookup, ComponentManager, Siblings};
pub use entity::Entity;
pub use error::AttachError;
pub use group::Group;
pub use layer::{Layer, State};
pub use node::{Node, NodeCore, NodeSignals};
pub use render::{Camera, RenderContext, StyleBatch, StyleSink, StyleUpdate};
pub use world::World;
