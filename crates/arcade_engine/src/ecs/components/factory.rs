//! Component bundles for common node kinds

use crate::ecs::Component;

use super::{Alpha, Bounds, Input, Position, Size, Texture, TextureInfo, Visible};

/// Builds the component set of a textured, clickable sprite
pub struct SpriteFactory;

impl SpriteFactory {
    /// Position, size from one texture cell, hitbox, texture, alpha,
    /// visibility and pointer input
    pub fn components(texture: TextureInfo, x: f64, y: f64) -> Vec<Box<dyn Component>> {
        vec![
            Box::new(Position::new(x, y)),
            Box::new(Size::from_texture(&texture)),
            Box::new(Bounds::new()),
            Box::new(Texture::new(texture)),
            Box::new(Alpha::default()),
            Box::new(Visible::default()),
            Box::new(Input::new()),
        ]
    }

    /// Position and size only, for invisible colliders such as walls
    pub fn box_components(x: f64, y: f64, width: f64, height: f64) -> Vec<Box<dyn Component>> {
        vec![Box::new(Position::new(x, y)), Box::new(Size::new(width, height))]
    }
}
