//! Bounds component
//!
//! Describes the hitbox used for overlap tests and pointer hit-testing. The
//! box sits at the node's position plus an offset and takes the node's
//! [`Size`] unless overridden.

use crate::ecs::component_manager::ComponentLookup;
use crate::ecs::{Component, ComponentBase, NamedComponent};
use crate::foundation::math::Rect;

use super::position::Position;
use super::size::Size;

/// Hitbox description relative to the node
#[derive(Debug)]
pub struct Bounds {
    base: ComponentBase,
    offset_x: f64,
    offset_y: f64,
    width: Option<f64>,
    height: Option<f64>,
    /// Debug renderers outline the hitbox when set
    pub show_debug: bool,
}

impl Bounds {
    /// Hitbox matching the node's position and size
    pub fn new() -> Self {
        Self {
            base: ComponentBase::new(Self::NAME),
            offset_x: 0.0,
            offset_y: 0.0,
            width: None,
            height: None,
            show_debug: false,
        }
    }

    /// Shift the hitbox relative to the position
    #[must_use]
    pub fn with_offset(mut self, x: f64, y: f64) -> Self {
        self.offset_x = x;
        self.offset_y = y;
        self
    }

    /// Override the hitbox dimensions
    #[must_use]
    pub fn with_size(mut self, width: f64, height: f64) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }

    /// Horizontal offset from the position
    pub fn offset_x(&self) -> f64 {
        self.offset_x
    }

    /// Vertical offset from the position
    pub fn offset_y(&self) -> f64 {
        self.offset_y
    }

    /// Change the offset
    pub fn set_offset(&mut self, x: f64, y: f64) {
        self.offset_x = x;
        self.offset_y = y;
        self.base.mark_dirty();
    }

    /// Change or clear the dimension override
    pub fn set_size_override(&mut self, size: Option<(f64, f64)>) {
        self.width = size.map(|(width, _)| width);
        self.height = size.map(|(_, height)| height);
        self.base.mark_dirty();
    }

    /// Hitbox of a node at `(x, y)` with the given natural size
    pub fn hitbox(&self, x: f64, y: f64, width: f64, height: f64) -> Rect {
        Rect::new(
            x + self.offset_x,
            y + self.offset_y,
            self.width.unwrap_or(width),
            self.height.unwrap_or(height),
        )
    }

    /// Whether a point lies inside the hitbox
    pub fn contains_point(&self, x: f64, y: f64, hitbox_origin: (f64, f64), natural: (f64, f64)) -> bool {
        self.hitbox(hitbox_origin.0, hitbox_origin.1, natural.0, natural.1)
            .contains_point(x, y)
    }
}

impl Default for Bounds {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for Bounds {
    crate::impl_component_base!(base);
}

impl NamedComponent for Bounds {
    const NAME: &'static str = "Bounds";
}

/// World-space hitbox of a node from its Position, Size and optional Bounds
///
/// `None` when Position or Size is missing.
pub fn hitbox_of(components: &impl ComponentLookup) -> Option<Rect> {
    let position = components.find::<Position>()?;
    let size = components.find::<Size>()?;
    let (x, y, width, height) = (position.x(), position.y(), size.width(), size.height());
    Some(match components.find::<Bounds>() {
        Some(bounds) => bounds.hitbox(x, y, width, height),
        None => Rect::new(x, y, width, height),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hitbox_applies_offset_and_override() {
        let bounds = Bounds::new().with_offset(2.0, 3.0).with_size(4.0, 5.0);
        assert_eq!(bounds.hitbox(10.0, 10.0, 32.0, 32.0), Rect::new(12.0, 13.0, 4.0, 5.0));

        let plain = Bounds::new();
        assert_eq!(plain.hitbox(10.0, 10.0, 32.0, 32.0), Rect::new(10.0, 10.0, 32.0, 32.0));
        assert!(plain.contains_point(42.0, 42.0, (10.0, 10.0), (32.0, 32.0)));
        assert!(!plain.contains_point(43.0, 42.0, (10.0, 10.0), (32.0, 32.0)));
    }
}
