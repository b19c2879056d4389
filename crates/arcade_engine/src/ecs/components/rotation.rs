//! Rotation component

use crate::ecs::component_manager::Siblings;
use crate::ecs::render::{RenderContext, StyleSink, StyleUpdate};
use crate::ecs::{Component, ComponentBase, NamedComponent};
use crate::events::Signal;
use crate::foundation::math::utils::rad_to_deg;

/// Payload of [`Rotation::updated`]
#[derive(Debug, Clone, PartialEq)]
pub struct RotationChange {
    /// New angle in radians
    pub angle: f64,
    /// CSS `rotate` value
    pub css_rotate: String,
}

/// Orientation of a node in radians
#[derive(Debug)]
pub struct Rotation {
    base: ComponentBase,
    angle: f64,
    /// Fired after every change
    pub updated: Signal<RotationChange>,
}

impl Rotation {
    /// Rotation of `angle` radians
    pub fn new(angle: f64) -> Self {
        Self {
            base: ComponentBase::new(Self::NAME),
            angle,
            updated: Signal::new(),
        }
    }

    /// Angle in radians
    pub fn angle(&self) -> f64 {
        self.angle
    }

    /// Set the angle
    pub fn set_angle(&mut self, angle: f64) {
        self.angle = angle;
        self.base.mark_dirty();
        self.updated.dispatch(RotationChange {
            angle,
            css_rotate: self.css_rotate(),
        });
    }

    /// Turn by `delta` radians
    pub fn rotate(&mut self, delta: f64) {
        self.set_angle(self.angle + delta);
    }

    /// CSS `rotate`, in degrees
    pub fn css_rotate(&self) -> String {
        format!("{}deg", rad_to_deg(self.angle))
    }

    fn style(&self) -> StyleUpdate {
        StyleUpdate::new(self.base.owner_node(), "rotate", self.css_rotate())
    }
}

impl Default for Rotation {
    fn default() -> Self {
        Self::new(0.0)
    }
}

impl Component for Rotation {
    crate::impl_component_base!(base);

    fn render(&mut self, _siblings: &mut Siblings<'_>, ctx: &mut RenderContext<'_>) {
        self.sync_styles(ctx);
    }

    fn add_style_updates(&self, styles: &mut dyn StyleSink) {
        styles.queue_style(self.style());
    }

    fn add_style_immediately(&self, styles: &mut dyn StyleSink) {
        styles.apply_style(self.style());
    }

    fn destroy(&mut self) {
        self.updated.dispose();
        self.base.destroy();
    }
}

impl NamedComponent for Rotation {
    const NAME: &'static str = "Rotation";
}
