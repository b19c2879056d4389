//! Scale component

use crate::ecs::component_manager::Siblings;
use crate::ecs::render::{RenderContext, StyleSink, StyleUpdate};
use crate::ecs::{Component, ComponentBase, NamedComponent};
use crate::events::Signal;

/// Payload of [`Scale::updated`]
#[derive(Debug, Clone, PartialEq)]
pub struct ScaleChange {
    /// Horizontal factor
    pub x: f64,
    /// Vertical factor
    pub y: f64,
    /// CSS `scale` value
    pub css_scale: String,
}

/// Per-axis scale factors of a node
#[derive(Debug)]
pub struct Scale {
    base: ComponentBase,
    x: f64,
    y: f64,
    /// Fired after every change
    pub updated: Signal<ScaleChange>,
}

impl Scale {
    /// Scale by `x` and `y`
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            base: ComponentBase::new(Self::NAME),
            x,
            y,
            updated: Signal::new(),
        }
    }

    /// Horizontal factor
    pub fn x(&self) -> f64 {
        self.x
    }

    /// Vertical factor
    pub fn y(&self) -> f64 {
        self.y
    }

    /// Set both factors
    pub fn set_xy(&mut self, x: f64, y: f64) {
        self.x = x;
        self.y = y;
        self.base.mark_dirty();
        self.updated.dispatch(ScaleChange {
            x,
            y,
            css_scale: self.css_scale(),
        });
    }

    /// Same factor on both axes
    pub fn set_uniform(&mut self, factor: f64) {
        self.set_xy(factor, factor);
    }

    /// CSS `scale`
    pub fn css_scale(&self) -> String {
        format!("{} {}", self.x, self.y)
    }

    fn style(&self) -> StyleUpdate {
        StyleUpdate::new(self.base.owner_node(), "scale", self.css_scale())
    }
}

impl Default for Scale {
    fn default() -> Self {
        Self::new(1.0, 1.0)
    }
}

impl Component for Scale {
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

impl NamedComponent for Scale {
    const NAME: &'static str = "Scale";
}
