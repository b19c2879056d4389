//! Position component
//!
//! World-space coordinates of a node. On DOM layers the element is placed
//! with `left`/`top`; [`Position::css_translate`] is provided for renderers
//! that prefer transforms.

use crate::ecs::component_manager::Siblings;
use crate::ecs::render::{RenderContext, StyleSink, StyleUpdate};
use crate::ecs::{Component, ComponentBase, NamedComponent};
use crate::events::Signal;
use crate::foundation::math::Vec2;

/// Payload of [`Position::updated`]
#[derive(Debug, Clone, PartialEq)]
pub struct PositionChange {
    /// New x
    pub x: f64,
    /// New y
    pub y: f64,
    /// CSS `left` value
    pub css_left: String,
    /// CSS `top` value
    pub css_top: String,
    /// CSS `transform` value
    pub css_translate: String,
}

/// Location of a node
#[derive(Debug)]
pub struct Position {
    base: ComponentBase,
    x: f64,
    y: f64,
    /// Fired after every change
    pub updated: Signal<PositionChange>,
}

impl Position {
    /// Position at `(x, y)`
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            base: ComponentBase::new(Self::NAME),
            x,
            y,
            updated: Signal::new(),
        }
    }

    /// Horizontal coordinate
    pub fn x(&self) -> f64 {
        self.x
    }

    /// Vertical coordinate
    pub fn y(&self) -> f64 {
        self.y
    }

    /// Both coordinates
    pub fn point(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    /// Set x
    pub fn set_x(&mut self, x: f64) {
        self.set_xy(x, self.y);
    }

    /// Set y
    pub fn set_y(&mut self, y: f64) {
        self.set_xy(self.x, y);
    }

    /// Set both coordinates, notifying once
    pub fn set_xy(&mut self, x: f64, y: f64) {
        self.x = x;
        self.y = y;
        self.base.mark_dirty();
        self.updated.dispatch(PositionChange {
            x,
            y,
            css_left: self.css_left(),
            css_top: self.css_top(),
            css_translate: self.css_translate(),
        });
    }

    /// Move by an offset
    pub fn translate(&mut self, dx: f64, dy: f64) {
        self.set_xy(self.x + dx, self.y + dy);
    }

    /// CSS `left`
    pub fn css_left(&self) -> String {
        format!("{}px", self.x)
    }

    /// CSS `top`
    pub fn css_top(&self) -> String {
        format!("{}px", self.y)
    }

    /// CSS `transform` translation
    pub fn css_translate(&self) -> String {
        format!("translate({}px, {}px)", self.x, self.y)
    }

    fn styles(&self) -> [StyleUpdate; 2] {
        let node = self.base.owner_node();
        [
            StyleUpdate::new(node, "left", self.css_left()),
            StyleUpdate::new(node, "top", self.css_top()),
        ]
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}

impl Component for Position {
    crate::impl_component_base!(base);

    fn render(&mut self, _siblings: &mut Siblings<'_>, ctx: &mut RenderContext<'_>) {
        self.sync_styles(ctx);
    }

    fn add_style_updates(&self, styles: &mut dyn StyleSink) {
        for update in self.styles() {
            styles.queue_style(update);
        }
    }

    fn add_style_immediately(&self, styles: &mut dyn StyleSink) {
        for update in self.styles() {
            styles.apply_style(update);
        }
    }

    fn destroy(&mut self) {
        self.updated.dispose();
        self.base.destroy();
    }
}

impl NamedComponent for Position {
    const NAME: &'static str = "Position";
}
