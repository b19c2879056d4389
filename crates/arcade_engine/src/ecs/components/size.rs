//! Size component

use crate::ecs::component_manager::Siblings;
use crate::ecs::render::{RenderContext, StyleSink, StyleUpdate};
use crate::ecs::{Component, ComponentBase, NamedComponent};
use crate::events::Signal;

use super::texture::TextureInfo;

/// Payload of [`Size::updated`]
#[derive(Debug, Clone, PartialEq)]
pub struct SizeChange {
    /// New width
    pub width: f64,
    /// New height
    pub height: f64,
    /// CSS `width` value
    pub css_width: String,
    /// CSS `height` value
    pub css_height: String,
}

/// Dimensions of a node
#[derive(Debug)]
pub struct Size {
    base: ComponentBase,
    width: f64,
    height: f64,
    /// Fired after every change
    pub updated: Signal<SizeChange>,
}

impl Size {
    /// Size of `width` by `height`
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            base: ComponentBase::new(Self::NAME),
            width,
            height,
            updated: Signal::new(),
        }
    }

    /// Size of one texture cell
    pub fn from_texture(texture: &TextureInfo) -> Self {
        Self::new(texture.cell_width(), texture.cell_height())
    }

    /// Width
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Height
    pub fn height(&self) -> f64 {
        self.height
    }

    /// Set width
    pub fn set_width(&mut self, width: f64) {
        self.set_size(width, self.height);
    }

    /// Set height
    pub fn set_height(&mut self, height: f64) {
        self.set_size(self.width, height);
    }

    /// Set both dimensions, notifying once
    pub fn set_size(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
        self.base.mark_dirty();
        self.updated.dispatch(SizeChange {
            width,
            height,
            css_width: self.css_width(),
            css_height: self.css_height(),
        });
    }

    /// CSS `width`
    pub fn css_width(&self) -> String {
        format!("{}px", self.width)
    }

    /// CSS `height`
    pub fn css_height(&self) -> String {
        format!("{}px", self.height)
    }

    fn styles(&self) -> [StyleUpdate; 2] {
        let node = self.base.owner_node();
        [
            StyleUpdate::new(node, "width", self.css_width()),
            StyleUpdate::new(node, "height", self.css_height()),
        ]
    }
}

impl Component for Size {
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

impl NamedComponent for Size {
    const NAME: &'static str = "Size";
}
