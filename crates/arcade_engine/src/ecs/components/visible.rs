//! Visible component

use crate::ecs::component_manager::Siblings;
use crate::ecs::render::{RenderContext, StyleSink, StyleUpdate};
use crate::ecs::{Component, ComponentBase, NamedComponent};
use crate::events::Signal;

/// Payload of [`Visible::updated`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisibleChange {
    /// New visibility
    pub value: bool,
    /// CSS `visibility` value
    pub css_visibility: String,
}

/// Whether a node is drawn
#[derive(Debug)]
pub struct Visible {
    base: ComponentBase,
    value: bool,
    /// Fired after every change
    pub updated: Signal<VisibleChange>,
}

impl Visible {
    /// Visibility component with an initial value
    pub fn new(value: bool) -> Self {
        Self {
            base: ComponentBase::new(Self::NAME),
            value,
            updated: Signal::new(),
        }
    }

    /// Current visibility
    pub fn value(&self) -> bool {
        self.value
    }

    /// Show or hide
    pub fn set_value(&mut self, value: bool) {
        self.value = value;
        self.base.mark_dirty();
        self.updated.dispatch(VisibleChange {
            value,
            css_visibility: self.css_visibility().to_string(),
        });
    }

    /// CSS `visibility`
    pub fn css_visibility(&self) -> &'static str {
        if self.value {
            "visible"
        } else {
            "hidden"
        }
    }

    fn style(&self) -> StyleUpdate {
        StyleUpdate::new(self.base.owner_node(), "visibility", self.css_visibility())
    }
}

impl Default for Visible {
    fn default() -> Self {
        Self::new(true)
    }
}

impl Component for Visible {
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

impl NamedComponent for Visible {
    const NAME: &'static str = "Visible";
}
