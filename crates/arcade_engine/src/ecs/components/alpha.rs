//! Alpha component

use crate::ecs::component_manager::Siblings;
use crate::ecs::render::{RenderContext, StyleSink, StyleUpdate};
use crate::ecs::{Component, ComponentBase, NamedComponent};
use crate::events::Signal;

/// Payload of [`Alpha::updated`]
#[derive(Debug, Clone, PartialEq)]
pub struct AlphaChange {
    /// New opacity
    pub value: f64,
    /// CSS `opacity` value
    pub css_opacity: String,
}

/// Opacity of a node, clamped to `0..=1`
#[derive(Debug)]
pub struct Alpha {
    base: ComponentBase,
    value: f64,
    /// Fired after every change
    pub updated: Signal<AlphaChange>,
}

impl Alpha {
    /// Alpha with an initial opacity
    pub fn new(value: f64) -> Self {
        Self {
            base: ComponentBase::new(Self::NAME),
            value: value.clamp(0.0, 1.0),
            updated: Signal::new(),
        }
    }

    /// Opacity
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Set opacity
    pub fn set_value(&mut self, value: f64) {
        self.value = value.clamp(0.0, 1.0);
        self.base.mark_dirty();
        self.updated.dispatch(AlphaChange {
            value: self.value,
            css_opacity: self.css_opacity(),
        });
    }

    /// Change opacity by `delta`
    pub fn increment(&mut self, delta: f64) {
        self.set_value(self.value + delta);
    }

    /// CSS `opacity`
    pub fn css_opacity(&self) -> String {
        self.value.to_string()
    }

    fn style(&self) -> StyleUpdate {
        StyleUpdate::new(self.base.owner_node(), "opacity", self.css_opacity())
    }
}

impl Default for Alpha {
    fn default() -> Self {
        Self::new(1.0)
    }
}

impl Component for Alpha {
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

impl NamedComponent for Alpha {
    const NAME: &'static str = "Alpha";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_is_clamped() {
        let mut alpha = Alpha::new(3.0);
        assert_eq!(alpha.value(), 1.0);
        alpha.increment(-0.25);
        assert_eq!(alpha.css_opacity(), "0.75");
        alpha.set_value(-1.0);
        assert_eq!(alpha.value(), 0.0);
        assert!(alpha.base().is_dirty());
    }
}
