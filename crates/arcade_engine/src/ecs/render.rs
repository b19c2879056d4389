//! Render-side collaborators
//!
//! The engine core does not draw. Render hooks receive a [`RenderContext`]
//! holding the active [`Camera`], the backend of the layer being drawn and a
//! [`StyleSink`] that DOM-backed components push CSS updates into.

use crate::core::StageConfig;
use crate::foundation::collections::NodeId;
use crate::foundation::math::Rect;

use super::BackendKind;

/// Viewport onto the stage
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    /// Left edge in world units
    pub x: f64,
    /// Top edge in world units
    pub y: f64,
    /// Viewport width
    pub width: f64,
    /// Viewport height
    pub height: f64,
    /// Hidden cameras render nothing
    pub visible: bool,
}

impl Camera {
    /// Camera at the origin
    pub fn new(width: f64, height: f64) -> Self {
        Self { x: 0.0, y: 0.0, width, height, visible: true }
    }

    /// Camera covering the whole stage
    pub fn for_stage(stage: &StageConfig) -> Self {
        Self::new(stage.width, stage.height)
    }

    /// Visible region
    pub fn viewport(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::for_stage(&StageConfig::default())
    }
}

/// One CSS property assignment for a node's element
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleUpdate {
    /// Node whose element is styled
    pub node: Option<NodeId>,
    /// CSS property name
    pub property: &'static str,
    /// CSS value
    pub value: String,
}

impl StyleUpdate {
    /// Build an update
    pub fn new(node: Option<NodeId>, property: &'static str, value: impl Into<String>) -> Self {
        Self { node, property, value: value.into() }
    }
}

/// Receiver of CSS work produced by DOM-backed components
pub trait StyleSink {
    /// Batch an update for the next DOM flush
    fn queue_style(&mut self, update: StyleUpdate);
    /// Apply an update right away
    fn apply_style(&mut self, update: StyleUpdate);
}

/// [`StyleSink`] that records everything it receives
///
/// The DOM layer renderer drains it once per frame; tests inspect it.
#[derive(Debug, Default)]
pub struct StyleBatch {
    queued: Vec<StyleUpdate>,
    applied: Vec<StyleUpdate>,
}

impl StyleBatch {
    /// Empty batch
    pub fn new() -> Self {
        Self::default()
    }

    /// Updates waiting for the flush
    pub fn queued(&self) -> &[StyleUpdate] {
        &self.queued
    }

    /// Updates applied immediately
    pub fn applied(&self) -> &[StyleUpdate] {
        &self.applied
    }

    /// Take the pending updates
    pub fn drain_queued(&mut self) -> Vec<StyleUpdate> {
        std::mem::take(&mut self.queued)
    }

    /// Latest queued value for one property of one node
    pub fn queued_value(&self, node: Option<NodeId>, property: &str) -> Option<&str> {
        self.queued
            .iter()
            .rev()
            .find(|update| update.node == node && update.property == property)
            .map(|update| update.value.as_str())
    }

    /// Forget everything
    pub fn clear(&mut self) {
        self.queued.clear();
        self.applied.clear();
    }
}

impl StyleSink for StyleBatch {
    fn queue_style(&mut self, update: StyleUpdate) {
        self.queued.push(update);
    }

    fn apply_style(&mut self, update: StyleUpdate) {
        self.applied.push(update);
    }
}

/// Everything a render hook may touch
pub struct RenderContext<'a> {
    /// Active camera
    pub camera: &'a Camera,
    /// Backend of the layer being drawn
    pub backend: BackendKind,
    /// Destination for DOM style work
    pub styles: &'a mut dyn StyleSink,
}

impl<'a> RenderContext<'a> {
    /// Bundle the render collaborators
    pub fn new(camera: &'a Camera, backend: BackendKind, styles: &'a mut dyn StyleSink) -> Self {
        Self { camera, backend, styles }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_batch_reports_latest_queued_value() {
        let mut batch = StyleBatch::new();
        batch.queue_style(StyleUpdate::new(None, "left", "1px"));
        batch.queue_style(StyleUpdate::new(None, "left", "2px"));
        batch.apply_style(StyleUpdate::new(None, "top", "3px"));

        assert_eq!(batch.queued_value(None, "left"), Some("2px"));
        assert_eq!(batch.queued_value(None, "top"), None);
        assert_eq!(batch.applied().len(), 1);
        assert_eq!(batch.drain_queued().len(), 2);
        assert!(batch.queued().is_empty());
    }

    #[test]
    fn test_camera_viewport_matches_stage() {
        let camera = Camera::for_stage(&StageConfig { width: 320.0, height: 240.0 });
        assert_eq!(camera.viewport(), Rect::new(0.0, 0.0, 320.0, 240.0));
    }
}
