//! Render backend identification
//!
//! A node or component declares which rendering technologies it can be drawn
//! through as a [`BackendSupport`] set and is checked against the
//! [`BackendKind`] of the layer it joins through a single
//! [`BackendSupport::supports`] call.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

/// Rendering technology a node is drawn through
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum BackendKind {
    /// Not on a layer yet
    #[default]
    Unassigned,
    /// Canvas2D
    Canvas,
    /// DOM elements styled with CSS
    Dom,
    /// WebGL
    WebGl,
}

bitflags! {
    /// Set of backends something can be rendered with
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct BackendSupport: u8 {
        /// Canvas2D
        const CANVAS = 0b001;
        /// DOM/CSS
        const DOM = 0b010;
        /// WebGL
        const WEBGL = 0b100;
    }
}

impl BackendSupport {
    /// Canvas and DOM, the default for engine components
    pub const STANDARD: Self = Self::CANVAS.union(Self::DOM);

    /// Whether something with this support set can join a layer of `backend`
    ///
    /// [`BackendKind::Unassigned`] is accepted by everything.
    pub const fn supports(self, backend: BackendKind) -> bool {
        match backend {
            BackendKind::Unassigned => true,
            BackendKind::Canvas => self.contains(Self::CANVAS),
            BackendKind::Dom => self.contains(Self::DOM),
            BackendKind::WebGl => self.contains(Self::WEBGL),
        }
    }
}

impl Default for BackendSupport {
    fn default() -> Self {
        Self::STANDARD
    }
}
