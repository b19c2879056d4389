//! Texture component
//!
//! The engine core never decodes images. A [`TextureInfo`] carries what the
//! scene needs: a key for the renderer, the image dimensions and the cell
//! grid of a sprite sheet.

use serde::{Deserialize, Serialize};

use crate::ecs::component_manager::Siblings;
use crate::ecs::render::{RenderContext, StyleSink, StyleUpdate};
use crate::ecs::{Component, ComponentBase, NamedComponent};
use crate::events::Signal;
use crate::foundation::math::Rect;

/// Metadata of a loaded image, optionally split into equal cells
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextureInfo {
    /// Renderer lookup key, used as the image URL on DOM layers
    pub key: String,
    /// Image width in pixels
    pub width: f64,
    /// Image height in pixels
    pub height: f64,
    /// Cells per row
    pub columns: u32,
    /// Cells per column
    pub rows: u32,
}

impl TextureInfo {
    /// Single-cell texture
    pub fn new(key: impl Into<String>, width: f64, height: f64) -> Self {
        Self::sheet(key, width, height, 1, 1)
    }

    /// Sprite sheet of `columns` by `rows` equal cells
    pub fn sheet(key: impl Into<String>, width: f64, height: f64, columns: u32, rows: u32) -> Self {
        Self {
            key: key.into(),
            width,
            height,
            columns: columns.max(1),
            rows: rows.max(1),
        }
    }

    /// Number of cells
    pub fn cell_count(&self) -> usize {
        self.columns as usize * self.rows as usize
    }

    /// Width of one cell
    pub fn cell_width(&self) -> f64 {
        self.width / f64::from(self.columns)
    }

    /// Height of one cell
    pub fn cell_height(&self) -> f64 {
        self.height / f64::from(self.rows)
    }

    /// Source rectangle of a cell, row-major
    pub fn cell(&self, index: usize) -> Option<Rect> {
        if index >= self.cell_count() {
            return None;
        }
        let columns = self.columns as usize;
        let (column, row) = (index % columns, index / columns);
        Some(Rect::new(
            column as f64 * self.cell_width(),
            row as f64 * self.cell_height(),
            self.cell_width(),
            self.cell_height(),
        ))
    }
}

/// Payload of [`Texture::updated`]
#[derive(Debug, Clone, PartialEq)]
pub struct TextureChange {
    /// Texture key
    pub key: String,
    /// Current cell
    pub cell_index: usize,
    /// CSS `background-position` value
    pub css_background_position: String,
}

/// Image a node is drawn with
#[derive(Debug)]
pub struct Texture {
    base: ComponentBase,
    info: TextureInfo,
    cell_index: usize,
    /// Fired after the texture or the cell changes
    pub updated: Signal<TextureChange>,
}

impl Texture {
    /// Show the first cell of `info`
    pub fn new(info: TextureInfo) -> Self {
        Self {
            base: ComponentBase::new(Self::NAME),
            info,
            cell_index: 0,
            updated: Signal::new(),
        }
    }

    /// Current texture metadata
    pub fn info(&self) -> &TextureInfo {
        &self.info
    }

    /// Index of the displayed cell
    pub fn cell_index(&self) -> usize {
        self.cell_index
    }

    /// Source rectangle of the displayed cell
    pub fn cell_rect(&self) -> Option<Rect> {
        self.info.cell(self.cell_index)
    }

    /// Display another cell; out of range indices are ignored
    pub fn set_cell_index(&mut self, index: usize) -> bool {
        if index >= self.info.cell_count() {
            return false;
        }
        self.cell_index = index;
        self.changed();
        true
    }

    /// Swap the image, resetting to the first cell
    pub fn set_info(&mut self, info: TextureInfo) {
        self.info = info;
        self.cell_index = 0;
        self.changed();
    }

    fn changed(&mut self) {
        self.base.mark_dirty();
        self.updated.dispatch(TextureChange {
            key: self.info.key.clone(),
            cell_index: self.cell_index,
            css_background_position: self.css_background_position(),
        });
    }

    /// CSS `background-image`
    pub fn css_background_image(&self) -> String {
        format!("url(\"{}\")", self.info.key)
    }

    /// CSS `background-position` of the current cell
    pub fn css_background_position(&self) -> String {
        let cell = self.cell_rect().unwrap_or_default();
        format!("{}px {}px", 0.0 - cell.x, 0.0 - cell.y)
    }

    fn styles(&self) -> [StyleUpdate; 2] {
        let node = self.base.owner_node();
        [
            StyleUpdate::new(node, "background-image", self.css_background_image()),
            StyleUpdate::new(node, "background-position", self.css_background_position()),
        ]
    }
}

impl Component for Texture {
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

impl NamedComponent for Texture {
    const NAME: &'static str = "Texture";
}
