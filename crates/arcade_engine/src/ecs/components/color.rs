//! Color component
//!
//! Channels are stored as 0..=255 integers for red, green and blue and a
//! 0..=1 float for alpha. Hex strings in `#rgb`, `#rgba`, `#rrggbb` and
//! `#rrggbbaa` form are accepted, with or without the leading `#`.

use crate::ecs::component_manager::Siblings;
use crate::ecs::render::{RenderContext, StyleSink, StyleUpdate};
use crate::ecs::{Component, ComponentBase, NamedComponent};
use crate::events::Signal;

/// Hex color parse failure
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ColorError {
    /// The string is not a supported hex color
    #[error("invalid hex color '{0}'")]
    InvalidHex(String),
}

/// Payload of [`Color::updated`]
#[derive(Debug, Clone, PartialEq)]
pub struct ColorChange {
    /// Red channel
    pub red: u8,
    /// Green channel
    pub green: u8,
    /// Blue channel
    pub blue: u8,
    /// Alpha channel
    pub alpha: f64,
    /// CSS `rgba()` value
    pub css_rgba: String,
}

/// Tint of a node
#[derive(Debug)]
pub struct Color {
    base: ComponentBase,
    red: u8,
    green: u8,
    blue: u8,
    alpha: f64,
    /// Fired after every change
    pub updated: Signal<ColorChange>,
}

fn parse_hex(text: &str) -> Result<(u8, u8, u8, f64), ColorError> {
    let invalid = || ColorError::InvalidHex(text.to_string());
    let digits = text.trim_start_matches('#');
    let digits = digits.strip_prefix("0x").unwrap_or(digits);
    if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(invalid());
    }
    let expanded: String = match digits.len() {
        3 | 4 => digits.chars().flat_map(|c| [c, c]).collect(),
        6 | 8 => digits.to_string(),
        _ => return Err(invalid()),
    };
    let channel = |index: usize| {
        expanded
            .get(index * 2..index * 2 + 2)
            .and_then(|pair| u8::from_str_radix(pair, 16).ok())
            .ok_or_else(invalid)
    };
    let alpha = if expanded.len() == 8 { f64::from(channel(3)?) / 255.0 } else { 1.0 };
    Ok((channel(0)?, channel(1)?, channel(2)?, alpha))
}

impl Color {
    /// Opaque color from 0..=255 channels
    pub fn rgb(red: u8, green: u8, blue: u8) -> Self {
        Self::rgba(red, green, blue, 1.0)
    }

    /// Color from 0..=255 channels and a 0..=1 alpha
    pub fn rgba(red: u8, green: u8, blue: u8, alpha: f64) -> Self {
        Self {
            base: ComponentBase::new(Self::NAME),
            red,
            green,
            blue,
            alpha: alpha.clamp(0.0, 1.0),
            updated: Signal::new(),
        }
    }

    /// Color from a hex string
    pub fn from_hex(text: &str) -> Result<Self, ColorError> {
        let (red, green, blue, alpha) = parse_hex(text)?;
        Ok(Self::rgba(red, green, blue, alpha))
    }

    /// Red channel
    pub fn red(&self) -> u8 {
        self.red
    }

    /// Green channel
    pub fn green(&self) -> u8 {
        self.green
    }

    /// Blue channel
    pub fn blue(&self) -> u8 {
        self.blue
    }

    /// Alpha channel
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Set every channel, notifying once
    pub fn set_rgba(&mut self, red: u8, green: u8, blue: u8, alpha: f64) {
        self.red = red;
        self.green = green;
        self.blue = blue;
        self.alpha = alpha.clamp(0.0, 1.0);
        self.base.mark_dirty();
        self.updated.dispatch(ColorChange {
            red,
            green,
            blue,
            alpha: self.alpha,
            css_rgba: self.css_rgba(),
        });
    }

    /// Set the color channels keeping alpha
    pub fn set_rgb(&mut self, red: u8, green: u8, blue: u8) {
        self.set_rgba(red, green, blue, self.alpha);
    }

    /// Set from a hex string; the color is unchanged on error
    pub fn set_hex(&mut self, text: &str) -> Result<(), ColorError> {
        let (red, green, blue, alpha) = parse_hex(text)?;
        self.set_rgba(red, green, blue, alpha);
        Ok(())
    }

    /// CSS `rgb()`
    pub fn css_rgb(&self) -> String {
        format!("rgb({},{},{})", self.red, self.green, self.blue)
    }

    /// CSS `rgba()`
    pub fn css_rgba(&self) -> String {
        format!("rgba({},{},{},{})", self.red, self.green, self.blue, self.alpha)
    }

    /// Lowercase `#rrggbb`
    pub fn hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.red, self.green, self.blue)
    }

    fn style(&self) -> StyleUpdate {
        StyleUpdate::new(self.base.owner_node(), "background-color", self.css_rgba())
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::rgb(255, 255, 255)
    }
}

impl Component for Color {
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

impl NamedComponent for Color {
    const NAME: &'static str = "Color";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_forms() {
        let short = Color::from_hex("#f80").unwrap();
        assert_eq!((short.red(), short.green(), short.blue()), (255, 136, 0));

        let long = Color::from_hex("0x336699").unwrap();
        assert_eq!(long.hex(), "#336699");

        let translucent = Color::from_hex("#00000080").unwrap();
        assert!((translucent.alpha() - 128.0 / 255.0).abs() < 1e-9);
    }

    #[test]
    fn test_invalid_hex_leaves_color_unchanged() {
        let mut color = Color::rgb(1, 2, 3);
        assert_eq!(color.set_hex("#12345"), Err(ColorError::InvalidHex("#12345".into())));
        assert_eq!(color.set_hex("#gggggg"), Err(ColorError::InvalidHex("#gggggg".into())));
        assert_eq!(color.css_rgb(), "rgb(1,2,3)");
        assert!(!color.base().is_dirty());
    }

    #[test]
    fn test_css_strings() {
        let color = Color::rgba(10, 20, 30, 0.5);
        assert_eq!(color.css_rgba(), "rgba(10,20,30,0.5)");
    }
}
