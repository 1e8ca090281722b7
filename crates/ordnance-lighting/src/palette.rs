//! Mutable color palettes.

use std::collections::BTreeMap;

use ordnance_core::constants::PALETTE_SIZE;
use ordnance_core::types::Color;

/// A 256-entry color table owned by the renderer.
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    colors: Vec<Color>,
}

/// Named palettes, iterated in name order.
pub type PaletteSet = BTreeMap<String, Palette>;

impl Palette {
    /// Palette with every entry set to `color`.
    pub fn filled(color: Color) -> Self {
        Self {
            colors: vec![color; PALETTE_SIZE],
        }
    }

    /// Palette from explicit entries; missing entries are transparent, extras dropped.
    pub fn from_colors(colors: &[Color]) -> Self {
        let mut palette = Self::filled(Color::TRANSPARENT);
        for (slot, c) in palette.colors.iter_mut().zip(colors) {
            *slot = *c;
        }
        palette
    }

    pub fn color(&self, index: usize) -> Color {
        self.colors[index]
    }

    pub fn set_color(&mut self, index: usize, color: Color) {
        self.colors[index] = color;
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}
