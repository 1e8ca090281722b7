//! World lighting for the ordnance effects.
//!
//! Implements the palette fade state machine, the day/night cycle
//! transition table and per-effect color grading.

pub mod effect;
pub mod fsm;
pub mod palette;
pub mod profiles;

pub use effect::WorldPaletteEffect;
pub use ordnance_core as core;
pub use palette::{Palette, PaletteSet};

#[cfg(test)]
mod tests;
