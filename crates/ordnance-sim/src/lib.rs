//! Simulation side of the ordnance effects.
//!
//! Owns the hecs actor world, the map and the shared random stream, ticks
//! projectile effects at a fixed rate and collects the events and
//! renderables they produce.

pub mod animation;
pub mod editor;
pub mod effects;
pub mod engine;
pub mod error;
pub mod map;
pub mod projectile;
pub mod random;
pub mod world;

pub use engine::{SimConfig, SimulationEngine};
pub use error::SimError;
pub use ordnance_core as core;
pub use ordnance_lighting as lighting;

#[cfg(test)]
pub(crate) mod test_support;

#[cfg(test)]
mod tests;
