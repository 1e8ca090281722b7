//! Core types and definitions for the ordnance effects.
//!
//! This crate defines the vocabulary shared across all other crates:
//! fixed-point world types, facings, components, configuration records,
//! events and renderables. It has no dependency on the ECS or the engine.

pub mod angle;
pub mod components;
pub mod config;
pub mod constants;
pub mod enums;
pub mod events;
pub mod render;
pub mod types;
