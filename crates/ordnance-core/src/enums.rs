//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Diplomatic relation between two owners.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Stance {
    Ally,
    Enemy,
}

/// Cross-section of a drawn beam.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum BeamShape {
    #[default]
    Cylindrical,
    Flat,
}

/// Palette lighting preset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LightingEffect {
    #[default]
    None,
    Black,
    Desaturated,
    Morning,
    Day,
    Evening,
    Night,
}

/// Why a guided missile detonated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExplosionCause {
    /// Altitude dropped below zero.
    HitGround,
    /// Within the proximity radius of the aim point.
    CloseEnough,
    /// Flew longer than its range limit.
    RangeLimit,
    /// A projectile-blocking actor occupies the cell.
    Blocked,
    /// Left the playable map.
    LeftMap,
    /// Left the terrain type it is bound to.
    LeftTerrain,
}
