//! Events emitted by effects for the host to act on.

use serde::{Deserialize, Serialize};

use crate::enums::ExplosionCause;
use crate::types::{ActorId, WPos};

/// A weapon hitting a point. The host applies warheads and damage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Impact {
    pub weapon: String,
    pub pos: WPos,
    pub source: ActorId,
    /// Damage percentages, applied by the host's warheads.
    pub damage_modifiers: Vec<i32>,
}

/// Outbound notifications, drained by the host once per tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum WorldEvent {
    /// Weapon impact; the only outbound action that changes the game.
    Impact(Impact),
    /// A guided missile met a detonation condition.
    Detonation {
        cause: ExplosionCause,
        pos: WPos,
        /// Ticks the missile flew.
        ticks: i32,
        /// `false` when it went off inside its arming delay (a dud).
        armed: bool,
    },
}
