//! ECS components for hecs actor entities.
//!
//! Components are plain data structs. An actor's center position is its
//! `WPos` component.

use serde::{Deserialize, Serialize};

use crate::enums::Stance;
use crate::types::{Color, PlayerId};

/// Owning player of an actor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Owner {
    pub player: PlayerId,
    /// Team number; 0 means no team.
    pub team: u32,
    pub color: Color,
    /// Suffix used for player-colored palettes.
    pub internal_name: String,
}

impl Owner {
    /// Relation of `self` toward `other`.
    pub fn stance_to(&self, other: &Owner) -> Stance {
        if self.player == other.player || (self.team != 0 && self.team == other.team) {
            Stance::Ally
        } else {
            Stance::Enemy
        }
    }
}

/// Actor can be the guided target of a weapon.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Targetable;

/// Actor is dead and awaiting removal. Dead actors are never valid targets.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Dead;

/// Actor stops blockable projectiles in its cell.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BlocksProjectiles;

/// Actor throws nearby jammable missiles off course.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct JamsMissiles {
    /// Horizontal jamming radius in world units.
    pub range: i32,
    /// Whether missiles fired by allies are jammed too.
    pub allied_missiles: bool,
    /// Chance per tick to jam, in percent (1..=100).
    pub chance: i32,
}

impl Default for JamsMissiles {
    fn default() -> Self {
        Self {
            range: 0,
            allied_missiles: true,
            chance: 100,
        }
    }
}
