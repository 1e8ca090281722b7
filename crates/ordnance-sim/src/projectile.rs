//! Projectile launch arguments and the factory trait weapons fire through.

use std::sync::Arc;

use ordnance_core::components::Owner;
use ordnance_core::config::{GuidedMissileInfo, LaserZapInfo};
use ordnance_core::types::{ActorId, Target, WPos};

use crate::effects::guided_missile::GuidedMissile;
use crate::effects::laser_zap::LaserZap;
use crate::effects::{Effect, TickContext};

/// Everything a weapon knows at the moment it fires.
#[derive(Debug, Clone)]
pub struct ProjectileArgs {
    /// Weapon name, passed through to the impact.
    pub weapon: String,
    /// Launch position.
    pub source: WPos,
    /// Aim point at launch.
    pub passive_target: WPos,
    /// Target followed while it stays valid.
    pub guided_target: Target,
    pub source_actor: ActorId,
    /// Owner of the firing actor, captured at launch.
    pub source_owner: Owner,
    /// Percentages applied to the projectile's inaccuracy.
    pub inaccuracy_modifiers: Vec<i32>,
    /// Percentages applied by the host to the impact's damage.
    pub damage_modifiers: Vec<i32>,
}

/// A projectile definition that can be turned into a live effect.
pub trait ProjectileInfo {
    fn create(&self, args: ProjectileArgs, ctx: &mut TickContext<'_>) -> Box<dyn Effect>;
}

impl ProjectileInfo for Arc<GuidedMissileInfo> {
    fn create(&self, args: ProjectileArgs, ctx: &mut TickContext<'_>) -> Box<dyn Effect> {
        Box::new(GuidedMissile::new(Arc::clone(self), args, ctx))
    }
}

impl ProjectileInfo for Arc<LaserZapInfo> {
    fn create(&self, args: ProjectileArgs, _ctx: &mut TickContext<'_>) -> Box<dyn Effect> {
        Box::new(LaserZap::new(Arc::clone(self), args))
    }
}
