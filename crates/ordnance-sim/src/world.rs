//! World state shared by all effects: actors, map, fog, sequences and the
//! random stream.

use hecs::{Entity, World};

use ordnance_core::components::{BlocksProjectiles, Dead, Targetable};
use ordnance_core::events::WorldEvent;
use ordnance_core::types::{ActorId, CPos, EffectId, Target, WPos};

use crate::animation::Sequences;
use crate::effects::{FrameEndTask, RenderContext, TickContext};
use crate::map::{FogOfWar, Map};
use crate::random::SharedRandom;

pub struct WorldState {
    pub actors: World,
    pub map: Map,
    pub fog: FogOfWar,
    pub sequences: Sequences,
    pub random: SharedRandom,
}

impl WorldState {
    pub fn new(map: Map, seed: u64) -> Self {
        Self {
            actors: World::new(),
            map,
            fog: FogOfWar::revealed(),
            sequences: Sequences::new(),
            random: SharedRandom::from_seed(seed),
        }
    }

    /// Borrow everything an effect may touch during its tick.
    pub fn context<'a>(
        &'a mut self,
        self_id: EffectId,
        tick: u64,
        tasks: &'a mut Vec<FrameEndTask>,
        events: &'a mut Vec<WorldEvent>,
    ) -> TickContext<'a> {
        TickContext {
            actors: &self.actors,
            map: &self.map,
            sequences: &self.sequences,
            random: &mut self.random,
            tick,
            self_id,
            tasks,
            events,
        }
    }

    pub fn render_context(&self) -> RenderContext<'_> {
        RenderContext {
            map: &self.map,
            fog: &self.fog,
        }
    }
}

pub fn actor_id(entity: Entity) -> ActorId {
    ActorId(entity.to_bits().get())
}

pub fn entity(id: ActorId) -> Option<Entity> {
    Entity::from_bits(id.0)
}

/// Whether the actor exists, can be targeted and is alive.
pub fn is_valid_actor(actors: &World, id: ActorId) -> bool {
    let Some(entity) = entity(id) else {
        return false;
    };
    actors.contains(entity)
        && actors.get::<&Targetable>(entity).is_ok()
        && actors.get::<&Dead>(entity).is_err()
}

/// Center of a valid actor.
pub fn actor_position(actors: &World, id: ActorId) -> Option<WPos> {
    let entity = entity(id)?;
    actors.get::<&WPos>(entity).ok().map(|p| *p)
}

/// Current position of a target, or `None` if it is no longer valid.
pub fn resolve_target(actors: &World, target: &Target) -> Option<WPos> {
    match target {
        Target::Invalid => None,
        Target::Terrain(pos) => Some(*pos),
        Target::Actor(id) if is_valid_actor(actors, *id) => actor_position(actors, *id),
        Target::Actor(_) => None,
    }
}

/// Whether any actor in `cell` stops projectiles.
pub fn blocks_projectiles_at(actors: &World, cell: CPos) -> bool {
    actors
        .query::<(&WPos, &BlocksProjectiles)>()
        .iter()
        .any(|(_, (pos, _))| CPos::containing(*pos) == cell)
}
