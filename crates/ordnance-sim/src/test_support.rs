use ordnance_core::components::{Owner, Targetable};
use ordnance_core::events::{Impact, WorldEvent};
use ordnance_core::types::{ActorId, Color, EffectId, PlayerId, Target, WPos};

use crate::effects::{Effect, FrameEndTask, TickContext};
use crate::map::Map;
use crate::projectile::ProjectileArgs;
use crate::world::{actor_id, WorldState};

pub(crate) const HARNESS_EFFECT_ID: EffectId = EffectId(1);

// Ticks a single effect against a world, recording what it queues.
pub(crate) struct Harness {
    pub state: WorldState,
    pub tasks: Vec<FrameEndTask>,
    pub events: Vec<WorldEvent>,
    pub tick: u64,
}

impl Harness {
    pub(crate) fn new() -> Self {
        Self::with_seed(7)
    }

    pub(crate) fn with_seed(seed: u64) -> Self {
        Self {
            state: WorldState::new(Map::new(64, 64, "Clear"), seed),
            tasks: Vec::new(),
            events: Vec::new(),
            tick: 0,
        }
    }

    pub(crate) fn ctx(&mut self) -> TickContext<'_> {
        let tick = self.tick;
        self.state
            .context(HARNESS_EFFECT_ID, tick, &mut self.tasks, &mut self.events)
    }

    pub(crate) fn tick(&mut self, effect: &mut dyn Effect) {
        self.tick += 1;
        let mut ctx = self.ctx();
        effect.tick(&mut ctx);
    }

    pub(crate) fn spawn_target(&mut self, pos: WPos) -> ActorId {
        actor_id(self.state.actors.spawn((pos, Targetable)))
    }

    pub(crate) fn removals(&self) -> usize {
        self.tasks
            .iter()
            .filter(|t| matches!(t, FrameEndTask::Remove(id) if *id == HARNESS_EFFECT_ID))
            .count()
    }

    pub(crate) fn additions(&self) -> usize {
        self.tasks
            .iter()
            .filter(|t| matches!(t, FrameEndTask::Add(_)))
            .count()
    }

    pub(crate) fn added_names(&self) -> Vec<&'static str> {
        self.tasks
            .iter()
            .filter_map(|t| match t {
                FrameEndTask::Add(effect) => Some(effect.name()),
                _ => None,
            })
            .collect()
    }

    pub(crate) fn impacts(&self) -> Vec<&Impact> {
        self.tasks
            .iter()
            .filter_map(|t| match t {
                FrameEndTask::Impact(impact) => Some(impact),
                _ => None,
            })
            .collect()
    }
}

pub(crate) fn owner(player: u32, team: u32) -> Owner {
    Owner {
        player: PlayerId(player),
        team,
        color: Color::rgb(40, 200, 40),
        internal_name: format!("player{player}"),
    }
}

pub(crate) fn args(source: WPos, passive_target: WPos, guided_target: Target) -> ProjectileArgs {
    ProjectileArgs {
        weapon: "Dragon".to_string(),
        source,
        passive_target,
        guided_target,
        source_actor: ActorId(1),
        source_owner: owner(1, 0),
        inaccuracy_modifiers: Vec::new(),
        damage_modifiers: vec![100],
    }
}
