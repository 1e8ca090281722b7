//! Simulation engine: owns the world and every live effect.
//!
//! `SimulationEngine` ticks effects in insertion order, then applies the
//! frame-end queue they filled. Completely headless, so every run with the
//! same seed and the same inputs is identical.

use serde::{Deserialize, Serialize};

use ordnance_core::components::Owner;
use ordnance_core::config::{ConfigError, PaletteEffectInfo};
use ordnance_core::events::WorldEvent;
use ordnance_core::render::Renderable;
use ordnance_core::types::{ActorId, EffectId, SimTime, Target, WPos};
use ordnance_lighting::{PaletteSet, WorldPaletteEffect};

use crate::animation::Sequences;
use crate::effects::{Effect, FrameEndTask};
use crate::error::SimError;
use crate::map::{FogOfWar, Map};
use crate::projectile::{ProjectileArgs, ProjectileInfo};
use crate::world::{self, WorldState};

/// Configuration for starting a new simulation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// RNG seed for determinism. Same seed = same simulation.
    pub seed: u64,
    pub map_width: i32,
    pub map_height: i32,
    /// Terrain type every cell starts with.
    pub default_terrain: String,
    /// World lighting; `None` leaves palettes untouched.
    pub lighting: Option<PaletteEffectInfo>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            map_width: 64,
            map_height: 64,
            default_terrain: "Clear".to_string(),
            lighting: None,
        }
    }
}

impl SimConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.map_width <= 0 {
            return Err(ConfigError::InvalidValue {
                field: "map_width",
                reason: "must be positive",
            });
        }
        if self.map_height <= 0 {
            return Err(ConfigError::InvalidValue {
                field: "map_height",
                reason: "must be positive",
            });
        }
        if let Some(lighting) = &self.lighting {
            lighting.validate()?;
        }
        Ok(())
    }
}

/// The simulation engine. Owns the world state and all effects.
pub struct SimulationEngine {
    state: WorldState,
    time: SimTime,
    effects: Vec<(EffectId, Box<dyn Effect>)>,
    next_effect_id: u64,
    frame_end: Vec<FrameEndTask>,
    events: Vec<WorldEvent>,
    lighting: Option<WorldPaletteEffect>,
}

impl SimulationEngine {
    /// Create a new simulation engine with the given config.
    pub fn new(config: SimConfig) -> Self {
        log::info!(
            "starting simulation: seed {}, {}x{} map",
            config.seed,
            config.map_width,
            config.map_height
        );
        let map = Map::new(config.map_width, config.map_height, &config.default_terrain);
        Self {
            state: WorldState::new(map, config.seed),
            time: SimTime::default(),
            effects: Vec::new(),
            next_effect_id: 1,
            frame_end: Vec::new(),
            events: Vec::new(),
            lighting: config.lighting.map(WorldPaletteEffect::new),
        }
    }

    /// Get the current simulation time.
    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn actors(&self) -> &hecs::World {
        &self.state.actors
    }

    pub fn actors_mut(&mut self) -> &mut hecs::World {
        &mut self.state.actors
    }

    pub fn map(&self) -> &Map {
        &self.state.map
    }

    pub fn map_mut(&mut self) -> &mut Map {
        &mut self.state.map
    }

    pub fn fog_mut(&mut self) -> &mut FogOfWar {
        &mut self.state.fog
    }

    pub fn sequences_mut(&mut self) -> &mut Sequences {
        &mut self.state.sequences
    }

    /// Draws taken from the shared random stream so far.
    pub fn random_draws(&self) -> u64 {
        self.state.random.draws()
    }

    pub fn effect_count(&self) -> usize {
        self.effects.len()
    }

    pub fn effect(&self, id: EffectId) -> Option<&dyn Effect> {
        self.effects
            .iter()
            .find(|(effect_id, _)| *effect_id == id)
            .map(|(_, effect)| effect.as_ref())
    }

    /// A live effect, if it is of type `T`.
    pub fn effect_as<T: 'static>(&self, id: EffectId) -> Option<&T> {
        self.effect(id)?.as_any().downcast_ref::<T>()
    }

    /// Names of live effects in tick order.
    pub fn effect_names(&self) -> Vec<&'static str> {
        self.effects.iter().map(|(_, effect)| effect.name()).collect()
    }

    fn allocate_id(&mut self) -> EffectId {
        let id = EffectId(self.next_effect_id);
        self.next_effect_id += 1;
        id
    }

    /// Create a projectile and add it to the world immediately.
    pub fn fire(&mut self, info: &dyn ProjectileInfo, args: ProjectileArgs) -> EffectId {
        let id = self.allocate_id();
        let weapon = args.weapon.clone();
        let mut ctx = self
            .state
            .context(id, self.time.tick, &mut self.frame_end, &mut self.events);
        let effect = info.create(args, &mut ctx);
        log::debug!("{} fired as {} {:?}", weapon, effect.name(), id);
        self.effects.push((id, effect));
        id
    }

    /// Fire `weapon` from an existing actor at `target`, capturing the
    /// actor's position and owner.
    pub fn launch(
        &mut self,
        info: &dyn ProjectileInfo,
        weapon: &str,
        source_actor: ActorId,
        target: Target,
    ) -> Result<EffectId, SimError> {
        let actors = &self.state.actors;
        let entity = world::entity(source_actor)
            .filter(|e| actors.contains(*e))
            .ok_or(SimError::UnknownActor(source_actor))?;
        let source = actors
            .get::<&WPos>(entity)
            .map(|p| *p)
            .map_err(|_| SimError::MissingPosition(source_actor))?;
        let source_owner = actors
            .get::<&Owner>(entity)
            .map(|o| (*o).clone())
            .map_err(|_| SimError::MissingOwner(source_actor))?;
        let passive_target =
            world::resolve_target(actors, &target).ok_or(SimError::InvalidTarget)?;

        let args = ProjectileArgs {
            weapon: weapon.to_string(),
            source,
            passive_target,
            guided_target: target,
            source_actor,
            source_owner,
            inaccuracy_modifiers: Vec::new(),
            damage_modifiers: Vec::new(),
        };
        Ok(self.fire(info, args))
    }

    /// Advance the simulation by one tick and return the events it raised.
    pub fn tick(&mut self) -> Vec<WorldEvent> {
        let tick = self.time.tick;
        for (id, effect) in self.effects.iter_mut() {
            let mut ctx = self
                .state
                .context(*id, tick, &mut self.frame_end, &mut self.events);
            effect.tick(&mut ctx);
        }

        self.apply_frame_end();
        self.time.advance();
        std::mem::take(&mut self.events)
    }

    /// Apply queued tasks in submission order.
    fn apply_frame_end(&mut self) {
        for task in std::mem::take(&mut self.frame_end) {
            match task {
                FrameEndTask::Add(effect) => {
                    let id = self.allocate_id();
                    self.effects.push((id, effect));
                }
                FrameEndTask::Remove(id) => {
                    self.effects.retain(|(effect_id, _)| *effect_id != id);
                }
                FrameEndTask::Impact(impact) => {
                    self.events.push(WorldEvent::Impact(impact));
                }
            }
        }
    }

    /// Everything to draw this frame, in effect order.
    pub fn render(&self) -> Vec<Renderable> {
        let ctx = self.state.render_context();
        self.effects
            .iter()
            .flat_map(|(_, effect)| effect.render(&ctx))
            .collect()
    }

    // ---- Lighting ----

    pub fn lighting(&self) -> Option<&WorldPaletteEffect> {
        self.lighting.as_ref()
    }

    /// Start the fade in from black.
    pub fn world_loaded(&mut self) {
        if let Some(lighting) = &mut self.lighting {
            lighting.world_loaded();
        }
    }

    pub fn fade_out(&mut self) {
        if let Some(lighting) = &mut self.lighting {
            lighting.fade_out();
        }
    }

    /// Advance lighting by one rendered frame.
    pub fn tick_render(&mut self) {
        if let Some(lighting) = &mut self.lighting {
            lighting.tick_render();
        }
    }

    pub fn adjust_palettes(&self, palettes: &mut PaletteSet) {
        if let Some(lighting) = &self.lighting {
            lighting.adjust_palettes(palettes);
        }
    }
}
