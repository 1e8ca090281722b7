//! Transient world effects and the contexts they run in.
//!
//! Effects never mutate the effect list while it is being iterated. Adding
//! or removing effects and raising impacts is queued as a `FrameEndTask`
//! and applied by the engine after every effect has ticked.

pub mod contrail;
pub mod guided_missile;
pub mod laser_zap;
pub mod smoke;

use std::any::Any;

use hecs::World;

use ordnance_core::events::{Impact, WorldEvent};
use ordnance_core::render::Renderable;
use ordnance_core::types::EffectId;

use crate::animation::Sequences;
use crate::map::{FogOfWar, Map};
use crate::random::SharedRandom;

/// World mutation deferred to the end of the tick.
pub enum FrameEndTask {
    Add(Box<dyn Effect>),
    Remove(EffectId),
    Impact(Impact),
}

/// Everything an effect can see and touch during its tick.
pub struct TickContext<'a> {
    pub actors: &'a World,
    pub map: &'a Map,
    pub sequences: &'a Sequences,
    pub random: &'a mut SharedRandom,
    pub tick: u64,
    pub(crate) self_id: EffectId,
    pub(crate) tasks: &'a mut Vec<FrameEndTask>,
    pub(crate) events: &'a mut Vec<WorldEvent>,
}

impl TickContext<'_> {
    /// Id of the effect being ticked.
    pub fn self_id(&self) -> EffectId {
        self.self_id
    }

    pub fn add_frame_end_task(&mut self, task: FrameEndTask) {
        self.tasks.push(task);
    }

    /// Notify the host immediately.
    pub fn emit(&mut self, event: WorldEvent) {
        self.events.push(event);
    }
}

pub struct RenderContext<'a> {
    pub map: &'a Map,
    pub fog: &'a FogOfWar,
}

pub trait Effect {
    fn tick(&mut self, ctx: &mut TickContext<'_>);

    fn render(&self, ctx: &RenderContext<'_>) -> Vec<Renderable>;

    /// Short name for logging.
    fn name(&self) -> &'static str;

    fn as_any(&self) -> &dyn Any;
}
