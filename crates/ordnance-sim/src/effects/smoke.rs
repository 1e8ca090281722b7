//! One-shot smoke puff left behind by missiles.

use std::any::Any;

use ordnance_core::constants::IDLE_SEQUENCE;
use ordnance_core::render::Renderable;
use ordnance_core::types::WPos;

use super::{Effect, FrameEndTask, RenderContext, TickContext};
use crate::animation::{Animation, Sequences};

pub struct Smoke {
    pos: WPos,
    anim: Animation,
    palette: String,
    removal_scheduled: bool,
}

impl Smoke {
    pub fn new(sequences: &Sequences, pos: WPos, image: &str, palette: &str) -> Self {
        let mut anim = Animation::new(image);
        anim.play_once(sequences, IDLE_SEQUENCE);
        Self {
            pos,
            anim,
            palette: palette.to_string(),
            removal_scheduled: false,
        }
    }

    pub fn pos(&self) -> WPos {
        self.pos
    }

    pub fn palette(&self) -> &str {
        &self.palette
    }
}

impl Effect for Smoke {
    fn tick(&mut self, ctx: &mut TickContext<'_>) {
        if self.removal_scheduled {
            return;
        }
        self.anim.tick();
        if self.anim.is_complete() {
            self.removal_scheduled = true;
            let id = ctx.self_id();
            ctx.add_frame_end_task(FrameEndTask::Remove(id));
        }
    }

    fn render(&self, ctx: &RenderContext<'_>) -> Vec<Renderable> {
        if ctx.fog.obscures(ctx.map.cell_containing(self.pos)) {
            return Vec::new();
        }
        self.anim
            .render(self.pos, 0, &self.palette)
            .map(Renderable::Sprite)
            .into_iter()
            .collect()
    }

    fn name(&self) -> &'static str {
        "smoke"
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
