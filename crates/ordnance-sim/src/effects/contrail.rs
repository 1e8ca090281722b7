//! Fading polyline trails and the effect that lets a trail die out after
//! its owner is gone.

use std::any::Any;
use std::collections::VecDeque;

use ordnance_core::render::{ContrailRenderable, Renderable};
use ordnance_core::types::{Color, WPos};

use super::{Effect, FrameEndTask, RenderContext, TickContext};

/// Ring of recent positions, newest at the front.
#[derive(Debug, Clone)]
pub struct Contrail {
    color: Color,
    capacity: usize,
    delay: usize,
    points: VecDeque<WPos>,
}

impl Contrail {
    pub fn new(color: Color, length: i32, delay: i32) -> Self {
        let capacity = length.max(0) as usize;
        Self {
            color,
            capacity,
            delay: delay.max(0) as usize,
            points: VecDeque::with_capacity(capacity),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Record a new head position, dropping the oldest when full.
    pub fn update(&mut self, pos: WPos) {
        if self.capacity == 0 {
            return;
        }
        if self.points.len() == self.capacity {
            self.points.pop_back();
        }
        self.points.push_front(pos);
    }

    /// Polyline from the newest visible point back, fading to transparent.
    pub fn render(&self) -> Option<ContrailRenderable> {
        if self.points.len() <= self.delay + 1 {
            return None;
        }
        let points = self
            .points
            .iter()
            .enumerate()
            .skip(self.delay)
            .map(|(i, pos)| {
                let t = i as f32 / self.capacity as f32;
                (*pos, Color::lerp(t, self.color, Color::TRANSPARENT))
            })
            .collect();
        Some(ContrailRenderable { points })
    }
}

/// Keeps a detached contrail on screen until it has fully faded.
pub struct ContrailFader {
    pos: WPos,
    contrail: Contrail,
    ticks: usize,
}

impl ContrailFader {
    pub fn new(pos: WPos, contrail: Contrail) -> Self {
        Self {
            pos,
            contrail,
            ticks: 0,
        }
    }

    pub fn contrail(&self) -> &Contrail {
        &self.contrail
    }
}

impl Effect for ContrailFader {
    fn tick(&mut self, ctx: &mut TickContext<'_>) {
        if self.ticks == self.contrail.capacity() {
            let id = ctx.self_id();
            ctx.add_frame_end_task(FrameEndTask::Remove(id));
        }
        self.ticks += 1;
        // Collapses the trail onto its last point one step at a time.
        self.contrail.update(self.pos);
    }

    fn render(&self, _ctx: &RenderContext<'_>) -> Vec<Renderable> {
        self.contrail
            .render()
            .map(Renderable::Contrail)
            .into_iter()
            .collect()
    }

    fn name(&self) -> &'static str {
        "contrail-fader"
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
