//! Instant-hit laser beam that fades out over its duration.

use std::any::Any;
use std::sync::Arc;

use ordnance_core::config::LaserZapInfo;
use ordnance_core::enums::BeamShape;
use ordnance_core::events::Impact;
use ordnance_core::render::{BeamRenderable, Renderable};
use ordnance_core::types::{Color, WPos};

use super::{Effect, FrameEndTask, RenderContext, TickContext};
use crate::animation::Animation;
use crate::projectile::ProjectileArgs;
use crate::world::resolve_target;

pub struct LaserZap {
    info: Arc<LaserZapInfo>,
    args: ProjectileArgs,
    source: WPos,
    target: WPos,
    color: Color,
    secondary_color: Color,
    hit_anim: Option<Animation>,
    ticks: i32,
    removal_scheduled: bool,
}

impl LaserZap {
    pub fn new(info: Arc<LaserZapInfo>, args: ProjectileArgs) -> Self {
        let player_color = args.source_owner.color;
        let color = if info.use_player_color {
            player_color.with_alpha(info.color.a)
        } else {
            info.color
        };
        let secondary_color = if info.secondary_beam_use_player_color {
            player_color.with_alpha(info.secondary_beam_color.a)
        } else {
            info.secondary_beam_color
        };

        Self {
            source: args.source,
            target: args.passive_target,
            hit_anim: info.hit_anim.as_deref().map(Animation::new),
            color,
            secondary_color,
            info,
            args,
            ticks: 0,
            removal_scheduled: false,
        }
    }

    pub fn target(&self) -> WPos {
        self.target
    }

    pub fn ticks(&self) -> i32 {
        self.ticks
    }

    fn beam(&self, shape: BeamShape, width: i32, z_offset: i32, color: Color) -> Renderable {
        let duration = self.info.beam_duration;
        let alpha = (duration - self.ticks) * color.a as i32 / duration;
        Renderable::Beam(BeamRenderable {
            source: self.source,
            z_offset,
            length: self.target - self.source,
            shape,
            width,
            color: color.with_alpha(alpha.clamp(0, 255) as u8),
        })
    }
}

impl Effect for LaserZap {
    fn tick(&mut self, ctx: &mut TickContext<'_>) {
        if let Some(pos) = resolve_target(ctx.actors, &self.args.guided_target) {
            self.target = pos;
        }

        if self.ticks == 0 {
            if let Some(anim) = &mut self.hit_anim {
                anim.play_once(ctx.sequences, &self.info.hit_anim_sequence);
            }
            ctx.add_frame_end_task(FrameEndTask::Impact(Impact {
                weapon: self.args.weapon.clone(),
                pos: self.target,
                source: self.args.source_actor,
                damage_modifiers: self.args.damage_modifiers.clone(),
            }));
        }

        if let Some(anim) = &mut self.hit_anim {
            anim.tick();
        }
        self.ticks += 1;

        let anim_done = self.hit_anim.as_ref().map_or(true, Animation::is_complete);
        if self.ticks >= self.info.beam_duration && anim_done && !self.removal_scheduled {
            self.removal_scheduled = true;
            let id = ctx.self_id();
            ctx.add_frame_end_task(FrameEndTask::Remove(id));
        }
    }

    fn render(&self, ctx: &RenderContext<'_>) -> Vec<Renderable> {
        let hidden = |pos: WPos| ctx.fog.obscures(ctx.map.cell_containing(pos));
        if hidden(self.target) && hidden(self.source) {
            return Vec::new();
        }

        let mut out = Vec::new();
        if self.ticks < self.info.beam_duration {
            out.push(self.beam(self.info.shape, self.info.width, self.info.z_offset, self.color));
            if self.info.draw_secondary_beam {
                out.push(self.beam(
                    self.info.secondary_beam_shape,
                    self.info.secondary_beam_width,
                    self.info.secondary_beam_z_offset,
                    self.secondary_color,
                ));
            }
        }

        if let Some(anim) = &self.hit_anim {
            out.extend(
                anim.render(self.target, 0, &self.info.hit_anim_palette)
                    .map(Renderable::Sprite),
            );
        }
        out
    }

    fn name(&self) -> &'static str {
        "laser-zap"
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
