//! Guided missile: flies an interpolated arc toward its target, steering
//! with a limited turn rate and pitch, and can be thrown off course by
//! jamming actors.

use std::any::Any;
use std::sync::Arc;

use ordnance_core::angle::{facing_vector, get_facing, tick_facing, wrap_facing};
use ordnance_core::components::{JamsMissiles, Owner};
use ordnance_core::config::GuidedMissileInfo;
use ordnance_core::constants::{
    IDLE_SEQUENCE, INACCURACY_PDF_SAMPLES, MISSILE_MIN_PATH_LENGTH, SHADOW_PALETTE,
};
use ordnance_core::enums::{ExplosionCause, Stance};
use ordnance_core::events::{Impact, WorldEvent};
use ordnance_core::render::Renderable;
use ordnance_core::types::{apply_percentage_modifiers, ActorId, WPos, WVec};

use super::contrail::{Contrail, ContrailFader};
use super::smoke::Smoke;
use super::{Effect, FrameEndTask, RenderContext, TickContext};
use crate::animation::Animation;
use crate::projectile::ProjectileArgs;
use crate::world::{actor_id, blocks_projectiles_at, resolve_target};

pub struct GuidedMissile {
    info: Arc<GuidedMissileInfo>,
    args: ProjectileArgs,
    anim: Option<Animation>,
    contrail: Option<Contrail>,
    trail_palette: String,

    ticks_to_next_smoke: i32,
    pos: WPos,
    facing: i32,
    length: i32,
    target_position: WPos,
    offset: WVec,
    ticks: i32,
    lock_on: bool,
    last_move: WVec,
    jammed: bool,
    exploded: Option<ExplosionCause>,
}

impl GuidedMissile {
    pub fn new(
        info: Arc<GuidedMissileInfo>,
        args: ProjectileArgs,
        ctx: &mut TickContext<'_>,
    ) -> Self {
        let pos = args.source;
        let target_position = args.passive_target;
        let to_target = target_position - pos;
        let facing = get_facing(to_target, 0);
        let length = (to_target.length() / info.speed).max(MISSILE_MIN_PATH_LENGTH);

        let lock_on = ctx.random.next(100) < info.lock_on_probability;

        let offset = if info.inaccuracy > 0 {
            let inaccuracy = apply_percentage_modifiers(info.inaccuracy, &args.inaccuracy_modifiers);
            ctx.random.pdf_offset(INACCURACY_PDF_SAMPLES) * inaccuracy / 1024
        } else {
            WVec::ZERO
        };

        let anim = info.image.as_deref().map(|image| {
            let mut anim = Animation::new(image);
            anim.play_repeating(ctx.sequences, IDLE_SEQUENCE);
            anim
        });

        let contrail = (info.contrail_length > 0).then(|| {
            let color = if info.contrail_use_player_color {
                args.source_owner.color
            } else {
                info.contrail_color
            };
            Contrail::new(color, info.contrail_length, info.contrail_delay)
        });

        let trail_palette = if info.trail_use_player_palette {
            format!("{}{}", info.trail_palette, args.source_owner.internal_name)
        } else {
            info.trail_palette.clone()
        };

        Self {
            info,
            args,
            anim,
            contrail,
            trail_palette,
            ticks_to_next_smoke: 0,
            pos,
            facing,
            length,
            target_position,
            offset,
            ticks: 0,
            lock_on,
            last_move: WVec::ZERO,
            jammed: false,
            exploded: None,
        }
    }

    pub fn info(&self) -> &GuidedMissileInfo {
        &self.info
    }

    pub fn pos(&self) -> WPos {
        self.pos
    }

    pub fn facing(&self) -> i32 {
        self.facing
    }

    /// Flight plan length in ticks.
    pub fn length(&self) -> i32 {
        self.length
    }

    pub fn ticks(&self) -> i32 {
        self.ticks
    }

    pub fn lock_on(&self) -> bool {
        self.lock_on
    }

    pub fn target_position(&self) -> WPos {
        self.target_position
    }

    /// Aim offset from the target, fixed at launch.
    pub fn offset(&self) -> WVec {
        self.offset
    }

    /// Displacement applied on the last tick.
    pub fn last_move(&self) -> WVec {
        self.last_move
    }

    /// Whether a jammer steered the missile on the last tick.
    pub fn is_jammed(&self) -> bool {
        self.jammed
    }

    pub fn exploded(&self) -> Option<ExplosionCause> {
        self.exploded
    }

    pub fn contrail(&self) -> Option<&Contrail> {
        self.contrail.as_ref()
    }

    /// Sprite facing with the banking of the arc applied.
    pub fn effective_facing(&self) -> i32 {
        let at = self.ticks as f32 / (self.length - 1) as f32;
        let attitude = self.info.angle.tan() as f32 * (1.0 - 2.0 * at) / 4096.0;

        let u = (self.facing % 128) as f32 / 128.0;
        let scale = 512.0 * u * (1.0 - u);

        let banked = if self.facing < 128 {
            self.facing as f32 - scale * attitude
        } else {
            self.facing as f32 + scale * attitude
        };
        wrap_facing(banked as i32)
    }

    /// First jammer in range that decides to jam this tick.
    fn find_jammer(&self, ctx: &mut TickContext<'_>) -> Option<ActorId> {
        let mut jammers: Vec<(ActorId, WPos, JamsMissiles, Option<Owner>)> = ctx
            .actors
            .query::<(&WPos, &JamsMissiles, Option<&Owner>)>()
            .iter()
            .map(|(entity, (pos, jams, owner))| (actor_id(entity), *pos, *jams, owner.cloned()))
            .collect();
        jammers.sort_by_key(|(id, ..)| *id);

        for (id, pos, jams, owner) in jammers {
            let range = jams.range as i64;
            if (pos - self.pos).horizontal_length_squared() > range * range {
                continue;
            }

            let allied = owner
                .map(|o| o.stance_to(&self.args.source_owner) == Stance::Ally)
                .unwrap_or(false);
            if allied && !jams.allied_missiles {
                continue;
            }

            if ctx.random.next(100 / jams.chance.clamp(1, 100)) == 0 {
                return Some(id);
            }
        }
        None
    }

    fn explosion_cause(&self, ctx: &TickContext<'_>, dist: WVec) -> Option<ExplosionCause> {
        let cell = ctx.map.cell_containing(self.pos);
        let close_enough = self.info.close_enough as i64;

        if self.pos.z < 0 {
            return Some(ExplosionCause::HitGround);
        }
        if dist.length_squared() < close_enough * close_enough {
            return Some(ExplosionCause::CloseEnough);
        }
        if self.info.range_limit != 0 && self.ticks > self.info.range_limit {
            return Some(ExplosionCause::RangeLimit);
        }
        if self.info.blockable && blocks_projectiles_at(ctx.actors, cell) {
            return Some(ExplosionCause::Blocked);
        }
        if !ctx.map.contains(cell) {
            return Some(ExplosionCause::LeftMap);
        }
        match &self.info.bound_to_terrain_type {
            Some(bound) if ctx.map.terrain_type(cell) != Some(bound.as_str()) => {
                Some(ExplosionCause::LeftTerrain)
            }
            _ => None,
        }
    }

    fn explode(&mut self, ctx: &mut TickContext<'_>, cause: ExplosionCause) {
        self.exploded = Some(cause);

        if let Some(contrail) = self.contrail.take() {
            ctx.add_frame_end_task(FrameEndTask::Add(Box::new(ContrailFader::new(
                self.pos, contrail,
            ))));
        }
        let id = ctx.self_id();
        ctx.add_frame_end_task(FrameEndTask::Remove(id));

        let armed = self.ticks > self.info.arm;
        ctx.emit(WorldEvent::Detonation {
            cause,
            pos: self.pos,
            ticks: self.ticks,
            armed,
        });

        if !armed {
            log::debug!(
                "{} dud after {} ticks ({:?}) at {:?}",
                self.args.weapon,
                self.ticks,
                cause,
                self.pos
            );
            return;
        }

        log::debug!(
            "{} detonated after {} ticks ({:?}) at {:?}",
            self.args.weapon,
            self.ticks,
            cause,
            self.pos
        );
        ctx.add_frame_end_task(FrameEndTask::Impact(Impact {
            weapon: self.args.weapon.clone(),
            pos: self.pos,
            source: self.args.source_actor,
            damage_modifiers: self.args.damage_modifiers.clone(),
        }));
    }
}

impl Effect for GuidedMissile {
    fn tick(&mut self, ctx: &mut TickContext<'_>) {
        if self.exploded.is_some() {
            return;
        }

        self.ticks += 1;
        if let Some(anim) = &mut self.anim {
            anim.tick();
        }

        // Nominal position along the planned arc.
        self.pos = WPos::lerp_quadratic(
            self.args.source,
            self.target_position,
            self.info.angle,
            self.ticks,
            self.length,
        );

        let guided = resolve_target(ctx.actors, &self.args.guided_target);
        if let (Some(center), true) = (guided, self.lock_on) {
            self.target_position = center;
        }

        let dist = self.target_position + self.offset - self.pos;
        let mut desired_facing = get_facing(dist, self.facing);
        let mut desired_altitude = self.target_position.z;

        self.jammed = false;
        if self.info.jammable {
            if let Some(jammer) = self.find_jammer(ctx) {
                let jitter = self.info.jam_facing_jitter;
                desired_facing = self.facing + ctx.random.next_range(-jitter, jitter + 1);
                desired_altitude = ctx
                    .random
                    .next_range(self.info.jam_altitude_min, self.info.jam_altitude_max);
                self.jammed = true;
                log::trace!("{} jammed by {:?}", self.args.weapon, jammer);
            }
        }

        if !self.jammed && guided.is_none() {
            desired_facing = self.facing;
        }

        self.facing = tick_facing(self.facing, desired_facing, self.info.rate_of_turn);

        let mut step = facing_vector(self.facing, self.info.speed);
        if self.pos.z != desired_altitude {
            let delta = (step.horizontal_length() as i64 * self.info.maximum_pitch.tan() as i64
                / 1024) as i32;
            step.z += (self.target_position.z - self.pos.z).clamp(-delta, delta);
        }

        self.pos += step;
        self.last_move = step;

        if let Some(trail) = &self.info.trail {
            self.ticks_to_next_smoke -= 1;
            if self.ticks_to_next_smoke < 0 {
                let smoke = Smoke::new(
                    ctx.sequences,
                    self.pos - step * 3 / 2,
                    trail,
                    &self.trail_palette,
                );
                ctx.add_frame_end_task(FrameEndTask::Add(Box::new(smoke)));
                self.ticks_to_next_smoke = self.info.trail_interval;
            }
        }

        if let Some(contrail) = &mut self.contrail {
            contrail.update(self.pos);
        }

        if let Some(cause) = self.explosion_cause(ctx, dist) {
            self.explode(ctx, cause);
        }
    }

    fn render(&self, ctx: &RenderContext<'_>) -> Vec<Renderable> {
        let mut out = Vec::new();
        if let Some(trail) = self.contrail.as_ref().and_then(Contrail::render) {
            out.push(Renderable::Contrail(trail));
        }

        if ctx.fog.obscures(ctx.map.cell_containing(self.pos)) {
            return out;
        }

        if let Some(anim) = &self.anim {
            let facing = self.effective_facing();
            if self.info.shadow {
                let ground = WPos::new(self.pos.x, self.pos.y, 0);
                out.extend(anim.render(ground, facing, SHADOW_PALETTE).map(Renderable::Sprite));
            }
            out.extend(
                anim.render(self.pos, facing, &self.info.palette)
                    .map(Renderable::Sprite),
            );
        }
        out
    }

    fn name(&self) -> &'static str {
        "guided-missile"
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
