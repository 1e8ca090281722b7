//! World palette effect: fades, desaturation and day/night lighting.

use ordnance_core::config::PaletteEffectInfo;
use ordnance_core::enums::LightingEffect;
use ordnance_core::types::Color;

use crate::fsm::{self, CyclePhase, Transition};
use crate::palette::PaletteSet;
use crate::profiles::color_for_effect;

/// Lighting state of the world. Ticked once per rendered frame.
#[derive(Debug, Clone)]
pub struct WorldPaletteEffect {
    info: PaletteEffectInfo,
    phase: CyclePhase,
    from: LightingEffect,
    to: LightingEffect,
    remaining_frames: i32,
    fade_length: i32,
}

impl WorldPaletteEffect {
    pub fn new(info: PaletteEffectInfo) -> Self {
        Self {
            info,
            phase: CyclePhase::Fade,
            from: LightingEffect::Black,
            to: LightingEffect::Black,
            remaining_frames: 0,
            fade_length: 0,
        }
    }

    pub fn info(&self) -> &PaletteEffectInfo {
        &self.info
    }

    pub fn phase(&self) -> CyclePhase {
        self.phase
    }

    /// Effect being faded from.
    pub fn from(&self) -> LightingEffect {
        self.from
    }

    /// Effect being faded to (or held).
    pub fn to(&self) -> LightingEffect {
        self.to
    }

    pub fn remaining_frames(&self) -> i32 {
        self.remaining_frames
    }

    /// Start fading in from black to the configured initial effect.
    pub fn world_loaded(&mut self) {
        self.fade_to(self.info.initial_effect);
    }

    /// Fade from the current effect to black, e.g. when leaving the map.
    pub fn fade_out(&mut self) {
        self.fade_to(LightingEffect::Black);
    }

    /// Fade to an arbitrary effect over the configured fade length.
    pub fn fade_to(&mut self, effect: LightingEffect) {
        self.start(Transition {
            phase: CyclePhase::Fade,
            to: effect,
            length: self.info.fade_length,
        });
    }

    fn start(&mut self, transition: Transition) {
        log::trace!(
            "lighting {:?} -> {:?} ({:?}, {} ticks)",
            self.to,
            transition.to,
            transition.phase,
            transition.length
        );
        self.phase = transition.phase;
        self.fade_length = transition.length;
        self.remaining_frames = transition.length;
        self.from = self.to;
        self.to = transition.to;
    }

    /// Advance the fade by one frame and step the day/night cycle.
    pub fn tick_render(&mut self) {
        if self.remaining_frames > 0 {
            self.remaining_frames -= 1;
        }

        if !self.info.day_night_cycle || self.remaining_frames > 0 {
            return;
        }

        if let Some(next) = fsm::next_transition(self.phase, self.to, &self.info) {
            self.start(next);
        }
    }

    /// Color a single entry the way `adjust_palettes` would.
    pub fn adjusted_color(&self, orig: Color) -> Color {
        let target = color_for_effect(&self.info, self.to, orig);
        if self.remaining_frames == 0 {
            return target;
        }

        let from = color_for_effect(&self.info, self.from, orig);
        let t = self.remaining_frames as f32 / self.fade_length as f32;
        Color::lerp(t, target, from)
    }

    /// Rewrite every non-excluded palette for the current lighting.
    ///
    /// Palettes are expected to hold their base colors on entry; the host
    /// restores them before each call.
    pub fn adjust_palettes(&self, palettes: &mut PaletteSet) {
        if self.to == LightingEffect::None && self.remaining_frames == 0 {
            return;
        }

        for (name, palette) in palettes.iter_mut() {
            if self.info.exclude_palettes.iter().any(|p| p == name) {
                continue;
            }

            for i in 0..palette.len() {
                let adjusted = self.adjusted_color(palette.color(i));
                palette.set_color(i, adjusted);
            }
        }
    }
}
