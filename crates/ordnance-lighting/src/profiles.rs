//! Lighting-preset color grading.
//!
//! Maps each `LightingEffect` to the transformation it applies to a
//! single palette entry.

use ordnance_core::config::{LightingFactors, PaletteEffectInfo};
use ordnance_core::enums::LightingEffect;
use ordnance_core::types::Color;

/// Channel multipliers for the time-of-day presets, `None` for the others.
pub fn factors_for(info: &PaletteEffectInfo, effect: LightingEffect) -> Option<LightingFactors> {
    match effect {
        LightingEffect::Morning => Some(info.morning),
        LightingEffect::Day => Some(info.daylight),
        LightingEffect::Evening => Some(info.evening),
        LightingEffect::Night => Some(info.night),
        LightingEffect::None | LightingEffect::Black | LightingEffect::Desaturated => None,
    }
}

/// Color `orig` as seen under `effect`. Alpha is always preserved.
pub fn color_for_effect(info: &PaletteEffectInfo, effect: LightingEffect, orig: Color) -> Color {
    match effect {
        LightingEffect::None => orig,
        LightingEffect::Black => Color::BLACK.with_alpha(orig.a),
        LightingEffect::Desaturated => {
            let lum = (255.0 * orig.lightness()) as u8;
            Color::rgba(lum, lum, lum, orig.a)
        }
        LightingEffect::Morning
        | LightingEffect::Day
        | LightingEffect::Evening
        | LightingEffect::Night => match factors_for(info, effect) {
            Some(f) => Color::rgba(
                scale_channel(orig.r, f.red),
                scale_channel(orig.g, f.green),
                scale_channel(orig.b, f.blue),
                orig.a,
            ),
            None => orig,
        },
    }
}

fn scale_channel(channel: u8, percent: i32) -> u8 {
    (channel as i32 * percent / 100).clamp(0, 255) as u8
}
