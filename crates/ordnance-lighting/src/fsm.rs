//! Day/night cycle finite state machine.
//!
//! Pure functions over plain data: given the phase that just finished and
//! the effect it was fading to, pick the next phase from a fixed table.

use ordnance_core::config::PaletteEffectInfo;
use ordnance_core::enums::LightingEffect;

/// Segment of the lighting timeline currently playing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CyclePhase {
    /// Fade to/from black on world load or exit.
    #[default]
    Fade,
    MorningToDay,
    /// Holding full daylight.
    Day,
    DayToEvening,
    EveningToNight,
    /// Holding night.
    Night,
    NightToMorning,
}

/// The next segment to play.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub phase: CyclePhase,
    pub to: LightingEffect,
    /// Ticks the segment lasts.
    pub length: i32,
}

/// Transition taken when the segment `phase` (fading to `to`) has finished.
///
/// Returns `None` for effects outside the cycle (None, Black, Desaturated).
pub fn next_transition(
    phase: CyclePhase,
    to: LightingEffect,
    info: &PaletteEffectInfo,
) -> Option<Transition> {
    let (phase, to, length) = match (to, phase) {
        (LightingEffect::Morning, _) => (
            CyclePhase::MorningToDay,
            LightingEffect::Day,
            info.morning_day_transition_length,
        ),
        (LightingEffect::Day, CyclePhase::Day) => (
            CyclePhase::DayToEvening,
            LightingEffect::Evening,
            info.day_evening_transition_length,
        ),
        (LightingEffect::Day, _) => (CyclePhase::Day, LightingEffect::Day, info.day_length),
        (LightingEffect::Evening, _) => (
            CyclePhase::EveningToNight,
            LightingEffect::Night,
            info.evening_night_transition_length,
        ),
        (LightingEffect::Night, CyclePhase::Night) => (
            CyclePhase::NightToMorning,
            LightingEffect::Morning,
            info.night_morning_transition_length,
        ),
        (LightingEffect::Night, _) => (CyclePhase::Night, LightingEffect::Night, info.night_length),
        (LightingEffect::None | LightingEffect::Black | LightingEffect::Desaturated, _) => {
            return None
        }
    };

    Some(Transition { phase, to, length })
}
