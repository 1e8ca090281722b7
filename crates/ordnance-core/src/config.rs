//! Declarative configuration records for projectiles, lighting and rendering.
//!
//! Records are loaded from JSON with per-field defaults and validated once.
//! Everything downstream treats them as read-only and already valid.

use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::angle::WAngle;
use crate::constants::*;
use crate::enums::{BeamShape, LightingEffect};
use crate::types::Color;

/// Failure to load or validate a configuration record.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid value for `{field}`: {reason}")]
    InvalidValue {
        field: &'static str,
        reason: &'static str,
    },
}

fn invalid(field: &'static str, reason: &'static str) -> ConfigError {
    ConfigError::InvalidValue { field, reason }
}

fn from_json_validated<T, F>(json: &str, validate: F) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
    F: FnOnce(&T) -> Result<(), ConfigError>,
{
    let record: T = serde_json::from_str(json)?;
    validate(&record)?;
    Ok(record)
}

// ---- Guided missile ----

/// Guided missile projectile definition. Shared by every missile of one type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GuidedMissileInfo {
    /// Sprite image; `None` draws nothing but the contrail.
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default = "default_effect_palette")]
    pub palette: String,
    /// Draw a ground shadow under the sprite.
    #[serde(default)]
    pub shadow: bool,
    /// Speed in world units per tick.
    #[serde(default = "default_missile_speed")]
    pub speed: i32,
    /// Maximum vertical pitch when changing altitude.
    #[serde(default = "default_maximum_pitch")]
    pub maximum_pitch: WAngle,
    /// Banking angle of the interpolated flight path.
    #[serde(default)]
    pub angle: WAngle,
    /// Ticks before the missile is armed and may deal damage.
    #[serde(default)]
    pub arm: i32,
    /// Stopped by actors that block projectiles.
    #[serde(default = "default_true")]
    pub blockable: bool,
    /// Maximum aim offset in world units.
    #[serde(default)]
    pub inaccuracy: i32,
    /// Percent chance of locking onto and following the target.
    #[serde(default = "default_lock_on_probability")]
    pub lock_on_probability: i32,
    /// Facing steps turned per tick.
    #[serde(default = "default_rate_of_turn")]
    pub rate_of_turn: i32,
    /// Detonate after this many ticks of flight; 0 disables.
    #[serde(default)]
    pub range_limit: i32,
    /// Trail puff image.
    #[serde(default)]
    pub trail: Option<String>,
    /// Ticks between trail puffs.
    #[serde(default = "default_trail_interval")]
    pub trail_interval: i32,
    #[serde(default = "default_effect_palette")]
    pub trail_palette: String,
    #[serde(default)]
    pub trail_use_player_palette: bool,
    /// Contrail points kept; 0 disables the contrail.
    #[serde(default)]
    pub contrail_length: i32,
    #[serde(default = "default_contrail_color")]
    pub contrail_color: Color,
    #[serde(default)]
    pub contrail_use_player_color: bool,
    /// Newest contrail points hidden behind the sprite.
    #[serde(default = "default_contrail_delay")]
    pub contrail_delay: i32,
    /// Can be thrown off course by jamming actors.
    #[serde(default = "default_true")]
    pub jammable: bool,
    /// Detonate when leaving this terrain type (e.g. "Water" for torpedoes).
    #[serde(default)]
    pub bound_to_terrain_type: Option<String>,
    /// Detonate inside this radius of the aim point.
    #[serde(default = "default_close_enough")]
    pub close_enough: i32,
    /// Facing jitter of a jammed missile, in each direction.
    #[serde(default = "default_jam_facing_jitter")]
    pub jam_facing_jitter: i32,
    /// Lowest altitude a jammed missile steers to.
    #[serde(default = "default_jam_altitude_min")]
    pub jam_altitude_min: i32,
    /// Exclusive upper bound of the altitude a jammed missile steers to.
    #[serde(default = "default_jam_altitude_max")]
    pub jam_altitude_max: i32,
}

fn default_true() -> bool {
    true
}
fn default_effect_palette() -> String {
    EFFECT_PALETTE.to_string()
}
fn default_missile_speed() -> i32 {
    MISSILE_DEFAULT_SPEED
}
fn default_maximum_pitch() -> WAngle {
    WAngle::from_degrees(MISSILE_DEFAULT_MAX_PITCH_DEGREES)
}
fn default_lock_on_probability() -> i32 {
    100
}
fn default_rate_of_turn() -> i32 {
    MISSILE_DEFAULT_RATE_OF_TURN
}
fn default_trail_interval() -> i32 {
    MISSILE_DEFAULT_TRAIL_INTERVAL
}
fn default_contrail_color() -> Color {
    Color::WHITE
}
fn default_contrail_delay() -> i32 {
    1
}
fn default_close_enough() -> i32 {
    MISSILE_DEFAULT_CLOSE_ENOUGH
}
fn default_jam_facing_jitter() -> i32 {
    JAM_FACING_JITTER
}
fn default_jam_altitude_min() -> i32 {
    JAM_ALTITUDE_MIN
}
fn default_jam_altitude_max() -> i32 {
    JAM_ALTITUDE_MAX
}

impl Default for GuidedMissileInfo {
    fn default() -> Self {
        Self {
            image: None,
            palette: default_effect_palette(),
            shadow: false,
            speed: default_missile_speed(),
            maximum_pitch: default_maximum_pitch(),
            angle: WAngle::ZERO,
            arm: 0,
            blockable: true,
            inaccuracy: 0,
            lock_on_probability: default_lock_on_probability(),
            rate_of_turn: default_rate_of_turn(),
            range_limit: 0,
            trail: None,
            trail_interval: default_trail_interval(),
            trail_palette: default_effect_palette(),
            trail_use_player_palette: false,
            contrail_length: 0,
            contrail_color: default_contrail_color(),
            contrail_use_player_color: false,
            contrail_delay: default_contrail_delay(),
            jammable: true,
            bound_to_terrain_type: None,
            close_enough: default_close_enough(),
            jam_facing_jitter: default_jam_facing_jitter(),
            jam_altitude_min: default_jam_altitude_min(),
            jam_altitude_max: default_jam_altitude_max(),
        }
    }
}

impl GuidedMissileInfo {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        from_json_validated(json, Self::validate)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.speed <= 0 {
            return Err(invalid("speed", "must be positive"));
        }
        // Pitch must stay below vertical so the climb clamp is finite and non-negative.
        if !(0..ANGLE_UNITS / 4).contains(&self.maximum_pitch.angle()) {
            return Err(invalid("maximum_pitch", "must be in 0..256"));
        }
        if !(0..=100).contains(&self.lock_on_probability) {
            return Err(invalid("lock_on_probability", "must be in 0..=100"));
        }
        if self.rate_of_turn < 0 {
            return Err(invalid("rate_of_turn", "must not be negative"));
        }
        if self.inaccuracy < 0 {
            return Err(invalid("inaccuracy", "must not be negative"));
        }
        if self.range_limit < 0 {
            return Err(invalid("range_limit", "must not be negative"));
        }
        if self.trail_interval < 0 {
            return Err(invalid("trail_interval", "must not be negative"));
        }
        if self.contrail_length < 0 || self.contrail_delay < 0 {
            return Err(invalid("contrail_length", "must not be negative"));
        }
        if self.close_enough < 0 {
            return Err(invalid("close_enough", "must not be negative"));
        }
        if self.jam_facing_jitter < 0 {
            return Err(invalid("jam_facing_jitter", "must not be negative"));
        }
        if self.jam_altitude_min >= self.jam_altitude_max {
            return Err(invalid("jam_altitude_min", "must be below jam_altitude_max"));
        }
        Ok(())
    }
}

// ---- Laser zap ----

/// Instant-hit beam projectile definition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LaserZapInfo {
    #[serde(default = "default_beam_width")]
    pub width: i32,
    #[serde(default)]
    pub shape: BeamShape,
    /// Z sorting offset.
    #[serde(default)]
    pub z_offset: i32,
    /// Ticks the beam stays visible while fading out.
    #[serde(default = "default_beam_duration")]
    pub beam_duration: i32,
    #[serde(default)]
    pub use_player_color: bool,
    #[serde(default = "default_beam_color")]
    pub color: Color,
    #[serde(default = "default_true")]
    pub draw_secondary_beam: bool,
    #[serde(default = "default_beam_width")]
    pub secondary_beam_width: i32,
    #[serde(default)]
    pub secondary_beam_shape: BeamShape,
    #[serde(default)]
    pub secondary_beam_z_offset: i32,
    #[serde(default)]
    pub secondary_beam_use_player_color: bool,
    #[serde(default = "default_beam_color")]
    pub secondary_beam_color: Color,
    /// Impact animation image.
    #[serde(default)]
    pub hit_anim: Option<String>,
    #[serde(default = "default_idle_sequence")]
    pub hit_anim_sequence: String,
    #[serde(default = "default_effect_palette")]
    pub hit_anim_palette: String,
}

fn default_beam_width() -> i32 {
    BEAM_DEFAULT_WIDTH
}
fn default_beam_duration() -> i32 {
    BEAM_DEFAULT_DURATION
}
fn default_beam_color() -> Color {
    Color::RED
}
fn default_idle_sequence() -> String {
    IDLE_SEQUENCE.to_string()
}

impl Default for LaserZapInfo {
    fn default() -> Self {
        Self {
            width: default_beam_width(),
            shape: BeamShape::default(),
            z_offset: 0,
            beam_duration: default_beam_duration(),
            use_player_color: false,
            color: default_beam_color(),
            draw_secondary_beam: true,
            secondary_beam_width: default_beam_width(),
            secondary_beam_shape: BeamShape::default(),
            secondary_beam_z_offset: 0,
            secondary_beam_use_player_color: false,
            secondary_beam_color: default_beam_color(),
            hit_anim: None,
            hit_anim_sequence: default_idle_sequence(),
            hit_anim_palette: default_effect_palette(),
        }
    }
}

impl LaserZapInfo {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        from_json_validated(json, Self::validate)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.beam_duration <= 0 {
            return Err(invalid("beam_duration", "must be positive"));
        }
        if self.width < 0 || self.secondary_beam_width < 0 {
            return Err(invalid("width", "must not be negative"));
        }
        Ok(())
    }
}

// ---- World palette effect ----

/// Per-channel lighting multipliers in percent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LightingFactors {
    pub red: i32,
    pub green: i32,
    pub blue: i32,
}

impl LightingFactors {
    pub const fn new(red: i32, green: i32, blue: i32) -> Self {
        Self { red, green, blue }
    }
}

/// World-wide palette fading and day/night lighting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaletteEffectInfo {
    /// Palettes never touched by lighting.
    #[serde(default = "default_exclude_palettes")]
    pub exclude_palettes: Vec<String>,
    /// Ticks to fade between black and the initial effect, and back out.
    #[serde(default = "default_fade_length")]
    pub fade_length: i32,
    #[serde(default = "default_transition_length")]
    pub morning_day_transition_length: i32,
    #[serde(default = "default_phase_length")]
    pub day_length: i32,
    #[serde(default = "default_transition_length")]
    pub day_evening_transition_length: i32,
    #[serde(default = "default_transition_length")]
    pub evening_night_transition_length: i32,
    #[serde(default = "default_phase_length")]
    pub night_length: i32,
    #[serde(default = "default_transition_length")]
    pub night_morning_transition_length: i32,
    #[serde(default = "default_morning_factors")]
    pub morning: LightingFactors,
    #[serde(default = "default_daylight_factors")]
    pub daylight: LightingFactors,
    #[serde(default = "default_evening_factors")]
    pub evening: LightingFactors,
    #[serde(default = "default_night_factors")]
    pub night: LightingFactors,
    /// Cycle through the times of day.
    #[serde(default)]
    pub day_night_cycle: bool,
    /// Effect faded to when the world loads.
    #[serde(default)]
    pub initial_effect: LightingEffect,
}

fn default_exclude_palettes() -> Vec<String> {
    ["flashyeffects", "cursor", "chrome", "colorpicker", "fog", "shroud"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}
fn default_fade_length() -> i32 {
    LIGHTING_FADE_LENGTH
}
fn default_transition_length() -> i32 {
    TICKS_PER_MINUTE
}
fn default_phase_length() -> i32 {
    2 * TICKS_PER_MINUTE
}
fn default_morning_factors() -> LightingFactors {
    LightingFactors::new(75, 85, 85)
}
fn default_daylight_factors() -> LightingFactors {
    LightingFactors::new(100, 100, 100)
}
fn default_evening_factors() -> LightingFactors {
    LightingFactors::new(85, 60, 75)
}
fn default_night_factors() -> LightingFactors {
    LightingFactors::new(35, 45, 60)
}

impl Default for PaletteEffectInfo {
    fn default() -> Self {
        Self {
            exclude_palettes: default_exclude_palettes(),
            fade_length: default_fade_length(),
            morning_day_transition_length: default_transition_length(),
            day_length: default_phase_length(),
            day_evening_transition_length: default_transition_length(),
            evening_night_transition_length: default_transition_length(),
            night_length: default_phase_length(),
            night_morning_transition_length: default_transition_length(),
            morning: default_morning_factors(),
            daylight: default_daylight_factors(),
            evening: default_evening_factors(),
            night: default_night_factors(),
            day_night_cycle: false,
            initial_effect: LightingEffect::None,
        }
    }
}

impl PaletteEffectInfo {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        from_json_validated(json, Self::validate)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let lengths = [
            ("fade_length", self.fade_length),
            ("morning_day_transition_length", self.morning_day_transition_length),
            ("day_length", self.day_length),
            ("day_evening_transition_length", self.day_evening_transition_length),
            ("evening_night_transition_length", self.evening_night_transition_length),
            ("night_length", self.night_length),
            ("night_morning_transition_length", self.night_morning_transition_length),
        ];
        for (field, length) in lengths {
            if length < 0 {
                return Err(invalid(field, "must not be negative"));
            }
        }
        Ok(())
    }
}

// ---- Sprite rendering ----

/// Sprite rendering definition of an actor type.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RenderSpritesInfo {
    /// Image name; defaults to the actor name.
    #[serde(default)]
    pub image: Option<String>,
    /// Race-specific image overrides.
    #[serde(default)]
    pub race_images: BTreeMap<String, String>,
}

/// Static definition of an actor type, as far as rendering is concerned.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ActorInfo {
    pub name: String,
    #[serde(default)]
    pub render_sprites: Option<RenderSpritesInfo>,
}
