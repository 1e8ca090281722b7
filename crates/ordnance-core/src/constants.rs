//! Simulation constants and tuning defaults.

/// Simulation tick rate (Hz).
pub const TICK_RATE: u32 = 25;

// --- World space ---

/// World units along one edge of a map cell.
pub const WORLD_UNITS_PER_CELL: i32 = 1024;

/// `WAngle` units per full turn.
pub const ANGLE_UNITS: i32 = 1024;

/// Facing steps per full turn.
pub const FACING_STEPS: i32 = 256;

// --- Guided missile ---

/// Default speed in world units per tick.
pub const MISSILE_DEFAULT_SPEED: i32 = 8;

/// Default maximum climb/dive pitch in degrees.
pub const MISSILE_DEFAULT_MAX_PITCH_DEGREES: i32 = 30;

/// Default facing steps turned per tick.
pub const MISSILE_DEFAULT_RATE_OF_TURN: i32 = 5;

/// Default proximity radius that counts as a hit.
pub const MISSILE_DEFAULT_CLOSE_ENOUGH: i32 = 298;

/// Default ticks between trail puffs.
pub const MISSILE_DEFAULT_TRAIL_INTERVAL: i32 = 2;

/// Shortest flight plan in ticks, also used for zero-distance launches.
pub const MISSILE_MIN_PATH_LENGTH: i32 = 2;

/// Samples summed when drawing the aim offset distribution.
pub const INACCURACY_PDF_SAMPLES: i32 = 2;

/// Maximum facing jitter applied to a jammed missile, in each direction.
pub const JAM_FACING_JITTER: i32 = 20;

/// Lowest random altitude a jammed missile steers to.
pub const JAM_ALTITUDE_MIN: i32 = -43;

/// Exclusive upper bound of the random altitude a jammed missile steers to.
pub const JAM_ALTITUDE_MAX: i32 = 86;

// --- Laser zap ---

/// Default beam width in world units.
pub const BEAM_DEFAULT_WIDTH: i32 = 86;

/// Default ticks a beam stays visible.
pub const BEAM_DEFAULT_DURATION: i32 = 10;

// --- Palettes ---

/// Entries in one palette.
pub const PALETTE_SIZE: usize = 256;

/// Default palette for projectile sprites and trails.
pub const EFFECT_PALETTE: &str = "effect";

/// Palette used for ground shadows.
pub const SHADOW_PALETTE: &str = "shadow";

/// Palette used by the map editor for actor previews.
pub const EDITOR_PALETTE: &str = "terrain";

/// Sequence played by looping projectile sprites and trail puffs.
pub const IDLE_SEQUENCE: &str = "idle";

// --- Lighting ---

/// Ticks to fade to/from black on world load and exit.
pub const LIGHTING_FADE_LENGTH: i32 = 10;

/// One minute of game time in ticks.
pub const TICKS_PER_MINUTE: i32 = 60 * TICK_RATE as i32;
