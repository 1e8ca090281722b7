//! Fixed-point angles and 8-bit facings.
//!
//! A `WAngle` is 1024 units per full turn. A facing is 256 steps per full
//! turn, 0 = North, counter-clockwise (64 = West, 192 = East).

use std::f64::consts::TAU;

use serde::{Deserialize, Serialize};

use crate::constants::{ANGLE_UNITS, FACING_STEPS};
use crate::types::WVec;

/// Angle in 1/1024ths of a full turn.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WAngle(i32);

impl WAngle {
    pub const ZERO: WAngle = WAngle(0);

    /// Create an angle, wrapping into `0..1024`.
    pub const fn new(angle: i32) -> Self {
        Self(angle.rem_euclid(ANGLE_UNITS))
    }

    pub const fn from_degrees(degrees: i32) -> Self {
        Self::new(degrees * ANGLE_UNITS / 360)
    }

    pub const fn from_facing(facing: i32) -> Self {
        Self::new(facing * (ANGLE_UNITS / FACING_STEPS))
    }

    pub const fn angle(self) -> i32 {
        self.0
    }

    pub fn radians(self) -> f64 {
        self.0 as f64 * TAU / ANGLE_UNITS as f64
    }

    /// `sin(angle) * 1024`.
    pub fn sin(self) -> i32 {
        scaled(self.radians().sin())
    }

    /// `cos(angle) * 1024`.
    pub fn cos(self) -> i32 {
        scaled(self.radians().cos())
    }

    /// `tan(angle) * 1024`, saturating near the poles.
    pub fn tan(self) -> i32 {
        scaled(self.radians().tan())
    }

    /// Angle of the vector `(x, y)` with y pointing up.
    pub fn arc_tan(y: i32, x: i32) -> Self {
        let turns = (y as f64).atan2(x as f64) / TAU;
        Self::new((turns * ANGLE_UNITS as f64).round() as i32)
    }
}

fn scaled(v: f64) -> i32 {
    (v * 1024.0).round().clamp(i32::MIN as f64, i32::MAX as f64) as i32
}

/// Wrap any integer into a facing.
pub fn wrap_facing(facing: i32) -> i32 {
    facing.rem_euclid(FACING_STEPS)
}

/// Facing that points along `d`. A zero vector keeps `current`.
pub fn get_facing(d: WVec, current: i32) -> i32 {
    if d.length_squared() == 0 {
        return current;
    }

    // North is -y in world space.
    let angle = WAngle::arc_tan(-d.y, d.x).angle();
    wrap_facing(angle / (ANGLE_UNITS / FACING_STEPS) - FACING_STEPS / 4)
}

/// Turn `facing` toward `desired` by at most `rate` steps along the shorter arc.
pub fn tick_facing(facing: i32, desired: i32, rate: i32) -> i32 {
    let left = wrap_facing(facing - desired);
    let right = wrap_facing(desired - facing);
    if left.min(right) < rate {
        wrap_facing(desired)
    } else if right < left {
        wrap_facing(facing + rate)
    } else {
        wrap_facing(facing - rate)
    }
}

/// Horizontal vector of `length` pointing along `facing`.
pub fn facing_vector(facing: i32, length: i32) -> WVec {
    let yaw = WAngle::from_facing(facing);
    let unit = WVec::new(-yaw.sin(), -yaw.cos(), 0);
    WVec::new(
        (unit.x as i64 * length as i64 / 1024) as i32,
        (unit.y as i64 * length as i64 / 1024) as i32,
        0,
    )
}

/// Shortest signed distance between two facings, in `-128..128`.
pub fn facing_delta(from: i32, to: i32) -> i32 {
    let d = wrap_facing(to - from);
    if d >= FACING_STEPS / 2 {
        d - FACING_STEPS
    } else {
        d
    }
}
