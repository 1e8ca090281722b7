//! Fundamental fixed-point world types.
//!
//! World space is measured in integer units, 1024 per map cell.
//! x = East, y = South (north is -y), z = Up (altitude).

use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub, SubAssign};

use glam::IVec3;
use serde::{Deserialize, Serialize};

use crate::angle::WAngle;
use crate::constants::WORLD_UNITS_PER_CELL;

/// Absolute position in world space.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WPos {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

/// Relative offset in world space.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WVec {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

/// Map cell coordinate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CPos {
    pub x: i32,
    pub y: i32,
}

/// Stable identifier of an actor. Handles are re-resolved every use, never cached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ActorId(pub u64);

/// Identifier of a player (owner of actors).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub u32);

/// Identifier of a live effect in the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EffectId(pub u64);

/// What a weapon is aimed at.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Target {
    #[default]
    Invalid,
    /// A live actor, valid only while it exists and is targetable.
    Actor(ActorId),
    /// A fixed point on the ground. Always valid.
    Terrain(WPos),
}

/// 8-bit RGBA color.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

/// Simulation time tracking.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SimTime {
    /// Current tick number (increments by 1 each tick).
    pub tick: u64,
}

/// Exact integer square root (floor).
pub fn isqrt(n: u64) -> u64 {
    if n < 2 {
        return n;
    }
    let mut x = (n as f64).sqrt() as u64;
    while (x as u128) * (x as u128) > n as u128 {
        x -= 1;
    }
    while ((x + 1) as u128) * ((x + 1) as u128) <= n as u128 {
        x += 1;
    }
    x
}

/// Apply a list of percentage modifiers multiplicatively (100 = unchanged).
pub fn apply_percentage_modifiers(value: i32, modifiers: &[i32]) -> i32 {
    let mut scaled = value as i64;
    for m in modifiers {
        scaled = scaled * *m as i64 / 100;
    }
    scaled.clamp(i32::MIN as i64, i32::MAX as i64) as i32
}

impl WPos {
    pub const ZERO: WPos = WPos { x: 0, y: 0, z: 0 };

    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    pub fn as_ivec3(self) -> IVec3 {
        IVec3::new(self.x, self.y, self.z)
    }

    /// Linear interpolation `a + (b - a) * mul / div`.
    pub fn lerp(a: WPos, b: WPos, mul: i32, div: i32) -> WPos {
        let d = b - a;
        let scale = |c: i32| (c as i64 * mul as i64 / div as i64) as i32;
        a + WVec::new(scale(d.x), scale(d.y), scale(d.z))
    }

    /// Linear interpolation with a parabolic height offset scaled by `tan(pitch)`.
    ///
    /// The offset peaks at the midpoint of the path and is zero at both ends.
    pub fn lerp_quadratic(a: WPos, b: WPos, pitch: WAngle, mul: i32, div: i32) -> WPos {
        let ret = Self::lerp(a, b, mul, div);
        if pitch.angle() == 0 {
            return ret;
        }

        let div = div as i128;
        let mul = mul as i128;
        let offset = (b - a).length() as i128 * pitch.tan() as i128 * mul * (div - mul)
            / (1024 * div * div);
        WPos::new(ret.x, ret.y, ret.z + offset as i32)
    }
}

impl From<IVec3> for WPos {
    fn from(v: IVec3) -> Self {
        Self::new(v.x, v.y, v.z)
    }
}

impl Sub for WPos {
    type Output = WVec;
    fn sub(self, rhs: WPos) -> WVec {
        (self.as_ivec3() - rhs.as_ivec3()).into()
    }
}

impl Add<WVec> for WPos {
    type Output = WPos;
    fn add(self, rhs: WVec) -> WPos {
        (self.as_ivec3() + rhs.as_ivec3()).into()
    }
}

impl Sub<WVec> for WPos {
    type Output = WPos;
    fn sub(self, rhs: WVec) -> WPos {
        (self.as_ivec3() - rhs.as_ivec3()).into()
    }
}

impl AddAssign<WVec> for WPos {
    fn add_assign(&mut self, rhs: WVec) {
        *self = *self + rhs;
    }
}

impl WVec {
    pub const ZERO: WVec = WVec { x: 0, y: 0, z: 0 };

    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    pub fn as_ivec3(self) -> IVec3 {
        IVec3::new(self.x, self.y, self.z)
    }

    pub fn length_squared(self) -> i64 {
        let (x, y, z) = (self.x as i64, self.y as i64, self.z as i64);
        x * x + y * y + z * z
    }

    pub fn length(self) -> i32 {
        isqrt(self.length_squared() as u64) as i32
    }

    /// Squared length ignoring altitude.
    pub fn horizontal_length_squared(self) -> i64 {
        let (x, y) = (self.x as i64, self.y as i64);
        x * x + y * y
    }

    pub fn horizontal_length(self) -> i32 {
        isqrt(self.horizontal_length_squared() as u64) as i32
    }
}

impl From<IVec3> for WVec {
    fn from(v: IVec3) -> Self {
        Self::new(v.x, v.y, v.z)
    }
}

impl Add for WVec {
    type Output = WVec;
    fn add(self, rhs: WVec) -> WVec {
        (self.as_ivec3() + rhs.as_ivec3()).into()
    }
}

impl Sub for WVec {
    type Output = WVec;
    fn sub(self, rhs: WVec) -> WVec {
        (self.as_ivec3() - rhs.as_ivec3()).into()
    }
}

impl AddAssign for WVec {
    fn add_assign(&mut self, rhs: WVec) {
        *self = *self + rhs;
    }
}

impl SubAssign for WVec {
    fn sub_assign(&mut self, rhs: WVec) {
        *self = *self - rhs;
    }
}

impl Neg for WVec {
    type Output = WVec;
    fn neg(self) -> WVec {
        (-self.as_ivec3()).into()
    }
}

impl Mul<i32> for WVec {
    type Output = WVec;
    fn mul(self, rhs: i32) -> WVec {
        (self.as_ivec3() * rhs).into()
    }
}

impl Div<i32> for WVec {
    type Output = WVec;
    fn div(self, rhs: i32) -> WVec {
        (self.as_ivec3() / rhs).into()
    }
}

impl CPos {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Cell containing a world position.
    pub fn containing(pos: WPos) -> Self {
        Self::new(
            pos.x.div_euclid(WORLD_UNITS_PER_CELL),
            pos.y.div_euclid(WORLD_UNITS_PER_CELL),
        )
    }

    /// Center of the cell at ground level.
    pub fn center(self) -> WPos {
        let half = WORLD_UNITS_PER_CELL / 2;
        WPos::new(
            self.x * WORLD_UNITS_PER_CELL + half,
            self.y * WORLD_UNITS_PER_CELL + half,
            0,
        )
    }
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const RED: Color = Color::rgb(255, 0, 0);
    pub const TRANSPARENT: Color = Color::rgba(0, 0, 0, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Same RGB with a different alpha.
    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }

    /// HSL lightness in `0.0..=1.0`.
    pub fn lightness(self) -> f32 {
        let max = self.r.max(self.g).max(self.b) as f32;
        let min = self.r.min(self.g).min(self.b) as f32;
        (max + min) / (2.0 * 255.0)
    }

    /// Per-channel `a + t * (b - a)`, alpha included.
    pub fn lerp(t: f32, a: Color, b: Color) -> Color {
        let mix = |x: u8, y: u8| (x as f32 + t * (y as f32 - x as f32)) as u8;
        Color::rgba(mix(a.r, b.r), mix(a.g, b.g), mix(a.b, b.b), mix(a.a, b.a))
    }
}

impl SimTime {
    /// Advance by one tick.
    pub fn advance(&mut self) {
        self.tick += 1;
    }
}
