//! Drawable primitives produced by effects.
//!
//! Effects only describe what to draw; the host renderer owns the pipeline.

use serde::{Deserialize, Serialize};

use crate::enums::BeamShape;
use crate::types::{Color, WPos, WVec};

/// One frame of an image sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpriteRenderable {
    pub image: String,
    pub sequence: String,
    pub frame: i32,
    pub facing: i32,
    pub pos: WPos,
    pub palette: String,
}

/// A fading polyline left behind a moving effect, newest point first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContrailRenderable {
    pub points: Vec<(WPos, Color)>,
}

/// A straight beam from `source` along `length`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BeamRenderable {
    pub source: WPos,
    pub z_offset: i32,
    pub length: WVec,
    pub shape: BeamShape,
    pub width: i32,
    pub color: Color,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Renderable {
    Sprite(SpriteRenderable),
    Contrail(ContrailRenderable),
    Beam(BeamRenderable),
}
