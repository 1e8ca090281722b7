//! Sprite sequence catalogue and frame-stepped animations.

use std::collections::HashMap;

use ordnance_core::render::SpriteRenderable;
use ordnance_core::types::WPos;

/// Known images and their sequence lengths in frames.
#[derive(Debug, Clone, Default)]
pub struct Sequences {
    images: HashMap<String, HashMap<String, i32>>,
}

impl Sequences {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `image`/`sequence` with `length` frames.
    pub fn add(&mut self, image: &str, sequence: &str, length: i32) {
        self.images
            .entry(image.to_string())
            .or_default()
            .insert(sequence.to_string(), length.max(1));
    }

    pub fn length(&self, image: &str, sequence: &str) -> Option<i32> {
        self.images.get(image)?.get(sequence).copied()
    }

    pub fn has_image(&self, image: &str) -> bool {
        self.images.contains_key(image)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PlayMode {
    Repeating,
    Once,
}

/// Playback state of one sprite.
#[derive(Debug, Clone)]
pub struct Animation {
    image: String,
    sequence: Option<String>,
    frame: i32,
    length: i32,
    mode: PlayMode,
    complete: bool,
}

impl Animation {
    /// Idle animation of `image` with nothing playing.
    pub fn new(image: &str) -> Self {
        Self {
            image: image.to_string(),
            sequence: None,
            frame: 0,
            length: 0,
            mode: PlayMode::Repeating,
            complete: false,
        }
    }

    pub fn image(&self) -> &str {
        &self.image
    }

    pub fn frame(&self) -> i32 {
        self.frame
    }

    pub fn play_repeating(&mut self, sequences: &Sequences, sequence: &str) {
        self.play(sequences, sequence, PlayMode::Repeating);
    }

    pub fn play_once(&mut self, sequences: &Sequences, sequence: &str) {
        self.play(sequences, sequence, PlayMode::Once);
    }

    fn play(&mut self, sequences: &Sequences, sequence: &str, mode: PlayMode) {
        self.frame = 0;
        self.mode = mode;
        self.complete = false;
        match sequences.length(&self.image, sequence) {
            Some(length) => {
                self.sequence = Some(sequence.to_string());
                self.length = length;
            }
            None => {
                log::warn!("unknown sequence {}/{}", self.image, sequence);
                self.sequence = None;
                self.length = 0;
                // Nothing to wait for.
                self.complete = mode == PlayMode::Once;
            }
        }
    }

    /// Step one frame.
    pub fn tick(&mut self) {
        if self.sequence.is_none() || self.complete {
            return;
        }
        match self.mode {
            PlayMode::Repeating => self.frame = (self.frame + 1) % self.length,
            PlayMode::Once => {
                self.frame += 1;
                if self.frame >= self.length {
                    self.frame = self.length - 1;
                    self.complete = true;
                }
            }
        }
    }

    /// A play-once animation that has shown its last frame.
    pub fn is_complete(&self) -> bool {
        self.complete
    }

    pub fn render(&self, pos: WPos, facing: i32, palette: &str) -> Option<SpriteRenderable> {
        let sequence = self.sequence.as_ref()?;
        if self.mode == PlayMode::Once && self.complete {
            return None;
        }
        Some(SpriteRenderable {
            image: self.image.clone(),
            sequence: sequence.clone(),
            frame: self.frame,
            facing,
            pos,
            palette: palette.to_string(),
        })
    }
}
