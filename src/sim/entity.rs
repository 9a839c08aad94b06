//! Animal entities and their spawn-time randomization
//!
//! An animal is a plain data record. The host pairs it with whatever visual
//! object it likes, keyed by the stable `id`; nothing here touches rendering.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::motion::Bounds;
use crate::consts::{MAX_DEPTH, MAX_SPEED, MIN_SPEED};

/// The closed set of animal kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnimalKind {
    Monkey,
    Giraffe,
    Elephant,
    Lion,
}

impl AnimalKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnimalKind::Monkey => "monkey",
            AnimalKind::Giraffe => "giraffe",
            AnimalKind::Elephant => "elephant",
            AnimalKind::Lion => "lion",
        }
    }
}

/// Click-feedback kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PulseKind {
    /// The wanted animal was clicked
    Hit,
    /// A decoy was clicked
    Miss,
}

/// A transient visual pulse on one animal, reverted by a scheduled event.
/// Purely cosmetic; the state machine never reads it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pulse {
    pub kind: PulseKind,
}

/// A single roaming animal
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Animal {
    pub id: u32,
    pub kind: AnimalKind,
    /// True for the one animal the player must click to win the round
    pub wanted: bool,
    /// Top-left corner of the bounding box (pixels)
    pub pos: Vec2,
    /// Pixels per tick; after spawn only edge reflections change it
    pub vel: Vec2,
    /// Bounding box used for edge collision
    pub size: Vec2,
    /// Draw-order hint for the host (higher draws on top)
    pub depth: f32,
    /// Active click feedback, if any
    pub pulse: Option<Pulse>,
}

impl Animal {
    /// Spawn an animal somewhere inside `bounds` (leaving room for its own
    /// size) with a random heading. Speed is uniform in
    /// [`MIN_SPEED`, `MAX_SPEED`), direction uniform over the full circle.
    pub fn spawn<R: Rng>(
        id: u32,
        kind: AnimalKind,
        wanted: bool,
        size: Vec2,
        bounds: Bounds,
        rng: &mut R,
    ) -> Self {
        let speed = rng.random_range(MIN_SPEED..MAX_SPEED);
        let heading = rng.random_range(0.0..std::f32::consts::TAU);
        let vel = Vec2::new(heading.cos(), heading.sin()) * speed;

        let max_x = (bounds.width - size.x).max(0.0);
        let max_y = (bounds.height - size.y).max(0.0);
        let pos = Vec2::new(
            rng.random_range(0.0..=max_x),
            rng.random_range(0.0..=max_y),
        );

        Self {
            id,
            kind,
            wanted,
            pos,
            vel,
            size,
            depth: rng.random_range(0.0..MAX_DEPTH),
            pulse: None,
        }
    }
}
