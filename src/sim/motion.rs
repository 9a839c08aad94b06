//! Per-frame position integration and screen-edge bounce

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::entity::Animal;

/// The visible rectangle the animals roam in, anchored at the origin
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Largest valid top-left position for a box of `size`
    pub fn max_pos(&self, size: Vec2) -> Vec2 {
        Vec2::new(
            (self.width - size.x).max(0.0),
            (self.height - size.y).max(0.0),
        )
    }
}

/// Advance `animal` by `elapsed` ticks of its velocity, bouncing off the
/// edges of `bounds`.
///
/// Each axis is handled independently, so a corner hit reflects both
/// components in the same step. A crossing clamps the position back to the
/// violated bound and forces the velocity component's sign away from it;
/// magnitude is untouched. Forcing the sign (rather than negating) means an
/// animal already resting on a bound with an inward velocity is left alone,
/// so a component flips at most once per crossing.
pub fn advance(animal: &mut Animal, bounds: Bounds, elapsed: f32) {
    animal.pos += animal.vel * elapsed;

    let max = bounds.max_pos(animal.size);

    if animal.pos.x < 0.0 {
        animal.pos.x = 0.0;
        animal.vel.x = animal.vel.x.abs();
    } else if animal.pos.x > max.x {
        animal.pos.x = max.x;
        animal.vel.x = -animal.vel.x.abs();
    }

    if animal.pos.y < 0.0 {
        animal.pos.y = 0.0;
        animal.vel.y = animal.vel.y.abs();
    } else if animal.pos.y > max.y {
        animal.pos.y = max.y;
        animal.vel.y = -animal.vel.y.abs();
    }
}
