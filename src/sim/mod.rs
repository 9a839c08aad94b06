//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only
//! - Stable iteration order (by animal ID)
//! - No rendering or platform dependencies

pub mod entity;
pub mod motion;
pub mod state;
pub mod tick;

pub use entity::{Animal, AnimalKind, Pulse, PulseKind};
pub use motion::{Bounds, advance};
pub use state::{EventKind, GamePhase, GameState, ScheduledEvent};
pub use tick::{handle_click, tick};
