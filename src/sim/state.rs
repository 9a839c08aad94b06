//! Round state and the scheduled-event queue
//!
//! Everything needed to reproduce a run lives here and is serializable.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::entity::Animal;
use super::motion::Bounds;
use crate::config::GameConfig;

/// Current phase of a round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// The wanted animal is shown; nothing is interactive yet
    Previewing,
    /// Countdown running, animals roaming and clickable
    Playing,
    /// Terminal display state: the wanted animal was clicked in time
    Won,
    /// Terminal display state: the countdown ran out
    Lost,
}

/// What a deferred callback does when it fires
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventKind {
    /// Revert the click-feedback pulse on one animal
    PulseEnd { animal_id: u32 },
    /// The preview is over; build the roster and start playing
    PreviewEnd,
    /// The terminal display is over; rebuild the round
    Restart,
}

/// A one-shot deferred callback tagged with the round it belongs to.
///
/// The host scheduler has no cancellation API, so cancellation is modeled
/// instead: an event whose generation no longer matches the current round
/// fires as a no-op.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScheduledEvent {
    pub kind: EventKind,
    /// Seconds until the event fires
    pub remaining: f32,
    /// Round generation the event was scheduled in
    pub generation: u64,
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Round counter, bumped on every rebuild. Stale deferred events are
    /// detected by comparing their tag against this.
    pub generation: u64,
    /// Current phase
    pub phase: GamePhase,
    /// Seconds left in the current round; frozen outside `Playing`
    pub countdown: f32,
    /// Current viewport, updated by the host on resize
    pub bounds: Bounds,
    /// Active animals (in id order)
    pub animals: Vec<Animal>,
    /// Pending deferred callbacks
    pub events: Vec<ScheduledEvent>,
    /// Round setup
    pub config: GameConfig,
    /// Next animal ID
    next_id: u32,
}

impl GameState {
    /// Create a fresh game and start its first round
    pub fn new(config: GameConfig, bounds: Bounds, seed: u64) -> Self {
        config.check();
        let mut state = Self {
            seed,
            generation: 0,
            phase: GamePhase::Playing,
            countdown: config.countdown_secs,
            bounds,
            animals: Vec::new(),
            events: Vec::new(),
            config,
            next_id: 1,
        };
        state.start_round();
        state
    }

    /// Allocate a new animal ID
    pub fn next_animal_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Per-round RNG: varies by generation, reproducible per seed
    fn round_rng(&self) -> Pcg32 {
        let round_seed = self.generation.wrapping_mul(2654435761).wrapping_add(self.seed);
        Pcg32::seed_from_u64(round_seed)
    }

    /// Discard the previous round and begin the next one
    pub fn begin_round(&mut self) {
        self.generation += 1;
        self.start_round();
    }

    fn start_round(&mut self) {
        self.animals.clear();
        self.countdown = self.config.countdown_secs;

        if self.config.preview {
            self.phase = GamePhase::Previewing;
            self.schedule(EventKind::PreviewEnd, self.config.preview_secs);
            log::info!(
                "round {}: previewing the {} for {:.1}s",
                self.generation,
                self.config.wanted.as_str(),
                self.config.preview_secs
            );
        } else {
            self.spawn_roster();
            self.phase = GamePhase::Playing;
        }
    }

    /// Build the round's animal batch: the configured decoy counts plus
    /// exactly one wanted animal, each independently randomized.
    pub fn spawn_roster(&mut self) {
        let mut rng = self.round_rng();
        let size = Vec2::splat(self.config.sprite_size);
        let bounds = self.bounds;

        let decoys = self.config.decoys.clone();
        for entry in &decoys {
            for _ in 0..entry.count {
                let id = self.next_animal_id();
                self.animals
                    .push(Animal::spawn(id, entry.kind, false, size, bounds, &mut rng));
            }
        }

        let wanted_kind = self.config.wanted;
        let id = self.next_animal_id();
        self.animals
            .push(Animal::spawn(id, wanted_kind, true, size, bounds, &mut rng));

        let wanted = self.animals.iter().filter(|a| a.wanted).count();
        assert_eq!(wanted, 1, "a round must have exactly one wanted animal");

        log::info!(
            "round {}: {} animals afield, find the {} within {:.0}s",
            self.generation,
            self.animals.len(),
            wanted_kind.as_str(),
            self.countdown
        );
    }

    /// Queue a deferred callback `delay` seconds out, tagged with the
    /// current generation
    pub fn schedule(&mut self, kind: EventKind, delay: f32) {
        self.events.push(ScheduledEvent {
            kind,
            remaining: delay,
            generation: self.generation,
        });
    }

    pub fn animal(&self, id: u32) -> Option<&Animal> {
        self.animals.iter().find(|a| a.id == id)
    }

    pub fn animal_mut(&mut self, id: u32) -> Option<&mut Animal> {
        self.animals.iter_mut().find(|a| a.id == id)
    }

    /// The one animal the player must click, once the roster exists
    pub fn wanted_animal(&self) -> Option<&Animal> {
        self.animals.iter().find(|a| a.wanted)
    }

    /// Countdown as shown to the player: ceiling of the remainder, never
    /// below zero
    pub fn display_countdown(&self) -> u32 {
        self.countdown.max(0.0).ceil() as u32
    }
}
