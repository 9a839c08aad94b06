//! Round setup and game balance
//!
//! A host can ship a JSON config or run with the stock roster.

use serde::{Deserialize, Serialize};

use crate::sim::AnimalKind;

/// How many decoys of a single kind a round spawns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KindCount {
    pub kind: AnimalKind,
    pub count: u32,
}

/// Full game configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Decoy roster: `count` non-wanted animals of each `kind`
    pub decoys: Vec<KindCount>,
    /// The kind the player must find; exactly one is spawned per round
    pub wanted: AnimalKind,
    /// Countdown at round start (seconds)
    pub countdown_secs: f32,
    /// How long a Won/Lost display stays up before the next round (seconds)
    pub terminal_secs: f32,
    /// Show the wanted animal before each round becomes interactive
    pub preview: bool,
    /// Preview duration (seconds); ignored when `preview` is off
    pub preview_secs: f32,
    /// Square sprite bounding box (pixels)
    pub sprite_size: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            decoys: vec![
                KindCount {
                    kind: AnimalKind::Monkey,
                    count: 17,
                },
                KindCount {
                    kind: AnimalKind::Giraffe,
                    count: 17,
                },
                KindCount {
                    kind: AnimalKind::Elephant,
                    count: 16,
                },
            ],
            wanted: AnimalKind::Lion,
            countdown_secs: 30.0,
            terminal_secs: 3.0,
            preview: false,
            preview_secs: 3.0,
            sprite_size: 64.0,
        }
    }
}

impl GameConfig {
    /// Parse a configuration from JSON
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Total number of animals a round spawns (decoys plus the wanted one)
    pub fn total_animals(&self) -> u32 {
        self.decoys.iter().map(|d| d.count).sum::<u32>() + 1
    }

    /// Panic on configurations that cannot produce a playable round.
    /// These are construction bugs, not runtime conditions to recover from.
    pub fn check(&self) {
        assert!(self.countdown_secs > 0.0, "countdown must be positive");
        assert!(self.terminal_secs > 0.0, "terminal duration must be positive");
        assert!(self.sprite_size > 0.0, "sprite size must be positive");
        assert!(!self.decoys.is_empty(), "decoy roster is empty");
        assert!(
            self.decoys.iter().all(|d| d.kind != self.wanted),
            "wanted kind must not appear among the decoys"
        );
    }
}
