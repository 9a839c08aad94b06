//! Scene orchestration between the simulation and a host stage
//!
//! The stage is whatever the host renderer provides: something that can show
//! positioned images and text labels and report pointer-downs. The scene owns
//! the mapping from stable animal ids to stage handles, so click dispatch is
//! keyed by id and never closes over entity state.

use std::collections::HashMap;

use crate::config::GameConfig;
use crate::consts::MAX_DEPTH;
use crate::sim::{self, AnimalKind, Bounds, GamePhase, GameState, PulseKind};

/// Untinted sprite color
const WHITE: [f32; 3] = [1.0, 1.0, 1.0];
/// Flash on a wrong click
const MISS_TINT: [f32; 3] = [1.0, 0.0, 0.0];
/// Flash on the winning click
const HIT_TINT: [f32; 3] = [0.0, 1.0, 0.0];

/// Host-supplied visual capability.
///
/// Handles are opaque to the scene; a host may back them with sprites, DOM
/// nodes, or nothing at all (the tests use a recording stub).
pub trait Stage {
    type Handle;

    /// Create an image for `kind` with its top-left corner at `(x, y)`,
    /// scaled to a square of `size` pixels. Higher `depth` draws on top.
    fn create_sprite(&mut self, kind: AnimalKind, x: f32, y: f32, size: f32, depth: f32)
    -> Self::Handle;

    /// Create a text label at `(x, y)`
    fn create_text(&mut self, text: &str, x: f32, y: f32) -> Self::Handle;

    fn set_position(&mut self, handle: &Self::Handle, x: f32, y: f32);

    /// Tint an image; `WHITE` restores it
    fn set_tint(&mut self, handle: &Self::Handle, rgb: [f32; 3]);

    fn set_text(&mut self, handle: &Self::Handle, text: &str);

    fn remove(&mut self, handle: Self::Handle);
}

/// Owns the round state and keeps the host stage in step with it
pub struct Scene<S: Stage> {
    state: GameState,
    stage: S,
    /// Animal id to stage handle
    sprites: HashMap<u32, S::Handle>,
    /// Generation the sprite map was last built for
    built_generation: u64,
    /// Enlarged display of the wanted animal while previewing
    preview_sprite: Option<S::Handle>,
    timer_text: S::Handle,
    instructions: S::Handle,
    result_text: S::Handle,
    last_countdown: u32,
    last_phase: GamePhase,
}

impl<S: Stage> Scene<S> {
    /// The host's "start" action: build the first round and its UI
    pub fn new(config: GameConfig, width: f32, height: f32, seed: u64, mut stage: S) -> Self {
        let state = GameState::new(config, Bounds::new(width, height), seed);

        let timer_text = stage.create_text(
            &format!("Time: {}", state.display_countdown()),
            20.0,
            20.0,
        );
        let instructions = stage.create_text(
            &format!(
                "Find the {} among the animals!",
                state.config.wanted.as_str().to_uppercase()
            ),
            width / 2.0,
            80.0,
        );
        let result_text = stage.create_text("", width / 2.0, height / 2.0);

        let mut scene = Self {
            built_generation: state.generation,
            last_phase: state.phase,
            state,
            stage,
            sprites: HashMap::new(),
            preview_sprite: None,
            timer_text,
            instructions,
            result_text,
            last_countdown: u32::MAX,
        };
        scene.sync();
        scene
    }

    /// Per-frame entry point; `dt` is the host frame's elapsed seconds
    pub fn frame(&mut self, dt: f32) {
        sim::tick(&mut self.state, dt);
        self.sync();
    }

    /// Click-dispatch entry point, keyed by the clicked sprite's animal id
    pub fn click(&mut self, id: u32) {
        sim::handle_click(&mut self.state, id);
        self.sync();
    }

    /// The host viewport changed. Roaming animals are not reclamped here;
    /// their next motion step pulls them back inside the new rectangle.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.state.bounds = Bounds::new(width, height);
        self.stage.set_position(&self.instructions, width / 2.0, 80.0);
        self.stage
            .set_position(&self.result_text, width / 2.0, height / 2.0);
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn stage(&self) -> &S {
        &self.stage
    }

    pub fn stage_mut(&mut self) -> &mut S {
        &mut self.stage
    }

    fn sync(&mut self) {
        self.sync_roster();
        self.sync_preview();

        for animal in &self.state.animals {
            if let Some(handle) = self.sprites.get(&animal.id) {
                self.stage.set_position(handle, animal.pos.x, animal.pos.y);
                let tint = match animal.pulse.map(|p| p.kind) {
                    Some(PulseKind::Hit) => HIT_TINT,
                    Some(PulseKind::Miss) => MISS_TINT,
                    None => WHITE,
                };
                self.stage.set_tint(handle, tint);
            }
        }

        let shown = self.state.display_countdown();
        if shown != self.last_countdown {
            self.stage
                .set_text(&self.timer_text, &format!("Time: {shown}"));
            self.last_countdown = shown;
        }

        if self.state.phase != self.last_phase {
            let line = match self.state.phase {
                GamePhase::Won => "YOU WIN!",
                GamePhase::Lost => "TIME'S UP! You lose!",
                GamePhase::Previewing | GamePhase::Playing => "",
            };
            self.stage.set_text(&self.result_text, line);
            self.last_phase = self.state.phase;
        }
    }

    /// Rebuild the id-to-handle map whenever the roster changed (round
    /// rebuild, or a preview round going live)
    fn sync_roster(&mut self) {
        let changed = self.built_generation != self.state.generation
            || self.sprites.len() != self.state.animals.len();
        if !changed {
            return;
        }

        for (_, handle) in self.sprites.drain() {
            self.stage.remove(handle);
        }
        for animal in &self.state.animals {
            let handle = self.stage.create_sprite(
                animal.kind,
                animal.pos.x,
                animal.pos.y,
                animal.size.x,
                animal.depth,
            );
            self.sprites.insert(animal.id, handle);
        }
        self.built_generation = self.state.generation;
    }

    fn sync_preview(&mut self) {
        let previewing = self.state.phase == GamePhase::Previewing;
        if previewing && self.preview_sprite.is_none() {
            let size = self.state.config.sprite_size * 2.0;
            let x = (self.state.bounds.width - size) / 2.0;
            let y = (self.state.bounds.height - size) / 2.0;
            self.preview_sprite = Some(self.stage.create_sprite(
                self.state.config.wanted,
                x,
                y,
                size,
                MAX_DEPTH,
            ));
        } else if !previewing {
            if let Some(handle) = self.preview_sprite.take() {
                self.stage.remove(handle);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::KindCount;
    use crate::consts::{PULSE_SECS, TICK_DT};

    /// Records every stage call so tests can observe what the host would see
    #[derive(Default)]
    struct RecordingStage {
        next_handle: u32,
        sprites: HashMap<u32, AnimalKind>,
        positions: HashMap<u32, (f32, f32)>,
        tints: HashMap<u32, [f32; 3]>,
        texts: HashMap<u32, String>,
        removed: Vec<u32>,
    }

    impl RecordingStage {
        fn alloc(&mut self) -> u32 {
            let handle = self.next_handle;
            self.next_handle += 1;
            handle
        }

        fn has_text(&self, needle: &str) -> bool {
            self.texts.values().any(|t| t.contains(needle))
        }
    }

    impl Stage for RecordingStage {
        type Handle = u32;

        fn create_sprite(
            &mut self,
            kind: AnimalKind,
            x: f32,
            y: f32,
            _size: f32,
            _depth: f32,
        ) -> u32 {
            let handle = self.alloc();
            self.sprites.insert(handle, kind);
            self.positions.insert(handle, (x, y));
            self.tints.insert(handle, WHITE);
            handle
        }

        fn create_text(&mut self, text: &str, x: f32, y: f32) -> u32 {
            let handle = self.alloc();
            self.texts.insert(handle, text.to_owned());
            self.positions.insert(handle, (x, y));
            handle
        }

        fn set_position(&mut self, handle: &u32, x: f32, y: f32) {
            self.positions.insert(*handle, (x, y));
        }

        fn set_tint(&mut self, handle: &u32, rgb: [f32; 3]) {
            self.tints.insert(*handle, rgb);
        }

        fn set_text(&mut self, handle: &u32, text: &str) {
            self.texts.insert(*handle, text.to_owned());
        }

        fn remove(&mut self, handle: u32) {
            self.sprites.remove(&handle);
            self.positions.remove(&handle);
            self.tints.remove(&handle);
            self.texts.remove(&handle);
            self.removed.push(handle);
        }
    }

    fn small_config() -> GameConfig {
        GameConfig {
            decoys: vec![
                KindCount {
                    kind: AnimalKind::Monkey,
                    count: 2,
                },
                KindCount {
                    kind: AnimalKind::Giraffe,
                    count: 2,
                },
                KindCount {
                    kind: AnimalKind::Elephant,
                    count: 1,
                },
            ],
            countdown_secs: 15.0,
            ..GameConfig::default()
        }
    }

    fn new_scene() -> Scene<RecordingStage> {
        Scene::new(small_config(), 800.0, 600.0, 42, RecordingStage::default())
    }

    #[test]
    fn test_scene_builds_one_sprite_per_animal() {
        let scene = new_scene();
        assert_eq!(scene.stage().sprites.len(), 6);
        assert_eq!(scene.sprites.len(), scene.state().animals.len());
        assert!(scene.stage().has_text("Time: 15"));
        assert!(scene.stage().has_text("Find the LION"));
    }

    #[test]
    fn test_miss_click_flashes_red_then_reverts() {
        let mut scene = new_scene();
        let id = scene
            .state()
            .animals
            .iter()
            .find(|a| !a.wanted)
            .expect("decoys exist")
            .id;
        let handle = *scene.sprites.get(&id).expect("sprite exists");

        scene.click(id);
        assert_eq!(scene.stage().tints[&handle], MISS_TINT);
        assert_eq!(scene.state().phase, GamePhase::Playing);

        let steps = ((PULSE_SECS / TICK_DT) as usize) + 2;
        for _ in 0..steps {
            scene.frame(TICK_DT);
        }
        assert_eq!(scene.stage().tints[&handle], WHITE);
    }

    #[test]
    fn test_winning_click_shows_result_then_rebuilds() {
        let mut scene = new_scene();
        let id = scene.state().wanted_animal().expect("wanted exists").id;
        let old_handles: Vec<u32> = scene.sprites.values().copied().collect();

        scene.click(id);
        assert_eq!(scene.state().phase, GamePhase::Won);
        assert!(scene.stage().has_text("YOU WIN!"));

        let steps = ((scene.state().config.terminal_secs / TICK_DT) as usize) + 5;
        for _ in 0..steps {
            scene.frame(TICK_DT);
        }

        assert_eq!(scene.state().phase, GamePhase::Playing);
        assert_eq!(scene.state().generation, 1);
        assert_eq!(scene.stage().sprites.len(), 6);
        assert!(!scene.stage().has_text("YOU WIN!"));
        for handle in old_handles {
            assert!(scene.stage().removed.contains(&handle));
        }
    }

    #[test]
    fn test_timeout_shows_lost_line() {
        let mut scene = new_scene();
        let steps = ((15.1 / TICK_DT) as usize) + 1;
        for _ in 0..steps {
            scene.frame(TICK_DT);
        }
        assert_eq!(scene.state().phase, GamePhase::Lost);
        assert!(scene.stage().has_text("TIME'S UP"));
    }

    #[test]
    fn test_timer_text_counts_down() {
        let mut scene = new_scene();
        for _ in 0..70 {
            scene.frame(TICK_DT);
        }
        assert!(scene.stage().has_text("Time: 14"));
    }

    #[test]
    fn test_resize_recaptures_animals_next_frame() {
        let mut scene = new_scene();

        scene.resize(200.0, 150.0);
        scene.frame(TICK_DT);

        let max = scene.state().bounds.max_pos(glam::Vec2::splat(64.0));
        for animal in &scene.state().animals {
            assert!(animal.pos.x >= 0.0 && animal.pos.x <= max.x);
            assert!(animal.pos.y >= 0.0 && animal.pos.y <= max.y);
        }
    }

    #[test]
    fn test_preview_shows_wanted_then_goes_live() {
        let config = GameConfig {
            preview: true,
            preview_secs: 1.0,
            ..small_config()
        };
        let mut scene = Scene::new(config, 800.0, 600.0, 42, RecordingStage::default());

        assert_eq!(scene.state().phase, GamePhase::Previewing);
        let preview = scene.preview_sprite.expect("preview sprite shown");
        assert_eq!(scene.stage().sprites[&preview], AnimalKind::Lion);
        assert!(scene.state().animals.is_empty());

        for _ in 0..65 {
            scene.frame(TICK_DT);
        }
        assert_eq!(scene.state().phase, GamePhase::Playing);
        assert!(scene.preview_sprite.is_none());
        assert!(scene.stage().removed.contains(&preview));
        assert_eq!(scene.stage().sprites.len(), 6);
    }
}
