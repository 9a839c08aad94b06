//! Animal Finder entry point
//!
//! Runs a headless demo: the simulation ticks at the nominal frame rate
//! while a scripted player plays a couple of rounds. Useful for exercising
//! the core without a renderer attached; pass a JSON config path to try a
//! different roster.

use animal_finder::consts::TICK_DT;
use animal_finder::sim::{AnimalKind, GamePhase};
use animal_finder::{GameConfig, Scene, Stage};

/// Stage that draws nothing; the demo only watches the log output
struct HeadlessStage;

impl Stage for HeadlessStage {
    type Handle = ();

    fn create_sprite(
        &mut self,
        _kind: AnimalKind,
        _x: f32,
        _y: f32,
        _size: f32,
        _depth: f32,
    ) -> Self::Handle {
    }

    fn create_text(&mut self, _text: &str, _x: f32, _y: f32) -> Self::Handle {}

    fn set_position(&mut self, _handle: &Self::Handle, _x: f32, _y: f32) {}

    fn set_tint(&mut self, _handle: &Self::Handle, _rgb: [f32; 3]) {}

    fn set_text(&mut self, _handle: &Self::Handle, _text: &str) {}

    fn remove(&mut self, _handle: Self::Handle) {}
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(err) = run() {
        log::error!("{err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = match std::env::args().nth(1) {
        Some(path) => GameConfig::from_json(&std::fs::read_to_string(path)?)?,
        None => GameConfig::default(),
    };

    let mut scene = Scene::new(config, 1280.0, 720.0, 12345, HeadlessStage);

    // Two scripted rounds: win the first halfway through the countdown,
    // then let the second one time out.
    let mut frames = 0u64;
    while scene.state().generation < 2 {
        scene.frame(TICK_DT);

        let state = scene.state();
        if state.generation == 0
            && state.phase == GamePhase::Playing
            && state.countdown <= state.config.countdown_secs / 2.0
        {
            if let Some(id) = state.wanted_animal().map(|a| a.id) {
                scene.click(id);
            }
        }

        frames += 1;
        if frames > 1_000_000 {
            return Err("demo never reached the third round".into());
        }
    }

    log::info!("demo finished after {frames} frames");
    Ok(())
}
