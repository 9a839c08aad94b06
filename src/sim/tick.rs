//! Frame tick and click dispatch
//!
//! The host invokes `tick` once per rendered frame and `handle_click`
//! whenever a pointer-down resolves to an animal. All mutation happens in
//! these two entry points.

use log::{debug, info};

use super::entity::{Pulse, PulseKind};
use super::motion;
use super::state::{EventKind, GamePhase, GameState, ScheduledEvent};
use crate::consts::{PULSE_SECS, TICK_RATE};

/// Advance the game by `dt` seconds of host frame time.
///
/// Deferred events always progress; the countdown and animal motion only run
/// while the round is `Playing`, so ticks in any other phase leave the
/// countdown and every position untouched.
pub fn tick(state: &mut GameState, dt: f32) {
    // A round that goes live mid-frame (preview expiry, restart) starts
    // consuming time on the next frame, not this one.
    let was_playing = state.phase == GamePhase::Playing;
    run_due_events(state, dt);

    if !was_playing || state.phase != GamePhase::Playing {
        return;
    }

    state.countdown -= dt;
    if state.countdown <= 0.0 {
        state.countdown = 0.0;
        finish(state, GamePhase::Lost);
        return;
    }

    let bounds = state.bounds;
    let elapsed = dt * TICK_RATE;
    for animal in &mut state.animals {
        motion::advance(animal, bounds, elapsed);
    }
}

/// Dispatch a pointer-down on the animal with `id`.
///
/// Clicks outside `Playing` and clicks referencing an unknown id are silent
/// no-ops; both can happen when the host delivers an event that raced a
/// round rebuild.
pub fn handle_click(state: &mut GameState, id: u32) {
    if state.phase != GamePhase::Playing {
        return;
    }

    let Some(wanted) = state.animal(id).map(|a| a.wanted) else {
        debug!("click on unknown animal {id}");
        return;
    };

    let kind = if wanted { PulseKind::Hit } else { PulseKind::Miss };
    if let Some(animal) = state.animal_mut(id) {
        animal.pulse = Some(Pulse { kind });
    }
    state.schedule(EventKind::PulseEnd { animal_id: id }, PULSE_SECS);

    // The pulse is cosmetic; a correct click wins immediately regardless of
    // how little time is left.
    if wanted {
        finish(state, GamePhase::Won);
    }
}

fn finish(state: &mut GameState, outcome: GamePhase) {
    debug_assert!(matches!(outcome, GamePhase::Won | GamePhase::Lost));
    state.phase = outcome;
    state.schedule(EventKind::Restart, state.config.terminal_secs);

    match outcome {
        GamePhase::Won => info!(
            "round {}: found the {} with {:.1}s to spare",
            state.generation,
            state.config.wanted.as_str(),
            state.countdown
        ),
        _ => info!("round {}: time ran out", state.generation),
    }
}

fn run_due_events(state: &mut GameState, dt: f32) {
    let mut due: Vec<ScheduledEvent> = Vec::new();
    state.events.retain_mut(|event| {
        event.remaining -= dt;
        if event.remaining <= 0.0 {
            due.push(*event);
            false
        } else {
            true
        }
    });

    for event in due {
        fire(state, event);
    }
}

fn fire(state: &mut GameState, event: ScheduledEvent) {
    if event.generation != state.generation {
        // Late callback from a discarded round.
        debug!("dropping stale {:?} from round {}", event.kind, event.generation);
        return;
    }

    match event.kind {
        EventKind::PulseEnd { animal_id } => {
            // The animal may already be gone; reverting nothing is fine.
            if let Some(animal) = state.animal_mut(animal_id) {
                animal.pulse = None;
            }
        }
        EventKind::PreviewEnd => {
            if state.phase == GamePhase::Previewing {
                state.spawn_roster();
                state.phase = GamePhase::Playing;
            }
        }
        EventKind::Restart => {
            state.begin_round();
        }
    }
}
