//! Fixed timestep simulation tick
//!
//! Drives the Home -> Playing -> GameOver state machine and advances the
//! live session by one step.

use serde::{Deserialize, Serialize};

use super::avatar::Control;
use super::collision::check_collision;
use super::state::{GameEvent, GamePhase, GameState};

/// Input commands for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickInput {
    /// Held direction (level-triggered)
    pub control: Control,
    /// Flap impulse this tick
    pub flap: bool,
    /// Leave the Home screen
    pub start: bool,
    /// Leave the GameOver screen
    pub restart: bool,
    /// Shut down from any phase
    pub quit: bool,
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput) {
    state.events.clear();

    if state.phase == GamePhase::Terminated {
        return;
    }
    state.time_ticks += 1;

    if input.quit {
        state.terminate();
        return;
    }

    match state.phase {
        GamePhase::Home => {
            if input.start {
                state.start_session();
            }
        }
        GamePhase::Playing => step_session(state, input),
        GamePhase::GameOver => {
            if input.restart {
                log::info!("Returning to home screen");
                state.return_home();
            }
        }
        GamePhase::Terminated => {}
    }
}

/// One Playing tick: move the avatar, scroll and recycle obstacles, then
/// test for collisions
fn step_session(state: &mut GameState, input: &TickInput) {
    let mut events = Vec::new();

    let (session, rng, settings) = state.session_and_rng();
    let Some(session) = session else {
        log::warn!("Playing phase without a live session, returning home");
        state.return_home();
        return;
    };

    if input.flap {
        session.avatar.flap(settings);
    }
    session.avatar.update(input.control, settings);

    let before = session.score;
    let recycled = session.advance_obstacles(settings, rng);
    for score in before + 1..=before + recycled {
        log::debug!("Obstacle cleared, score {}", score);
        events.push(GameEvent::ObstacleCleared { score });
    }

    session.ticks += 1;

    let crash = check_collision(
        &session.avatar.rect(),
        &session.obstacles,
        settings.screen_height,
    );
    if let Some(cause) = crash {
        session.running = false;
        session.crash = Some(cause);
        let score = session.score;
        log::info!("Crashed ({:?}) with score {}", cause, score);
        events.push(GameEvent::Crashed { cause, score });
        state.phase = GamePhase::GameOver;
    }

    state.events.extend(events);
}
