//! Platform abstraction layer
//!
//! The simulation never talks to a window, a GPU, or a keyboard directly.
//! A [`Platform`] supplies input, draws frames, and paces the loop; [`run`]
//! wires one to a [`GameState`] at a fixed tick rate.

pub mod headless;

pub use headless::{Autopilot, HeadlessPlatform};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::sim::{Control, CrashCause, GameEvent, GamePhase, GameState, TickInput, tick};

/// Fatal failures reported by a platform collaborator
#[derive(Debug, Error)]
pub enum PlatformError {
    #[error("failed to load asset {name}: {reason}")]
    Asset { name: String, reason: String },

    #[error("render failed: {0}")]
    Render(String),

    #[error("surface unavailable: {0}")]
    Surface(String),
}

/// One input signal per tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum InputSignal {
    Quit,
    /// Held up (level-triggered)
    Ascend,
    /// Held down (level-triggered)
    Descend,
    Flap,
    Start,
    Restart,
    #[default]
    None,
}

impl InputSignal {
    /// Map a keyboard key name to a signal. Unknown keys are neutral.
    ///
    /// Space doubles as start and restart, depending on the screen shown.
    pub fn from_key(key: &str, phase: GamePhase) -> Self {
        match key {
            "w" | "W" | "ArrowUp" => InputSignal::Ascend,
            "s" | "S" | "ArrowDown" => InputSignal::Descend,
            "f" | "F" => InputSignal::Flap,
            "Escape" => InputSignal::Quit,
            " " | "Enter" => match phase {
                GamePhase::Home => InputSignal::Start,
                GamePhase::GameOver => InputSignal::Restart,
                _ => InputSignal::None,
            },
            _ => InputSignal::None,
        }
    }
}

impl From<InputSignal> for TickInput {
    fn from(signal: InputSignal) -> Self {
        let mut input = TickInput::default();
        match signal {
            InputSignal::Quit => input.quit = true,
            InputSignal::Ascend => input.control = Control::Ascend,
            InputSignal::Descend => input.control = Control::Descend,
            InputSignal::Flap => input.flap = true,
            InputSignal::Start => input.start = true,
            InputSignal::Restart => input.restart = true,
            InputSignal::None => {}
        }
        input
    }
}

/// External collaborator: input, drawing, and frame pacing
pub trait Platform {
    /// Signal for the upcoming tick
    fn poll_input(&mut self) -> InputSignal;

    /// Draw the current state into the back buffer
    fn render(&mut self, state: &GameState) -> Result<(), PlatformError>;

    /// Commit the frame
    fn present(&mut self) -> Result<(), PlatformError>;

    /// Block until the next frame boundary
    fn wait_for_tick(&mut self, tick_rate: u32);
}

/// Outcome of one finished session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionResult {
    pub score: u32,
    pub cause: CrashCause,
    pub ticks: u64,
}

/// What happened over a whole run, returned on quit
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    pub ticks: u64,
    pub sessions: Vec<SessionResult>,
}

impl RunSummary {
    /// Fold one tick's events into the summary
    pub fn record(&mut self, state: &GameState) {
        self.ticks = state.time_ticks;
        for event in &state.events {
            if let GameEvent::Crashed { cause, score } = *event {
                let ticks = state.session.as_ref().map_or(0, |s| s.ticks);
                self.sessions.push(SessionResult { score, cause, ticks });
            }
        }
    }

    pub fn best_score(&self) -> Option<u32> {
        self.sessions.iter().map(|s| s.score).max()
    }
}

/// Run the blocking game loop until a quit signal arrives
pub fn run<P: Platform>(
    platform: &mut P,
    state: &mut GameState,
) -> Result<RunSummary, PlatformError> {
    let mut summary = RunSummary::default();
    let tick_rate = state.settings.tick_rate;

    loop {
        let input = TickInput::from(platform.poll_input());
        tick(state, &input);
        summary.record(state);

        if state.is_terminated() {
            break;
        }

        platform.render(state)?;
        platform.present()?;
        platform.wait_for_tick(tick_rate);
    }

    log::info!(
        "Run finished: {} ticks, {} sessions, best score {:?}",
        summary.ticks,
        summary.sessions.len(),
        summary.best_score()
    );
    Ok(summary)
}
