//! Headless platform with a built-in autopilot
//!
//! Plays a fixed number of sessions without a window: the autopilot reads
//! each rendered state and decides the next signal. Frames still go through
//! the scene builder so the vertex output is exercised and counted.

use std::time::Duration;

use super::{InputSignal, Platform, PlatformError};
use crate::renderer::scene;
use crate::sim::{GameEvent, GamePhase, GameState, Session};

/// Steering strategy used while a session is playing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Autopilot {
    /// Hold ascend/descend toward the next gap
    Hold,
    /// Flap whenever the avatar sinks below the next gap
    Flap,
}

impl Autopilot {
    fn steer(self, session: &Session, state: &GameState) -> InputSignal {
        let settings = &state.settings;
        let avatar = session.avatar.rect();
        let avatar_y = avatar.center().y;

        // Next pair whose right edge is still ahead of the avatar's left edge
        let target_y = session
            .obstacles
            .iter()
            .filter(|pair| pair.x + settings.obstacle_width / 2.0 >= avatar.left())
            .min_by(|a, b| a.x.total_cmp(&b.x))
            .map(|pair| pair.gap_center as f32 + settings.gap_size / 2.0)
            .unwrap_or(settings.screen_height / 2.0);

        match self {
            Autopilot::Hold => {
                if avatar_y > target_y {
                    InputSignal::Ascend
                } else {
                    InputSignal::Descend
                }
            }
            Autopilot::Flap => {
                if avatar_y > target_y && session.avatar.vel_y >= 0.0 {
                    InputSignal::Flap
                } else {
                    InputSignal::None
                }
            }
        }
    }
}

/// Windowless collaborator driven by an autopilot
#[derive(Debug)]
pub struct HeadlessPlatform {
    autopilot: Autopilot,
    /// Sessions to finish before quitting
    sessions_to_play: u32,
    sessions_finished: u32,
    /// Hard stop, in ticks, in case the autopilot never crashes
    max_ticks: u64,
    /// Sleep between ticks to run in real time
    paced: bool,
    next_signal: InputSignal,
    /// Vertices produced by the last rendered frame
    pub last_frame_vertices: usize,
    pub frames_presented: u64,
}

impl HeadlessPlatform {
    pub fn new(autopilot: Autopilot, sessions_to_play: u32) -> Self {
        Self {
            autopilot,
            sessions_to_play,
            sessions_finished: 0,
            max_ticks: 100_000,
            paced: false,
            next_signal: InputSignal::None,
            last_frame_vertices: 0,
            frames_presented: 0,
        }
    }

    /// Sleep for one tick interval after every frame
    pub fn paced(mut self, paced: bool) -> Self {
        self.paced = paced;
        self
    }

    pub fn with_max_ticks(mut self, max_ticks: u64) -> Self {
        self.max_ticks = max_ticks;
        self
    }

    fn decide(&mut self, state: &GameState) -> InputSignal {
        if state.time_ticks >= self.max_ticks {
            log::warn!("Autopilot hit the {} tick limit, quitting", self.max_ticks);
            return InputSignal::Quit;
        }

        match state.phase {
            GamePhase::Home if self.sessions_finished >= self.sessions_to_play => {
                InputSignal::Quit
            }
            GamePhase::Home => InputSignal::Start,
            GamePhase::Playing => match state.session.as_ref() {
                Some(session) => self.autopilot.steer(session, state),
                None => InputSignal::None,
            },
            GamePhase::GameOver => InputSignal::Restart,
            GamePhase::Terminated => InputSignal::Quit,
        }
    }
}

impl Platform for HeadlessPlatform {
    fn poll_input(&mut self) -> InputSignal {
        std::mem::take(&mut self.next_signal)
    }

    fn render(&mut self, state: &GameState) -> Result<(), PlatformError> {
        for event in &state.events {
            if let GameEvent::Crashed { cause, score } = event {
                self.sessions_finished += 1;
                log::info!(
                    "Autopilot session {} ended ({:?}) with score {}",
                    self.sessions_finished,
                    cause,
                    score
                );
            }
        }

        self.last_frame_vertices = scene::build(state).len();
        self.next_signal = self.decide(state);
        Ok(())
    }

    fn present(&mut self) -> Result<(), PlatformError> {
        self.frames_presented += 1;
        Ok(())
    }

    fn wait_for_tick(&mut self, tick_rate: u32) {
        if self.paced {
            std::thread::sleep(Duration::from_secs_f64(1.0 / tick_rate.max(1) as f64));
        }
    }
}
