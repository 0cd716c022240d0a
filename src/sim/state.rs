//! Game state and core simulation types
//!
//! Everything the tick function reads or writes lives in [`GameState`];
//! there is no ambient global state.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::avatar::Avatar;
use super::collision::CrashCause;
use super::obstacle::ObstaclePair;
use crate::consts::OBSTACLE_COUNT;
use crate::settings::{Settings, SettingsError};

/// Current phase of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen, waiting for a start signal
    Home,
    /// Active gameplay
    Playing,
    /// Session ended, score frozen, waiting for a restart signal
    GameOver,
    /// Quit requested; the frontend should shut down
    Terminated,
}

/// Something that happened during a tick, for frontends to log or react to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    SessionStarted,
    /// An obstacle scrolled off screen; carries the new score
    ObstacleCleared { score: u32 },
    Crashed { cause: CrashCause, score: u32 },
    ReturnedHome,
    QuitRequested,
}

/// One play-through
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub avatar: Avatar,
    /// Fixed slots; recycled pairs are replaced in place
    pub obstacles: [ObstaclePair; OBSTACLE_COUNT],
    pub score: u32,
    /// False once the avatar has crashed
    pub running: bool,
    /// What ended the session, if it has ended
    pub crash: Option<CrashCause>,
    /// Ticks simulated in this session
    pub ticks: u64,
}

impl Session {
    /// Fresh avatar plus obstacles spaced beyond the right edge
    pub fn new<R: rand::Rng>(settings: &Settings, rng: &mut R) -> Self {
        let obstacles = std::array::from_fn(|i| {
            ObstaclePair::new(settings.initial_spawn_x(i), settings, &mut *rng)
        });
        Self {
            avatar: Avatar::spawn(settings),
            obstacles,
            score: 0,
            running: true,
            crash: None,
            ticks: 0,
        }
    }

    /// Scroll every pair and recycle those that left the screen.
    ///
    /// Each slot is visited exactly once, so a pair is recycled at most once
    /// per call. Returns the number of pairs recycled (already added to the
    /// score).
    pub fn advance_obstacles<R: rand::Rng>(&mut self, settings: &Settings, rng: &mut R) -> u32 {
        let mut recycled = 0;
        for slot in self.obstacles.iter_mut() {
            slot.advance(settings.scroll_speed);
            if slot.is_offscreen(settings.obstacle_width) {
                *slot = ObstaclePair::new(settings.recycle_spawn_x(), settings, &mut *rng);
                recycled += 1;
            }
        }
        self.score += recycled;
        recycled
    }
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Validated tuning for this run
    pub settings: Settings,
    /// Run seed for reproducibility
    pub seed: u64,
    rng: Pcg32,
    pub phase: GamePhase,
    /// Present while Playing and GameOver; dropped on return to Home
    pub session: Option<Session>,
    /// Events from the most recent tick
    pub events: Vec<GameEvent>,
    /// Total ticks processed, across all phases
    pub time_ticks: u64,
    /// Sessions started since launch
    pub sessions_started: u32,
}

impl GameState {
    /// Create a new game state on the Home screen
    pub fn new(settings: Settings, seed: u64) -> Result<Self, SettingsError> {
        settings.validate()?;
        Ok(Self {
            settings,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Home,
            session: None,
            events: Vec::new(),
            time_ticks: 0,
            sessions_started: 0,
        })
    }

    /// Home -> Playing
    pub fn start_session(&mut self) {
        self.session = Some(Session::new(&self.settings, &mut self.rng));
        self.phase = GamePhase::Playing;
        self.sessions_started += 1;
        self.events.push(GameEvent::SessionStarted);
        log::info!("Session {} started", self.sessions_started);
    }

    /// GameOver -> Home
    pub fn return_home(&mut self) {
        self.session = None;
        self.phase = GamePhase::Home;
        self.events.push(GameEvent::ReturnedHome);
    }

    /// Any -> Terminated
    pub fn terminate(&mut self) {
        self.phase = GamePhase::Terminated;
        self.events.push(GameEvent::QuitRequested);
        log::info!("Quit requested after {} ticks", self.time_ticks);
    }

    /// Current score (0 when no session is live)
    pub fn score(&self) -> u32 {
        self.session.as_ref().map_or(0, |s| s.score)
    }

    pub fn is_terminated(&self) -> bool {
        self.phase == GamePhase::Terminated
    }

    /// Split borrow for the tick function: session and rng together
    pub(crate) fn session_and_rng(&mut self) -> (Option<&mut Session>, &mut Pcg32, &Settings) {
        (self.session.as_mut(), &mut self.rng, &self.settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_starts_home() {
        let state = GameState::new(Settings::default(), 1).unwrap();
        assert_eq!(state.phase, GamePhase::Home);
        assert!(state.session.is_none());
        assert_eq!(state.score(), 0);
    }

    #[test]
    fn test_invalid_settings_rejected() {
        let settings = Settings {
            gap_size: 1000.0,
            ..Settings::default()
        };
        assert!(matches!(
            GameState::new(settings, 1),
            Err(SettingsError::EmptyGapRange { .. })
        ));
    }

    #[test]
    fn test_session_layout() {
        let settings = Settings::default();
        let mut rng = Pcg32::seed_from_u64(3);
        let session = Session::new(&settings, &mut rng);
        let xs: Vec<f32> = session.obstacles.iter().map(|p| p.x).collect();
        assert_eq!(xs, vec![400.0, 600.0, 800.0]);
        assert!(session.running);
        assert_eq!(session.score, 0);
    }

    #[test]
    fn test_recycle_single_pair() {
        let settings = Settings::default();
        let mut rng = Pcg32::seed_from_u64(5);
        let mut session = Session::new(&settings, &mut rng);
        session.obstacles[1] =
            ObstaclePair::with_gap(-settings.obstacle_width - 1.0, 200, &settings);

        let recycled = session.advance_obstacles(&settings, &mut rng);

        assert_eq!(recycled, 1);
        assert_eq!(session.score, 1);
        assert_eq!(session.obstacles[1].x, settings.recycle_spawn_x());
        assert_eq!(session.obstacles[0].x, 400.0 - settings.scroll_speed);
        assert_eq!(session.obstacles[2].x, 800.0 - settings.scroll_speed);
    }

    #[test]
    fn test_recycle_schedule_matches_spacing() {
        // With speed 5 and width 70 a pair at x recycles after
        // floor((x + 70) / 5) + 1 ticks.
        let settings = Settings::default();
        let mut rng = Pcg32::seed_from_u64(9);
        let mut session = Session::new(&settings, &mut rng);

        let mut scored_at = Vec::new();
        for tick in 1..=300u32 {
            if session.advance_obstacles(&settings, &mut rng) > 0 {
                scored_at.push(tick);
            }
        }

        // First wave at 400/600/800, then each recycled pair restarts at 600
        // and needs another 135 ticks.
        assert_eq!(scored_at, vec![95, 135, 175, 230, 270]);
        assert_eq!(session.score, 5);
    }

    #[test]
    fn test_deterministic_layout_per_seed() {
        let mut a = GameState::new(Settings::default(), 77).unwrap();
        let mut b = GameState::new(Settings::default(), 77).unwrap();
        a.start_session();
        b.start_session();
        assert_eq!(a.session, b.session);
    }
}
