//! Flappy Pipes - a side-scrolling gap-threading arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (kinematics, obstacles, collisions, game state)
//! - `renderer`: Scene building and WebGPU rendering pipeline
//! - `platform`: Collaborator interface (input, render, present, pacing) and run loop
//! - `settings`: Data-driven game tuning with load-time validation

pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use settings::{Settings, SettingsError};

/// Game configuration constants
///
/// These are the defaults baked into [`Settings::default`]; the simulation
/// reads tuning from `Settings` so a config file can override them.
pub mod consts {
    /// Target simulation rate (ticks per second)
    pub const TARGET_TICK_RATE: u32 = 30;
    /// Fixed simulation timestep in seconds
    pub const SIM_DT: f32 = 1.0 / TARGET_TICK_RATE as f32;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;

    /// Screen dimensions
    pub const SCREEN_WIDTH: f32 = 400.0;
    pub const SCREEN_HEIGHT: f32 = 600.0;

    /// Avatar sprite is square
    pub const AVATAR_SIZE: f32 = 40.0;
    /// Vertical distance moved per tick while a direction is held
    pub const AVATAR_STEP: f32 = 5.0;
    /// Downward acceleration (pixels/tick²) while no direction is held
    pub const GRAVITY: f32 = 0.5;
    /// Velocity set by a flap (negative = upward)
    pub const FLAP_IMPULSE: f32 = -AVATAR_STEP;

    /// Obstacle sprite dimensions
    pub const OBSTACLE_WIDTH: f32 = 70.0;
    pub const OBSTACLE_HEIGHT: f32 = 500.0;
    /// Vertical size of the passable gap
    pub const GAP_SIZE: f32 = 150.0;
    /// Minimum distance between the gap and the top/bottom screen edge
    pub const GAP_MARGIN: f32 = 100.0;
    /// Horizontal scroll speed (pixels/tick)
    pub const SCROLL_SPEED: f32 = 5.0;
    /// Horizontal distance between consecutive obstacles at session start
    pub const SPAWN_INTERVAL: f32 = 200.0;

    /// Number of live obstacle pairs in a session
    pub const OBSTACLE_COUNT: usize = 3;
}
