//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Fixed obstacle slots (no removal during iteration)
//! - No rendering or platform dependencies

pub mod avatar;
pub mod collision;
pub mod obstacle;
pub mod rect;
pub mod state;
pub mod tick;

pub use avatar::{Avatar, Control};
pub use collision::{CrashCause, bounds_collision, check_collision};
pub use obstacle::ObstaclePair;
pub use rect::{Rect, intersects};
pub use state::{GameEvent, GamePhase, GameState, Session};
pub use tick::{TickInput, tick};
