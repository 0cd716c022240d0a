//! Collision detection between the avatar and the world
//!
//! Any hit ends the session, so the checks only report the first cause
//! found; there is no response or resolution step.

use serde::{Deserialize, Serialize};

use super::obstacle::ObstaclePair;
use super::rect::Rect;

/// What ended a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CrashCause {
    /// Hit a pipe
    Obstacle,
    /// Touched or left through the top edge
    Ceiling,
    /// Touched or left through the bottom edge
    Floor,
}

/// Check the avatar against the screen edges
pub fn bounds_collision(avatar: &Rect, screen_height: f32) -> Option<CrashCause> {
    if avatar.top() <= 0.0 {
        Some(CrashCause::Ceiling)
    } else if avatar.bottom() >= screen_height {
        Some(CrashCause::Floor)
    } else {
        None
    }
}

/// Check the avatar against every pipe and the screen edges
pub fn check_collision(
    avatar: &Rect,
    obstacles: &[ObstaclePair],
    screen_height: f32,
) -> Option<CrashCause> {
    if obstacles.iter().any(|pair| pair.collides(avatar)) {
        return Some(CrashCause::Obstacle);
    }
    bounds_collision(avatar, screen_height)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;

    #[test]
    fn test_bounds() {
        assert_eq!(bounds_collision(&Rect::new(80.0, 100.0, 40.0, 40.0), 600.0), None);
        assert_eq!(
            bounds_collision(&Rect::new(80.0, 0.0, 40.0, 40.0), 600.0),
            Some(CrashCause::Ceiling)
        );
        assert_eq!(
            bounds_collision(&Rect::new(80.0, -12.0, 40.0, 40.0), 600.0),
            Some(CrashCause::Ceiling)
        );
        assert_eq!(
            bounds_collision(&Rect::new(80.0, 560.0, 40.0, 40.0), 600.0),
            Some(CrashCause::Floor)
        );
    }

    #[test]
    fn test_obstacle_takes_any_pair() {
        let settings = Settings::default();
        let pairs = [
            ObstaclePair::with_gap(400.0, 200, &settings),
            ObstaclePair::with_gap(100.0, 100, &settings),
            ObstaclePair::with_gap(800.0, 300, &settings),
        ];
        // Below the second pair's gap (100..250)
        let avatar = Rect::new(80.0, 280.0, 40.0, 40.0);
        assert_eq!(
            check_collision(&avatar, &pairs, settings.screen_height),
            Some(CrashCause::Obstacle)
        );

        let avatar = Rect::new(80.0, 150.0, 40.0, 40.0);
        assert_eq!(check_collision(&avatar, &pairs, settings.screen_height), None);
    }
}
