//! Obstacle pairs: a top and bottom pipe with a gap between them

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::rect::Rect;
use crate::settings::Settings;

/// One gapped barrier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObstaclePair {
    /// Horizontal center of both pipes
    pub x: f32,
    /// Top edge of the gap (bottom edge of the top pipe)
    pub gap_center: i32,
    pub top: Rect,
    pub bottom: Rect,
}

impl ObstaclePair {
    /// Create a pair at `spawn_x` with a uniformly sampled gap.
    ///
    /// `settings` must have passed [`Settings::validate`] so the gap range is
    /// non-empty.
    pub fn new<R: Rng>(spawn_x: f32, settings: &Settings, rng: &mut R) -> Self {
        let gap_center = rng.random_range(settings.gap_center_range());
        Self::with_gap(spawn_x, gap_center, settings)
    }

    /// Create a pair with an explicit gap center
    pub fn with_gap(spawn_x: f32, gap_center: i32, settings: &Settings) -> Self {
        let size = Vec2::new(settings.obstacle_width, settings.obstacle_height);
        let gap_top = gap_center as f32;
        Self {
            x: spawn_x,
            gap_center,
            top: Rect::from_midbottom(Vec2::new(spawn_x, gap_top), size),
            bottom: Rect::from_midtop(Vec2::new(spawn_x, gap_top + settings.gap_size), size),
        }
    }

    /// Scroll left by `speed` pixels
    pub fn advance(&mut self, speed: f32) {
        self.x -= speed;
        self.top.set_center_x(self.x);
        self.bottom.set_center_x(self.x);
    }

    /// True once the pair has scrolled far enough left to be recycled
    pub fn is_offscreen(&self, obstacle_width: f32) -> bool {
        self.x + obstacle_width < 0.0
    }

    /// True if `rect` hits either pipe
    pub fn collides(&self, rect: &Rect) -> bool {
        self.top.intersects(rect) || self.bottom.intersects(rect)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_gap_geometry_is_exact() {
        let settings = Settings::default();
        let mut rng = Pcg32::seed_from_u64(7);
        for i in 0..200 {
            let pair = ObstaclePair::new(400.0 + i as f32, &settings, &mut rng);
            assert_eq!(pair.top.bottom(), pair.gap_center as f32);
            assert_eq!(pair.bottom.top(), pair.gap_center as f32 + settings.gap_size);
            assert!(settings.gap_center_range().contains(&pair.gap_center));
        }
    }

    #[test]
    fn test_sampling_covers_range_ends() {
        let settings = Settings {
            screen_height: 352.0,
            ..Settings::default()
        };
        let mut rng = Pcg32::seed_from_u64(1);
        let mut seen = [false; 3];
        for _ in 0..300 {
            let pair = ObstaclePair::new(0.0, &settings, &mut rng);
            seen[(pair.gap_center - 100) as usize] = true;
        }
        assert_eq!(seen, [true; 3]);
    }

    #[test]
    fn test_advance_moves_both_rects() {
        let settings = Settings::default();
        let mut pair = ObstaclePair::with_gap(400.0, 200, &settings);
        pair.advance(5.0);
        assert_eq!(pair.x, 395.0);
        assert_eq!(pair.top.center().x, 395.0);
        assert_eq!(pair.bottom.center().x, 395.0);
        assert_eq!(pair.top.bottom(), 200.0);
        assert_eq!(pair.bottom.top(), 350.0);
    }

    #[test]
    fn test_offscreen_threshold() {
        let settings = Settings::default();
        let w = settings.obstacle_width;
        let pair = ObstaclePair::with_gap(-w, 200, &settings);
        assert!(!pair.is_offscreen(w));
        let pair = ObstaclePair::with_gap(-w - 0.5, 200, &settings);
        assert!(pair.is_offscreen(w));
    }

    #[test]
    fn test_collides_with_pipes_but_not_gap() {
        let settings = Settings::default();
        let pair = ObstaclePair::with_gap(100.0, 200, &settings);
        // Inside the gap
        assert!(!pair.collides(&Rect::new(80.0, 250.0, 40.0, 40.0)));
        // Clipping the top pipe
        assert!(pair.collides(&Rect::new(80.0, 190.0, 40.0, 40.0)));
        // Clipping the bottom pipe
        assert!(pair.collides(&Rect::new(80.0, 320.0, 40.0, 40.0)));
    }
}
