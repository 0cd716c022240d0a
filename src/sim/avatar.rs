//! Avatar kinematics
//!
//! Two control models share one state: holding a direction moves the avatar
//! a fixed step and ignores gravity, while releasing both lets gravity
//! accumulate into the velocity. `apply_impulse` is the flap-style entry
//! point and simply overwrites the velocity.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::rect::Rect;
use crate::settings::Settings;

/// Held-direction control for one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Control {
    Ascend,
    Descend,
    #[default]
    Neutral,
}

/// The player-controlled avatar
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Avatar {
    /// Top-left corner; `pos.x` never changes after spawn
    pub pos: Vec2,
    /// Vertical velocity in pixels/tick (positive = downward)
    pub vel_y: f32,
    pub size: Vec2,
}

impl Avatar {
    /// Spawn centered vertically with its center at a quarter of the screen width
    pub fn spawn(settings: &Settings) -> Self {
        let size = Vec2::splat(settings.avatar_size);
        let center = Vec2::new(settings.screen_width / 4.0, settings.screen_height / 2.0);
        let rect = Rect::from_center(center, size);
        Self {
            pos: Vec2::new(rect.x, rect.y),
            vel_y: 0.0,
            size,
        }
    }

    /// Advance one tick under the given control
    pub fn update(&mut self, control: Control, settings: &Settings) {
        match control {
            Control::Ascend => self.pos.y -= settings.avatar_step,
            Control::Descend => self.pos.y += settings.avatar_step,
            Control::Neutral => {
                self.vel_y += settings.gravity;
                self.pos.y += self.vel_y;
            }
        }
    }

    /// Overwrite the vertical velocity (negative = upward burst)
    pub fn apply_impulse(&mut self, velocity: f32) {
        self.vel_y = velocity;
    }

    /// Flap with the configured impulse
    pub fn flap(&mut self, settings: &Settings) {
        self.apply_impulse(settings.flap_impulse);
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, self.size.x, self.size.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spawn_position() {
        let settings = Settings::default();
        let avatar = Avatar::spawn(&settings);
        assert_eq!(avatar.rect(), Rect::new(80.0, 280.0, 40.0, 40.0));
        assert_eq!(avatar.vel_y, 0.0);
    }

    #[test]
    fn test_neutral_accumulates_gravity() {
        let settings = Settings::default();
        let mut avatar = Avatar::spawn(&settings);
        let mut last_y = avatar.pos.y;

        for n in 1..=20 {
            avatar.update(Control::Neutral, &settings);
            let expected = n as f32 * settings.gravity;
            assert!((avatar.vel_y - expected).abs() < 1e-4);
            assert!(avatar.pos.y > last_y);
            last_y = avatar.pos.y;
        }
    }

    #[test]
    fn test_held_direction_ignores_velocity() {
        let settings = Settings::default();
        let mut avatar = Avatar::spawn(&settings);
        avatar.vel_y = 3.0;
        let start = avatar.pos.y;

        avatar.update(Control::Ascend, &settings);
        assert_eq!(avatar.pos.y, start - settings.avatar_step);
        assert_eq!(avatar.vel_y, 3.0);

        avatar.update(Control::Descend, &settings);
        avatar.update(Control::Descend, &settings);
        assert_eq!(avatar.pos.y, start + settings.avatar_step);
        assert_eq!(avatar.vel_y, 3.0);
    }

    #[test]
    fn test_release_resumes_from_previous_velocity() {
        let settings = Settings::default();
        let mut avatar = Avatar::spawn(&settings);
        avatar.update(Control::Neutral, &settings);
        avatar.update(Control::Neutral, &settings);
        avatar.update(Control::Ascend, &settings);
        avatar.update(Control::Neutral, &settings);
        assert!((avatar.vel_y - 3.0 * settings.gravity).abs() < 1e-6);
    }

    #[test]
    fn test_flap_sets_upward_velocity() {
        let settings = Settings::default();
        let mut avatar = Avatar::spawn(&settings);
        avatar.vel_y = 8.0;
        avatar.flap(&settings);
        assert_eq!(avatar.vel_y, settings.flap_impulse);

        let start = avatar.pos.y;
        avatar.update(Control::Neutral, &settings);
        assert!(avatar.pos.y < start);
    }

    #[test]
    fn test_x_is_fixed() {
        let settings = Settings::default();
        let mut avatar = Avatar::spawn(&settings);
        let x = avatar.pos.x;
        for control in [Control::Ascend, Control::Descend, Control::Neutral] {
            avatar.update(control, &settings);
        }
        avatar.apply_impulse(-10.0);
        assert_eq!(avatar.pos.x, x);
    }
}
