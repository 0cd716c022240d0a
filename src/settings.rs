//! Game tuning and configuration
//!
//! Every gameplay constant lives here so a JSON file can override it.
//! Settings are validated once at load time; the simulation assumes a
//! validated `Settings` and never re-checks ranges at runtime.

use std::ops::RangeInclusive;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Errors raised while loading or validating settings
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed settings: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("{field} must be finite (got {value})")]
    NotFinite { field: &'static str, value: f32 },

    #[error("{field} must be positive (got {value})")]
    NonPositive { field: &'static str, value: f32 },

    #[error("gravity must not be negative (got {0})")]
    NegativeGravity(f32),

    #[error("gap center range is empty: [{low}, {high}]")]
    EmptyGapRange { low: i32, high: i32 },

    #[error("avatar ({size}px) does not fit on a {height}px screen")]
    AvatarTooLarge { size: f32, height: f32 },

    #[error("tick rate must be at least 1")]
    ZeroTickRate,
}

/// Game tuning
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Screen ===
    pub screen_width: f32,
    pub screen_height: f32,

    // === Avatar ===
    /// Side length of the square avatar
    pub avatar_size: f32,
    /// Pixels moved per tick while ascend/descend is held
    pub avatar_step: f32,
    /// Velocity gained per tick with no direction held
    pub gravity: f32,
    /// Velocity set by a flap (negative = upward)
    pub flap_impulse: f32,

    // === Obstacles ===
    pub obstacle_width: f32,
    pub obstacle_height: f32,
    pub gap_size: f32,
    /// Minimum clearance between the gap and either screen edge
    pub gap_margin: f32,
    /// Pixels scrolled per tick
    pub scroll_speed: f32,
    /// Spacing of the initial obstacles and offset of the recycle spawn point
    pub spawn_interval: f32,

    // === Loop ===
    /// Ticks per second the frontend should run the simulation at
    pub tick_rate: u32,
    /// Fixed RNG seed (None = frontend picks one, e.g. from the clock)
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            screen_width: SCREEN_WIDTH,
            screen_height: SCREEN_HEIGHT,

            avatar_size: AVATAR_SIZE,
            avatar_step: AVATAR_STEP,
            gravity: GRAVITY,
            flap_impulse: FLAP_IMPULSE,

            obstacle_width: OBSTACLE_WIDTH,
            obstacle_height: OBSTACLE_HEIGHT,
            gap_size: GAP_SIZE,
            gap_margin: GAP_MARGIN,
            scroll_speed: SCROLL_SPEED,
            spawn_interval: SPAWN_INTERVAL,

            tick_rate: TARGET_TICK_RATE,
            seed: None,
        }
    }
}

impl Settings {
    /// Parse settings from JSON and validate them. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Check every invariant the simulation relies on
    pub fn validate(&self) -> Result<(), SettingsError> {
        let finite = [
            ("screen_width", self.screen_width),
            ("screen_height", self.screen_height),
            ("avatar_size", self.avatar_size),
            ("avatar_step", self.avatar_step),
            ("gravity", self.gravity),
            ("flap_impulse", self.flap_impulse),
            ("obstacle_width", self.obstacle_width),
            ("obstacle_height", self.obstacle_height),
            ("gap_size", self.gap_size),
            ("gap_margin", self.gap_margin),
            ("scroll_speed", self.scroll_speed),
            ("spawn_interval", self.spawn_interval),
        ];
        for (field, value) in finite {
            if !value.is_finite() {
                return Err(SettingsError::NotFinite { field, value });
            }
        }

        let positive = [
            ("screen_width", self.screen_width),
            ("screen_height", self.screen_height),
            ("avatar_size", self.avatar_size),
            ("avatar_step", self.avatar_step),
            ("obstacle_width", self.obstacle_width),
            ("obstacle_height", self.obstacle_height),
            ("gap_size", self.gap_size),
            ("scroll_speed", self.scroll_speed),
            ("spawn_interval", self.spawn_interval),
        ];
        for (field, value) in positive {
            if value <= 0.0 {
                return Err(SettingsError::NonPositive { field, value });
            }
        }

        if self.gravity < 0.0 {
            return Err(SettingsError::NegativeGravity(self.gravity));
        }
        if self.gap_margin < 0.0 {
            return Err(SettingsError::NonPositive {
                field: "gap_margin",
                value: self.gap_margin,
            });
        }
        if self.tick_rate == 0 {
            return Err(SettingsError::ZeroTickRate);
        }
        if self.avatar_size >= self.screen_height {
            return Err(SettingsError::AvatarTooLarge {
                size: self.avatar_size,
                height: self.screen_height,
            });
        }

        let (low, high) = self.gap_center_bounds();
        if low > high {
            return Err(SettingsError::EmptyGapRange { low, high });
        }

        Ok(())
    }

    /// Inclusive bounds for a freshly sampled gap center
    pub fn gap_center_bounds(&self) -> (i32, i32) {
        let low = self.gap_margin.ceil() as i32;
        let high = (self.screen_height - self.gap_size - self.gap_margin).floor() as i32;
        (low, high)
    }

    /// Gap center sampling range (non-empty once validated)
    pub fn gap_center_range(&self) -> RangeInclusive<i32> {
        let (low, high) = self.gap_center_bounds();
        low..=high
    }

    /// Where the i-th obstacle is placed when a session starts
    pub fn initial_spawn_x(&self, index: usize) -> f32 {
        self.screen_width + index as f32 * self.spawn_interval
    }

    /// Where a recycled obstacle reappears
    pub fn recycle_spawn_x(&self) -> f32 {
        self.screen_width + self.spawn_interval
    }

    /// Wall-clock duration of one tick
    pub fn tick_interval(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.tick_rate.max(1) as f64)
    }

    /// Load and validate settings from a JSON file
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load(path: impl AsRef<std::path::Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Load settings from `path` if it exists, otherwise use defaults
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_or_default(path: impl AsRef<std::path::Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        if path.exists() {
            Self::load(path)
        } else {
            log::info!("No settings file at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let settings = Settings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.gap_center_bounds(), (100, 350));
        assert_eq!(settings.recycle_spawn_x(), 600.0);
        assert_eq!(settings.initial_spawn_x(2), 800.0);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings = Settings::from_json(r#"{ "scroll_speed": 7.5, "seed": 42 }"#).unwrap();
        assert_eq!(settings.scroll_speed, 7.5);
        assert_eq!(settings.seed, Some(42));
        assert_eq!(settings.screen_height, SCREEN_HEIGHT);
    }

    #[test]
    fn test_empty_gap_range_rejected() {
        let err = Settings::from_json(r#"{ "screen_height": 300.0 }"#).unwrap_err();
        assert!(matches!(err, SettingsError::EmptyGapRange { .. }));
    }

    #[test]
    fn test_single_value_gap_range_accepted() {
        let settings = Settings {
            screen_height: 350.0,
            ..Settings::default()
        };
        assert!(settings.validate().is_ok());
        assert_eq!(settings.gap_center_range(), 100..=100);
    }

    #[test]
    fn test_non_positive_speed_rejected() {
        let settings = Settings {
            scroll_speed: 0.0,
            ..Settings::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(SettingsError::NonPositive { field: "scroll_speed", .. })
        ));
    }

    #[test]
    fn test_nan_rejected() {
        let settings = Settings {
            gravity: f32::NAN,
            ..Settings::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(SettingsError::NotFinite { field: "gravity", .. })
        ));
    }

    #[test]
    fn test_zero_tick_rate_rejected() {
        let settings = Settings {
            tick_rate: 0,
            ..Settings::default()
        };
        assert!(matches!(settings.validate(), Err(SettingsError::ZeroTickRate)));
    }

    #[test]
    fn test_malformed_json() {
        let err = Settings::from_json("{ not json").unwrap_err();
        assert!(matches!(err, SettingsError::Parse(_)));
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let settings = Settings::load_or_default("definitely/not/a/real/flappy.json").unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_tick_interval() {
        let settings = Settings::default();
        let interval = settings.tick_interval();
        assert!((interval.as_secs_f64() - 1.0 / 30.0).abs() < 1e-9);
    }
}
