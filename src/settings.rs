//! Game settings and tuning
//!
//! Defaults match the shipped games. A page can override any subset through a
//! JSON `data-settings` attribute on the canvas.

use serde::{Deserialize, Serialize};

use crate::error::{ArcadeError, Result};

/// Snake tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnakeSettings {
    /// Tick interval at (re)start, in milliseconds
    pub initial_interval_ms: u32,
    /// Amount the interval shrinks on each speed-up
    pub interval_step_ms: u32,
    /// Fastest allowed interval
    pub min_interval_ms: u32,
    /// Speed up every N points. Unvalidated settings with 0 never speed up.
    pub speedup_every: u32,
    /// Food items kept on the board
    pub max_food: usize,
    /// Random draws before food placement gives up
    pub placement_attempts: u32,
}

impl Default for SnakeSettings {
    fn default() -> Self {
        Self {
            initial_interval_ms: 120,
            interval_step_ms: 8,
            min_interval_ms: 40,
            speedup_every: 3,
            max_food: 3,
            placement_attempts: 500,
        }
    }
}

/// Tron tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TronSettings {
    /// Fixed tick interval in milliseconds
    pub tick_interval_ms: u32,
    /// How long a trail cell stays solid
    pub trail_lifetime_ms: f64,
    /// Fade-out window after the solid lifetime
    pub trail_fade_ms: f64,
    /// Length of the end-of-round animation
    pub explosion_duration_ms: f64,
    /// Particles spawned when a player is eliminated
    pub explosion_particles: usize,
}

impl Default for TronSettings {
    fn default() -> Self {
        Self {
            tick_interval_ms: 50,
            trail_lifetime_ms: 5000.0,
            trail_fade_ms: 1000.0,
            explosion_duration_ms: 1000.0,
            explosion_particles: 20,
        }
    }
}

/// All game settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub snake: SnakeSettings,
    pub tron: TronSettings,
}

fn invalid(field: &'static str, reason: impl Into<String>) -> ArcadeError {
    ArcadeError::InvalidSetting {
        field,
        reason: reason.into(),
    }
}

impl SnakeSettings {
    pub fn validate(&self) -> Result<()> {
        if self.min_interval_ms == 0 {
            return Err(invalid("snake.min_interval_ms", "must be positive"));
        }
        if self.initial_interval_ms < self.min_interval_ms {
            return Err(invalid(
                "snake.initial_interval_ms",
                format!("must be at least min_interval_ms ({})", self.min_interval_ms),
            ));
        }
        if self.speedup_every == 0 {
            return Err(invalid("snake.speedup_every", "must be positive"));
        }
        if self.max_food == 0 {
            return Err(invalid("snake.max_food", "must be positive"));
        }
        if self.placement_attempts == 0 {
            return Err(invalid("snake.placement_attempts", "must be positive"));
        }
        Ok(())
    }
}

impl TronSettings {
    pub fn validate(&self) -> Result<()> {
        if self.tick_interval_ms == 0 {
            return Err(invalid("tron.tick_interval_ms", "must be positive"));
        }
        if self.trail_lifetime_ms <= 0.0 {
            return Err(invalid("tron.trail_lifetime_ms", "must be positive"));
        }
        if self.trail_fade_ms <= 0.0 {
            return Err(invalid("tron.trail_fade_ms", "must be positive"));
        }
        if self.explosion_duration_ms <= 0.0 {
            return Err(invalid("tron.explosion_duration_ms", "must be positive"));
        }
        Ok(())
    }
}

impl Settings {
    /// Parse JSON overrides on top of the defaults and validate the result
    pub fn from_json(json: &str) -> Result<Self> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<()> {
        self.snake.validate()?;
        self.tron.validate()
    }

    /// Canvas attribute holding JSON overrides
    pub const ATTRIBUTE: &'static str = "data-settings";

    /// Load settings from the game canvas (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load(canvas: &web_sys::HtmlCanvasElement) -> Self {
        let Some(json) = canvas.get_attribute(Self::ATTRIBUTE) else {
            log::info!("Using default settings");
            return Self::default();
        };

        match Self::from_json(&json) {
            Ok(settings) => {
                log::info!("Loaded settings from canvas");
                settings
            }
            Err(e) => {
                log::warn!("Ignoring settings override: {}", e);
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(Settings::default().validate().is_ok());
    }

    #[test]
    fn test_partial_override_keeps_defaults() {
        let settings = Settings::from_json(r#"{ "snake": { "max_food": 5 } }"#).unwrap();
        assert_eq!(settings.snake.max_food, 5);
        assert_eq!(settings.snake.initial_interval_ms, 120);
        assert_eq!(settings.tron, TronSettings::default());
    }

    #[test]
    fn test_invalid_override_rejected() {
        let err = Settings::from_json(r#"{ "snake": { "min_interval_ms": 200 } }"#).unwrap_err();
        assert!(matches!(
            err,
            ArcadeError::InvalidSetting {
                field: "snake.initial_interval_ms",
                ..
            }
        ));

        let err = Settings::from_json(r#"{ "tron": { "trail_fade_ms": 0 } }"#).unwrap_err();
        assert!(matches!(err, ArcadeError::InvalidSetting { .. }));
    }

    #[test]
    fn test_malformed_json() {
        let err = Settings::from_json("{ snake: ").unwrap_err();
        assert!(matches!(err, ArcadeError::Settings(_)));
    }
}
