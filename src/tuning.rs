//! Data-driven game balance
//!
//! Defaults reproduce the stock difficulty curve. Hosts can override any
//! subset of fields from JSON.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::TuningError;

/// Balance knobs for a run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Player ===
    /// Horizontal step per frame while a direction key is held
    pub player_step: f32,
    pub player_width: f32,
    pub player_height: f32,
    /// Gap between the player's bottom edge and the playfield bottom
    pub player_bottom_margin: f32,

    // === Projectiles ===
    /// Upward speed in pixels per frame
    pub projectile_speed: f32,
    /// Minimum time between automatic shots
    pub projectile_interval_ms: f64,

    // === Hostile cadence ===
    /// Spawn interval at score 0
    pub hostile_base_interval_ms: f64,
    /// Interval reduction per difficulty level
    pub hostile_interval_step_ms: f64,
    /// Interval floor
    pub hostile_min_interval_ms: f64,
    /// Points per difficulty level
    pub points_per_level: u64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            player_step: PLAYER_STEP,
            player_width: PLAYER_WIDTH,
            player_height: PLAYER_HEIGHT,
            player_bottom_margin: PLAYER_BOTTOM_MARGIN,

            projectile_speed: PROJECTILE_SPEED,
            projectile_interval_ms: PROJECTILE_INTERVAL_MS,

            hostile_base_interval_ms: HOSTILE_BASE_INTERVAL_MS,
            hostile_interval_step_ms: HOSTILE_INTERVAL_STEP_MS,
            hostile_min_interval_ms: HOSTILE_MIN_INTERVAL_MS,
            points_per_level: POINTS_PER_LEVEL,
        }
    }
}

impl Tuning {
    /// Parse a (possibly partial) JSON override and validate it
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    pub fn to_json(&self) -> Result<String, TuningError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject values that would stall or break the frame loop
    pub fn validate(&self) -> Result<(), TuningError> {
        let positive = [
            ("player_step", self.player_step as f64),
            ("player_width", self.player_width as f64),
            ("player_height", self.player_height as f64),
            ("projectile_speed", self.projectile_speed as f64),
            ("projectile_interval_ms", self.projectile_interval_ms),
            ("hostile_base_interval_ms", self.hostile_base_interval_ms),
            ("hostile_min_interval_ms", self.hostile_min_interval_ms),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(TuningError::Invalid(format!("{name} must be finite and positive, got {value}")));
            }
        }
        let non_negative = [
            ("player_bottom_margin", self.player_bottom_margin as f64),
            ("hostile_interval_step_ms", self.hostile_interval_step_ms),
        ];
        for (name, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(TuningError::Invalid(format!("{name} must be finite and non-negative, got {value}")));
            }
        }
        if self.points_per_level == 0 {
            return Err(TuningError::Invalid("points_per_level must be at least 1".into()));
        }
        if self.hostile_min_interval_ms > self.hostile_base_interval_ms {
            return Err(TuningError::Invalid(format!(
                "hostile_min_interval_ms ({}) exceeds hostile_base_interval_ms ({})",
                self.hostile_min_interval_ms, self.hostile_base_interval_ms
            )));
        }
        Ok(())
    }

    /// Difficulty level reached at `score` (one level per `points_per_level`)
    pub fn difficulty_level(&self, score: u64) -> u64 {
        score / self.points_per_level
    }

    /// Hostile spawn interval for the given score, never below the floor
    pub fn hostile_interval_ms(&self, score: u64) -> f64 {
        let level = self.difficulty_level(score) as f64;
        (self.hostile_base_interval_ms - self.hostile_interval_step_ms * level)
            .max(self.hostile_min_interval_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_interval_at_zero() {
        assert_eq!(Tuning::default().hostile_interval_ms(0), 1500.0);
    }

    #[test]
    fn test_interval_steps_every_hundred_points() {
        let tuning = Tuning::default();
        assert_eq!(tuning.hostile_interval_ms(99), 1500.0);
        assert_eq!(tuning.hostile_interval_ms(100), 1350.0);
        assert_eq!(tuning.hostile_interval_ms(250), 1200.0);
    }

    #[test]
    fn test_interval_floor() {
        let tuning = Tuning::default();
        assert_eq!(tuning.hostile_interval_ms(1000), 500.0);
        assert_eq!(tuning.hostile_interval_ms(5000), 500.0);
    }

    #[test]
    fn test_partial_json_override() {
        let tuning = Tuning::from_json(r#"{ "player_step": 7.5 }"#).unwrap();
        assert_eq!(tuning.player_step, 7.5);
        assert_eq!(tuning.projectile_interval_ms, PROJECTILE_INTERVAL_MS);
    }

    #[test]
    fn test_rejects_malformed_json() {
        assert!(matches!(Tuning::from_json("{ nope"), Err(TuningError::Parse(_))));
    }

    #[test]
    fn test_rejects_inverted_interval_bounds() {
        let json = r#"{ "hostile_base_interval_ms": 400.0, "hostile_min_interval_ms": 500.0 }"#;
        assert!(matches!(Tuning::from_json(json), Err(TuningError::Invalid(_))));
    }

    #[test]
    fn test_rejects_non_finite_values() {
        let cases = [
            Tuning { player_bottom_margin: f32::NAN, ..Tuning::default() },
            Tuning { hostile_interval_step_ms: f64::NAN, ..Tuning::default() },
            Tuning { player_step: f32::INFINITY, ..Tuning::default() },
            Tuning { hostile_base_interval_ms: f64::INFINITY, ..Tuning::default() },
        ];
        for tuning in cases {
            assert!(matches!(tuning.validate(), Err(TuningError::Invalid(_))), "{tuning:?}");
        }
    }

    #[test]
    fn test_zero_margin_and_step_allowed() {
        let tuning = Tuning {
            player_bottom_margin: 0.0,
            hostile_interval_step_ms: 0.0,
            ..Tuning::default()
        };
        assert!(tuning.validate().is_ok());
    }

    #[test]
    fn test_json_roundtrip_defaults() {
        let json = Tuning::default().to_json().unwrap();
        assert_eq!(Tuning::from_json(&json).unwrap(), Tuning::default());
    }

    proptest! {
        #[test]
        fn interval_is_monotonic_and_floored(a in 0u64..100_000, b in 0u64..100_000) {
            let tuning = Tuning::default();
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(tuning.hostile_interval_ms(hi) <= tuning.hostile_interval_ms(lo));
            prop_assert!(tuning.hostile_interval_ms(hi) >= HOSTILE_MIN_INTERVAL_MS);
        }
    }
}
