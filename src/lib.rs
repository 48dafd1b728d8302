//! Sky Strike - A vertical-scrolling arcade shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, collisions, game state)
//! - `renderer`: Immediate-mode 2D drawing (canvas on web, recorder elsewhere)
//! - `platform`: Host ports (frame scheduling, input, storage)
//! - `engine`: Lifecycle state machine wiring the simulation to the host
//! - `tuning`: Data-driven game balance

pub mod engine;
pub mod error;
pub mod highscores;
pub mod platform;
pub mod renderer;
pub mod sim;
pub mod tuning;

pub use engine::GameEngine;
pub use error::{EngineError, RenderError, StorageError, TuningError};
pub use highscores::HighScore;
pub use sim::{GamePhase, GameStats};
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Default playfield dimensions (canvas pixels)
    pub const PLAYFIELD_WIDTH: f32 = 800.0;
    pub const PLAYFIELD_HEIGHT: f32 = 600.0;

    /// Nominal frame duration at 60 Hz, used by stepped hosts
    pub const FRAME_MS: f64 = 1000.0 / 60.0;

    /// Projectile defaults
    pub const PROJECTILE_WIDTH: f32 = 8.0;
    pub const PROJECTILE_HEIGHT: f32 = 16.0;
    /// Upward speed in pixels per frame
    pub const PROJECTILE_SPEED: f32 = 8.0;
    pub const PROJECTILE_INTERVAL_MS: f64 = 300.0;

    /// Player defaults
    pub const PLAYER_WIDTH: f32 = 60.0;
    pub const PLAYER_HEIGHT: f32 = 60.0;
    pub const PLAYER_STEP: f32 = 5.0;
    pub const PLAYER_BOTTOM_MARGIN: f32 = 20.0;

    /// Hostile spawn cadence (difficulty curve)
    pub const HOSTILE_BASE_INTERVAL_MS: f64 = 1500.0;
    pub const HOSTILE_INTERVAL_STEP_MS: f64 = 150.0;
    pub const HOSTILE_MIN_INTERVAL_MS: f64 = 500.0;
    pub const POINTS_PER_LEVEL: u64 = 100;
}

/// An sRGB color with straight alpha, all channels in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const WHITE: Color = Color::rgb(0xFF, 0xFF, 0xFF);

    /// Build an opaque color from 8-bit channels
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
            a: 1.0,
        }
    }

    pub const fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    /// CSS color string (`rgba(r, g, b, a)`) for canvas fill styles
    pub fn to_css(&self) -> String {
        let c = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        format!("rgba({}, {}, {}, {})", c(self.r), c(self.g), c(self.b), self.a)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_css() {
        assert_eq!(Color::rgb(0x87, 0xCE, 0xEB).to_css(), "rgba(135, 206, 235, 1)");
        assert_eq!(Color::WHITE.with_alpha(0.6).to_css(), "rgba(255, 255, 255, 0.6)");
    }
}
