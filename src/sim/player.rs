//! The player's ship (the controlled entity)

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::entity::{Entity, EntityKind};
use crate::Color;
use crate::tuning::Tuning;

/// Blue hull
pub const PLAYER_COLOR: Color = Color::rgb(0x4A, 0x90, 0xE2);

/// Horizontal-only ship clamped to the playfield width
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub body: Entity,
    playfield_width: f32,
    step: f32,
}

impl Player {
    /// Centered horizontally, anchored near the bottom
    pub fn new(id: u32, playfield: Vec2, tuning: &Tuning) -> Self {
        let size = Vec2::new(tuning.player_width, tuning.player_height);
        let pos = Vec2::new(
            (playfield.x - size.x) / 2.0,
            playfield.y - size.y - tuning.player_bottom_margin,
        );
        let mut player = Self {
            body: Entity::new(id, EntityKind::Controlled, pos, size, Vec2::ZERO, PLAYER_COLOR),
            playfield_width: playfield.x,
            step: tuning.player_step,
        };
        player.clamp();
        player
    }

    pub fn move_left(&mut self) {
        self.body.pos.x -= self.step;
        self.clamp();
    }

    pub fn move_right(&mut self) {
        self.body.pos.x += self.step;
        self.clamp();
    }

    /// Center on `target_x` (pointer control); non-finite targets are ignored
    pub fn move_to(&mut self, target_x: f32) {
        if !target_x.is_finite() {
            return;
        }
        self.body.pos.x = target_x - self.body.size.x / 2.0;
        self.clamp();
    }

    /// Horizontal center of the top edge
    pub fn emission_point(&self) -> Vec2 {
        Vec2::new(self.body.pos.x + self.body.size.x / 2.0, self.body.pos.y)
    }

    #[inline]
    pub fn x(&self) -> f32 {
        self.body.pos.x
    }

    /// Largest x that keeps the ship fully on screen
    pub fn max_x(&self) -> f32 {
        (self.playfield_width - self.body.size.x).max(0.0)
    }

    fn clamp(&mut self) {
        self.body.pos.x = self.body.pos.x.clamp(0.0, self.max_x());
    }
}
