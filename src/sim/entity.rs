//! Entity record shared by the player, projectiles and hostiles
//!
//! There is one record type. Kind-specific behavior (leaving the playfield,
//! scoring) is looked up in a small per-kind table instead of overriding.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::hostile::{self, HostileTier};
use super::projectile;
use crate::Color;

/// What an entity is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntityKind {
    /// The player's ship
    Controlled,
    /// Player shot travelling upward
    Projectile,
    /// Enemy descending from the top edge
    Hostile(HostileTier),
}

/// Axis-aligned box in playfield coordinates (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
}

impl Bounds {
    pub fn from_rect(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            left: x,
            right: x + width,
            top: y,
            bottom: y + height,
        }
    }
}

/// A positioned, sized, moving object
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entity {
    pub id: u32,
    pub kind: EntityKind,
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    /// Displacement applied once per frame
    pub vel: Vec2,
    pub color: Color,
    pub alive: bool,
}

impl Entity {
    pub fn new(id: u32, kind: EntityKind, pos: Vec2, size: Vec2, vel: Vec2, color: Color) -> Self {
        Self {
            id,
            kind,
            pos,
            size,
            vel,
            color,
            alive: true,
        }
    }

    /// Integrate one frame of motion
    #[inline]
    pub fn advance(&mut self) {
        self.pos += self.vel;
    }

    /// Collision box derived from position and size
    #[inline]
    pub fn bounds(&self) -> Bounds {
        Bounds::from_rect(self.pos.x, self.pos.y, self.size.x, self.size.y)
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }

    /// Mark as destroyed; idempotent
    #[inline]
    pub fn kill(&mut self) {
        self.alive = false;
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.alive
    }

    /// Whether the entity has left the playfield for good
    pub fn is_out_of_bounds(&self, playfield: Vec2) -> bool {
        (behavior(self.kind).out_of_bounds)(self, playfield)
    }

    /// Points awarded for destroying this entity
    pub fn score_value(&self) -> u64 {
        (behavior(self.kind).score_value)(self)
    }
}

/// Per-kind behavior table entry
struct KindBehavior {
    out_of_bounds: fn(&Entity, Vec2) -> bool,
    score_value: fn(&Entity) -> u64,
}

const CONTROLLED: KindBehavior = KindBehavior {
    // Clamped horizontally and never moves vertically
    out_of_bounds: |_, _| false,
    score_value: |_| 0,
};

const PROJECTILE: KindBehavior = KindBehavior {
    out_of_bounds: |e, _| projectile::is_out_of_bounds(e),
    score_value: |_| 0,
};

const HOSTILE: KindBehavior = KindBehavior {
    out_of_bounds: |e, playfield| hostile::is_out_of_bounds(e, playfield.y),
    score_value: |e| match e.kind {
        EntityKind::Hostile(tier) => tier.spec().score,
        _ => 0,
    },
};

fn behavior(kind: EntityKind) -> &'static KindBehavior {
    match kind {
        EntityKind::Controlled => &CONTROLLED,
        EntityKind::Projectile => &PROJECTILE,
        EntityKind::Hostile(_) => &HOSTILE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn make(kind: EntityKind, x: f32, y: f32, w: f32, h: f32) -> Entity {
        Entity::new(1, kind, Vec2::new(x, y), Vec2::new(w, h), Vec2::ZERO, Color::WHITE)
    }

    #[test]
    fn test_bounds() {
        let e = make(EntityKind::Projectile, 100.0, 50.0, 8.0, 16.0);
        let b = e.bounds();
        assert_eq!(b.left, 100.0);
        assert_eq!(b.right, 108.0);
        assert_eq!(b.top, 50.0);
        assert_eq!(b.bottom, 66.0);
    }

    #[test]
    fn test_kill_is_idempotent() {
        let mut e = make(EntityKind::Projectile, 0.0, 0.0, 8.0, 16.0);
        assert!(e.is_alive());
        e.kill();
        e.kill();
        assert!(!e.is_alive());
    }

    #[test]
    fn test_advance_ignores_liveness() {
        let mut e = make(EntityKind::Projectile, 10.0, 10.0, 8.0, 16.0);
        e.vel = Vec2::new(0.0, -8.0);
        e.kill();
        e.advance();
        assert_eq!(e.pos, Vec2::new(10.0, 2.0));
    }

    #[test]
    fn test_kind_table() {
        let playfield = Vec2::new(800.0, 600.0);
        let player = make(EntityKind::Controlled, 0.0, 5000.0, 60.0, 60.0);
        assert!(!player.is_out_of_bounds(playfield));
        assert_eq!(player.score_value(), 0);

        let hostile = make(EntityKind::Hostile(HostileTier::Large), 0.0, 601.0, 60.0, 60.0);
        assert!(hostile.is_out_of_bounds(playfield));
        assert_eq!(hostile.score_value(), 50);

        let shot = make(EntityKind::Projectile, 0.0, -17.0, 8.0, 16.0);
        assert!(shot.is_out_of_bounds(playfield));
    }

    proptest! {
        #[test]
        fn advance_is_linear(
            x in -1000.0f32..1000.0, y in -1000.0f32..1000.0,
            vx in -20.0f32..20.0, vy in -20.0f32..20.0,
        ) {
            let mut e = make(EntityKind::Projectile, x, y, 8.0, 16.0);
            e.vel = Vec2::new(vx, vy);
            e.advance();
            prop_assert_eq!(e.pos, Vec2::new(x + vx, y + vy));
        }
    }
}
