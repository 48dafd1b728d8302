//! Player projectiles

use glam::Vec2;

use super::entity::{Entity, EntityKind};
use crate::Color;
use crate::consts::{PROJECTILE_HEIGHT, PROJECTILE_WIDTH};

/// Gold
pub const PROJECTILE_COLOR: Color = Color::rgb(0xFF, 0xD7, 0x00);

/// Spawn a projectile centered on `emission.x`, sitting just above `emission.y`
pub fn spawn(id: u32, emission: Vec2, speed: f32) -> Entity {
    let size = Vec2::new(PROJECTILE_WIDTH, PROJECTILE_HEIGHT);
    let pos = Vec2::new(emission.x - size.x / 2.0, emission.y - size.y);
    Entity::new(
        id,
        EntityKind::Projectile,
        pos,
        size,
        Vec2::new(0.0, -speed.abs()),
        PROJECTILE_COLOR,
    )
}

/// True once the bottom edge has passed above the playfield top
pub fn is_out_of_bounds(e: &Entity) -> bool {
    e.pos.y + e.size.y < 0.0
}
