//! Hostile tiers and spawning

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::entity::{Entity, EntityKind};
use crate::Color;

/// Hostile size class, fixed at spawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HostileTier {
    /// Fast, 10 points
    Small,
    /// Medium speed, 20 points
    Medium,
    /// Slow, 50 points
    Large,
}

/// Fixed preset for a tier
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TierSpec {
    pub width: f32,
    pub height: f32,
    /// Downward speed in pixels per frame
    pub speed: f32,
    pub score: u64,
    pub color: Color,
    /// Spawn probability
    pub weight: f64,
}

const SMALL: TierSpec = TierSpec {
    width: 30.0,
    height: 30.0,
    speed: 3.0,
    score: 10,
    color: Color::rgb(0xFF, 0x6B, 0x6B),
    weight: 0.5,
};

const MEDIUM: TierSpec = TierSpec {
    width: 45.0,
    height: 45.0,
    speed: 2.0,
    score: 20,
    color: Color::rgb(0xFF, 0xA5, 0x00),
    weight: 0.3,
};

const LARGE: TierSpec = TierSpec {
    width: 60.0,
    height: 60.0,
    speed: 1.0,
    score: 50,
    color: Color::rgb(0x9B, 0x59, 0xB6),
    weight: 0.2,
};

impl HostileTier {
    pub const ALL: [HostileTier; 3] = [HostileTier::Small, HostileTier::Medium, HostileTier::Large];

    pub fn spec(self) -> &'static TierSpec {
        match self {
            HostileTier::Small => &SMALL,
            HostileTier::Medium => &MEDIUM,
            HostileTier::Large => &LARGE,
        }
    }

    /// Map a uniform roll in [0, 1) onto the cumulative tier weights
    pub fn from_roll(roll: f64) -> Self {
        let mut cumulative = 0.0;
        for tier in Self::ALL {
            cumulative += tier.spec().weight;
            if roll < cumulative {
                return tier;
            }
        }
        HostileTier::Large
    }

    /// Weighted random draw (0.5 / 0.3 / 0.2)
    pub fn draw<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::from_roll(rng.random::<f64>())
    }
}

/// Spawn a hostile of `tier` at horizontal offset `x`, just above the top edge
pub fn spawn(id: u32, tier: HostileTier, x: f32) -> Entity {
    let spec = tier.spec();
    Entity::new(
        id,
        EntityKind::Hostile(tier),
        Vec2::new(x, -spec.height),
        Vec2::new(spec.width, spec.height),
        Vec2::new(0.0, spec.speed),
        spec.color,
    )
}

/// Spawn a hostile with a weighted tier and a uniform x that keeps it on screen
pub fn create_random<R: Rng + ?Sized>(id: u32, playfield_width: f32, rng: &mut R) -> Entity {
    let tier = HostileTier::draw(rng);
    let max_x = (playfield_width - tier.spec().width).max(0.0);
    let x = rng.random::<f32>() * max_x;
    spawn(id, tier, x)
}

/// True once the top edge is below the playfield
pub fn is_out_of_bounds(e: &Entity, playfield_height: f32) -> bool {
    e.pos.y > playfield_height
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_tier_presets() {
        assert_eq!(HostileTier::Small.spec().score, 10);
        assert_eq!(HostileTier::Medium.spec().score, 20);
        assert_eq!(HostileTier::Large.spec().score, 50);
        assert_eq!(HostileTier::Large.spec().speed, 1.0);
        let total: f64 = HostileTier::ALL.iter().map(|t| t.spec().weight).sum();
        assert!((total - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_from_roll_boundaries() {
        assert_eq!(HostileTier::from_roll(0.0), HostileTier::Small);
        assert_eq!(HostileTier::from_roll(0.49), HostileTier::Small);
        assert_eq!(HostileTier::from_roll(0.5), HostileTier::Medium);
        assert_eq!(HostileTier::from_roll(0.79), HostileTier::Medium);
        assert_eq!(HostileTier::from_roll(0.8), HostileTier::Large);
        assert_eq!(HostileTier::from_roll(0.999), HostileTier::Large);
    }

    #[test]
    fn test_weighted_distribution() {
        let mut rng = Pcg32::seed_from_u64(42);
        let mut counts = [0usize; 3];
        for _ in 0..10_000 {
            match HostileTier::draw(&mut rng) {
                HostileTier::Small => counts[0] += 1,
                HostileTier::Medium => counts[1] += 1,
                HostileTier::Large => counts[2] += 1,
            }
        }
        assert!((4500..5500).contains(&counts[0]), "small: {}", counts[0]);
        assert!((2500..3500).contains(&counts[1]), "medium: {}", counts[1]);
        assert!((1500..2500).contains(&counts[2]), "large: {}", counts[2]);
    }

    #[test]
    fn test_create_random_stays_on_screen() {
        let mut rng = Pcg32::seed_from_u64(7);
        for id in 0..500 {
            let h = create_random(id, 800.0, &mut rng);
            assert!(h.pos.x >= 0.0);
            assert!(h.pos.x + h.size.x <= 800.0);
            assert_eq!(h.pos.y, -h.size.y);
            assert!(h.vel.y > 0.0);
        }
    }

    #[test]
    fn test_same_seed_same_spawns() {
        let mut a = Pcg32::seed_from_u64(99);
        let mut b = Pcg32::seed_from_u64(99);
        for id in 0..50 {
            let ha = create_random(id, 800.0, &mut a);
            let hb = create_random(id, 800.0, &mut b);
            assert_eq!(ha.kind, hb.kind);
            assert_eq!(ha.pos, hb.pos);
        }
    }

    #[test]
    fn test_leaves_bottom_edge() {
        let mut h = spawn(1, HostileTier::Small, 10.0);
        h.pos.y = 600.0;
        assert!(!is_out_of_bounds(&h, 600.0));
        h.advance();
        assert!(is_out_of_bounds(&h, 600.0));
    }
}
