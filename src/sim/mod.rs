//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Discrete per-frame displacement only
//! - Injected RNG only
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod entity;
pub mod hostile;
pub mod player;
pub mod projectile;
pub mod state;
pub mod tick;

pub use collision::{all_collisions, check_collision, first_collision, overlaps, resolve_collisions};
pub use entity::{Bounds, Entity, EntityKind};
pub use hostile::{HostileTier, TierSpec};
pub use player::Player;
pub use state::{GameEvent, GamePhase, GameState, GameStats, SpawnTimers};
pub use tick::{TickInput, tick};
