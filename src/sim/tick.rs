//! Frame update
//!
//! One call advances the simulation by exactly one frame: input, spawns,
//! integration, pruning, collisions, game-over check. Rendering is separate.

use rand::Rng;

use super::collision::{first_collision, resolve_collisions};
use super::hostile;
use super::projectile;
use super::state::{GameEvent, GamePhase, GameState};
use crate::tuning::Tuning;

/// Input commands for a single frame
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickInput {
    /// Left key held
    pub left: bool,
    /// Right key held
    pub right: bool,
    /// Latest pointer x since the previous frame
    pub pointer_x: Option<f32>,
}

/// Advance the game state by one frame at host time `now_ms`
///
/// Does nothing unless the phase is `Playing`. Returns the events raised,
/// in the order they happened.
pub fn tick<R: Rng + ?Sized>(
    state: &mut GameState,
    input: &TickInput,
    now_ms: f64,
    tuning: &Tuning,
    rng: &mut R,
) -> Vec<GameEvent> {
    let mut events = Vec::new();
    if state.phase != GamePhase::Playing {
        return events;
    }
    state.frame += 1;
    let level_before = tuning.difficulty_level(state.score);

    apply_input(state, input);
    spawn_due(state, now_ms, tuning, rng);

    for e in state.projectiles.iter_mut().chain(state.hostiles.iter_mut()) {
        if e.is_alive() {
            e.advance();
        }
    }

    let playfield = state.playfield;
    state.projectiles.retain(|p| !p.is_out_of_bounds(playfield));
    state.hostiles.retain(|h| !h.is_out_of_bounds(playfield));

    resolve_shots(state, &mut events);

    if let Some(i) = first_collision(&state.player.body, &state.hostiles) {
        log::info!(
            "Player hit by hostile {} at frame {}, final score {}",
            state.hostiles[i].id,
            state.frame,
            state.score
        );
        state.phase = GamePhase::GameOver;
        events.push(GameEvent::GameOver(state.stats()));
    }

    let level = tuning.difficulty_level(state.score);
    if level != level_before {
        log::debug!(
            "Difficulty level {} (hostile interval {} ms)",
            level,
            state.hostile_interval_ms(tuning)
        );
    }

    events
}

/// Pointer first, then held keys
fn apply_input(state: &mut GameState, input: &TickInput) {
    if let Some(x) = input.pointer_x {
        state.player.move_to(x);
    }
    if input.left {
        state.player.move_left();
    }
    if input.right {
        state.player.move_right();
    }
}

fn spawn_due<R: Rng + ?Sized>(state: &mut GameState, now_ms: f64, tuning: &Tuning, rng: &mut R) {
    if now_ms - state.timers.last_projectile_ms >= tuning.projectile_interval_ms {
        let id = state.next_entity_id();
        let shot = projectile::spawn(id, state.player.emission_point(), tuning.projectile_speed);
        state.projectiles.push(shot);
        state.timers.last_projectile_ms = now_ms;
    }

    if now_ms - state.timers.last_hostile_ms >= state.hostile_interval_ms(tuning) {
        let id = state.next_entity_id();
        let enemy = hostile::create_random(id, state.playfield.x, rng);
        log::debug!("Spawned hostile {} ({:?}) at x={:.1}", id, enemy.kind, enemy.pos.x);
        state.hostiles.push(enemy);
        state.timers.last_hostile_ms = now_ms;
    }
}

/// Projectile vs hostile pass; kills both sides and credits the score
fn resolve_shots(state: &mut GameState, events: &mut Vec<GameEvent>) {
    for (pi, hi) in resolve_collisions(&state.projectiles, &state.hostiles) {
        state.projectiles[pi].kill();
        state.hostiles[hi].kill();
        let points = state.hostiles[hi].score_value();
        if let Some(best) = state.award(points) {
            events.push(GameEvent::HighScoreRaised(best));
        }
        events.push(GameEvent::ScoreChanged(state.stats()));
    }
    state.projectiles.retain(|p| p.is_alive());
    state.hostiles.retain(|h| h.is_alive());
}
