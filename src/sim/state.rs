//! Game state and core simulation types
//!
//! Everything the frame loop mutates lives here, owned by one engine.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::entity::Entity;
use super::player::Player;
use crate::highscores::HighScore;
use crate::tuning::Tuning;

/// Lifecycle of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Engine constructed, no run yet
    #[default]
    NotStarted,
    /// Active gameplay, frames are scheduled
    Playing,
    /// Frozen; no frames are scheduled
    Paused,
    /// Player was hit; terminal until the next start
    GameOver,
}

/// Score snapshot handed to host callbacks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameStats {
    pub score: u64,
    pub high_score: u64,
    pub enemies_destroyed: u32,
}

/// Something the host needs to react to, in the order it happened
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    /// Score went up (one per destroyed hostile)
    ScoreChanged(GameStats),
    /// High score exceeded; carries the new value to persist
    HighScoreRaised(u64),
    /// Player collided with a hostile
    GameOver(GameStats),
}

/// Last emission times, in host milliseconds
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SpawnTimers {
    pub last_projectile_ms: f64,
    pub last_hostile_ms: f64,
}

impl SpawnTimers {
    pub fn at(now_ms: f64) -> Self {
        Self {
            last_projectile_ms: now_ms,
            last_hostile_ms: now_ms,
        }
    }
}

/// Complete game state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub phase: GamePhase,
    /// Playfield width/height in pixels
    pub playfield: Vec2,
    pub player: Player,
    /// Live shots in spawn order
    pub projectiles: Vec<Entity>,
    /// Live hostiles in spawn order
    pub hostiles: Vec<Entity>,
    pub score: u64,
    pub high_score: HighScore,
    pub enemies_destroyed: u32,
    pub timers: SpawnTimers,
    /// Simulated frame counter for the current run
    pub frame: u64,
    next_id: u32,
}

impl GameState {
    /// Fresh state with no run in progress
    pub fn new(playfield: Vec2, high_score: HighScore, tuning: &Tuning) -> Self {
        Self {
            phase: GamePhase::NotStarted,
            playfield,
            player: Player::new(0, playfield, tuning),
            projectiles: Vec::new(),
            hostiles: Vec::new(),
            score: 0,
            high_score,
            enemies_destroyed: 0,
            timers: SpawnTimers::default(),
            frame: 0,
            next_id: 1,
        }
    }

    /// Clear the run: score, kills, entities and timers. High score is kept.
    pub fn reset_run(&mut self, now_ms: f64, tuning: &Tuning) {
        self.score = 0;
        self.enemies_destroyed = 0;
        self.projectiles.clear();
        self.hostiles.clear();
        self.next_id = 1;
        self.frame = 0;
        let id = self.next_entity_id();
        self.player = Player::new(id, self.playfield, tuning);
        self.timers = SpawnTimers::at(now_ms);
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn stats(&self) -> GameStats {
        GameStats {
            score: self.score,
            high_score: self.high_score.best(),
            enemies_destroyed: self.enemies_destroyed,
        }
    }

    /// Current hostile spawn interval, derived from score
    pub fn hostile_interval_ms(&self, tuning: &Tuning) -> f64 {
        tuning.hostile_interval_ms(self.score)
    }

    /// Credit a destroyed hostile. Returns the new high score if it was raised.
    pub fn award(&mut self, points: u64) -> Option<u64> {
        self.score += points;
        self.enemies_destroyed += 1;
        self.high_score
            .submit(self.score)
            .then(|| self.high_score.best())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make() -> GameState {
        GameState::new(Vec2::new(800.0, 600.0), HighScore::new(30), &Tuning::default())
    }

    #[test]
    fn test_new_is_not_started() {
        let state = make();
        assert_eq!(state.phase, GamePhase::NotStarted);
        assert_eq!(state.stats(), GameStats { score: 0, high_score: 30, enemies_destroyed: 0 });
    }

    #[test]
    fn test_award_raises_high_score_only_when_exceeded() {
        let mut state = make();
        assert_eq!(state.award(20), None);
        assert_eq!(state.award(10), None); // ties do not raise
        assert_eq!(state.award(10), Some(40));
        assert_eq!(state.stats(), GameStats { score: 40, high_score: 40, enemies_destroyed: 3 });
    }

    #[test]
    fn test_reset_keeps_high_score() {
        let mut state = make();
        state.award(50);
        state.reset_run(1234.0, &Tuning::default());
        assert_eq!(state.score, 0);
        assert_eq!(state.enemies_destroyed, 0);
        assert_eq!(state.high_score.best(), 50);
        assert_eq!(state.timers, SpawnTimers::at(1234.0));
        assert_eq!(state.player.body.id, 1);
        assert_eq!(state.next_entity_id(), 2);
    }

    #[test]
    fn test_stats_serialize_camel_case() {
        let json = serde_json::to_string(&make().stats()).unwrap();
        assert_eq!(json, r#"{"score":0,"highScore":30,"enemiesDestroyed":0}"#);
    }
}
