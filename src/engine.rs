//! Game engine
//!
//! Owns the simulation state and drives it from host frames. The host
//! supplies a drawing surface, a frame scheduler and a score store; it
//! forwards input events and calls [`GameEngine::run_frame`] whenever a
//! scheduled frame comes due.
//!
//! Lifecycle:
//!
//! | Event            | From      | To        |
//! |------------------|-----------|-----------|
//! | `start()`        | any but Playing | Playing (full reset) |
//! | `pause()`        | Playing   | Paused    |
//! | `resume()`       | Paused    | Playing   |
//! | player is hit    | Playing   | GameOver  |
//!
//! Anything else is a silent no-op.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::error::EngineError;
use crate::highscores::HighScore;
use crate::platform::{FrameHandle, FrameScheduler, InputState, Key, ManualScheduler, ScoreStore};
use crate::renderer::{DrawContext, Surface, draw_scene};
use crate::sim::{GameEvent, GamePhase, GameState, GameStats, tick};
use crate::tuning::Tuning;

type StatsCallback = Box<dyn FnMut(&GameStats)>;

/// Frame-loop orchestrator
pub struct GameEngine<D, S, H, R = Pcg32> {
    ctx: D,
    scheduler: S,
    store: H,
    rng: R,
    tuning: Tuning,
    state: GameState,
    input: InputState,
    /// The single in-flight frame request
    pending: Option<FrameHandle>,
    on_score_change: Option<StatsCallback>,
    on_game_over: Option<StatsCallback>,
}

impl<D, S, H> GameEngine<D, S, H, Pcg32>
where
    D: DrawContext,
    S: FrameScheduler,
    H: ScoreStore,
{
    /// Build an engine with default tuning and a seeded PCG RNG
    pub fn new<V>(surface: &V, scheduler: S, store: H, seed: u64) -> Result<Self, EngineError>
    where
        V: Surface<Context = D>,
    {
        Self::with_rng(surface, scheduler, store, Pcg32::seed_from_u64(seed), Tuning::default())
    }

    /// Restart the spawn RNG from `seed`
    pub fn reseed(&mut self, seed: u64) {
        self.rng = Pcg32::seed_from_u64(seed);
    }
}

impl<D, S, H, R> GameEngine<D, S, H, R>
where
    D: DrawContext,
    S: FrameScheduler,
    H: ScoreStore,
    R: Rng,
{
    /// Build an engine with an explicit RNG and tuning
    ///
    /// Fails if the surface has no 2D context or the tuning is invalid. The
    /// stored high score is loaded once here.
    pub fn with_rng<V>(surface: &V, scheduler: S, store: H, rng: R, tuning: Tuning) -> Result<Self, EngineError>
    where
        V: Surface<Context = D>,
    {
        tuning.validate()?;
        let ctx = surface.context_2d().ok_or(EngineError::ContextUnavailable)?;
        let playfield = Vec2::new(surface.width(), surface.height());
        let high_score = HighScore::load(&store);
        log::info!(
            "Engine ready: {}x{} playfield, high score {}",
            playfield.x,
            playfield.y,
            high_score.best()
        );

        Ok(Self {
            ctx,
            scheduler,
            store,
            rng,
            state: GameState::new(playfield, high_score, &tuning),
            tuning,
            input: InputState::default(),
            pending: None,
            on_score_change: None,
            on_game_over: None,
        })
    }

    /// Called synchronously every time the score goes up
    pub fn on_score_change(&mut self, callback: impl FnMut(&GameStats) + 'static) {
        self.on_score_change = Some(Box::new(callback));
    }

    /// Called once when a run ends
    pub fn on_game_over(&mut self, callback: impl FnMut(&GameStats) + 'static) {
        self.on_game_over = Some(Box::new(callback));
    }

    /// Begin a fresh run. No-op while already playing.
    pub fn start(&mut self) {
        if self.state.phase == GamePhase::Playing {
            return;
        }
        self.cancel_pending();
        let now = self.scheduler.now_ms();
        self.state.reset_run(now, &self.tuning);
        self.state.phase = GamePhase::Playing;
        log::info!("Run started");
        self.run_frame();
    }

    pub fn pause(&mut self) {
        if self.state.phase != GamePhase::Playing {
            return;
        }
        self.state.phase = GamePhase::Paused;
        self.cancel_pending();
        log::info!("Paused at score {}", self.state.score);
    }

    pub fn resume(&mut self) {
        if self.state.phase != GamePhase::Paused {
            return;
        }
        self.state.phase = GamePhase::Playing;
        log::info!("Resumed");
        self.run_frame();
    }

    /// Cancel scheduling and drop buffered input; valid in any state
    pub fn destroy(&mut self) {
        self.cancel_pending();
        self.input.clear();
        log::info!("Engine destroyed");
    }

    pub fn on_key_down(&mut self, key: Key) {
        self.input.key_down(key);
    }

    pub fn on_key_up(&mut self, key: Key) {
        self.input.key_up(key);
    }

    /// Pointer control; ignored unless playing or when `x` is not finite
    pub fn handle_pointer_move(&mut self, x: f32) {
        if !x.is_finite() {
            log::debug!("Dropping non-finite pointer x {}", x);
            return;
        }
        if self.state.phase == GamePhase::Playing {
            self.input.pointer_move(x);
        }
    }

    pub fn stats(&self) -> GameStats {
        self.state.stats()
    }

    pub fn state(&self) -> GamePhase {
        self.state.phase
    }

    /// Read-only view of the simulation (HUDs, autoplay)
    pub fn game_state(&self) -> &GameState {
        &self.state
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn draw_context(&self) -> &D {
        &self.ctx
    }

    pub fn draw_context_mut(&mut self) -> &mut D {
        &mut self.ctx
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    pub fn store(&self) -> &H {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut H {
        &mut self.store
    }

    /// One update + render cycle; the host calls this when a frame fires
    ///
    /// Does nothing unless playing. Reschedules itself while still playing.
    pub fn run_frame(&mut self) {
        // a direct call supersedes any request still in flight
        self.cancel_pending();
        if self.state.phase != GamePhase::Playing {
            return;
        }

        let now = self.scheduler.now_ms();
        let input = self.input.take_tick_input();
        let events = tick(&mut self.state, &input, now, &self.tuning, &mut self.rng);
        for event in events {
            self.dispatch(event);
        }

        if let Err(e) = draw_scene(&mut self.ctx, &self.state) {
            log::warn!("Frame {} not rendered: {}", self.state.frame, e);
        }

        if self.state.phase == GamePhase::Playing {
            self.pending = Some(self.scheduler.schedule());
        }
    }

    fn dispatch(&mut self, event: GameEvent) {
        match event {
            GameEvent::HighScoreRaised(best) => {
                HighScore::new(best).save(&mut self.store);
            }
            GameEvent::ScoreChanged(stats) => {
                if let Some(callback) = self.on_score_change.as_mut() {
                    callback(&stats);
                }
            }
            GameEvent::GameOver(stats) => {
                self.cancel_pending();
                log::info!(
                    "Game over: score {}, high score {}, {} destroyed",
                    stats.score,
                    stats.high_score,
                    stats.enemies_destroyed
                );
                if let Some(callback) = self.on_game_over.as_mut() {
                    callback(&stats);
                }
            }
        }
    }

    fn cancel_pending(&mut self) {
        if let Some(handle) = self.pending.take() {
            self.scheduler.cancel(handle);
        }
    }
}

impl<D, H, R> GameEngine<D, ManualScheduler, H, R>
where
    D: DrawContext,
    H: ScoreStore,
    R: Rng,
{
    /// Advance the manual clock by `ms` and run the pending frame, if any
    ///
    /// Returns whether a frame ran.
    pub fn step(&mut self, ms: f64) -> bool {
        self.scheduler.advance(ms);
        if self.scheduler.fire().is_some() {
            self.run_frame();
            true
        } else {
            false
        }
    }
}
