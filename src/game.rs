//! Session lifecycle
//!
//! `Game` owns the session state and its scheduler and is the only thing
//! the frontend talks to: intents go in through `queue_move`, elapsed
//! time through `advance`, and a `RenderSnapshot` comes out.

use crate::scheduler::{Advance, Scheduler};
use crate::sim::{self, Direction, GameEvent, GameState, RenderSnapshot};
use crate::tuning::Tuning;

pub struct Game {
    state: GameState,
    scheduler: Scheduler,
}

impl Game {
    /// A game that has not started yet; both schedules are stopped
    pub fn new(tuning: Tuning) -> Self {
        let mut scheduler = Scheduler::new();
        scheduler.stop_all();
        Self {
            state: GameState::new(0, tuning),
            scheduler,
        }
    }

    /// Fresh session: full lives, zero score, level 1
    pub fn start(&mut self, seed: u64) {
        let tuning = self.state.tuning.clone();
        self.state = GameState::new(seed, tuning);
        sim::reset_level(&mut self.state);
        self.scheduler.restart();
        log::info!("Session started with seed {}", seed);
    }

    /// Same session, new obstacle layout
    pub fn reset_level(&mut self) {
        sim::reset_level(&mut self.state);
    }

    /// Player back to the start cell, level untouched
    pub fn reset_player(&mut self) {
        sim::reset_player(&mut self.state);
    }

    /// Stop both schedules and release every entity
    pub fn teardown(&mut self) {
        self.scheduler.stop_all();
        let state = &mut self.state;
        state.vehicles.clear();
        state.platforms.clear();
        state.predators.clear();
        state.bonuses.clear();
        state.player.queued = None;
        log::info!("Session torn down");
    }

    pub fn queue_move(&mut self, direction: Direction) {
        if self.scheduler.is_idle() {
            return;
        }
        sim::queue_move(&mut self.state, direction);
    }

    /// Feed elapsed real time (seconds) to both schedules
    pub fn advance(&mut self, elapsed: f32) -> Advance {
        self.scheduler.advance(&mut self.state, elapsed)
    }

    pub fn snapshot(&self) -> RenderSnapshot {
        RenderSnapshot::capture(&self.state)
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.state.drain_events()
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    /// Whether any schedule is still live
    pub fn is_running(&self) -> bool {
        !self.scheduler.is_idle()
    }
}
