//! Single-owner scheduler for the two periodic tasks
//!
//! The frame task (fixed `SIM_DT` substeps) and the countdown task
//! (`COUNTDOWN_PERIOD`) share one `GameState`. Both are driven from
//! `advance`, one after the other, so a tick of one never observes a
//! half-applied tick of the other.

use crate::consts::*;
use crate::sim::{GameState, countdown_tick, tick};

/// A periodic task fed by elapsed real time
#[derive(Debug, Clone)]
pub struct Task {
    period: f32,
    accumulator: f32,
    running: bool,
}

impl Task {
    pub fn new(period: f32) -> Self {
        Self {
            period,
            accumulator: 0.0,
            running: true,
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn stop(&mut self) {
        self.running = false;
        self.accumulator = 0.0;
    }

    pub fn resume(&mut self) {
        self.running = true;
    }

    fn feed(&mut self, elapsed: f32) {
        if self.running {
            self.accumulator += elapsed;
        }
    }

    /// Consume one period if due
    fn take_due(&mut self) -> bool {
        if self.running && self.accumulator >= self.period {
            self.accumulator -= self.period;
            true
        } else {
            false
        }
    }
}

/// How much work one `advance` did
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Advance {
    pub frames: u32,
    pub countdowns: u32,
}

/// Owns both schedules for one session
#[derive(Debug, Clone)]
pub struct Scheduler {
    frame: Task,
    countdown: Task,
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl Scheduler {
    pub fn new() -> Self {
        Self {
            frame: Task::new(SIM_DT),
            countdown: Task::new(COUNTDOWN_PERIOD),
        }
    }

    /// Run every task that came due in `elapsed` seconds of real time
    pub fn advance(&mut self, state: &mut GameState, elapsed: f32) -> Advance {
        let elapsed = elapsed.clamp(0.0, MAX_FRAME_DT);
        let mut done = Advance::default();

        self.frame.feed(elapsed);
        while done.frames < MAX_SUBSTEPS && self.frame.take_due() {
            tick(state, SIM_DT);
            done.frames += 1;
            if self.stop_if_finished(state) {
                return done;
            }
        }

        self.countdown.feed(elapsed);
        while self.countdown.take_due() {
            countdown_tick(state);
            done.countdowns += 1;
            if self.stop_if_finished(state) {
                return done;
            }
        }
        done
    }

    fn stop_if_finished(&mut self, state: &GameState) -> bool {
        if state.phase.is_terminal() {
            log::info!("Session ended ({:?}), stopping schedules", state.phase);
            self.stop_all();
            return true;
        }
        false
    }

    pub fn frame(&self) -> &Task {
        &self.frame
    }

    pub fn countdown(&self) -> &Task {
        &self.countdown
    }

    pub fn stop_frame(&mut self) {
        self.frame.stop();
    }

    pub fn stop_countdown(&mut self) {
        self.countdown.stop();
    }

    pub fn stop_all(&mut self) {
        self.frame.stop();
        self.countdown.stop();
    }

    /// Restart both schedules from a clean accumulator
    pub fn restart(&mut self) {
        *self = Self::new();
    }

    pub fn is_idle(&self) -> bool {
        !self.frame.is_running() && !self.countdown.is_running()
    }
}
