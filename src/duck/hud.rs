//! Round markers in the HUD
//!
//! After the intro, one marker per round pops in with a fixed interval.
//! Winning round `n` completes marker `n - 1`. Markers are 0-based.

use super::DuckCommand;

#[derive(Debug, Clone, Default)]
pub struct RoundHud {
    total: u32,
    revealed: u32,
    interval: f32,
    timer: f32,
    started: bool,
}

impl RoundHud {
    pub fn new(total: u32, interval: f32) -> Self {
        Self {
            total,
            revealed: 0,
            interval,
            timer: 0.0,
            started: false,
        }
    }

    pub fn revealed(&self) -> u32 {
        self.revealed
    }

    /// Start revealing markers from the first one
    pub fn begin_reveal(&mut self) {
        self.revealed = 0;
        self.timer = 0.0;
        self.started = true;
    }

    pub fn tick(&mut self, dt: f32, out: &mut Vec<DuckCommand>) {
        if !self.started || self.revealed >= self.total {
            return;
        }
        if crate::countdown(&mut self.timer, dt) {
            out.push(DuckCommand::RevealRoundMarker(self.revealed));
            self.revealed += 1;
            self.timer = self.interval;
        }
    }

    /// Mark a won round. `round` is 1-based, the marker index is not.
    pub fn complete(&self, round: u32, out: &mut Vec<DuckCommand>) {
        if round >= 1 && round <= self.total {
            out.push(DuckCommand::CompleteRoundMarker(round - 1));
        }
    }
}
