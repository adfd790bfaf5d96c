//! Level clock, counted in whole seconds and fed with game ticks.

use crate::time::TICKS_PER_SEC;

/// At or below this many seconds the clock is drawn as urgent.
pub const CRITICAL_SECONDS: u32 = 10;

#[derive(Clone, Debug, PartialEq)]
pub struct Countdown {
    /// `None` for relaxed levels, which never expire.
    pub limit: Option<u32>,
    pub seconds_left: u32,
    tick_acc: u32,
    running: bool,
    expired: bool,
}

impl Countdown {
    pub fn new(limit: Option<u32>) -> Self {
        Self {
            limit,
            seconds_left: limit.unwrap_or(0),
            tick_acc: 0,
            running: false,
            expired: false,
        }
    }

    pub fn start(&mut self) {
        if self.limit.is_some() && !self.expired {
            self.running = true;
        }
    }

    pub fn pause(&mut self) {
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn is_expired(&self) -> bool {
        self.expired
    }

    /// Advance by `delta_ticks`. Returns `true` on the call that hits zero,
    /// and never again after that.
    pub fn tick(&mut self, delta_ticks: u32) -> bool {
        if !self.running || self.expired {
            return false;
        }
        self.tick_acc = self.tick_acc.saturating_add(delta_ticks);
        let whole = self.tick_acc / TICKS_PER_SEC;
        self.tick_acc %= TICKS_PER_SEC;
        self.seconds_left = self.seconds_left.saturating_sub(whole);

        if self.seconds_left == 0 {
            self.expired = true;
            self.running = false;
            return true;
        }
        false
    }

    /// `MM:SS`, or `None` for relaxed levels.
    pub fn display(&self) -> Option<String> {
        self.limit?;
        Some(format!("{:02}:{:02}", self.seconds_left / 60, self.seconds_left % 60))
    }

    pub fn is_critical(&self) -> bool {
        self.limit.is_some() && self.seconds_left <= CRITICAL_SECONDS
    }
}
