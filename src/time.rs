//! Fixed-timestep clock using an accumulator.
//!
//! `draw_web()` fires at roughly display refresh rate with a variable delta.
//! `GameTime` turns that into whole ticks so the level countdown advances
//! deterministically and can be driven directly from tests.

/// Game ticks per real-time second. The countdown consumes ticks in
/// batches of this size.
pub const TICKS_PER_SEC: u32 = 10;

/// Largest frame gap (ms) fed into the accumulator. A backgrounded tab
/// resumes with at most this much catch-up instead of draining the timer.
const MAX_FRAME_GAP_MS: f64 = 500.0;

pub struct GameTime {
    ms_per_tick: f64,
    accumulator: f64,
    pub total_ticks: u64,
    last_timestamp: Option<f64>,
}

impl GameTime {
    pub fn new(ticks_per_sec: u32) -> Self {
        Self {
            ms_per_tick: 1000.0 / ticks_per_sec.max(1) as f64,
            accumulator: 0.0,
            total_ticks: 0,
            last_timestamp: None,
        }
    }

    /// Feed a wall-clock timestamp in milliseconds (`performance.now()`).
    /// Returns how many ticks elapsed since the previous frame.
    pub fn update(&mut self, now_ms: f64) -> u32 {
        let delta = match self.last_timestamp {
            Some(prev) => (now_ms - prev).clamp(0.0, MAX_FRAME_GAP_MS),
            None => 0.0,
        };
        self.last_timestamp = Some(now_ms);

        self.accumulator += delta;
        let ticks = (self.accumulator / self.ms_per_tick) as u32;
        self.accumulator -= ticks as f64 * self.ms_per_tick;
        self.total_ticks += ticks as u64;
        ticks
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_frame_is_free() {
        let mut clock = GameTime::new(TICKS_PER_SEC);
        assert_eq!(clock.update(12_345.0), 0);
        assert_eq!(clock.total_ticks, 0);
    }

    #[test]
    fn one_second_yields_ticks_per_sec() {
        let mut clock = GameTime::new(TICKS_PER_SEC);
        clock.update(0.0);
        let mut total = 0;
        for step in 1..=4 {
            total += clock.update(step as f64 * 250.0);
        }
        assert_eq!(total, TICKS_PER_SEC);
    }

    #[test]
    fn leftover_milliseconds_carry_into_next_frame() {
        let mut clock = GameTime::new(TICKS_PER_SEC);
        clock.update(0.0);
        assert_eq!(clock.update(170.0), 1); // 70ms left over
        assert_eq!(clock.update(200.0), 1); // 70 + 30 = 100ms
        assert_eq!(clock.total_ticks, 2);
    }

    #[test]
    fn backgrounded_tab_is_capped() {
        let mut clock = GameTime::new(TICKS_PER_SEC);
        clock.update(0.0);
        assert_eq!(clock.update(60_000.0), 5);
    }

    #[test]
    fn clock_going_backwards_is_ignored() {
        let mut clock = GameTime::new(TICKS_PER_SEC);
        clock.update(1_000.0);
        assert_eq!(clock.update(900.0), 0);
        assert_eq!(clock.update(1_000.0), 1);
    }

    #[test]
    fn sixty_fps_for_a_second() {
        let mut clock = GameTime::new(TICKS_PER_SEC);
        clock.update(0.0);
        let total: u32 = (1..=60).map(|i| clock.update(i as f64 * 16.667)).sum();
        assert!((9..=11).contains(&total), "expected ~10 ticks, got {}", total);
    }
}
