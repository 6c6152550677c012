use std::time::{Duration, Instant};

/// Timing of one pumped frame.
#[derive(Debug, Copy, Clone)]
pub struct FrameTime {
    /// Seconds since the previous tick, clamped.
    pub dt: f32,

    /// Time since the clock was created.
    pub elapsed: Duration,

    /// Zero-based frame counter.
    pub frame_index: u64,
}

/// Produces a `FrameTime` per frame.
///
/// Delta time is capped so a stall (debugger, window drag on Windows) does not
/// show up as one huge step.
#[derive(Debug, Clone)]
pub struct FrameClock {
    start: Instant,
    last: Instant,
    frame_index: u64,
    max_dt: Duration,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::with_max_dt(Duration::from_millis(250))
    }

    pub fn with_max_dt(max_dt: Duration) -> Self {
        let now = Instant::now();
        Self {
            start: now,
            last: now,
            frame_index: 0,
            max_dt,
        }
    }

    pub fn tick(&mut self) -> FrameTime {
        self.tick_at(Instant::now())
    }

    fn tick_at(&mut self, now: Instant) -> FrameTime {
        let dt = now.saturating_duration_since(self.last).min(self.max_dt);
        self.last = now;

        let ft = FrameTime {
            dt: dt.as_secs_f32(),
            elapsed: now.saturating_duration_since(self.start),
            frame_index: self.frame_index,
        };

        self.frame_index = self.frame_index.wrapping_add(1);
        ft
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_index_counts_from_zero() {
        let mut clock = FrameClock::new();
        let start = clock.start;

        assert_eq!(clock.tick_at(start).frame_index, 0);
        assert_eq!(clock.tick_at(start).frame_index, 1);
        assert_eq!(clock.tick_at(start).frame_index, 2);
    }

    #[test]
    fn dt_measures_time_between_ticks() {
        let mut clock = FrameClock::new();
        let start = clock.start;

        let ft = clock.tick_at(start + Duration::from_millis(16));
        assert!((ft.dt - 0.016).abs() < 1e-6);
        assert_eq!(ft.elapsed, Duration::from_millis(16));
    }

    #[test]
    fn dt_is_capped_after_a_stall() {
        let mut clock = FrameClock::with_max_dt(Duration::from_millis(100));
        let start = clock.start;

        let ft = clock.tick_at(start + Duration::from_secs(5));
        assert!((ft.dt - 0.1).abs() < 1e-6);
        assert_eq!(ft.elapsed, Duration::from_secs(5));
    }

    #[test]
    fn clock_going_backwards_yields_zero_dt() {
        let mut clock = FrameClock::new();
        let start = clock.start;

        clock.tick_at(start + Duration::from_millis(10));
        let ft = clock.tick_at(start);
        assert_eq!(ft.dt, 0.0);
    }
}
