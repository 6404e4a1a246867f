use std::time::{Duration, Instant};

/// Frame timing snapshot.
#[derive(Debug, Copy, Clone)]
pub struct FrameTime {
    /// Time elapsed since the previous tick, in seconds, after clamping.
    pub dt: f32,

    /// Sum of clamped deltas since the clock was created. This is the
    /// simulation time fed to the scalar field, so it keeps advancing
    /// smoothly across stalls instead of jumping.
    pub elapsed: f32,

    /// Monotonic timestamp taken at the tick.
    pub now: Instant,
}

/// Frame clock producing `FrameTime` snapshots.
///
/// Delta time is clamped to avoid pathological values when the application is
/// paused by the debugger, minimized, or stalls. Without the clamp a long
/// stall would make the animated field jump and would drain the resolution
/// debounce in a single frame.
#[derive(Debug, Clone)]
pub struct FrameClock {
    last: Instant,
    elapsed: f32,
    dt_min: Duration,
    dt_max: Duration,
}

impl FrameClock {
    /// Creates a new clock with default clamps.
    ///
    /// Clamp rationale:
    /// - minimum prevents zero-dt behavior from tight loops on some platforms
    /// - maximum prevents simulation jumps after long stalls
    pub fn new() -> Self {
        Self {
            last: Instant::now(),
            elapsed: 0.0,
            dt_min: Duration::from_micros(100),  // 0.0001s
            dt_max: Duration::from_millis(250),  // 0.25s
        }
    }

    /// Creates a clock with custom delta-time clamps.
    pub fn with_clamps(dt_min: Duration, dt_max: Duration) -> Self {
        debug_assert!(dt_min <= dt_max);
        Self {
            last: Instant::now(),
            elapsed: 0.0,
            dt_min,
            dt_max,
        }
    }

    /// Resets the baseline without disturbing accumulated simulation time.
    ///
    /// Useful after surface reconfigure events or when resuming from
    /// suspension.
    pub fn reset(&mut self) {
        self.last = Instant::now();
    }

    /// Advances the clock and returns a new `FrameTime`.
    pub fn tick(&mut self) -> FrameTime {
        let now = Instant::now();
        let mut dt = now.saturating_duration_since(self.last);

        if dt < self.dt_min {
            dt = self.dt_min;
        } else if dt > self.dt_max {
            dt = self.dt_max;
        }

        self.last = now;
        self.elapsed += dt.as_secs_f32();

        FrameTime {
            dt: dt.as_secs_f32(),
            elapsed: self.elapsed,
            now,
        }
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
    fn dt_respects_clamps() {
        let mut clock = FrameClock::with_clamps(
            Duration::from_millis(5),
            Duration::from_millis(10),
        );
        let ft = clock.tick();
        assert!(ft.dt >= 0.005);
        assert!(ft.dt <= 0.010);
    }

    #[test]
    fn elapsed_accumulates_clamped_deltas() {
        let mut clock = FrameClock::with_clamps(
            Duration::from_millis(10),
            Duration::from_millis(10),
        );
        clock.tick();
        let ft = clock.tick();
        assert!((ft.elapsed - 0.020).abs() < 1e-6);
    }

    #[test]
    fn reset_keeps_elapsed() {
        let mut clock = FrameClock::with_clamps(
            Duration::from_millis(1),
            Duration::from_millis(1),
        );
        clock.tick();
        let before = clock.tick().elapsed;
        clock.reset();
        assert!(clock.tick().elapsed > before);
    }
}
