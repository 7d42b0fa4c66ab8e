use std::time::Instant;

/// Monotonic elapsed-time source for the animation.
///
/// Wall-clock deltas are scaled by the current speed and dropped entirely
/// while paused, so `elapsed` never decreases. The total is kept in `f64`
/// so a days-long session still advances by the real frame delta.
pub struct FrameClock {
    elapsed: f64,
    last: Instant,
}

impl FrameClock {
    pub fn new() -> Self {
        Self {
            elapsed: 0.0,
            last: Instant::now(),
        }
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed as f32
    }

    pub fn elapsed_secs(&self) -> f64 {
        self.elapsed
    }

    /// Sample the wall clock and advance by the scaled delta.
    pub fn tick(&mut self, scale: f32, paused: bool) -> f32 {
        let now = Instant::now();
        let dt = now.duration_since(self.last).as_secs_f32();
        self.last = now;
        self.advance(dt, scale, paused)
    }

    /// Advance by an explicit delta.
    pub fn advance(&mut self, dt: f32, scale: f32, paused: bool) -> f32 {
        if !paused {
            let step = dt * scale;
            if step.is_finite() && step > 0.0 {
                self.elapsed += f64::from(step);
            }
        }
        self.elapsed()
    }

    pub fn reset(&mut self) {
        self.elapsed = 0.0;
        self.last = Instant::now();
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
    fn scales_deltas() {
        let mut clock = FrameClock::new();
        clock.advance(0.5, 2.0, false);
        assert!((clock.elapsed() - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn paused_clock_holds() {
        let mut clock = FrameClock::new();
        clock.advance(1.0, 1.0, false);
        clock.advance(5.0, 1.0, true);
        assert!((clock.elapsed() - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn never_runs_backwards() {
        let mut clock = FrameClock::new();
        clock.advance(1.0, 1.0, false);
        clock.advance(1.0, -3.0, false);
        clock.advance(f32::NAN, 1.0, false);
        assert!((clock.elapsed() - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn long_sessions_keep_frame_resolution() {
        let mut clock = FrameClock::new();
        clock.advance(600_000.0, 1.0, false);
        for _ in 0..100 {
            clock.advance(0.033, 1.0, false);
        }
        assert!((clock.elapsed_secs() - 600_003.3).abs() < 1e-3);
        assert!((clock.elapsed() - 600_003.3).abs() < 0.07);
    }

    #[test]
    fn reset_returns_to_zero() {
        let mut clock = FrameClock::new();
        clock.advance(3.0, 1.0, false);
        clock.reset();
        assert_eq!(clock.elapsed(), 0.0);
    }
}
