/// Elapsed simulation time, advanced once per rendered frame.
///
/// Elapsed time never decreases: negative or non-finite increments are dropped.
#[derive(Debug, Clone)]
pub struct FrameClock {
    elapsed: f64,
    time_scale: f64,
    paused: bool,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::with_time_scale(1.0)
    }

    pub fn with_time_scale(time_scale: f64) -> Self {
        FrameClock {
            elapsed: 0.0,
            time_scale: sanitize_scale(time_scale),
            paused: false,
        }
    }

    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    pub fn time_scale(&self) -> f64 {
        self.time_scale
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn advance(&mut self, dt: f64) {
        if self.paused || !dt.is_finite() || dt <= 0.0 {
            return;
        }
        self.elapsed += dt * self.time_scale;
    }

    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    pub fn speed_up(&mut self) {
        self.time_scale *= 2.0;
    }

    pub fn slow_down(&mut self) {
        self.time_scale /= 2.0;
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

fn sanitize_scale(time_scale: f64) -> f64 {
    if time_scale.is_finite() && time_scale > 0.0 {
        time_scale
    } else {
        tracing::warn!("Ignoring invalid time scale {}, using 1", time_scale);
        1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advance() {
        let mut clock = FrameClock::new();
        clock.advance(0.5);
        clock.advance(0.25);
        approx::assert_relative_eq!(clock.elapsed(), 0.75);
    }

    #[test]
    fn test_monotonic() {
        let mut clock = FrameClock::new();
        clock.advance(1.0);
        clock.advance(-0.5);
        clock.advance(f64::NAN);
        clock.advance(f64::INFINITY);
        approx::assert_relative_eq!(clock.elapsed(), 1.0);
    }

    #[test]
    fn test_pause_and_scale() {
        let mut clock = FrameClock::with_time_scale(2.0);
        clock.advance(1.0);
        approx::assert_relative_eq!(clock.elapsed(), 2.0);

        clock.toggle_pause();
        clock.advance(1.0);
        approx::assert_relative_eq!(clock.elapsed(), 2.0);

        clock.toggle_pause();
        clock.speed_up();
        clock.advance(1.0);
        approx::assert_relative_eq!(clock.elapsed(), 6.0);

        clock.slow_down();
        clock.slow_down();
        approx::assert_relative_eq!(clock.time_scale(), 1.0);
    }

    #[test]
    fn test_bad_time_scale_replaced() {
        assert_eq!(FrameClock::with_time_scale(-3.0).time_scale(), 1.0);
        assert_eq!(FrameClock::with_time_scale(0.0).time_scale(), 1.0);
    }
}
