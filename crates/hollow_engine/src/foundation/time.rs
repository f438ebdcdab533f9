//! Time management utilities

use std::time::Instant;

/// Splits a variable frame delta into a fixed number of bounded substeps.
///
/// The raw frame delta is clamped to `max_frame_delta` before division, so a
/// frame hitch of any length can never produce a substep longer than
/// `max_frame_delta / steps`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SubstepClock {
    max_frame_delta: f64,
    steps: u32,
}

impl SubstepClock {
    /// Create a new substep clock
    pub fn new(max_frame_delta: f64, steps: u32) -> Self {
        Self {
            max_frame_delta,
            steps: steps.max(1),
        }
    }

    /// Number of substeps run per frame
    pub fn steps(&self) -> u32 {
        self.steps
    }

    /// Upper bound of any substep delta
    pub fn max_substep_delta(&self) -> f64 {
        self.max_frame_delta / f64::from(self.steps)
    }

    /// Substep delta for a raw frame delta (negative or NaN deltas count as zero)
    pub fn substep_delta(&self, frame_delta: f64) -> f64 {
        let clamped = if frame_delta.is_nan() {
            0.0
        } else {
            frame_delta.clamp(0.0, self.max_frame_delta)
        };
        clamped / f64::from(self.steps)
    }
}

/// High-precision timer for frame timing
pub struct Timer {
    last_frame: Instant,
    delta_time: f64,
    total_time: f64,
    frame_count: u64,
}

impl Default for Timer {
    fn default() -> Self {
        Self::new()
    }
}

impl Timer {
    /// Create a new timer
    pub fn new() -> Self {
        Self {
            last_frame: Instant::now(),
            delta_time: 0.0,
            total_time: 0.0,
            frame_count: 0,
        }
    }

    /// Update the timer (should be called once per frame)
    pub fn update(&mut self) {
        let now = Instant::now();
        self.delta_time = now.duration_since(self.last_frame).as_secs_f64();
        self.total_time += self.delta_time;
        self.last_frame = now;
        self.frame_count += 1;
    }

    /// Get the time since the last frame in seconds
    pub fn delta_time(&self) -> f64 {
        self.delta_time
    }

    /// Get the total elapsed time since timer creation
    pub fn total_time(&self) -> f64 {
        self.total_time
    }

    /// Get the current frame count
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_substep_delta_divides_frame() {
        let clock = SubstepClock::new(0.05, 5);
        assert_relative_eq!(clock.substep_delta(1.0 / 60.0), 1.0 / 300.0, epsilon = 1e-15);
    }

    #[test]
    fn test_substep_delta_clamps_hitch() {
        let clock = SubstepClock::new(0.05, 5);
        // A ten second stall still yields a 10ms substep
        assert_relative_eq!(clock.substep_delta(10.0), 0.01, epsilon = 1e-15);
        assert!(clock.substep_delta(10.0) <= clock.max_substep_delta());
        assert_eq!(clock.substep_delta(-1.0), 0.0);
        assert_eq!(clock.substep_delta(f64::NAN), 0.0);
        assert_relative_eq!(clock.substep_delta(f64::INFINITY), 0.01, epsilon = 1e-15);
    }

    #[test]
    fn test_zero_steps_is_treated_as_one() {
        let clock = SubstepClock::new(0.05, 0);
        assert_eq!(clock.steps(), 1);
    }

    #[test]
    fn test_timer_counts_frames() {
        let mut timer = Timer::new();
        timer.update();
        timer.update();
        assert_eq!(timer.frame_count(), 2);
        assert!(timer.total_time() >= timer.delta_time());
    }
}
