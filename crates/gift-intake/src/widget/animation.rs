//! Fixed-duration transitions driven by explicit timestamps.
//!
//! Widgets never read the clock themselves: the host passes `now` to every
//! query, which keeps transitions deterministic under test.

use std::time::{Duration, Instant};

/// Easing curves applied to transition progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Easing {
    /// Linear interpolation (no easing).
    Linear,
    /// Quadratic ease-out (starts fast, decelerates).
    #[default]
    EaseOut,
    /// Quadratic ease-in-out (smooth start and end).
    EaseInOut,
}

/// Apply an easing curve to a progress value in `[0, 1]`.
#[inline]
pub fn ease(easing: Easing, t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    match easing {
        Easing::Linear => t,
        Easing::EaseOut => t * (2.0 - t),
        Easing::EaseInOut => {
            if t < 0.5 {
                2.0 * t * t
            } else {
                -1.0 + (4.0 - 2.0 * t) * t
            }
        }
    }
}

/// A one-shot transition of fixed duration.
///
/// Once started it cannot be retargeted; it either runs to completion or is
/// stopped outright.
#[derive(Debug, Clone)]
pub struct Transition {
    easing: Easing,
    duration: Duration,
    start_time: Option<Instant>,
}

impl Default for Transition {
    fn default() -> Self {
        Self::new(Duration::from_millis(300))
    }
}

impl Transition {
    /// Create a transition of the given duration.
    pub fn new(duration: Duration) -> Self {
        Self {
            easing: Easing::default(),
            duration,
            start_time: None,
        }
    }

    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    #[inline]
    pub fn duration(&self) -> Duration {
        self.duration
    }

    #[inline]
    pub fn easing(&self) -> Easing {
        self.easing
    }

    /// Start the transition at `now`, restarting it if already running.
    pub fn start_at(&mut self, now: Instant) {
        self.start_time = Some(now);
    }

    /// Stop the transition immediately.
    pub fn stop(&mut self) {
        self.start_time = None;
    }

    /// Whether the transition has been started and not stopped.
    #[inline]
    pub fn is_running(&self) -> bool {
        self.start_time.is_some()
    }

    /// Linear progress in `[0, 1]` at `now`, or `None` when not running.
    pub fn progress_at(&self, now: Instant) -> Option<f32> {
        let start = self.start_time?;
        if self.duration.is_zero() {
            return Some(1.0);
        }
        let elapsed = now.saturating_duration_since(start);
        Some((elapsed.as_secs_f32() / self.duration.as_secs_f32()).min(1.0))
    }

    /// Eased progress in `[0, 1]` at `now`, or `None` when not running.
    pub fn eased_progress_at(&self, now: Instant) -> Option<f32> {
        self.progress_at(now).map(|t| ease(self.easing, t))
    }

    /// Whether the full duration has elapsed at `now`.
    pub fn is_finished_at(&self, now: Instant) -> bool {
        self.start_time
            .is_some_and(|start| now.saturating_duration_since(start) >= self.duration)
    }
}
