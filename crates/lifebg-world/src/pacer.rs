//! Scroll-driven generation pacing.

use lifebg_core::DEFAULT_SCROLL_THRESHOLD_PX;

/// Turns scroll movement into generation ticks.
///
/// Absolute movement in either direction accumulates; once it reaches the
/// threshold one tick fires and the accumulator starts over from zero.
#[derive(Debug, Clone)]
pub struct ScrollPacer {
    threshold: f64,
    accumulated: f64,
    last_scroll_y: Option<f64>,
}

impl ScrollPacer {
    pub fn new(threshold: f64) -> Self {
        assert!(threshold > 0.0, "scroll threshold must be positive");
        Self {
            threshold,
            accumulated: 0.0,
            last_scroll_y: None,
        }
    }

    /// Feed the current scroll position; returns true when a generation is due.
    ///
    /// The first observation only records the starting position.
    pub fn observe_position(&mut self, scroll_y: f64) -> bool {
        let delta = match self.last_scroll_y.replace(scroll_y) {
            Some(last) => scroll_y - last,
            None => 0.0,
        };
        self.accumulate(delta)
    }

    /// Feed a raw scroll delta; returns true when a generation is due
    pub fn accumulate(&mut self, delta: f64) -> bool {
        self.accumulated += delta.abs();
        if self.accumulated >= self.threshold {
            self.accumulated = 0.0;
            true
        } else {
            false
        }
    }

    pub fn accumulated(&self) -> f64 {
        self.accumulated
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }
}

impl Default for ScrollPacer {
    fn default() -> Self {
        Self::new(DEFAULT_SCROLL_THRESHOLD_PX)
    }
}
