//! Growth clock
//!
//! Accumulates watered growth time. The clock only runs while the plant is
//! growing; idle and finished plants keep their elapsed time frozen.

/// Elapsed-time accumulator for a single plant
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GrowthClock {
    elapsed: f32,
}

impl GrowthClock {
    pub fn new(elapsed: f32) -> Self {
        Self {
            elapsed: sanitize(elapsed),
        }
    }

    /// Seconds of growth accumulated so far
    #[inline]
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Advance by `dt` seconds if `running`, returning the new elapsed time.
    ///
    /// Host deltas that are negative, zero or not finite are ignored.
    pub fn advance(&mut self, dt: f32, running: bool) -> f32 {
        if running && dt.is_finite() && dt > 0.0 {
            self.elapsed += dt;
        }
        self.elapsed
    }

    /// Jump the clock forward to at least `target` seconds (never backwards)
    pub fn skip_to(&mut self, target: f32) {
        let target = sanitize(target);
        if target > self.elapsed {
            self.elapsed = target;
        }
    }
}

/// Clamp to a finite, non-negative number of seconds
fn sanitize(seconds: f32) -> f32 {
    if seconds.is_finite() && seconds > 0.0 {
        seconds
    } else {
        0.0
    }
}
