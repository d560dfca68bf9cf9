/// Elapsed-time clock owned by the host loop.
/// The field never reads it directly; the host passes `elapsed()` into each tick.
pub struct SimClock {
    /// Seconds accumulated from frame deltas.
    elapsed: f32,
}

impl SimClock {
    pub fn new() -> Self {
        Self { elapsed: 0.0 }
    }

    /// Add a frame delta and return the new elapsed time.
    /// Negative or non-finite deltas are ignored so elapsed time never goes backwards.
    pub fn advance(&mut self, frame_dt: f32) -> f32 {
        if frame_dt.is_finite() && frame_dt > 0.0 {
            self.elapsed += frame_dt;
        }
        self.elapsed
    }

    /// Total elapsed seconds.
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn reset(&mut self) {
        self.elapsed = 0.0;
    }
}

impl Default for SimClock {
    fn default() -> Self {
        Self::new()
    }
}
