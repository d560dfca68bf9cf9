//! Seam between the field and whatever draws it.
//!
//! In the browser the drawing happens in JS (WebGL/WebGPU), fed by the flat
//! buffer from `bridge::protocol`. Native backends implement the same trait.

use crate::systems::compose::Frame;

/// Consumer of composed frames.
///
/// `submit` is called once per tick, after the tick has finished mutating the
/// particle store and edge buffer. The frame only borrows those buffers, so a
/// sink that needs the data past the call must copy it.
pub trait FrameSink {
    fn submit(&mut self, frame: &Frame<'_>);
}

/// Sink that keeps counters only. Handy for headless runs and tests.
#[derive(Debug, Default, Clone, Copy)]
pub struct CountingSink {
    pub frames: u64,
    pub last_edge_count: usize,
    pub last_point_count: usize,
    pub last_angle: f32,
}

impl FrameSink for CountingSink {
    fn submit(&mut self, frame: &Frame<'_>) {
        self.frames += 1;
        self.last_edge_count = frame.edge_count;
        self.last_point_count = frame.points.len();
        self.last_angle = frame.angle;
    }
}
