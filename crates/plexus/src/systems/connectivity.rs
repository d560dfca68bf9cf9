//! Proximity graph: links every particle pair closer than a threshold.
//!
//! The edge buffer is allocated once for the worst case (every pair linked) and
//! rewritten in place each tick. Only a prefix is live; everything after it is
//! kept at zero so the renderer can never draw an edge left over from an
//! earlier tick.

use glam::Vec3;

use crate::api::config::pair_count;
use crate::api::types::Rgb;
use crate::renderer::vertex::{EdgeVertex, VERTICES_PER_EDGE};

/// Fade factor for an edge of length `distance`: 1 at zero, 0 at the threshold.
#[inline]
pub fn fade(distance: f32, threshold: f32) -> f32 {
    1.0 - distance / threshold
}

/// Preallocated edge storage with a high-water mark.
pub struct EdgeBuffer {
    /// Two vertices per edge slot.
    vertices: Vec<EdgeVertex>,
    /// Edges written by the most recent rebuild.
    len: usize,
}

impl EdgeBuffer {
    /// Allocate room for `capacity` edges, all zeroed.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            vertices: vec![EdgeVertex::ZERO; capacity * VERTICES_PER_EDGE],
            len: 0,
        }
    }

    /// Number of edge slots.
    pub fn capacity(&self) -> usize {
        self.vertices.len() / VERTICES_PER_EDGE
    }

    /// Number of live edges.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Live edge vertices (2 per edge).
    pub fn live(&self) -> &[EdgeVertex] {
        &self.vertices[..self.len * VERTICES_PER_EDGE]
    }

    /// The whole buffer, live prefix followed by the zeroed tail.
    pub fn vertices(&self) -> &[EdgeVertex] {
        &self.vertices
    }

    /// Endpoints of edge `index`, if live.
    pub fn edge(&self, index: usize) -> Option<(EdgeVertex, EdgeVertex)> {
        if index >= self.len {
            return None;
        }
        let base = index * VERTICES_PER_EDGE;
        Some((self.vertices[base], self.vertices[base + 1]))
    }

    #[inline]
    fn write(&mut self, slot: usize, a: EdgeVertex, b: EdgeVertex) {
        let base = slot * VERTICES_PER_EDGE;
        self.vertices[base] = a;
        self.vertices[base + 1] = b;
    }

    /// Set the live count to `len` and zero the slots the previous tick used beyond it.
    fn finish(&mut self, len: usize) {
        let prev = self.len;
        if prev > len {
            self.vertices[len * VERTICES_PER_EDGE..prev * VERTICES_PER_EDGE].fill(EdgeVertex::ZERO);
        }
        self.len = len;
    }

    /// Drop the allocation.
    pub fn release(&mut self) {
        self.vertices = Vec::new();
        self.len = 0;
    }
}

/// Rebuilds the edge set from current particle positions.
pub struct ConnectivityBuilder {
    threshold: f32,
    cap: usize,
    near_color: Rgb,
    far_color: Rgb,
    buffer: EdgeBuffer,
}

impl ConnectivityBuilder {
    /// `particle_count` sizes the buffer for all N(N-1)/2 pairs.
    /// `cap` bounds the edges emitted per tick.
    pub fn new(particle_count: usize, threshold: f32, cap: usize, near_color: Rgb, far_color: Rgb) -> Self {
        Self {
            threshold,
            cap,
            near_color,
            far_color,
            buffer: EdgeBuffer::with_capacity(pair_count(particle_count)),
        }
    }

    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    /// The configured cap, before clamping to the buffer capacity.
    pub fn cap(&self) -> usize {
        self.cap
    }

    pub fn buffer(&self) -> &EdgeBuffer {
        &self.buffer
    }

    /// Scan every pair `i < j` in ascending order and emit an edge for each pair
    /// closer than the threshold, until the cap is reached. Pairs after that are
    /// dropped for this tick. Returns the number of edges emitted.
    pub fn rebuild(&mut self, positions: &[Vec3]) -> usize {
        let limit = self.cap.min(self.buffer.capacity());
        let threshold = self.threshold;
        let mut emitted = 0;

        if threshold.is_finite() && threshold > 0.0 && limit > 0 {
            let threshold_sq = threshold * threshold;
            let n = positions.len();
            'scan: for i in 0..n {
                let pi = positions[i];
                for j in (i + 1)..n {
                    let pj = positions[j];
                    let dist_sq = pi.distance_squared(pj);
                    if dist_sq >= threshold_sq {
                        continue;
                    }
                    let dist = dist_sq.sqrt();
                    if dist >= threshold {
                        continue;
                    }
                    if emitted == limit {
                        log::debug!(
                            "edge cap {} reached at pair ({}, {}); remaining pairs skipped",
                            limit, i, j
                        );
                        break 'scan;
                    }
                    let alpha = fade(dist, threshold);
                    self.buffer.write(
                        emitted,
                        EdgeVertex::new(pi, self.near_color.scaled(alpha)),
                        EdgeVertex::new(pj, self.far_color.scaled(alpha)),
                    );
                    emitted += 1;
                }
            }
        }

        self.buffer.finish(emitted);
        emitted
    }

    /// Drop the edge buffer allocation.
    pub fn release(&mut self) {
        self.buffer.release();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CYAN: Rgb = Rgb::new(0.0, 0.94, 1.0);
    const PURPLE: Rgb = Rgb::new(0.44, 0.0, 1.0);

    fn builder(n: usize, threshold: f32, cap: usize) -> ConnectivityBuilder {
        ConnectivityBuilder::new(n, threshold, cap, CYAN, PURPLE)
    }

    fn tail_is_zero(buffer: &EdgeBuffer) -> bool {
        buffer.vertices()[buffer.len() * VERTICES_PER_EDGE..]
            .iter()
            .all(|v| *v == EdgeVertex::ZERO)
    }

    #[test]
    fn pair_within_threshold_emits_one_edge() {
        let mut b = builder(2, 2.5, 24);
        let positions = [Vec3::ZERO, Vec3::new(1.0, 0.0, 0.0)];
        assert_eq!(b.rebuild(&positions), 1);

        let (a, z) = b.buffer().edge(0).unwrap();
        assert_eq!(a.position(), positions[0]);
        assert_eq!(z.position(), positions[1]);
        // alpha = 1 - 1/2.5 = 0.6
        assert!((a.g - 0.94 * 0.6).abs() < 1e-6);
        assert!((a.b - 0.6).abs() < 1e-6);
        assert!((z.r - 0.44 * 0.6).abs() < 1e-6);
        assert!((z.b - 0.6).abs() < 1e-6);
    }

    #[test]
    fn pair_beyond_threshold_emits_nothing() {
        let mut b = builder(2, 2.5, 24);
        assert_eq!(b.rebuild(&[Vec3::ZERO, Vec3::new(3.0, 0.0, 0.0)]), 0);
        assert!(b.buffer().is_empty());
        assert!(tail_is_zero(b.buffer()));
    }

    #[test]
    fn pair_exactly_at_threshold_is_not_linked() {
        let mut b = builder(2, 2.5, 24);
        assert_eq!(b.rebuild(&[Vec3::ZERO, Vec3::new(0.0, 2.5, 0.0)]), 0);
    }

    #[test]
    fn no_particles_no_edges() {
        let mut b = builder(0, 2.5, 0);
        assert_eq!(b.rebuild(&[]), 0);
        assert_eq!(b.buffer().capacity(), 0);
        assert!(b.buffer().vertices().is_empty());
    }

    #[test]
    fn single_particle_no_edges() {
        let mut b = builder(1, 2.5, 12);
        assert_eq!(b.rebuild(&[Vec3::ZERO]), 0);
    }

    #[test]
    fn degenerate_threshold_no_edges() {
        let positions = [Vec3::ZERO, Vec3::ZERO, Vec3::ZERO];
        for threshold in [0.0, -1.0, f32::NAN, f32::INFINITY] {
            let mut b = builder(3, threshold, 36);
            assert_eq!(b.rebuild(&positions), 0);
            assert!(tail_is_zero(b.buffer()));
        }
    }

    #[test]
    fn coincident_particles_have_full_alpha() {
        let mut b = builder(2, 2.5, 24);
        b.rebuild(&[Vec3::ONE, Vec3::ONE]);
        let (a, z) = b.buffer().edge(0).unwrap();
        assert_eq!(a.color(), CYAN);
        assert_eq!(z.color(), PURPLE);
    }

    #[test]
    fn cap_keeps_first_pair_in_scan_order() {
        let mut b = builder(3, 2.5, 1);
        let positions = [
            Vec3::ZERO,
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
        ];
        assert_eq!(b.rebuild(&positions), 1);
        let (a, z) = b.buffer().edge(0).unwrap();
        assert_eq!(a.position(), positions[0]);
        assert_eq!(z.position(), positions[1]);
        assert!(b.buffer().edge(1).is_none());
        assert!(tail_is_zero(b.buffer()));
    }

    #[test]
    fn edges_follow_ascending_pair_order() {
        let mut b = builder(4, 10.0, 48);
        let positions = [
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(2.0, 0.0, 0.0),
            Vec3::new(3.0, 0.0, 0.0),
        ];
        assert_eq!(b.rebuild(&positions), 6);
        let expected = [(0, 1), (0, 2), (0, 3), (1, 2), (1, 3), (2, 3)];
        for (k, (i, j)) in expected.iter().enumerate() {
            let (a, z) = b.buffer().edge(k).unwrap();
            assert_eq!(a.position(), positions[*i]);
            assert_eq!(z.position(), positions[*j]);
        }
    }

    #[test]
    fn emits_exactly_the_close_pairs() {
        let positions = [
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(2.0, 0.0, 0.0),
            Vec3::new(4.0, 0.0, 0.0),
            Vec3::new(0.0, 0.0, 2.4),
            Vec3::new(-5.0, 5.0, 0.0),
        ];
        let threshold = 2.5;
        let mut b = builder(positions.len(), threshold, 1000);
        let count = b.rebuild(&positions);

        let mut expected = Vec::new();
        for i in 0..positions.len() {
            for j in (i + 1)..positions.len() {
                if positions[i].distance(positions[j]) < threshold {
                    expected.push((positions[i], positions[j]));
                }
            }
        }
        assert_eq!(count, expected.len());
        for (k, (pi, pj)) in expected.iter().enumerate() {
            let (a, z) = b.buffer().edge(k).unwrap();
            assert_eq!(a.position(), *pi);
            assert_eq!(z.position(), *pj);
        }
    }

    #[test]
    fn shrinking_connectivity_zeroes_stale_edges() {
        let mut b = builder(3, 2.5, 36);
        let close = [Vec3::ZERO, Vec3::new(0.5, 0.0, 0.0), Vec3::new(0.0, 0.5, 0.0)];
        assert_eq!(b.rebuild(&close), 3);

        let apart = [Vec3::ZERO, Vec3::new(0.5, 0.0, 0.0), Vec3::new(0.0, 9.0, 0.0)];
        assert_eq!(b.rebuild(&apart), 1);
        assert!(tail_is_zero(b.buffer()));

        let far = [Vec3::ZERO, Vec3::new(5.0, 0.0, 0.0), Vec3::new(0.0, 9.0, 0.0)];
        assert_eq!(b.rebuild(&far), 0);
        assert!(b.buffer().vertices().iter().all(|v| *v == EdgeVertex::ZERO));
    }

    #[test]
    fn cap_is_clamped_to_pair_capacity() {
        let mut b = builder(3, 2.5, 1000);
        assert_eq!(b.buffer().capacity(), 3);
        assert_eq!(b.rebuild(&[Vec3::ZERO; 3]), 3);
    }

    #[test]
    fn fade_is_decreasing_in_distance() {
        let threshold = 2.5;
        assert_eq!(fade(0.0, threshold), 1.0);
        assert_eq!(fade(threshold, threshold), 0.0);
        let mut prev = fade(0.0, threshold);
        for step in 1..=100 {
            let d = threshold * step as f32 / 100.0;
            let a = fade(d, threshold);
            assert!(a < prev, "fade not decreasing at {}", d);
            prev = a;
        }
    }

    #[test]
    fn release_drops_buffer() {
        let mut b = builder(10, 2.5, 120);
        b.release();
        assert_eq!(b.buffer().capacity(), 0);
        assert_eq!(b.rebuild(&[]), 0);
    }
}
