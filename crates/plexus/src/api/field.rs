use glam::Vec3;

use crate::api::config::FieldConfig;
use crate::core::integrator::MotionIntegrator;
use crate::core::particles::ParticleStore;
use crate::core::rng::Rng;
use crate::renderer::traits::FrameSink;
use crate::systems::compose::{Frame, FrameComposer};
use crate::systems::connectivity::{ConnectivityBuilder, EdgeBuffer};

/// Lifecycle of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldState {
    Ticking,
    Disposed,
}

/// The animated point cloud and its proximity graph.
///
/// Owns every buffer it touches. A tick runs integrate, rebuild and compose
/// back to back; the returned `Frame` borrows the field, so nothing can
/// mutate the buffers while a renderer is reading them.
pub struct Field {
    store: ParticleStore,
    integrator: MotionIntegrator,
    builder: ConnectivityBuilder,
    composer: FrameComposer,
    state: FieldState,
    frame_count: u64,
}

impl Field {
    pub fn new(config: &FieldConfig) -> Self {
        let mut rng = Rng::new(config.seed_or_default());
        let position_bounds = Vec3::from_array(config.position_bounds).abs();
        let velocity_bounds = Vec3::from_array(config.velocity_bounds).abs();
        let store = ParticleStore::new(config.particle_count, position_bounds, velocity_bounds, &mut rng);
        Self::with_store(store, config)
    }

    /// Build a field around an existing particle store.
    /// Positions and velocities are used as given; only the bounds come from `config`.
    pub fn with_store(store: ParticleStore, config: &FieldConfig) -> Self {
        let count = store.len();
        let cap = config.edge_cap_for(count);
        let builder = ConnectivityBuilder::new(
            count,
            config.link_distance,
            cap,
            config.near_color,
            config.far_color,
        );

        if count == 0 {
            log::warn!("field created with no particles; every frame will be empty");
        }
        if !config.link_distance.is_finite() || config.link_distance <= 0.0 {
            log::warn!("link distance {} is not positive; no edges will be drawn", config.link_distance);
        }
        if cap == 0 && count > 1 {
            log::warn!("edge cap is zero; no edges will be drawn");
        }
        log::info!(
            "field: {} particles, edge cap {}, {} pair slots",
            count,
            cap,
            builder.buffer().capacity()
        );

        Self {
            store,
            integrator: MotionIntegrator::new(Vec3::from_array(config.position_bounds)),
            builder,
            composer: FrameComposer::new(config.rotation_rate, config.points, config.lines),
            state: FieldState::Ticking,
            frame_count: 0,
        }
    }

    /// Advance one step and compose the frame for `elapsed` seconds of host time.
    /// Returns `None` once the field has been disposed.
    pub fn tick(&mut self, elapsed: f32) -> Option<Frame<'_>> {
        if self.state == FieldState::Disposed {
            log::warn!("tick after dispose ignored");
            return None;
        }
        self.integrator.advance(&mut self.store);
        self.builder.rebuild(self.store.positions());
        self.frame_count += 1;
        Some(self.composer.compose(
            elapsed,
            self.store.positions(),
            self.builder.buffer(),
            self.frame_count,
        ))
    }

    /// Tick and hand the frame to `sink`. Returns false if disposed.
    pub fn tick_into<S: FrameSink>(&mut self, elapsed: f32, sink: &mut S) -> bool {
        match self.tick(elapsed) {
            Some(frame) => {
                sink.submit(&frame);
                true
            }
            None => false,
        }
    }

    /// Release all buffers. Later ticks are ignored. Safe to call twice.
    pub fn dispose(&mut self) {
        if self.state == FieldState::Disposed {
            return;
        }
        self.store.release();
        self.builder.release();
        self.state = FieldState::Disposed;
        log::info!("field disposed after {} frames", self.frame_count);
    }

    pub fn state(&self) -> FieldState {
        self.state
    }

    pub fn is_disposed(&self) -> bool {
        self.state == FieldState::Disposed
    }

    pub fn particle_count(&self) -> usize {
        self.store.len()
    }

    /// Edges emitted by the latest tick.
    pub fn edge_count(&self) -> usize {
        self.builder.buffer().len()
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    pub fn store(&self) -> &ParticleStore {
        &self.store
    }

    pub fn edges(&self) -> &EdgeBuffer {
        self.builder.buffer()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::traits::CountingSink;
    use crate::renderer::vertex::EdgeVertex;

    fn still(positions: Vec<Vec3>) -> ParticleStore {
        let velocities = vec![Vec3::ZERO; positions.len()];
        ParticleStore::from_parts(positions, velocities)
    }

    #[test]
    fn default_field_ticks() {
        let mut field = Field::new(&FieldConfig::default());
        assert_eq!(field.particle_count(), 120);
        let frame = field.tick(1.0 / 60.0).unwrap();
        assert_eq!(frame.points.len(), 120);
        assert!(frame.edge_count <= 12 * 120);
        assert_eq!(field.frame_count(), 1);
    }

    #[test]
    fn two_particles_one_unit_apart() {
        let store = still(vec![Vec3::ZERO, Vec3::new(1.0, 0.0, 0.0)]);
        let mut field = Field::with_store(store, &FieldConfig::default());
        let frame = field.tick(0.0).unwrap();
        assert_eq!(frame.edge_count, 1);
        let live = frame.live_edges();
        // alpha 0.6 on the blue channel of both endpoints
        assert!((live[0].b - 0.6).abs() < 1e-6);
        assert!((live[1].b - 0.6).abs() < 1e-6);
    }

    #[test]
    fn two_particles_three_units_apart() {
        let store = still(vec![Vec3::ZERO, Vec3::new(3.0, 0.0, 0.0)]);
        let mut field = Field::with_store(store, &FieldConfig::default());
        assert_eq!(field.tick(0.0).unwrap().edge_count, 0);
    }

    #[test]
    fn non_finite_link_distance_draws_nothing() {
        for link_distance in [f32::NAN, f32::INFINITY, -1.0, 0.0] {
            let config = FieldConfig {
                link_distance,
                ..FieldConfig::default()
            };
            let store = still(vec![Vec3::ZERO, Vec3::new(0.1, 0.0, 0.0)]);
            let mut field = Field::with_store(store, &config);
            assert_eq!(field.tick(0.0).unwrap().edge_count, 0, "link distance {}", link_distance);
        }
    }

    #[test]
    fn empty_field_outputs_nothing() {
        let config = FieldConfig {
            particle_count: 0,
            ..FieldConfig::default()
        };
        let mut field = Field::new(&config);
        let frame = field.tick(5.0).unwrap();
        assert!(frame.points.is_empty());
        assert_eq!(frame.edge_count, 0);
        assert!(frame.edges.iter().all(|v| *v == EdgeVertex::ZERO));
    }

    #[test]
    fn cap_of_one_with_three_close_particles() {
        let store = still(vec![
            Vec3::ZERO,
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
        ]);
        let config = FieldConfig {
            max_edges: Some(1),
            ..FieldConfig::default()
        };
        let mut field = Field::with_store(store, &config);
        let frame = field.tick(0.0).unwrap();
        assert_eq!(frame.edge_count, 1);
        assert_eq!(frame.live_edges()[1].position(), Vec3::new(1.0, 0.0, 0.0));
        assert!(frame.edges[2..].iter().all(|v| *v == EdgeVertex::ZERO));
    }

    #[test]
    fn tick_moves_particles() {
        let store = ParticleStore::from_parts(vec![Vec3::ZERO], vec![Vec3::new(0.25, 0.0, 0.0)]);
        let mut field = Field::with_store(store, &FieldConfig::default());
        field.tick(0.0);
        field.tick(0.0);
        assert_eq!(field.store().positions()[0], Vec3::new(0.5, 0.0, 0.0));
    }

    #[test]
    fn same_seed_same_frames() {
        let mut a = Field::new(&FieldConfig::default());
        let mut b = Field::new(&FieldConfig::default());
        for step in 0..10 {
            let t = step as f32 / 60.0;
            a.tick(t);
            b.tick(t);
        }
        assert_eq!(a.store().positions(), b.store().positions());
        assert_eq!(a.edges().vertices(), b.edges().vertices());
    }

    #[test]
    fn tick_into_feeds_sink() {
        let mut field = Field::new(&FieldConfig::default());
        let mut sink = CountingSink::default();
        assert!(field.tick_into(50.0, &mut sink));
        assert_eq!(sink.frames, 1);
        assert_eq!(sink.last_point_count, 120);
        assert_eq!(sink.last_edge_count, field.edge_count());
        assert!((sink.last_angle - 1.0).abs() < 1e-6);
    }

    #[test]
    fn dispose_stops_ticks_and_releases() {
        let mut field = Field::new(&FieldConfig::default());
        field.tick(0.0);
        field.dispose();
        assert!(field.is_disposed());
        assert_eq!(field.particle_count(), 0);
        assert_eq!(field.edges().capacity(), 0);
        assert!(field.tick(1.0).is_none());

        let mut sink = CountingSink::default();
        assert!(!field.tick_into(1.0, &mut sink));
        assert_eq!(sink.frames, 0);

        field.dispose();
        assert_eq!(field.state(), FieldState::Disposed);
    }
}
