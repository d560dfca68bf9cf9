use glam::Vec3;

use super::rng::Rng;

/// Per-particle position and velocity arrays.
/// A particle's identity is its index; both arrays always have the same length.
pub struct ParticleStore {
    positions: Vec<Vec3>,
    velocities: Vec<Vec3>,
}

impl ParticleStore {
    /// Spawn `count` particles with positions uniform in `±position_bounds`
    /// and velocities uniform in `±velocity_bounds`, per axis.
    pub fn new(count: usize, position_bounds: Vec3, velocity_bounds: Vec3, rng: &mut Rng) -> Self {
        let mut positions = Vec::with_capacity(count);
        let mut velocities = Vec::with_capacity(count);
        for _ in 0..count {
            positions.push(Vec3::new(
                rng.symmetric(position_bounds.x),
                rng.symmetric(position_bounds.y),
                rng.symmetric(position_bounds.z),
            ));
            velocities.push(Vec3::new(
                rng.symmetric(velocity_bounds.x),
                rng.symmetric(velocity_bounds.y),
                rng.symmetric(velocity_bounds.z),
            ));
        }
        Self { positions, velocities }
    }

    /// Build a store from explicit positions and velocities.
    /// The shorter of the two inputs decides the particle count.
    pub fn from_parts(mut positions: Vec<Vec3>, mut velocities: Vec<Vec3>) -> Self {
        let len = positions.len().min(velocities.len());
        positions.truncate(len);
        velocities.truncate(len);
        Self { positions, velocities }
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    pub fn velocities(&self) -> &[Vec3] {
        &self.velocities
    }

    pub fn positions_mut(&mut self) -> &mut [Vec3] {
        &mut self.positions
    }

    pub fn velocities_mut(&mut self) -> &mut [Vec3] {
        &mut self.velocities
    }

    /// Both arrays at once, for in-place integration.
    pub fn split_mut(&mut self) -> (&mut [Vec3], &mut [Vec3]) {
        (&mut self.positions, &mut self.velocities)
    }

    /// Drop both arrays and their allocations.
    pub fn release(&mut self) {
        self.positions = Vec::new();
        self.velocities = Vec::new();
    }
}
