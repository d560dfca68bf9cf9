//! Constant-velocity motion with axis-aligned reflection.

use glam::Vec3;

use super::particles::ParticleStore;

/// Advances particles by their velocities and reflects them off per-axis bounds.
#[derive(Debug, Clone, Copy)]
pub struct MotionIntegrator {
    /// Half-extent of the volume per axis. Axes may differ (e.g. a shallow z).
    bounds: Vec3,
}

impl MotionIntegrator {
    pub fn new(bounds: Vec3) -> Self {
        Self { bounds: bounds.abs() }
    }

    pub fn bounds(&self) -> Vec3 {
        self.bounds
    }

    /// Move every particle one step. An axis whose position ends up past its bound
    /// has its velocity negated for the next step; the position itself is kept,
    /// so a particle may sit outside the bound by up to one velocity step.
    pub fn advance(&self, store: &mut ParticleStore) {
        let (positions, velocities) = store.split_mut();
        for (pos, vel) in positions.iter_mut().zip(velocities.iter_mut()) {
            *pos += *vel;
            if pos.x.abs() > self.bounds.x {
                vel.x = -vel.x;
            }
            if pos.y.abs() > self.bounds.y {
                vel.y = -vel.y;
            }
            if pos.z.abs() > self.bounds.z {
                vel.z = -vel.z;
            }
        }
    }
}
