use serde::{Deserialize, Serialize};

use crate::api::types::Rgb;

/// Configuration for a field, provided by the host at construction.
/// Every field has a default, so partial JSON is accepted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldConfig {
    /// Number of particles (default: 120).
    pub particle_count: usize,
    /// Half-extent of the volume per axis (x, y, z).
    /// Particles spawn inside and reflect off these bounds.
    pub position_bounds: [f32; 3],
    /// Half-range of the initial per-axis velocity.
    pub velocity_bounds: [f32; 3],
    /// Pairs closer than this are linked by an edge.
    pub link_distance: f32,
    /// Edge cap expressed per particle (cap = this × particle_count).
    pub max_edges_per_particle: usize,
    /// Absolute edge cap. Overrides `max_edges_per_particle` when set.
    pub max_edges: Option<usize>,
    /// Color of the lower-indexed endpoint of every edge.
    pub near_color: Rgb,
    /// Color of the higher-indexed endpoint of every edge.
    pub far_color: Rgb,
    /// Radians of rotation about the vertical axis per unit of elapsed time.
    pub rotation_rate: f32,
    /// Seed for initial positions and velocities.
    /// `None` lets the host pick one (the web bridge uses a random seed).
    pub seed: Option<u64>,
    pub points: PointStyle,
    pub lines: LineStyle,
    pub camera: CameraConfig,
    /// Upper clamp for the device pixel ratio (lower clamp is 1).
    pub max_pixel_ratio: f32,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            particle_count: 120,
            position_bounds: [10.0, 10.0, 5.0],
            velocity_bounds: [0.005, 0.005, 0.0025],
            link_distance: 2.5,
            max_edges_per_particle: 12,
            max_edges: None,
            near_color: Rgb::new(0.0, 0.94, 1.0),
            far_color: Rgb::new(0.44, 0.0, 1.0),
            rotation_rate: 0.02,
            seed: None,
            points: PointStyle::default(),
            lines: LineStyle::default(),
            camera: CameraConfig::default(),
            max_pixel_ratio: 1.5,
        }
    }
}

/// Seed used when neither the config nor the host provides one.
pub const DEFAULT_SEED: u64 = 42;

impl FieldConfig {
    /// Parse a config from a JSON string. Missing keys keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// The configured seed, or `DEFAULT_SEED`.
    pub fn seed_or_default(&self) -> u64 {
        self.seed.unwrap_or(DEFAULT_SEED)
    }

    /// Maximum number of edges emitted per tick.
    pub fn edge_cap(&self) -> usize {
        self.edge_cap_for(self.particle_count)
    }

    /// Edge cap for a store of `count` particles.
    pub fn edge_cap_for(&self, count: usize) -> usize {
        self.max_edges
            .unwrap_or(self.max_edges_per_particle.saturating_mul(count))
    }

    /// Number of unordered pairs, N(N-1)/2. This is the edge buffer size.
    pub fn pair_capacity(&self) -> usize {
        pair_count(self.particle_count)
    }

    /// Clamp a device pixel ratio into [1, max_pixel_ratio].
    pub fn clamp_pixel_ratio(&self, dpr: f32) -> f32 {
        let max = self.max_pixel_ratio.max(1.0);
        if dpr.is_finite() {
            dpr.clamp(1.0, max)
        } else {
            1.0
        }
    }
}

/// Number of unordered pairs among `n` items.
pub fn pair_count(n: usize) -> usize {
    n.saturating_sub(1).saturating_mul(n) / 2
}

/// Appearance of the particle points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PointStyle {
    /// Point size in world units.
    pub size: f32,
    pub color: Rgb,
    pub opacity: f32,
    /// Whether points shrink with distance from the camera.
    pub size_attenuation: bool,
}

impl Default for PointStyle {
    fn default() -> Self {
        Self {
            size: 0.08,
            color: Rgb::from_hex(0x00F0FF),
            opacity: 0.8,
            size_attenuation: true,
        }
    }
}

/// Blend mode for the edge segments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineBlend {
    Alpha,
    Additive,
}

impl LineBlend {
    /// Wire value written into the frame header.
    pub fn as_f32(self) -> f32 {
        match self {
            LineBlend::Alpha => 0.0,
            LineBlend::Additive => 1.0,
        }
    }
}

/// Appearance of the edge segments. Colors come per vertex.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LineStyle {
    pub opacity: f32,
    pub blend: LineBlend,
}

impl Default for LineStyle {
    fn default() -> Self {
        Self {
            opacity: 0.4,
            blend: LineBlend::Additive,
        }
    }
}

/// Perspective camera placement.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub position: [f32; 3],
    /// Vertical field of view in degrees.
    pub fov_y_degrees: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: [0.0, 0.0, 12.0],
            fov_y_degrees: 60.0,
            near: 0.1,
            far: 1000.0,
        }
    }
}
