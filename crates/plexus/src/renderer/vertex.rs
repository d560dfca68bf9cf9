use bytemuck::{Pod, Zeroable};
use glam::Vec3;

use crate::api::types::Rgb;

/// One endpoint of an edge segment: position + color.
/// Must match the JS renderer: 6 floats = 24 bytes stride.
/// Two consecutive vertices form one line segment.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct EdgeVertex {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl EdgeVertex {
    pub const FLOATS: usize = 6;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;
    pub const ZERO: Self = Self { x: 0.0, y: 0.0, z: 0.0, r: 0.0, g: 0.0, b: 0.0 };

    #[inline]
    pub fn new(position: Vec3, color: Rgb) -> Self {
        Self {
            x: position.x,
            y: position.y,
            z: position.z,
            r: color.r,
            g: color.g,
            b: color.b,
        }
    }

    pub fn position(&self) -> Vec3 {
        Vec3::new(self.x, self.y, self.z)
    }

    pub fn color(&self) -> Rgb {
        Rgb::new(self.r, self.g, self.b)
    }
}

/// Floats per point: x, y, z (wire format — never changes).
pub const POINT_FLOATS: usize = 3;

/// Vertices per edge segment.
pub const VERTICES_PER_EDGE: usize = 2;
