//! Frame composition: one time-derived rotation shared by points and edges.

use glam::{Mat4, Quat, Vec3};

use crate::api::config::{LineStyle, PointStyle};
use crate::renderer::vertex::{EdgeVertex, VERTICES_PER_EDGE};
use crate::systems::connectivity::EdgeBuffer;

/// Everything the rendering pipeline needs for one frame.
/// Buffers are borrowed untouched; the rotation is carried alongside them.
#[derive(Debug, Clone, Copy)]
pub struct Frame<'a> {
    /// Particle positions before rotation.
    pub points: &'a [Vec3],
    /// Full edge buffer: `edge_count` live edges, then a zeroed tail.
    pub edges: &'a [EdgeVertex],
    pub edge_count: usize,
    /// Rotation about the vertical axis, in radians.
    pub angle: f32,
    pub rotation: Quat,
    pub point_style: PointStyle,
    pub line_style: LineStyle,
    /// Number of ticks run so far, including this one.
    pub frame_number: u64,
}

impl<'a> Frame<'a> {
    /// Model matrix applied to both the point set and the edge set.
    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_quat(self.rotation)
    }

    /// Apply the frame rotation to a single position.
    #[inline]
    pub fn transform_point(&self, p: Vec3) -> Vec3 {
        self.rotation * p
    }

    /// Live edge vertices only.
    pub fn live_edges(&self) -> &'a [EdgeVertex] {
        &self.edges[..self.edge_count * VERTICES_PER_EDGE]
    }

    /// Rotated copy of the points, for consumers without a model transform.
    pub fn rotated_points(&self) -> impl Iterator<Item = Vec3> + '_ {
        self.points.iter().map(move |p| self.transform_point(*p))
    }
}

/// Derives the per-frame rotation from elapsed time.
#[derive(Debug, Clone, Copy)]
pub struct FrameComposer {
    /// Radians per unit of elapsed time.
    rotation_rate: f32,
    point_style: PointStyle,
    line_style: LineStyle,
}

impl FrameComposer {
    pub fn new(rotation_rate: f32, point_style: PointStyle, line_style: LineStyle) -> Self {
        Self {
            rotation_rate,
            point_style,
            line_style,
        }
    }

    pub fn rotation_rate(&self) -> f32 {
        self.rotation_rate
    }

    /// Rotation angle for an elapsed time.
    #[inline]
    pub fn angle(&self, elapsed: f32) -> f32 {
        self.rotation_rate * elapsed
    }

    pub fn compose<'a>(
        &self,
        elapsed: f32,
        points: &'a [Vec3],
        edges: &'a EdgeBuffer,
        frame_number: u64,
    ) -> Frame<'a> {
        let angle = self.angle(elapsed);
        Frame {
            points,
            edges: edges.vertices(),
            edge_count: edges.len(),
            angle,
            rotation: Quat::from_rotation_y(angle),
            point_style: self.point_style,
            line_style: self.line_style,
            frame_number,
        }
    }
}
