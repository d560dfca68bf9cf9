//! Flat frame buffer layout.
//! Must stay in sync with the JS renderer's `protocol.ts`.
//!
//! Layout (all values in f32 / 4 bytes):
//! ```text
//! [Header: 16 floats]
//! [Points: max_points × 3 floats]
//! [Edges: max_edges × 2 vertices × 6 floats]
//! ```
//!
//! Capacities are written into the header on every frame.
//! JS reads them from the header to compute offsets dynamically.

use crate::api::config::FieldConfig;
use crate::renderer::traits::FrameSink;
use crate::renderer::vertex::{EdgeVertex, POINT_FLOATS, VERTICES_PER_EDGE};
use crate::systems::compose::Frame;

/// Number of floats in the header section.
pub const HEADER_FLOATS: usize = 16;

/// Header field indices.
pub const HEADER_FRAME_COUNTER: usize = 0;
pub const HEADER_PROTOCOL_VERSION: usize = 1;
pub const HEADER_MAX_POINTS: usize = 2;
pub const HEADER_POINT_COUNT: usize = 3;
pub const HEADER_MAX_EDGES: usize = 4;
pub const HEADER_EDGE_COUNT: usize = 5;
pub const HEADER_ROTATION_Y: usize = 6;
pub const HEADER_POINT_SIZE: usize = 7;
pub const HEADER_POINT_OPACITY: usize = 8;
pub const HEADER_POINT_R: usize = 9;
pub const HEADER_POINT_G: usize = 10;
pub const HEADER_POINT_B: usize = 11;
pub const HEADER_LINE_OPACITY: usize = 12;
pub const HEADER_LINE_BLEND: usize = 13;
pub const HEADER_SIZE_ATTENUATION: usize = 14;
pub const HEADER_RESERVED: usize = 15;

/// Protocol version written into the header.
pub const PROTOCOL_VERSION: f32 = 1.0;

/// Floats per edge: two vertices of x, y, z, r, g, b (wire format — never changes).
pub const EDGE_FLOATS: usize = VERTICES_PER_EDGE * EdgeVertex::FLOATS;

/// Runtime-computed buffer layout.
#[derive(Debug, Clone, PartialEq)]
pub struct ProtocolLayout {
    /// Maximum points (the particle count).
    pub max_points: usize,
    /// Maximum edges the renderer will ever be asked to draw.
    pub max_edges: usize,

    /// Size of point data section in floats.
    pub point_data_floats: usize,
    /// Size of edge data section in floats.
    pub edge_data_floats: usize,

    /// Offset (in floats) where point data begins.
    pub point_data_offset: usize,
    /// Offset (in floats) where edge data begins.
    pub edge_data_offset: usize,

    /// Total buffer size in floats.
    pub buffer_total_floats: usize,
    /// Total buffer size in bytes.
    pub buffer_total_bytes: usize,
}

impl ProtocolLayout {
    /// Compute layout from raw capacity values.
    pub fn new(max_points: usize, max_edges: usize) -> Self {
        let point_data_floats = max_points * POINT_FLOATS;
        let edge_data_floats = max_edges * EDGE_FLOATS;

        let point_data_offset = HEADER_FLOATS;
        let edge_data_offset = point_data_offset + point_data_floats;

        let buffer_total_floats = edge_data_offset + edge_data_floats;
        let buffer_total_bytes = buffer_total_floats * 4;

        Self {
            max_points,
            max_edges,
            point_data_floats,
            edge_data_floats,
            point_data_offset,
            edge_data_offset,
            buffer_total_floats,
            buffer_total_bytes,
        }
    }

    /// Compute layout from a FieldConfig.
    /// The edge section holds the cap, never more than the number of pairs.
    pub fn from_config(config: &FieldConfig) -> Self {
        Self::new(
            config.particle_count,
            config.edge_cap().min(config.pair_capacity()),
        )
    }
}

/// `FrameSink` that serializes each frame into one preallocated f32 buffer.
///
/// The edge section is rewritten in full every frame, so whatever the
/// renderer reads past `edge_count` is the zeroed tail of the edge buffer.
pub struct FlatFrameWriter {
    layout: ProtocolLayout,
    buffer: Vec<f32>,
}

impl FlatFrameWriter {
    pub fn new(layout: ProtocolLayout) -> Self {
        let buffer = vec![0.0; layout.buffer_total_floats];
        Self { layout, buffer }
    }

    pub fn layout(&self) -> &ProtocolLayout {
        &self.layout
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.buffer
    }

    /// Header value at `index`, or `None` once the writer has been released.
    pub fn header(&self, index: usize) -> Option<f32> {
        self.buffer[..self.buffer.len().min(HEADER_FLOATS)].get(index).copied()
    }

    pub fn point_data(&self) -> &[f32] {
        let start = self.layout.point_data_offset;
        &self.buffer[start..start + self.layout.point_data_floats]
    }

    pub fn edge_data(&self) -> &[f32] {
        let start = self.layout.edge_data_offset;
        &self.buffer[start..start + self.layout.edge_data_floats]
    }

    /// Raw pointer for JS reads out of wasm memory.
    pub fn as_ptr(&self) -> *const f32 {
        self.buffer.as_ptr()
    }

    pub fn release(&mut self) {
        self.buffer = Vec::new();
    }
}

impl FrameSink for FlatFrameWriter {
    fn submit(&mut self, frame: &Frame<'_>) {
        if self.buffer.len() != self.layout.buffer_total_floats {
            // Released
            return;
        }
        let layout = &self.layout;

        let points: &[f32] = bytemuck::cast_slice(frame.points);
        let point_floats = points.len().min(layout.point_data_floats);
        let point_count = point_floats / POINT_FLOATS;
        let point_start = layout.point_data_offset;
        self.buffer[point_start..point_start + point_floats].copy_from_slice(&points[..point_floats]);
        self.buffer[point_start + point_floats..point_start + layout.point_data_floats].fill(0.0);

        let edges: &[f32] = bytemuck::cast_slice(frame.edges);
        let edge_floats = edges.len().min(layout.edge_data_floats);
        let edge_count = frame.edge_count.min(layout.max_edges);
        let edge_start = layout.edge_data_offset;
        self.buffer[edge_start..edge_start + edge_floats].copy_from_slice(&edges[..edge_floats]);
        self.buffer[edge_start + edge_floats..edge_start + layout.edge_data_floats].fill(0.0);

        let style = &frame.point_style;
        let header = &mut self.buffer[..HEADER_FLOATS];
        header[HEADER_FRAME_COUNTER] = frame.frame_number as f32;
        header[HEADER_PROTOCOL_VERSION] = PROTOCOL_VERSION;
        header[HEADER_MAX_POINTS] = layout.max_points as f32;
        header[HEADER_POINT_COUNT] = point_count as f32;
        header[HEADER_MAX_EDGES] = layout.max_edges as f32;
        header[HEADER_EDGE_COUNT] = edge_count as f32;
        header[HEADER_ROTATION_Y] = frame.angle;
        header[HEADER_POINT_SIZE] = style.size;
        header[HEADER_POINT_OPACITY] = style.opacity;
        header[HEADER_POINT_R] = style.color.r;
        header[HEADER_POINT_G] = style.color.g;
        header[HEADER_POINT_B] = style.color.b;
        header[HEADER_LINE_OPACITY] = frame.line_style.opacity;
        header[HEADER_LINE_BLEND] = frame.line_style.blend.as_f32();
        header[HEADER_SIZE_ATTENUATION] = if style.size_attenuation { 1.0 } else { 0.0 };
        header[HEADER_RESERVED] = 0.0;
    }
}
