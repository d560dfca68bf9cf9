use plexus::{Camera3D, CameraUniform, Field, FieldConfig, FlatFrameWriter, ProtocolLayout, SimClock};

/// Host loop adapter that wires a `Field` to the browser frame loop.
///
/// The runner owns the simulation clock: JS passes the frame delta, the runner
/// accumulates it and hands the elapsed time to the field explicitly.
/// Lives in a `thread_local!` behind the `#[wasm_bindgen]` exports.
pub struct FieldRunner {
    field: Field,
    clock: SimClock,
    writer: FlatFrameWriter,
    camera: Camera3D,
    config: FieldConfig,
    /// Column-major view-projection matrix for JS reads.
    uniform: CameraUniform,
    pixel_ratio: f32,
}

impl FieldRunner {
    pub fn new(config: FieldConfig) -> Self {
        let field = Field::new(&config);
        let writer = FlatFrameWriter::new(ProtocolLayout::from_config(&config));
        let camera = Camera3D::new(&config.camera);
        let uniform = camera.uniform();

        Self {
            field,
            clock: SimClock::new(),
            writer,
            camera,
            config,
            uniform,
            pixel_ratio: 1.0,
        }
    }

    /// Run one frame: advance the clock by `dt` seconds and tick the field into the frame buffer.
    pub fn tick(&mut self, dt: f32) {
        let elapsed = self.clock.advance(dt);
        self.field.tick_into(elapsed, &mut self.writer);
    }

    /// Viewport changed. `device_pixel_ratio` is clamped to the configured range.
    pub fn resize(&mut self, width: f32, height: f32, device_pixel_ratio: f32) {
        self.camera.resize(width, height);
        self.uniform = self.camera.uniform();
        self.pixel_ratio = self.config.clamp_pixel_ratio(device_pixel_ratio);
    }

    /// Tear down: release every buffer. Further ticks do nothing.
    pub fn dispose(&mut self) {
        self.field.dispose();
        self.writer.release();
    }

    pub fn is_disposed(&self) -> bool {
        self.field.is_disposed()
    }

    // ---- Pointer accessors for JS reads ----

    pub fn frame_ptr(&self) -> *const f32 {
        self.writer.as_ptr()
    }

    pub fn frame_total_floats(&self) -> u32 {
        self.writer.as_slice().len() as u32
    }

    pub fn view_projection_ptr(&self) -> *const f32 {
        self.uniform.view_projection.as_ptr().cast::<f32>()
    }

    pub fn uniform(&self) -> &CameraUniform {
        &self.uniform
    }

    pub fn point_count(&self) -> u32 {
        self.field.particle_count() as u32
    }

    pub fn edge_count(&self) -> u32 {
        self.field.edge_count() as u32
    }

    pub fn elapsed(&self) -> f32 {
        self.clock.elapsed()
    }

    pub fn pixel_ratio(&self) -> f32 {
        self.pixel_ratio
    }

    pub fn layout(&self) -> &ProtocolLayout {
        self.writer.layout()
    }
}
