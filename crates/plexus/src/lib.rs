pub mod api;
pub mod core;
pub mod systems;
pub mod renderer;
pub mod bridge;

// Re-export key types at crate root for convenience
pub use api::config::{FieldConfig, PointStyle, LineStyle, LineBlend, CameraConfig};
pub use api::field::{Field, FieldState};
pub use api::types::Rgb;
pub use core::particles::ParticleStore;
pub use core::integrator::MotionIntegrator;
pub use core::rng::Rng;
pub use core::time::SimClock;
pub use systems::connectivity::{ConnectivityBuilder, EdgeBuffer};
pub use systems::compose::{Frame, FrameComposer};
pub use renderer::vertex::EdgeVertex;
pub use renderer::camera::{Camera3D, CameraUniform};
pub use renderer::traits::{FrameSink, CountingSink};
pub use bridge::protocol::{ProtocolLayout, FlatFrameWriter};
