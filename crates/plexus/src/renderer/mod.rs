pub mod camera;
pub mod traits;
pub mod vertex;

// Re-export key types for convenient access
pub use traits::{FrameSink, CountingSink};
