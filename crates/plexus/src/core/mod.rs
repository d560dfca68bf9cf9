pub mod integrator;
pub mod particles;
pub mod rng;
pub mod time;
