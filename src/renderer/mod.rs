//! WebGPU rendering module
//!
//! The board is built as a flat-colored triangle list on the CPU each frame.

pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod vertex;

pub use pipeline::RenderState;
pub use scene::build_scene;
pub use vertex::{Vertex, colors};
