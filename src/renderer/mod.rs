//! WebGPU rendering module
//!
//! Every visible object is a scaled, rotated unit cube drawn with instancing.

pub mod pipeline;
pub mod shapes;
pub mod vertex;

pub use pipeline::RenderState;
pub use vertex::{Instance, Vertex, colors};
