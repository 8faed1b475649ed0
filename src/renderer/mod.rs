//! WebGPU rendering module
//!
//! The whole artwork is tessellated into one vertex buffer per frame and
//! drawn with a single alpha-blended TriangleList pass.

pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod vertex;

pub use pipeline::RenderState;
pub use scene::build_scene;
pub use vertex::Vertex;
