//! Rendering module
//!
//! `scene` turns game state into a flat vertex list in screen pixels;
//! `pipeline` uploads that list and draws it with WebGPU.

pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod vertex;

pub use pipeline::{RenderState, screen_to_ndc};
pub use vertex::Vertex;
