//! Rendering
//!
//! `scene` turns game state into draw calls; `shapes` batches them into
//! quads; `pipeline` draws the quads with WebGPU.

pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod vertex;

pub use pipeline::RenderState;
pub use scene::{RenderSurface, draw_frame};
pub use shapes::{FrameBatch, TextItem};
