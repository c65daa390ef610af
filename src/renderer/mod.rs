//! wgpu rendering module
//!
//! CPU-tessellated shapes plus CPU-rasterized text, drawn in one pass.

pub mod pipeline;
pub mod shapes;
pub mod text;
pub mod vertex;

pub use pipeline::{RenderState, TextDraw};
pub use text::{RasterizedText, TextSprite, load_system_font, rasterize};
pub use vertex::{TexVertex, Vertex, colors};
