//! GPU layer: wgpu context, attachments, and the forward mesh pass.

/// Single-pass forward renderer for the viewport scene.
pub mod mesh_pipeline;
/// Core wgpu device/queue/surface ownership.
pub mod render_context;
/// Render-target and texture upload helpers.
pub mod texture;

pub use mesh_pipeline::MeshRenderer;
pub use render_context::{RenderContext, RenderContextError};
