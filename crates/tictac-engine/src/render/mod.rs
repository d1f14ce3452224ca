//! GPU rendering subsystem.
//!
//! Renderers own their GPU resources (pipelines, buffers) and record into a
//! [`RenderTarget`] supplied by the frame.
//!
//! Convention:
//! - world space is right-handed, +Y up, camera looking down -Z
//! - clip-space depth is `[0, 1]` (wgpu), cleared to `1.0` each frame

mod camera;
mod ctx;
mod gpu_mesh;
mod mesh_renderer;

pub use camera::{Camera, CameraMatrices};
pub use ctx::{RenderCtx, RenderTarget};
pub use gpu_mesh::GpuMesh;
pub use mesh_renderer::{ColorMode, MeshDraw, MeshRenderer};
