//! Paint model shared between the viewer and renderers.
//!
//! Colors are linear premultiplied RGBA. Renderers upload them unchanged;
//! surface format policy decides whether the output is sRGB-encoded.

pub mod color;

pub use color::Color;
