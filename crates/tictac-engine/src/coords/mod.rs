//! Coordinate types shared across engine renderers.
//!
//! Canonical CPU space for window metrics is logical pixels (DPI-aware).
//! World-space math (positions, transforms) uses `glam`.

mod viewport;

pub use viewport::Viewport;
