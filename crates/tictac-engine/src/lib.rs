//! Tictac engine crate.
//!
//! This crate owns the platform + GPU runtime pieces used by the board viewer:
//! window loop, device/surface, OBJ mesh loading and the mesh renderer.

pub mod device;
pub mod window;
pub mod time;
pub mod core;

pub mod logging;
pub mod coords;
pub mod mesh;
pub mod render;
pub mod paint;
