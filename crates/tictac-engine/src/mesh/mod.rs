//! CPU-side mesh data and OBJ loading.
//!
//! Only positions are read. The loader triangulates polygons and flattens
//! the file to a single index stream, keeping the first mesh of the file.

mod data;
mod error;
mod obj;

pub use data::MeshData;
pub use error::MeshError;
pub use obj::{load_first_mesh, load_first_mesh_from_reader};
