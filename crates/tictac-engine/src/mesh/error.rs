use std::path::PathBuf;

/// Errors produced while loading a mesh from disk.
#[derive(Debug, thiserror::Error)]
pub enum MeshError {
    #[error("failed to read OBJ {path}: {source}")]
    Obj {
        path: PathBuf,
        #[source]
        source: tobj::LoadError,
    },

    #[error("{path} contains no meshes")]
    NoMeshes { path: PathBuf },

    #[error("mesh `{name}` in {path} has no triangles")]
    Empty { path: PathBuf, name: String },

    #[error("mesh `{name}` in {path}: index count {count} is not a multiple of 3")]
    NotTriangulated {
        path: PathBuf,
        name: String,
        count: usize,
    },

    #[error("mesh `{name}` in {path}: index {index} out of range for {vertices} vertices")]
    IndexOutOfRange {
        path: PathBuf,
        name: String,
        index: u32,
        vertices: usize,
    },
}
