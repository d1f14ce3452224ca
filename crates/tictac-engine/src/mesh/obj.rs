use std::io::BufRead;
use std::path::{Path, PathBuf};

use super::{MeshData, MeshError};

/// Loads the first mesh of an OBJ file.
///
/// Material libraries are not read; extra meshes in the file are ignored.
pub fn load_first_mesh(path: impl AsRef<Path>) -> Result<MeshData, MeshError> {
    let path = path.as_ref();
    let (models, _materials) =
        tobj::load_obj(path, &tobj::GPU_LOAD_OPTIONS).map_err(|source| MeshError::Obj {
            path: path.to_path_buf(),
            source,
        })?;

    first_mesh(path, models)
}

/// Like [`load_first_mesh`], reading OBJ text from `reader`.
///
/// `source` only labels errors and log lines.
pub fn load_first_mesh_from_reader<R: BufRead>(
    reader: &mut R,
    source: impl AsRef<Path>,
) -> Result<MeshData, MeshError> {
    let path = source.as_ref();
    let (models, _materials) = tobj::load_obj_buf(reader, &tobj::GPU_LOAD_OPTIONS, |_| {
        Err(tobj::LoadError::OpenFileFailed)
    })
    .map_err(|source| MeshError::Obj {
        path: path.to_path_buf(),
        source,
    })?;

    first_mesh(path, models)
}

fn first_mesh(path: &Path, models: Vec<tobj::Model>) -> Result<MeshData, MeshError> {
    let total = models.len();
    let Some(model) = models.into_iter().next() else {
        return Err(MeshError::NoMeshes { path: path.to_path_buf() });
    };
    if total > 1 {
        log::debug!("{}: {} meshes, using `{}`", path.display(), total, model.name);
    }

    let positions = model
        .mesh
        .positions
        .chunks_exact(3)
        .map(|p| [p[0], p[1], p[2]])
        .collect();

    let mesh = validate(
        path,
        MeshData {
            name: model.name,
            positions,
            indices: model.mesh.indices,
        },
    )?;

    log::info!(
        "loaded mesh `{}` from {}: {} vertices, {} triangles",
        mesh.name,
        path.display(),
        mesh.vertex_count(),
        mesh.triangle_count()
    );

    Ok(mesh)
}

fn validate(path: &Path, mesh: MeshData) -> Result<MeshData, MeshError> {
    let at = || PathBuf::from(path);

    if mesh.positions.is_empty() || mesh.indices.is_empty() {
        return Err(MeshError::Empty { path: at(), name: mesh.name });
    }

    if mesh.indices.len() % 3 != 0 {
        return Err(MeshError::NotTriangulated {
            path: at(),
            name: mesh.name,
            count: mesh.indices.len(),
        });
    }

    let vertices = mesh.positions.len();
    if let Some(&index) = mesh.indices.iter().find(|&&i| i as usize >= vertices) {
        return Err(MeshError::IndexOutOfRange {
            path: at(),
            name: mesh.name,
            index,
            vertices,
        });
    }

    Ok(mesh)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn load(src: &str) -> Result<MeshData, MeshError> {
        load_first_mesh_from_reader(&mut Cursor::new(src), "test.obj")
    }

    const QUAD: &str = "\
o Quad
v -0.5 0.5 0.0
v 0.5 0.5 0.0
v 0.5 -0.5 0.0
v -0.5 -0.5 0.0
f 1 2 3 4
";

    #[test]
    fn quad_is_triangulated() {
        let mesh = load(QUAD).unwrap();
        assert_eq!(mesh.name, "Quad");
        assert_eq!(mesh.vertex_count(), 4);
        assert_eq!(mesh.triangle_count(), 2);
        assert!(mesh.indices.iter().all(|&i| i < 4));
    }

    #[test]
    fn positions_are_read_in_order() {
        let mesh = load(QUAD).unwrap();
        assert!(mesh.positions.contains(&[-0.5, 0.5, 0.0]));
        assert!(mesh.positions.contains(&[0.5, -0.5, 0.0]));
    }

    #[test]
    fn normals_and_uvs_are_ignored() {
        let src = "\
o Tri
v 0 0 0
v 1 0 0
v 0 1 0
vn 0 0 1
vt 0 0
f 1/1/1 2/1/1 3/1/1
";
        let mesh = load(src).unwrap();
        assert_eq!(mesh.vertex_count(), 3);
        assert_eq!(mesh.triangle_count(), 1);
    }

    #[test]
    fn only_first_mesh_is_kept() {
        let src = "\
o First
v 0 0 0
v 1 0 0
v 0 1 0
f 1 2 3
o Second
v 0 0 1
v 1 0 1
v 0 1 1
v 1 1 1
f 4 5 6
f 5 7 6
";
        let mesh = load(src).unwrap();
        assert_eq!(mesh.name, "First");
        assert_eq!(mesh.triangle_count(), 1);
    }

    #[test]
    fn file_without_faces_is_rejected() {
        let err = load("v 0 0 0\nv 1 0 0\n").unwrap_err();
        assert!(matches!(err, MeshError::NoMeshes { .. } | MeshError::Empty { .. }));
    }

    #[test]
    fn missing_file_reports_path() {
        let err = load_first_mesh("does/not/exist.obj").unwrap_err();
        assert!(matches!(err, MeshError::Obj { .. }));
        assert!(err.to_string().contains("does/not/exist.obj"));
    }

    #[test]
    fn shipped_board_pieces_load() {
        let dir = concat!(env!("CARGO_MANIFEST_DIR"), "/../../ASSETS/OBJ_MODELS");

        let x = load_first_mesh(format!("{dir}/x.obj")).unwrap();
        assert_eq!(x.name, "X");
        assert_eq!((x.vertex_count(), x.triangle_count()), (16, 24));

        let o = load_first_mesh(format!("{dir}/o.obj")).unwrap();
        assert_eq!(o.name, "O");
        assert_eq!((o.vertex_count(), o.triangle_count()), (128, 256));

        // Both pieces fit inside one tile at the tightest preset spacing.
        for mesh in [&x, &o] {
            let (min, max) = mesh.bounds().unwrap();
            assert!(max[0] - min[0] < 1.3 && max[1] - min[1] < 1.3);
        }
    }

    #[test]
    fn validate_rejects_out_of_range_index() {
        let mesh = MeshData {
            name: "bad".into(),
            positions: vec![[0.0; 3]; 3],
            indices: vec![0, 1, 3],
        };
        let err = validate(Path::new("bad.obj"), mesh).unwrap_err();
        assert!(matches!(err, MeshError::IndexOutOfRange { index: 3, vertices: 3, .. }));
    }

    #[test]
    fn validate_rejects_partial_triangle() {
        let mesh = MeshData {
            name: "partial".into(),
            positions: vec![[0.0; 3]; 3],
            indices: vec![0, 1, 2, 0],
        };
        let err = validate(Path::new("partial.obj"), mesh).unwrap_err();
        assert!(matches!(err, MeshError::NotTriangulated { count: 4, .. }));
    }
}
