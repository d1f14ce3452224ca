/// Positions-only indexed triangle mesh.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshData {
    pub name: String,
    pub positions: Vec<[f32; 3]>,
    /// Triangle list; every three entries form one triangle.
    pub indices: Vec<u32>,
}

impl MeshData {
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Axis-aligned bounds as `(min, max)`, `None` for an empty mesh.
    pub fn bounds(&self) -> Option<([f32; 3], [f32; 3])> {
        let (first, rest) = self.positions.split_first()?;
        let mut min = *first;
        let mut max = *first;
        for p in rest {
            for axis in 0..3 {
                min[axis] = min[axis].min(p[axis]);
                max[axis] = max[axis].max(p[axis]);
            }
        }
        Some((min, max))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts() {
        let mesh = MeshData {
            name: "quad".into(),
            positions: vec![[0.0; 3]; 4],
            indices: vec![0, 1, 2, 2, 3, 0],
        };
        assert_eq!(mesh.vertex_count(), 4);
        assert_eq!(mesh.triangle_count(), 2);
    }

    #[test]
    fn bounds_cover_all_positions() {
        let mesh = MeshData {
            name: "tri".into(),
            positions: vec![[-0.5, 0.5, 0.0], [0.5, 0.5, 0.1], [0.5, -0.5, -0.2]],
            indices: vec![0, 1, 2],
        };
        assert_eq!(mesh.bounds(), Some(([-0.5, -0.5, -0.2], [0.5, 0.5, 0.1])));
    }

    #[test]
    fn empty_mesh_has_no_bounds() {
        assert_eq!(MeshData::default().bounds(), None);
    }
}
