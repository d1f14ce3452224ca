//! Board model and its placement in world space.

use glam::{Mat4, Vec3};
use tictac_engine::paint::Color;
use tictac_engine::render::{GpuMesh, MeshDraw};

pub const BOARD_SIZE: usize = 3;

/// Piece shown on a tile.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Mark {
    X,
    O,
}

/// Fixed 3x3 arrangement of marks, indexed `[row][col]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    cells: [[Mark; BOARD_SIZE]; BOARD_SIZE],
}

impl Board {
    /// X along the main diagonal, O everywhere else.
    pub fn diagonal() -> Self {
        let mut cells = [[Mark::O; BOARD_SIZE]; BOARD_SIZE];
        for (i, row) in cells.iter_mut().enumerate() {
            row[i] = Mark::X;
        }
        Self { cells }
    }

    pub fn mark(&self, row: usize, col: usize) -> Mark {
        self.cells[row][col]
    }

    /// `(row, col, mark)` in row-major order.
    pub fn tiles(&self) -> impl Iterator<Item = (usize, usize, Mark)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .flat_map(|(row, cols)| cols.iter().enumerate().map(move |(col, &m)| (row, col, m)))
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::diagonal()
    }
}

/// Spacing of tiles in world units; the centre tile sits at the origin.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct BoardLayout {
    pub tile_spacing: f32,
}

impl BoardLayout {
    pub fn tile_offset(&self, row: usize, col: usize) -> Vec3 {
        let s = self.tile_spacing;
        Vec3::new(-s + col as f32 * s, -s + row as f32 * s, 0.0)
    }

    pub fn tile_transform(&self, row: usize, col: usize) -> Mat4 {
        Mat4::from_translation(self.tile_offset(row, col))
    }
}

/// Per-mark colors used in uniform color mode.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Palette {
    pub x: Color,
    pub o: Color,
}

impl Palette {
    pub fn color(&self, mark: Mark) -> Color {
        match mark {
            Mark::X => self.x,
            Mark::O => self.o,
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            x: Color::BLUE,
            o: Color::RED,
        }
    }
}

/// Placement and color of one tile, before a mesh is chosen.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct TileDraw {
    pub row: usize,
    pub col: usize,
    pub mark: Mark,
    pub model: Mat4,
    pub color: Color,
}

impl TileDraw {
    /// Picks the mesh matching this tile's mark.
    pub fn mesh<'m, M>(&self, x_mesh: &'m M, o_mesh: &'m M) -> &'m M {
        match self.mark {
            Mark::X => x_mesh,
            Mark::O => o_mesh,
        }
    }
}

/// One entry per tile, row-major.
pub fn tile_draws<'a>(
    board: &'a Board,
    layout: &'a BoardLayout,
    palette: &'a Palette,
) -> impl Iterator<Item = TileDraw> + 'a {
    board.tiles().map(move |(row, col, mark)| TileDraw {
        row,
        col,
        mark,
        model: layout.tile_transform(row, col),
        color: palette.color(mark),
    })
}

/// One draw per tile, row-major.
pub fn board_draws<'m>(
    board: &Board,
    layout: &BoardLayout,
    palette: &Palette,
    x_mesh: &'m GpuMesh,
    o_mesh: &'m GpuMesh,
) -> Vec<MeshDraw<'m>> {
    tile_draws(board, layout, palette)
        .map(|tile| MeshDraw {
            mesh: tile.mesh(x_mesh, o_mesh),
            model: tile.model,
            color: tile.color,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn diagonal_has_x_only_on_diagonal() {
        let board = Board::diagonal();
        for (row, col, mark) in board.tiles() {
            let expected = if row == col { Mark::X } else { Mark::O };
            assert_eq!(mark, expected, "tile ({row}, {col})");
        }
    }

    #[test]
    fn diagonal_counts() {
        let board = Board::default();
        let xs = board.tiles().filter(|&(_, _, m)| m == Mark::X).count();
        assert_eq!(xs, 3);
        assert_eq!(board.tiles().count(), 9);
    }

    #[test]
    fn tiles_are_row_major() {
        let order: Vec<(usize, usize)> = Board::diagonal().tiles().map(|(r, c, _)| (r, c)).collect();
        assert_eq!(order[0], (0, 0));
        assert_eq!(order[1], (0, 1));
        assert_eq!(order[3], (1, 0));
        assert_eq!(order[8], (2, 2));
    }

    #[test]
    fn centre_tile_is_at_origin() {
        let layout = BoardLayout { tile_spacing: 1.3 };
        assert_eq!(layout.tile_offset(1, 1), Vec3::ZERO);
    }

    #[test]
    fn corner_offsets_use_spacing() {
        let layout = BoardLayout { tile_spacing: 1.3 };
        assert_eq!(layout.tile_offset(0, 0), Vec3::new(-1.3, -1.3, 0.0));
        assert_eq!(layout.tile_offset(2, 2), Vec3::new(1.3, 1.3, 0.0));
        // Columns move along X, rows along Y.
        assert_eq!(layout.tile_offset(0, 2), Vec3::new(1.3, -1.3, 0.0));
    }

    #[test]
    fn tile_transform_is_pure_translation() {
        let layout = BoardLayout { tile_spacing: 2.0 };
        let m = layout.tile_transform(2, 0);
        assert_eq!(m.transform_point3(Vec3::ZERO), Vec3::new(-2.0, 2.0, 0.0));
        assert_eq!(m.transform_vector3(Vec3::X), Vec3::X);
    }

    #[test]
    fn default_palette_is_blue_x_red_o() {
        let p = Palette::default();
        assert_eq!(p.color(Mark::X).to_array(), [0.0, 0.0, 1.0, 1.0]);
        assert_eq!(p.color(Mark::O).to_array(), [1.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn tile_draws_cover_board_in_order() {
        let board = Board::diagonal();
        let layout = BoardLayout { tile_spacing: 2.0 };
        let palette = Palette::default();
        let draws: Vec<TileDraw> = tile_draws(&board, &layout, &palette).collect();
        assert_eq!(draws.len(), 9);

        for (i, tile) in draws.iter().enumerate() {
            let (row, col) = (i / BOARD_SIZE, i % BOARD_SIZE);
            assert_eq!((tile.row, tile.col), (row, col));

            let expected = if row == col { Mark::X } else { Mark::O };
            assert_eq!(tile.mark, expected, "tile ({row}, {col})");
            assert_eq!(tile.color, palette.color(expected));

            let at = tile.model.transform_point3(Vec3::ZERO);
            let want = Vec3::new(-2.0 + col as f32 * 2.0, -2.0 + row as f32 * 2.0, 0.0);
            assert_eq!(at, want, "tile ({row}, {col})");
        }
    }

    #[test]
    fn tile_mesh_follows_mark() {
        let (x, o) = ("x", "o");
        let board = Board::diagonal();
        let layout = BoardLayout { tile_spacing: 1.3 };
        let picked: Vec<&str> = tile_draws(&board, &layout, &Palette::default())
            .map(|tile| *tile.mesh(&x, &o))
            .collect();
        assert_eq!(picked, ["x", "o", "o", "o", "x", "o", "o", "o", "x"]);
    }
}
