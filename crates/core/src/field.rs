//! The committed playfield grid.
//!
//! A 20x10 grid of `u8` cells: 0 is empty, `kind index + 1` identifies
//! the piece kind occupying the cell (the renderer uses it for color
//! lookup). The grid only ever holds locked pieces; the falling piece
//! is overlaid at snapshot time and never written here until it locks.

use arrayvec::ArrayVec;

use blockfall_types::{PieceKind, FIELD_COLS, FIELD_ROWS, MASK_SIZE};

use crate::mask::mask_cell;

/// Raw grid storage type, row-major.
pub type Grid = [[u8; FIELD_COLS]; FIELD_ROWS];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    cells: Grid,
}

impl Field {
    pub fn new() -> Self {
        Self {
            cells: [[0; FIELD_COLS]; FIELD_ROWS],
        }
    }

    pub fn cells(&self) -> &Grid {
        &self.cells
    }

    /// Cell at `(row, col)`; out-of-bounds reads as `None`.
    pub fn get(&self, row: i32, col: i32) -> Option<u8> {
        if !Self::in_bounds(row, col) {
            return None;
        }
        Some(self.cells[row as usize][col as usize])
    }

    /// Write a cell directly. Out-of-bounds writes are ignored.
    ///
    /// Exposed so tests and tooling can stage grid contents.
    pub fn set(&mut self, row: i32, col: i32, code: u8) {
        if Self::in_bounds(row, col) {
            self.cells[row as usize][col as usize] = code;
        }
    }

    pub fn clear(&mut self) {
        self.cells = [[0; FIELD_COLS]; FIELD_ROWS];
    }

    fn in_bounds(row: i32, col: i32) -> bool {
        (0..FIELD_ROWS as i32).contains(&row) && (0..FIELD_COLS as i32).contains(&col)
    }

    /// The placement predicate backing movement, rotation, spawning and
    /// dropping: every occupied mask cell of `kind` at `rotation`,
    /// anchored at `(row, col)`, must land on an in-bounds empty cell.
    ///
    /// A placement that maps zero occupied cells is vacuously valid.
    pub fn can_place(&self, kind: PieceKind, rotation: u8, row: i32, col: i32) -> bool {
        for mask_row in 0..MASK_SIZE {
            for mask_col in 0..MASK_SIZE {
                if !mask_cell(kind, rotation, mask_row, mask_col) {
                    continue;
                }
                let grid_row = row + mask_row as i32;
                let grid_col = col + mask_col as i32;
                match self.get(grid_row, grid_col) {
                    Some(0) => {}
                    _ => return false,
                }
            }
        }
        true
    }

    /// Stamp a piece's occupied cells into the grid.
    ///
    /// Callers are expected to have validated the position with
    /// [`Field::can_place`]; cells that fall outside the grid are
    /// dropped rather than wrapped.
    pub fn stamp(&mut self, kind: PieceKind, rotation: u8, row: i32, col: i32) {
        for mask_row in 0..MASK_SIZE {
            for mask_col in 0..MASK_SIZE {
                if mask_cell(kind, rotation, mask_row, mask_col) {
                    self.set(row + mask_row as i32, col + mask_col as i32, kind.cell_code());
                }
            }
        }
    }

    fn is_row_full(&self, row: usize) -> bool {
        self.cells[row].iter().all(|&cell| cell != 0)
    }

    /// Clear every full row, shifting the rows above down in place.
    ///
    /// Scans top to bottom; each full row found pulls everything above
    /// it down one step and zeroes the vacated top row. Returns the
    /// indices of the rows that were full, in scan order.
    pub fn clear_full_rows(&mut self) -> ArrayVec<usize, FIELD_ROWS> {
        let mut cleared = ArrayVec::new();
        for row in 0..FIELD_ROWS {
            if !self.is_row_full(row) {
                continue;
            }
            cleared.push(row);
            for shift_row in (1..=row).rev() {
                self.cells[shift_row] = self.cells[shift_row - 1];
            }
            self.cells[0] = [0; FIELD_COLS];
        }
        cleared
    }

    /// Copy the grid and superimpose a piece non-destructively.
    ///
    /// The committed grid is left untouched; this is the render frame.
    pub fn overlaid(&self, kind: PieceKind, rotation: u8, row: i32, col: i32) -> Grid {
        let mut frame = self.cells;
        for mask_row in 0..MASK_SIZE {
            for mask_col in 0..MASK_SIZE {
                if !mask_cell(kind, rotation, mask_row, mask_col) {
                    continue;
                }
                let grid_row = row + mask_row as i32;
                let grid_col = col + mask_col as i32;
                if Self::in_bounds(grid_row, grid_col) {
                    frame[grid_row as usize][grid_col as usize] = kind.cell_code();
                }
            }
        }
        frame
    }
}

impl Default for Field {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fill_row(field: &mut Field, row: usize) {
        for col in 0..FIELD_COLS {
            field.set(row as i32, col as i32, 1);
        }
    }

    #[test]
    fn can_place_on_empty_field() {
        let field = Field::new();
        assert!(field.can_place(PieceKind::T, 0, 0, 3));
    }

    #[test]
    fn can_place_rejects_out_of_bounds() {
        let field = Field::new();
        // I at rotation 0 occupies mask columns 0..4.
        assert!(!field.can_place(PieceKind::I, 0, 0, -1));
        assert!(!field.can_place(PieceKind::I, 0, 0, FIELD_COLS as i32 - 3));
        assert!(!field.can_place(PieceKind::I, 0, FIELD_ROWS as i32 - 2, 3));
    }

    #[test]
    fn negative_anchor_is_fine_if_mask_fits() {
        let field = Field::new();
        // O occupies mask columns 1..3, so anchor column -1 still lands
        // its cells on columns 0..2.
        assert!(field.can_place(PieceKind::O, 0, 0, -1));
        assert!(!field.can_place(PieceKind::O, 0, 0, -2));
    }

    #[test]
    fn can_place_rejects_occupied_cells() {
        let mut field = Field::new();
        field.set(2, 3, 5);
        assert!(!field.can_place(PieceKind::I, 0, 0, 3));
        assert!(field.can_place(PieceKind::I, 0, 1, 3));
    }

    #[test]
    fn stamp_writes_cell_codes() {
        let mut field = Field::new();
        field.stamp(PieceKind::O, 0, 0, 3);
        let code = PieceKind::O.cell_code();
        assert_eq!(field.get(1, 4), Some(code));
        assert_eq!(field.get(1, 5), Some(code));
        assert_eq!(field.get(2, 4), Some(code));
        assert_eq!(field.get(2, 5), Some(code));
        assert_eq!(field.get(0, 4), Some(0));
    }

    #[test]
    fn clear_single_full_row_shifts_down() {
        let mut field = Field::new();
        field.set(18, 0, 3);
        fill_row(&mut field, 19);
        let cleared = field.clear_full_rows();
        assert_eq!(cleared.as_slice(), &[19]);
        // The marker from row 18 moved down into row 19.
        assert_eq!(field.get(19, 0), Some(3));
        assert_eq!(field.get(18, 0), Some(0));
    }

    #[test]
    fn clear_counts_stacked_full_rows() {
        let mut field = Field::new();
        for row in 16..20 {
            fill_row(&mut field, row);
        }
        let cleared = field.clear_full_rows();
        assert_eq!(cleared.len(), 4);
        assert!(field.cells().iter().flatten().all(|&cell| cell == 0));
    }

    #[test]
    fn partial_rows_survive_a_clear() {
        let mut field = Field::new();
        fill_row(&mut field, 19);
        field.set(19, 4, 0); // one hole
        let cleared = field.clear_full_rows();
        assert!(cleared.is_empty());
        assert_eq!(field.get(19, 0), Some(1));
        assert_eq!(field.get(19, 4), Some(0));
    }

    #[test]
    fn overlay_does_not_touch_committed_grid() {
        let field = Field::new();
        let frame = field.overlaid(PieceKind::T, 0, 0, 3);
        let painted: usize = frame.iter().flatten().filter(|&&c| c != 0).count();
        assert_eq!(painted, 4);
        assert!(field.cells().iter().flatten().all(|&cell| cell == 0));
    }
}
