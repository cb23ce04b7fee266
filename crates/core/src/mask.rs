//! Piece masks and rotation geometry.
//!
//! Each kind stores a single 4x4 occupancy mask at rotation 0. Rotated
//! occupancy is derived by inverse-rotating the queried coordinate, so
//! no per-rotation tables exist.

use blockfall_types::{PieceKind, KIND_COUNT, MASK_SIZE};

/// Base (rotation 0) occupancy masks, indexed by `PieceKind::index()`.
const BASE_MASKS: [[[bool; MASK_SIZE]; MASK_SIZE]; KIND_COUNT] = {
    const O: bool = false;
    const X: bool = true;
    [
        // I
        [[O, O, O, O], [O, O, O, O], [X, X, X, X], [O, O, O, O]],
        // O
        [[O, O, O, O], [O, X, X, O], [O, X, X, O], [O, O, O, O]],
        // S
        [[O, O, O, O], [O, O, X, X], [O, X, X, O], [O, O, O, O]],
        // Z
        [[O, O, O, O], [X, X, O, O], [O, X, X, O], [O, O, O, O]],
        // L
        [[O, O, O, O], [O, O, X, O], [X, X, X, O], [O, O, O, O]],
        // J
        [[O, O, O, O], [X, O, O, O], [X, X, X, O], [O, O, O, O]],
        // T
        [[O, O, O, O], [O, X, O, O], [X, X, X, O], [O, O, O, O]],
    ]
};

/// Whether mask-local cell `(row, col)` is occupied for `kind` rotated
/// by `rotation` clockwise quarter turns.
///
/// The rotated coordinate is mapped back onto the base mask:
/// r=0 (row,col), r=1 (3-col,row), r=2 (3-row,3-col), r=3 (col,3-row).
pub fn mask_cell(kind: PieceKind, rotation: u8, row: usize, col: usize) -> bool {
    debug_assert!(row < MASK_SIZE && col < MASK_SIZE);
    let last = MASK_SIZE - 1;
    let (src_row, src_col) = match rotation % 4 {
        0 => (row, col),
        1 => (last - col, row),
        2 => (last - row, last - col),
        _ => (col, last - row),
    };
    BASE_MASKS[kind.index()][src_row][src_col]
}

/// Render a kind's rotation-0 mask with grid cell encoding, for the
/// preview panel.
pub fn preview_mask(kind: PieceKind) -> [[u8; MASK_SIZE]; MASK_SIZE] {
    let mut out = [[0u8; MASK_SIZE]; MASK_SIZE];
    for (row, out_row) in out.iter_mut().enumerate() {
        for (col, cell) in out_row.iter_mut().enumerate() {
            if BASE_MASKS[kind.index()][row][col] {
                *cell = kind.cell_code();
            }
        }
    }
    out
}
