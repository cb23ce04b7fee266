//! Read-only view of the engine state, rebuilt on every request.

use blockfall_types::{Status, FIELD_COLS, FIELD_ROWS, MASK_SIZE};

use crate::field::Grid;

/// Everything the rendering layer needs for one frame.
///
/// `frame` is the committed grid with the falling piece superimposed;
/// it is derived data and never written back into the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameSnapshot {
    pub frame: Grid,
    pub preview: [[u8; MASK_SIZE]; MASK_SIZE],
    pub score: u32,
    pub high_score: u32,
    pub level: u32,
    pub speed: u32,
    pub status: Status,
}

impl GameSnapshot {
    /// Number of non-empty cells in the render frame.
    pub fn active_cell_count(&self) -> usize {
        self.frame.iter().flatten().filter(|&&cell| cell != 0).count()
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            frame: [[0; FIELD_COLS]; FIELD_ROWS],
            preview: [[0; MASK_SIZE]; MASK_SIZE],
            score: 0,
            high_score: 0,
            level: 1,
            speed: 12,
            status: Status::Running,
        }
    }
}
