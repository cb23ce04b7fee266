//! Core types shared across the application.
//!
//! This crate contains pure data types and constants with no external
//! dependencies.

/// Playfield dimensions (rows x columns).
pub const FIELD_ROWS: usize = 20;
pub const FIELD_COLS: usize = 10;

/// Side length of a piece's bounding mask.
pub const MASK_SIZE: usize = 4;

/// Runner frame period in milliseconds.
///
/// Gravity itself is measured in frames: the engine descends one row
/// every `speed` frames, so level 1 (speed 12) falls every 600ms.
pub const TICK_MS: u32 = 50;

/// Speed curve bounds (gravity frames per row).
pub const SPEED_MAX: u32 = 12;
pub const SPEED_MIN: u32 = 2;

/// Level bounds.
pub const LEVEL_MIN: u32 = 1;
pub const LEVEL_MAX: u32 = 10;

/// Score needed per level step.
pub const SCORE_PER_LEVEL: u32 = 600;

/// Points awarded by number of rows cleared in a single lock (index =
/// rows cleared, capped at 4).
pub const CLEAR_SCORES: [u32; 5] = [0, 100, 300, 700, 1500];

/// Default high-score file name.
pub const SCORE_FILE: &str = "high_score.dat";

/// Tetromino piece kinds.
///
/// The discriminant order is load-bearing: grid cells store
/// `index + 1`, and the deterministic piece cycle walks this order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    O,
    S,
    Z,
    L,
    J,
    T,
}

/// Number of piece kinds.
pub const KIND_COUNT: usize = 7;

/// All kinds in cycle order.
pub const ALL_KINDS: [PieceKind; KIND_COUNT] = [
    PieceKind::I,
    PieceKind::O,
    PieceKind::S,
    PieceKind::Z,
    PieceKind::L,
    PieceKind::J,
    PieceKind::T,
];

impl PieceKind {
    /// Index in cycle order (0..7).
    pub fn index(self) -> usize {
        match self {
            PieceKind::I => 0,
            PieceKind::O => 1,
            PieceKind::S => 2,
            PieceKind::Z => 3,
            PieceKind::L => 4,
            PieceKind::J => 5,
            PieceKind::T => 6,
        }
    }

    /// Kind for a cycle index; wraps modulo the kind count.
    pub fn from_index(index: usize) -> Self {
        ALL_KINDS[index % KIND_COUNT]
    }

    /// Grid cell encoding for this kind (1..=7; 0 means empty).
    pub fn cell_code(self) -> u8 {
        self.index() as u8 + 1
    }

    /// Inverse of [`PieceKind::cell_code`]. `0` and out-of-range codes
    /// map to `None`.
    pub fn from_cell_code(code: u8) -> Option<Self> {
        match code {
            1..=7 => Some(Self::from_index(code as usize - 1)),
            _ => None,
        }
    }
}

/// Phases of the game state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Start,
    Spawn,
    Falling,
    Lock,
    GameOver,
    Pause,
}

/// Discrete inputs to the dispatcher.
///
/// `SoftDrop` is reserved: no user action maps to it and no phase binds
/// it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    Start,
    Rotate,
    MoveLeft,
    MoveRight,
    SoftDrop,
    HardDrop,
    PauseToggle,
    Quit,
    Tick,
}

/// Coarse user actions accepted by the public interface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserAction {
    Start,
    Pause,
    Terminate,
    MoveLeft,
    MoveRight,
    /// Reserved; currently a no-op.
    MoveUp,
    /// Maps to a hard drop.
    MoveDown,
    Rotate,
}

/// Tri-state status exported in snapshots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Running = 0,
    Paused = 1,
    GameOver = 2,
}
