//! Game engine core: grid, geometry, state machine and scoring.
//!
//! The engine is a plain owned value with a synchronous two-call
//! surface (`submit_action` / `advance_and_snapshot`). It performs no
//! I/O of its own; high-score persistence goes through the injected
//! [`blockfall_store::ScoreStore`].

pub mod engine;
pub mod field;
pub mod mask;
pub mod queue;
pub mod scoring;
pub mod snapshot;

pub use engine::{ActivePiece, Engine};
pub use field::{Field, Grid};
pub use mask::{mask_cell, preview_mask};
pub use queue::PieceCycle;
pub use scoring::{level_for_score, score_for_clear, speed_for_level};
pub use snapshot::GameSnapshot;
