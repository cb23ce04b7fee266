//! Blockfall (workspace facade crate).
//!
//! Re-exports the member crates under one `blockfall::{core,store,
//! input,term,types}` namespace for the binary and the test suites.

pub use blockfall_core as core;
pub use blockfall_input as input;
pub use blockfall_store as store;
pub use blockfall_term as term;
pub use blockfall_types as types;
