//! Deterministic piece generation.
//!
//! Pieces cycle in a fixed repeating order driven by a monotonically
//! increasing counter: the next kind is `counter % 7` and drawing
//! increments the counter. There is no hidden state beyond the counter
//! and no randomization.

use blockfall_types::{PieceKind, KIND_COUNT};

#[derive(Debug, Clone, Default)]
pub struct PieceCycle {
    counter: u32,
}

impl PieceCycle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Kind the next [`PieceCycle::draw`] will return.
    pub fn peek(&self) -> PieceKind {
        PieceKind::from_index(self.counter as usize % KIND_COUNT)
    }

    /// Draw the next kind and advance the cycle.
    pub fn draw(&mut self) -> PieceKind {
        let kind = self.peek();
        self.counter = self.counter.wrapping_add(1);
        kind
    }

    /// Restart the cycle from the beginning of the kind order.
    pub fn reset(&mut self) {
        self.counter = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use blockfall_types::ALL_KINDS;

    #[test]
    fn draws_kinds_in_fixed_order() {
        let mut cycle = PieceCycle::new();
        for expected in ALL_KINDS {
            assert_eq!(cycle.draw(), expected);
        }
    }

    #[test]
    fn cycle_repeats_after_seven() {
        let mut cycle = PieceCycle::new();
        let first: Vec<_> = (0..7).map(|_| cycle.draw()).collect();
        let second: Vec<_> = (0..7).map(|_| cycle.draw()).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn peek_does_not_advance() {
        let mut cycle = PieceCycle::new();
        assert_eq!(cycle.peek(), cycle.peek());
        assert_eq!(cycle.peek(), cycle.draw());
    }

    #[test]
    fn reset_restarts_the_order() {
        let mut cycle = PieceCycle::new();
        cycle.draw();
        cycle.draw();
        cycle.reset();
        assert_eq!(cycle.draw(), ALL_KINDS[0]);
    }
}
