//! High-score persistence boundary.
//!
//! The engine never touches the filesystem directly; it talks to a
//! [`ScoreStore`] injected at construction time. Persistence is
//! best-effort by contract: a broken store must never block gameplay,
//! so both operations absorb I/O errors.

use std::fs;
use std::io;
use std::path::PathBuf;

/// Storage for a single non-negative high score.
pub trait ScoreStore {
    /// Load the stored high score.
    ///
    /// A missing or invalid backing value reads as 0.
    fn load(&mut self) -> u32;

    /// Overwrite the stored high score. Failures are silently dropped.
    fn save(&mut self, score: u32);
}

/// File-backed store: the score as decimal text in a named file.
#[derive(Debug, Clone)]
pub struct FileScoreStore {
    path: PathBuf,
}

impl FileScoreStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn read_score(&self) -> io::Result<Option<u32>> {
        let text = fs::read_to_string(&self.path)?;
        // Unparsable or negative content counts as no score.
        Ok(text.trim().parse::<i64>().ok().and_then(|n| {
            if (0..=u32::MAX as i64).contains(&n) {
                Some(n as u32)
            } else {
                None
            }
        }))
    }

    fn write_score(&self, score: u32) -> io::Result<()> {
        fs::write(&self.path, format!("{score}\n"))
    }
}

impl ScoreStore for FileScoreStore {
    fn load(&mut self) -> u32 {
        match self.read_score() {
            Ok(Some(score)) => score,
            // Missing or corrupt file: treat as 0 and immediately put a
            // valid file back in place.
            Ok(None) | Err(_) => {
                self.save(0);
                0
            }
        }
    }

    fn save(&mut self, score: u32) {
        let _ = self.write_score(score);
    }
}

/// In-memory store for tests and benchmarks.
#[derive(Debug, Clone, Default)]
pub struct MemoryScoreStore {
    score: u32,
    pub save_count: u32,
}

impl MemoryScoreStore {
    pub fn new(score: u32) -> Self {
        Self {
            score,
            save_count: 0,
        }
    }

    pub fn score(&self) -> u32 {
        self.score
    }
}

impl ScoreStore for MemoryScoreStore {
    fn load(&mut self) -> u32 {
        self.score
    }

    fn save(&mut self, score: u32) {
        self.score = score;
        self.save_count += 1;
    }
}
