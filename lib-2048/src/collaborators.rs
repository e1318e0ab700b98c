use std::io;

use crate::state::{CellChange, GameState};

/// Presentation of the board.
pub trait Renderer {
    /// Draws `state`. Only the cells in `changes` differ from the previous call.
    fn render(
        &mut self,
        state: &GameState,
        changes: &[CellChange],
        high_score: u32,
    ) -> io::Result<()>;
}

pub trait HighScoreStore {
    fn load_high_score(&mut self) -> io::Result<u32>;

    fn save_high_score(&mut self, score: u32) -> io::Result<()>;
}

/// A store that keeps the high score for the lifetime of the process.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MemoryStore {
    pub high_score: u32,
    pub saves: usize,
}

impl MemoryStore {
    pub const fn new(high_score: u32) -> Self {
        Self {
            high_score,
            saves: 0,
        }
    }
}

impl HighScoreStore for MemoryStore {
    fn load_high_score(&mut self) -> io::Result<u32> {
        Ok(self.high_score)
    }

    fn save_high_score(&mut self, score: u32) -> io::Result<()> {
        self.high_score = score;
        self.saves += 1;

        Ok(())
    }
}
