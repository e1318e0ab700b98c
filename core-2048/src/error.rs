use std::{error::Error, fmt};

use crate::{grid::Position, Cell};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BoardError {
    /// A raw direction index outside `0..4`.
    InvalidDirection(u8),
    /// A cell that is neither empty nor a power of two in `2..=Grid::MAX_TILE`.
    InvalidTile { position: Position, value: Cell },
}

impl fmt::Display for BoardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidDirection(value) => write!(f, "invalid direction index {value}"),
            Self::InvalidTile { position, value } => write!(
                f,
                "invalid tile {value} at row {}, column {}",
                position.row, position.col
            ),
        }
    }
}

impl Error for BoardError {}
