use std::fmt;

use crate::{error::BoardError, Cell, Matrix, SIZE};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub(crate) const fn from_index(index: usize) -> Self {
        Self {
            row: index / SIZE,
            col: index % SIZE,
        }
    }
}

/// The value of a newly spawned tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SpawnTile {
    Two,
    Four,
}

impl SpawnTile {
    pub const fn value(self) -> Cell {
        match self {
            Self::Two => 2,
            Self::Four => 4,
        }
    }
}

/// A 4x4 board in row-major order. Empty cells are 0, every other cell is a power of two.
///
/// There is no way to write an arbitrary cell: a `Grid` changes only through
/// [`shift`](crate::shift) and [`Grid::place_spawn`], and one built from raw rows is validated.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Grid(pub(crate) Matrix<Cell>);

impl Grid {
    pub const EMPTY: Self = Self([[0; SIZE]; SIZE]);

    /// The largest tile a game on a 4x4 board can reach.
    pub const MAX_TILE: Cell = 1 << 17;

    pub fn from_rows(rows: Matrix<Cell>) -> Result<Self, BoardError> {
        for (row, cells) in rows.iter().enumerate() {
            for (col, &value) in cells.iter().enumerate() {
                let valid = value == 0
                    || (value > 1 && value.is_power_of_two() && value <= Self::MAX_TILE);

                if !valid {
                    return Err(BoardError::InvalidTile {
                        position: Position { row, col },
                        value,
                    });
                }
            }
        }

        Ok(Self(rows))
    }

    pub const fn rows(&self) -> &Matrix<Cell> {
        &self.0
    }

    pub fn get(&self, position: Position) -> Cell {
        self.0[position.row][position.col]
    }

    pub fn cells(&self) -> impl Iterator<Item = (Position, Cell)> + '_ {
        self.0
            .iter()
            .flatten()
            .enumerate()
            .map(|(i, &cell)| (Position::from_index(i), cell))
    }

    pub fn empty_cells(&self) -> impl Iterator<Item = Position> + '_ {
        self.cells()
            .filter(|&(_, cell)| cell == 0)
            .map(|(position, _)| position)
    }

    pub fn empty_count(&self) -> usize {
        self.0.iter().flatten().filter(|&&cell| cell == 0).count()
    }

    /// Writes `tile` into the `nth` empty cell, counting in row-major order.
    ///
    /// Returns `None` if there are not more than `nth` empty cells.
    pub fn place_spawn(mut self, nth: usize, tile: SpawnTile) -> Option<(Self, Position)> {
        let position = self.empty_cells().nth(nth)?;

        self.0[position.row][position.col] = tile.value();

        Some((self, position))
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "+------+------+------+------+")?;

        for row in &self.0 {
            write!(f, "|")?;

            for &cell in row {
                if cell == 0 {
                    write!(f, "      |")?;
                } else {
                    write!(f, "{cell:^6}|")?;
                }
            }

            writeln!(f)?;
            writeln!(f, "+------+------+------+------+")?;
        }

        Ok(())
    }
}
