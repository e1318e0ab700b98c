pub mod direction;
pub mod error;
pub mod grid;
pub mod line;
pub mod logic;
pub mod metrics;

pub use direction::Direction;
pub use error::BoardError;
pub use grid::{Grid, Position, SpawnTile};
pub use line::{compact_and_merge, LineOutcome};
pub use logic::{is_terminal, shift, try_all_moves, try_move, MoveOutcome};

/// Side length of the board.
pub const SIZE: usize = 4;

pub type Cell = u32;

pub type Matrix<T> = [[T; SIZE]; SIZE];

pub(crate) fn mirror<T: Copy>(matrix: Matrix<T>) -> Matrix<T> {
    matrix.map(|mut row| {
        row.reverse();
        row
    })
}

pub(crate) fn transpose<T: Copy>(matrix: Matrix<T>) -> Matrix<T> {
    let mut out = matrix;

    for (i, row) in matrix.iter().enumerate() {
        for (j, &cell) in row.iter().enumerate() {
            out[j][i] = cell;
        }
    }

    out
}

/// Reflection along the anti-diagonal. Row `i` of the result is column `SIZE - 1 - i` read from
/// the bottom up, so a left move on the result is a down move on the input.
pub(crate) fn transpose_rotate<T: Copy>(matrix: Matrix<T>) -> Matrix<T> {
    let mut out = matrix;

    for (i, row) in matrix.iter().enumerate() {
        for (j, &cell) in row.iter().enumerate() {
            out[SIZE - 1 - j][SIZE - 1 - i] = cell;
        }
    }

    out
}
