use crate::{
    direction::Direction, grid::Grid, line, mirror, transpose, transpose_rotate, Cell, Matrix,
    SIZE,
};

type Shifted = (Matrix<Cell>, u32, Matrix<bool>);

const MOVE_FUNCTIONS: [fn(Matrix<Cell>) -> Shifted; 4] = [move_up, move_down, move_right, move_left];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MoveOutcome {
    pub grid: Grid,
    /// Set iff at least one cell of `grid` differs from the input.
    pub changed: bool,
    pub score_delta: u32,
    /// Cells of `grid` that hold a tile produced by a merge in this move.
    pub merged: Matrix<bool>,
}

fn do_move(rows: Matrix<Cell>) -> Shifted {
    let mut new_rows = [[0; SIZE]; SIZE];
    let mut merged = [[false; SIZE]; SIZE];

    let score = rows.iter().enumerate().fold(0, |score, (i, &row)| {
        let outcome = line::compact_and_merge(row);

        new_rows[i] = outcome.line;
        merged[i] = outcome.merged;

        score + outcome.score
    });

    (new_rows, score, merged)
}

fn move_up(rows: Matrix<Cell>) -> Shifted {
    let (new_rows, score, merged) = do_move(transpose(rows));

    (transpose(new_rows), score, transpose(merged))
}

fn move_down(rows: Matrix<Cell>) -> Shifted {
    let (new_rows, score, merged) = do_move(transpose_rotate(rows));

    (transpose_rotate(new_rows), score, transpose_rotate(merged))
}

fn move_right(rows: Matrix<Cell>) -> Shifted {
    let (new_rows, score, merged) = do_move(mirror(rows));

    (mirror(new_rows), score, mirror(merged))
}

fn move_left(rows: Matrix<Cell>) -> Shifted {
    do_move(rows)
}

/// Slides every line of `grid` in `direction`. Pure: spawning and scoring are left to the caller.
pub fn shift(grid: Grid, direction: Direction) -> MoveOutcome {
    let (rows, score_delta, merged) = MOVE_FUNCTIONS[direction as usize](grid.0);
    let new_grid = Grid(rows);

    MoveOutcome {
        grid: new_grid,
        changed: new_grid != grid,
        score_delta,
        merged,
    }
}

pub fn try_move(grid: Grid, direction: Direction) -> Option<MoveOutcome> {
    let outcome = shift(grid, direction);

    outcome.changed.then_some(outcome)
}

/// All four moves, indexed by `Direction as usize`.
pub fn try_all_moves(grid: Grid) -> [Option<MoveOutcome>; 4] {
    Direction::ALL.map(|direction| try_move(grid, direction))
}

/// True iff the grid is full and no two orthogonal neighbours are equal.
pub fn is_terminal(grid: Grid) -> bool {
    let rows = grid.rows();

    (0..SIZE).all(|i| {
        (0..SIZE).all(|j| {
            let cell = rows[i][j];

            cell != 0
                && (j + 1 == SIZE || cell != rows[i][j + 1])
                && (i + 1 == SIZE || cell != rows[i + 1][j])
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(rows: Matrix<Cell>) -> Grid {
        Grid::from_rows(rows).unwrap()
    }

    const MIXED: Matrix<Cell> = [[2, 2, 0, 0], [0, 4, 4, 0], [2, 0, 2, 0], [8, 8, 8, 8]];

    #[test]
    fn left_merges_rows_towards_column_zero() {
        let outcome = shift(grid(MIXED), Direction::Left);

        assert_eq!(
            outcome.grid.rows(),
            &[[4, 0, 0, 0], [8, 0, 0, 0], [4, 0, 0, 0], [16, 16, 0, 0]]
        );
        assert_eq!(outcome.score_delta, 4 + 8 + 4 + 32);
        assert!(outcome.changed);
        assert!(outcome.merged[3][0] && outcome.merged[3][1]);
    }

    #[test]
    fn right_merges_rows_towards_last_column() {
        let outcome = shift(grid(MIXED), Direction::Right);

        assert_eq!(
            outcome.grid.rows(),
            &[[0, 0, 0, 4], [0, 0, 0, 8], [0, 0, 0, 4], [0, 0, 16, 16]]
        );
        assert_eq!(outcome.score_delta, 48);
        assert!(outcome.merged[0][3]);
        assert!(!outcome.merged[0][0]);
    }

    #[test]
    fn up_and_down_merge_columns() {
        let start = grid([[2, 0, 2, 8], [2, 4, 0, 8], [0, 4, 2, 8], [0, 0, 0, 8]]);

        let up = shift(start, Direction::Up);
        assert_eq!(
            up.grid.rows(),
            &[[4, 8, 4, 16], [0, 0, 0, 16], [0, 0, 0, 0], [0, 0, 0, 0]]
        );
        assert_eq!(up.score_delta, 48);
        assert!(up.merged[0][0] && up.merged[1][3]);

        let down = shift(start, Direction::Down);
        assert_eq!(
            down.grid.rows(),
            &[[0, 0, 0, 0], [0, 0, 0, 0], [0, 0, 0, 16], [4, 8, 4, 16]]
        );
        assert_eq!(down.score_delta, 48);
        assert!(down.merged[3][0] && down.merged[2][3]);
    }

    #[test]
    fn down_keeps_trailing_tile_at_far_end() {
        let start = grid([[2, 0, 0, 0], [2, 0, 0, 0], [2, 0, 0, 0], [0, 0, 0, 0]]);

        let outcome = shift(start, Direction::Down);

        assert_eq!(outcome.grid.rows()[3][0], 4);
        assert_eq!(outcome.grid.rows()[2][0], 2);
        assert_eq!(outcome.score_delta, 4);
    }

    #[test]
    fn merging_capped_tiles_keeps_both_halves() {
        let start = grid([[Grid::MAX_TILE, Grid::MAX_TILE, 0, 0], [0; 4], [0; 4], [0; 4]]);

        let outcome = shift(start, Direction::Left);

        assert_eq!(outcome.grid.rows()[0], [Grid::MAX_TILE * 2, 0, 0, 0]);
        assert_eq!(outcome.score_delta, Grid::MAX_TILE * 2);
    }

    #[test]
    fn blocked_move_is_unchanged() {
        let start = grid([[2, 0, 0, 0], [4, 0, 0, 0], [8, 0, 0, 0], [16, 0, 0, 0]]);

        let outcome = shift(start, Direction::Left);

        assert!(!outcome.changed);
        assert_eq!(outcome.grid, start);
        assert_eq!(outcome.score_delta, 0);
        assert!(try_move(start, Direction::Left).is_none());
        assert!(try_move(start, Direction::Right).is_some());
    }

    #[test]
    fn pure_shift_counts_as_changed() {
        let start = grid([[0, 2, 0, 4], [0; 4], [0; 4], [0; 4]]);

        let outcome = shift(start, Direction::Left);

        assert!(outcome.changed);
        assert_eq!(outcome.score_delta, 0);
    }

    #[test]
    fn try_all_moves_is_indexed_by_direction() {
        let start = grid([[2, 0, 0, 0], [0; 4], [0; 4], [0; 4]]);
        let moves = try_all_moves(start);

        assert!(moves[Direction::Up as usize].is_none());
        assert!(moves[Direction::Left as usize].is_none());
        assert!(moves[Direction::Down as usize].is_some());
        assert!(moves[Direction::Right as usize].is_some());
    }

    #[test]
    fn checkerboard_is_terminal() {
        let board = grid([[2, 4, 2, 4], [4, 2, 4, 2], [2, 4, 2, 4], [4, 2, 4, 2]]);

        assert!(is_terminal(board));
        assert!(try_all_moves(board).iter().all(Option::is_none));
    }

    #[test]
    fn full_board_with_a_pair_is_not_terminal() {
        let horizontal = grid([[2, 2, 4, 8], [4, 8, 16, 32], [8, 16, 32, 64], [16, 32, 64, 128]]);
        let vertical = grid([[2, 4, 8, 16], [2, 8, 16, 32], [4, 16, 32, 64], [8, 32, 64, 128]]);

        assert!(!is_terminal(horizontal));
        assert!(!is_terminal(vertical));
    }

    #[test]
    fn board_with_a_gap_is_not_terminal() {
        let board = grid([[2, 4, 2, 4], [4, 2, 4, 2], [2, 4, 0, 4], [4, 2, 4, 2]]);

        assert!(!is_terminal(board));
        assert!(!is_terminal(Grid::EMPTY));
    }
}
