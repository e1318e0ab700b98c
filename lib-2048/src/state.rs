use crate::{
    is_terminal,
    spawn::{self, SpawnSource, Spawned},
    Cell, Direction, Grid, Matrix, Position,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct GameState {
    grid: Grid,
    score: u32,
    game_over: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChangeKind {
    /// The cell holds a tile that slid in from elsewhere.
    Moved,
    /// The cell holds a tile produced by a merge this turn.
    Merged,
    /// The cell was emptied.
    Cleared,
    /// The cell holds a newly spawned tile.
    Spawned,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CellChange {
    pub position: Position,
    pub before: Cell,
    pub after: Cell,
    pub kind: ChangeKind,
}

/// The result of feeding one direction to a [`GameState`].
///
/// `changes` lists, in row-major order, every cell that a renderer has to touch. Cells not listed
/// are identical in `state` and the previous state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Turn {
    pub state: GameState,
    pub changed: bool,
    pub score_delta: u32,
    pub spawned: Option<Spawned>,
    pub changes: Vec<CellChange>,
}

impl GameState {
    /// An empty grid with two spawned tiles.
    pub fn initialize(source: &mut impl SpawnSource) -> Self {
        let (grid, _) = spawn::spawn_tile(Grid::EMPTY, source);
        let (grid, _) = spawn::spawn_tile(grid, source);

        Self::from_grid(grid, 0)
    }

    /// A fresh game. Equivalent to [`GameState::initialize`]; the previous score is not kept.
    pub fn restart(source: &mut impl SpawnSource) -> Self {
        Self::initialize(source)
    }

    /// A state resumed from an existing grid and score.
    pub fn from_grid(grid: Grid, score: u32) -> Self {
        Self {
            grid,
            score,
            game_over: is_terminal(grid),
        }
    }

    pub const fn grid(&self) -> &Grid {
        &self.grid
    }

    pub const fn score(&self) -> u32 {
        self.score
    }

    pub const fn is_game_over(&self) -> bool {
        self.game_over
    }

    /// Moves the tiles without spawning.
    ///
    /// The returned state carries the new grid and the increased score. Moves that change nothing,
    /// and every move once the game is over, give back the current state untouched.
    pub fn shift(&self, direction: Direction) -> Turn {
        if self.game_over {
            return Turn::unchanged(*self);
        }

        let outcome = crate::shift(self.grid, direction);

        if !outcome.changed {
            return Turn::unchanged(*self);
        }

        Turn {
            state: Self {
                grid: outcome.grid,
                score: self.score.saturating_add(outcome.score_delta),
                game_over: false,
            },
            changed: true,
            score_delta: outcome.score_delta,
            spawned: None,
            changes: diff(&self.grid, &outcome.grid, &outcome.merged),
        }
    }

    /// A full turn: move, then on a change spawn a tile and re-evaluate the terminal state.
    pub fn play(&self, direction: Direction, source: &mut impl SpawnSource) -> Turn {
        let mut turn = self.shift(direction);

        if !turn.changed {
            return turn;
        }

        let (grid, spawned) = spawn::spawn_tile(turn.state.grid, source);

        turn.state.grid = grid;
        turn.state.game_over = is_terminal(grid);

        if let Some(spawned) = spawned {
            turn.record_spawn(self.grid.get(spawned.position), spawned);
        }

        turn
    }
}

impl Turn {
    fn unchanged(state: GameState) -> Self {
        Self {
            state,
            changed: false,
            score_delta: 0,
            spawned: None,
            changes: Vec::new(),
        }
    }

    /// Replaces `previous` with an unrelated `next` state, as on a restart. Every tile of `next`
    /// counts as spawned.
    pub fn replacing(previous: &GameState, next: GameState) -> Self {
        let changes = previous
            .grid
            .cells()
            .zip(next.grid.cells())
            .filter(|&((_, before), (_, after))| before != 0 || after != 0)
            .map(|((position, before), (_, after))| CellChange {
                position,
                before,
                after,
                kind: if after == 0 {
                    ChangeKind::Cleared
                } else {
                    ChangeKind::Spawned
                },
            })
            .collect();

        Self {
            state: next,
            changed: true,
            score_delta: 0,
            spawned: None,
            changes,
        }
    }

    fn record_spawn(&mut self, before: Cell, spawned: Spawned) {
        let change = CellChange {
            position: spawned.position,
            before,
            after: spawned.tile.value(),
            kind: ChangeKind::Spawned,
        };

        match self
            .changes
            .binary_search_by_key(&spawned.position, |change| change.position)
        {
            Ok(i) => self.changes[i] = change,
            Err(i) => self.changes.insert(i, change),
        }

        self.spawned = Some(spawned);
    }
}

fn diff(before: &Grid, after: &Grid, merged: &Matrix<bool>) -> Vec<CellChange> {
    before
        .cells()
        .zip(after.cells())
        .filter_map(|((position, old), (_, new))| {
            let kind = if merged[position.row][position.col] {
                ChangeKind::Merged
            } else if old == new {
                return None;
            } else if new == 0 {
                ChangeKind::Cleared
            } else {
                ChangeKind::Moved
            };

            Some(CellChange {
                position,
                before: old,
                after: new,
                kind,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::*;
    use crate::{ScriptedSource, SpawnTile};

    fn state(rows: Matrix<Cell>, score: u32) -> GameState {
        GameState::from_grid(Grid::from_rows(rows).unwrap(), score)
    }

    #[test]
    fn initialize_places_two_tiles() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let state = GameState::initialize(&mut rng);

        assert_eq!(state.grid().empty_count(), 14);
        assert_eq!(state.score(), 0);
        assert!(!state.is_game_over());
        assert!(state
            .grid()
            .cells()
            .all(|(_, cell)| matches!(cell, 0 | 2 | 4)));
    }

    #[test]
    fn same_seed_same_game() {
        let mut rng1 = ChaCha8Rng::seed_from_u64(54321);
        let mut rng2 = ChaCha8Rng::seed_from_u64(54321);

        let mut state1 = GameState::initialize(&mut rng1);
        let mut state2 = GameState::initialize(&mut rng2);

        for direction in [Direction::Left, Direction::Up, Direction::Right, Direction::Down] {
            state1 = state1.play(direction, &mut rng1).state;
            state2 = state2.play(direction, &mut rng2).state;

            assert_eq!(state1, state2);
        }
    }

    #[test]
    fn shift_adds_score_without_spawning() {
        let start = state([[2, 2, 0, 0], [0; 4], [0; 4], [0; 4]], 10);

        let turn = start.shift(Direction::Left);

        assert!(turn.changed);
        assert_eq!(turn.score_delta, 4);
        assert_eq!(turn.state.score(), 14);
        assert_eq!(turn.state.grid().rows()[0], [4, 0, 0, 0]);
        assert_eq!(turn.state.grid().empty_count(), 15);
        assert_eq!(turn.spawned, None);
    }

    #[test]
    fn resumed_score_saturates() {
        let start = state(
            [[Grid::MAX_TILE, Grid::MAX_TILE, 0, 0], [0; 4], [0; 4], [0; 4]],
            u32::MAX - 1,
        );

        let turn = start.shift(Direction::Left);

        assert_eq!(turn.score_delta, Grid::MAX_TILE * 2);
        assert_eq!(turn.state.score(), u32::MAX);
        assert_eq!(turn.state.grid().rows()[0], [Grid::MAX_TILE * 2, 0, 0, 0]);
    }

    #[test]
    fn unchanged_move_does_not_spawn() {
        let start = state([[2, 0, 0, 0], [4, 0, 0, 0], [8, 0, 0, 0], [16, 0, 0, 0]], 0);
        let mut source = ScriptedSource::new([0], [SpawnTile::Four]);

        let turn = start.play(Direction::Left, &mut source);

        assert!(!turn.changed);
        assert_eq!(turn.state, start);
        assert!(turn.changes.is_empty());
        assert_eq!(turn.spawned, None);
    }

    #[test]
    fn changes_describe_merge_slide_and_spawn() {
        let start = state([[0, 2, 2, 4], [0; 4], [0; 4], [0; 4]], 0);
        // After the move the empty cells are (0, 2), (0, 3), (1, 0), ...
        let mut source = ScriptedSource::new([1], [SpawnTile::Two]);

        let turn = start.play(Direction::Left, &mut source);

        assert_eq!(turn.state.grid().rows()[0], [4, 4, 0, 2]);
        assert_eq!(
            turn.changes,
            [
                CellChange {
                    position: Position { row: 0, col: 0 },
                    before: 0,
                    after: 4,
                    kind: ChangeKind::Merged,
                },
                CellChange {
                    position: Position { row: 0, col: 1 },
                    before: 2,
                    after: 4,
                    kind: ChangeKind::Moved,
                },
                CellChange {
                    position: Position { row: 0, col: 2 },
                    before: 2,
                    after: 0,
                    kind: ChangeKind::Cleared,
                },
                CellChange {
                    position: Position { row: 0, col: 3 },
                    before: 4,
                    after: 2,
                    kind: ChangeKind::Spawned,
                },
            ]
        );
    }

    #[test]
    fn spawn_into_previously_empty_cell_is_inserted_in_order() {
        let start = state([[0, 0, 0, 2], [0; 4], [0; 4], [0; 4]], 0);
        // Empty after the move: (0, 1), (0, 2), (0, 3), (1, 0), ...
        let mut source = ScriptedSource::new([3], [SpawnTile::Four]);

        let turn = start.play(Direction::Left, &mut source);

        let positions: Vec<_> = turn.changes.iter().map(|c| c.position).collect();

        assert_eq!(
            positions,
            [
                Position { row: 0, col: 0 },
                Position { row: 0, col: 3 },
                Position { row: 1, col: 0 },
            ]
        );
        assert_eq!(turn.changes[2].kind, ChangeKind::Spawned);
        assert_eq!(turn.changes[2].after, 4);
    }

    #[test]
    fn merge_into_equal_value_is_still_reported() {
        let start = state([[4, 4, 2, 2], [0; 4], [0; 4], [0; 4]], 0);

        let turn = start.shift(Direction::Left);

        assert_eq!(turn.state.grid().rows()[0], [8, 4, 0, 0]);
        assert_eq!(turn.changes[1].kind, ChangeKind::Merged);
        assert_eq!(turn.changes[1].before, turn.changes[1].after);
    }

    #[test]
    fn final_spawn_can_end_the_game() {
        let start = state([[2, 4, 2, 4], [4, 2, 4, 2], [2, 4, 2, 4], [2, 4, 2, 0]], 100);
        let mut source = ScriptedSource::new([0], [SpawnTile::Four]);

        let turn = start.play(Direction::Right, &mut source);

        assert!(turn.changed);
        assert_eq!(turn.state.grid().rows()[3], [4, 2, 4, 2]);
        assert!(turn.state.is_game_over());
        assert_eq!(turn.state.score(), 100);
    }

    #[test]
    fn game_over_state_ignores_moves() {
        let over = state([[2, 4, 2, 4], [4, 2, 4, 2], [2, 4, 2, 4], [4, 2, 4, 2]], 5);
        let mut source = ScriptedSource::default();

        assert!(over.is_game_over());

        for direction in Direction::iter() {
            let turn = over.play(direction, &mut source);

            assert!(!turn.changed);
            assert_eq!(turn.state, over);
        }
    }

    #[test]
    fn replacing_clears_old_tiles_and_spawns_new_ones() {
        let old = state([[8, 0, 0, 0], [0; 4], [0; 4], [0; 4]], 40);
        let next = state([[0, 2, 0, 0], [0; 4], [0; 4], [0, 0, 0, 4]], 0);

        let turn = Turn::replacing(&old, next);

        let kinds: Vec<_> = turn.changes.iter().map(|c| (c.position, c.kind)).collect();

        assert_eq!(
            kinds,
            [
                (Position { row: 0, col: 0 }, ChangeKind::Cleared),
                (Position { row: 0, col: 1 }, ChangeKind::Spawned),
                (Position { row: 3, col: 3 }, ChangeKind::Spawned),
            ]
        );
        assert_eq!(turn.state.score(), 0);
    }
}
