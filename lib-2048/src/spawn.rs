use std::collections::VecDeque;

use rand::Rng;

use crate::{Grid, Position, SpawnTile};

/// Source of the two draws behind a spawn.
///
/// Implemented for every [`Rng`], so a seeded generator gives reproducible games. Tests can
/// script exact spawns with [`ScriptedSource`].
pub trait SpawnSource {
    /// An index in `0..count` selecting one of `count` empty cells. Larger values are reduced
    /// modulo `count`.
    fn pick_cell(&mut self, count: usize) -> usize;

    fn pick_tile(&mut self) -> SpawnTile;
}

impl<R: Rng> SpawnSource for R {
    fn pick_cell(&mut self, count: usize) -> usize {
        self.gen_range(0..count)
    }

    fn pick_tile(&mut self) -> SpawnTile {
        if self.gen_bool(0.1) {
            SpawnTile::Four
        } else {
            SpawnTile::Two
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Spawned {
    pub position: Position,
    pub tile: SpawnTile,
}

/// Places a 2 or a 4 in a uniformly chosen empty cell.
///
/// A full grid is returned as is with `None`: the caller decides what that means.
pub fn spawn_tile(grid: Grid, source: &mut impl SpawnSource) -> (Grid, Option<Spawned>) {
    let count = grid.empty_count();

    if count == 0 {
        return (grid, None);
    }

    let nth = source.pick_cell(count) % count;
    let tile = source.pick_tile();

    match grid.place_spawn(nth, tile) {
        Some((new_grid, position)) => (new_grid, Some(Spawned { position, tile })),
        None => (grid, None),
    }
}

/// A [`SpawnSource`] replaying fixed draws. Once a queue runs dry it picks the first empty cell
/// and a 2.
#[derive(Clone, Debug, Default)]
pub struct ScriptedSource {
    cells: VecDeque<usize>,
    tiles: VecDeque<SpawnTile>,
}

impl ScriptedSource {
    pub fn new(
        cells: impl IntoIterator<Item = usize>,
        tiles: impl IntoIterator<Item = SpawnTile>,
    ) -> Self {
        Self {
            cells: cells.into_iter().collect(),
            tiles: tiles.into_iter().collect(),
        }
    }
}

impl SpawnSource for ScriptedSource {
    fn pick_cell(&mut self, _count: usize) -> usize {
        self.cells.pop_front().unwrap_or(0)
    }

    fn pick_tile(&mut self) -> SpawnTile {
        self.tiles.pop_front().unwrap_or(SpawnTile::Two)
    }
}
