use crate::{grid::Grid, Cell};

/// Base-2 logarithm of a tile, 0 for an empty cell.
pub const fn exponent(cell: Cell) -> u32 {
    if cell == 0 {
        0
    } else {
        cell.trailing_zeros()
    }
}

pub fn max_tile(grid: &Grid) -> Cell {
    grid.rows().iter().flatten().copied().max().unwrap_or(0)
}

/// Sum of all tile values. Moves never change it: a merge replaces two tiles by one of the same
/// total.
pub fn tile_sum(grid: &Grid) -> u64 {
    grid.rows().iter().flatten().map(|&cell| u64::from(cell)).sum()
}

pub fn tile_count(grid: &Grid) -> usize {
    crate::SIZE * crate::SIZE - grid.empty_count()
}
