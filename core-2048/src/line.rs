use crate::{Cell, SIZE};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LineOutcome {
    pub line: [Cell; SIZE],
    /// Sum of the tiles produced by merges.
    pub score: u32,
    /// `merged[i]` is set when `line[i]` was produced by a merge.
    pub merged: [bool; SIZE],
}

/// Slides the tiles of `line` towards index 0, merging equal neighbours.
///
/// Tiles are scanned front to back after the empty cells are dropped. A tile merges with the next
/// one if they are equal, and the result is never compared again, so each tile takes part in at
/// most one merge.
pub fn compact_and_merge(line: [Cell; SIZE]) -> LineOutcome {
    let mut outcome = LineOutcome {
        line: [0; SIZE],
        score: 0,
        merged: [false; SIZE],
    };

    let mut tiles = line.into_iter().filter(|&cell| cell != 0).peekable();

    for (slot, merged) in outcome.line.iter_mut().zip(&mut outcome.merged) {
        let Some(tile) = tiles.next() else {
            break;
        };

        if tiles.next_if_eq(&tile).is_some() {
            *slot = tile * 2;
            *merged = true;
            outcome.score += tile * 2;
        } else {
            *slot = tile;
        }
    }

    outcome
}
