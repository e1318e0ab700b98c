use std::io::{self, Write};

use lib_2048::{metrics, CellChange, ChangeKind, GameState, Renderer, SIZE};

const SQUARE_HEIGHT: usize = 3;
const TOP_ROW: &[u8] = "┏━━━━━━━┳━━━━━━━┳━━━━━━━┳━━━━━━━┓\n".as_bytes();
const SEPERATOR_ROW: &[u8] = "┣━━━━━━━╋━━━━━━━╋━━━━━━━╋━━━━━━━┫\n".as_bytes();
const BOTTOM_ROW: &[u8] = "┗━━━━━━━┻━━━━━━━┻━━━━━━━┻━━━━━━━┛\n".as_bytes();
const EMPTY_ROW: &[u8] = "┃       ┃       ┃       ┃       ┃\n".as_bytes();
const EMPTY_CELL: &[u8] = "┃       ".as_bytes();
const COLOUR_TABLE: [u8; 7] = [90, 33, 31, 32, 33, 36, 35];

// Screen lines counted from the status line. The cursor rests at the start of `REST_LINE`.
const STATUS_LINE: usize = 0;
const MESSAGE_LINE: usize = 2 + SIZE * (SQUARE_HEIGHT + 1);
const REST_LINE: usize = MESSAGE_LINE + 1;

const fn row_line(row: usize) -> usize {
    2 + row * (SQUARE_HEIGHT + 1)
}

fn move_to(out: &mut impl Write, from: usize, to: usize) -> io::Result<()> {
    if to < from {
        write!(out, "\x1b[{}F", from - to)
    } else if to > from {
        write!(out, "\x1b[{}E", to - from)
    } else {
        out.write_all(b"\r")
    }
}

fn tile_colour(cell: u32) -> Option<u8> {
    metrics::exponent(cell)
        .checked_sub(1)
        .map(|i| COLOUR_TABLE[i as usize % COLOUR_TABLE.len()])
}

/// Draws the board with ANSI escapes, redrawing only the rows that changed.
pub struct TerminalRenderer<W> {
    out: W,
    drawn: bool,
}

impl<W: Write> TerminalRenderer<W> {
    pub const fn new(out: W) -> Self {
        Self { out, drawn: false }
    }

    fn draw_frame(&mut self) -> io::Result<()> {
        self.out.write_all(b"\n")?;
        self.out.write_all(TOP_ROW)?;

        for i in 0..SIZE {
            if i != 0 {
                self.out.write_all(SEPERATOR_ROW)?;
            }

            for _ in 0..SQUARE_HEIGHT {
                self.out.write_all(EMPTY_ROW)?;
            }
        }

        self.out.write_all(BOTTOM_ROW)?;
        self.out.write_all(b"\n")
    }

    fn draw_row_line(
        &mut self,
        row: &[u32; SIZE],
        highlights: &[Option<ChangeKind>; SIZE],
        centre: bool,
    ) -> io::Result<()> {
        for (&cell, highlight) in row.iter().zip(highlights) {
            let Some(colour) = tile_colour(cell) else {
                self.out.write_all(EMPTY_CELL)?;
                continue;
            };

            if !centre {
                write!(self.out, "┃\x1b[{}m       \x1b[m", colour + 10)?;
                continue;
            }

            let bold = match highlight {
                Some(ChangeKind::Merged | ChangeKind::Spawned) => "\x1b[1m",
                _ => "",
            };

            write!(self.out, "┃\x1b[7m\x1b[{colour}m{bold}{cell:^7}\x1b[m")?;
        }

        self.out.write_all("┃".as_bytes())
    }
}

impl<W: Write> Renderer for TerminalRenderer<W> {
    fn render(
        &mut self,
        state: &GameState,
        changes: &[CellChange],
        high_score: u32,
    ) -> io::Result<()> {
        let mut dirty = [!self.drawn; SIZE];
        let mut highlights = [[None; SIZE]; SIZE];

        if !self.drawn {
            self.draw_frame()?;
            self.drawn = true;
        }

        for change in changes {
            dirty[change.position.row] = true;
            highlights[change.position.row][change.position.col] = Some(change.kind);
        }

        let mut line = REST_LINE;

        move_to(&mut self.out, line, STATUS_LINE)?;
        write!(
            self.out,
            "\x1b[2KScore: {}  Best: {high_score}",
            state.score()
        )?;
        line = STATUS_LINE;

        let rows = state.grid().rows();

        for (i, row) in rows.iter().enumerate().filter(|&(i, _)| dirty[i]) {
            for j in 0..SQUARE_HEIGHT {
                let target = row_line(i) + j;

                move_to(&mut self.out, line, target)?;
                self.draw_row_line(row, &highlights[i], j == SQUARE_HEIGHT / 2)?;
                line = target;
            }
        }

        move_to(&mut self.out, line, MESSAGE_LINE)?;
        self.out.write_all(b"\x1b[2K")?;

        if state.is_game_over() {
            self.out
                .write_all(b"Game over. Press r to restart or q to quit.")?;
        }

        move_to(&mut self.out, MESSAGE_LINE, REST_LINE)?;
        self.out.flush()
    }
}
