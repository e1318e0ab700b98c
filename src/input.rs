use std::io::{self, Read};

use aho_corasick::{AhoCorasick, BuildError, MatchKind};
use lib_2048::{Command, Direction};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    Command(Command),
    Quit,
}

const fn move_key(direction: Direction) -> Key {
    Key::Command(Command::Move(direction))
}

const KEYS: [(&[u8], Key); 11] = [
    (b"\x1b[A", move_key(Direction::Up)),
    (b"\x1b[B", move_key(Direction::Down)),
    (b"\x1b[C", move_key(Direction::Right)),
    (b"\x1b[D", move_key(Direction::Left)),
    (b"w", move_key(Direction::Up)),
    (b"s", move_key(Direction::Down)),
    (b"d", move_key(Direction::Right)),
    (b"a", move_key(Direction::Left)),
    (b"r", Key::Command(Command::Restart)),
    (b"q", Key::Quit),
    // Ctrl-C, delivered as a byte because signals are off in raw mode.
    (b"\x03", Key::Quit),
];

/// Turns raw terminal bytes into keys. An escape sequence split across two reads is completed by
/// the second one.
pub struct KeyDecoder {
    searcher: AhoCorasick,
    buf: [u8; 128],
    buf_len: usize,
}

impl KeyDecoder {
    pub fn new() -> Result<Self, BuildError> {
        let searcher = AhoCorasick::builder()
            .match_kind(MatchKind::LeftmostFirst)
            .build(KEYS.map(|(pattern, _)| pattern))?;

        Ok(Self {
            searcher,
            buf: [0; 128],
            buf_len: 0,
        })
    }

    /// Blocks for one read. End of input reads as [`Key::Quit`].
    pub fn read_keys(&mut self, input: &mut impl Read) -> io::Result<Vec<Key>> {
        let read = input.read(&mut self.buf[self.buf_len..])?;

        if read == 0 {
            return Ok(vec![Key::Quit]);
        }

        self.buf_len += read;

        Ok(self.decode())
    }

    #[cfg(test)]
    fn feed(&mut self, bytes: &[u8]) -> Vec<Key> {
        let mut keys = Vec::new();

        for chunk in bytes.chunks(self.buf.len() - 2) {
            self.buf[self.buf_len..self.buf_len + chunk.len()].copy_from_slice(chunk);
            self.buf_len += chunk.len();

            keys.extend(self.decode());
        }

        keys
    }

    fn decode(&mut self) -> Vec<Key> {
        let filled = &self.buf[..self.buf_len];

        let keys = self
            .searcher
            .find_iter(filled)
            .map(|m| KEYS[m.pattern().as_usize()].1)
            .collect();

        let carry: &[u8] = match filled {
            [.., 0x1b, b'['] => b"\x1b[",
            [.., 0x1b] => b"\x1b",
            _ => b"",
        };

        self.buf[..carry.len()].copy_from_slice(carry);
        self.buf_len = carry.len();

        keys
    }
}
