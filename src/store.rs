use std::{
    fs,
    io::{self, ErrorKind},
    path::PathBuf,
};

use lib_2048::HighScoreStore;

/// Keeps the high score as a decimal number in a text file.
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl HighScoreStore for FileStore {
    fn load_high_score(&mut self) -> io::Result<u32> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(0),
            Err(err) => return Err(err),
        };

        text.trim().parse().map_err(|err| {
            io::Error::new(
                ErrorKind::InvalidData,
                format!("bad high score in {}: {err}", self.path.display()),
            )
        })
    }

    fn save_high_score(&mut self, score: u32) -> io::Result<()> {
        fs::write(&self.path, format!("{score}\n"))
    }
}
