pub use core_2048::*;

pub mod collaborators;
pub mod session;
pub mod spawn;
pub mod state;

pub use collaborators::{HighScoreStore, MemoryStore, Renderer};
pub use session::{Command, Session};
pub use spawn::{spawn_tile, ScriptedSource, SpawnSource, Spawned};
pub use state::{CellChange, ChangeKind, GameState, Turn};
