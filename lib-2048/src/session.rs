use std::io;

use log::{debug, info, warn};

use crate::{
    collaborators::{HighScoreStore, Renderer},
    metrics,
    spawn::SpawnSource,
    state::{GameState, Turn},
    Direction, Grid,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Move(Direction),
    Restart,
}

/// Holds the one mutable [`GameState`] of a game and wires it to its collaborators.
pub struct Session<S, R, H> {
    state: GameState,
    source: S,
    renderer: R,
    store: H,
    high_score: u32,
    /// High score as it was when the current game started.
    previous_record: u32,
}

impl<S, R, H> Session<S, R, H>
where
    S: SpawnSource,
    R: Renderer,
    H: HighScoreStore,
{
    /// Loads the high score, starts a game and draws it.
    pub fn new(mut source: S, mut renderer: R, mut store: H) -> io::Result<Self> {
        let high_score = store.load_high_score()?;
        let state = GameState::initialize(&mut source);

        let turn = Turn::replacing(&GameState::from_grid(Grid::EMPTY, 0), state);
        renderer.render(&state, &turn.changes, high_score)?;

        info!("new game, high score {high_score}");

        Ok(Self {
            state,
            source,
            renderer,
            store,
            high_score,
            previous_record: high_score,
        })
    }

    pub const fn state(&self) -> &GameState {
        &self.state
    }

    pub const fn high_score(&self) -> u32 {
        self.high_score
    }

    pub const fn renderer(&self) -> &R {
        &self.renderer
    }

    pub const fn store(&self) -> &H {
        &self.store
    }

    pub fn handle(&mut self, command: Command) -> io::Result<Turn> {
        match command {
            Command::Move(direction) => self.play(direction),
            Command::Restart => self.restart(),
        }
    }

    fn play(&mut self, direction: Direction) -> io::Result<Turn> {
        let turn = self.state.play(direction, &mut self.source);

        if !turn.changed {
            debug!("{direction:?} changes nothing");
            return Ok(turn);
        }

        self.state = turn.state;
        debug!(
            "{direction:?}: +{}, score {}",
            turn.score_delta,
            self.state.score()
        );

        self.update_high_score();
        self.renderer
            .render(&self.state, &turn.changes, self.high_score)?;

        if self.state.is_game_over() {
            info!(
                "game over, score {}, max tile {}",
                self.state.score(),
                metrics::max_tile(self.state.grid())
            );
        }

        Ok(turn)
    }

    fn restart(&mut self) -> io::Result<Turn> {
        let next = GameState::restart(&mut self.source);
        let turn = Turn::replacing(&self.state, next);

        info!("restart after score {}", self.state.score());

        self.state = next;
        self.previous_record = self.high_score;
        self.renderer
            .render(&self.state, &turn.changes, self.high_score)?;

        Ok(turn)
    }

    fn update_high_score(&mut self) {
        let score = self.state.score();

        if score <= self.high_score {
            return;
        }

        if self.high_score == self.previous_record {
            info!("beat high score {}", self.previous_record);
        }

        self.high_score = score;

        if let Err(err) = self.store.save_high_score(score) {
            warn!("failed to save high score {score}: {err}");
        }
    }
}
