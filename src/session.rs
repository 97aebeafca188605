/// A play session: the current `GameState` plus the leaderboard it feeds.
///
/// `compute` stays free of I/O; this is the layer that notices a game has
/// just ended, records the score and rewrites the high-score file.

use std::path::{Path, PathBuf};

use rand::Rng;
use tracing::{info, warn};

use crate::compute::{init_state, update};
use crate::config::GameConfig;
use crate::entities::{FrameInput, GameState, GameStatus, Outcome};
use crate::highscore::{clean_name, HighScoreTable};

/// What the frame loop should do after a step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

pub struct Session {
    state: GameState,
    table: HighScoreTable,
    scores_path: PathBuf,
    player_name: String,
    /// Whether the last finished game made it onto the table.
    placed: bool,
}

impl Session {
    pub fn new(
        config: GameConfig,
        table: HighScoreTable,
        scores_path: impl Into<PathBuf>,
        player_name: impl Into<String>,
    ) -> Self {
        Self::from_state(init_state(config), table, scores_path, player_name)
    }

    /// Resume from an arbitrary state, e.g. a scripted scenario.  The player
    /// name is passed through [`clean_name`] so it fits on one file line.
    pub fn from_state(
        state: GameState,
        table: HighScoreTable,
        scores_path: impl Into<PathBuf>,
        player_name: impl Into<String>,
    ) -> Self {
        Self {
            state,
            table,
            scores_path: scores_path.into(),
            player_name: clean_name(&player_name.into()),
            placed: false,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn table(&self) -> &HighScoreTable {
        &self.table
    }

    pub fn player_name(&self) -> &str {
        &self.player_name
    }

    pub fn scores_path(&self) -> &Path {
        &self.scores_path
    }

    pub fn placed(&self) -> bool {
        self.placed
    }

    /// Advance one frame.
    pub fn step(&mut self, input: &FrameInput, rng: &mut impl Rng) -> Flow {
        let was_over = self.state.status == GameStatus::GameOver;
        if was_over && input.quit {
            return Flow::Exit;
        }

        let next = update(&self.state, input, rng);

        if !was_over && next.status == GameStatus::GameOver {
            info!(
                outcome = ?next.outcome,
                score = next.score,
                frame = next.frame,
                "game over"
            );
            if next.outcome != Some(Outcome::Forfeit) {
                self.record(next.score);
            }
        } else if was_over && next.status == GameStatus::Playing {
            info!("new game");
            self.placed = false;
        }

        self.state = next;
        Flow::Continue
    }

    fn record(&mut self, score: u32) {
        self.placed = self.table.add(&self.player_name, score);
        if !self.placed {
            return;
        }
        match self.table.save(&self.scores_path) {
            Ok(()) => info!(name = %self.player_name, score, "high score saved"),
            Err(e) => warn!("could not save high scores: {e}"),
        }
    }
}
