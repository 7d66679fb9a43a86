//! Event-driven session: maps presentation gestures onto the engine.
//!
//! A frontend (canvas, TUI, web) calls these operations in response to
//! user input and re-renders from the returned state snapshot. All
//! operations are synchronous; a failed import leaves the live state
//! completely untouched.

use crate::game::Game;
use crate::save::{self, SaveError};
use crate::types::{GameState, GameStatus};
use tracing::{debug, info, instrument, warn};

/// A single interactive game driven by presentation events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSession {
    game: Game,
}

impl GameSession {
    /// Creates a session with a fresh default-size game.
    #[instrument]
    pub fn new() -> Self {
        Self {
            game: Game::default(),
        }
    }

    /// Returns the engine.
    pub fn game(&self) -> &Game {
        &self.game
    }

    /// Returns the current game state for rendering.
    pub fn state(&self) -> &GameState {
        self.game.state()
    }

    /// Returns the derived status for rendering.
    pub fn status(&self) -> GameStatus {
        self.game.state().status()
    }

    /// Starts a fresh game at the selected grid size.
    #[instrument(skip(self))]
    pub fn select_grid_size(&mut self, size: usize) {
        info!(size, "grid size selected");
        self.game.resize(size);
    }

    /// Attempts a move at the clicked cell.
    ///
    /// Clicks on occupied cells, out-of-bounds targets, or a finished
    /// game are ignored.
    #[instrument(skip(self))]
    pub fn click_cell(&mut self, row: usize, col: usize) {
        if !self.game.make_move(row, col) {
            debug!(row, col, "click ignored");
        }
    }

    /// Starts a fresh game at the current grid size.
    #[instrument(skip(self))]
    pub fn reset(&mut self) {
        info!("game reset");
        self.game.reset();
    }

    /// Returns the encoded save document bytes for download.
    ///
    /// The conventional filename is [`SAVE_FILE_NAME`](crate::SAVE_FILE_NAME).
    ///
    /// # Errors
    ///
    /// Returns [`SaveError::Json`] if serialization fails.
    #[instrument(skip(self))]
    pub fn export_save(&self) -> Result<Vec<u8>, SaveError> {
        save::encode(self.state())
    }

    /// Parses and validates uploaded save bytes, replacing the live game.
    ///
    /// The replacement is wholesale, grid size included. On failure the
    /// prior state is untouched and the error carries the user-visible
    /// reason.
    ///
    /// # Errors
    ///
    /// Returns the [`SaveError`] describing why the document was rejected.
    #[instrument(skip(self, bytes))]
    pub fn import_save(&mut self, bytes: &[u8]) -> Result<(), SaveError> {
        match save::decode(bytes) {
            Ok(state) => {
                info!(size = state.board().size(), "save restored");
                self.game = Game::from(state);
                Ok(())
            }
            Err(err) => {
                warn!(%err, "rejected save file");
                Err(err)
            }
        }
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new()
    }
}
