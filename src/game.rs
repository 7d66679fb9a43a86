//! Game engine: turn legality, move application, terminal detection.

use crate::rules;
use crate::types::{GameState, Player};
use tracing::{debug, instrument};

/// Grid size a fresh session starts with.
pub const DEFAULT_GRID_SIZE: usize = 3;

/// N-by-N tic-tac-toe game engine.
///
/// Owns the [`GameState`] and enforces move legality. Illegal moves
/// (out of bounds, occupied cell, game already over) are ignored rather
/// than reported: the presentation layer only offers legal targets, so
/// the engine guards them as no-ops.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Game {
    state: GameState,
}

impl Game {
    /// Creates a new game at the given grid size.
    #[instrument]
    pub fn new(size: usize) -> Self {
        Self {
            state: GameState::new(size),
        }
    }

    /// Returns the current game state.
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Returns the grid dimension N.
    pub fn size(&self) -> usize {
        self.state.board().size()
    }

    /// Attempts to place the current player's mark at the given cell.
    ///
    /// Returns whether the move was accepted. On acceptance the mark is
    /// placed, the winner is re-evaluated, and the turn counter advances
    /// (whether or not the move won the game).
    #[instrument(skip(self), fields(turn = self.state.turn()))]
    pub fn make_move(&mut self, row: usize, col: usize) -> bool {
        let n = self.size();

        if self.state.winner().is_some() || self.state.turn() > n * n {
            debug!(row, col, "move rejected: game is over");
            return false;
        }
        if row >= n || col >= n {
            debug!(row, col, n, "move rejected: out of bounds");
            return false;
        }
        if !self.state.board().is_empty(row, col) {
            debug!(row, col, "move rejected: cell occupied");
            return false;
        }

        let player = self.state.to_move();
        self.state.place(row, col, player);
        if let Some(winner) = rules::check_winner(self.state.board()) {
            debug!(?winner, "line completed");
            self.state.set_winner(winner);
        }
        self.state.advance_turn();
        true
    }

    /// Discards the current game and starts fresh at a new grid size.
    #[instrument(skip(self))]
    pub fn resize(&mut self, size: usize) {
        self.state = GameState::new(size);
    }

    /// Clears the board, turn counter, and winner, keeping the grid size.
    #[instrument(skip(self))]
    pub fn reset(&mut self) {
        self.state = GameState::new(self.size());
    }

    /// Returns the player whose move it is.
    pub fn to_move(&self) -> Player {
        self.state.to_move()
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new(DEFAULT_GRID_SIZE)
    }
}

impl From<GameState> for Game {
    /// Wraps a state, typically one restored from a save document.
    fn from(state: GameState) -> Self {
        Self { state }
    }
}
