//! Core domain types for the N-by-N tic-tac-toe engine.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Player in the game.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    JsonSchema,
    strum::Display,
    strum::EnumString,
)]
pub enum Player {
    /// Player X (goes first).
    X,
    /// Player O (goes second).
    O,
}

impl Player {
    /// Returns the opponent player.
    pub fn opponent(self) -> Self {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }
}

/// A single cell on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    /// Empty cell.
    Empty,
    /// Cell occupied by a player's mark.
    Occupied(Player),
}

/// Square N-by-N board, stored row-major.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    /// Grid dimension N.
    size: usize,
    /// Cells in row-major order (length N * N).
    cells: Vec<Cell>,
}

impl Board {
    /// Creates a new empty board. Sizes below 1 are clamped to 1.
    pub fn new(size: usize) -> Self {
        let size = size.max(1);
        Self {
            size,
            cells: vec![Cell::Empty; size * size],
        }
    }

    /// Returns the grid dimension N.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Gets the cell at the given coordinates, or `None` out of bounds.
    pub fn get(&self, row: usize, col: usize) -> Option<Cell> {
        self.index(row, col).map(|i| self.cells[i])
    }

    /// Sets the cell at the given coordinates.
    ///
    /// Returns `false` when the coordinates are out of bounds.
    pub(crate) fn set(&mut self, row: usize, col: usize, cell: Cell) -> bool {
        match self.index(row, col) {
            Some(i) => {
                self.cells[i] = cell;
                true
            }
            None => false,
        }
    }

    /// Checks if the cell at the given coordinates is empty.
    ///
    /// Out-of-bounds coordinates are not empty.
    pub fn is_empty(&self, row: usize, col: usize) -> bool {
        matches!(self.get(row, col), Some(Cell::Empty))
    }

    /// Counts occupied cells.
    pub fn filled(&self) -> usize {
        self.cells.iter().filter(|cell| **cell != Cell::Empty).count()
    }

    /// Iterates over the rows of the board, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.size)
    }

    /// Formats the board as a human-readable string.
    pub fn display(&self) -> String {
        let divider = vec!["-"; self.size].join("+");
        let mut result = String::new();
        for (i, row) in self.rows().enumerate() {
            if i > 0 {
                result.push('\n');
                result.push_str(&divider);
                result.push('\n');
            }
            let marks: Vec<&str> = row
                .iter()
                .map(|cell| match cell {
                    Cell::Empty => " ",
                    Cell::Occupied(Player::X) => "X",
                    Cell::Occupied(Player::O) => "O",
                })
                .collect();
            result.push_str(&marks.join("|"));
        }
        result
    }

    fn index(&self, row: usize, col: usize) -> Option<usize> {
        (row < self.size && col < self.size).then(|| row * self.size + col)
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new(crate::game::DEFAULT_GRID_SIZE)
    }
}

/// Current status of the game, always derived from the state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameStatus {
    /// Game is ongoing.
    InProgress,
    /// Game ended in a win.
    Won(Player),
    /// Game ended in a draw.
    Draw,
}

/// Complete game state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    /// The board.
    board: Board,
    /// 1-based turn counter: odd means X to move, even means O.
    /// Reaches N * N + 1 once no further moves are permitted.
    turn: usize,
    /// Winner, set at most once per game.
    winner: Option<Player>,
}

impl GameState {
    /// Creates a fresh game at the given grid size.
    pub fn new(size: usize) -> Self {
        Self {
            board: Board::new(size),
            turn: 1,
            winner: None,
        }
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the 1-based turn counter.
    pub fn turn(&self) -> usize {
        self.turn
    }

    /// Returns the winner, if any.
    pub fn winner(&self) -> Option<Player> {
        self.winner
    }

    /// Returns the player whose move it is, from turn-counter parity.
    pub fn to_move(&self) -> Player {
        if self.turn % 2 == 1 { Player::X } else { Player::O }
    }

    /// Derives the game status from the state.
    ///
    /// Won when a winner is set, Draw when the board filled with no winner,
    /// InProgress otherwise. Never stored, so it cannot desynchronize.
    pub fn status(&self) -> GameStatus {
        if let Some(winner) = self.winner {
            return GameStatus::Won(winner);
        }
        if crate::rules::draw::is_full(&self.board) {
            GameStatus::Draw
        } else {
            GameStatus::InProgress
        }
    }

    /// Places a mark (unchecked - use `Game::make_move` for validation).
    pub(crate) fn place(&mut self, row: usize, col: usize, player: Player) {
        self.board.set(row, col, Cell::Occupied(player));
    }

    /// Records the winner.
    pub(crate) fn set_winner(&mut self, player: Player) {
        self.winner = Some(player);
    }

    /// Advances the turn counter by one.
    pub(crate) fn advance_turn(&mut self) {
        self.turn += 1;
    }

    /// Rebuilds a state from its parts, used when restoring a save.
    pub(crate) fn restore(board: Board, winner: Option<Player>, turn: usize) -> Self {
        Self { board, turn, winner }
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(crate::game::DEFAULT_GRID_SIZE)
    }
}
