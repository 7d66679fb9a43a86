//! N-by-N tic-tac-toe game logic with validated JSON save files.
//!
//! # Architecture
//!
//! - **Engine**: [`Game`] enforces turn legality, applies moves, and
//!   detects wins and draws on boards of any size (the UI offers 3-5).
//! - **Save codec**: [`encode`] and [`decode`] translate between
//!   [`GameState`] and a strictly validated JSON document.
//! - **Session**: [`GameSession`] is the contract a presentation layer
//!   drives - clicks, grid-size selection, reset, save, load.
//!
//! The game status is never stored; it is always derived from the board,
//! the winner, and the turn counter, so it cannot fall out of sync.
//!
//! # Example
//!
//! ```
//! use tictactoe_engine::{GameSession, GameStatus};
//!
//! let mut session = GameSession::new();
//! session.click_cell(0, 0);
//! assert_eq!(session.status(), GameStatus::InProgress);
//!
//! let bytes = session.export_save()?;
//! session.import_save(&bytes)?;
//! assert_eq!(session.state().turn(), 2);
//! # Ok::<(), tictactoe_engine::SaveError>(())
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod game;
mod rules;
mod save;
mod session;
mod types;

// Crate-level exports - engine
pub use game::{DEFAULT_GRID_SIZE, Game};

// Crate-level exports - pure rule evaluation
pub use rules::{check_winner, is_full};

// Crate-level exports - save codec
pub use save::{SAVE_FILE_NAME, SaveDocument, SaveError, SaveStatus, decode, decode_value, encode};

// Crate-level exports - session contract
pub use session::GameSession;

// Crate-level exports - domain types
pub use types::{Board, Cell, GameState, GameStatus, Player};
