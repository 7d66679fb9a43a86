//! JSON save format: encoding, strict validation, and decoding.
//!
//! The external document carries the board as rows of `"X"`/`"O"`/`" "`
//! strings, the derived status, and the symbol to move (null once the
//! game is over). Decoding validates the document field by field before
//! any state is built, so a rejected save never touches live state.

use crate::types::{Board, Cell, GameState, GameStatus, Player};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::instrument;

/// Default filename for exported saves.
pub const SAVE_FILE_NAME: &str = "tic-tac-toe.json";

/// Spelling of an empty cell in the save document.
const EMPTY_CELL: &str = " ";

/// Game status as spelled in the save document.
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
pub enum SaveStatus {
    /// Game is ongoing.
    #[serde(rename = "in_progress")]
    #[strum(serialize = "in_progress")]
    InProgress,
    /// X completed a line.
    #[serde(rename = "X_wins")]
    #[strum(serialize = "X_wins")]
    XWins,
    /// O completed a line.
    #[serde(rename = "O_wins")]
    #[strum(serialize = "O_wins")]
    OWins,
    /// Board filled with no winner.
    #[serde(rename = "draw")]
    #[strum(serialize = "draw")]
    Draw,
}

impl From<GameStatus> for SaveStatus {
    fn from(status: GameStatus) -> Self {
        match status {
            GameStatus::InProgress => SaveStatus::InProgress,
            GameStatus::Won(Player::X) => SaveStatus::XWins,
            GameStatus::Won(Player::O) => SaveStatus::OWins,
            GameStatus::Draw => SaveStatus::Draw,
        }
    }
}

/// External save document, exactly as written to disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct SaveDocument {
    /// N rows of N cells, each `"X"`, `"O"`, or `" "`.
    pub board: Vec<Vec<String>>,
    /// Symbol whose move it is; null once the game is over.
    pub turn: Option<Player>,
    /// Derived game status.
    pub status: SaveStatus,
}

impl From<&GameState> for SaveDocument {
    fn from(state: &GameState) -> Self {
        let status = SaveStatus::from(state.status());
        let turn = (status == SaveStatus::InProgress).then(|| state.to_move());
        let board = state
            .board()
            .rows()
            .map(|row| {
                row.iter()
                    .map(|cell| match cell {
                        Cell::Empty => EMPTY_CELL.to_string(),
                        Cell::Occupied(player) => player.to_string(),
                    })
                    .collect()
            })
            .collect();
        Self { board, turn, status }
    }
}

/// Reasons a save document is rejected.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum SaveError {
    /// The `board` field is missing, not a sequence, or empty.
    #[display("board missing")]
    BoardMissing,
    /// Some row is not a sequence matching the outer length.
    #[display("board must be N x N")]
    BoardNotSquare,
    /// Some cell is not `"X"`, `"O"`, or `" "`.
    #[display("invalid cell value")]
    InvalidCell,
    /// The `status` field is not one of the four known statuses.
    #[display("invalid status")]
    InvalidStatus,
    /// The `turn` field is not `"X"`, `"O"`, or null.
    #[display("invalid turn")]
    InvalidTurn,
    /// The input did not parse as JSON at all.
    #[display("invalid JSON: {}", _0)]
    Json(String),
}

impl std::error::Error for SaveError {}

impl From<serde_json::Error> for SaveError {
    fn from(err: serde_json::Error) -> Self {
        SaveError::Json(err.to_string())
    }
}

/// Encodes the state as pretty-printed JSON bytes.
///
/// # Errors
///
/// Returns [`SaveError::Json`] if serialization fails.
#[instrument(skip(state))]
pub fn encode(state: &GameState) -> Result<Vec<u8>, SaveError> {
    let document = SaveDocument::from(state);
    Ok(serde_json::to_vec_pretty(&document)?)
}

/// Parses raw bytes as JSON and decodes the document.
///
/// # Errors
///
/// Returns [`SaveError::Json`] for unparseable input, or the first
/// validation failure from [`decode_value`].
#[instrument(skip(bytes))]
pub fn decode(bytes: &[u8]) -> Result<GameState, SaveError> {
    let value: Value = serde_json::from_slice(bytes)?;
    decode_value(&value)
}

/// Validates a parsed document and reconstructs the game state.
///
/// Checks run in a fixed order, first failure wins: board present and
/// non-empty, board square, cell values, status, turn. On success the
/// grid size comes from the board dimension, the winner from the status,
/// and the turn counter from the filled-cell count (or N * N + 1 for a
/// finished game, blocking further moves). The declared `turn` symbol is
/// validated but never cross-checked against the filled-cell parity.
///
/// # Errors
///
/// Returns the [`SaveError`] for the first failed check.
#[instrument(skip(value))]
pub fn decode_value(value: &Value) -> Result<GameState, SaveError> {
    let rows = match value.get("board") {
        Some(Value::Array(rows)) if !rows.is_empty() => rows,
        _ => return Err(SaveError::BoardMissing),
    };
    let n = rows.len();

    let mut grid = Vec::with_capacity(n);
    for row in rows {
        match row {
            Value::Array(cells) if cells.len() == n => grid.push(cells),
            _ => return Err(SaveError::BoardNotSquare),
        }
    }

    let mut board = Board::new(n);
    for (row, cells) in grid.iter().enumerate() {
        for (col, cell) in cells.iter().enumerate() {
            board.set(row, col, parse_cell(cell)?);
        }
    }

    let status = match value.get("status").and_then(Value::as_str) {
        Some(s) => s.parse::<SaveStatus>().map_err(|_| SaveError::InvalidStatus)?,
        None => return Err(SaveError::InvalidStatus),
    };

    match value.get("turn") {
        None | Some(Value::Null) => {}
        Some(Value::String(s)) if s.parse::<Player>().is_ok() => {}
        _ => return Err(SaveError::InvalidTurn),
    }

    let winner = match status {
        SaveStatus::XWins => Some(Player::X),
        SaveStatus::OWins => Some(Player::O),
        SaveStatus::InProgress | SaveStatus::Draw => None,
    };
    let turn = match status {
        SaveStatus::InProgress => board.filled() + 1,
        SaveStatus::XWins | SaveStatus::OWins | SaveStatus::Draw => n * n + 1,
    };

    Ok(GameState::restore(board, winner, turn))
}

fn parse_cell(value: &Value) -> Result<Cell, SaveError> {
    match value.as_str() {
        Some(EMPTY_CELL) => Ok(Cell::Empty),
        Some(s) => s
            .parse::<Player>()
            .map(Cell::Occupied)
            .map_err(|_| SaveError::InvalidCell),
        None => Err(SaveError::InvalidCell),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_missing_board() {
        assert_eq!(decode_value(&json!({})), Err(SaveError::BoardMissing));
        assert_eq!(
            decode_value(&json!({ "board": [] })),
            Err(SaveError::BoardMissing)
        );
        assert_eq!(
            decode_value(&json!({ "board": "nope" })),
            Err(SaveError::BoardMissing)
        );
    }

    #[test]
    fn test_ragged_board() {
        assert_eq!(
            decode_value(&json!({ "board": [["X", "O"], ["X"]] })),
            Err(SaveError::BoardNotSquare)
        );
    }

    #[test]
    fn test_rectangular_board_rejected() {
        // Rows are measured against the outer length, so 2x3 is not square.
        assert_eq!(
            decode_value(&json!({ "board": [["X", "O", "X"], ["O", "X", "O"]] })),
            Err(SaveError::BoardNotSquare)
        );
    }

    #[test]
    fn test_invalid_cell() {
        assert_eq!(
            decode_value(&json!({ "board": [["X", "Z"], [" ", " "]], "status": "draw", "turn": null })),
            Err(SaveError::InvalidCell)
        );
        assert_eq!(
            decode_value(&json!({ "board": [[1]] })),
            Err(SaveError::InvalidCell)
        );
    }

    #[test]
    fn test_invalid_status() {
        let doc = json!({ "board": [[" "]], "status": "unknown", "turn": "X" });
        assert_eq!(decode_value(&doc), Err(SaveError::InvalidStatus));
        let doc = json!({ "board": [[" "]], "turn": "X" });
        assert_eq!(decode_value(&doc), Err(SaveError::InvalidStatus));
    }

    #[test]
    fn test_invalid_turn() {
        let doc = json!({ "board": [[" "]], "status": "in_progress", "turn": "Z" });
        assert_eq!(decode_value(&doc), Err(SaveError::InvalidTurn));
        let doc = json!({ "board": [[" "]], "status": "in_progress", "turn": 1 });
        assert_eq!(decode_value(&doc), Err(SaveError::InvalidTurn));
    }

    #[test]
    fn test_absent_turn_is_null() {
        let doc = json!({ "board": [["X"]], "status": "X_wins" });
        let state = decode_value(&doc).unwrap();
        assert_eq!(state.winner(), Some(Player::X));
    }

    #[test]
    fn test_first_failure_wins() {
        // Ragged board and bad status together: the board check fires first.
        let doc = json!({ "board": [["X"], []], "status": "unknown" });
        assert_eq!(decode_value(&doc), Err(SaveError::BoardNotSquare));
    }

    #[test]
    fn test_turn_counter_from_filled_count() {
        let doc = json!({
            "board": [["X", "O", " "], [" ", " ", " "], [" ", " ", " "]],
            "status": "in_progress",
            "turn": "X"
        });
        let state = decode_value(&doc).unwrap();
        assert_eq!(state.turn(), 3);
        assert_eq!(state.to_move(), Player::X);
        assert_eq!(state.winner(), None);
    }

    #[test]
    fn test_declared_turn_never_cross_checked() {
        // Two filled cells mean X is to move, but a declared "O" is
        // accepted and ignored in favor of the derived parity.
        let doc = json!({
            "board": [["X", "O", " "], [" ", " ", " "], [" ", " ", " "]],
            "status": "in_progress",
            "turn": "O"
        });
        let state = decode_value(&doc).unwrap();
        assert_eq!(state.turn(), 3);
        assert_eq!(state.to_move(), Player::X);
    }

    #[test]
    fn test_terminal_turn_counter_blocks_moves() {
        let doc = json!({
            "board": [["X", "X", "X"], ["O", "O", " "], [" ", " ", " "]],
            "status": "X_wins",
            "turn": null
        });
        let state = decode_value(&doc).unwrap();
        assert_eq!(state.turn(), 10);
        assert_eq!(state.winner(), Some(Player::X));
        assert_eq!(state.status(), GameStatus::Won(Player::X));
    }

    #[test]
    fn test_terminal_with_declared_turn_accepted() {
        // The allowed set for turn is {X, O, null} even for finished games.
        let doc = json!({
            "board": [["X", "X", "X"], ["O", "O", " "], [" ", " ", " "]],
            "status": "X_wins",
            "turn": "O"
        });
        let state = decode_value(&doc).unwrap();
        assert_eq!(state.turn(), 10);
    }

    #[test]
    fn test_encode_fresh_game() {
        let state = GameState::new(3);
        let bytes = encode(&state).unwrap();
        let value: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(
            value,
            json!({
                "board": [[" ", " ", " "], [" ", " ", " "], [" ", " ", " "]],
                "turn": "X",
                "status": "in_progress"
            })
        );
    }

    #[test]
    fn test_decode_rejects_garbage_bytes() {
        assert!(matches!(decode(b"not json"), Err(SaveError::Json(_))));
    }

    #[test]
    fn test_status_wire_spellings() {
        assert_eq!(SaveStatus::InProgress.to_string(), "in_progress");
        assert_eq!(SaveStatus::XWins.to_string(), "X_wins");
        assert_eq!(SaveStatus::OWins.to_string(), "O_wins");
        assert_eq!(SaveStatus::Draw.to_string(), "draw");
        // The internal variant names are not accepted on the wire.
        assert!("XWins".parse::<SaveStatus>().is_err());
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(SaveError::BoardMissing.to_string(), "board missing");
        assert_eq!(SaveError::BoardNotSquare.to_string(), "board must be N x N");
        assert_eq!(SaveError::InvalidCell.to_string(), "invalid cell value");
        assert_eq!(SaveError::InvalidStatus.to_string(), "invalid status");
        assert_eq!(SaveError::InvalidTurn.to_string(), "invalid turn");
    }
}
