//! Win detection for N-by-N boards.

use crate::types::{Board, Cell, Player};
use tracing::instrument;

/// Checks the board for a completed line.
///
/// Lines are scanned in a fixed order: each row top to bottom, each
/// column left to right, the main diagonal, then the anti-diagonal.
/// Returns the owner of the first full line found. A line only counts
/// when every cell holds the same non-empty mark.
#[instrument]
pub fn check_winner(board: &Board) -> Option<Player> {
    let n = board.size();

    for row in 0..n {
        if let Some(player) = line_owner(board, (0..n).map(|col| (row, col))) {
            return Some(player);
        }
    }

    for col in 0..n {
        if let Some(player) = line_owner(board, (0..n).map(|row| (row, col))) {
            return Some(player);
        }
    }

    if let Some(player) = line_owner(board, (0..n).map(|i| (i, i))) {
        return Some(player);
    }

    line_owner(board, (0..n).map(|i| (i, n - 1 - i)))
}

/// Returns the player occupying every cell of the line, if any.
fn line_owner(board: &Board, mut cells: impl Iterator<Item = (usize, usize)>) -> Option<Player> {
    let (row, col) = cells.next()?;
    let owner = match board.get(row, col) {
        Some(Cell::Occupied(player)) => player,
        _ => return None,
    };
    cells
        .all(|(row, col)| board.get(row, col) == Some(Cell::Occupied(owner)))
        .then_some(owner)
}
