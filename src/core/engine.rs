//! Move detection, validation and application on top of the line scanner.
//!
//! Everything here is read-only except [`apply`] (and [`play`], which calls
//! it). The caller guarantees that a capture set handed to `apply` came from
//! `validate` on the same, unmodified board.

use super::board::Board;
use super::common::{CaptureSet, CellSet, IllegalMove, IllegalReason, Mark, Move, Score};
use super::scanner;

/// Every empty cell where `mark` would capture at least one disc.
pub fn legal_moves(board: &Board, mark: Mark) -> CellSet {
    let mut moves = CellSet::new();
    for pos in board.empty_cells().positions() {
        if !scanner::scan(board, pos, mark).is_empty() {
            moves.insert(pos);
        }
    }
    moves
}

/// Whether `mark` has any legal placement.
pub fn has_any_legal_move(board: &Board, mark: Mark) -> bool {
    board
        .empty_cells()
        .positions()
        .any(|pos| !scanner::scan(board, pos, mark).is_empty())
}

/// Check a candidate move, returning the discs it would flip.
pub fn validate(board: &Board, mv: Move) -> Result<CaptureSet, IllegalMove> {
    if board.mark_at(mv.position).is_some() {
        return Err(IllegalMove {
            mv,
            reason: IllegalReason::Occupied,
        });
    }
    let captures = scanner::scan(board, mv.position, mv.mark);
    if captures.is_empty() {
        return Err(IllegalMove {
            mv,
            reason: IllegalReason::NoCapture,
        });
    }
    Ok(captures)
}

/// Claim the target cell and flip every captured disc.
pub fn apply(board: &mut Board, mv: Move, captures: CaptureSet) {
    let mut claimed = captures;
    claimed.insert(mv.position);
    board.claim(mv.mark, claimed);
}

/// Validate and apply in one step.
pub fn play(board: &mut Board, mv: Move) -> Result<CaptureSet, IllegalMove> {
    let captures = validate(board, mv)?;
    apply(board, mv, captures);
    log::trace!("{} played {} flipping {}", mv.mark, mv.position, captures.count_ones());
    Ok(captures)
}

pub fn score(board: &Board) -> Score {
    Score {
        black: board.count(Mark::Black),
        white: board.count(Mark::White),
    }
}
