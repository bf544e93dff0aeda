//! Directional bracket detection.
//!
//! From the target cell, each compass direction is walked while it holds the
//! opponent's discs. The run counts as captured only when at least one
//! opponent disc was passed and the walk stops on a disc of the acting mark.

use super::board::{Board, Direction};
use super::common::{CaptureSet, Mark, Position};

/// Cells that would flip if `mark` were placed on `target`, across all eight
/// directions. Empty for an occupied target.
pub fn scan(board: &Board, target: Position, mark: Mark) -> CaptureSet {
    scan_in(board, target, mark, Direction::ALL)
}

/// [`scan`] restricted to the given directions, visited in the given order.
pub fn scan_in<I>(board: &Board, target: Position, mark: Mark, directions: I) -> CaptureSet
where
    I: IntoIterator<Item = Direction>,
{
    let mut captures = CaptureSet::new();
    if board.mark_at(target).is_some() {
        return captures;
    }
    for dir in directions {
        captures |= scan_direction(board, target, dir, mark);
    }
    captures
}

/// The opponent run bracketed by `mark` when walking from `origin` in `dir`.
pub fn scan_direction(board: &Board, origin: Position, dir: Direction, mark: Mark) -> CaptureSet {
    let opponent = mark.opponent();
    let mut run = CaptureSet::new();
    let mut cursor = board.step(origin, dir);
    while let Some(pos) = cursor {
        match board.mark_at(pos) {
            Some(m) if m == opponent => {
                run.insert(pos);
                cursor = board.step(pos, dir);
            }
            Some(_) if !run.is_empty() => return run,
            // own disc with nothing between, or an empty cell
            _ => break,
        }
    }
    CaptureSet::new()
}
