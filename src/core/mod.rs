//! Core Othello rule engine (no_std compatible)
//!
//! This module contains the pure game logic: the board and its adjacency
//! index, the line scanner, and move validation/application. It needs
//! neither `std` nor `alloc`.

pub mod bitboard;
pub mod board;
pub mod common;
pub mod config;
pub mod engine;
pub mod scanner;

// Re-export commonly used types
pub use bitboard::BitBoard;
pub use board::{Axis, Board, Direction, Neighbor, Sense};
pub use common::{
    BoardError, CaptureSet, Cell, CellSet, GameOutcome, IllegalMove, IllegalReason, Mark, Move,
    Position, Score,
};
pub use config::*;
pub use engine::{apply, has_any_legal_move, legal_moves, play, score, validate};
pub use scanner::{scan, scan_direction, scan_in};
