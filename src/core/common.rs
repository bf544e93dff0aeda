//! Common types for Othello: marks, positions, cells, outcomes and board errors.

use core::fmt;

use super::bitboard::BitBoard;
use super::config::{BOARD_SIZE, CELL_COUNT};

/// Set of board cells, one bit per position.
pub type CellSet = BitBoard<u64, BOARD_SIZE>;

/// Cells that flip when a move is applied. Empty means the move is illegal.
pub type CaptureSet = CellSet;

/// A player's disc colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Mark {
    Black,
    White,
}

impl Mark {
    /// The unique other mark.
    pub const fn opponent(self) -> Mark {
        match self {
            Mark::Black => Mark::White,
            Mark::White => Mark::Black,
        }
    }

    /// Single-character symbol: "X" for Black, "O" for White.
    pub const fn symbol(self) -> &'static str {
        match self {
            Mark::Black => "X",
            Mark::White => "O",
        }
    }

    pub const fn color(self) -> &'static str {
        match self {
            Mark::Black => "BLACK",
            Mark::White => "WHITE",
        }
    }
}

impl fmt::Display for Mark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.color())
    }
}

/// A cell coordinate guaranteed to lie on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    row: u8,
    col: u8,
}

impl Position {
    /// Validate a coordinate pair; both must be in `0..BOARD_SIZE`.
    pub fn new(row: usize, col: usize) -> Result<Self, BoardError> {
        if row >= BOARD_SIZE || col >= BOARD_SIZE {
            return Err(BoardError::OutOfRange { row, col });
        }
        Ok(Self::new_unchecked(row as u8, col as u8))
    }

    pub(crate) const fn new_unchecked(row: u8, col: u8) -> Self {
        Self { row, col }
    }

    /// Position for a row-major cell index.
    pub fn from_index(idx: usize) -> Result<Self, BoardError> {
        if idx >= CELL_COUNT {
            return Err(BoardError::OutOfRange {
                row: idx / BOARD_SIZE,
                col: idx % BOARD_SIZE,
            });
        }
        Ok(Self::new_unchecked(
            (idx / BOARD_SIZE) as u8,
            (idx % BOARD_SIZE) as u8,
        ))
    }

    /// Parse algebraic notation: a column letter A-H followed by a row
    /// number 1-8, so `"D3"` is row 2, column 3.
    pub fn parse(input: &str) -> Result<Self, BoardError> {
        let input = input.trim();
        let mut chars = input.chars();
        let col_ch = chars
            .next()
            .ok_or(BoardError::Unparseable)?
            .to_ascii_uppercase();
        if !col_ch.is_ascii_uppercase() {
            return Err(BoardError::Unparseable);
        }
        let row: usize = chars.as_str().parse().map_err(|_| BoardError::Unparseable)?;
        if row == 0 {
            return Err(BoardError::Unparseable);
        }
        Self::new(row - 1, (col_ch as u8 - b'A') as usize)
    }

    pub fn row(self) -> usize {
        self.row as usize
    }

    pub fn col(self) -> usize {
        self.col as usize
    }

    /// Row-major index in `0..CELL_COUNT`.
    pub fn index(self) -> usize {
        self.row() * BOARD_SIZE + self.col()
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", (b'A' + self.col) as char, self.row + 1)
    }
}

impl CellSet {
    /// Whether `pos` is in the set.
    pub fn contains(&self, pos: Position) -> bool {
        self.get_index(pos.index())
    }

    pub fn insert(&mut self, pos: Position) {
        self.set_index(pos.index());
    }

    pub fn remove(&mut self, pos: Position) {
        self.clear_index(pos.index());
    }

    /// Members in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = Position> {
        self.iter_set_bits()
            .map(|(r, c)| Position::new_unchecked(r as u8, c as u8))
    }
}

/// One cell of a board snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    pub position: Position,
    /// `None` while the cell is empty.
    pub mark: Option<Mark>,
}

impl Cell {
    pub fn row(&self) -> usize {
        self.position.row()
    }

    pub fn col(&self) -> usize {
        self.position.col()
    }

    pub fn is_empty(&self) -> bool {
        self.mark.is_none()
    }
}

/// A proposed placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Move {
    pub position: Position,
    pub mark: Mark,
}

impl Move {
    pub fn new(position: Position, mark: Mark) -> Self {
        Self { position, mark }
    }
}

/// Terminal result of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum GameOutcome {
    Winner(Mark),
    Draw,
}

impl GameOutcome {
    pub fn winner(self) -> Option<Mark> {
        match self {
            GameOutcome::Winner(mark) => Some(mark),
            GameOutcome::Draw => None,
        }
    }
}

/// Disc counts per mark.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Score {
    pub black: usize,
    pub white: usize,
}

impl Score {
    pub fn of(&self, mark: Mark) -> usize {
        match mark {
            Mark::Black => self.black,
            Mark::White => self.white,
        }
    }

    pub fn total(&self) -> usize {
        self.black + self.white
    }

    /// Strict majority wins; equal counts are a draw. A board holding only
    /// one mark is a win for that mark.
    pub fn outcome(&self) -> GameOutcome {
        if self.black > self.white {
            GameOutcome::Winner(Mark::Black)
        } else if self.white > self.black {
            GameOutcome::Winner(Mark::White)
        } else {
            GameOutcome::Draw
        }
    }
}

/// Why a candidate move was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum IllegalReason {
    /// Target cell already holds a mark.
    Occupied,
    /// No direction brackets an opponent run.
    NoCapture,
}

/// A rule violation: the move may not be played on the current board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct IllegalMove {
    pub mv: Move,
    pub reason: IllegalReason,
}

impl fmt::Display for IllegalMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let why = match self.reason {
            IllegalReason::Occupied => "cell is not empty",
            IllegalReason::NoCapture => "no opponent discs are bracketed",
        };
        write!(f, "{} cannot play {}: {}", self.mv.mark, self.mv.position, why)
    }
}

/// Errors returned by board addressing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    /// Coordinates outside the 8×8 grid.
    OutOfRange { row: usize, col: usize },
    /// Text could not be read as a coordinate.
    Unparseable,
}

impl fmt::Display for BoardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoardError::OutOfRange { row, col } => {
                write!(f, "Coordinates ({}, {}) are outside the board", row, col)
            }
            BoardError::Unparseable => write!(f, "Expected a column letter and row number, e.g. D3"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for BoardError {}

#[cfg(feature = "std")]
impl std::error::Error for IllegalMove {}
