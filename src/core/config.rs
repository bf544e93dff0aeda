use super::common::Position;

pub const BOARD_SIZE: usize = 8;
pub const CELL_COUNT: usize = BOARD_SIZE * BOARD_SIZE;

/// Black's discs in the canonical starting position (row, col).
pub const INITIAL_BLACK: [Position; 2] = [Position::new_unchecked(3, 4), Position::new_unchecked(4, 3)];

/// White's discs in the canonical starting position (row, col).
pub const INITIAL_WHITE: [Position; 2] = [Position::new_unchecked(3, 3), Position::new_unchecked(4, 4)];
