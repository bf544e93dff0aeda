//! The 8×8 grid: disc occupancy plus a static adjacency index.
//!
//! Adjacency is stored as four undirected axes, each linking a cell to at
//! most one neighbour per side. Walking an axis `Forward` or `Backward`
//! yields the eight compass directions.

use core::fmt;

use super::common::{BoardError, Cell, CellSet, Mark, Position};
use super::config::{BOARD_SIZE, CELL_COUNT, INITIAL_BLACK, INITIAL_WHITE};

/// One of the four lines through a cell. Numbered 1-4 in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    /// Top-left to bottom-right.
    DiagonalDown,
    Vertical,
    /// Bottom-left to top-right.
    DiagonalUp,
    Horizontal,
}

impl Axis {
    pub const ALL: [Axis; 4] = [
        Axis::DiagonalDown,
        Axis::Vertical,
        Axis::DiagonalUp,
        Axis::Horizontal,
    ];

    pub const fn number(self) -> u8 {
        self.slot() as u8 + 1
    }

    const fn slot(self) -> usize {
        match self {
            Axis::DiagonalDown => 0,
            Axis::Vertical => 1,
            Axis::DiagonalUp => 2,
            Axis::Horizontal => 3,
        }
    }

    /// (row, col) delta of one forward step.
    const fn forward_step(self) -> (isize, isize) {
        match self {
            Axis::DiagonalDown => (1, 1),
            Axis::Vertical => (1, 0),
            Axis::DiagonalUp => (1, -1),
            Axis::Horizontal => (0, 1),
        }
    }
}

/// Which way an axis is traversed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sense {
    Forward,
    Backward,
}

impl Sense {
    pub const fn reverse(self) -> Sense {
        match self {
            Sense::Forward => Sense::Backward,
            Sense::Backward => Sense::Forward,
        }
    }

    const fn slot(self) -> usize {
        match self {
            Sense::Forward => 0,
            Sense::Backward => 1,
        }
    }
}

/// A compass direction: an axis plus the sense it is walked in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Direction {
    pub axis: Axis,
    pub sense: Sense,
}

impl Direction {
    pub const ALL: [Direction; 8] = [
        Direction::new(Axis::DiagonalDown, Sense::Forward),
        Direction::new(Axis::DiagonalDown, Sense::Backward),
        Direction::new(Axis::Vertical, Sense::Forward),
        Direction::new(Axis::Vertical, Sense::Backward),
        Direction::new(Axis::DiagonalUp, Sense::Forward),
        Direction::new(Axis::DiagonalUp, Sense::Backward),
        Direction::new(Axis::Horizontal, Sense::Forward),
        Direction::new(Axis::Horizontal, Sense::Backward),
    ];

    pub const fn new(axis: Axis, sense: Sense) -> Self {
        Direction { axis, sense }
    }

    pub const fn reverse(self) -> Direction {
        Direction {
            axis: self.axis,
            sense: self.sense.reverse(),
        }
    }
}

/// An adjacent cell, tagged with how it was reached from the origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Neighbor {
    pub position: Position,
    pub axis: Axis,
    pub sense: Sense,
}

impl Neighbor {
    pub fn direction(&self) -> Direction {
        Direction {
            axis: self.axis,
            sense: self.sense,
        }
    }
}

type Links = [[Option<Position>; 2]; 4];

/// Board state: one occupancy plane per mark and the adjacency table.
#[derive(Clone, PartialEq, Eq)]
pub struct Board {
    black: CellSet,
    white: CellSet,
    links: [Links; CELL_COUNT],
}

impl Board {
    /// Board in the canonical starting position.
    pub fn new() -> Self {
        let mut board = Self::empty();
        for pos in INITIAL_BLACK {
            board.set_mark(pos, Some(Mark::Black));
        }
        for pos in INITIAL_WHITE {
            board.set_mark(pos, Some(Mark::White));
        }
        board
    }

    /// Board with every cell empty.
    pub fn empty() -> Self {
        Board {
            black: CellSet::new(),
            white: CellSet::new(),
            links: build_links(),
        }
    }

    /// Build a board from eight rows of `X` (Black), `O` (White) and `.`
    /// (empty). Whitespace inside a row is ignored.
    pub fn from_rows(rows: [&str; BOARD_SIZE]) -> Result<Self, BoardError> {
        let mut board = Self::empty();
        for (r, line) in rows.iter().enumerate() {
            let mut c = 0;
            for ch in line.chars().filter(|ch| !ch.is_whitespace()) {
                let mark = match ch {
                    'X' | 'x' => Some(Mark::Black),
                    'O' | 'o' => Some(Mark::White),
                    '.' => None,
                    _ => return Err(BoardError::Unparseable),
                };
                board.set_mark(Position::new(r, c)?, mark);
                c += 1;
            }
            if c != BOARD_SIZE {
                return Err(BoardError::Unparseable);
            }
        }
        Ok(board)
    }

    /// The cell at (row, col).
    pub fn cell_at(&self, row: usize, col: usize) -> Result<Cell, BoardError> {
        let position = Position::new(row, col)?;
        Ok(self.cell(position))
    }

    pub fn cell(&self, position: Position) -> Cell {
        Cell {
            position,
            mark: self.mark_at(position),
        }
    }

    pub fn mark_at(&self, pos: Position) -> Option<Mark> {
        if self.black.contains(pos) {
            Some(Mark::Black)
        } else if self.white.contains(pos) {
            Some(Mark::White)
        } else {
            None
        }
    }

    /// Overwrite a single cell.
    pub fn set_mark(&mut self, pos: Position, mark: Option<Mark>) {
        self.black.remove(pos);
        self.white.remove(pos);
        match mark {
            Some(Mark::Black) => self.black.insert(pos),
            Some(Mark::White) => self.white.insert(pos),
            None => {}
        }
    }

    /// Cells holding `mark`.
    pub fn occupancy(&self, mark: Mark) -> CellSet {
        match mark {
            Mark::Black => self.black,
            Mark::White => self.white,
        }
    }

    pub fn empty_cells(&self) -> CellSet {
        !(self.black | self.white)
    }

    /// Give every cell in `cells` to `mark`, taking them from the opponent.
    pub fn claim(&mut self, mark: Mark, cells: CellSet) {
        let (mine, theirs) = match mark {
            Mark::Black => (&mut self.black, &mut self.white),
            Mark::White => (&mut self.white, &mut self.black),
        };
        *mine |= cells;
        *theirs = *theirs & !cells;
    }

    pub fn count(&self, mark: Mark) -> usize {
        self.occupancy(mark).count_ones()
    }

    /// The cell one step from `pos` in `dir`, if it is on the board.
    pub fn step(&self, pos: Position, dir: Direction) -> Option<Position> {
        self.links[pos.index()][dir.axis.slot()][dir.sense.slot()]
    }

    /// Up to eight adjacent cells, each paired with the axis and sense that
    /// reach it from `pos`.
    pub fn neighbors(&self, pos: Position) -> impl Iterator<Item = Neighbor> + '_ {
        Direction::ALL.into_iter().filter_map(move |dir| {
            self.step(pos, dir).map(|position| Neighbor {
                position,
                axis: dir.axis,
                sense: dir.sense,
            })
        })
    }

    /// All 64 cells in row-major order.
    pub fn snapshot(&self) -> [Cell; CELL_COUNT] {
        core::array::from_fn(|idx| {
            let position = Position::new_unchecked((idx / BOARD_SIZE) as u8, (idx % BOARD_SIZE) as u8);
            self.cell(position)
        })
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

fn build_links() -> [Links; CELL_COUNT] {
    let mut links = [[[None; 2]; 4]; CELL_COUNT];
    for (idx, cell_links) in links.iter_mut().enumerate() {
        let row = (idx / BOARD_SIZE) as isize;
        let col = (idx % BOARD_SIZE) as isize;
        for axis in Axis::ALL {
            let (dr, dc) = axis.forward_step();
            cell_links[axis.slot()][Sense::Forward.slot()] = offset(row + dr, col + dc);
            cell_links[axis.slot()][Sense::Backward.slot()] = offset(row - dr, col - dc);
        }
    }
    links
}

fn offset(row: isize, col: isize) -> Option<Position> {
    let size = BOARD_SIZE as isize;
    if (0..size).contains(&row) && (0..size).contains(&col) {
        Some(Position::new_unchecked(row as u8, col as u8))
    } else {
        None
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for r in 0..BOARD_SIZE {
            for c in 0..BOARD_SIZE {
                let symbol = match self.mark_at(Position::new_unchecked(r as u8, c as u8)) {
                    Some(mark) => mark.symbol(),
                    None => ".",
                };
                f.write_str(symbol)?;
            }
            if r + 1 < BOARD_SIZE {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Board {{ black: {}, white: {} }}",
            self.count(Mark::Black),
            self.count(Mark::White)
        )?;
        write!(f, "{}", self)
    }
}
