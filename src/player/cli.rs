use std::io::{self, Write};

use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader, Lines, Stdin};

use crate::core::{engine, Board, BoardError, Mark, Position};
use crate::ui::print_board;

use super::{PlayerPolicy, PolicyError};

/// Interactive player reading cells like `D3` from a line-based input.
///
/// End of input or `quit` cancels. Unparseable lines re-prompt; a parseable
/// cell is returned even when it is not a legal move.
pub struct CliPlayer<R = BufReader<Stdin>> {
    lines: Lines<R>,
}

impl CliPlayer {
    pub fn new() -> Self {
        Self::from_reader(BufReader::new(tokio::io::stdin()))
    }
}

impl Default for CliPlayer {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: AsyncBufRead + Unpin + Send> CliPlayer<R> {
    pub fn from_reader(reader: R) -> Self {
        Self {
            lines: reader.lines(),
        }
    }
}

fn parse_input(input: &str) -> Result<Option<Position>, String> {
    let input = input.trim();
    if input.eq_ignore_ascii_case("quit") || input.eq_ignore_ascii_case("q") {
        return Ok(None);
    }
    match Position::parse(input) {
        Ok(pos) => Ok(Some(pos)),
        Err(BoardError::OutOfRange { .. }) => {
            Err(format!("'{}' is off the board - columns A-H, rows 1-8", input))
        }
        Err(e) => Err(format!("Invalid cell '{}': {}", input, e)),
    }
}

#[async_trait::async_trait]
impl<R: AsyncBufRead + Unpin + Send> PlayerPolicy for CliPlayer<R> {
    async fn next_move(&mut self, board: &Board, mark: Mark) -> Result<Position, PolicyError> {
        print_board(&board.snapshot(), engine::legal_moves(board, mark));
        loop {
            print!("{} ({}) to move, enter a cell (e.g. D3) or 'quit': ", mark.color(), mark.symbol());
            io::stdout().flush()?;
            let line = match self.lines.next_line().await? {
                Some(line) => line,
                None => return Err(PolicyError::Cancelled),
            };
            match parse_input(&line) {
                Ok(Some(pos)) => return Ok(pos),
                Ok(None) => return Err(PolicyError::Cancelled),
                Err(msg) => println!("{}", msg),
            }
        }
    }
}
