#![cfg(feature = "std")]

//! Presentation sinks: where the orchestrator reports board snapshots and
//! the final outcome.

use crate::core::{Cell, CellSet, GameOutcome, Mark, CELL_COUNT};
use crate::ui::render_board;

/// Receiver for everything a display layer needs to follow a game.
pub trait PresentationSink: Send {
    /// Full board after setup and after every applied move.
    fn board_updated(&mut self, cells: &[Cell; CELL_COUNT]);

    /// `name` is about to be asked for a move.
    fn turn_started(&mut self, _name: &str, _mark: Mark) {}

    /// `name` had no legal move and passed.
    fn turn_skipped(&mut self, _name: &str, _mark: Mark) {}

    /// Emitted exactly once when the game finishes.
    fn game_finished(&mut self, _outcome: GameOutcome) {}
}

/// Ignores every event.
#[derive(Debug, Default)]
pub struct NullSink;

impl PresentationSink for NullSink {
    fn board_updated(&mut self, _cells: &[Cell; CELL_COUNT]) {}
}

/// Prints boards and results to stdout.
#[derive(Debug, Default)]
pub struct ConsoleSink;

impl PresentationSink for ConsoleSink {
    fn board_updated(&mut self, cells: &[Cell; CELL_COUNT]) {
        std::println!("{}", render_board(cells, CellSet::new()));
    }

    fn turn_started(&mut self, name: &str, mark: Mark) {
        std::println!("\n{} ({}) to move", name, mark.color());
    }

    fn turn_skipped(&mut self, name: &str, mark: Mark) {
        std::println!("{} ({}) has no legal move and passes", name, mark.color());
    }

    fn game_finished(&mut self, outcome: GameOutcome) {
        match outcome {
            GameOutcome::Winner(mark) => std::println!("\nGAME OVER: {} wins", mark.color()),
            GameOutcome::Draw => std::println!("\nGAME OVER: draw"),
        }
    }
}
