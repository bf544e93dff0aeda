//! Player trait and implementations
//!
//! This module defines the PlayerPolicy trait and provides concrete implementations:
//! - FirstLegalPolicy / RandomPolicy / GreedyPolicy: rule-based automatic selection
//! - ScriptedPolicy: replays a fixed list of cells
//! - CliPlayer: Interactive command-line player

use core::fmt;

use crate::core::{Board, Mark, Position};

/// Why a policy produced no candidate.
#[derive(Debug)]
pub enum PolicyError {
    /// The policy withdrew (input closed, game shut down).
    Cancelled,
    /// The policy failed for any other reason.
    Failed(anyhow::Error),
}

impl fmt::Display for PolicyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PolicyError::Cancelled => write!(f, "Move selection was cancelled"),
            PolicyError::Failed(e) => write!(f, "Move selection failed: {}", e),
        }
    }
}

impl std::error::Error for PolicyError {}

impl From<std::io::Error> for PolicyError {
    fn from(err: std::io::Error) -> Self {
        PolicyError::Failed(err.into())
    }
}

/// Supplies the candidate cell for one side each turn.
///
/// The orchestrator only asks when `mark` has at least one legal move, and
/// drops the returned future if the game is shut down while it is pending,
/// so implementations must not leave shared state half-updated across an
/// `.await`. Returning a cell that is not legal forfeits the game.
#[async_trait::async_trait]
pub trait PlayerPolicy: Send {
    /// Choose a cell for `mark` on `board`.
    async fn next_move(&mut self, board: &Board, mark: Mark) -> Result<Position, PolicyError>;

    /// Inform the policy of the opponent's accepted move.
    fn handle_opponent_move(&mut self, _position: Position) {}
}

// Re-export implementations
pub mod ai;
pub use ai::{FirstLegalPolicy, GreedyPolicy, RandomPolicy, ScriptedPolicy};

pub mod cli;
pub use cli::CliPlayer;
