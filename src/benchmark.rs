#![cfg(feature = "std")]

//! Per-player move timing summary.

use std::fmt;

use serde::Serialize;

use crate::core::Mark;
use crate::orchestrator::PlayerWrapper;

/// Timing summary for one player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlayerTimings {
    pub name: String,
    pub mark: Mark,
    /// Duration of each move in whole milliseconds, in play order.
    pub moves_ms: Vec<u64>,
    /// Mean move duration in whole milliseconds; zero without moves.
    pub average_ms: u64,
}

/// Timing summary for a whole game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BenchmarkReport {
    pub players: Vec<PlayerTimings>,
}

impl BenchmarkReport {
    pub fn from_players(players: &[PlayerWrapper]) -> Self {
        let players = players
            .iter()
            .map(|p| {
                let total: u128 = p.move_times().iter().map(|d| d.as_nanos()).sum();
                let average_ms = match p.move_times().len() as u128 {
                    0 => 0,
                    n => (total / n / 1_000_000) as u64,
                };
                PlayerTimings {
                    name: p.name().to_string(),
                    mark: p.mark(),
                    moves_ms: p.move_times().iter().map(|d| d.as_millis() as u64).collect(),
                    average_ms,
                }
            })
            .collect();
        Self { players }
    }
}

impl fmt::Display for BenchmarkReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Benchmarking")?;
        for p in &self.players {
            writeln!(f, " - {} ({})", p.name, p.mark)?;
            for ms in &p.moves_ms {
                writeln!(f, "{} ms", ms)?;
            }
            writeln!(f, "Average: {} ms", p.average_ms)?;
        }
        Ok(())
    }
}
