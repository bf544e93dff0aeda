use std::collections::VecDeque;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::core::{engine, scanner, Board, Mark, Position};

use super::{PlayerPolicy, PolicyError};

fn no_move(mark: Mark) -> PolicyError {
    PolicyError::Failed(anyhow::anyhow!("{} has no legal move", mark))
}

/// Plays the first legal cell in row-major order.
#[derive(Debug, Default)]
pub struct FirstLegalPolicy;

impl FirstLegalPolicy {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait::async_trait]
impl PlayerPolicy for FirstLegalPolicy {
    async fn next_move(&mut self, board: &Board, mark: Mark) -> Result<Position, PolicyError> {
        engine::legal_moves(board, mark)
            .positions()
            .next()
            .ok_or_else(|| no_move(mark))
    }
}

/// Picks uniformly among the legal cells.
pub struct RandomPolicy {
    rng: SmallRng,
}

impl RandomPolicy {
    pub fn new(rng: SmallRng) -> Self {
        Self { rng }
    }

    /// Reproducible policy for a fixed seed.
    pub fn seeded(seed: u64) -> Self {
        Self::new(SmallRng::seed_from_u64(seed))
    }
}

#[async_trait::async_trait]
impl PlayerPolicy for RandomPolicy {
    async fn next_move(&mut self, board: &Board, mark: Mark) -> Result<Position, PolicyError> {
        let moves = engine::legal_moves(board, mark);
        if moves.is_empty() {
            return Err(no_move(mark));
        }
        let pick = self.rng.random_range(0..moves.count_ones());
        moves.positions().nth(pick).ok_or_else(|| no_move(mark))
    }
}

/// Plays the cell that flips the most discs; ties go to the first in
/// row-major order.
#[derive(Debug, Default)]
pub struct GreedyPolicy;

impl GreedyPolicy {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait::async_trait]
impl PlayerPolicy for GreedyPolicy {
    async fn next_move(&mut self, board: &Board, mark: Mark) -> Result<Position, PolicyError> {
        let mut best: Option<(usize, Position)> = None;
        for pos in engine::legal_moves(board, mark).positions() {
            let flips = scanner::scan(board, pos, mark).count_ones();
            if best.map_or(true, |(most, _)| flips > most) {
                best = Some((flips, pos));
            }
        }
        best.map(|(_, pos)| pos).ok_or_else(|| no_move(mark))
    }
}

/// Replays a fixed sequence of cells, legal or not. Cancels once the script
/// runs out.
#[derive(Debug, Default)]
pub struct ScriptedPolicy {
    moves: VecDeque<Position>,
}

impl ScriptedPolicy {
    pub fn new<I: IntoIterator<Item = Position>>(moves: I) -> Self {
        Self {
            moves: moves.into_iter().collect(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.moves.len()
    }
}

#[async_trait::async_trait]
impl PlayerPolicy for ScriptedPolicy {
    async fn next_move(&mut self, _board: &Board, _mark: Mark) -> Result<Position, PolicyError> {
        self.moves.pop_front().ok_or(PolicyError::Cancelled)
    }
}
