//! Commonly used types and utilities for ease of import.

pub use crate::{
    Board, GameConfig, GameError, GameOutcome, Mark, PlayerPolicy, PlayerWrapper, Position,
    PresentationSink, TurnOrchestrator, TurnState,
};

pub use crate::{ConsoleSink, FirstLegalPolicy, GreedyPolicy, NullSink, RandomPolicy};
