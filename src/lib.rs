#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(feature = "std")]
extern crate std;

pub mod core;
#[cfg(feature = "std")]
pub mod benchmark;
#[cfg(feature = "std")]
mod logging;
#[cfg(feature = "std")]
pub mod orchestrator;
#[cfg(feature = "std")]
pub mod player;
#[cfg(feature = "std")]
pub mod prelude;
#[cfg(feature = "std")]
pub mod sink;
#[cfg(feature = "std")]
pub mod ui;

pub use crate::core::*;
#[cfg(feature = "std")]
pub use benchmark::{BenchmarkReport, PlayerTimings};
#[cfg(feature = "std")]
pub use logging::{init_logging, LOG_ENV};
#[cfg(feature = "std")]
pub use orchestrator::{
    GameConfig, GameError, PlayerWrapper, ShutdownHandle, TurnOrchestrator, TurnState,
};
#[cfg(feature = "std")]
pub use player::{
    CliPlayer, FirstLegalPolicy, GreedyPolicy, PlayerPolicy, PolicyError, RandomPolicy,
    ScriptedPolicy,
};
#[cfg(feature = "std")]
pub use sink::{ConsoleSink, NullSink, PresentationSink};
