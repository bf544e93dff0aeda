#![cfg(feature = "std")]

//! Turn orchestration: alternates the two players, asks their policies for
//! moves, applies them through the rule engine and decides when the game
//! ends.

use core::fmt;
use std::sync::Arc;
use std::time::Duration;

use log::{debug, info, warn};
use tokio::sync::watch;
use tokio::time::Instant;

use crate::{
    benchmark::BenchmarkReport,
    core::{engine, Board, GameOutcome, IllegalMove, Mark, Move, Position},
    player::{PlayerPolicy, PolicyError},
    sink::PresentationSink,
};

/// Per-game settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GameConfig {
    /// Longest a single move may take. Each player's first move is exempt.
    pub time_limit: Option<Duration>,
    /// Whether callers want the benchmark report printed.
    pub benchmark: bool,
}

impl GameConfig {
    /// Limit given in whole seconds; zero means no limit.
    pub fn with_time_limit_secs(mut self, secs: u64) -> Self {
        self.time_limit = (secs > 0).then(|| Duration::from_secs(secs));
        self
    }

    pub fn with_benchmark(mut self, benchmark: bool) -> Self {
        self.benchmark = benchmark;
        self
    }
}

/// A policy together with its display name, mark and move timings.
pub struct PlayerWrapper {
    name: String,
    mark: Mark,
    policy: Box<dyn PlayerPolicy>,
    move_times: Vec<Duration>,
    first_move: bool,
}

impl PlayerWrapper {
    /// The mark is assigned when the wrapper is seated in a
    /// [`TurnOrchestrator`].
    pub fn new(name: impl Into<String>, policy: Box<dyn PlayerPolicy>) -> Self {
        Self {
            name: name.into(),
            mark: Mark::Black,
            policy,
            move_times: Vec::new(),
            first_move: true,
        }
    }

    fn seated(mut self, mark: Mark) -> Self {
        self.mark = mark;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn mark(&self) -> Mark {
        self.mark
    }

    /// Duration of every completed move, in play order.
    pub fn move_times(&self) -> &[Duration] {
        &self.move_times
    }

    /// True until the player's first move has been attempted.
    pub fn is_first_move(&self) -> bool {
        self.first_move
    }
}

impl fmt::Debug for PlayerWrapper {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlayerWrapper")
            .field("name", &self.name)
            .field("mark", &self.mark)
            .field("moves", &self.move_times.len())
            .finish()
    }
}

/// Where the game stands between turns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnState {
    /// `Mark` is to move.
    AwaitingMove(Mark),
    /// The previous player passed; `count` consecutive passes so far and
    /// `active` is to move next.
    Skipped { count: u8, active: Mark },
    Finished(GameOutcome),
    /// Shut down or withdrawn before a result; no outcome exists.
    Abandoned,
}

/// Reasons a game stops without a normal finish.
#[derive(Debug)]
pub enum GameError {
    /// The policy offered a move the rules do not allow. Forfeits.
    IllegalMove { player: String, violation: IllegalMove },
    /// A move took longer than the configured limit. Forfeits.
    TimeLimitExceeded {
        player: String,
        mark: Mark,
        actual: Duration,
        limit: Duration,
    },
    /// The policy withdrew or the game was shut down while it was choosing.
    PolicyCancelled { player: String, mark: Mark },
    /// The policy failed for another reason.
    PolicyFailed {
        player: String,
        mark: Mark,
        source: anyhow::Error,
    },
    /// The game was already abandoned.
    Abandoned,
}

impl GameError {
    /// The side that lost by forfeit, if this error is a forfeit.
    pub fn loser(&self) -> Option<Mark> {
        match self {
            GameError::IllegalMove { violation, .. } => Some(violation.mv.mark),
            GameError::TimeLimitExceeded { mark, .. } => Some(*mark),
            _ => None,
        }
    }

    /// The side awarded the game by forfeit.
    pub fn winner(&self) -> Option<Mark> {
        self.loser().map(Mark::opponent)
    }

    pub fn is_forfeit(&self) -> bool {
        self.loser().is_some()
    }
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::IllegalMove { player, violation } => write!(
                f,
                "Player {} ({}) performed an invalid move at {}: {}",
                player, violation.mv.mark, violation.mv.position, violation
            ),
            GameError::TimeLimitExceeded {
                player,
                mark,
                actual,
                limit,
            } => write!(
                f,
                "Player {} ({}) took {} ms, which is above the limit of {} ms",
                player,
                mark,
                actual.as_millis(),
                limit.as_millis()
            ),
            GameError::PolicyCancelled { player, mark } => {
                write!(f, "Player {} ({}) withdrew before moving", player, mark)
            }
            GameError::PolicyFailed {
                player,
                mark,
                source,
            } => write!(f, "Player {} ({}) failed to choose a move: {}", player, mark, source),
            GameError::Abandoned => write!(f, "Game was abandoned"),
        }
    }
}

impl std::error::Error for GameError {}

/// Cloneable trigger that stops a running game.
#[derive(Debug, Clone)]
pub struct ShutdownHandle {
    tx: Arc<watch::Sender<bool>>,
}

impl ShutdownHandle {
    /// Request shutdown; a pending move request is cancelled.
    pub fn shutdown(&self) {
        self.tx.send_replace(true);
    }

    pub fn is_shutdown(&self) -> bool {
        *self.tx.borrow()
    }
}

async fn shutdown_requested(rx: &mut watch::Receiver<bool>) {
    if rx.wait_for(|stop| *stop).await.is_err() {
        std::future::pending::<()>().await;
    }
}

/// Runs one game on an exclusively owned board.
pub struct TurnOrchestrator {
    board: Board,
    players: [PlayerWrapper; 2],
    config: GameConfig,
    sink: Box<dyn PresentationSink>,
    state: TurnState,
    active: Mark,
    skips: u8,
    started: bool,
    shutdown_tx: Arc<watch::Sender<bool>>,
    shutdown_rx: watch::Receiver<bool>,
}

fn seat(mark: Mark) -> usize {
    match mark {
        Mark::Black => 0,
        Mark::White => 1,
    }
}

impl TurnOrchestrator {
    /// New game on the standard starting board, Black to move.
    pub fn new(
        black: PlayerWrapper,
        white: PlayerWrapper,
        config: GameConfig,
        sink: Box<dyn PresentationSink>,
    ) -> Self {
        Self::with_board(Board::new(), black, white, config, sink)
    }

    /// New game from an arbitrary position, Black to move.
    pub fn with_board(
        board: Board,
        black: PlayerWrapper,
        white: PlayerWrapper,
        config: GameConfig,
        sink: Box<dyn PresentationSink>,
    ) -> Self {
        let (tx, rx) = watch::channel(false);
        Self {
            board,
            players: [black.seated(Mark::Black), white.seated(Mark::White)],
            config,
            sink,
            state: TurnState::AwaitingMove(Mark::Black),
            active: Mark::Black,
            skips: 0,
            started: false,
            shutdown_tx: Arc::new(tx),
            shutdown_rx: rx,
        }
    }

    pub fn shutdown_handle(&self) -> ShutdownHandle {
        ShutdownHandle {
            tx: Arc::clone(&self.shutdown_tx),
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn state(&self) -> TurnState {
        self.state
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Consecutive passes since the last applied move.
    pub fn skips(&self) -> u8 {
        self.skips
    }

    pub fn player(&self, mark: Mark) -> &PlayerWrapper {
        &self.players[seat(mark)]
    }

    pub fn players(&self) -> &[PlayerWrapper; 2] {
        &self.players
    }

    pub fn benchmark(&self) -> BenchmarkReport {
        BenchmarkReport::from_players(&self.players)
    }

    fn ensure_started(&mut self) {
        if !self.started {
            self.started = true;
            self.sink.board_updated(&self.board.snapshot());
        }
    }

    fn finish(&mut self, outcome: GameOutcome) {
        self.state = TurnState::Finished(outcome);
        info!("Game finished: {:?}", outcome);
        self.sink.game_finished(outcome);
    }

    /// Play until the game finishes.
    pub async fn run(&mut self) -> Result<GameOutcome, GameError> {
        loop {
            match self.step().await? {
                TurnState::Finished(outcome) => return Ok(outcome),
                TurnState::Abandoned => return Err(GameError::Abandoned),
                TurnState::AwaitingMove(_) | TurnState::Skipped { .. } => {}
            }
        }
    }

    /// Advance by one turn: a pass or one move.
    pub async fn step(&mut self) -> Result<TurnState, GameError> {
        match self.state {
            TurnState::Finished(_) => return Ok(self.state),
            TurnState::Abandoned => return Err(GameError::Abandoned),
            TurnState::AwaitingMove(_) | TurnState::Skipped { .. } => {}
        }
        self.ensure_started();

        let mark = self.active;
        if *self.shutdown_rx.borrow() {
            self.state = TurnState::Abandoned;
            return Err(GameError::Abandoned);
        }

        if !engine::has_any_legal_move(&self.board, mark) {
            self.skips += 1;
            let name = self.players[seat(mark)].name.clone();
            info!("{} ({}) has no legal move, pass #{}", name, mark, self.skips);
            self.sink.turn_skipped(&name, mark);
            if self.skips >= 2 {
                let outcome = engine::score(&self.board).outcome();
                self.finish(outcome);
            } else {
                self.active = mark.opponent();
                self.state = TurnState::Skipped {
                    count: self.skips,
                    active: self.active,
                };
            }
            return Ok(self.state);
        }
        self.skips = 0;

        match self.take_turn(mark).await {
            Ok(()) => {
                self.active = mark.opponent();
                self.state = TurnState::AwaitingMove(self.active);
                Ok(self.state)
            }
            Err(e) => {
                match e.winner() {
                    Some(winner) => {
                        warn!("{}", e);
                        self.finish(GameOutcome::Winner(winner));
                    }
                    None => {
                        warn!("Game abandoned: {}", e);
                        self.state = TurnState::Abandoned;
                    }
                }
                Err(e)
            }
        }
    }

    async fn take_turn(&mut self, mark: Mark) -> Result<(), GameError> {
        let Self {
            board,
            players,
            config,
            sink,
            shutdown_rx,
            ..
        } = self;
        let idx = seat(mark);
        let player = &mut players[idx];
        sink.turn_started(&player.name, mark);
        debug!("Requesting move from {} ({})", player.name, mark);

        let started = Instant::now();
        let first_move = std::mem::replace(&mut player.first_move, false);
        let candidate = tokio::select! {
            biased;
            _ = shutdown_requested(shutdown_rx) => Err(PolicyError::Cancelled),
            res = player.policy.next_move(board, mark) => res,
        };
        let position: Position = match candidate {
            Ok(pos) => pos,
            Err(PolicyError::Cancelled) => {
                return Err(GameError::PolicyCancelled {
                    player: player.name.clone(),
                    mark,
                })
            }
            Err(PolicyError::Failed(source)) => {
                return Err(GameError::PolicyFailed {
                    player: player.name.clone(),
                    mark,
                    source,
                })
            }
        };

        let captures = engine::play(board, Move::new(position, mark)).map_err(|violation| {
            GameError::IllegalMove {
                player: player.name.clone(),
                violation,
            }
        })?;
        let elapsed = started.elapsed();
        player.move_times.push(elapsed);
        debug!(
            "{} ({}) played {} flipping {} in {:?}",
            player.name,
            mark,
            position,
            captures.count_ones(),
            elapsed
        );
        sink.board_updated(&board.snapshot());

        if let Some(limit) = config.time_limit {
            if !first_move && elapsed > limit {
                return Err(GameError::TimeLimitExceeded {
                    player: player.name.clone(),
                    mark,
                    actual: elapsed,
                    limit,
                });
            }
        }

        players[seat(mark.opponent())]
            .policy
            .handle_opponent_move(position);
        Ok(())
    }
}
