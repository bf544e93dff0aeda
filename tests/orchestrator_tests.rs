use std::sync::{Arc, Mutex};
use std::time::Duration;

use othello::{
    score, Board, Cell, FirstLegalPolicy, GameConfig, GameError, GameOutcome, GreedyPolicy,
    IllegalReason, Mark, NullSink, PlayerPolicy, PlayerWrapper, PolicyError, Position,
    PresentationSink, RandomPolicy, ScriptedPolicy, TurnOrchestrator, TurnState, CELL_COUNT,
};

fn pos(row: usize, col: usize) -> Position {
    Position::new(row, col).unwrap()
}

#[derive(Default)]
struct Events {
    boards: Vec<Vec<Cell>>,
    skipped: Vec<Mark>,
    outcomes: Vec<GameOutcome>,
}

#[derive(Clone, Default)]
struct RecordingSink(Arc<Mutex<Events>>);

impl PresentationSink for RecordingSink {
    fn board_updated(&mut self, cells: &[Cell; CELL_COUNT]) {
        self.0.lock().unwrap().boards.push(cells.to_vec());
    }

    fn turn_skipped(&mut self, _name: &str, mark: Mark) {
        self.0.lock().unwrap().skipped.push(mark);
    }

    fn game_finished(&mut self, outcome: GameOutcome) {
        self.0.lock().unwrap().outcomes.push(outcome);
    }
}

/// Waits on the (paused) clock, then defers to the first legal move.
struct SlowPolicy {
    delay: Duration,
}

#[async_trait::async_trait]
impl PlayerPolicy for SlowPolicy {
    async fn next_move(&mut self, board: &Board, mark: Mark) -> Result<Position, PolicyError> {
        tokio::time::sleep(self.delay).await;
        let mut inner = FirstLegalPolicy::new();
        inner.next_move(board, mark).await
    }
}

/// Never answers.
struct StuckPolicy;

#[async_trait::async_trait]
impl PlayerPolicy for StuckPolicy {
    async fn next_move(&mut self, _board: &Board, _mark: Mark) -> Result<Position, PolicyError> {
        std::future::pending().await
    }
}

fn player(name: &str, policy: impl PlayerPolicy + 'static) -> PlayerWrapper {
    PlayerWrapper::new(name, Box::new(policy))
}

#[tokio::test]
async fn test_full_game_reaches_majority_outcome() {
    let sink = RecordingSink::default();
    let mut game = TurnOrchestrator::new(
        player("first", FirstLegalPolicy::new()),
        player("greedy", GreedyPolicy::new()),
        GameConfig::default(),
        Box::new(sink.clone()),
    );
    let outcome = game.run().await.unwrap();

    assert_eq!(outcome, score(game.board()).outcome());
    assert_eq!(game.state(), TurnState::Finished(outcome));
    assert_eq!(game.skips(), 2);

    let moves: usize = game.players().iter().map(|p| p.move_times().len()).sum();
    let events = sink.0.lock().unwrap();
    assert_eq!(events.outcomes, vec![outcome]);
    assert_eq!(events.boards.len(), 1 + moves);
    assert_eq!(events.boards[0], Board::new().snapshot().to_vec());
    assert_eq!(score(game.board()).total(), 4 + moves);
}

#[tokio::test]
async fn test_random_games_are_reproducible() {
    let mut outcomes = Vec::new();
    for _ in 0..2 {
        let mut game = TurnOrchestrator::new(
            player("a", RandomPolicy::seeded(7)),
            player("b", RandomPolicy::seeded(8)),
            GameConfig::default(),
            Box::new(NullSink),
        );
        let outcome = game.run().await.unwrap();
        outcomes.push((outcome, game.board().to_string()));
    }
    assert_eq!(outcomes[0], outcomes[1]);
}

#[tokio::test]
async fn test_single_skip_passes_the_turn() {
    let board = Board::from_rows([
        "OX......",
        "........",
        "........",
        "........",
        "........",
        "........",
        "........",
        "........",
    ])
    .unwrap();
    let sink = RecordingSink::default();
    let mut game = TurnOrchestrator::with_board(
        board,
        player("black", FirstLegalPolicy::new()),
        player("white", FirstLegalPolicy::new()),
        GameConfig::default(),
        Box::new(sink.clone()),
    );

    let state = game.step().await.unwrap();
    assert_eq!(
        state,
        TurnState::Skipped {
            count: 1,
            active: Mark::White
        }
    );
    assert_eq!(game.skips(), 1);

    // White captures the lone black disc and the skip counter resets.
    let state = game.step().await.unwrap();
    assert_eq!(state, TurnState::AwaitingMove(Mark::Black));
    assert_eq!(game.skips(), 0);
    assert_eq!(game.board().mark_at(pos(0, 2)), Some(Mark::White));
    assert_eq!(game.board().count(Mark::Black), 0);

    // Neither side can move now; White wins with the only mark on the board.
    let outcome = game.run().await.unwrap();
    assert_eq!(outcome, GameOutcome::Winner(Mark::White));
    assert_eq!(sink.0.lock().unwrap().skipped, vec![Mark::Black, Mark::Black, Mark::White]);
}

#[tokio::test]
async fn test_double_skip_with_equal_counts_is_a_draw() {
    let board = Board::from_rows([
        "X......O",
        "........",
        "........",
        "........",
        "........",
        "........",
        "........",
        "........",
    ])
    .unwrap();
    let sink = RecordingSink::default();
    let mut game = TurnOrchestrator::with_board(
        board,
        player("black", FirstLegalPolicy::new()),
        player("white", FirstLegalPolicy::new()),
        GameConfig::default(),
        Box::new(sink.clone()),
    );
    assert!(matches!(game.step().await.unwrap(), TurnState::Skipped { count: 1, .. }));
    assert_eq!(game.step().await.unwrap(), TurnState::Finished(GameOutcome::Draw));

    // Further steps are no-ops and the outcome is emitted only once.
    assert_eq!(game.step().await.unwrap(), TurnState::Finished(GameOutcome::Draw));
    assert_eq!(sink.0.lock().unwrap().outcomes, vec![GameOutcome::Draw]);
}

#[tokio::test]
async fn test_illegal_move_forfeits() {
    let sink = RecordingSink::default();
    let mut game = TurnOrchestrator::new(
        player("cheater", ScriptedPolicy::new([pos(0, 0)])),
        player("honest", FirstLegalPolicy::new()),
        GameConfig::default(),
        Box::new(sink.clone()),
    );
    let err = game.run().await.unwrap_err();
    match &err {
        GameError::IllegalMove { player, violation } => {
            assert_eq!(player, "cheater");
            assert_eq!(violation.mv.position, pos(0, 0));
            assert_eq!(violation.reason, IllegalReason::NoCapture);
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(err.loser(), Some(Mark::Black));
    assert_eq!(err.winner(), Some(Mark::White));
    assert_eq!(game.state(), TurnState::Finished(GameOutcome::Winner(Mark::White)));
    assert_eq!(*game.board(), Board::new());
    assert_eq!(sink.0.lock().unwrap().outcomes, vec![GameOutcome::Winner(Mark::White)]);
}

#[tokio::test]
async fn test_occupied_cell_forfeits() {
    let mut game = TurnOrchestrator::new(
        player("black", FirstLegalPolicy::new()),
        player("white", ScriptedPolicy::new([pos(3, 3)])),
        GameConfig::default(),
        Box::new(NullSink),
    );
    let err = game.run().await.unwrap_err();
    assert!(matches!(
        err,
        GameError::IllegalMove { ref violation, .. } if violation.reason == IllegalReason::Occupied
    ));
    assert_eq!(err.winner(), Some(Mark::Black));
}

#[tokio::test(start_paused = true)]
async fn test_time_limit_exempts_first_move() {
    let config = GameConfig::default().with_time_limit_secs(1);
    let mut game = TurnOrchestrator::new(
        player("slow", SlowPolicy { delay: Duration::from_secs(2) }),
        player("fast", FirstLegalPolicy::new()),
        config,
        Box::new(NullSink),
    );

    assert!(game.player(Mark::Black).is_first_move());
    // Black's slow opening move is allowed.
    assert_eq!(game.step().await.unwrap(), TurnState::AwaitingMove(Mark::White));
    assert!(!game.player(Mark::Black).is_first_move());
    assert!(game.player(Mark::White).is_first_move());
    assert_eq!(game.step().await.unwrap(), TurnState::AwaitingMove(Mark::Black));

    let err = game.step().await.unwrap_err();
    match err {
        GameError::TimeLimitExceeded {
            ref player,
            mark,
            actual,
            limit,
        } => {
            assert_eq!(player, "slow");
            assert_eq!(mark, Mark::Black);
            assert!(actual >= Duration::from_secs(2));
            assert_eq!(limit, Duration::from_secs(1));
        }
        ref other => panic!("unexpected error: {other:?}"),
    }
    assert!(err.is_forfeit());
    assert_eq!(game.state(), TurnState::Finished(GameOutcome::Winner(Mark::White)));
    assert_eq!(game.player(Mark::Black).move_times().len(), 2);
    assert_eq!(game.player(Mark::White).move_times().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_sink_sees_board_of_move_forfeited_on_time() {
    let sink = RecordingSink::default();
    let mut game = TurnOrchestrator::new(
        player("slow", SlowPolicy { delay: Duration::from_secs(2) }),
        player("fast", FirstLegalPolicy::new()),
        GameConfig::default().with_time_limit_secs(1),
        Box::new(sink.clone()),
    );
    game.step().await.unwrap();
    game.step().await.unwrap();
    let err = game.step().await.unwrap_err();
    assert!(matches!(err, GameError::TimeLimitExceeded { mark: Mark::Black, .. }));

    // The late move stays on the board and is shown before the result.
    let events = sink.0.lock().unwrap();
    assert_eq!(events.boards.len(), 4);
    assert_eq!(events.boards.last().unwrap(), &game.board().snapshot().to_vec());
    assert_eq!(score(game.board()).total(), 7);
    assert_eq!(events.outcomes, vec![GameOutcome::Winner(Mark::White)]);
}

#[tokio::test(start_paused = true)]
async fn test_no_time_limit_allows_slow_moves() {
    let mut game = TurnOrchestrator::new(
        player("slow", SlowPolicy { delay: Duration::from_secs(30) }),
        player("slower", SlowPolicy { delay: Duration::from_secs(60) }),
        GameConfig::default(),
        Box::new(NullSink),
    );
    for _ in 0..6 {
        game.step().await.unwrap();
    }
    // The paused clock advances to each sleep deadline, rounded to the
    // timer's millisecond resolution.
    let report = game.benchmark();
    assert_eq!(report.players[0].moves_ms.len(), 3);
    assert!(report.players[0].moves_ms.iter().all(|ms| (30_000..=30_001).contains(ms)));
    assert!((60_000..=60_001).contains(&report.players[1].average_ms));
}

#[tokio::test(start_paused = true)]
async fn test_shutdown_abandons_pending_move() {
    let sink = RecordingSink::default();
    let mut game = TurnOrchestrator::new(
        player("stuck", StuckPolicy),
        player("white", FirstLegalPolicy::new()),
        GameConfig::default(),
        Box::new(sink.clone()),
    );
    let handle = game.shutdown_handle();
    let (result, _) = tokio::join!(game.run(), async {
        tokio::time::sleep(Duration::from_millis(50)).await;
        handle.shutdown();
    });

    assert!(matches!(
        result,
        Err(GameError::PolicyCancelled { ref player, mark: Mark::Black }) if player == "stuck"
    ));
    assert!(handle.is_shutdown());
    assert_eq!(game.state(), TurnState::Abandoned);
    assert_eq!(*game.board(), Board::new());
    assert!(sink.0.lock().unwrap().outcomes.is_empty());
    assert!(matches!(game.run().await, Err(GameError::Abandoned)));
}

#[tokio::test]
async fn test_policy_withdrawal_abandons_game() {
    let mut game = TurnOrchestrator::new(
        player("black", ScriptedPolicy::new([pos(2, 3)])),
        player("white", FirstLegalPolicy::new()),
        GameConfig::default(),
        Box::new(NullSink),
    );
    let err = game.run().await.unwrap_err();
    assert!(matches!(err, GameError::PolicyCancelled { mark: Mark::Black, .. }));
    assert!(!err.is_forfeit());
    assert_eq!(game.state(), TurnState::Abandoned);
    assert_eq!(game.player(Mark::Black).move_times().len(), 1);
}

/// Fails with an internal error instead of choosing.
struct BrokenPolicy;

#[async_trait::async_trait]
impl PlayerPolicy for BrokenPolicy {
    async fn next_move(&mut self, _board: &Board, _mark: Mark) -> Result<Position, PolicyError> {
        Err(PolicyError::Failed(anyhow::anyhow!("engine crashed")))
    }
}

#[tokio::test]
async fn test_policy_failure_abandons_game() {
    let sink = RecordingSink::default();
    let mut game = TurnOrchestrator::new(
        player("black", FirstLegalPolicy::new()),
        player("broken", BrokenPolicy),
        GameConfig::default(),
        Box::new(sink.clone()),
    );
    assert_eq!(game.step().await.unwrap(), TurnState::AwaitingMove(Mark::White));

    let err = game.step().await.unwrap_err();
    match &err {
        GameError::PolicyFailed { player, mark, source } => {
            assert_eq!(player, "broken");
            assert_eq!(*mark, Mark::White);
            assert_eq!(source.to_string(), "engine crashed");
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(!err.is_forfeit());
    assert_eq!(err.winner(), None);
    assert_eq!(game.state(), TurnState::Abandoned);
    assert!(sink.0.lock().unwrap().outcomes.is_empty());
    assert!(matches!(game.step().await, Err(GameError::Abandoned)));
}

#[tokio::test]
async fn test_scripted_policy_consumes_moves_in_order() {
    let mut policy = ScriptedPolicy::new([pos(2, 3), pos(0, 0)]);
    assert_eq!(policy.remaining(), 2);
    let board = Board::new();
    assert_eq!(policy.next_move(&board, Mark::Black).await.unwrap(), pos(2, 3));
    assert_eq!(policy.remaining(), 1);
    assert_eq!(policy.next_move(&board, Mark::Black).await.unwrap(), pos(0, 0));
    assert_eq!(policy.remaining(), 0);
    assert!(matches!(
        policy.next_move(&board, Mark::Black).await,
        Err(PolicyError::Cancelled)
    ));
}
