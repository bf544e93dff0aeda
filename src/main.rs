use clap::{Parser, ValueEnum};
use log::{error, info};
use othello::{
    init_logging, CliPlayer, ConsoleSink, FirstLegalPolicy, GameConfig, GameError, GameOutcome,
    GreedyPolicy, Mark, NullSink, PlayerPolicy, PlayerWrapper, PresentationSink, RandomPolicy,
    TurnOrchestrator,
};
use rand::rngs::SmallRng;
use rand::SeedableRng;

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum PolicyKind {
    /// Interactive player typing cells on stdin.
    Human,
    /// First legal cell in row-major order.
    First,
    /// Uniformly random legal cell.
    Random,
    /// Cell flipping the most discs.
    Greedy,
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Play a game of Othello", long_about = None)]
struct Cli {
    #[arg(long, value_enum, default_value_t = PolicyKind::Human)]
    black: PolicyKind,
    #[arg(long, value_enum, default_value_t = PolicyKind::Greedy)]
    white: PolicyKind,
    #[arg(long, help = "Display name for Black (defaults to the policy name)")]
    black_name: Option<String>,
    #[arg(long, help = "Display name for White (defaults to the policy name)")]
    white_name: Option<String>,
    #[arg(long, default_value_t = 0, help = "Per-move limit in seconds, 0 for none")]
    time_limit: u64,
    #[arg(long, help = "Print per-move timings when the game ends")]
    benchmark: bool,
    #[arg(long, help = "Fix RNG seed for reproducible games (e.g., --seed 12345)")]
    seed: Option<u64>,
    #[arg(long, help = "Do not print boards while playing")]
    quiet: bool,
}

fn rng_for(seed: Option<u64>, offset: u64) -> SmallRng {
    match seed {
        Some(s) => SmallRng::seed_from_u64(s.wrapping_add(offset)),
        None => {
            let mut seed_rng = rand::rng();
            SmallRng::from_rng(&mut seed_rng)
        }
    }
}

fn build_player(kind: PolicyKind, name: Option<String>, rng: SmallRng) -> PlayerWrapper {
    let policy: Box<dyn PlayerPolicy> = match kind {
        PolicyKind::Human => Box::new(CliPlayer::new()),
        PolicyKind::First => Box::new(FirstLegalPolicy::new()),
        PolicyKind::Random => Box::new(RandomPolicy::new(rng)),
        PolicyKind::Greedy => Box::new(GreedyPolicy::new()),
    };
    let name = name.unwrap_or_else(|| format!("{:?}", kind).to_lowercase());
    PlayerWrapper::new(name, policy)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();

    let config = GameConfig::default()
        .with_time_limit_secs(cli.time_limit)
        .with_benchmark(cli.benchmark);
    let black = build_player(cli.black, cli.black_name, rng_for(cli.seed, 0));
    let white = build_player(cli.white, cli.white_name, rng_for(cli.seed, 1));
    let sink: Box<dyn PresentationSink> = if cli.quiet {
        Box::new(NullSink)
    } else {
        Box::new(ConsoleSink)
    };

    let mut game = TurnOrchestrator::new(black, white, config, sink);
    let shutdown = game.shutdown_handle();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            shutdown.shutdown();
        }
    });

    let result = game.run().await;
    if game.config().benchmark {
        print!("{}", game.benchmark());
    }

    // The last stdout line names the winner, or "draw", or is empty when
    // the game produced no result.
    match result {
        Ok(GameOutcome::Winner(mark)) => println!("{}", game.player(mark).name()),
        Ok(GameOutcome::Draw) => println!("draw"),
        Err(e) => match e.winner() {
            Some(mark) => {
                println!("{}", e);
                println!("{}", game.player(mark).name());
            }
            None => {
                error!("{}", e);
                println!();
                if !matches!(e, GameError::PolicyCancelled { .. } | GameError::Abandoned) {
                    return Err(e.into());
                }
            }
        },
    }
    let score = othello::score(game.board());
    info!(
        "Final score: {} {} - {} {}",
        Mark::Black,
        score.black,
        score.white,
        Mark::White
    );
    Ok(())
}
