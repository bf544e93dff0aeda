use othello::{GameConfig, NullSink, PlayerWrapper, RandomPolicy, TurnOrchestrator};
use serde_json::json;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    if args.len() != 3 {
        eprintln!("Usage: {} <seed1> <seed2>", args[0]);
        std::process::exit(1);
    }
    let seed1: u64 = args[1].parse()?;
    let seed2: u64 = args[2].parse()?;

    let black = PlayerWrapper::new("player1", Box::new(RandomPolicy::seeded(seed1)));
    let white = PlayerWrapper::new("player2", Box::new(RandomPolicy::seeded(seed2)));
    let mut game = TurnOrchestrator::new(black, white, GameConfig::default(), Box::new(NullSink));

    let outcome = game.run().await?;
    let score = othello::score(game.board());
    let winner = outcome.winner().map(|mark| game.player(mark).name().to_string());
    let board: Vec<String> = game.board().to_string().lines().map(str::to_string).collect();

    let result = json!({
        "player1": {"mark": "X", "discs": score.black},
        "player2": {"mark": "O", "discs": score.white},
        "outcome": outcome,
        "winner": winner,
        "board": board,
        "benchmark": game.benchmark(),
    });

    println!("{}", serde_json::to_string(&result)?);
    Ok(())
}
