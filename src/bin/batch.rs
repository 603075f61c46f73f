use std::fs;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};

use mc_2048::game::{play_until, Game, WIN_TILE};
use mc_2048::history::GameLog;
use mc_2048::strategy::{MonteCarlo, MonteCarloConfig, MonteCarloParallel, Strategy};

#[derive(Debug, Parser)]
#[command(name = "batch", about = "Headless Monte Carlo 2048 runner")]
struct Args {
    /// Number of games to play
    #[arg(long, default_value_t = 10)]
    games: u32,

    /// Random playouts per candidate direction
    #[arg(long, default_value_t = 100)]
    samples: usize,

    /// Tile value that counts as a win
    #[arg(long, default_value_t = WIN_TILE)]
    win_tile: u32,

    /// Stop a game after this many moves
    #[arg(long)]
    max_moves: Option<u64>,

    /// Use the single-threaded strategy instead of the parallel one
    #[arg(long)]
    sequential: bool,

    /// Write a CSV history of each won game into this directory
    #[arg(long)]
    out_dir: Option<PathBuf>,

    /// Suppress the status line
    #[arg(long)]
    quiet: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let cfg = MonteCarloConfig {
        samples: args.samples,
        win_tile: args.win_tile,
    };

    if let Some(dir) = &args.out_dir {
        fs::create_dir_all(dir)?;
    }

    let pb = if !args.quiet {
        let pb = ProgressBar::new(args.games as u64);
        pb.set_style(
            ProgressStyle::with_template(
                "{spinner} {elapsed_precise} | Games: {pos}/{len} | {msg}",
            )?
            .tick_chars("⠁⠃⠇⠧⠷⠿⠻⠟⠯⠷⠧⠇⠃"),
        );
        pb.enable_steady_tick(Duration::from_millis(120));
        Some(pb)
    } else {
        None
    };

    let start = Instant::now();
    let mut wins = 0u32;
    let mut total_moves = 0u64;
    let mut total_score = 0u64;
    let mut best_tile = 0u32;

    for game_idx in 0..args.games {
        let mut rng = rand::thread_rng();
        let mut game = Game::new(&mut rng);
        let mut log = GameLog::new();

        let mut seq_strategy;
        let mut par_strategy;
        let strategy: &mut dyn Strategy = if args.sequential {
            seq_strategy = MonteCarlo::with_config(cfg.clone());
            &mut seq_strategy
        } else {
            par_strategy = MonteCarloParallel::with_config(cfg.clone());
            &mut par_strategy
        };

        let win_tile = args.win_tile;
        let max_moves = args.max_moves;
        // Snapshot the board the move was chosen on, not the post-spawn one.
        let mut seen = *game.board();
        play_until(
            &mut game,
            strategy,
            &mut rng,
            |g| g.has_reached(win_tile) || max_moves.map_or(false, |cap| g.moves() >= cap),
            |g, direction| {
                log.push(&seen, direction);
                seen = *g.board();
            },
        );

        let won = game.has_reached(win_tile);
        if won {
            wins += 1;
            if let Some(dir) = &args.out_dir {
                let path = dir.join(format!("game-{:04}.csv", game_idx + 1));
                log.write_to_path(&path)?;
            }
        }
        total_moves += game.moves();
        total_score += game.score();
        best_tile = best_tile.max(game.highest_tile());

        if let Some(pb) = &pb {
            pb.inc(1);
            let elapsed = start.elapsed().as_secs_f64().max(1e-6);
            pb.set_message(format!(
                "moves/sec: {:.1} | wins: {}",
                total_moves as f64 / elapsed,
                wins
            ));
        }
    }

    if let Some(pb) = pb {
        pb.finish_and_clear();
    }
    let elapsed = start.elapsed().as_secs_f64().max(1e-6);
    println!(
        "Games: {} | Wins: {} | Mean score: {:.1} | Best tile: {} | moves/sec: {:.1}",
        args.games,
        wins,
        total_score as f64 / args.games.max(1) as f64,
        best_tile,
        total_moves as f64 / elapsed
    );
    Ok(())
}
