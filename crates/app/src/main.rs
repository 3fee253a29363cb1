//! Console driver for the Wumpus hunt: reads commands line by line from
//! stdin, feeds them to the core, and prints the transcript plus the final
//! outcome banner.

use std::io::{self, BufRead};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use wumpus_core::journal_file::JournalWriter;
use wumpus_core::{Game, GameConfig, MazeKind, RunOutcome};

mod seed;

#[derive(Parser)]
#[command(author, version, about = "Hunt the Wumpus in a randomized cave maze", long_about = None)]
struct Args {
    /// Maze rows
    #[arg(long, default_value_t = 10)]
    rows: i32,
    /// Maze columns
    #[arg(long, default_value_t = 10)]
    columns: i32,
    /// Interior walls left standing after maze generation
    #[arg(long, default_value_t = 3)]
    residual_walls: i32,
    /// Number of bottomless pits
    #[arg(long, default_value_t = 2)]
    pits: i32,
    /// Number of superbat colonies
    #[arg(long, default_value_t = 2)]
    bats: i32,
    /// Preferred starting cave index (1-based)
    #[arg(long, default_value_t = 1)]
    start: i32,
    /// Arrows each hunter starts with
    #[arg(long, default_value_t = 3)]
    arrows: i32,
    /// Two hunters taking alternating turns
    #[arg(long)]
    two_player: bool,
    /// Wrap tunnels around the maze edges
    #[arg(long)]
    wrapping: bool,
    /// RNG seed; generated from the clock when absent
    #[arg(long)]
    seed: Option<u64>,
    /// Record accepted commands to this JSONL journal
    #[arg(long)]
    journal: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let config = GameConfig {
        rows: args.rows,
        columns: args.columns,
        residual_walls: args.residual_walls,
        pits: args.pits,
        bats: args.bats,
        starting_index: args.start,
        starting_arrows: args.arrows,
        two_player: args.two_player,
        maze_kind: if args.wrapping { MazeKind::Wrapping } else { MazeKind::Bounded },
    };
    let seed = args.seed.unwrap_or_else(seed::generate_runtime_seed);

    let mut game = Game::new(config, seed).context("game setup failed")?;
    let mut journal = args
        .journal
        .as_deref()
        .map(|path| {
            JournalWriter::create(path, seed, config)
                .with_context(|| format!("failed to create journal at {}", path.display()))
        })
        .transpose()?;

    println!("Welcome to Hunt The Wumpus Game!");
    println!("(seed {seed})");
    println!("{}", game.transcript());

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line.context("failed to read command")?;
        let command = line.trim();
        if command.is_empty() {
            continue;
        }
        if let Some(writer) = &mut journal {
            writer
                .append(command)
                .context("failed to append journal record")?;
        }
        println!("{}", game.submit(command));
        if game.is_end() {
            break;
        }
    }

    match game.outcome() {
        Some(RunOutcome::Eaten) => println!(
            "\nChomp, chomp, chomp, thanks for feeding the Wumpus!\nBetter luck next time\n"
        ),
        Some(RunOutcome::Fallen) => println!(
            "\nThe cave contains a bottomless pit!\nYou fall screaming into the void.\n"
        ),
        Some(RunOutcome::OutOfArrows) => println!("\nYou used up all your arrows!\nGame Over\n"),
        Some(RunOutcome::Won) => {
            println!("\nHee hee hee, you got the wumpus!\nNext time you won't be so lucky\n");
        }
        None => {}
    }

    Ok(())
}
