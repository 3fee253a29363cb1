use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use wumpus_core::journal_file::load_journal_from_file;
use wumpus_core::{CommandJournal, ReplayResult, replay_to_end};

/// Replays a recorded run and prints its outcome and snapshot hash, for
/// checking that a journal still reproduces the same game.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the journal to replay (`.jsonl` hash-chained file, or a
    /// plain `.json` dump of the journal)
    #[arg(short, long)]
    journal: PathBuf,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let journal: CommandJournal =
        if args.journal.extension().is_some_and(|ext| ext == "json") {
            let journal_data = fs::read_to_string(&args.journal)
                .with_context(|| format!("failed to read journal file: {}", args.journal.display()))?;
            serde_json::from_str(&journal_data).context("failed to deserialize journal JSON")?
        } else {
            load_journal_from_file(&args.journal)
                .map_err(|e| anyhow::anyhow!("failed to load journal: {e}"))?
                .journal
        };

    let result: ReplayResult =
        replay_to_end(&journal).map_err(|e| anyhow::anyhow!("replay failed: {e}"))?;

    println!("Replay complete.");
    println!("Commands applied: {}", result.commands_applied);
    println!("Outcome: {:?}", result.outcome);
    println!("Snapshot Hash: {}", result.final_snapshot_hash);

    Ok(())
}
