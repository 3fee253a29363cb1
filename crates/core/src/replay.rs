use crate::game::Game;
use crate::journal::CommandJournal;
use crate::types::{RunOutcome, SetupError};

#[derive(Debug, PartialEq, Eq)]
pub struct ReplayResult {
    pub outcome: Option<RunOutcome>,
    pub final_snapshot_hash: u64,
    pub commands_applied: u64,
}

/// Rebuild a game from a journal and feed it every recorded command, in
/// order, stopping early if the game ends first.
pub fn replay_to_end(journal: &CommandJournal) -> Result<ReplayResult, SetupError> {
    let mut game = Game::new(journal.config, journal.seed)?;
    let mut commands_applied = 0;
    for record in &journal.commands {
        if game.is_end() {
            break;
        }
        game.submit(&record.command);
        commands_applied += 1;
    }
    Ok(ReplayResult {
        outcome: game.outcome(),
        final_snapshot_hash: game.snapshot_hash(),
        commands_applied,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{GameConfig, MazeKind};

    fn config() -> GameConfig {
        GameConfig {
            rows: 8,
            columns: 8,
            residual_walls: 2,
            pits: 1,
            bats: 1,
            starting_index: 3,
            starting_arrows: 3,
            two_player: false,
            maze_kind: MazeKind::Bounded,
        }
    }

    #[test]
    fn replay_matches_live_play() {
        let mut live = Game::new(config(), 777).unwrap();
        let mut journal = CommandJournal::new(777, config());

        let mut seq = 0;
        for command in ["M", "4", "S", "1", "9", "M", "2"] {
            if live.is_end() {
                break;
            }
            live.submit(command);
            journal.append_command(command, seq);
            seq += 1;
        }

        let replayed = replay_to_end(&journal).unwrap();
        assert_eq!(replayed.final_snapshot_hash, live.snapshot_hash());
        assert_eq!(replayed.outcome, live.outcome());
        assert_eq!(replayed.commands_applied, seq);
    }

    #[test]
    fn replay_of_empty_journal_reproduces_setup() {
        let journal = CommandJournal::new(42, config());
        let fresh = Game::new(config(), 42).unwrap();
        let replayed = replay_to_end(&journal).unwrap();
        assert_eq!(replayed.final_snapshot_hash, fresh.snapshot_hash());
        assert_eq!(replayed.commands_applied, 0);
    }

    #[test]
    fn replay_rejects_invalid_config() {
        let mut bad = config();
        bad.pits = -1;
        let journal = CommandJournal::new(1, bad);
        assert_eq!(replay_to_end(&journal).err(), Some(SetupError::InvalidPitCount));
    }
}
