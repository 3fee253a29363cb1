use tempfile::tempdir;

use wumpus_core::journal_file::{JournalWriter, load_journal_from_file};
use wumpus_core::{CommandJournal, Game, GameConfig, MazeKind, replay_to_end};

fn config() -> GameConfig {
    GameConfig {
        rows: 8,
        columns: 8,
        residual_walls: 2,
        pits: 1,
        bats: 1,
        starting_index: 1,
        starting_arrows: 5,
        two_player: false,
        maze_kind: MazeKind::Bounded,
    }
}

fn first_move_target(game: &Game) -> Option<usize> {
    let id = game.map().id_at(game.active_hunter().current_pos);
    let lead = game.map().cells[id].leads_to_caves.iter().next().copied()?;
    Some(game.map().index_of(lead))
}

/// Play up to `turns` first-lead moves, recording every accepted command
/// both in the in-memory journal and through `record`.
fn play_recorded(
    game: &mut Game,
    journal: &mut CommandJournal,
    turns: usize,
    mut record: impl FnMut(&str),
) {
    let mut seq = 0;
    for _ in 0..turns {
        if game.is_end() {
            break;
        }
        let Some(target) = first_move_target(game) else {
            break;
        };
        for command in ["M", &target.to_string()] {
            game.submit(command);
            journal.append_command(command, seq);
            record(command);
            seq += 1;
        }
    }
}

#[test]
fn replay_reproduces_a_recorded_run() {
    let mut live = Game::new(config(), 404).unwrap();
    let mut journal = CommandJournal::new(404, config());
    play_recorded(&mut live, &mut journal, 10, |_| {});

    let replayed = replay_to_end(&journal).unwrap();
    assert_eq!(replayed.final_snapshot_hash, live.snapshot_hash());
    assert_eq!(replayed.outcome, live.outcome());
}

#[test]
fn journal_survives_the_file_round_trip() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("run.jsonl");

    let mut live = Game::new(config(), 2024).unwrap();
    let mut journal = CommandJournal::new(2024, config());
    let mut writer = JournalWriter::create(&path, 2024, config()).unwrap();
    play_recorded(&mut live, &mut journal, 8, |command| {
        writer.append(command).unwrap();
    });
    drop(writer);

    let loaded = load_journal_from_file(&path).unwrap();
    assert_eq!(loaded.journal.seed, journal.seed);
    assert_eq!(loaded.journal.config, journal.config);
    assert_eq!(loaded.journal.commands.len(), journal.commands.len());

    let from_memory = replay_to_end(&journal).unwrap();
    let from_file = replay_to_end(&loaded.journal).unwrap();
    assert_eq!(from_file, from_memory);
    assert_eq!(from_file.final_snapshot_hash, live.snapshot_hash());
}

#[test]
fn resumed_journal_replays_the_whole_run() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("resumed.jsonl");

    let mut live = Game::new(config(), 55).unwrap();
    let mut journal = CommandJournal::new(55, config());

    let mut writer = JournalWriter::create(&path, 55, config()).unwrap();
    play_recorded(&mut live, &mut journal, 3, |command| {
        writer.append(command).unwrap();
    });
    drop(writer);

    // Simulate a crash and resume.
    let loaded = load_journal_from_file(&path).unwrap();
    let mut writer =
        JournalWriter::resume(&path, loaded.last_sha256_hex, loaded.next_seq).unwrap();
    play_recorded(&mut live, &mut journal, 3, |command| {
        writer.append(command).unwrap();
    });
    drop(writer);

    let reloaded = load_journal_from_file(&path).unwrap();
    let from_file = replay_to_end(&reloaded.journal).unwrap();
    assert_eq!(from_file.final_snapshot_hash, live.snapshot_hash());
}
