pub mod game;
pub mod journal;
pub mod journal_file;
pub mod mazegen;
pub mod replay;
pub mod types;

mod rng;

pub use game::{Game, Hunter};
pub use journal::{CommandJournal, CommandRecord};
pub use mazegen::{CaveMap, Cell, MazeGenerator, Wall};
pub use replay::{ReplayResult, replay_to_end};
pub use types::*;
