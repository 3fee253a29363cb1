use crate::types::GameConfig;

use serde::{Deserialize, Serialize};

/// Everything needed to reproduce a run: the seed, the full configuration,
/// and the accepted commands in order.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CommandJournal {
    pub format_version: u16,
    pub seed: u64,
    pub config: GameConfig,
    pub commands: Vec<CommandRecord>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CommandRecord {
    pub seq: u64,
    pub command: String,
}

impl CommandJournal {
    pub fn new(seed: u64, config: GameConfig) -> Self {
        Self { format_version: 1, seed, config, commands: Vec::new() }
    }

    pub fn append_command(&mut self, command: impl Into<String>, seq: u64) {
        self.commands.push(CommandRecord { seq, command: command.into() });
    }
}
