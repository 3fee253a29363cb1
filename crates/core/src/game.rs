//! The turn-driven game controller: consumes textual commands, mutates
//! hunter state, applies hazard effects, and answers termination queries.
//!
//! The protocol is strictly request/response: `submit` runs one command to
//! completion and leaves the accumulated transcript readable through
//! `transcript`. Termination is never pushed; the driver polls the
//! predicates after every turn.

use std::hash::Hasher;

use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::SeedableRng;
use xxhash_rust::xxh3::Xxh3;

use crate::mazegen::{CaveMap, MazeGenerator};
use crate::types::{
    GameConfig, LogEvent, PlayerSlot, Pos, RunOutcome, SetupError, TurnState,
};

mod directions;
mod setup;
mod turn;


/// Position and arrow state for one player. A pure value holder; the game
/// controller owns and mutates it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Hunter {
    pub current_pos: Pos,
    pub arrow_pos: Pos,
    pub arrows: i32,
}

impl Hunter {
    pub fn new(current_pos: Pos) -> Result<Self, SetupError> {
        if current_pos.x < 0 || current_pos.y < 0 {
            return Err(SetupError::InvalidHunterPosition);
        }
        Ok(Self { current_pos, arrow_pos: current_pos, arrows: 0 })
    }
}

pub struct Game {
    config: GameConfig,
    seed: u64,
    rng: ChaCha8Rng,
    map: CaveMap,
    hunter_one: Hunter,
    hunter_two: Option<Hunter>,
    active: PlayerSlot,
    state: TurnState,
    pending_passes: u32,
    output: String,
    log: Vec<LogEvent>,
}

impl Game {
    /// Validate the configuration, generate the topology, place hazards and
    /// hunters, and emit the opening transcript.
    pub fn new(config: GameConfig, seed: u64) -> Result<Self, SetupError> {
        validate(&config)?;
        let mut game = Self {
            config,
            seed,
            rng: ChaCha8Rng::seed_from_u64(seed),
            map: CaveMap::new(0, 0),
            hunter_one: Hunter::new(Pos { x: 0, y: 0 })?,
            hunter_two: None,
            active: PlayerSlot::One,
            state: TurnState::AwaitingAction,
            pending_passes: 0,
            output: String::new(),
            log: Vec::new(),
        };
        game.setup()?;
        Ok(game)
    }

    /// Re-run setup from the stored seed: topology, hazard placement,
    /// hunter state, and the opening transcript all come back identical.
    pub fn restart(&mut self) -> Result<(), SetupError> {
        self.setup()
    }

    /// Process one command. The output buffer is cleared first, so the
    /// returned transcript covers exactly this request.
    pub fn submit(&mut self, input: &str) -> &str {
        self.output.clear();
        self.update(input);
        &self.output
    }

    /// Text accumulated by the last `submit` (or by setup, before the
    /// first command).
    pub fn transcript(&self) -> &str {
        &self.output
    }

    pub fn map(&self) -> &CaveMap {
        &self.map
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn turn_state(&self) -> TurnState {
        self.state
    }

    pub fn log(&self) -> &[LogEvent] {
        &self.log
    }

    pub fn active_player(&self) -> PlayerSlot {
        self.active
    }

    pub fn hunter_one(&self) -> &Hunter {
        &self.hunter_one
    }

    pub fn hunter_two(&self) -> Option<&Hunter> {
        self.hunter_two.as_ref()
    }

    pub fn active_hunter(&self) -> &Hunter {
        match self.active {
            PlayerSlot::One => &self.hunter_one,
            PlayerSlot::Two => self.hunter_two.as_ref().unwrap_or(&self.hunter_one),
        }
    }

    pub(crate) fn active_hunter_mut(&mut self) -> &mut Hunter {
        match self.active {
            PlayerSlot::One => &mut self.hunter_one,
            PlayerSlot::Two => match &mut self.hunter_two {
                Some(hunter) => hunter,
                None => &mut self.hunter_one,
            },
        }
    }

    /// The active hunter shares a cell with the Wumpus.
    pub fn is_eaten(&self) -> bool {
        self.map.cell_at(self.active_hunter().current_pos).wumpus
    }

    /// The active hunter stands on a bottomless pit.
    pub fn is_fallen(&self) -> bool {
        self.map.cell_at(self.active_hunter().current_pos).pit
    }

    pub fn is_out_of_arrows(&self) -> bool {
        self.active_hunter().arrows <= 0
    }

    /// The arrow rests in the Wumpus cave.
    pub fn is_game_won(&self) -> bool {
        self.map.cell_at(self.active_hunter().arrow_pos).wumpus
    }

    pub fn is_end(&self) -> bool {
        self.is_eaten() || self.is_fallen() || self.is_out_of_arrows() || self.is_game_won()
    }

    /// First matching outcome, in the same order `is_end` checks them.
    pub fn outcome(&self) -> Option<RunOutcome> {
        if self.is_eaten() {
            Some(RunOutcome::Eaten)
        } else if self.is_fallen() {
            Some(RunOutcome::Fallen)
        } else if self.is_out_of_arrows() {
            Some(RunOutcome::OutOfArrows)
        } else if self.is_game_won() {
            Some(RunOutcome::Won)
        } else {
            None
        }
    }

    pub fn snapshot_hash(&self) -> u64 {
        let mut hasher = Xxh3::new();
        hasher.write_u64(self.seed);
        hasher.write(&self.map.canonical_bytes());
        write_hunter(&mut hasher, &self.hunter_one);
        if let Some(two) = &self.hunter_two {
            write_hunter(&mut hasher, two);
        }
        hasher.write_u8(match self.active {
            PlayerSlot::One => 0,
            PlayerSlot::Two => 1,
        });
        hasher.write_u8(match self.state {
            TurnState::AwaitingAction => 0,
            TurnState::AwaitingMoveTarget => 1,
            TurnState::AwaitingShootRange => 2,
            TurnState::AwaitingShootTarget => 3,
        });
        hasher.write_u32(self.pending_passes);
        hasher.finish()
    }
}

fn write_hunter<H: Hasher>(hasher: &mut H, hunter: &Hunter) {
    hasher.write_i32(hunter.current_pos.x);
    hasher.write_i32(hunter.current_pos.y);
    hasher.write_i32(hunter.arrow_pos.x);
    hasher.write_i32(hunter.arrow_pos.y);
    hasher.write_i32(hunter.arrows);
}

fn validate(config: &GameConfig) -> Result<(), SetupError> {
    // Dimension and residual-wall bounds live with the generator; check
    // them before anything derived from the cell count.
    MazeGenerator::new(config.rows, config.columns, config.residual_walls, config.maze_kind)?;
    let cells = i64::from(config.rows) * i64::from(config.columns);
    if config.pits < 0 || i64::from(config.pits) > cells - 1 - i64::from(config.bats) {
        return Err(SetupError::InvalidPitCount);
    }
    if config.bats < 0 || i64::from(config.bats) > cells - 1 - i64::from(config.pits) {
        return Err(SetupError::InvalidBatCount);
    }
    if config.starting_index < 1 || i64::from(config.starting_index) > cells {
        return Err(SetupError::InvalidStartingIndex);
    }
    if config.starting_arrows < 0 {
        return Err(SetupError::InvalidStartingArrows);
    }
    Ok(())
}
