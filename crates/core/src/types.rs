use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Grid coordinate. `x` is the row, `y` is the column, matching the
/// row-major cell indexing `index = x * columns + y + 1`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Pos {
    pub x: i32,
    pub y: i32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    North,
    South,
    East,
    West,
}

/// Bounded grids stop at the edges; wrapping grids additionally link the
/// first and last row and the first and last column after wall breaking.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MazeKind {
    Bounded,
    Wrapping,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerSlot {
    One,
    Two,
}

/// The four protocol states of the turn machine. Every completed move or
/// shot returns to `AwaitingAction`; invalid input never changes state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TurnState {
    AwaitingAction,
    AwaitingMoveTarget,
    AwaitingShootRange,
    AwaitingShootTarget,
}

/// Why a finished run ended, in the order the predicates are checked.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunOutcome {
    Eaten,
    Fallen,
    OutOfArrows,
    Won,
}

/// Gameplay events appended as the state machine runs. Cave positions are
/// reported as 1-based protocol indices.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LogEvent {
    HunterMoved { slot: PlayerSlot, to_index: usize },
    ArrowFired { slot: PlayerSlot, target_index: usize, passes: u32 },
    BatDucked { slot: PlayerSlot },
    BatSnatched { slot: PlayerSlot, to_index: usize },
    SwitchedPlayer { to: PlayerSlot },
}

/// Construction parameters for a game. Serialized into journals so a
/// recorded run carries everything needed to rebuild it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub rows: i32,
    pub columns: i32,
    pub residual_walls: i32,
    pub pits: i32,
    pub bats: i32,
    pub starting_index: i32,
    pub starting_arrows: i32,
    pub two_player: bool,
    pub maze_kind: MazeKind,
}

/// Construction-time validation failures. Unrecoverable for the instance;
/// turn-time input problems are handled inside the state machine instead.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SetupError {
    #[error("invalid map size, rows and columns cannot be negative")]
    NegativeDimensions,
    #[error("invalid number of walls left, cannot be negative")]
    NegativeResidualWalls,
    #[error("invalid number of walls left, should be in range 0 to {max}")]
    ResidualWallsOutOfRange { max: i64 },
    #[error("invalid number of pits")]
    InvalidPitCount,
    #[error("invalid number of bats")]
    InvalidBatCount,
    #[error("invalid starting index")]
    InvalidStartingIndex,
    #[error("invalid number of arrows to start")]
    InvalidStartingArrows,
    #[error("invalid position for a hunter")]
    InvalidHunterPosition,
    #[error("generated topology contains no cave to place hazards or hunters on")]
    NoCaveAvailable,
}
