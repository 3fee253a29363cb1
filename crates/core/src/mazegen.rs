//! Procedural cave topology generation split into coherent submodules.

pub mod model;

mod disjoint;
mod generator;

use rand_chacha::ChaCha8Rng;

pub use generator::MazeGenerator;
pub use model::{CaveMap, Cell, Wall};

use crate::types::{MazeKind, SetupError};

/// Validates the grid parameters and generates a cave map in one call.
/// This is the topology entry point game setup goes through.
pub fn generate_maze(
    rows: i32,
    columns: i32,
    residual_walls: i32,
    kind: MazeKind,
    rng: &mut ChaCha8Rng,
) -> Result<CaveMap, SetupError> {
    Ok(MazeGenerator::new(rows, columns, residual_walls, kind)?.generate(rng))
}
