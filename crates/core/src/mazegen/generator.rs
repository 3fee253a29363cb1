//! Randomized wall breaking over the grid, then cave classification and
//! tunnel-chain resolution.
//!
//! Breaking unions the two cells unconditionally, so cycles are permitted:
//! the result is a loopy cave layout, not a spanning tree. The number of
//! standing walls left over is exact and configurable.

use std::collections::BTreeSet;

use rand_chacha::ChaCha8Rng;

use super::disjoint::DisjointSets;
use super::model::{CaveMap, Wall};
use crate::rng::rand_below;
use crate::types::{MazeKind, SetupError};

#[derive(Debug)]
pub struct MazeGenerator {
    rows: usize,
    columns: usize,
    residual_walls: usize,
    kind: MazeKind,
}

impl MazeGenerator {
    pub fn new(
        rows: i32,
        columns: i32,
        residual_walls: i32,
        kind: MazeKind,
    ) -> Result<Self, SetupError> {
        if rows < 0 || columns < 0 {
            return Err(SetupError::NegativeDimensions);
        }
        if residual_walls < 0 {
            return Err(SetupError::NegativeResidualWalls);
        }
        let max = (i64::from(rows) - 1) * (i64::from(columns) - 1);
        if i64::from(residual_walls) > max {
            return Err(SetupError::ResidualWallsOutOfRange { max });
        }
        Ok(Self {
            rows: rows as usize,
            columns: columns as usize,
            residual_walls: residual_walls as usize,
            kind,
        })
    }

    pub fn generate(&self, rng: &mut ChaCha8Rng) -> CaveMap {
        let mut map = CaveMap::new(self.rows, self.columns);
        self.build_walls(&mut map);
        self.break_walls(&mut map, rng);
        if self.kind == MazeKind::Wrapping {
            self.link_wrapping(&mut map);
        }
        classify_caves(&mut map);
        resolve_cave_links(&mut map);
        map
    }

    /// Exhaustive wall list: one down-neighbor and one right-neighbor entry
    /// per cell in row-major order, no diagonals, no duplicates.
    fn build_walls(&self, map: &mut CaveMap) {
        for x in 0..self.rows {
            for y in 0..self.columns {
                let id = x * self.columns + y;
                if x < self.rows - 1 {
                    map.standing_walls.push(Wall { a: id, b: id + self.columns });
                }
                if y < self.columns - 1 {
                    map.standing_walls.push(Wall { a: id, b: id + 1 });
                }
            }
        }
    }

    fn break_walls(&self, map: &mut CaveMap, rng: &mut ChaCha8Rng) {
        let mut joined = DisjointSets::new(self.rows * self.columns);
        while map.standing_walls.len() > self.residual_walls {
            let pick = rand_below(rng, map.standing_walls.len());
            let wall = map.standing_walls.remove(pick);
            // No cycle guard on purpose: loops are part of the layout.
            joined.union(wall.a, wall.b);
            map.cells[wall.a].neighbors.insert(wall.b);
            map.cells[wall.b].neighbors.insert(wall.a);
            map.broken_walls.push(wall);
        }
        debug_assert!(
            map.broken_walls.iter().all(|wall| joined.is_connected(wall.a, wall.b)),
            "every broken wall must join its cells in the disjoint-set forest"
        );
    }

    /// Wrap links join opposite edges after the break phase. They are never
    /// counted as breakable walls.
    fn link_wrapping(&self, map: &mut CaveMap) {
        if self.rows == 0 || self.columns == 0 {
            return;
        }
        for x in 0..self.rows {
            let west = x * self.columns;
            let east = x * self.columns + self.columns - 1;
            map.cells[west].neighbors.insert(east);
            map.cells[east].neighbors.insert(west);
        }
        for y in 0..self.columns {
            let north = y;
            let south = (self.rows - 1) * self.columns + y;
            map.cells[north].neighbors.insert(south);
            map.cells[south].neighbors.insert(north);
        }
    }
}

/// A cell is a tunnel exactly when it bridges two links; every other degree
/// makes it a cave.
fn classify_caves(map: &mut CaveMap) {
    for cell in &mut map.cells {
        cell.is_cave = cell.neighbors.len() != 2;
    }
}

fn resolve_cave_links(map: &mut CaveMap) {
    for id in 0..map.cells.len() {
        let mut leads = BTreeSet::new();
        for &neighbor in &map.cells[id].neighbors {
            if map.cells[neighbor].is_cave {
                leads.insert(neighbor);
            } else {
                let mut visited = BTreeSet::from([id, neighbor]);
                leads.insert(walk_tunnel(map, neighbor, &mut visited));
            }
        }
        map.cells[id].leads_to_caves = leads;
    }
}

/// Follow a tunnel's unique unvisited continuation until a cave appears.
/// When no continuation exists (a malformed topology) the walk degrades to
/// the last cell seen rather than failing.
fn walk_tunnel(map: &CaveMap, from: usize, visited: &mut BTreeSet<usize>) -> usize {
    for &next in &map.cells[from].neighbors {
        if visited.contains(&next) {
            continue;
        }
        if map.cells[next].is_cave {
            return next;
        }
        visited.insert(next);
        return walk_tunnel(map, next, visited);
    }
    from
}
