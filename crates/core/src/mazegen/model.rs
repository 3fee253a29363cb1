//! Cells, walls, and the generated cave map arena.
//!
//! Cells are addressed by flat id `x * columns + y`; the 1-based protocol
//! index exposed to players is always `flat id + 1`. Relationships between
//! cells are stored as id sets rather than references, so traversal and
//! equality are index-based and the map owns everything flatly.

use std::collections::BTreeSet;

use crate::types::Pos;

/// One grid cell. `neighbors` holds ids linked by a broken wall or a wrap
/// link; `leads_to_caves` holds the cave ids reachable through zero or more
/// tunnels, computed once after generation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cell {
    pub pos: Pos,
    pub is_cave: bool,
    pub pit: bool,
    pub bat: bool,
    pub wumpus: bool,
    pub blood: bool,
    pub draft: bool,
    pub visited: bool,
    pub neighbors: BTreeSet<usize>,
    pub leads_to_caves: BTreeSet<usize>,
}

impl Cell {
    pub(super) fn new(pos: Pos) -> Self {
        Self {
            pos,
            is_cave: false,
            pit: false,
            bat: false,
            wumpus: false,
            blood: false,
            draft: false,
            visited: false,
            neighbors: BTreeSet::new(),
            leads_to_caves: BTreeSet::new(),
        }
    }
}

/// An unordered pair of grid-adjacent cell ids. Walls move from the
/// standing list to the broken list exactly once and are never re-added.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Wall {
    pub a: usize,
    pub b: usize,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CaveMap {
    pub rows: usize,
    pub columns: usize,
    pub cells: Vec<Cell>,
    pub standing_walls: Vec<Wall>,
    pub broken_walls: Vec<Wall>,
}

impl CaveMap {
    pub(crate) fn new(rows: usize, columns: usize) -> Self {
        let mut cells = Vec::with_capacity(rows * columns);
        for x in 0..rows {
            for y in 0..columns {
                cells.push(Cell::new(Pos { x: x as i32, y: y as i32 }));
            }
        }
        Self { rows, columns, cells, standing_walls: Vec::new(), broken_walls: Vec::new() }
    }

    pub fn id_at(&self, pos: Pos) -> usize {
        pos.x as usize * self.columns + pos.y as usize
    }

    /// 1-based protocol index of a cell.
    pub fn index_of(&self, id: usize) -> usize {
        id + 1
    }

    /// Flat id for a 1-based protocol index, if it names a cell.
    pub fn id_of_index(&self, index: usize) -> Option<usize> {
        (1..=self.cells.len()).contains(&index).then(|| index - 1)
    }

    pub fn cell(&self, id: usize) -> &Cell {
        &self.cells[id]
    }

    pub fn cell_at(&self, pos: Pos) -> &Cell {
        &self.cells[self.id_at(pos)]
    }

    pub fn total_walls(&self) -> usize {
        self.rows * self.columns.saturating_sub(1) + self.rows.saturating_sub(1) * self.columns
    }

    pub fn has_cave(&self) -> bool {
        self.cells.iter().any(|cell| cell.is_cave)
    }

    /// Stable byte encoding of the whole topology, used for fingerprinting
    /// and determinism tests.
    pub fn canonical_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::new();
        bytes.extend((self.rows as u32).to_le_bytes());
        bytes.extend((self.columns as u32).to_le_bytes());
        for cell in &self.cells {
            let flags = u8::from(cell.is_cave)
                | u8::from(cell.pit) << 1
                | u8::from(cell.bat) << 2
                | u8::from(cell.wumpus) << 3
                | u8::from(cell.blood) << 4
                | u8::from(cell.draft) << 5;
            bytes.push(flags);
            bytes.extend((cell.neighbors.len() as u32).to_le_bytes());
            for &id in &cell.neighbors {
                bytes.extend((id as u32).to_le_bytes());
            }
            bytes.extend((cell.leads_to_caves.len() as u32).to_le_bytes());
            for &id in &cell.leads_to_caves {
                bytes.extend((id as u32).to_le_bytes());
            }
        }
        bytes.extend((self.standing_walls.len() as u32).to_le_bytes());
        for wall in &self.standing_walls {
            bytes.extend((wall.a as u32).to_le_bytes());
            bytes.extend((wall.b as u32).to_le_bytes());
        }
        bytes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_math_is_row_major_and_one_based() {
        let map = CaveMap::new(3, 4);
        assert_eq!(map.id_at(Pos { x: 0, y: 0 }), 0);
        assert_eq!(map.id_at(Pos { x: 2, y: 3 }), 11);
        assert_eq!(map.index_of(map.id_at(Pos { x: 1, y: 2 })), 7);
        assert_eq!(map.id_of_index(1), Some(0));
        assert_eq!(map.id_of_index(12), Some(11));
        assert_eq!(map.id_of_index(0), None);
        assert_eq!(map.id_of_index(13), None);
    }

    #[test]
    fn total_walls_matches_the_grid_formula() {
        assert_eq!(CaveMap::new(10, 10).total_walls(), 180);
        assert_eq!(CaveMap::new(1, 5).total_walls(), 4);
        assert_eq!(CaveMap::new(5, 1).total_walls(), 4);
        assert_eq!(CaveMap::new(0, 0).total_walls(), 0);
    }

    #[test]
    fn canonical_bytes_reflect_hazard_flags() {
        let mut map = CaveMap::new(2, 2);
        let baseline = map.canonical_bytes();
        map.cells[3].pit = true;
        assert_ne!(map.canonical_bytes(), baseline);
    }
}
