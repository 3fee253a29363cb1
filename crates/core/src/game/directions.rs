//! Compass-to-index helpers for input layers that deal in directions
//! rather than cave numbers. The returned index is fed straight back into
//! `submit` as a move or shoot target.

use std::collections::BTreeSet;

use crate::types::{Direction, Pos};

use super::Game;

struct Resolved {
    index: usize,
    direct: bool,
}

impl Game {
    /// Translate a compass direction into the move target for the active
    /// hunter. When the grid-adjacent cell in that direction is not a
    /// direct link, the traversed tunnel is marked visited and the detour
    /// cave is returned instead.
    pub fn move_to_index(&mut self, direction: Direction) -> usize {
        let pos = self.active_hunter().current_pos;
        let id = self.map.id_at(pos);
        let resolved = self.resolve_direction(id, direction);
        if !resolved.direct {
            // Not direct implies not at the grid edge, so the step stays
            // in bounds.
            let step = match direction {
                Direction::East => Pos { x: pos.x, y: pos.y + 1 },
                Direction::West => Pos { x: pos.x, y: pos.y - 1 },
                Direction::North => Pos { x: pos.x - 1, y: pos.y },
                Direction::South => Pos { x: pos.x + 1, y: pos.y },
            };
            let step_id = self.map.id_at(step);
            if !self.map.cells[step_id].is_cave {
                self.map.cells[step_id].visited = true;
            }
        }
        resolved.index
    }

    /// Translate a compass direction into the shoot target for the active
    /// hunter. Pure query; nothing is marked.
    pub fn shoot_to_index(&self, direction: Direction) -> usize {
        let pos = self.active_hunter().current_pos;
        let id = self.map.id_at(pos);
        self.resolve_direction(id, direction).index
    }

    /// The direct grid-adjacent index if it is a linked cave, otherwise the
    /// smallest linked cave that is not a grid neighbor, otherwise the
    /// current index.
    fn resolve_direction(&self, id: usize, direction: Direction) -> Resolved {
        let cell = &self.map.cells[id];
        let pos = cell.pos;
        let index = self.map.index_of(id);
        let columns = self.config.columns;
        let rows = self.config.rows;

        let east = if pos.y < columns - 1 { index + 1 } else { index };
        let west = if pos.y > 0 { index - 1 } else { index };
        let north = if pos.x > 0 { index - columns as usize } else { index };
        let south = if pos.x < rows - 1 { index + columns as usize } else { index };

        let mut linked: BTreeSet<usize> =
            cell.leads_to_caves.iter().map(|&lead| self.map.index_of(lead)).collect();
        linked.insert(index);

        let wanted = match direction {
            Direction::East => east,
            Direction::West => west,
            Direction::North => north,
            Direction::South => south,
        };
        if linked.contains(&wanted) {
            return Resolved { index: wanted, direct: true };
        }

        let adjacent = [east, west, north, south];
        let detour = linked
            .iter()
            .copied()
            .find(|candidate| !adjacent.contains(candidate))
            .unwrap_or(index);
        Resolved { index: detour, direct: false }
    }
}
