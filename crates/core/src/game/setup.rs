//! Board setup: topology generation, hazard placement, and hunter spawn.
//!
//! Placement order is fixed (pits, bats, Wumpus, hunters) so a seed fully
//! determines the board. Everything draws from the single game RNG stream.

use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::SeedableRng;

use crate::mazegen::generate_maze;
use crate::rng::rand_below;
use crate::types::{PlayerSlot, Pos, SetupError, TurnState};

use super::{Game, Hunter};

impl Game {
    pub(super) fn setup(&mut self) -> Result<(), SetupError> {
        self.rng = ChaCha8Rng::seed_from_u64(self.seed);
        self.map = generate_maze(
            self.config.rows,
            self.config.columns,
            self.config.residual_walls,
            self.config.maze_kind,
            &mut self.rng,
        )?;
        if !self.map.has_cave() {
            return Err(SetupError::NoCaveAvailable);
        }

        self.log.clear();
        self.output.clear();
        self.active = PlayerSlot::One;
        self.state = TurnState::AwaitingAction;
        self.pending_passes = 0;

        self.place_pits();
        self.place_bats();
        self.place_wumpus();
        self.place_hunters()?;

        self.describe_location();
        self.resolve_bats();
        self.prompt_action();
        Ok(())
    }

    /// A uniformly random cave cell, sampled by rejection. Setup verified
    /// that at least one cave exists, so the loop terminates.
    fn random_cave_pos(&mut self) -> Pos {
        loop {
            let x = rand_below(&mut self.rng, self.config.rows as usize) as i32;
            let y = rand_below(&mut self.rng, self.config.columns as usize) as i32;
            let pos = Pos { x, y };
            if self.map.cell_at(pos).is_cave {
                return pos;
            }
        }
    }

    fn place_pits(&mut self) {
        for _ in 0..self.config.pits {
            let pos = self.random_cave_pos();
            let id = self.map.id_at(pos);
            self.map.cells[id].pit = true;
            // Caves one tunnel-walk away feel the draft.
            let leads: Vec<usize> = self.map.cells[id].leads_to_caves.iter().copied().collect();
            for lead in leads {
                self.map.cells[lead].draft = true;
            }
        }
    }

    fn place_bats(&mut self) {
        for _ in 0..self.config.bats {
            let pos = self.random_cave_pos();
            let id = self.map.id_at(pos);
            self.map.cells[id].bat = true;
        }
    }

    fn place_wumpus(&mut self) {
        let pos = self.random_cave_pos();
        let id = self.map.id_at(pos);
        self.map.cells[id].wumpus = true;
        let leads: Vec<usize> = self.map.cells[id].leads_to_caves.iter().copied().collect();
        for lead in leads {
            self.map.cells[lead].blood = true;
        }
    }

    fn place_hunters(&mut self) -> Result<(), SetupError> {
        let columns = self.config.columns;
        let start_id = self.config.starting_index - 1;
        let mut pos = Pos { x: start_id / columns, y: start_id % columns };
        // The requested start may land in a tunnel; fall back to a random
        // cave so the hunter always begins somewhere describable.
        if !self.map.cell_at(pos).is_cave {
            pos = self.random_cave_pos();
        }
        self.hunter_one = Hunter::new(pos)?;
        self.hunter_one.arrows = self.config.starting_arrows;
        self.hunter_two = if self.config.two_player {
            let mut two = Hunter::new(pos)?;
            two.arrows = self.config.starting_arrows;
            Some(two)
        } else {
            None
        };
        Ok(())
    }
}
