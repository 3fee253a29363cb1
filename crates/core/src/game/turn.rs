//! Command dispatch for the four turn states, plus the transcript helpers
//! shared with setup (location description, bat resolution, prompts).

use crate::rng::rand_below;
use crate::types::{LogEvent, PlayerSlot, Pos, TurnState};

use super::Game;

impl Game {
    pub(super) fn update(&mut self, input: &str) {
        match self.state {
            TurnState::AwaitingAction => self.handle_action(input),
            TurnState::AwaitingMoveTarget => self.handle_move_target(input),
            TurnState::AwaitingShootRange => self.handle_shoot_range(input),
            TurnState::AwaitingShootTarget => self.handle_shoot_target(input),
        }
    }

    fn handle_action(&mut self, input: &str) {
        match input {
            "M" => {
                self.output.push_str("Where to?");
                self.state = TurnState::AwaitingMoveTarget;
            }
            "S" => {
                self.output.push_str("No. of caves (1-5)?");
                self.state = TurnState::AwaitingShootRange;
            }
            _ => {
                self.output.push_str("invalid command for Shoot or Move, input S or M");
                self.describe_location();
                self.prompt_action();
            }
        }
    }

    fn handle_move_target(&mut self, input: &str) {
        let from = self.active_hunter().current_pos;
        let Some(target) = self.lead_target(input, from) else {
            self.output.push_str("Not valid cave index move to");
            self.output.push_str("\nWhere to?");
            return;
        };
        let slot = self.active;
        let pos = self.map.cells[target].pos;
        self.active_hunter_mut().current_pos = pos;
        self.map.cells[target].visited = true;
        self.log.push(LogEvent::HunterMoved { slot, to_index: self.map.index_of(target) });
        self.switch_player();
        self.describe_location();
        self.resolve_bats();
        self.prompt_action();
        self.state = TurnState::AwaitingAction;
    }

    fn handle_shoot_range(&mut self, input: &str) {
        let passes = input.parse::<u32>().ok().filter(|p| (1..=5).contains(p));
        let Some(passes) = passes else {
            self.output.push_str("Not valid num of caves pass");
            self.output.push_str("\nNo. of caves (1-5)?");
            return;
        };
        self.pending_passes = passes;
        self.output.push_str("Toward cave?");
        self.state = TurnState::AwaitingShootTarget;
    }

    fn handle_shoot_target(&mut self, input: &str) {
        // The target must be reachable from wherever the arrow currently
        // rests, not from the hunter.
        let from = self.active_hunter().arrow_pos;
        let Some(target) = self.lead_target(input, from) else {
            self.output.push_str("Not valid cave index shoot towards");
            self.output.push_str("\nToward cave?");
            return;
        };
        let slot = self.active;
        let passes = self.pending_passes;
        let pos = self.map.cells[target].pos;
        {
            let hunter = self.active_hunter_mut();
            hunter.arrows -= 1;
            // Ranges beyond one cave spend the arrow without landing it.
            if passes == 1 {
                hunter.arrow_pos = pos;
            }
        }
        let arrows = self.active_hunter().arrows;
        self.output
            .push_str(&format!("\nMissed.\nYour has {arrows} more arrows to Shoot\n"));
        self.log.push(LogEvent::ArrowFired {
            slot,
            target_index: self.map.index_of(target),
            passes,
        });
        self.state = TurnState::AwaitingAction;
        self.switch_player();
        self.describe_location();
        self.resolve_bats();
        self.prompt_action();
    }

    /// Parse a 1-based cell index and accept it only when it names a cave
    /// one tunnel-walk away from `from`.
    fn lead_target(&self, input: &str, from: Pos) -> Option<usize> {
        let index = input.parse::<usize>().ok()?;
        let id = self.map.id_of_index(index)?;
        self.map.cell_at(from).leads_to_caves.contains(&id).then_some(id)
    }

    fn switch_player(&mut self) {
        if !self.config.two_player {
            return;
        }
        match self.active {
            PlayerSlot::One => {
                self.active = PlayerSlot::Two;
                self.output.push_str("\n\n** Switch to Player 2 **\n");
                self.log.push(LogEvent::SwitchedPlayer { to: PlayerSlot::Two });
            }
            PlayerSlot::Two => {
                self.active = PlayerSlot::One;
                self.log.push(LogEvent::SwitchedPlayer { to: PlayerSlot::One });
            }
        }
    }

    pub(super) fn describe_location(&mut self) {
        let id = self.map.id_at(self.active_hunter().current_pos);
        self.map.cells[id].visited = true;
        let cell = &self.map.cells[id];
        if cell.blood && cell.draft {
            self.output
                .push_str("\nTough choice! You smell a Wumpus and you feel a cold wind blowing");
        } else if cell.blood {
            self.output.push_str("\nYou smell a Wumpus!");
        } else if cell.draft {
            self.output.push_str("\nYou feel a cold wind blowing!");
        }
        let label = if cell.is_cave { "Cave" } else { "Tunnel" };
        self.output
            .push_str(&format!("\nYou are in {label} {}", self.map.index_of(id)));
        let leads: Vec<String> = cell
            .leads_to_caves
            .iter()
            .map(|&lead| format!("Cave {}", self.map.index_of(lead)))
            .collect();
        self.output
            .push_str(&format!("\nTunnel Leads to: [{}]", leads.join(", ")));
    }

    pub(super) fn prompt_action(&mut self) {
        self.output.push_str("\nShoot or Move (S-M)?");
    }

    /// Bats keep trying until the hunter ducks or lands in a bat-free cell.
    pub(super) fn resolve_bats(&mut self) {
        loop {
            let pos = self.active_hunter().current_pos;
            let id = self.map.id_at(pos);
            if !self.map.cells[id].bat {
                return;
            }
            let slot = self.active;
            if rand_below(&mut self.rng, 2) == 0 {
                self.output
                    .push_str("\nWhoa -- you successfully duck superbats that try to grab you");
                self.log.push(LogEvent::BatDucked { slot });
                self.describe_location();
                return;
            }
            let rows = self.config.rows as usize;
            let columns = self.config.columns as usize;
            let mut x = rand_below(&mut self.rng, rows) as i32;
            let mut y = rand_below(&mut self.rng, columns) as i32;
            // Reroll only when the draw lands back on this exact cell and
            // it is a tunnel; any other cell is a valid drop point.
            while x == pos.x && y == pos.y && !self.map.cell_at(Pos { x, y }).is_cave {
                x = rand_below(&mut self.rng, rows) as i32;
                y = rand_below(&mut self.rng, columns) as i32;
            }
            self.output
                .push_str("\nSnatch -- you are grabbed by superbats and ...");
            let dest = Pos { x, y };
            self.active_hunter_mut().current_pos = dest;
            self.log.push(LogEvent::BatSnatched {
                slot,
                to_index: self.map.index_of(self.map.id_at(dest)),
            });
            self.describe_location();
        }
    }
}
