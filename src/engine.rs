// Minimal engine boundary. Agents and the terminal UI drive a table through
// this trait so they never touch engine internals. Implemented for `Game`.

use crate::betting::{Action, LegalActions};
use crate::game::{Game, GameError, GameSnapshot, Phase};

pub trait GameEngine {
    // Hand lifecycle
    fn start_hand(&mut self) -> Result<(), GameError>;
    fn execute_action(&mut self, seat: usize, action: Action) -> Result<(), GameError>;

    // Queries
    fn phase(&self) -> Phase;
    fn action_seat(&self) -> Option<usize>;
    fn legal_actions(&self, seat: usize) -> Option<LegalActions>;
    fn snapshot(&self) -> GameSnapshot;
    fn num_players(&self) -> usize;
}

impl GameEngine for Game {
    fn start_hand(&mut self) -> Result<(), GameError> {
        Game::start_hand(self)
    }

    fn execute_action(&mut self, seat: usize, action: Action) -> Result<(), GameError> {
        Game::execute_action(self, seat, action)
    }

    fn phase(&self) -> Phase {
        Game::phase(self)
    }

    fn action_seat(&self) -> Option<usize> {
        Game::action_seat(self)
    }

    fn legal_actions(&self, seat: usize) -> Option<LegalActions> {
        Game::legal_actions(self, seat)
    }

    fn snapshot(&self) -> GameSnapshot {
        Game::snapshot(self)
    }

    fn num_players(&self) -> usize {
        self.players().len()
    }
}
