//! Agents: pluggable seat controllers.
//!
//! A `PlayerAgent` decides for one seat when that seat is on turn;
//! `AgentTable` maps seats to agents and drives whichever one is up. Both
//! only see the table through [`GameEngine`], so front ends stay thin.

use crate::betting::{Action, LegalActions};
use crate::engine::GameEngine;
use crate::game::GameError;
use core::fmt;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::time::{Duration, Instant};
use tracing::trace;

/// Kinds of agents attached to seats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum AgentKind {
    Human,
    Bot,
}

/// What a person pressed, before it is matched to the legal moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum Intent {
    Fold,
    CheckCall,
    /// Smallest legal bet or raise.
    MinBetRaise,
    AllIn,
    /// Bet or raise to this street total.
    Amount(u64),
}

impl Intent {
    /// The concrete action this intent stands for, if one is legal-shaped.
    /// Amounts are still checked by the engine.
    pub fn resolve(self, legal: &LegalActions) -> Option<Action> {
        match self {
            Intent::Fold => Some(Action::Fold),
            Intent::CheckCall => {
                Some(if legal.can_check { Action::Check } else { Action::Call })
            }
            Intent::MinBetRaise => legal
                .min_bet
                .map(Action::Bet)
                .or_else(|| legal.min_raise_to.map(Action::Raise)),
            Intent::AllIn => Some(legal.all_in()),
            Intent::Amount(total) => {
                if legal.min_bet.is_some() {
                    Some(Action::Bet(total))
                } else if legal.min_raise_to.is_some() {
                    Some(Action::Raise(total))
                } else {
                    None
                }
            }
        }
    }
}

/// A seat controller that can act for a player when it is their turn.
pub trait PlayerAgent {
    /// Called while `seat` is on turn. Returns whether an action was taken;
    /// implementations may wait (for input, for a delay) and return false.
    fn on_turn(&mut self, engine: &mut dyn GameEngine, seat: usize) -> Result<bool, GameError>;

    fn kind(&self) -> AgentKind {
        AgentKind::Bot
    }

    /// Queue an intent from a front end; default is to ignore it.
    fn receive(&mut self, _intent: Intent) -> bool {
        false
    }
}

/// Acts on whatever intent a front end queued.
#[derive(Debug, Default)]
pub struct HumanAgent {
    pending: Option<Intent>,
}

impl HumanAgent {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PlayerAgent for HumanAgent {
    fn kind(&self) -> AgentKind {
        AgentKind::Human
    }

    fn receive(&mut self, intent: Intent) -> bool {
        if self.pending.is_some() {
            return false;
        }
        self.pending = Some(intent);
        true
    }

    fn on_turn(&mut self, engine: &mut dyn GameEngine, seat: usize) -> Result<bool, GameError> {
        let Some(legal) = engine.legal_actions(seat) else {
            self.pending = None;
            return Ok(false);
        };
        let Some(intent) = self.pending.take() else {
            return Ok(false);
        };
        match intent.resolve(&legal) {
            Some(action) => engine.execute_action(seat, action).map(|_| true),
            None => Ok(false),
        }
    }
}

/// Never folds: checks when it can, calls otherwise.
#[derive(Debug, Clone, Copy, Default)]
pub struct CallingAgent;

impl PlayerAgent for CallingAgent {
    fn on_turn(&mut self, engine: &mut dyn GameEngine, seat: usize) -> Result<bool, GameError> {
        let Some(legal) = engine.legal_actions(seat) else {
            return Ok(false);
        };
        let action = if legal.can_check { Action::Check } else { Action::Call };
        engine.execute_action(seat, action).map(|_| true)
    }
}

/// Never puts chips in: checks when it can, folds otherwise.
#[derive(Debug, Clone, Copy, Default)]
pub struct CheckFoldAgent;

impl PlayerAgent for CheckFoldAgent {
    fn on_turn(&mut self, engine: &mut dyn GameEngine, seat: usize) -> Result<bool, GameError> {
        let Some(legal) = engine.legal_actions(seat) else {
            return Ok(false);
        };
        let action = if legal.can_check { Action::Check } else { Action::Fold };
        engine.execute_action(seat, action).map(|_| true)
    }
}

/// Picks uniformly among fold, check/call and a bet or raise between the
/// minimum and all-in. Reproducible when seeded.
#[derive(Debug, Clone)]
pub struct RandomAgent {
    rng: ChaCha8Rng,
}

impl RandomAgent {
    pub fn seeded(seed: u64) -> Self {
        Self { rng: ChaCha8Rng::seed_from_u64(seed) }
    }

    fn choose(&mut self, legal: &LegalActions) -> Action {
        let passive = if legal.can_check { Action::Check } else { Action::Call };
        let sized = match (legal.min_bet, legal.min_raise_to) {
            (Some(min), _) => Some(Action::Bet(self.rng.random_range(min..=legal.max_total))),
            (None, Some(min)) => Some(Action::Raise(self.rng.random_range(min..=legal.max_total))),
            (None, None) => None,
        };
        match self.rng.random_range(0..3u8) {
            0 if !legal.can_check => Action::Fold,
            2 => sized.unwrap_or(passive),
            _ => passive,
        }
    }
}

impl PlayerAgent for RandomAgent {
    fn on_turn(&mut self, engine: &mut dyn GameEngine, seat: usize) -> Result<bool, GameError> {
        let Some(legal) = engine.legal_actions(seat) else {
            return Ok(false);
        };
        let action = self.choose(&legal);
        trace!(seat, ?action, "random agent");
        engine.execute_action(seat, action).map(|_| true)
    }
}

/// Manages a set of optional agents, one per seat, and drives the agent at
/// the seat on turn.
pub struct AgentTable {
    seats: Vec<Option<Box<dyn PlayerAgent>>>,
    min_action_delay: Duration,
    next_action_at: Option<Instant>,
}

impl fmt::Debug for AgentTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let flags: String = self
            .seats
            .iter()
            .map(|a| match a.as_deref().map(|ag| ag.kind()) {
                Some(AgentKind::Human) => 'H',
                Some(AgentKind::Bot) => 'B',
                None => '-',
            })
            .collect();
        write!(f, "AgentTable({flags})")
    }
}

impl AgentTable {
    /// Create a table with `n` seats, all empty.
    pub fn for_seats(n: usize) -> Self {
        let mut seats = Vec::with_capacity(n);
        seats.resize_with(n, || None);
        Self { seats, min_action_delay: Duration::ZERO, next_action_at: None }
    }

    /// Assign an agent to a seat (or remove when `None`).
    pub fn set_agent(&mut self, seat: usize, agent: Option<Box<dyn PlayerAgent>>) {
        if seat >= self.seats.len() {
            self.seats.resize_with(seat + 1, || None);
        }
        self.seats[seat] = agent;
    }

    pub fn agent_kind(&self, seat: usize) -> Option<AgentKind> {
        self.seats.get(seat).and_then(|a| a.as_deref().map(|ag| ag.kind()))
    }

    /// Send an intent to a seat's agent, if any.
    pub fn receive(&mut self, seat: usize, intent: Intent) -> bool {
        if let Some(Some(agent)) = self.seats.get_mut(seat) {
            return agent.receive(intent);
        }
        false
    }

    pub fn has_agent(&self, seat: usize) -> bool {
        self.seats.get(seat).is_some_and(|a| a.is_some())
    }

    /// Minimum pause after a bot acts before the next bot may act.
    pub fn set_min_action_delay_ms(&mut self, delay_ms: u64) {
        self.min_action_delay = Duration::from_millis(delay_ms);
    }

    /// Drive the agent assigned to the seat on turn, if any.
    pub fn on_turn(&mut self, engine: &mut dyn GameEngine) -> Result<bool, GameError> {
        let Some(seat) = engine.action_seat() else {
            return Ok(false);
        };
        let Some(Some(agent)) = self.seats.get_mut(seat) else {
            return Ok(false);
        };
        let now = Instant::now();
        if agent.kind() == AgentKind::Bot {
            if let Some(next) = self.next_action_at {
                if now < next {
                    return Ok(false);
                }
            }
        }
        let acted = agent.on_turn(engine, seat)?;
        if acted && !self.min_action_delay.is_zero() {
            self.next_action_at = Some(now + self.min_action_delay);
        }
        Ok(acted)
    }

    /// Let agents act until a seat without an agent (or a waiting one) is on
    /// turn, or the hand ends. Returns the number of actions taken.
    pub fn run_until_blocked(&mut self, engine: &mut dyn GameEngine) -> Result<usize, GameError> {
        let mut taken = 0;
        while self.on_turn(engine)? {
            taken += 1;
        }
        Ok(taken)
    }
}
