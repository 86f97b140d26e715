//! Notifications the orchestrator sends while a hand plays out.

use crate::cards::Card;
use crate::history::HandHistoryVerb;
use crate::showdown::Award;
use crate::state::Street;
use std::sync::mpsc::Sender;
use tracing::info;

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[non_exhaustive]
pub enum GameEvent {
    HandStarted {
        hand_number: u64,
        dealer: usize,
        small_blind_seat: usize,
        big_blind_seat: usize,
    },
    /// Blinds and voluntary actions alike.
    ActionExecuted {
        street: Street,
        seat: usize,
        verb: HandHistoryVerb,
        amount: Option<u64>,
        all_in: bool,
        /// Pot including outstanding bets, after the action.
        pot: u64,
    },
    StreetChanged {
        street: Street,
        board: Vec<Card>,
        pot: u64,
    },
    HandComplete {
        hand_number: u64,
        awards: Vec<Award>,
        board: Vec<Card>,
        showdown: bool,
    },
}

/// Receives every [`GameEvent`] in order.
pub trait GameListener {
    fn on_event(&mut self, event: &GameEvent);
}

/// Logs events through `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingListener;

impl GameListener for TracingListener {
    fn on_event(&mut self, event: &GameEvent) {
        match event {
            GameEvent::HandStarted { hand_number, dealer, small_blind_seat, big_blind_seat } => {
                info!(hand_number, dealer, small_blind_seat, big_blind_seat, "hand started");
            }
            GameEvent::ActionExecuted { street, seat, verb, amount, all_in, pot } => {
                info!(?street, seat, verb = verb.label(), ?amount, all_in, pot, "action");
            }
            GameEvent::StreetChanged { street, board, pot } => {
                let board: Vec<String> = board.iter().map(|c| c.to_string()).collect();
                info!(?street, board = board.join(" "), pot, "street dealt");
            }
            GameEvent::HandComplete { hand_number, awards, showdown, .. } => {
                for a in awards {
                    info!(hand_number, seat = a.seat, pot = a.pot_index, amount = a.amount, "award");
                }
                info!(hand_number, showdown, "hand complete");
            }
        }
    }
}

/// Forward events to a channel; a closed receiver is ignored.
impl GameListener for Sender<GameEvent> {
    fn on_event(&mut self, event: &GameEvent) {
        let _ = self.send(event.clone());
    }
}

