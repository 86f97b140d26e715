//! Per-hand action log and deterministic replay.

use crate::betting::Action;
use crate::cards::Card;
use crate::config::TableConfig;
use crate::deck::{DeckError, FixedDeck};
use crate::game::{Game, GameError};
use crate::state::Street;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[non_exhaustive]
pub enum HandHistoryVerb {
    SmallBlind,
    BigBlind,
    Fold,
    Check,
    Call,
    Bet,
    RaiseTo,
    Win,
    Split,
}

impl HandHistoryVerb {
    pub fn label(self) -> &'static str {
        match self {
            HandHistoryVerb::SmallBlind => "SB",
            HandHistoryVerb::BigBlind => "BB",
            HandHistoryVerb::Fold => "Fold",
            HandHistoryVerb::Check => "Check",
            HandHistoryVerb::Call => "Call",
            HandHistoryVerb::Bet => "Bet",
            HandHistoryVerb::RaiseTo => "Raise to",
            HandHistoryVerb::Win => "Win",
            HandHistoryVerb::Split => "Split",
        }
    }
}

/// One line of the hand log. `amount` is chips added for blinds and
/// calls, the street total for bets and raises, and chips won for
/// `Win`/`Split`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[non_exhaustive]
pub struct HandHistoryEntry {
    pub street: Street,
    pub seat: usize,
    pub verb: HandHistoryVerb,
    pub amount: Option<u64>,
}

impl HandHistoryEntry {
    pub(crate) fn new(street: Street, seat: usize, verb: HandHistoryVerb, amount: Option<u64>) -> Self {
        Self { street, seat, verb, amount }
    }

    /// The voluntary action this entry records; `None` for blinds and payouts.
    ///
    /// An all-in raise that only matched the bet is logged as a call, so
    /// replaying it as [`Action::Call`] commits the same chips.
    pub fn action(&self) -> Option<Action> {
        match (self.verb, self.amount) {
            (HandHistoryVerb::Fold, _) => Some(Action::Fold),
            (HandHistoryVerb::Check, _) => Some(Action::Check),
            (HandHistoryVerb::Call, _) => Some(Action::Call),
            (HandHistoryVerb::Bet, Some(a)) => Some(Action::Bet(a)),
            (HandHistoryVerb::RaiseTo, Some(a)) => Some(Action::Raise(a)),
            _ => None,
        }
    }
}

impl std::fmt::Display for HandHistoryEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] P{} {}", self.street.label(), self.seat + 1, self.verb.label())?;
        if let Some(a) = self.amount {
            write!(f, " {a}")?;
        }
        Ok(())
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ReplayError {
    #[error("invalid deck: {0}")]
    Deck(#[from] DeckError),
    #[error(transparent)]
    Game(#[from] GameError),
    #[error("entry {index}: expected seat {expected:?} on {street:?}, log has seat {got}")]
    OutOfSync { index: usize, expected: Option<usize>, street: Street, got: usize },
}

/// Rebuild a hand from its starting table, its deck and its log.
///
/// Only voluntary actions drive the replay; blinds and payouts are
/// reproduced by the engine and skipped in `entries`.
pub fn replay(
    config: TableConfig,
    deck: Vec<Card>,
    entries: &[HandHistoryEntry],
) -> Result<Game, ReplayError> {
    let provider = FixedDeck::new(deck)?;
    let mut game = Game::with_deck(config, Box::new(provider));
    game.start_hand()?;
    for (index, entry) in entries.iter().enumerate() {
        let Some(action) = entry.action() else {
            continue;
        };
        let expected = game.action_seat();
        if expected != Some(entry.seat) || game.street() != entry.street {
            return Err(ReplayError::OutOfSync {
                index,
                expected,
                street: game.street(),
                got: entry.seat,
            });
        }
        game.execute_action(entry.seat, action)?;
    }
    Ok(game)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn voluntary_entries_map_back_to_actions() {
        let e = HandHistoryEntry::new(Street::Flop, 2, HandHistoryVerb::RaiseTo, Some(60));
        assert_eq!(e.action(), Some(Action::Raise(60)));
        let e = HandHistoryEntry::new(Street::Preflop, 1, HandHistoryVerb::SmallBlind, Some(5));
        assert_eq!(e.action(), None);
        let e = HandHistoryEntry::new(Street::River, 0, HandHistoryVerb::Win, Some(300));
        assert_eq!(e.action(), None);
    }

    #[test]
    fn entries_render_one_based_seats() {
        let e = HandHistoryEntry::new(Street::Turn, 0, HandHistoryVerb::Bet, Some(40));
        assert_eq!(e.to_string(), "[Turn] P1 Bet 40");
        let e = HandHistoryEntry::new(Street::Turn, 3, HandHistoryVerb::Check, None);
        assert_eq!(e.to_string(), "[Turn] P4 Check");
    }
}
