//! No-limit betting rules for a single street.
//!
//! Bet and raise amounts are "raise to" totals for the street, never
//! increments. Validation never mutates; [`GameState::apply_action`] assumes
//! the action already passed [`GameState::validate_action`].

use crate::history::HandHistoryVerb;
use crate::state::{GameState, PlayerStatus};
use tracing::trace;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Action {
    Fold,
    Check,
    Call,
    /// Open the betting to this total.
    Bet(u64),
    /// Raise the street total to this amount.
    Raise(u64),
}

impl Action {
    pub fn label(&self) -> String {
        match self {
            Action::Fold => "Fold".into(),
            Action::Check => "Check".into(),
            Action::Call => "Call".into(),
            Action::Bet(a) => format!("Bet {a}"),
            Action::Raise(a) => format!("Raise to {a}"),
        }
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ActionError {
    #[error("no betting round is in progress")]
    NoHandInProgress,
    #[error("seat {0} is not at the table")]
    UnknownSeat(usize),
    #[error("not your turn: waiting on seat {expected:?}, got seat {got}")]
    NotYourTurn { expected: Option<usize>, got: usize },
    #[error("player has folded")]
    PlayerFolded,
    #[error("player is all-in")]
    PlayerAllIn,
    #[error("cannot check facing a bet of {to_call}")]
    CannotCheck { to_call: u64 },
    #[error("nothing to call")]
    NothingToCall,
    #[error("betting is not allowed when facing a bet")]
    BetNotAllowed,
    #[error("raising is not allowed without a bet")]
    RaiseNotAllowed,
    /// Raise by a seat that already acted this street. Only a full raise
    /// clears `has_acted`; short all-ins never do, even when several of
    /// them add up to a full raise.
    #[error("action was not reopened by a full raise; call or fold")]
    ActionNotReopened,
    #[error("amount too small: min {min}, got {got}")]
    AmountTooSmall { min: u64, got: u64 },
    #[error("amount too large: max {max}, got {got}")]
    AmountTooLarge { max: u64, got: u64 },
}

/// What the seat on turn may do right now. Amounts are street totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[non_exhaustive]
pub struct LegalActions {
    pub seat: usize,
    pub can_check: bool,
    /// Chips a call would add; `None` when there is nothing to call.
    pub call_amount: Option<u64>,
    /// Smallest opening bet, if betting is open.
    pub min_bet: Option<u64>,
    /// Smallest raise-to total, if raising is allowed.
    pub min_raise_to: Option<u64>,
    /// The seat's all-in street total.
    pub max_total: u64,
}

impl LegalActions {
    /// Shove: a bet or raise to the whole stack, or a call when that is all
    /// the seat may do.
    pub fn all_in(&self) -> Action {
        if self.min_bet.is_some() {
            Action::Bet(self.max_total)
        } else if self.min_raise_to.is_some() {
            Action::Raise(self.max_total)
        } else {
            Action::Call
        }
    }
}

/// Outcome of an applied action, in history terms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Executed {
    pub(crate) verb: HandHistoryVerb,
    pub(crate) amount: Option<u64>,
    pub(crate) all_in: bool,
}

impl GameState {
    /// Chips `seat` needs to add to match the current bet.
    pub fn to_call(&self, seat: usize) -> u64 {
        self.players.get(seat).map_or(0, |p| self.current_bet.saturating_sub(p.current_bet))
    }

    /// Check `action` for `seat` without changing anything.
    pub fn validate_action(&self, seat: usize, action: &Action) -> Result<(), ActionError> {
        let p = self.players.get(seat).ok_or(ActionError::UnknownSeat(seat))?;
        let Some(on_turn) = self.action_player else {
            return Err(ActionError::NoHandInProgress);
        };
        if seat != on_turn {
            return Err(ActionError::NotYourTurn { expected: Some(on_turn), got: seat });
        }
        match p.status {
            PlayerStatus::Folded | PlayerStatus::SittingOut => return Err(ActionError::PlayerFolded),
            PlayerStatus::AllIn => return Err(ActionError::PlayerAllIn),
            _ => {}
        }
        let max_total = p.current_bet + p.stack;
        match *action {
            Action::Fold => Ok(()),
            Action::Check => match self.to_call(seat) {
                0 => Ok(()),
                to_call => Err(ActionError::CannotCheck { to_call }),
            },
            Action::Call => {
                if p.current_bet < self.current_bet {
                    Ok(())
                } else {
                    Err(ActionError::NothingToCall)
                }
            }
            Action::Bet(amount) => {
                if self.current_bet > 0 {
                    return Err(ActionError::BetNotAllowed);
                }
                if amount > p.stack {
                    return Err(ActionError::AmountTooLarge { max: p.stack, got: amount });
                }
                let min = self.big_blind.min(p.stack).max(1);
                if amount < min {
                    return Err(ActionError::AmountTooSmall { min, got: amount });
                }
                Ok(())
            }
            Action::Raise(to) => {
                if self.current_bet == 0 {
                    return Err(ActionError::RaiseNotAllowed);
                }
                if p.has_acted {
                    return Err(ActionError::ActionNotReopened);
                }
                if to > max_total {
                    return Err(ActionError::AmountTooLarge { max: max_total, got: to });
                }
                let min = self.current_bet + self.min_raise;
                if to == max_total && to > p.current_bet {
                    return Ok(());
                }
                if to < min {
                    return Err(ActionError::AmountTooSmall { min: min.min(max_total), got: to });
                }
                Ok(())
            }
        }
    }

    pub fn is_valid_action(&self, seat: usize, action: &Action) -> bool {
        self.validate_action(seat, action).is_ok()
    }

    /// Menu of legal moves for the seat on turn; `None` for anyone else.
    pub fn legal_actions(&self, seat: usize) -> Option<LegalActions> {
        if self.action_player != Some(seat) {
            return None;
        }
        let p = self.players.get(seat)?;
        if !p.can_act() {
            return None;
        }
        let to_call = self.to_call(seat);
        let max_total = p.current_bet + p.stack;
        let min_bet = (self.current_bet == 0).then(|| self.big_blind.min(p.stack).max(1));
        let min_raise_to = (self.current_bet > 0 && !p.has_acted && max_total > self.current_bet)
            .then(|| (self.current_bet + self.min_raise).min(max_total));
        Some(LegalActions {
            seat,
            can_check: to_call == 0,
            call_amount: (to_call > 0).then(|| to_call.min(p.stack)),
            min_bet,
            min_raise_to,
            max_total,
        })
    }

    /// Apply an action that already passed validation.
    pub(crate) fn apply_action(&mut self, seat: usize, action: Action) -> Executed {
        let current_bet = self.current_bet;
        let p = &mut self.players[seat];
        p.has_acted = true;
        match action {
            Action::Fold => {
                p.status = PlayerStatus::Folded;
                Executed { verb: HandHistoryVerb::Fold, amount: None, all_in: false }
            }
            Action::Check => Executed { verb: HandHistoryVerb::Check, amount: None, all_in: false },
            Action::Call => {
                let paid = p.commit(current_bet - p.current_bet);
                Executed { verb: HandHistoryVerb::Call, amount: Some(paid), all_in: p.is_all_in() }
            }
            Action::Bet(amount) => {
                p.commit(amount);
                let all_in = p.is_all_in();
                self.current_bet = amount;
                self.min_raise = amount.max(self.big_blind);
                self.reopen_for_others(seat);
                Executed { verb: HandHistoryVerb::Bet, amount: Some(amount), all_in }
            }
            Action::Raise(to) => {
                let paid = p.commit(to - p.current_bet);
                let all_in = p.is_all_in();
                if to <= current_bet {
                    // all-in for no more than a call
                    Executed { verb: HandHistoryVerb::Call, amount: Some(paid), all_in }
                } else {
                    let increment = to - current_bet;
                    if increment >= self.min_raise {
                        self.min_raise = increment;
                        self.reopen_for_others(seat);
                    } else {
                        trace!(seat, to, increment, "short all-in raise, action not reopened");
                    }
                    self.current_bet = to;
                    Executed { verb: HandHistoryVerb::RaiseTo, amount: Some(to), all_in }
                }
            }
        }
    }

    fn reopen_for_others(&mut self, seat: usize) {
        for other in self.players.iter_mut().filter(|o| o.seat != seat) {
            other.has_acted = false;
        }
    }

    /// Whether `seat` still owes a decision this street.
    pub(crate) fn needs_to_act(&self, seat: usize) -> bool {
        let p = &self.players[seat];
        p.can_act() && (!p.has_acted || p.current_bet < self.current_bet)
    }

    /// True once no more decisions are owed on this street.
    pub fn is_round_complete(&self) -> bool {
        if self.in_hand_count() <= 1 {
            return true;
        }
        let active: Vec<_> = self.players.iter().filter(|p| p.can_act()).collect();
        match active.as_slice() {
            [] => true,
            [only] => only.current_bet >= self.current_bet,
            many => many.iter().all(|p| p.has_acted && p.current_bet == self.current_bet),
        }
    }

    /// First seat owing a decision, scanning clockwise from `start` inclusive.
    pub(crate) fn next_to_act_from(&self, start: usize) -> Option<usize> {
        let n = self.players.len();
        (0..n).map(|k| (start + k) % n).find(|&s| self.needs_to_act(s))
    }

    /// Post a forced bet; a short stack posts what it has.
    pub(crate) fn post_blind(&mut self, seat: usize, amount: u64) -> u64 {
        self.players[seat].commit(amount)
    }

    /// Close the street: sweep bets into the pot and reset per-street state.
    pub(crate) fn collect_bets(&mut self) {
        for p in &mut self.players {
            self.pot += p.current_bet;
            p.current_bet = 0;
            p.has_acted = false;
        }
        self.current_bet = 0;
        self.min_raise = self.big_blind;
        self.action_player = None;
    }
}
