use crate::evaluator::{EvalError, HandStrengthOracle, HandValue};
use crate::hand::Board;
use crate::pot::Pot;
use crate::state::Player;
use std::collections::{BTreeMap, HashMap};
use tracing::debug;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ShowdownError {
    #[error("hand evaluation failed for seat {seat}: {source}")]
    Evaluation { seat: usize, source: EvalError },
    #[error("seat {0} contests a pot without hole cards")]
    MissingHoleCards(usize),
    #[error("pot {0} has no eligible seat")]
    EmptyPot(usize),
}

/// Chips one seat takes from one pot.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[non_exhaustive]
pub struct Award {
    pub seat: usize,
    pub pot_index: usize,
    pub amount: u64,
    /// Shared with another seat.
    pub split: bool,
    /// Strength shown, when the pot was contested.
    pub hand: Option<HandValue>,
}

/// Award each pot to its best eligible hand.
///
/// A pot with one eligible seat goes to it without evaluation. Tied
/// winners split evenly; the leftover chips all go to the tied winner
/// closest to the dealer's left.
pub fn resolve(
    pots: &[Pot],
    players: &[Player],
    board: &Board,
    dealer: usize,
    oracle: &dyn HandStrengthOracle,
) -> Result<Vec<Award>, ShowdownError> {
    let n = players.len().max(1);
    let mut values: HashMap<usize, HandValue> = HashMap::new();
    let mut awards = Vec::new();

    for (pot_index, pot) in pots.iter().enumerate() {
        if pot.amount == 0 {
            continue;
        }
        if pot.eligible.len() == 1 {
            if let Some(&seat) = pot.eligible.iter().next() {
                awards.push(Award { seat, pot_index, amount: pot.amount, split: false, hand: None });
            }
            continue;
        }

        let mut best: Option<HandValue> = None;
        let mut winners: Vec<usize> = Vec::new();
        for &seat in &pot.eligible {
            let value = match values.get(&seat) {
                Some(v) => *v,
                None => {
                    let hole = players
                        .get(seat)
                        .and_then(|p| p.hole())
                        .ok_or(ShowdownError::MissingHoleCards(seat))?;
                    let v = oracle
                        .evaluate(&hole, board)
                        .map_err(|source| ShowdownError::Evaluation { seat, source })?;
                    values.insert(seat, v);
                    v
                }
            };
            match best {
                Some(b) if value < b => {}
                Some(b) if value == b => winners.push(seat),
                _ => {
                    best = Some(value);
                    winners.clear();
                    winners.push(seat);
                }
            }
        }
        if winners.is_empty() {
            return Err(ShowdownError::EmptyPot(pot_index));
        }

        winners.sort_by_key(|&s| (s + n - (dealer + 1) % n) % n);
        let count = winners.len() as u64;
        let share = pot.amount / count;
        let remainder = pot.amount % count;
        debug!(pot_index, amount = pot.amount, ?winners, remainder, "pot resolved");
        for (i, &seat) in winners.iter().enumerate() {
            let amount = if i == 0 { share + remainder } else { share };
            awards.push(Award { seat, pot_index, amount, split: count > 1, hand: best });
        }
    }
    Ok(awards)
}

/// Total won per seat.
pub fn winnings(awards: &[Award]) -> BTreeMap<usize, u64> {
    let mut totals = BTreeMap::new();
    for a in awards {
        *totals.entry(a.seat).or_insert(0) += a.amount;
    }
    totals
}
