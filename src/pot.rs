//! Main and side pots from per-player hand contributions.

use crate::state::Player;
use std::collections::BTreeSet;

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[non_exhaustive]
pub struct Pot {
    pub amount: u64,
    /// Seats that can win this pot.
    pub eligible: BTreeSet<usize>,
}

/// Split every chip invested this hand into layered pots.
///
/// Levels come from the distinct totals of the players still in the hand.
/// Each pot holds what every player (folded ones included) put in between
/// the previous level and this one, and only players who reached the level
/// may win it. An uncalled excess becomes a pot with one eligible seat;
/// chips folded above the top level join the last pot.
pub fn build_pots(players: &[Player]) -> Vec<Pot> {
    pots_from_contributions(
        &players.iter().map(|p| (p.seat(), p.total_invested(), p.in_hand())).collect::<Vec<_>>(),
    )
}

/// Same as [`build_pots`] over bare `(seat, invested, still_in_hand)` rows.
pub fn pots_from_contributions(rows: &[(usize, u64, bool)]) -> Vec<Pot> {
    let mut levels: Vec<u64> =
        rows.iter().filter(|r| r.2 && r.1 > 0).map(|r| r.1).collect();
    levels.sort_unstable();
    levels.dedup();

    let mut pots: Vec<Pot> = Vec::with_capacity(levels.len());
    let mut prev = 0u64;
    for &level in &levels {
        let amount: u64 = rows.iter().map(|r| r.1.min(level) - r.1.min(prev)).sum();
        let eligible = rows.iter().filter(|r| r.2 && r.1 >= level).map(|r| r.0).collect();
        pots.push(Pot { amount, eligible });
        prev = level;
    }
    let stranded: u64 = rows.iter().map(|r| r.1.saturating_sub(prev)).sum();
    if stranded > 0 {
        if let Some(last) = pots.last_mut() {
            last.amount += stranded;
        }
    }
    pots
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seats(s: &[usize]) -> BTreeSet<usize> {
        s.iter().copied().collect()
    }

    #[test]
    fn equal_contributions_make_one_pot() {
        let pots = pots_from_contributions(&[(0, 100, true), (1, 100, true), (2, 100, true)]);
        assert_eq!(pots, vec![Pot { amount: 300, eligible: seats(&[0, 1, 2]) }]);
    }

    #[test]
    fn three_way_all_in_layers() {
        let pots = pots_from_contributions(&[(0, 50, true), (1, 100, true), (2, 200, true)]);
        assert_eq!(pots.len(), 3);
        assert_eq!(pots[0], Pot { amount: 150, eligible: seats(&[0, 1, 2]) });
        assert_eq!(pots[1], Pot { amount: 100, eligible: seats(&[1, 2]) });
        assert_eq!(pots[2], Pot { amount: 100, eligible: seats(&[2]) });
    }

    #[test]
    fn folded_chips_count_but_cannot_win() {
        let pots = pots_from_contributions(&[(0, 30, false), (1, 100, true), (2, 100, true)]);
        assert_eq!(pots, vec![Pot { amount: 230, eligible: seats(&[1, 2]) }]);
    }

    #[test]
    fn folded_chips_above_top_level_join_last_pot() {
        let pots = pots_from_contributions(&[(0, 80, false), (1, 40, true), (2, 40, true)]);
        assert_eq!(pots, vec![Pot { amount: 160, eligible: seats(&[1, 2]) }]);
    }

    #[test]
    fn uncalled_excess_is_single_eligible() {
        let pots = pots_from_contributions(&[(0, 500, true), (1, 120, true)]);
        assert_eq!(pots[0], Pot { amount: 240, eligible: seats(&[0, 1]) });
        assert_eq!(pots[1], Pot { amount: 380, eligible: seats(&[0]) });
    }

    #[test]
    fn nothing_invested_no_pots() {
        assert!(pots_from_contributions(&[(0, 0, true), (1, 0, true)]).is_empty());
    }

    #[test]
    fn sum_matches_contributions() {
        let rows = [(0, 17, false), (1, 250, true), (2, 90, true), (3, 250, true), (4, 5, false)];
        let total: u64 = rows.iter().map(|r| r.1).sum();
        let pots = pots_from_contributions(&rows);
        assert_eq!(pots.iter().map(|p| p.amount).sum::<u64>(), total);
    }
}
