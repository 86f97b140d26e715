//! Seat roles around the button.
//!
//! Everything here works on a "ring": the seats dealt into the hand,
//! clockwise from the dealer, so sitting-out seats never take a role.

use crate::config::{ConfigError, MIN_PLAYERS};
use crate::state::Player;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Position {
    Button,
    SmallBlind,
    BigBlind,
    UnderTheGun,
    UnderTheGun1,
    UnderTheGun2,
    Middle,
    Hijack,
    Cutoff,
}

impl Position {
    pub fn label(self) -> &'static str {
        match self {
            Position::Button => "BTN",
            Position::SmallBlind => "SB",
            Position::BigBlind => "BB",
            Position::UnderTheGun => "UTG",
            Position::UnderTheGun1 => "UTG+1",
            Position::UnderTheGun2 => "UTG+2",
            Position::Middle => "MP",
            Position::Hijack => "HJ",
            Position::Cutoff => "CO",
        }
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Labels for a ring of `n` seats, starting with the dealer.
///
/// Heads-up the dealer is just the button; it also posts the small blind.
pub fn position_labels(n: usize) -> Result<&'static [Position], ConfigError> {
    use Position::*;
    let labels: &'static [Position] = match n {
        0 | 1 => return Err(ConfigError::TooFewPlayers(n)),
        2 => &[Button, BigBlind],
        3 => &[Button, SmallBlind, BigBlind],
        4 => &[Button, SmallBlind, BigBlind, UnderTheGun],
        5 => &[Button, SmallBlind, BigBlind, UnderTheGun, Cutoff],
        6 => &[Button, SmallBlind, BigBlind, UnderTheGun, Middle, Cutoff],
        7 => &[Button, SmallBlind, BigBlind, UnderTheGun, Middle, Hijack, Cutoff],
        8 => &[Button, SmallBlind, BigBlind, UnderTheGun, UnderTheGun1, Middle, Hijack, Cutoff],
        9 => &[
            Button,
            SmallBlind,
            BigBlind,
            UnderTheGun,
            UnderTheGun1,
            UnderTheGun2,
            Middle,
            Hijack,
            Cutoff,
        ],
        _ => return Err(ConfigError::TooManyPlayers(n)),
    };
    Ok(labels)
}

/// Small and big blind indices for a ring of `num_players` seats.
///
/// ```
/// use holdem_trainer::positions::compute_blind_seats;
///
/// assert_eq!(compute_blind_seats(0, 2).unwrap(), (0, 1));
/// assert_eq!(compute_blind_seats(4, 6).unwrap(), (5, 0));
/// ```
pub fn compute_blind_seats(dealer: usize, num_players: usize) -> Result<(usize, usize), ConfigError> {
    if num_players < MIN_PLAYERS {
        return Err(ConfigError::TooFewPlayers(num_players));
    }
    if num_players == 2 {
        return Ok((dealer % 2, (dealer + 1) % 2));
    }
    Ok(((dealer + 1) % num_players, (dealer + 2) % num_players))
}

/// Seats dealt into the hand, clockwise, the dealer first.
pub fn ring_from_dealer(players: &[Player], dealer: usize) -> Vec<usize> {
    let n = players.len();
    (0..n).map(|k| (dealer + k) % n).filter(|&s| players[s].in_hand()).collect()
}

/// Seat numbers the blinds landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlindSeats {
    pub small_blind: usize,
    pub big_blind: usize,
}

/// Label every seat in the hand and return where the blinds sit.
/// Seats not in the hand lose any previous label.
pub fn assign_positions(players: &mut [Player], dealer: usize) -> Result<BlindSeats, ConfigError> {
    let ring = ring_from_dealer(players, dealer);
    let labels = position_labels(ring.len())?;
    for p in players.iter_mut() {
        p.position = None;
    }
    for (&seat, &label) in ring.iter().zip(labels) {
        players[seat].position = Some(label);
    }
    let (sb, bb) = compute_blind_seats(0, ring.len())?;
    Ok(BlindSeats { small_blind: ring[sb], big_blind: ring[bb] })
}

/// Next seat clockwise from `dealer` that still has chips. Stays put when
/// nobody else does.
pub fn advance_dealer_position(players: &[Player], dealer: usize) -> usize {
    let n = players.len();
    (1..=n).map(|k| (dealer + k) % n).find(|&s| players[s].stack > 0).unwrap_or(dealer)
}

/// Turn-order rules, swappable for variants that act in a different order.
pub trait RulesProvider {
    /// Ring index of the first preflop actor, given the dealer's ring index.
    fn first_to_act_preflop(&self, dealer: usize, num_players: usize) -> usize;

    /// First seat after the dealer that can still act on a later street.
    fn first_to_act_postflop(&self, dealer: usize, players: &[Player]) -> Option<usize>;
}

/// Standard Hold'em order: UTG opens preflop (the button heads-up), the
/// first live seat left of the button opens every later street.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardRules;

impl RulesProvider for StandardRules {
    fn first_to_act_preflop(&self, dealer: usize, num_players: usize) -> usize {
        if num_players <= 2 {
            dealer
        } else {
            (dealer + 3) % num_players
        }
    }

    fn first_to_act_postflop(&self, dealer: usize, players: &[Player]) -> Option<usize> {
        let n = players.len();
        (1..=n).map(|k| (dealer + k) % n).find(|&s| players[s].can_act())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(stacks: &[u64]) -> Vec<Player> {
        let mut players: Vec<Player> = stacks
            .iter()
            .enumerate()
            .map(|(i, &s)| Player::new(i, format!("P{}", i + 1), s))
            .collect();
        for p in &mut players {
            p.reset_for_hand();
        }
        players
    }

    #[test]
    fn labels_cover_every_table_size() {
        for n in 2..=9 {
            let labels = position_labels(n).unwrap();
            assert_eq!(labels.len(), n);
            assert_eq!(labels[0], Position::Button);
            if n >= 5 {
                assert_eq!(labels[n - 1], Position::Cutoff);
            }
        }
        assert!(position_labels(1).is_err());
        assert!(position_labels(10).is_err());
    }

    #[test]
    fn six_handed_labels() {
        let labels: Vec<&str> = position_labels(6).unwrap().iter().map(|p| p.label()).collect();
        assert_eq!(labels, ["BTN", "SB", "BB", "UTG", "MP", "CO"]);
    }

    #[test]
    fn heads_up_button_posts_small_blind() {
        assert_eq!(compute_blind_seats(1, 2).unwrap(), (1, 0));
        let mut players = table(&[100, 100]);
        let blinds = assign_positions(&mut players, 1).unwrap();
        assert_eq!(blinds, BlindSeats { small_blind: 1, big_blind: 0 });
        assert_eq!(players[1].position, Some(Position::Button));
        assert_eq!(players[0].position, Some(Position::BigBlind));
    }

    #[test]
    fn blinds_wrap_around_the_table() {
        assert_eq!(compute_blind_seats(5, 6).unwrap(), (0, 1));
        assert_eq!(compute_blind_seats(0, 1), Err(ConfigError::TooFewPlayers(1)));
    }

    #[test]
    fn sitting_out_seats_are_skipped() {
        let mut players = table(&[100, 0, 100, 100]);
        let blinds = assign_positions(&mut players, 0).unwrap();
        assert_eq!(blinds, BlindSeats { small_blind: 2, big_blind: 3 });
        assert_eq!(players[1].position, None);
    }

    #[test]
    fn dealer_skips_busted_seats() {
        let players = table(&[100, 0, 0, 100]);
        assert_eq!(advance_dealer_position(&players, 0), 3);
        assert_eq!(advance_dealer_position(&players, 3), 0);
    }

    #[test]
    fn standard_first_actors() {
        let rules = StandardRules;
        assert_eq!(rules.first_to_act_preflop(0, 2), 0);
        assert_eq!(rules.first_to_act_preflop(0, 3), 0);
        assert_eq!(rules.first_to_act_preflop(0, 6), 3);
        let mut players = table(&[100, 100, 100]);
        players[1].status = crate::state::PlayerStatus::Folded;
        assert_eq!(rules.first_to_act_postflop(0, &players), Some(2));
    }
}
