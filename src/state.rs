use crate::deck::Deck;
use crate::hand::{Board, HoleCards};
use crate::positions::Position;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Street {
    Preflop,
    Flop,
    Turn,
    River,
}

impl Street {
    pub fn label(self) -> &'static str {
        match self {
            Street::Preflop => "Preflop",
            Street::Flop => "Flop",
            Street::Turn => "Turn",
            Street::River => "River",
        }
    }

    /// Board size once this street has been dealt.
    pub fn board_len(self) -> usize {
        match self {
            Street::Preflop => 0,
            Street::Flop => 3,
            Street::Turn => 4,
            Street::River => 5,
        }
    }

    pub fn next(self) -> Option<Street> {
        match self {
            Street::Preflop => Some(Street::Flop),
            Street::Flop => Some(Street::Turn),
            Street::Turn => Some(Street::River),
            Street::River => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[non_exhaustive]
pub enum PlayerStatus {
    Active,
    Folded,
    AllIn,
    /// No chips at hand start; not dealt in.
    SittingOut,
}

#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct Player {
    pub(crate) seat: usize,
    pub(crate) name: String,
    pub(crate) stack: u64,
    pub(crate) current_bet: u64,
    pub(crate) total_invested: u64,
    pub(crate) position: Option<Position>,
    pub(crate) status: PlayerStatus,
    pub(crate) has_acted: bool,
    pub(crate) hole: Option<HoleCards>,
}

impl Player {
    pub(crate) fn new(seat: usize, name: String, stack: u64) -> Self {
        Self {
            seat,
            name,
            stack,
            current_bet: 0,
            total_invested: 0,
            position: None,
            status: PlayerStatus::Active,
            has_acted: false,
            hole: None,
        }
    }

    pub fn seat(&self) -> usize {
        self.seat
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Chips behind, not yet wagered.
    pub fn stack(&self) -> u64 {
        self.stack
    }

    /// Chips committed on the current street.
    pub fn current_bet(&self) -> u64 {
        self.current_bet
    }

    /// Chips committed across the whole hand.
    pub fn total_invested(&self) -> u64 {
        self.total_invested
    }

    pub fn position(&self) -> Option<Position> {
        self.position
    }

    pub fn status(&self) -> PlayerStatus {
        self.status
    }

    pub fn hole(&self) -> Option<HoleCards> {
        self.hole
    }

    pub fn has_folded(&self) -> bool {
        self.status == PlayerStatus::Folded
    }

    pub fn is_all_in(&self) -> bool {
        self.status == PlayerStatus::AllIn
    }

    pub fn has_acted_this_round(&self) -> bool {
        self.has_acted
    }

    /// Still contesting the pot (active or all-in).
    pub fn in_hand(&self) -> bool {
        matches!(self.status, PlayerStatus::Active | PlayerStatus::AllIn)
    }

    /// Can still put chips in.
    pub fn can_act(&self) -> bool {
        self.status == PlayerStatus::Active
    }

    /// Move up to `chips` from stack to the current bet; returns what moved.
    pub(crate) fn commit(&mut self, chips: u64) -> u64 {
        let paid = chips.min(self.stack);
        self.stack -= paid;
        self.current_bet += paid;
        self.total_invested += paid;
        if self.stack == 0 && self.status == PlayerStatus::Active {
            self.status = PlayerStatus::AllIn;
        }
        paid
    }

    pub(crate) fn reset_for_hand(&mut self) {
        self.current_bet = 0;
        self.total_invested = 0;
        self.position = None;
        self.has_acted = false;
        self.hole = None;
        self.status =
            if self.stack == 0 { PlayerStatus::SittingOut } else { PlayerStatus::Active };
    }
}

/// Mutable state of the hand in progress. Owned by [`crate::game::Game`].
#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct GameState {
    pub(crate) players: Vec<Player>,
    pub(crate) board: Board,
    /// Chips swept in from completed streets.
    pub(crate) pot: u64,
    pub(crate) current_bet: u64,
    pub(crate) min_raise: u64,
    pub(crate) big_blind: u64,
    pub(crate) street: Street,
    pub(crate) deck: Deck,
    pub(crate) dealer: usize,
    pub(crate) small_blind_seat: usize,
    pub(crate) big_blind_seat: usize,
    pub(crate) action_player: Option<usize>,
}

impl GameState {
    pub(crate) fn new(players: Vec<Player>, big_blind: u64, dealer: usize) -> Self {
        Self {
            players,
            board: Board::default(),
            pot: 0,
            current_bet: 0,
            min_raise: big_blind,
            big_blind,
            street: Street::Preflop,
            deck: Deck::default(),
            dealer,
            small_blind_seat: dealer,
            big_blind_seat: dealer,
            action_player: None,
        }
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn pot(&self) -> u64 {
        self.pot
    }

    pub fn current_bet(&self) -> u64 {
        self.current_bet
    }

    pub fn min_raise(&self) -> u64 {
        self.min_raise
    }

    pub fn street(&self) -> Street {
        self.street
    }

    pub fn dealer(&self) -> usize {
        self.dealer
    }

    pub fn small_blind_seat(&self) -> usize {
        self.small_blind_seat
    }

    pub fn big_blind_seat(&self) -> usize {
        self.big_blind_seat
    }

    pub fn action_player(&self) -> Option<usize> {
        self.action_player
    }

    pub fn undealt(&self) -> usize {
        self.deck.len()
    }

    /// Committed pot plus every outstanding bet.
    pub fn total_pot(&self) -> u64 {
        self.pot + self.players.iter().map(|p| p.current_bet).sum::<u64>()
    }

    /// Every chip at the table: pot, outstanding bets and stacks.
    pub fn chips_in_play(&self) -> u64 {
        self.total_pot() + self.players.iter().map(|p| p.stack).sum::<u64>()
    }

    pub(crate) fn in_hand_count(&self) -> usize {
        self.players.iter().filter(|p| p.in_hand()).count()
    }

    /// Seats clockwise starting after `from`, wrapping once, excluding `from`.
    pub(crate) fn seats_after(&self, from: usize) -> impl Iterator<Item = usize> {
        let n = self.players.len();
        (1..=n).map(move |k| (from + k) % n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commit_caps_at_stack_and_flags_all_in() {
        let mut p = Player::new(0, "P1".into(), 30);
        assert_eq!(p.commit(10), 10);
        assert_eq!((p.stack, p.current_bet, p.total_invested), (20, 10, 10));
        assert!(!p.is_all_in());
        assert_eq!(p.commit(50), 20);
        assert_eq!(p.stack, 0);
        assert!(p.is_all_in());
    }

    #[test]
    fn busted_players_sit_out_on_reset() {
        let mut p = Player::new(0, "P1".into(), 0);
        p.reset_for_hand();
        assert_eq!(p.status, PlayerStatus::SittingOut);
        assert!(!p.in_hand());
    }

    #[test]
    fn seats_after_wraps_back_to_start() {
        let players = (0..4).map(|i| Player::new(i, format!("P{i}"), 10)).collect();
        let state = GameState::new(players, 2, 0);
        assert_eq!(state.seats_after(2).collect::<Vec<_>>(), vec![3, 0, 1, 2]);
    }

    #[test]
    fn streets_advance_to_river() {
        assert_eq!(Street::Preflop.next(), Some(Street::Flop));
        assert_eq!(Street::River.next(), None);
        assert_eq!(Street::Turn.board_len(), 4);
    }
}
