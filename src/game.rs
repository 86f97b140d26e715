//! Hand orchestration: dealing, blinds, street transitions and payout.

use crate::betting::{Action, ActionError, LegalActions};
use crate::cards::Card;
use crate::config::{ConfigError, TableConfig, MIN_PLAYERS};
use crate::deck::{Deck, DeckError, DeckProvider, ShuffledDeck};
use crate::evaluator::{HandStrengthOracle, StandardEvaluator};
use crate::events::{GameEvent, GameListener};
use crate::hand::{Board, HandError, HoleCards};
use crate::history::{HandHistoryEntry, HandHistoryVerb};
use crate::positions::{
    advance_dealer_position, assign_positions, ring_from_dealer, Position, RulesProvider,
    StandardRules,
};
use crate::pot::{build_pots, Pot};
use crate::showdown::{resolve, winnings, Award, ShowdownError};
use crate::state::{GameState, Player, PlayerStatus, Street};
use std::fmt;
use tracing::{debug, trace};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Phase {
    StartHand,
    PreflopBetting,
    DealFlop,
    FlopBetting,
    DealTurn,
    TurnBetting,
    DealRiver,
    RiverBetting,
    Showdown,
    EndHand,
}

impl Phase {
    pub fn is_betting(self) -> bool {
        matches!(
            self,
            Phase::PreflopBetting | Phase::FlopBetting | Phase::TurnBetting | Phase::RiverBetting
        )
    }

    fn betting(street: Street) -> Phase {
        match street {
            Street::Preflop => Phase::PreflopBetting,
            Street::Flop => Phase::FlopBetting,
            Street::Turn => Phase::TurnBetting,
            Street::River => Phase::RiverBetting,
        }
    }

    fn dealing(street: Street) -> Phase {
        match street {
            Street::Preflop => Phase::StartHand,
            Street::Flop => Phase::DealFlop,
            Street::Turn => Phase::DealTurn,
            Street::River => Phase::DealRiver,
        }
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum GameError {
    #[error(transparent)]
    Action(#[from] ActionError),
    #[error("invalid table: {0}")]
    Config(#[from] ConfigError),
    #[error("deck error: {0}")]
    Deck(#[from] DeckError),
    #[error("showdown failed: {0}")]
    Showdown(#[from] ShowdownError),
    #[error("bad deal: {0}")]
    Deal(#[from] HandError),
    #[error("a hand is already in progress")]
    HandInProgress,
}

/// One seat as seen from outside the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[non_exhaustive]
pub struct SeatSnapshot {
    pub seat: usize,
    pub name: String,
    pub stack: u64,
    pub current_bet: u64,
    pub total_invested: u64,
    pub position: Option<Position>,
    pub status: PlayerStatus,
    pub hole: Option<HoleCards>,
}

/// Read-only copy of the table for UIs and agents.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[non_exhaustive]
pub struct GameSnapshot {
    pub hand_number: u64,
    pub phase: Phase,
    pub street: Street,
    pub dealer: usize,
    pub small_blind_seat: usize,
    pub big_blind_seat: usize,
    pub action_seat: Option<usize>,
    pub board: Vec<Card>,
    /// Committed pot plus outstanding bets.
    pub pot: u64,
    pub current_bet: u64,
    pub min_raise: u64,
    pub seats: Vec<SeatSnapshot>,
    pub pots: Vec<Pot>,
}

impl GameSnapshot {
    /// Hide every hole card `viewer` should not see. Cards of seats still
    /// in the hand are shown once it has ended.
    pub fn redacted(mut self, viewer: usize) -> Self {
        let reveal = self.phase == Phase::EndHand;
        for s in &mut self.seats {
            let in_hand = matches!(s.status, PlayerStatus::Active | PlayerStatus::AllIn);
            if s.seat != viewer && !(reveal && in_hand) {
                s.hole = None;
            }
        }
        self
    }
}

/// Runs hands at one table.
///
/// ```
/// use holdem_trainer::betting::Action;
/// use holdem_trainer::config::TableConfig;
/// use holdem_trainer::game::{Game, Phase};
///
/// let mut game = Game::new(TableConfig::builder().players(3).seed(1).build().unwrap());
/// game.start_hand().unwrap();
/// while let Some(seat) = game.action_seat() {
///     game.execute_action(seat, Action::Fold).unwrap();
/// }
/// assert_eq!(game.phase(), Phase::EndHand);
/// assert_eq!(game.chips_in_play(), 3000);
/// ```
pub struct Game {
    config: TableConfig,
    state: GameState,
    phase: Phase,
    hand_number: u64,
    chips_at_start: u64,
    history: Vec<HandHistoryEntry>,
    last_awards: Vec<Award>,
    deck_provider: Box<dyn DeckProvider>,
    oracle: Box<dyn HandStrengthOracle>,
    rules: Box<dyn RulesProvider>,
    listeners: Vec<Box<dyn GameListener>>,
    // Events wait here until the call that raised them succeeds.
    outbox: Vec<GameEvent>,
}

/// What a failed `start_hand` or `execute_action` puts back.
struct Checkpoint {
    state: GameState,
    phase: Phase,
    hand_number: u64,
    chips_at_start: u64,
    history: Vec<HandHistoryEntry>,
    last_awards: Vec<Award>,
}

impl fmt::Debug for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Game")
            .field("phase", &self.phase)
            .field("hand_number", &self.hand_number)
            .field("state", &self.state)
            .field("listeners", &self.listeners.len())
            .finish_non_exhaustive()
    }
}

impl Game {
    /// Shuffled decks (seeded when the config carries a seed) and the
    /// standard evaluator.
    pub fn new(config: TableConfig) -> Self {
        let deck: Box<dyn DeckProvider> = match config.seed() {
            Some(seed) => Box::new(ShuffledDeck::seeded(seed)),
            None => Box::new(ShuffledDeck::from_entropy()),
        };
        Self::with_deck(config, deck)
    }

    pub fn with_deck(config: TableConfig, deck_provider: Box<dyn DeckProvider>) -> Self {
        let players = config
            .names()
            .iter()
            .zip(config.stacks())
            .enumerate()
            .map(|(seat, (name, &stack))| Player::new(seat, name.clone(), stack))
            .collect();
        let state = GameState::new(players, config.big_blind(), config.dealer());
        Self {
            config,
            state,
            phase: Phase::StartHand,
            hand_number: 0,
            chips_at_start: 0,
            history: Vec::new(),
            last_awards: Vec::new(),
            deck_provider,
            oracle: Box::new(StandardEvaluator),
            rules: Box::new(StandardRules),
            listeners: Vec::new(),
            outbox: Vec::new(),
        }
    }

    pub fn with_oracle(mut self, oracle: Box<dyn HandStrengthOracle>) -> Self {
        self.oracle = oracle;
        self
    }

    pub fn with_rules(mut self, rules: Box<dyn RulesProvider>) -> Self {
        self.rules = rules;
        self
    }

    pub fn add_listener(&mut self, listener: Box<dyn GameListener>) {
        self.listeners.push(listener);
    }

    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Hands started so far; the current hand's number while one runs.
    pub fn hand_number(&self) -> u64 {
        self.hand_number
    }

    pub fn players(&self) -> &[Player] {
        &self.state.players
    }

    pub fn player(&self, seat: usize) -> Option<&Player> {
        self.state.players.get(seat)
    }

    pub fn board(&self) -> &Board {
        &self.state.board
    }

    /// Chips swept in from finished streets.
    pub fn pot(&self) -> u64 {
        self.state.pot
    }

    pub fn total_pot(&self) -> u64 {
        self.state.total_pot()
    }

    pub fn current_bet(&self) -> u64 {
        self.state.current_bet
    }

    pub fn min_raise(&self) -> u64 {
        self.state.min_raise
    }

    pub fn street(&self) -> Street {
        self.state.street
    }

    pub fn dealer(&self) -> usize {
        self.state.dealer
    }

    pub fn small_blind_seat(&self) -> usize {
        self.state.small_blind_seat
    }

    pub fn big_blind_seat(&self) -> usize {
        self.state.big_blind_seat
    }

    pub fn action_seat(&self) -> Option<usize> {
        self.state.action_player
    }

    pub fn get_action_player(&self) -> Option<&Player> {
        self.state.action_player.and_then(|s| self.state.players.get(s))
    }

    pub fn to_call(&self, seat: usize) -> u64 {
        self.state.to_call(seat)
    }

    pub fn validate_action(&self, seat: usize, action: &Action) -> Result<(), ActionError> {
        if !self.phase.is_betting() {
            return Err(ActionError::NoHandInProgress);
        }
        self.state.validate_action(seat, action)
    }

    pub fn is_valid_action(&self, seat: usize, action: &Action) -> bool {
        self.validate_action(seat, action).is_ok()
    }

    pub fn is_round_complete(&self) -> bool {
        self.state.is_round_complete()
    }

    pub fn legal_actions(&self, seat: usize) -> Option<LegalActions> {
        if !self.phase.is_betting() {
            return None;
        }
        self.state.legal_actions(seat)
    }

    /// Log of the current (or last finished) hand.
    pub fn history(&self) -> &[HandHistoryEntry] {
        &self.history
    }

    pub fn history_recent(&self, n: usize) -> &[HandHistoryEntry] {
        let start = self.history.len().saturating_sub(n);
        &self.history[start..]
    }

    /// Payouts of the last finished hand.
    pub fn last_awards(&self) -> &[Award] {
        &self.last_awards
    }

    /// Live main/side pot breakdown of the hand in progress.
    pub fn pots(&self) -> Vec<Pot> {
        build_pots(&self.state.players)
    }

    pub fn chips_in_play(&self) -> u64 {
        self.state.chips_in_play()
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let st = &self.state;
        GameSnapshot {
            hand_number: self.hand_number,
            phase: self.phase,
            street: st.street,
            dealer: st.dealer,
            small_blind_seat: st.small_blind_seat,
            big_blind_seat: st.big_blind_seat,
            action_seat: st.action_player,
            board: st.board.as_slice().to_vec(),
            pot: st.total_pot(),
            current_bet: st.current_bet,
            min_raise: st.min_raise,
            seats: st
                .players
                .iter()
                .map(|p| SeatSnapshot {
                    seat: p.seat,
                    name: p.name.clone(),
                    stack: p.stack,
                    current_bet: p.current_bet,
                    total_invested: p.total_invested,
                    position: p.position,
                    status: p.status,
                    hole: p.hole,
                })
                .collect(),
            pots: self.pots(),
        }
    }

    /// Deal a new hand: rotate the button, deal hole cards, post blinds and
    /// put the first seat on turn. Nothing changes if this fails.
    pub fn start_hand(&mut self) -> Result<(), GameError> {
        if self.phase.is_betting() {
            return Err(GameError::HandInProgress);
        }
        self.atomically(Self::deal_hand)
    }

    fn deal_hand(&mut self) -> Result<(), GameError> {
        let players = &self.state.players;
        if players.iter().filter(|p| p.stack > 0).count() < MIN_PLAYERS {
            return Err(ConfigError::NotEnoughFundedPlayers.into());
        }
        let dealer = match self.hand_number {
            0 if players[self.config.dealer()].stack > 0 => self.config.dealer(),
            0 => advance_dealer_position(players, self.config.dealer()),
            _ => advance_dealer_position(players, self.state.dealer),
        };
        let mut deck = Deck::from_cards(self.deck_provider.get_deck())?;

        self.hand_number += 1;
        self.history.clear();
        self.last_awards.clear();
        let st = &mut self.state;
        for p in &mut st.players {
            p.reset_for_hand();
        }
        st.board.clear();
        st.pot = 0;
        st.street = Street::Preflop;
        st.current_bet = 0;
        st.min_raise = self.config.big_blind();
        st.dealer = dealer;
        st.action_player = None;
        let blinds = assign_positions(&mut st.players, dealer)?;
        st.small_blind_seat = blinds.small_blind;
        st.big_blind_seat = blinds.big_blind;

        for seat in 0..st.players.len() {
            if st.players[seat].in_hand() {
                let cards = deck.draw_n(2)?;
                st.players[seat].hole = Some(HoleCards::from_slice(&cards)?);
            }
        }
        st.deck = deck;
        self.chips_at_start = st.chips_in_play();
        debug!(hand = self.hand_number, dealer, ?blinds, "starting hand");
        self.emit(GameEvent::HandStarted {
            hand_number: self.hand_number,
            dealer,
            small_blind_seat: blinds.small_blind,
            big_blind_seat: blinds.big_blind,
        });

        let sb_paid = self.state.post_blind(blinds.small_blind, self.config.small_blind());
        self.log_action(blinds.small_blind, HandHistoryVerb::SmallBlind, Some(sb_paid));
        let bb_paid = self.state.post_blind(blinds.big_blind, self.config.big_blind());
        self.log_action(blinds.big_blind, HandHistoryVerb::BigBlind, Some(bb_paid));
        self.state.current_bet = sb_paid.max(bb_paid);
        self.phase = Phase::PreflopBetting;

        let ring = ring_from_dealer(&self.state.players, dealer);
        let first = ring[self.rules.first_to_act_preflop(0, ring.len()) % ring.len()];
        self.state.action_player = self.state.next_to_act_from(first);
        if self.state.action_player.is_none() || self.state.is_round_complete() {
            self.state.action_player = None;
            self.advance()?;
        }
        self.check_conservation();
        Ok(())
    }

    /// Validate and apply `action` for `seat`, then move the hand along.
    /// A rejected action leaves the game untouched.
    pub fn execute_action(&mut self, seat: usize, action: Action) -> Result<(), GameError> {
        if let Err(e) = self.validate_action(seat, &action) {
            debug!(seat, ?action, error = %e, "action rejected");
            return Err(e.into());
        }
        self.atomically(|game| game.apply_and_advance(seat, action))
    }

    fn apply_and_advance(&mut self, seat: usize, action: Action) -> Result<(), GameError> {
        let done = self.state.apply_action(seat, action);
        trace!(seat, ?action, ?done, "action applied");
        self.log_action_with(seat, done.verb, done.amount, done.all_in);

        let n = self.state.players.len();
        self.state.action_player = if self.state.is_round_complete() {
            None
        } else {
            self.state.next_to_act_from((seat + 1) % n)
        };
        if self.state.action_player.is_none() {
            self.advance()?;
        }
        self.check_conservation();
        Ok(())
    }

    /// Close the street and deal on until someone owes a decision or the
    /// hand is over.
    fn advance(&mut self) -> Result<(), GameError> {
        loop {
            if self.state.in_hand_count() <= 1 {
                return self.finish_hand(false);
            }
            self.state.collect_bets();
            let Some(next) = self.state.street.next() else {
                return self.finish_hand(true);
            };
            self.phase = Phase::dealing(next);
            let count = next.board_len() - self.state.board.len();
            for card in self.state.deck.draw_n(count)? {
                self.state.board.push(card);
            }
            self.state.street = next;
            let event = GameEvent::StreetChanged {
                street: next,
                board: self.state.board.as_slice().to_vec(),
                pot: self.state.pot,
            };
            self.emit(event);

            self.phase = Phase::betting(next);
            let first = self.rules.first_to_act_postflop(self.state.dealer, &self.state.players);
            self.state.action_player = first.and_then(|s| self.state.next_to_act_from(s));
            if self.state.action_player.is_some() && !self.state.is_round_complete() {
                return Ok(());
            }
            self.state.action_player = None;
            trace!(street = next.label(), "no decisions owed, running out the board");
        }
    }

    fn finish_hand(&mut self, showdown: bool) -> Result<(), GameError> {
        // Pots come from total investment, so they can be settled before
        // the last bets are swept.
        let pots = build_pots(&self.state.players);
        let awards = resolve(
            &pots,
            &self.state.players,
            &self.state.board,
            self.state.dealer,
            self.oracle.as_ref(),
        )?;
        self.state.collect_bets();
        if showdown {
            self.phase = Phase::Showdown;
        }
        for a in &awards {
            self.state.players[a.seat].stack += a.amount;
            self.state.pot = self.state.pot.saturating_sub(a.amount);
        }
        debug_assert_eq!(self.state.pot, 0, "pot fully awarded");
        self.state.pot = 0;
        let street = self.state.street;
        for (seat, amount) in winnings(&awards) {
            let split = awards.iter().any(|a| a.seat == seat && a.split);
            let verb = if split { HandHistoryVerb::Split } else { HandHistoryVerb::Win };
            self.history.push(HandHistoryEntry::new(street, seat, verb, Some(amount)));
        }
        self.phase = Phase::EndHand;
        debug!(hand = self.hand_number, showdown, pots = pots.len(), "hand finished");
        self.last_awards = awards.clone();
        self.emit(GameEvent::HandComplete {
            hand_number: self.hand_number,
            awards,
            board: self.state.board.as_slice().to_vec(),
            showdown,
        });
        Ok(())
    }

    fn log_action(&mut self, seat: usize, verb: HandHistoryVerb, amount: Option<u64>) {
        let all_in = self.state.players[seat].is_all_in();
        self.log_action_with(seat, verb, amount, all_in);
    }

    fn log_action_with(
        &mut self,
        seat: usize,
        verb: HandHistoryVerb,
        amount: Option<u64>,
        all_in: bool,
    ) {
        let street = self.state.street;
        self.history.push(HandHistoryEntry::new(street, seat, verb, amount));
        let pot = self.state.total_pot();
        self.emit(GameEvent::ActionExecuted { street, seat, verb, amount, all_in, pot });
    }

    fn emit(&mut self, event: GameEvent) {
        self.outbox.push(event);
    }

    /// Run `f`; on error restore the table as it was and drop its events.
    fn atomically<F>(&mut self, f: F) -> Result<(), GameError>
    where
        F: FnOnce(&mut Self) -> Result<(), GameError>,
    {
        let saved = Checkpoint {
            state: self.state.clone(),
            phase: self.phase,
            hand_number: self.hand_number,
            chips_at_start: self.chips_at_start,
            history: self.history.clone(),
            last_awards: self.last_awards.clone(),
        };
        if let Err(e) = f(self) {
            debug!(error = %e, hand = saved.hand_number, "rolling back");
            self.state = saved.state;
            self.phase = saved.phase;
            self.hand_number = saved.hand_number;
            self.chips_at_start = saved.chips_at_start;
            self.history = saved.history;
            self.last_awards = saved.last_awards;
            self.outbox.clear();
            return Err(e);
        }
        for event in std::mem::take(&mut self.outbox) {
            for listener in &mut self.listeners {
                listener.on_event(&event);
            }
        }
        Ok(())
    }

    fn check_conservation(&self) {
        debug_assert_eq!(
            self.state.chips_in_play(),
            self.chips_at_start,
            "chips created or destroyed during hand {}",
            self.hand_number
        );
    }
}
