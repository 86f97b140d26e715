//! Card supply for a hand.
//!
//! A [`DeckProvider`] hands the orchestrator a full 52-card ordering at the
//! start of every hand; [`Deck`] then deals from the top of that ordering.
//! Use [`ShuffledDeck`] for play and [`FixedDeck`] to replay a recorded hand.

use crate::cards::{Card, Rank, Suit};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::collections::HashSet;

pub const DECK_SIZE: usize = 52;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum DeckError {
    #[error("deck exhausted")]
    Exhausted,
    #[error("deck must hold 52 cards, got {0}")]
    WrongSize(usize),
    #[error("duplicate card in deck: {0}")]
    DuplicateCard(Card),
}

/// All 52 cards, clubs first, Two..Ace within each suit.
pub fn standard_cards() -> Vec<Card> {
    Suit::ALL.iter().flat_map(|&s| Rank::ALL.iter().map(move |&r| Card::new(r, s))).collect()
}

/// The undealt remainder of one hand's deck.
#[derive(Debug, Clone, Default)]
pub struct Deck {
    // Stored reversed so `pop` deals the top card.
    cards: Vec<Card>,
}

impl Deck {
    /// Build a deck whose first element is the first card dealt.
    ///
    /// ```
    /// use holdem_trainer::deck::{standard_cards, Deck};
    ///
    /// let mut deck = Deck::from_cards(standard_cards()).unwrap();
    /// assert_eq!(deck.draw().unwrap().to_string(), "2c");
    /// assert_eq!(deck.len(), 51);
    /// ```
    pub fn from_cards(cards: Vec<Card>) -> Result<Self, DeckError> {
        if cards.len() != DECK_SIZE {
            return Err(DeckError::WrongSize(cards.len()));
        }
        let mut seen = HashSet::with_capacity(DECK_SIZE);
        for &c in &cards {
            if !seen.insert(c) {
                return Err(DeckError::DuplicateCard(c));
            }
        }
        let mut cards = cards;
        cards.reverse();
        Ok(Self { cards })
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn draw(&mut self) -> Result<Card, DeckError> {
        self.cards.pop().ok_or(DeckError::Exhausted)
    }

    /// Draw `n` cards; on exhaustion nothing is removed.
    pub fn draw_n(&mut self, n: usize) -> Result<Vec<Card>, DeckError> {
        if n > self.cards.len() {
            return Err(DeckError::Exhausted);
        }
        let split = self.cards.len() - n;
        let mut drawn = self.cards.split_off(split);
        drawn.reverse();
        Ok(drawn)
    }

    /// Remaining cards in dealing order.
    pub fn remaining(&self) -> Vec<Card> {
        self.cards.iter().rev().copied().collect()
    }
}

/// Supplies a complete card ordering for each new hand.
pub trait DeckProvider {
    fn get_deck(&mut self) -> Vec<Card>;
}

/// Random orderings from a ChaCha8 stream; reproducible when seeded.
#[derive(Debug, Clone)]
pub struct ShuffledDeck {
    rng: ChaCha8Rng,
}

impl ShuffledDeck {
    pub fn seeded(seed: u64) -> Self {
        Self { rng: ChaCha8Rng::seed_from_u64(seed) }
    }

    pub fn from_entropy() -> Self {
        let seed: u64 = rand::rng().random();
        Self::seeded(seed)
    }
}

impl DeckProvider for ShuffledDeck {
    fn get_deck(&mut self) -> Vec<Card> {
        let mut cards = standard_cards();
        cards.shuffle(&mut self.rng);
        cards
    }
}

/// The same ordering every hand.
#[derive(Debug, Clone)]
pub struct FixedDeck {
    cards: Vec<Card>,
}

impl FixedDeck {
    /// A full ordering; it must be 52 unique cards.
    pub fn new(cards: Vec<Card>) -> Result<Self, DeckError> {
        Deck::from_cards(cards.clone())?;
        Ok(Self { cards })
    }

    /// `top` is dealt first, followed by every other card in standard order.
    ///
    /// ```
    /// use holdem_trainer::cards::parse_cards;
    /// use holdem_trainer::deck::{DeckProvider, FixedDeck};
    ///
    /// let mut provider = FixedDeck::stacked(&parse_cards("As Ks").unwrap()).unwrap();
    /// let cards = provider.get_deck();
    /// assert_eq!(cards[0].to_string(), "As");
    /// assert_eq!(cards.len(), 52);
    /// ```
    pub fn stacked(top: &[Card]) -> Result<Self, DeckError> {
        let mut cards = top.to_vec();
        cards.extend(standard_cards().into_iter().filter(|c| !top.contains(c)));
        Self::new(cards)
    }
}

impl DeckProvider for FixedDeck {
    fn get_deck(&mut self) -> Vec<Card> {
        self.cards.clone()
    }
}
