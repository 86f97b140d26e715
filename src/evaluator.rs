//! Hand strength for showdown.
//!
//! The engine only needs a total order over hands, so it talks to a
//! [`HandStrengthOracle`]. Convention throughout the crate: a HIGHER
//! [`HandValue`] is the BETTER hand; equal values split.

use crate::cards::{Card, Rank};
use crate::hand::{validate_holdem, Board, HandError, HoleCards};
use core::cmp::Ordering;

/// Packed, comparable hand strength. Higher is better.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HandValue(u64);

impl HandValue {
    pub const fn raw(self) -> u64 {
        self.0
    }

    /// Pack a category above five tiebreak ranks, most significant first.
    fn from_parts(category: Category, tiebreak: &[Rank]) -> Self {
        const CAT_SHIFT: u32 = 30;
        const RANK_STRIDE: u32 = 6;
        let mut v = (category as u64) << CAT_SHIFT;
        for (i, r) in tiebreak.iter().take(5).enumerate() {
            v |= u64::from(r.value()) << (CAT_SHIFT - RANK_STRIDE * (i as u32 + 1));
        }
        HandValue(v)
    }
}

/// Hand category from weakest to strongest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[non_exhaustive]
#[repr(u8)]
pub enum Category {
    HighCard = 0,
    Pair = 1,
    TwoPair = 2,
    ThreeOfAKind = 3,
    Straight = 4,
    Flush = 5,
    FullHouse = 6,
    FourOfAKind = 7,
    StraightFlush = 8,
}

impl Category {
    pub fn label(self) -> &'static str {
        match self {
            Category::HighCard => "High card",
            Category::Pair => "Pair",
            Category::TwoPair => "Two pair",
            Category::ThreeOfAKind => "Three of a kind",
            Category::Straight => "Straight",
            Category::Flush => "Flush",
            Category::FullHouse => "Full house",
            Category::FourOfAKind => "Four of a kind",
            Category::StraightFlush => "Straight flush",
        }
    }
}

/// Category plus the value that orders it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub struct Evaluation {
    pub category: Category,
    pub value: HandValue,
}

impl Ord for Evaluation {
    fn cmp(&self, other: &Self) -> Ordering {
        self.value.cmp(&other.value)
    }
}

impl PartialOrd for Evaluation {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum EvalError {
    #[error("invalid hand: {0}")]
    InvalidHand(#[from] HandError),
    #[error("expected 2 to 7 cards, got {0}")]
    CardCount(usize),
}

/// Black-box strength lookup used by the showdown resolver.
pub trait HandStrengthOracle {
    /// Strength of `hole` on `board` (0..=5 cards). Higher is better.
    fn evaluate(&self, hole: &HoleCards, board: &Board) -> Result<HandValue, EvalError>;
}

/// Exhaustive best-five evaluator.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardEvaluator;

impl HandStrengthOracle for StandardEvaluator {
    fn evaluate(&self, hole: &HoleCards, board: &Board) -> Result<HandValue, EvalError> {
        evaluate_holdem(hole, board).map(|e| e.value)
    }
}

/// Evaluate hole cards against a board of any size up to five.
///
/// ```
/// use holdem_trainer::evaluator::{evaluate_holdem, Category};
/// use holdem_trainer::hand::{Board, HoleCards};
///
/// let hole: HoleCards = "As Ah".parse().unwrap();
/// let board: Board = "Qc Jd 9h 3s 2c".parse().unwrap();
/// assert_eq!(evaluate_holdem(&hole, &board).unwrap().category, Category::Pair);
/// ```
pub fn evaluate_holdem(hole: &HoleCards, board: &Board) -> Result<Evaluation, EvalError> {
    validate_holdem(hole, board)?;
    let mut cards = hole.as_array().to_vec();
    cards.extend_from_slice(board.as_slice());
    evaluate_cards(&cards)
}

/// Best hand among 2..=7 cards. With fewer than five cards only rank
/// groupings count; straights and flushes need five.
pub fn evaluate_cards(cards: &[Card]) -> Result<Evaluation, EvalError> {
    match cards.len() {
        2..=4 => Ok(classify(cards, false)),
        5 => Ok(classify(cards, true)),
        6 | 7 => {
            let n = cards.len();
            let best = (0u32..(1 << n))
                .filter(|mask| mask.count_ones() == 5)
                .map(|mask| {
                    let five: Vec<Card> =
                        (0..n).filter(|i| mask & (1 << i) != 0).map(|i| cards[i]).collect();
                    classify(&five, true)
                })
                .max();
            best.ok_or(EvalError::CardCount(n))
        }
        n => Err(EvalError::CardCount(n)),
    }
}

fn classify(cards: &[Card], five: bool) -> Evaluation {
    let mut counts = [0u8; 15];
    for c in cards {
        counts[usize::from(c.rank().value())] += 1;
    }
    // (count, rank) with the largest group first, ties by higher rank
    let mut groups: Vec<(u8, Rank)> = Rank::ALL
        .iter()
        .rev()
        .filter(|r| counts[usize::from(r.value())] > 0)
        .map(|&r| (counts[usize::from(r.value())], r))
        .collect();
    groups.sort_by(|a, b| b.0.cmp(&a.0).then(b.1.cmp(&a.1)));
    let shape: Vec<u8> = groups.iter().map(|g| g.0).collect();
    let by_group: Vec<Rank> = groups.iter().map(|g| g.1).collect();

    let flush = five && cards.iter().all(|c| c.suit() == cards[0].suit());
    let straight = if five { straight_high(&counts) } else { None };

    let (category, tiebreak) = match (straight, flush, shape.as_slice()) {
        (Some(top), true, _) => (Category::StraightFlush, vec![top]),
        (_, _, [4, ..]) => (Category::FourOfAKind, by_group),
        (_, _, [3, 2, ..]) => (Category::FullHouse, by_group),
        (_, true, _) => (Category::Flush, by_group),
        (Some(top), false, _) => (Category::Straight, vec![top]),
        (_, _, [3, ..]) => (Category::ThreeOfAKind, by_group),
        (_, _, [2, 2, ..]) => (Category::TwoPair, by_group),
        (_, _, [2, ..]) => (Category::Pair, by_group),
        _ => (Category::HighCard, by_group),
    };
    Evaluation { category, value: HandValue::from_parts(category, &tiebreak) }
}

/// Top rank of a five-distinct-rank straight, with the wheel topping at Five.
fn straight_high(counts: &[u8; 15]) -> Option<Rank> {
    let present = |v: u8| counts[usize::from(v)] == 1;
    if (2..=14).filter(|&v| present(v)).count() != 5 {
        return None;
    }
    if [14, 2, 3, 4, 5].iter().all(|&v| present(v)) {
        return Some(Rank::Five);
    }
    (6..=14u8).find(|&top| (top - 4..=top).all(present)).and_then(Rank::from_value)
}

/// Compare two hands on a shared board.
pub fn compare_holdem(a: &HoleCards, b: &HoleCards, board: &Board) -> Result<Ordering, EvalError> {
    Ok(evaluate_holdem(a, board)?.cmp(&evaluate_holdem(b, board)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::parse_cards;

    fn eval(s: &str) -> Evaluation {
        evaluate_cards(&parse_cards(s).unwrap()).unwrap()
    }

    #[test]
    fn categories_on_five_cards() {
        assert_eq!(eval("As Ks Qs Js Ts").category, Category::StraightFlush);
        assert_eq!(eval("Kc Kd Kh Ks 2s").category, Category::FourOfAKind);
        assert_eq!(eval("Tc Td Th 2s 2h").category, Category::FullHouse);
        assert_eq!(eval("Ah 9h 7h 3h 2h").category, Category::Flush);
        assert_eq!(eval("Ac 2d 3h 4s 5c").category, Category::Straight);
        assert_eq!(eval("Qc Qd Qh 9s 2c").category, Category::ThreeOfAKind);
        assert_eq!(eval("Jc Jd 9c 9h 2s").category, Category::TwoPair);
        assert_eq!(eval("Ah Ad Ts 9c 2d").category, Category::Pair);
        assert_eq!(eval("Ah Kd 7s 5c 2d").category, Category::HighCard);
    }

    #[test]
    fn wheel_loses_to_six_high_straight() {
        assert!(eval("Ac 2d 3h 4s 5c") < eval("2c 3d 4h 5s 6c"));
    }

    #[test]
    fn kickers_break_ties() {
        assert!(eval("Ah Ad Ks 9c 2d") > eval("Ac As Qs Jc Td"));
        assert_eq!(eval("Ah Ad Ks 9c 2d"), eval("Ac As Kd 9h 2s"));
    }

    #[test]
    fn seven_cards_pick_the_best_five() {
        let e = eval("As Kd Ah Kh Qh Jh Th");
        assert_eq!(e.category, Category::StraightFlush);
    }

    #[test]
    fn short_boards_rank_by_groups_only() {
        assert_eq!(eval("As Ah").category, Category::Pair);
        assert_eq!(eval("As Kh Kd").category, Category::Pair);
        assert!(eval("As Ah") > eval("Ks Kh 2d"));
        assert!(eval("2s 3h 4d 5c").category == Category::HighCard);
    }

    #[test]
    fn card_count_is_checked() {
        let one = parse_cards("As").unwrap();
        assert_eq!(evaluate_cards(&one), Err(EvalError::CardCount(1)));
    }

    #[test]
    fn board_straight_is_shared() {
        let board: Board = "Ah Kh Qh Jh Th".parse().unwrap();
        let a: HoleCards = "As Kd".parse().unwrap();
        let b: HoleCards = "Ac Kc".parse().unwrap();
        assert_eq!(compare_holdem(&a, &b, &board).unwrap(), Ordering::Equal);
    }
}
