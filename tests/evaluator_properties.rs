use holdem_trainer::cards::Card;
use holdem_trainer::deck::standard_cards;
use holdem_trainer::evaluator::{evaluate_cards, evaluate_holdem, Category};
use holdem_trainer::hand::{Board, HoleCards};
use proptest::prelude::*;

/// Seven distinct cards.
fn seven_cards() -> impl Strategy<Value = Vec<Card>> {
    Just(standard_cards()).prop_shuffle().prop_map(|mut deck| {
        deck.truncate(7);
        deck
    })
}

proptest! {
    #[test]
    fn seven_card_best_is_at_least_as_good_as_any_five(cards in seven_cards()) {
        let best7 = evaluate_cards(&cards).unwrap();
        for skip_a in 0..7 {
            for skip_b in (skip_a + 1)..7 {
                let five: Vec<Card> = cards
                    .iter()
                    .enumerate()
                    .filter(|(i, _)| *i != skip_a && *i != skip_b)
                    .map(|(_, c)| *c)
                    .collect();
                prop_assert!(best7 >= evaluate_cards(&five).unwrap());
            }
        }
    }

    #[test]
    fn card_order_does_not_matter(cards in seven_cards()) {
        let mut reversed = cards.clone();
        reversed.reverse();
        prop_assert_eq!(evaluate_cards(&cards).unwrap(), evaluate_cards(&reversed).unwrap());
    }

    #[test]
    fn more_board_never_makes_a_hand_worse(cards in seven_cards()) {
        let hole = HoleCards::from_slice(&cards[..2]).unwrap();
        let mut previous = None;
        for len in [0usize, 3, 4, 5] {
            let board = Board::try_new(cards[2..2 + len].to_vec()).unwrap();
            let value = evaluate_holdem(&hole, &board).unwrap().value;
            if let Some(prev) = previous {
                prop_assert!(value >= prev);
            }
            previous = Some(value);
        }
    }
}

#[test]
fn royal_flush_on_board_ties_everyone() {
    let board: Board = "Ah Kh Qh Jh Th".parse().unwrap();
    let a: HoleCards = "As Kd".parse().unwrap();
    let b: HoleCards = "Ac Kc".parse().unwrap();
    let ea = evaluate_holdem(&a, &board).unwrap();
    let eb = evaluate_holdem(&b, &board).unwrap();
    assert_eq!(ea.category, Category::StraightFlush);
    assert_eq!(ea.value, eb.value);
}
