use holdem_trainer::betting::Action;
use holdem_trainer::config::TableConfig;
use holdem_trainer::events::{GameEvent, GameListener, TracingListener};
use holdem_trainer::game::Game;
use holdem_trainer::history::HandHistoryVerb;
use holdem_trainer::state::Street;
use std::cell::Cell;
use std::rc::Rc;
use std::sync::mpsc;

/// Counts what it hears into shared cells the test keeps a handle on.
#[derive(Default, Clone)]
struct Counter {
    actions: Rc<Cell<usize>>,
    streets: Rc<Cell<usize>>,
    completed: Rc<Cell<bool>>,
}

impl GameListener for Counter {
    fn on_event(&mut self, event: &GameEvent) {
        match event {
            GameEvent::StreetChanged { .. } => self.streets.set(self.streets.get() + 1),
            GameEvent::ActionExecuted { .. } => self.actions.set(self.actions.get() + 1),
            GameEvent::HandComplete { .. } => self.completed.set(true),
            _ => {}
        }
    }
}

#[test_log::test]
fn events_follow_the_hand_in_order() {
    let mut game = Game::new(TableConfig::builder().players(3).seed(8).build().unwrap());
    let (tx, rx) = mpsc::channel();
    game.add_listener(Box::new(tx));
    game.add_listener(Box::new(TracingListener));
    game.start_hand().unwrap();
    while let Some(seat) = game.action_seat() {
        let legal = game.legal_actions(seat).unwrap();
        let action = if legal.can_check { Action::Check } else { Action::Call };
        game.execute_action(seat, action).unwrap();
    }

    let events: Vec<GameEvent> = rx.try_iter().collect();
    assert!(matches!(
        events[0],
        GameEvent::HandStarted { hand_number: 1, dealer: 0, small_blind_seat: 1, big_blind_seat: 2 }
    ));
    assert!(matches!(
        events[1],
        GameEvent::ActionExecuted { seat: 1, verb: HandHistoryVerb::SmallBlind, amount: Some(5), pot: 5, .. }
    ));
    assert!(matches!(
        events[2],
        GameEvent::ActionExecuted { seat: 2, verb: HandHistoryVerb::BigBlind, amount: Some(10), pot: 15, .. }
    ));
    let streets: Vec<Street> = events
        .iter()
        .filter_map(|e| match e {
            GameEvent::StreetChanged { street, .. } => Some(*street),
            _ => None,
        })
        .collect();
    assert_eq!(streets, vec![Street::Flop, Street::Turn, Street::River]);
    match events.last() {
        Some(GameEvent::HandComplete { awards, showdown, board, .. }) => {
            assert!(*showdown);
            assert_eq!(board.len(), 5);
            assert_eq!(awards.iter().map(|a| a.amount).sum::<u64>(), 30);
        }
        other => panic!("expected HandComplete last, got {other:?}"),
    }
}

#[test]
fn custom_listeners_see_a_fold_out() {
    let mut game = Game::new(TableConfig::builder().players(4).seed(8).build().unwrap());
    let counter = Counter::default();
    game.add_listener(Box::new(counter.clone()));
    game.start_hand().unwrap();
    while let Some(seat) = game.action_seat() {
        game.execute_action(seat, Action::Fold).unwrap();
    }
    assert_eq!(counter.streets.get(), 0);
    // Blinds plus three folds.
    assert_eq!(counter.actions.get(), 5);
    assert!(counter.completed.get());
}
