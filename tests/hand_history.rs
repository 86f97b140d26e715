use holdem_trainer::agents::{AgentTable, RandomAgent};
use holdem_trainer::betting::Action;
use holdem_trainer::config::TableConfig;
use holdem_trainer::cards::Card;
use holdem_trainer::deck::{DeckProvider, FixedDeck, ShuffledDeck};
use holdem_trainer::game::Game;
use holdem_trainer::history::{replay, HandHistoryVerb, ReplayError};
use holdem_trainer::state::Street;

fn heads_up() -> Game {
    Game::new(TableConfig::builder().players(2).blinds(5, 10).seed(21).build().unwrap())
}

#[test]
fn history_records_blinds_and_actions() {
    let mut game = heads_up();
    game.start_hand().unwrap();

    let history = game.history();
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].verb, HandHistoryVerb::SmallBlind);
    assert_eq!(history[0].amount, Some(5));
    assert_eq!(history[0].street, Street::Preflop);
    assert_eq!(history[1].verb, HandHistoryVerb::BigBlind);
    assert_eq!(history[1].amount, Some(10));

    game.execute_action(0, Action::Call).unwrap();
    let recent = game.history_recent(1);
    assert_eq!(recent.len(), 1);
    assert_eq!(recent[0].verb, HandHistoryVerb::Call);
    assert_eq!(recent[0].amount, Some(5));
    assert_eq!(recent[0].to_string(), "[Preflop] P1 Call 5");

    game.execute_action(1, Action::Raise(40)).unwrap();
    let last = &game.history_recent(1)[0];
    assert_eq!((last.verb, last.amount), (HandHistoryVerb::RaiseTo, Some(40)));
    assert_eq!(last.action(), Some(Action::Raise(40)));
}

#[test]
fn payouts_close_the_log() {
    let mut game = heads_up();
    game.start_hand().unwrap();
    game.execute_action(0, Action::Fold).unwrap();
    let last = game.history().last().unwrap();
    assert_eq!(last.verb, HandHistoryVerb::Win);
    assert_eq!(last.seat, 1);
    assert_eq!(last.amount, Some(15));
}

fn play_random_hand(seed: u64) -> (TableConfig, Vec<Card>, Game) {
    let cfg = TableConfig::builder().players(4).blinds(1, 2).starting_stack(200).build().unwrap();
    let deck = ShuffledDeck::seeded(seed).get_deck();
    let provider = FixedDeck::new(deck.clone()).unwrap();
    let mut game = Game::with_deck(cfg.clone(), Box::new(provider));
    game.start_hand().unwrap();
    let mut table = AgentTable::for_seats(4);
    for seat in 0..4 {
        table.set_agent(seat, Some(Box::new(RandomAgent::seeded(seed + seat as u64))));
    }
    table.run_until_blocked(&mut game).unwrap();
    (cfg, deck, game)
}

#[test]
fn replay_rebuilds_the_same_hand() {
    for seed in 0..10 {
        let (cfg, deck, game) = play_random_hand(seed);
        let replayed = replay(cfg, deck, game.history()).unwrap();
        assert_eq!(replayed.history(), game.history());
        assert_eq!(replayed.snapshot(), game.snapshot());
    }
}

#[test]
fn replay_rejects_an_out_of_turn_log() {
    let (cfg, deck, game) = play_random_hand(3);
    let mut entries = game.history().to_vec();
    let first_voluntary = entries.iter().position(|e| e.action().is_some()).unwrap();
    entries[first_voluntary].seat = (entries[first_voluntary].seat + 1) % 4;
    let err = replay(cfg, deck, &entries).unwrap_err();
    assert!(matches!(err, ReplayError::OutOfSync { index, .. } if index == first_voluntary));
}
