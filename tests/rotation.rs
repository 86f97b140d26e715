use holdem_trainer::betting::{Action, ActionError};
use holdem_trainer::config::TableConfig;
use holdem_trainer::game::{Game, Phase};
use holdem_trainer::positions::Position;
use holdem_trainer::state::{PlayerStatus, Street};

fn mk_game(n: usize) -> Game {
    Game::new(TableConfig::builder().players(n).blinds(5, 10).seed(17).build().unwrap())
}

fn fold_around(game: &mut Game) {
    while let Some(seat) = game.action_seat() {
        game.execute_action(seat, Action::Fold).unwrap();
    }
    assert_eq!(game.phase(), Phase::EndHand);
}

#[test]
fn button_and_blinds_move_one_seat_per_hand() {
    let mut g = mk_game(4);
    for hand in 0..6 {
        g.start_hand().unwrap();
        let d = hand % 4;
        assert_eq!(g.dealer(), d);
        assert_eq!(g.small_blind_seat(), (d + 1) % 4);
        assert_eq!(g.big_blind_seat(), (d + 2) % 4);
        assert_eq!(g.action_seat(), Some((d + 3) % 4), "UTG opens preflop");
        fold_around(&mut g);
    }
}

#[test]
fn six_max_position_labels_run_from_the_button() {
    let mut g = mk_game(6);
    g.start_hand().unwrap();
    let labels: Vec<Position> = g.players().iter().map(|p| p.position().unwrap()).collect();
    assert_eq!(
        labels,
        vec![
            Position::Button,
            Position::SmallBlind,
            Position::BigBlind,
            Position::UnderTheGun,
            Position::Middle,
            Position::Cutoff,
        ]
    );
}

#[test]
fn heads_up_button_posts_small_blind_and_opens() {
    let cfg = TableConfig::builder().stacks(vec![200, 200]).blinds(1, 2).build().unwrap();
    let mut g = Game::new(cfg);
    g.start_hand().unwrap();
    let d = g.dealer();
    let other = 1 - d;

    assert_eq!(g.players()[d].current_bet(), 1);
    assert_eq!(g.players()[other].current_bet(), 2);
    assert_eq!(g.current_bet(), 2);
    assert_eq!(g.small_blind_seat(), d);
    assert_eq!(g.big_blind_seat(), other);
    assert_eq!(g.players()[d].position(), Some(Position::Button));
    assert_eq!(g.players()[other].position(), Some(Position::BigBlind));
    assert_eq!(g.action_seat(), Some(d));

    g.execute_action(d, Action::Call).unwrap();
    // The big blind keeps the option to raise.
    assert_eq!(g.action_seat(), Some(other));
    g.execute_action(other, Action::Check).unwrap();

    assert_eq!(g.street(), Street::Flop);
    assert_eq!(g.action_seat(), Some(other), "big blind acts first after the flop");
}

#[test]
fn busted_seats_sit_out_and_are_skipped() {
    let cfg = TableConfig::builder().stacks(vec![100, 0, 100, 100]).blinds(5, 10).build().unwrap();
    let mut g = Game::new(cfg);
    g.start_hand().unwrap();

    let out = &g.players()[1];
    assert_eq!(out.status(), PlayerStatus::SittingOut);
    assert!(out.hole().is_none());
    assert!(out.position().is_none());
    assert_eq!(g.small_blind_seat(), 2);
    assert_eq!(g.big_blind_seat(), 3);
    assert_eq!(g.action_seat(), Some(0));
    assert_eq!(
        g.validate_action(1, &Action::Fold),
        Err(ActionError::NotYourTurn { expected: Some(0), got: 1 })
    );

    fold_around(&mut g);
    g.start_hand().unwrap();
    assert_eq!(g.dealer(), 2, "button skips the empty seat");
}
