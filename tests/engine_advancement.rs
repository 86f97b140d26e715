use holdem_trainer::betting::{Action, ActionError};
use holdem_trainer::config::TableConfig;
use holdem_trainer::game::{Game, GameError, Phase};
use holdem_trainer::state::Street;

fn check_or_call(game: &mut Game) {
    let seat = game.action_seat().expect("someone on turn");
    let legal = game.legal_actions(seat).unwrap();
    let action = if legal.can_check { Action::Check } else { Action::Call };
    game.execute_action(seat, action).unwrap();
}

#[test]
fn all_in_players_run_the_board_out() {
    let cfg =
        TableConfig::builder().players(3).starting_stack(20).blinds(5, 10).seed(5).build().unwrap();
    let mut game = Game::new(cfg);
    game.start_hand().unwrap();

    game.execute_action(0, Action::Raise(20)).unwrap();
    game.execute_action(1, Action::Call).unwrap();
    game.execute_action(2, Action::Call).unwrap();

    assert_eq!(game.phase(), Phase::EndHand);
    assert_eq!(game.board().len(), 5);
    assert_eq!(game.pot(), 0);
    assert_eq!(game.chips_in_play(), 60);
}

#[test]
fn check_down_walks_every_street() {
    let mut game = Game::new(TableConfig::builder().players(3).seed(9).build().unwrap());
    game.start_hand().unwrap();
    let mut seen = vec![game.street()];
    while game.action_seat().is_some() {
        check_or_call(&mut game);
        if seen.last() != Some(&game.street()) {
            seen.push(game.street());
        }
    }
    assert_eq!(seen, vec![Street::Preflop, Street::Flop, Street::Turn, Street::River]);
    assert_eq!(game.phase(), Phase::EndHand);
    assert_eq!(game.board().len(), 5);
}

#[test]
fn folding_to_one_player_ends_the_hand_without_a_board() {
    let cfg = TableConfig::builder().players(6).blinds(5, 10).seed(1).build().unwrap();
    let mut game = Game::new(cfg);
    game.start_hand().unwrap();
    let bb = game.big_blind_seat();
    for _ in 0..5 {
        let seat = game.action_seat().unwrap();
        assert_ne!(seat, bb);
        game.execute_action(seat, Action::Fold).unwrap();
    }
    assert_eq!(game.phase(), Phase::EndHand);
    assert!(game.board().is_empty());
    assert_eq!(game.players()[bb].stack(), 1005);
    assert_eq!(game.last_awards().len(), 1);
    assert_eq!(game.last_awards()[0].amount, 15);
}

#[test]
fn nothing_is_accepted_once_the_hand_is_over() {
    let mut game = Game::new(TableConfig::builder().players(2).seed(3).build().unwrap());
    game.start_hand().unwrap();
    let seat = game.action_seat().unwrap();
    game.execute_action(seat, Action::Fold).unwrap();

    assert!(game.is_round_complete());
    assert_eq!(game.action_seat(), None);
    for s in 0..2 {
        assert_eq!(
            game.execute_action(s, Action::Check),
            Err(GameError::Action(ActionError::NoHandInProgress))
        );
    }
    assert!(game.legal_actions(0).is_none());
}

#[test]
fn start_hand_refuses_while_one_is_running() {
    let mut game = Game::new(TableConfig::builder().players(3).seed(4).build().unwrap());
    game.start_hand().unwrap();
    assert_eq!(game.start_hand(), Err(GameError::HandInProgress));
    assert_eq!(game.hand_number(), 1);
}

#[test]
fn a_short_big_blind_all_in_leaves_no_decisions() {
    // The big blind is all in posting; the small blind completes and the
    // board runs out with nobody left to bet against.
    let cfg = TableConfig::builder().stacks(vec![1000, 6]).blinds(5, 10).build().unwrap();
    let mut game = Game::new(cfg);
    game.start_hand().unwrap();
    assert!(game.players()[1].is_all_in());
    assert_eq!(game.current_bet(), 6);
    assert_eq!(game.action_seat(), Some(0));
    assert_eq!(game.legal_actions(0).unwrap().call_amount, Some(1));
    game.execute_action(0, Action::Call).unwrap();
    assert_eq!(game.phase(), Phase::EndHand);
    assert_eq!(game.chips_in_play(), 1006);
}
