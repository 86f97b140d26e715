use holdem_trainer::tui::app::{AppState, InputAction, Opponents, Scene};

fn setup_table_app() -> AppState {
    let mut app = AppState::default();
    app.cfg_bot_delay_ms = 0;
    app.apply_menu();
    app
}

/// Let the bots act until the human seat is up (or the hand is over).
fn bots_until_human(app: &mut AppState) {
    for _ in 0..50 {
        if app.human_on_turn() || !app.game.phase().is_betting() {
            return;
        }
        app.agents_on_turn();
    }
}

#[test]
fn menu_navigation_and_apply() {
    let mut app = AppState::default();
    assert!(matches!(app.scene, Scene::Menu));
    let start = app.menu_index;
    let _ = app.handle_input(InputAction::MenuNext);
    assert_ne!(app.menu_index, start);
    let _ = app.handle_input(InputAction::MenuPrev);
    assert_eq!(app.menu_index, start);

    // Players row: down to heads-up and back up one.
    for _ in 0..10 {
        let _ = app.handle_input(InputAction::MenuDec);
    }
    let _ = app.handle_input(InputAction::MenuInc);
    let _ = app.handle_input(InputAction::MenuApply);
    assert!(matches!(app.scene, Scene::Table));
    assert_eq!(app.game.players().len(), 3);
}

#[test]
fn opponents_row_cycles() {
    let mut app = AppState::default();
    for _ in 0..4 {
        let _ = app.handle_input(InputAction::MenuNext);
    }
    assert_eq!(app.cfg_opponents, Opponents::Calling);
    let _ = app.handle_input(InputAction::MenuInc);
    assert_eq!(app.cfg_opponents, Opponents::CheckFold);
    let _ = app.handle_input(InputAction::MenuDec);
    let _ = app.handle_input(InputAction::MenuDec);
    assert_eq!(app.cfg_opponents, Opponents::Random);
}

#[test]
fn help_and_history_toggle() {
    let mut app = setup_table_app();
    let _ = app.handle_input(InputAction::ToggleHelp);
    assert!(app.help_open());
    let _ = app.handle_input(InputAction::ToggleHistory);
    assert!(!app.help_open());
    assert!(app.history_open());
    let _ = app.handle_input(InputAction::ToggleHistory);
    assert!(!app.history_open());
}

#[test]
fn amount_entry_edit_and_cancel() {
    let mut app = setup_table_app();
    let _ = app.handle_input(InputAction::NewHand);
    bots_until_human(&mut app);
    assert!(app.human_on_turn(), "calling bots always leave the human a decision preflop");

    let legal = app.game.legal_actions(app.human_seat).unwrap();
    let expected = legal.min_bet.or(legal.min_raise_to).unwrap().to_string();

    assert!(app.handle_input(InputAction::AmountOpen));
    assert!(app.amount_entry_active());
    assert_eq!(app.amount_entry_text(), Some(expected.as_str()));

    let _ = app.handle_input(InputAction::AmountDigit(5));
    let appended = format!("{expected}5");
    assert_eq!(app.amount_entry_text(), Some(appended.as_str()));

    let _ = app.handle_input(InputAction::AmountBackspace);
    assert_eq!(app.amount_entry_text(), Some(expected.as_str()));

    let _ = app.handle_input(InputAction::AmountCancel);
    assert!(!app.amount_entry_active());
}

#[test]
fn amount_entry_rejects_too_small_and_keeps_the_turn() {
    let mut app = setup_table_app();
    let _ = app.handle_input(InputAction::NewHand);
    bots_until_human(&mut app);

    assert!(app.handle_input(InputAction::AmountOpen));
    for _ in 0..6 {
        let _ = app.handle_input(InputAction::AmountBackspace);
    }
    let _ = app.handle_input(InputAction::AmountDigit(1));
    assert!(!app.handle_input(InputAction::AmountSubmit));
    assert!(app.amount_entry_error().is_some());
    assert!(app.human_on_turn());
}

#[test]
fn check_call_moves_the_hand_on() {
    let mut app = setup_table_app();
    let _ = app.handle_input(InputAction::NewHand);
    bots_until_human(&mut app);
    let before = app.game.history().len();
    assert!(app.handle_input(InputAction::CheckCall));
    assert!(app.game.history().len() > before);
    assert!(app.game.chips_in_play() == 6000);
}
