use crate::tui::app::{AppState, InputAction, Scene};
use crate::tui::ui;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::prelude::{CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use std::time::{Duration, Instant};

pub fn run(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut AppState,
    tick_rate: Duration,
) -> io::Result<()> {
    let mut last_tick = Instant::now();
    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        let timeout = tick_rate.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press && handle_key(app, key.code) {
                    break;
                }
            }
        }

        if last_tick.elapsed() >= tick_rate {
            app.agents_on_turn();
            last_tick = Instant::now();
        }
    }
    Ok(())
}

/// Map a key press to an input action. Returns true when the user quits.
pub fn handle_key(app: &mut AppState, code: KeyCode) -> bool {
    match code {
        KeyCode::Char('?') => {
            app.handle_input(InputAction::ToggleHelp);
            return false;
        }
        KeyCode::Char('h') | KeyCode::Char('H') if !app.amount_entry_active() => {
            app.handle_input(InputAction::ToggleHistory);
            return false;
        }
        _ => {}
    }
    if app.help_open() {
        if code == KeyCode::Esc {
            app.handle_input(InputAction::ToggleHelp);
        }
        return false;
    }
    if app.history_open() {
        let action = match code {
            KeyCode::Up => Some(InputAction::HistoryUp),
            KeyCode::Down => Some(InputAction::HistoryDown),
            KeyCode::Esc => Some(InputAction::ToggleHistory),
            _ => None,
        };
        if let Some(action) = action {
            app.handle_input(action);
        }
        return false;
    }
    if app.amount_entry_active() {
        let action = match code {
            KeyCode::Esc => Some(InputAction::AmountCancel),
            KeyCode::Enter => Some(InputAction::AmountSubmit),
            KeyCode::Backspace => Some(InputAction::AmountBackspace),
            KeyCode::Char('+') | KeyCode::Char('=') => Some(InputAction::AmountIncBb),
            KeyCode::Char('-') | KeyCode::Char('_') => Some(InputAction::AmountDecBb),
            KeyCode::Char(c) if c.is_ascii_digit() => {
                Some(InputAction::AmountDigit(c as u8 - b'0'))
            }
            _ => None,
        };
        if let Some(action) = action {
            app.handle_input(action);
        }
        return false;
    }

    let action = match app.scene {
        Scene::Menu => match code {
            KeyCode::Up => InputAction::MenuPrev,
            KeyCode::Down => InputAction::MenuNext,
            KeyCode::Char('+') | KeyCode::Char('=') | KeyCode::Right => InputAction::MenuInc,
            KeyCode::Char('-') | KeyCode::Char('_') | KeyCode::Left => InputAction::MenuDec,
            KeyCode::Enter => InputAction::MenuApply,
            KeyCode::Esc => InputAction::MenuCancel,
            KeyCode::Char('m') | KeyCode::Char('M') => InputAction::ToggleMenu,
            KeyCode::Char('q') | KeyCode::Char('Q') => return true,
            _ => return false,
        },
        Scene::Table => match code {
            KeyCode::Char('m') | KeyCode::Char('M') => InputAction::ToggleMenu,
            KeyCode::Char(' ') => InputAction::NewHand,
            KeyCode::Char('a') | KeyCode::Char('A') => InputAction::AmountOpen,
            KeyCode::Char('f') | KeyCode::Char('F') => InputAction::Fold,
            KeyCode::Char('c') | KeyCode::Char('C') => InputAction::CheckCall,
            KeyCode::Char('r') | KeyCode::Char('R') => InputAction::MinBetRaise,
            KeyCode::Char('s') | KeyCode::Char('S') => InputAction::AllIn,
            KeyCode::Char('q') | KeyCode::Char('Q') => return true,
            _ => return false,
        },
    };
    app.handle_input(action);
    false
}
