use crate::cards::{Card, Suit};
use crate::game::{GameSnapshot, Phase, SeatSnapshot};
use crate::state::PlayerStatus;
use crate::tui::app::AppState;
use ratatui::prelude::*;
use ratatui::widgets::*;

use super::{centered_rect, inner};

pub(super) fn draw_table(f: &mut Frame, app: &AppState) {
    let snap = app.game.snapshot().redacted(app.human_seat);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // header
            Constraint::Length(5), // board
            Constraint::Min(3),    // seats
            Constraint::Length(4), // status
        ])
        .split(f.area());

    draw_header(f, chunks[0], app, &snap);
    draw_board(f, chunks[1], &snap);
    draw_seats(f, chunks[2], app, &snap);
    draw_status(f, chunks[3], app, &snap);

    if app.help_open() {
        draw_help(f);
    } else if app.history_open() {
        draw_history(f, app);
    } else if app.amount_entry_active() {
        draw_amount_entry(f, app);
    }
}

fn draw_header(f: &mut Frame, area: Rect, app: &AppState, snap: &GameSnapshot) {
    let config = app.game.config();
    let pots: Vec<String> = snap.pots.iter().map(|p| p.amount.to_string()).collect();
    let lines = vec![
        Line::from(format!(
            "Hand #{}  Blinds {}/{}  BTN P{}  Pot {}{}",
            snap.hand_number,
            config.small_blind(),
            config.big_blind(),
            snap.dealer + 1,
            snap.pot,
            if pots.len() > 1 { format!(" ({})", pots.join(" + ")) } else { String::new() },
        )),
        Line::from(format!(
            "Bet: {}   MinRaise: {}   ToCall: {}",
            snap.current_bet,
            snap.min_raise,
            app.game.to_call(app.human_seat)
        )),
    ];
    let header = Paragraph::new(lines)
        .block(Block::default().title("holdem-trainer").borders(Borders::ALL));
    f.render_widget(header, area);
}

fn draw_board(f: &mut Frame, area: Rect, snap: &GameSnapshot) {
    let block =
        Block::default().title(format!("Board: {}", snap.street.label())).borders(Borders::ALL);
    let board_inner = inner(area);
    f.render_widget(block, area);
    let card_width = board_inner.width / 5;
    let slots = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(card_width); 5])
        .split(board_inner);
    for (i, slot) in slots.iter().enumerate() {
        render_card(f, *slot, snap.board.get(i).copied(), None);
    }
}

fn draw_seats(f: &mut Frame, area: Rect, app: &AppState, snap: &GameSnapshot) {
    let total = snap.seats.len();
    let top_cols = (total + 1) / 2;
    let bottom_cols = total - top_cols;
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);
    for (r, cols) in [(0usize, top_cols), (1, bottom_cols)] {
        if cols == 0 {
            continue;
        }
        let col_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(vec![Constraint::Ratio(1, cols as u32); cols])
            .split(rows[r]);
        for (c, chunk) in col_chunks.iter().enumerate() {
            // Top row runs left to right, bottom row back, so seats read as a ring.
            let idx = if r == 0 { c } else { total - 1 - c };
            if let Some(seat) = snap.seats.get(idx) {
                draw_seat(f, *chunk, app, snap, seat);
            }
        }
    }
}

fn draw_seat(f: &mut Frame, area: Rect, app: &AppState, snap: &GameSnapshot, seat: &SeatSnapshot) {
    let mut title = seat.name.clone();
    if seat.seat == app.human_seat {
        title.push_str(" (you)");
    }
    if let Some(pos) = seat.position {
        title.push_str(&format!(" [{pos}]"));
    }
    if snap.action_seat == Some(seat.seat) {
        title.push_str(" [Act]");
    }
    let won: u64 = if snap.phase == Phase::EndHand {
        app.game.last_awards().iter().filter(|a| a.seat == seat.seat).map(|a| a.amount).sum()
    } else {
        0
    };
    let border = match seat.status {
        PlayerStatus::Folded | PlayerStatus::SittingOut => Style::default().fg(Color::DarkGray),
        _ if won > 0 => Style::default().fg(Color::Green),
        PlayerStatus::AllIn => Style::default().fg(Color::LightRed),
        _ if snap.action_seat == Some(seat.seat) => Style::default().fg(Color::Yellow),
        _ => Style::default(),
    };
    let status = match seat.status {
        PlayerStatus::Active => "Active",
        PlayerStatus::Folded => "Folded",
        PlayerStatus::AllIn => "All-in",
        PlayerStatus::SittingOut => "Out",
    };
    let mut lines = vec![
        Line::from(format!("Stack: {}", seat.stack)),
        Line::from(format!("Bet: {}", seat.current_bet)),
        Line::from(format!("Status: {status}")),
    ];
    if won > 0 {
        lines.push(Line::from(Span::styled(
            format!("Won {won}"),
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        )));
    }

    f.render_widget(Block::default().title(title).borders(Borders::ALL).border_style(border), area);
    let seat_inner = inner(area);
    let mut text_area = seat_inner;
    if let Some(hole) = seat.hole {
        if seat_inner.height > 3 {
            let split = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Min(1), Constraint::Length(3)])
                .split(seat_inner);
            text_area = split[0];
            let cw = split[1].width / 2;
            let cards = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Length(cw), Constraint::Length(cw)])
                .split(split[1]);
            render_card(f, cards[0], Some(hole.first()), Some(Color::Cyan));
            render_card(f, cards[1], Some(hole.second()), Some(Color::Cyan));
        }
    }
    f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), text_area);
}

fn draw_status(f: &mut Frame, area: Rect, app: &AppState, snap: &GameSnapshot) {
    f.render_widget(Block::default().borders(Borders::ALL).title("Status"), area);
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
        .split(inner(area));

    let mut left = if !app.hand_started() {
        vec![Line::from("Press Space to deal.")]
    } else if !snap.phase.is_betting() {
        vec![Line::from("Hand over. Press Space for the next one.")]
    } else if app.human_on_turn() {
        let legal = app.game.legal_actions(app.human_seat);
        let call = legal.as_ref().and_then(|l| l.call_amount);
        let check_call = match call {
            Some(amount) => format!("C call {amount}"),
            None => "C check".to_string(),
        };
        let open = legal.as_ref().and_then(|l| match (l.min_bet, l.min_raise_to) {
            (Some(m), _) => Some(format!("R bet {m}")),
            (None, Some(m)) => Some(format!("R raise to {m}")),
            (None, None) => None,
        });
        let mut spans = vec![
            Span::raw("Your turn: F fold • "),
            Span::styled(check_call, Style::default().add_modifier(Modifier::BOLD)),
        ];
        if let Some(open) = open {
            spans.push(Span::raw(format!(" • {open} • A amount")));
        }
        spans.push(Span::raw(" • S all-in"));
        vec![Line::from(spans)]
    } else {
        let acting = snap.action_seat.map(|s| format!("P{}", s + 1)).unwrap_or_default();
        vec![Line::from(format!("Waiting for {acting}"))]
    };
    if let Some(err) = app.action_error() {
        left.push(Line::from(Span::styled(format!("Error: {err}"), Style::default().fg(Color::Red))));
    }

    f.render_widget(Paragraph::new(left).wrap(Wrap { trim: true }), cols[0]);
    f.render_widget(
        Paragraph::new("? help • H history • M menu").alignment(Alignment::Right),
        cols[1],
    );
}

fn draw_history(f: &mut Frame, app: &AppState) {
    let area = centered_rect(70, 80, f.area());
    let mut lines: Vec<Line> = app.history_page().iter().map(|e| Line::from(e.to_string())).collect();
    if lines.is_empty() {
        lines.push(Line::from("No history yet."));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Up/Down scroll • Close: H or Esc",
        Style::default().add_modifier(Modifier::DIM),
    )));
    f.render_widget(Clear, area);
    f.render_widget(Block::default().title("History").borders(Borders::ALL), area);
    f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), inner(area));
}

fn draw_help(f: &mut Frame) {
    let area = centered_rect(60, 70, f.area());
    let bold = Style::default().add_modifier(Modifier::BOLD);
    let lines = vec![
        Line::from(Span::styled("Table:", bold)),
        Line::from("- Space: deal next hand"),
        Line::from("- F: fold"),
        Line::from("- C: check / call"),
        Line::from("- R: minimum bet / raise"),
        Line::from("- A: enter a bet or raise-to amount"),
        Line::from("- S: all-in"),
        Line::from("- H: hand history"),
        Line::from(""),
        Line::from(Span::styled("Amount entry:", bold)),
        Line::from("- 0-9 / Backspace: edit"),
        Line::from("- + / -: adjust by one big blind"),
        Line::from("- Enter: submit, Esc: cancel"),
        Line::from(""),
        Line::from("M: menu • Q: quit • ? or Esc: close help"),
    ];
    f.render_widget(Clear, area);
    f.render_widget(Block::default().title("Help").borders(Borders::ALL), area);
    f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), inner(area));
}

fn draw_amount_entry(f: &mut Frame, app: &AppState) {
    let area = centered_rect(50, 30, f.area());
    let legal = app.game.legal_actions(app.human_seat);
    let (title, min) = match legal.as_ref() {
        Some(l) if l.min_bet.is_some() => ("Bet Amount", l.min_bet),
        Some(l) => ("Raise To", l.min_raise_to),
        None => ("Amount", None),
    };
    let max = legal.as_ref().map(|l| l.max_total).unwrap_or_default();
    let lines = vec![
        Line::from(format!("Amount: {}", app.amount_entry_text().unwrap_or(""))),
        Line::from(format!("Min: {}  Max: {max}", min.map(|m| m.to_string()).unwrap_or_default())),
        Line::from("+/- in BB steps, Enter submit, Esc cancel"),
    ];
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(inner(area));
    f.render_widget(Clear, area);
    f.render_widget(Block::default().title(title).borders(Borders::ALL), area);
    f.render_widget(Paragraph::new(lines).alignment(Alignment::Center), chunks[0]);
    let error = Line::from(Span::styled(
        app.amount_entry_error().unwrap_or(""),
        Style::default().fg(Color::Red),
    ));
    f.render_widget(Paragraph::new(error).alignment(Alignment::Center), chunks[1]);
}

fn suit_glyph_and_style(s: Suit) -> (char, Style) {
    match s {
        Suit::Hearts => ('♥', Style::default().fg(Color::Red)),
        Suit::Diamonds => ('♦', Style::default().fg(Color::Red)),
        Suit::Spades => ('♠', Style::default().fg(Color::White)),
        Suit::Clubs => ('♣', Style::default().fg(Color::White)),
    }
}

fn render_card(f: &mut Frame, area: Rect, card: Option<Card>, border: Option<Color>) {
    let mut block = Block::default().borders(Borders::ALL);
    if let Some(color) = border {
        block = block.border_style(Style::default().fg(color));
    }
    f.render_widget(block, area);
    let content = match card {
        Some(c) => {
            let (glyph, style) = suit_glyph_and_style(c.suit());
            Line::from(Span::styled(format!("{}{glyph}", c.rank().to_char()), style))
        }
        None => Line::from("[  ]"),
    };
    f.render_widget(Paragraph::new(content).alignment(Alignment::Center), inner(area));
}
