use crate::agents::{AgentTable, CallingAgent, CheckFoldAgent, HumanAgent, Intent, RandomAgent};
use crate::config::TableConfig;
use crate::engine::GameEngine;
use crate::game::Game;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum Scene {
    Menu,
    Table,
}

/// Who sits in the seats the human does not.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Opponents {
    Calling,
    CheckFold,
    Random,
}

impl Opponents {
    pub fn label(self) -> &'static str {
        match self {
            Opponents::Calling => "Calling station",
            Opponents::CheckFold => "Check/fold",
            Opponents::Random => "Random",
        }
    }

    pub(crate) fn next(self) -> Self {
        match self {
            Opponents::Calling => Opponents::CheckFold,
            Opponents::CheckFold => Opponents::Random,
            Opponents::Random => Opponents::Calling,
        }
    }

    pub(crate) fn prev(self) -> Self {
        self.next().next()
    }
}

/// High-level input actions for the TUI controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum InputAction {
    MenuNext,
    MenuPrev,
    MenuInc,
    MenuDec,
    MenuApply,
    MenuCancel,
    ToggleMenu,
    ToggleHelp,
    ToggleHistory,
    HistoryUp,
    HistoryDown,
    NewHand,
    Fold,
    CheckCall,
    MinBetRaise,
    AllIn,
    AmountOpen,
    AmountDigit(u8),
    AmountBackspace,
    AmountIncBb,
    AmountDecBb,
    AmountSubmit,
    AmountCancel,
}

#[derive(Debug)]
#[non_exhaustive]
pub struct AppState {
    pub scene: Scene,
    pub game: Game,
    pub agents: AgentTable,
    /// Seat the keyboard plays.
    pub human_seat: usize,
    // Menu config being edited
    pub menu_index: usize,
    pub cfg_num_players: usize,
    pub cfg_starting_stack: u64,
    pub cfg_small_blind: u64,
    pub cfg_big_blind: u64,
    pub cfg_bot_delay_ms: u64,
    pub cfg_opponents: Opponents,
    pub bot_delay_ms: u64,
    pub opponents: Opponents,
    help_open: bool,
    history_open: bool,
    history_offset: usize,
    amount_entry: Option<String>,
    amount_entry_error: Option<String>,
    action_error: Option<String>,
    action_error_at: Option<Instant>,
}

impl Default for AppState {
    fn default() -> Self {
        let mut app = Self {
            scene: Scene::Menu,
            game: Game::new(TableConfig::default()),
            agents: AgentTable::for_seats(0),
            human_seat: 0,
            menu_index: 0,
            cfg_num_players: 6,
            cfg_starting_stack: 1000,
            cfg_small_blind: 5,
            cfg_big_blind: 10,
            cfg_bot_delay_ms: 400,
            cfg_opponents: Opponents::Calling,
            bot_delay_ms: 400,
            opponents: Opponents::Calling,
            help_open: false,
            history_open: false,
            history_offset: 0,
            amount_entry: None,
            amount_entry_error: None,
            action_error: None,
            action_error_at: None,
        };
        app.seat_agents();
        app
    }
}

impl AppState {
    pub const HISTORY_PAGE_SIZE: usize = 20;
    const ACTION_ERROR_TTL: Duration = Duration::from_secs(3);

    pub fn hand_started(&self) -> bool {
        self.game.hand_number() > 0
    }

    pub fn human_on_turn(&self) -> bool {
        self.scene == Scene::Table && self.game.action_seat() == Some(self.human_seat)
    }

    /// Rebuild the agent table: the human in their seat, the chosen
    /// opponents everywhere else.
    pub(crate) fn seat_agents(&mut self) {
        let n = self.game.players().len();
        self.agents = AgentTable::for_seats(n);
        self.agents.set_min_action_delay_ms(self.bot_delay_ms);
        for seat in 0..n {
            if seat == self.human_seat {
                self.agents.set_agent(seat, Some(Box::new(HumanAgent::new())));
                continue;
            }
            match self.opponents {
                Opponents::Calling => self.agents.set_agent(seat, Some(Box::new(CallingAgent))),
                Opponents::CheckFold => self.agents.set_agent(seat, Some(Box::new(CheckFoldAgent))),
                Opponents::Random => {
                    let seed = rand::random::<u64>();
                    self.agents.set_agent(seat, Some(Box::new(RandomAgent::seeded(seed))));
                }
            }
        }
    }

    fn queue_intent(&mut self, intent: Intent) -> bool {
        if !self.human_on_turn() {
            return false;
        }
        self.clear_action_error();
        if !self.agents.receive(self.human_seat, intent) {
            return false;
        }
        self.agents_on_turn();
        true
    }

    pub fn amount_entry_active(&self) -> bool {
        self.amount_entry.is_some()
    }

    pub fn amount_entry_text(&self) -> Option<&str> {
        self.amount_entry.as_deref()
    }

    pub fn amount_entry_error(&self) -> Option<&str> {
        self.amount_entry_error.as_deref()
    }

    pub fn action_error(&self) -> Option<&str> {
        self.action_error.as_deref()
    }

    fn set_action_error(&mut self, msg: String) {
        self.action_error = Some(msg);
        self.action_error_at = Some(Instant::now());
    }

    fn clear_action_error(&mut self) {
        self.action_error = None;
        self.action_error_at = None;
    }

    pub fn help_open(&self) -> bool {
        self.help_open
    }

    pub fn history_open(&self) -> bool {
        self.history_open
    }

    pub fn history_offset(&self) -> usize {
        self.history_offset
    }

    pub(crate) fn close_overlays(&mut self) {
        self.help_open = false;
        self.history_open = false;
    }

    /// One page of the hand log, `history_offset` entries back from the end.
    pub fn history_page(&self) -> &[crate::history::HandHistoryEntry] {
        let all = self.game.history();
        let end = all.len().saturating_sub(self.history_offset);
        let start = end.saturating_sub(Self::HISTORY_PAGE_SIZE);
        &all[start..end]
    }

    fn open_amount_entry(&mut self) -> bool {
        let Some(legal) = self.game.legal_actions(self.human_seat) else {
            return false;
        };
        let Some(min) = legal.min_bet.or(legal.min_raise_to) else {
            return false;
        };
        self.amount_entry = Some(min.to_string());
        self.amount_entry_error = None;
        true
    }

    fn amount_entry_backspace(&mut self) {
        if let Some(buf) = self.amount_entry.as_mut() {
            buf.pop();
        }
        self.amount_entry_error = None;
    }

    fn amount_entry_push_digit(&mut self, digit: u8) {
        if let Some(buf) = self.amount_entry.as_mut() {
            if buf.len() >= 12 {
                return;
            }
            buf.push(char::from(b'0' + digit));
        }
        self.amount_entry_error = None;
    }

    fn amount_entry_adjust_bb(&mut self, up: bool) {
        let step = self.game.config().big_blind();
        if let Some(buf) = self.amount_entry.as_mut() {
            let cur = buf.parse::<u64>().unwrap_or(0);
            let next = if up { cur.saturating_add(step) } else { cur.saturating_sub(step) };
            *buf = next.to_string();
        }
        self.amount_entry_error = None;
    }

    fn amount_entry_submit(&mut self) -> bool {
        let Some(buf) = self.amount_entry.as_ref() else {
            return false;
        };
        let Ok(amount) = buf.parse::<u64>() else {
            self.amount_entry_error = Some("Invalid amount".to_string());
            return false;
        };
        let Some(legal) = self.game.legal_actions(self.human_seat) else {
            self.amount_entry_error = Some("Not your turn".to_string());
            return false;
        };
        let Some(action) = Intent::Amount(amount).resolve(&legal) else {
            self.amount_entry_error = Some("Betting is closed".to_string());
            return false;
        };
        if let Err(e) = self.game.validate_action(self.human_seat, &action) {
            self.amount_entry_error = Some(e.to_string());
            return false;
        }
        self.amount_entry = None;
        self.amount_entry_error = None;
        self.queue_intent(Intent::Amount(amount))
    }

    fn amount_entry_cancel(&mut self) {
        self.amount_entry = None;
        self.amount_entry_error = None;
    }

    pub fn handle_input(&mut self, action: InputAction) -> bool {
        match action {
            InputAction::ToggleMenu => {
                self.toggle_menu();
                false
            }
            InputAction::ToggleHelp => {
                if self.scene == Scene::Table {
                    self.history_open = false;
                    self.help_open = !self.help_open;
                }
                false
            }
            InputAction::ToggleHistory => {
                if self.scene == Scene::Table {
                    self.help_open = false;
                    if !self.history_open {
                        self.history_offset = 0;
                    }
                    self.history_open = !self.history_open;
                }
                false
            }
            InputAction::HistoryUp => {
                if self.scene == Scene::Table && self.history_open {
                    let max_offset =
                        self.game.history().len().saturating_sub(Self::HISTORY_PAGE_SIZE);
                    self.history_offset = (self.history_offset + 1).min(max_offset);
                }
                false
            }
            InputAction::HistoryDown => {
                if self.scene == Scene::Table && self.history_open {
                    self.history_offset = self.history_offset.saturating_sub(1);
                }
                false
            }
            InputAction::MenuNext => {
                if self.scene == Scene::Menu {
                    self.menu_next();
                }
                false
            }
            InputAction::MenuPrev => {
                if self.scene == Scene::Menu {
                    self.menu_prev();
                }
                false
            }
            InputAction::MenuInc => {
                if self.scene == Scene::Menu {
                    self.menu_inc();
                }
                false
            }
            InputAction::MenuDec => {
                if self.scene == Scene::Menu {
                    self.menu_dec();
                }
                false
            }
            InputAction::MenuApply => {
                if self.scene == Scene::Menu {
                    self.apply_menu();
                }
                false
            }
            InputAction::MenuCancel => {
                if self.scene == Scene::Menu {
                    self.cancel_menu();
                }
                false
            }
            InputAction::NewHand => {
                if self.scene == Scene::Table {
                    self.new_hand();
                }
                false
            }
            InputAction::Fold => self.queue_intent(Intent::Fold),
            InputAction::CheckCall => self.queue_intent(Intent::CheckCall),
            InputAction::MinBetRaise => self.queue_intent(Intent::MinBetRaise),
            InputAction::AllIn => self.queue_intent(Intent::AllIn),
            InputAction::AmountOpen => self.open_amount_entry(),
            InputAction::AmountDigit(d) => {
                self.amount_entry_push_digit(d);
                false
            }
            InputAction::AmountBackspace => {
                self.amount_entry_backspace();
                false
            }
            InputAction::AmountIncBb => {
                self.amount_entry_adjust_bb(true);
                false
            }
            InputAction::AmountDecBb => {
                self.amount_entry_adjust_bb(false);
                false
            }
            InputAction::AmountSubmit => self.amount_entry_submit(),
            InputAction::AmountCancel => {
                self.amount_entry_cancel();
                false
            }
        }
    }

    /// Deal the next hand unless one is still being played.
    pub fn new_hand(&mut self) {
        if self.game.phase().is_betting() {
            return;
        }
        match self.game.start_hand() {
            Ok(()) => {
                self.history_offset = 0;
                self.clear_action_error();
            }
            Err(e) => self.set_action_error(e.to_string()),
        }
    }

    /// Give the seat on turn a chance to act; called on every tick.
    pub fn agents_on_turn(&mut self) {
        if self.scene != Scene::Table || !self.hand_started() {
            return;
        }
        if let Some(at) = self.action_error_at {
            if at.elapsed() >= Self::ACTION_ERROR_TTL {
                self.clear_action_error();
            }
        }
        let engine: &mut dyn GameEngine = &mut self.game;
        match self.agents.on_turn(engine) {
            Ok(true) => self.clear_action_error(),
            Ok(false) => {}
            Err(err) => self.set_action_error(err.to_string()),
        }
    }
}
