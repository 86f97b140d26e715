use crate::config::{TableConfig, MAX_PLAYERS, MIN_PLAYERS};
use crate::game::Game;

use super::{AppState, Scene};

#[derive(Debug, Clone, Copy)]
enum MenuItem {
    Players,
    StartingStack,
    SmallBlind,
    BigBlind,
    Opponents,
    BotDelayMs,
}

const MENU_ITEMS: [MenuItem; 6] = [
    MenuItem::Players,
    MenuItem::StartingStack,
    MenuItem::SmallBlind,
    MenuItem::BigBlind,
    MenuItem::Opponents,
    MenuItem::BotDelayMs,
];

impl MenuItem {
    fn display(self, app: &AppState) -> String {
        match self {
            MenuItem::Players => format!("Players: {}", app.cfg_num_players),
            MenuItem::StartingStack => format!("Starting Stack: {}", app.cfg_starting_stack),
            MenuItem::SmallBlind => format!("Small Blind: {}", app.cfg_small_blind),
            MenuItem::BigBlind => format!("Big Blind: {}", app.cfg_big_blind),
            MenuItem::Opponents => format!("Opponents: {}", app.cfg_opponents.label()),
            MenuItem::BotDelayMs => format!("Bot Delay (ms): {}", app.cfg_bot_delay_ms),
        }
    }

    fn inc(self, app: &mut AppState) {
        match self {
            MenuItem::Players => {
                if app.cfg_num_players < MAX_PLAYERS {
                    app.cfg_num_players += 1;
                }
            }
            MenuItem::StartingStack => {
                app.cfg_starting_stack = app.cfg_starting_stack.saturating_add(100);
            }
            MenuItem::SmallBlind => {
                app.cfg_small_blind = app.cfg_small_blind.saturating_add(1);
                if app.cfg_big_blind < app.cfg_small_blind {
                    app.cfg_big_blind = app.cfg_small_blind;
                }
            }
            MenuItem::BigBlind => {
                app.cfg_big_blind = app.cfg_big_blind.saturating_add(1);
            }
            MenuItem::Opponents => app.cfg_opponents = app.cfg_opponents.next(),
            MenuItem::BotDelayMs => {
                app.cfg_bot_delay_ms = app.cfg_bot_delay_ms.saturating_add(100);
            }
        }
    }

    fn dec(self, app: &mut AppState) {
        match self {
            MenuItem::Players => {
                if app.cfg_num_players > MIN_PLAYERS {
                    app.cfg_num_players -= 1;
                }
            }
            MenuItem::StartingStack => {
                app.cfg_starting_stack = app.cfg_starting_stack.saturating_sub(100).max(100);
            }
            MenuItem::SmallBlind => {
                if app.cfg_small_blind > 1 {
                    app.cfg_small_blind -= 1;
                }
            }
            MenuItem::BigBlind => {
                if app.cfg_big_blind > 1 {
                    app.cfg_big_blind -= 1;
                    if app.cfg_big_blind < app.cfg_small_blind {
                        app.cfg_small_blind = app.cfg_big_blind;
                    }
                }
            }
            MenuItem::Opponents => app.cfg_opponents = app.cfg_opponents.prev(),
            MenuItem::BotDelayMs => {
                app.cfg_bot_delay_ms = app.cfg_bot_delay_ms.saturating_sub(100);
            }
        }
    }
}

impl AppState {
    pub fn menu_items_display(&self) -> Vec<String> {
        MENU_ITEMS.iter().map(|item| item.display(self)).collect()
    }

    pub fn toggle_menu(&mut self) {
        match self.scene {
            Scene::Menu => self.cancel_menu(),
            _ => self.open_menu(),
        }
    }

    pub fn open_menu(&mut self) {
        self.close_overlays();
        let config = self.game.config();
        self.menu_index = 0;
        self.cfg_num_players = config.num_players();
        self.cfg_starting_stack = config.stacks().first().copied().unwrap_or(1000);
        self.cfg_small_blind = config.small_blind();
        self.cfg_big_blind = config.big_blind();
        self.cfg_bot_delay_ms = self.bot_delay_ms;
        self.cfg_opponents = self.opponents;
        self.scene = Scene::Menu;
    }

    /// Seat a fresh table from the edited settings. Invalid settings keep
    /// the menu open.
    pub fn apply_menu(&mut self) {
        let config = match TableConfig::new(
            self.cfg_num_players,
            self.cfg_starting_stack,
            self.cfg_small_blind,
            self.cfg_big_blind,
        ) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!(error = %e, "menu settings rejected");
                return;
            }
        };
        self.bot_delay_ms = self.cfg_bot_delay_ms;
        self.opponents = self.cfg_opponents;
        self.game = Game::new(config);
        self.seat_agents();
        self.scene = Scene::Table;
    }

    pub fn cancel_menu(&mut self) {
        self.scene = Scene::Table;
    }

    pub fn menu_next(&mut self) {
        self.menu_index = (self.menu_index + 1) % MENU_ITEMS.len();
    }
    pub fn menu_prev(&mut self) {
        self.menu_index = (self.menu_index + MENU_ITEMS.len() - 1) % MENU_ITEMS.len();
    }
    pub fn menu_inc(&mut self) {
        let item = MENU_ITEMS[self.menu_index % MENU_ITEMS.len()];
        item.inc(self);
    }
    pub fn menu_dec(&mut self) {
        let item = MENU_ITEMS[self.menu_index % MENU_ITEMS.len()];
        item.dec(self);
    }
}
