//! holdem-trainer: a No-Limit Texas Hold'em table engine
//!
//! Goals:
//! - One hand at a time, from blinds to payout, driven by validated actions
//! - Exact chip accounting: nothing is created or lost, side pots included
//! - Deterministic play from a seed or a stacked deck, for tests and replays
//! - No panics for bad input; every rejected action says why
//!
//! ## Quick start: play a hand
//! ```
//! use holdem_trainer::betting::Action;
//! use holdem_trainer::config::TableConfig;
//! use holdem_trainer::game::{Game, Phase};
//!
//! let config = TableConfig::builder().players(3).blinds(5, 10).seed(11).build().unwrap();
//! let mut game = Game::new(config);
//! game.start_hand().unwrap();
//!
//! // Everybody checks or calls down to showdown.
//! while let Some(seat) = game.action_seat() {
//!     let legal = game.legal_actions(seat).unwrap();
//!     let action = if legal.can_check { Action::Check } else { Action::Call };
//!     game.execute_action(seat, action).unwrap();
//! }
//!
//! assert_eq!(game.phase(), Phase::EndHand);
//! assert_eq!(game.board().len(), 5);
//! assert_eq!(game.chips_in_play(), 3000);
//! ```
//!
//! ## TUI
//! Play against bots in the terminal with:
//! ```sh
//! cargo run --bin holdem-trainer
//! ```

pub mod agents;
pub mod betting;
pub mod cards;
pub mod config;
pub mod deck;
pub mod engine;
pub mod evaluator;
pub mod events;
pub mod game;
pub mod hand;
pub mod history;
pub mod positions;
pub mod pot;
pub mod showdown;
pub mod state;
pub mod tui;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
