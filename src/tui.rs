//! Terminal trainer: one human seat against agent-driven opponents.

pub mod app;
pub mod controller;
pub mod ui;
