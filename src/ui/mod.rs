//! Terminal UI: play Connect Four with the keyboard, against the computer or
//! another person at the same terminal.

mod app;
mod game_view;

pub use app::App;
