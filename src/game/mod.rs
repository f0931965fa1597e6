//! Core Connect Four game logic: the board engine, player identities, and the
//! turn bookkeeping that drives a game to its outcome.

mod board;
mod player;
mod state;

pub use board::{Board, Cell, COLS, ROWS};
pub use player::{Piece, Player, PlayerKind};
pub use state::{Game, GameOutcome};
