//! # Connect Four
//!
//! Two-player Connect Four on the classic 7x6 grid, human against human or
//! against a computer opponent that looks one move ahead.
//!
//! ## Modules
//!
//! - [`game`] — Board engine (gravity, win and draw detection), players, turn state
//! - [`ai`] — Move selectors: console human and one-ply lookahead computer
//! - [`console`] — Line-oriented front end: mode prompt, rendering, turn loop
//! - [`ui`] — Terminal UI built with Ratatui
//! - [`config`] — TOML configuration loading and validation
//! - [`error`] — Structured error types

pub mod ai;
pub mod config;
pub mod console;
pub mod error;
pub mod game;
pub mod ui;
