//! # Connect Four Minimax
//!
//! A Connect Four engine that picks moves with a depth-bounded minimax search
//! and alpha-beta pruning, scored by a four-cell window heuristic.
//!
//! ## Modules
//!
//! - [`game`] — Core game logic: board, column coercion, line detection, player, state machine
//! - [`ai`] — Agent trait, heuristic evaluator, minimax search, rule-based and random agents
//! - [`arena`] — Headless game loop and match statistics
//! - [`config`] — TOML configuration loading and validation
//! - [`error`] — Structured error types

pub mod ai;
pub mod arena;
pub mod config;
pub mod error;
pub mod game;

pub use ai::{choose_move, minimax};
pub use game::{board_is_full, create_board, Board, Player};
