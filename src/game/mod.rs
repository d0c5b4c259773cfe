//! Core Connect Four game logic: board representation, column coercion, line
//! detection, player types, and a game state machine with immutable
//! transitions.

mod board;
mod column;
pub mod lines;
mod player;
mod state;

pub use board::{board_is_full, create_board, Board, Cell, COLS, ROWS};
pub use column::ColumnIndex;
pub use lines::{Direction, Window, WINDOWS};
pub use player::Player;
pub use state::{GameOutcome, GameState, MoveError};
