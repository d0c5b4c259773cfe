use crate::game::{Board, Player};

/// Universal interface for all automated players.
///
/// Every strategy has the same shape: look at a board, know which side it is
/// playing, and name a column. `None` means there is no legal move, which only
/// happens on a full board.
pub trait Agent {
    /// Pick a column for `player` on `board`.
    fn select_column(&mut self, board: &Board, player: Player) -> Option<usize>;

    /// Return the agent's display name.
    fn name(&self) -> &str;
}

