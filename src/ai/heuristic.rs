use serde::{Deserialize, Serialize};

use crate::game::{Board, Cell, Player, WINDOWS};

/// Trait for evaluating a board position from a player's perspective.
pub trait Heuristic: Send {
    fn evaluate(&self, board: &Board, player: Player) -> i32;
}

/// Points awarded per four-cell window.
///
/// Blocking an opponent three costs less than completing an own three earns,
/// so a win is still preferred over a block when both are on offer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowWeights {
    /// Four own pieces.
    pub win: i32,
    /// Three own pieces and one empty cell.
    pub own_three: i32,
    /// Two own pieces and two empty cells.
    pub own_two: i32,
    /// Three opponent pieces and one empty cell.
    pub opponent_three: i32,
    /// Two opponent pieces and two empty cells.
    pub opponent_two: i32,
}

impl Default for WindowWeights {
    fn default() -> Self {
        WindowWeights {
            win: 100,
            own_three: 5,
            own_two: 2,
            opponent_three: -4,
            opponent_two: -2,
        }
    }
}

impl WindowWeights {
    /// Score one window. The first matching rule wins; windows holding a mix
    /// of both players' pieces (or an opponent four) score zero.
    pub fn score(&self, cells: [Cell; 4], player: Player) -> i32 {
        let own_cell = player.to_cell();
        let opp_cell = player.other().to_cell();
        let own = cells.iter().filter(|&&c| c == own_cell).count();
        let opp = cells.iter().filter(|&&c| c == opp_cell).count();
        let empty = cells.iter().filter(|&&c| c == Cell::Empty).count();

        match (own, opp, empty) {
            (4, _, _) => self.win,
            (3, _, 1) => self.own_three,
            (2, _, 2) => self.own_two,
            (_, 3, 1) => self.opponent_three,
            (_, 2, 2) => self.opponent_two,
            _ => 0,
        }
    }
}

/// Score a single window with the default weights.
pub fn evaluate_window(cells: [Cell; 4], player: Player) -> i32 {
    WindowWeights::default().score(cells, player)
}

/// Sum of [`evaluate_window`] over every window on the board.
pub fn evaluate_board(board: &Board, player: Player) -> i32 {
    WindowHeuristic::default().evaluate(board, player)
}

/// Default heuristic that scans all 4-cell windows and scores threats.
#[derive(Debug, Clone, Copy, Default)]
pub struct WindowHeuristic {
    weights: WindowWeights,
}

impl WindowHeuristic {
    pub fn new(weights: WindowWeights) -> Self {
        WindowHeuristic { weights }
    }

    pub fn weights(&self) -> &WindowWeights {
        &self.weights
    }
}

impl Heuristic for WindowHeuristic {
    fn evaluate(&self, board: &Board, player: Player) -> i32 {
        WINDOWS
            .iter()
            .map(|window| self.weights.score(board.window_cells(window), player))
            .sum()
    }
}
