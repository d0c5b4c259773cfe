use crate::game::{Board, Cell, Player, COLS, ROWS};

use super::agent::Agent;

/// Column ordering: center-first.
const CENTER_FIRST: [usize; COLS] = [3, 2, 4, 1, 5, 0, 6];

/// Rule-based agent: win if possible, otherwise block, otherwise set up a
/// future line, otherwise play as close to the center as the board allows.
#[derive(Debug, Clone, Copy, Default)]
pub struct RuleBasedAgent;

impl RuleBasedAgent {
    pub fn new() -> Self {
        RuleBasedAgent
    }
}

/// Leftmost column where `player` completes four in a row right away.
pub fn find_winning_column(board: &Board, player: Player) -> Option<usize> {
    board.legal_columns().find(|&col| {
        board
            .with_move(col, player)
            .is_some_and(|next| next.check_win(player))
    })
}

/// Leftmost column after which `player` owns two cells of some three-cell line
/// whose remaining cell is empty.
pub fn find_setup_column(board: &Board, player: Player) -> Option<usize> {
    board.legal_columns().find(|&col| {
        board
            .with_move(col, player)
            .is_some_and(|next| has_open_pair(&next, player))
    })
}

fn has_open_pair(board: &Board, player: Player) -> bool {
    const STEPS: [(isize, isize); 4] = [(0, 1), (1, 0), (1, 1), (-1, 1)];
    let own = player.to_cell();

    for row in 0..ROWS as isize {
        for col in 0..COLS as isize {
            for (dr, dc) in STEPS {
                let cells: Option<Vec<Cell>> = (0..3)
                    .map(|i| {
                        let r = row + dr * i;
                        let c = col + dc * i;
                        let in_bounds = (0..ROWS as isize).contains(&r) && (0..COLS as isize).contains(&c);
                        in_bounds.then(|| board.get(r as usize, c as usize))
                    })
                    .collect();
                let Some(cells) = cells else { continue };
                let owned = cells.iter().filter(|&&cell| cell == own).count();
                let empty = cells.iter().filter(|&&cell| cell == Cell::Empty).count();
                if owned == 2 && empty == 1 {
                    return true;
                }
            }
        }
    }
    false
}

impl Agent for RuleBasedAgent {
    fn select_column(&mut self, board: &Board, player: Player) -> Option<usize> {
        find_winning_column(board, player)
            .or_else(|| find_winning_column(board, player.other()))
            .or_else(|| find_setup_column(board, player))
            .or_else(|| CENTER_FIRST.into_iter().find(|&col| board.valid_move(col)))
    }

    fn name(&self) -> &str {
        "Rules"
    }
}
