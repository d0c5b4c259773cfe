//! Four-in-a-row detection and the table of every four-cell window on the
//! board. The same table drives both win checks and heuristic scoring.

use super::board::{Board, Cell, COLS, ROWS};
use super::player::Player;

/// Four (row, col) coordinates in a straight line.
pub type Window = [(usize, usize); 4];

/// 24 horizontal + 21 vertical + 12 + 12 diagonal.
pub const WINDOW_COUNT: usize = 69;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Horizontal,
    Vertical,
    /// Top-left to bottom-right.
    Diagonal,
    /// Bottom-left to top-right.
    AntiDiagonal,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Horizontal,
        Direction::Vertical,
        Direction::Diagonal,
        Direction::AntiDiagonal,
    ];

    /// Every window running in this direction.
    pub fn windows(self) -> &'static [Window] {
        let (start, end) = match self {
            Direction::Horizontal => (0, 24),
            Direction::Vertical => (24, 45),
            Direction::Diagonal => (45, 57),
            Direction::AntiDiagonal => (57, WINDOW_COUNT),
        };
        &WINDOWS[start..end]
    }
}

/// All windows, grouped by direction in the order of [`Direction::ALL`].
pub static WINDOWS: [Window; WINDOW_COUNT] = build_windows();

const fn build_windows() -> [Window; WINDOW_COUNT] {
    let mut out = [[(0, 0); 4]; WINDOW_COUNT];
    let mut n = 0;

    let mut r = 0;
    while r < ROWS {
        let mut c = 0;
        while c + 3 < COLS {
            out[n] = [(r, c), (r, c + 1), (r, c + 2), (r, c + 3)];
            n += 1;
            c += 1;
        }
        r += 1;
    }

    let mut c = 0;
    while c < COLS {
        let mut r = 0;
        while r + 3 < ROWS {
            out[n] = [(r, c), (r + 1, c), (r + 2, c), (r + 3, c)];
            n += 1;
            r += 1;
        }
        c += 1;
    }

    let mut r = 0;
    while r + 3 < ROWS {
        let mut c = 0;
        while c + 3 < COLS {
            out[n] = [(r, c), (r + 1, c + 1), (r + 2, c + 2), (r + 3, c + 3)];
            n += 1;
            c += 1;
        }
        r += 1;
    }

    let mut r = 3;
    while r < ROWS {
        let mut c = 0;
        while c + 3 < COLS {
            out[n] = [(r, c), (r - 1, c + 1), (r - 2, c + 2), (r - 3, c + 3)];
            n += 1;
            c += 1;
        }
        r += 1;
    }

    assert!(n == WINDOW_COUNT);
    out
}

impl Board {
    /// The contents of a window.
    pub fn window_cells(&self, window: &Window) -> [Cell; 4] {
        window.map(|(row, col)| self.get(row, col))
    }

    /// Check whether `player` has four in a row anywhere. Longer runs count.
    pub fn check_win(&self, player: Player) -> bool {
        self.winning_line(player).is_some()
    }

    /// First window (in table order) fully owned by `player`.
    pub fn winning_line(&self, player: Player) -> Option<Window> {
        let cell = player.to_cell();
        Direction::ALL.iter().find_map(|direction| {
            direction
                .windows()
                .iter()
                .find(|window| window.iter().all(|&(row, col)| self.get(row, col) == cell))
                .copied()
        })
    }
}
