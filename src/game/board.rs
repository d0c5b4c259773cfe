use std::fmt;

use super::column::ColumnIndex;
use super::player::Player;

pub const ROWS: usize = 6;
pub const COLS: usize = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cell {
    Empty,
    Red,
    Yellow,
}

impl Cell {
    fn symbol(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::Red => 'X',
            Cell::Yellow => 'O',
        }
    }
}

/// The 6x7 grid. Pieces obey gravity: in every column the occupied cells form
/// a contiguous run ending at the bottom row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    cells: [[Cell; COLS]; ROWS],
}

/// Create a new empty board.
pub fn create_board() -> Board {
    Board::new()
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Board {
            cells: [[Cell::Empty; COLS]; ROWS],
        }
    }

    /// Get the cell at a specific position
    /// Row 0 is the top, row 5 is the bottom
    pub fn get(&self, row: usize, col: usize) -> Cell {
        self.cells[row][col]
    }

    /// Check if a column is full. Columns outside the board count as full.
    pub fn is_column_full(&self, col: usize) -> bool {
        if col >= COLS {
            return true;
        }
        self.cells[0][col] != Cell::Empty
    }

    /// True iff `col` names a column on the board whose top cell is empty.
    pub fn valid_move(&self, col: impl ColumnIndex) -> bool {
        match col.to_column() {
            Some(col) => !self.is_column_full(col),
            None => false,
        }
    }

    /// Drop a piece in a column, returns the row where it landed.
    ///
    /// `None` means no piece was placed (bad column or column full) and the
    /// board is untouched.
    pub fn drop_piece(&mut self, col: impl ColumnIndex, player: Player) -> Option<usize> {
        let col = col.to_column()?;
        if self.is_column_full(col) {
            return None;
        }

        let row = (0..ROWS)
            .rev()
            .find(|&row| self.cells[row][col] == Cell::Empty)?;
        self.cells[row][col] = player.to_cell();
        Some(row)
    }

    /// Return a copy of the board with `player`'s piece dropped into `col`,
    /// or `None` if the move is not legal.
    pub fn with_move(&self, col: usize, player: Player) -> Option<Board> {
        let mut next = *self;
        next.drop_piece(col, player)?;
        Some(next)
    }

    /// Check if the board is completely full
    pub fn is_full(&self) -> bool {
        (0..COLS).all(|col| self.is_column_full(col))
    }

    /// Columns that can still take a piece, left to right.
    pub fn legal_columns(&self) -> impl Iterator<Item = usize> + '_ {
        (0..COLS).filter(|&col| !self.is_column_full(col))
    }

    /// Number of pieces on the board.
    pub fn piece_count(&self) -> usize {
        self.cells
            .iter()
            .flatten()
            .filter(|&&cell| cell != Cell::Empty)
            .count()
    }
}

/// Free-function form of [`Board::is_full`].
pub fn board_is_full(board: &Board) -> bool {
    board.is_full()
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.cells {
            let line: String = row.iter().map(|cell| cell.symbol()).collect();
            writeln!(f, "{line}")?;
        }
        let footer: String = (0..COLS)
            .map(|col| char::from_digit(col as u32, 10).unwrap_or('?'))
            .collect();
        write!(f, "{footer}")
    }
}
