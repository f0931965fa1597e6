use std::fmt;
use std::str::FromStr;

use super::player::Piece;
use crate::error::{BoardParseError, MoveError};

pub const ROWS: usize = 6;
pub const COLS: usize = 7;

/// Consecutive identical pieces needed to win.
const WIN_LENGTH: usize = 4;
/// Cells visited per diagonal walk, the start cell included.
const DIAGONAL_STEPS: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cell {
    Empty,
    X,
    O,
}

impl Cell {
    /// Character used for this cell in the text form of a board
    pub fn symbol(self) -> char {
        match self {
            Cell::Empty => '-',
            Cell::X => 'X',
            Cell::O => 'O',
        }
    }

    fn from_symbol(symbol: char) -> Option<Cell> {
        match symbol {
            '-' | '.' => Some(Cell::Empty),
            'X' | 'x' => Some(Cell::X),
            'O' | 'o' => Some(Cell::O),
            _ => None,
        }
    }
}

/// The 7x6 grid, stored column by column.
///
/// Within a column, index 0 is the top cell. `Board` is `Copy`, so lookahead
/// works on a scratch value and can never touch the live grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    columns: [[Cell; ROWS]; COLS],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Board {
            columns: [[Cell::Empty; ROWS]; COLS],
        }
    }

    /// Get the cell at a zero-based position.
    /// Row 0 is the top, row 5 is the bottom
    pub fn get(&self, row: usize, col: usize) -> Cell {
        self.columns[col][row]
    }

    /// Map a column number (1..=7) to its storage index.
    fn index(column: usize) -> Result<usize, MoveError> {
        if (1..=COLS).contains(&column) {
            Ok(column - 1)
        } else {
            Err(MoveError::InvalidColumn)
        }
    }

    /// Check if a column (1..=7) is full. Out-of-range columns count as full.
    pub fn is_column_full(&self, column: usize) -> bool {
        match Self::index(column) {
            Ok(idx) => self.columns[idx][0] != Cell::Empty,
            Err(_) => true,
        }
    }

    /// Number of pieces stacked in a column (1..=7)
    pub fn pieces_in_column(&self, column: usize) -> usize {
        match Self::index(column) {
            Ok(idx) => self.columns[idx]
                .iter()
                .filter(|&&cell| cell != Cell::Empty)
                .count(),
            Err(_) => 0,
        }
    }

    /// Drop a piece in a column (1..=7), returns the zero-based row where it
    /// landed
    pub fn drop_piece(&mut self, column: usize, piece: Piece) -> Result<usize, MoveError> {
        let idx = Self::index(column)?;
        let cells = &mut self.columns[idx];

        if cells[0] != Cell::Empty {
            return Err(MoveError::ColumnFull);
        }

        // Deepest empty slot; gravity keeps every empty cell above it
        let row = cells
            .iter()
            .rposition(|&cell| cell == Cell::Empty)
            .ok_or(MoveError::ColumnFull)?;
        cells[row] = piece.to_cell();

        Ok(row)
    }

    /// Place a piece in a column (1..=7).
    ///
    /// Returns `Ok(false)` without touching the grid when the column is full,
    /// and `Err(MoveError::InvalidColumn)` when the column is out of range.
    pub fn place(&mut self, column: usize, piece: Piece) -> Result<bool, MoveError> {
        match self.drop_piece(column, piece) {
            Ok(_) => Ok(true),
            Err(MoveError::ColumnFull) => Ok(false),
            Err(err) => Err(err),
        }
    }

    /// Check if the board is completely full
    pub fn is_full(&self) -> bool {
        self.columns
            .iter()
            .all(|column| !column.contains(&Cell::Empty))
    }

    /// Check whether any piece has four in a row anywhere on the board.
    ///
    /// This does not know whose turn it is: a run of either piece counts.
    pub fn has_won(&self) -> bool {
        self.vertical() || self.horizontal() || self.diagonal(1) || self.diagonal(-1)
    }

    fn vertical(&self) -> bool {
        self.columns
            .iter()
            .any(|column| has_run(column.iter().copied()))
    }

    /// Horizontal lines are the columns of the transposed grid.
    fn horizontal(&self) -> bool {
        self.transpose()
            .iter()
            .any(|row| has_run(row.iter().copied()))
    }

    fn transpose(&self) -> [[Cell; COLS]; ROWS] {
        let mut rows = [[Cell::Empty; COLS]; ROWS];
        for (col, column) in self.columns.iter().enumerate() {
            for (row, &cell) in column.iter().enumerate() {
                rows[row][col] = cell;
            }
        }
        rows
    }

    /// `step` is the row change for every column moved to the right:
    /// +1 walks down-right (`\`), -1 walks up-right (`/`).
    fn diagonal(&self, step: isize) -> bool {
        (0..COLS).any(|col| (0..ROWS).any(|row| has_run(self.diagonal_from(col, row, step))))
    }

    fn diagonal_from(
        &self,
        col: usize,
        row: usize,
        step: isize,
    ) -> impl Iterator<Item = Cell> + '_ {
        (0..DIAGONAL_STEPS).map_while(move |k| {
            let c = col + k;
            let r = row.checked_add_signed(step * k as isize)?;
            (c < COLS && r < ROWS).then(|| self.columns[c][r])
        })
    }
}

/// Scan one line of cells for a run of `WIN_LENGTH` identical pieces.
///
/// An empty cell resets the run and adopts the following cell as the piece
/// to track; at the end of the line there is no following cell, so the
/// tracked piece becomes `Empty`.
fn has_run(cells: impl Iterator<Item = Cell>) -> bool {
    let mut cells = cells.peekable();
    let mut current = match cells.peek() {
        Some(&cell) => cell,
        None => return false,
    };
    let mut length = 0;

    while let Some(cell) = cells.next() {
        if cell == Cell::Empty {
            length = 0;
            current = cells.peek().copied().unwrap_or(Cell::Empty);
        } else if cell == current {
            length += 1;
            if length >= WIN_LENGTH {
                return true;
            }
        } else {
            length = 1;
            current = cell;
        }
    }

    false
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..ROWS {
            for col in 0..COLS {
                if col > 0 {
                    f.write_str("  ")?;
                }
                write!(f, "{}", self.get(row, col).symbol())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Parses six rows of seven cells, top row first. Whitespace inside a row and
/// blank lines are ignored, so the `Display` form parses back.
impl FromStr for Board {
    type Err = BoardParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rows: Vec<Vec<char>> = s
            .lines()
            .map(|line| line.chars().filter(|c| !c.is_whitespace()).collect::<Vec<_>>())
            .filter(|row| !row.is_empty())
            .collect();

        if rows.len() != ROWS {
            return Err(BoardParseError::RowCount(rows.len()));
        }

        let mut board = Board::new();
        for (row, cells) in rows.iter().enumerate() {
            if cells.len() != COLS {
                return Err(BoardParseError::RowLength {
                    row: row + 1,
                    len: cells.len(),
                });
            }
            for (col, &symbol) in cells.iter().enumerate() {
                board.columns[col][row] =
                    Cell::from_symbol(symbol).ok_or(BoardParseError::UnknownCell(symbol))?;
            }
        }

        for (col, column) in board.columns.iter().enumerate() {
            let settled = column
                .iter()
                .skip_while(|&&cell| cell == Cell::Empty)
                .all(|&cell| cell != Cell::Empty);
            if !settled {
                return Err(BoardParseError::FloatingPiece(col + 1));
            }
        }

        Ok(board)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Full board with no four in a row in any direction.
    const DRAWN: &str = "
        XXOOXXO
        OOXXOOX
        XXOOXXO
        OOXXOOX
        XXOOXXO
        OOXXOOX
    ";

    fn settled(board: &Board) -> bool {
        (1..=COLS).all(|column| {
            let idx = column - 1;
            let empty = (0..ROWS)
                .take_while(|&row| board.get(row, idx) == Cell::Empty)
                .count();
            empty + board.pieces_in_column(column) == ROWS
        })
    }

    #[test]
    fn test_new_board_is_empty() {
        let board = Board::new();
        for row in 0..ROWS {
            for col in 0..COLS {
                assert_eq!(board.get(row, col), Cell::Empty);
            }
        }
        assert!(!board.is_full());
        assert!(!board.has_won());
    }

    #[test]
    fn test_drop_piece() {
        let mut board = Board::new();

        // Drop first piece in column 4
        let row = board.drop_piece(4, Piece::X).unwrap();
        assert_eq!(row, 5); // Should land at bottom
        assert_eq!(board.get(5, 3), Cell::X);

        // Drop second piece in same column
        let row = board.drop_piece(4, Piece::O).unwrap();
        assert_eq!(row, 4); // Should land on top of first piece
        assert_eq!(board.get(4, 3), Cell::O);
    }

    #[test]
    fn test_place_adds_exactly_one_piece_and_keeps_gravity() {
        let mut board = Board::new();
        let mut piece = Piece::X;

        for round in 0..ROWS {
            for column in 1..=COLS {
                let before = board;
                assert_eq!(board.place(column, piece), Ok(true));
                assert_eq!(board.pieces_in_column(column), round + 1);
                for other in (1..=COLS).filter(|&c| c != column) {
                    assert_eq!(
                        board.pieces_in_column(other),
                        before.pieces_in_column(other)
                    );
                }
                assert!(settled(&board));
                piece = piece.other();
            }
        }
    }

    #[test]
    fn test_column_full() {
        let mut board = Board::new();

        // Fill column 1
        for _ in 0..ROWS {
            board.drop_piece(1, Piece::X).unwrap();
        }

        assert!(board.is_column_full(1));
        assert_eq!(board.drop_piece(1, Piece::O), Err(MoveError::ColumnFull));

        let before = board;
        assert_eq!(board.place(1, Piece::O), Ok(false));
        assert_eq!(board, before);
    }

    #[test]
    fn test_invalid_column() {
        let mut board = Board::new();
        assert_eq!(board.place(0, Piece::X), Err(MoveError::InvalidColumn));
        assert_eq!(board.place(8, Piece::X), Err(MoveError::InvalidColumn));
        assert_eq!(board, Board::new());
        assert!(board.is_column_full(8));
        assert_eq!(board.pieces_in_column(0), 0);
    }

    #[test]
    fn test_full_board() {
        let mut board = Board::new();
        for column in 1..=COLS {
            for _ in 0..ROWS {
                board.drop_piece(column, Piece::X).unwrap();
            }
        }
        assert!(board.is_full());
    }

    #[test]
    fn test_full_board_without_run_is_not_won() {
        let board: Board = DRAWN.parse().unwrap();
        assert!(board.is_full());
        assert!(!board.has_won());
    }

    #[test]
    fn test_full_board_can_also_be_won() {
        let mut board: Board = "
            XXOXXX-
            OOXXOOX
            XXOOXXO
            OOXXOOX
            XXOOXXO
            OOXXOOX
        "
        .parse()
        .unwrap();
        assert!(!board.has_won());

        assert_eq!(board.place(7, Piece::X), Ok(true));
        assert!(board.is_full());
        assert!(board.has_won());
    }

    #[test]
    fn test_vertical_win() {
        let mut board = Board::new();
        for placed in 1..=4 {
            board.place(4, Piece::X).unwrap();
            assert_eq!(board.has_won(), placed == 4);
        }
    }

    #[test]
    fn test_horizontal_win() {
        let mut board = Board::new();
        // Create horizontal line at bottom row
        for column in 1..=4 {
            board.place(column, Piece::X).unwrap();
        }
        assert!(board.has_won());
    }

    #[test]
    fn test_diagonal_up_win() {
        let mut board = Board::new();
        // Create diagonal / pattern from (col 1, bottom) to (col 4, row 3)
        board.place(1, Piece::X).unwrap();

        board.place(2, Piece::O).unwrap();
        board.place(2, Piece::X).unwrap();

        board.place(3, Piece::O).unwrap();
        board.place(3, Piece::O).unwrap();
        board.place(3, Piece::X).unwrap();

        board.place(4, Piece::O).unwrap();
        board.place(4, Piece::O).unwrap();
        board.place(4, Piece::O).unwrap();
        assert!(!board.has_won());

        board.place(4, Piece::X).unwrap();
        assert!(board.has_won());
    }

    #[test]
    fn test_diagonal_down_win() {
        let mut board = Board::new();
        // Create diagonal \ pattern
        board.place(7, Piece::O).unwrap();

        board.place(6, Piece::X).unwrap();
        board.place(6, Piece::O).unwrap();

        board.place(5, Piece::X).unwrap();
        board.place(5, Piece::X).unwrap();
        board.place(5, Piece::O).unwrap();

        board.place(4, Piece::X).unwrap();
        board.place(4, Piece::X).unwrap();
        board.place(4, Piece::X).unwrap();
        assert!(!board.has_won());

        board.place(4, Piece::O).unwrap();
        assert!(board.has_won());
    }

    #[test]
    fn test_no_win_with_three() {
        let mut board = Board::new();
        for column in 1..=3 {
            board.place(column, Piece::X).unwrap();
        }
        assert!(!board.has_won());
    }

    #[test]
    fn test_gap_breaks_run() {
        let board: Board = "
            -------
            -------
            -------
            -------
            -------
            XX-XX--
        "
        .parse()
        .unwrap();
        assert!(!board.has_won());
    }

    #[test]
    fn test_other_piece_breaks_run() {
        let board: Board = "
            -------
            -------
            X------
            O------
            X------
            X------
        "
        .parse()
        .unwrap();
        assert!(!board.has_won());

        let board: Board = "
            -------
            -------
            -------
            -------
            -------
            OXXXOXX
        "
        .parse()
        .unwrap();
        assert!(!board.has_won());
    }

    #[test]
    fn test_run_after_gap_still_counts() {
        let board: Board = "
            -------
            -------
            -------
            -------
            -------
            O--XXXX
        "
        .parse()
        .unwrap();
        assert!(board.has_won());
    }

    #[test]
    fn test_trailing_gap_is_guarded() {
        use Cell::{Empty, X};
        assert!(!has_run([X, X, X, Empty].into_iter()));
        assert!(!has_run([Empty].into_iter()));
        assert!(!has_run(std::iter::empty()));
        assert!(has_run([Empty, X, X, X, X, Empty].into_iter()));
    }

    #[test]
    fn test_scratch_copy_leaves_original_untouched() {
        let mut board = Board::new();
        board.place(3, Piece::X).unwrap();

        let mut scratch = board;
        scratch.place(3, Piece::O).unwrap();

        assert_eq!(board.pieces_in_column(3), 1);
        assert_eq!(scratch.pieces_in_column(3), 2);
    }

    #[test]
    fn test_display_parses_back() {
        let mut board = Board::new();
        board.place(1, Piece::X).unwrap();
        board.place(4, Piece::O).unwrap();
        board.place(4, Piece::X).unwrap();

        let text = board.to_string();
        assert!(text.ends_with("X  -  -  O  -  -  -\n"));
        assert_eq!(text.parse::<Board>(), Ok(board));
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(
            "-------".parse::<Board>(),
            Err(BoardParseError::RowCount(1))
        );
        assert_eq!(
            "------\n-------\n-------\n-------\n-------\n-------".parse::<Board>(),
            Err(BoardParseError::RowLength { row: 1, len: 6 })
        );
        assert_eq!(
            "-------\n-------\n-------\n-------\n-------\n---Z---".parse::<Board>(),
            Err(BoardParseError::UnknownCell('Z'))
        );
        assert_eq!(
            "-------\n-------\n-------\n-------\n--X----\n-------".parse::<Board>(),
            Err(BoardParseError::FloatingPiece(3))
        );
    }
}
