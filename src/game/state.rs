use tracing::{debug, info};

use super::{Board, Piece, COLS};
use crate::error::MoveError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOutcome {
    Winner(Piece),
    Draw,
}

/// Turn bookkeeping around a live board: whose move it is and how the game
/// ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Game {
    board: Board,
    to_move: Piece,
    outcome: Option<GameOutcome>,
}

impl Game {
    /// Create initial game state
    pub fn new() -> Self {
        Self::from_board(Board::new(), Piece::X) // X starts
    }

    /// Resume from an arbitrary position with `to_move` next.
    pub fn from_board(board: Board, to_move: Piece) -> Self {
        let outcome = if board.has_won() {
            // The side that just moved made the run.
            Some(GameOutcome::Winner(to_move.other()))
        } else if board.is_full() {
            Some(GameOutcome::Draw)
        } else {
            None
        };

        Game {
            board,
            to_move,
            outcome,
        }
    }

    /// Piece of the player whose turn it is
    pub fn to_move(&self) -> Piece {
        self.to_move
    }

    /// Get reference to board
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Get game outcome if game is over
    pub fn outcome(&self) -> Option<GameOutcome> {
        self.outcome
    }

    /// Check if game is over
    pub fn is_terminal(&self) -> bool {
        self.outcome.is_some()
    }

    /// Columns (1..=7) that can still take a piece
    pub fn legal_columns(&self) -> Vec<usize> {
        if self.is_terminal() {
            return Vec::new();
        }

        (1..=COLS)
            .filter(|&column| !self.board.is_column_full(column))
            .collect()
    }

    /// Place the current player's piece in `column` (1..=7).
    ///
    /// On success the win check runs before the full check, so a move that
    /// both fills the board and completes a run is a win. Only a game that
    /// continues hands the turn to the other piece.
    pub fn play(&mut self, column: usize) -> Result<Option<GameOutcome>, MoveError> {
        if self.is_terminal() {
            return Err(MoveError::GameOver);
        }

        let piece = self.to_move;
        if !self.board.place(column, piece)? {
            debug!(column, piece = ?piece, "placement rejected, column full");
            return Err(MoveError::ColumnFull);
        }
        debug!(column, piece = ?piece, "piece placed");

        if self.board.has_won() {
            self.outcome = Some(GameOutcome::Winner(piece));
        } else if self.board.is_full() {
            self.outcome = Some(GameOutcome::Draw);
        } else {
            self.to_move = piece.other();
        }

        if let Some(outcome) = self.outcome {
            info!(?outcome, "game over");
        }

        Ok(self.outcome)
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Cell;

    #[test]
    fn test_initial_state() {
        let game = Game::new();
        assert_eq!(game.to_move(), Piece::X);
        assert!(!game.is_terminal());
        assert_eq!(game.legal_columns(), vec![1, 2, 3, 4, 5, 6, 7]);
    }

    #[test]
    fn test_play_rotates_mover() {
        let mut game = Game::new();
        assert_eq!(game.play(4), Ok(None));

        assert_eq!(game.to_move(), Piece::O);
        assert_eq!(game.board().get(5, 3), Cell::X);
    }

    #[test]
    fn test_rejected_move_keeps_mover() {
        let mut game = Game::new();
        for _ in 0..6 {
            game.play(1).unwrap();
        }
        let before = game;

        assert_eq!(game.play(1), Err(MoveError::ColumnFull));
        assert_eq!(game.play(9), Err(MoveError::InvalidColumn));
        assert_eq!(game, before);
        assert_eq!(game.legal_columns(), vec![2, 3, 4, 5, 6, 7]);
    }

    #[test]
    fn test_win_detection() {
        let mut game = Game::new();

        // X wins with horizontal line
        for column in 1..=4 {
            game.play(column).unwrap(); // X
            if column < 4 {
                game.play(column).unwrap(); // O (row above)
            }
        }

        assert!(game.is_terminal());
        assert_eq!(game.outcome(), Some(GameOutcome::Winner(Piece::X)));
        assert_eq!(game.to_move(), Piece::X);
        assert!(game.legal_columns().is_empty());
        assert_eq!(game.play(5), Err(MoveError::GameOver));
    }

    #[test]
    fn test_draw() {
        let board: Board = "
            XXOOXX-
            OOXXOOX
            XXOOXXO
            OOXXOOX
            XXOOXXO
            OOXXOOX
        "
        .parse()
        .unwrap();
        let mut game = Game::from_board(board, Piece::O);
        assert!(!game.is_terminal());

        assert_eq!(game.play(7), Ok(Some(GameOutcome::Draw)));
    }

    #[test]
    fn test_win_outranks_full_board() {
        let board: Board = "
            XXOXXX-
            OOXXOOX
            XXOOXXO
            OOXXOOX
            XXOOXXO
            OOXXOOX
        "
        .parse()
        .unwrap();
        let mut game = Game::from_board(board, Piece::X);

        assert_eq!(game.play(7), Ok(Some(GameOutcome::Winner(Piece::X))));
        assert!(game.board().is_full());
    }

    #[test]
    fn test_from_won_board_is_terminal() {
        let board: Board = "
            -------
            -------
            -------
            -------
            -------
            OOOO---
        "
        .parse()
        .unwrap();
        let game = Game::from_board(board, Piece::X);
        assert_eq!(game.outcome(), Some(GameOutcome::Winner(Piece::O)));
    }
}
