use rand::rngs::StdRng;
use rand::Rng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::console::Console;
use crate::error::GameError;
use crate::game::{Board, Piece, COLS};

use super::selector::MoveSelector;

/// Order in which the lookahead looks for winning and blocking columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Priority {
    /// Per column, ascending: test the own win, then the block. A block in a
    /// lower column is chosen over a win in a higher one.
    #[default]
    Interleaved,
    /// Any own win first, then any block.
    PreferWin,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Threat {
    Win,
    Block,
}

/// The computer opponent: one ply of lookahead, otherwise a random column.
pub struct LookaheadSelector {
    name: String,
    piece: Piece,
    priority: Priority,
    rng: StdRng,
}

impl LookaheadSelector {
    pub fn new(name: impl Into<String>, piece: Piece, priority: Priority) -> Self {
        Self::with_rng(name, piece, priority, StdRng::from_os_rng())
    }

    /// Same as `new`, with a reproducible random fallback.
    pub fn with_seed(name: impl Into<String>, piece: Piece, priority: Priority, seed: u64) -> Self {
        Self::with_rng(name, piece, priority, StdRng::seed_from_u64(seed))
    }

    fn with_rng(name: impl Into<String>, piece: Piece, priority: Priority, rng: StdRng) -> Self {
        LookaheadSelector {
            name: name.into(),
            piece,
            priority,
            rng,
        }
    }

    pub fn piece(&self) -> Piece {
        self.piece
    }

    /// Pick a column for `board` without mutating it.
    ///
    /// The random fallback ignores fullness; the caller retries on a full
    /// column.
    pub fn choose_column(&mut self, board: &Board) -> usize {
        if let Some((column, threat)) = self.forced_column(board) {
            debug!(column, ?threat, piece = ?self.piece, "lookahead found a forcing column");
            return column;
        }

        let column = self.rng.random_range(1..=COLS);
        debug!(column, piece = ?self.piece, "no forcing column, playing at random");
        column
    }

    fn forced_column(&self, board: &Board) -> Option<(usize, Threat)> {
        let own = self.piece;
        let opponent = own.other();

        match self.priority {
            Priority::Interleaved => (1..=COLS).find_map(|column| {
                if wins_after(board, column, own) {
                    Some((column, Threat::Win))
                } else if wins_after(board, column, opponent) {
                    Some((column, Threat::Block))
                } else {
                    None
                }
            }),
            Priority::PreferWin => (1..=COLS)
                .find(|&column| wins_after(board, column, own))
                .map(|column| (column, Threat::Win))
                .or_else(|| {
                    (1..=COLS)
                        .find(|&column| wins_after(board, column, opponent))
                        .map(|column| (column, Threat::Block))
                }),
        }
    }
}

/// Drop `piece` into `column` on a scratch copy and report whether the copy
/// is won. Full columns never win.
fn wins_after(board: &Board, column: usize, piece: Piece) -> bool {
    let mut scratch = *board;
    matches!(scratch.place(column, piece), Ok(true)) && scratch.has_won()
}

impl MoveSelector for LookaheadSelector {
    fn select_column(
        &mut self,
        board: &Board,
        _console: &mut dyn Console,
    ) -> Result<usize, GameError> {
        Ok(self.choose_column(board))
    }

    fn column_rejected(
        &mut self,
        column: usize,
        _console: &mut dyn Console,
    ) -> Result<(), GameError> {
        debug!(column, "computer picked a full column, retrying");
        Ok(())
    }

    fn name(&self) -> &str {
        &self.name
    }
}
