use crate::console::Console;
use crate::error::GameError;
use crate::game::Board;

/// Universal interface for anything that picks columns for a player.
///
/// Selectors only read the board. The turn loop owns placement and calls
/// back into the selector when the chosen column was full.
pub trait MoveSelector {
    /// Pick a column (1..=7) for the given position. Humans are asked through
    /// the console; computer selectors ignore it.
    fn select_column(
        &mut self,
        board: &Board,
        console: &mut dyn Console,
    ) -> Result<usize, GameError>;

    /// Called when the column returned by `select_column` was full.
    fn column_rejected(
        &mut self,
        _column: usize,
        _console: &mut dyn Console,
    ) -> Result<(), GameError> {
        Ok(())
    }

    /// Return the selector's display name.
    fn name(&self) -> &str;
}
