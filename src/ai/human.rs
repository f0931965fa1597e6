use crate::console::Console;
use crate::error::GameError;
use crate::game::{Board, COLS};

use super::selector::MoveSelector;

/// Asks a person at the console for a column.
pub struct HumanSelector {
    name: String,
    /// Set after a full-column rejection; the next read continues the same
    /// turn without prompting again.
    retrying: bool,
}

impl HumanSelector {
    pub fn new(name: impl Into<String>) -> Self {
        HumanSelector {
            name: name.into(),
            retrying: false,
        }
    }
}

/// Parse a console answer into a column number, rejecting anything outside
/// 1..=7.
fn parse_column(input: &str) -> Option<usize> {
    input
        .trim()
        .parse::<usize>()
        .ok()
        .filter(|column| (1..=COLS).contains(column))
}

impl MoveSelector for HumanSelector {
    fn select_column(
        &mut self,
        _board: &Board,
        console: &mut dyn Console,
    ) -> Result<usize, GameError> {
        if !std::mem::take(&mut self.retrying) {
            console.write(&format!(
                "{}, which column would you like to play your piece? ",
                self.name
            ))?;
        }

        loop {
            let line = console.read_line()?.ok_or(GameError::InputClosed)?;
            match parse_column(&line) {
                Some(column) => return Ok(column),
                None => console.write_line("You must choose a column between 1 and 7.")?,
            }
        }
    }

    fn column_rejected(
        &mut self,
        _column: usize,
        console: &mut dyn Console,
    ) -> Result<(), GameError> {
        console.write_line("This column is full.  Choose another column.")?;
        self.retrying = true;
        Ok(())
    }

    fn name(&self) -> &str {
        &self.name
    }
}
