use crate::ai::LookaheadSelector;
use crate::config::{AppConfig, GameMode};
use crate::error::MoveError;
use crate::game::{Game, GameOutcome, Piece, COLS};
use crossterm::event::{self, Event, KeyCode, KeyEvent};
use ratatui::{backend::Backend, Terminal};
use std::io;
use tracing::debug;

pub struct App {
    config: AppConfig,
    game: Game,
    selected_column: usize,
    /// Plays `O` when present
    computer: Option<LookaheadSelector>,
    should_quit: bool,
    message: Option<String>,
}

impl App {
    pub fn new(config: AppConfig, mode: GameMode) -> Self {
        let computer = match mode {
            GameMode::VsComputer => Some(Self::computer_for(&config)),
            GameMode::TwoPlayer => None,
        };

        App {
            config,
            game: Game::new(),
            selected_column: 4, // Start in middle
            computer,
            should_quit: false,
            message: None,
        }
    }

    fn computer_for(config: &AppConfig) -> LookaheadSelector {
        config.ai.selector(&config.game.computer, Piece::O)
    }

    /// Main application loop
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            self.handle_events()?;
        }
        Ok(())
    }

    /// Handle keyboard events
    fn handle_events(&mut self) -> io::Result<()> {
        if event::poll(std::time::Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                self.handle_key(key);
            }
        }
        Ok(())
    }

    /// Handle key press
    fn handle_key(&mut self, key: KeyEvent) {
        // Clear message on any key press
        self.message = None;

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Left => {
                if self.selected_column > 1 {
                    self.selected_column -= 1;
                }
            }
            KeyCode::Right => {
                if self.selected_column < COLS {
                    self.selected_column += 1;
                }
            }
            KeyCode::Char(c @ '1'..='7') => {
                self.selected_column = c as usize - '0' as usize;
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                self.drop_piece();
            }
            KeyCode::Char('r') => {
                // Reset game
                self.game = Game::new();
                self.selected_column = 4;
                self.message = Some("New game started!".to_string());
            }
            KeyCode::Char('c') => {
                self.toggle_computer();
            }
            _ => {}
        }
    }

    fn toggle_computer(&mut self) {
        if self.computer.take().is_some() {
            self.message = Some("Two-player mode".to_string());
        } else {
            self.computer = Some(Self::computer_for(&self.config));
            self.message = Some(format!("Playing against {}", self.config.game.computer));
            // O may already be waiting to move
            self.computer_move();
        }
    }

    /// Drop the current player's piece in the selected column
    fn drop_piece(&mut self) {
        if self.game.is_terminal() {
            self.message = Some("Game over! Press 'r' to restart.".to_string());
            return;
        }

        match self.game.play(self.selected_column) {
            Ok(None) => self.computer_move(),
            Ok(Some(outcome)) => self.announce(outcome),
            Err(MoveError::ColumnFull) => {
                self.message = Some("This column is full.  Choose another column.".to_string());
            }
            Err(MoveError::InvalidColumn) => {
                self.message = Some("You must choose a column between 1 and 7.".to_string());
            }
            Err(MoveError::GameOver) => {
                self.message = Some("Game is over!".to_string());
            }
        }
    }

    /// Let the computer reply if it is its turn. Full columns from the random
    /// fallback are retried; a live game always has an open column.
    fn computer_move(&mut self) {
        let Some(computer) = self.computer.as_mut() else {
            return;
        };
        if self.game.is_terminal() || self.game.to_move() != computer.piece() {
            return;
        }

        loop {
            let column = computer.choose_column(self.game.board());
            match self.game.play(column) {
                Ok(outcome) => {
                    if let Some(outcome) = outcome {
                        self.announce(outcome);
                    }
                    return;
                }
                Err(MoveError::ColumnFull) => {
                    debug!(column, "computer picked a full column, retrying");
                }
                Err(_) => return,
            }
        }
    }

    fn announce(&mut self, outcome: GameOutcome) {
        self.message = Some(match outcome {
            GameOutcome::Winner(piece) => format!("{} is the winner!", self.name_of(piece)),
            GameOutcome::Draw => "The board is full, it's a draw!".to_string(),
        });
    }

    fn name_of(&self, piece: Piece) -> &str {
        let names = &self.config.game;
        match piece {
            Piece::X => names.player_one.as_str(),
            Piece::O if self.computer.is_some() => names.computer.as_str(),
            Piece::O => names.player_two.as_str(),
        }
    }

    fn mode_label(&self) -> String {
        if self.computer.is_some() {
            format!("vs {}", self.config.game.computer)
        } else {
            "Two players".to_string()
        }
    }

    /// Render the UI
    fn render(&self, frame: &mut ratatui::Frame) {
        let current = self.name_of(self.game.to_move());
        super::game_view::render(
            frame,
            &self.game,
            current,
            self.selected_column,
            &self.message,
            &self.mode_label(),
        );
    }
}
