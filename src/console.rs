//! Line-oriented console front end: mode prompt, board rendering, the turn
//! loop and end-of-game messages.

use std::io::{self, BufRead, Stdout, StdinLock, Write};

use tracing::info;

use crate::ai::{HumanSelector, MoveSelector};
use crate::config::{AppConfig, GameMode};
use crate::error::{GameError, MoveError};
use crate::game::{Board, Game, GameOutcome, Piece, Player};

/// Where prompts go and answers come from.
pub trait Console {
    /// Read one line without its line ending. `None` means the input is closed.
    fn read_line(&mut self) -> io::Result<Option<String>>;

    fn write(&mut self, text: &str) -> io::Result<()>;

    fn write_line(&mut self, text: &str) -> io::Result<()> {
        self.write(text)?;
        self.write("\n")
    }
}

/// A console over any buffered reader and writer.
pub struct TextConsole<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> TextConsole<R, W> {
    pub fn new(input: R, output: W) -> Self {
        TextConsole { input, output }
    }
}

impl TextConsole<StdinLock<'static>, Stdout> {
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R> TextConsole<R, Vec<u8>> {
    /// Everything written so far, for scripted sessions.
    pub fn into_output_string(self) -> String {
        String::from_utf8_lossy(&self.output).into_owned()
    }
}

impl<R: BufRead, W: Write> Console for TextConsole<R, W> {
    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    fn write(&mut self, text: &str) -> io::Result<()> {
        self.output.write_all(text.as_bytes())?;
        self.output.flush()
    }
}

/// The board as printed between turns, with column numbers on top.
pub fn render(board: &Board) -> String {
    format!("\n1  2  3  4  5  6  7\n{board}\n")
}

/// Ask whether player two is the computer (1) or another person (2).
pub fn prompt_game_mode(console: &mut dyn Console) -> Result<GameMode, GameError> {
    console.write_line(
        "Would you like to play against the computer (1), or against another player (2)?",
    )?;

    loop {
        let line = console.read_line()?.ok_or(GameError::InputClosed)?;
        match line.trim() {
            "1" => return Ok(GameMode::VsComputer),
            "2" => return Ok(GameMode::TwoPlayer),
            _ => console.write_line("Invalid input.  Please input a '1' or a '2'.")?,
        }
    }
}

/// A player together with whatever picks their moves.
pub struct Seat {
    player: Player,
    selector: Box<dyn MoveSelector>,
}

impl Seat {
    pub fn new(player: Player, selector: Box<dyn MoveSelector>) -> Self {
        Seat { player, selector }
    }

    pub fn player(&self) -> &Player {
        &self.player
    }
}

fn seat_index(piece: Piece) -> usize {
    match piece {
        Piece::X => 0,
        Piece::O => 1,
    }
}

/// One game: the live state plus the two seats, X first.
pub struct Session {
    game: Game,
    seats: [Seat; 2],
}

impl Session {
    /// Player one is always the human `X`; `mode` decides who plays `O`.
    pub fn new(mode: GameMode, config: &AppConfig) -> Self {
        let names = &config.game;
        let one = Seat::new(
            Player::human(names.player_one.as_str(), Piece::X),
            Box::new(HumanSelector::new(names.player_one.as_str())),
        );

        let two = match mode {
            GameMode::VsComputer => {
                let name = names.computer.as_str();
                Seat::new(
                    Player::computer(name, Piece::O),
                    Box::new(config.ai.selector(name, Piece::O)),
                )
            }
            GameMode::TwoPlayer => Seat::new(
                Player::human(names.player_two.as_str(), Piece::O),
                Box::new(HumanSelector::new(names.player_two.as_str())),
            ),
        };

        Self::with_seats(Game::new(), [one, two])
    }

    /// Seats may be given in either order; each plays its player's piece.
    pub fn with_seats(game: Game, mut seats: [Seat; 2]) -> Self {
        seats.sort_by_key(|seat| seat_index(seat.player.piece()));
        Session { game, seats }
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn seat(&self, piece: Piece) -> &Seat {
        &self.seats[seat_index(piece)]
    }

    /// Ask the player to move until a placement succeeds; returns the column
    /// played. Full columns are reported back to the selector and retried.
    pub fn take_turn(&mut self, console: &mut dyn Console) -> Result<usize, GameError> {
        if self.game.is_terminal() {
            return Err(MoveError::GameOver.into());
        }

        let seat = &mut self.seats[seat_index(self.game.to_move())];
        loop {
            let column = seat.selector.select_column(self.game.board(), console)?;
            match self.game.play(column) {
                Ok(_) => return Ok(column),
                Err(MoveError::ColumnFull) => seat.selector.column_rejected(column, console)?,
                Err(err) => return Err(err.into()),
            }
        }
    }

    /// Play to the end, printing the board before every turn and the result
    /// afterwards.
    pub fn run(&mut self, console: &mut dyn Console) -> Result<GameOutcome, GameError> {
        loop {
            console.write(&render(self.game.board()))?;
            self.take_turn(console)?;

            if let Some(outcome) = self.game.outcome() {
                console.write(&render(self.game.board()))?;
                console.write_line(&self.announcement(outcome))?;
                return Ok(outcome);
            }
        }
    }

    fn announcement(&self, outcome: GameOutcome) -> String {
        match outcome {
            GameOutcome::Winner(piece) => {
                format!("{} is the winner!", self.seat(piece).player().name())
            }
            GameOutcome::Draw => "The board is full, it's a draw!".to_string(),
        }
    }
}

/// Run a whole console game: pick the mode (prompting if the config leaves
/// it open), then play it out.
pub fn play(config: &AppConfig, console: &mut dyn Console) -> Result<GameOutcome, GameError> {
    let mode = match config.game.mode {
        Some(mode) => mode,
        None => prompt_game_mode(console)?,
    };
    info!(?mode, "starting game");

    let mut session = Session::new(mode, config);
    session.run(console)
}
