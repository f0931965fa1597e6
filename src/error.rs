use std::path::PathBuf;

/// Reasons a placement can be rejected. None of these are fatal: the turn
/// loop recovers from each by asking for another column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("column must be between 1 and 7")]
    InvalidColumn,

    #[error("column is full")]
    ColumnFull,

    #[error("game is already over")]
    GameOver,
}

/// Errors that can occur when parsing a board from text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoardParseError {
    #[error("expected 6 rows, found {0}")]
    RowCount(usize),

    #[error("row {row} has {len} cells, expected 7")]
    RowLength { row: usize, len: usize },

    #[error("unknown cell '{0}' (expected '-', 'X' or 'O')")]
    UnknownCell(char),

    #[error("column {0} has a piece above an empty cell")]
    FloatingPiece(usize),
}

/// Errors that can occur while running a game session.
#[derive(Debug, thiserror::Error)]
pub enum GameError {
    #[error("console I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("input closed before the game finished")]
    InputClosed,

    #[error("illegal move: {0}")]
    Move(#[from] MoveError),
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("config validation error: {0}")]
    Validation(String),
}
