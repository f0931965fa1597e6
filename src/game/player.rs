use super::board::Cell;

/// One of the two markers placed on the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Piece {
    X,
    O,
}

impl Piece {
    /// Get the other piece
    pub fn other(self) -> Piece {
        match self {
            Piece::X => Piece::O,
            Piece::O => Piece::X,
        }
    }

    /// Convert piece to cell type
    pub fn to_cell(self) -> Cell {
        match self {
            Piece::X => Cell::X,
            Piece::O => Cell::O,
        }
    }

    /// Marker used when rendering the board
    pub fn marker(self) -> char {
        match self {
            Piece::X => 'X',
            Piece::O => 'O',
        }
    }
}

/// Who decides a player's moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerKind {
    Human,
    Computer,
}

/// A side in the game: its piece, display name and behavior tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    name: String,
    piece: Piece,
    kind: PlayerKind,
}

impl Player {
    pub fn new(name: impl Into<String>, piece: Piece, kind: PlayerKind) -> Self {
        Player {
            name: name.into(),
            piece,
            kind,
        }
    }

    pub fn human(name: impl Into<String>, piece: Piece) -> Self {
        Self::new(name, piece, PlayerKind::Human)
    }

    pub fn computer(name: impl Into<String>, piece: Piece) -> Self {
        Self::new(name, piece, PlayerKind::Computer)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn piece(&self) -> Piece {
        self.piece
    }

    pub fn kind(&self) -> PlayerKind {
        self.kind
    }
}
