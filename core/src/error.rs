use thiserror::Error;

use crate::{CellCount, Coord2, GameState};

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Board must have at least one row and one column")]
    EmptyBoard,
    #[error("Too many mines, the board needs at least one safe cell")]
    TooManyMines,
    #[error("Coordinates {0:?} are out of bounds")]
    OutOfBounds(Coord2),
    #[error("Game already started")]
    AlreadyStarted,
    #[error("Game is not in playing state (currently {0:?})")]
    NotPlaying(GameState),
    #[error("Board has already been played on, a new game needs a blank board")]
    BoardNotBlank,
    #[error("Cannot cycle mark on revealed cell {0:?}")]
    CellRevealed(Coord2),
    #[error("Cell {0:?} must be revealed before chording")]
    CellNotRevealed(Coord2),
    #[error("Cannot chord on the mine at {0:?}")]
    ChordOnMine(Coord2),
    #[error("Game is not finished")]
    NotFinished,
    #[error("Generator placed a mine at {0:?}, inside the first click safe zone")]
    UnsafeFirstClick(Coord2),
    #[error("Generator placed {actual} mines, expected {expected}")]
    MineCountMismatch {
        expected: CellCount,
        actual: CellCount,
    },
}

/// Coarse classification so callers can map errors to different messaging.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// Rejected board or game parameters.
    InvalidArgument,
    /// Coordinates outside the board.
    OutOfBounds,
    /// Operation not allowed in the current game or cell state.
    InvalidState,
    /// The map generator broke its contract; this is a bug in the generator.
    ContractViolation,
}

impl GameError {
    pub const fn kind(self) -> ErrorKind {
        use GameError::*;
        match self {
            EmptyBoard | TooManyMines | BoardNotBlank => ErrorKind::InvalidArgument,
            OutOfBounds(_) => ErrorKind::OutOfBounds,
            AlreadyStarted | NotPlaying(_) | CellRevealed(_) | CellNotRevealed(_) | ChordOnMine(_)
            | NotFinished => ErrorKind::InvalidState,
            UnsafeFirstClick(_) | MineCountMismatch { .. } => ErrorKind::ContractViolation,
        }
    }
}

pub type Result<T> = core::result::Result<T, GameError>;
