#![no_std]

extern crate alloc;

use serde::{Deserialize, Serialize};

pub use board::*;
pub use cell::*;
pub use engine::*;
pub use error::*;
pub use generator::*;
pub use result::*;
pub use types::*;

mod board;
mod cell;
mod engine;
mod error;
mod generator;
mod result;
mod types;

/// Board dimensions, mine count and marking behavior for one game.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub size: Coord2,
    pub mines: CellCount,
    #[serde(default = "question_marks_default")]
    pub question_marks: bool,
}

const fn question_marks_default() -> bool {
    true
}

impl GameConfig {
    pub const fn new_unchecked(size: Coord2, mines: CellCount) -> Self {
        Self {
            size,
            mines,
            question_marks: question_marks_default(),
        }
    }

    /// Fails like [`Board::new`] would: the board needs at least one cell and
    /// at least one safe cell.
    pub fn new(size: Coord2, mines: CellCount) -> Result<Self> {
        if size.0 == 0 || size.1 == 0 {
            return Err(GameError::EmptyBoard);
        }
        if mines >= mult(size.0, size.1) {
            return Err(GameError::TooManyMines);
        }
        Ok(Self::new_unchecked(size, mines))
    }

    pub const fn with_question_marks(mut self, enabled: bool) -> Self {
        self.question_marks = enabled;
        self
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.size.0, self.size.1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_validates_like_board() {
        assert_eq!(GameConfig::new((0, 9), 1), Err(GameError::EmptyBoard));
        assert_eq!(GameConfig::new((3, 3), 9), Err(GameError::TooManyMines));

        let config = GameConfig::new((16, 30), 99).unwrap();
        assert_eq!(config.total_cells(), 480);
        assert!(config.question_marks);
    }

    #[test]
    fn config_json_defaults_question_marks() {
        let config: GameConfig = serde_json::from_str(r#"{"size":[9,9],"mines":10}"#).unwrap();

        assert_eq!(config, GameConfig::new((9, 9), 10).unwrap());

        let json = serde_json::to_string(&config.with_question_marks(false)).unwrap();
        assert_eq!(json, r#"{"size":[9,9],"mines":10,"question_marks":false}"#);
    }
}
