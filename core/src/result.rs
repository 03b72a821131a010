use core::fmt;
use serde::{Deserialize, Serialize};

use crate::*;

/// Snapshot of a finished game.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameResult {
    is_win: bool,
    duration_millis: u64,
    remaining_mines: i32,
    total_revealed: CellCount,
}

impl GameResult {
    pub const fn new(
        is_win: bool,
        duration_millis: u64,
        remaining_mines: i32,
        total_revealed: CellCount,
    ) -> Self {
        Self {
            is_win,
            duration_millis,
            remaining_mines,
            total_revealed,
        }
    }

    pub const fn victory(duration_millis: u64, remaining_mines: i32, total_revealed: CellCount) -> Self {
        Self::new(true, duration_millis, remaining_mines, total_revealed)
    }

    pub const fn defeat(duration_millis: u64, remaining_mines: i32, total_revealed: CellCount) -> Self {
        Self::new(false, duration_millis, remaining_mines, total_revealed)
    }

    pub const fn is_win(&self) -> bool {
        self.is_win
    }

    pub const fn duration_millis(&self) -> u64 {
        self.duration_millis
    }

    /// Total mines minus flags placed; negative when over-flagged.
    pub const fn remaining_mines(&self) -> i32 {
        self.remaining_mines
    }

    /// Includes the mine that was hit in a lost game.
    pub const fn total_revealed(&self) -> CellCount {
        self.total_revealed
    }
}

impl fmt::Display for GameResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let outcome = if self.is_win { "WIN" } else { "LOSS" };
        let seconds = self.duration_millis as f64 / 1000.0;
        write!(
            f,
            "{outcome}, time={seconds:.1}s, revealed={}",
            self.total_revealed
        )
    }
}
