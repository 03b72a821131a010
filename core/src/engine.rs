use alloc::collections::VecDeque;
use core::time::Duration;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use web_time::Instant;

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameState {
    Ready,
    Playing,
    Won,
    Lost,
}

impl GameState {
    pub const fn is_ready(self) -> bool {
        matches!(self, Self::Ready)
    }

    pub const fn is_playing(self) -> bool {
        matches!(self, Self::Playing)
    }

    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::Ready
    }
}

/// Drives one game on one board.
///
/// Mines are placed by the generator on the first reveal or chord, so the
/// first opened cell and its neighbors are always safe. After that the engine
/// accepts reveals, marks and chords until the game is won or lost.
#[derive(Clone, Debug)]
pub struct GameEngine<G> {
    board: Board,
    generator: G,
    state: GameState,
    question_marks: bool,
    first_click_pending: bool,
    start_time: Option<Instant>,
    end_time: Option<Instant>,
    flagged_mines_count: CellCount,
    triggered_mine: Option<Coord2>,
}

impl<G: MapGenerator> GameEngine<G> {
    pub fn new(board: Board, generator: G) -> Self {
        Self {
            board,
            generator,
            state: Default::default(),
            question_marks: true,
            first_click_pending: true,
            start_time: None,
            end_time: None,
            flagged_mines_count: 0,
            triggered_mine: None,
        }
    }

    pub fn from_config(config: GameConfig, generator: G) -> Result<Self> {
        let board = Board::from_config(&config)?;
        Ok(Self::new(board, generator).with_question_marks(config.question_marks))
    }

    /// Whether [`GameEngine::cycle_mark`] goes through the question mark.
    pub fn with_question_marks(mut self, enabled: bool) -> Self {
        self.question_marks = enabled;
        self
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_finished()
    }

    pub fn question_marks(&self) -> bool {
        self.question_marks
    }

    pub fn config(&self) -> GameConfig {
        GameConfig::new_unchecked(self.board.size(), self.board.total_mines())
            .with_question_marks(self.question_marks)
    }

    /// Total mines minus placed flags, for a mine counter display.
    pub fn remaining_mines(&self) -> i32 {
        i32::from(self.board.total_mines()) - i32::from(self.flagged_mines_count)
    }

    /// The mine that ended the game, if it was lost.
    pub fn triggered_mine(&self) -> Option<Coord2> {
        self.triggered_mine
    }

    pub fn elapsed(&self) -> Duration {
        match (self.start_time, self.end_time) {
            (Some(start), Some(end)) => end.duration_since(start),
            (Some(start), None) => start.elapsed(),
            _ => Duration::ZERO,
        }
    }

    pub fn elapsed_millis(&self) -> u64 {
        self.elapsed().as_millis().try_into().unwrap_or(u64::MAX)
    }

    /// Places mines around the first click and moves to [`GameState::Playing`].
    ///
    /// Called implicitly by the first [`reveal`](Self::reveal) or
    /// [`chord`](Self::chord). The board must still be blank. The generator
    /// works on a copy of it, which is only kept once the first click safety and
    /// mine count check out.
    pub fn start_game(&mut self, coords: Coord2) -> Result<()> {
        if !self.state.is_ready() || !self.first_click_pending {
            return Err(GameError::AlreadyStarted);
        }
        let coords = self.board.validate_coords(coords)?;
        if !self.board.is_blank() {
            log::warn!("Refusing to start a game on a board that was already played");
            return Err(GameError::BoardNotBlank);
        }

        let start_time = Instant::now();
        let mut board = self.board.clone();
        self.generator
            .generate(&mut MinePlacer::new(&mut board), coords)?;
        Self::verify_generated(&board, coords)?;
        board.calculate_numbers();

        self.board = board;
        self.start_time = Some(start_time);
        self.first_click_pending = false;
        self.state = GameState::Playing;
        log::debug!(
            "Game started at {:?} on a {:?} board with {} mines",
            coords,
            self.board.size(),
            self.board.total_mines()
        );
        Ok(())
    }

    /// Opens a cell. Returns `false` without changing anything when the cell is
    /// already revealed or flagged.
    pub fn reveal(&mut self, coords: Coord2) -> Result<bool> {
        let coords = self.board.validate_coords(coords)?;
        if self.first_click_pending {
            self.start_game(coords)?;
        }
        self.check_playing()?;

        let cell = self.board[coords];
        if !cell.is_revealable() {
            return Ok(false);
        }

        if cell.is_mine() {
            self.reveal_cell(coords);
            self.triggered_mine = Some(coords);
            self.finish(GameState::Lost);
            return Ok(true);
        }

        if cell.neighbor_mine_count() == 0 {
            self.flood_fill(coords);
        } else {
            self.reveal_cell(coords);
        }
        self.check_win();
        Ok(true)
    }

    /// Cycles the mark on a hidden cell, through the question mark if enabled.
    pub fn cycle_mark(&mut self, coords: Coord2) -> Result<MarkState> {
        self.apply_mark(coords, self.question_marks)
    }

    /// Flag toggle that never produces a question mark.
    pub fn toggle_flag(&mut self, coords: Coord2) -> Result<MarkState> {
        self.apply_mark(coords, false)
    }

    /// Opens every hidden, unflagged neighbor of a revealed number once the
    /// flags around it match the number.
    ///
    /// With a mismatched flag count nothing happens and `false` is returned. A
    /// mine hit along the way ends the game and stops the chord. Returns `true`
    /// if any neighbor was opened.
    pub fn chord(&mut self, coords: Coord2) -> Result<bool> {
        let coords = self.board.validate_coords(coords)?;
        if self.first_click_pending {
            self.start_game(coords)?;
        }
        self.check_playing()?;

        let target = self.board[coords];
        if !target.is_revealed() {
            return Err(GameError::CellNotRevealed(coords));
        }
        if target.is_mine() {
            return Err(GameError::ChordOnMine(coords));
        }

        let flagged = self
            .board
            .iter_neighbors(coords)
            .filter(|&pos| self.board[pos].is_flagged())
            .count();
        if flagged != usize::from(target.neighbor_mine_count()) {
            log::debug!(
                "Chord at {:?} skipped, {} flags around a {}",
                coords,
                flagged,
                target.neighbor_mine_count()
            );
            return Ok(false);
        }

        let targets: SmallVec<[Coord2; 8]> = self
            .board
            .iter_neighbors(coords)
            .filter(|&pos| self.board[pos].is_revealable())
            .collect();

        let mut revealed_any = false;
        for pos in targets {
            // an earlier flood fill may already have opened this one
            revealed_any |= self.reveal(pos)?;
            if self.state.is_finished() {
                break;
            }
        }
        Ok(revealed_any)
    }

    pub fn game_result(&self) -> Result<GameResult> {
        if !self.state.is_finished() {
            return Err(GameError::NotFinished);
        }
        let remaining_mines =
            i32::from(self.board.total_mines()) - i32::from(self.board.flagged_count());
        Ok(GameResult::new(
            matches!(self.state, GameState::Won),
            self.elapsed_millis(),
            remaining_mines,
            self.board.revealed_count(),
        ))
    }

    fn apply_mark(&mut self, coords: Coord2, question_enabled: bool) -> Result<MarkState> {
        self.check_playing()?;
        let coords = self.board.validate_coords(coords)?;

        let cell = self.board.cell_mut(coords);
        let was_flagged = cell.is_flagged();
        let mark = cell
            .cycle_mark(question_enabled)
            .ok_or(GameError::CellRevealed(coords))?;

        match (was_flagged, mark == MarkState::Flagged) {
            (false, true) => {
                self.board.increment_flagged_count();
                self.flagged_mines_count += 1;
            }
            (true, false) => {
                self.board.decrement_flagged_count();
                self.flagged_mines_count = self.flagged_mines_count.saturating_sub(1);
            }
            _ => {}
        }
        Ok(mark)
    }

    /// Breadth-first reveal from a zero cell. Revealed and flagged cells are
    /// skipped when dequeued, so duplicates in the queue are harmless.
    fn flood_fill(&mut self, origin: Coord2) {
        let mut frontier = VecDeque::from([origin]);
        let mut opened = 0usize;

        while let Some(coords) = frontier.pop_front() {
            if !self.reveal_cell(coords) {
                continue;
            }
            opened += 1;

            if self.board[coords].neighbor_mine_count() == 0 {
                frontier.extend(
                    self.board
                        .iter_neighbors(coords)
                        .filter(|&pos| self.board[pos].is_revealable()),
                );
            }
        }

        log::trace!("Flood fill from {:?} opened {} cells", origin, opened);
    }

    fn reveal_cell(&mut self, coords: Coord2) -> bool {
        let revealed = self.board.cell_mut(coords).reveal();
        if revealed {
            self.board.increment_revealed_count();
        }
        revealed
    }

    fn check_win(&mut self) {
        if self.state.is_playing() && self.board.revealed_count() == self.board.safe_cell_count() {
            self.finish(GameState::Won);
        }
    }

    fn finish(&mut self, state: GameState) {
        self.state = state;
        self.end_time = Some(Instant::now());
        log::debug!(
            "Game over: {:?} after {} ms, {} cells revealed",
            state,
            self.elapsed_millis(),
            self.board.revealed_count()
        );
    }

    fn check_playing(&self) -> Result<()> {
        if self.state.is_playing() {
            Ok(())
        } else {
            Err(GameError::NotPlaying(self.state))
        }
    }

    fn verify_generated(board: &Board, first_click: Coord2) -> Result<()> {
        let unsafe_cell = core::iter::once(first_click)
            .chain(board.iter_neighbors(first_click))
            .find(|&pos| board[pos].is_mine());
        if let Some(pos) = unsafe_cell {
            log::error!("Map generator put a mine at {:?}, next to first click {:?}", pos, first_click);
            return Err(GameError::UnsafeFirstClick(pos));
        }

        let actual = board.mine_count();
        if actual != board.total_mines() {
            log::error!(
                "Map generator placed {} mines, expected {}",
                actual,
                board.total_mines()
            );
            return Err(GameError::MineCountMismatch {
                expected: board.total_mines(),
                actual,
            });
        }
        Ok(())
    }
}
