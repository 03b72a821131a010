use core::ops::Index;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Fixed-size grid of cells plus the revealed/flagged counters.
///
/// The counters are kept in lockstep with the cells by the engine, never
/// recomputed by scanning. Outside the crate a board is read-only.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Board {
    cells: Array2<Cell>,
    total_mines: CellCount,
    revealed_count: CellCount,
    flagged_count: CellCount,
}

impl Board {
    pub fn new(rows: Coord, cols: Coord, total_mines: CellCount) -> Result<Self> {
        if rows == 0 || cols == 0 {
            return Err(GameError::EmptyBoard);
        }
        if total_mines >= mult(rows, cols) {
            return Err(GameError::TooManyMines);
        }

        Ok(Self {
            cells: Array2::default((rows, cols).to_nd_index()),
            total_mines,
            revealed_count: 0,
            flagged_count: 0,
        })
    }

    pub fn from_config(config: &GameConfig) -> Result<Self> {
        Self::new(config.size.0, config.size.1, config.mines)
    }

    pub fn rows(&self) -> Coord {
        self.size().0
    }

    pub fn cols(&self) -> Coord {
        self.size().1
    }

    pub fn size(&self) -> Coord2 {
        let (rows, cols) = self.cells.dim();
        // dimensions come from `Coord` values in `new`
        (rows as Coord, cols as Coord)
    }

    pub fn total_cells(&self) -> CellCount {
        let (rows, cols) = self.size();
        mult(rows, cols)
    }

    pub fn total_mines(&self) -> CellCount {
        self.total_mines
    }

    pub fn safe_cell_count(&self) -> CellCount {
        self.total_cells() - self.total_mines
    }

    pub fn revealed_count(&self) -> CellCount {
        self.revealed_count
    }

    pub fn flagged_count(&self) -> CellCount {
        self.flagged_count
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        if in_bounds(coords, self.size()) {
            Ok(coords)
        } else {
            Err(GameError::OutOfBounds(coords))
        }
    }

    pub fn cell(&self, coords: Coord2) -> Result<&Cell> {
        let coords = self.validate_coords(coords)?;
        Ok(&self[coords])
    }

    /// In-bounds neighbor positions of `coords`, in row-major order.
    pub fn neighbors(&self, coords: Coord2) -> Result<Neighbors> {
        let coords = self.validate_coords(coords)?;
        Ok(self.iter_neighbors(coords))
    }

    pub fn neighbor_cells(&self, coords: Coord2) -> Result<impl Iterator<Item = (Coord2, &Cell)>> {
        Ok(self.neighbors(coords)?.map(|pos| (pos, &self[pos])))
    }

    /// All cells in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Coord2, &Cell)> {
        self.cells
            .indexed_iter()
            .map(|((row, col), cell)| ((row as Coord, col as Coord), cell))
    }

    /// Number of mines actually on the board, counted by scanning.
    pub fn mine_count(&self) -> CellCount {
        // bounded by the cell count, which fits `CellCount`
        self.cells.iter().filter(|cell| cell.is_mine()).count() as CellCount
    }

    /// Nothing placed, opened or marked yet, as returned by [`Board::new`].
    pub fn is_blank(&self) -> bool {
        self.revealed_count == 0
            && self.flagged_count == 0
            && self.cells.iter().all(|cell| *cell == Cell::default())
    }

    /// Sets every non-mine cell's neighbor mine count. Safe to call again, the
    /// result only depends on mine placement.
    pub fn calculate_numbers(&mut self) {
        let size = self.size();
        for row in 0..size.0 {
            for col in 0..size.1 {
                let coords = (row, col);
                if self[coords].is_mine() {
                    continue;
                }
                let count = Neighbors::new(coords, size)
                    .filter(|&pos| self[pos].is_mine())
                    .count();
                // at most 8
                self.cell_mut(coords).set_neighbor_mine_count(count as u8);
            }
        }
    }

    pub(crate) fn iter_neighbors(&self, coords: Coord2) -> Neighbors {
        Neighbors::new(coords, self.size())
    }

    /// Panics on out-of-bounds coordinates; callers validate first.
    pub(crate) fn cell_mut(&mut self, coords: Coord2) -> &mut Cell {
        &mut self.cells[coords.to_nd_index()]
    }

    /// Returns whether a mine was newly placed.
    pub(crate) fn place_mine(&mut self, coords: Coord2) -> Result<bool> {
        let coords = self.validate_coords(coords)?;
        let cell = self.cell_mut(coords);
        if cell.is_mine() {
            return Ok(false);
        }
        cell.set_mine(true);
        Ok(true)
    }

    pub(crate) fn increment_revealed_count(&mut self) {
        debug_assert!(self.revealed_count < self.total_cells());
        self.revealed_count += 1;
    }

    pub(crate) fn increment_flagged_count(&mut self) {
        debug_assert!(self.flagged_count < self.total_cells());
        self.flagged_count += 1;
    }

    pub(crate) fn decrement_flagged_count(&mut self) {
        debug_assert!(self.flagged_count > 0);
        self.flagged_count = self.flagged_count.saturating_sub(1);
    }
}

impl Index<Coord2> for Board {
    type Output = Cell;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.cells[coords.to_nd_index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board_with_mines(rows: Coord, cols: Coord, mines: &[Coord2]) -> Board {
        let mut board = Board::new(rows, cols, mines.len() as CellCount).unwrap();
        for &coords in mines {
            board.place_mine(coords).unwrap();
        }
        board.calculate_numbers();
        board
    }

    #[test]
    fn new_board_is_blank() {
        let board = Board::new(4, 5, 3).unwrap();

        assert_eq!(board.size(), (4, 5));
        assert_eq!(board.total_cells(), 20);
        assert_eq!(board.safe_cell_count(), 17);
        assert_eq!(board.revealed_count(), 0);
        assert_eq!(board.flagged_count(), 0);
        assert_eq!(board.mine_count(), 0);
        assert!(board.iter().all(|(_, cell)| *cell == Cell::default()));
        assert!(board.is_blank());
    }

    #[test]
    fn board_with_mines_or_opened_cells_is_not_blank() {
        let mut board = Board::new(3, 3, 1).unwrap();
        board.place_mine((0, 0)).unwrap();
        assert!(!board.is_blank());

        let mut board = Board::new(3, 3, 0).unwrap();
        board.cell_mut((1, 1)).reveal();
        board.increment_revealed_count();
        assert!(!board.is_blank());
    }

    #[test]
    fn rejects_bad_dimensions_and_mine_counts() {
        assert_eq!(Board::new(0, 5, 0), Err(GameError::EmptyBoard));
        assert_eq!(Board::new(5, 0, 0), Err(GameError::EmptyBoard));
        assert_eq!(Board::new(3, 3, 9), Err(GameError::TooManyMines));
        assert_eq!(Board::new(3, 3, 10), Err(GameError::TooManyMines));
        assert!(Board::new(3, 3, 8).is_ok());
        assert!(Board::new(1, 1, 0).is_ok());
    }

    #[test]
    fn cell_access_is_bounds_checked() {
        let board = Board::new(3, 4, 0).unwrap();

        assert!(board.cell((2, 3)).is_ok());
        assert_eq!(board.cell((3, 0)), Err(GameError::OutOfBounds((3, 0))));
        assert_eq!(board.cell((0, 4)), Err(GameError::OutOfBounds((0, 4))));
        assert!(board.neighbors((3, 3)).is_err());
    }

    #[test]
    fn neighbors_by_position() {
        let board = Board::new(5, 5, 0).unwrap();

        assert_eq!(board.neighbors((0, 0)).unwrap().count(), 3);
        assert_eq!(board.neighbors((4, 4)).unwrap().count(), 3);
        assert_eq!(board.neighbors((0, 2)).unwrap().count(), 5);
        assert_eq!(board.neighbors((2, 4)).unwrap().count(), 5);
        assert_eq!(board.neighbors((2, 2)).unwrap().count(), 8);
        assert!(board.neighbors((2, 2)).unwrap().all(|pos| pos != (2, 2)));
    }

    #[test]
    fn numbers_count_adjacent_mines() {
        // * 2 *
        // 1 3 2
        // 0 1 *
        let board = board_with_mines(3, 3, &[(0, 0), (0, 2), (2, 2)]);

        assert_eq!(board[(0, 1)].neighbor_mine_count(), 2);
        assert_eq!(board[(1, 0)].neighbor_mine_count(), 1);
        assert_eq!(board[(1, 1)].neighbor_mine_count(), 3);
        assert_eq!(board[(1, 2)].neighbor_mine_count(), 2);
        assert_eq!(board[(2, 0)].neighbor_mine_count(), 0);
        assert_eq!(board[(2, 1)].neighbor_mine_count(), 1);
        assert_eq!(board.mine_count(), 3);
    }

    #[test]
    fn calculate_numbers_is_idempotent() {
        let mut board = board_with_mines(4, 4, &[(1, 1), (2, 3)]);
        let before = board.clone();

        board.calculate_numbers();

        assert_eq!(board, before);
    }

    #[test]
    fn placing_the_same_mine_twice_is_a_no_op() {
        let mut board = Board::new(2, 2, 1).unwrap();

        assert_eq!(board.place_mine((1, 1)), Ok(true));
        assert_eq!(board.place_mine((1, 1)), Ok(false));
        assert_eq!(board.place_mine((2, 0)), Err(GameError::OutOfBounds((2, 0))));
        assert_eq!(board.mine_count(), 1);
    }

    #[test]
    fn board_serializes_to_json() {
        let board = board_with_mines(2, 2, &[(0, 0)]);

        let json = serde_json::to_string(&board).unwrap();
        let back: Board = serde_json::from_str(&json).unwrap();

        assert_eq!(back, board);
    }
}
