use alloc::vec::Vec;

use crate::*;
pub use random::*;

mod random;

/// Setup-only access to a fresh board, handed to a [`MapGenerator`].
///
/// This is the only way code outside the crate can put mines on a board.
#[derive(Debug)]
pub struct MinePlacer<'a> {
    board: &'a mut Board,
    placed: CellCount,
}

impl<'a> MinePlacer<'a> {
    pub(crate) fn new(board: &'a mut Board) -> Self {
        let placed = board.mine_count();
        Self { board, placed }
    }

    pub fn size(&self) -> Coord2 {
        self.board.size()
    }

    /// How many mines the generator is expected to place.
    pub fn total_mines(&self) -> CellCount {
        self.board.total_mines()
    }

    pub fn placed(&self) -> CellCount {
        self.placed
    }

    pub fn has_mine(&self, coords: Coord2) -> Result<bool> {
        Ok(self.board.cell(coords)?.is_mine())
    }

    /// Puts a mine at `coords`. Returns `false` if one was already there.
    pub fn place_mine(&mut self, coords: Coord2) -> Result<bool> {
        let placed = self.board.place_mine(coords)?;
        if placed {
            self.placed += 1;
        }
        Ok(placed)
    }
}

/// Mine placement strategy, invoked once when the first cell is opened.
///
/// Implementations must place exactly [`MinePlacer::total_mines`] mines, none of
/// them on `first_click` or its neighbors. The engine checks this afterwards and
/// refuses to start the game otherwise.
pub trait MapGenerator {
    fn generate(&mut self, placer: &mut MinePlacer<'_>, first_click: Coord2) -> Result<()>;
}

impl<F> MapGenerator for F
where
    F: FnMut(&mut MinePlacer<'_>, Coord2) -> Result<()>,
{
    fn generate(&mut self, placer: &mut MinePlacer<'_>, first_click: Coord2) -> Result<()> {
        self(placer, first_click)
    }
}

/// Places a predetermined set of mines, ignoring where the first click lands.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FixedMapGenerator {
    mines: Vec<Coord2>,
}

impl FixedMapGenerator {
    pub fn new(mines: &[Coord2]) -> Self {
        Self {
            mines: mines.to_vec(),
        }
    }

    pub fn mines(&self) -> &[Coord2] {
        &self.mines
    }
}

impl MapGenerator for FixedMapGenerator {
    fn generate(&mut self, placer: &mut MinePlacer<'_>, _first_click: Coord2) -> Result<()> {
        for &coords in &self.mines {
            placer.place_mine(coords)?;
        }
        Ok(())
    }
}
