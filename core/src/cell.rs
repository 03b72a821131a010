use serde::{Deserialize, Serialize};

/// Player annotation on an unrevealed cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MarkState {
    None,
    Flagged,
    Questioned,
}

impl MarkState {
    /// Next mark in the cycle. With question marks disabled this is a plain
    /// flag toggle.
    pub const fn next(self, question_enabled: bool) -> Self {
        use MarkState::*;
        match (self, question_enabled) {
            (None, _) => Flagged,
            (Flagged, true) => Questioned,
            (Flagged, false) => None,
            (Questioned, true) => None,
            (Questioned, false) => Flagged,
        }
    }
}

impl Default for MarkState {
    fn default() -> Self {
        Self::None
    }
}

/// One grid position.
///
/// Mine placement and the neighbor count are written once during setup by the
/// owning [`Board`](crate::Board); gameplay only ever reveals or re-marks a cell.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    mine: bool,
    revealed: bool,
    mark: MarkState,
    neighbor_mines: u8,
}

impl Cell {
    pub const fn is_mine(&self) -> bool {
        self.mine
    }

    pub const fn is_revealed(&self) -> bool {
        self.revealed
    }

    pub const fn mark(&self) -> MarkState {
        self.mark
    }

    pub const fn is_flagged(&self) -> bool {
        matches!(self.mark, MarkState::Flagged)
    }

    pub const fn is_questioned(&self) -> bool {
        matches!(self.mark, MarkState::Questioned)
    }

    pub const fn is_marked(&self) -> bool {
        !matches!(self.mark, MarkState::None)
    }

    /// Only meaningful for cells that are not mines.
    pub const fn neighbor_mine_count(&self) -> u8 {
        self.neighbor_mines
    }

    /// Still hidden and not protected by a flag.
    pub const fn is_revealable(&self) -> bool {
        !self.revealed && !self.is_flagged()
    }

    /// Reveals the cell, returning `false` if it was already revealed or is
    /// flagged. A question mark is cleared on reveal.
    pub fn reveal(&mut self) -> bool {
        if !self.is_revealable() {
            return false;
        }
        self.revealed = true;
        self.mark = MarkState::None;
        true
    }

    /// Advances the mark and returns the new one, or `None` if the cell is
    /// revealed and can no longer be marked.
    pub fn cycle_mark(&mut self, question_enabled: bool) -> Option<MarkState> {
        if self.revealed {
            return None;
        }
        self.mark = self.mark.next(question_enabled);
        Some(self.mark)
    }

    pub(crate) fn set_mine(&mut self, mine: bool) {
        self.mine = mine;
    }

    pub(crate) fn set_neighbor_mine_count(&mut self, count: u8) {
        self.neighbor_mines = count;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_cell_is_blank() {
        let cell = Cell::default();
        assert!(!cell.is_mine());
        assert!(!cell.is_revealed());
        assert_eq!(cell.mark(), MarkState::None);
        assert_eq!(cell.neighbor_mine_count(), 0);
    }

    #[test]
    fn reveal_is_one_shot() {
        let mut cell = Cell::default();
        assert!(cell.reveal());
        assert!(cell.is_revealed());
        assert!(!cell.reveal());
    }

    #[test]
    fn flag_blocks_reveal() {
        let mut cell = Cell::default();
        cell.cycle_mark(true).unwrap();
        assert!(cell.is_flagged());
        assert!(!cell.reveal());
        assert!(!cell.is_revealed());
    }

    #[test]
    fn question_mark_is_cleared_on_reveal() {
        let mut cell = Cell::default();
        cell.cycle_mark(true).unwrap();
        cell.cycle_mark(true).unwrap();
        assert!(cell.is_questioned());
        assert!(cell.is_marked());

        assert!(cell.reveal());
        assert_eq!(cell.mark(), MarkState::None);
    }

    #[test]
    fn three_state_cycle() {
        let mut cell = Cell::default();
        assert_eq!(cell.cycle_mark(true), Some(MarkState::Flagged));
        assert_eq!(cell.cycle_mark(true), Some(MarkState::Questioned));
        assert_eq!(cell.cycle_mark(true), Some(MarkState::None));
    }

    #[test]
    fn two_state_toggle_never_questions() {
        let mut cell = Cell::default();
        assert_eq!(cell.cycle_mark(false), Some(MarkState::Flagged));
        assert_eq!(cell.cycle_mark(false), Some(MarkState::None));
        assert_eq!(cell.cycle_mark(false), Some(MarkState::Flagged));
    }

    #[test]
    fn revealed_cell_cannot_be_marked() {
        let mut cell = Cell::default();
        cell.reveal();
        assert_eq!(cell.cycle_mark(true), None);
        assert_eq!(cell.mark(), MarkState::None);
    }
}
