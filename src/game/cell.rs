/// Cell in the Minesweeper grid.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Cell {
    pub(super) is_mine: bool,
    pub(super) adjacent_mines: u8,
    pub(super) is_revealed: bool,
}
impl Cell {
    /// Returns `true` if the cell hides a mine.
    pub fn is_mine(self) -> bool {
        self.is_mine
    }
    /// Returns the number of mines in the surrounding 8 cells. This is only
    /// meaningful for cells that are not mines.
    pub fn adjacent_mines(self) -> u8 {
        self.adjacent_mines
    }
    /// Returns `true` if the player has uncovered the cell.
    pub fn is_revealed(self) -> bool {
        self.is_revealed
    }

    /// Returns what the player is allowed to see of the cell.
    pub fn view(self) -> CellView {
        match (self.is_revealed(), self.is_mine()) {
            (false, _) => CellView::Covered,
            (true, true) => CellView::Mine,
            (true, false) => CellView::Number(self.adjacent_mines()),
        }
    }
}

/// Player-visible state of a cell.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum CellView {
    /// Covered cell.
    Covered,
    /// Revealed safe cell with its adjacent mine count.
    Number(u8),
    /// Revealed mine.
    Mine,
}

#[cfg(test)]
#[test]
fn test_cell_view() {
    let covered_mine = Cell {
        is_mine: true,
        ..Cell::default()
    };
    assert_eq!(covered_mine.view(), CellView::Covered);

    let revealed_mine = Cell {
        is_revealed: true,
        ..covered_mine
    };
    assert_eq!(revealed_mine.view(), CellView::Mine);

    let revealed_three = Cell {
        is_mine: false,
        adjacent_mines: 3,
        is_revealed: true,
    };
    assert_eq!(revealed_three.view(), CellView::Number(3));
}
