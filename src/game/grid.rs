use itertools::Itertools;

/// Cell coordinates, with `(0, 0)` in the top-left corner.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
pub struct CellPos(pub u32, pub u32);

/// Fixed-size rectangular grid of values, stored row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid<T> {
    width: u32,
    height: u32,
    cells: Vec<T>,
}
impl<T: Clone> Grid<T> {
    /// Returns a grid with every cell set to `value`.
    pub fn filled(width: u32, height: u32, value: T) -> Self {
        let len = width as usize * height as usize;
        Self {
            width,
            height,
            cells: vec![value; len],
        }
    }
}
impl<T> Grid<T> {
    /// Returns the number of columns.
    pub fn width(&self) -> u32 {
        self.width
    }
    /// Returns the number of rows.
    pub fn height(&self) -> u32 {
        self.height
    }
    /// Returns `true` if the position lies inside the grid.
    pub fn contains(&self, CellPos(x, y): CellPos) -> bool {
        x < self.width && y < self.height
    }

    /// Returns a cell, or `None` if the position is outside the grid.
    pub fn get(&self, pos: CellPos) -> Option<&T> {
        self.index_of(pos).map(|i| &self.cells[i])
    }
    /// Returns a cell mutably, or `None` if the position is outside the grid.
    pub fn get_mut(&mut self, pos: CellPos) -> Option<&mut T> {
        self.index_of(pos).map(move |i| &mut self.cells[i])
    }

    /// Returns an iterator over all cells and their positions, row by row.
    pub fn iter(&self) -> impl Iterator<Item = (CellPos, &T)> + '_ {
        let width = self.width;
        self.cells.iter().enumerate().map(move |(i, cell)| {
            let i = i as u32;
            (CellPos(i % width, i / width), cell)
        })
    }

    /// Returns an iterator over the in-bounds neighbors of a position (up to
    /// 8), not including the position itself.
    pub fn neighbors(&self, CellPos(x, y): CellPos) -> impl Iterator<Item = CellPos> {
        let (width, height) = (self.width, self.height);
        (-1_i32..=1)
            .cartesian_product(-1_i32..=1)
            .filter(|&(dx, dy)| (dx, dy) != (0, 0))
            .filter_map(move |(dx, dy)| {
                let nx = x.checked_add_signed(dx)?;
                let ny = y.checked_add_signed(dy)?;
                (nx < width && ny < height).then(|| CellPos(nx, ny))
            })
    }

    fn index_of(&self, pos: CellPos) -> Option<usize> {
        self.contains(pos)
            .then(|| pos.1 as usize * self.width as usize + pos.0 as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_neighbors_are_clipped_to_grid() {
        let grid = Grid::filled(3, 3, ());
        assert_eq!(grid.neighbors(CellPos(0, 0)).count(), 3);
        assert_eq!(grid.neighbors(CellPos(1, 0)).count(), 5);
        assert_eq!(grid.neighbors(CellPos(1, 1)).count(), 8);
        assert!(grid.neighbors(CellPos(1, 1)).all(|p| p != CellPos(1, 1)));

        let strip = Grid::filled(1, 1, ());
        assert_eq!(strip.neighbors(CellPos(0, 0)).count(), 0);
    }

    #[test]
    fn test_row_major_iteration() {
        let mut grid = Grid::filled(3, 2, 0);
        *grid.get_mut(CellPos(2, 1)).unwrap() = 7;
        let positions: Vec<_> = grid.iter().map(|(p, _)| p).collect();
        assert_eq!(positions[0], CellPos(0, 0));
        assert_eq!(positions[3], CellPos(0, 1));
        assert_eq!(grid.get(CellPos(2, 1)), Some(&7));
        assert_eq!(grid.get(CellPos(3, 0)), None);
        assert_eq!(grid.get(CellPos(0, 2)), None);
    }
}
