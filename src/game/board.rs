use rand::Rng;

use super::{Cell, CellPos, GameError, Grid, Result};

/// Validated board dimensions and mine count.
///
/// A `BoardConfig` can only be obtained through [`BoardConfig::new()`], so any
/// value of this type describes a playable board: at least one cell, at least
/// one mine, and at least one safe cell.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct BoardConfig {
    width: u32,
    height: u32,
    mines: u32,
}
impl BoardConfig {
    /// Validates board dimensions and mine count.
    pub fn new(width: u32, height: u32, mines: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(GameError::InvalidConfiguration(format!(
                "board must be at least 1x1, not {}x{}",
                width, height,
            )));
        }
        let total_cells = u64::from(width) * u64::from(height);
        if total_cells > u64::from(u32::MAX) {
            return Err(GameError::InvalidConfiguration(format!(
                "{}x{} board has too many cells",
                width, height,
            )));
        }
        if mines == 0 || u64::from(mines) >= total_cells {
            return Err(GameError::InvalidConfiguration(format!(
                "mine count must be between 1 and {} for a {}x{} board, not {}",
                total_cells.saturating_sub(1),
                width,
                height,
                mines,
            )));
        }
        Ok(Self {
            width,
            height,
            mines,
        })
    }

    /// Returns the number of columns.
    pub fn width(self) -> u32 {
        self.width
    }
    /// Returns the number of rows.
    pub fn height(self) -> u32 {
        self.height
    }
    /// Returns the number of mines.
    pub fn mines(self) -> u32 {
        self.mines
    }
    /// Returns the number of cells that are not mines.
    pub fn safe_cells(self) -> u32 {
        self.width * self.height - self.mines
    }
}

/// Progress of a round.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameStatus {
    /// The player may still reveal cells.
    InProgress,
    /// The player revealed a mine.
    Lost,
    /// The player revealed every safe cell.
    Won,
}
impl Default for GameStatus {
    fn default() -> Self {
        GameStatus::InProgress
    }
}
impl GameStatus {
    /// Returns `true` if the round is over.
    pub fn is_finished(self) -> bool {
        matches!(self, GameStatus::Lost | GameStatus::Won)
    }
}

/// Effect of a successful call to [`Board::reveal()`].
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum RevealOutcome {
    /// The cell was already revealed.
    NoChange,
    /// One or more safe cells were revealed and the round continues.
    Revealed,
    /// The cell was a mine; the round is lost.
    HitMine,
    /// The last safe cell was revealed; the round is won.
    Won,
}

/// Minesweeper board with a fixed size and mine layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    config: BoardConfig,
    cells: Grid<Cell>,
    status: GameStatus,
    /// Number of safe cells revealed so far.
    revealed_count: u32,
}
impl Board {
    /// Returns a board with mines placed uniformly at random using `rng`.
    ///
    /// Each mine position is sampled independently, and resampled if it
    /// already holds a mine. Use [`BoardConfig::new()`] to validate the
    /// dimensions and mine count first.
    pub fn new<R: Rng + ?Sized>(config: BoardConfig, rng: &mut R) -> Self {
        let mut board = Self::empty(config);
        let mut placed = 0;
        while placed < config.mines {
            let pos = CellPos(rng.gen_range(0..config.width), rng.gen_range(0..config.height));
            if board.place_mine(pos) {
                placed += 1;
            }
        }
        board
    }

    /// Returns a board with mines at exactly the given positions.
    #[cfg(test)]
    pub fn from_mines(width: u32, height: u32, mines: &[CellPos]) -> Result<Self> {
        let mine_count = u32::try_from(mines.len()).map_err(|_| {
            GameError::InvalidConfiguration(format!("too many mines: {}", mines.len()))
        })?;
        let mut board = Self::empty(BoardConfig::new(width, height, mine_count)?);
        for &pos in mines {
            if !board.cells.contains(pos) {
                return Err(GameError::OutOfBounds { x: pos.0, y: pos.1 });
            }
            if !board.place_mine(pos) {
                return Err(GameError::InvalidConfiguration(format!(
                    "duplicate mine at ({}, {})",
                    pos.0, pos.1,
                )));
            }
        }
        Ok(board)
    }

    fn empty(config: BoardConfig) -> Self {
        Self {
            config,
            cells: Grid::filled(config.width, config.height, Cell::default()),
            status: GameStatus::default(),
            revealed_count: 0,
        }
    }

    /// Places a mine and updates the counts of its neighbors. Returns `false`
    /// if there is already a mine there.
    fn place_mine(&mut self, pos: CellPos) -> bool {
        match self.cells.get_mut(pos) {
            Some(cell) if !cell.is_mine => cell.is_mine = true,
            _ => return false,
        }
        for nbr in self.cells.neighbors(pos) {
            if let Some(cell) = self.cells.get_mut(nbr) {
                if !cell.is_mine {
                    cell.adjacent_mines += 1;
                }
            }
        }
        true
    }

    /// Returns the validated configuration the board was built from.
    pub fn config(&self) -> BoardConfig {
        self.config
    }
    /// Returns the number of columns.
    pub fn width(&self) -> u32 {
        self.config.width()
    }
    /// Returns the number of rows.
    pub fn height(&self) -> u32 {
        self.config.height()
    }
    /// Returns the number of mines.
    pub fn mine_count(&self) -> u32 {
        self.config.mines()
    }
    /// Returns the progress of the round.
    pub fn status(&self) -> GameStatus {
        self.status
    }
    /// Returns the number of safe cells revealed so far.
    pub fn revealed_count(&self) -> u32 {
        self.revealed_count
    }
    /// Returns a cell, or `None` if the position is outside the board.
    pub fn cell(&self, pos: CellPos) -> Option<Cell> {
        self.cells.get(pos).copied()
    }

    /// Returns a copy of everything a renderer needs to draw the board.
    pub fn snapshot(&self) -> BoardSnapshot {
        BoardSnapshot {
            cells: self.cells.clone(),
        }
    }

    /// Reveals a cell.
    ///
    /// Revealing a mine loses the round. Revealing a cell with no adjacent
    /// mines also reveals its neighbors, spreading across the whole connected
    /// region of such cells and stopping at numbered cells. Revealing the last
    /// safe cell wins the round.
    ///
    /// Fails without changing anything if `pos` is outside the board or the
    /// round is already over.
    pub fn reveal(&mut self, pos: CellPos) -> Result<RevealOutcome> {
        let cell = self.cell(pos).ok_or(GameError::OutOfBounds { x: pos.0, y: pos.1 })?;
        if self.status.is_finished() {
            return Err(GameError::InvalidStateTransition);
        }
        if cell.is_revealed {
            return Ok(RevealOutcome::NoChange);
        }

        if cell.is_mine {
            self.mark_revealed(pos);
            self.status = GameStatus::Lost;
            return Ok(RevealOutcome::HitMine);
        }

        self.flood_reveal(pos);

        if self.revealed_count == self.config.safe_cells() {
            self.status = GameStatus::Won;
            Ok(RevealOutcome::Won)
        } else {
            Ok(RevealOutcome::Revealed)
        }
    }

    /// Reveals a safe cell and, if it has no adjacent mines, the surrounding
    /// region.
    fn flood_reveal(&mut self, start: CellPos) {
        let mut stack = vec![start];
        self.mark_revealed(start);
        while let Some(pos) = stack.pop() {
            if self.cell(pos).map_or(true, |cell| cell.adjacent_mines != 0) {
                continue;
            }
            // No neighbor of a zero cell is a mine.
            for nbr in self.cells.neighbors(pos) {
                if self.mark_revealed(nbr) {
                    stack.push(nbr);
                }
            }
        }
    }

    /// Marks a cell as revealed. Returns `false` if it was already revealed.
    fn mark_revealed(&mut self, pos: CellPos) -> bool {
        match self.cells.get_mut(pos) {
            Some(cell) if !cell.is_revealed => {
                cell.is_revealed = true;
                if !cell.is_mine {
                    self.revealed_count += 1;
                }
                true
            }
            _ => false,
        }
    }
}

/// Full copy of a board's cells at one instant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardSnapshot {
    cells: Grid<Cell>,
}
impl BoardSnapshot {
    /// Returns the number of columns.
    pub fn width(&self) -> u32 {
        self.cells.width()
    }
    /// Returns the number of rows.
    pub fn height(&self) -> u32 {
        self.cells.height()
    }
    /// Returns an iterator over all cells and their positions, row by row.
    pub fn cells(&self) -> impl Iterator<Item = (CellPos, Cell)> + '_ {
        self.cells.iter().map(|(pos, &cell)| (pos, cell))
    }
}
