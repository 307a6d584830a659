//! Startup configuration.

use std::time::Duration;

use crate::game::{BoardConfig, GameError};

/// Game settings, fixed for the lifetime of the process.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Config {
    /// Board width in cells.
    pub width: u32,
    /// Board height in cells.
    pub height: u32,
    /// Number of mines on each board.
    pub mines: u32,
    /// Width and height of one cell in pixels.
    pub cell_size: u32,
    /// Target frames per second.
    pub frame_rate: u32,
    /// How long a finished board stays on screen before a new round starts.
    pub reset_delay: Duration,
}
impl Default for Config {
    fn default() -> Self {
        Self {
            width: 10,
            height: 10,
            mines: 10,
            cell_size: 40,
            frame_rate: 60,
            reset_delay: Duration::from_secs(2),
        }
    }
}
impl Config {
    /// Checks every setting, returning the board configuration if the game
    /// can start.
    pub fn validate(&self) -> Result<BoardConfig, GameError> {
        if self.cell_size == 0 {
            return Err(GameError::InvalidConfiguration(
                "cell size must be at least 1 pixel".to_owned(),
            ));
        }
        if self.frame_rate == 0 {
            return Err(GameError::InvalidConfiguration(
                "frame rate must be at least 1 frame per second".to_owned(),
            ));
        }
        let board = BoardConfig::new(self.width, self.height, self.mines)?;
        if self.width.checked_mul(self.cell_size).is_none()
            || self.height.checked_mul(self.cell_size).is_none()
        {
            return Err(GameError::InvalidConfiguration(format!(
                "{}x{} board with {}px cells does not fit in a window",
                self.width, self.height, self.cell_size,
            )));
        }
        Ok(board)
    }

    /// Returns the time between frames.
    pub fn frame_duration(&self) -> Duration {
        Duration::from_secs_f64(1.0 / f64::from(self.frame_rate))
    }
}
