use log::{debug, info, trace};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time::{Duration, Instant};

mod board;
mod camera;
mod cell;
mod error;
mod grid;
mod input;

pub use board::{Board, BoardConfig, BoardSnapshot, GameStatus, RevealOutcome};
pub use camera::Camera;
pub use cell::{Cell, CellView};
pub use error::{GameError, Result};
pub use grid::{CellPos, Grid};
pub use input::{InputEvent, InputState};

use crate::config::Config;

/// What the main loop should do after handling an input event.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum LoopAction {
    /// Keep running.
    Continue,
    /// Close the window and exit.
    Exit,
}

/// Game controller: owns the current board and starts a new round when one
/// ends.
#[derive(Debug, Clone)]
pub struct Game {
    /// Current board. Its configuration is reused for every new board.
    board: Board,
    /// Mapping between cells and window pixels.
    camera: Camera,
    /// How long a finished board stays on screen.
    reset_delay: Duration,
    /// Frame time at which the current round was first seen to be over.
    finished_at: Option<Instant>,
    /// Number of the current round, starting at 1.
    round: u64,
    /// Source of randomness for mine placement.
    rng: StdRng,
}
impl Game {
    /// Validates the configuration and starts the first round.
    pub fn new(config: &Config) -> Result<Self> {
        Self::with_rng(config, StdRng::from_entropy())
    }
    /// Same as [`Game::new()`], but boards are generated from a fixed seed.
    #[cfg(test)]
    pub fn with_seed(config: &Config, seed: u64) -> Result<Self> {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }
    fn with_rng(config: &Config, mut rng: StdRng) -> Result<Self> {
        let board = Board::new(config.validate()?, &mut rng);
        let game = Self {
            camera: Camera::new(config.cell_size, (board.width(), board.height())),
            board,
            reset_delay: config.reset_delay,
            finished_at: None,
            round: 1,
            rng,
        };
        game.log_round_start();
        Ok(game)
    }

    /// Returns the current board.
    pub fn board(&self) -> &Board {
        &self.board
    }
    /// Returns the camera.
    pub fn camera(&self) -> Camera {
        self.camera
    }
    /// Sets the size in pixels of the area the board is drawn onto.
    pub fn set_target_dimensions(&mut self, dimensions: (u32, u32)) {
        self.camera.set_target_dimensions(dimensions);
    }
    /// Returns the number of the current round, starting at 1.
    pub fn round(&self) -> u64 {
        self.round
    }

    /// Returns the window title for the current state of the round.
    pub fn title(&self) -> String {
        match self.board.status() {
            GameStatus::InProgress => crate::TITLE.to_owned(),
            GameStatus::Lost => format!("{} - Boom!", crate::TITLE),
            GameStatus::Won => format!("{} - Cleared!", crate::TITLE),
        }
    }

    /// Handles one input event.
    ///
    /// Clicks outside the board, on revealed cells, or on a finished board
    /// are ignored.
    pub fn handle_input(&mut self, ev: InputEvent) -> LoopAction {
        match ev {
            InputEvent::Quit => {
                info!("Quit requested");
                return LoopAction::Exit;
            }
            InputEvent::PrimaryClick(x, y) => self.handle_primary_click((x, y)),
            InputEvent::SecondaryClick(x, y) => {
                // Reserved for flagging, which is not implemented. The click
                // is acknowledged and has no effect.
                trace!("Ignoring secondary click at ({}, {})", x, y);
            }
        }
        LoopAction::Continue
    }

    fn handle_primary_click(&mut self, pixel: (f64, f64)) {
        let pos = match self.camera.pixel_to_cell(pixel) {
            Some(pos) => pos,
            None => {
                debug!("Ignoring click outside the board at {:?}", pixel);
                return;
            }
        };
        match self.board.reveal(pos) {
            Ok(RevealOutcome::HitMine) => {
                info!("Round {} lost: hit a mine at ({}, {})", self.round, pos.0, pos.1);
            }
            Ok(RevealOutcome::Won) => info!("Round {} won", self.round),
            Ok(RevealOutcome::Revealed) => debug!(
                "Revealed ({}, {}); {} of {} safe cells uncovered",
                pos.0,
                pos.1,
                self.board.revealed_count(),
                self.board.config().safe_cells(),
            ),
            Ok(RevealOutcome::NoChange) => (),
            Err(e) => debug!("Ignoring click on ({}, {}): {}", pos.0, pos.1, e),
        }
    }

    /// Advances game time to `now`. Once a round has been over for the reset
    /// delay, the board is replaced with a fresh one.
    pub fn do_frame(&mut self, now: Instant) {
        if !self.board.status().is_finished() {
            return;
        }
        match self.finished_at {
            None => self.finished_at = Some(now),
            Some(t) if now.saturating_duration_since(t) >= self.reset_delay => self.reset(),
            Some(_) => (),
        }
    }

    /// Discards the current board and starts a new round with the same
    /// configuration.
    pub fn reset(&mut self) {
        self.board = Board::new(self.board.config(), &mut self.rng);
        self.finished_at = None;
        self.round += 1;
        self.log_round_start();
    }

    fn log_round_start(&self) {
        info!(
            "Round {} started: {}x{} board with {} mines",
            self.round,
            self.board.width(),
            self.board.height(),
            self.board.mine_count(),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_config() -> Config {
        Config {
            width: 4,
            height: 3,
            mines: 2,
            cell_size: 10,
            ..Config::default()
        }
    }

    fn find_cell(game: &Game, is_mine: bool) -> CellPos {
        game.board()
            .snapshot()
            .cells()
            .find(|(_, cell)| cell.is_mine() == is_mine)
            .map(|(pos, _)| pos)
            .unwrap()
    }

    fn click_center(game: &mut Game, pos: CellPos) -> LoopAction {
        let origin = game.camera().cell_origin(pos);
        let half = f64::from(game.camera().cell_size()) / 2.0;
        game.handle_input(InputEvent::PrimaryClick(
            f64::from(origin.x) + half,
            f64::from(origin.y) + half,
        ))
    }

    #[test]
    fn test_invalid_config_is_fatal() {
        let config = Config {
            mines: 12,
            ..small_config()
        };
        assert!(matches!(
            Game::new(&config),
            Err(GameError::InvalidConfiguration(_)),
        ));
    }

    #[test]
    fn test_primary_click_reveals_cell_under_cursor() {
        let mut game = Game::with_seed(&small_config(), 1).unwrap();
        let safe = find_cell(&game, false);

        assert_eq!(click_center(&mut game, safe), LoopAction::Continue);
        assert!(game.board().cell(safe).unwrap().is_revealed());
    }

    #[test]
    fn test_clicks_outside_board_are_absorbed() {
        let mut game = Game::with_seed(&small_config(), 2).unwrap();
        let before = game.board().snapshot();

        for (x, y) in [(-1.0, 5.0), (5.0, -1.0), (40.0, 5.0), (5.0, 30.0), (1e12, 1e12)] {
            assert_eq!(
                game.handle_input(InputEvent::PrimaryClick(x, y)),
                LoopAction::Continue,
            );
        }
        assert_eq!(game.board().snapshot(), before);
    }

    #[test]
    fn test_secondary_click_does_nothing() {
        let mut game = Game::with_seed(&small_config(), 3).unwrap();
        let before = game.board().snapshot();
        let mine = find_cell(&game, true);
        let origin = game.camera().cell_origin(mine);

        let action = game.handle_input(InputEvent::SecondaryClick(
            f64::from(origin.x) + 1.0,
            f64::from(origin.y) + 1.0,
        ));
        assert_eq!(action, LoopAction::Continue);
        assert_eq!(game.board().snapshot(), before);
    }

    #[test]
    fn test_quit_exits() {
        let mut game = Game::with_seed(&small_config(), 4).unwrap();
        assert_eq!(game.handle_input(InputEvent::Quit), LoopAction::Exit);
    }

    #[test]
    fn test_finished_round_resets_after_delay() {
        let config = small_config();
        let mut game = Game::with_seed(&config, 5).unwrap();
        let start = Instant::now();

        game.do_frame(start);
        assert_eq!(game.round(), 1);

        let mine = find_cell(&game, true);
        click_center(&mut game, mine);
        assert_eq!(game.board().status(), GameStatus::Lost);
        assert_eq!(game.title(), format!("{} - Boom!", crate::TITLE));

        // Further clicks are rejected by the finished board.
        let lost = game.board().snapshot();
        let safe = find_cell(&game, false);
        click_center(&mut game, safe);
        assert_eq!(game.board().snapshot(), lost);

        game.do_frame(start);
        game.do_frame(start + config.reset_delay / 2);
        assert_eq!(game.round(), 1);
        assert_eq!(game.board().status(), GameStatus::Lost);

        game.do_frame(start + config.reset_delay);
        assert_eq!(game.round(), 2);
        assert_eq!(game.board().status(), GameStatus::InProgress);
        assert_eq!(game.board().revealed_count(), 0);
        assert_eq!(game.board().config(), config.validate().unwrap());
        assert_eq!(game.title(), crate::TITLE);
    }

    #[test]
    fn test_won_round_resets() {
        let mut game = Game::with_seed(&small_config(), 6).unwrap();
        let safe: Vec<CellPos> = game
            .board()
            .snapshot()
            .cells()
            .filter(|(_, cell)| !cell.is_mine())
            .map(|(pos, _)| pos)
            .collect();
        for pos in safe {
            click_center(&mut game, pos);
        }
        assert_eq!(game.board().status(), GameStatus::Won);
        assert_eq!(game.title(), format!("{} - Cleared!", crate::TITLE));

        let t = Instant::now();
        game.do_frame(t);
        game.do_frame(t + Duration::from_secs(5));
        assert_eq!(game.round(), 2);
        assert_eq!(game.board().status(), GameStatus::InProgress);
    }

    #[test]
    fn test_clicks_follow_resized_window() {
        let mut game = Game::with_seed(&small_config(), 7).unwrap();
        assert_eq!(game.camera().board_size_pixels(), (40, 30));
        game.set_target_dimensions((80, 60));

        // Cells are now drawn 20 pixels wide.
        let safe = find_cell(&game, false);
        let (x, y) = (f64::from(safe.0) * 20.0 + 10.0, f64::from(safe.1) * 20.0 + 10.0);
        game.handle_input(InputEvent::PrimaryClick(x, y));
        assert!(game.board().cell(safe).unwrap().is_revealed());

        let before = game.board().snapshot();
        game.handle_input(InputEvent::PrimaryClick(80.0, 10.0));
        assert_eq!(game.board().snapshot(), before);
    }
}
