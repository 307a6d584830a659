use cgmath::{Matrix4, Point2};

use super::CellPos;

/// Fixed 2D camera mapping board cells to window pixels.
///
/// The board is laid out with its top-left corner at pixel `(0, 0)` and each
/// cell a square `cell_size` pixels wide, then stretched to fill the target
/// (the window's framebuffer), which normally has exactly that size.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Camera {
    /// Width and height of one cell in pixels.
    cell_size: u32,
    /// Width and height of the board in cells.
    board_dimensions: (u32, u32),
    /// Width and height of the render target in pixels.
    target_dimensions: (u32, u32),
}

impl Camera {
    /// Returns a camera for a board of the given size in cells.
    pub fn new(cell_size: u32, board_dimensions: (u32, u32)) -> Self {
        let (w, h) = board_dimensions;
        Self {
            cell_size,
            board_dimensions,
            target_dimensions: (w * cell_size, h * cell_size),
        }
    }

    /// Returns the width and height of one cell in pixels.
    pub fn cell_size(self) -> u32 {
        self.cell_size
    }
    /// Returns the width and height of the board in pixels at its natural
    /// size. The window is created with this size.
    pub fn board_size_pixels(self) -> (u32, u32) {
        let (w, h) = self.board_dimensions;
        (w * self.cell_size, h * self.cell_size)
    }
    /// Returns the width and height of the render target in pixels.
    pub fn target_dimensions(self) -> (u32, u32) {
        self.target_dimensions
    }
    /// Sets the width and height of the render target in pixels. Zero sizes
    /// (a minimized window) are clamped to 1.
    pub fn set_target_dimensions(&mut self, (w, h): (u32, u32)) {
        self.target_dimensions = (w.max(1), h.max(1));
    }

    /// Returns the pixel coordinates of the top-left corner of a cell.
    pub fn cell_origin(self, CellPos(x, y): CellPos) -> Point2<f32> {
        let size = self.cell_size as f32;
        Point2::new(x as f32 * size, y as f32 * size)
    }

    /// Returns the cell containing a pixel, or `None` if the pixel is outside
    /// the board.
    pub fn pixel_to_cell(self, (x, y): (f64, f64)) -> Option<CellPos> {
        // Written this way to reject NaN too.
        if !(x >= 0.0 && y >= 0.0) {
            return None;
        }
        let (board_w, board_h) = self.board_size_pixels();
        let (target_w, target_h) = self.target_dimensions();
        let x = x * f64::from(board_w) / f64::from(target_w);
        let y = y * f64::from(board_h) / f64::from(target_h);
        let size = f64::from(self.cell_size);
        let (cell_x, cell_y) = ((x / size).floor(), (y / size).floor());
        let (w, h) = self.board_dimensions;
        if cell_x < f64::from(w) && cell_y < f64::from(h) {
            Some(CellPos(cell_x as u32, cell_y as u32))
        } else {
            None
        }
    }

    /// Returns the orthographic projection from board pixel coordinates (Y
    /// down) to normalized device coordinates. The board always fills the
    /// whole target.
    pub fn gl_matrix(self) -> Matrix4<f32> {
        let (w, h) = self.board_size_pixels();
        cgmath::ortho(0.0, w as f32, h as f32, 0.0, -1.0, 1.0)
    }
}
