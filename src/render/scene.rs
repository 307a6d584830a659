use cgmath::{Point2, Vector2};

use crate::game::{BoardSnapshot, Camera, Cell, CellPos, CellView};

/// RGBA color with components in the range `0.0..=1.0`.
pub type Color = [f32; 4];

macro_rules! rgb {
    ($r:expr, $g:expr, $b:expr) => {
        [$r as f32 / 255.0, $g as f32 / 255.0, $b as f32 / 255.0, 1.0]
    };
}

/// Color of the window behind the board.
pub const BACKGROUND_COLOR: Color = rgb!(255, 255, 255);
/// Color of covered and numbered cells.
pub const CELL_COLOR: Color = rgb!(192, 192, 192);
/// Color of revealed cells with no adjacent mines.
pub const OPEN_CELL_COLOR: Color = rgb!(224, 224, 224);
/// Color of the outline around each cell.
pub const BORDER_COLOR: Color = rgb!(0, 0, 0);
/// Color of a revealed mine.
pub const MINE_COLOR: Color = rgb!(255, 0, 0);
/// Color of adjacent mine counts.
pub const DIGIT_COLOR: Color = rgb!(0, 0, 0);

/// Width of the outline around each cell, in pixels.
const BORDER_WIDTH: f32 = 1.0;
/// Gap between a mine and the edge of its cell, in pixels.
const MINE_MARGIN: u32 = 5;
/// Height of a digit as a fraction of the cell size.
const DIGIT_HEIGHT: f32 = 0.55;
/// Width of a digit as a fraction of its height.
const DIGIT_ASPECT: f32 = 0.55;
/// Thickness of a digit segment as a fraction of the digit's height.
const SEGMENT_THICKNESS: f32 = 0.14;

/// Seven-segment encoding of the digits 0 through 9. Bits 0 through 6 are the
/// top, top-right, bottom-right, bottom, bottom-left, top-left, and middle
/// segments.
const DIGIT_SEGMENTS: [u8; 10] = [
    0b011_1111, 0b000_0110, 0b101_1011, 0b100_1111, 0b110_0110, 0b110_1101, 0b111_1101,
    0b000_0111, 0b111_1111, 0b110_1111,
];

/// Filled shape to draw.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ShapeKind {
    /// Axis-aligned rectangle filling its bounds.
    Rect,
    /// Circle (or ellipse) inscribed in its bounds.
    Circle,
}

/// Filled shape in window pixel coordinates.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Shape {
    /// Kind of shape.
    pub kind: ShapeKind,
    /// Top-left corner of the bounding box.
    pub min: Point2<f32>,
    /// Width and height of the bounding box.
    pub size: Vector2<f32>,
    /// Fill color.
    pub color: Color,
}
impl Shape {
    fn rect(min: Point2<f32>, size: Vector2<f32>, color: Color) -> Self {
        Self {
            kind: ShapeKind::Rect,
            min,
            size,
            color,
        }
    }
    fn circle(center: Point2<f32>, radius: f32, color: Color) -> Self {
        Self {
            kind: ShapeKind::Circle,
            min: center - Vector2::new(radius, radius),
            size: Vector2::new(radius, radius) * 2.0,
            color,
        }
    }

    /// Returns the bottom-right corner of the bounding box.
    pub fn max(&self) -> Point2<f32> {
        self.min + self.size
    }
}

/// Returns the shapes to draw for a board, back to front.
pub fn build_scene(snapshot: &BoardSnapshot, camera: Camera) -> Vec<Shape> {
    let cell_count = snapshot.width() as usize * snapshot.height() as usize;
    // At most a border, a fill, and seven segments per cell.
    let mut shapes = Vec::with_capacity(cell_count * 9);
    for (pos, cell) in snapshot.cells() {
        push_cell(&mut shapes, camera, pos, cell);
    }
    shapes
}

fn push_cell(shapes: &mut Vec<Shape>, camera: Camera, pos: CellPos, cell: Cell) {
    let origin = camera.cell_origin(pos);
    let size = camera.cell_size() as f32;
    let center = origin + Vector2::new(size, size) / 2.0;

    // Border, then fill.
    shapes.push(Shape::rect(origin, Vector2::new(size, size), BORDER_COLOR));
    let view = cell.view();
    let fill = match view {
        CellView::Number(0) => OPEN_CELL_COLOR,
        _ => CELL_COLOR,
    };
    let inner = size - 2.0 * BORDER_WIDTH;
    if inner > 0.0 {
        shapes.push(Shape::rect(
            origin + Vector2::new(BORDER_WIDTH, BORDER_WIDTH),
            Vector2::new(inner, inner),
            fill,
        ));
    }

    match view {
        CellView::Covered | CellView::Number(0) => (),
        CellView::Mine => {
            let radius = (camera.cell_size() / 2).saturating_sub(MINE_MARGIN).max(1);
            shapes.push(Shape::circle(center, radius as f32, MINE_COLOR));
        }
        CellView::Number(n) => push_digit(shapes, center, size * DIGIT_HEIGHT, n),
    }
}

/// Adds a seven-segment digit centered on a point.
fn push_digit(shapes: &mut Vec<Shape>, center: Point2<f32>, height: f32, digit: u8) {
    let segments = match DIGIT_SEGMENTS.get(usize::from(digit)) {
        Some(&segments) => segments,
        None => return,
    };
    let width = height * DIGIT_ASPECT;
    let t = height * SEGMENT_THICKNESS;
    let half = height / 2.0;
    let min = center - Vector2::new(width, height) / 2.0;

    // (x, y, w, h) of each segment relative to the top-left of the digit.
    let bounds = [
        (0.0, 0.0, width, t),
        (width - t, 0.0, t, half),
        (width - t, half, t, half),
        (0.0, height - t, width, t),
        (0.0, half, t, half),
        (0.0, 0.0, t, half),
        (0.0, half - t / 2.0, width, t),
    ];
    for (i, &(x, y, w, h)) in bounds.iter().enumerate() {
        if segments & (1 << i) != 0 {
            shapes.push(Shape::rect(
                min + Vector2::new(x, y),
                Vector2::new(w, h),
                DIGIT_COLOR,
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Board;

    const CELL_SIZE: u32 = 40;

    fn scene_for(board: &Board) -> Vec<Shape> {
        let camera = Camera::new(CELL_SIZE, (board.width(), board.height()));
        build_scene(&board.snapshot(), camera)
    }

    fn inside_cell(shape: &Shape, pos: CellPos) -> bool {
        let camera = Camera::new(CELL_SIZE, (pos.0 + 1, pos.1 + 1));
        let origin = camera.cell_origin(pos);
        let end = origin + Vector2::new(CELL_SIZE as f32, CELL_SIZE as f32);
        let max = shape.max();
        shape.min.x >= origin.x && shape.min.y >= origin.y && max.x <= end.x && max.y <= end.y
    }

    #[test]
    fn test_covered_board_shows_nothing_but_cells() {
        let board = Board::from_mines(3, 2, &[CellPos(0, 0), CellPos(2, 1)]).unwrap();
        let shapes = scene_for(&board);

        assert_eq!(shapes.len(), 3 * 2 * 2);
        for pair in shapes.chunks(2) {
            assert_eq!(pair[0].color, BORDER_COLOR);
            assert_eq!(pair[0].size, Vector2::new(40.0, 40.0));
            assert_eq!(pair[1].color, CELL_COLOR);
            assert_eq!(pair[1].size, Vector2::new(38.0, 38.0));
        }
        assert!(shapes.iter().all(|s| s.kind == ShapeKind::Rect));
    }

    #[test]
    fn test_revealed_mine_is_a_circle() {
        let mut board = Board::from_mines(2, 2, &[CellPos(1, 1)]).unwrap();
        board.reveal(CellPos(1, 1)).unwrap();
        let shapes = scene_for(&board);

        let circles: Vec<&Shape> = shapes
            .iter()
            .filter(|s| s.kind == ShapeKind::Circle)
            .collect();
        assert_eq!(circles.len(), 1);
        let mine = circles[0];
        assert_eq!(mine.color, MINE_COLOR);
        // Radius is half the cell minus the margin, centered in the cell.
        assert_eq!(mine.size, Vector2::new(30.0, 30.0));
        assert_eq!(mine.min, Point2::new(45.0, 45.0));
    }

    #[test]
    fn test_numbers_use_seven_segments() {
        let mut board = Board::from_mines(3, 1, &[CellPos(0, 0), CellPos(2, 0)]).unwrap();
        board.reveal(CellPos(1, 0)).unwrap();
        let shapes = scene_for(&board);

        let digit: Vec<&Shape> = shapes.iter().filter(|s| s.color == DIGIT_COLOR).collect();
        // Two cell borders are also black; the digit "2" adds five segments.
        let segments: Vec<&&Shape> = digit
            .iter()
            .filter(|s| s.size != Vector2::new(40.0, 40.0))
            .collect();
        assert_eq!(segments.len(), 5);
        assert!(segments.iter().all(|s| inside_cell(s, CellPos(1, 0))));
        assert_eq!(
            shapes.iter().filter(|s| s.color == CELL_COLOR).count(),
            3,
        );
    }

    #[test]
    fn test_open_cells_are_lighter_and_blank() {
        let mut board = Board::from_mines(3, 3, &[CellPos(2, 2)]).unwrap();
        board.reveal(CellPos(0, 0)).unwrap();
        let shapes = scene_for(&board);

        // Cells (0, 0), (1, 0), (0, 1), (2, 0), and (0, 2) have no adjacent
        // mines.
        assert_eq!(
            shapes.iter().filter(|s| s.color == OPEN_CELL_COLOR).count(),
            5,
        );
        // The other three safe cells each show a "1".
        let segment_count = shapes
            .iter()
            .filter(|s| s.color == DIGIT_COLOR && s.size != Vector2::new(40.0, 40.0))
            .count();
        assert_eq!(segment_count, 3 * 2);
        assert!(shapes.iter().all(|s| s.kind == ShapeKind::Rect));
    }

    #[test]
    fn test_digit_table() {
        let lit = |d: usize| DIGIT_SEGMENTS[d].count_ones();
        assert_eq!(
            (0..10).map(lit).collect::<Vec<_>>(),
            vec![6, 2, 5, 5, 4, 5, 6, 3, 7, 6],
        );
    }
}
