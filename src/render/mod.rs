use glium::index::{NoIndices, PrimitiveType};
use glium::program::ProgramChooserCreationError;
use glium::vertex::BufferCreationError;
use glium::{Display, DrawError, Frame, Program, Surface, SwapBuffersError, VertexBuffer};
use thiserror::Error;

mod scene;
mod shaders;

pub use scene::{build_scene, Shape, ShapeKind, BACKGROUND_COLOR};

use crate::game::{BoardSnapshot, Camera};

/// Error raised while setting up or drawing a frame.
#[derive(Error, Debug)]
pub enum RenderError {
    /// The shader program failed to compile or link.
    #[error("failed to compile shader: {0}")]
    Program(#[from] ProgramChooserCreationError),
    /// The vertex buffer could not be allocated.
    #[error("failed to create vertex buffer: {0}")]
    VertexBuffer(#[from] BufferCreationError),
    /// The draw call was rejected.
    #[error("failed to draw board: {0}")]
    Draw(#[from] DrawError),
    /// The finished frame could not be presented.
    #[error("failed to swap buffers: {0}")]
    SwapBuffers(#[from] SwapBuffersError),
}

#[derive(Debug, Copy, Clone)]
struct ShapeVertex {
    /// Position in board pixels.
    pos: [f32; 2],
    /// Position within the shape, from -1.0 to 1.0 on each axis.
    local: [f32; 2],
    color: [f32; 4],
    /// 1.0 for circles, 0.0 for rectangles.
    circle: f32,
}
glium::implement_vertex!(ShapeVertex, pos, local, color, circle);

/// Draws board snapshots onto a glium surface.
pub struct Renderer {
    program: Program,
}
impl Renderer {
    /// Compiles the GPU program used for drawing.
    pub fn new(display: &Display) -> Result<Self, RenderError> {
        Ok(Self {
            program: shaders::shape_program(display)?,
        })
    }

    /// Clears the frame and draws every cell of the board.
    pub fn draw_board(
        &self,
        display: &Display,
        target: &mut Frame,
        snapshot: &BoardSnapshot,
        camera: Camera,
    ) -> Result<(), RenderError> {
        let [r, g, b, a] = BACKGROUND_COLOR;
        target.clear_color(r, g, b, a);

        let vertices: Vec<ShapeVertex> = build_scene(snapshot, camera)
            .iter()
            .flat_map(shape_vertices)
            .collect();
        if vertices.is_empty() {
            return Ok(());
        }
        let vbo = VertexBuffer::new(display, &vertices)?;

        let transform: [[f32; 4]; 4] = camera.gl_matrix().into();
        let draw_params = glium::DrawParameters {
            blend: glium::Blend::alpha_blending(),
            ..glium::DrawParameters::default()
        };
        target.draw(
            &vbo,
            &NoIndices(PrimitiveType::TrianglesList),
            &self.program,
            &glium::uniform! { transform: transform },
            &draw_params,
        )?;
        Ok(())
    }
}

/// Returns two triangles covering a shape's bounding box.
fn shape_vertices(shape: &Shape) -> [ShapeVertex; 6] {
    let min = shape.min;
    let max = shape.max();
    let circle = match shape.kind {
        ShapeKind::Rect => 0.0,
        ShapeKind::Circle => 1.0,
    };
    let corner = |x: f32, y: f32, lx: f32, ly: f32| ShapeVertex {
        pos: [x, y],
        local: [lx, ly],
        color: shape.color,
        circle,
    };
    let top_left = corner(min.x, min.y, -1.0, -1.0);
    let top_right = corner(max.x, min.y, 1.0, -1.0);
    let bottom_left = corner(min.x, max.y, -1.0, 1.0);
    let bottom_right = corner(max.x, max.y, 1.0, 1.0);
    [
        top_left,
        top_right,
        bottom_left,
        bottom_left,
        top_right,
        bottom_right,
    ]
}
