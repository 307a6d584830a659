use glium::program::ProgramChooserCreationError;
use glium::{Display, Program};
use glium::program;

/// Compiles the program that draws filled rectangles and circles.
pub fn shape_program(display: &Display) -> Result<Program, ProgramChooserCreationError> {
    glium::program!(
        display,
        140 => {
            vertex: include_str!("shape.vert"),
            fragment: include_str!("shape.frag"),
            outputs_srgb: true,
        },
    )
}
