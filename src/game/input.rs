use glium::glutin::event::{ElementState, MouseButton, WindowEvent};

/// Input event understood by the game.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum InputEvent {
    /// The player asked to close the game.
    Quit,
    /// Primary (left) mouse button clicked at a pixel.
    PrimaryClick(f64, f64),
    /// Secondary (right) mouse button clicked at a pixel.
    SecondaryClick(f64, f64),
}

/// Translates window events into [`InputEvent`]s.
///
/// Mouse button events carry no position, so the last known cursor position
/// is tracked here. A click happens when the button is released.
#[derive(Debug, Default, Clone)]
pub struct InputState {
    /// Position of the mouse cursor in window pixels.
    cursor_pos: Option<(f64, f64)>,
}
impl InputState {
    /// Returns a new input state with no known cursor position.
    pub fn new() -> Self {
        Self::default()
    }

    /// Updates internal state based on a window event, returning the game
    /// input it produces, if any.
    pub fn translate(&mut self, ev: &WindowEvent<'_>) -> Option<InputEvent> {
        match ev {
            WindowEvent::CloseRequested => Some(InputEvent::Quit),

            WindowEvent::CursorMoved { position, .. } => {
                self.cursor_moved((position.x, position.y));
                None
            }
            WindowEvent::CursorLeft { .. } => {
                self.cursor_left();
                None
            }

            WindowEvent::MouseInput {
                state: ElementState::Released,
                button,
                ..
            } => self.button_released(*button),

            _ => None,
        }
    }

    fn cursor_moved(&mut self, pos: (f64, f64)) {
        self.cursor_pos = Some(pos);
    }
    fn cursor_left(&mut self) {
        self.cursor_pos = None;
    }
    fn button_released(&self, button: MouseButton) -> Option<InputEvent> {
        let (x, y) = self.cursor_pos?;
        match button {
            MouseButton::Left => Some(InputEvent::PrimaryClick(x, y)),
            MouseButton::Right => Some(InputEvent::SecondaryClick(x, y)),
            MouseButton::Middle | MouseButton::Other(_) => None,
        }
    }
}
