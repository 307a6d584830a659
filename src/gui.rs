use glium::backend::glutin::DisplayCreationError;
use glium::glutin::dpi::PhysicalSize;
use glium::glutin::event::{Event, StartCause};
use glium::glutin::event_loop::{ControlFlow, EventLoop};
use glium::glutin::window::WindowBuilder;
use glium::glutin::ContextBuilder;
use log::{error, info};
use std::collections::VecDeque;
use std::time::Instant;
use thiserror::Error;

use crate::config::Config;
use crate::game::{Game, GameError, InputState, LoopAction};
use crate::render::{RenderError, Renderer};

/// Error that prevents the window from opening.
#[derive(Error, Debug)]
pub enum GuiError {
    /// The configuration is invalid.
    #[error(transparent)]
    Game(#[from] GameError),
    /// The window or its GL context could not be created.
    #[error("failed to initialize display: {0}")]
    Display(#[from] DisplayCreationError),
    /// GPU resources could not be created.
    #[error(transparent)]
    Render(#[from] RenderError),
}

/// Opens the game window and runs the main loop until the player quits.
///
/// Returns only if startup fails. The window, GL context, and GPU program
/// belong to the loop and are released when it exits.
pub fn show_gui(config: &Config) -> Result<(), GuiError> {
    // Initialize runtime data.
    let mut game = Game::new(config)?;
    let mut input = InputState::new();
    let mut events_buffer = VecDeque::new();
    let frame_duration = config.frame_duration();

    // Initialize window and GPU resources.
    let ev_loop = EventLoop::new();
    let (width, height) = game.camera().board_size_pixels();
    let mut title = game.title();
    let wb = WindowBuilder::new()
        .with_title(title.clone())
        .with_inner_size(PhysicalSize::new(width, height))
        .with_resizable(false);
    let cb = ContextBuilder::new().with_vsync(true);
    let display = glium::Display::new(wb, cb, &ev_loop)?;
    let renderer = Renderer::new(&display)?;
    info!("Opened {}x{} window", width, height);

    // Main loop.
    let mut next_frame_time = Instant::now();
    let mut failed = false;
    ev_loop.run(move |event, _ev_loop, control_flow| {
        let mut now = Instant::now();
        let mut do_frame = false;
        match event.to_static() {
            Some(Event::NewEvents(cause)) => match cause {
                StartCause::ResumeTimeReached {
                    start: _,
                    requested_resume,
                } => {
                    now = requested_resume;
                    do_frame = true;
                }
                StartCause::Init => {
                    next_frame_time = now;
                    do_frame = true;
                }
                _ => (),
            },

            // The program is about to exit.
            Some(Event::LoopDestroyed) => {
                info!("Window closed after {} round(s)", game.round());
                if failed {
                    std::process::exit(1);
                }
            }

            // Queue the event to be handled next time we render everything.
            Some(Event::WindowEvent { event, .. }) => events_buffer.push_back(event),

            // Ignore this event.
            Some(_) | None => (),
        }

        if !do_frame || next_frame_time > now {
            return;
        }

        next_frame_time = now + frame_duration;
        if next_frame_time < Instant::now() {
            // Skip a frame (or several).
            next_frame_time = Instant::now() + frame_duration;
        }
        *control_flow = ControlFlow::WaitUntil(next_frame_time);

        // The framebuffer can differ from the requested window size.
        game.set_target_dimensions(display.get_framebuffer_dimensions());

        for ev in events_buffer.drain(..) {
            if let Some(input_event) = input.translate(&ev) {
                if game.handle_input(input_event) == LoopAction::Exit {
                    *control_flow = ControlFlow::Exit;
                    return;
                }
            }
        }

        game.do_frame(now);

        let new_title = game.title();
        if new_title != title {
            display.gl_window().window().set_title(&new_title);
            title = new_title;
        }

        // Draw everything.
        let mut target = display.draw();
        let snapshot = game.board().snapshot();
        let drawn = renderer.draw_board(&display, &mut target, &snapshot, game.camera());
        let presented = target.finish().map_err(RenderError::from);
        if let Err(e) = drawn.and(presented) {
            error!("{}", e);
            failed = true;
            *control_flow = ControlFlow::Exit;
        }
    })
}
