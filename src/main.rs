//! Classic Minesweeper in a window.
//!
//! Left-click a cell to reveal it. Hitting a mine or clearing every safe cell
//! ends the round, and a new board appears two seconds later.

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]
#![warn(clippy::all)]
#![deny(clippy::correctness)]

use log::{error, info, LevelFilter};
use simple_logger::SimpleLogger;

mod config;
mod game;
mod gui;
mod render;

const TITLE: &str = "Minesweeper";

fn main() {
    if let Err(e) = SimpleLogger::new()
        .with_level(LevelFilter::Info)
        .env()
        .init()
    {
        eprintln!("Failed to initialize logger: {}", e);
    }

    let config = config::Config::default();
    info!("Starting {} with {:?}", TITLE, config);

    if let Err(e) = gui::show_gui(&config) {
        error!("{}", e);
        std::process::exit(1);
    }
}
