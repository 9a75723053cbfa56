//! Perfect-maze generation and single-player navigation.
//!
//! The core (`grid`, `generator`, `session`) is front-end agnostic. The
//! `input` and `render` modules are the crossterm front-end used by the
//! `maze` binary.

pub mod config;
pub mod error;
pub mod generator;
pub mod grid;
pub mod input;
pub mod render;
pub mod session;

pub use config::Config;
pub use error::MazeError;
pub use generator::generate;
pub use grid::{Cell, Dir, Grid, Pos};
pub use session::{MoveOutcome, Session};
