//! Terminal Pac-Man: a tile maze, pellets, power pills, a timed fruit and a
//! roster of randomly wandering ghosts, driven one tick at a time.

pub mod actor;
pub mod config;
pub mod constants;
pub mod encounter;
pub mod error;
pub mod game;
pub mod grid;
pub mod input;
pub mod map;
pub mod movement;
pub mod pellets;
pub mod render;
pub mod tick;

pub use error::LoadError;
pub use game::{Game, Phase};
pub use grid::{Dir, Pos};
pub use map::{load_map, parse_map, Layout};
