//! Homebrew RTS: a procedurally generated island map with camera pan, zoom
//! and tile selection, rendered to a browser canvas.

pub mod components;
pub mod config;
pub mod error;
pub mod logging;
pub mod mapgen;
pub mod model;
pub mod render;
pub mod session;
pub mod state;
pub mod util;

pub use config::GameConfig;
pub use error::{Result, RtsError};
pub use model::{Grid, Position, Tile, TileKind};
pub use session::{InputCommand, Phase, Session};
pub use state::Viewport;
