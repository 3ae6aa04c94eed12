pub mod pointer;
pub mod viewport;

pub use pointer::{PointerRelease, PointerState};
pub use viewport::{ScreenRect, TileRange, Viewport};
