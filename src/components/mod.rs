pub mod app;
pub mod camera_controls;
pub mod canvas;
pub mod game_view;
pub mod legend;
pub mod legend_panel;
pub mod menu_overlay;
pub mod stats_panel;
pub mod tile_info_panel;

pub use app::App;
