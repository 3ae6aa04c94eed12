//! One game session: map, camera, selection and the input queue feeding them.
//!
//! Input handlers never touch the state directly. They queue an
//! [`InputCommand`] and the frame loop applies the whole queue in
//! [`Session::update`] before calling [`Session::render`], so a frame never
//! observes a half-applied event.

use std::collections::VecDeque;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, trace, warn};

use crate::config::GameConfig;
use crate::error::Result;
use crate::mapgen;
use crate::model::{Grid, Position, Tile};
use crate::render::{self, Surface};
use crate::state::Viewport;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Menu,
    Playing,
}

#[derive(Clone, Debug, PartialEq)]
pub enum InputCommand {
    /// Select the tile under a screen point.
    Click { x: f64, y: f64 },
    /// Pointer drag by a screen delta; the map follows the pointer.
    Drag { dx: f64, dy: f64 },
    /// Move the camera by a screen delta (buttons, arrow keys).
    Pan { dx: f64, dy: f64 },
    /// Multiply the scale, pivoting on a screen point or the screen center.
    Zoom { factor: f64, pivot: Option<(f64, f64)> },
    /// Generate a new map and leave the menu.
    Start,
    /// Open the menu while playing. Has no effect in the menu.
    ToggleMenu,
    Resize { width: f64, height: f64 },
    /// Re-fit the current map to the screen.
    Center,
}

pub struct Session {
    config: GameConfig,
    phase: Phase,
    grid: Option<Grid>,
    viewport: Viewport,
    selected: Option<Position>,
    rng: ChaCha8Rng,
    pending: VecDeque<InputCommand>,
    /// Number of maps generated so far.
    run_id: u32,
}

impl Session {
    /// `seed` is used unless the config pins one.
    pub fn new(config: GameConfig, seed: u64) -> Result<Self> {
        config.validate()?;
        let seed = config.seed.unwrap_or(seed);
        let viewport = Viewport::new(800.0, 600.0, config.max_zoom_ratio);
        Ok(Self {
            config,
            phase: Phase::Menu,
            grid: None,
            viewport,
            selected: None,
            rng: ChaCha8Rng::seed_from_u64(seed),
            pending: VecDeque::new(),
            run_id: 0,
        })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn grid(&self) -> Option<&Grid> {
        self.grid.as_ref()
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn selected(&self) -> Option<Position> {
        self.selected
    }

    pub fn selected_tile(&self) -> Option<&Tile> {
        let pos = self.selected?;
        self.grid.as_ref()?.tile(pos.x, pos.y)
    }

    pub fn run_id(&self) -> u32 {
        self.run_id
    }

    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    pub fn push(&mut self, cmd: InputCommand) {
        self.pending.push_back(cmd);
    }

    /// Applies every queued command in arrival order. Returns how many were applied.
    pub fn update(&mut self) -> usize {
        let mut applied = 0;
        while let Some(cmd) = self.pending.pop_front() {
            if let Err(err) = self.apply(cmd) {
                warn!(%err, "input command rejected");
            }
            applied += 1;
        }
        applied
    }

    pub fn apply(&mut self, cmd: InputCommand) -> Result<()> {
        match cmd {
            InputCommand::Start => {
                if self.phase == Phase::Menu {
                    self.start()?;
                }
            }
            InputCommand::ToggleMenu => {
                if self.phase == Phase::Playing {
                    self.phase = Phase::Menu;
                    debug!(run_id = self.run_id, "menu opened");
                }
            }
            InputCommand::Resize { width, height } => self.viewport.resize(width, height),
            _ if self.phase != Phase::Playing => {}
            InputCommand::Click { x, y } => self.select_at(x, y),
            InputCommand::Drag { dx, dy } => self.viewport.pan(-dx, -dy),
            InputCommand::Pan { dx, dy } => self.viewport.pan(dx, dy),
            InputCommand::Zoom { factor, pivot } => match pivot {
                Some((px, py)) => self.viewport.set_zoom(factor, px, py),
                None => self.viewport.zoom_at_center(factor),
            },
            InputCommand::Center => {
                if let Some(grid) = &self.grid {
                    let (w, h) = grid.pixel_size();
                    self.viewport.reset_to_fit(w, h);
                }
            }
        }
        Ok(())
    }

    fn start(&mut self) -> Result<()> {
        let grid = mapgen::generate(
            self.config.columns,
            self.config.rows,
            self.config.tile_size,
            &mut self.rng,
        )?;
        let (w, h) = grid.pixel_size();
        self.viewport.reset_to_fit(w, h);
        self.grid = Some(grid);
        self.selected = None;
        self.phase = Phase::Playing;
        self.run_id += 1;
        debug!(run_id = self.run_id, scale = self.viewport.scale(), "session started");
        Ok(())
    }

    fn select_at(&mut self, sx: f64, sy: f64) {
        let Some(grid) = self.grid.as_mut() else {
            return;
        };
        let Some(pos) = self.viewport.hit_test(grid, sx, sy) else {
            return;
        };
        if grid.select(pos, self.selected) {
            trace!(x = pos.x, y = pos.y, "tile selected");
            self.selected = Some(pos);
        }
    }

    pub fn render<S: Surface + ?Sized>(&self, surface: &mut S) {
        surface.clear(render::BACKGROUND_COLOR);
        if let Some(grid) = &self.grid {
            render::draw_grid(grid, &self.viewport, surface);
        }
        if self.phase == Phase::Menu {
            surface.fill_overlay(render::MENU_OVERLAY_COLOR);
        }
    }
}
