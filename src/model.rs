//! Core map types: tiles and the grid that owns them.

use serde::{Deserialize, Serialize};

use crate::error::{Result, RtsError};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridSize {
    pub width: u32,
    pub height: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: u32,
    pub y: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TileKind {
    /// Open sea surrounding the island.
    Water,
    /// Buildable island land.
    Grass,
    /// Grass carrying a gold deposit.
    Gold,
    /// Unassigned terrain; every tile starts here before generation.
    Plain,
}

impl TileKind {
    pub fn label(self) -> &'static str {
        match self {
            TileKind::Water => "Water",
            TileKind::Grass => "Grass",
            TileKind::Gold => "Gold",
            TileKind::Plain => "Plain",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    pub pos: Position,
    pub kind: TileKind,
    pub selected: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "GridData")]
pub struct Grid {
    size: GridSize,
    /// Edge length of one tile in world pixels.
    tile_size: u32,
    /// Row-major tiles; length = width * height.
    tiles: Vec<Tile>,
}

/// Unchecked wire form of a `Grid`.
#[derive(Deserialize)]
struct GridData {
    size: GridSize,
    tile_size: u32,
    tiles: Vec<Tile>,
}

impl TryFrom<GridData> for Grid {
    type Error = RtsError;

    fn try_from(data: GridData) -> Result<Self> {
        let mut grid = Grid::new(data.size.width, data.size.height, data.tile_size)?;
        let layout_error = RtsError::TileLayout {
            columns: data.size.width,
            rows: data.size.height,
            found: data.tiles.len(),
        };
        if data.tiles.len() != grid.tiles.len() {
            return Err(layout_error);
        }
        for (slot, tile) in grid.tiles.iter_mut().zip(data.tiles) {
            if slot.pos != tile.pos {
                return Err(layout_error);
            }
            *slot = tile;
        }
        Ok(grid)
    }
}

impl Grid {
    /// Builds a fully populated grid of `Plain` tiles.
    pub fn new(columns: u32, rows: u32, tile_size: u32) -> Result<Self> {
        if columns == 0 || rows == 0 {
            return Err(RtsError::InvalidDimensions { columns, rows });
        }
        if tile_size == 0 {
            return Err(RtsError::InvalidTileSize);
        }
        let mut tiles = Vec::with_capacity(columns as usize * rows as usize);
        for y in 0..rows {
            for x in 0..columns {
                tiles.push(Tile {
                    pos: Position { x, y },
                    kind: TileKind::Plain,
                    selected: false,
                });
            }
        }
        Ok(Self {
            size: GridSize {
                width: columns,
                height: rows,
            },
            tile_size,
            tiles,
        })
    }

    pub fn size(&self) -> GridSize {
        self.size
    }

    pub fn tile_size(&self) -> u32 {
        self.tile_size
    }

    pub fn columns(&self) -> u32 {
        self.size.width
    }

    pub fn rows(&self) -> u32 {
        self.size.height
    }

    /// Map extent in world pixels.
    pub fn pixel_size(&self) -> (f64, f64) {
        let ts = self.tile_size as f64;
        (self.size.width as f64 * ts, self.size.height as f64 * ts)
    }

    fn idx(&self, x: u32, y: u32) -> Option<usize> {
        if x < self.size.width && y < self.size.height {
            Some((y * self.size.width + x) as usize)
        } else {
            None
        }
    }

    pub fn tile(&self, x: u32, y: u32) -> Option<&Tile> {
        let i = self.idx(x, y)?;
        Some(&self.tiles[i])
    }

    pub(crate) fn tile_mut(&mut self, x: u32, y: u32) -> Option<&mut Tile> {
        let i = self.idx(x, y)?;
        Some(&mut self.tiles[i])
    }

    pub fn tiles(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.iter()
    }

    /// Tile under a world pixel coordinate, or `None` outside the map.
    pub fn tile_at_world(&self, world_x: f64, world_y: f64) -> Option<&Tile> {
        if !world_x.is_finite() || !world_y.is_finite() {
            return None;
        }
        let ts = self.tile_size as f64;
        let tx = (world_x / ts).floor();
        let ty = (world_y / ts).floor();
        if tx < 0.0 || ty < 0.0 || tx >= self.size.width as f64 || ty >= self.size.height as f64 {
            return None;
        }
        self.tile(tx as u32, ty as u32)
    }

    /// Marks `pos` as the only selected tile. Returns false when `pos` is off the map.
    pub fn select(&mut self, pos: Position, previous: Option<Position>) -> bool {
        if self.idx(pos.x, pos.y).is_none() {
            return false;
        }
        if let Some(prev) = previous {
            if let Some(t) = self.tile_mut(prev.x, prev.y) {
                t.selected = false;
            }
        }
        if let Some(t) = self.tile_mut(pos.x, pos.y) {
            t.selected = true;
        }
        true
    }

    pub fn selected_count(&self) -> usize {
        self.tiles.iter().filter(|t| t.selected).count()
    }
}
