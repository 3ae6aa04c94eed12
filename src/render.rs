//! Frame drawing against an abstract 2D surface.

use crate::model::{Grid, TileKind};
use crate::state::{ScreenRect, Viewport};

pub const BACKGROUND_COLOR: &str = "#0e1116";
pub const SELECTED_COLOR: &str = "#888888";
pub const TILE_BORDER_COLOR: &str = "#222222";
pub const MENU_OVERLAY_COLOR: &str = "rgba(0,0,0,0.7)";

/// Drawing primitives the renderer needs; the browser canvas is one implementation.
pub trait Surface {
    fn clear(&mut self, color: &str);
    fn fill_rect(&mut self, rect: ScreenRect, color: &str);
    fn stroke_rect(&mut self, rect: ScreenRect, color: &str);
    /// Covers the whole surface, e.g. to dim the map under the menu.
    fn fill_overlay(&mut self, color: &str);
}

pub fn kind_color(kind: TileKind) -> &'static str {
    match kind {
        TileKind::Water => "#2a5caa",
        TileKind::Grass => "#3a7d3a",
        TileKind::Gold => "#aaaa00",
        TileKind::Plain => "#555555",
    }
}

pub fn tile_color(kind: TileKind, selected: bool) -> &'static str {
    if selected {
        SELECTED_COLOR
    } else {
        kind_color(kind)
    }
}

/// Draws every tile intersecting the viewport. Returns the number of tiles drawn.
pub fn draw_grid<S: Surface + ?Sized>(grid: &Grid, viewport: &Viewport, surface: &mut S) -> usize {
    let range = viewport.visible_tiles(grid);
    if range.is_empty() {
        return 0;
    }
    let mut drawn = 0;
    for pos in range.positions() {
        let Some(tile) = grid.tile(pos.x, pos.y) else {
            continue;
        };
        let rect = viewport.tile_screen_rect(pos.x, pos.y, grid.tile_size());
        surface.fill_rect(rect, tile_color(tile.kind, tile.selected));
        surface.stroke_rect(rect, TILE_BORDER_COLOR);
        drawn += 1;
    }
    drawn
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::model::Position;

    #[derive(Debug, Clone, PartialEq)]
    pub enum Op {
        Clear(String),
        Fill(ScreenRect, String),
        Stroke(ScreenRect, String),
        Overlay(String),
    }

    #[derive(Default)]
    pub struct RecordingSurface {
        pub ops: Vec<Op>,
    }

    impl RecordingSurface {
        pub fn fills(&self) -> Vec<(ScreenRect, String)> {
            self.ops
                .iter()
                .filter_map(|op| match op {
                    Op::Fill(r, c) => Some((*r, c.clone())),
                    _ => None,
                })
                .collect()
        }
    }

    impl Surface for RecordingSurface {
        fn clear(&mut self, color: &str) {
            self.ops.push(Op::Clear(color.to_string()));
        }
        fn fill_rect(&mut self, rect: ScreenRect, color: &str) {
            self.ops.push(Op::Fill(rect, color.to_string()));
        }
        fn stroke_rect(&mut self, rect: ScreenRect, color: &str) {
            self.ops.push(Op::Stroke(rect, color.to_string()));
        }
        fn fill_overlay(&mut self, color: &str) {
            self.ops.push(Op::Overlay(color.to_string()));
        }
    }

    #[test]
    fn colors_follow_kind_and_selection() {
        assert_eq!(tile_color(TileKind::Grass, false), "#3a7d3a");
        assert_eq!(tile_color(TileKind::Gold, false), "#aaaa00");
        assert_eq!(tile_color(TileKind::Plain, false), "#555555");
        assert_eq!(tile_color(TileKind::Water, false), "#2a5caa");
        for kind in [TileKind::Water, TileKind::Grass, TileKind::Gold, TileKind::Plain] {
            assert_eq!(tile_color(kind, true), SELECTED_COLOR);
        }
    }

    #[test]
    fn draws_each_visible_tile_once() {
        let mut grid = Grid::new(4, 3, 32).unwrap();
        grid.select(Position { x: 1, y: 2 }, None);
        let mut vp = Viewport::new(800.0, 600.0, 3.0);
        vp.reset_to_fit(128.0, 96.0);
        let mut surface = RecordingSurface::default();
        assert_eq!(draw_grid(&grid, &vp, &mut surface), 12);
        let fills = surface.fills();
        assert_eq!(fills.len(), 12);
        let selected: Vec<_> = fills.iter().filter(|(_, c)| c == SELECTED_COLOR).collect();
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].0, ScreenRect { x: 32.0, y: 64.0, w: 32.0, h: 32.0 });
        let strokes = surface
            .ops
            .iter()
            .filter(|op| matches!(op, Op::Stroke(_, c) if c == TILE_BORDER_COLOR))
            .count();
        assert_eq!(strokes, 12);
    }

    #[test]
    fn offscreen_tiles_are_culled() {
        let grid = Grid::new(20, 20, 32).unwrap();
        let mut vp = Viewport::new(320.0, 320.0, 2.0);
        vp.reset_to_fit(640.0, 640.0);
        vp.set_zoom(2.0, 0.0, 0.0);
        assert_eq!(vp.scale(), 1.0);
        let mut surface = RecordingSurface::default();
        assert_eq!(draw_grid(&grid, &vp, &mut surface), 100);
    }
}
