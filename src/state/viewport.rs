use std::ops::Range;

use crate::model::{Grid, Position};

/// World/screen transform with scale and camera kept inside the map bounds.
///
/// `camera_x`/`camera_y` are the world pixel coordinates shown at the top-left
/// corner of the screen. Every mutation re-clamps both scale and camera.
#[derive(Debug, Clone, PartialEq)]
pub struct Viewport {
    scale: f64,
    camera_x: f64,
    camera_y: f64,
    width: f64,
    height: f64,
    map_width: f64,
    map_height: f64,
    max_zoom_ratio: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenRect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

/// Half-open column and row ranges of tiles intersecting the screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileRange {
    pub columns: Range<u32>,
    pub rows: Range<u32>,
}

impl TileRange {
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty() || self.rows.is_empty()
    }

    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        self.rows
            .clone()
            .flat_map(move |y| self.columns.clone().map(move |x| Position { x, y }))
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(800.0, 600.0, 3.0)
    }
}

impl Viewport {
    pub fn new(width: f64, height: f64, max_zoom_ratio: f64) -> Self {
        Self {
            scale: 1.0,
            camera_x: 0.0,
            camera_y: 0.0,
            width: width.max(0.0),
            height: height.max(0.0),
            map_width: 0.0,
            map_height: 0.0,
            max_zoom_ratio: max_zoom_ratio.max(1.0),
        }
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn camera(&self) -> (f64, f64) {
        (self.camera_x, self.camera_y)
    }

    pub fn size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    pub fn map_size(&self) -> (f64, f64) {
        (self.map_width, self.map_height)
    }

    /// Scale at which the whole map fits on screen, never above 1.
    pub fn min_scale(&self) -> f64 {
        if self.map_width <= 0.0 || self.map_height <= 0.0 || self.width <= 0.0 || self.height <= 0.0 {
            return 1.0;
        }
        (self.width / self.map_width)
            .min(self.height / self.map_height)
            .min(1.0)
    }

    pub fn max_scale(&self) -> f64 {
        self.min_scale() * self.max_zoom_ratio
    }

    pub fn screen_to_world(&self, sx: f64, sy: f64) -> (f64, f64) {
        (sx / self.scale + self.camera_x, sy / self.scale + self.camera_y)
    }

    pub fn world_to_screen(&self, wx: f64, wy: f64) -> (f64, f64) {
        ((wx - self.camera_x) * self.scale, (wy - self.camera_y) * self.scale)
    }

    /// Multiplies the scale by `factor`, keeping the world point under the pivot fixed.
    pub fn set_zoom(&mut self, factor: f64, pivot_x: f64, pivot_y: f64) {
        if !factor.is_finite() || factor <= 0.0 {
            return;
        }
        let (world_x, world_y) = self.screen_to_world(pivot_x, pivot_y);
        self.scale = (self.scale * factor).clamp(self.min_scale(), self.max_scale());
        self.camera_x = world_x - pivot_x / self.scale;
        self.camera_y = world_y - pivot_y / self.scale;
        self.clamp_camera();
    }

    pub fn zoom_at_center(&mut self, factor: f64) {
        self.set_zoom(factor, self.width * 0.5, self.height * 0.5);
    }

    pub fn pan(&mut self, dx: f64, dy: f64) {
        if !dx.is_finite() || !dy.is_finite() {
            return;
        }
        self.camera_x += dx / self.scale;
        self.camera_y += dy / self.scale;
        self.clamp_camera();
    }

    /// Keeps the visible window inside the map. A map narrower than the
    /// screen pins to the left/top edge.
    pub fn clamp_camera(&mut self) {
        let max_x = (self.map_width - self.width / self.scale).max(0.0);
        let max_y = (self.map_height - self.height / self.scale).max(0.0);
        self.camera_x = if self.camera_x.is_finite() {
            self.camera_x.clamp(0.0, max_x)
        } else {
            0.0
        };
        self.camera_y = if self.camera_y.is_finite() {
            self.camera_y.clamp(0.0, max_y)
        } else {
            0.0
        };
    }

    /// Fits a freshly generated map on screen and centers on it.
    pub fn reset_to_fit(&mut self, map_width: f64, map_height: f64) {
        self.map_width = map_width.max(0.0);
        self.map_height = map_height.max(0.0);
        self.scale = self.min_scale();
        self.camera_x = (self.map_width - self.width / self.scale) * 0.5;
        self.camera_y = (self.map_height - self.height / self.scale) * 0.5;
        self.clamp_camera();
    }

    pub fn resize(&mut self, width: f64, height: f64) {
        if !width.is_finite() || !height.is_finite() {
            return;
        }
        self.width = width.max(0.0);
        self.height = height.max(0.0);
        self.scale = self.scale.clamp(self.min_scale(), self.max_scale());
        self.clamp_camera();
    }

    /// Tile position under a screen point, if any.
    pub fn hit_test(&self, grid: &Grid, sx: f64, sy: f64) -> Option<Position> {
        let (wx, wy) = self.screen_to_world(sx, sy);
        grid.tile_at_world(wx, wy).map(|t| t.pos)
    }

    pub fn tile_screen_rect(&self, column: u32, row: u32, tile_size: u32) -> ScreenRect {
        let ts = tile_size as f64;
        let (x, y) = self.world_to_screen(column as f64 * ts, row as f64 * ts);
        ScreenRect {
            x,
            y,
            w: ts * self.scale,
            h: ts * self.scale,
        }
    }

    pub fn visible_tiles(&self, grid: &Grid) -> TileRange {
        let ts = grid.tile_size() as f64;
        let (left, top) = self.screen_to_world(0.0, 0.0);
        let (right, bottom) = self.screen_to_world(self.width, self.height);
        let span = |lo: f64, hi: f64, limit: u32| {
            let start = (lo / ts).floor().max(0.0).min(limit as f64) as u32;
            let end = (hi / ts).ceil().max(0.0).min(limit as f64) as u32;
            start..end.max(start)
        };
        TileRange {
            columns: span(left, right, grid.columns()),
            rows: span(top, bottom, grid.rows()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;

    const EPS: f64 = 1e-6;

    fn big_map_viewport() -> Viewport {
        let mut vp = Viewport::new(800.0, 600.0, 3.0);
        vp.reset_to_fit(6400.0, 6400.0);
        vp
    }

    fn assert_inside(vp: &Viewport) {
        let (cx, cy) = vp.camera();
        let (w, h) = vp.size();
        let (mw, mh) = vp.map_size();
        assert!(cx >= 0.0 && cy >= 0.0, "camera went negative: {cx},{cy}");
        if mw > w / vp.scale() {
            assert!(cx + w / vp.scale() <= mw + EPS, "x overflow at scale {}", vp.scale());
        }
        if mh > h / vp.scale() {
            assert!(cy + h / vp.scale() <= mh + EPS, "y overflow at scale {}", vp.scale());
        }
    }

    #[test]
    fn min_scale_fits_large_map() {
        let vp = big_map_viewport();
        assert!((vp.min_scale() - 0.09375).abs() < EPS);
        assert!((vp.max_scale() - 0.28125).abs() < EPS);
        assert!((vp.scale() - 0.09375).abs() < EPS);
    }

    #[test]
    fn zooming_out_clamps_to_min_scale() {
        let mut vp = big_map_viewport();
        vp.set_zoom(0.5, 400.0, 300.0);
        assert!((vp.scale() - 0.09375).abs() < EPS);
        vp.set_zoom(100.0, 400.0, 300.0);
        assert!((vp.scale() - 0.28125).abs() < EPS);
        assert_inside(&vp);
    }

    #[test]
    fn small_map_caps_min_scale_at_one() {
        let mut vp = Viewport::new(800.0, 600.0, 3.0);
        vp.reset_to_fit(320.0, 320.0);
        assert_eq!(vp.min_scale(), 1.0);
        assert_eq!(vp.max_scale(), 3.0);
        assert_eq!(vp.camera(), (0.0, 0.0));
    }

    #[test]
    fn zoom_keeps_pivot_fixed() {
        let mut vp = big_map_viewport();
        vp.set_zoom(2.0, 400.0, 300.0);
        vp.pan(300.0, 200.0);
        let pivot = (250.0, 180.0);
        let before = vp.screen_to_world(pivot.0, pivot.1);
        vp.set_zoom(1.2, pivot.0, pivot.1);
        let after = vp.screen_to_world(pivot.0, pivot.1);
        assert!((before.0 - after.0).abs() < EPS);
        assert!((before.1 - after.1).abs() < EPS);
    }

    #[test]
    fn invalid_zoom_factor_is_ignored() {
        let mut vp = big_map_viewport();
        let snapshot = vp.clone();
        vp.set_zoom(0.0, 10.0, 10.0);
        vp.set_zoom(-2.0, 10.0, 10.0);
        vp.set_zoom(f64::NAN, 10.0, 10.0);
        assert_eq!(vp, snapshot);
    }

    #[test]
    fn pan_divides_by_scale_and_clamps() {
        let mut vp = big_map_viewport();
        vp.set_zoom(3.0, 0.0, 0.0);
        let (cx, cy) = vp.camera();
        vp.pan(100.0, 50.0);
        let (nx, ny) = vp.camera();
        assert!((nx - (cx + 100.0 / vp.scale())).abs() < EPS);
        assert!((ny - (cy + 50.0 / vp.scale())).abs() < EPS);
        vp.pan(-1.0e9, -1.0e9);
        assert_eq!(vp.camera(), (0.0, 0.0));
        vp.pan(1.0e9, 1.0e9);
        assert_inside(&vp);
    }

    #[test]
    fn camera_stays_inside_after_random_input() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let mut vp = big_map_viewport();
        for _ in 0..500 {
            if rng.random_bool(0.5) {
                let factor = rng.random_range(0.5..2.0);
                vp.set_zoom(factor, rng.random_range(0.0..800.0), rng.random_range(0.0..600.0));
            } else {
                vp.pan(rng.random_range(-900.0..900.0), rng.random_range(-900.0..900.0));
            }
            assert!(vp.scale() >= vp.min_scale() - EPS && vp.scale() <= vp.max_scale() + EPS);
            assert_inside(&vp);
        }
    }

    #[test]
    fn map_smaller_than_screen_pins_to_origin() {
        let mut vp = Viewport::new(1920.0, 1080.0, 3.0);
        vp.reset_to_fit(1024.0, 768.0);
        vp.pan(50.0, 50.0);
        assert_eq!(vp.camera(), (0.0, 0.0));
    }

    #[test]
    fn click_scenario_selects_first_tile() {
        let grid = Grid::new(10, 10, 32).unwrap();
        let mut vp = Viewport::new(800.0, 600.0, 3.0);
        vp.reset_to_fit(320.0, 320.0);
        assert_eq!(vp.scale(), 1.0);
        assert_eq!(vp.hit_test(&grid, 16.0, 16.0), Some(Position { x: 0, y: 0 }));
        assert_eq!(vp.hit_test(&grid, 330.0, 16.0), None);
    }

    #[test]
    fn hit_test_applies_zoom_and_camera() {
        let grid = Grid::new(20, 20, 32).unwrap();
        let mut vp = Viewport::new(320.0, 320.0, 2.0);
        vp.reset_to_fit(640.0, 640.0);
        assert_eq!(vp.hit_test(&grid, 16.0, 16.0), Some(Position { x: 1, y: 1 }));
        vp.set_zoom(2.0, 0.0, 0.0);
        vp.pan(64.0, 32.0);
        assert_eq!(vp.camera(), (64.0, 32.0));
        assert_eq!(vp.hit_test(&grid, 16.0, 16.0), Some(Position { x: 2, y: 1 }));
        assert_eq!(vp.hit_test(&grid, 319.0, 319.0), Some(Position { x: 11, y: 10 }));
        assert_eq!(vp.hit_test(&grid, -1.0, 0.0), Some(Position { x: 1, y: 1 }));
    }

    #[test]
    fn tile_rect_follows_transform() {
        let mut vp = big_map_viewport();
        vp.set_zoom(2.0, 0.0, 0.0);
        vp.pan(64.0 * vp.scale(), 0.0);
        let rect = vp.tile_screen_rect(3, 0, 32);
        let s = vp.scale();
        assert!((rect.x - (96.0 - 64.0) * s).abs() < EPS);
        assert!((rect.w - 32.0 * s).abs() < EPS);
        assert!(rect.y.abs() < EPS);
    }

    #[test]
    fn visible_range_covers_screen_only() {
        let grid = Grid::new(200, 200, 32).unwrap();
        let mut vp = Viewport::new(800.0, 600.0, 20.0);
        vp.reset_to_fit(6400.0, 6400.0);
        let all = vp.visible_tiles(&grid);
        assert_eq!(all.rows, 0..200);
        vp.set_zoom(8.0, 0.0, 0.0);
        assert_eq!(vp.scale(), 0.75);
        let range = vp.visible_tiles(&grid);
        assert_eq!(range.columns, 0..34);
        assert_eq!(range.rows, 0..25);
        assert_eq!(range.positions().count(), 34 * 25);
    }

    #[test]
    fn resize_reclamps() {
        let mut vp = big_map_viewport();
        vp.set_zoom(3.0, 800.0, 600.0);
        vp.resize(400.0, 300.0);
        assert!(vp.scale() <= vp.max_scale() + EPS);
        assert_inside(&vp);
    }
}
