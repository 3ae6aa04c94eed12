// Mouse press/drag tracking for the game canvas

/// Movement (screen pixels) after which a left-button press counts as a drag.
pub const DRAG_THRESHOLD: f64 = 4.0;

#[derive(Default, Debug, Clone)]
pub struct PointerState {
    pub down: bool,
    /// Right/middle presses always pan; left presses pan only past the threshold.
    pub pan_button: bool,
    pub dragging: bool,
    pub start_x: f64,
    pub start_y: f64,
    pub last_x: f64,
    pub last_y: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerRelease {
    Click { x: f64, y: f64 },
    DragEnd,
    Idle,
}

impl PointerState {
    pub fn press(&mut self, x: f64, y: f64, button: i16) {
        self.down = true;
        self.pan_button = button != 0;
        self.dragging = self.pan_button;
        self.start_x = x;
        self.start_y = y;
        self.last_x = x;
        self.last_y = y;
    }

    /// Returns the screen delta to pan by, once the press has become a drag.
    pub fn move_to(&mut self, x: f64, y: f64) -> Option<(f64, f64)> {
        if !self.down {
            return None;
        }
        if !self.dragging {
            let moved = (x - self.start_x).hypot(y - self.start_y);
            if moved < DRAG_THRESHOLD {
                return None;
            }
            self.dragging = true;
        }
        let dx = x - self.last_x;
        let dy = y - self.last_y;
        self.last_x = x;
        self.last_y = y;
        Some((dx, dy))
    }

    pub fn release(&mut self) -> PointerRelease {
        if !self.down {
            return PointerRelease::Idle;
        }
        let out = if self.dragging {
            PointerRelease::DragEnd
        } else {
            PointerRelease::Click {
                x: self.start_x,
                y: self.start_y,
            }
        };
        *self = Self::default();
        out
    }
}
