//! Viewport and coordinate transformation for the layout canvas.
//!
//! Converts between pixel coordinates (screen space, Y down) and world
//! coordinates (layout space, Y up), and scales the screen-space snap
//! sensitivity into world units.

use serde::{Deserialize, Serialize};
use std::fmt;

use ductkit_core::constants::DEFAULT_SNAP_SCREEN_DISTANCE;
use ductkit_core::{Bounds, Point};

use crate::snap::snap_distance_for_zoom;

const MIN_ZOOM: f64 = 0.01;
const MAX_ZOOM: f64 = 20.0;
const ZOOM_FACTOR: f64 = 1.2;
/// Fraction of the canvas left empty on each side by `fit_to_bounds`.
pub const VIEW_PADDING: f64 = 0.05;

/// Persisted part of the viewport, as written to layout files.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewportState {
    pub zoom: f64,
    pub pan_x: f64,
    pub pan_y: f64,
}

impl Default for ViewportState {
    fn default() -> Self {
        Self {
            zoom: 1.0,
            pan_x: 0.0,
            pan_y: 0.0,
        }
    }
}

/// Zoom and pan of the canvas.
#[derive(Debug, Clone)]
pub struct Viewport {
    zoom: f64,
    pan_x: f64,
    pan_y: f64,
    canvas_width: f64,
    canvas_height: f64,
    snap_screen_distance: f64,
}

impl Viewport {
    pub fn new(canvas_width: f64, canvas_height: f64) -> Self {
        Self {
            zoom: 1.0,
            pan_x: 0.0,
            pan_y: 0.0,
            canvas_width,
            canvas_height,
            snap_screen_distance: DEFAULT_SNAP_SCREEN_DISTANCE,
        }
    }

    pub fn canvas_width(&self) -> f64 {
        self.canvas_width
    }

    pub fn canvas_height(&self) -> f64 {
        self.canvas_height
    }

    pub fn set_canvas_size(&mut self, width: f64, height: f64) {
        self.canvas_width = width;
        self.canvas_height = height;
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    /// Sets the zoom level; values outside the supported range are ignored.
    pub fn set_zoom(&mut self, zoom: f64) {
        if zoom > MIN_ZOOM && zoom < MAX_ZOOM {
            self.zoom = zoom;
        }
    }

    pub fn zoom_in(&mut self) {
        self.set_zoom(self.zoom * ZOOM_FACTOR);
    }

    pub fn zoom_out(&mut self) {
        self.set_zoom(self.zoom / ZOOM_FACTOR);
    }

    pub fn pan_x(&self) -> f64 {
        self.pan_x
    }

    pub fn pan_y(&self) -> f64 {
        self.pan_y
    }

    pub fn set_pan(&mut self, x: f64, y: f64) {
        self.pan_x = x;
        self.pan_y = y;
    }

    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        self.pan_x += dx;
        self.pan_y += dy;
    }

    pub fn snap_screen_distance(&self) -> f64 {
        self.snap_screen_distance
    }

    pub fn set_snap_screen_distance(&mut self, pixels: f64) {
        if pixels > 0.0 {
            self.snap_screen_distance = pixels;
        }
    }

    /// Snap threshold in world units at the current zoom.
    pub fn snap_distance(&self) -> f64 {
        snap_distance_for_zoom(self.snap_screen_distance, self.zoom)
    }

    /// Converts pixel coordinates to world coordinates.
    ///
    /// ```text
    /// world_x = (pixel_x - pan_x) / zoom
    /// world_y = (canvas_height - pixel_y - pan_y) / zoom
    /// ```
    pub fn pixel_to_world(&self, pixel_x: f64, pixel_y: f64) -> Point {
        let world_x = (pixel_x - self.pan_x) / self.zoom;
        let world_y = (self.canvas_height - pixel_y - self.pan_y) / self.zoom;
        Point::new(world_x, world_y)
    }

    /// Inverse of [`pixel_to_world`](Self::pixel_to_world).
    pub fn world_to_pixel(&self, world: Point) -> (f64, f64) {
        let pixel_x = world.x * self.zoom + self.pan_x;
        let pixel_y = self.canvas_height - (world.y * self.zoom + self.pan_y);
        (pixel_x, pixel_y)
    }

    /// Zooms and pans so `bounds` fills the canvas, leaving `padding`
    /// (a fraction of the canvas) free on every side. Degenerate bounds
    /// only re-centre.
    pub fn fit_to_bounds(&mut self, bounds: &Bounds, padding: f64) {
        let (width, height) = (bounds.width(), bounds.height());
        if width <= 0.0 || height <= 0.0 {
            let c = bounds.center();
            self.center_on(c);
            return;
        }

        let usable = 1.0 - padding * 2.0;
        let zoom_x = self.canvas_width * usable / width;
        let zoom_y = self.canvas_height * usable / height;
        self.zoom = zoom_x.min(zoom_y).clamp(MIN_ZOOM, MAX_ZOOM);
        self.center_on(bounds.center());
    }

    /// Keeps `world` under the same pixel while changing zoom.
    pub fn zoom_to_point(&mut self, world: Point, new_zoom: f64) {
        if new_zoom <= MIN_ZOOM || new_zoom >= MAX_ZOOM {
            return;
        }
        let (pixel_x, pixel_y) = self.world_to_pixel(world);
        self.zoom = new_zoom;
        self.pan_x = pixel_x - world.x * new_zoom;
        self.pan_y = self.canvas_height - pixel_y - world.y * new_zoom;
    }

    pub fn center_on(&mut self, world: Point) {
        self.pan_x = self.canvas_width / 2.0 - world.x * self.zoom;
        self.pan_y = self.canvas_height / 2.0 - world.y * self.zoom;
    }

    pub fn state(&self) -> ViewportState {
        ViewportState {
            zoom: self.zoom,
            pan_x: self.pan_x,
            pan_y: self.pan_y,
        }
    }

    /// Restores zoom and pan from a layout file. Out-of-range zoom falls
    /// back to 1:1.
    pub fn restore(&mut self, state: &ViewportState) {
        self.zoom = if state.zoom > MIN_ZOOM && state.zoom < MAX_ZOOM {
            state.zoom
        } else {
            1.0
        };
        self.pan_x = state.pan_x;
        self.pan_y = state.pan_y;
    }
}

impl fmt::Display for Viewport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Zoom: {:.2}x | Pan: ({:.1}, {:.1})",
            self.zoom, self.pan_x, self.pan_y
        )
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1200.0, 800.0)
    }
}
