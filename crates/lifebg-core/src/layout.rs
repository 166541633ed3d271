//! Viewport-to-board layout and per-cell canvas geometry.
//!
//! Square boards place cell `(c, r)` at `(c * size, r * size)`. Hex boards use
//! flat-top hexagons in odd-q offset layout: columns are `1.5 * size` apart,
//! rows are `sqrt(3) * size` apart, and odd columns sit half a row lower.

use crate::error::{Error, Result};
use crate::types::{CellState, Dimensions, Position};
use serde::{Deserialize, Serialize};

/// Viewports narrower than this get the small hex size
pub const NARROW_VIEWPORT_PX: f64 = 600.0;
pub const NARROW_HEX_SIZE: f64 = 5.0;
pub const WIDE_HEX_SIZE: f64 = 8.0;
pub const DEFAULT_CELL_SIZE: f64 = 20.0;
/// Largest board a viewport may ask for
pub const MAX_BOARD_CELLS: usize = 4_000_000;

/// Browser viewport size in CSS pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn validate(&self) -> Result<()> {
        let ok = |v: f64| v.is_finite() && v > 0.0;
        if ok(self.width) && ok(self.height) {
            Ok(())
        } else {
            Err(Error::Validation(format!(
                "viewport must be positive, got {}x{}",
                self.width, self.height
            )))
        }
    }
}

/// 2D point in canvas pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// A cell as the canvas sees it
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Rect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        fill: Option<&'static str>,
    },
    Hexagon {
        center: Point,
        vertices: [Point; 6],
        fill: Option<&'static str>,
    },
}

impl Shape {
    pub fn fill(&self) -> Option<&'static str> {
        match self {
            Shape::Rect { fill, .. } | Shape::Hexagon { fill, .. } => *fill,
        }
    }
}

/// Cell geometry of a page background
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GridLayout {
    Square { cell_size: f64 },
    /// `hex_size` is the center-to-vertex distance
    Hex { hex_size: f64 },
}

impl GridLayout {
    /// Hex layout sized for the viewport, smaller on narrow screens
    pub fn responsive_hex(viewport: Viewport) -> Self {
        let hex_size = if viewport.width < NARROW_VIEWPORT_PX {
            NARROW_HEX_SIZE
        } else {
            WIDE_HEX_SIZE
        };
        GridLayout::Hex { hex_size }
    }

    pub fn validate(&self) -> Result<()> {
        let size = match *self {
            GridLayout::Square { cell_size } => cell_size,
            GridLayout::Hex { hex_size } => hex_size,
        };
        if size.is_finite() && size > 0.0 {
            Ok(())
        } else {
            Err(Error::Validation(format!("cell size must be positive, got {}", size)))
        }
    }

    /// Horizontal distance between adjacent columns
    pub fn col_spacing(&self) -> f64 {
        match *self {
            GridLayout::Square { cell_size } => cell_size,
            GridLayout::Hex { hex_size } => 1.5 * hex_size,
        }
    }

    /// Vertical distance between adjacent rows
    pub fn row_spacing(&self) -> f64 {
        match *self {
            GridLayout::Square { cell_size } => cell_size,
            GridLayout::Hex { hex_size } => hex_height(hex_size),
        }
    }

    /// Board size needed to cover the viewport, plus `overscan` extra cells per axis
    pub fn dimensions(&self, viewport: Viewport, overscan: u32) -> Result<Dimensions> {
        let cover = |extent: f64, spacing: f64| -> f64 {
            ((extent / spacing).ceil().max(0.0) + overscan as f64).max(1.0)
        };
        let cols = cover(viewport.width, self.col_spacing());
        let rows = cover(viewport.height, self.row_spacing());

        if cols * rows > MAX_BOARD_CELLS as f64 {
            return Err(Error::Validation(format!(
                "viewport {}x{} needs a {}x{} board, above the {} cell limit",
                viewport.width, viewport.height, cols, rows, MAX_BOARD_CELLS
            )));
        }
        Ok(Dimensions::new(cols as i32, rows as i32))
    }

    pub fn cell_shape(&self, pos: Position, state: CellState) -> Shape {
        let fill = state.fill_color();
        match *self {
            GridLayout::Square { cell_size } => Shape::Rect {
                x: pos.col as f64 * cell_size,
                y: pos.row as f64 * cell_size,
                width: cell_size,
                height: cell_size,
                fill,
            },
            GridLayout::Hex { hex_size } => {
                let center = hex_center(pos, hex_size);
                Shape::Hexagon {
                    center,
                    vertices: hex_vertices(center, hex_size),
                    fill,
                }
            }
        }
    }
}

pub fn hex_height(hex_size: f64) -> f64 {
    3f64.sqrt() * hex_size
}

/// Pixel center of a flat-top hex in odd-q offset coordinates
pub fn hex_center(pos: Position, hex_size: f64) -> Point {
    let height = hex_height(hex_size);
    let mut y = height * pos.row as f64;
    if pos.col.rem_euclid(2) == 1 {
        y += height / 2.0;
    }
    Point {
        x: hex_size * 1.5 * pos.col as f64,
        y,
    }
}

/// Corners of a flat-top hexagon, starting at 0 degrees and going clockwise on screen
pub fn hex_vertices(center: Point, hex_size: f64) -> [Point; 6] {
    std::array::from_fn(|i| {
        let angle = (60.0 * i as f64).to_radians();
        Point {
            x: center.x + hex_size * angle.cos(),
            y: center.y + hex_size * angle.sin(),
        }
    })
}
