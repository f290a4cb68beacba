// Tile coverage for the poster wall.
// The wall container is rotated in 3-D, scaled up, and offset by the overscan on every side,
// so the grid must cover the transformed area, not just the window.

use serde::{Deserialize, Serialize};

use crate::types::{Viewport, WallConfig};

/// Inputs to the coverage calculation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridSpec {
    pub viewport: Viewport,
    pub overscan: f64,
    pub scale_factor: f64,
    pub tile_width: f64,
    pub tile_height: f64,
    pub safety_margin: u32,
}

impl GridSpec {
    /// Home and about pages: 1.3x with 10 spare tiles per axis.
    pub fn standard(viewport: Viewport) -> Self {
        GridSpec::from_config(viewport, &WallConfig::default())
    }

    /// Sign-in page: heavier zoom, 1.8x with 15 spare tiles per axis.
    pub fn sign_in(viewport: Viewport) -> Self {
        GridSpec {
            scale_factor: 1.8,
            safety_margin: 15,
            ..GridSpec::standard(viewport)
        }
    }

    pub fn from_config(viewport: Viewport, config: &WallConfig) -> Self {
        GridSpec {
            viewport,
            overscan: config.overscan,
            scale_factor: config.scale_factor,
            tile_width: config.tile_width,
            tile_height: config.tile_height,
            safety_margin: config.safety_margin,
        }
    }

    /// Width that must be covered once overscan and scale are applied.
    pub fn effective_width(&self) -> f64 {
        (self.viewport.width + 2.0 * self.overscan) * self.scale_factor
    }

    /// Height that must be covered once overscan and scale are applied.
    pub fn effective_height(&self) -> f64 {
        (self.viewport.height + 2.0 * self.overscan) * self.scale_factor
    }
}

/// Result of a coverage calculation. Rebuilt from scratch on every resize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct TileGrid {
    pub columns: u32,
    pub rows: u32,
    pub required_tile_count: usize,
}

impl TileGrid {
    pub fn empty() -> Self {
        TileGrid::default()
    }

    pub fn is_empty(&self) -> bool {
        self.required_tile_count == 0
    }
}

/// Compute the smallest tile grid covering the transformed viewport.
///
/// A zero-area viewport needs no tiles. Non-positive tile sizes are treated the
/// same way since nothing can be laid out with them.
pub fn compute_grid(spec: &GridSpec) -> TileGrid {
    if spec.viewport.is_degenerate() || !(spec.tile_width > 0.0 && spec.tile_height > 0.0) {
        return TileGrid::empty();
    }

    let columns =
        tiles_along(spec.effective_width(), spec.tile_width).saturating_add(spec.safety_margin);
    let rows =
        tiles_along(spec.effective_height(), spec.tile_height).saturating_add(spec.safety_margin);

    TileGrid {
        columns,
        rows,
        required_tile_count: (columns as usize).saturating_mul(rows as usize),
    }
}

fn tiles_along(extent: f64, tile: f64) -> u32 {
    if extent <= 0.0 {
        return 0;
    }
    // `as` saturates at u32::MAX for absurd extents.
    let count = (extent / tile).ceil() as u32;
    // Division can round down across an integer boundary.
    if (count as f64) * tile < extent {
        count.saturating_add(1)
    } else {
        count
    }
}
