//! Uniform tile grid
//!
//! Row 0 is the top of the world and rows grow downward, so world Y is the
//! negated row coordinate:
//! - `cell_x = floor(world_x / tile_size)`
//! - `cell_y = floor(world_y / -tile_size)`
//!
//! Cells outside the grid are never solid.

use std::collections::BTreeSet;

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::rect::StaticRect;

/// Problems building a grid from level data
#[derive(Debug, Error, PartialEq)]
pub enum GridError {
    #[error("tile grid has no cells")]
    Empty,
    #[error("tile size must be positive and finite, got {0}")]
    BadTileSize(f32),
    #[error("row {row} has {found} tiles, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("row {row}, column {col}: `{value}` is not a tile id")]
    BadTile {
        row: usize,
        col: usize,
        value: String,
    },
    #[error("expected {expected} tile ids for the grid, found {found}")]
    SizeMismatch { expected: usize, found: usize },
}

/// Read-only tile ids plus the set of ids that block movement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TileGrid {
    width: usize,
    height: usize,
    tile_size: f32,
    /// Row-major, `height` rows of `width` ids
    ids: Vec<i32>,
    solid_ids: BTreeSet<i32>,
}

impl TileGrid {
    pub fn new(
        width: usize,
        height: usize,
        tile_size: f32,
        ids: Vec<i32>,
        solid_ids: impl IntoIterator<Item = i32>,
    ) -> Result<Self, GridError> {
        if width == 0 || height == 0 {
            return Err(GridError::Empty);
        }
        if !tile_size.is_finite() || tile_size <= 0.0 {
            return Err(GridError::BadTileSize(tile_size));
        }
        if ids.len() != width * height {
            return Err(GridError::SizeMismatch {
                expected: width * height,
                found: ids.len(),
            });
        }
        Ok(Self {
            width,
            height,
            tile_size,
            ids,
            solid_ids: solid_ids.into_iter().collect(),
        })
    }

    /// Build from rows listed top to bottom
    pub fn from_rows(
        rows: Vec<Vec<i32>>,
        tile_size: f32,
        solid_ids: impl IntoIterator<Item = i32>,
    ) -> Result<Self, GridError> {
        let width = rows.first().map(Vec::len).unwrap_or(0);
        for (row, tiles) in rows.iter().enumerate() {
            if tiles.len() != width {
                return Err(GridError::Ragged {
                    row,
                    expected: width,
                    found: tiles.len(),
                });
            }
        }
        let height = rows.len();
        let ids = rows.into_iter().flatten().collect();
        Self::new(width, height, tile_size, ids, solid_ids)
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn tile_size(&self) -> f32 {
        self.tile_size
    }

    pub fn solid_ids(&self) -> &BTreeSet<i32> {
        &self.solid_ids
    }

    /// World extent; the grid spans `x ∈ [0, w]`, `y ∈ [-h, 0]`
    pub fn world_size(&self) -> Vec2 {
        Vec2::new(self.width as f32, self.height as f32) * self.tile_size
    }

    /// Cell containing a world point (may be out of range)
    #[inline]
    pub fn world_to_cell(&self, world: Vec2) -> (i32, i32) {
        (
            (world.x / self.tile_size).floor() as i32,
            (world.y / -self.tile_size).floor() as i32,
        )
    }

    /// Tile id at a cell, `None` outside the grid
    pub fn id(&self, cell_x: i32, cell_y: i32) -> Option<i32> {
        if cell_x < 0 || cell_y < 0 {
            return None;
        }
        let (x, y) = (cell_x as usize, cell_y as usize);
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.ids[y * self.width + x])
    }

    pub fn is_solid(&self, cell_x: i32, cell_y: i32) -> bool {
        self.id(cell_x, cell_y)
            .is_some_and(|id| self.solid_ids.contains(&id))
    }

    /// World-space rectangle covered by a cell
    pub fn cell_rect(&self, cell_x: i32, cell_y: i32) -> StaticRect {
        let half = self.tile_size * 0.5;
        let center = Vec2::new(
            cell_x as f32 * self.tile_size + half,
            -(cell_y as f32 * self.tile_size + half),
        );
        StaticRect::new(center, Vec2::splat(half))
    }

    /// Every solid cell as a rectangle, row by row
    pub fn solid_rects(&self) -> impl Iterator<Item = StaticRect> + '_ {
        (0..self.height as i32).flat_map(move |y| {
            (0..self.width as i32)
                .filter(move |&x| self.is_solid(x, y))
                .map(move |x| self.cell_rect(x, y))
        })
    }
}

/// Parse comma-separated rows of tile ids
///
/// Blank lines and `#` comments are skipped and a trailing comma is allowed,
/// matching the layer dumps exported by tile editors.
pub fn parse_csv_rows(text: &str) -> Result<Vec<Vec<i32>>, GridError> {
    let mut rows = Vec::new();
    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let row_index = rows.len();
        let line = line.strip_suffix(',').unwrap_or(line);
        let row = line
            .split(',')
            .enumerate()
            .map(|(col, value)| {
                let value = value.trim();
                value.parse::<i32>().map_err(|_| GridError::BadTile {
                    row: row_index,
                    col,
                    value: value.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        rows.push(row);
    }
    if rows.is_empty() {
        return Err(GridError::Empty);
    }
    Ok(rows)
}
