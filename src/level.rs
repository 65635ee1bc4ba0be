//! Level descriptions
//!
//! A level is a JSON document holding the tile layout, which ids are solid,
//! and a few named points (spawn, key, goal). Loaded once at level start;
//! nothing here runs on the step path.

use std::collections::BTreeMap;
use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::TILE_SIZE;
use crate::sim::{GridError, TileGrid, parse_csv_rows};

/// Errors raised while loading a level
#[derive(Debug, Error)]
pub enum LevelError {
    #[error("failed to read level file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse level JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid tile layout: {0}")]
    Grid(#[from] GridError),
}

/// Tile ids either as CSV text or as nested rows
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TileLayout {
    Csv(String),
    Rows(Vec<Vec<i32>>),
}

impl TileLayout {
    fn rows(&self) -> Result<Vec<Vec<i32>>, GridError> {
        match self {
            TileLayout::Csv(text) => parse_csv_rows(text),
            TileLayout::Rows(rows) => Ok(rows.clone()),
        }
    }
}

fn default_tile_size() -> f32 {
    TILE_SIZE
}

/// A tile level as stored on disk
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelDescription {
    #[serde(default)]
    pub name: String,
    #[serde(default = "default_tile_size")]
    pub tile_size: f32,
    pub solid_ids: Vec<i32>,
    /// Rows listed top to bottom
    pub tiles: TileLayout,
    /// Player start in world units
    #[serde(default)]
    pub spawn: Option<Vec2>,
    /// Named points such as `key` or `goal`
    #[serde(default)]
    pub markers: BTreeMap<String, Vec2>,
}

impl LevelDescription {
    /// Wrap raw CSV rows with no spawn or markers
    pub fn from_csv(text: &str, tile_size: f32, solid_ids: Vec<i32>) -> Self {
        Self {
            name: String::new(),
            tile_size,
            solid_ids,
            tiles: TileLayout::Csv(text.to_string()),
            spawn: None,
            markers: BTreeMap::new(),
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self, LevelError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, LevelError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let level = Self::from_json_str(&json)?;
        log::info!("Loaded level '{}' from {}", level.name, path.display());
        Ok(level)
    }

    /// Validate the layout and build the grid
    pub fn grid(&self) -> Result<TileGrid, LevelError> {
        let rows = self.tiles.rows()?;
        let grid = TileGrid::from_rows(rows, self.tile_size, self.solid_ids.iter().copied())?;
        log::info!(
            "Level '{}': {}x{} tiles of {}",
            self.name,
            grid.width(),
            grid.height(),
            grid.tile_size()
        );
        Ok(grid)
    }

    pub fn marker(&self, name: &str) -> Option<Vec2> {
        self.markers.get(name).copied()
    }
}
