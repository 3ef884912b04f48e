use std::path::Path;
use std::time::Duration;

use anyhow::{bail, Context as _, Result};
use serde::Deserialize;

/// Largest accepted board edge, in tiles.
pub const MAX_TILE_COUNT: i32 = 512;

/// Board geometry and speed curve.
///
/// Defaults match the classic setup: a 400x400 surface of 20px cells (a
/// 20x20 board), a 150ms base tick that gets 5ms faster per food eaten down
/// to a 50ms floor, and the head starting at (10, 10).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GameConfig {
    /// Side length of the square drawing surface, in pixels.
    pub canvas_size: u32,
    /// Side length of one grid cell, in pixels. Must divide `canvas_size`.
    pub cell_size: u32,
    /// Tick period when a game starts, in milliseconds.
    pub base_interval_ms: u64,
    /// Tick period reduction per food eaten, in milliseconds.
    pub interval_step_ms: u64,
    /// Tick period floor, in milliseconds.
    pub min_interval_ms: u64,
    /// Grid cell the head starts on.
    pub start_cell: (i32, i32),
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            canvas_size: 400,
            cell_size: 20,
            base_interval_ms: 150,
            interval_step_ms: 5,
            min_interval_ms: 50,
            start_cell: (10, 10),
        }
    }
}

impl GameConfig {
    /// Cells per row and per column of the square board.
    pub fn tile_count(&self) -> i32 {
        (self.canvas_size / self.cell_size) as i32
    }

    pub fn base_interval(&self) -> Duration {
        Duration::from_millis(self.base_interval_ms)
    }

    pub fn interval_step(&self) -> Duration {
        Duration::from_millis(self.interval_step_ms)
    }

    pub fn min_interval(&self) -> Duration {
        Duration::from_millis(self.min_interval_ms)
    }

    /// Load a config from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        let config: Self = serde_json::from_str(&text)
            .with_context(|| format!("parsing config file {}", path.display()))?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.cell_size == 0 {
            bail!("cell_size must be non-zero");
        }
        if self.canvas_size % self.cell_size != 0 {
            bail!(
                "cell_size {} does not divide canvas_size {} evenly",
                self.cell_size,
                self.canvas_size
            );
        }
        if self.tile_count() < 2 {
            bail!("board needs at least 2x2 tiles, got {0}x{0}", self.tile_count());
        }
        // The renderer addresses cells with u16 terminal coordinates; no
        // terminal is anywhere near this wide anyway.
        if self.tile_count() > MAX_TILE_COUNT {
            bail!(
                "board of {0}x{0} tiles exceeds the {MAX_TILE_COUNT}x{MAX_TILE_COUNT} maximum",
                self.tile_count()
            );
        }
        if self.base_interval_ms == 0 {
            bail!("base_interval_ms must be non-zero");
        }
        if self.min_interval_ms > self.base_interval_ms {
            bail!(
                "min_interval_ms {} exceeds base_interval_ms {}",
                self.min_interval_ms,
                self.base_interval_ms
            );
        }
        let (x, y) = self.start_cell;
        let tiles = self.tile_count();
        if x < 0 || y < 0 || x >= tiles || y >= tiles {
            bail!("start_cell ({x}, {y}) is outside the {tiles}x{tiles} board");
        }
        Ok(())
    }
}
