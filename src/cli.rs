use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use crate::core::config::GameConfig;

#[derive(Parser, Debug)]
#[command(name = "gridsnake")]
#[command(about = "Classic snake on a terminal grid")]
#[command(version)]
pub struct Cli {
    /// JSON config file with board geometry and speed settings
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Side length of the square drawing surface, in pixels
    #[arg(long)]
    pub canvas_size: Option<u32>,

    /// Side length of one grid cell, in pixels
    #[arg(long)]
    pub cell_size: Option<u32>,

    /// Tick period at game start, in milliseconds
    #[arg(long)]
    pub base_interval_ms: Option<u64>,

    /// Tick period reduction per food eaten, in milliseconds
    #[arg(long)]
    pub interval_step_ms: Option<u64>,

    /// Tick period floor, in milliseconds
    #[arg(long)]
    pub min_interval_ms: Option<u64>,

    /// Append tracing output to this file (the TUI owns stdout/stderr)
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    /// Resolve the effective config: defaults, then the config file, then
    /// individual flags, with later sources winning.
    pub fn game_config(&self) -> Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => GameConfig::from_file(path)?,
            None => GameConfig::default(),
        };

        if let Some(canvas_size) = self.canvas_size {
            config.canvas_size = canvas_size;
        }
        if let Some(cell_size) = self.cell_size {
            config.cell_size = cell_size;
        }
        if let Some(base) = self.base_interval_ms {
            config.base_interval_ms = base;
        }
        if let Some(step) = self.interval_step_ms {
            config.interval_step_ms = step;
        }
        if let Some(min) = self.min_interval_ms {
            config.min_interval_ms = min;
        }

        config.validate()?;
        Ok(config)
    }
}
