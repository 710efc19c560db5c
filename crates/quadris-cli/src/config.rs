use std::path::Path;

use anyhow::Context as _;
use quadris_engine::EngineConfig;
use serde::{Deserialize, Serialize};

use crate::util;

/// Contents of the `--config` file.
///
/// Both sections are optional; anything omitted falls back to its default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct CliConfig {
    /// Rules handed to the engine.
    pub engine: EngineConfig,
    /// Presentation settings for the board renderer.
    pub display: DisplayConfig,
}

impl CliConfig {
    /// Reads and validates the config file, or returns the defaults when no
    /// path is given.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let config: Self = util::read_json_file("config", path)?;
        config
            .engine
            .validate()
            .with_context(|| format!("Invalid engine settings in {}", path.display()))?;
        Ok(config)
    }
}

/// Presentation-only settings. The engine never sees these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Draw the landing preview of the falling piece.
    pub ghost_piece: bool,
    pub cell_size: CellSize,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            ghost_piece: true,
            cell_size: CellSize::Medium,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CellSize {
    Small,
    #[default]
    Medium,
    Large,
}

impl CellSize {
    /// Characters per cell horizontally.
    pub const fn width(self) -> usize {
        match self {
            CellSize::Small => 1,
            CellSize::Medium => 2,
            CellSize::Large => 3,
        }
    }

    /// Text lines per cell vertically.
    pub const fn height(self) -> usize {
        match self {
            CellSize::Small | CellSize::Medium => 1,
            CellSize::Large => 2,
        }
    }
}
