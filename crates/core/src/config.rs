use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{LoadError, LoadResult};

pub const CONFIG_FILE: &str = "game.toml";

/// Tunables read from `game.toml` in the data directory. Every field may be omitted.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Map the party appears on after "Start".
    pub start_map: String,
    /// Maps on which completed steps roll for random encounters.
    pub encounter_maps: Vec<String>,
    pub encounter_rate: f64,
    /// Per-frame probability that an idle autonomous NPC takes a step.
    pub auto_move_rate: f64,
    pub starting_gold: u32,
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            start_map: "test2".to_string(),
            encounter_maps: vec!["test2".to_string()],
            encounter_rate: 0.05,
            auto_move_rate: 0.05,
            starting_gold: 500,
            seed: None,
        }
    }
}

impl GameConfig {
    pub fn parse(path: &Path, text: &str) -> LoadResult<Self> {
        toml::from_str(text)
            .map_err(|source| LoadError::Config { path: path.to_path_buf(), source })
    }

    /// Reads `game.toml` from `data_dir`, falling back to defaults when it is absent.
    pub fn load(data_dir: &Path) -> LoadResult<Self> {
        let path = data_dir.join(CONFIG_FILE);
        if !path.exists() {
            log::debug!("{} not found; using default config", path.display());
            return Ok(Self::default());
        }
        let text = fs::read_to_string(&path).map_err(|e| LoadError::io(&path, e))?;
        Self::parse(&path, &text)
    }

    pub fn is_encounter_map(&self, name: &str) -> bool {
        self.encounter_maps.iter().any(|map| map == name)
    }
}
