use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::{data::BaselineData, engine::EngineSettings, options::RandomizerOptions};

fn default_player() -> String {
    "Player".to_string()
}

/// One generation run: who it is for, which seed, which baseline tables
/// and which options.
#[derive(Debug, Clone, Deserialize)]
pub struct Scenario {
    pub name: String,
    #[serde(default = "default_player")]
    pub player: String,
    pub seed: u64,
    /// Baseline data file, relative to the loader's base directory.
    pub data: PathBuf,
    #[serde(default)]
    pub options: RandomizerOptions,
}

pub struct ScenarioLoader {
    base_dir: PathBuf,
}

impl ScenarioLoader {
    pub fn new(base_dir: impl AsRef<Path>) -> Self {
        Self {
            base_dir: base_dir.as_ref().to_path_buf(),
        }
    }

    pub fn load(&self, file: impl AsRef<Path>) -> Result<Scenario> {
        let path = self.base_dir.join(file);
        let data = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read scenario file {}", path.display()))?;
        let scenario: Scenario = serde_yaml::from_str(&data)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        Ok(scenario)
    }

    pub fn load_baseline(&self, scenario: &Scenario) -> Result<BaselineData> {
        BaselineData::load(self.base_dir.join(&scenario.data))
    }
}

impl Scenario {
    pub fn engine_settings(&self, seed_override: Option<u64>) -> EngineSettings {
        EngineSettings {
            player_name: self.player.clone(),
            seed: seed_override.unwrap_or(self.seed),
            options: self.options.clone(),
        }
    }
}
