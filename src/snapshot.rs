use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::data::{BaselineData, SpeciesRecord, TrainerRecord};

/// 5-bit RGB triple as stored in the game's palette tables.
pub type Rgb = [u8; 3];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Palette {
    pub normal: Vec<Rgb>,
    pub shiny: Vec<Rgb>,
}

/// Stage 1, 2 and 3 of one starter family.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StarterLine(pub [String; 3]);

impl StarterLine {
    pub fn stage(&self, index: usize) -> &str {
        &self.0[index]
    }

    pub fn spoiler_line(&self) -> String {
        format!("{} -> {} -> {}", self.0[0], self.0[1], self.0[2])
    }
}

/// Working copy of the game tables for a single generation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub species: BTreeMap<String, SpeciesRecord>,
    pub trainers: BTreeMap<String, TrainerRecord>,
    pub starters: [StarterLine; 3],
    pub palettes: BTreeMap<String, Palette>,
}

impl Snapshot {
    /// Deep copy of the baseline tables with an empty palette table.
    pub fn from_baseline(baseline: &BaselineData) -> Self {
        Self {
            species: baseline.species.clone(),
            trainers: baseline.trainers.clone(),
            starters: baseline.starters.clone().map(StarterLine),
            palettes: BTreeMap::new(),
        }
    }

    pub fn spoiler_lines(&self) -> Vec<String> {
        self.starters.iter().map(StarterLine::spoiler_line).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spoiler_uses_arrow_format() {
        let line = StarterLine(["CYNDAQUIL", "QUILAVA", "TYPHLOSION"].map(String::from));
        assert_eq!(line.spoiler_line(), "CYNDAQUIL -> QUILAVA -> TYPHLOSION");
        assert_eq!(line.stage(1), "QUILAVA");
    }
}
