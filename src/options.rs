use log::warn;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeMode {
    #[default]
    Off,
    ByFamily,
    Independent,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaletteMode {
    #[default]
    Off,
    MatchType,
    Random,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BaseStatMode {
    #[default]
    Off,
    PreserveTotal,
    Random,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LearnsetMode {
    #[default]
    Off,
    SameLevels,
    FillEmpty,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrainerPartyMode {
    #[default]
    Off,
    MatchTypes,
    Random,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Goal {
    #[default]
    EliteFour,
    Red,
}

fn default_elite_four_badges() -> u8 {
    8
}

/// Every player-selectable value the generator reads. Missing keys in a
/// scenario file fall back to "off".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RandomizerOptions {
    pub randomize_types: TypeMode,
    pub randomize_palettes: PaletteMode,
    pub randomize_base_stats: BaseStatMode,
    pub randomize_learnsets: LearnsetMode,
    /// Percent chance per TM slot; 0 keeps vanilla compatibility.
    pub tm_compatibility: u8,
    /// Percent chance per HM slot; 0 keeps vanilla compatibility.
    pub hm_compatibility: u8,
    pub randomize_starters: bool,
    pub randomize_trainer_parties: TrainerPartyMode,
    pub goal: Goal,
    pub johto_only: bool,
    pub elite_four_badges: u8,
    pub randomize_hidden_items: bool,
    pub randomize_wilds: bool,
    pub blind_trainers: bool,
    pub better_marts: bool,
    pub require_itemfinder: bool,
}

impl Default for RandomizerOptions {
    fn default() -> Self {
        Self {
            randomize_types: TypeMode::Off,
            randomize_palettes: PaletteMode::Off,
            randomize_base_stats: BaseStatMode::Off,
            randomize_learnsets: LearnsetMode::Off,
            tm_compatibility: 0,
            hm_compatibility: 0,
            randomize_starters: false,
            randomize_trainer_parties: TrainerPartyMode::Off,
            goal: Goal::EliteFour,
            johto_only: false,
            elite_four_badges: default_elite_four_badges(),
            randomize_hidden_items: false,
            randomize_wilds: false,
            blind_trainers: false,
            better_marts: false,
            require_itemfinder: false,
        }
    }
}

impl RandomizerOptions {
    /// Rewrites combinations the game cannot satisfy. Never fails; every
    /// change is logged and returned so callers can surface it.
    pub fn correct_incompatible(&mut self, player: &str) -> Vec<String> {
        let mut corrections = Vec::new();
        if self.johto_only {
            if self.goal == Goal::Red {
                self.goal = Goal::EliteFour;
                corrections.push(format!(
                    "Red goal is incompatible with Johto Only. Changing goal to Elite Four for player {player}."
                ));
            }
            if self.elite_four_badges > 8 {
                self.elite_four_badges = 8;
                corrections.push(format!(
                    "Elite Four Badges >8 incompatible with Johto Only. Changing Elite Four Badges to 8 for player {player}."
                ));
            }
        }
        if self.elite_four_badges > 16 {
            self.elite_four_badges = 16;
            corrections.push(format!(
                "Elite Four Badges cannot exceed 16. Changing Elite Four Badges to 16 for player {player}."
            ));
        }
        for (label, value) in [
            ("TM", &mut self.tm_compatibility),
            ("HM", &mut self.hm_compatibility),
        ] {
            if *value > 100 {
                *value = 100;
                corrections.push(format!(
                    "{label} compatibility is a percentage. Changing it to 100 for player {player}."
                ));
            }
        }
        for message in &corrections {
            warn!("Pokemon Crystal: {message}");
        }
        corrections
    }

    /// Option values the game client reads back at runtime.
    pub fn slot_data(&self) -> Value {
        let mut map = Map::new();
        map.insert(
            "randomize_hidden_items".into(),
            flag(self.randomize_hidden_items),
        );
        map.insert("randomize_starters".into(), flag(self.randomize_starters));
        map.insert("randomize_wilds".into(), flag(self.randomize_wilds));
        map.insert(
            "randomize_learnsets".into(),
            Value::from(self.randomize_learnsets as u8),
        );
        map.insert("blind_trainers".into(), flag(self.blind_trainers));
        map.insert("better_marts".into(), flag(self.better_marts));
        map.insert("goal".into(), Value::from(self.goal as u8));
        map.insert("require_itemfinder".into(), flag(self.require_itemfinder));
        Value::Object(map)
    }
}

fn flag(value: bool) -> Value {
    Value::from(value as u8)
}
