use std::{collections::BTreeMap, fmt, fs, path::Path};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::error::DataError;

pub const NO_MOVE: &str = "NO_MOVE";

/// Moves reserved for special battle mechanics, never handed out at random.
pub const EXCLUDED_MOVES: [&str; 2] = ["STRUGGLE", "BEAT_UP"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PokemonType {
    Normal,
    Fighting,
    Flying,
    Poison,
    Ground,
    Rock,
    Bug,
    Ghost,
    Steel,
    Fire,
    Water,
    Grass,
    Electric,
    Psychic,
    Ice,
    Dragon,
    Dark,
}

impl PokemonType {
    pub const ALL: [PokemonType; 17] = [
        PokemonType::Normal,
        PokemonType::Fighting,
        PokemonType::Flying,
        PokemonType::Poison,
        PokemonType::Ground,
        PokemonType::Rock,
        PokemonType::Bug,
        PokemonType::Ghost,
        PokemonType::Steel,
        PokemonType::Fire,
        PokemonType::Water,
        PokemonType::Grass,
        PokemonType::Electric,
        PokemonType::Psychic,
        PokemonType::Ice,
        PokemonType::Dragon,
        PokemonType::Dark,
    ];
}

impl fmt::Display for PokemonType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Both type slots of a species. Mono-typed species repeat their type.
pub type TypePair = [PokemonType; 2];

pub fn shares_type(a: &TypePair, b: &TypePair) -> bool {
    a.iter().any(|t| b.contains(t))
}

/// Base stats in game order: HP, ATK, DEF, SPD, SAT, SDF.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "[u8; 6]", into = "[u8; 6]")]
pub struct BaseStats {
    pub hp: u8,
    pub attack: u8,
    pub defense: u8,
    pub speed: u8,
    pub sp_attack: u8,
    pub sp_defense: u8,
}

impl BaseStats {
    pub fn total(&self) -> u16 {
        self.to_array().iter().map(|&s| s as u16).sum()
    }

    pub fn to_array(self) -> [u8; 6] {
        [
            self.hp,
            self.attack,
            self.defense,
            self.speed,
            self.sp_attack,
            self.sp_defense,
        ]
    }
}

impl From<[u8; 6]> for BaseStats {
    fn from(value: [u8; 6]) -> Self {
        Self {
            hp: value[0],
            attack: value[1],
            defense: value[2],
            speed: value[3],
            sp_attack: value[4],
            sp_defense: value[5],
        }
    }
}

impl From<BaseStats> for [u8; 6] {
    fn from(value: BaseStats) -> Self {
        value.to_array()
    }
}

/// TM/HM compatibility. Bit `i` refers to entry `i` of [`BaselineData::tmhm`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TmHmSet(pub u64);

impl TmHmSet {
    pub fn contains(&self, index: usize) -> bool {
        index < 64 && self.0 & (1 << index) != 0
    }

    pub fn insert(&mut self, index: usize) {
        if index < 64 {
            self.0 |= 1 << index;
        }
    }

    pub fn count(&self) -> u32 {
        self.0.count_ones()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LearnsetEntry {
    pub level: u8,
    #[serde(rename = "move")]
    pub move_name: String,
}

impl LearnsetEntry {
    pub fn new(level: u8, move_name: impl Into<String>) -> Self {
        Self {
            level,
            move_name: move_name.into(),
        }
    }

    pub fn is_placeholder(&self) -> bool {
        self.move_name == NO_MOVE
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HappinessTime {
    Any,
    Day,
    Night,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatRelation {
    AttackGreater,
    DefenseGreater,
    Equal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EvolutionCondition {
    Level(u8),
    Item(String),
    Trade(Option<String>),
    Happiness(HappinessTime),
    Stat { level: u8, relation: StatRelation },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvolutionEdge {
    /// Written as a one-key map, e.g. `{ level: 16 }` or `{ trade: METAL_COAT }`.
    #[serde(with = "serde_yaml::with::singleton_map")]
    pub condition: EvolutionCondition,
    pub target: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpeciesRecord {
    pub types: TypePair,
    pub base_stats: BaseStats,
    #[serde(default)]
    pub tm_hm: TmHmSet,
    #[serde(default)]
    pub learnset: Vec<LearnsetEntry>,
    #[serde(default)]
    pub evolutions: Vec<EvolutionEdge>,
    #[serde(default)]
    pub is_base: bool,
}

impl SpeciesRecord {
    pub fn evolution_targets(&self) -> impl Iterator<Item = &str> {
        self.evolutions.iter().map(|edge| edge.target.as_str())
    }

    pub fn evolves_into(&self, species: &str) -> bool {
        self.evolution_targets().any(|target| target == species)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    pub id: u16,
    #[serde(rename = "type")]
    pub move_type: PokemonType,
    #[serde(default)]
    pub is_hm: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrainerType {
    #[serde(rename = "TRAINERTYPE_NORMAL", alias = "TRAINERTYPE_BASIC")]
    Normal,
    #[serde(rename = "TRAINERTYPE_ITEM")]
    Item,
    #[serde(rename = "TRAINERTYPE_MOVES")]
    Moves,
    #[serde(rename = "TRAINERTYPE_ITEM_MOVES")]
    ItemMoves,
}

impl TrainerType {
    pub fn has_items(self) -> bool {
        matches!(self, TrainerType::Item | TrainerType::ItemMoves)
    }

    pub fn has_moves(self) -> bool {
        matches!(self, TrainerType::Moves | TrainerType::ItemMoves)
    }

    pub fn label(self) -> &'static str {
        match self {
            TrainerType::Normal => "TRAINERTYPE_NORMAL",
            TrainerType::Item => "TRAINERTYPE_ITEM",
            TrainerType::Moves => "TRAINERTYPE_MOVES",
            TrainerType::ItemMoves => "TRAINERTYPE_ITEM_MOVES",
        }
    }
}

/// One party member. Which optional fields exist is fixed by the owning
/// trainer's [`TrainerType`]; passes only ever change values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartySlot {
    pub level: u8,
    pub species: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub moves: Option<Vec<String>>,
}

impl PartySlot {
    /// Number of leading move slots before the first `NO_MOVE` sentinel.
    pub fn filled_move_slots(&self) -> usize {
        self.moves
            .as_ref()
            .map(|moves| moves.iter().take_while(|m| *m != NO_MOVE).count())
            .unwrap_or(0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainerRecord {
    pub trainer_type: TrainerType,
    pub party: Vec<PartySlot>,
}

fn vanilla_starters() -> [[String; 3]; 3] {
    [
        ["CYNDAQUIL", "QUILAVA", "TYPHLOSION"],
        ["TOTODILE", "CROCONAW", "FERALIGATR"],
        ["CHIKORITA", "BAYLEEF", "MEGANIUM"],
    ]
    .map(|line| line.map(String::from))
}

/// Read-only reference tables. Nothing in the crate mutates a loaded store;
/// every run copies what it needs into its own snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaselineData {
    pub species: BTreeMap<String, SpeciesRecord>,
    pub moves: BTreeMap<String, MoveRecord>,
    #[serde(default)]
    pub trainers: BTreeMap<String, TrainerRecord>,
    #[serde(default)]
    pub tmhm: Vec<String>,
    #[serde(default)]
    pub held_items: Vec<String>,
    #[serde(default = "vanilla_starters")]
    pub starters: [[String; 3]; 3],
}

impl BaselineData {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read baseline data {}", path.display()))?;
        Self::from_yaml(&text).with_context(|| format!("Invalid baseline data {}", path.display()))
    }

    pub fn from_yaml(text: &str) -> Result<Self> {
        let data: BaselineData = serde_yaml::from_str(text)?;
        data.validate()?;
        Ok(data)
    }

    /// Moves eligible for random selection: positive id, not an HM and not
    /// one of [`EXCLUDED_MOVES`].
    pub fn legal_moves(&self) -> Vec<&str> {
        self.moves
            .iter()
            .filter(|(name, record)| {
                record.id > 0 && !record.is_hm && !EXCLUDED_MOVES.contains(&name.as_str())
            })
            .map(|(name, _)| name.as_str())
            .collect()
    }

    pub fn validate(&self) -> Result<(), DataError> {
        if self.species.is_empty() {
            return Err(DataError::EmptyTable("species"));
        }
        if self.moves.is_empty() {
            return Err(DataError::EmptyTable("moves"));
        }
        if self.legal_moves().is_empty() {
            return Err(DataError::EmptyMovePool);
        }

        for (name, species) in &self.species {
            for target in species.evolution_targets() {
                if !self.species.contains_key(target) {
                    return Err(DataError::UnknownEvolutionTarget {
                        species: name.clone(),
                        target: target.to_string(),
                    });
                }
            }
            for entry in &species.learnset {
                if !entry.is_placeholder() && !self.moves.contains_key(&entry.move_name) {
                    return Err(DataError::UnknownLearnsetMove {
                        species: name.clone(),
                        move_name: entry.move_name.clone(),
                    });
                }
            }
            if let Some(pair) = species.learnset.windows(2).find(|w| w[1].level < w[0].level) {
                return Err(DataError::UnorderedLearnset {
                    species: name.clone(),
                    previous: pair[0].level,
                    level: pair[1].level,
                });
            }
        }

        for (line, stages) in self.starters.iter().enumerate() {
            for stage in stages {
                if !self.species.contains_key(stage) {
                    return Err(DataError::UnknownStarter {
                        line,
                        species: stage.clone(),
                    });
                }
            }
        }

        if self.tmhm.len() > 64 {
            return Err(DataError::TmHmTableTooLarge(self.tmhm.len()));
        }
        if let Some(unknown) = self.tmhm.iter().find(|m| !self.moves.contains_key(*m)) {
            return Err(DataError::UnknownTmHmMove(unknown.clone()));
        }

        for (name, trainer) in &self.trainers {
            self.validate_party(name, trainer)?;
        }
        if self.held_items.is_empty()
            && self.trainers.values().any(|t| t.trainer_type.has_items())
        {
            return Err(DataError::EmptyHeldItemPool);
        }
        Ok(())
    }

    fn validate_party(&self, name: &str, trainer: &TrainerRecord) -> Result<(), DataError> {
        let kind = trainer.trainer_type;
        for (slot, member) in trainer.party.iter().enumerate() {
            if !self.species.contains_key(&member.species) {
                return Err(DataError::UnknownPartySpecies {
                    trainer: name.to_string(),
                    slot,
                    species: member.species.clone(),
                });
            }
            if member.item.is_some() != kind.has_items()
                || member.moves.is_some() != kind.has_moves()
            {
                return Err(DataError::SlotShape {
                    trainer: name.to_string(),
                    slot,
                    expected: kind.label(),
                });
            }
            if let Some(moves) = &member.moves {
                if moves.is_empty() || moves.len() > 4 {
                    return Err(DataError::MoveSlotCount {
                        trainer: name.to_string(),
                        slot,
                        count: moves.len(),
                    });
                }
            }
        }
        Ok(())
    }
}
