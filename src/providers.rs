//! Random value providers.
//!
//! Each function draws exactly one replacement value from the supplied
//! randomness and knows nothing about the rest of the snapshot.

use std::{collections::BTreeMap, ops::RangeInclusive};

use log::debug;
use rand::{seq::SliceRandom, Rng};

use crate::{
    data::{
        shares_type, BaseStats, LearnsetEntry, MoveRecord, PokemonType, SpeciesRecord, TmHmSet,
        TypePair,
    },
    error::RandomizerError,
    snapshot::Rgb,
};

pub const MIN_STAT: u8 = 20;
pub const MAX_STAT: u8 = 255;
/// Totals drawn when base stats are fully random.
pub const RANDOM_TOTAL: RangeInclusive<u16> = 180..=720;
const MAX_STAT_STEP: u16 = 16;
const MAX_CHANNEL: u8 = 31;

/// A species sharing a type with `match_types`, or any species when none
/// does (randomized types can leave a type with no holder).
pub fn random_species<'a, R: Rng + ?Sized>(
    rng: &mut R,
    species: &'a BTreeMap<String, SpeciesRecord>,
    match_types: Option<&TypePair>,
) -> Result<&'a str, RandomizerError> {
    let mut pool: Vec<&str> = species
        .iter()
        .filter(|(_, record)| match match_types {
            Some(types) => shares_type(&record.types, types),
            None => true,
        })
        .map(|(name, _)| name.as_str())
        .collect();
    if pool.is_empty() && match_types.is_some() {
        debug!("no species shares {match_types:?}, drawing from every species");
        pool = species.keys().map(String::as_str).collect();
    }
    pool.choose(rng)
        .copied()
        .ok_or_else(|| RandomizerError::EmptyPool("a species".into()))
}

/// Half of all draws are mono-typed; the rest pick a second type freely.
pub fn random_types<R: Rng + ?Sized>(rng: &mut R) -> TypePair {
    let primary = PokemonType::ALL[rng.gen_range(0..PokemonType::ALL.len())];
    if rng.gen_bool(0.5) {
        [primary, primary]
    } else {
        [primary, PokemonType::ALL[rng.gen_range(0..PokemonType::ALL.len())]]
    }
}

/// Colors a palette may use for a species of type `kind`.
pub fn type_color_set(kind: PokemonType) -> &'static [Rgb] {
    match kind {
        PokemonType::Normal => &[[24, 22, 18], [20, 18, 14]],
        PokemonType::Fighting => &[[24, 10, 6], [18, 8, 4]],
        PokemonType::Flying => &[[20, 22, 31], [16, 18, 28]],
        PokemonType::Poison => &[[20, 8, 22], [14, 4, 18]],
        PokemonType::Ground => &[[26, 22, 12], [20, 16, 8]],
        PokemonType::Rock => &[[22, 20, 12], [16, 14, 8]],
        PokemonType::Bug => &[[20, 24, 4], [14, 18, 2]],
        PokemonType::Ghost => &[[14, 10, 20], [10, 6, 16]],
        PokemonType::Steel => &[[22, 22, 26], [16, 16, 20]],
        PokemonType::Fire => &[[31, 16, 4], [31, 24, 8]],
        PokemonType::Water => &[[8, 16, 31], [12, 20, 28]],
        PokemonType::Grass => &[[10, 26, 8], [18, 28, 10]],
        PokemonType::Electric => &[[31, 28, 6], [30, 24, 2]],
        PokemonType::Psychic => &[[31, 10, 18], [26, 14, 22]],
        PokemonType::Ice => &[[18, 28, 31], [24, 30, 31]],
        PokemonType::Dragon => &[[14, 8, 31], [10, 6, 24]],
        PokemonType::Dark => &[[10, 8, 6], [14, 12, 10]],
    }
}

/// One color from the primary type's set, one from the secondary's.
pub fn type_colors<R: Rng + ?Sized>(types: &TypePair, rng: &mut R) -> Vec<Rgb> {
    types
        .iter()
        .map(|kind| {
            let set = type_color_set(*kind);
            set[rng.gen_range(0..set.len())]
        })
        .collect()
}

pub fn random_colors<R: Rng + ?Sized>(rng: &mut R) -> Vec<Rgb> {
    (0..2)
        .map(|_| {
            [
                rng.gen_range(0..=MAX_CHANNEL),
                rng.gen_range(0..=MAX_CHANNEL),
                rng.gen_range(0..=MAX_CHANNEL),
            ]
        })
        .collect()
}

/// Draws a stat block summing to `total` exactly, or to a random total when
/// none is given. Stats stay within `MIN_STAT..=MAX_STAT`; the floor drops to
/// `total / 6` for totals too small to give every stat `MIN_STAT`.
pub fn random_base_stats<R: Rng + ?Sized>(rng: &mut R, total: Option<u16>) -> BaseStats {
    let total = total
        .unwrap_or_else(|| rng.gen_range(RANDOM_TOTAL))
        .min(MAX_STAT as u16 * 6);
    let floor = (MIN_STAT as u16).min(total / 6);
    let mut stats = [floor; 6];
    let mut remaining = total - floor * 6;
    while remaining > 0 {
        let open: Vec<usize> = (0..stats.len())
            .filter(|&i| stats[i] < MAX_STAT as u16)
            .collect();
        let Some(&index) = open.choose(rng) else {
            break;
        };
        let headroom = MAX_STAT as u16 - stats[index];
        let step = rng.gen_range(1..=remaining.min(headroom).min(MAX_STAT_STEP));
        stats[index] += step;
        remaining -= step;
    }
    BaseStats::from(stats.map(|s| s as u8))
}

/// Rolls every TM/HM slot independently. A percentage of 0 keeps the
/// species' current bits for that group.
pub fn tmhm_compatibility<R: Rng + ?Sized>(
    rng: &mut R,
    tm_percent: u8,
    hm_percent: u8,
    types: &TypePair,
    current: TmHmSet,
    table: &[String],
    moves: &BTreeMap<String, MoveRecord>,
) -> TmHmSet {
    let mut result = TmHmSet::default();
    for (index, move_name) in table.iter().enumerate() {
        let record = moves.get(move_name);
        let is_hm = record.map(|m| m.is_hm).unwrap_or(false);
        let percent = if is_hm { hm_percent } else { tm_percent };
        if percent == 0 {
            if current.contains(index) {
                result.insert(index);
            }
            continue;
        }
        let mut chance = f64::from(percent.min(100)) / 100.0;
        if record.is_some_and(|m| types.contains(&m.move_type)) {
            chance += (1.0 - chance) / 2.0;
        }
        if rng.gen_bool(chance) {
            result.insert(index);
        }
    }
    result
}

pub fn random_held_item<'a, R: Rng + ?Sized>(
    rng: &mut R,
    pool: &'a [String],
) -> Result<&'a str, RandomizerError> {
    pool.choose(rng)
        .map(String::as_str)
        .ok_or_else(|| RandomizerError::EmptyPool("a held item".into()))
}

pub fn random_move<'a, R: Rng + ?Sized>(
    rng: &mut R,
    pool: &[&'a str],
) -> Result<&'a str, RandomizerError> {
    pool.choose(rng)
        .copied()
        .ok_or_else(|| RandomizerError::EmptyPool("a move".into()))
}

/// A move `species` learns at or below `level`, skipping placeholder slots.
pub fn random_move_from_learnset<'a, R: Rng + ?Sized>(
    rng: &mut R,
    species: &str,
    learnset: &'a [LearnsetEntry],
    level: u8,
) -> Result<&'a str, RandomizerError> {
    let pool: Vec<&str> = learnset
        .iter()
        .filter(|entry| entry.level <= level && !entry.is_placeholder())
        .map(|entry| entry.move_name.as_str())
        .collect();
    pool.choose(rng).copied().ok_or_else(|| {
        RandomizerError::EmptyPool(format!("a move {species} knows by level {level}"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::mock::StepRng, SeedableRng};
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn preserved_total_is_exact() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for total in [100u16, 120, 309, 405, 534, 600, 680, 1530] {
            for _ in 0..50 {
                let stats = random_base_stats(&mut rng, Some(total));
                assert_eq!(stats.total(), total);
                let floor = MIN_STAT.min((total / 6) as u8);
                assert!(stats.to_array().iter().all(|&s| s >= floor));
            }
        }
    }

    #[test]
    fn fully_random_total_stays_in_range() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        for _ in 0..200 {
            let stats = random_base_stats(&mut rng, None);
            assert!(RANDOM_TOTAL.contains(&stats.total()));
            assert!(stats.to_array().iter().all(|&s| s >= MIN_STAT));
        }
    }

    #[test]
    fn zero_source_still_terminates() {
        let mut rng = StepRng::new(0, 0);
        let stats = random_base_stats(&mut rng, Some(600));
        assert_eq!(stats.total(), 600);
        assert_eq!(stats.hp, MAX_STAT);
    }

    #[test]
    fn type_matched_species_share_a_type() {
        let yaml = r#"
BULBASAUR: { types: [GRASS, POISON], base_stats: [45, 49, 49, 45, 65, 65] }
CHARMANDER: { types: [FIRE, FIRE], base_stats: [39, 52, 43, 65, 60, 50] }
ODDISH: { types: [GRASS, POISON], base_stats: [45, 50, 55, 30, 75, 65] }
"#;
        let species: BTreeMap<String, SpeciesRecord> = serde_yaml::from_str(yaml).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        for _ in 0..50 {
            let pick =
                random_species(&mut rng, &species, Some(&[PokemonType::Poison; 2])).unwrap();
            assert_ne!(pick, "CHARMANDER");
        }
        let fallback = random_species(&mut rng, &species, Some(&[PokemonType::Dark; 2])).unwrap();
        assert!(species.contains_key(fallback));
        let empty_pool = BTreeMap::new();
        let empty = random_species(&mut rng, &empty_pool, None);
        assert!(matches!(empty, Err(RandomizerError::EmptyPool(_))));
    }

    #[test]
    fn full_compatibility_sets_every_bit() {
        let moves: BTreeMap<String, MoveRecord> = serde_yaml::from_str(
            "DYNAMICPUNCH: { id: 223, type: FIGHTING }\nCUT: { id: 15, type: NORMAL, is_hm: true }\n",
        )
        .unwrap();
        let table = vec!["DYNAMICPUNCH".to_string(), "CUT".to_string()];
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let all = tmhm_compatibility(
            &mut rng,
            100,
            100,
            &[PokemonType::Fire; 2],
            TmHmSet::default(),
            &table,
            &moves,
        );
        assert_eq!(all.count(), 2);

        let vanilla_hm = tmhm_compatibility(
            &mut rng,
            100,
            0,
            &[PokemonType::Fire; 2],
            TmHmSet(0b10),
            &table,
            &moves,
        );
        assert!(vanilla_hm.contains(0));
        assert!(vanilla_hm.contains(1));
    }

    #[test]
    fn learnset_moves_respect_level() {
        let learnset = vec![
            LearnsetEntry::new(1, "NO_MOVE"),
            LearnsetEntry::new(1, "TACKLE"),
            LearnsetEntry::new(30, "FLAMETHROWER"),
        ];
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        for _ in 0..20 {
            let pick = random_move_from_learnset(&mut rng, "CYNDAQUIL", &learnset, 10).unwrap();
            assert_eq!(pick, "TACKLE");
        }
        let empty = random_move_from_learnset(&mut rng, "CYNDAQUIL", &learnset[..1], 10);
        assert!(empty.is_err());
    }
}
