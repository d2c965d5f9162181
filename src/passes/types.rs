use std::collections::BTreeMap;

use anyhow::Result;
use rand::Rng;

use crate::{
    data::SpeciesRecord,
    engine::{Pass, PassContext},
    error::RandomizerError,
    options::{RandomizerOptions, TypeMode},
    providers,
    rng::PassRng,
    snapshot::Snapshot,
};

pub struct TypePass;

impl TypePass {
    pub fn new() -> Self {
        Self
    }
}

impl Default for TypePass {
    fn default() -> Self {
        Self::new()
    }
}

impl Pass for TypePass {
    fn name(&self) -> &str {
        "types"
    }

    fn enabled(&self, options: &RandomizerOptions) -> bool {
        options.randomize_types != TypeMode::Off
    }

    fn run(
        &mut self,
        ctx: &PassContext,
        snapshot: &mut Snapshot,
        rng: &mut PassRng,
    ) -> Result<()> {
        reassign_types(rng, snapshot, ctx.options.randomize_types)?;
        Ok(())
    }
}

pub fn reassign_types<R: Rng + ?Sized>(
    rng: &mut R,
    snapshot: &mut Snapshot,
    mode: TypeMode,
) -> Result<(), RandomizerError> {
    match mode {
        TypeMode::Off => {}
        TypeMode::Independent => {
            for record in snapshot.species.values_mut() {
                record.types = providers::random_types(rng);
            }
        }
        TypeMode::ByFamily => {
            let bases: Vec<String> = snapshot
                .species
                .iter()
                .filter(|(_, record)| record.is_base)
                .map(|(name, _)| name.clone())
                .collect();
            for base in bases {
                let family = family_of(&snapshot.species, &base)?;
                let types = providers::random_types(rng);
                for member in family {
                    snapshot
                        .species
                        .get_mut(&member)
                        .ok_or_else(|| RandomizerError::UnknownSpecies(member.clone()))?
                        .types = types;
                }
            }
        }
    }
    Ok(())
}

/// `base` plus every first- and second-stage evolution reachable from it.
fn family_of(
    species: &BTreeMap<String, SpeciesRecord>,
    base: &str,
) -> Result<Vec<String>, RandomizerError> {
    let lookup = |name: &str| {
        species
            .get(name)
            .ok_or_else(|| RandomizerError::UnknownSpecies(name.to_string()))
    };
    let mut family = vec![base.to_string()];
    for first in lookup(base)?.evolution_targets() {
        family.push(first.to_string());
        for second in lookup(first)?.evolution_targets() {
            family.push(second.to_string());
        }
    }
    Ok(family)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::BaselineData;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    const DATA: &str = r#"
species:
  EEVEE:
    types: [NORMAL, NORMAL]
    base_stats: [55, 55, 50, 55, 45, 65]
    learnset: [{ level: 1, move: TACKLE }]
    evolutions:
      - { condition: { item: FIRE_STONE }, target: FLAREON }
      - { condition: { happiness: night }, target: UMBREON }
    is_base: true
  FLAREON: { types: [FIRE, FIRE], base_stats: [65, 130, 60, 65, 95, 110] }
  UMBREON: { types: [DARK, DARK], base_stats: [95, 65, 110, 65, 60, 130] }
  PICHU:
    types: [ELECTRIC, ELECTRIC]
    base_stats: [20, 40, 15, 60, 35, 35]
    evolutions: [{ condition: { happiness: any }, target: PIKACHU }]
    is_base: true
  PIKACHU:
    types: [ELECTRIC, ELECTRIC]
    base_stats: [35, 55, 30, 90, 50, 40]
    evolutions: [{ condition: { item: THUNDERSTONE }, target: RAICHU }]
  RAICHU: { types: [ELECTRIC, ELECTRIC], base_stats: [60, 90, 55, 100, 90, 80] }
moves:
  TACKLE: { id: 33, type: NORMAL }
starters:
  - [PICHU, PIKACHU, RAICHU]
  - [PICHU, PIKACHU, RAICHU]
  - [PICHU, PIKACHU, RAICHU]
"#;

    #[test]
    fn families_share_one_type_pair() {
        let baseline = BaselineData::from_yaml(DATA).unwrap();
        for seed in 0..20 {
            let mut snapshot = Snapshot::from_baseline(&baseline);
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            reassign_types(&mut rng, &mut snapshot, TypeMode::ByFamily).unwrap();
            let eevee = snapshot.species["EEVEE"].types;
            assert_eq!(snapshot.species["FLAREON"].types, eevee);
            assert_eq!(snapshot.species["UMBREON"].types, eevee);
            let pichu = snapshot.species["PICHU"].types;
            assert_eq!(snapshot.species["PIKACHU"].types, pichu);
            assert_eq!(snapshot.species["RAICHU"].types, pichu);
        }
    }

    #[test]
    fn independent_mode_only_touches_types() {
        let baseline = BaselineData::from_yaml(DATA).unwrap();
        let mut snapshot = Snapshot::from_baseline(&baseline);
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        reassign_types(&mut rng, &mut snapshot, TypeMode::Independent).unwrap();
        for (name, record) in &snapshot.species {
            let original = &baseline.species[name];
            assert_eq!(record.base_stats, original.base_stats);
            assert_eq!(record.learnset, original.learnset);
            assert_eq!(record.evolutions, original.evolutions);
        }
    }
}
