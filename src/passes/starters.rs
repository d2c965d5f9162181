use std::collections::BTreeMap;

use anyhow::Result;
use log::info;
use rand::{seq::SliceRandom, Rng};

use crate::{
    data::SpeciesRecord,
    engine::{Pass, PassContext},
    error::RandomizerError,
    options::RandomizerOptions,
    providers,
    rivals::{sync_rival_stage, RivalIndex},
    rng::PassRng,
    snapshot::Snapshot,
};

pub struct StarterPass;

impl StarterPass {
    pub fn new() -> Self {
        Self
    }
}

impl Default for StarterPass {
    fn default() -> Self {
        Self::new()
    }
}

impl Pass for StarterPass {
    fn name(&self) -> &str {
        "starters"
    }

    fn enabled(&self, options: &RandomizerOptions) -> bool {
        options.randomize_starters
    }

    fn run(
        &mut self,
        ctx: &PassContext,
        snapshot: &mut Snapshot,
        rng: &mut PassRng,
    ) -> Result<()> {
        reassign_starters(rng, snapshot, ctx.rivals)?;
        for line in snapshot.spoiler_lines() {
            info!("starter line for {}: {line}", ctx.player_name);
        }
        Ok(())
    }
}

/// Redraws each starter line stage by stage. Stage 1 is any species; every
/// later stage is one of the previous stage's evolutions, or the previous
/// stage itself when it does not evolve. Rivals keyed to a replaced stage
/// follow it.
pub fn reassign_starters<R: Rng + ?Sized>(
    rng: &mut R,
    snapshot: &mut Snapshot,
    rivals: &RivalIndex,
) -> Result<(), RandomizerError> {
    for line in 0..snapshot.starters.len() {
        let original = snapshot.starters[line].clone();
        for stage in 0..3 {
            let next = if stage == 0 {
                providers::random_species(rng, &snapshot.species, None)?.to_string()
            } else {
                let previous = snapshot.starters[line].stage(stage - 1).to_string();
                next_stage(rng, &snapshot.species, &previous)?
            };
            snapshot.starters[line].0[stage] = next.clone();
            sync_rival_stage(rng, snapshot, rivals, original.stage(stage), &next)?;
        }
    }
    Ok(())
}

fn next_stage<R: Rng + ?Sized>(
    rng: &mut R,
    species: &BTreeMap<String, SpeciesRecord>,
    current: &str,
) -> Result<String, RandomizerError> {
    let record = species
        .get(current)
        .ok_or_else(|| RandomizerError::UnknownSpecies(current.to_string()))?;
    let targets: Vec<&str> = record.evolution_targets().collect();
    Ok(targets.choose(rng).copied().unwrap_or(current).to_string())
}
