use anyhow::Result;
use rand::Rng;

use crate::{
    data::BaselineData,
    engine::{Pass, PassContext},
    error::RandomizerError,
    options::{RandomizerOptions, TrainerPartyMode},
    providers,
    rivals::{refill_moves, RivalIndex},
    rng::PassRng,
    snapshot::Snapshot,
};

pub struct TrainerPartyPass;

impl TrainerPartyPass {
    pub fn new() -> Self {
        Self
    }
}

impl Default for TrainerPartyPass {
    fn default() -> Self {
        Self::new()
    }
}

impl Pass for TrainerPartyPass {
    fn name(&self) -> &str {
        "trainer_parties"
    }

    fn enabled(&self, options: &RandomizerOptions) -> bool {
        options.randomize_trainer_parties != TrainerPartyMode::Off
    }

    fn run(
        &mut self,
        ctx: &PassContext,
        snapshot: &mut Snapshot,
        rng: &mut PassRng,
    ) -> Result<()> {
        reassign_trainer_parties(
            rng,
            snapshot,
            ctx.baseline,
            ctx.rivals,
            ctx.options.randomize_trainer_parties,
        )?;
        Ok(())
    }
}

/// Redraws species, held items and moves for every party slot. The final
/// slot of a rival belongs to the starter line and keeps its species. Only
/// values change: a slot without an item or move list never gains one.
pub fn reassign_trainer_parties<R: Rng + ?Sized>(
    rng: &mut R,
    snapshot: &mut Snapshot,
    baseline: &BaselineData,
    rivals: &RivalIndex,
    mode: TrainerPartyMode,
) -> Result<(), RandomizerError> {
    if mode == TrainerPartyMode::Off {
        return Ok(());
    }
    let names: Vec<String> = snapshot.trainers.keys().cloned().collect();
    for name in names {
        let is_rival = rivals.is_rival(&name);
        let trainer = snapshot
            .trainers
            .get_mut(&name)
            .ok_or_else(|| RandomizerError::UnknownTrainer(name.clone()))?;
        let kind = trainer.trainer_type;
        let last = trainer.party.len().saturating_sub(1);

        for (index, slot) in trainer.party.iter_mut().enumerate() {
            if !(is_rival && index == last) {
                let match_types = match mode {
                    TrainerPartyMode::MatchTypes => Some(
                        baseline
                            .species
                            .get(&slot.species)
                            .ok_or_else(|| RandomizerError::UnknownSpecies(slot.species.clone()))?
                            .types,
                    ),
                    _ => None,
                };
                slot.species =
                    providers::random_species(rng, &snapshot.species, match_types.as_ref())?
                        .to_string();
            }

            if kind.has_items() {
                if let Some(item) = slot.item.as_mut() {
                    *item = providers::random_held_item(rng, &baseline.held_items)?.to_string();
                }
            }
            if kind.has_moves() {
                let learnset = &snapshot
                    .species
                    .get(&slot.species)
                    .ok_or_else(|| RandomizerError::UnknownSpecies(slot.species.clone()))?
                    .learnset;
                refill_moves(rng, slot, learnset)?;
            }
        }
    }
    Ok(())
}
