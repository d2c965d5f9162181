//! Keeps rival battles pointed at the player's (possibly randomized)
//! starter line.
//!
//! Rival trainers are named `RIVAL_<SPECIES>_<...>`, where `<SPECIES>` is the
//! starter stage the rival fields in its final slot. The index is built from
//! the baseline once, so later rewrites never depend on name scans.

use std::collections::{BTreeMap, BTreeSet};

use log::warn;
use rand::Rng;

use crate::{
    data::{BaselineData, LearnsetEntry, PartySlot, NO_MOVE},
    error::RandomizerError,
    providers,
    snapshot::Snapshot,
};

pub const RIVAL_PREFIX: &str = "RIVAL_";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RivalIndex {
    by_stage: BTreeMap<String, Vec<String>>,
    rivals: BTreeSet<String>,
    ambiguous: Vec<String>,
}

impl RivalIndex {
    pub fn build(baseline: &BaselineData) -> Self {
        let mut index = RivalIndex::default();
        for name in baseline.trainers.keys() {
            let Some(rest) = name.strip_prefix(RIVAL_PREFIX) else {
                continue;
            };
            index.rivals.insert(name.clone());

            let mut matches: Vec<&str> = baseline
                .species
                .keys()
                .map(String::as_str)
                .filter(|species| names_stage(rest, species))
                .collect();
            matches.sort_by_key(|species| std::cmp::Reverse(species.len()));

            match matches.as_slice() {
                [] => warn!("rival trainer {name} does not name a species, leaving it unsynced"),
                [stage] => index.key(stage, name),
                [stage, others @ ..] => {
                    warn!(
                        "rival trainer {name} is ambiguous between {stage} and {}, keying it to {stage}",
                        others.join(", ")
                    );
                    index.ambiguous.push(name.clone());
                    index.key(stage, name);
                }
            }
        }
        index
    }

    fn key(&mut self, stage: &str, trainer: &str) {
        self.by_stage
            .entry(stage.to_string())
            .or_default()
            .push(trainer.to_string());
    }

    /// Rival trainers whose final slot fields `stage`.
    pub fn trainers_for(&self, stage: &str) -> &[String] {
        self.by_stage
            .get(stage)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn is_rival(&self, trainer: &str) -> bool {
        self.rivals.contains(trainer)
    }

    /// Rival trainers whose name matched more than one species.
    pub fn ambiguous(&self) -> &[String] {
        &self.ambiguous
    }
}

fn names_stage(rest: &str, species: &str) -> bool {
    match rest.strip_prefix(species) {
        Some(tail) => tail.is_empty() || tail.starts_with('_'),
        None => false,
    }
}

/// Points the final slot of every rival keyed to `old_stage` at `new_stage`.
/// Returns how many trainers were rewritten.
pub fn sync_rival_stage<R: Rng + ?Sized>(
    rng: &mut R,
    snapshot: &mut Snapshot,
    rivals: &RivalIndex,
    old_stage: &str,
    new_stage: &str,
) -> Result<usize, RandomizerError> {
    let learnset = &snapshot
        .species
        .get(new_stage)
        .ok_or_else(|| RandomizerError::UnknownSpecies(new_stage.to_string()))?
        .learnset;
    let trainers = rivals.trainers_for(old_stage);
    for trainer_name in trainers {
        let trainer = snapshot.trainers.get_mut(trainer_name).ok_or_else(|| {
            RandomizerError::DanglingRival {
                trainer: trainer_name.clone(),
                stage: old_stage.to_string(),
            }
        })?;
        let slot = trainer
            .party
            .last_mut()
            .ok_or_else(|| RandomizerError::EmptyRivalParty(trainer_name.clone()))?;
        slot.species = new_stage.to_string();
        refill_moves(rng, slot, learnset)?;
    }
    Ok(trainers.len())
}

/// Redraws every move slot ahead of the first `NO_MOVE` sentinel from
/// `learnset`, limited to moves known by the slot's level. Slots without a
/// move list are left alone.
pub fn refill_moves<R: Rng + ?Sized>(
    rng: &mut R,
    slot: &mut PartySlot,
    learnset: &[LearnsetEntry],
) -> Result<(), RandomizerError> {
    let PartySlot {
        level,
        species,
        moves,
        ..
    } = slot;
    let Some(moves) = moves.as_mut() else {
        return Ok(());
    };
    for move_slot in moves.iter_mut() {
        if move_slot == NO_MOVE {
            break;
        }
        *move_slot = providers::random_move_from_learnset(rng, species, learnset, *level)?
            .to_string();
    }
    Ok(())
}
