use anyhow::Result;
use rand::Rng;

use crate::{
    data::{BaselineData, LearnsetEntry},
    engine::{Pass, PassContext},
    error::RandomizerError,
    options::{LearnsetMode, RandomizerOptions},
    providers,
    rng::PassRng,
    snapshot::Snapshot,
};

pub struct LearnsetPass;

impl LearnsetPass {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LearnsetPass {
    fn default() -> Self {
        Self::new()
    }
}

impl Pass for LearnsetPass {
    fn name(&self) -> &str {
        "learnsets"
    }

    fn enabled(&self, options: &RandomizerOptions) -> bool {
        options.randomize_learnsets != LearnsetMode::Off
    }

    fn run(
        &mut self,
        ctx: &PassContext,
        snapshot: &mut Snapshot,
        rng: &mut PassRng,
    ) -> Result<()> {
        reassign_learnsets(rng, snapshot, ctx.baseline, ctx.options.randomize_learnsets)?;
        Ok(())
    }
}

/// Keeps every level a species learns something at and draws a fresh legal
/// move for each. `FillEmpty` also turns `NO_MOVE` placeholders into real
/// moves; `SameLevels` drops them.
pub fn reassign_learnsets<R: Rng + ?Sized>(
    rng: &mut R,
    snapshot: &mut Snapshot,
    baseline: &BaselineData,
    mode: LearnsetMode,
) -> Result<(), RandomizerError> {
    if mode == LearnsetMode::Off {
        return Ok(());
    }
    let pool = baseline.legal_moves();
    let fill_placeholders = mode == LearnsetMode::FillEmpty;
    for record in snapshot.species.values_mut() {
        record.learnset = record
            .learnset
            .iter()
            .filter(|entry| fill_placeholders || !entry.is_placeholder())
            .map(|entry| {
                providers::random_move(rng, &pool).map(|m| LearnsetEntry::new(entry.level, m))
            })
            .collect::<Result<Vec<_>, _>>()?;
    }
    Ok(())
}
