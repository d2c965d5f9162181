use anyhow::Result;
use rand::Rng;

use crate::{
    engine::{Pass, PassContext},
    options::{BaseStatMode, RandomizerOptions},
    providers,
    rng::PassRng,
    snapshot::Snapshot,
};

pub struct BaseStatPass;

impl BaseStatPass {
    pub fn new() -> Self {
        Self
    }
}

impl Default for BaseStatPass {
    fn default() -> Self {
        Self::new()
    }
}

impl Pass for BaseStatPass {
    fn name(&self) -> &str {
        "base_stats"
    }

    fn enabled(&self, options: &RandomizerOptions) -> bool {
        options.randomize_base_stats != BaseStatMode::Off
    }

    fn run(
        &mut self,
        ctx: &PassContext,
        snapshot: &mut Snapshot,
        rng: &mut PassRng,
    ) -> Result<()> {
        reassign_base_stats(rng, snapshot, ctx.options.randomize_base_stats);
        Ok(())
    }
}

pub fn reassign_base_stats<R: Rng + ?Sized>(
    rng: &mut R,
    snapshot: &mut Snapshot,
    mode: BaseStatMode,
) {
    let preserve_total = match mode {
        BaseStatMode::Off => return,
        BaseStatMode::PreserveTotal => true,
        BaseStatMode::Random => false,
    };
    for record in snapshot.species.values_mut() {
        let total = preserve_total.then(|| record.base_stats.total());
        record.base_stats = providers::random_base_stats(rng, total);
    }
}
