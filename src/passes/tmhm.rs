use anyhow::Result;
use rand::Rng;

use crate::{
    data::BaselineData,
    engine::{Pass, PassContext},
    options::RandomizerOptions,
    providers,
    rng::PassRng,
    snapshot::Snapshot,
};

pub struct TmHmPass;

impl TmHmPass {
    pub fn new() -> Self {
        Self
    }
}

impl Default for TmHmPass {
    fn default() -> Self {
        Self::new()
    }
}

impl Pass for TmHmPass {
    fn name(&self) -> &str {
        "tm_hm"
    }

    fn enabled(&self, options: &RandomizerOptions) -> bool {
        options.tm_compatibility > 0 || options.hm_compatibility > 0
    }

    fn run(
        &mut self,
        ctx: &PassContext,
        snapshot: &mut Snapshot,
        rng: &mut PassRng,
    ) -> Result<()> {
        reassign_tmhm(
            rng,
            snapshot,
            ctx.baseline,
            ctx.options.tm_compatibility,
            ctx.options.hm_compatibility,
        );
        Ok(())
    }
}

/// Rolls compatibility against each species' current (possibly randomized)
/// types.
pub fn reassign_tmhm<R: Rng + ?Sized>(
    rng: &mut R,
    snapshot: &mut Snapshot,
    baseline: &BaselineData,
    tm_percent: u8,
    hm_percent: u8,
) {
    for record in snapshot.species.values_mut() {
        record.tm_hm = providers::tmhm_compatibility(
            rng,
            tm_percent,
            hm_percent,
            &record.types,
            record.tm_hm,
            &baseline.tmhm,
            &baseline.moves,
        );
    }
}
