use anyhow::Result;
use rand::Rng;

use crate::{
    engine::{Pass, PassContext},
    options::{PaletteMode, RandomizerOptions},
    providers,
    rng::PassRng,
    snapshot::{Palette, Snapshot},
};

pub struct PalettePass;

impl PalettePass {
    pub fn new() -> Self {
        Self
    }
}

impl Default for PalettePass {
    fn default() -> Self {
        Self::new()
    }
}

impl Pass for PalettePass {
    fn name(&self) -> &str {
        "palettes"
    }

    fn enabled(&self, options: &RandomizerOptions) -> bool {
        options.randomize_palettes != PaletteMode::Off
    }

    fn run(
        &mut self,
        ctx: &PassContext,
        snapshot: &mut Snapshot,
        rng: &mut PassRng,
    ) -> Result<()> {
        assign_palettes(rng, snapshot, ctx.options.randomize_palettes);
        Ok(())
    }
}

/// Fills the palette table from the snapshot's current types. The shiny
/// palette is always fully random.
pub fn assign_palettes<R: Rng + ?Sized>(rng: &mut R, snapshot: &mut Snapshot, mode: PaletteMode) {
    if mode == PaletteMode::Off {
        return;
    }
    for (name, record) in &snapshot.species {
        let normal = match mode {
            PaletteMode::MatchType => providers::type_colors(&record.types, rng),
            _ => providers::random_colors(rng),
        };
        let shiny = providers::random_colors(rng);
        snapshot
            .palettes
            .insert(name.clone(), Palette { normal, shiny });
    }
}
