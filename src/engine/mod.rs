use std::time::Instant;

use anyhow::{Context, Result};
use log::{debug, info};

use crate::{
    data::BaselineData,
    options::RandomizerOptions,
    passes::{
        BaseStatPass, LearnsetPass, PalettePass, StarterPass, TmHmPass, TrainerPartyPass,
        TypePass,
    },
    rivals::RivalIndex,
    rng::{PassRng, PassStreams},
    snapshot::Snapshot,
};

pub struct EngineSettings {
    pub player_name: String,
    pub seed: u64,
    pub options: RandomizerOptions,
}

pub struct EngineBuilder {
    settings: EngineSettings,
    passes: Vec<Box<dyn Pass>>,
}

impl EngineBuilder {
    pub fn new(settings: EngineSettings) -> Self {
        Self {
            settings,
            passes: Vec::new(),
        }
    }

    /// Every pass in the order later passes rely on: types feed palettes and
    /// TM/HM rolls, learnsets feed trainer moves, starters claim the rival
    /// slots before trainer parties are redrawn.
    pub fn standard(settings: EngineSettings) -> Self {
        Self::new(settings)
            .with_pass(TypePass::new())
            .with_pass(PalettePass::new())
            .with_pass(BaseStatPass::new())
            .with_pass(LearnsetPass::new())
            .with_pass(TmHmPass::new())
            .with_pass(StarterPass::new())
            .with_pass(TrainerPartyPass::new())
    }

    pub fn with_pass(mut self, pass: impl Pass + 'static) -> Self {
        self.passes.push(Box::new(pass));
        self
    }

    pub fn build(mut self) -> Engine {
        self.settings
            .options
            .correct_incompatible(&self.settings.player_name);
        Engine {
            passes: self.passes,
            settings: self.settings,
            reports: Vec::new(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct PassReport {
    pub name: String,
    pub enabled: bool,
    pub duration_ms: f64,
}

pub struct Engine {
    passes: Vec<Box<dyn Pass>>,
    settings: EngineSettings,
    reports: Vec<PassReport>,
}

impl Engine {
    /// Copies the baseline into a fresh snapshot and runs every enabled pass
    /// over it. The baseline itself is only ever read, and repeated runs with
    /// the same settings produce the same snapshot.
    pub fn run(&mut self, baseline: &BaselineData) -> Result<Snapshot> {
        let mut snapshot = Snapshot::from_baseline(baseline);
        let mut streams = PassStreams::new(self.settings.seed);
        let rivals = RivalIndex::build(baseline);
        let ctx = PassContext {
            baseline,
            options: &self.settings.options,
            rivals: &rivals,
            player_name: &self.settings.player_name,
        };

        self.reports.clear();
        for pass in &mut self.passes {
            // Streams are claimed even for skipped passes so toggling one
            // option never shifts another pass's draws.
            let rng = streams.stream(pass.name());
            let enabled = pass.enabled(ctx.options);
            let start = Instant::now();
            if enabled {
                debug!("running pass {}", pass.name());
                pass.run(&ctx, &mut snapshot, rng)
                    .with_context(|| format!("pass {} failed", pass.name()))?;
            } else {
                debug!("skipping pass {}", pass.name());
            }
            let duration_ms = start.elapsed().as_secs_f64() * 1_000.0;
            if enabled {
                info!("pass {} finished in {duration_ms:.3}ms", pass.name());
            }
            self.reports.push(PassReport {
                name: pass.name().to_string(),
                enabled,
                duration_ms,
            });
        }
        debug!(
            "seed {} streams claimed in order: {}",
            streams.seed(),
            streams.claimed().collect::<Vec<_>>().join(", ")
        );
        Ok(snapshot)
    }

    pub fn options(&self) -> &RandomizerOptions {
        &self.settings.options
    }

    pub fn player_name(&self) -> &str {
        &self.settings.player_name
    }

    pub fn reports(&self) -> &[PassReport] {
        &self.reports
    }
}

pub struct PassContext<'a> {
    pub baseline: &'a BaselineData,
    pub options: &'a RandomizerOptions,
    pub rivals: &'a RivalIndex,
    pub player_name: &'a str,
}

pub trait Pass {
    fn name(&self) -> &str;
    fn enabled(&self, options: &RandomizerOptions) -> bool;
    fn run(
        &mut self,
        ctx: &PassContext,
        snapshot: &mut Snapshot,
        rng: &mut PassRng,
    ) -> Result<()>;
}
