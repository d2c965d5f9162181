use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use env_logger::Env;

use crystal_randomizer::{engine::EngineBuilder, output::OutputWriter, scenario::ScenarioLoader};

#[derive(Debug, Parser)]
#[command(author, version, about = "Pokemon Crystal game data randomizer")]
struct Cli {
    /// Path to the scenario YAML file
    #[arg(long, default_value = "scenarios/default.yaml")]
    scenario: PathBuf,

    /// Override the scenario seed
    #[arg(long)]
    seed: Option<u64>,

    /// Override the player name used in logs and the spoiler
    #[arg(long)]
    player: Option<String>,

    /// Directory for the generated snapshot, slot data and spoiler
    #[arg(long, default_value = "output")]
    output: PathBuf,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let loader = ScenarioLoader::new(".");
    let mut scenario = loader.load(&cli.scenario)?;
    if let Some(player) = cli.player {
        scenario.player = player;
    }
    let baseline = loader.load_baseline(&scenario)?;

    let mut engine = EngineBuilder::standard(scenario.engine_settings(cli.seed)).build();
    let snapshot = engine.run(&baseline)?;

    let written = OutputWriter::new(&cli.output).write(
        &scenario.name,
        engine.player_name(),
        &snapshot,
        engine.options(),
    )?;
    println!(
        "Scenario '{}' generated for {} ({} files in {})",
        scenario.name,
        engine.player_name(),
        written.len(),
        cli.output.display()
    );
    Ok(())
}
