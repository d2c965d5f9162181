use std::path::PathBuf;

use crystal_randomizer::{
    data::BaselineData,
    engine::{EngineBuilder, EngineSettings},
    options::{BaseStatMode, Goal, PaletteMode, RandomizerOptions},
    output::OutputWriter,
    scenario::{Scenario, ScenarioLoader},
    snapshot::Snapshot,
};

fn scenario_loader() -> ScenarioLoader {
    ScenarioLoader::new(env!("CARGO_MANIFEST_DIR"))
}

fn scenario_path() -> PathBuf {
    PathBuf::from("scenarios/default.yaml")
}

fn load() -> (Scenario, BaselineData) {
    let loader = scenario_loader();
    let scenario = loader.load(scenario_path()).expect("scenario parses");
    let baseline = loader.load_baseline(&scenario).expect("baseline loads");
    (scenario, baseline)
}

fn settings(seed: u64, options: RandomizerOptions) -> EngineSettings {
    EngineSettings {
        player_name: "Kris".into(),
        seed,
        options,
    }
}

#[test]
fn scenario_loader_reads_fixture() {
    let (scenario, baseline) = load();
    assert_eq!(scenario.name, "crystal_default");
    assert_eq!(scenario.player, "Kris");
    assert!(scenario.options.randomize_starters);
    assert_eq!(scenario.options.tm_compatibility, 40);
    assert_eq!(baseline.starters[0][0], "CYNDAQUIL");
    assert_eq!(baseline.tmhm.len(), 19);
    assert!(baseline.trainers.keys().any(|name| name.starts_with("RIVAL_")));
}

#[test]
fn engine_runs_deterministically() {
    let (scenario, baseline) = load();

    let mut engine_a = EngineBuilder::standard(scenario.engine_settings(None)).build();
    let snapshot_a = engine_a.run(&baseline).unwrap();

    let mut engine_b = EngineBuilder::standard(scenario.engine_settings(None)).build();
    let snapshot_b = engine_b.run(&baseline).unwrap();

    assert_eq!(snapshot_a, snapshot_b);
}

#[test]
fn repeated_runs_on_one_engine_match() {
    let (scenario, baseline) = load();
    let mut engine = EngineBuilder::standard(scenario.engine_settings(None)).build();

    let first = engine.run(&baseline).unwrap();
    let second = engine.run(&baseline).unwrap();

    assert_eq!(first, second);
}

#[test]
fn seed_override_changes_the_result() {
    let (scenario, baseline) = load();

    let mut engine_a = EngineBuilder::standard(scenario.engine_settings(None)).build();
    let snapshot_a = engine_a.run(&baseline).unwrap();

    let mut engine_b = EngineBuilder::standard(scenario.engine_settings(Some(7))).build();
    let snapshot_b = engine_b.run(&baseline).unwrap();

    assert_ne!(snapshot_a, snapshot_b);
}

#[test]
fn baseline_is_never_mutated() {
    let (scenario, baseline) = load();
    let pristine = baseline.clone();

    for seed in [1, 2] {
        let mut engine = EngineBuilder::standard(scenario.engine_settings(Some(seed))).build();
        engine.run(&baseline).unwrap();
    }

    assert_eq!(baseline, pristine);
}

#[test]
fn disabled_options_reproduce_the_baseline() {
    let (_, baseline) = load();
    let mut engine = EngineBuilder::standard(settings(11, RandomizerOptions::default())).build();
    let snapshot = engine.run(&baseline).unwrap();

    assert_eq!(snapshot, Snapshot::from_baseline(&baseline));
    assert!(engine.reports().iter().all(|report| !report.enabled));
}

#[test]
fn reports_follow_pass_order() {
    let (scenario, baseline) = load();
    let mut engine = EngineBuilder::standard(scenario.engine_settings(None)).build();
    engine.run(&baseline).unwrap();

    let names: Vec<&str> = engine.reports().iter().map(|r| r.name.as_str()).collect();
    assert_eq!(
        names,
        [
            "types",
            "palettes",
            "base_stats",
            "learnsets",
            "tm_hm",
            "starters",
            "trainer_parties"
        ]
    );
    assert!(engine.reports().iter().all(|report| report.enabled));
}

#[test]
fn toggling_a_pass_leaves_other_draws_alone() {
    let (_, baseline) = load();
    let stats_only = RandomizerOptions {
        randomize_base_stats: BaseStatMode::PreserveTotal,
        ..RandomizerOptions::default()
    };
    let with_palettes = RandomizerOptions {
        randomize_palettes: PaletteMode::Random,
        ..stats_only.clone()
    };

    let mut engine_a = EngineBuilder::standard(settings(42, stats_only)).build();
    let snapshot_a = engine_a.run(&baseline).unwrap();
    let mut engine_b = EngineBuilder::standard(settings(42, with_palettes)).build();
    let snapshot_b = engine_b.run(&baseline).unwrap();

    assert!(snapshot_a.palettes.is_empty());
    assert_eq!(snapshot_b.palettes.len(), baseline.species.len());
    assert_eq!(snapshot_a.species, snapshot_b.species);
}

#[test]
fn incompatible_options_are_corrected_on_build() {
    let loader = scenario_loader();
    let scenario = loader.load("scenarios/chaos.yaml").expect("scenario parses");
    assert_eq!(scenario.options.goal, Goal::Red);

    let engine = EngineBuilder::standard(scenario.engine_settings(None)).build();
    assert_eq!(engine.options().goal, Goal::EliteFour);
    assert_eq!(engine.options().elite_four_badges, 8);
    assert_eq!(engine.player_name(), "Gold");
}

#[test]
fn chaos_scenario_completes() {
    let loader = scenario_loader();
    let scenario = loader.load("scenarios/chaos.yaml").unwrap();
    let baseline = loader.load_baseline(&scenario).unwrap();

    for seed in 0..8 {
        let mut engine = EngineBuilder::standard(scenario.engine_settings(Some(seed))).build();
        engine
            .run(&baseline)
            .unwrap_or_else(|err| panic!("seed {seed} failed: {err:#}"));
    }
}

#[test]
fn output_writer_emits_run_files() {
    let (scenario, baseline) = load();
    let mut engine = EngineBuilder::standard(scenario.engine_settings(None)).build();
    let snapshot = engine.run(&baseline).unwrap();
    let temp_dir = tempfile::tempdir().unwrap();

    let written = OutputWriter::new(temp_dir.path())
        .write(&scenario.name, &scenario.player, &snapshot, engine.options())
        .unwrap();

    assert_eq!(written.len(), 3);
    let spoiler =
        std::fs::read_to_string(temp_dir.path().join("crystal_default_spoiler.txt")).unwrap();
    assert!(spoiler.starts_with("Starter Pokemon (Kris):"));
    for line in &snapshot.starters {
        assert!(spoiler.contains(&line.spoiler_line()));
    }

    let slot_data: serde_json::Value = serde_json::from_str(
        &std::fs::read_to_string(temp_dir.path().join("crystal_default_slot_data.json")).unwrap(),
    )
    .unwrap();
    assert_eq!(slot_data["randomize_starters"], 1);
    assert_eq!(slot_data["goal"], 0);
}
