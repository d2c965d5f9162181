pub mod data;
pub mod engine;
pub mod error;
pub mod options;
pub mod output;
pub mod passes;
pub mod providers;
pub mod rivals;
pub mod rng;
pub mod scenario;
pub mod snapshot;

pub use data::BaselineData;
pub use engine::{Engine, EngineBuilder, EngineSettings};
pub use options::RandomizerOptions;
pub use scenario::{Scenario, ScenarioLoader};
pub use snapshot::Snapshot;
