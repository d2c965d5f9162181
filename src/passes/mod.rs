mod base_stats;
mod learnsets;
mod palettes;
mod starters;
mod tmhm;
mod trainers;
mod types;

pub use base_stats::{reassign_base_stats, BaseStatPass};
pub use learnsets::{reassign_learnsets, LearnsetPass};
pub use palettes::{assign_palettes, PalettePass};
pub use starters::{reassign_starters, StarterPass};
pub use tmhm::{reassign_tmhm, TmHmPass};
pub use trainers::{reassign_trainer_parties, TrainerPartyPass};
pub use types::{reassign_types, TypePass};
