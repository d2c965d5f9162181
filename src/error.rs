use thiserror::Error;

/// Baseline data that cannot be handed to the passes.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("baseline data has no {0}")]
    EmptyTable(&'static str),
    #[error("species {species} evolves into unknown species {target}")]
    UnknownEvolutionTarget { species: String, target: String },
    #[error("species {species} learns unknown move {move_name}")]
    UnknownLearnsetMove { species: String, move_name: String },
    #[error("species {species} learns a level {level} move after a level {previous} move")]
    UnorderedLearnset {
        species: String,
        previous: u8,
        level: u8,
    },
    #[error("starter line {line} names unknown species {species}")]
    UnknownStarter { line: usize, species: String },
    #[error("trainer {trainer} slot {slot} carries unknown species {species}")]
    UnknownPartySpecies {
        trainer: String,
        slot: usize,
        species: String,
    },
    #[error("trainer {trainer} slot {slot} does not match the {expected} slot layout")]
    SlotShape {
        trainer: String,
        slot: usize,
        expected: &'static str,
    },
    #[error("trainer {trainer} slot {slot} has {count} move slots (expected 1 to 4)")]
    MoveSlotCount {
        trainer: String,
        slot: usize,
        count: usize,
    },
    #[error("TM/HM table has {0} entries, at most 64 fit the compatibility set")]
    TmHmTableTooLarge(usize),
    #[error("TM/HM table names unknown move {0}")]
    UnknownTmHmMove(String),
    #[error("trainers carry held items but the held item pool is empty")]
    EmptyHeldItemPool,
    #[error("no move is eligible for random selection")]
    EmptyMovePool,
}

/// Invariant breaks detected while a pass mutates the snapshot.
#[derive(Debug, Error)]
pub enum RandomizerError {
    #[error("no candidates left when drawing {0}")]
    EmptyPool(String),
    #[error("unknown species {0}")]
    UnknownSpecies(String),
    #[error("unknown trainer {0}")]
    UnknownTrainer(String),
    #[error("rival trainer {trainer} is keyed to {stage} but is missing from the snapshot")]
    DanglingRival { trainer: String, stage: String },
    #[error("rival trainer {0} has an empty party")]
    EmptyRivalParty(String),
}
