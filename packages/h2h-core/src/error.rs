use thiserror::Error;

use crate::{EntryId, RoundRange};

/// Failures of a single standings aggregation. Both kinds are fatal for the call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StandingsError {
    /// A fixture names an entry that is not in the roster.
    #[error("data integrity: fixture in round {round} references unknown entry {entry_id}")]
    UnknownEntry { round: usize, entry_id: EntryId },

    /// The roster lists the same entry id twice.
    #[error("data integrity: entry {0} appears more than once in the roster")]
    DuplicateEntry(EntryId),

    /// The requested round range is inverted or runs past the season.
    #[error("round range {range} is invalid for a season of {rounds} rounds")]
    InvalidRange { range: RoundRange, rounds: usize },
}

impl StandingsError {
    /// True for errors caused by entries and fixtures disagreeing.
    pub fn is_data_integrity(&self) -> bool {
        matches!(self, Self::UnknownEntry { .. } | Self::DuplicateEntry(_))
    }
}

/// Failures building a season plan or batching its fixtures into rounds.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SeasonPlanError {
    #[error("a season needs at least one round")]
    NoRounds,

    #[error("a season needs at least one quarter")]
    NoQuarters,

    #[error("quarter {quarter} ({range}) is empty")]
    EmptyQuarter { quarter: usize, range: RoundRange },

    #[error("quarter {quarter} starts at round {found}, expected {expected}")]
    NotContiguous { quarter: usize, expected: usize, found: usize },

    #[error("quarters end at round {found}, expected the last round {expected}")]
    IncompleteCoverage { expected: usize, found: usize },

    #[error("league has {0} entries; head-to-head rounds need an even, non-zero count")]
    UnpairableEntries(usize),

    #[error("invalid number of fixtures ({found}) for {entries} entries, expected {expected}")]
    FixtureCount { found: usize, entries: usize, expected: usize },
}
