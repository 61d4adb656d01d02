//! Season layout: how many rounds a season has, how its chronological fixture
//! list splits into rounds, and how the rounds partition into quarters.

use serde::Serialize;
use tracing::{debug, info};

use crate::{Entry, Fixture, Round, RoundRange, SeasonPlanError, StandingRow, StandingsEngine, StandingsError};

/// Rounds in a Premier League season.
pub const DEFAULT_SEASON_ROUNDS: usize = 38;

/// Quarter boundaries of a 38-round season.
pub const DEFAULT_QUARTERS: [RoundRange; 4] = [
    RoundRange::new(0, 9),
    RoundRange::new(10, 18),
    RoundRange::new(19, 28),
    RoundRange::new(29, 37),
];

/// A season length plus a gap-free, non-overlapping partition of its rounds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeasonPlan {
    rounds: usize,
    quarters: Vec<RoundRange>,
}

/// Standings for one quarter of the season.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuarterStandings {
    /// 1-based quarter number
    pub quarter: usize,
    pub range: RoundRange,
    pub rows: Vec<StandingRow>,
}

impl Default for SeasonPlan {
    fn default() -> Self {
        Self {
            rounds: DEFAULT_SEASON_ROUNDS,
            quarters: DEFAULT_QUARTERS.to_vec(),
        }
    }
}

impl SeasonPlan {
    /// Validates that `quarters` cover `0..rounds` in order, each round exactly once.
    pub fn new(rounds: usize, quarters: Vec<RoundRange>) -> Result<Self, SeasonPlanError> {
        if rounds == 0 {
            return Err(SeasonPlanError::NoRounds);
        }
        if quarters.is_empty() {
            return Err(SeasonPlanError::NoQuarters);
        }

        let mut next = 0;
        for (i, range) in quarters.iter().enumerate() {
            let quarter = i + 1;
            if range.is_empty() {
                return Err(SeasonPlanError::EmptyQuarter { quarter, range: *range });
            }
            if range.start != next {
                return Err(SeasonPlanError::NotContiguous { quarter, expected: next, found: range.start });
            }
            next = range.end + 1;
        }
        if next != rounds {
            return Err(SeasonPlanError::IncompleteCoverage { expected: rounds - 1, found: next - 1 });
        }

        Ok(Self { rounds, quarters })
    }

    pub fn rounds(&self) -> usize {
        self.rounds
    }

    pub fn quarters(&self) -> &[RoundRange] {
        &self.quarters
    }

    /// Splits a season's chronological fixture list into rounds.
    ///
    /// Every entry plays once per round, so each round holds `entry_count / 2`
    /// fixtures and the season must hold exactly `rounds * entry_count / 2`.
    pub fn batch_rounds(&self, fixtures: &[Fixture], entry_count: usize) -> Result<Vec<Round>, SeasonPlanError> {
        let per_round = entry_count / 2;
        if per_round == 0 || entry_count % 2 != 0 {
            return Err(SeasonPlanError::UnpairableEntries(entry_count));
        }

        let expected = self.rounds * per_round;
        if fixtures.len() != expected {
            return Err(SeasonPlanError::FixtureCount {
                found: fixtures.len(),
                entries: entry_count,
                expected,
            });
        }

        let rounds: Vec<Round> = fixtures.chunks(per_round).map(|chunk| chunk.to_vec()).collect();
        debug!("Batched {} fixtures into {} rounds of {per_round}", fixtures.len(), rounds.len());
        Ok(rounds)
    }

    /// Runs the aggregation for every quarter. Any failing quarter fails the lot.
    pub fn standings(&self, entries: &[Entry], rounds: &[Round]) -> Result<Vec<QuarterStandings>, StandingsError> {
        self.quarters
            .iter()
            .enumerate()
            .map(|(i, &range)| {
                let rows = StandingsEngine::aggregate(entries, rounds, range)?;
                if let Some(leader) = rows.first() {
                    info!(
                        "Q{} (rounds {}-{}): {} leads on {} pts / {} score",
                        i + 1,
                        range.start + 1,
                        range.end + 1,
                        leader.entry.team_name,
                        leader.ranking_points,
                        leader.total_score
                    );
                }
                Ok(QuarterStandings { quarter: i + 1, range, rows })
            })
            .collect()
    }
}
