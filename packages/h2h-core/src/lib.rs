//! # h2h-core
//!
//! Head-to-head league standings for quarters of a fixed-length season.
//!
//! These types are used by:
//! - `standings-rust`: mapping the league API's entries and matches into
//!   [`Entry`] / [`Fixture`] and writing one [`StandingsDocument`] per quarter
//! - [`standings::StandingsEngine`]: folding a window of rounds into ranked rows
//! - [`season::SeasonPlan`]: batching a season's fixtures into rounds and
//!   partitioning the rounds into quarters
//!
//! ## Invariants
//! - `ranking_points == wins * 3 + draws` on every [`StandingRow`], recomputed on each update
//! - across any aggregated range, total wins equal total losses
//! - ranks in an aggregation result are exactly `1..=n` with no gaps or duplicates

use serde::{Deserialize, Serialize};

pub mod error;
pub mod season;
pub mod standings;

pub use error::{SeasonPlanError, StandingsError};
pub use season::{QuarterStandings, SeasonPlan};
pub use standings::StandingsEngine;

/// Stable league-wide entry identifier.
pub type EntryId = u64;

/// One scheduled batch of fixtures; every entry plays exactly once per round.
pub type Round = Vec<Fixture>;

// ── Entry ─────────────────────────────────────────────────────────────────────

/// A participant in the league: one team managed by one player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub id: EntryId,
    pub team_name: String,
    pub player_name: String,
}

impl Entry {
    pub fn new(id: EntryId, team_name: impl Into<String>, player_name: impl Into<String>) -> Self {
        Self {
            id,
            team_name: team_name.into(),
            player_name: player_name.into(),
        }
    }
}

// ── Fixture ───────────────────────────────────────────────────────────────────

/// One side of a head-to-head fixture.
///
/// Exactly one of `win` / `draw` / `loss` is 1. `points` is the raw score the
/// entry made that round and is independent of the outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixtureSide {
    pub entry_id: EntryId,
    pub win: u32,
    pub draw: u32,
    pub loss: u32,
    pub points: i64,
}

impl FixtureSide {
    pub fn won(entry_id: EntryId, points: i64) -> Self {
        Self { entry_id, win: 1, draw: 0, loss: 0, points }
    }

    pub fn drew(entry_id: EntryId, points: i64) -> Self {
        Self { entry_id, win: 0, draw: 1, loss: 0, points }
    }

    pub fn lost(entry_id: EntryId, points: i64) -> Self {
        Self { entry_id, win: 0, draw: 0, loss: 1, points }
    }
}

/// A single head-to-head result between two entries in one round.
/// Side order only matters for attribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fixture {
    pub entry_1: FixtureSide,
    pub entry_2: FixtureSide,
}

impl Fixture {
    /// Build a fixture from both raw scores, deriving win/draw/loss.
    pub fn scored(entry_1: EntryId, points_1: i64, entry_2: EntryId, points_2: i64) -> Self {
        use std::cmp::Ordering;
        let (side_1, side_2) = match points_1.cmp(&points_2) {
            Ordering::Greater => (FixtureSide::won(entry_1, points_1), FixtureSide::lost(entry_2, points_2)),
            Ordering::Less => (FixtureSide::lost(entry_1, points_1), FixtureSide::won(entry_2, points_2)),
            Ordering::Equal => (FixtureSide::drew(entry_1, points_1), FixtureSide::drew(entry_2, points_2)),
        };
        Self { entry_1: side_1, entry_2: side_2 }
    }

    pub fn sides(&self) -> [&FixtureSide; 2] {
        [&self.entry_1, &self.entry_2]
    }
}

// ── Round Range ───────────────────────────────────────────────────────────────

/// Inclusive range of 0-based round indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundRange {
    pub start: usize,
    pub end: usize,
}

impl RoundRange {
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Number of rounds covered. Zero for an inverted range.
    pub fn len(&self) -> usize {
        self.end.saturating_add(1).saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.start > self.end
    }

    pub fn contains(&self, round: usize) -> bool {
        self.start <= round && round <= self.end
    }
}

impl std::fmt::Display for RoundRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}..={}", self.start, self.end)
    }
}

// ── Standing Row ──────────────────────────────────────────────────────────────

/// One ranked line of a standings table.
///
/// Serialized as the positional record
/// `[rank, [id, team_name, player_name], wins, draws, losses, ranking_points, total_score]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "RowRecord", from = "RowRecord")]
pub struct StandingRow {
    pub rank: u32,
    pub entry: Entry,
    pub wins: u32,
    pub draws: u32,
    pub losses: u32,
    pub ranking_points: u32,
    pub total_score: i64,
}

impl StandingRow {
    /// Fresh row: placeholder rank 1, every counter zero.
    pub fn seed(entry: Entry) -> Self {
        Self {
            rank: 1,
            entry,
            wins: 0,
            draws: 0,
            losses: 0,
            ranking_points: 0,
            total_score: 0,
        }
    }

    /// Fold one fixture side into the running totals.
    pub fn record(&mut self, side: &FixtureSide) {
        self.wins += side.win;
        self.draws += side.draw;
        self.losses += side.loss;
        self.ranking_points = self.wins * 3 + self.draws;
        self.total_score += side.points;
    }

    /// Ordering key, compared descending when ranking.
    pub fn sort_key(&self) -> (u32, i64) {
        (self.ranking_points, self.total_score)
    }
}

#[derive(Serialize, Deserialize)]
struct RowRecord(u32, (EntryId, String, String), u32, u32, u32, u32, i64);

impl From<StandingRow> for RowRecord {
    fn from(row: StandingRow) -> Self {
        RowRecord(
            row.rank,
            (row.entry.id, row.entry.team_name, row.entry.player_name),
            row.wins,
            row.draws,
            row.losses,
            row.ranking_points,
            row.total_score,
        )
    }
}

impl From<RowRecord> for StandingRow {
    fn from(r: RowRecord) -> Self {
        let (id, team_name, player_name) = r.1;
        StandingRow {
            rank: r.0,
            entry: Entry { id, team_name, player_name },
            wins: r.2,
            draws: r.3,
            losses: r.4,
            ranking_points: r.5,
            total_score: r.6,
        }
    }
}

// ── Standings Document ────────────────────────────────────────────────────────

/// The persisted per-quarter output: `{"data": [row, row, ...]}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StandingsDocument {
    pub data: Vec<StandingRow>,
}

impl From<Vec<StandingRow>> for StandingsDocument {
    fn from(data: Vec<StandingRow>) -> Self {
        Self { data }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn row_serializes_as_positional_record() {
        let mut row = StandingRow::seed(Entry::new(7, "Klopp's Kids", "Zoë Ångström"));
        row.record(&FixtureSide::won(7, 64));
        row.rank = 2;

        let doc = StandingsDocument::from(vec![row]);
        let value = serde_json::to_value(&doc).unwrap();
        assert_eq!(
            value,
            json!({ "data": [[2, [7, "Klopp's Kids", "Zoë Ångström"], 1, 0, 0, 3, 64]] })
        );
    }

    #[test]
    fn document_reads_back_what_it_wrote() {
        let mut row = StandingRow::seed(Entry::new(3, "Team C", "Carol"));
        row.record(&FixtureSide::drew(3, 50));
        let doc = StandingsDocument::from(vec![row]);

        let text = serde_json::to_string(&doc).unwrap();
        assert!(text.contains("\"Carol\""));
        let back: StandingsDocument = serde_json::from_str(&text).unwrap();
        assert_eq!(back, doc);
    }

    #[test]
    fn record_keeps_ranking_points_in_step() {
        let mut row = StandingRow::seed(Entry::new(1, "A", "Ann"));
        row.record(&FixtureSide::won(1, 70));
        row.record(&FixtureSide::drew(1, 45));
        row.record(&FixtureSide::lost(1, 30));
        assert_eq!((row.wins, row.draws, row.losses), (1, 1, 1));
        assert_eq!(row.ranking_points, 4);
        assert_eq!(row.total_score, 145);
    }

    #[test]
    fn scored_fixture_derives_outcomes() {
        let f = Fixture::scored(1, 60, 2, 40);
        assert_eq!(f.entry_1, FixtureSide::won(1, 60));
        assert_eq!(f.entry_2, FixtureSide::lost(2, 40));

        let d = Fixture::scored(3, 50, 4, 50);
        assert_eq!(d.entry_1.draw + d.entry_2.draw, 2);
    }

    #[test]
    fn round_range_len() {
        assert_eq!(RoundRange::new(0, 9).len(), 10);
        assert_eq!(RoundRange::new(10, 18).len(), 9);
        assert!(RoundRange::new(5, 2).is_empty());
        assert_eq!(RoundRange::new(5, 2).len(), 0);
        assert!(RoundRange::new(10, 18).contains(18));
        assert!(!RoundRange::new(10, 18).contains(19));
    }

    #[test]
    fn round_range_len_at_the_top_of_usize() {
        assert_eq!(RoundRange::new(usize::MAX, usize::MAX).len(), 1);
        assert_eq!(RoundRange::new(0, usize::MAX).len(), usize::MAX);
        assert!(RoundRange::new(usize::MAX - 1, usize::MAX).contains(usize::MAX));
    }
}
