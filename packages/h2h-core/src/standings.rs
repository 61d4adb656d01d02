use std::collections::HashMap;

use tracing::debug;

use crate::{Entry, EntryId, Round, RoundRange, StandingRow, StandingsError};

pub struct StandingsEngine;

impl StandingsEngine {
    /// Aggregates rounds `range.start..=range.end` into a ranked standings table.
    ///
    /// Rows are ordered by ranking points, then total score, both descending.
    /// Entries tied on both keep their roster order, and ranks are re-numbered
    /// `1..=n` from the sorted position, so tied entries never share a rank.
    pub fn aggregate(
        entries: &[Entry],
        rounds: &[Round],
        range: RoundRange,
    ) -> Result<Vec<StandingRow>, StandingsError> {
        if range.start > range.end || range.end >= rounds.len() {
            return Err(StandingsError::InvalidRange { range, rounds: rounds.len() });
        }

        // Every entry starts at rank 1; corrected once sorting is done
        let mut rows: Vec<StandingRow> = Vec::with_capacity(entries.len());
        let mut index: HashMap<EntryId, usize> = HashMap::with_capacity(entries.len());
        for entry in entries {
            if index.insert(entry.id, rows.len()).is_some() {
                return Err(StandingsError::DuplicateEntry(entry.id));
            }
            rows.push(StandingRow::seed(entry.clone()));
        }

        let mut folded = 0usize;
        for (round, fixtures) in rounds.iter().enumerate().filter(|(i, _)| range.contains(*i)) {
            for fixture in fixtures {
                let [side_1, side_2] = fixture.sides();
                let row_1 = *index
                    .get(&side_1.entry_id)
                    .ok_or(StandingsError::UnknownEntry { round, entry_id: side_1.entry_id })?;
                let row_2 = *index
                    .get(&side_2.entry_id)
                    .ok_or(StandingsError::UnknownEntry { round, entry_id: side_2.entry_id })?;

                rows[row_1].record(side_1);
                rows[row_2].record(side_2);
                folded += 1;
            }
        }

        // `sort_by` is stable: full ties keep roster order
        rows.sort_by(|a, b| b.sort_key().cmp(&a.sort_key()));
        for (position, row) in rows.iter_mut().enumerate() {
            row.rank = position as u32 + 1;
        }

        debug!("Aggregated rounds {range}: {folded} fixtures, {} entries", rows.len());
        Ok(rows)
    }
}
