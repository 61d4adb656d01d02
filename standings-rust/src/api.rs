//! Wire shapes of the league API responses, and their mapping onto `h2h_core` types.

use h2h_core::{Entry, EntryId, Fixture, FixtureSide};
use serde::Deserialize;

// ─── League Standings (`leagues-h2h/{id}/standings/`) ────────────────────────

#[derive(Debug, Clone, Deserialize)]
pub struct LeagueStandingsResponse {
    pub standings: StandingsPage,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StandingsPage {
    #[serde(default)]
    pub has_next: bool,
    #[serde(default)]
    pub page: u32,
    pub results: Vec<ApiEntry>,
}

/// One roster line; the API's own rank and totals are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiEntry {
    pub entry: EntryId,
    pub entry_name: String,
    pub player_name: String,
}

impl From<ApiEntry> for Entry {
    fn from(e: ApiEntry) -> Self {
        Entry {
            id: e.entry,
            team_name: e.entry_name,
            player_name: e.player_name,
        }
    }
}

// ─── League Matches (`leagues-h2h-matches/league/{id}/?page=N`) ──────────────

#[derive(Debug, Clone, Deserialize)]
pub struct MatchesPage {
    /// Absent on some responses; paging then runs until an empty page.
    #[serde(default)]
    pub has_next: Option<bool>,
    pub results: Vec<ApiMatch>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiMatch {
    #[serde(default)]
    pub event: Option<u32>,
    pub entry_1_entry: EntryId,
    pub entry_1_win: u32,
    pub entry_1_draw: u32,
    pub entry_1_loss: u32,
    pub entry_1_points: i64,
    pub entry_2_entry: EntryId,
    pub entry_2_win: u32,
    pub entry_2_draw: u32,
    pub entry_2_loss: u32,
    pub entry_2_points: i64,
}

impl From<ApiMatch> for Fixture {
    fn from(m: ApiMatch) -> Self {
        Fixture {
            entry_1: FixtureSide {
                entry_id: m.entry_1_entry,
                win: m.entry_1_win,
                draw: m.entry_1_draw,
                loss: m.entry_1_loss,
                points: m.entry_1_points,
            },
            entry_2: FixtureSide {
                entry_id: m.entry_2_entry,
                win: m.entry_2_win,
                draw: m.entry_2_draw,
                loss: m.entry_2_loss,
                points: m.entry_2_points,
            },
        }
    }
}
