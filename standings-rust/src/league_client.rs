use h2h_core::{Entry, Fixture};
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

use crate::api::{LeagueStandingsResponse, MatchesPage, StandingsPage};
use crate::auth::FplSession;
use crate::error::ClientError;

/// Read-only access to one head-to-head league.
pub struct LeagueClient {
    session: FplSession,
    api_base: String,
    league_id: u64,
}

impl LeagueClient {
    pub fn new(session: FplSession, api_base: &str, league_id: u64) -> Self {
        Self {
            session,
            api_base: api_base.trim_end_matches('/').to_string(),
            league_id,
        }
    }

    pub fn standings_url(&self, page: u32) -> String {
        format!(
            "{}/leagues-h2h/{}/standings/?page_standings={page}",
            self.api_base, self.league_id
        )
    }

    pub fn matches_url(&self, page: u32) -> String {
        format!(
            "{}/leagues-h2h-matches/league/{}/?page={page}",
            self.api_base, self.league_id
        )
    }

    /// Every entry in the league, in the order the API lists them.
    pub async fn fetch_entries(&self) -> Result<Vec<Entry>, ClientError> {
        let mut entries = Vec::new();
        for page in 1.. {
            let resp: LeagueStandingsResponse = self.get(&self.standings_url(page)).await?;
            if !take_standings_page(&mut entries, resp.standings) {
                break;
            }
        }
        info!("League {}: {} entries", self.league_id, entries.len());
        Ok(entries)
    }

    /// Every match result in the league, chronologically.
    ///
    /// Pages are read from 1 until one comes back empty or says there is no next page.
    pub async fn fetch_fixtures(&self) -> Result<Vec<Fixture>, ClientError> {
        let mut matches = MatchLog::default();
        for page in 1.. {
            let resp: MatchesPage = self.get(&self.matches_url(page)).await?;
            debug!("Matches page {page}: {} fixtures", resp.results.len());
            if !matches.take_page(resp) {
                break;
            }
        }
        if matches.out_of_order > 0 {
            warn!("{} matches were listed out of event order", matches.out_of_order);
        }
        info!("League {}: {} fixtures", self.league_id, matches.fixtures.len());
        Ok(matches.fixtures)
    }

    async fn get<T: DeserializeOwned>(&self, url: &str) -> Result<T, ClientError> {
        let response = self
            .session
            .client()
            .get(url)
            .send()
            .await
            .map_err(|source| ClientError::Request { url: url.to_string(), source })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Status { url: url.to_string(), status });
        }

        response
            .json::<T>()
            .await
            .map_err(|source| ClientError::Decode { url: url.to_string(), source })
    }
}

/// Appends one standings page; true while another page follows.
fn take_standings_page(entries: &mut Vec<Entry>, page: StandingsPage) -> bool {
    debug!("Standings page {}: {} entries", page.page, page.results.len());
    entries.extend(page.results.into_iter().map(Entry::from));
    page.has_next
}

/// Match results gathered across pages, in listing order.
#[derive(Debug, Default)]
struct MatchLog {
    fixtures: Vec<Fixture>,
    last_event: Option<u32>,
    out_of_order: usize,
}

impl MatchLog {
    /// Appends one matches page; true while another page should be requested.
    ///
    /// An empty page ends the listing. So does `has_next: false`; a missing
    /// `has_next` keeps paging.
    fn take_page(&mut self, page: MatchesPage) -> bool {
        let MatchesPage { has_next, results } = page;
        if results.is_empty() {
            return false;
        }

        for m in results {
            if let (Some(prev), Some(event)) = (self.last_event, m.event) {
                if event < prev {
                    warn!("Match listing went back from event {prev} to {event}; rounds may be misaligned");
                    self.out_of_order += 1;
                }
            }
            self.last_event = m.event.or(self.last_event);

            let fixture = Fixture::from(m);
            let [a, b] = fixture.sides();
            if fixture != Fixture::scored(a.entry_id, a.points, b.entry_id, b.points) {
                warn!(
                    "Match {} v {} ({}-{}) reports an outcome that disagrees with its scores",
                    a.entry_id, b.entry_id, a.points, b.points
                );
            }
            self.fixtures.push(fixture);
        }

        has_next != Some(false)
    }
}
