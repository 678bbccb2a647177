use super::match_stats::MatchStats;
use super::player::{PlayerIdentity, PlayerStats};
use crate::api::client::{short_id, RiotApiClient};
use crate::api::models::MatchDto;
use crate::cache::TtlCache;
use crate::error::AppError;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info, warn};

/// Values the engine keeps in the shared cache.
#[derive(Debug, Clone)]
pub enum Cached {
    Puuid(String),
    MatchIds(Vec<String>),
    Match(Arc<MatchDto>),
}

#[derive(Debug, Clone, Copy)]
pub struct CacheTtls {
    pub puuid: Duration,
    pub match_ids: Duration,
    pub match_details: Duration,
}

impl Default for CacheTtls {
    fn default() -> Self {
        CacheTtls {
            puuid: Duration::from_secs(3600),
            match_ids: Duration::from_secs(300),
            match_details: Duration::from_secs(1800),
        }
    }
}

/// Runs the analysis pipeline: identity, match ids, match details, reduction.
/// Every remote lookup goes through the cache first.
pub struct ReviewEngine {
    client: RiotApiClient,
    cache: TtlCache<Cached>,
    ttls: CacheTtls,
}

impl ReviewEngine {
    pub fn new(client: RiotApiClient, cache: TtlCache<Cached>, ttls: CacheTtls) -> Self {
        ReviewEngine { client, cache, ttls }
    }

    pub fn client(&self) -> &RiotApiClient {
        &self.client
    }

    pub fn cache(&self) -> &TtlCache<Cached> {
        &self.cache
    }

    pub fn analyze(
        &self,
        game_name: &str,
        tag_line: &str,
        region: &str,
        match_count: usize,
    ) -> Result<PlayerStats, AppError> {
        info!("Starting analysis for {}#{} in {}", game_name, tag_line, region);

        let puuid = self.puuid_cached(game_name, tag_line, region)?;
        info!("PUUID retrieved: {}...", short_id(&puuid));

        let match_ids = self.match_ids_cached(&puuid, region, match_count)?;
        info!("Retrieved {} match IDs", match_ids.len());

        let identity = PlayerIdentity::new(puuid, game_name, tag_line, region);
        if match_ids.is_empty() {
            warn!("No matches found for {}", identity.riot_id);
            return Ok(PlayerStats::new(identity, Vec::new()));
        }

        let total = match_ids.len();
        let outcomes: Vec<(&String, Result<MatchStats, AppError>)> = match_ids
            .iter()
            .enumerate()
            .map(|(i, match_id)| {
                info!("Processing match {}/{}: {}", i + 1, total, match_id);
                let outcome = self
                    .match_cached(match_id, region)
                    .and_then(|dto| MatchStats::extract(&dto, &identity.puuid));
                (match_id, outcome)
            })
            .collect();

        let matches: Vec<MatchStats> = outcomes
            .into_iter()
            .filter_map(|(match_id, outcome)| match outcome {
                Ok(stats) => Some(stats),
                Err(e) => {
                    error!("Error processing match {}: {}", match_id, e);
                    None
                }
            })
            .collect();

        info!("Successfully processed {}/{} matches", matches.len(), total);
        Ok(PlayerStats::new(identity, matches))
    }

    fn puuid_cached(&self, game_name: &str, tag_line: &str, region: &str) -> Result<String, AppError> {
        let key = format!("puuid:{}:{}:{}", game_name, tag_line, region);
        if let Some(Cached::Puuid(puuid)) = self.cache.get(&key) {
            return Ok(puuid);
        }

        let puuid = self.client.get_puuid(game_name, tag_line, region)?;
        self.cache
            .set_with_ttl(key, Cached::Puuid(puuid.clone()), self.ttls.puuid);
        Ok(puuid)
    }

    fn match_ids_cached(&self, puuid: &str, region: &str, count: usize) -> Result<Vec<String>, AppError> {
        let key = format!("matchids:{}:{}:{}", puuid, region, count);
        if let Some(Cached::MatchIds(ids)) = self.cache.get(&key) {
            return Ok(ids);
        }

        let ids = self.client.get_match_ids(puuid, region, count)?;
        self.cache
            .set_with_ttl(key, Cached::MatchIds(ids.clone()), self.ttls.match_ids);
        Ok(ids)
    }

    fn match_cached(&self, match_id: &str, region: &str) -> Result<Arc<MatchDto>, AppError> {
        let key = format!("match:{}:{}", match_id, region);
        if let Some(Cached::Match(dto)) = self.cache.get(&key) {
            return Ok(dto);
        }

        let dto = Arc::new(self.client.get_match(match_id, region)?);
        self.cache
            .set_with_ttl(key, Cached::Match(dto.clone()), self.ttls.match_details);
        Ok(dto)
    }
}
