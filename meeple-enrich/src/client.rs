use std::sync::Arc;

use tokio::sync::Mutex;
use tokio::time::{Duration, Instant};

use crate::error::EnrichError;
use crate::types::{GameDetails, SearchHit};
use crate::xml;

const BASE_URL: &str = "https://boardgamegeek.com/xmlapi";

/// The database asks clients for roughly one request per five seconds.
const MIN_REQUEST_INTERVAL: Duration = Duration::from_secs(5);

/// Wait before retrying a request the server answered with 202 (queued).
const QUEUED_RETRY_DELAY: Duration = Duration::from_secs(15);
const MAX_QUEUED_RETRIES: u32 = 3;

const USER_AGENT: &str = concat!("meeple/", env!("CARGO_PKG_VERSION"), " (catalog migration)");

/// Rate-limited HTTP client for the game database's XML API.
pub struct GameDbClient {
    http: reqwest::Client,
    last_request: Arc<Mutex<Instant>>,
}

impl GameDbClient {
    pub fn new() -> Result<Self, EnrichError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            http,
            last_request: Arc::new(Mutex::new(Instant::now() - MIN_REQUEST_INTERVAL)),
        })
    }

    /// Search games by name. Not finding anything is a normal outcome and
    /// returns an empty list.
    pub async fn search(&self, query: &str) -> Result<Vec<SearchHit>, EnrichError> {
        let xml_text = self
            .fetch_xml(&format!("{BASE_URL}/search"), &[("search", query)])
            .await?;
        xml::parse_search(&xml_text)
    }

    /// Fetch a game's details by object id.
    pub async fn game_details(&self, object_id: &str) -> Result<Option<GameDetails>, EnrichError> {
        let xml_text = self
            .fetch_xml(&format!("{BASE_URL}/boardgame/{object_id}"), &[])
            .await?;
        xml::parse_game_details(&xml_text)
    }

    async fn fetch_xml(
        &self,
        url: &str,
        query: &[(&str, &str)],
    ) -> Result<String, EnrichError> {
        for attempt in 0..=MAX_QUEUED_RETRIES {
            self.rate_limit().await;

            log::debug!("fetching {url} (attempt {})", attempt + 1);
            let resp = self.http.get(url).query(query).send().await?;
            let status = resp.status();

            // 202 means the request was queued server-side; the payload
            // becomes available after a wait.
            if status == reqwest::StatusCode::ACCEPTED {
                log::info!("request queued by server, retrying in {}s", QUEUED_RETRY_DELAY.as_secs());
                tokio::time::sleep(QUEUED_RETRY_DELAY).await;
                continue;
            }

            if !status.is_success() {
                let body = resp.text().await.unwrap_or_default();
                return Err(EnrichError::ServerError {
                    status: status.as_u16(),
                    message: body.chars().take(200).collect(),
                });
            }

            return Ok(resp.text().await?);
        }

        Err(EnrichError::StillQueued(MAX_QUEUED_RETRIES))
    }

    /// Enforce rate limiting: wait until at least MIN_REQUEST_INTERVAL has
    /// passed since the last API request.
    async fn rate_limit(&self) {
        let mut last = self.last_request.lock().await;
        let elapsed = last.elapsed();
        if elapsed < MIN_REQUEST_INTERVAL {
            tokio::time::sleep(MIN_REQUEST_INTERVAL - elapsed).await;
        }
        *last = Instant::now();
    }
}

/// Pick the best search hit for a query: an exact primary-name match first,
/// then the first primary name, then the first hit of any kind.
pub fn pick_best_match<'a>(hits: &'a [SearchHit], query: &str) -> Option<&'a SearchHit> {
    hits.iter()
        .find(|h| h.primary && h.name == query)
        .or_else(|| hits.iter().find(|h| h.primary))
        .or_else(|| hits.first())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hit(id: &str, name: &str, primary: bool) -> SearchHit {
        SearchHit {
            object_id: id.to_string(),
            name: name.to_string(),
            primary,
        }
    }

    #[test]
    fn exact_primary_match_wins() {
        let hits = vec![
            hit("1", "Шакал: Остров сокровищ", true),
            hit("2", "Шакал", true),
        ];
        assert_eq!(pick_best_match(&hits, "Шакал").unwrap().object_id, "2");
    }

    #[test]
    fn first_primary_when_no_exact_match() {
        let hits = vec![hit("1", "Catan Card Game", false), hit("2", "CATAN", true)];
        assert_eq!(pick_best_match(&hits, "Колонизаторы").unwrap().object_id, "2");
    }

    #[test]
    fn first_hit_when_no_primary() {
        let hits = vec![hit("7", "Some Game", false)];
        assert_eq!(pick_best_match(&hits, "х").unwrap().object_id, "7");
    }

    #[test]
    fn empty_hits_yield_none() {
        assert!(pick_best_match(&[], "х").is_none());
    }
}
