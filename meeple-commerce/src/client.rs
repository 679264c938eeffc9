use std::sync::Arc;

use tokio::sync::Mutex;
use tokio::time::{Duration, Instant};

use crate::actions::{ProductUpdate, UpdateAction};
use crate::config::CommerceConfig;
use crate::error::CommerceError;
use crate::types::{ErrorResponse, Product, ProductPagedResponse};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Refresh the access token this long before its reported expiry.
const TOKEN_EXPIRY_MARGIN: Duration = Duration::from_secs(60);

/// Listing expansion that inlines master-variant price references.
pub const EXPAND_MASTER_PRICES: &str = "masterData.current.masterVariant.prices[*]";

struct CachedToken {
    access_token: String,
    expires_at: Instant,
}

#[derive(Debug, serde::Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: u64,
}

/// HTTP client for the commerce platform's product API.
///
/// Authenticates with the OAuth client-credentials flow and caches the
/// access token until shortly before expiry.
pub struct CommerceClient {
    http: reqwest::Client,
    config: CommerceConfig,
    token: Arc<Mutex<Option<CachedToken>>>,
}

impl CommerceClient {
    pub fn new(config: CommerceConfig) -> Result<Self, CommerceError> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            http,
            config,
            token: Arc::new(Mutex::new(None)),
        })
    }

    pub fn project_key(&self) -> &str {
        &self.config.project_key
    }

    /// Fetch one page of the product listing, sorted ascending by id.
    ///
    /// `last_id` is the pagination cursor: when set, only products with a
    /// strictly greater id are returned. A page with fewer than `limit`
    /// results is the final page.
    pub async fn list_products(
        &self,
        last_id: Option<&str>,
        limit: u32,
        expand: &[&str],
    ) -> Result<ProductPagedResponse, CommerceError> {
        let token = self.access_token().await?;

        let mut query: Vec<(&str, String)> = vec![
            ("limit", limit.to_string()),
            ("sort", "id asc".to_string()),
            ("withTotal", "false".to_string()),
        ];
        if let Some(id) = last_id {
            query.push(("where", format!("id > \"{id}\"")));
        }
        for e in expand {
            query.push(("expand", (*e).to_string()));
        }

        let resp = self
            .http
            .get(self.products_url(None))
            .bearer_auth(&token)
            .query(&query)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(CommerceError::Api {
                status: status.as_u16(),
                message: error_message(&body),
            });
        }

        Ok(resp.json().await?)
    }

    /// Fetch a single product's authoritative current state by id.
    pub async fn fetch_product(&self, id: &str) -> Result<Product, CommerceError> {
        let token = self.access_token().await?;

        let resp = self
            .http
            .get(self.products_url(Some(id)))
            .bearer_auth(&token)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(CommerceError::Api {
                status: status.as_u16(),
                message: error_message(&body),
            });
        }

        Ok(resp.json().await?)
    }

    /// Apply update actions to a product in one atomic call.
    ///
    /// `version` must be the product's current stored version; a stale value
    /// yields [`CommerceError::VersionConflict`] and nothing is applied.
    pub async fn update_product(
        &self,
        id: &str,
        version: i64,
        actions: Vec<UpdateAction>,
    ) -> Result<Product, CommerceError> {
        let token = self.access_token().await?;
        let body = ProductUpdate { version, actions };

        let resp = self
            .http
            .post(self.products_url(Some(id)))
            .bearer_auth(&token)
            .json(&body)
            .send()
            .await?;

        let status = resp.status();
        if status == reqwest::StatusCode::CONFLICT {
            return Err(CommerceError::VersionConflict {
                id: id.to_string(),
                expected: version,
            });
        }
        if status == reqwest::StatusCode::BAD_REQUEST {
            let text = resp.text().await.unwrap_or_default();
            return Err(CommerceError::Validation {
                id: id.to_string(),
                message: error_message(&text),
            });
        }
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            return Err(CommerceError::Api {
                status: status.as_u16(),
                message: error_message(&text),
            });
        }

        Ok(resp.json().await?)
    }

    fn products_url(&self, id: Option<&str>) -> String {
        match id {
            Some(id) => format!(
                "{}/{}/products/{}",
                self.config.api_url, self.config.project_key, id
            ),
            None => format!("{}/{}/products", self.config.api_url, self.config.project_key),
        }
    }

    /// Return a valid access token, fetching a fresh one when the cached
    /// token is absent or near expiry.
    async fn access_token(&self) -> Result<String, CommerceError> {
        let mut guard = self.token.lock().await;
        if let Some(cached) = guard.as_ref() {
            if Instant::now() < cached.expires_at {
                return Ok(cached.access_token.clone());
            }
        }

        let scope = self.config.scopes.join(" ");
        let resp = self
            .http
            .post(format!("{}/oauth/token", self.config.auth_url))
            .basic_auth(&self.config.client_id, Some(&self.config.client_secret))
            .form(&[("grant_type", "client_credentials"), ("scope", scope.as_str())])
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(CommerceError::Auth(format!(
                "token endpoint returned HTTP {}: {}",
                status.as_u16(),
                error_message(&body)
            )));
        }

        let token: TokenResponse = resp.json().await?;
        let ttl = Duration::from_secs(token.expires_in).saturating_sub(TOKEN_EXPIRY_MARGIN);
        let access = token.access_token.clone();
        *guard = Some(CachedToken {
            access_token: token.access_token,
            expires_at: Instant::now() + ttl,
        });

        log::debug!("obtained access token (ttl {}s)", token.expires_in);
        Ok(access)
    }
}

/// Best-effort extraction of a human-readable message from an error body.
fn error_message(body: &str) -> String {
    if let Ok(parsed) = serde_json::from_str::<ErrorResponse>(body) {
        if let Some(msg) = parsed.message {
            return msg;
        }
        if let Some(detail) = parsed.errors.into_iter().find_map(|e| e.message) {
            return detail;
        }
    }
    body.chars().take(200).collect()
}
