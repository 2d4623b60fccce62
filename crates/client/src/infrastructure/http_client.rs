//! HTTP adapter for the catalog API.
//!
//! The remote service speaks JSON:API: collections live under `/v1/{kind}`
//! with `page[number]` pagination and `filter[{field}]` substring filters.
//! This adapter only transports; decoding raw records into entities happens
//! in the domain codec.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;

use lorebook_domain::EntityKind;

use crate::config::ClientConfig;
use crate::ports::outbound::{ApiError, CatalogApiPort};

/// Catalog API client over reqwest.
#[derive(Clone)]
pub struct HttpCatalogApi {
    client: Client,
    base_url: String,
}

impl HttpCatalogApi {
    pub fn new(config: &ClientConfig) -> Self {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .unwrap_or_else(|_| Client::new());
        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        }
    }

    fn collection_url(&self, kind: EntityKind) -> String {
        format!("{}/v1/{}", self.base_url, kind.api_path())
    }

    fn record_url(&self, kind: EntityKind, id: &str) -> String {
        format!("{}/v1/{}/{}", self.base_url, kind.api_path(), id)
    }

    async fn get_json(&self, url: &str, query: &[(String, String)]) -> Result<Value, ApiError> {
        let response = self
            .client
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Http {
                status: status.as_u16(),
            });
        }

        response
            .json()
            .await
            .map_err(|e| ApiError::Malformed(e.to_string()))
    }
}

#[async_trait]
impl CatalogApiPort for HttpCatalogApi {
    async fn fetch_page(&self, kind: EntityKind, page: u32) -> Result<Value, ApiError> {
        let query = [("page[number]".to_string(), page.max(1).to_string())];
        self.get_json(&self.collection_url(kind), &query).await
    }

    async fn fetch_by_id(&self, kind: EntityKind, id: &str) -> Result<Value, ApiError> {
        self.get_json(&self.record_url(kind, id), &[]).await
    }

    async fn fetch_filtered(
        &self,
        kind: EntityKind,
        field: &str,
        value: &str,
        page: u32,
    ) -> Result<Value, ApiError> {
        let query = [
            (format!("filter[{field}]"), value.to_string()),
            ("page[number]".to_string(), page.max(1).to_string()),
        ];
        self.get_json(&self.collection_url(kind), &query).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn api(base_url: &str) -> HttpCatalogApi {
        HttpCatalogApi::new(&ClientConfig {
            base_url: base_url.to_string(),
            ..ClientConfig::default()
        })
    }

    #[test]
    fn collection_urls_use_the_plural_path() {
        let api = api("https://api.example.org");
        assert_eq!(
            api.collection_url(EntityKind::Character),
            "https://api.example.org/v1/characters"
        );
        assert_eq!(
            api.record_url(EntityKind::Potion, "p-1"),
            "https://api.example.org/v1/potions/p-1"
        );
    }

    #[test]
    fn trailing_slashes_in_the_base_url_are_trimmed() {
        let api = api("https://api.example.org/");
        assert_eq!(
            api.collection_url(EntityKind::Spell),
            "https://api.example.org/v1/spells"
        );
    }
}
