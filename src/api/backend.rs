use anyhow::{Context, Result};
use reqwest::Client;
use serde::de::DeserializeOwned;

use crate::app::log_error;
use crate::types::{Coin, GlobalStats, Health, TrendingData};

// Client for the lizard market server. Every public fetch swallows its
// error into the log and hands back a neutral fallback, so a dead or
// half-warmed backend degrades the display instead of killing it.
pub struct BackendClient {
    client: Client,
    base_url: String,
}

impl BackendClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(15))
                .user_agent("Mozilla/5.0 (compatible; desktop-app)")
                .build()
                .unwrap(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    // /health lives beside the API root, not under it.
    fn health_url(&self) -> String {
        let root = self
            .base_url
            .strip_suffix("/api")
            .unwrap_or(&self.base_url);
        format!("{}/health", root)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        let resp = self
            .client
            .get(url)
            .header("Accept", "application/json")
            .send()
            .await
            .with_context(|| format!("Failed to reach {}", url))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            anyhow::bail!(
                "Backend error {}: {}",
                status,
                &body[..body.len().min(300)]
            );
        }

        let text = resp.text().await.context("Failed to read response body")?;
        match serde_json::from_str(&text) {
            Ok(v) => Ok(v),
            Err(e) => {
                anyhow::bail!(
                    "Failed to parse response: {} | body: {}",
                    e,
                    &text[..text.len().min(300)]
                );
            }
        }
    }

    pub async fn fetch_coins(&self) -> Vec<Coin> {
        let url = format!("{}/coins", self.base_url);
        match self.get_json(&url).await {
            Ok(coins) => coins,
            Err(e) => {
                log_error(&format!("Coin list fetch failed: {}", e));
                Vec::new()
            }
        }
    }

    pub async fn fetch_coin_detail(&self, coin_id: &str) -> Option<Coin> {
        let url = format!("{}/coin/{}", self.base_url, coin_id);
        match self.get_json(&url).await {
            Ok(coin) => Some(coin),
            Err(e) => {
                log_error(&format!("Detail fetch for {} failed: {}", coin_id, e));
                None
            }
        }
    }

    pub async fn fetch_global(&self) -> Option<GlobalStats> {
        let url = format!("{}/global", self.base_url);
        match self.get_json(&url).await {
            Ok(stats) => Some(stats),
            Err(e) => {
                log_error(&format!("Global stats fetch failed: {}", e));
                None
            }
        }
    }

    pub async fn fetch_trending(&self) -> TrendingData {
        let url = format!("{}/trending", self.base_url);
        match self.get_json(&url).await {
            Ok(trending) => trending,
            Err(e) => {
                log_error(&format!("Trending fetch failed: {}", e));
                TrendingData::default()
            }
        }
    }

    // A server still booting answers this with status "loading"; only an
    // unreachable one lands in the Unavailable fallback.
    pub async fn fetch_health(&self) -> Health {
        match self.get_json(&self.health_url()).await {
            Ok(health) => health,
            Err(e) => {
                log_error(&format!("Health probe failed: {}", e));
                Health::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_endpoint_sits_beside_api_root() {
        let client = BackendClient::new("http://localhost:8080/api");
        assert_eq!(client.health_url(), "http://localhost:8080/health");
    }

    #[test]
    fn health_endpoint_without_api_suffix() {
        let client = BackendClient::new("http://localhost:9000");
        assert_eq!(client.health_url(), "http://localhost:9000/health");
    }

    #[test]
    fn trailing_slash_is_trimmed() {
        let client = BackendClient::new("http://localhost:8080/api/");
        assert_eq!(client.base_url, "http://localhost:8080/api");
        assert_eq!(client.health_url(), "http://localhost:8080/health");
    }
}
