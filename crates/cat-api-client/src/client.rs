use std::time::Duration;

use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::error::{CatApiError, Result};
use crate::types::{Fact, FactResponse, ImageRef, ImageSearchItem};

pub const DEFAULT_FACT_URL: &str = "https://catfact.ninja/fact";
pub const DEFAULT_IMAGE_URL: &str = "https://api.thecatapi.com/v1/images/search";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// HTTP client for the fact and image upstreams. One attempt per call, no
/// retries.
pub struct CatApiClient {
    client: reqwest::Client,
    fact_url: String,
    image_url: String,
}

impl CatApiClient {
    /// Create a client against custom endpoints with a per-request timeout
    pub fn with_urls(fact_url: &str, image_url: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            fact_url: fact_url.to_string(),
            image_url: image_url.to_string(),
        })
    }

    /// Fetch one random fact
    pub async fn fetch_fact(&self) -> Result<Fact> {
        let data: FactResponse = self.get_json(&self.fact_url).await?;
        Ok(Fact::new(data.fact))
    }

    /// Fetch one random image; the first search result wins
    pub async fn fetch_image(&self) -> Result<ImageRef> {
        let items: Vec<ImageSearchItem> = self.get_json(&self.image_url).await?;
        let first = items
            .into_iter()
            .next()
            .ok_or_else(|| CatApiError::Malformed("image search returned no results".into()))?;

        Ok(ImageRef { url: first.url })
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        debug!(url, "Calling upstream");

        let response = self
            .client
            .get(url)
            .header("Accept", "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            warn!(url, status = %status, "Upstream request failed");
            return Err(CatApiError::Status(status.as_u16()));
        }

        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}
