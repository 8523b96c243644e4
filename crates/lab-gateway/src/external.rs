//! Cat fact + image aggregator
//!
//! Each upstream call goes through the lookaside cache under its own key.
//! The combined views call both in sequence; either failure fails the whole
//! request, and nothing partial is returned.

use cat_api_client::{CatApiClient, CatApiError, Fact, ImageRef};
use lookaside_cache::Lookaside;
use serde::{Deserialize, Serialize};
use tracing::info;

pub const FACT_CACHE_KEY: &str = "external:fact";
pub const IMAGE_CACHE_KEY: &str = "external:image";

/// Fact and image composed per request, never stored
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombinedCatInfo {
    pub fact: String,
    pub image_url: String,
}

pub struct CatService {
    client: CatApiClient,
    cache: Lookaside,
    ttl_secs: Option<u64>,
}

impl CatService {
    pub fn new(client: CatApiClient, cache: Lookaside, ttl_secs: Option<u64>) -> Self {
        Self {
            client,
            cache,
            ttl_secs,
        }
    }

    pub async fn get_fact(&self) -> Result<Fact, CatApiError> {
        self.cache
            .get_or_fetch(FACT_CACHE_KEY, self.ttl_secs, || self.client.fetch_fact())
            .await
    }

    pub async fn get_image(&self) -> Result<ImageRef, CatApiError> {
        self.cache
            .get_or_fetch(IMAGE_CACHE_KEY, self.ttl_secs, || self.client.fetch_image())
            .await
    }

    pub async fn get_combined(&self) -> Result<CombinedCatInfo, CatApiError> {
        let fact = self.get_fact().await?;
        let image = self.get_image().await?;
        info!("Combined cat info assembled");

        Ok(CombinedCatInfo {
            fact: fact.fact,
            image_url: image.url,
        })
    }

    pub async fn get_combined_html(&self) -> Result<String, CatApiError> {
        Ok(render_cat_page(&self.get_combined().await?))
    }
}

/// Fact and URL are inserted verbatim, without HTML escaping.
pub fn render_cat_page(info: &CombinedCatInfo) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Random Cat Fact</title>
</head>
<body>
    <div class="container">
        <img src="{image_url}" alt="Cute cat photo" />
        <p>{fact}</p>
    </div>
</body>
</html>
"#,
        image_url = info.image_url,
        fact = info.fact,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::RecordingStore;
    use lookaside_cache::{CacheStore, MemoryStore};
    use std::sync::Arc;
    use std::time::Duration;

    const FACT: &str = "A group of cats is called a clowder.";
    const IMAGE: &str = "https://cdn.example/cats/clowder.jpg";

    fn service_for(server: &mockito::Server, store: Arc<MemoryStore>) -> CatService {
        service_with_ttl(server, store, None)
    }

    fn service_with_ttl(
        server: &mockito::Server,
        store: Arc<dyn CacheStore>,
        ttl_secs: Option<u64>,
    ) -> CatService {
        let client = CatApiClient::with_urls(
            &format!("{}/fact", server.url()),
            &format!("{}/images/search", server.url()),
            Duration::from_secs(5),
        )
        .unwrap();
        CatService::new(client, Lookaside::new(store), ttl_secs)
    }

    async fn mock_fact(server: &mut mockito::Server, hits: usize) -> mockito::Mock {
        server
            .mock("GET", "/fact")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(format!(r#"{{"fact":"{FACT}","length":{}}}"#, FACT.len()))
            .expect(hits)
            .create_async()
            .await
    }

    async fn mock_image(server: &mut mockito::Server, hits: usize) -> mockito::Mock {
        server
            .mock("GET", "/images/search")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(format!(r#"[{{"id":"c1","url":"{IMAGE}"}}]"#))
            .expect(hits)
            .create_async()
            .await
    }

    #[tokio::test]
    async fn test_fact_is_cached_under_its_key() {
        let mut server = mockito::Server::new_async().await;
        let fact_mock = mock_fact(&mut server, 1).await;
        let store = Arc::new(MemoryStore::new());
        let service = service_for(&server, store.clone());

        let first = service.get_fact().await.unwrap();
        let second = service.get_fact().await.unwrap();

        fact_mock.assert_async().await;
        assert_eq!(first, second);
        assert_eq!(first.fact, FACT);
        assert!(store.get(FACT_CACHE_KEY).await.unwrap().is_some());
        assert!(store.get(IMAGE_CACHE_KEY).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_combined_matches_individual_calls() {
        let mut server = mockito::Server::new_async().await;
        let _fact = mock_fact(&mut server, 1).await;
        let _image = mock_image(&mut server, 1).await;
        let service = service_for(&server, Arc::new(MemoryStore::new()));

        let combined = service.get_combined().await.unwrap();

        assert_eq!(combined.fact, service.get_fact().await.unwrap().fact);
        assert_eq!(combined.image_url, service.get_image().await.unwrap().url);
    }

    #[tokio::test]
    async fn test_combined_fails_when_image_fails() {
        let mut server = mockito::Server::new_async().await;
        let _fact = mock_fact(&mut server, 1).await;
        let _mock = server
            .mock("GET", "/images/search")
            .with_status(500)
            .create_async()
            .await;
        let service = service_for(&server, Arc::new(MemoryStore::new()));

        assert!(service.get_combined().await.is_err());
    }

    #[tokio::test]
    async fn test_failed_fetch_not_cached() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/fact")
            .with_status(502)
            .create_async()
            .await;
        let store = Arc::new(MemoryStore::new());
        let service = service_for(&server, store.clone());

        assert!(service.get_fact().await.is_err());
        assert!(store.get(FACT_CACHE_KEY).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_ttl_applies_to_both_keys() {
        let mut server = mockito::Server::new_async().await;
        let _fact = mock_fact(&mut server, 1).await;
        let _image = mock_image(&mut server, 1).await;
        let store = Arc::new(RecordingStore::default());
        let service = service_with_ttl(&server, store.clone(), Some(42));

        service.get_combined().await.unwrap();

        assert_eq!(
            store.writes(),
            vec![
                (FACT_CACHE_KEY.to_string(), Some(42)),
                (IMAGE_CACHE_KEY.to_string(), Some(42)),
            ]
        );
    }

    #[test]
    fn test_render_embeds_values_verbatim() {
        let html = render_cat_page(&CombinedCatInfo {
            fact: "Cats <3 boxes".to_string(),
            image_url: IMAGE.to_string(),
        });

        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains(&format!(r#"<img src="{IMAGE}""#)));
        assert!(html.contains("<p>Cats <3 boxes</p>"));
    }
}
